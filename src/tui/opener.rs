//! Hands article URLs to the user's browser.

use log::{info, warn};

pub trait UrlOpener: Send + Sync {
    /// Best effort. Failures are logged, never surfaced to the reader.
    fn open(&self, url: &str);
}

/// Opens URLs with the platform's default browser.
pub struct BrowserOpener;

impl UrlOpener for BrowserOpener {
    fn open(&self, url: &str) {
        match webbrowser::open(url) {
            Ok(()) => info!("Opened {} in browser", url),
            Err(e) => warn!("Failed to open {}: {}", url, e),
        }
    }
}
