use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use wikiterm::core::config;
use wikiterm::tui;

#[derive(Parser)]
#[command(name = "wikiterm", about = "Read Wikipedia in the terminal")]
struct Args {
    /// Wikipedia language edition (e.g. en, de, fr)
    #[arg(short, long)]
    lang: Option<String>,

    /// Where to write the log
    #[arg(long, default_value = "wikiterm.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "WIKITERM_LOG", default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // The screen belongs to the reader, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("wikiterm: {}", e);
            return Err(std::io::Error::other(e));
        }
    };
    let resolved = config::resolve(&file_config, args.lang.as_deref());

    log::info!(
        "Wikiterm starting up: language={}, api={}",
        resolved.language,
        resolved.api_url
    );

    tui::run(resolved)
}
