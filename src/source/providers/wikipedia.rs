//! Wikipedia source using the MediaWiki action API.
//!
//! One request resolves the page (following redirects) and returns its
//! plain-text extract plus page properties. A disambiguation page needs a
//! second request for its outgoing article links:
//!
//! ```text
//! titles=Q, prop=extracts|pageprops ──▶ missing/invalid ──▶ NotFound
//!                                   ──▶ disambiguation  ──▶ prop=links ──▶ Disambiguation
//!                                   ──▶ otherwise       ──▶ Found
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::core::config::ResolvedConfig;
use crate::source::{ArticleSource, LookupOutcome, SourceError};

/// Upper bound on link batches followed for one disambiguation page.
const MAX_LINK_BATCHES: usize = 10;

// ============================================================================
// MediaWiki API Types (formatversion=2)
// ============================================================================

#[derive(Deserialize, Debug)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(rename = "continue", default)]
    continuation: Option<Continuation>,
}

/// Present when a list was cut at the limit; echo it back for the next batch.
#[derive(Deserialize, Debug)]
struct Continuation {
    #[serde(default)]
    plcontinue: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize, Debug, Default)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Deserialize, Debug)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Deserialize, Debug)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Link {
    title: String,
}

// ============================================================================
// Source Implementation
// ============================================================================

pub struct WikipediaSource {
    api_url: String,
    article_url: String,
    client: reqwest::Client,
}

impl WikipediaSource {
    pub fn new(
        api_url: impl Into<String>,
        article_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;
        Ok(Self {
            api_url: api_url.into(),
            article_url: article_url.into(),
            client,
        })
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self, SourceError> {
        Self::new(
            config.api_url.clone(),
            config.article_url.clone(),
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }

    async fn query(
        &self,
        params: &[(&str, &str)],
    ) -> Result<(QueryBody, Option<Continuation>), SourceError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Wikipedia response status: {}", status);
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Wikipedia API error: {} - {}", status, message);
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

        if let Some(error) = parsed.error {
            warn!("Wikipedia API returned error {}: {}", error.code, error.info);
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: format!("{}: {}", error.code, error.info),
            });
        }
        Ok((parsed.query.unwrap_or_default(), parsed.continuation))
    }

    async fn disambiguation_options(&self, title: &str) -> Result<Vec<String>, SourceError> {
        let mut options = Vec::new();
        let mut next: Option<String> = None;

        for _ in 0..MAX_LINK_BATCHES {
            let mut params = vec![
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", "max"),
                ("titles", title),
            ];
            if let Some(token) = next.as_deref() {
                params.push(("plcontinue", token));
            }
            let (body, continuation) = self.query(&params).await?;
            options.extend(
                body.pages
                    .into_iter()
                    .flat_map(|page| page.links)
                    .map(|link| link.title),
            );

            next = continuation.and_then(|c| c.plcontinue);
            if next.is_none() {
                return Ok(options);
            }
            debug!(
                "Following plcontinue for {:?} ({} links so far)",
                title,
                options.len()
            );
        }

        warn!(
            "Stopped listing links for {:?} after {} batches ({} links)",
            title,
            MAX_LINK_BATCHES,
            options.len()
        );
        Ok(options)
    }
}

#[async_trait]
impl ArticleSource for WikipediaSource {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> Result<LookupOutcome, SourceError> {
        info!("Wikipedia lookup: {:?}", query);
        let (body, _) = self
            .query(&[
                ("prop", "extracts|pageprops"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", query),
            ])
            .await?;

        let Some(page) = body.pages.into_iter().next() else {
            return Ok(LookupOutcome::NotFound);
        };
        if page.missing || page.invalid {
            return Ok(LookupOutcome::NotFound);
        }

        let is_disambiguation = page
            .pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some());
        if is_disambiguation {
            let options = if page.links.is_empty() {
                self.disambiguation_options(&page.title).await?
            } else {
                page.links.into_iter().map(|link| link.title).collect()
            };
            debug!("{} disambiguation options for {:?}", options.len(), page.title);
            return Ok(LookupOutcome::Disambiguation { options });
        }

        Ok(LookupOutcome::Found {
            title: page.title,
            body: page.extract.unwrap_or_default(),
        })
    }

    fn article_url(&self, title: &str) -> String {
        format!("{}{}", self.article_url, title.replace(' ', "_"))
    }
}
