use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::email_candidate::extract_candidates;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Raw body text of the page, whatever the response status.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Timeout and user agent come from the client.
    pub fn new(client: Client) -> Self {
        HttpPageFetcher { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        if !res.status().is_success() {
            log::debug!("Scanning {} body of {}", res.status(), url);
        }

        res.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}

/// Fetches `url` and returns the filtered email candidates found in its body.
pub async fn fetch_emails(
    fetcher: &dyn PageFetcher,
    url: &str,
    allowed_domains: Option<&HashSet<String>>,
) -> Result<Vec<String>, FetchError> {
    let page_source = fetcher.fetch_text(url).await?;
    let emails = extract_candidates(&page_source, allowed_domains);

    log::info!("Found {} emails on {}", emails.len(), url);

    Ok(emails)
}

/// Like [`fetch_emails`] but a failed fetch yields no emails.
pub async fn extract_emails(
    fetcher: &dyn PageFetcher,
    url: &str,
    allowed_domains: Option<&HashSet<String>>,
) -> Vec<String> {
    fetch_emails(fetcher, url, allowed_domains)
        .await
        .unwrap_or_else(|e| {
            log::warn!("{}", e);
            vec![]
        })
}
