use async_trait::async_trait;
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::{configuration::SearchSettings, domain::search_request::SearchRequest};

// Navigation, account and cache links on the results page
const GOOGLE_HOST_FRAGMENTS: [&str; 3] = ["google.", "googleusercontent.", "gstatic."];

static A_TAG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("no response from search provider: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search provider answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("blocked by captcha on query: {0}")]
    CaptchaBlocked(String),
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Result urls in rank order. May repeat urls and exceed `max_results`.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SearchError>;
}

#[derive(Serialize)]
struct GoogleQuery<'a> {
    q: &'a str,
    num: usize,
    hl: &'a str,
    start: usize,
}

/// Scrapes the html result pages of a Google compatible search endpoint.
pub struct GoogleScraper {
    client: Client,
    search_url: String,
    language: String,
    page_depth: u8,
}

impl GoogleScraper {
    pub fn new(client: Client, settings: &SearchSettings) -> Self {
        GoogleScraper {
            client,
            search_url: format!("{}/search", settings.base_url.trim_end_matches('/')),
            language: settings.language.clone(),
            page_depth: settings.page_depth.max(1),
        }
    }

    async fn search_page(
        &self,
        query: &str,
        max_results: usize,
        start: usize,
    ) -> Result<Vec<String>, SearchError> {
        let res = self
            .client
            .get(&self.search_url)
            .query(&GoogleQuery {
                q: query,
                num: max_results.saturating_add(2),
                hl: &self.language,
                start,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let html_content = res.text().await?;
        let links = parse_result_links(&html_content);

        if links.is_empty() {
            if html_content.contains("did not match any documents") {
                log::info!("Found no results on query: {}", query);
            } else if html_content.contains("unusual traffic") || html_content.contains("captcha") {
                return Err(SearchError::CaptchaBlocked(query.to_string()));
            }
        }

        Ok(links)
    }
}

#[async_trait]
impl SearchProvider for GoogleScraper {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SearchError> {
        let mut links: Vec<String> = vec![];
        let mut start = 0;

        for page in 0..self.page_depth {
            let page_links = match self.search_page(query, max_results, start).await {
                Ok(page_links) => page_links,
                Err(e) if page > 0 => {
                    log::warn!("Stopping at page {} for query {}: {}", page + 1, query, e);
                    break;
                }
                Err(e) => return Err(e),
            };

            // Several anchors may point at one result, the offset counts results
            let found = page_links.iter().unique().count();
            log::info!(
                "Found {} urls on page {} for query: {}",
                found,
                page + 1,
                query
            );

            links.extend(page_links);
            start += found;

            if found == 0 || links.len() >= max_results {
                break;
            }
        }

        Ok(links)
    }
}

/// Result urls of a search page in document order.
pub fn parse_result_links(html: &str) -> Vec<String> {
    let html_document = Html::parse_document(html);

    html_document
        .select(&A_TAG_SELECTOR)
        .filter_map(|tag| tag.value().attr("href"))
        .filter_map(extract_result_url)
        .collect()
}

/// Accepts `/url?q=<target>` redirects and absolute http(s) links to non Google hosts.
pub fn extract_result_url(href: &str) -> Option<String> {
    let target = match href.strip_prefix("/url?") {
        Some(query) => form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "q" || key == "url")
            .map(|(_, value)| value.into_owned())?,
        None => href.to_string(),
    };

    let parsed_url = Url::parse(&target).ok()?;
    if !matches!(parsed_url.scheme(), "http" | "https") {
        return None;
    }

    match parsed_url.host_str() {
        None | Some("") => None,
        Some(host)
            if GOOGLE_HOST_FRAGMENTS
                .iter()
                .any(|fragment| host.contains(fragment)) =>
        {
            None
        }
        Some(_) => Some(target),
    }
}

/// Ordered, distinct result urls for the request, at most `max_results` of them.
pub async fn try_find_sites(
    provider: &dyn SearchProvider,
    request: &SearchRequest,
) -> Result<Vec<String>, SearchError> {
    let urls = provider
        .search(&request.query(), request.max_results)
        .await?;

    Ok(urls
        .into_iter()
        .filter(|url| !url.is_empty())
        .unique()
        .take(request.max_results)
        .collect())
}

/// Like [`try_find_sites`] but a failed search yields no urls.
pub async fn find_sites(provider: &dyn SearchProvider, request: &SearchRequest) -> Vec<String> {
    match try_find_sites(provider, request).await {
        Ok(urls) => urls,
        Err(e) => {
            log::error!("Search failed for query {}: {}", request.query(), e);
            vec![]
        }
    }
}
