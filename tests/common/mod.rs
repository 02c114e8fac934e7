#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use leadscrape::{
    configuration::{ScraperSettings, SearchSettings},
    services::{FetchError, PageFetcher, Scraper, SearchError, SearchProvider},
};

pub fn scraper_settings(request_timeout_secs: u64) -> ScraperSettings {
    ScraperSettings {
        request_timeout_secs,
        user_agent: "Mozilla/5.0".to_string(),
        politeness_delay_ms: 0,
    }
}

pub fn search_settings(base_url: &str, page_depth: u8) -> SearchSettings {
    SearchSettings {
        base_url: base_url.to_string(),
        language: "en".to_string(),
        page_depth,
        default_max_results: 10,
        min_max_results: 5,
        max_results_limit: 30,
    }
}

/// Search provider answering from a fixed query table and recording every call.
#[derive(Default)]
pub struct RecordingProvider {
    pub results: HashMap<String, Vec<String>>,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingProvider {
    pub fn new(results: Vec<(&str, Vec<&str>)>) -> Self {
        RecordingProvider {
            results: results
                .into_iter()
                .map(|(query, urls)| {
                    (
                        query.to_string(),
                        urls.iter().map(|u| u.to_string()).collect(),
                    )
                })
                .collect(),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchProvider for RecordingProvider {
    async fn search(&self, query: &str, _max_results: usize) -> Result<Vec<String>, SearchError> {
        self.calls.lock().unwrap().push(query.to_string());
        self.results
            .get(query)
            .cloned()
            .ok_or_else(|| SearchError::CaptchaBlocked(query.to_string()))
    }
}

/// Page fetcher serving in-memory page bodies and recording every call.
#[derive(Default)]
pub struct RecordingFetcher {
    pub pages: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        RecordingFetcher {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for RecordingFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(page) => Ok(page.clone()),
            None => {
                let source = reqwest::Client::new()
                    .get("not a url")
                    .send()
                    .await
                    .unwrap_err();
                Err(FetchError::Request {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}

pub fn scraper(provider: Arc<RecordingProvider>, fetcher: Arc<RecordingFetcher>) -> Scraper {
    Scraper::new(provider, fetcher, Duration::ZERO)
}
