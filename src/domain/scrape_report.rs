use serde::Serialize;
use uuid::Uuid;

use super::email_record::EmailRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SearchStatus {
    Found(usize),
    Failed(String),
}

/// What happened to a single result URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum UrlOutcome {
    /// Number of filtered emails on the page, including ones already seen in this run.
    Emails(usize),
    NoEmails,
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlReport {
    pub url: String,
    pub outcome: UrlOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub region: String,
    pub search_status: SearchStatus,
    pub urls: Vec<UrlReport>,
    /// Display listing: first-seen emails and one sentinel per empty URL.
    pub records: Vec<EmailRecord>,
}

impl RegionReport {
    pub fn new(region: &str, search_status: SearchStatus) -> Self {
        RegionReport {
            region: region.to_string(),
            search_status,
            urls: vec![],
            records: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeReport {
    pub run_id: Uuid,
    pub search_topic: String,
    pub regions: Vec<RegionReport>,
    /// Exportable collection, one record per distinct email in first-seen order.
    pub valid_emails: Vec<EmailRecord>,
}

impl ScrapeReport {
    pub fn total_urls(&self) -> usize {
        self.regions.iter().map(|r| r.urls.len()).sum()
    }

    pub fn failed_fetches(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| r.urls.iter())
            .filter(|u| matches!(u.outcome, UrlOutcome::FetchFailed(_)))
            .count()
    }

    pub fn failed_searches(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| matches!(r.search_status, SearchStatus::Failed(_)))
            .count()
    }
}
