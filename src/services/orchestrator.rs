use std::{collections::HashSet, sync::Arc, time::Duration};

use tokio::time::{self, Instant};
use uuid::Uuid;

use crate::domain::{
    email_record::EmailRecord,
    scrape_form::ScrapeForm,
    scrape_report::{RegionReport, ScrapeReport, SearchStatus, UrlOutcome, UrlReport},
    search_request::SearchRequest,
};

use super::{fetch_emails, try_find_sites, FetchError, PageFetcher, SearchProvider};

/// Enforces a pause of at least `interval` between the end of one page fetch
/// and the start of the next.
pub struct Pacer {
    interval: Duration,
    last_fetch: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Pacer {
            interval,
            last_fetch: None,
        }
    }

    pub async fn wait(&self) {
        if let Some(last_fetch) = self.last_fetch {
            let next_fetch = last_fetch + self.interval;
            if Instant::now() < next_fetch {
                time::sleep_until(next_fetch).await;
            }
        }
    }

    /// Marks the end of a fetch, the pause is measured from here.
    pub fn fetched(&mut self) {
        self.last_fetch = Some(Instant::now());
    }
}

/// Accumulated state of one scrape, from submission to report.
struct ScrapeRun {
    topic: String,
    seen_emails: HashSet<String>,
    regions: Vec<RegionReport>,
    valid_emails: Vec<EmailRecord>,
}

impl ScrapeRun {
    fn new(topic: &str) -> Self {
        ScrapeRun {
            topic: topic.to_string(),
            seen_emails: HashSet::new(),
            regions: vec![],
            valid_emails: vec![],
        }
    }

    fn record_page(
        &mut self,
        region_report: &mut RegionReport,
        url: &str,
        result: Result<Vec<String>, FetchError>,
    ) {
        let (emails, outcome) = match result {
            Ok(emails) if emails.is_empty() => (emails, UrlOutcome::NoEmails),
            Ok(emails) => {
                let found = emails.len();
                (emails, UrlOutcome::Emails(found))
            }
            Err(e) => {
                log::warn!("{}", e);
                (vec![], UrlOutcome::FetchFailed(e.to_string()))
            }
        };

        match emails.is_empty() {
            true => region_report.records.push(EmailRecord::no_emails_found(
                &self.topic,
                &region_report.region,
                url,
            )),
            false => {
                for email in emails {
                    if self.seen_emails.insert(email.clone()) {
                        let record =
                            EmailRecord::new(&self.topic, &region_report.region, url, &email);
                        region_report.records.push(record.clone());
                        self.valid_emails.push(record);
                    }
                }
            }
        }

        region_report.urls.push(UrlReport {
            url: url.to_string(),
            outcome,
        });
    }

    fn finish(self) -> ScrapeReport {
        ScrapeReport {
            run_id: Uuid::new_v4(),
            search_topic: self.topic,
            regions: self.regions,
            valid_emails: self.valid_emails,
        }
    }
}

/// Runs the search, fetch and extract pipeline for every region of a form, one request at a time.
pub struct Scraper {
    search_provider: Arc<dyn SearchProvider>,
    page_fetcher: Arc<dyn PageFetcher>,
    politeness_delay: Duration,
}

impl Scraper {
    pub fn new(
        search_provider: Arc<dyn SearchProvider>,
        page_fetcher: Arc<dyn PageFetcher>,
        politeness_delay: Duration,
    ) -> Self {
        Scraper {
            search_provider,
            page_fetcher,
            politeness_delay,
        }
    }

    pub async fn run(&self, form: &ScrapeForm) -> ScrapeReport {
        let mut run = ScrapeRun::new(&form.topic);
        let mut pacer = Pacer::new(self.politeness_delay);

        for region in form.regions.iter() {
            let Some(request) = SearchRequest::new(&form.topic, region, form.max_results) else {
                log::warn!("Skipping blank region in search for {}", form.topic);
                continue;
            };
            log::info!("Searching for {} in {}", request.topic, request.region);

            let (urls, search_status) =
                match try_find_sites(self.search_provider.as_ref(), &request).await {
                    Ok(urls) => {
                        let found = urls.len();
                        (urls, SearchStatus::Found(found))
                    }
                    Err(e) => {
                        log::error!("Search failed for query {}: {}", request.query(), e);
                        (vec![], SearchStatus::Failed(e.to_string()))
                    }
                };

            let mut region_report = RegionReport::new(&request.region, search_status);
            for (i, url) in urls.iter().enumerate() {
                pacer.wait().await;
                let result = fetch_emails(
                    self.page_fetcher.as_ref(),
                    url,
                    form.allowed_domains.as_ref(),
                )
                .await;
                pacer.fetched();
                run.record_page(&mut region_report, url, result);

                log::info!("{}: {}/{} scraped", request.region, i + 1, urls.len());
            }

            run.regions.push(region_report);
        }

        let report = run.finish();
        log::info!(
            "Extracted {} valid emails across {} region(s) from {} urls ({} failed)",
            report.valid_emails.len(),
            report.regions.len(),
            report.total_urls(),
            report.failed_fetches()
        );

        report
    }
}
