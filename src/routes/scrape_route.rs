use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use askama::Template;

use crate::{
    domain::{
        scrape_form::{ResultsRange, ScrapeForm, ScrapeFormInput},
        scrape_report::{ScrapeReport, SearchStatus, UrlOutcome},
    },
    services::{RunStore, Scraper},
};

use super::{default_route::IndexTemplate, render};

pub struct RowView {
    pub website: String,
    pub email: String,
    pub sentinel: bool,
}

pub struct RegionView {
    pub name: String,
    pub status: String,
    pub url_count: usize,
    pub rows: Vec<RowView>,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub topic: String,
    pub regions: Vec<RegionView>,
    pub valid_count: usize,
    pub total_urls: usize,
    pub failed_fetches: usize,
    pub download_url: Option<String>,
}

impl From<&ScrapeReport> for ResultsTemplate {
    fn from(report: &ScrapeReport) -> Self {
        let regions = report
            .regions
            .iter()
            .map(|region| {
                let failed = region
                    .urls
                    .iter()
                    .filter(|u| matches!(u.outcome, UrlOutcome::FetchFailed(_)))
                    .count();
                let status = match &region.search_status {
                    SearchStatus::Found(n) if failed > 0 => {
                        format!("{} websites scraped, {} could not be fetched", n, failed)
                    }
                    SearchStatus::Found(n) => format!("{} websites scraped", n),
                    SearchStatus::Failed(reason) => format!("Search failed: {}", reason),
                };

                RegionView {
                    name: region.region.clone(),
                    status,
                    url_count: region.urls.len(),
                    rows: region
                        .records
                        .iter()
                        .map(|record| RowView {
                            website: record.source_url.clone(),
                            email: record.email.clone(),
                            sentinel: record.is_sentinel(),
                        })
                        .collect(),
                }
            })
            .collect();

        ResultsTemplate {
            topic: report.search_topic.clone(),
            regions,
            valid_count: report.valid_emails.len(),
            total_urls: report.total_urls(),
            failed_fetches: report.failed_fetches(),
            download_url: match report.valid_emails.is_empty() {
                true => None,
                false => Some(format!("/download/{}", report.run_id)),
            },
        }
    }
}

#[post("/scrape")]
async fn scrape(
    body: web::Bytes,
    range: web::Data<ResultsRange>,
    scraper: web::Data<Scraper>,
    run_store: web::Data<RunStore>,
) -> HttpResponse {
    let input = ScrapeFormInput::from_urlencoded(&body);

    let form = match ScrapeForm::parse(&input, &range) {
        Ok(form) => form,
        Err(e) => {
            log::warn!("Rejected scrape form: {}", e);
            return render(&IndexTemplate::new(&input, **range, Some(e.to_string())));
        }
    };

    let report = Arc::new(scraper.run(&form).await);
    run_store.insert(report.clone());

    render(&ResultsTemplate::from(report.as_ref()))
}
