use actix_web::{get, web, HttpResponse, Responder};
use askama::Template;

use crate::domain::{
    allowed_domain::AllowedDomain,
    scrape_form::{ResultsRange, ScrapeFormInput},
};

use super::render;

pub struct DomainOption {
    pub name: &'static str,
    pub checked: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub warning: Option<String>,
    pub topic: String,
    pub regions: String,
    pub domains: Vec<DomainOption>,
    pub max_results: usize,
    pub range: ResultsRange,
}

impl IndexTemplate {
    /// Form prefilled with `input`, so a rejected submission keeps what the user typed.
    pub fn new(input: &ScrapeFormInput, range: ResultsRange, warning: Option<String>) -> Self {
        let max_results = input
            .max_results
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(range.default)
            .clamp(range.min, range.max);

        let domains = AllowedDomain::ALL
            .iter()
            .map(|domain| DomainOption {
                name: domain.as_str(),
                checked: input
                    .domains
                    .iter()
                    .any(|d| d.trim().eq_ignore_ascii_case(domain.as_str())),
            })
            .collect();

        IndexTemplate {
            warning,
            topic: input.topic.clone(),
            regions: input.regions.clone(),
            domains,
            max_results,
            range,
        }
    }
}

#[get("/")]
async fn default(range: web::Data<ResultsRange>) -> HttpResponse {
    render(&IndexTemplate::new(
        &ScrapeFormInput::default(),
        **range,
        None,
    ))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
