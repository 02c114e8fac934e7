use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    domain::scrape_form::{ResultsRange, ScrapeForm, ScrapeFormInput},
    services::{RunStore, Scraper},
};

#[derive(Deserialize)]
struct ApiScrapeBody {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    regions: String,
    #[serde(default)]
    domains: Vec<String>,
    max_results: Option<usize>,
}

impl From<ApiScrapeBody> for ScrapeFormInput {
    fn from(body: ApiScrapeBody) -> Self {
        ScrapeFormInput {
            topic: body.topic,
            regions: body.regions,
            domains: body.domains,
            max_results: body.max_results.map(|n| n.to_string()),
        }
    }
}

#[post("/scrape")]
async fn api_scrape(
    body: web::Json<ApiScrapeBody>,
    range: web::Data<ResultsRange>,
    scraper: web::Data<Scraper>,
    run_store: web::Data<RunStore>,
) -> HttpResponse {
    let input: ScrapeFormInput = body.into_inner().into();

    let form = match ScrapeForm::parse(&input, &range) {
        Ok(form) => form,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    let report = Arc::new(scraper.run(&form).await);
    run_store.insert(report.clone());

    HttpResponse::Ok().json(json!({
        "download_url": format!("/download/{}", report.run_id),
        "report": report.as_ref(),
    }))
}
