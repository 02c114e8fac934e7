mod common;

use std::sync::Arc;

use actix_web::{
    http::{
        header::{self, ContentType},
        StatusCode,
    },
    test,
    web::Data,
    App,
};
use leadscrape::{domain::scrape_form::ResultsRange, services::RunStore, startup::configure};
use uuid::Uuid;

use common::{scraper, RecordingFetcher, RecordingProvider};

fn two_region_fakes() -> (Arc<RecordingProvider>, Arc<RecordingFetcher>) {
    let provider = Arc::new(RecordingProvider::new(vec![
        (
            "SEO agencies in USA",
            vec!["https://us-seo.com", "https://quiet.com"],
        ),
        ("SEO agencies in UK", vec!["https://uk-seo.co.uk"]),
    ]));
    let fetcher = Arc::new(RecordingFetcher::new(&[
        ("https://us-seo.com", "contact: same@example.com, us@us-seo.com"),
        ("https://quiet.com", "<p>no contact details</p>"),
        ("https://uk-seo.co.uk", "same@example.com hello@uk-seo.co.uk"),
    ]));
    (provider, fetcher)
}

fn download_path(html: &str) -> String {
    let start = html.find("/download/").expect("download link in page");
    html[start..start + "/download/".len() + 36].to_string()
}

#[actix_web::test]
async fn index_renders_form() {
    let (provider, fetcher) = two_region_fakes();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(scraper(provider, fetcher)))
            .app_data(Data::new(RunStore::new(5)))
            .app_data(Data::new(ResultsRange::default()))
            .configure(configure),
    )
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(html.contains(r#"name="topic""#));
    assert!(html.contains(r#"value="pk""#));
    assert!(html.contains(r#"min="5" max="30" value="10""#));
}

#[actix_web::test]
async fn missing_input_warns_without_network_calls() {
    let (provider, fetcher) = two_region_fakes();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(scraper(provider.clone(), fetcher.clone())))
            .app_data(Data::new(RunStore::new(5)))
            .app_data(Data::new(ResultsRange::default()))
            .configure(configure),
    )
    .await;

    for payload in ["topic=&regions=USA", "topic=SEO+agencies&regions=", "topic=SEO&regions=+%2C+"] {
        let req = test::TestRequest::post()
            .uri("/scrape")
            .insert_header(ContentType::form_url_encoded())
            .set_payload(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let html = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
        assert!(html.contains("Please enter both a search topic and at least one region."));
    }

    assert_eq!(provider.call_count(), 0);
    assert_eq!(fetcher.call_count(), 0);
}

#[actix_web::test]
async fn scrape_renders_results_and_serves_csv() {
    let (provider, fetcher) = two_region_fakes();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(scraper(provider.clone(), fetcher.clone())))
            .app_data(Data::new(RunStore::new(5)))
            .app_data(Data::new(ResultsRange::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/scrape")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("topic=SEO+agencies&regions=USA%2C+UK&max_results=5")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(html.contains("us@us-seo.com"));
    assert!(html.contains("No emails found"));
    assert!(html.contains("Extracted <strong>3</strong> valid emails"));
    assert_eq!(
        *provider.calls.lock().unwrap(),
        vec!["SEO agencies in USA", "SEO agencies in UK"]
    );
    assert_eq!(fetcher.call_count(), 3);

    let req = test::TestRequest::get().uri(&download_path(&html)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"marketing_email_list.csv\""
    );

    let csv = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert_eq!(
        csv,
        "Search,Region,Website,Email\n\
         SEO agencies,USA,https://us-seo.com,same@example.com\n\
         SEO agencies,USA,https://us-seo.com,us@us-seo.com\n\
         SEO agencies,UK,https://uk-seo.co.uk,hello@uk-seo.co.uk\n"
    );
}

#[actix_web::test]
async fn unknown_run_cannot_be_downloaded() {
    let (provider, fetcher) = two_region_fakes();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(scraper(provider, fetcher)))
            .app_data(Data::new(RunStore::new(5)))
            .app_data(Data::new(ResultsRange::default()))
            .configure(configure),
    )
    .await;

    let uri = format!("/download/{}", Uuid::new_v4());
    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn api_scrape_returns_report_json() {
    let (provider, fetcher) = two_region_fakes();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(scraper(provider, fetcher)))
            .app_data(Data::new(RunStore::new(5)))
            .app_data(Data::new(ResultsRange::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/scrape")
        .set_json(serde_json::json!({
            "topic": "SEO agencies",
            "regions": "USA, UK",
            "domains": ["uk"],
            "max_results": 10
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let emails: Vec<&str> = body["report"]["valid_emails"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["hello@uk-seo.co.uk"]);
    assert_eq!(body["report"]["regions"][0]["urls"][0]["outcome"]["status"], "no_emails");
    assert!(body["download_url"].as_str().unwrap().starts_with("/download/"));
}

#[actix_web::test]
async fn api_scrape_rejects_invalid_input() {
    let (provider, fetcher) = two_region_fakes();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(scraper(provider.clone(), fetcher)))
            .app_data(Data::new(RunStore::new(5)))
            .app_data(Data::new(ResultsRange::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/scrape")
        .set_json(serde_json::json!({ "topic": "SEO agencies", "max_results": 99 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(
        body["error"],
        "Please enter both a search topic and at least one region."
    );
    assert_eq!(provider.call_count(), 0);
}

#[actix_web::test]
async fn region_with_only_repeated_emails_is_not_reported_empty() {
    let provider = Arc::new(RecordingProvider::new(vec![
        ("dentists in Zurich", vec!["https://zh.ch"]),
        ("dentists in Geneva", vec!["https://ge.ch"]),
    ]));
    let fetcher = Arc::new(RecordingFetcher::new(&[
        ("https://zh.ch", "info@dental.ch"),
        ("https://ge.ch", "info@dental.ch"),
    ]));
    let app = test::init_service(
        App::new()
            .app_data(Data::new(scraper(provider, fetcher)))
            .app_data(Data::new(RunStore::new(5)))
            .app_data(Data::new(ResultsRange::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/scrape")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("topic=dentists&regions=Zurich%2C+Geneva")
        .to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();

    assert!(!html.contains("No websites found."));
    assert!(html.contains("Every email on these websites was already listed for an earlier region."));
}
