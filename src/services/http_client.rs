use reqwest::Client;

use crate::configuration::ScraperSettings;

/// Client shared by the search scraper and the page fetcher.
pub fn build_http_client(settings: &ScraperSettings) -> reqwest::Result<Client> {
    reqwest::Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(settings.request_timeout())
        .cookie_store(true)
        .build()
}
