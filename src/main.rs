use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use leadscrape::{
    configuration::get_configuration,
    services::{build_http_client, GoogleScraper, HttpPageFetcher, RunStore, Scraper},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;

    let client = build_http_client(&configuration.scraper).context("Failed to build http client")?;
    let scraper = Scraper::new(
        Arc::new(GoogleScraper::new(client.clone(), &configuration.search)),
        Arc::new(HttpPageFetcher::new(client)),
        configuration.scraper.politeness_delay(),
    );
    let run_store = RunStore::new(configuration.application.run_store_capacity);

    log::info!("Listening on http://{}", address);

    run(
        listener,
        scraper,
        run_store,
        configuration.search.results_range(),
    )?
    .await?;

    Ok(())
}
