use std::net::TcpListener;

use actix_files::Files;
use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};

use crate::{
    domain::scrape_form::ResultsRange,
    routes::{api_route, default_route, download_route, scrape_route},
    services::{RunStore, Scraper},
};

/// Registers every route. Expects `Scraper`, `RunStore` and `ResultsRange` app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(Files::new("/static", "./templates/static").prefer_utf8(true))
        .service(default_route::default)
        .service(default_route::health)
        .service(scrape_route::scrape)
        .service(download_route::download)
        .service(web::scope("/api").service(api_route::api_scrape));
}

pub fn run(
    listener: TcpListener,
    scraper: Scraper,
    run_store: RunStore,
    results_range: ResultsRange,
) -> Result<Server, std::io::Error> {
    let scraper = Data::new(scraper);
    let run_store = Data::new(run_store);
    let results_range = Data::new(results_range);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure)
            .app_data(scraper.clone())
            .app_data(run_store.clone())
            .app_data(results_range.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
