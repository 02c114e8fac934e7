pub mod api_route;
pub mod default_route;
pub mod download_route;
pub mod scrape_route;

use actix_web::HttpResponse;
use askama::Template;

pub(crate) fn render<T: Template>(template: &T) -> HttpResponse {
    match template.render() {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("Failed to render template: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
