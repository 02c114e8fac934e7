use actix_web::{get, http::header, web, HttpResponse};
use uuid::Uuid;

use crate::services::{records_to_csv, RunStore, CSV_FILE_NAME};

#[get("/download/{run_id}")]
async fn download(run_id: web::Path<Uuid>, run_store: web::Data<RunStore>) -> HttpResponse {
    let Some(report) = run_store.get(&run_id) else {
        log::info!("Download requested for unknown run {}", run_id);
        return HttpResponse::NotFound().body("Run not found, please scrape again.");
    };

    match records_to_csv(&report.valid_emails) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
            ))
            .body(csv),
        Err(e) => {
            log::error!("Failed to export run {}: {}", report.run_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
