pub mod csv_export;
pub mod email_extractor;
pub mod google_scraper;
pub mod http_client;
pub mod orchestrator;
pub mod run_store;

pub use csv_export::*;
pub use email_extractor::*;
pub use google_scraper::*;
pub use http_client::*;
pub use orchestrator::*;
pub use run_store::*;
