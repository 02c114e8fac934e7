pub mod allowed_domain;
pub mod email_candidate;
pub mod email_record;
pub mod scrape_form;
pub mod scrape_report;
pub mod search_request;
