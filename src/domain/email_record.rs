use serde::Serialize;

/// Email column value of a row for a URL that yielded no emails.
pub const NO_EMAILS_FOUND: &str = "No emails found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRecord {
    pub search_topic: String,
    pub region: String,
    pub source_url: String,
    pub email: String,
}

impl EmailRecord {
    pub fn new(search_topic: &str, region: &str, source_url: &str, email: &str) -> Self {
        EmailRecord {
            search_topic: search_topic.to_string(),
            region: region.to_string(),
            source_url: source_url.to_string(),
            email: email.to_string(),
        }
    }

    pub fn no_emails_found(search_topic: &str, region: &str, source_url: &str) -> Self {
        EmailRecord::new(search_topic, region, source_url, NO_EMAILS_FOUND)
    }

    pub fn is_sentinel(&self) -> bool {
        self.email == NO_EMAILS_FOUND
    }
}
