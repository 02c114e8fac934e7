/// One search issued to the provider, built per region.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub topic: String,
    pub region: String,
    pub max_results: usize,
}

impl SearchRequest {
    /// Returns `None` when topic or region is blank or `max_results` is zero.
    pub fn new(topic: &str, region: &str, max_results: usize) -> Option<Self> {
        let topic = topic.trim();
        let region = region.trim();

        match topic.is_empty() || region.is_empty() || max_results == 0 {
            true => None,
            false => Some(SearchRequest {
                topic: topic.to_string(),
                region: region.to_string(),
                max_results,
            }),
        }
    }

    pub fn query(&self) -> String {
        format!("{} in {}", self.topic, self.region)
    }
}
