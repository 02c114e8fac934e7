use std::collections::HashSet;

use url::form_urlencoded;

use super::allowed_domain::AllowedDomain;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter both a search topic and at least one region.")]
    MissingInput,
    #[error("Number of websites per region must be between {min} and {max}, got {value}.")]
    MaxResultsOutOfRange {
        value: usize,
        min: usize,
        max: usize,
    },
    #[error("Number of websites per region is not a number: {0}")]
    InvalidMaxResults(String),
    #[error("Unsupported email domain filter: {0}")]
    UnknownDomain(String),
}

/// Bounds of the websites-per-region slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultsRange {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl Default for ResultsRange {
    fn default() -> Self {
        ResultsRange {
            min: 5,
            max: 30,
            default: 10,
        }
    }
}

/// Raw, unvalidated input as submitted by the form or the JSON api.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeFormInput {
    pub topic: String,
    pub regions: String,
    pub domains: Vec<String>,
    pub max_results: Option<String>,
}

impl ScrapeFormInput {
    /// Decodes an urlencoded body. The `domains` key may repeat, one entry per checked box.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut input = ScrapeFormInput::default();

        for (key, value) in form_urlencoded::parse(body) {
            match key.as_ref() {
                "topic" => input.topic = value.into_owned(),
                "regions" => input.regions = value.into_owned(),
                "domains" => input.domains.push(value.into_owned()),
                "max_results" => input.max_results = Some(value.into_owned()),
                _ => {}
            }
        }

        input
    }
}

/// Validated scrape submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeForm {
    pub topic: String,
    pub regions: Vec<String>,
    pub allowed_domains: Option<HashSet<String>>,
    pub max_results: usize,
}

impl ScrapeForm {
    pub fn parse(input: &ScrapeFormInput, range: &ResultsRange) -> Result<Self, FormError> {
        let topic = input.topic.trim();
        let regions = split_regions(&input.regions);

        if topic.is_empty() || regions.is_empty() {
            return Err(FormError::MissingInput);
        }

        let max_results = match input.max_results.as_deref().map(str::trim) {
            None | Some("") => range.default,
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| FormError::InvalidMaxResults(raw.to_string()))?,
        };
        if max_results < range.min || max_results > range.max {
            return Err(FormError::MaxResultsOutOfRange {
                value: max_results,
                min: range.min,
                max: range.max,
            });
        }

        let allowed_domains = input
            .domains
            .iter()
            .filter(|d| !d.trim().is_empty())
            .map(|d| {
                d.parse::<AllowedDomain>()
                    .map(|domain| domain.as_str().to_string())
                    .map_err(FormError::UnknownDomain)
            })
            .collect::<Result<HashSet<String>, FormError>>()?;

        Ok(ScrapeForm {
            topic: topic.to_string(),
            regions,
            allowed_domains: match allowed_domains.is_empty() {
                true => None,
                false => Some(allowed_domains),
            },
            max_results,
        })
    }
}

/// Splits a comma separated region list, dropping blank entries.
pub fn split_regions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|region| !region.is_empty())
        .map(str::to_string)
        .collect()
}
