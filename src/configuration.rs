use std::time::Duration;

use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::scrape_form::ResultsRange;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub scraper: ScraperSettings,
    pub search: SearchSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub run_store_capacity: usize,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_secs: u64,
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub politeness_delay_ms: u64,
}

impl ScraperSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SearchSettings {
    pub base_url: String,
    pub language: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_depth: u8,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_max_results: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_max_results: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_results_limit: usize,
}

impl SearchSettings {
    pub fn results_range(&self) -> ResultsRange {
        ResultsRange {
            min: self.min_max_results,
            max: self.max_results_limit,
            default: self.default_max_results,
        }
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Layers `configuration/base.yaml`, the `APP_ENVIRONMENT` specific file and
/// `APP_` prefixed environment variables, e.g. `APP_APPLICATION__PORT=5001`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let configuration_directory = std::path::Path::new("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
