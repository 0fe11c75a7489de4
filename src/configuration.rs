use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub scraper: ScraperSettings,
    pub sources: SourceSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    pub user_agent: String,
    pub accept_language: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_page_count: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_page_count: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub source_deadline_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub delay_min_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub delay_max_millis: u64,
}

impl ScraperSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn source_deadline(&self) -> Duration {
        Duration::from_secs(self.source_deadline_secs)
    }

    /// Page count to use for a query, falling back to the default and never
    /// exceeding the configured maximum.
    pub fn page_count(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_count)
            .min(self.max_page_count)
    }
}

/// Base URLs of the catalog endpoints.
#[derive(Deserialize, Clone, Debug)]
pub struct SourceSettings {
    pub feebee: String,
    pub pchome: String,
    pub amazon: String,
    pub ebay: String,
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

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

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
        // E.g. `APP_APPLICATION__PORT=5001` would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_base() -> Settings {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("configuration")
            .join("base.yaml");
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn base_configuration_carries_scraper_defaults() {
        let settings = load_base();

        assert_eq!(settings.scraper.default_page_count, 2);
        assert_eq!(settings.scraper.request_timeout(), Duration::from_secs(15));
        assert_eq!(settings.scraper.delay_min_millis, 1000);
        assert_eq!(settings.scraper.delay_max_millis, 3000);
        assert!(settings.scraper.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(
            settings.sources.pchome,
            "https://ecshweb.pchome.com.tw/search/v3.3/all/results"
        );
    }

    #[test]
    fn page_count_is_defaulted_and_clamped() {
        let scraper = load_base().scraper;

        assert_eq!(scraper.page_count(None), 2);
        assert_eq!(scraper.page_count(Some(0)), 0);
        assert_eq!(scraper.page_count(Some(3)), 3);
        assert_eq!(scraper.page_count(Some(500)), scraper.max_page_count);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let env: Result<Environment, _> = "staging".to_string().try_into();
        assert!(env.is_err());

        let env: Environment = "PRODUCTION".to_string().try_into().unwrap();
        assert_eq!(env.as_str(), "production");
    }
}
