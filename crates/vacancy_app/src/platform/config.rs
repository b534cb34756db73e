//! Runtime configuration, read from `VACANCY_*` environment variables.

use std::time::Duration;

use log::LevelFilter;
use vacancy_core::{IndustrySettings, SearchSettings};
use vacancy_engine::ApiSettings;

use super::logging::LogDestination;

pub const API_URL_ENV: &str = "VACANCY_API_URL";
pub const API_TOKEN_ENV: &str = "VACANCY_API_TOKEN";
pub const USER_AGENT_ENV: &str = "VACANCY_USER_AGENT";
pub const PER_PAGE_ENV: &str = "VACANCY_PER_PAGE";
pub const SEARCH_DEBOUNCE_ENV: &str = "VACANCY_SEARCH_DEBOUNCE_MS";
pub const LOG_DEST_ENV: &str = "VACANCY_LOG_DEST";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub search: SearchSettings,
    pub industry: IndustrySettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            search: SearchSettings::default(),
            industry: IndustrySettings::default(),
            log_destination: LogDestination::File,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`; unset or unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(API_URL_ENV) {
            config.api.base_url = url;
        }
        if let Some(token) = lookup(API_TOKEN_ENV) {
            config.api.access_token = Some(token);
        }
        if let Some(agent) = lookup(USER_AGENT_ENV) {
            config.api.user_agent = agent;
        }
        if let Some(per_page) = lookup(PER_PAGE_ENV).and_then(|v| v.trim().parse().ok()) {
            config.api.per_page = per_page;
        }
        if let Some(millis) = lookup(SEARCH_DEBOUNCE_ENV).and_then(|v| v.trim().parse().ok()) {
            config.search.query_debounce = Duration::from_millis(millis);
        }
        if let Some(destination) = lookup(LOG_DEST_ENV).and_then(|v| LogDestination::parse(&v)) {
            config.log_destination = destination;
        }
        if let Some(level) =
            lookup(vacancy_logging::LEVEL_ENV).and_then(|v| vacancy_logging::parse_level(&v))
        {
            config.log_level = level;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api.base_url, ApiSettings::default().base_url);
        assert_eq!(config.api.access_token, None);
        assert_eq!(config.search, SearchSettings::default());
        assert_eq!(config.log_destination, LogDestination::File);
    }

    #[test]
    fn environment_overrides_settings() {
        let config = config_from(&[
            (API_URL_ENV, "http://localhost:8080/"),
            (API_TOKEN_ENV, "secret"),
            (PER_PAGE_ENV, "50"),
            (SEARCH_DEBOUNCE_ENV, "300"),
            (LOG_DEST_ENV, "both"),
            ("VACANCY_LOG", "debug"),
        ]);
        assert_eq!(config.api.base_url, "http://localhost:8080/");
        assert_eq!(config.api.access_token.as_deref(), Some("secret"));
        assert_eq!(config.api.per_page, 50);
        assert_eq!(config.search.query_debounce, Duration::from_millis(300));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn garbage_values_are_ignored() {
        let config = config_from(&[(PER_PAGE_ENV, "many"), (API_TOKEN_ENV, "  ")]);
        assert_eq!(config.api.per_page, 20);
        assert_eq!(config.api.access_token, None);
    }
}
