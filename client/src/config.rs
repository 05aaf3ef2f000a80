//! Configuration management for the CLI.

use crate::api::{DEFAULT_API_BASE_URL, SITE_ORIGIN};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use sysbol_engine::{PredicateSet, QueryOptions, SortDirection, SortProperty};

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Subscription key. Discovered from the public site when unset.
    pub api_key: Option<String>,
    /// API host
    pub api_base_url: String,
    /// Public site used for key discovery
    pub site_url: String,
    pub user_agent: Option<String>,
    /// HTTP proxy URL
    pub proxy: Option<String>,
    /// Wait between page fetches
    pub page_delay: Duration,
    /// Maximum number of records to emit. 0 means no limit.
    pub limit: usize,
    pub page_size: u32,
    pub sort_by: SortProperty,
    pub sort_direction: Option<SortDirection>,
    /// Search filters
    pub filters: PredicateSet,
    /// Output file. Stdout when unset.
    pub output: Option<PathBuf>,
    pub store_query: String,
    pub store_id: Option<String>,
    pub product_number: Option<String>,
    pub verbose: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let page_delay = match var("SYSBOL_PAGE_DELAY_MS") {
            Some(ms) => Duration::from_millis(parse_number("SYSBOL_PAGE_DELAY_MS", &ms)?),
            None => Duration::ZERO,
        };

        let limit = match var("SYSBOL_LIMIT") {
            Some(limit) => parse_number("SYSBOL_LIMIT", &limit)?,
            None => 0,
        };

        let page_size = match var("SYSBOL_PAGE_SIZE") {
            Some(size) => parse_number("SYSBOL_PAGE_SIZE", &size)?,
            None => sysbol_engine::DEFAULT_PAGE_SIZE,
        };

        let sort_by = match var("SYSBOL_SORT_BY") {
            Some(sort_by) => sort_by
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SYSBOL_SORT_BY", sort_by))?,
            None => SortProperty::Name,
        };

        let sort_direction = var("SYSBOL_SORT_DIRECTION")
            .map(|direction| {
                direction
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SYSBOL_SORT_DIRECTION", direction))
            })
            .transpose()?;

        let filters = match var("SYSBOL_FILTERS") {
            Some(json) => serde_json::from_str(&json).map_err(ConfigError::InvalidFilters)?,
            None => PredicateSet::new(),
        };

        let verbose = match var("SYSBOL_VERBOSE") {
            Some(flag) => parse_flag(&flag)
                .ok_or(ConfigError::InvalidValue("SYSBOL_VERBOSE", flag))?,
            None => false,
        };

        Ok(Self {
            api_key: var("SYSBOL_API_KEY"),
            api_base_url: var("SYSBOL_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            site_url: var("SYSBOL_SITE_URL").unwrap_or_else(|| SITE_ORIGIN.to_string()),
            user_agent: var("SYSBOL_USER_AGENT"),
            proxy: var("SYSBOL_PROXY"),
            page_delay,
            limit,
            page_size,
            sort_by,
            sort_direction,
            filters,
            output: var("SYSBOL_OUTPUT").map(PathBuf::from),
            store_query: var("SYSBOL_STORE_QUERY").unwrap_or_default(),
            store_id: var("SYSBOL_STORE_ID"),
            product_number: var("SYSBOL_PRODUCT_NUMBER"),
            verbose,
        })
    }

    /// Query options for a product search.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            page_size: self.page_size,
            sort_by: Some(self.sort_by),
            sort_direction: self.sort_direction,
            ..QueryOptions::default()
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key, value.to_string()))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid SYSBOL_FILTERS value: {0}")]
    InvalidFilters(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();

        assert!(config.api_key.is_none());
        assert_eq!(config.api_base_url, "https://api-extern.systembolaget.se");
        assert_eq!(config.site_url, "https://www.systembolaget.se");
        assert_eq!(config.page_delay, Duration::ZERO);
        assert_eq!(config.limit, 0);
        assert_eq!(config.page_size, 30);
        assert_eq!(config.sort_by, SortProperty::Name);
        assert!(config.sort_direction.is_none());
        assert!(config.filters.is_empty());
        assert!(config.output.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn full_configuration() {
        let config = load(&[
            ("SYSBOL_API_KEY", "secret"),
            ("SYSBOL_PAGE_DELAY_MS", "250"),
            ("SYSBOL_LIMIT", "100"),
            ("SYSBOL_PAGE_SIZE", "15"),
            ("SYSBOL_SORT_BY", "price"),
            ("SYSBOL_SORT_DIRECTION", "desc"),
            ("SYSBOL_FILTERS", r#"[{"type": "origin", "country": "Frankrike"}]"#),
            ("SYSBOL_OUTPUT", "out.json"),
            ("SYSBOL_VERBOSE", "true"),
        ])
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.page_delay, Duration::from_millis(250));
        assert_eq!(config.limit, 100);
        assert_eq!(config.sort_by, SortProperty::Price);
        assert_eq!(config.sort_direction, Some(SortDirection::Descending));
        assert_eq!(config.filters.encode().get("country"), Some("Frankrike"));
        assert_eq!(config.output, Some(PathBuf::from("out.json")));
        assert!(config.verbose);

        let options = config.query_options();
        assert_eq!(options.page_size, 15);
        assert_eq!(options.sort_by, Some(SortProperty::Price));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("SYSBOL_API_KEY", "  "), ("SYSBOL_LIMIT", "")]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.limit, 0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (key, value) in [
            ("SYSBOL_PAGE_DELAY_MS", "soon"),
            ("SYSBOL_LIMIT", "-1"),
            ("SYSBOL_SORT_BY", "colour"),
            ("SYSBOL_SORT_DIRECTION", "sideways"),
            ("SYSBOL_VERBOSE", "maybe"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue(k, _) if k == key),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_filters_are_rejected() {
        let err = load(&[("SYSBOL_FILTERS", r#"[{"type": "colour"}]"#)]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFilters(_)));
    }
}
