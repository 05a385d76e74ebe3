use crate::error::{FilterError, Result};
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

pub const INCLUDE_QUERY_KEY: &str = "EXCEPTION_FILTER_INCLUDE_QUERY";
pub const CONVERT_REJECTIONS_KEY: &str = "EXCEPTION_FILTER_CONVERT_REJECTIONS";
pub const REJECTION_BODY_LIMIT_KEY: &str = "EXCEPTION_FILTER_REJECTION_BODY_LIMIT";

/// Configuration service
///
/// A string key/value store seeded from the process environment.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot of the current environment
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| FilterError::invalid_config(key, raw)),
            None => Ok(default),
        }
    }

    fn flag_or(&self, key: &str, default: bool) -> Result<bool> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(FilterError::invalid_config(key, raw)),
        }
    }
}

/// Runtime options for [`ExceptionFilterLayer`](crate::ExceptionFilterLayer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Keep the query string in the envelope's `path`
    pub include_query: bool,

    /// Turn bare error responses produced by the router or extractors
    /// (404, 405, 413, 415, 422, ...) into envelopes too
    pub convert_rejections: bool,

    /// Max bytes read from a rejection body to recover its message
    pub rejection_body_limit: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_query: true,
            convert_rejections: true,
            rejection_body_limit: 16 * 1024,
        }
    }
}

impl FilterConfig {
    /// Read options from a [`ConfigService`], falling back to defaults for absent keys
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            include_query: config.flag_or(INCLUDE_QUERY_KEY, defaults.include_query)?,
            convert_rejections: config
                .flag_or(CONVERT_REJECTIONS_KEY, defaults.convert_rejections)?,
            rejection_body_limit: config
                .parse_or(REJECTION_BODY_LIMIT_KEY, defaults.rejection_body_limit)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&ConfigService::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_keys_absent() {
        let config = FilterConfig::from_config(&ConfigService::default()).unwrap();
        assert_eq!(config, FilterConfig::default());
        assert!(config.include_query);
        assert!(config.convert_rejections);
    }

    #[test]
    fn test_overrides() {
        let service = ConfigService::default();
        service.set(INCLUDE_QUERY_KEY, "false");
        service.set(CONVERT_REJECTIONS_KEY, " OFF ");
        service.set(REJECTION_BODY_LIMIT_KEY, "128");

        let config = FilterConfig::from_config(&service).unwrap();
        assert!(!config.include_query);
        assert!(!config.convert_rejections);
        assert_eq!(config.rejection_body_limit, 128);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let service = ConfigService::default();
        service.set(INCLUDE_QUERY_KEY, "maybe");
        assert_eq!(
            FilterConfig::from_config(&service),
            Err(FilterError::invalid_config(INCLUDE_QUERY_KEY, "maybe"))
        );

        let service = ConfigService::default();
        service.set(REJECTION_BODY_LIMIT_KEY, "-1");
        assert_eq!(
            FilterConfig::from_config(&service),
            Err(FilterError::invalid_config(REJECTION_BODY_LIMIT_KEY, "-1"))
        );
    }
}
