//! Page size configuration.
//!
//! Supports programmatic construction, and with the `cli` feature, command line
//! arguments with environment variable overrides when flattened into a `clap` parser.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PAGINATOR_DEFAULT_LIMIT` | 20 | Page size when the request names none |
//! | `PAGINATOR_MAX_LIMIT` | 1000 | Upper bound on any requested page size |
//! | `PAGINATOR_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use helios_paginator::PaginationConfig;
//!
//! let config = PaginationConfig {
//!     default_limit: 50,
//!     ..Default::default()
//! };
//!
//! assert_eq!(config.effective_limit(None), 50);
//! assert_eq!(config.effective_limit(Some(5000)), 1000);
//! ```

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Page size limits and logging level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct PaginationConfig {
    /// Page size used when a request does not specify one.
    #[cfg_attr(
        feature = "cli",
        arg(long, env = "PAGINATOR_DEFAULT_LIMIT", default_value = "20")
    )]
    pub default_limit: usize,

    /// Maximum page size a request may ask for.
    #[cfg_attr(
        feature = "cli",
        arg(long, env = "PAGINATOR_MAX_LIMIT", default_value = "1000")
    )]
    pub max_limit: usize,

    /// Log level (error, warn, info, debug, trace).
    #[cfg_attr(
        feature = "cli",
        arg(long, env = "PAGINATOR_LOG_LEVEL", default_value = "info")
    )]
    pub log_level: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl PaginationConfig {
    /// Resolves the page size for a request, clamped to `max_limit`.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }

    /// Validates the configuration, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.default_limit == 0 {
            errors.push("Default limit cannot be 0".to_string());
        }

        if self.max_limit == 0 {
            errors.push("Max limit cannot be 0".to_string());
        }

        if self.default_limit > self.max_limit {
            errors.push("Default limit cannot exceed max limit".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!("Unknown log level '{}'", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "cli")]
    #[derive(clap::Parser)]
    struct TestCli {
        #[command(flatten)]
        config: PaginationConfig,
    }

    #[cfg(feature = "cli")]
    fn parse(args: &[&str]) -> PaginationConfig {
        use clap::Parser;

        TestCli::parse_from(std::iter::once("paginator").chain(args.iter().copied())).config
    }

    #[test]
    fn test_default_config() {
        let config = PaginationConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.max_limit, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_matches_default() {
        let config = parse(&[]);
        assert_eq!(config, PaginationConfig::default());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_flags() {
        let config = parse(&["--default-limit", "5", "--max-limit", "10"]);
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.max_limit, 10);
    }

    #[test]
    fn test_effective_limit() {
        let config = PaginationConfig::default();
        assert_eq!(config.effective_limit(None), 20);
        assert_eq!(config.effective_limit(Some(3)), 3);
        assert_eq!(config.effective_limit(Some(100_000)), 1000);
    }

    #[test]
    fn test_validate_valid() {
        assert!(PaginationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_limits() {
        let config = PaginationConfig {
            default_limit: 2000,
            max_limit: 1000,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("exceed")));
    }

    #[test]
    fn test_validate_zero_and_bad_level() {
        let config = PaginationConfig {
            default_limit: 0,
            max_limit: 0,
            log_level: "loud".to_string(),
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("loud")));
    }
}
