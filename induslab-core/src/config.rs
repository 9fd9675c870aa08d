//! Pipeline configuration.
//!
//! Every run parameter (file paths, API key, page URL, year window) lives
//! here with canonical defaults. A TOML file can override any subset of
//! fields; the CLI layers per-flag overrides on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parameters for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Comma-delimited SUSB industry-by-state file.
    pub census_file: PathBuf,

    /// GeoJSON state boundary file (cartographic boundaries, 1:500k).
    pub boundaries_file: PathBuf,

    /// BLS v2 API registration key, appended to the request query string.
    pub bls_key: String,

    /// Page carrying the index-membership table.
    pub membership_url: String,

    /// First year of the employment window (inclusive).
    pub start_year: String,

    /// Last year of the employment window (inclusive).
    pub end_year: String,

    /// Census payroll measure column rendered on the choropleth.
    pub payroll_column: String,

    /// Directory that receives the run artifact bundle.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            census_file: PathBuf::from("us_state_6digitnaics_2021.txt"),
            boundaries_file: PathBuf::from("cb_2020_us_state_500k.geojson"),
            bls_key: String::from("b94c311aa09b466a84342411daec3a57"),
            membership_url: String::from(
                "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies",
            ),
            start_year: String::from("2013"),
            end_year: String::from("2023"),
            payroll_column: String::from("PAYR"),
            output_dir: PathBuf::from("results"),
        }
    }
}

impl PipelineConfig {
    /// Load a config from a TOML file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_canonical_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.start_year, "2013");
        assert_eq!(config.end_year, "2023");
        assert_eq!(config.payroll_column, "PAYR");
        assert!(config.membership_url.contains("S%26P_500"));
    }

    #[test]
    fn partial_toml_overrides_keep_remaining_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            census_file = "other_census.txt"
            output_dir = "out"
            "#,
        )
        .unwrap();
        assert_eq!(config.census_file, PathBuf::from("other_census.txt"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        // untouched fields fall back to defaults
        assert_eq!(config.payroll_column, "PAYR");
        assert_eq!(config.start_year, "2013");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let result = PipelineConfig::from_toml("census_file = [not toml");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
