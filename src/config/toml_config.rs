use crate::config::{
    DEFAULT_ENDPOINT, DEFAULT_LOCATION_TIMEOUT_SECONDS, DEFAULT_OUTPUT_PATH,
    DEFAULT_TIMEOUT_SECONDS, MAX_ZOOM,
};
use crate::core::filter::DEFAULT_EXCLUDED_RISK;
use crate::core::pipeline::DEFAULT_MAX_RECORDS;
use crate::core::ConfigProvider;
use crate::domain::model::{Coordinate, OutputFormat, DEFAULT_ZOOM};
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub filter: FilterConfig,
    pub location: LocationConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub max_records: usize,
    pub excluded_risks: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            excluded_risks: vec![DEFAULT_EXCLUDED_RISK.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timeout_seconds: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timeout_seconds: DEFAULT_LOCATION_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub zoom: f32,
    pub output_path: String,
    pub format: OutputFormat,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            format: OutputFormat::default(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        // Substitute environment variables before handing text to the parser
        let processed_content = Self::substitute_env_vars(content);

        // Missing sections and keys fall back to their defaults
        toml::from_str(&processed_content).map_err(|e| MapError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    fn user_agent(&self) -> Option<&str> {
        self.source.user_agent.as_deref()
    }

    fn max_records(&self) -> usize {
        self.filter.max_records
    }

    fn excluded_risks(&self) -> &[String] {
        &self.filter.excluded_risks
    }

    fn last_known_location(&self) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.location.latitude?,
            self.location.longitude?,
        ))
    }

    fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location.timeout_seconds)
    }

    fn zoom(&self) -> f32 {
        self.map.zoom
    }

    fn output_path(&self) -> &str {
        &self.map.output_path
    }

    fn output_format(&self) -> OutputFormat {
        self.map.format
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        // Source: reachable endpoint and a non-zero timeout
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_positive_number(
            "source.timeout_seconds",
            self.source.timeout_seconds,
            1,
        )?;
        if let Some(user_agent) = &self.source.user_agent {
            validation::validate_non_empty_string("source.user_agent", user_agent)?;
        }
        // Filter: an empty excluded set is allowed and keeps every record
        validation::validate_positive_number("filter.max_records", self.filter.max_records, 1)?;
        // Location: both halves or neither
        validation::validate_coordinate_pair(
            self.location.latitude,
            self.location.longitude,
            "location.",
        )?;
        validation::validate_positive_number(
            "location.timeout_seconds",
            self.location.timeout_seconds,
            1,
        )?;
        // Map
        validation::validate_range("map.zoom", self.map.zoom, 0.0, MAX_ZOOM)?;
        validation::validate_path("map.output_path", &self.map.output_path)?;
        Ok(())
    }
}
