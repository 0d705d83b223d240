pub mod cli;
pub mod toml_config;

pub const DEFAULT_ENDPOINT: &str = "https://data.cityofchicago.org/resource/j8a4-a59k.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_LOCATION_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const MAX_ZOOM: f32 = 21.0;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::*;
    use crate::core::filter::DEFAULT_EXCLUDED_RISK;
    use crate::core::pipeline::DEFAULT_MAX_RECORDS;
    use crate::core::ConfigProvider;
    use crate::domain::model::{Coordinate, OutputFormat, DEFAULT_ZOOM};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "inspection-map")]
    #[command(about = "Map recent food inspections around your location")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        pub endpoint: String,

        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
        pub timeout_seconds: u64,

        #[arg(long)]
        pub user_agent: Option<String>,

        #[arg(long, default_value_t = DEFAULT_MAX_RECORDS)]
        pub max_records: usize,

        /// Risk levels to leave off the map, matched exactly
        #[arg(long = "exclude-risk", value_delimiter = ',', default_value = DEFAULT_EXCLUDED_RISK)]
        pub excluded_risks: Vec<String>,

        /// Keep every risk level, ignoring --exclude-risk
        #[arg(long)]
        pub no_risk_filter: bool,

        /// Last known latitude of the device
        #[arg(long, allow_negative_numbers = true)]
        pub latitude: Option<f64>,

        /// Last known longitude of the device
        #[arg(long, allow_negative_numbers = true)]
        pub longitude: Option<f64>,

        #[arg(long, default_value_t = DEFAULT_LOCATION_TIMEOUT_SECONDS)]
        pub location_timeout_seconds: u64,

        #[arg(long, default_value_t = DEFAULT_ZOOM)]
        pub zoom: f32,

        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        pub output_path: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Geojson)]
        pub format: OutputFormat,

        /// Read settings from a TOML file instead of the options above
        #[arg(long)]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_seconds)
        }

        fn user_agent(&self) -> Option<&str> {
            self.user_agent.as_deref()
        }

        fn max_records(&self) -> usize {
            self.max_records
        }

        fn excluded_risks(&self) -> &[String] {
            if self.no_risk_filter {
                return &[];
            }
            &self.excluded_risks
        }

        fn last_known_location(&self) -> Option<Coordinate> {
            Some(Coordinate::new(self.latitude?, self.longitude?))
        }

        fn location_timeout(&self) -> Duration {
            Duration::from_secs(self.location_timeout_seconds)
        }

        fn zoom(&self) -> f32 {
            self.zoom
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("endpoint", &self.endpoint)?;
            validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
            if let Some(user_agent) = &self.user_agent {
                validation::validate_non_empty_string("user_agent", user_agent)?;
            }
            validation::validate_positive_number("max_records", self.max_records, 1)?;
            validation::validate_coordinate_pair(self.latitude, self.longitude, "")?;
            validation::validate_positive_number(
                "location_timeout_seconds",
                self.location_timeout_seconds,
                1,
            )?;
            validation::validate_range("zoom", self.zoom, 0.0, MAX_ZOOM)?;
            validation::validate_path("output_path", &self.output_path)?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = CliConfig::parse_from(["inspection-map"]);

            assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
            assert_eq!(config.max_records(), 100);
            assert_eq!(config.excluded_risks(), ["Risk 3 (Low)".to_string()]);
            assert_eq!(config.zoom(), 10.0);
            assert_eq!(config.output_format(), OutputFormat::Geojson);
            assert!(config.last_known_location().is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_location_and_risks_from_args() {
            let config = CliConfig::parse_from([
                "inspection-map",
                "--latitude",
                "41.88",
                "--longitude",
                "-87.63",
                "--exclude-risk",
                "Risk 2 (Medium),Risk 3 (Low)",
                "--format",
                "csv",
            ]);

            assert_eq!(
                config.last_known_location(),
                Some(Coordinate::new(41.88, -87.63))
            );
            assert_eq!(config.excluded_risks().len(), 2);
            assert_eq!(config.output_format(), OutputFormat::Csv);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_no_risk_filter_empties_excluded_set() {
            let config = CliConfig::parse_from([
                "inspection-map",
                "--exclude-risk",
                "Risk 2 (Medium)",
                "--no-risk-filter",
            ]);

            assert!(config.excluded_risks().is_empty());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_validation_failures() {
            let half_location =
                CliConfig::parse_from(["inspection-map", "--latitude", "41.88"]);
            assert!(half_location.validate().is_err());

            let zero_records = CliConfig::parse_from(["inspection-map", "--max-records", "0"]);
            assert!(zero_records.validate().is_err());

            let bad_endpoint =
                CliConfig::parse_from(["inspection-map", "--endpoint", "ftp://example.com"]);
            assert!(bad_endpoint.validate().is_err());

            let bad_zoom = CliConfig::parse_from(["inspection-map", "--zoom", "30"]);
            assert!(bad_zoom.validate().is_err());
        }
    }
}
