pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    filter::RiskFilter,
    location::{GatedLocationProvider, LocationPermission, StaticLocationProvider},
    pipeline::InspectionPipeline,
    presenter::{FilePresenter, TracingPresenter},
    session::MapSession,
    transport::HttpTransport,
};
pub use domain::model::{Coordinate, InspectionRecord, MapView, OutputFormat};
pub use utils::error::{MapError, Result};
