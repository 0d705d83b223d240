pub mod filter;
pub mod location;
pub mod pipeline;
pub mod presenter;
pub mod session;
pub mod transport;

pub use crate::domain::model::{Coordinate, InspectionRecord, MapView};
pub use crate::domain::ports::{
    ConfigProvider, LocationProvider, MapPresenter, Pipeline, Storage, Transport,
};
pub use crate::utils::error::Result;
