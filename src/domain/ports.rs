use crate::domain::model::{Coordinate, InspectionRecord, MapView, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> Option<&str>;
    fn max_records(&self) -> usize;
    fn excluded_risks(&self) -> &[String];
    fn last_known_location(&self) -> Option<Coordinate>;
    fn location_timeout(&self) -> Duration;
    fn zoom(&self) -> f32;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}

/// Fetches a resource body. The HTTP implementation lives in
/// `core::transport`; tests swap in an in-memory one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Fetch, parse and truncate.
    async fn extract(&self) -> Result<Vec<InspectionRecord>>;

    /// Filter by risk and project to coordinates. Never fails: records with
    /// unusable coordinates are dropped.
    fn transform(&self, records: &[InspectionRecord]) -> Vec<Coordinate>;

    async fn fetch_filtered_coordinates(&self) -> Result<Vec<Coordinate>> {
        let records = self.extract().await?;
        Ok(self.transform(&records))
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate>;
}

#[async_trait]
pub trait MapPresenter: Send + Sync {
    async fn render(&self, view: &MapView) -> Result<()>;
}
