use crate::core::{MapPresenter, MapView, Result, Storage};
use crate::domain::model::OutputFormat;
use crate::utils::error::MapError;
use async_trait::async_trait;
use serde_json::json;

/// Logs the camera and each marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

#[async_trait]
impl MapPresenter for TracingPresenter {
    async fn render(&self, view: &MapView) -> Result<()> {
        tracing::info!(
            "Camera at {} zoom {} tilt {} bearing {}",
            view.center,
            view.zoom,
            view.tilt,
            view.bearing
        );
        for marker in &view.markers {
            tracing::info!("Marker at {}", marker);
        }
        tracing::info!("Placed {} markers", view.markers.len());
        Ok(())
    }
}

/// Writes the view to a file through a `Storage` backend.
pub struct FilePresenter<S: Storage> {
    storage: S,
    format: OutputFormat,
}

impl<S: Storage> FilePresenter<S> {
    pub fn new(storage: S, format: OutputFormat) -> Result<Self> {
        if format.file_name().is_none() {
            return Err(MapError::ConfigError {
                message: format!("output format {:?} does not write a file", format),
            });
        }
        Ok(Self { storage, format })
    }

    pub fn file_name(&self) -> &'static str {
        self.format.file_name().unwrap_or("markers")
    }
}

#[async_trait]
impl<S: Storage> MapPresenter for FilePresenter<S> {
    async fn render(&self, view: &MapView) -> Result<()> {
        let data = match self.format {
            OutputFormat::Csv => to_csv(view)?,
            _ => to_geojson(view)?,
        };

        tracing::debug!("Writing {} bytes to {}", data.len(), self.file_name());
        self.storage.write_file(self.file_name(), &data).await?;
        tracing::info!(
            "Wrote {} markers to {}",
            view.markers.len(),
            self.file_name()
        );
        Ok(())
    }
}

/// GeoJSON positions are `[longitude, latitude]`.
pub fn to_geojson(view: &MapView) -> Result<Vec<u8>> {
    let features: Vec<_> = view
        .markers
        .iter()
        .map(|marker| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.longitude, marker.latitude]
                },
                "properties": {}
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "properties": {
            "center": [view.center.longitude, view.center.latitude],
            "zoom": view.zoom,
            "tilt": view.tilt,
            "bearing": view.bearing
        },
        "features": features
    });

    Ok(serde_json::to_vec_pretty(&collection)?)
}

pub fn to_csv(view: &MapView) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["latitude", "longitude"])?;
    for marker in &view.markers {
        writer.write_record([marker.latitude.to_string(), marker.longitude.to_string()])?;
    }

    writer.into_inner().map_err(|e| MapError::IoError(e.into_error()))
}
