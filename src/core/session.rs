use crate::core::{Coordinate, LocationProvider, MapPresenter, MapView, Pipeline, Result};
use crate::utils::error::MapError;
use std::time::Duration;

pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// One-shot run: resolve the location and fetch markers, then present once.
///
/// The view is returned on whichever task awaits `run`; callers that need a
/// specific thread for drawing hop there themselves.
pub struct MapSession<P: Pipeline, L: LocationProvider, M: MapPresenter> {
    pipeline: P,
    location: L,
    presenter: M,
    zoom: f32,
    location_timeout: Duration,
}

impl<P: Pipeline, L: LocationProvider, M: MapPresenter> MapSession<P, L, M> {
    pub fn new(pipeline: P, location: L, presenter: M, zoom: f32) -> Self {
        Self {
            pipeline,
            location,
            presenter,
            zoom,
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
        }
    }

    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }

    pub async fn run(&self) -> Result<MapView> {
        tracing::info!("Starting map session");

        // Neither step needs the other's value; the first failure cancels both.
        let (center, markers) = tokio::try_join!(
            self.resolve_location(),
            self.pipeline.fetch_filtered_coordinates()
        )?;
        tracing::info!("Location resolved at {}", center);

        // Camera is flat and north-up; only the zoom is configurable
        let view = MapView::new(center, self.zoom, markers);
        // Present exactly once, and only when both inputs arrived
        self.presenter.render(&view).await?;

        tracing::info!("Presented {} markers", view.markers.len());
        Ok(view)
    }

    async fn resolve_location(&self) -> Result<Coordinate> {
        // A provider that never answers must not stall the whole run
        match tokio::time::timeout(self.location_timeout, self.location.current_location()).await
        {
            Ok(result) => result,
            Err(_) => Err(MapError::LocationUnavailable {
                reason: format!("no location within {:?}", self.location_timeout),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::{GatedLocationProvider, LocationPermission, StaticLocationProvider};
    use crate::core::InspectionRecord;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct FixedPipeline {
        result: std::result::Result<Vec<Coordinate>, u16>,
    }

    #[async_trait]
    impl Pipeline for FixedPipeline {
        async fn extract(&self) -> Result<Vec<InspectionRecord>> {
            unreachable!("fetch_filtered_coordinates is overridden")
        }

        fn transform(&self, _records: &[InspectionRecord]) -> Vec<Coordinate> {
            Vec::new()
        }

        async fn fetch_filtered_coordinates(&self) -> Result<Vec<Coordinate>> {
            self.result
                .clone()
                .map_err(|status| MapError::HttpStatusError { status })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingPresenter {
        views: Arc<Mutex<Vec<MapView>>>,
    }

    #[async_trait]
    impl MapPresenter for RecordingPresenter {
        async fn render(&self, view: &MapView) -> Result<()> {
            self.views.lock().await.push(view.clone());
            Ok(())
        }
    }

    struct NeverLocation;

    #[async_trait]
    impl LocationProvider for NeverLocation {
        async fn current_location(&self) -> Result<Coordinate> {
            std::future::pending().await
        }
    }

    fn markers() -> Vec<Coordinate> {
        vec![Coordinate::new(41.8, -87.6), Coordinate::new(41.7, -87.5)]
    }

    #[tokio::test]
    async fn test_run_presents_once() {
        let presenter = RecordingPresenter::default();
        let session = MapSession::new(
            FixedPipeline { result: Ok(markers()) },
            StaticLocationProvider::new(Some(Coordinate::new(41.88, -87.63))),
            presenter.clone(),
            10.0,
        );

        let view = session.run().await.unwrap();

        assert_eq!(view.center, Coordinate::new(41.88, -87.63));
        assert_eq!(view.markers, markers());
        assert_eq!(view.zoom, 10.0);

        let views = presenter.views.lock().await;
        assert_eq!(views.len(), 1);
        assert_eq!(views[0], view);
    }

    #[tokio::test]
    async fn test_permission_denied_skips_presenter() {
        let presenter = RecordingPresenter::default();
        let location = GatedLocationProvider::new(
            StaticLocationProvider::new(Some(Coordinate::new(41.88, -87.63))),
            LocationPermission::Denied,
        );
        let session = MapSession::new(
            FixedPipeline { result: Ok(markers()) },
            location,
            presenter.clone(),
            10.0,
        );

        let result = session.run().await;

        assert!(matches!(result, Err(MapError::PermissionDenied)));
        assert!(presenter.views.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_location_is_reported() {
        let presenter = RecordingPresenter::default();
        let session = MapSession::new(
            FixedPipeline { result: Ok(markers()) },
            StaticLocationProvider::default(),
            presenter.clone(),
            10.0,
        );

        let result = session.run().await;

        assert!(matches!(result, Err(MapError::LocationUnavailable { .. })));
        assert!(presenter.views.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_location_timeout_does_not_hang() {
        let presenter = RecordingPresenter::default();
        let session = MapSession::new(
            FixedPipeline { result: Ok(markers()) },
            NeverLocation,
            presenter.clone(),
            10.0,
        )
        .with_location_timeout(Duration::from_millis(50));

        let result = session.run().await;

        assert!(matches!(result, Err(MapError::LocationUnavailable { .. })));
        assert!(presenter.views.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_presenter() {
        let presenter = RecordingPresenter::default();
        let session = MapSession::new(
            FixedPipeline { result: Err(503) },
            StaticLocationProvider::new(Some(Coordinate::new(41.88, -87.63))),
            presenter.clone(),
            10.0,
        );

        let result = session.run().await;

        assert!(matches!(
            result,
            Err(MapError::HttpStatusError { status: 503 })
        ));
        assert!(presenter.views.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_marker_list_is_still_presented() {
        let presenter = RecordingPresenter::default();
        let session = MapSession::new(
            FixedPipeline { result: Ok(vec![]) },
            StaticLocationProvider::new(Some(Coordinate::new(41.88, -87.63))),
            presenter.clone(),
            12.0,
        );

        let view = session.run().await.unwrap();

        assert!(view.markers.is_empty());
        assert_eq!(view.zoom, 12.0);
        assert_eq!(presenter.views.lock().await.len(), 1);
    }
}
