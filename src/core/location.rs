use crate::core::{Coordinate, LocationProvider, Result};
use crate::utils::error::MapError;
use async_trait::async_trait;

/// Hands out a fixed last-known position, if one was configured.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationProvider {
    last_known: Option<Coordinate>,
}

impl StaticLocationProvider {
    pub fn new(last_known: Option<Coordinate>) -> Self {
        Self { last_known }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn current_location(&self) -> Result<Coordinate> {
        self.last_known.ok_or_else(|| MapError::LocationUnavailable {
            reason: "no last known location".to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPermission {
    Granted,
    Denied,
}

/// Consults the inner provider only when fine-location access was granted.
#[derive(Debug, Clone)]
pub struct GatedLocationProvider<L: LocationProvider> {
    inner: L,
    permission: LocationPermission,
}

impl<L: LocationProvider> GatedLocationProvider<L> {
    pub fn new(inner: L, permission: LocationPermission) -> Self {
        Self { inner, permission }
    }
}

#[async_trait]
impl<L: LocationProvider> LocationProvider for GatedLocationProvider<L> {
    async fn current_location(&self) -> Result<Coordinate> {
        match self.permission {
            LocationPermission::Granted => self.inner.current_location().await,
            LocationPermission::Denied => {
                tracing::warn!("Location permission denied");
                Err(MapError::PermissionDenied)
            }
        }
    }
}
