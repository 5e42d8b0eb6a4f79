use crate::entities::MapPoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoLocationError {
    #[error("Permission to access the current position has been denied")]
    PermissionDenied,
    #[error("The current position is not available")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One-shot access to the current position of the device.
pub trait GeoLocationGateway {
    fn current_position(&self) -> Result<MapPoint, GeoLocationError>;
}
