use placepicker_core::{
    entities::MapPoint,
    gateways::geolocation::{GeoLocationError, GeoLocationGateway},
};

/// Reports a preconfigured position, e.g. from the
/// command line or the configuration file.
#[derive(Debug, Clone, Default)]
pub struct StaticPosition {
    pos: Option<MapPoint>,
}

impl StaticPosition {
    pub const fn new(pos: Option<MapPoint>) -> Self {
        Self { pos }
    }
}

impl GeoLocationGateway for StaticPosition {
    fn current_position(&self) -> Result<MapPoint, GeoLocationError> {
        self.pos.ok_or(GeoLocationError::Unavailable)
    }
}
