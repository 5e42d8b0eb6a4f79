use crate::{
    catalog::Catalog,
    entities::*,
    gateways::geolocation::GeoLocationGateway,
    util::sort::sort_places_by_distance,
};

/// The catalog as it is offered for picking.
#[derive(Debug, Clone, PartialEq)]
pub enum AvailablePlaces {
    /// No position is known (yet).
    Pending,
    /// All places ordered by distance to the current position.
    Sorted {
        pos: MapPoint,
        places: Vec<Place>,
    },
}

impl AvailablePlaces {
    pub fn places(&self) -> &[Place] {
        match self {
            Self::Pending => &[],
            Self::Sorted { places, .. } => places,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

pub fn sort_available_places(catalog: &Catalog, pos: MapPoint) -> AvailablePlaces {
    let places = sort_places_by_distance(catalog.places(), pos);
    AvailablePlaces::Sorted { pos, places }
}

/// Queries the current position once and sorts the catalog.
///
/// There is no retry: if the position cannot be determined
/// the places remain pending.
pub fn load_available_places<G>(gateway: &G, catalog: &Catalog) -> AvailablePlaces
where
    G: GeoLocationGateway + ?Sized,
{
    match gateway.current_position() {
        Ok(pos) => {
            log::debug!("Sorting {} places by distance to {pos}", catalog.len());
            sort_available_places(catalog, pos)
        }
        Err(err) => {
            log::warn!("Unable to determine the current position: {err}");
            AvailablePlaces::Pending
        }
    }
}
