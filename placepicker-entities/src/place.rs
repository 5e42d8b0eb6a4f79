use crate::{geo::*, id::*, image::*};

/// A point of interest of the static catalog.
///
/// Places are immutable reference data, they are
/// neither created nor modified at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: Id,
    pub title: String,
    pub pos: MapPoint,
    pub description: String,
    pub image: Image,
}
