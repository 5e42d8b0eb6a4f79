use super::*;
use placepicker_entities as e;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceConversionError {
    #[error("Missing place id")]
    Id,
    #[error("Invalid position of place '{0}': {1}")]
    Position(String, #[source] e::geo::MapPointError),
}

impl From<e::image::Image> for Image {
    fn from(from: e::image::Image) -> Self {
        let e::image::Image { src, alt } = from;
        Self { src, alt }
    }
}

impl From<Image> for e::image::Image {
    fn from(from: Image) -> Self {
        let Image { src, alt } = from;
        Self { src, alt }
    }
}

impl From<e::place::Place> for Place {
    fn from(from: e::place::Place) -> Self {
        let e::place::Place {
            id,
            title,
            pos,
            description,
            image,
        } = from;
        Self {
            id: id.into(),
            title,
            lat: pos.lat_deg(),
            lon: pos.lng_deg(),
            description,
            image: image.into(),
        }
    }
}

impl TryFrom<Place> for e::place::Place {
    type Error = PlaceConversionError;

    fn try_from(from: Place) -> Result<Self, Self::Error> {
        let Place {
            id,
            title,
            lat,
            lon,
            description,
            image,
        } = from;
        let id = e::id::Id::from(id);
        if !id.is_valid() {
            return Err(PlaceConversionError::Id);
        }
        let pos = e::geo::MapPoint::try_from_lat_lng_deg(lat, lon)
            .map_err(|err| PlaceConversionError::Position(id.to_string(), err))?;
        Ok(Self {
            id,
            title,
            pos,
            description,
            image: image.into(),
        })
    }
}
