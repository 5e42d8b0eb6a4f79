use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::PlaceConversionError;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Place {
    pub id          : String,
    pub title       : String,
    pub lat         : f64,
    pub lon         : f64,
    #[serde(default)]
    pub description : String,
    #[serde(default)]
    pub image       : Image,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// A place together with its distance to the current position.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct PlaceWithDistance {
    #[serde(flatten)]
    pub place: Place,
    pub distance: f64,
}
