use anyhow::{Context, Result};
use placepicker_boundary as json;
use placepicker_core::{catalog::Catalog, entities::Place};
use std::{borrow::Cow, fs, path::Path};

const DEFAULT_CATALOG: &str = include_str!("places.json");

pub fn load_catalog(file: Option<&Path>) -> Result<Catalog> {
    let json = match file {
        Some(file) => {
            log::debug!("Loading catalog from {}", file.display());
            let json = fs::read_to_string(file)
                .with_context(|| format!("Unable to read catalog {}", file.display()))?;
            Cow::Owned(json)
        }
        None => Cow::Borrowed(DEFAULT_CATALOG),
    };
    parse_catalog(&json)
}

pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let places: Vec<json::Place> = serde_json::from_str(json).context("Malformed catalog")?;
    let places = places
        .into_iter()
        .map(Place::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(places))
}
