use crate::entities::*;
use std::collections::HashSet;

/// The static, read-only list of all available places.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    places: Vec<Place>,
}

impl Catalog {
    /// Creates a catalog from a list of places.
    ///
    /// Ids are expected to be unique. Later duplicates are dropped
    /// so that every id resolves to exactly one place.
    pub fn new(places: Vec<Place>) -> Self {
        let mut ids = HashSet::with_capacity(places.len());
        let places = places
            .into_iter()
            .filter(|place| {
                let unique = ids.insert(place.id.clone());
                if !unique {
                    log::warn!("Ignoring duplicate place '{}' in catalog", place.id);
                }
                unique
            })
            .collect();
        Self { places }
    }

    pub fn find(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl From<Vec<Place>> for Catalog {
    fn from(from: Vec<Place>) -> Self {
        Self::new(from)
    }
}
