use crate::entities::*;
use std::cmp::Ordering;

pub trait DistanceTo {
    fn distance_to(&self, pos: MapPoint) -> f64;
}

impl DistanceTo for Place {
    fn distance_to(&self, pos: MapPoint) -> f64 {
        self.pos.planar_distance_to(pos)
    }
}

pub trait SortByDistanceTo {
    fn sort_by_distance_to(&mut self, pos: MapPoint);
}

impl<T> SortByDistanceTo for [T]
where
    T: DistanceTo,
{
    // `sort_by` is stable: places with equal distances keep their order.
    fn sort_by_distance_to(&mut self, pos: MapPoint) {
        self.sort_by(|a, b| {
            a.distance_to(pos)
                .partial_cmp(&b.distance_to(pos))
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// Returns a copy of `places` ordered by ascending distance to `pos`.
pub fn sort_places_by_distance(places: &[Place], pos: MapPoint) -> Vec<Place> {
    let mut sorted = places.to_vec();
    sorted.sort_by_distance_to(pos);
    sorted
}
