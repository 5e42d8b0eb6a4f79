pub mod catalog;
pub mod countdown;
pub mod gateways;
pub mod repositories;
pub mod selection;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use placepicker_entities::{geo::*, id::*, image::*, place::*};
}
