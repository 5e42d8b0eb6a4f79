mod error;
mod load_available_places;

#[cfg(test)]
pub mod tests;

pub type Result<T> = std::result::Result<T, Error>;

pub use self::{error::Error, load_available_places::*};
