pub mod clock;
pub mod geolocation;
