pub mod geolocation;
pub mod storage;
