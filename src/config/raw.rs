use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("placepicker.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub storage: Option<Storage>,
    pub catalog: Option<Catalog>,
    pub geolocation: Option<Geolocation>,
    pub removal: Option<Removal>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Storage {
    pub dir: PathBuf,
    pub key: String,
}

impl Default for Storage {
    fn default() -> Self {
        Config::default().storage.expect("Storage configuration")
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Catalog {
    pub file: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Geolocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Removal {
    #[serde(deserialize_with = "deserialize_duration")]
    pub countdown: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub progress_interval: Duration,
}

impl Default for Removal {
    fn default() -> Self {
        Config::default().removal.expect("Removal configuration")
    }
}
