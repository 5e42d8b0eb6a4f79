use anyhow::{anyhow, Result};
use placepicker_core::entities::MapPoint;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "placepicker.toml";

const ENV_NAME_STORAGE_DIR: &str = "PLACEPICKER_STORAGE_DIR";

#[derive(Debug)]
pub struct Config {
    pub storage: Storage,
    pub catalog: Catalog,
    pub geolocation: Geolocation,
    pub removal: Removal,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(dir) = env::var(ENV_NAME_STORAGE_DIR) {
            cfg.storage.dir = dir.into();
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct Storage {
    /// File system directory of the JSON file store.
    pub dir: PathBuf,
    /// Key of the selected places.
    pub key: String,
}

#[derive(Debug)]
pub struct Catalog {
    /// JSON file with all available places.
    pub file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Geolocation {
    pub pos: Option<MapPoint>,
}

#[derive(Debug)]
pub struct Removal {
    pub countdown: Duration,
    pub progress_interval: Duration,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            storage,
            catalog,
            geolocation,
            removal,
        } = from;

        let raw::Storage { dir, key } = storage.unwrap_or_default();
        let storage = Storage { dir, key };

        let raw::Catalog { file } = catalog.unwrap_or_default();
        let catalog = Catalog { file };

        let raw::Geolocation { lat, lng } = geolocation.unwrap_or_default();
        let pos = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(MapPoint::try_from_lat_lng_deg(lat, lng)?),
            (None, None) => None,
            _ => {
                return Err(anyhow!(
                    "Incomplete geolocation configuration: 'lat' and 'lng' are required"
                ));
            }
        };
        let geolocation = Geolocation { pos };

        let raw::Removal {
            countdown,
            progress_interval,
        } = removal.unwrap_or_default();
        if progress_interval.is_zero() {
            return Err(anyhow!("The progress interval must not be zero"));
        }
        let removal = Removal {
            countdown,
            progress_interval,
        };

        Ok(Self {
            storage,
            catalog,
            geolocation,
            removal,
        })
    }
}
