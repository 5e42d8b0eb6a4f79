use crate::config;
use anyhow::{Context, Result};
use placepicker_core::entities::MapPoint;
use placepicker_gateways::{geolocation::StaticPosition, storage::JsonFileStore};

pub fn json_file_store(cfg: &config::Storage) -> Result<JsonFileStore> {
    log::debug!("Use JSON file store ({})", cfg.dir.display());
    JsonFileStore::try_new(&cfg.dir)
        .with_context(|| format!("Unable to open store {}", cfg.dir.display()))
}

/// The position given on the command line takes precedence.
pub fn geolocation_gateway(
    cli_pos: Option<MapPoint>,
    cfg: &config::Geolocation,
) -> StaticPosition {
    StaticPosition::new(cli_pos.or(cfg.pos))
}
