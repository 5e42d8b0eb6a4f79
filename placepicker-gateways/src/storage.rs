use jfs::Store;
use placepicker_core::repositories::{KeyValueStore, Result};
use std::{
    io::{self, ErrorKind},
    path::Path,
};

/// A persistent key-value store that keeps each item in a JSON file.
pub struct JsonFileStore {
    json_store: Store,
}

impl JsonFileStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }
    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self.json_store.get::<String>(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        log::debug!("Saving '{key}' in {}", self.path().display());
        self.json_store.save_with_id(&value.to_owned(), key)?;
        Ok(())
    }
}
