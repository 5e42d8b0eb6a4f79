use crate::{
    catalog::Catalog,
    entities::*,
    gateways::clock::Clock,
    repositories::{self, KeyValueStore},
};
use placepicker_entities::builders::*;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    io,
    rc::Rc,
    time::{Duration, Instant},
};


/// Catalog of three places along the diagonal: a(0,0), b(10,10), c(20,20).
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        Place::build()
            .id("a")
            .title("Place A")
            .lat_lng(0.0, 0.0)
            .finish(),
        Place::build()
            .id("b")
            .title("Place B")
            .lat_lng(10.0, 10.0)
            .finish(),
        Place::build()
            .id("c")
            .title("Place C")
            .lat_lng(20.0, 20.0)
            .finish(),
    ])
}

pub fn catalog_of(ids: &[&str]) -> Catalog {
    ids.iter()
        .map(|id| Place::build().id(id).title(id).finish())
        .collect::<Vec<_>>()
        .into()
}

#[derive(Default)]
pub struct MockStore {
    items: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    failing_reads: Cell<bool>,
    failing_writes: Cell<bool>,
}

impl MockStore {
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn fail_reads(&self) {
        self.failing_reads.set(true);
    }

    pub fn fail_writes(&self) {
        self.failing_writes.set(true);
    }

    pub fn repair_writes(&self) {
        self.failing_writes.set(false);
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn stored_ids(&self, key: &str) -> Vec<String> {
        let items = self.items.borrow();
        let value = items.get(key).expect("stored value");
        serde_json::from_str(value).expect("JSON array")
    }
}

impl KeyValueStore for MockStore {
    fn get_item(&self, key: &str) -> repositories::Result<Option<String>> {
        if self.failing_reads.get() {
            return Err(io::Error::other("read failed").into());
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> repositories::Result<()> {
        if self.failing_writes.get() {
            return Err(io::Error::other("write failed").into());
        }
        self.writes.set(self.writes.get() + 1);
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
