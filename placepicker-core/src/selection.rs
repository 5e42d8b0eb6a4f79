//! The user's ordered list of picked places.
//!
//! The list is mirrored into a [`KeyValueStore`] as a JSON encoded
//! array of place ids, most recently picked first. Every change of
//! the membership rewrites the whole array.

use crate::{
    catalog::Catalog,
    countdown::{Countdown, Generation, DEFAULT_DURATION},
    entities::*,
    gateways::clock::Clock,
    repositories::KeyValueStore,
    usecases::{Error, Result},
};
use std::{collections::HashSet, time::Duration};

pub const SELECTED_PLACES_KEY: &str = "selectedPlaces";

#[derive(Debug, Clone)]
pub struct SelectionOptions {
    /// Key of the persisted id array.
    pub key: String,
    /// Time until a pending removal is confirmed automatically.
    pub countdown: Duration,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            key: SELECTED_PLACES_KEY.to_string(),
            countdown: DEFAULT_DURATION,
        }
    }
}

pub struct SelectionStore<'c, S, C> {
    catalog: &'c Catalog,
    store: S,
    clock: C,
    key: String,
    picked: Vec<Place>,
    countdown: Countdown,
}

impl<'c, S, C> SelectionStore<'c, S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn load(catalog: &'c Catalog, store: S, clock: C) -> Self {
        Self::load_with_options(catalog, store, clock, SelectionOptions::default())
    }

    /// Restores the picked places from the persistent store.
    ///
    /// A missing or malformed value results in an empty list.
    /// Stored ids without a matching place are dropped.
    pub fn load_with_options(
        catalog: &'c Catalog,
        store: S,
        clock: C,
        options: SelectionOptions,
    ) -> Self {
        let SelectionOptions { key, countdown } = options;
        let stored_ids = read_stored_ids(&store, &key);
        let mut unique_ids = HashSet::with_capacity(stored_ids.len());
        let picked = stored_ids
            .iter()
            .filter(|id| unique_ids.insert(id.as_str()))
            .filter_map(|id| {
                let place = catalog.find(id);
                if place.is_none() {
                    log::debug!("Dropping unknown place '{id}' from selection");
                }
                place.cloned()
            })
            .collect::<Vec<_>>();
        log::debug!("Loaded {} picked place(s)", picked.len());
        Self {
            catalog,
            store,
            clock,
            key,
            picked,
            countdown: Countdown::new(countdown),
        }
    }

    pub fn picked_places(&self) -> &[Place] {
        &self.picked
    }

    pub fn picked_ids(&self) -> impl Iterator<Item = &Id> {
        self.picked.iter().map(|place| &place.id)
    }

    pub fn is_picked(&self, id: &str) -> bool {
        self.picked.iter().any(|place| place.id == id)
    }

    /// Picks a place.
    ///
    /// Returns `false` without any changes if the place
    /// is unknown or has already been picked.
    pub fn select(&mut self, id: &str) -> Result<bool> {
        let Some(place) = self.catalog.find(id) else {
            log::debug!("Cannot select unknown place '{id}'");
            return Ok(false);
        };
        if self.is_picked(id) {
            return Ok(false);
        }
        let place = place.clone();
        let mut stored_ids = read_stored_ids(&self.store, &self.key);
        if !stored_ids.iter().any(|stored_id| stored_id == id) {
            stored_ids.insert(0, id.to_owned());
            self.write_stored_ids(&stored_ids)?;
        }
        self.picked.insert(0, place);
        log::debug!("Selected place '{id}'");
        Ok(true)
    }

    /// Marks a place for removal and (re)starts the countdown.
    pub fn request_removal(&mut self, id: impl Into<Id>) -> Generation {
        let now = self.clock.now();
        self.countdown.arm(id.into(), now)
    }

    /// Removes the pending place.
    ///
    /// Returns the id of the removed place or `None`
    /// if no removal was pending. The removal stays pending
    /// if the store could not be written.
    pub fn confirm_removal(&mut self) -> Result<Option<Id>> {
        let Some(id) = self.countdown.pending().cloned() else {
            return Ok(None);
        };
        let stored_ids = read_stored_ids(&self.store, &self.key)
            .into_iter()
            .filter(|stored_id| id != stored_id.as_str())
            .collect::<Vec<_>>();
        self.write_stored_ids(&stored_ids)?;
        self.countdown.disarm();
        self.picked.retain(|place| place.id != id);
        log::debug!("Removed place '{id}'");
        Ok(Some(id))
    }

    /// Discards the pending removal.
    pub fn cancel_removal(&mut self) -> Option<Id> {
        self.countdown.disarm()
    }

    /// Handles a deferred expiry notification.
    ///
    /// The notification is ignored if it belongs to a countdown
    /// that has been reset, cancelled or confirmed in the meantime.
    pub fn countdown_elapsed(&mut self, generation: Generation) -> Result<Option<Id>> {
        if !self.countdown.is_current(generation) {
            log::debug!("Ignoring stale removal countdown {generation:?}");
            return Ok(None);
        }
        self.confirm_removal()
    }

    /// Confirms the pending removal if its countdown has elapsed.
    pub fn tick(&mut self) -> Result<Option<Id>> {
        if self.countdown.is_elapsed(self.clock.now()) {
            self.confirm_removal()
        } else {
            Ok(None)
        }
    }

    pub fn pending_removal(&self) -> Option<&Id> {
        self.countdown.pending()
    }

    pub fn is_removal_pending(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.countdown.remaining(self.clock.now())
    }

    pub fn remaining_ratio(&self) -> Option<f64> {
        self.countdown.remaining_ratio(self.clock.now())
    }

    pub fn countdown_duration(&self) -> Duration {
        self.countdown.duration()
    }

    fn write_stored_ids(&self, ids: &[String]) -> Result<()> {
        let value = serde_json::to_string(ids).map_err(Error::Encode)?;
        self.store.set_item(&self.key, &value)?;
        Ok(())
    }
}

fn read_stored_ids<S: KeyValueStore>(store: &S, key: &str) -> Vec<String> {
    let value = match store.get_item(key) {
        Ok(Some(value)) => value,
        Ok(None) => return vec![],
        Err(err) => {
            log::warn!("Unable to read selected places: {err}");
            return vec![];
        }
    };
    // Entries that are not strings cannot match any place.
    match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&value) {
        Ok(ids) => ids
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| match id {
                serde_json::Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        Err(err) => {
            log::warn!("Ignoring malformed selected places '{value}': {err}");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    fn ids<S: KeyValueStore, C: Clock>(selection: &SelectionStore<S, C>) -> Vec<String> {
        selection.picked_ids().map(ToString::to_string).collect()
    }

    #[test]
    fn load_from_empty_store() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        let selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert!(selection.picked_places().is_empty());
        assert!(!selection.is_removal_pending());
    }

    #[test]
    fn load_from_malformed_store() {
        let catalog = sample_catalog();
        for value in ["", "null", "{\"a\":1}", "[1,2]", "not json"] {
            let store = MockStore::with_item(SELECTED_PLACES_KEY, value);
            let selection = SelectionStore::load(&catalog, &store, ManualClock::default());
            assert!(selection.picked_places().is_empty(), "{value}");
        }
    }

    #[test]
    fn load_from_unreadable_store() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        store.fail_reads();
        let selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert!(selection.picked_places().is_empty());
    }

    #[test]
    fn drop_unknown_ids_on_load() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["c","x","a","c"]"#);
        let selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert_eq!(ids(&selection), ["c", "a"]);
        assert_eq!(selection.picked_places()[0].title, "Place C");
    }

    #[test]
    fn select_prepends_and_persists() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert!(selection.select("b").unwrap());
        assert!(selection.select("a").unwrap());
        assert_eq!(ids(&selection), ["a", "b"]);
        assert_eq!(store.stored_ids(SELECTED_PLACES_KEY), ["a", "b"]);
    }

    #[test]
    fn select_is_idempotent() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert!(selection.select("b").unwrap());
        let writes = store.write_count();
        assert!(!selection.select("b").unwrap());
        assert_eq!(ids(&selection), ["b"]);
        assert_eq!(store.stored_ids(SELECTED_PLACES_KEY), ["b"]);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn select_unknown_place() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert!(!selection.select("x").unwrap());
        assert!(selection.picked_places().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn select_reports_write_errors() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        store.fail_writes();
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert!(matches!(selection.select("a"), Err(Error::Repo(_))));
        assert!(!selection.is_picked("a"));
        assert!(selection.picked_places().is_empty());
    }

    #[test]
    fn retry_select_after_write_error() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        store.fail_writes();
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert!(selection.select("a").is_err());
        store.repair_writes();
        assert!(selection.select("a").unwrap());
        assert_eq!(ids(&selection), ["a"]);
        assert_eq!(store.stored_ids(SELECTED_PLACES_KEY), ["a"]);
    }

    #[test]
    fn confirm_removal_reports_write_errors() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["a","b"]"#);
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        selection.request_removal("a");
        store.fail_writes();
        assert!(matches!(selection.confirm_removal(), Err(Error::Repo(_))));
        assert_eq!(ids(&selection), ["a", "b"]);
        assert_eq!(selection.pending_removal().map(Id::as_str), Some("a"));
        store.repair_writes();
        assert_eq!(selection.confirm_removal().unwrap(), Some("a".into()));
        assert_eq!(ids(&selection), ["b"]);
        assert_eq!(store.stored_ids(SELECTED_PLACES_KEY), ["b"]);
    }

    #[test]
    fn skip_non_string_ids_on_load() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["a",1,null,"b"]"#);
        let selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert_eq!(ids(&selection), ["a", "b"]);
    }

    #[test]
    fn request_removal_does_not_change_the_list() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["a","b"]"#);
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        selection.request_removal("b");
        assert!(selection.is_removal_pending());
        assert_eq!(selection.pending_removal().map(Id::as_str), Some("b"));
        assert_eq!(ids(&selection), ["a", "b"]);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn confirm_removal_keeps_order_of_others() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["c","b","a"]"#);
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        selection.request_removal("b");
        assert_eq!(selection.confirm_removal().unwrap(), Some("b".into()));
        assert_eq!(ids(&selection), ["c", "a"]);
        assert_eq!(store.stored_ids(SELECTED_PLACES_KEY), ["c", "a"]);
        assert!(!selection.is_removal_pending());
        assert!(selection.remaining().is_none());
    }

    #[test]
    fn confirm_without_pending_removal() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["a"]"#);
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert_eq!(selection.confirm_removal().unwrap(), None);
        assert_eq!(ids(&selection), ["a"]);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn cancel_removal_leaves_list_unchanged() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["a","b"]"#);
        let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
        let before = selection.picked_places().to_vec();
        selection.request_removal("a");
        assert_eq!(selection.cancel_removal(), Some("a".into()));
        assert_eq!(selection.picked_places(), &before[..]);
        assert_eq!(
            store.get_item(SELECTED_PLACES_KEY).unwrap().as_deref(),
            Some(r#"["a","b"]"#)
        );
        assert!(!selection.is_removal_pending());
    }

    #[test]
    fn auto_confirm_when_countdown_elapsed() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["a","b"]"#);
        let clock = ManualClock::default();
        let mut selection = SelectionStore::load(&catalog, &store, clock.clone());
        selection.request_removal("a");
        clock.advance(Duration::from_millis(2_999));
        assert_eq!(selection.tick().unwrap(), None);
        assert_eq!(selection.remaining(), Some(Duration::from_millis(1)));
        clock.advance(Duration::from_millis(1));
        assert_eq!(selection.tick().unwrap(), Some("a".into()));
        assert_eq!(ids(&selection), ["b"]);
        // No double confirm
        clock.advance(Duration::from_millis(5_000));
        assert_eq!(selection.tick().unwrap(), None);
    }

    #[test]
    fn no_auto_confirm_after_cancel() {
        let catalog = catalog_of(&["p1"]);
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["p1"]"#);
        let clock = ManualClock::default();
        let mut selection = SelectionStore::load(&catalog, &store, clock.clone());
        let generation = selection.request_removal("p1");
        clock.advance(Duration::from_millis(1_000));
        selection.cancel_removal();
        clock.advance(Duration::from_millis(2_100));
        assert_eq!(selection.tick().unwrap(), None);
        assert_eq!(selection.countdown_elapsed(generation).unwrap(), None);
        assert_eq!(ids(&selection), ["p1"]);
    }

    #[test]
    fn rearm_discards_previous_countdown() {
        let catalog = sample_catalog();
        let store = MockStore::with_item(SELECTED_PLACES_KEY, r#"["a","b"]"#);
        let clock = ManualClock::default();
        let mut selection = SelectionStore::load(&catalog, &store, clock.clone());
        let first = selection.request_removal("a");
        clock.advance(Duration::from_millis(2_000));
        let second = selection.request_removal("b");
        clock.advance(Duration::from_millis(1_500));
        assert_eq!(selection.countdown_elapsed(first).unwrap(), None);
        assert_eq!(selection.tick().unwrap(), None);
        assert_eq!(ids(&selection), ["a", "b"]);
        assert_eq!(selection.countdown_elapsed(second).unwrap(), Some("b".into()));
        assert_eq!(ids(&selection), ["a"]);
    }

    #[test]
    fn persisted_round_trip() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        let picked = {
            let mut selection = SelectionStore::load(&catalog, &store, ManualClock::default());
            selection.select("a").unwrap();
            selection.select("c").unwrap();
            selection.select("b").unwrap();
            selection.request_removal("c");
            selection.confirm_removal().unwrap();
            selection.picked_places().to_vec()
        };
        let reloaded = SelectionStore::load(&catalog, &store, ManualClock::default());
        assert_eq!(reloaded.picked_places(), &picked[..]);
    }

    #[test]
    fn custom_key_and_countdown() {
        let catalog = sample_catalog();
        let store = MockStore::default();
        let options = SelectionOptions {
            key: "picked".into(),
            countdown: Duration::from_millis(500),
        };
        let mut selection =
            SelectionStore::load_with_options(&catalog, &store, ManualClock::default(), options);
        selection.select("a").unwrap();
        selection.request_removal("a");
        assert_eq!(selection.countdown_duration(), Duration::from_millis(500));
        assert_eq!(store.stored_ids("picked"), ["a"]);
        assert!(store.get_item(SELECTED_PLACES_KEY).unwrap().is_none());
    }
}
