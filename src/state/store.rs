//! The State Store: every piece of mutable game state, by slot.
//!
//! ## Contract
//!
//! - `init_state` fails if the slot is already initialized
//! - `set` / `update` fail if the slot is not yet initialized
//! - `get` fails if the slot is not initialized; there is no implicit default
//! - Writes are visible to the very next read
//!
//! Every successful write is appended to the store's history. Writes are never
//! coalesced, so the history replays the game exactly.
//!
//! Backed by `im` persistent structures so [`StateStore::snapshot`] is O(1).

use im::{HashMap as ImHashMap, Vector};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::key::Key;
use crate::core::ConfigError;

/// One recorded slot write.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotWrite {
    /// Position in the game's write history.
    pub sequence: u64,
    /// Slot written.
    pub slot: &'static str,
    /// Value after the write.
    pub value: Value,
}

/// Saved store contents, restorable with [`StateStore::restore`].
#[derive(Clone, Debug)]
pub struct StoreSnapshot {
    slots: ImHashMap<&'static str, Value>,
    history: Vector<SlotWrite>,
    sequence: u64,
}

/// Typed key/value slots holding all mutable game state.
#[derive(Clone, Debug, Default)]
pub struct StateStore {
    slots: ImHashMap<&'static str, Value>,
    history: Vector<SlotWrite>,
    sequence: u64,
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has been initialized.
    #[must_use]
    pub fn is_initialized<T>(&self, key: Key<T>) -> bool {
        self.slots.contains_key(key.name())
    }

    /// Initialize a slot. Fails if it already holds a value.
    pub fn init_state<T: Serialize>(&mut self, key: Key<T>, value: T) -> Result<(), ConfigError> {
        if self.is_initialized(key) {
            return Err(ConfigError::SlotAlreadyInitialized(key.name()));
        }
        let encoded = key.encode(&value)?;
        self.write(key.name(), encoded);
        Ok(())
    }

    /// Replace a slot's value. Fails if the slot was never initialized.
    pub fn set<T: Serialize>(&mut self, key: Key<T>, value: T) -> Result<(), ConfigError> {
        if !self.is_initialized(key) {
            return Err(ConfigError::UninitializedSlot(key.name()));
        }
        let encoded = key.encode(&value)?;
        self.write(key.name(), encoded);
        Ok(())
    }

    /// Read a slot. Fails if the slot was never initialized.
    pub fn get<T: DeserializeOwned>(&self, key: Key<T>) -> Result<T, ConfigError> {
        let value = self
            .slots
            .get(key.name())
            .ok_or(ConfigError::UninitializedSlot(key.name()))?;
        key.parse(value)
    }

    /// Read a slot that may legitimately be absent.
    pub fn try_get<T: DeserializeOwned>(&self, key: Key<T>) -> Result<Option<T>, ConfigError> {
        self.slots.get(key.name()).map(|v| key.parse(v)).transpose()
    }

    /// Read-modify-write. Fails like [`StateStore::set`] when uninitialized.
    pub fn update<T, R>(&mut self, key: Key<T>, f: impl FnOnce(&mut T) -> R) -> Result<R, ConfigError>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut value = self.get(key)?;
        let out = f(&mut value);
        self.set(key, value)?;
        Ok(out)
    }

    /// Ingest a transport value for `key`, checking its shape first.
    ///
    /// Initializes the slot if needed, otherwise overwrites it.
    pub fn load_raw<T: DeserializeOwned>(&mut self, key: Key<T>, value: Value) -> Result<(), ConfigError> {
        key.parse(&value)?;
        self.write(key.name(), value);
        Ok(())
    }

    /// Names of all initialized slots.
    #[must_use]
    pub fn slot_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slots.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// All slot values as one JSON object, for the transport layer.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .slots
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }

    /// Every write so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<SlotWrite> {
        &self.history
    }

    /// Capture the current contents.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            slots: self.slots.clone(),
            history: self.history.clone(),
            sequence: self.sequence,
        }
    }

    /// Return to a captured state, discarding later writes.
    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        self.slots = snapshot.slots;
        self.history = snapshot.history;
        self.sequence = snapshot.sequence;
    }

    /// Drop every slot and the history. Used at game end or reset.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.history.clear();
        self.sequence = 0;
    }

    fn write(&mut self, slot: &'static str, value: Value) {
        trace!(slot, %value, "state write");
        self.sequence += 1;
        self.history.push_back(SlotWrite {
            sequence: self.sequence,
            slot,
            value: value.clone(),
        });
        self.slots.insert(slot, value);
    }
}
