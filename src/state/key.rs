//! Typed handles into the State Store.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ConfigError;

/// A named, typed state slot.
///
/// Keys are declared once as constants next to the concern that owns them.
/// The slot's Rust type is its shape validator: values are stored as JSON and
/// parsed back through `T` on every read.
///
/// ```
/// use rail_rules::state::Key;
///
/// const ROUND: Key<u32> = Key::new("round");
/// assert_eq!(ROUND.name(), "round");
/// ```
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Declare a slot.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Unique slot name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: DeserializeOwned> Key<T> {
    /// Parse a stored value into the slot's type.
    pub fn parse(&self, value: &Value) -> Result<T, ConfigError> {
        T::deserialize(value).map_err(|e| ConfigError::MalformedSlot {
            slot: self.name,
            reason: e.to_string(),
        })
    }
}

impl<T: Serialize> Key<T> {
    /// Encode a value for storage.
    pub fn encode(&self, value: &T) -> Result<Value, ConfigError> {
        serde_json::to_value(value).map_err(|e| ConfigError::MalformedSlot {
            slot: self.name,
            reason: e.to_string(),
        })
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MONEY: Key<Vec<i32>> = Key::new("money");

    #[test]
    fn test_parse_accepts_matching_shape() {
        assert_eq!(MONEY.parse(&json!([1, 2, 3])).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = MONEY.parse(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSlot { slot: "money", .. }));
    }
}
