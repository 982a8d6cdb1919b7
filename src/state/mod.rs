//! State Store: typed, named slots holding all mutable game state.
//!
//! No business logic lives here. Rules read and write slots through
//! [`Key`] handles; the store enforces explicit initialization and records
//! every write.

pub mod key;
pub mod slots;
pub mod store;

pub use key::Key;
pub use slots::{PlayerData, TurnState};
pub use store::{SlotWrite, StateStore, StoreSnapshot};
