//! Engine error families.
//!
//! - [`ValidationError`]: a player tried something the rules forbid. Expected
//!   during normal play; never leaves state half-mutated because `validate()`
//!   runs to completion before `process()` starts.
//! - [`ConfigError`]: the engine was wired incorrectly (duplicate variant,
//!   cyclic capability graph, reading an uninitialized slot). Indicates a bug.
//!
//! [`EngineError`] wraps both so `?` composes across the pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;

/// Category of a rejected player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationKind {
    /// Malformed input (bad count, empty path, unknown space).
    InvalidInput,
    /// The targeted space, tile or good is not a legal target.
    IllegalTarget,
    /// Not enough money, shares or capacity.
    InsufficientResources,
    /// The action is not permitted right now (phase, disabled, already used).
    NotAllowed,
    /// Another player is to act.
    OutOfTurn,
    /// The game has ended.
    GameOver,
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValidationKind::InvalidInput => "invalid input",
            ValidationKind::IllegalTarget => "illegal target",
            ValidationKind::InsufficientResources => "insufficient resources",
            ValidationKind::NotAllowed => "not allowed",
            ValidationKind::OutOfTurn => "out of turn",
            ValidationKind::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// A user-facing rule violation.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    /// Which invariant was violated.
    pub kind: ValidationKind,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for [`ValidationKind::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::InvalidInput, message)
    }

    /// Shorthand for [`ValidationKind::IllegalTarget`].
    pub fn illegal_target(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::IllegalTarget, message)
    }

    /// Shorthand for [`ValidationKind::InsufficientResources`].
    pub fn insufficient(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::InsufficientResources, message)
    }

    /// Shorthand for [`ValidationKind::NotAllowed`].
    pub fn not_allowed(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::NotAllowed, message)
    }
}

/// A developer-facing wiring or invariant failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("variant `{0}` is already registered")]
    DuplicateVariant(String),

    #[error("variant `{0}` is not registered")]
    UnknownVariant(String),

    #[error("cyclic capability dependency: {}", .0.join(" -> "))]
    CyclicDependency(Vec<&'static str>),

    #[error("override registered for `{0}` does not produce that capability")]
    OverrideTypeMismatch(&'static str),

    #[error("state slot `{0}` read before initialization")]
    UninitializedSlot(&'static str),

    #[error("state slot `{0}` is already initialized")]
    SlotAlreadyInitialized(&'static str),

    #[error("state slot `{slot}` holds a malformed value: {reason}")]
    MalformedSlot { slot: &'static str, reason: String },

    #[error("{count} players requested, variant allows {min}..={max}")]
    PlayerCountOutOfRange { count: usize, min: usize, max: usize },

    #[error("modules left the phase list empty")]
    EmptyPhaseList,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("dice checkpoint was taken from a different random source")]
    CheckpointMismatch,

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),
}

/// Any engine failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// True for player-facing rule violations.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }

    /// The validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            EngineError::Validation(err) => Some(err),
            EngineError::Config(_) => None,
        }
    }

    /// The validation category, if this is a validation error.
    #[must_use]
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        self.as_validation().map(|e| e.kind)
    }
}

/// Result alias used across the rules pipeline.
pub type EngineResult<T> = Result<T, EngineError>;
