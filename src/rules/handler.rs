//! The validate/process contract every player action follows.

use crate::core::{EngineResult, PlayerId};
use crate::game::GameState;

/// Handler for one kind of player input.
///
/// ## Implementation Notes
///
/// - `validate` is read-only: it takes `&GameState`, so it can neither write
///   slots nor roll dice. It fails with a `ValidationError` naming the
///   violated rule.
/// - `process` assumes `validate` passed. It mutates state and returns
///   whether the acting player's turn is over.
/// - Variant decorators call the wrapped handler first, then layer their own
///   checks or mutations.
pub trait ActionHandler<I: ?Sized> {
    /// Check `input` against the rules without touching state.
    fn validate(&self, state: &GameState, player: PlayerId, input: &I) -> EngineResult<()>;

    /// Apply `input`. Returns `true` if the player's turn ends.
    fn process(&self, state: &mut GameState, player: PlayerId, input: &I) -> EngineResult<bool>;
}

/// Validate, then process only if `commit` is set.
///
/// With `commit` unset this is a dry run and always reports `false`.
pub fn execute<I: ?Sized>(
    handler: &dyn ActionHandler<I>,
    state: &mut GameState,
    player: PlayerId,
    input: &I,
    commit: bool,
) -> EngineResult<bool> {
    handler.validate(state, player, input)?;
    if commit {
        handler.process(state, player, input)
    } else {
        Ok(false)
    }
}
