//! Urbanization onto built track instead of towns.

use std::rc::Rc;

use crate::context::{Injector, Override};
use crate::core::{ConfigError, EngineResult, PlayerId, UrbanizeData, ValidationError};
use crate::game::GameState;
use crate::rules::{ActionHandler, UrbanizeAction, UrbanizeActionRole};

/// A new city may go on any land space that already has track.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackUrbanize {
    generic: UrbanizeAction,
}

impl ActionHandler<UrbanizeData> for TrackUrbanize {
    fn validate(&self, state: &GameState, player: PlayerId, input: &UrbanizeData) -> EngineResult<()> {
        self.generic.validate_common(state, player, input)?;
        let at = input.coordinates;
        match state.space(at)? {
            Some(space) if space.is_land() && !space.is_city() => {}
            Some(space) if space.is_city() => {
                return Err(ValidationError::illegal_target(format!("{at} is already a city")).into());
            }
            _ => return Err(ValidationError::illegal_target(format!("{at} is not land")).into()),
        }
        if !state.track()?.contains(at) {
            return Err(ValidationError::illegal_target(format!("{at} has no track")).into());
        }
        Ok(())
    }

    fn process(&self, state: &mut GameState, player: PlayerId, input: &UrbanizeData) -> EngineResult<bool> {
        self.generic.process(state, player, input)
    }
}

fn track_urbanize(_: &mut Injector) -> Result<Rc<dyn ActionHandler<UrbanizeData>>, ConfigError> {
    Ok(Rc::new(TrackUrbanize::default()))
}

#[must_use]
pub fn track_urbanize_override() -> Override {
    Override::of::<UrbanizeActionRole>("TrackUrbanize", track_urbanize)
}
