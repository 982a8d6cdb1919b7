//! Urbanization: placing a new city.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{Action, ConfigError, EngineResult, PlayerId, UrbanizeData, ValidationError};
use crate::game::GameState;
use crate::map::SpaceType;
use crate::state::slots::{NEW_CITIES, TURN_STATE, URBANIZED};

use super::handler::ActionHandler;

/// Generic urbanization: a new city replaces a town.
#[derive(Clone, Copy, Debug, Default)]
pub struct UrbanizeAction;

impl UrbanizeAction {
    /// Checks shared by every urbanization rule: the player holds the
    /// action, has not used it this turn, and the colour is still in supply.
    pub fn validate_common(&self, state: &GameState, player: PlayerId, input: &UrbanizeData) -> EngineResult<()> {
        if !state.player(player)?.has_selected(Action::Urbanization) {
            return Err(ValidationError::not_allowed(format!("{player} does not hold Urbanization")).into());
        }
        if state.get(TURN_STATE)?.urbanized {
            return Err(ValidationError::not_allowed("a city was already placed this turn").into());
        }
        if !state.get(NEW_CITIES)?.contains(&input.color) {
            return Err(ValidationError::insufficient(format!("no {:?} city is left to place", input.color)).into());
        }
        Ok(())
    }
}

impl ActionHandler<UrbanizeData> for UrbanizeAction {
    fn validate(&self, state: &GameState, player: PlayerId, input: &UrbanizeData) -> EngineResult<()> {
        self.validate_common(state, player, input)?;
        let at = input.coordinates;
        if state.space(at)? != Some(SpaceType::Town) {
            return Err(ValidationError::illegal_target(format!("{at} is not a town")).into());
        }
        Ok(())
    }

    fn process(&self, state: &mut GameState, player: PlayerId, input: &UrbanizeData) -> EngineResult<bool> {
        state.update(URBANIZED, |cities| {
            cities.insert(input.coordinates, input.color);
        })?;
        state.update(NEW_CITIES, |supply| {
            if let Some(i) = supply.iter().position(|c| *c == input.color) {
                supply.remove(i);
            }
        })?;
        state.update(TURN_STATE, |turn| turn.urbanized = true)?;
        state.narrate(format!(
            "{player} placed a {:?} city at {}",
            input.color, input.coordinates
        ));
        Ok(false)
    }
}

pub struct UrbanizeActionRole;

impl Role for UrbanizeActionRole {
    type Service = dyn ActionHandler<UrbanizeData>;
    const NAME: &'static str = "UrbanizeAction";

    fn generic(_: &mut Injector) -> Result<Rc<dyn ActionHandler<UrbanizeData>>, ConfigError> {
        Ok(Rc::new(UrbanizeAction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValidationKind;
    use crate::game::test_support::{select, strip_state};
    use crate::map::{CityColor, Coordinates};

    fn on(q: i32, r: i32) -> UrbanizeData {
        UrbanizeData {
            coordinates: Coordinates::new(q, r),
            color: CityColor::Black,
        }
    }

    #[test]
    fn test_requires_the_action() {
        let state = strip_state(3);
        let err = UrbanizeAction.validate(&state, PlayerId::new(0), &on(3, 0)).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::NotAllowed));
    }

    #[test]
    fn test_town_becomes_city() {
        let mut state = strip_state(3);
        let p0 = PlayerId::new(0);
        select(&mut state, p0, Action::Urbanization);

        assert!(UrbanizeAction.validate(&state, p0, &on(2, 0)).is_err());
        UrbanizeAction.validate(&state, p0, &on(3, 0)).unwrap();
        assert!(!UrbanizeAction.process(&mut state, p0, &on(3, 0)).unwrap());

        assert!(state.space(Coordinates::new(3, 0)).unwrap().is_some_and(SpaceType::is_city));
        assert!(!state.get(NEW_CITIES).unwrap().contains(&CityColor::Black));
        // once per turn
        assert!(UrbanizeAction.validate(&state, p0, &on(3, 0)).is_err());
    }
}
