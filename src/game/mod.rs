//! Game facade: setup, input routing and queries.
//!
//! A [`Game`] owns one [`Injector`], one [`GameState`] and the
//! [`RoundEngine`]. Players interact only through [`Game::submit`]; every
//! input is checked against the game-over flag, the turn queue and the
//! current phase before its action handler sees it.
//!
//! ```
//! use rail_rules::game::GameSetup;
//! use rail_rules::core::{Phase, PlayerInput};
//! use rail_rules::variants::standard_registry;
//!
//! let registry = standard_registry().unwrap();
//! let mut game = GameSetup::new(registry.get("base").unwrap())
//!     .players(3)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(game.phase().unwrap(), Phase::IssueShares);
//! let first = game.current_player().unwrap().unwrap();
//! game.submit(first, PlayerInput::TakeShares { count: 0 }).unwrap();
//! ```

pub mod log;
pub mod starter;
pub mod state;

use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::context::Injector;
use crate::core::{
    Action, ActionRecord, BuildData, ConfigError, EngineResult, GameRng, Phase, PlayerId, PlayerInput,
    RandomSource, UrbanizeData, ValidationError, ValidationKind,
};
use crate::map::{Coordinates, Direction, Orientation, SpaceType, TileType};
use crate::phases::{PhaseHandler, RoundEngine};
use crate::rules::select::MAX_SHARES;
use crate::rules::{
    execute, AllowedActionsRole, BuildActionRole, CostCalculatorRole, EnderRole, GameResult, LocomotiveRole,
    LocomotiveUpgradeRole, MoveActionRole, PassActionRole, SelectActionRole, SharesActionRole,
    UrbanizeActionRole,
};
use crate::state::slots::{CURRENT_PLAYER, GAME_ENDED, NEW_CITIES, RESULT};
use crate::state::PlayerData;
use crate::variants::GameSettings;

pub use self::log::{LogEntry, NarrativeLog};
pub use self::starter::{GameStarter, GameStarterRole, GenericStarter, GOODS_PER_COLOR, STARTING_GOODS};
pub use self::state::{GameState, StateSnapshot};

/// Builder for a [`Game`].
#[derive(Debug)]
pub struct GameSetup {
    settings: Arc<GameSettings>,
    player_count: usize,
    seed: u64,
    dice: Option<Box<dyn RandomSource>>,
}

impl GameSetup {
    /// Setup for `settings` at its minimum player count, seed 0.
    #[must_use]
    pub fn new(settings: Arc<GameSettings>) -> Self {
        Self {
            player_count: settings.min_players(),
            settings,
            seed: 0,
            dice: None,
        }
    }

    #[must_use]
    pub fn players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Seed for the game's ChaCha dice.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the seeded dice, e.g. with [`ScriptedDice`](crate::core::ScriptedDice).
    #[must_use]
    pub fn dice(mut self, dice: impl RandomSource + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Initialize every slot and run the engine up to the first input.
    pub fn build(self) -> EngineResult<Game> {
        self.settings.check_player_count(self.player_count)?;
        let rng: Box<dyn RandomSource> = match self.dice {
            Some(dice) => dice,
            None => Box::new(GameRng::new(self.seed)),
        };

        let mut injector = Injector::new(Arc::clone(&self.settings), self.player_count);
        let mut state = GameState::new(Arc::clone(&self.settings), self.player_count, rng);
        let engine = RoundEngine::new(self.settings.modules())?;

        injector.resolve::<GameStarterRole>()?.start(&mut state)?;
        engine.begin(&mut injector, &mut state)?;
        info!(
            variant = self.settings.id(),
            players = self.player_count,
            seed = self.seed,
            "game started"
        );

        Ok(Game {
            injector,
            state,
            engine,
            history: Vec::new(),
        })
    }
}

/// A point [`Game::rewind`] can return to.
#[derive(Clone, Debug)]
pub struct GameCheckpoint {
    state: StateSnapshot,
    history_len: usize,
}

/// One running game.
#[derive(Debug)]
pub struct Game {
    injector: Injector,
    state: GameState,
    engine: RoundEngine,
    history: Vec<ActionRecord>,
}

impl Game {
    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        self.state.settings()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn log(&self) -> &NarrativeLog {
        self.state.log()
    }

    /// Accepted inputs, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Effective phase list after modules.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        self.engine.phases()
    }

    /// Capability roles resolved so far.
    #[must_use]
    pub fn resolved_roles(&self) -> &[&'static str] {
        self.injector.resolved_roles()
    }

    pub fn round(&self) -> Result<u32, ConfigError> {
        self.state.round()
    }

    pub fn phase(&self) -> Result<Phase, ConfigError> {
        self.state.phase()
    }

    /// Who must act next; `None` once the game is over.
    pub fn current_player(&self) -> Result<Option<PlayerId>, ConfigError> {
        self.state.get(CURRENT_PLAYER)
    }

    pub fn is_over(&self) -> Result<bool, ConfigError> {
        self.state.get(GAME_ENDED)
    }

    pub fn result(&self) -> Result<Option<GameResult>, ConfigError> {
        self.state.get(RESULT)
    }

    pub fn player(&self, player: PlayerId) -> Result<PlayerData, ConfigError> {
        self.state.player(player)
    }

    /// The game's action list, in display order.
    pub fn actions(&mut self) -> Result<Vec<Action>, ConfigError> {
        Ok(self.injector.resolve::<AllowedActionsRole>()?.actions().to_vec())
    }

    /// Actions nobody has taken and nothing has disabled.
    pub fn available_actions(&mut self) -> EngineResult<Vec<Action>> {
        self.injector.resolve::<AllowedActionsRole>()?.available(&self.state)
    }

    pub fn disabled_reason(&mut self, action: Action) -> EngineResult<Option<String>> {
        self.injector
            .resolve::<AllowedActionsRole>()?
            .disabled_reason(&self.state, action)
    }

    /// Effective locomotive level of `player`.
    pub fn locomotive(&mut self, player: PlayerId) -> EngineResult<u8> {
        self.injector.resolve::<LocomotiveRole>()?.level(&self.state, player)
    }

    /// Locomotive as shown to players.
    pub fn locomotive_display(&mut self, player: PlayerId) -> EngineResult<String> {
        self.injector.resolve::<LocomotiveRole>()?.display(&self.state, player)
    }

    /// What `build` would cost `player` right now.
    pub fn build_cost(&mut self, player: PlayerId, build: &BuildData) -> EngineResult<u32> {
        self.injector
            .resolve::<CostCalculatorRole>()?
            .cost_of(&self.state, player, build)
    }

    pub fn score(&mut self, player: PlayerId) -> EngineResult<i32> {
        self.injector.resolve::<EnderRole>()?.score(&self.state, player)
    }

    /// Rounds in this game.
    pub fn turn_length(&mut self) -> Result<u32, ConfigError> {
        Ok(self.injector.resolve::<EnderRole>()?.turn_length())
    }

    /// Capture the game so later inputs can be undone.
    #[must_use]
    pub fn checkpoint(&self) -> GameCheckpoint {
        GameCheckpoint {
            state: self.state.snapshot(),
            history_len: self.history.len(),
        }
    }

    /// Undo every input accepted since `checkpoint`, dice included: the same
    /// inputs afterwards roll the same faces.
    pub fn rewind(&mut self, checkpoint: GameCheckpoint) -> Result<(), ConfigError> {
        self.state.restore(checkpoint.state)?;
        self.history.truncate(checkpoint.history_len);
        debug!(accepted = self.history.len(), "game rewound");
        Ok(())
    }

    /// Check `input` without applying it.
    pub fn validate(&mut self, player: PlayerId, input: &PlayerInput) -> EngineResult<()> {
        self.check_turn(player, input)?;
        self.dispatch(player, input, false).map(|_| ())
    }

    /// Apply `input` for `player`. On error nothing changed.
    pub fn submit(&mut self, player: PlayerId, input: PlayerInput) -> EngineResult<()> {
        let outcome = self.apply(player, &input);
        match &outcome {
            Err(err) if err.is_validation() => debug!(%player, input = input.kind(), %err, "input rejected"),
            Err(err) => warn!(%player, input = input.kind(), %err, "engine failure"),
            Ok(()) => {}
        }
        outcome
    }

    /// Every input the current player could submit now, except deliveries,
    /// which depend on a path and are submitted directly.
    pub fn legal_inputs(&mut self) -> EngineResult<Vec<PlayerInput>> {
        let Some(player) = self.current_player()? else {
            return Ok(Vec::new());
        };

        let mut candidates = vec![PlayerInput::Pass];
        match self.phase()? {
            Phase::IssueShares => {
                candidates.extend((0..=MAX_SHARES).map(|count| PlayerInput::TakeShares { count }));
            }
            Phase::SelectAction => {
                candidates.extend(self.actions()?.into_iter().map(|action| PlayerInput::SelectAction { action }));
            }
            Phase::Building => {
                candidates.extend(self.build_candidates(player)?);
                candidates.extend(self.urbanize_candidates()?);
            }
            Phase::Moving => candidates.push(PlayerInput::UpgradeLocomotive),
            _ => {}
        }

        let mut legal = Vec::new();
        for input in candidates {
            match self.validate(player, &input) {
                Ok(()) => legal.push(input),
                Err(err) if err.is_validation() => {}
                Err(err) => return Err(err),
            }
        }
        Ok(legal)
    }

    fn apply(&mut self, player: PlayerId, input: &PlayerInput) -> EngineResult<()> {
        self.check_turn(player, input)?;
        let round = self.state.round()?;
        let phase = self.state.phase()?;
        let ends_turn = self.dispatch(player, input, true)?;

        self.history.push(ActionRecord {
            player,
            input: input.clone(),
            round,
            phase,
            sequence: self.history.len() as u32,
        });
        if ends_turn {
            self.engine.end_turn(&mut self.injector, &mut self.state)?;
        }
        Ok(())
    }

    fn check_turn(&mut self, player: PlayerId, input: &PlayerInput) -> EngineResult<()> {
        if self.is_over()? {
            return Err(ValidationError::new(ValidationKind::GameOver, "the game has ended").into());
        }
        if player.index() >= self.state.player_count() {
            return Err(ValidationError::invalid_input(format!("{player} is not in this game")).into());
        }
        if self.current_player()? != Some(player) {
            return Err(ValidationError::new(ValidationKind::OutOfTurn, format!("it is not {player}'s turn")).into());
        }
        let phase = self.phase()?;
        let handler: Rc<dyn PhaseHandler> = self.engine.handler(&mut self.injector, phase)?;
        if !handler.accepts(input) {
            return Err(ValidationError::not_allowed(format!("cannot {} during {phase}", input.kind())).into());
        }
        Ok(())
    }

    /// Route `input` to its action handler. Returns whether the turn ends.
    fn dispatch(&mut self, player: PlayerId, input: &PlayerInput, commit: bool) -> EngineResult<bool> {
        let injector = &mut self.injector;
        let state = &mut self.state;
        match input {
            PlayerInput::TakeShares { count } => {
                execute(&*injector.resolve::<SharesActionRole>()?, state, player, count, commit)
            }
            PlayerInput::SelectAction { action } => {
                execute(&*injector.resolve::<SelectActionRole>()?, state, player, action, commit)
            }
            PlayerInput::Build(build) => execute(&*injector.resolve::<BuildActionRole>()?, state, player, build, commit),
            PlayerInput::Urbanize(data) => {
                execute(&*injector.resolve::<UrbanizeActionRole>()?, state, player, data, commit)
            }
            PlayerInput::MoveGoods(data) => execute(&*injector.resolve::<MoveActionRole>()?, state, player, data, commit),
            PlayerInput::UpgradeLocomotive => {
                execute(&*injector.resolve::<LocomotiveUpgradeRole>()?, state, player, &(), commit)
            }
            PlayerInput::Pass => execute(&*injector.resolve::<PassActionRole>()?, state, player, &(), commit),
        }
    }

    /// Every tile and rotation on spaces touching a stop or existing track.
    fn build_candidates(&self, player: PlayerId) -> Result<Vec<PlayerInput>, ConfigError> {
        let track = self.state.track()?;
        let mut spaces = Vec::new();
        for (space, _) in self.settings().grid().iter() {
            if track.get(space).is_some_and(|t| t.owner == Some(player)) {
                spaces.push(space);
                continue;
            }
            for direction in Direction::ALL {
                let Some(next) = self.state.neighbor(space, direction) else {
                    continue;
                };
                if track.contains(next) || self.state.space(next)?.is_some_and(SpaceType::is_city) {
                    spaces.push(space);
                    break;
                }
            }
        }
        spaces.sort();

        let mut inputs = Vec::new();
        for coordinates in spaces {
            for tile in TileType::ALL {
                for steps in 0..6 {
                    inputs.push(PlayerInput::Build(BuildData {
                        coordinates,
                        tile,
                        orientation: Orientation::new(steps),
                    }));
                }
            }
        }
        Ok(inputs)
    }

    /// Every remaining colour on every land space that is not already a city.
    /// Which of them are targets is up to the resolved urbanize handler.
    fn urbanize_candidates(&self) -> Result<Vec<PlayerInput>, ConfigError> {
        let colors = self.state.get(NEW_CITIES)?;
        let mut sites: Vec<Coordinates> = Vec::new();
        for (space, _) in self.settings().grid().iter() {
            if self.state.space(space)?.is_some_and(|s| s.is_land() && !s.is_city()) {
                sites.push(space);
            }
        }
        sites.sort();
        Ok(sites
            .into_iter()
            .flat_map(|coordinates| {
                colors
                    .iter()
                    .map(move |&color| PlayerInput::Urbanize(UrbanizeData { coordinates, color }))
            })
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::{GameStarter, GameState, GenericStarter};
    use crate::core::{Action, BuildData, Phase, PlayerId, ScriptedDice};
    use crate::map::{BuiltTrack, CityColor, CoordMap, Coordinates, Grid, Orientation, SpaceType, TileType};
    use crate::state::slots::{GOODS, TRACK};
    use crate::variants::GameSettings;

    /// A single row: Red city, two plains, a town, a hill, a Blue city.
    /// The row below is water.
    pub fn strip_grid() -> Grid {
        let builder = Grid::builder()
            .city(Coordinates::new(0, 0), CityColor::Red, 1)
            .town(Coordinates::new(3, 0))
            .space(Coordinates::new(4, 0), SpaceType::Hill)
            .city(Coordinates::new(5, 0), CityColor::Blue, 2);
        (0..6)
            .fold(builder, |b, q| b.space(Coordinates::new(q, 1), SpaceType::Water))
            .fill(6, 1, SpaceType::Plain)
            .build()
    }

    pub fn strip_settings() -> Arc<GameSettings> {
        Arc::new(
            GameSettings::builder("strip", "Strip")
                .with_players(1, 6)
                .with_grid(strip_grid())
                .build()
                .unwrap(),
        )
    }

    /// Started state in the building phase with no goods on the board.
    pub fn strip_state(players: usize) -> GameState {
        let mut state = GameState::new(strip_settings(), players, Box::new(ScriptedDice::new([1, 2, 3, 4, 5, 6])));
        GenericStarter::new(Phase::Building).start(&mut state).unwrap();
        state.set(GOODS, CoordMap::new()).unwrap();
        state
    }

    pub fn build(q: i32, r: i32, tile: TileType, orientation: u8) -> BuildData {
        BuildData {
            coordinates: Coordinates::new(q, r),
            tile,
            orientation: Orientation::new(orientation),
        }
    }

    /// Put track on the board without going through the build action.
    pub fn lay(state: &mut GameState, q: i32, r: i32, tile: TileType, orientation: u8, owner: PlayerId) {
        state
            .update(TRACK, |track| {
                track.insert(
                    Coordinates::new(q, r),
                    BuiltTrack {
                        tile,
                        orientation: Orientation::new(orientation),
                        owner: Some(owner),
                    },
                );
            })
            .unwrap();
    }

    pub fn select(state: &mut GameState, player: PlayerId, action: Action) {
        state.update_player(player, |d| d.selected_action = Some(action)).unwrap();
    }
}
