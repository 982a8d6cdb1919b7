//! Per-game state handed to every rule component.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::log::NarrativeLog;
use crate::core::{ConfigError, DiceCheckpoint, Phase, PlayerId, RandomSource};
use crate::map::{Coordinates, Direction, SpaceType, TrackMap};
use crate::state::slots::{PHASE, PLAYER_DATA, ROUND, TRACK, TURN_ORDER, URBANIZED};
use crate::state::{Key, PlayerData, StateStore, StoreSnapshot};
use crate::variants::GameSettings;

/// Store contents, dice position and log length at one moment.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    store: StoreSnapshot,
    dice: DiceCheckpoint,
    log_len: usize,
}

/// Everything one game instance owns: the State Store, its dice and its
/// narrative log.
///
/// Validators receive `&GameState` and so cannot mutate it or roll dice;
/// processors receive `&mut GameState`.
#[derive(Debug)]
pub struct GameState {
    store: StateStore,
    rng: Box<dyn RandomSource>,
    log: NarrativeLog,
    settings: Arc<GameSettings>,
    player_count: usize,
}

impl GameState {
    #[must_use]
    pub fn new(settings: Arc<GameSettings>, player_count: usize, rng: Box<dyn RandomSource>) -> Self {
        Self {
            store: StateStore::new(),
            rng,
            log: NarrativeLog::new(),
            settings,
            player_count,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    /// The game's single random source.
    pub fn rng(&mut self) -> &mut dyn RandomSource {
        &mut *self.rng
    }

    /// Capture everything a later [`restore`](Self::restore) needs to replay
    /// the same rolls.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            store: self.store.snapshot(),
            dice: self.rng.checkpoint(),
            log_len: self.log.len(),
        }
    }

    pub fn restore(&mut self, snapshot: StateSnapshot) -> Result<(), ConfigError> {
        self.rng.rewind(&snapshot.dice)?;
        self.store.restore(snapshot.store);
        self.log.truncate(snapshot.log_len);
        Ok(())
    }

    #[must_use]
    pub fn log(&self) -> &NarrativeLog {
        &self.log
    }

    /// Append a player-facing description of an event.
    pub fn narrate(&mut self, message: impl Into<String>) {
        let round = self.store.try_get(ROUND).ok().flatten().unwrap_or(0);
        self.log.push(round, message);
    }

    pub fn get<T: DeserializeOwned>(&self, key: Key<T>) -> Result<T, ConfigError> {
        self.store.get(key)
    }

    pub fn set<T: Serialize>(&mut self, key: Key<T>, value: T) -> Result<(), ConfigError> {
        self.store.set(key, value)
    }

    pub fn update<T, R>(&mut self, key: Key<T>, f: impl FnOnce(&mut T) -> R) -> Result<R, ConfigError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.store.update(key, f)
    }

    pub fn round(&self) -> Result<u32, ConfigError> {
        self.store.get(ROUND)
    }

    pub fn phase(&self) -> Result<Phase, ConfigError> {
        self.store.get(PHASE)
    }

    /// Copy of one player's record.
    pub fn player(&self, player: PlayerId) -> Result<PlayerData, ConfigError> {
        self.store
            .get(PLAYER_DATA)?
            .get(player)
            .cloned()
            .ok_or(ConfigError::UnknownPlayer(player))
    }

    /// Read-modify-write one player's record.
    pub fn update_player<R>(
        &mut self,
        player: PlayerId,
        f: impl FnOnce(&mut PlayerData) -> R,
    ) -> Result<R, ConfigError> {
        self.store
            .update(PLAYER_DATA, |players| players.get_mut(player).map(f))?
            .ok_or(ConfigError::UnknownPlayer(player))
    }

    /// Turn order without eliminated players.
    pub fn active_players(&self) -> Result<Vec<PlayerId>, ConfigError> {
        let players = self.store.get(PLAYER_DATA)?;
        Ok(self
            .store
            .get(TURN_ORDER)?
            .into_iter()
            .filter(|p| players.get(*p).is_some_and(|d| !d.eliminated))
            .collect())
    }

    /// What occupies `coordinates` now, counting urbanized cities.
    pub fn space(&self, coordinates: Coordinates) -> Result<Option<SpaceType>, ConfigError> {
        let Some(printed) = self.settings.grid().space(coordinates) else {
            return Ok(None);
        };
        let urbanized = self.store.get(URBANIZED)?;
        Ok(Some(match urbanized.get(coordinates) {
            Some(&color) => SpaceType::City { color, growth: None },
            None => printed,
        }))
    }

    pub fn track(&self) -> Result<TrackMap, ConfigError> {
        self.store.get(TRACK)
    }

    /// Adjacent on-board space, honouring the variant's neighbour rule.
    #[must_use]
    pub fn neighbor(&self, from: Coordinates, direction: Direction) -> Option<Coordinates> {
        self.settings.neighbor(from, direction)
    }
}
