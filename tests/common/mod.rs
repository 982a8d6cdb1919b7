//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use rail_rules::core::{PlayerId, PlayerInput, ScriptedDice};
use rail_rules::game::{Game, GameSetup};
use rail_rules::map::{CityColor, Coordinates, Grid, SpaceType};
use rail_rules::variants::GameSettings;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route engine diagnostics to the test output. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Two Red cities joined by two plains, water below.
pub fn line_grid() -> Grid {
    let builder = Grid::builder()
        .city(Coordinates::new(0, 0), CityColor::Red, 1)
        .city(Coordinates::new(3, 0), CityColor::Red, 2);
    (0..4)
        .fold(builder, |b, q| b.space(Coordinates::new(q, 1), SpaceType::Water))
        .fill(4, 1, SpaceType::Plain)
        .build()
}

pub fn line_settings() -> Arc<GameSettings> {
    Arc::new(
        GameSettings::builder("line", "Line")
            .with_players(2, 4)
            .with_grid(line_grid())
            .build()
            .unwrap(),
    )
}

/// A line game whose dice always show 1, so every draw takes the first good
/// in the bag (Red).
pub fn line_game(players: usize) -> Game {
    GameSetup::new(line_settings())
        .players(players)
        .dice(ScriptedDice::new([1]))
        .build()
        .unwrap()
}

/// Submit for whoever is to act.
pub fn act(game: &mut Game, input: PlayerInput) -> PlayerId {
    let player = game.current_player().unwrap().expect("someone should be due to act");
    game.submit(player, input).unwrap();
    player
}

/// Play the first legal input until the game ends. Returns inputs played.
pub fn autoplay(game: &mut Game, limit: usize) -> usize {
    let mut played = 0;
    while !game.is_over().unwrap() {
        assert!(played < limit, "game did not finish within {limit} inputs");
        let inputs = game.legal_inputs().unwrap();
        let input = inputs.first().cloned().expect("an acting player always has a legal input");
        act(game, input);
        played += 1;
    }
    played
}
