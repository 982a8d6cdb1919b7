//! Built-in variants exercised end to end: the overrides must change exactly
//! the behaviour they wrap.

mod common;

use common::{act, init_tracing};
use rail_rules::core::{
    Action, BuildData, Phase, PlayerId, PlayerInput, ScriptedDice, UrbanizeData, ValidationKind,
};
use rail_rules::map::{CityColor, Coordinates, Orientation, TileType};
use rail_rules::state::slots::DISABLED_ACTIONS;
use rail_rules::variants::overrides::{running_cost, DISABLED_REASON};
use rail_rules::variants::standard_registry;
use rail_rules::{Game, GameSetup};

fn game(variant: &str, players: usize, dice: ScriptedDice) -> Game {
    let registry = standard_registry().unwrap();
    GameSetup::new(registry.get(variant).unwrap())
        .players(players)
        .dice(dice)
        .build()
        .unwrap()
}

fn straight(q: i32, r: i32) -> BuildData {
    BuildData {
        coordinates: Coordinates::new(q, r),
        tile: TileType::Straight,
        orientation: Orientation::new(2),
    }
}

#[test]
fn test_guild_action_list_and_discount() {
    init_tracing();
    let mut game = game("guild", 2, ScriptedDice::new([3, 5]));
    let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
    assert!(game.actions().unwrap().contains(&Action::SlowEngineer));

    act(&mut game, PlayerInput::TakeShares { count: 0 });
    act(&mut game, PlayerInput::TakeShares { count: 0 });
    act(&mut game, PlayerInput::SelectAction { action: Action::Engineer });
    act(&mut game, PlayerInput::SelectAction { action: Action::SlowEngineer });
    assert_eq!(game.phase().unwrap(), Phase::Building);

    // plain next to the Red city: base $2, running cost 0 rounds up
    let first = straight(1, 2);
    assert_eq!(game.build_cost(p0, &first).unwrap(), 1);
    assert_eq!(game.build_cost(p1, &first).unwrap(), 2);
    game.submit(p0, PlayerInput::Build(first)).unwrap();
    assert_eq!(running_cost(game.state(), p0).unwrap(), 1);

    // running cost 1 is odd: $2 rounds down to 1 as well
    let second = straight(2, 2);
    assert_eq!(game.build_cost(p0, &second).unwrap(), 1);
    game.submit(p0, PlayerInput::Build(second)).unwrap();
    assert_eq!(running_cost(game.state(), p0).unwrap(), 2);
    assert_eq!(game.player(p0).unwrap().money, 8);

    assert!(game.resolved_roles().contains(&"CostCalculator"));
}

#[test]
fn test_slow_engineer_limits_builds() {
    let mut game = game("guild", 2, ScriptedDice::new([3, 5]));
    for _ in 0..2 {
        act(&mut game, PlayerInput::TakeShares { count: 0 });
    }
    act(&mut game, PlayerInput::SelectAction { action: Action::SlowEngineer });
    act(&mut game, PlayerInput::SelectAction { action: Action::FirstMove });

    let p0 = PlayerId::new(0);
    game.submit(p0, PlayerInput::Build(straight(1, 2))).unwrap();
    game.submit(p0, PlayerInput::Build(straight(2, 2))).unwrap();
    let err = game.submit(p0, PlayerInput::Build(straight(3, 2))).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::InsufficientResources));
}

#[test]
fn test_guild_urbanize_targets_listed_as_legal() {
    let mut game = game("guild", 2, ScriptedDice::new([3, 5]));
    for _ in 0..2 {
        act(&mut game, PlayerInput::TakeShares { count: 0 });
    }
    act(&mut game, PlayerInput::SelectAction { action: Action::Urbanization });
    act(&mut game, PlayerInput::SelectAction { action: Action::FirstMove });

    let p0 = PlayerId::new(0);
    game.submit(p0, PlayerInput::Build(straight(1, 2))).unwrap();
    let on_track = PlayerInput::Urbanize(UrbanizeData {
        coordinates: Coordinates::new(1, 2),
        color: CityColor::Red,
    });
    let bare = PlayerInput::Urbanize(UrbanizeData {
        coordinates: Coordinates::new(2, 2),
        color: CityColor::Red,
    });
    assert!(game.validate(p0, &on_track).is_ok());

    let legal = game.legal_inputs().unwrap();
    assert!(legal.contains(&on_track));
    assert!(!legal.contains(&bare));
}

#[test]
fn test_blackout_closes_actions_each_round() {
    init_tracing();
    // every roll is a 1: the walk closes the first three actions
    let mut game = game("blackout", 3, ScriptedDice::new([1]));
    let closed = vec![Action::FirstMove, Action::FirstBuild, Action::Engineer];
    assert_eq!(game.state().get(DISABLED_ACTIONS).unwrap(), closed);
    assert_eq!(game.available_actions().unwrap().len(), 4);
    assert_eq!(
        game.disabled_reason(Action::Engineer).unwrap().as_deref(),
        Some(DISABLED_REASON)
    );
    assert!(!game.phases().contains(&Phase::GoodsGrowth));
    assert_eq!(game.turn_length().unwrap(), 9);

    for _ in 0..3 {
        act(&mut game, PlayerInput::TakeShares { count: 0 });
    }
    let p0 = PlayerId::new(0);
    let err = game
        .submit(p0, PlayerInput::SelectAction { action: Action::Engineer })
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::NotAllowed));

    act(&mut game, PlayerInput::SelectAction { action: Action::Locomotive });
    // level 2 after the selection, plus the bonus while it is held
    assert_eq!(game.locomotive(p0).unwrap(), 3);
    assert_eq!(game.locomotive_display(p0).unwrap(), "2+1");
    act(&mut game, PlayerInput::SelectAction { action: Action::Production });
    act(&mut game, PlayerInput::SelectAction { action: Action::Urbanization });

    assert_eq!(game.phase().unwrap(), Phase::Building);
    assert_eq!(game.locomotive(p0).unwrap(), 3);
    for _ in 0..3 {
        act(&mut game, PlayerInput::Pass);
    }
    assert_eq!(game.phase().unwrap(), Phase::Moving);
    assert_eq!(game.locomotive(p0).unwrap(), 3);
    for _ in 0..6 {
        act(&mut game, PlayerInput::Pass);
    }

    assert_eq!(game.round().unwrap(), 2);
    assert_eq!(game.locomotive(p0).unwrap(), 2);
    assert_eq!(game.locomotive_display(p0).unwrap(), "2");
    // each round's walk starts afresh
    assert_eq!(game.state().get(DISABLED_ACTIONS).unwrap(), closed);
}

#[test]
fn test_seeded_disablement_reproducible() {
    let registry = standard_registry().unwrap();
    let closed = |seed| {
        let game = GameSetup::new(registry.get("blackout").unwrap())
            .players(4)
            .seed(seed)
            .build()
            .unwrap();
        game.state().get(DISABLED_ACTIONS).unwrap()
    };
    for seed in [1, 2, 3, 99] {
        let first = closed(seed);
        assert_eq!(first.len(), 2);
        assert_eq!(first, closed(seed));
    }
}

#[test]
fn test_base_has_no_overrides() {
    let mut game = game("base", 3, ScriptedDice::new([4]));
    assert!(!game.actions().unwrap().contains(&Action::SlowEngineer));
    assert_eq!(game.turn_length().unwrap(), 10);
    assert!(game.state().get(DISABLED_ACTIONS).unwrap().is_empty());
}
