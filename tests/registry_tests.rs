//! Variant registry and capability resolution through public settings.

mod common;

use std::rc::Rc;
use std::sync::Arc;

use common::line_grid;
use rail_rules::context::{Injector, Override, Role};
use rail_rules::core::{BuildData, ConfigError, EngineResult, PlayerId};
use rail_rules::game::GameState;
use rail_rules::map::{Coordinates, Orientation, TileType};
use rail_rules::rules::{CostCalculator, CostCalculatorRole};
use rail_rules::state::slots::DISABLED_ACTIONS;
use rail_rules::variants::{standard_registry, GameSettings, ReleaseStage, VariantRegistry};
use rail_rules::GameSetup;

struct Flat(u32);

impl CostCalculator for Flat {
    fn cost_of(&self, _: &GameState, _: PlayerId, _: &BuildData) -> EngineResult<u32> {
        Ok(self.0)
    }
}

fn flat_one(_: &mut Injector) -> Result<Rc<dyn CostCalculator>, ConfigError> {
    Ok(Rc::new(Flat(1)))
}

fn flat_five(_: &mut Injector) -> Result<Rc<dyn CostCalculator>, ConfigError> {
    Ok(Rc::new(Flat(5)))
}

fn settings(overrides: Vec<Override>) -> Arc<GameSettings> {
    Arc::new(
        GameSettings::builder("custom", "Custom")
            .with_players(2, 4)
            .with_grid(line_grid())
            .with_overrides(overrides)
            .build()
            .unwrap(),
    )
}

fn plain_build() -> BuildData {
    BuildData {
        coordinates: Coordinates::new(1, 0),
        tile: TileType::Straight,
        orientation: Orientation::new(2),
    }
}

#[test]
fn test_last_override_wins() {
    let overrides = vec![
        Override::of::<CostCalculatorRole>("one", flat_one),
        Override::of::<CostCalculatorRole>("five", flat_five),
    ];
    let mut game = GameSetup::new(settings(overrides)).players(2).build().unwrap();
    assert_eq!(game.build_cost(PlayerId::new(0), &plain_build()).unwrap(), 5);
}

#[test]
fn test_generic_without_override() {
    let mut game = GameSetup::new(settings(Vec::new())).players(2).build().unwrap();
    assert_eq!(game.build_cost(PlayerId::new(0), &plain_build()).unwrap(), 2);
}

#[test]
fn test_resolution_is_memoized() {
    let settings = settings(vec![Override::of::<CostCalculatorRole>("one", flat_one)]);
    let mut injector = Injector::new(settings, 2);
    let first = injector.resolve::<CostCalculatorRole>().unwrap();
    let second = injector.resolve::<CostCalculatorRole>().unwrap();
    assert!(Rc::ptr_eq(&first, &second));
    assert!(injector.is_overridden::<CostCalculatorRole>());
    assert_eq!(injector.resolved_roles(), ["CostCalculator"]);

    // the generic default stays reachable for decorators
    let generic = injector.generic::<CostCalculatorRole>().unwrap();
    assert!(!Rc::ptr_eq(&first, &generic));
}

trait Ping {}
impl Ping for () {}

struct PingRole;
struct PongRole;

impl Role for PingRole {
    type Service = dyn Ping;
    const NAME: &'static str = "Ping";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn Ping>, ConfigError> {
        injector.resolve::<PongRole>()?;
        Ok(Rc::new(()))
    }
}

impl Role for PongRole {
    type Service = dyn Ping;
    const NAME: &'static str = "Pong";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn Ping>, ConfigError> {
        injector.resolve::<PingRole>()?;
        Ok(Rc::new(()))
    }
}

#[test]
fn test_cycle_is_reported() {
    let mut injector = Injector::new(settings(Vec::new()), 2);
    let err = injector.resolve::<PingRole>().err().unwrap();
    assert_eq!(err, ConfigError::CyclicDependency(vec!["Ping", "Pong", "Ping"]));
    // a failed resolution caches nothing
    assert!(injector.resolved_roles().is_empty());
}

#[test]
fn test_registry_lookups() {
    let mut registry = standard_registry().unwrap();
    assert!(registry.contains("guild"));
    assert_eq!(
        registry.get("missing").unwrap_err(),
        ConfigError::UnknownVariant("missing".into())
    );

    let extra = GameSettings::builder("extra", "Extra").build().unwrap();
    let registered = registry.register(extra).unwrap();
    assert!(Arc::ptr_eq(&registry.get("extra").unwrap(), &registered));

    let again = GameSettings::builder("base", "Another base").build().unwrap();
    assert_eq!(
        registry.register(again).unwrap_err(),
        ConfigError::DuplicateVariant("base".into())
    );
    assert_eq!(registry.get("base").unwrap().name(), "Rails");

    let production: Vec<_> = registry
        .released(ReleaseStage::Production)
        .map(|s| s.id().to_string())
        .collect();
    assert_eq!(production, ["base"]);
}

#[test]
fn test_every_variant_disables_only_its_own_actions() {
    let registry = standard_registry().unwrap();
    for settings in registry.values() {
        for players in settings.min_players()..=settings.max_players() {
            for seed in 0..6 {
                let mut game = GameSetup::new(Arc::clone(settings))
                    .players(players)
                    .seed(seed)
                    .build()
                    .unwrap();
                let actions = game.actions().unwrap();
                let mut unique = actions.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), actions.len(), "{} lists an action twice", settings.id());

                for action in game.state().get(DISABLED_ACTIONS).unwrap() {
                    assert!(actions.contains(&action), "{} disabled {action}", settings.id());
                    assert!(game.disabled_reason(action).unwrap().is_some());
                }
            }
        }
    }
}

#[test]
fn test_registry_shared_across_games() {
    let registry: Arc<VariantRegistry> = Arc::new(standard_registry().unwrap());
    let games: Vec<_> = (0..3)
        .map(|seed| {
            GameSetup::new(registry.get("base").unwrap())
                .players(3)
                .seed(seed)
                .build()
                .unwrap()
        })
        .collect();
    for game in &games {
        assert_eq!(game.settings().id(), "base");
        assert_eq!(game.round().unwrap(), 1);
    }
}
