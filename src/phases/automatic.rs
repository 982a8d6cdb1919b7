//! Generic phases that run without player input.

use std::cmp::Reverse;

use tracing::info;

use crate::core::{EngineResult, Phase, PlayerId};
use crate::game::GameState;
use crate::rules::goods::supply_city;
use crate::state::slots::{PLAYER_DATA, TURN_ORDER};

use super::handler::PhaseHandler;

/// Income below this eliminates a player.
pub const ELIMINATION_INCOME: i32 = -10;

/// Income lost during income reduction.
#[must_use]
pub const fn income_reduction(income: i32) -> i32 {
    match income {
        i32::MIN..=10 => 0,
        11..=20 => 2,
        21..=30 => 4,
        31..=40 => 6,
        _ => 8,
    }
}

/// Reorders players by descending cash. Ties keep their previous order.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnOrderPhase;

impl PhaseHandler for TurnOrderPhase {
    fn phase(&self) -> Phase {
        Phase::TurnOrder
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        let players = state.get(PLAYER_DATA)?;
        let mut order = state.get(TURN_ORDER)?;
        order.sort_by_key(|p| Reverse(players.get(*p).map_or(i32::MIN, |d| d.money)));
        let names: Vec<_> = order.iter().map(ToString::to_string).collect();
        state.narrate(format!("Turn order: {}", names.join(", ")));
        state.set(TURN_ORDER, order)?;
        Ok(Vec::new())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IncomePhase;

impl PhaseHandler for IncomePhase {
    fn phase(&self) -> Phase {
        Phase::Income
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        state.update(PLAYER_DATA, |players| {
            for (_, data) in players.iter_mut().filter(|(_, d)| !d.eliminated) {
                data.money += data.income;
            }
        })?;
        Ok(Vec::new())
    }
}

/// Pays one per share and one per locomotive level. A shortfall comes out
/// of income; income below [`ELIMINATION_INCOME`] eliminates the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpensesPhase;

impl PhaseHandler for ExpensesPhase {
    fn phase(&self) -> Phase {
        Phase::Expenses
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        let eliminated = state.update(PLAYER_DATA, |players| {
            let mut out = Vec::new();
            for (player, data) in players.iter_mut().filter(|(_, d)| !d.eliminated) {
                let expenses = i32::from(data.shares) + i32::from(data.loco);
                if data.money >= expenses {
                    data.money -= expenses;
                    continue;
                }
                data.income -= expenses - data.money;
                data.money = 0;
                if data.income < ELIMINATION_INCOME {
                    data.eliminated = true;
                    out.push(player);
                }
            }
            out
        })?;
        for player in eliminated {
            info!(%player, "player eliminated");
            state.narrate(format!("{player} is bankrupt and out of the game"));
        }
        Ok(Vec::new())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IncomeReductionPhase;

impl PhaseHandler for IncomeReductionPhase {
    fn phase(&self) -> Phase {
        Phase::IncomeReduction
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        state.update(PLAYER_DATA, |players| {
            for (_, data) in players.iter_mut() {
                data.income -= income_reduction(data.income);
            }
        })?;
        Ok(Vec::new())
    }
}

/// One die per player; every printed city showing that growth number
/// draws a good.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoodsGrowthPhase;

impl PhaseHandler for GoodsGrowthPhase {
    fn phase(&self) -> Phase {
        Phase::GoodsGrowth
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        let cities = state.settings().grid().cities();
        for _ in 0..state.player_count() {
            let roll = state.rng().roll_die();
            for &(city, _, growth) in &cities {
                if growth == Some(roll) && supply_city(state, city)?.is_none() {
                    return Ok(Vec::new());
                }
            }
        }
        Ok(Vec::new())
    }
}

/// Clears per-round selections.
#[derive(Clone, Copy, Debug, Default)]
pub struct EndOfRoundPhase;

impl PhaseHandler for EndOfRoundPhase {
    fn phase(&self) -> Phase {
        Phase::EndOfRound
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        state.update(PLAYER_DATA, |players| {
            for (_, data) in players.iter_mut() {
                data.selected_action = None;
                data.loco_upgraded = false;
            }
        })?;
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::strip_state;

    #[test]
    fn test_income_reduction_table() {
        assert_eq!(income_reduction(-4), 0);
        assert_eq!(income_reduction(10), 0);
        assert_eq!(income_reduction(11), 2);
        assert_eq!(income_reduction(25), 4);
        assert_eq!(income_reduction(40), 6);
        assert_eq!(income_reduction(41), 8);
    }

    #[test]
    fn test_turn_order_by_cash_keeps_ties() {
        let mut state = strip_state(3);
        let p = PlayerId::new;
        state.update_player(p(2), |d| d.money = 30).unwrap();

        TurnOrderPhase.on_start(&mut state).unwrap();
        assert_eq!(state.get(TURN_ORDER).unwrap(), vec![p(2), p(0), p(1)]);
    }

    #[test]
    fn test_expenses_shortfall_and_elimination() {
        let mut state = strip_state(3);
        let p = PlayerId::new;
        state.update_player(p(0), |d| d.money = 1).unwrap();
        state
            .update_player(p(1), |d| {
                d.money = 0;
                d.income = -8;
            })
            .unwrap();

        ExpensesPhase.on_start(&mut state).unwrap();
        let players = state.get(PLAYER_DATA).unwrap();
        // 2 shares + 1 loco = 3
        assert_eq!(players[p(0)].money, 0);
        assert_eq!(players[p(0)].income, -2);
        assert!(players[p(1)].eliminated);
        assert_eq!(players[p(2)].money, 7);
        assert_eq!(state.active_players().unwrap(), vec![p(0), p(2)]);
    }
}
