//! Round phases.
//!
//! A round is one pass over the variant's effective phase list. The default
//! list is [`Phase::DEFAULT_ORDER`]; variants reshape it with modules.

use serde::{Deserialize, Serialize};

/// One step of the round life-cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Players may issue shares for cash.
    IssueShares,
    /// Turn order is recomputed.
    TurnOrder,
    /// Each player picks one special action.
    SelectAction,
    /// Players lay track.
    Building,
    /// Players deliver goods or upgrade locomotives.
    Moving,
    /// Income is paid out.
    Income,
    /// Share dividends and locomotive upkeep are paid.
    Expenses,
    /// High incomes are reduced.
    IncomeReduction,
    /// New goods appear in cities.
    GoodsGrowth,
    /// Per-round bookkeeping is cleared.
    EndOfRound,
}

impl Phase {
    /// Default phase sequence before module transforms.
    pub const DEFAULT_ORDER: [Phase; 10] = [
        Phase::IssueShares,
        Phase::TurnOrder,
        Phase::SelectAction,
        Phase::Building,
        Phase::Moving,
        Phase::Income,
        Phase::Expenses,
        Phase::IncomeReduction,
        Phase::GoodsGrowth,
        Phase::EndOfRound,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::IssueShares => "Issue Shares",
            Phase::TurnOrder => "Turn Order",
            Phase::SelectAction => "Select Actions",
            Phase::Building => "Building",
            Phase::Moving => "Move Goods",
            Phase::Income => "Income",
            Phase::Expenses => "Expenses",
            Phase::IncomeReduction => "Income Reduction",
            Phase::GoodsGrowth => "Goods Growth",
            Phase::EndOfRound => "End of Round",
        }
    }

    /// Whether the phase waits on player input.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(
            self,
            Phase::IssueShares | Phase::SelectAction | Phase::Building | Phase::Moving
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
