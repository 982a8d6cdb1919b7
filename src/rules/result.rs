//! Final standings.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Several players tied on the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Result for a list of `(player, score)` pairs: the highest scores win.
    #[must_use]
    pub fn from_scores(scores: &[(PlayerId, i32)]) -> Self {
        let Some(best) = scores.iter().map(|&(_, s)| s).max() else {
            return GameResult::Draw;
        };
        let mut top: Vec<_> = scores
            .iter()
            .filter(|&&(_, s)| s == best)
            .map(|&(p, _)| p)
            .collect();
        if top.len() == 1 {
            GameResult::Winner(top[0])
        } else {
            top.sort_unstable();
            GameResult::Winners(top)
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}
