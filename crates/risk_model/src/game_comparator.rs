// Copyright © Spelldawn 2021-present

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//    https://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The rules engine's own, evaluator-independent state ordering: terminal
//! states compare by utility, everything else by territory share. Used as
//! the Agent Facade's fallback ranking when even the one-ply search can't
//! afford to construct a full [crate::state::RiskGameState]-aware evaluator,
//! so a broken or misconfigured evaluator never takes down move selection
//! entirely.

use anyhow::{ensure, Result};
use game_core::game_state_node::{GameStateNode, PlayerId};
use game_core::state_evaluator::StateEvaluator;

use crate::state::RiskGameState;

#[derive(Debug, Clone, Copy, Default)]
pub struct GameComparator;

impl StateEvaluator<RiskGameState> for GameComparator {
    fn evaluate(&self, node: &RiskGameState, player: PlayerId) -> Result<f64> {
        ensure!(player >= 0, "game comparator requires a real player id, got {player}");
        let index = player as usize;
        let vector = if node.is_game_over() { node.utility_vector() } else { node.heuristic_vector() };
        Ok(vector.get(index).copied().unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::small_game;

    #[test]
    fn ranks_the_winner_highest_once_the_game_is_over() {
        use crate::phase::Phase;

        let mut state = small_game(2, 1);
        state.phase = Phase::GameOver { winner: 0 };

        let comparator = GameComparator;
        assert_eq!(comparator.evaluate(&state, 0).unwrap(), 1.0);
        assert_eq!(comparator.evaluate(&state, 1).unwrap(), 0.0);
    }

    #[test]
    fn falls_back_to_territory_share_mid_game() {
        let state = small_game(2, 1);
        let comparator = GameComparator;
        let score = comparator.evaluate(&state, 0).unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}
