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

use std::time::Instant;

use anyhow::Result;
use game_core::game_state_node::{GameStateNode, PlayerId};
use game_core::selection_algorithm::SelectionAlgorithm;
use game_core::state_evaluator::StateEvaluator;
use with_error::WithError;

/// A depth-1 search over legal actions, returning the one whose resulting
/// state the evaluator ranks highest. Used by the agent facade when budget
/// pressure is so extreme that no MCTS iteration completes and the root is
/// still a leaf.
pub struct SingleLevel {}

impl SelectionAlgorithm for SingleLevel {
    fn pick_action<N, E>(
        &self,
        _deadline: Instant,
        node: &N,
        evaluator: &E,
        player: PlayerId,
    ) -> Result<N::Action>
    where
        N: GameStateNode,
        E: StateEvaluator<N>,
    {
        let mut best_score = f64::MIN;
        let mut best_action: Option<N::Action> = None;

        for action in node.legal_actions()? {
            let child = node.apply(action)?;
            let score = evaluator.evaluate(&child, player)?;
            if score > best_score {
                best_score = score;
                best_action = Some(action);
            }
        }

        best_action.with_error(|| "No legal actions found")
    }
}

#[cfg(test)]
mod tests {
    use game_core::agent::AgentConfig;
    use risk_model::testing::small_game;

    use super::*;

    struct OwnedTerritoryCount;

    impl StateEvaluator<risk_model::state::RiskGameState> for OwnedTerritoryCount {
        fn evaluate(&self, node: &risk_model::state::RiskGameState, player: PlayerId) -> Result<f64> {
            use risk_model::board::RiskBoardView;
            Ok(node.board.territories_owned_by(player).count() as f64)
        }
    }

    #[test]
    fn picks_the_action_the_evaluator_scores_highest() {
        let state = small_game(2, 1);
        let config = AgentConfig::with_timeout(std::time::Duration::from_millis(1));
        let action = SingleLevel {}
            .pick_action(config.deadline, &state, &OwnedTerritoryCount, state.current_player())
            .unwrap();
        assert!(state.is_valid_action(&action));
    }
}
