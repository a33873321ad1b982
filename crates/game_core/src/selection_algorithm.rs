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

use crate::game_state_node::{GameStateNode, PlayerId};
use crate::state_evaluator::StateEvaluator;

/// A pluggable strategy for picking the best action at a node, given a
/// deadline and an evaluator to fall back on. [crate::node_store] and the
/// four MCTS phases are the primary implementation, in the `mcts` crate;
/// `ai_tree_search::SingleLevel` is the other, used as the Agent Facade's
/// last-resort fallback.
pub trait SelectionAlgorithm {
    fn pick_action<N, E>(
        &self,
        deadline: Instant,
        node: &N,
        evaluator: &E,
        player: PlayerId,
    ) -> Result<N::Action>
    where
        N: GameStateNode,
        E: StateEvaluator<N>;
}
