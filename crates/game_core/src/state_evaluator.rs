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

use anyhow::Result;

use crate::game_state_node::{GameStateNode, PlayerId};

/// Scores how favorable a state is for `player`. Implementors are expected
/// to be pure and, for a fixed `(node, player)` pair, deterministic -
/// `risk_eval::RiskEvaluator` memoizes sub-metrics internally but never
/// changes its answer.
pub trait StateEvaluator<N: GameStateNode> {
    /// Returns a score for `node` from `player`'s perspective. Higher is
    /// better. `risk_eval` guarantees its output lies in `[0, 1]`; other
    /// evaluators (e.g. a terminal win/loss evaluator) may use a wider
    /// range, since [crate::selection_algorithm::SelectionAlgorithm]
    /// implementations only ever compare scores relatively.
    fn evaluate(&self, node: &N, player: PlayerId) -> Result<f64>;
}
