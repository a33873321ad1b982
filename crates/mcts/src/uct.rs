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

//! UCT scoring and the two node-ranking comparators the engine and the
//! agent facade both need: one that drives in-tree selection, one that
//! drives the final move choice.

use std::cmp::Ordering;

use game_core::game_state_node::GameStateNode;
use game_core::node_store::Node;

/// `w/n + c * sqrt(ln(N) / n)`. `parent_plays` stands in for `N`; at the
/// root, callers should pass the node's own play count so the formula still
/// produces a finite value.
pub fn uct_score(wins: u64, plays: u64, parent_plays: u64, exploration_constant: f64) -> f64 {
    let n = plays.max(1) as f64;
    let exploitation = wins as f64 / n;
    let exploration = exploration_constant * ((parent_plays.max(1) as f64).ln() / n).sqrt();
    exploitation + exploration
}

/// Orders two children by descending UCT score, falling back to a stable
/// hash of their state so selection is deterministic given identical
/// statistics.
pub fn selection_comparator<S: GameStateNode>(
    parent_plays: u64,
    exploration_constant: f64,
) -> impl FnMut(&Node<S>, &Node<S>) -> Ordering {
    move |a, b| {
        let score_a = uct_score(a.wins, a.plays, parent_plays, exploration_constant);
        let score_b = uct_score(b.wins, b.plays, parent_plays, exploration_constant);
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.state.state_hash().cmp(&b.state.state_hash()))
    }
}

/// The "robust child" move comparator used both by the pre-search
/// shortcut (§4.3) for non-Risk states and by the agent facade's final
/// pick (§4.6): most plays wins, ties broken by wins, then by a stable
/// state hash.
pub fn move_comparator<S: GameStateNode>(a: &Node<S>, b: &Node<S>) -> Ordering {
    b.plays.cmp(&a.plays).then_with(|| b.wins.cmp(&a.wins)).then_with(|| a.state.state_hash().cmp(&b.state.state_hash()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uct_rewards_higher_win_rate_at_equal_visits() {
        let high = uct_score(8, 10, 100, std::f64::consts::SQRT_2);
        let low = uct_score(2, 10, 100, std::f64::consts::SQRT_2);
        assert!(high > low);
    }

    #[test]
    fn uct_rewards_fewer_visits_at_equal_win_rate() {
        let explored_less = uct_score(5, 10, 100, std::f64::consts::SQRT_2);
        let explored_more = uct_score(50, 100, 100, std::f64::consts::SQRT_2);
        assert!(explored_less > explored_more);
    }
}
