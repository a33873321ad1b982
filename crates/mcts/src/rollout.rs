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

//! Action-selection policies used during simulation. The heuristic policy
//! is an optimization biasing rollouts toward moves the evaluator already
//! likes; a uniform-random policy remains available for testing and for
//! states where no evaluator is configured, per design note "Rollout bias".

use anyhow::Result;
use game_core::game_state_node::{GameStateNode, PlayerId};
use game_core::state_evaluator::StateEvaluator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks the next action to play during a rollout. Returns `None` when the
/// action set is empty, which the engine treats as an early terminal.
pub trait RolloutPolicy<N: GameStateNode> {
    fn choose_action(&self, state: &N, player: PlayerId, rng: &mut StdRng) -> Result<Option<N::Action>>;
}

/// Chooses uniformly among legal actions. The baseline fallback; also what
/// non-Risk states get, since they have no evaluator wired up.
pub struct UniformRollout;

impl<N: GameStateNode> RolloutPolicy<N> for UniformRollout {
    fn choose_action(&self, state: &N, _player: PlayerId, rng: &mut StdRng) -> Result<Option<N::Action>> {
        let actions: Vec<N::Action> = state.legal_actions()?.collect();
        Ok(actions.choose(rng).copied())
    }
}

/// Treats every successor of a legal action as having one prior visit and
/// runs a one-shot UCT pass over them, per §4.4: this biases rollouts
/// toward heuristically strong moves while keeping some exploration.
/// Optionally caps the number of actions considered when the branching
/// factor is large.
pub struct HeuristicRollout<'a, E> {
    evaluator: &'a E,
    exploration_constant: f64,
    action_cap: Option<usize>,
}

impl<'a, E> HeuristicRollout<'a, E> {
    pub fn new(evaluator: &'a E, exploration_constant: f64, action_cap: Option<usize>) -> Self {
        Self { evaluator, exploration_constant, action_cap }
    }
}

impl<'a, N, E> RolloutPolicy<N> for HeuristicRollout<'a, E>
where
    N: GameStateNode,
    E: StateEvaluator<N>,
{
    fn choose_action(&self, state: &N, player: PlayerId, rng: &mut StdRng) -> Result<Option<N::Action>> {
        let mut actions: Vec<N::Action> = state.legal_actions()?.collect();
        if actions.is_empty() {
            return Ok(None);
        }
        if let Some(cap) = self.action_cap {
            if actions.len() > cap {
                actions.shuffle(rng);
                actions.truncate(cap);
            }
        }

        let total_visits = actions.len() as f64;
        let mut best_action = actions[0];
        let mut best_value = f64::MIN;
        for &action in &actions {
            let successor = state.apply(action)?;
            let score = self.evaluator.evaluate(&successor, player)?;
            let exploration = self.exploration_constant * (total_visits.ln() / 1.0).sqrt();
            let value = score + exploration;
            if value > best_value {
                best_value = value;
                best_action = action;
            }
        }
        Ok(Some(best_action))
    }
}

/// Picks an index uniformly in `0..bound`. A small wrapper kept so callers
/// needing a coin flip (win-credit tie-breaking) share the same RNG type as
/// the rollout policies.
pub fn coin_flip(rng: &mut StdRng) -> bool {
    rng.gen_bool(0.5)
}
