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

//! The four MCTS phases, run one iteration at a time so the agent facade
//! can check the deadline between them, plus the pre-search terminal
//! shortcut that can short-circuit the whole loop.

use std::cmp::Ordering;
use std::marker::PhantomData;

use anyhow::Result;
use game_core::game_state_node::{GameStateNode, PlayerId};
use game_core::node_store::NodeStore;
use game_core::state_evaluator::StateEvaluator;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Clock;
use crate::config::SearchConfig;
use crate::rollout::RolloutPolicy;
use crate::uct::{selection_comparator, uct_score};
use crate::win::has_won;

/// Margin passed to [crate::clock::Clock::should_stop_within] before
/// starting a rollout: a rollout that only just fits the raw deadline tends
/// to overrun it once its own per-step cost is counted, so setup bails out
/// a bit earlier than [MctsEngine::should_stop] would.
const SIMULATION_SETUP_MARGIN: f64 = 1.1;

/// Orchestrates one or more MCTS iterations against a shared [NodeStore].
/// Holds no tree state itself; the caller (the agent facade) owns the store
/// across iterations and turns.
pub struct MctsEngine<'a, N, E, R>
where
    N: GameStateNode,
    E: StateEvaluator<N>,
    R: RolloutPolicy<N>,
{
    config: SearchConfig,
    clock: Clock,
    evaluator: &'a E,
    rollout_policy: R,
    player: PlayerId,
    rng: StdRng,
    _node: PhantomData<fn() -> N>,
}

impl<'a, N, E, R> MctsEngine<'a, N, E, R>
where
    N: GameStateNode,
    E: StateEvaluator<N>,
    R: RolloutPolicy<N>,
{
    pub fn new(
        config: SearchConfig,
        clock: Clock,
        evaluator: &'a E,
        rollout_policy: R,
        player: PlayerId,
        rng_seed: u64,
    ) -> Self {
        Self {
            config,
            clock,
            evaluator,
            rollout_policy,
            player,
            rng: StdRng::seed_from_u64(rng_seed),
            _node: PhantomData,
        }
    }

    pub fn should_stop(&self) -> bool {
        self.clock.should_stop()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Runs one full selection/expansion/simulation/backpropagation cycle.
    /// Returns the number of nodes whose statistics were updated (zero only
    /// if the deadline fired before backpropagation could run).
    pub fn run_iteration(&mut self, store: &mut NodeStore<N>) -> Result<u32> {
        if self.should_stop() {
            return Ok(0);
        }
        let leaf = self.select(store, store.root())?;
        if !store.get(leaf).state.is_game_over() && store.get(leaf).is_leaf() {
            self.expand(store, leaf)?;
        }

        let rollout_start = if store.get(leaf).is_leaf() {
            leaf
        } else {
            // Expansion just populated children; roll out from one of them
            // chosen uniformly, rather than re-descending by UCT on
            // zero-visit children (which would tie-break arbitrarily).
            let children = store.children(leaf);
            children[self.rng.gen_range(0..children.len())]
        };

        let won = self.simulate(store, rollout_start)?;

        if self.should_stop() {
            return Ok(0);
        }
        Ok(store.backpropagate(rollout_start, won))
    }

    /// Descends from `start` to a leaf (or a game-over node, or a
    /// not-yet-expanded chance outcome), following the unique determined
    /// child at chance nodes and the UCT-maximizing child elsewhere.
    fn select(&self, store: &NodeStore<N>, start: NodeIndex) -> Result<NodeIndex> {
        let mut index = start;
        loop {
            if self.should_stop() {
                return Ok(index);
            }
            let node = store.get(index);
            if node.is_leaf() || node.state.is_game_over() {
                return Ok(index);
            }

            index = if node.state.is_chance_node() {
                let next_action = node.state.determine_next_action()?;
                match node.children().iter().copied().find(|&c| store.get(c).action == Some(next_action)) {
                    Some(child) => child,
                    None => return Ok(index),
                }
            } else {
                let parent_plays = node.plays;
                let mut compare = selection_comparator::<N>(parent_plays, self.config.exploration_constant);
                node.children()
                    .iter()
                    .copied()
                    .min_by(|&a, &b| compare(store.get(a), store.get(b)))
                    .expect("is_leaf() was false, so children is non-empty")
            };
        }
    }

    /// Creates one child per legal action of `index`'s state, or the single
    /// determined child of a chance node. A no-op on terminal states.
    fn expand(&self, store: &mut NodeStore<N>, index: NodeIndex) -> Result<()> {
        let state = store.get(index).state.clone();
        if state.is_game_over() {
            return Ok(());
        }
        if state.is_chance_node() {
            let action = state.determine_next_action()?;
            let child_state = state.apply(action)?;
            store.add_child(index, action, child_state);
            return Ok(());
        }
        for action in state.legal_actions()? {
            if self.should_stop() {
                break;
            }
            let child_state = state.apply(action)?;
            store.add_child(index, action, child_state);
        }
        Ok(())
    }

    /// Plays from `index`'s state to game-over, the depth cap, or the
    /// deadline, then scores the outcome with [has_won]. Skips the rollout
    /// entirely once [SIMULATION_SETUP_MARGIN] says there isn't enough
    /// budget left to be worth starting one.
    fn simulate(&mut self, store: &NodeStore<N>, index: NodeIndex) -> Result<bool> {
        let mut state = store.get(index).state.clone();
        if self.clock.should_stop_within(SIMULATION_SETUP_MARGIN) {
            return Ok(has_won(&state, self.player, &mut self.rng));
        }
        let mut depth = 0;
        while !state.is_game_over() && depth < self.config.max_rollout_depth {
            if self.should_stop() {
                break;
            }
            state = if state.is_chance_node() {
                state.apply_auto()?
            } else {
                match self.rollout_policy.choose_action(&state, self.player, &mut self.rng)? {
                    Some(action) => state.apply(action)?,
                    None => break,
                }
            };
            depth += 1;
        }
        Ok(has_won(&state, self.player, &mut self.rng))
    }

    /// The pre-search terminal shortcut (§4.3): walks the already-expanded
    /// tree one child deep at a time, always taking the evaluator's
    /// top-ranked child, stopping the moment a chance node is encountered.
    /// If that single-file descent reaches a game-over node, the first
    /// action taken from the root is the forced answer.
    pub fn sort_promising_candidates(&self, store: &NodeStore<N>) -> Result<Option<N::Action>> {
        let mut index = store.root();
        let mut first_action = None;

        loop {
            if self.should_stop() {
                return Ok(None);
            }
            let children = store.children(index);
            if children.is_empty() {
                return Ok(None);
            }
            if children.iter().any(|&c| store.get(c).state.is_chance_node()) {
                return Ok(None);
            }

            let mut scored = Vec::with_capacity(children.len());
            for &child in children {
                if self.should_stop() {
                    return Ok(None);
                }
                let score = self.evaluator.evaluate(&store.get(child).state, self.player)?;
                scored.push((child, score));
            }
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            let best = scored[0].0;

            if first_action.is_none() {
                first_action = store.get(best).action;
            }
            if store.get(best).state.is_game_over() {
                return Ok(first_action);
            }
            index = best;
        }
    }
}

/// Re-exported for callers that need the raw UCT formula outside of an
/// engine instance, e.g. the agent facade's diagnostics.
pub fn uct(wins: u64, plays: u64, parent_plays: u64, exploration_constant: f64) -> f64 {
    uct_score(wins, plays, parent_plays, exploration_constant)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use game_core::node_store::NodeStore;
    use risk_eval::evaluator::RiskEvaluator;
    use risk_model::testing::small_game;

    use super::*;
    use crate::rollout::HeuristicRollout;

    fn engine_with_budget(
        evaluator: &RiskEvaluator,
        budget: Duration,
    ) -> MctsEngine<'_, risk_model::state::RiskGameState, RiskEvaluator, HeuristicRollout<'_, RiskEvaluator>> {
        let config = SearchConfig::default();
        let clock = Clock::new(Instant::now(), budget, Duration::from_millis(0));
        let rollout = HeuristicRollout::new(evaluator, config.exploration_constant, config.rollout_action_cap);
        MctsEngine::new(config, clock, evaluator, rollout, 0, 7)
    }

    #[test]
    fn iterations_grow_the_tree_and_preserve_invariants() {
        let evaluator = RiskEvaluator::default();
        let mut engine = engine_with_budget(&evaluator, Duration::from_millis(200));
        let mut store = NodeStore::new(small_game(2, 1));

        for _ in 0..50 {
            if engine.should_stop() {
                break;
            }
            engine.run_iteration(&mut store).unwrap();
        }

        store.assert_invariants();
        assert!(store.get(store.root()).plays > 0);
    }

    #[test]
    fn zero_budget_runs_no_iterations_but_does_not_error() {
        let evaluator = RiskEvaluator::default();
        let mut engine = engine_with_budget(&evaluator, Duration::from_millis(0));
        let mut store = NodeStore::new(small_game(2, 1));

        let updated = engine.run_iteration(&mut store).unwrap();
        assert_eq!(updated, 0);
    }

    #[test]
    fn sort_promising_candidates_is_none_on_an_unexpanded_tree() {
        let evaluator = RiskEvaluator::default();
        let engine = engine_with_budget(&evaluator, Duration::from_millis(200));
        let store = NodeStore::new(small_game(2, 1));

        assert_eq!(engine.sort_promising_candidates(&store).unwrap(), None);
    }
}
