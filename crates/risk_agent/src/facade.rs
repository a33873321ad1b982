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

//! The per-turn entry point. Owns the search tree across turns (best-effort
//! reuse via [game_core::node_store::NodeStore::reroot]), tries the
//! pre-search terminal shortcut before spending any budget on iterations,
//! runs MCTS until the deadline, and falls back to a greedy one-ply search
//! if the tree never got past the root.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use ai_tree_search::single_level::SingleLevel;
use anyhow::Result;
use game_core::agent::AgentConfig as DeadlineConfig;
use game_core::game_state_node::{GameStateNode, PlayerId};
use game_core::node_store::NodeStore;
use game_core::selection_algorithm::SelectionAlgorithm;
use mcts::clock::Clock;
use mcts::config::SearchConfig;
use mcts::engine::MctsEngine;
use mcts::rollout::HeuristicRollout;
use mcts::uct::move_comparator;
use rand::{thread_rng, Rng};
use risk_eval::evaluator::RiskEvaluator;
use risk_eval::weights::WeightPreset;
use risk_model::action::Action;
use risk_model::game_comparator::GameComparator;
use risk_model::state::RiskGameState;
use tracing::{debug, info};

/// Setup-time configuration for a [RiskAgent], collected once per match
/// rather than threaded through every call. `search`'s fields (exploration
/// constant, rollout depth, etc.) are orthogonal to `player_count`/
/// `my_player_id`, which only change between matches.
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    pub player_count: i32,
    pub my_player_id: PlayerId,
    pub search: SearchConfig,
}

impl AgentConfig {
    pub fn new(player_count: i32, my_player_id: PlayerId) -> Self {
        Self { player_count, my_player_id, search: SearchConfig::default() }
    }
}

/// Per-turn MCTS-backed decision maker for one seat in a Risk game.
pub struct RiskAgent {
    search_config: Cell<SearchConfig>,
    weight_preset: WeightPreset,
    player: Cell<PlayerId>,
    num_players: Cell<i32>,
    store: RefCell<Option<NodeStore<RiskGameState>>>,
}

impl RiskAgent {
    pub fn new(search_config: SearchConfig, weight_preset: WeightPreset) -> Self {
        Self {
            search_config: Cell::new(search_config),
            weight_preset,
            player: Cell::new(0),
            num_players: Cell::new(2),
            store: RefCell::new(None),
        }
    }

    pub fn name(&self) -> &'static str {
        "MCTS"
    }

    /// Resets all per-match state. Must be called before the first
    /// [RiskAgent::select_action] of a match. `config.my_player_id` must be
    /// a valid seat index for `config.player_count`, matching the seat
    /// indices a [RiskGameState] exposes.
    pub fn set_up(&self, config: AgentConfig) {
        assert!(
            config.my_player_id >= 0 && config.my_player_id < config.player_count,
            "my_player_id {} out of range for {} players",
            config.my_player_id,
            config.player_count
        );
        self.search_config.set(config.search);
        self.num_players.set(config.player_count);
        self.player.set(config.my_player_id);
        *self.store.borrow_mut() = None;
    }

    pub fn tear_down(&self) {
        *self.store.borrow_mut() = None;
    }

    /// No-op hooks: pondering during the opponent's turn is not wired in.
    pub fn ponder_start(&self) {}
    pub fn ponder_stop(&self) {}

    pub fn destroy(&self) {
        self.tear_down();
    }

    pub fn select_action(&self, current_state: &RiskGameState, budget: Duration) -> Result<Action> {
        with_error::verify!(
            current_state.num_players == self.num_players.get(),
            "state has {} players but agent was set up for {}",
            current_state.num_players,
            self.num_players.get()
        );
        let start = Instant::now();
        info!(?budget, "select_action start");
        self.reuse_or_rebuild_tree(current_state);

        let evaluator = RiskEvaluator::new(self.weight_preset);
        let player = self.player.get();

        if let Some(action) = self.try_terminal_shortcut(&evaluator, player, start, budget)? {
            debug!(?action, "pre-search shortcut found a forced line");
            info!(?action, elapsed = ?start.elapsed(), "select_action end (shortcut)");
            return Ok(action);
        }

        self.run_search(&evaluator, player, start, budget)?;

        let action = match self.pick_best_child() {
            Some(action) => {
                let (plays, wins) = self.root_child_stats(action);
                info!(?action, plays, wins, elapsed = ?start.elapsed(), "select_action end (search)");
                action
            }
            None => {
                debug!("root never expanded; falling back to a one-ply greedy search");
                let fallback_config = DeadlineConfig::with_timeout(self.search_config.get().safety_buffer);
                let action =
                    SingleLevel {}.pick_action(fallback_config.deadline, current_state, &GameComparator, player)?;
                info!(?action, elapsed = ?start.elapsed(), "select_action end (fallback)");
                action
            }
        };
        Ok(action)
    }

    /// `(plays, wins)` of the root child matching `action`, for the closing
    /// log line. Falls back to zeros if the child can't be found, which
    /// should not happen immediately after [RiskAgent::pick_best_child]
    /// selected it.
    fn root_child_stats(&self, action: Action) -> (u64, u64) {
        let guard = self.store.borrow();
        let store = guard.as_ref().expect("tree was just initialized");
        let root = store.root();
        store
            .children(root)
            .iter()
            .map(|&c| store.get(c))
            .find(|node| node.action == Some(action))
            .map_or((0, 0), |node| (node.plays, node.wins))
    }

    fn reuse_or_rebuild_tree(&self, current_state: &RiskGameState) {
        let mut guard = self.store.borrow_mut();
        match guard.as_mut() {
            Some(store) => {
                let reused = store.reroot(current_state);
                debug!(?reused, "reused existing search tree");
            }
            None => *guard = Some(NodeStore::new(current_state.clone())),
        }
    }

    fn try_terminal_shortcut(
        &self,
        evaluator: &RiskEvaluator,
        player: PlayerId,
        start: Instant,
        budget: Duration,
    ) -> Result<Option<Action>> {
        let guard = self.store.borrow();
        let store = guard.as_ref().expect("tree was just initialized");
        let clock = Clock::new(start, budget, self.search_config.get().safety_buffer);
        let engine = self.build_engine(evaluator, player, clock);
        engine.sort_promising_candidates(store)
    }

    fn run_search(
        &self,
        evaluator: &RiskEvaluator,
        player: PlayerId,
        start: Instant,
        budget: Duration,
    ) -> Result<()> {
        let clock = Clock::new(start, budget, self.search_config.get().safety_buffer);
        let mut engine = self.build_engine(evaluator, player, clock);
        let mut guard = self.store.borrow_mut();
        let store = guard.as_mut().expect("tree was just initialized");

        while !engine.should_stop() {
            engine.run_iteration(store)?;
        }
        Ok(())
    }

    fn build_engine<'a>(
        &self,
        evaluator: &'a RiskEvaluator,
        player: PlayerId,
        clock: Clock,
    ) -> MctsEngine<'a, RiskGameState, RiskEvaluator, HeuristicRollout<'a, RiskEvaluator>> {
        let search_config = self.search_config.get();
        let rollout = HeuristicRollout::new(evaluator, search_config.exploration_constant, search_config.rollout_action_cap);
        MctsEngine::new(search_config, clock, evaluator, rollout, player, thread_rng().gen())
    }

    /// `argmax` over root children under the move comparator: plays, then
    /// wins, then state hash. `None` means the root is still a leaf.
    fn pick_best_child(&self) -> Option<Action> {
        let guard = self.store.borrow();
        let store = guard.as_ref().expect("tree was just initialized");
        let root = store.root();
        let best = store
            .children(root)
            .iter()
            .copied()
            .min_by(|&a, &b| move_comparator(store.get(a), store.get(b)))?;
        store.get(best).action
    }
}

#[cfg(test)]
mod tests {
    use risk_model::testing::small_game;

    use super::*;

    #[test]
    fn selects_a_legal_action_within_a_small_budget() {
        let agent = RiskAgent::new(SearchConfig::default(), WeightPreset::default());
        agent.set_up(AgentConfig::new(2, 0));
        let state = small_game(2, 1);

        let action = agent.select_action(&state, Duration::from_millis(150)).unwrap();
        assert!(state.is_valid_action(&action));
    }

    #[test]
    fn zero_budget_still_returns_a_legal_action_via_the_greedy_fallback() {
        let agent = RiskAgent::new(SearchConfig::default(), WeightPreset::default());
        agent.set_up(AgentConfig::new(2, 0));
        let state = small_game(2, 1);

        let action = agent.select_action(&state, Duration::from_millis(0)).unwrap();
        assert!(state.is_valid_action(&action));
    }

    #[test]
    fn tree_is_reused_across_consecutive_turns_for_the_same_player() {
        let agent = RiskAgent::new(SearchConfig::default(), WeightPreset::default());
        agent.set_up(AgentConfig::new(2, 0));
        let state = small_game(2, 1);

        let first = agent.select_action(&state, Duration::from_millis(150)).unwrap();
        let next_state = state.apply(first).unwrap();
        // Re-running on a descendant state should not panic and should still
        // produce a legal action for the (possibly different) current player.
        let second = agent.select_action(&next_state, Duration::from_millis(150)).unwrap();
        assert!(next_state.is_valid_action(&second));
    }

    #[test]
    fn tear_down_clears_the_tree() {
        let agent = RiskAgent::new(SearchConfig::default(), WeightPreset::default());
        agent.set_up(AgentConfig::new(2, 0));
        let state = small_game(2, 1);
        agent.select_action(&state, Duration::from_millis(50)).unwrap();
        agent.tear_down();
        assert!(agent.store.borrow().is_none());
    }
}
