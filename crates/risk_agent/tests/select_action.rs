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

use std::time::{Duration, Instant};

use game_core::game_state_node::GameStateNode;
use mcts::config::SearchConfig;
use risk_agent::facade::AgentConfig;
use risk_agent::RiskAgent;
use risk_eval::weights::WeightPreset;
use risk_model::phase::Phase;
use risk_model::testing::small_game;

#[test]
fn select_action_respects_the_deadline() {
    let agent = RiskAgent::new(SearchConfig::default(), WeightPreset::default());
    agent.set_up(AgentConfig::new(2, 0));
    let state = small_game(2, 1);

    let start = Instant::now();
    let action = agent.select_action(&state, Duration::from_millis(200)).unwrap();
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(state.is_valid_action(&action));
}

#[test]
fn select_action_plays_a_full_game_to_completion() {
    // One agent per seat, each only ever asked to move for its own player -
    // the calling convention a match runner actually uses.
    let agents: Vec<RiskAgent> = (0..2)
        .map(|seat| {
            let agent = RiskAgent::new(SearchConfig::default(), WeightPreset::default());
            agent.set_up(AgentConfig::new(2, seat));
            agent
        })
        .collect();
    let mut state = small_game(2, 1);

    let mut turns = 0;
    while !state.is_game_over() && turns < 200 {
        state = if state.is_chance_node() {
            state.apply_auto().unwrap()
        } else {
            let seat = state.current_player() as usize;
            let action = agents[seat].select_action(&state, Duration::from_millis(20)).unwrap();
            state.apply(action).unwrap()
        };
        turns += 1;
    }

    assert!(state.is_game_over() || turns == 200, "game should terminate or hit the turn cap");
}

#[test]
fn select_action_on_an_already_finished_game_still_returns_a_result() {
    let agent = RiskAgent::new(SearchConfig::default(), WeightPreset::default());
    agent.set_up(AgentConfig::new(2, 0));
    let mut state = small_game(2, 1);
    state.phase = Phase::GameOver { winner: 0 };
    assert!(state.is_game_over());

    // An agent asked to move in an already-decided game has no legal
    // actions to search from; select_action should surface that as an
    // error rather than panic.
    assert!(agent.select_action(&state, Duration::from_millis(50)).is_err());
}
