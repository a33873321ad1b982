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

//! The Risk position evaluator: scores a state in `[0,1]` for a given
//! player by detecting whether that player is ahead, behind, or balanced
//! and combining a handful of sub-metrics under position-adaptive weights.

use anyhow::{ensure, Result};
use game_core::state_evaluator::StateEvaluator;
use risk_model::board::RiskBoardView;
use risk_model::primitives::{PlayerId, TroopCount};
use risk_model::state::RiskGameState;
use tracing::debug;

use crate::cache::EvaluatorCache;
use crate::weights::{Position, WeightPreset};

/// Ratios closer than this to zero are treated as "the opponent has
/// nothing", i.e. the player dominates outright, rather than dividing by
/// zero.
const EPSILON: f64 = 1e-6;

/// Scores [RiskGameState]s for one player. Holds no state of its own beyond
/// configuration; a fresh [EvaluatorCache] is built per call to `evaluate`,
/// matching the specification's "one instance per (state, player) pair"
/// memoization model.
#[derive(Debug, Clone, Copy)]
pub struct RiskEvaluator {
    preset: WeightPreset,
}

impl RiskEvaluator {
    pub fn new(preset: WeightPreset) -> Self {
        Self { preset }
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new(WeightPreset::default())
    }
}

impl StateEvaluator<RiskGameState> for RiskEvaluator {
    fn evaluate(&self, node: &RiskGameState, player: PlayerId) -> Result<f64> {
        ensure!(player >= 0, "evaluator requires a real player id, got {player}");
        let cache = EvaluatorCache::new(player);
        let board = &node.board;

        let position = cache.position(|| detect_position(board, player));
        let (w_territory, w_troop, w_continent, w_attack) = self.preset.weights(position);
        debug!(?player, ?position, w_territory, w_troop, w_continent, w_attack, "evaluate");

        let territory = cache.territory_score(|| territory_score(board, &cache));
        let troop = cache.troop_score(|| troop_score(board, &cache));
        let continent = cache.continent_score(|| continent_score(board, player));
        let attack = cache.attack_potential(|| attack_potential(board, player, position));

        let weighted = [(w_territory, territory), (w_troop, troop), (w_continent, continent), (w_attack, attack)];
        let weight_sum: f64 = weighted.iter().map(|(w, _)| w).sum();
        if weight_sum <= 0.0 {
            return Ok(0.0);
        }
        let score: f64 = weighted.iter().map(|(w, m)| w * m).sum::<f64>() / weight_sum;
        Ok(score.clamp(0.0, 1.0))
    }
}

fn detect_position(board: &impl RiskBoardView, player: PlayerId) -> Position {
    let owned_territories = board.territories_owned_by(player).count() as f64;
    let other_territories = board.territories().len() as f64 - owned_territories;
    let territory_ratio = owned_territories / other_territories.max(EPSILON);

    let owned_troops = board.troops_owned_by(player) as f64;
    let other_troops = board.total_troops() as f64 - owned_troops;
    let troop_ratio = owned_troops / other_troops.max(EPSILON);

    let significant_advantage = territory_ratio > 1.5 && troop_ratio > 1.5;
    let behind_in_troops = troop_ratio < 0.8;

    if significant_advantage {
        Position::SignificantAdvantage
    } else if behind_in_troops {
        Position::BehindInTroops
    } else {
        Position::Balanced
    }
}

fn territory_score(board: &impl RiskBoardView, cache: &EvaluatorCache) -> f64 {
    let total = cache.total_territory_count(|| board.territories().len());
    if total == 0 {
        return 0.0;
    }
    let owned = cache.owned_territory_count(|| board.territories_owned_by(cache.player()).count());
    owned as f64 / total as f64
}

fn troop_score(board: &impl RiskBoardView, cache: &EvaluatorCache) -> f64 {
    let total = cache.total_troops(|| board.total_troops());
    if total == 0 {
        return 0.0;
    }
    let owned = cache.player_troops(|| board.troops_owned_by(cache.player()));
    owned as f64 / total as f64
}

fn continent_score(board: &impl RiskBoardView, player: PlayerId) -> f64 {
    let qualifying: Vec<f64> = board
        .continents()
        .iter()
        .filter(|c| !c.members.is_empty())
        .map(|c| {
            let owned = c.members.iter().filter(|&&t| board.territory(t).owner == player).count();
            (owned as f64 / c.members.len() as f64) * (c.bonus as f64 / 10.0)
        })
        .collect();

    if qualifying.is_empty() {
        return 0.0;
    }
    let mean = qualifying.iter().sum::<f64>() / qualifying.len() as f64;
    mean.clamp(0.0, 1.0)
}

fn attack_potential(board: &impl RiskBoardView, player: PlayerId, position: Position) -> f64 {
    let per_territory: Vec<f64> = board
        .territories_owned_by(player)
        .filter(|t| t.troops > 1)
        .filter_map(|t| {
            let enemies = board.enemy_neighbors(t.id, player);
            if enemies.is_empty() {
                return None;
            }
            let mean = enemies.iter().map(|&n| raw(t.troops, board.territory(n).troops, position)).sum::<f64>()
                / enemies.len() as f64;
            Some(mean)
        })
        .collect();

    if per_territory.is_empty() {
        return 0.0;
    }
    per_territory.iter().sum::<f64>() / per_territory.len() as f64
}

/// The per-(attacker, neighbor) attack strength used by [attack_potential].
/// Two distinct tables depending on position: a cautious one for balanced /
/// behind positions, and an aggressive "finisher" one once the player
/// already has a significant advantage.
fn raw(attacker_troops: TroopCount, defender_troops: TroopCount, position: Position) -> f64 {
    let ratio = attacker_troops as f64 / (defender_troops as f64).max(EPSILON);
    match position {
        Position::SignificantAdvantage => {
            if ratio >= 1.5 {
                1.0
            } else if ratio >= 1.0 {
                if attacker_troops >= 4 {
                    0.9
                } else {
                    0.5
                }
            } else {
                0.3
            }
        }
        Position::BehindInTroops | Position::Balanced => {
            if ratio >= 2.0 {
                1.0
            } else if ratio >= 1.0 {
                if attacker_troops >= 5 {
                    0.8
                } else {
                    0.3
                }
            } else {
                0.1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use risk_model::testing::small_game;

    use super::*;
    use crate::weights::WeightPreset;

    #[test]
    fn balanced_board_scores_away_from_the_extremes() {
        let state = small_game(2, 1);
        let evaluator = RiskEvaluator::default();
        let score = evaluator.evaluate(&state, 0).unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn dominant_player_triggers_significant_advantage_weights() {
        let mut state = small_game(2, 1);
        for territory in state.board.territories.iter_mut() {
            territory.owner = 0;
            territory.troops = 9;
        }
        state.board.territories[5].owner = 1;
        state.board.territories[5].troops = 3;

        let position = detect_position(&state.board, 0);
        assert_eq!(position, Position::SignificantAdvantage);
        assert_eq!(
            WeightPreset::default().weights(position),
            (0.05, 0.10, 0.05, 0.80)
        );
    }

    #[test]
    fn player_with_no_territories_scores_zero_on_territory_and_attack() {
        let mut state = small_game(2, 1);
        for territory in state.board.territories.iter_mut() {
            territory.owner = 1;
        }
        assert_eq!(territory_score(&state.board, &EvaluatorCache::new(0)), 0.0);
        assert_eq!(attack_potential(&state.board, 0, Position::Balanced), 0.0);
    }

    #[test]
    fn raw_attack_function_matches_the_worked_examples() {
        assert_eq!(raw(10, 4, Position::Balanced), 1.0);
        assert_eq!(raw(10, 6, Position::Balanced), 0.8);
        assert_eq!(raw(10, 12, Position::Balanced), 0.1);
    }

    #[test]
    fn continents_with_no_territories_are_skipped() {
        use risk_model::board::Continent;
        use risk_model::primitives::ContinentId;

        let mut state = small_game(2, 1);
        let score_without_empty = continent_score(&state.board, 0);

        state.board.continents.push(Continent { id: ContinentId(9), bonus: 7, members: vec![] });
        let score_with_empty = continent_score(&state.board, 0);

        assert_eq!(score_with_empty, score_without_empty);
    }
}
