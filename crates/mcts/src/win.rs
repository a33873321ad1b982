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

//! Win determination (§4.5): projects a state's outcome vector to a scalar
//! in `[0,1]` for one player, then credits a rollout as a win either
//! outright or via a coin flip when the scalar reflects a tie.

use game_core::game_state_node::{GameStateNode, PlayerId};
use rand::rngs::StdRng;

use crate::rollout::coin_flip;

const EPSILON: f64 = 1e-9;

/// 1.0 if `player` strictly leads `vector`, `1/k` if tied for the lead with
/// `k - 1` others, 0 otherwise.
fn project_to_scalar(vector: &[f64], player: PlayerId) -> f64 {
    let Some(&player_value) = vector.get(player as usize) else {
        return 0.0;
    };
    let max = vector.iter().cloned().fold(f64::MIN, f64::max);
    if (player_value - max).abs() > EPSILON {
        return 0.0;
    }
    let ties = vector.iter().filter(|&&v| (v - max).abs() <= EPSILON).count();
    1.0 / ties as f64
}

/// `win := (scalar == 1.0) || (scalar > 0 && coin_flip())`. Ties between
/// the engine's player and others are credited as wins with probability
/// one-half so the statistics don't systematically discard them.
pub fn has_won<N: GameStateNode>(state: &N, player: PlayerId, rng: &mut StdRng) -> bool {
    let mut scalar = project_to_scalar(&state.utility_vector(), player);
    if !state.is_game_over() && scalar > 0.0 {
        scalar = project_to_scalar(&state.heuristic_vector(), player);
    }
    (scalar - 1.0).abs() <= EPSILON || (scalar > 0.0 && coin_flip(rng))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use risk_model::testing::small_game;

    use super::*;

    #[test]
    fn strict_leader_always_wins() {
        assert_eq!(project_to_scalar(&[1.0, 0.0, 0.0], 0), 1.0);
        assert_eq!(project_to_scalar(&[0.0, 1.0, 0.0], 0), 0.0);
    }

    #[test]
    fn tie_splits_credit_among_leaders() {
        assert_eq!(project_to_scalar(&[0.5, 0.5], 0), 0.5);
        assert_eq!(project_to_scalar(&[1.0, 1.0, 0.0], 2), 0.0);
    }

    #[test]
    fn tie_credits_win_about_half_the_time() {
        // small_game's starting board is split 3 territories apiece between
        // two players, so neither side has started the game over and
        // has_won must fall through to the tied heuristic_vector read.
        let state = small_game(2, 1);
        assert!(!state.is_game_over());

        let mut rng = StdRng::seed_from_u64(42);
        let wins = (0..10_000).filter(|_| has_won(&state, 0, &mut rng)).count();
        let frequency = wins as f64 / 10_000.0;
        assert!((frequency - 0.5).abs() < 0.02, "frequency was {frequency}");
    }
}
