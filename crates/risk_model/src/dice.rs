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

//! Dice combat, seeded so that [crate::state::RiskGameState::determine_next_action]
//! stays a pure function of the state: the "random" roll is really a
//! deterministic function of a seed carried on the state itself, the same
//! way it would be if a production rules engine kept its RNG inside the
//! serialized game state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Rolls `attacker_dice` and `defender_dice` six-sided dice and resolves one
/// round of Risk combat: highest vs. highest, second vs. second, ties go to
/// the defender. Returns `(attacker_losses, defender_losses)`.
pub fn resolve_round(seed: u64, attacker_dice: u8, defender_dice: u8) -> (u8, u8) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut attacker: Vec<u8> = (0..attacker_dice).map(|_| rng.gen_range(1..=6)).collect();
    let mut defender: Vec<u8> = (0..defender_dice).map(|_| rng.gen_range(1..=6)).collect();
    attacker.sort_unstable_by(|a, b| b.cmp(a));
    defender.sort_unstable_by(|a, b| b.cmp(a));

    let mut attacker_losses = 0;
    let mut defender_losses = 0;
    for (a, d) in attacker.iter().zip(defender.iter()) {
        if a > d {
            defender_losses += 1;
        } else {
            attacker_losses += 1;
        }
    }
    (attacker_losses, defender_losses)
}

/// Advances the state's seed deterministically. A splitmix64 step: cheap,
/// well-distributed, and - crucially - a pure function of the prior seed, so
/// two evaluators built from identical states always agree (invariant 7).
pub fn next_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
