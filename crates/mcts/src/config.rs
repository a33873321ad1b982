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

use std::time::Duration;

/// Tunables for a single [crate::engine::MctsEngine] run. Kept as a struct
/// rather than scattered constants so the four weight-table style knobs the
/// specification calls out are all in one place.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// `c` in the UCT formula `w/n + c * sqrt(ln(N) / n)`. `sqrt(2)` is the
    /// textbook default.
    pub exploration_constant: f64,
    /// Maximum number of plies a rollout will play before being cut off and
    /// scored via the heuristic vector instead of the utility vector.
    pub max_rollout_depth: u32,
    /// Caps the number of legal actions the heuristic rollout policy
    /// evaluates per step. `None` evaluates every legal action.
    pub rollout_action_cap: Option<usize>,
    /// Subtracted from the raw budget so `selectAction` reliably returns on
    /// time even though the last iteration may already be in flight.
    pub safety_buffer: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_rollout_depth: 50,
            rollout_action_cap: Some(20),
            safety_buffer: Duration::from_millis(100),
        }
    }
}
