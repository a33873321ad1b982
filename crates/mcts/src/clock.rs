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

//! Deadline bookkeeping. A safety buffer is subtracted from the raw budget
//! up front so every `should_stop` check agrees on when time is actually up.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
    /// `deadline` already has the safety buffer subtracted.
    deadline: Instant,
    budget: Duration,
}

impl Clock {
    pub fn new(start: Instant, budget: Duration, safety_buffer: Duration) -> Self {
        let safe_budget = budget.saturating_sub(safety_buffer);
        Self { start, deadline: start + safe_budget, budget: safe_budget }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// True once `now >= deadline`. Consulted before each phase and inside
    /// any inner traversal loop.
    pub fn should_stop(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// True once `(now - start) * proportion >= budget`, letting callers
    /// bail out of expensive set-up when only a sliver of time remains.
    pub fn should_stop_within(&self, proportion: f64) -> bool {
        let elapsed = Instant::now().saturating_duration_since(self.start);
        elapsed.mul_f64(proportion) >= self.budget
    }
}
