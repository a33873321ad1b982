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

/// Per-call deadline for a [crate::selection_algorithm::SelectionAlgorithm]
/// invocation. Kept separate from an agent's own construction-time
/// configuration (e.g. `risk_agent::facade::AgentConfig`) because the
/// deadline is necessarily different on every call.
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    pub deadline: Instant,
}

impl AgentConfig {
    pub fn with_timeout(budget: Duration) -> Self {
        Self { deadline: Instant::now() + budget }
    }
}
