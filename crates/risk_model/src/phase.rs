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

use serde::{Deserialize, Serialize};

use crate::primitives::{PlayerId, TerritoryId};

/// Details of an in-flight attack, retained while the state is a chance node
/// awaiting [crate::action::Action::ResolveCombat].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingAttack {
    pub attacker: PlayerId,
    pub from: TerritoryId,
    pub to: TerritoryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Reinforce,
    Attack,
    ResolvingCombat(PendingAttack),
    Fortify,
    GameOver { winner: PlayerId },
}
