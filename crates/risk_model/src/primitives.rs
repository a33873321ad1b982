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

//! Fundamental types and data structures for the Risk reference model.

use std::fmt;
use std::fmt::Formatter;

use serde::{Deserialize, Serialize};

pub use game_core::game_state_node::{PlayerId, CHANCE_PLAYER};

pub type TroopCount = u32;

/// Identifies a territory on the board.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TerritoryId(pub u8);

impl fmt::Debug for TerritoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Territory{}", self.0)
    }
}

/// Identifies a continent on the board.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ContinentId(pub u8);

impl fmt::Debug for ContinentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Continent{}", self.0)
    }
}
