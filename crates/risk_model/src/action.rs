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

use crate::primitives::{TerritoryId, TroopCount};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Spends this turn's entire reinforcement pool on one territory.
    Reinforce(TerritoryId),
    /// Trades in a set of three cards for the current escalating bonus.
    /// Only legal (and, once a player holds five cards, mandatory) during
    /// the reinforce phase.
    TradeInCards,
    /// Attacks `to` from `from` with the maximum number of dice the
    /// attacker is permitted (simplified from full Risk, where the
    /// attacker separately chooses 1-3 dice).
    Attack { from: TerritoryId, to: TerritoryId },
    EndAttackPhase,
    /// Moves all but one troop from `from` to an adjacent, owned `to`.
    Fortify { from: TerritoryId, to: TerritoryId },
    EndFortifyPhase,
    /// The chance outcome of a single attack's dice rolls. Never legal for a
    /// real player to choose; only produced by
    /// [game_core::game_state_node::GameStateNode::determine_next_action].
    ResolveCombat { attacker_losses: u8, defender_losses: u8, territory_captured: bool },
}
