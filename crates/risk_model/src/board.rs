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

//! The Risk board: territories, continents, adjacency, and the shared card
//! economy. Deliberately a reference-scale board, not the full 42-territory
//! production map - enough to exercise every query `risk_eval` needs.

use serde::{Deserialize, Serialize};

use crate::primitives::{ContinentId, PlayerId, TerritoryId, TroopCount};

#[derive(Debug, Clone, Hash, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub continent: ContinentId,
    pub owner: PlayerId,
    pub troops: TroopCount,
}

#[derive(Debug, Clone, Hash, Serialize, Deserialize)]
pub struct Continent {
    pub id: ContinentId,
    pub bonus: TroopCount,
    pub members: Vec<TerritoryId>,
}

#[derive(Debug, Clone, Hash, Serialize, Deserialize)]
pub struct Board {
    pub territories: Vec<Territory>,
    pub continents: Vec<Continent>,
    pub adjacency: Vec<Vec<TerritoryId>>,
    /// Number of trade-ins that have occurred so far, driving the escalating
    /// card-trade-in bonus schedule.
    pub trade_ins: u32,
    /// Per-player card counts. Index by [PlayerId] as `usize`.
    pub cards: Vec<u32>,
}

/// The query surface `risk_eval` and the rollout policy need from a Risk
/// board. Kept as a trait (rather than calling into [Board] directly)
/// because §6 of the specification treats the board as something the core
/// only ever *queries* through an interface, never owns.
pub trait RiskBoardView {
    fn territory(&self, id: TerritoryId) -> &Territory;
    fn territories(&self) -> &[Territory];
    fn continents(&self) -> &[Continent];
    fn neighbors(&self, id: TerritoryId) -> &[TerritoryId];
    fn cards_for(&self, player: PlayerId) -> u32;
    fn next_trade_in_bonus(&self) -> TroopCount;

    fn territories_owned_by(&self, player: PlayerId) -> Box<dyn Iterator<Item = &Territory> + '_> {
        Box::new(self.territories().iter().filter(move |t| t.owner == player))
    }

    fn enemy_neighbors(&self, id: TerritoryId, player: PlayerId) -> Vec<TerritoryId> {
        self.neighbors(id)
            .iter()
            .filter(|&&n| self.territory(n).owner != player)
            .copied()
            .collect()
    }

    fn total_troops(&self) -> TroopCount {
        self.territories().iter().map(|t| t.troops).sum()
    }

    fn troops_owned_by(&self, player: PlayerId) -> TroopCount {
        self.territories_owned_by(player).map(|t| t.troops).sum()
    }
}

impl RiskBoardView for Board {
    fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id.0 as usize]
    }

    fn territories(&self) -> &[Territory] {
        &self.territories
    }

    fn continents(&self) -> &[Continent] {
        &self.continents
    }

    fn neighbors(&self, id: TerritoryId) -> &[TerritoryId] {
        &self.adjacency[id.0 as usize]
    }

    fn cards_for(&self, player: PlayerId) -> u32 {
        self.cards.get(player as usize).copied().unwrap_or(0)
    }

    fn next_trade_in_bonus(&self) -> TroopCount {
        // Standard Risk escalation: 4, 6, 8, 10, 12, 15, then +5 per set.
        const FIXED: [TroopCount; 5] = [4, 6, 8, 10, 12];
        match FIXED.get(self.trade_ins as usize) {
            Some(&bonus) => bonus,
            None => 15 + 5 * (self.trade_ins - FIXED.len() as u32),
        }
    }
}

impl Board {
    pub fn owner_mut(&mut self, id: TerritoryId) -> &mut PlayerId {
        &mut self.territories[id.0 as usize].owner
    }

    pub fn troops_mut(&mut self, id: TerritoryId) -> &mut TroopCount {
        &mut self.territories[id.0 as usize].troops
    }

    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.neighbors(a).contains(&b)
    }

    pub fn remaining_players(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> =
            self.territories.iter().map(|t| t.owner).collect::<Vec<_>>();
        players.sort_unstable();
        players.dedup();
        players
    }
}
