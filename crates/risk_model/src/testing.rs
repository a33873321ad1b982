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

//! A small fixed board used by tests across this workspace: two continents
//! of three territories each, arranged in a ring so every territory has
//! exactly two neighbors.

use crate::board::{Board, Continent, Territory};
use crate::primitives::{ContinentId, PlayerId, TerritoryId};
use crate::state::RiskGameState;

/// Builds the six-territory test board, owned two-per-player by
/// `num_players` (2 or 3), with three troops on every territory and no
/// cards dealt.
pub fn small_board(num_players: i32) -> Board {
    let territories = (0..6)
        .map(|i| Territory {
            id: TerritoryId(i),
            continent: ContinentId(i / 3),
            owner: i as PlayerId % num_players,
            troops: 3,
        })
        .collect();

    let continents = vec![
        Continent { id: ContinentId(0), bonus: 2, members: (0..3).map(TerritoryId).collect() },
        Continent { id: ContinentId(1), bonus: 2, members: (3..6).map(TerritoryId).collect() },
    ];

    let adjacency = (0..6u8)
        .map(|i| vec![TerritoryId((i + 5) % 6), TerritoryId((i + 1) % 6)])
        .collect();

    Board { territories, continents, adjacency, trade_ins: 0, cards: vec![0; num_players as usize] }
}

/// Builds a fresh game on [small_board] for `num_players`, seeded
/// deterministically for reproducible tests.
pub fn small_game(num_players: i32, seed: u64) -> RiskGameState {
    RiskGameState::new(small_board(num_players), num_players, seed)
}
