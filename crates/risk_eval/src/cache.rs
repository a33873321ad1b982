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

//! Per-`(state, player)` memoization for [crate::evaluator::RiskEvaluator].
//! One instance is created per evaluation and never shared across states, so
//! every field is a plain `OnceCell`-style lazily-populated slot rather than
//! anything requiring interior synchronization.

use std::cell::RefCell;

use risk_model::primitives::{PlayerId, TroopCount};

use crate::weights::Position;

/// Caches every quantity [crate::evaluator::RiskEvaluator::evaluate] derives
/// from the board so that repeated sub-metric queries against the same
/// `(state, player)` never recompute them.
#[derive(Debug, Default)]
pub struct EvaluatorCache {
    player: RefCell<Option<PlayerId>>,
    owned_territory_count: RefCell<Option<usize>>,
    total_territory_count: RefCell<Option<usize>>,
    player_troops: RefCell<Option<TroopCount>>,
    total_troops: RefCell<Option<TroopCount>>,
    territory_score: RefCell<Option<f64>>,
    troop_score: RefCell<Option<f64>>,
    continent_score: RefCell<Option<f64>>,
    attack_potential: RefCell<Option<f64>>,
    position: RefCell<Option<Position>>,
}

impl EvaluatorCache {
    pub fn new(player: PlayerId) -> Self {
        Self { player: RefCell::new(Some(player)), ..Self::default() }
    }

    pub fn player(&self) -> PlayerId {
        self.player.borrow().expect("EvaluatorCache always constructed with a player")
    }

    /// Returns the cached value for `slot`, computing and storing it via
    /// `compute` on first access.
    fn get_or_compute<T: Copy>(slot: &RefCell<Option<T>>, compute: impl FnOnce() -> T) -> T {
        if let Some(value) = *slot.borrow() {
            return value;
        }
        let value = compute();
        *slot.borrow_mut() = Some(value);
        value
    }

    pub fn owned_territory_count(&self, compute: impl FnOnce() -> usize) -> usize {
        Self::get_or_compute(&self.owned_territory_count, compute)
    }

    pub fn total_territory_count(&self, compute: impl FnOnce() -> usize) -> usize {
        Self::get_or_compute(&self.total_territory_count, compute)
    }

    pub fn player_troops(&self, compute: impl FnOnce() -> TroopCount) -> TroopCount {
        Self::get_or_compute(&self.player_troops, compute)
    }

    pub fn total_troops(&self, compute: impl FnOnce() -> TroopCount) -> TroopCount {
        Self::get_or_compute(&self.total_troops, compute)
    }

    pub fn territory_score(&self, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.territory_score, compute)
    }

    pub fn troop_score(&self, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.troop_score, compute)
    }

    pub fn continent_score(&self, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.continent_score, compute)
    }

    pub fn attack_potential(&self, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.attack_potential, compute)
    }

    pub fn position(&self, compute: impl FnOnce() -> Position) -> Position {
        Self::get_or_compute(&self.position, compute)
    }
}
