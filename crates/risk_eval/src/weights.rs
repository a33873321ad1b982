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

//! Position-adaptive weight tables. Kept as a small enum -> constant-array
//! table rather than scattered literals, per design note "Weights as
//! configuration".

/// One of the three positions a player's board can be categorized into,
/// plus the alternate "balanced" weightings the source material's other
/// evaluator revisions used. `Position::Balanced` resolves to
/// [Weights::canonical_balanced] unless a [WeightPreset] override is
/// configured on the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    SignificantAdvantage,
    BehindInTroops,
    Balanced,
}

/// `(w_territory, w_troop, w_continent, w_attack)`.
pub type Weights = (f64, f64, f64, f64);

/// Selects which weight table backs [Position::Balanced]. The specification
/// adopts `Adaptive0203` as canonical; the other two are exposed as
/// configurable presets for the balanced position only, since source
/// material disagreed on those numbers but agreed on the advantage/behind
/// tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightPreset {
    /// territory 0.2, troop 0.3, continent 0.1, attack 0.4.
    #[default]
    Adaptive0203,
    /// territory 0.3, troop 0.3, continent 0.2, attack 0.2.
    EvenlySpread,
    /// territory 0.4, troop 0.6, continent 0 (dropped), attack 0 (dropped).
    TerritoryAndTroopOnly,
}

impl WeightPreset {
    pub fn weights(self, position: Position) -> Weights {
        match position {
            Position::SignificantAdvantage => (0.05, 0.10, 0.05, 0.80),
            Position::BehindInTroops => (0.30, 0.40, 0.20, 0.10),
            Position::Balanced => match self {
                WeightPreset::Adaptive0203 => (0.2, 0.3, 0.1, 0.4),
                WeightPreset::EvenlySpread => (0.3, 0.3, 0.2, 0.2),
                WeightPreset::TerritoryAndTroopOnly => (0.4, 0.6, 0.0, 0.0),
            },
        }
    }
}
