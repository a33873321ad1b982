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

//! A compact reference implementation of Risk. Plays the role the `Nim`
//! game played for the original search core: a concrete, fully-owned
//! [game_core::game_state_node::GameStateNode] exercising every feature the
//! generic search crates need, without depending on a production rules
//! engine.

pub mod action;
pub mod board;
pub mod dice;
pub mod game_comparator;
pub mod phase;
pub mod primitives;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
