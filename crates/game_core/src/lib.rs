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

//! Generic data types and traits shared by every search algorithm in the
//! workspace. Nothing in this crate knows anything about Risk; the
//! Risk-specific wiring lives in `risk_model`, `risk_eval`, and
//! `risk_agent`.

pub mod agent;
pub mod game_state_node;
pub mod node_store;
pub mod selection_algorithm;
pub mod state_evaluator;
