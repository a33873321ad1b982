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

use std::fmt::Debug;
use std::hash::Hash;

use anyhow::Result;

/// Identifies the player whose turn it currently is.
///
/// Non-negative values name a real player (0-indexed). A negative value is
/// the "chance" sentinel: the state transitions automatically via
/// [GameStateNode::determine_next_action] / [GameStateNode::apply_auto]
/// rather than via a choice made by any player.
pub type PlayerId = i32;

/// Sentinel player id used for chance / automatic-resolution nodes.
pub const CHANCE_PLAYER: PlayerId = -1;

/// A generic game state used by a search algorithm.
///
/// Keeping the search algorithms generic over this trait is what lets
/// [crate::node_store], the MCTS engine, and the tree-search algorithms in
/// `ai_tree_search` be tested against a cheap reference implementation
/// instead of a full production rules engine. The only thing a concrete game
/// needs to provide is this capability surface; everything else in the
/// search core treats it as an opaque external collaborator.
pub trait GameStateNode: Sized + Clone + Debug {
    /// A game action which transitions the state.
    type Action: Copy + Eq + Hash + Debug;

    /// Returns an iterator over actions the current actor can legally take.
    ///
    /// Undefined (may be empty) once [Self::is_game_over] is `true`.
    fn legal_actions(&self) -> Result<Box<dyn Iterator<Item = Self::Action> + '_>>;

    /// Applies `action`, producing the resulting state. Does not mutate
    /// `self`; search algorithms that want a mutable in-place transition can
    /// `std::mem::replace` the old state with the result.
    fn apply(&self, action: Self::Action) -> Result<Self>;

    /// Applies the unique automatic action for a chance node. Only valid
    /// when [Self::current_player] is negative.
    fn apply_auto(&self) -> Result<Self>;

    /// Deterministically computes the action [Self::apply_auto] would take,
    /// without applying it. Used by the selection phase to find the matching
    /// child in the tree rather than guessing.
    fn determine_next_action(&self) -> Result<Self::Action>;

    /// The player (or [CHANCE_PLAYER]) who acts next.
    fn current_player(&self) -> PlayerId;

    /// `true` when [Self::current_player] is the chance sentinel.
    fn is_chance_node(&self) -> bool {
        self.current_player() < 0
    }

    /// The action that produced this state from its parent, if any.
    fn previous_action(&self) -> Option<Self::Action>;

    /// Whether the game has reached a terminal state.
    fn is_game_over(&self) -> bool;

    /// Whether `action` remains legal in this state. Used to re-validate
    /// tree edges after re-rooting, since the legal action set at a node can
    /// shift between visits (e.g. after a card draw).
    fn is_valid_action(&self, action: &Self::Action) -> bool;

    /// One scalar per player, normalized, defined for terminal states.
    fn utility_vector(&self) -> Vec<f64>;

    /// One scalar per player, defined for non-terminal states; used to
    /// refine a tied-but-favorable utility read during win determination.
    fn heuristic_vector(&self) -> Vec<f64>;

    /// A content hash of the full state (board + phase + cards + turn).
    ///
    /// Required for re-rooting: the store has no other way to recognize that
    /// a live state it was handed is the same state as an existing tree
    /// node, and for the move/selection comparators' stable tie-break.
    fn state_hash(&self) -> u64;
}
