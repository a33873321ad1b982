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

//! Core data structure for tracking the state of an ongoing Risk game.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::iter;

use anyhow::{ensure, Result};
use game_core::game_state_node::{GameStateNode, PlayerId, CHANCE_PLAYER};
use serde::{Deserialize, Serialize};
use with_error::fail;

use crate::action::Action;
use crate::board::{Board, RiskBoardView};
use crate::dice;
use crate::phase::{PendingAttack, Phase};
use crate::primitives::TroopCount;

#[derive(Debug, Clone, Hash, Serialize, Deserialize)]
pub struct RiskGameState {
    pub board: Board,
    pub phase: Phase,
    /// The player whose turn it conceptually is. During
    /// [Phase::ResolvingCombat], [GameStateNode::current_player] reports the
    /// chance sentinel instead, but play resumes with this player once
    /// combat resolves.
    pub turn_player: PlayerId,
    pub num_players: i32,
    pub reinforcements_remaining: TroopCount,
    pub captured_territory_this_turn: bool,
    pub seed: u64,
    pub previous_action: Option<Action>,
}

impl RiskGameState {
    pub fn new(board: Board, num_players: i32, seed: u64) -> Self {
        let mut state = Self {
            board,
            phase: Phase::Reinforce,
            turn_player: 0,
            num_players,
            reinforcements_remaining: 0,
            captured_territory_this_turn: false,
            seed,
            previous_action: None,
        };
        state.reinforcements_remaining = state.compute_reinforcements(state.turn_player);
        state
    }

    pub fn compute_reinforcements(&self, player: PlayerId) -> TroopCount {
        let owned = self.board.territories_owned_by(player).count() as TroopCount;
        let from_territories = (owned / 3).max(3);
        let continent_bonus: TroopCount = self
            .board
            .continents()
            .iter()
            .filter(|c| c.members.iter().all(|&t| self.board.territory(t).owner == player))
            .map(|c| c.bonus)
            .sum();
        from_territories + continent_bonus
    }

    fn owned_attackers(&self) -> impl Iterator<Item = &crate::board::Territory> + '_ {
        self.board.territories_owned_by(self.turn_player).filter(|t| t.troops > 1)
    }

    fn next_seated_player(&self) -> PlayerId {
        let remaining = self.board.remaining_players();
        if remaining.is_empty() {
            return self.turn_player;
        }
        let mut candidate = (self.turn_player + 1) % self.num_players;
        loop {
            if remaining.contains(&candidate) {
                return candidate;
            }
            candidate = (candidate + 1) % self.num_players;
        }
    }

    fn check_game_over(board: &Board) -> Option<PlayerId> {
        let remaining = board.remaining_players();
        if remaining.len() == 1 {
            Some(remaining[0])
        } else {
            None
        }
    }
}

impl GameStateNode for RiskGameState {
    type Action = Action;

    fn legal_actions(&self) -> Result<Box<dyn Iterator<Item = Action> + '_>> {
        Ok(match self.phase {
            Phase::GameOver { .. } | Phase::ResolvingCombat(_) => Box::new(iter::empty()),
            Phase::Reinforce => {
                let cards = self.board.cards_for(self.turn_player);
                if cards >= 5 {
                    Box::new(iter::once(Action::TradeInCards))
                } else {
                    let trade_in = (cards >= 3).then_some(Action::TradeInCards);
                    let reinforce = self
                        .board
                        .territories_owned_by(self.turn_player)
                        .map(|t| Action::Reinforce(t.id));
                    Box::new(trade_in.into_iter().chain(reinforce))
                }
            }
            Phase::Attack => {
                let attacks = self.owned_attackers().flat_map(|t| {
                    self.board
                        .enemy_neighbors(t.id, self.turn_player)
                        .into_iter()
                        .map(move |to| Action::Attack { from: t.id, to })
                });
                Box::new(attacks.chain(iter::once(Action::EndAttackPhase)))
            }
            Phase::Fortify => {
                let fortifies = self.owned_attackers().flat_map(|t| {
                    self.board
                        .neighbors(t.id)
                        .iter()
                        .filter(|&&n| self.board.territory(n).owner == self.turn_player)
                        .map(move |&to| Action::Fortify { from: t.id, to })
                        .collect::<Vec<_>>()
                });
                Box::new(fortifies.chain(iter::once(Action::EndFortifyPhase)))
            }
        })
    }

    fn apply(&self, action: Action) -> Result<Self> {
        let mut next = self.clone();
        next.previous_action = Some(action);

        match (self.phase, action) {
            (Phase::Reinforce, Action::TradeInCards) => {
                ensure!(self.board.cards_for(self.turn_player) >= 3, "not enough cards to trade in");
                let bonus = self.board.next_trade_in_bonus();
                next.board.cards[self.turn_player as usize] -= 3;
                next.board.trade_ins += 1;
                next.reinforcements_remaining += bonus;
            }
            (Phase::Reinforce, Action::Reinforce(territory)) => {
                ensure!(
                    self.board.territory(territory).owner == self.turn_player,
                    "cannot reinforce a territory you do not own"
                );
                *next.board.troops_mut(territory) += self.reinforcements_remaining;
                next.reinforcements_remaining = 0;
                next.phase = Phase::Attack;
            }
            (Phase::Attack, Action::Attack { from, to }) => {
                ensure!(self.board.are_adjacent(from, to), "attack target must be adjacent");
                ensure!(
                    self.board.territory(from).owner == self.turn_player
                        && self.board.territory(to).owner != self.turn_player,
                    "illegal attack"
                );
                next.phase = Phase::ResolvingCombat(PendingAttack {
                    attacker: self.turn_player,
                    from,
                    to,
                });
            }
            (Phase::Attack, Action::EndAttackPhase) => {
                next.phase = Phase::Fortify;
            }
            (Phase::ResolvingCombat(pending), Action::ResolveCombat {
                attacker_losses,
                defender_losses,
                territory_captured,
            }) => {
                *next.board.troops_mut(pending.from) -= TroopCount::from(attacker_losses);
                if territory_captured {
                    let moving = self.board.territory(pending.from).troops
                        - TroopCount::from(attacker_losses)
                        - 1;
                    *next.board.owner_mut(pending.to) = pending.attacker;
                    *next.board.troops_mut(pending.to) = moving.max(1);
                    *next.board.troops_mut(pending.from) -= moving.max(1);
                    next.captured_territory_this_turn = true;
                } else {
                    *next.board.troops_mut(pending.to) -= TroopCount::from(defender_losses);
                }
                next.seed = dice::next_seed(self.seed);

                if let Some(winner) = RiskGameState::check_game_over(&next.board) {
                    next.phase = Phase::GameOver { winner };
                } else {
                    next.phase = Phase::Attack;
                }
            }
            (Phase::Fortify, Action::Fortify { from, to }) => {
                ensure!(
                    self.board.territory(from).owner == self.turn_player
                        && self.board.territory(to).owner == self.turn_player
                        && self.board.are_adjacent(from, to),
                    "illegal fortify"
                );
                let moving = self.board.territory(from).troops - 1;
                *next.board.troops_mut(from) -= moving;
                *next.board.troops_mut(to) += moving;
                next = Self::end_turn(next);
            }
            (Phase::Fortify, Action::EndFortifyPhase) => {
                next = Self::end_turn(next);
            }
            _ => fail!("illegal action {:?} in phase {:?}", action, self.phase),
        }

        Ok(next)
    }

    fn apply_auto(&self) -> Result<Self> {
        self.apply(self.determine_next_action()?)
    }

    fn determine_next_action(&self) -> Result<Action> {
        let Phase::ResolvingCombat(pending) = self.phase else {
            fail!("determine_next_action called outside of a chance node");
        };
        let attacker_dice = (self.board.territory(pending.from).troops - 1).min(3) as u8;
        let defender_dice = self.board.territory(pending.to).troops.min(2) as u8;
        let (attacker_losses, defender_losses) =
            dice::resolve_round(self.seed, attacker_dice, defender_dice);
        let territory_captured = TroopCount::from(defender_losses) >= self.board.territory(pending.to).troops;
        Ok(Action::ResolveCombat { attacker_losses, defender_losses, territory_captured })
    }

    fn current_player(&self) -> PlayerId {
        match self.phase {
            Phase::ResolvingCombat(_) => CHANCE_PLAYER,
            _ => self.turn_player,
        }
    }

    fn previous_action(&self) -> Option<Action> {
        self.previous_action
    }

    fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    fn is_valid_action(&self, action: &Action) -> bool {
        self.legal_actions().map(|mut actions| actions.any(|a| a == *action)).unwrap_or(false)
    }

    fn utility_vector(&self) -> Vec<f64> {
        match self.phase {
            Phase::GameOver { winner } => {
                (0..self.num_players).map(|p| if p == winner { 1.0 } else { 0.0 }).collect()
            }
            _ => vec![0.0; self.num_players as usize],
        }
    }

    fn heuristic_vector(&self) -> Vec<f64> {
        let total = self.board.territories().len().max(1) as f64;
        (0..self.num_players)
            .map(|p| self.board.territories_owned_by(p).count() as f64 / total)
            .collect()
    }

    fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl RiskGameState {
    fn end_turn(mut state: Self) -> Self {
        if state.captured_territory_this_turn {
            state.board.cards[state.turn_player as usize] += 1;
        }
        state.captured_territory_this_turn = false;

        if let Some(winner) = RiskGameState::check_game_over(&state.board) {
            state.phase = Phase::GameOver { winner };
            return state;
        }

        state.turn_player = state.next_seated_player();
        state.reinforcements_remaining = state.compute_reinforcements(state.turn_player);
        state.phase = Phase::Reinforce;
        state
    }
}

#[cfg(test)]
mod tests {
    use game_core::game_state_node::GameStateNode;

    use super::*;
    use crate::testing::small_game;

    fn reinforce_and_end_phases(state: &RiskGameState) -> Result<RiskGameState> {
        let territory = state.board.territories_owned_by(state.turn_player).next().unwrap().id;
        let state = state.apply(Action::Reinforce(territory))?;
        let state = state.apply(Action::EndAttackPhase)?;
        state.apply(Action::EndFortifyPhase)
    }

    #[test]
    fn new_game_starts_in_reinforce_phase_with_troops_owed() {
        let state = small_game(2, 1);
        assert_eq!(state.phase, Phase::Reinforce);
        assert_eq!(state.current_player(), 0);
        assert!(state.reinforcements_remaining > 0);
    }

    #[test]
    fn turn_cycles_through_phases_and_players() -> Result<()> {
        let state = small_game(2, 1);
        let state = reinforce_and_end_phases(&state)?;
        assert_eq!(state.phase, Phase::Reinforce);
        assert_eq!(state.turn_player, 1);
        Ok(())
    }

    #[test]
    fn attack_enters_a_chance_node_resolved_deterministically() -> Result<()> {
        let state = small_game(2, 7);
        let territory = state.board.territories_owned_by(0).next().unwrap().id;
        let state = state.apply(Action::Reinforce(territory))?;
        let attacker = state.board.territories_owned_by(0).find(|t| t.troops > 1).unwrap().id;
        let defender = state.board.enemy_neighbors(attacker, 0)[0];
        let state = state.apply(Action::Attack { from: attacker, to: defender })?;
        assert!(state.is_chance_node());

        let action_a = state.determine_next_action()?;
        let action_b = state.determine_next_action()?;
        assert_eq!(action_a, action_b, "chance resolution must be a pure function of state");

        let resolved = state.apply_auto()?;
        assert_eq!(resolved.current_player(), 0);
        Ok(())
    }

    #[test]
    fn utility_vector_is_zero_until_the_game_ends() {
        let state = small_game(2, 1);
        assert_eq!(state.utility_vector(), vec![0.0, 0.0]);
    }

    #[test]
    fn state_hash_is_stable_and_sensitive_to_state() {
        let a = small_game(2, 1);
        let b = small_game(2, 1);
        assert_eq!(a.state_hash(), b.state_hash());

        let territory = a.board.territories_owned_by(0).next().unwrap().id;
        let c = a.apply(Action::Reinforce(territory)).unwrap();
        assert_ne!(a.state_hash(), c.state_hash());
    }
}
