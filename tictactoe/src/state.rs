use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use ttt_types::{Action, Mark};

use crate::board::{Board, BoardError, BOARD_SIZE};

pub type ActionList = SmallVec<Action, { BOARD_SIZE * BOARD_SIZE }>;

/// A board snapshot together with the player to move. Transitions never touch
/// the board they start from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicTacToeState {
    board: Board,
    player: Mark,
}

impl TicTacToeState {
    #[must_use]
    pub fn new(board: Board, player: Mark) -> Self {
        Self { board, player }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player_to_move(&self) -> Mark {
        self.player
    }

    /// One action per open cell for the player to move, empty once the game
    /// is over.
    #[must_use]
    pub fn legal_actions(&self) -> ActionList {
        if self.is_terminal() {
            return ActionList::new();
        }
        self.board
            .open_positions()
            .into_iter()
            .map(|pos| Action::new(pos, self.player))
            .collect()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.board.is_full() || self.board.winner().is_some()
    }

    /// 1.0 if `player` owns a line, 0.0 if any other player does, 0.5 for a
    /// drawn full board and 0.0 while the game is still open.
    #[must_use]
    pub fn score(&self, player: Mark) -> f64 {
        if self.board.has_win_anywhere(player) {
            return 1.0;
        }
        let other_won = Mark::PLAYERS
            .into_iter()
            .filter(|&other| other != player)
            .any(|other| self.board.has_win_anywhere(other));
        if other_won {
            0.0
        } else if self.board.is_full() {
            0.5
        } else {
            0.0
        }
    }

    /// New state with `action` applied and the turn passed to the player after
    /// `action.player`. `None` yields an unchanged copy.
    pub fn successor(&self, action: Option<&Action>) -> Result<Self, BoardError> {
        let mut next = self.clone();
        if let Some(action) = action {
            next.apply(action)?;
        }
        Ok(next)
    }

    pub(crate) fn apply(&mut self, action: &Action) -> Result<(), BoardError> {
        self.board.place(action.position, action.player)?;
        self.player = action.player.next();
        Ok(())
    }
}
