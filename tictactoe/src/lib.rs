#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_errors_doc)]
use mcts::{policies::UCTPolicy, GameState, Manager, MCTS};
use state::{ActionList, TicTacToeState};
use ttt_types::{Action, Mark};

pub mod board;
pub mod state;

pub struct TicTacToeAI;

impl MCTS for TicTacToeAI {
    type State = TicTacToeState;
    type Select = UCTPolicy;

    fn max_playout_length(&self) -> usize {
        board::BOARD_SIZE * board::BOARD_SIZE
    }
}

impl GameState for TicTacToeState {
    type Move = Action;
    type Player = Mark;
    type MoveList = ActionList;

    const PLAYERS: &'static [Mark] = &Mark::PLAYERS;

    fn current_player(&self) -> Self::Player {
        self.player_to_move()
    }

    fn legal_moves(&self) -> Self::MoveList {
        self.legal_actions()
    }

    fn is_terminal(&self) -> bool {
        self.is_terminal()
    }

    fn score(&self, player: Self::Player) -> f64 {
        self.score(player)
    }

    fn player_of(mv: &Self::Move) -> Self::Player {
        mv.player
    }

    fn make_move(&mut self, mv: &Self::Move) {
        self.apply(mv)
            .expect("legal moves always lie on the board");
    }
}

pub type TicTacToeManager = Manager<TicTacToeAI>;

/// Search driver with the default exploration rate and a fixed rollout seed.
#[must_use]
pub fn new_manager(seed: u64) -> TicTacToeManager {
    Manager::with_seed(TicTacToeAI, UCTPolicy::default(), seed)
}
