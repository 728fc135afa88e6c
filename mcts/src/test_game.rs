//! Take-away game used to exercise the search: players alternately remove one
//! or two stones, whoever takes the last stone wins.

use enum_map::Enum;

use crate::{policies::UCTPolicy, GameState, MCTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Take(pub u8, pub Seat);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    pub stones: u8,
    pub to_move: Seat,
}

impl Nim {
    pub fn new(stones: u8, to_move: Seat) -> Self {
        Self { stones, to_move }
    }
}

impl GameState for Nim {
    type Move = Take;
    type Player = Seat;
    type MoveList = Vec<Take>;

    const PLAYERS: &'static [Seat] = &[Seat::First, Seat::Second];

    fn current_player(&self) -> Seat {
        self.to_move
    }

    fn legal_moves(&self) -> Vec<Take> {
        (1..=self.stones.min(2))
            .map(|n| Take(n, self.to_move))
            .collect()
    }

    fn is_terminal(&self) -> bool {
        self.stones == 0
    }

    fn score(&self, player: Seat) -> f64 {
        if self.stones > 0 {
            0.0
        } else if player == self.to_move.other() {
            1.0
        } else {
            0.0
        }
    }

    fn player_of(mv: &Take) -> Seat {
        mv.1
    }

    fn make_move(&mut self, mv: &Take) {
        self.stones -= mv.0;
        self.to_move = mv.1.other();
    }
}

pub struct NimAI;

impl MCTS for NimAI {
    type State = Nim;
    type Select = UCTPolicy;
}
