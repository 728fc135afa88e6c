use enum_map::EnumArray;
use node::SearchNode;
use policies::select_by_key;

pub mod manager;
pub mod node;
pub mod policies;
pub mod scores;
pub mod search;

pub use manager::{Manager, SearchError};

pub trait MCTS: Sized + Sync {
    type State: GameState + Sync;
    type Select: Policy<Self> + Sync;

    /// Iterations per move decision when the caller does not pick a budget.
    fn iterations(&self) -> u64 {
        1_000
    }

    fn max_playout_length(&self) -> usize {
        1_000
    }

    /// Highest mean score wins; ties go to the child scanned first.
    fn select_child_after_search<'a>(
        &self,
        children: &'a [SearchNode<Self>],
    ) -> Option<&'a SearchNode<Self>> {
        select_by_key(children.iter(), |child| child.mean_score()).map(|(_, child)| child)
    }
}

pub type Move<M> = <<M as MCTS>::State as GameState>::Move;
pub type MoveList<M> = <<M as MCTS>::State as GameState>::MoveList;
pub type Player<M> = <<M as MCTS>::State as GameState>::Player;

pub trait GameState: Clone {
    type Move: Sync + Send + Clone + PartialEq + std::fmt::Debug;
    type Player: Sync
        + Send
        + Copy
        + PartialEq
        + std::fmt::Debug
        + EnumArray<Option<f64>>
        + 'static;
    type MoveList: std::iter::IntoIterator<Item = Self::Move> + Clone;

    /// Every player that can score. Used to hand out penalties on a win.
    const PLAYERS: &'static [Self::Player];

    fn current_player(&self) -> Self::Player;
    /// Empty once the state is terminal.
    fn legal_moves(&self) -> Self::MoveList;
    fn is_terminal(&self) -> bool;
    /// 1.0 for a win, 0.5 for a draw, 0.0 for a loss or a position still in play.
    fn score(&self, player: Self::Player) -> f64;
    fn player_of(mv: &Self::Move) -> Self::Player;
    /// Only ever called with moves returned by `legal_moves`.
    fn make_move(&mut self, mv: &Self::Move);
}

pub trait Policy<M: MCTS<Select = Self>>: Sync + Sized {
    /// Index of the child to descend into, `None` if `node` has no children.
    fn choose(&self, node: &SearchNode<M>) -> Option<usize>;
}

#[cfg(test)]
mod test_game;
