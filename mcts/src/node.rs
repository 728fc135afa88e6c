use crate::{policies::select_by_key, scores::Scores, GameState, Move, Player, MCTS};

/// One edge of the search tree: the move that leads here from the parent
/// (absent on the root) and the statistics gathered below it.
///
/// `total_score` accumulates the outcomes seen from the point of view of the
/// player who made `action`, so it can go negative.
pub struct SearchNode<M: MCTS> {
    action: Option<Move<M>>,
    visits: u64,
    total_score: f64,
    children: Vec<SearchNode<M>>,
}

#[allow(clippy::cast_precision_loss)]
impl<M: MCTS> SearchNode<M> {
    #[must_use]
    pub fn root() -> Self {
        Self {
            action: None,
            visits: 0,
            total_score: 0.0,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn new(action: Move<M>) -> Self {
        Self {
            action: Some(action),
            ..Self::root()
        }
    }

    pub fn action(&self) -> Option<&Move<M>> {
        self.action.as_ref()
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn children(&self) -> &[SearchNode<M>] {
        &self.children
    }

    pub(crate) fn child_mut(&mut self, idx: usize) -> &mut SearchNode<M> {
        &mut self.children[idx]
    }

    pub fn child(&self, mv: &Move<M>) -> Option<&SearchNode<M>> {
        self.children
            .iter()
            .find(|child| child.action.as_ref() == Some(mv))
    }

    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_score / self.visits as f64
    }

    /// UCT bound. Unvisited nodes score infinity so every sibling is tried once
    /// before any is revisited.
    pub fn selection_score(&self, parent_visits: u64, exploration_rate: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let explore_term = ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        self.mean_score() + exploration_rate * explore_term
    }

    pub fn best_child_index(&self, exploration_rate: f64) -> Option<usize> {
        select_by_key(self.children.iter(), |child| {
            child.selection_score(self.visits, exploration_rate)
        })
        .map(|(idx, _)| idx)
    }

    pub fn best_child(&self, exploration_rate: f64) -> Option<&SearchNode<M>> {
        self.best_child_index(exploration_rate)
            .map(|idx| &self.children[idx])
    }

    /// Replaces the children with one fresh node per legal move in `state`.
    /// `state` is the position reached after this node's own action.
    pub fn expand(&mut self, state: &M::State) {
        self.children = state.legal_moves().into_iter().map(Self::new).collect();
    }

    pub fn update(&mut self, scores: &Scores<Player<M>>) {
        self.visits += 1;
        if let Some(mv) = &self.action {
            self.total_score += scores.get(M::State::player_of(mv));
        }
    }

    /// Size of the subtree rooted here, this node included.
    pub fn num_nodes(&self) -> usize {
        1 + self.children.iter().map(SearchNode::num_nodes).sum::<usize>()
    }
}
