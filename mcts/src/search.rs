use itertools::Itertools;
use tracing::trace;

use crate::{
    manager::SearchError, node::SearchNode, policies::RolloutRng, scores::Scores, GameState,
    Move, Player, Policy, MCTS,
};

/// Tree built for a single move decision. Nothing in it outlives the decision.
pub struct SearchTree<M: MCTS> {
    root: SearchNode<M>,
    root_state: M::State,
    iterations: u64,
}

impl<M: MCTS> SearchTree<M> {
    /// Fresh tree with the root already expanded against `state`.
    pub fn new(state: M::State) -> Result<Self, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::InvalidState);
        }
        let mut root = SearchNode::root();
        root.expand(&state);
        if !root.is_expanded() {
            return Err(SearchError::InvalidState);
        }
        Ok(Self {
            root,
            root_state: state,
            iterations: 0,
        })
    }

    /// One select/expand/rollout/backpropagate cycle from the root.
    pub fn playout(&mut self, manager: &M, policy: &M::Select, rng: &mut RolloutRng) {
        let state = self.root_state.clone();
        descend(&mut self.root, &state, manager, policy, rng);
        self.iterations += 1;
    }

    pub fn root(&self) -> &SearchNode<M> {
        &self.root
    }

    pub fn root_state(&self) -> &M::State {
        &self.root_state
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn num_nodes(&self) -> usize {
        self.root.num_nodes()
    }

    pub fn best_child<'a>(&'a self, manager: &M) -> Option<&'a SearchNode<M>> {
        manager.select_child_after_search(self.root.children())
    }

    pub fn best_move(&self, manager: &M) -> Option<Move<M>> {
        self.best_child(manager)
            .and_then(SearchNode::action)
            .cloned()
    }

    /// Line of play following the highest mean score at every level.
    pub fn pv(&self, manager: &M, num_moves: usize) -> Vec<Move<M>> {
        let mut res = Vec::new();
        let mut curr = &self.root;
        while res.len() < num_moves {
            let Some(choice) = manager.select_child_after_search(curr.children()) else {
                break;
            };
            let Some(mv) = choice.action() else {
                break;
            };
            res.push(mv.clone());
            curr = choice;
        }
        res
    }

    pub fn stats(&self) -> Vec<ComputedNodeStats<M>> {
        self.root
            .children()
            .iter()
            .filter_map(|child| {
                child.action().map(|mv| ComputedNodeStats {
                    mv: mv.clone(),
                    visits: child.visits(),
                    total_score: child.total_score(),
                    mean_score: child.mean_score(),
                })
            })
            .collect_vec()
    }
}

/// Walks one path down from `node`, where `state` is the position after
/// `node`'s action, and updates every node on the way back up.
fn descend<M: MCTS>(
    node: &mut SearchNode<M>,
    state: &M::State,
    manager: &M,
    policy: &M::Select,
    rng: &mut RolloutRng,
) -> Scores<Player<M>> {
    let scores = if node.is_expanded() || node.visits() > 0 {
        if !node.is_expanded() {
            node.expand(state);
        }
        match policy.choose(node) {
            Some(idx) => {
                let child = node.child_mut(idx);
                let next = advance(state, child.action());
                descend(child, &next, manager, policy, rng)
            }
            None => rollout(state, perspective(node, state), manager, rng),
        }
    } else {
        rollout(state, perspective(node, state), manager, rng)
    };
    node.update(&scores);
    scores
}

/// Clone of `state` with `mv` applied; an absent move leaves it unchanged.
fn advance<S: GameState>(state: &S, mv: Option<&S::Move>) -> S {
    let mut next = state.clone();
    if let Some(mv) = mv {
        next.make_move(mv);
    }
    next
}

/// The player whose move led to `node`. The root has no move, so the
/// player to move stands in.
fn perspective<M: MCTS>(node: &SearchNode<M>, state: &M::State) -> Player<M> {
    node.action()
        .map_or_else(|| state.current_player(), M::State::player_of)
}

fn rollout<M: MCTS>(
    state: &M::State,
    perspective: Player<M>,
    manager: &M,
    rng: &mut RolloutRng,
) -> Scores<Player<M>> {
    let mut current = state.clone();
    let mut length = 0;
    while !current.is_terminal() && length < manager.max_playout_length() {
        let Some(mv) = rng.select_random(current.legal_moves().into_iter()) else {
            break;
        };
        current.make_move(&mv);
        length += 1;
    }
    let score = current.score(perspective);
    trace!(?perspective, score, length, "rollout finished");
    Scores::from_outcome(perspective, score, M::State::PLAYERS)
}

#[derive(Debug)]
pub struct ComputedNodeStats<M: MCTS> {
    pub mv: Move<M>,
    pub visits: u64,
    pub total_score: f64,
    pub mean_score: f64,
}
