use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::{policies::RolloutRng, search::SearchTree, Move, MCTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("cannot search from a terminal state: there are no legal moves")]
    InvalidState,
}

/// Entry point for move decisions. Every decision builds and drops its own
/// tree; only the rollout RNG carries over between calls.
pub struct Manager<M: MCTS> {
    mcts: M,
    policy: M::Select,
    rng: RolloutRng,
}

impl<M: MCTS> Manager<M> {
    pub fn new(mcts: M, policy: M::Select) -> Self {
        Self {
            mcts,
            policy,
            rng: RolloutRng::new(),
        }
    }

    pub fn with_seed(mcts: M, policy: M::Select, seed: u64) -> Self {
        Self {
            mcts,
            policy,
            rng: RolloutRng::from_seed(seed),
        }
    }

    pub fn spec(&self) -> &M {
        &self.mcts
    }

    pub fn policy(&self) -> &M::Select {
        &self.policy
    }

    /// Runs `iterations` playouts from `state` and hands back the tree.
    pub fn search(
        &mut self,
        state: &M::State,
        iterations: u64,
    ) -> Result<SearchTree<M>, SearchError> {
        run_search(&self.mcts, &self.policy, &mut self.rng, state, iterations)
    }

    /// Best move after the default number of iterations.
    pub fn choose_move(&mut self, state: &M::State) -> Result<Move<M>, SearchError> {
        let iterations = self.mcts.iterations();
        self.choose_move_with(state, iterations)
    }

    pub fn choose_move_with(
        &mut self,
        state: &M::State,
        iterations: u64,
    ) -> Result<Move<M>, SearchError> {
        let tree = self.search(state, iterations)?;
        pick_move(&self.mcts, &tree)
    }

    /// Independent decisions for unrelated states, searched in parallel.
    /// Decision `i` rolls out with seed `seed + i`, so results do not depend
    /// on scheduling.
    pub fn choose_moves_parallel(
        &self,
        states: &[M::State],
        iterations: u64,
        seed: u64,
    ) -> Vec<Result<Move<M>, SearchError>> {
        states
            .par_iter()
            .enumerate()
            .map(|(idx, state)| {
                let mut rng = RolloutRng::from_seed(seed.wrapping_add(idx as u64));
                let tree = run_search(&self.mcts, &self.policy, &mut rng, state, iterations)?;
                pick_move(&self.mcts, &tree)
            })
            .collect()
    }
}

fn run_search<M: MCTS>(
    mcts: &M,
    policy: &M::Select,
    rng: &mut RolloutRng,
    state: &M::State,
    iterations: u64,
) -> Result<SearchTree<M>, SearchError> {
    let mut tree = SearchTree::new(state.clone())?;
    for _ in 0..iterations {
        tree.playout(mcts, policy, rng);
    }
    debug!(
        iterations = tree.iterations(),
        nodes = tree.num_nodes(),
        "search finished"
    );
    Ok(tree)
}

fn pick_move<M: MCTS>(mcts: &M, tree: &SearchTree<M>) -> Result<Move<M>, SearchError> {
    let best = tree
        .best_child(mcts)
        .ok_or(SearchError::InvalidState)?;
    let mv = best.action().cloned().ok_or(SearchError::InvalidState)?;
    debug!(?mv, mean = best.mean_score(), visits = best.visits(), "selected move");
    Ok(mv)
}
