use rand::{seq::IteratorRandom, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::{node::SearchNode, Policy, MCTS};

/// Upper confidence bound selection with the given exploration rate.
#[derive(Debug, Clone)]
pub struct UCTPolicy(pub f64);

impl Default for UCTPolicy {
    fn default() -> Self {
        Self(2.0)
    }
}

impl<M: MCTS<Select = Self>> Policy<M> for UCTPolicy {
    fn choose(&self, node: &SearchNode<M>) -> Option<usize> {
        node.best_child_index(self.0)
    }
}

/// Source of randomness for rollouts.
#[derive(Clone)]
pub struct RolloutRng {
    rng: XorShiftRng,
}

impl RolloutRng {
    pub const DEFAULT_SEED: u64 = 1337;

    #[must_use]
    pub fn new() -> Self {
        Self::from_seed(Self::DEFAULT_SEED)
    }

    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let rng = SeedableRng::seed_from_u64(seed);
        Self { rng }
    }

    pub fn select_random<T, Iter>(&mut self, elts: Iter) -> Option<T>
    where
        Iter: Iterator<Item = T>,
    {
        elts.choose(&mut self.rng)
    }
}

impl Default for RolloutRng {
    fn default() -> Self {
        Self::new()
    }
}

/// Arg-max over `elts`. Ties keep the element scanned first.
pub fn select_by_key<T, Iter, KeyFn>(elts: Iter, mut key_fn: KeyFn) -> Option<(usize, T)>
where
    Iter: Iterator<Item = T>,
    KeyFn: FnMut(&T) -> f64,
{
    let mut choice = None;
    let mut best_so_far = f64::NEG_INFINITY;
    for (idx, elt) in elts.enumerate() {
        let score = key_fn(&elt);
        if choice.is_none() || score > best_so_far {
            choice = Some((idx, elt));
            best_so_far = score;
        }
    }
    choice
}
