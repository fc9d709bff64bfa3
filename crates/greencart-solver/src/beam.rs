//! Bounded beam of basket states

use crate::state::BasketState;

/// A bounded multiset of basket states, kept sorted ascending by score.
///
/// The beam is never empty: it is initialized with the root state and
/// merging always retains the K best of (current states ∪ successors).
/// No state is privileged: the unmodified original is dropped like any
/// other once K better states exist.
#[derive(Debug)]
pub struct Beam {
    states: Vec<BasketState>,
    width: usize,
}

impl Beam {
    /// Creates a beam of the given width holding only the root state.
    pub fn new(width: usize, root: BasketState) -> Self {
        Beam {
            states: vec![root],
            width: width.max(1),
        }
    }

    /// Current states, best (lowest score) first.
    #[inline]
    pub fn states(&self) -> &[BasketState] {
        &self.states
    }

    /// Number of retained states.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The lowest-scoring state.
    pub fn best(&self) -> &BasketState {
        &self.states[0]
    }

    /// Merges successors into the beam and prunes back to the width.
    ///
    /// The sort is stable, so ties resolve in insertion order (current
    /// states before successors) and the search stays deterministic.
    pub fn merge_and_prune(&mut self, successors: Vec<BasketState>) {
        self.states.extend(successors);
        self.states
            .sort_by(|a, b| a.score().total_cmp(&b.score()));
        self.states.truncate(self.width);
    }

    /// Consumes the beam, yielding the best state.
    pub fn into_best(mut self) -> BasketState {
        self.states.swap_remove(0)
    }
}
