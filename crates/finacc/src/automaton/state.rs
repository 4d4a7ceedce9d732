//! State identifiers and state sets.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier. Labels from a description are interned to dense ids
/// at construction; `StateId`s are only meaningful for the automaton that
/// produced them.
pub type StateId = u32;

/// A set of states backed by a bit set.
///
/// This is the working value of the nondeterministic engine: unordered,
/// deduplicated, created fresh per simulation call.
#[derive(Clone)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create an empty set sized for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, growing the set if needed.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Whether the set contains `state`.
    pub fn contains(&self, state: StateId) -> bool {
        (state as usize) < self.bits.len() && self.bits.contains(state as usize)
    }

    /// Whether the set contains no states.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the states in the set, in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Add every state of `other` to this set.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// The states of this set that are not in `other`.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    /// Whether this set shares at least one state with `other`.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }
}

// Capacities of independently built sets differ, so equality must compare
// membership, not the underlying bit storage.
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::with_capacity(0);
        for state in iter {
            set.insert(state);
        }
        set
    }
}
