//! The deterministic accepter walker.
//!
//! A degenerate case of the same data model as [`Nfa`](crate::automaton::Nfa):
//! the working value is a single current state instead of a state set, there
//! are no lambda transitions, and an undefined successor is a hard error
//! rather than a dead branch.

use indexmap::IndexSet;
use std::collections::HashMap;

use crate::automaton::description::{parse_symbol_key, Description};
use crate::automaton::error::{DescriptionError, SimulationError};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;

/// A deterministic finite accepter.
///
/// Immutable once constructed; each run is an independent pure computation.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// Interned state labels; the position of a label is its `StateId`.
    states: IndexSet<String>,
    /// Interned input symbols.
    symbols: IndexSet<char>,
    /// The state a walk starts from.
    initial: StateId,
    /// Accepting states.
    final_states: StateSet,
    /// Transitions: (source, symbol) -> the single successor.
    transitions: HashMap<(StateId, SymbolId), StateId>,
}

impl Dfa {
    /// Build a walker from a parsed description.
    ///
    /// The description must be deterministic: no lambda entries, and at most
    /// one resulting state per (state, symbol). Entries with zero resulting
    /// states (`null`, `[]`) are dropped — they are equivalent to the entry
    /// being absent, and walking into one raises
    /// [`SimulationError::InvalidTransition`] at simulation time.
    pub fn from_description(desc: &Description) -> Result<Self, DescriptionError> {
        let mut states: IndexSet<String> = IndexSet::new();
        states.insert(desc.initial_state.clone());
        for label in &desc.final_states {
            states.insert(label.clone());
        }
        for (source, moves) in &desc.transition {
            states.insert(source.clone());
            for spec in moves.values() {
                for target in spec.states() {
                    states.insert(target.clone());
                }
            }
        }

        let mut symbols: IndexSet<char> = IndexSet::new();
        let mut transitions: HashMap<(StateId, SymbolId), StateId> = HashMap::new();
        for (source, moves) in &desc.transition {
            let source_id = states.get_index_of(source.as_str()).unwrap() as StateId;
            for (key, spec) in moves {
                let symbol = parse_symbol_key(source, key)?.ok_or_else(|| {
                    DescriptionError::LambdaInDeterministic {
                        state: source.clone(),
                    }
                })?;
                let targets = spec.states();
                match targets {
                    [] => {}
                    [target] => {
                        let symbol_id = symbols.insert_full(symbol).0 as SymbolId;
                        let target_id =
                            states.get_index_of(target.as_str()).unwrap() as StateId;
                        transitions.insert((source_id, symbol_id), target_id);
                    }
                    _ => {
                        return Err(DescriptionError::NotDeterministic {
                            state: source.clone(),
                            symbol,
                            count: targets.len(),
                        });
                    }
                }
            }
        }

        let initial = states.get_index_of(desc.initial_state.as_str()).unwrap() as StateId;
        let final_states = desc
            .final_states
            .iter()
            .map(|label| states.get_index_of(label.as_str()).unwrap() as StateId)
            .collect();

        Ok(Self {
            states,
            symbols,
            initial,
            final_states,
            transitions,
        })
    }

    /// The single successor of `state` on `symbol`.
    ///
    /// An unknown (state, symbol) pair is a fatal condition for the run: a
    /// deterministic automaton has at most one well-defined successor, so an
    /// undefined one is reported as an error naming the offending pair.
    pub fn step(&self, state: StateId, symbol: char) -> Result<StateId, SimulationError> {
        self.symbols
            .get_index_of(&symbol)
            .and_then(|id| self.transitions.get(&(state, id as SymbolId)))
            .copied()
            .ok_or_else(|| SimulationError::InvalidTransition {
                state: self.states[state as usize].clone(),
                symbol,
            })
    }

    /// Walk the whole of `input` from the initial state, returning the final
    /// state.
    pub fn run(&self, input: &str) -> Result<StateId, SimulationError> {
        let mut state = self.initial;
        for symbol in input.chars() {
            state = self.step(state, symbol)?;
        }
        Ok(state)
    }

    /// Walk `input` and return every visited state label in order, the
    /// initial state included.
    pub fn trace(&self, input: &str) -> Result<Vec<&str>, SimulationError> {
        let mut state = self.initial;
        let mut visited = Vec::with_capacity(input.len() + 1);
        visited.push(self.states[state as usize].as_str());
        for symbol in input.chars() {
            state = self.step(state, symbol)?;
            visited.push(self.states[state as usize].as_str());
        }
        Ok(visited)
    }

    /// Whether the automaton accepts `input`: true iff the walk ends in an
    /// accepting state.
    pub fn accepts(&self, input: &str) -> Result<bool, SimulationError> {
        Ok(self.final_states.contains(self.run(input)?))
    }

    /// Label of the initial state.
    pub fn initial_state(&self) -> &str {
        &self.states[self.initial as usize]
    }

    /// Label of a state id, if the id belongs to this automaton.
    pub fn state_label(&self, state: StateId) -> Option<&str> {
        self.states.get_index(state as usize).map(String::as_str)
    }

    /// Number of distinct states named anywhere in the description.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }
}
