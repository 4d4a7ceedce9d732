//! The nondeterministic accepter engine.
//!
//! Simulation is subset-style: the working value is a [`StateSet`] of every
//! state the automaton could currently be in, and the extended transition
//! function interleaves a lambda closure after every consumed symbol. No
//! subset-construction DFA is ever materialized.

use indexmap::IndexSet;
use std::collections::{HashMap, VecDeque};

use crate::automaton::description::{parse_symbol_key, Description};
use crate::automaton::error::DescriptionError;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{SymbolId, LAMBDA};

/// A nondeterministic finite accepter with lambda transitions.
///
/// Immutable once constructed; every simulation operation is a pure function
/// of the automaton and its arguments, so simulations over a shared `Nfa` may
/// run in parallel without coordination.
#[derive(Debug, Clone)]
pub struct Nfa {
    /// Interned state labels; the position of a label is its `StateId`.
    states: IndexSet<String>,
    /// Interned input symbols; the position of a symbol is its `SymbolId`.
    symbols: IndexSet<char>,
    /// The state simulation starts from.
    initial: StateId,
    /// Accepting states.
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destinations. Lambda transitions are
    /// keyed on `LAMBDA`. Absent entries mean "no transition".
    transitions: HashMap<(StateId, SymbolId), StateSet>,
}

impl Nfa {
    /// Build an engine from a parsed description, interning state labels and
    /// input symbols to dense ids.
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
        let universe = states.len();

        let mut symbols: IndexSet<char> = IndexSet::new();
        let mut transitions: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
        for (source, moves) in &desc.transition {
            let source_id = states.get_index_of(source.as_str()).unwrap() as StateId;
            for (key, spec) in moves {
                let symbol_id = match parse_symbol_key(source, key)? {
                    Some(symbol) => symbols.insert_full(symbol).0 as SymbolId,
                    None => LAMBDA,
                };
                let targets = spec.states();
                if targets.is_empty() {
                    // null, [], and a missing key are all "no transition".
                    continue;
                }
                let entry = transitions
                    .entry((source_id, symbol_id))
                    .or_insert_with(|| StateSet::with_capacity(universe));
                for target in targets {
                    entry.insert(states.get_index_of(target.as_str()).unwrap() as StateId);
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

    /// Apply one transition step to every member of `states`.
    ///
    /// Returns the plain union of the relation entries for (member, `symbol`);
    /// no lambda closure is applied here. Unknown pairs contribute nothing —
    /// there is no error condition.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }
        reached
    }

    /// The smallest superset of `states` closed under lambda moves.
    ///
    /// Fixed-point iteration over a frontier of newly discovered states; the
    /// frontier is pruned against the accumulated result each round, so the
    /// loop terminates even on lambda cycles.
    pub fn lambda_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut frontier = states.clone();
        while !frontier.is_empty() {
            closure.union_with(&frontier);
            frontier = self.move_on_symbol(&frontier, LAMBDA).difference(&closure);
        }
        closure
    }

    /// The extended transition function: every state reachable from `states`
    /// after consuming the whole of `input`.
    ///
    /// Starts from the lambda closure of `states`, then alternates move and
    /// closure per input character, so lambda transitions that only become
    /// reachable after a consumed symbol are included before the next one.
    /// A character outside the alphabet kills every branch, which is a normal
    /// outcome (the empty set), not an error.
    pub fn delta_star(&self, states: &StateSet, input: &str) -> StateSet {
        let mut current = self.lambda_closure(states);
        for symbol in input.chars() {
            // Every branch has died out; no symbol can revive any.
            if current.is_empty() {
                break;
            }
            let reached = match self.symbol_id(symbol) {
                Some(id) => self.move_on_symbol(&current, id),
                None => StateSet::with_capacity(self.states.len()),
            };
            current = self.lambda_closure(&reached);
        }
        current
    }

    /// Run the automaton from its initial state over `input`, returning the
    /// final reachable state set (possibly empty).
    pub fn run(&self, input: &str) -> StateSet {
        let start = StateSet::singleton(self.initial, self.states.len());
        self.delta_star(&start, input)
    }

    /// Whether the automaton accepts `input`: true iff some reachable state
    /// after the whole input is an accepting state.
    pub fn accepts(&self, input: &str) -> bool {
        self.run(input).intersects(&self.final_states)
    }

    /// Whether the automaton's language is empty, i.e. no input at all reaches
    /// an accepting state. BFS over per-symbol moves and their closures.
    pub fn is_empty(&self) -> bool {
        let start = StateSet::singleton(self.initial, self.states.len());
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue: VecDeque<StateId> = self.lambda_closure(&start).iter().collect();

        while let Some(state) = queue.pop_front() {
            if visited.contains(state) {
                continue;
            }
            visited.insert(state);

            if self.final_states.contains(state) {
                return false;
            }

            for symbol in 0..self.symbols.len() as SymbolId {
                if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                    for next in self.lambda_closure(destinations).iter() {
                        if !visited.contains(next) {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        true
    }

    /// Number of distinct states named anywhere in the description.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Label of the initial state.
    pub fn initial_state(&self) -> &str {
        &self.states[self.initial as usize]
    }

    /// The accepting-state set.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// The input alphabet, excluding lambda.
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    /// Id of a state label, if the label occurs in this automaton.
    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.states.get_index_of(label).map(|idx| idx as StateId)
    }

    /// Id of an input symbol, if it occurs in this automaton's alphabet.
    pub fn symbol_id(&self, symbol: char) -> Option<SymbolId> {
        self.symbols.get_index_of(&symbol).map(|idx| idx as SymbolId)
    }

    /// Label of a state id, if the id belongs to this automaton.
    pub fn state_label(&self, state: StateId) -> Option<&str> {
        self.states.get_index(state as usize).map(String::as_str)
    }

    /// Labels of a state set, sorted for stable display.
    pub fn labels(&self, states: &StateSet) -> Vec<&str> {
        let mut labels: Vec<&str> = states
            .iter()
            .filter_map(|state| self.state_label(state))
            .collect();
        labels.sort_unstable();
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_nfa() -> Nfa {
        // q0 -a-> q1(final), q1 -a-> q1, q1 -λ-> q2, q2 -b-> q0
        let desc = Description::from_json(
            r#"{
                "initial_state": "q0",
                "final_states": ["q1"],
                "transition": {
                    "q0": { "a": "q1" },
                    "q1": { "a": "q1", "": "q2" },
                    "q2": { "b": "q0" }
                }
            }"#,
        )
        .unwrap();
        Nfa::from_description(&desc).unwrap()
    }

    fn set(nfa: &Nfa, labels: &[&str]) -> StateSet {
        labels
            .iter()
            .map(|label| nfa.state_id(label).unwrap())
            .collect()
    }

    #[test]
    fn move_unions_over_members() {
        let desc = Description::from_json(
            r#"{
                "initial_state": "q0",
                "final_states": [],
                "transition": {
                    "q0": { "a": ["q1", "q2"] },
                    "q1": { "a": "q3" }
                }
            }"#,
        )
        .unwrap();
        let nfa = Nfa::from_description(&desc).unwrap();

        let a = nfa.symbol_id('a').unwrap();
        let from_both = nfa.move_on_symbol(&set(&nfa, &["q0", "q1"]), a);
        assert_eq!(from_both, set(&nfa, &["q1", "q2", "q3"]));

        // Unknown (state, symbol) pairs are "no transition", not a failure.
        let stuck = nfa.move_on_symbol(&set(&nfa, &["q3"]), a);
        assert!(stuck.is_empty());
    }

    #[test]
    fn closure_includes_start_and_lambda_reachable() {
        let nfa = spec_nfa();
        assert_eq!(
            nfa.lambda_closure(&set(&nfa, &["q1"])),
            set(&nfa, &["q1", "q2"])
        );
        // q0 has no lambda moves: closure is the identity.
        assert_eq!(nfa.lambda_closure(&set(&nfa, &["q0"])), set(&nfa, &["q0"]));
    }

    #[test]
    fn closure_terminates_on_lambda_cycle() {
        let desc = Description::from_json(
            r#"{
                "initial_state": "q0",
                "final_states": [],
                "transition": {
                    "q0": { "": "q1" },
                    "q1": { "": "q0" }
                }
            }"#,
        )
        .unwrap();
        let nfa = Nfa::from_description(&desc).unwrap();
        assert_eq!(
            nfa.lambda_closure(&set(&nfa, &["q0"])),
            set(&nfa, &["q0", "q1"])
        );
    }

    #[test]
    fn accepts_single_a() {
        let nfa = spec_nfa();
        assert_eq!(nfa.run("a"), set(&nfa, &["q1", "q2"]));
        assert!(nfa.accepts("a"));
    }

    #[test]
    fn rejects_ab() {
        // After "ab" only q0 is reachable (q1 -λ-> q2 -b-> q0), and q0 is not
        // accepting.
        let nfa = spec_nfa();
        assert_eq!(nfa.run("ab"), set(&nfa, &["q0"]));
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn empty_input_is_closure_of_initial() {
        let nfa = spec_nfa();
        assert_eq!(nfa.run(""), set(&nfa, &["q0"]));
        assert!(!nfa.accepts(""));
    }

    #[test]
    fn out_of_alphabet_symbol_kills_all_branches() {
        let nfa = spec_nfa();
        assert!(nfa.run("az").is_empty());
        assert!(!nfa.accepts("az"));
    }

    #[test]
    fn initial_state_may_lack_transitions() {
        let desc = Description::from_json(
            r#"{
                "initial_state": "start",
                "final_states": ["start"],
                "transition": {}
            }"#,
        )
        .unwrap();
        let nfa = Nfa::from_description(&desc).unwrap();
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("a"));
    }

    #[test]
    fn language_emptiness() {
        let nfa = spec_nfa();
        assert!(!nfa.is_empty());

        // Accepting state exists but is unreachable.
        let desc = Description::from_json(
            r#"{
                "initial_state": "q0",
                "final_states": ["q9"],
                "transition": {
                    "q0": { "a": "q0" }
                }
            }"#,
        )
        .unwrap();
        let unreachable = Nfa::from_description(&desc).unwrap();
        assert!(unreachable.is_empty());

        // Accepting state reachable only through a lambda chain.
        let desc = Description::from_json(
            r#"{
                "initial_state": "q0",
                "final_states": ["q2"],
                "transition": {
                    "q0": { "a": "q1" },
                    "q1": { "": "q2" }
                }
            }"#,
        )
        .unwrap();
        let via_lambda = Nfa::from_description(&desc).unwrap();
        assert!(!via_lambda.is_empty());
    }

    #[test]
    fn labels_are_sorted_for_display() {
        let nfa = spec_nfa();
        let reached = nfa.run("aa");
        assert_eq!(nfa.labels(&reached), ["q1", "q2"]);
        assert_eq!(nfa.initial_state(), "q0");
        assert_eq!(nfa.num_states(), 3);
    }

    #[test]
    fn alphabet_excludes_lambda() {
        let nfa = spec_nfa();
        let mut alphabet: Vec<char> = nfa.alphabet().collect();
        alphabet.sort_unstable();
        assert_eq!(alphabet, ['a', 'b']);
    }
}
