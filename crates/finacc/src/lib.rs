//! Simulation of finite-state accepters.
//!
//! `finacc` runs deterministic and nondeterministic finite automata (the
//! latter with lambda transitions) over input strings, reporting the
//! reachable state set and acceptance. Automata are described in a small
//! JSON interchange format and are immutable once built, so simulations may
//! run in parallel over a shared automaton.
//!
//! ```
//! use finacc::automaton::{Description, Nfa};
//!
//! let desc = Description::from_json(
//!     r#"{
//!         "initial_state": "q0",
//!         "final_states": ["q1"],
//!         "transition": {
//!             "q0": { "a": "q1" },
//!             "q1": { "a": "q1", "": "q2" },
//!             "q2": { "b": "q0" }
//!         }
//!     }"#,
//! )?;
//! let nfa = Nfa::from_description(&desc)?;
//!
//! assert!(nfa.accepts("a"));
//! assert!(!nfa.accepts("ab"));
//! assert_eq!(nfa.labels(&nfa.run("a")), ["q1", "q2"]);
//! # Ok::<(), finacc::automaton::DescriptionError>(())
//! ```

pub mod automaton;
