//! Finite-state accepter engines.
//!
//! This module provides the crate's whole surface:
//! - a nondeterministic accepter with lambda transitions ([`Nfa`]), simulated
//!   subset-style via lambda closure, multi-state move, and the extended
//!   transition function;
//! - a deterministic walker ([`Dfa`]) over the same data model;
//! - the JSON interchange format both are constructed from ([`Description`]).

mod description;
mod dfa;
mod error;
mod nfa;
mod state;
mod symbol;

pub use description::{Description, TargetSpec};
pub use dfa::Dfa;
pub use error::{DescriptionError, SimulationError};
pub use nfa::Nfa;
pub use state::{StateId, StateSet};
pub use symbol::{is_lambda, SymbolId, LAMBDA};
