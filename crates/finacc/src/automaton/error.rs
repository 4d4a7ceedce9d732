//! Error types for description loading and simulation.

use thiserror::Error;

/// Errors raised while parsing a description or turning one into an engine.
///
/// These all surface before any simulation runs; a constructed automaton is
/// well-formed by definition.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// The JSON text is not a valid description (malformed JSON, or a missing
    /// required field such as `initial_state`).
    #[error("invalid description: {0}")]
    Parse(#[from] serde_json::Error),

    /// A transition key is neither the empty string (lambda) nor a single
    /// character.
    #[error("state {state:?} has a transition on {symbol:?}, which is not a single symbol")]
    InvalidSymbol {
        /// The state whose transition map holds the bad key.
        state: String,
        /// The offending key.
        symbol: String,
    },

    /// A lambda transition appeared in a deterministic description.
    #[error("state {state:?} has a lambda transition, which a deterministic automaton cannot take")]
    LambdaInDeterministic {
        /// The state with the lambda entry.
        state: String,
    },

    /// A deterministic description maps one (state, symbol) pair to more than
    /// one resulting state.
    #[error("state {state:?} has {count} successors on {symbol:?}; a deterministic automaton allows exactly one")]
    NotDeterministic {
        /// The state with the ambiguous entry.
        state: String,
        /// The symbol of the ambiguous entry.
        symbol: char,
        /// How many successors the entry listed.
        count: usize,
    },
}

/// Errors raised while walking a deterministic automaton.
///
/// The nondeterministic engine has no simulation-time errors: an unknown
/// (state, symbol) pair means "no transition" there, and the branch dies out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The current state has no successor on the input symbol. A deterministic
    /// automaton must have exactly one well-defined successor, so an undefined
    /// one signals a malformed automaton or out-of-alphabet input.
    #[error("invalid transition: state {state:?} has no successor on symbol {symbol:?}")]
    InvalidTransition {
        /// The state the walker was in.
        state: String,
        /// The input symbol with no defined successor.
        symbol: char,
    },
}
