//! The JSON interchange format for automaton descriptions.
//!
//! A description looks like:
//!
//! ```json
//! {
//!   "initial_state": "q0",
//!   "final_states": ["q1"],
//!   "transition": {
//!     "q0": { "a": "q1" },
//!     "q1": { "a": "q1", "": "q2" },
//!     "q2": { "b": "q0" }
//!   }
//! }
//! ```
//!
//! The empty-string symbol denotes a lambda transition. A transition result
//! may be a single state (string), a set of states (array), or no state at
//! all (`null`, `[]`, or simply no entry for the symbol) — all three empty
//! spellings are equivalent, and the equivalence is resolved here, once, so
//! the engines never branch on value shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::slice;

use crate::automaton::error::DescriptionError;

/// A parsed automaton description, the construction input for both
/// [`Nfa`](crate::automaton::Nfa) and [`Dfa`](crate::automaton::Dfa).
///
/// Maps keep description order, so interned state ids are deterministic for a
/// given description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    /// Label of the state the automaton starts in.
    pub initial_state: String,
    /// Labels of the accepting states. May be empty, and may name states that
    /// are unreachable or absent from the transition relation.
    pub final_states: Vec<String>,
    /// State label to symbol to resulting states.
    pub transition: IndexMap<String, IndexMap<String, TargetSpec>>,
}

/// The resulting states of one transition entry, in any of the spellings the
/// format allows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSpec {
    /// Exactly one resulting state.
    One(String),
    /// Zero or more resulting states.
    Many(Vec<String>),
    /// Explicit "no transition" (JSON `null`).
    None,
}

impl TargetSpec {
    /// Normalize to a list of resulting state labels.
    pub fn states(&self) -> &[String] {
        match self {
            TargetSpec::One(state) => slice::from_ref(state),
            TargetSpec::Many(states) => states,
            TargetSpec::None => &[],
        }
    }
}

impl Description {
    /// Parse a description from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a description from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize back to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Interpret a transition key: the empty string is a lambda, anything else
/// must be exactly one character.
pub(crate) fn parse_symbol_key(
    state: &str,
    key: &str,
) -> Result<Option<char>, DescriptionError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(symbol), None) => Ok(Some(symbol)),
        _ => Err(DescriptionError::InvalidSymbol {
            state: state.to_owned(),
            symbol: key.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_target_shapes() {
        let desc = Description::from_json(
            r#"{
                "initial_state": "q0",
                "final_states": [],
                "transition": {
                    "q0": {
                        "": "q1",
                        "a": ["q0", "q1"],
                        "b": null,
                        "c": []
                    }
                }
            }"#,
        )
        .unwrap();

        let moves = &desc.transition["q0"];
        assert_eq!(moves[""].states(), ["q1"]);
        assert_eq!(moves["a"].states(), ["q0", "q1"]);
        assert!(moves["b"].states().is_empty());
        assert!(moves["c"].states().is_empty());
        assert!(!moves.contains_key("d"));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let err = Description::from_json(r#"{ "initial_state": "q0", "transition": {} }"#)
            .unwrap_err();
        assert!(matches!(err, DescriptionError::Parse(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Description::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DescriptionError::Parse(_)));
    }

    #[test]
    fn symbol_keys() {
        assert_eq!(parse_symbol_key("q0", "").unwrap(), None);
        assert_eq!(parse_symbol_key("q0", "a").unwrap(), Some('a'));
        assert!(matches!(
            parse_symbol_key("q0", "ab").unwrap_err(),
            DescriptionError::InvalidSymbol { ref state, ref symbol }
                if state == "q0" && symbol == "ab"
        ));
    }

    #[test]
    fn reads_from_a_reader() {
        let bytes: &[u8] = br#"{
            "initial_state": "q0",
            "final_states": [],
            "transition": { "q0": { "a": "q0" } }
        }"#;
        let desc = Description::from_reader(bytes).unwrap();
        assert_eq!(desc.initial_state, "q0");
        assert_eq!(desc.transition["q0"]["a"].states(), ["q0"]);
    }

    #[test]
    fn round_trips_through_json() {
        let text = r#"{
            "initial_state": "q0",
            "final_states": ["q1"],
            "transition": {
                "q0": { "a": "q1" },
                "q1": { "a": "q1", "": "q2" },
                "q2": { "b": "q0" }
            }
        }"#;
        let desc = Description::from_json(text).unwrap();
        let rebuilt = Description::from_json(&desc.to_json().unwrap()).unwrap();
        assert_eq!(rebuilt.initial_state, "q0");
        assert_eq!(rebuilt.final_states, ["q1"]);
        assert_eq!(rebuilt.transition["q1"][""].states(), ["q2"]);
    }
}
