//! Structural description of a state machine definition.
//!
//! A `Schema` holds everything about a definition except the handler
//! functions themselves: declared states and actions, the transition
//! multimap, and for each handled (state, action) pair the set of states
//! its handler may return. The registry accumulates one while validating,
//! and a finalized definition exposes it read-only.

use super::descriptor::Descriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Structural part of a state machine definition.
///
/// Maps are ordered so that serialized output and reported name lists are
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// State name -> descriptor
    pub states: BTreeMap<String, Descriptor>,

    /// Action name -> descriptor
    pub actions: BTreeMap<String, Descriptor>,

    /// Source state name -> destination state names
    #[serde(default)]
    pub transitions: BTreeMap<String, BTreeSet<String>>,

    /// State name -> action name -> declared return states
    #[serde(default)]
    pub handlers: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn has_transition(&self, source: &str, destination: &str) -> bool {
        self.transitions
            .get(source)
            .is_some_and(|destinations| destinations.contains(destination))
    }

    /// Registered destinations of `source`, empty for terminal states.
    pub fn destinations(&self, source: &str) -> impl Iterator<Item = &str> + '_ {
        self.transitions
            .get(source)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// A state is terminal when it has no outgoing transitions.
    pub fn is_terminal(&self, state: &str) -> bool {
        self.transitions
            .get(state)
            .is_none_or(|destinations| destinations.is_empty())
    }

    pub fn has_handler(&self, state: &str, action: &str) -> bool {
        self.handlers
            .get(state)
            .is_some_and(|actions| actions.contains_key(action))
    }

    /// States with at least one handler, for any action.
    pub fn handled_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers
            .iter()
            .filter(|(_, actions)| !actions.is_empty())
            .map(|(state, _)| state.as_str())
    }

    /// Whether `state` has a handler for at least one action.
    pub fn is_handled(&self, state: &str) -> bool {
        self.handlers
            .get(state)
            .is_some_and(|actions| !actions.is_empty())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a schema from JSON.
    ///
    /// Parsing performs no invariant checks; run
    /// [`audit`](crate::validation::audit) on the result.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
