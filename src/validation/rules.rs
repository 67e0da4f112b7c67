//! Individual consistency rules over a [`Schema`].
//!
//! Registration rules return `Result` and stop at the first failure, since a
//! single declaration has a single cause. Whole-schema rules return
//! `Validation` so every offender is reported together.

use crate::builder::{HandlerPolicy, RegistryError};
use crate::core::{Descriptor, Schema};
use std::collections::{BTreeMap, BTreeSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Accumulating result of a whole-schema rule.
pub type Checked<E> = Validation<(), NonEmptyVec<E>>;

/// Lift a single-cause rule into an accumulating check.
pub fn lift(result: Result<(), RegistryError>) -> Checked<RegistryError> {
    match result {
        Ok(()) => Validation::success(()),
        Err(error) => Validation::fail(error),
    }
}

/// State names are unique.
pub fn state_is_new(schema: &Schema, name: &str) -> Result<(), RegistryError> {
    if schema.has_state(name) {
        return Err(RegistryError::DuplicateState {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Action names are unique.
pub fn action_is_new(schema: &Schema, name: &str) -> Result<(), RegistryError> {
    if schema.has_action(name) {
        return Err(RegistryError::DuplicateAction {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A referenced state was declared.
pub fn state_is_declared(schema: &Schema, name: &str) -> Result<(), RegistryError> {
    if !schema.has_state(name) {
        return Err(RegistryError::UnknownState {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A referenced action was declared.
pub fn action_is_declared(schema: &Schema, name: &str) -> Result<(), RegistryError> {
    if !schema.has_action(name) {
        return Err(RegistryError::UnknownAction {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A transition pair is registered at most once.
pub fn transition_is_new(schema: &Schema, from: &str, to: &str) -> Result<(), RegistryError> {
    if schema.has_transition(from, to) {
        return Err(RegistryError::DuplicateTransition {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(())
}

/// Terminal states have no destinations, so a handler there could never
/// return a legal next state.
pub fn state_is_non_terminal(
    schema: &Schema,
    state: &str,
    action: &str,
) -> Result<(), RegistryError> {
    if schema.is_terminal(state) {
        return Err(RegistryError::TerminalState {
            state: state.to_string(),
            action: action.to_string(),
        });
    }
    Ok(())
}

/// A handler must be able to return at least one state.
pub fn returns_are_declared(
    state: &str,
    action: &str,
    returns: &BTreeSet<String>,
) -> Result<(), RegistryError> {
    if returns.is_empty() {
        return Err(RegistryError::NoReturnStates {
            state: state.to_string(),
            action: action.to_string(),
        });
    }
    Ok(())
}

/// A possible return state is a registered destination of `state`.
pub fn return_is_transition(
    schema: &Schema,
    state: &str,
    action: &str,
    destination: &str,
) -> Result<(), RegistryError> {
    if !schema.has_transition(state, destination) {
        return Err(RegistryError::UndeclaredReturn {
            state: state.to_string(),
            action: action.to_string(),
            destination: destination.to_string(),
        });
    }
    Ok(())
}

/// Every possible return path is a registered transition. Reports the first
/// one that is not.
pub fn returns_are_transitions(
    schema: &Schema,
    state: &str,
    action: &str,
    returns: &BTreeSet<String>,
) -> Result<(), RegistryError> {
    returns_are_declared(state, action, returns)?;
    returns
        .iter()
        .try_for_each(|destination| return_is_transition(schema, state, action, destination))
}

/// Duplicate (state, action) handlers, subject to the configured policy.
pub fn handler_is_new(
    schema: &Schema,
    state: &str,
    action: &str,
    policy: HandlerPolicy,
) -> Result<(), RegistryError> {
    match policy {
        HandlerPolicy::Reject if schema.has_handler(state, action) => {
            Err(RegistryError::DuplicateHandler {
                state: state.to_string(),
                action: action.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Every state is keyed by its own descriptor name, and no two descriptors
/// share a name.
///
/// Registry-built schemas always hold; parsed ones may not.
pub fn state_names_match(schema: &Schema) -> Checked<RegistryError> {
    names_match(
        &schema.states,
        |key, name| RegistryError::MisnamedState {
            key: key.to_string(),
            name: name.to_string(),
        },
        |name| RegistryError::DuplicateState {
            name: name.to_string(),
        },
    )
}

/// Every action is keyed by its own descriptor name, and no two descriptors
/// share a name.
pub fn action_names_match(schema: &Schema) -> Checked<RegistryError> {
    names_match(
        &schema.actions,
        |key, name| RegistryError::MisnamedAction {
            key: key.to_string(),
            name: name.to_string(),
        },
        |name| RegistryError::DuplicateAction {
            name: name.to_string(),
        },
    )
}

fn names_match(
    descriptors: &BTreeMap<String, Descriptor>,
    misnamed: impl Fn(&str, &str) -> RegistryError,
    duplicate: impl Fn(&str) -> RegistryError,
) -> Checked<RegistryError> {
    let mut seen = BTreeSet::new();
    let mut checks: Vec<Checked<RegistryError>> = Vec::new();

    for (key, descriptor) in descriptors {
        if key != &descriptor.name {
            checks.push(Validation::fail(misnamed(key, &descriptor.name)));
        }
        if !seen.insert(descriptor.name.as_str()) {
            checks.push(Validation::fail(duplicate(&descriptor.name)));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Every non-terminal state has at least one handler.
///
/// Fails with the name of every unhandled non-terminal state, in sorted
/// order.
pub fn handlers_complete(schema: &Schema) -> Checked<String> {
    let checks: Vec<Checked<String>> = schema
        .transitions
        .iter()
        .filter(|(_, destinations)| !destinations.is_empty())
        .map(|(source, _)| {
            if schema.is_handled(source) {
                Validation::success(())
            } else {
                Validation::fail(source.clone())
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// Missing handlers as a plain sorted list, empty when complete.
pub fn unhandled_states(schema: &Schema) -> Vec<String> {
    match handlers_complete(schema) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(states) => states.iter().cloned().collect(),
    }
}
