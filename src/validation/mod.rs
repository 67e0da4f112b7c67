//! Consistency rules for state machine definitions.
//!
//! The [`Registry`](crate::builder::Registry) applies the rules in [`rules`]
//! one declaration at a time. [`audit`] applies all of them to a complete
//! [`Schema`], for example one parsed from JSON, and accumulates every
//! violation with Stillwater's `Validation` instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use statecraft::core::Schema;
//! use statecraft::validation::audit;
//! use statecraft::builder::RegistryError;
//! use stillwater::validation::Validation;
//!
//! let schema = Schema::from_json(r#"{
//!     "states": { "on": { "name": "on" } },
//!     "actions": {},
//!     "transitions": { "on": ["off"] }
//! }"#).unwrap();
//!
//! match audit(&schema) {
//!     Validation::Failure(errors) => {
//!         assert!(errors.iter().any(|e| matches!(e, RegistryError::UnknownState { .. })));
//!         assert!(errors.iter().any(|e| matches!(e, RegistryError::IncompleteHandlers { .. })));
//!     }
//!     Validation::Success(_) => panic!("expected violations"),
//! }
//! ```

pub mod rules;

use crate::builder::RegistryError;
use crate::core::Schema;
use rules::Checked;
use stillwater::validation::Validation;

/// Check every invariant of a whole schema, accumulating ALL violations.
///
/// Names that are both unknown and misused are reported once per rule they
/// break. Missing handlers are reported as a single `IncompleteHandlers`.
/// A descriptor stored under another name's key is `MisnamedState` or
/// `MisnamedAction`, and two descriptors sharing a name are duplicates.
pub fn audit(schema: &Schema) -> Checked<RegistryError> {
    let mut checks: Vec<Checked<RegistryError>> = vec![
        rules::state_names_match(schema),
        rules::action_names_match(schema),
    ];

    for (from, destinations) in &schema.transitions {
        checks.push(rules::lift(rules::state_is_declared(schema, from)));
        for to in destinations {
            checks.push(rules::lift(rules::state_is_declared(schema, to)));
        }
    }

    for (state, actions) in &schema.handlers {
        checks.push(rules::lift(rules::state_is_declared(schema, state)));
        for (action, returns) in actions {
            checks.push(rules::lift(rules::action_is_declared(schema, action)));
            checks.push(rules::lift(rules::state_is_non_terminal(
                schema, state, action,
            )));
            checks.push(rules::lift(rules::returns_are_declared(
                state, action, returns,
            )));
            for destination in returns {
                checks.push(rules::lift(rules::return_is_transition(
                    schema,
                    state,
                    action,
                    destination,
                )));
            }
        }
    }

    let missing = rules::unhandled_states(schema);
    if !missing.is_empty() {
        checks.push(Validation::fail(RegistryError::IncompleteHandlers {
            states: missing,
        }));
    }

    Validation::all_vec(checks).map(|_| ())
}
