//! Errors reported while declaring and finalizing a definition.

use thiserror::Error;

/// Errors that can occur when registering declarations or finalizing.
///
/// Every variant except `AlreadyFinalized` leaves the registry unchanged, so
/// the caller may correct the declaration and retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("State '{name}' is already declared")]
    DuplicateState { name: String },

    #[error("Action '{name}' is already declared")]
    DuplicateAction { name: String },

    #[error("State key '{key}' holds the descriptor of '{name}'")]
    MisnamedState { key: String, name: String },

    #[error("Action key '{key}' holds the descriptor of '{name}'")]
    MisnamedAction { key: String, name: String },

    #[error("Unknown state '{name}'. Declare it with .declare_state() first")]
    UnknownState { name: String },

    #[error("Unknown action '{name}'. Declare it with .declare_action() first")]
    UnknownAction { name: String },

    #[error("Transition '{from}' -> '{to}' is already declared")]
    DuplicateTransition { from: String, to: String },

    #[error("State '{state}' is terminal; a handler for action '{action}' could never transition")]
    TerminalState { state: String, action: String },

    #[error("Handler for ('{state}', '{action}') declares no return states")]
    NoReturnStates { state: String, action: String },

    #[error(
        "Handler for ('{state}', '{action}') may return '{destination}', \
         but no transition '{state}' -> '{destination}' is declared"
    )]
    UndeclaredReturn {
        state: String,
        action: String,
        destination: String,
    },

    #[error("Handler for ('{state}', '{action}') is already registered")]
    DuplicateHandler { state: String, action: String },

    #[error("Non-terminal states without a handler: {}", .states.join(", "))]
    IncompleteHandlers { states: Vec<String> },

    #[error("Registry was already finalized")]
    AlreadyFinalized,
}
