//! Dispatch-time faults.

use thiserror::Error;

/// Faults raised while dispatching an action.
///
/// These are programming errors: a handler and the declared transitions
/// disagree. They are never raised for unhandled (state, action) pairs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(
        "Handler for ('{from}', '{action}') returned state '{to}', \
         which is not among its declared returns"
    )]
    IllegalTransition {
        from: String,
        action: String,
        to: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_transition_message_names_the_path() {
        let error = DispatchError::IllegalTransition {
            from: "vend".to_string(),
            action: "clock-tick".to_string(),
            to: "idle".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Handler for ('vend', 'clock-tick') returned state 'idle', \
             which is not among its declared returns"
        );
    }
}
