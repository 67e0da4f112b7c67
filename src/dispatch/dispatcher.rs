//! Next-state computation over a finalized definition.

use crate::core::{Action, State};
use crate::dispatch::definition::FsmDefinition;
use crate::dispatch::error::DispatchError;
use std::sync::Arc;
use tracing::{error, trace};

/// Result of dispatching one action.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<S: State> {
    /// A handler ran and returned this state
    Transitioned(S),

    /// No handler is registered for the (state, action) pair
    Unhandled,
}

/// Computes next states from a shared, immutable [`FsmDefinition`].
///
/// Cloning is cheap and every clone shares the same definition, so a
/// dispatcher can be handed to as many threads as needed. Dispatch takes
/// `&self` and keeps no state between calls.
pub struct Dispatcher<S: State, A: Action> {
    definition: Arc<FsmDefinition<S, A>>,
}

impl<S: State, A: Action> Dispatcher<S, A> {
    pub fn new(definition: FsmDefinition<S, A>) -> Self {
        Self {
            definition: Arc::new(definition),
        }
    }

    pub fn definition(&self) -> &FsmDefinition<S, A> {
        &self.definition
    }

    /// Run the handler for `(current, action)` if there is one.
    ///
    /// Returns `Unhandled` when the current state has no handlers at all,
    /// and also when it has handlers but none for this action. A handler
    /// returning a state outside its declared returns is an
    /// `IllegalTransition`.
    pub fn dispatch(&self, current: &S, action: &A) -> Result<Outcome<S>, DispatchError> {
        let Some(actions) = self.definition.handlers_for(current.name()) else {
            trace!(state = current.name(), action = action.name(), "state has no handlers");
            return Ok(Outcome::Unhandled);
        };

        let Some(entry) = actions.get(action.name()) else {
            trace!(state = current.name(), action = action.name(), "action not handled in state");
            return Ok(Outcome::Unhandled);
        };

        let next = (entry.handler)(current, action);
        if !entry.returns.contains(next.name()) {
            return Err(DispatchError::IllegalTransition {
                from: current.name().to_string(),
                action: action.name().to_string(),
                to: next.name().to_string(),
            });
        }

        trace!(
            from = current.name(),
            action = action.name(),
            to = next.name(),
            "dispatched"
        );
        Ok(Outcome::Transitioned(next))
    }

    /// Like [`next_state`](Self::next_state), but surfaces illegal
    /// transitions as an error instead of panicking.
    pub fn try_next_state(&self, current: &S, action: &A) -> Result<S, DispatchError> {
        match self.dispatch(current, action)? {
            Outcome::Transitioned(next) => Ok(next),
            Outcome::Unhandled => Ok(current.clone()),
        }
    }

    /// Compute the next state.
    ///
    /// Unhandled (state, action) pairs return `current` unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the handler returns a state that is not among its declared
    /// returns. The definition and the handler have drifted apart and the
    /// modeled machine would otherwise enter an undefined state.
    #[inline]
    pub fn next_state(&self, current: &S, action: &A) -> S {
        match self.try_next_state(current, action) {
            Ok(next) => next,
            Err(fault) => {
                error!(%fault, "illegal transition");
                panic!("{fault}");
            }
        }
    }
}

impl<S: State, A: Action> Clone for Dispatcher<S, A> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
        }
    }
}

impl<S: State, A: Action> From<FsmDefinition<S, A>> for Dispatcher<S, A> {
    fn from(definition: FsmDefinition<S, A>) -> Self {
        Self::new(definition)
    }
}
