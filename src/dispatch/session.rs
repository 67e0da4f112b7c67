//! A current state value driven by a dispatcher.

use crate::core::{Action, State, StateHistory, Step};
use crate::dispatch::dispatcher::{Dispatcher, Outcome};
use crate::dispatch::error::DispatchError;

/// Holds the current state of one running machine and the path it took.
///
/// Meant for the component that owns the machine's lifecycle, such as a UI
/// controller or a protocol session. Several sessions may share one
/// dispatcher.
pub struct Session<S: State, A: Action> {
    dispatcher: Dispatcher<S, A>,
    current: S,
    history: StateHistory<S>,
}

impl<S: State, A: Action> Session<S, A> {
    pub fn new(dispatcher: Dispatcher<S, A>, initial: S) -> Self {
        Self {
            dispatcher,
            current: initial,
            history: StateHistory::new(),
        }
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Steps taken so far. Unhandled actions are not recorded.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn dispatcher(&self) -> &Dispatcher<S, A> {
        &self.dispatcher
    }

    /// Whether the current state has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.dispatcher.definition().is_terminal(self.current.name())
    }

    /// Apply one action and return the resulting state.
    ///
    /// On `IllegalTransition` the session keeps its previous state.
    pub fn apply(&mut self, action: &A) -> Result<&S, DispatchError> {
        if let Outcome::Transitioned(next) = self.dispatcher.dispatch(&self.current, action)? {
            self.history.push(Step {
                from: self.current.clone(),
                action: action.name().to_string(),
                to: next.clone(),
            });
            self.current = next;
        }
        Ok(&self.current)
    }

    /// Apply actions in order, stopping at the first fault.
    pub fn apply_all<'a, I>(&mut self, actions: I) -> Result<&S, DispatchError>
    where
        I: IntoIterator<Item = &'a A>,
        A: 'a,
    {
        for action in actions {
            self.apply(action)?;
        }
        Ok(&self.current)
    }

    pub fn into_state(self) -> S {
        self.current
    }
}
