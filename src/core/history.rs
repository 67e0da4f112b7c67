//! Path history of dispatched steps.
//!
//! Provides immutable tracking of the states a session passed through,
//! following the same value semantics as the rest of the core.

use super::state::State;
use serde::{Deserialize, Serialize};

/// Record of a single handled dispatch.
///
/// `action` is the name of the action that drove the step. Unhandled
/// actions never produce a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Step<S: State> {
    /// The state the handler was invoked with
    pub from: S,
    /// Name of the action that was applied
    pub action: String,
    /// The state the handler returned
    pub to: S,
}

/// Ordered history of dispatched steps.
///
/// History is immutable - the `record` method returns a new history
/// with the step added.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StateHistory, Step};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Phase { One, Two, Three }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::One => "one",
///             Self::Two => "two",
///             Self::Three => "three",
///         }
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(Step { from: Phase::One, action: "next".into(), to: Phase::Two })
///     .record(Step { from: Phase::Two, action: "next".into(), to: Phase::Three });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    steps: Vec<Step<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, returning a new history.
    ///
    /// Does not mutate the existing history.
    pub fn record(&self, step: Step<S>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Append a step in place, for owners that keep a single history.
    pub(crate) fn push(&mut self, step: Step<S>) {
        self.steps.push(step);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the first step's `from`
    /// state, then the `to` state of each step. Empty when nothing was
    /// recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(&first.from);
        }
        for step in &self.steps {
            path.push(&step.to);
        }
        path
    }

    /// Names of the actions applied, in order.
    pub fn actions(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.action.as_str()).collect()
    }

    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
