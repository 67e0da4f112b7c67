//! Incremental registry of state machine declarations.

use crate::builder::config::{HandlerPolicy, RegistryConfig};
use crate::builder::error::RegistryError;
use crate::core::{Action, Descriptor, PayloadShape, Schema, State};
use crate::dispatch::{FsmDefinition, Handler};
use crate::validation::rules;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::{debug, warn};

/// Accumulates declarations and enforces the definition invariants as they
/// arrive.
///
/// Every declaration either succeeds or fails with one error and leaves the
/// registry untouched. [`finalize`](Self::finalize) checks that every
/// non-terminal state is handled and hands the declarations over to an
/// immutable [`FsmDefinition`]; after that the registry rejects all calls.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{Registry, RegistryError};
/// use statecraft::core::{Action, PayloadShape, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Light { Off, On }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "off",
///             Self::On => "on",
///         }
///     }
/// }
///
/// #[derive(Clone, Debug)]
/// struct Toggle;
///
/// impl Action for Toggle {
///     fn name(&self) -> &str { "toggle" }
/// }
///
/// # fn main() -> Result<(), RegistryError> {
/// let mut registry = Registry::<Light, Toggle>::new();
/// registry
///     .declare_state("off", PayloadShape::new())?
///     .declare_state("on", PayloadShape::new())?
///     .declare_transition("off", "on")?
///     .declare_transition("on", "off")?
///     .declare_action("toggle", PayloadShape::new())?
///     .register_handler("off", "toggle", ["on"], |_, _| Light::On)?
///     .register_handler("on", "toggle", ["off"], |_, _| Light::Off)?;
///
/// let dispatcher = registry.finalize()?.dispatcher();
/// assert_eq!(dispatcher.next_state(&Light::Off, &Toggle), Light::On);
/// # Ok(())
/// # }
/// ```
pub struct Registry<S: State, A: Action> {
    config: RegistryConfig,
    schema: Schema,
    handlers: HashMap<String, HashMap<String, Handler<S, A>>>,
    finalized: bool,
}

impl<S: State, A: Action> Registry<S, A> {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            schema: Schema::new(),
            handlers: HashMap::new(),
            finalized: false,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Declarations accumulated so far.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn ensure_open(&self) -> Result<(), RegistryError> {
        if self.finalized {
            return Err(RegistryError::AlreadyFinalized);
        }
        Ok(())
    }

    /// Declare a state.
    ///
    /// Fails with `DuplicateState` if the name is taken, whatever the shape.
    pub fn declare_state(
        &mut self,
        name: impl Into<String>,
        shape: PayloadShape,
    ) -> Result<&mut Self, RegistryError> {
        self.declare_states([Descriptor::new(name, shape)])
    }

    /// Declare several states at once. Nothing is declared if any fails.
    pub fn declare_states<I>(&mut self, descriptors: I) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = Descriptor>,
    {
        self.ensure_open()?;
        let descriptors: Vec<Descriptor> = descriptors.into_iter().collect();

        let mut batch = HashSet::new();
        for descriptor in &descriptors {
            rules::state_is_new(&self.schema, &descriptor.name)?;
            if !batch.insert(descriptor.name.as_str()) {
                return Err(RegistryError::DuplicateState {
                    name: descriptor.name.clone(),
                });
            }
        }

        for descriptor in descriptors {
            debug!(state = %descriptor.name, fields = descriptor.shape.fields().len(), "declared state");
            self.schema
                .states
                .insert(descriptor.name.clone(), descriptor);
        }
        Ok(self)
    }

    /// Declare that the machine may move from `from` to `to`.
    pub fn declare_transition(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<&mut Self, RegistryError> {
        self.declare_transitions([(from, to)])
    }

    /// Declare several transitions at once. Nothing is declared if any fails.
    pub fn declare_transitions<I, F, T>(&mut self, pairs: I) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        self.ensure_open()?;
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();

        let mut batch = HashSet::new();
        for (from, to) in &pairs {
            rules::state_is_declared(&self.schema, from)?;
            rules::state_is_declared(&self.schema, to)?;
            rules::transition_is_new(&self.schema, from, to)?;
            if !batch.insert((from.as_str(), to.as_str())) {
                return Err(RegistryError::DuplicateTransition {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        for (from, to) in pairs {
            debug!(from = %from, to = %to, "declared transition");
            self.schema.transitions.entry(from).or_default().insert(to);
        }
        Ok(self)
    }

    /// Declare an action.
    pub fn declare_action(
        &mut self,
        name: impl Into<String>,
        shape: PayloadShape,
    ) -> Result<&mut Self, RegistryError> {
        self.declare_actions([Descriptor::new(name, shape)])
    }

    /// Declare several actions at once. Nothing is declared if any fails.
    pub fn declare_actions<I>(&mut self, descriptors: I) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = Descriptor>,
    {
        self.ensure_open()?;
        let descriptors: Vec<Descriptor> = descriptors.into_iter().collect();

        let mut batch = HashSet::new();
        for descriptor in &descriptors {
            rules::action_is_new(&self.schema, &descriptor.name)?;
            if !batch.insert(descriptor.name.as_str()) {
                return Err(RegistryError::DuplicateAction {
                    name: descriptor.name.clone(),
                });
            }
        }

        for descriptor in descriptors {
            debug!(action = %descriptor.name, fields = descriptor.shape.fields().len(), "declared action");
            self.schema
                .actions
                .insert(descriptor.name.clone(), descriptor);
        }
        Ok(self)
    }

    /// Register the handler for `(state, action)`.
    ///
    /// `returns` lists every state the handler may return. Each must be a
    /// declared destination of `state`; the dispatcher rejects any other
    /// return value at runtime.
    ///
    /// A second registration for the same pair replaces the first under
    /// [`HandlerPolicy::Replace`] and fails under [`HandlerPolicy::Reject`].
    pub fn register_handler<R, F>(
        &mut self,
        state: impl Into<String>,
        action: impl Into<String>,
        returns: R,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.ensure_open()?;
        let state: String = state.into();
        let action: String = action.into();
        let returns: BTreeSet<String> = returns.into_iter().map(Into::into).collect();

        rules::state_is_declared(&self.schema, &state)?;
        rules::action_is_declared(&self.schema, &action)?;
        rules::state_is_non_terminal(&self.schema, &state, &action)?;
        rules::returns_are_transitions(&self.schema, &state, &action, &returns)?;
        rules::handler_is_new(&self.schema, &state, &action, self.config.handler_policy)?;

        if self.schema.has_handler(&state, &action) {
            debug_assert_eq!(self.config.handler_policy, HandlerPolicy::Replace);
            warn!(state = %state, action = %action, "replacing registered handler");
        } else {
            debug!(state = %state, action = %action, returns = ?returns, "registered handler");
        }

        self.schema
            .handlers
            .entry(state.clone())
            .or_default()
            .insert(action.clone(), returns);
        self.handlers
            .entry(state)
            .or_default()
            .insert(action, Arc::new(handler));
        Ok(self)
    }

    /// Non-terminal states that still have no handler, sorted.
    pub fn pending_handlers(&self) -> Vec<String> {
        rules::unhandled_states(&self.schema)
    }

    /// Check completeness and produce the immutable definition.
    ///
    /// On `IncompleteHandlers` the registry is unchanged and finalize may be
    /// called again once the missing handlers are registered. On success the
    /// registry is drained and every later call fails with
    /// `AlreadyFinalized`.
    pub fn finalize(&mut self) -> Result<FsmDefinition<S, A>, RegistryError> {
        self.ensure_open()?;

        if let Validation::Failure(states) = rules::handlers_complete(&self.schema) {
            return Err(RegistryError::IncompleteHandlers {
                states: states.iter().cloned().collect(),
            });
        }

        let schema = std::mem::take(&mut self.schema);
        let handlers = std::mem::take(&mut self.handlers);
        self.finalized = true;

        debug!(
            states = schema.states.len(),
            actions = schema.actions.len(),
            transitions = schema.transitions.values().map(BTreeSet::len).sum::<usize>(),
            "finalized definition"
        );
        Ok(FsmDefinition::new(schema, handlers))
    }
}

impl<S: State, A: Action> Default for Registry<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, A: Action> fmt::Debug for Registry<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("schema", &self.schema)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}
