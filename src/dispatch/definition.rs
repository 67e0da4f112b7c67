//! Finalized, immutable state machine definition.

use crate::core::{Action, Descriptor, Schema, State};
use crate::dispatch::dispatcher::Dispatcher;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Pure function computing the next state for one (state, action) pair.
pub type Handler<S, A> = Arc<dyn Fn(&S, &A) -> S + Send + Sync>;

/// A registered handler together with the states it may return.
pub(crate) struct HandlerEntry<S, A> {
    pub(crate) returns: BTreeSet<String>,
    pub(crate) handler: Handler<S, A>,
}

/// The validated aggregate produced by
/// [`Registry::finalize`](crate::builder::Registry::finalize).
///
/// Holds no interior mutability, so it is `Send + Sync` and can be shared
/// between threads through a [`Dispatcher`].
pub struct FsmDefinition<S: State, A: Action> {
    schema: Schema,
    handlers: HashMap<String, HashMap<String, HandlerEntry<S, A>>>,
}

impl<S: State, A: Action> FsmDefinition<S, A> {
    /// Join validated declarations with their handler functions.
    pub(crate) fn new(
        schema: Schema,
        handlers: HashMap<String, HashMap<String, Handler<S, A>>>,
    ) -> Self {
        let handlers = handlers
            .into_iter()
            .map(|(state, actions)| {
                let entries = actions
                    .into_iter()
                    .map(|(action, handler)| {
                        let returns = schema
                            .handlers
                            .get(&state)
                            .and_then(|actions| actions.get(&action))
                            .cloned()
                            .unwrap_or_default();
                        (action, HandlerEntry { returns, handler })
                    })
                    .collect();
                (state, entries)
            })
            .collect();

        Self { schema, handlers }
    }

    /// Structural description of this definition.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn state(&self, name: &str) -> Option<&Descriptor> {
        self.schema.states.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&Descriptor> {
        self.schema.actions.get(name)
    }

    pub fn states(&self) -> impl Iterator<Item = &Descriptor> + '_ {
        self.schema.states.values()
    }

    pub fn actions(&self) -> impl Iterator<Item = &Descriptor> + '_ {
        self.schema.actions.values()
    }

    pub fn destinations(&self, state: &str) -> impl Iterator<Item = &str> + '_ {
        self.schema.destinations(state)
    }

    pub fn is_terminal(&self, state: &str) -> bool {
        self.schema.is_terminal(state)
    }

    pub fn has_handler(&self, state: &str, action: &str) -> bool {
        self.handler(state, action).is_some()
    }

    /// Handlers registered for `state`, keyed by action name.
    pub(crate) fn handlers_for(
        &self,
        state: &str,
    ) -> Option<&HashMap<String, HandlerEntry<S, A>>> {
        self.handlers.get(state)
    }

    pub(crate) fn handler(&self, state: &str, action: &str) -> Option<&HandlerEntry<S, A>> {
        self.handlers_for(state)?.get(action)
    }

    /// Wrap this definition in a shareable dispatcher.
    pub fn dispatcher(self) -> Dispatcher<S, A> {
        Dispatcher::new(self)
    }
}

impl<S: State, A: Action> fmt::Debug for FsmDefinition<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsmDefinition")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Registry;
    use crate::core::PayloadShape;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Door {
        Open,
        Closed,
        Welded,
    }

    impl State for Door {
        fn name(&self) -> &str {
            match self {
                Self::Open => "open",
                Self::Closed => "closed",
                Self::Welded => "welded",
            }
        }
    }

    #[derive(Clone, Debug)]
    struct Push;

    impl Action for Push {
        fn name(&self) -> &str {
            "push"
        }
    }

    fn definition() -> FsmDefinition<Door, Push> {
        let mut registry: Registry<Door, Push> = Registry::new();
        registry
            .declare_state("open", PayloadShape::new())
            .unwrap()
            .declare_state("closed", PayloadShape::new())
            .unwrap()
            .declare_state("welded", PayloadShape::new())
            .unwrap()
            .declare_transitions([("open", "closed"), ("closed", "open"), ("closed", "welded")])
            .unwrap()
            .declare_action("push", PayloadShape::new())
            .unwrap()
            .register_handler("open", "push", ["closed"], |_, _| Door::Closed)
            .unwrap()
            .register_handler("closed", "push", ["open"], |_, _| Door::Open)
            .unwrap();
        registry.finalize().unwrap()
    }

    #[test]
    fn exposes_declared_descriptors() {
        let definition = definition();

        assert!(definition.state("welded").is_some());
        assert!(definition.state("push").is_none());
        assert!(definition.action("push").is_some());
        assert_eq!(definition.states().count(), 3);
        assert_eq!(definition.actions().count(), 1);
    }

    #[test]
    fn exposes_transitions() {
        let definition = definition();

        assert_eq!(
            definition.destinations("closed").collect::<Vec<_>>(),
            vec!["open", "welded"]
        );
        assert!(definition.is_terminal("welded"));
        assert!(!definition.is_terminal("open"));
    }

    #[test]
    fn handler_entries_carry_declared_returns() {
        let definition = definition();

        let entry = definition.handler("closed", "push").unwrap();
        assert_eq!(entry.returns, BTreeSet::from(["open".to_string()]));
        assert!(definition.has_handler("open", "push"));
        assert!(!definition.has_handler("welded", "push"));
    }

    #[test]
    fn definition_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FsmDefinition<Door, Push>>();
    }
}
