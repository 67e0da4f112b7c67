//! Statecraft: declarative finite state machines with definition-time
//! validation.
//!
//! A machine is declared incrementally: states (each with an optional
//! payload shape), the transitions allowed between them, actions, and one
//! handler per (state, action) pair. Every declaration is checked against
//! what came before it, and finalization checks that every non-terminal
//! state is handled. The result is an immutable definition whose
//! dispatcher computes next states as a pure function.
//!
//! # Core Concepts
//!
//! - **State / Action**: application values naming their descriptor via the
//!   `State` and `Action` traits
//! - **Registry**: validating builder for definitions
//! - **Dispatcher**: pure next-state computation, shareable across threads
//! - **Schema**: serializable structure of a definition, auditable as a whole
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::{Registry, RegistryError};
//! use statecraft::core::Catalog;
//! use statecraft::fsm_enum;
//!
//! fsm_enum! {
//!     enum Task: State {
//!         Pending => "pending",
//!         Running { attempt: u32 } => "running",
//!         Complete => "complete",
//!     }
//! }
//!
//! fsm_enum! {
//!     enum Command: Action {
//!         Start => "start",
//!         Finish => "finish",
//!     }
//! }
//!
//! # fn main() -> Result<(), RegistryError> {
//! let mut registry = Registry::<Task, Command>::new();
//! registry
//!     .declare_states(Task::catalog())?
//!     .declare_transitions([("pending", "running"), ("running", "complete")])?
//!     .declare_actions(Command::catalog())?
//!     .register_handler("pending", "start", ["running"], |_, _| {
//!         Task::Running { attempt: 1 }
//!     })?
//!     .register_handler("running", "finish", ["complete"], |_, _| Task::Complete)?;
//!
//! let dispatcher = registry.finalize()?.dispatcher();
//!
//! let state = dispatcher.next_state(&Task::Pending, &Command::Start);
//! assert_eq!(state, Task::Running { attempt: 1 });
//!
//! // No handler for ("pending", "finish"): the state is unchanged.
//! assert_eq!(dispatcher.next_state(&Task::Pending, &Command::Finish), Task::Pending);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod dispatch;
pub mod validation;

// Re-export commonly used types
pub use crate::builder::{HandlerPolicy, Registry, RegistryConfig, RegistryError};
pub use crate::core::{Action, Catalog, Descriptor, PayloadShape, Schema, State};
pub use crate::dispatch::{DispatchError, Dispatcher, FsmDefinition, Outcome, Session};
