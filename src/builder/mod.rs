//! Builder API for declaring and finalizing state machine definitions.
//!
//! The [`Registry`] accepts state, transition, action and handler
//! declarations one at a time, validating each against what was declared
//! before it, and finalizes into an immutable
//! [`FsmDefinition`](crate::dispatch::FsmDefinition).

pub mod config;
pub mod error;
pub mod macros;
pub mod registry;

pub use config::{HandlerPolicy, RegistryConfig};
pub use error::RegistryError;
pub use registry::Registry;
