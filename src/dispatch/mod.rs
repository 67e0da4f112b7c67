//! Runtime side of a finalized state machine.
//!
//! # Key Concepts
//!
//! - **FsmDefinition**: the immutable result of finalizing a registry
//! - **Dispatcher**: shareable handle computing next states; pure and
//!   lock-free, safe to call from any number of threads
//! - **Session**: one running machine's current state and path history
//!
//! Unhandled (state, action) pairs leave the state unchanged. A handler
//! returning a state outside its declared returns is a programming error
//! reported as `DispatchError::IllegalTransition`.

mod definition;
mod dispatcher;
mod error;
mod session;

pub use definition::{FsmDefinition, Handler};
pub use dispatcher::{Dispatcher, Outcome};
pub use error::DispatchError;
pub use session::Session;
