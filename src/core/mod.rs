//! Core value types shared by the registry and the dispatcher.
//!
//! - `State` and `Action` traits tying application values to descriptor names
//! - Descriptors and payload shapes
//! - The serializable `Schema` of a definition
//! - Immutable history of dispatched steps
//!
//! Nothing in this module performs validation; see [`crate::validation`].

mod descriptor;
mod history;
mod schema;
mod state;

pub use descriptor::{ActionDescriptor, Descriptor, Field, PayloadShape, StateDescriptor};
pub use history::{StateHistory, Step};
pub use schema::Schema;
pub use state::{Action, Catalog, State};
