//! Traits implemented by application state and action values.
//!
//! The registry and dispatcher work on descriptor names. Application values
//! tie themselves to those names through `name()`, so a `GetMoney { .. }`
//! value is dispatched with the handlers registered for `"get-money"`.

use super::descriptor::Descriptor;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine state values.
///
/// All methods are pure. A value's `name()` must match the name of a
/// declared state descriptor for handlers to apply to it.
///
/// # Required Traits
///
/// - `Clone`: unhandled dispatch returns a copy of the current state
/// - `PartialEq`: states must be comparable in tests and by callers
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: callers persist state values between runs
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed { locked: bool },
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "open",
///             Self::Closed { .. } => "closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Closed { locked: true }.name(), "closed");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the state descriptor this value belongs to.
    fn name(&self) -> &str;
}

/// Trait for action values offered to the machine.
///
/// Actions live in their own namespace: an action may share a name with a
/// state without conflict.
pub trait Action: Clone + Debug + Send + Sync {
    /// Name of the action descriptor this value belongs to.
    fn name(&self) -> &str;
}

/// Enumerates the descriptors of every variant of a state or action type.
///
/// Implemented by [`fsm_enum!`](crate::fsm_enum) so a whole enum can be
/// declared in one batch.
pub trait Catalog {
    fn catalog() -> Vec<Descriptor>;
}
