//! Registry configuration.

use serde::{Deserialize, Serialize};

/// What to do when a handler is registered for a (state, action) pair that
/// already has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerPolicy {
    /// Replace the earlier handler (last write wins)
    #[default]
    Replace,

    /// Fail with `RegistryError::DuplicateHandler`
    Reject,
}

/// Configuration for a [`Registry`](crate::builder::Registry).
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{HandlerPolicy, RegistryConfig};
///
/// let config: RegistryConfig =
///     serde_json::from_str(r#"{ "handler_policy": "reject" }"#).unwrap();
/// assert_eq!(config.handler_policy, HandlerPolicy::Reject);
/// assert_eq!(RegistryConfig::default().handler_policy, HandlerPolicy::Replace);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub handler_policy: HandlerPolicy,
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate handler policy.
    pub fn handler_policy(mut self, policy: HandlerPolicy) -> Self {
        self.handler_policy = policy;
        self
    }
}
