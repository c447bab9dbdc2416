//! Assertion failures.

use thiserror::Error;

use crate::capability::Capability;

/// An assertion found that the actor does not hold a capability.
///
/// This is the only failure the engine produces. Applications that want their
/// own error type either implement `From<MissingCapability>` for it and bind
/// with `Options::default()`, or install a
/// [`create_error`](crate::Options::create_error) hook returning it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("Missing capability: '{capability}'")]
pub struct MissingCapability {
    capability: String,
}

impl MissingCapability {
    /// Creates the error for the given capability.
    pub fn new<C: Capability>(capability: &C) -> Self {
        Self {
            capability: capability.name().to_string(),
        }
    }

    /// Returns the name of the capability that was asserted.
    pub fn capability(&self) -> &str {
        &self.capability
    }
}
