use std::fmt::Debug;

/// A permission token from a policy's fixed alphabet.
///
/// Capabilities are normally declared as a fieldless enum, one variant per
/// token, with `name` returning the token's wire name. There is no hierarchy
/// between tokens: holding `Update` says nothing about `Read`.
///
/// # Example
///
/// ```
/// use capgate::Capability;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Project {
///     Read,
///     Write,
/// }
///
/// impl Capability for Project {
///     fn name(&self) -> &str {
///         match self {
///             Project::Read => "read",
///             Project::Write => "write",
///         }
///     }
/// }
///
/// assert_eq!(Project::Write.name(), "write");
/// ```
pub trait Capability: Clone + PartialEq + Debug {
    /// Returns the token name used in error messages and serialized output.
    fn name(&self) -> &str;
}

impl Capability for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl Capability for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_capability_name() {
        assert_eq!("read".name(), "read");
    }

    #[test]
    fn test_string_capability_name() {
        let cap = String::from("set_role");
        assert_eq!(cap.name(), "set_role");
    }
}
