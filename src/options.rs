use std::fmt;

use crate::error::MissingCapability;

type CreateError<E> = dyn Fn(MissingCapability) -> E + Send + Sync;

enum Reject<E> {
    Convert(fn(MissingCapability) -> E),
    Hook(Box<CreateError<E>>),
}

/// Configuration supplied when binding an actor.
///
/// The only option is the error hook used by failed assertions. Without a
/// hook, failures are reported as `E::from(MissingCapability)`. Installing a
/// hook with [`create_error`](Options::create_error) sets the error type, so
/// it need not implement `From<MissingCapability>`.
///
/// # Example
///
/// ```
/// use capgate::{MissingCapability, Options};
///
/// #[derive(Debug, PartialEq)]
/// struct Forbidden(String);
///
/// let options = Options::new()
///     .create_error(|err: MissingCapability| Forbidden(format!("403: {}", err.capability())));
///
/// let err = options.reject(MissingCapability::new(&"delete"));
/// assert_eq!(err, Forbidden("403: delete".into()));
/// ```
pub struct Options<E = MissingCapability> {
    reject: Reject<E>,
}

impl Options {
    /// Creates options with no error hook. Failures are reported as
    /// [`MissingCapability`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Options<E> {
    /// Sets the hook that builds the error value for a failed assertion.
    ///
    /// The hook is called exactly once per failing assertion and never
    /// otherwise. Its return type becomes the error type of every assertion
    /// made through the bound actor.
    pub fn create_error<E2, F>(self, f: F) -> Options<E2>
    where
        F: Fn(MissingCapability) -> E2 + Send + Sync + 'static,
    {
        Options {
            reject: Reject::Hook(Box::new(f)),
        }
    }

    /// Returns `true` if an error hook is installed.
    pub fn has_create_error(&self) -> bool {
        matches!(self.reject, Reject::Hook(_))
    }

    /// Produces the error value for a failed assertion.
    pub fn reject(&self, missing: MissingCapability) -> E {
        match &self.reject {
            Reject::Convert(convert) => convert(missing),
            Reject::Hook(create_error) => create_error(missing),
        }
    }
}

/// Options that report failures as `E::from(MissingCapability)`.
impl<E: From<MissingCapability>> Default for Options<E> {
    fn default() -> Self {
        Self {
            reject: Reject::Convert(<E as From<MissingCapability>>::from),
        }
    }
}

impl<E> fmt::Debug for Options<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("create_error", &self.has_create_error())
            .finish()
    }
}
