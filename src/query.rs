use crate::args::Args;
use crate::bound::PolicyQuery;
use crate::capability::Capability;
use crate::error::MissingCapability;

/// Queries scoped to one subject.
pub struct SubjectQuery<'a, A, S, X, C, E = MissingCapability> {
    query: PolicyQuery<'a, A, S, X, C, E>,
    subject: &'a S,
}

impl<A, S, X, C, E> Clone for SubjectQuery<'_, A, S, X, C, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, S, X, C, E> Copy for SubjectQuery<'_, A, S, X, C, E> {}

impl<'a, A, S, X, C, E> SubjectQuery<'a, A, S, X, C, E>
where
    C: Capability,
{
    pub(crate) fn new(query: PolicyQuery<'a, A, S, X, C, E>, subject: &'a S) -> Self {
        Self { query, subject }
    }

    /// Returns the subject this query is scoped to.
    pub fn subject(&self) -> &'a S {
        self.subject
    }

    /// Prepares a check of `capability` on this subject.
    ///
    /// Arguments can be attached with [`Can::with`] before checking.
    pub fn can(self, capability: C) -> Can<'a, A, S, X, C, E> {
        Can {
            query: self,
            capability,
            args: Args::new(),
        }
    }

    /// Returns every capability the actor holds on this subject, resolved with
    /// empty args.
    pub fn list(self) -> Vec<C> {
        self.resolve(&Args::new())
    }

    /// Returns every capability the actor holds on this subject for `args`.
    pub fn list_with(self, args: impl Into<Args<X>>) -> Vec<C> {
        self.resolve(&args.into())
    }

    pub(crate) fn resolve(&self, args: &Args<X>) -> Vec<C> {
        self.query.resolve(self.subject, args)
    }
}

/// A pending check of one capability on one subject.
///
/// Each call to [`check`](Can::check) or [`assert`](Can::assert) runs the
/// resolver again; nothing is cached between them.
pub struct Can<'a, A, S, X, C, E = MissingCapability> {
    query: SubjectQuery<'a, A, S, X, C, E>,
    capability: C,
    args: Args<X>,
}

impl<'a, A, S, X, C, E> Can<'a, A, S, X, C, E>
where
    C: Capability,
{
    /// Adds one argument value to pass to the resolver.
    ///
    /// Arguments are not tied to the capability being checked: any variant of
    /// `X` is accepted and the resolver reads the ones it declares for each
    /// capability, ignoring the rest.
    pub fn with(mut self, arg: X) -> Self {
        self.args = self.args.with(arg);
        self
    }

    /// Replaces the arguments passed to the resolver.
    pub fn with_args(mut self, args: impl Into<Args<X>>) -> Self {
        self.args = args.into();
        self
    }

    /// Returns the capability being checked.
    pub fn capability(&self) -> &C {
        &self.capability
    }

    /// Returns `true` if the actor holds the capability. Never fails.
    pub fn check(&self) -> bool {
        self.query.resolve(&self.args).contains(&self.capability)
    }

    /// Fails with the configured error if the actor lacks the capability.
    pub fn assert(&self) -> Result<(), E> {
        if self.query.resolve(&self.args).contains(&self.capability) {
            Ok(())
        } else {
            Err(self.query.query.reject(&self.capability))
        }
    }
}
