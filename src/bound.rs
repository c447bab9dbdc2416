use tracing::debug;

use crate::args::Args;
use crate::bulk::{BulkQuery, Mapped, Paired};
use crate::capability::Capability;
use crate::error::MissingCapability;
use crate::options::Options;
use crate::policy::Policy;
use crate::query::{Can, SubjectQuery};

/// Binds an actor with default options.
///
/// Failed assertions report [`MissingCapability`].
///
/// # Example
///
/// ```
/// use capgate::{Context, Grants, NoArgs, Policy};
///
/// let notes = Policy::new("notes", |ctx: &Context<'_, &'static str, (), NoArgs>| {
///     let mut grants = Grants::new();
///     grants.grant_if(*ctx.actor == "editor", ["write"]);
///     grants.finish(["read"])
/// });
///
/// let viewer = capgate::bind("viewer");
/// assert!(viewer.policy(&notes).can("read").check());
///
/// let err = viewer.policy(&notes).can("write").assert().unwrap_err();
/// assert_eq!(err.to_string(), "Missing capability: 'write'");
/// ```
pub fn bind<A>(actor: A) -> Bound<A> {
    Bound::new(actor, Options::new())
}

/// Binds an actor with the given options.
pub fn bind_with<A, E>(actor: A, options: Options<E>) -> Bound<A, E> {
    Bound::new(actor, options)
}

/// An actor bound together with its error configuration.
///
/// All queries made through a `Bound` resolve capabilities for this actor.
/// The actor is only ever read.
#[derive(Debug)]
pub struct Bound<A, E = MissingCapability> {
    actor: A,
    options: Options<E>,
}

impl<A, E> Bound<A, E> {
    /// Binds `actor` with `options`.
    pub fn new(actor: A, options: Options<E>) -> Self {
        Self { actor, options }
    }

    /// Returns the bound actor.
    pub fn actor(&self) -> &A {
        &self.actor
    }

    /// Returns the options this actor was bound with.
    pub fn options(&self) -> &Options<E> {
        &self.options
    }

    /// Selects the capability group to query.
    pub fn policy<'a, S, X, C>(
        &'a self,
        policy: &'a Policy<A, S, X, C>,
    ) -> PolicyQuery<'a, A, S, X, C, E> {
        PolicyQuery {
            bound: self,
            policy,
        }
    }
}

/// Queries against one capability group for a bound actor.
pub struct PolicyQuery<'a, A, S, X, C, E = MissingCapability> {
    bound: &'a Bound<A, E>,
    policy: &'a Policy<A, S, X, C>,
}

impl<A, S, X, C, E> Clone for PolicyQuery<'_, A, S, X, C, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, S, X, C, E> Copy for PolicyQuery<'_, A, S, X, C, E> {}

impl<'a, A, S, X, C, E> PolicyQuery<'a, A, S, X, C, E>
where
    C: Capability,
{
    /// Returns the policy being queried.
    pub fn policy(&self) -> &'a Policy<A, S, X, C> {
        self.policy
    }

    /// Returns the bound actor.
    pub fn actor(&self) -> &'a A {
        &self.bound.actor
    }

    /// Scopes queries to a single subject.
    pub fn subject(self, subject: &'a S) -> SubjectQuery<'a, A, S, X, C, E> {
        SubjectQuery::new(self, subject)
    }

    /// Scopes queries to a collection of subjects.
    pub fn subjects<I>(self, subjects: I) -> BulkQuery<'a, A, S, X, C, E, S>
    where
        I: IntoIterator<Item = &'a S>,
    {
        let pairs = subjects
            .into_iter()
            .map(|subject| Paired {
                original: subject,
                mapped: Mapped::Borrowed(subject),
            })
            .collect();
        BulkQuery::new(self, pairs)
    }

    /// Scopes queries to a collection of elements, each mapped to a subject.
    ///
    /// [`filter`](BulkQuery::filter) returns the original elements, not the
    /// mapped subjects.
    pub fn subjects_by<T, I, F>(self, elements: I, map: F) -> BulkQuery<'a, A, S, X, C, E, T>
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&T) -> S,
        T: 'a,
    {
        let pairs = elements
            .into_iter()
            .map(|element| Paired {
                original: element,
                mapped: Mapped::Owned(map(element)),
            })
            .collect();
        BulkQuery::new(self, pairs)
    }

    /// Runs the resolver once for `subject` and `args`.
    pub(crate) fn resolve(&self, subject: &S, args: &Args<X>) -> Vec<C> {
        self.policy.resolve(&self.bound.actor, subject, args)
    }

    /// Builds the error for a failed assertion through the configured hook.
    pub(crate) fn reject(&self, capability: &C) -> E {
        debug!(
            policy = self.policy.name(),
            capability = capability.name(),
            "capability assertion failed"
        );
        self.bound.options.reject(MissingCapability::new(capability))
    }
}

/// Subjectless capability groups are queried directly.
impl<'a, A, X, C, E> PolicyQuery<'a, A, (), X, C, E>
where
    C: Capability,
{
    /// Prepares a check of `capability`, with no subject.
    pub fn can(self, capability: C) -> Can<'a, A, (), X, C, E> {
        self.subject(&()).can(capability)
    }

    /// Returns every capability the actor holds, resolved with empty args.
    pub fn list(self) -> Vec<C> {
        self.subject(&()).list()
    }

    /// Returns every capability the actor holds for `args`.
    pub fn list_with(self, args: impl Into<Args<X>>) -> Vec<C> {
        self.subject(&()).list_with(args)
    }
}
