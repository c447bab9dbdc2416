use std::ops::Deref;

use tracing::debug;

use crate::args::Args;
use crate::bound::PolicyQuery;
use crate::capability::Capability;
use crate::query::SubjectQuery;

/// A subject in a bulk query, either borrowed from the caller or produced by
/// a mapping function.
#[derive(Debug)]
pub enum Mapped<'a, S> {
    Borrowed(&'a S),
    Owned(S),
}

impl<S> Deref for Mapped<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        match self {
            Mapped::Borrowed(subject) => subject,
            Mapped::Owned(subject) => subject,
        }
    }
}

/// An input element carried alongside the subject it maps to.
///
/// For [`subjects`](PolicyQuery::subjects) the two are the same value.
#[derive(Debug)]
pub struct Paired<'a, T, S> {
    /// The element as supplied by the caller.
    pub original: &'a T,
    /// The subject capabilities are resolved against.
    pub mapped: Mapped<'a, S>,
}

/// Queries over an ordered collection of subjects.
///
/// Every operation resolves each subject independently, in collection order,
/// with no memoization between subjects.
pub struct BulkQuery<'a, A, S, X, C, E, T = S> {
    query: PolicyQuery<'a, A, S, X, C, E>,
    pairs: Vec<Paired<'a, T, S>>,
}

impl<'a, A, S, X, C, E, T> BulkQuery<'a, A, S, X, C, E, T>
where
    C: Capability,
{
    pub(crate) fn new(
        query: PolicyQuery<'a, A, S, X, C, E>,
        pairs: Vec<Paired<'a, T, S>>,
    ) -> Self {
        Self { query, pairs }
    }

    /// Returns the number of subjects.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no subjects.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the elements with their mapped subjects, in order.
    pub fn pairs(&self) -> &[Paired<'a, T, S>] {
        &self.pairs
    }

    /// Prepares a check that at least one subject grants `capability`.
    pub fn any(&self, capability: C) -> Any<'_, 'a, A, S, X, C, E, T> {
        Any {
            bulk: self,
            capability,
            args: Args::new(),
        }
    }

    /// Prepares a check that every subject grants `capability`.
    pub fn all(&self, capability: C) -> All<'_, 'a, A, S, X, C, E, T> {
        All {
            bulk: self,
            capability,
            args: Args::new(),
        }
    }

    /// Returns the original elements whose subjects grant every capability in
    /// `required`, resolved with empty args.
    pub fn filter(&self, required: &[C]) -> Vec<&'a T> {
        self.filter_with(required, Args::new())
    }

    /// Returns the original elements whose subjects grant every capability in
    /// `required` for `args`.
    ///
    /// Order is preserved. Repeated entries in `required` are satisfied by a
    /// single matching capability.
    pub fn filter_with(&self, required: &[C], args: impl Into<Args<X>>) -> Vec<&'a T> {
        let args = args.into();
        let kept: Vec<&'a T> = self
            .pairs
            .iter()
            .filter(|pair| {
                let resolved = self.subject(pair).resolve(&args);
                required.iter().all(|capability| resolved.contains(capability))
            })
            .map(|pair| pair.original)
            .collect();

        debug!(
            policy = self.query.policy().name(),
            kept = kept.len(),
            total = self.pairs.len(),
            "filtered subjects"
        );
        kept
    }

    fn subject<'p>(&self, pair: &'p Paired<'a, T, S>) -> SubjectQuery<'p, A, S, X, C, E>
    where
        'a: 'p,
    {
        let query: PolicyQuery<'p, A, S, X, C, E> = self.query;
        query.subject(&pair.mapped)
    }
}

/// A pending "at least one subject" check.
pub struct Any<'b, 'a, A, S, X, C, E, T> {
    bulk: &'b BulkQuery<'a, A, S, X, C, E, T>,
    capability: C,
    args: Args<X>,
}

impl<A, S, X, C, E, T> Any<'_, '_, A, S, X, C, E, T>
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

    /// Returns `true` if some subject grants the capability.
    ///
    /// Stops at the first subject that does. `false` for an empty collection.
    pub fn check(&self) -> bool {
        self.bulk.pairs.iter().any(|pair| self.holds(pair))
    }

    /// Asserts the capability on each subject in turn.
    ///
    /// This keeps the long-standing behavior of the bulk "any" assertion: it
    /// does not stop at a subject that qualifies. Each subject is asserted in
    /// collection order and the first failure is returned. When no subject
    /// fails the result is `Ok(false)`, since no assertion produced a value.
    /// Use [`assert_some`](Any::assert_some) to require at least one
    /// qualifying subject.
    pub fn assert(&self) -> Result<bool, E> {
        for pair in &self.bulk.pairs {
            if !self.holds(pair) {
                return Err(self.bulk.query.reject(&self.capability));
            }
        }
        Ok(false)
    }

    /// Fails unless at least one subject grants the capability.
    ///
    /// Stops at the first qualifying subject; fails once otherwise.
    pub fn assert_some(&self) -> Result<(), E> {
        if self.check() {
            Ok(())
        } else {
            Err(self.bulk.query.reject(&self.capability))
        }
    }

    fn holds(&self, pair: &Paired<'_, T, S>) -> bool {
        self.bulk
            .query
            .resolve(&pair.mapped, &self.args)
            .contains(&self.capability)
    }
}

/// A pending "every subject" check.
pub struct All<'b, 'a, A, S, X, C, E, T> {
    bulk: &'b BulkQuery<'a, A, S, X, C, E, T>,
    capability: C,
    args: Args<X>,
}

impl<A, S, X, C, E, T> All<'_, '_, A, S, X, C, E, T>
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

    /// Returns `true` if every subject grants the capability.
    ///
    /// Stops at the first subject that does not. `true` for an empty
    /// collection.
    pub fn check(&self) -> bool {
        self.bulk.pairs.iter().all(|pair| {
            self.bulk
                .query
                .resolve(&pair.mapped, &self.args)
                .contains(&self.capability)
        })
    }

    /// Fails once, without naming the subject, unless every subject grants the
    /// capability.
    pub fn assert(&self) -> Result<(), E> {
        if self.check() {
            Ok(())
        } else {
            Err(self.bulk.query.reject(&self.capability))
        }
    }
}
