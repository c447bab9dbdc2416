use crate::args::Args;

/// The inputs to one resolver invocation: who is acting, on what, and with
/// which arguments.
///
/// Subjectless policies use `()` as the subject type.
#[derive(Debug)]
pub struct Context<'a, A, S, X> {
    /// The acting identity.
    pub actor: &'a A,
    /// The object being acted upon.
    pub subject: &'a S,
    /// Arguments supplied with the query; empty when the caller gave none.
    pub args: &'a Args<X>,
}

impl<A, S, X> Clone for Context<'_, A, S, X> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, S, X> Copy for Context<'_, A, S, X> {}

/// Records the capability batches a resolver emits.
///
/// A resolver writes its grants as a series of conditional batches and ends
/// with an explicit final batch:
///
/// ```
/// use capgate::Grants;
///
/// let is_owner = true;
/// let is_admin = false;
///
/// let mut grants = Grants::new();
/// grants.grant(["read"]);
/// grants.grant_if(is_owner, ["update", "delete"]);
/// grants.grant_if(is_admin, ["set_role"]);
/// let resolution = grants.finish([]);
///
/// assert_eq!(capgate::collect(resolution), vec!["read", "update", "delete"]);
/// ```
///
/// Every branch is evaluated; batches are not lazy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grants<C> {
    batches: Vec<Vec<C>>,
}

impl<C> Grants<C> {
    /// Creates a builder with no batches.
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
        }
    }

    /// Records a batch of capabilities.
    pub fn grant<I>(&mut self, batch: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
    {
        self.batches.push(batch.into_iter().collect());
        self
    }

    /// Records a batch of capabilities when `condition` holds.
    pub fn grant_if<I>(&mut self, condition: bool, batch: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
    {
        if condition {
            self.grant(batch);
        }
        self
    }

    /// Ends the sequence with a final batch.
    pub fn finish<I>(self, last: I) -> Resolution<C>
    where
        I: IntoIterator<Item = C>,
    {
        Resolution {
            batches: self.batches,
            last: last.into_iter().collect(),
        }
    }

    /// A resolution that grants nothing, for early returns.
    pub fn none() -> Resolution<C> {
        Resolution {
            batches: Vec::new(),
            last: Vec::new(),
        }
    }
}

impl<C> Default for Grants<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The ordered batches produced by one resolver invocation, terminated by an
/// explicit final batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<C> {
    batches: Vec<Vec<C>>,
    last: Vec<C>,
}

impl<C> Resolution<C> {
    /// Returns the batches recorded before the final one.
    pub fn batches(&self) -> &[Vec<C>] {
        &self.batches
    }

    /// Returns the final batch.
    pub fn last(&self) -> &[C] {
        &self.last
    }

    /// Consumes the resolution, yielding every batch in emission order with
    /// the final batch last.
    pub fn into_batches(self) -> impl Iterator<Item = Vec<C>> {
        self.batches.into_iter().chain(std::iter::once(self.last))
    }
}

/// A constant capability list is a resolution whose only batch is that list.
impl<C> From<Vec<C>> for Resolution<C> {
    fn from(capabilities: Vec<C>) -> Self {
        Grants::new().finish(capabilities)
    }
}
