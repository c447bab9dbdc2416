use std::fmt;
use std::marker::PhantomData;

use crate::args::Args;
use crate::capability::Capability;
use crate::collector::collect;
use crate::resolver::{Context, Resolution};

type ResolveFn<A, S, X, C> = dyn Fn(&Context<'_, A, S, X>) -> Resolution<C> + Send + Sync;

/// A capability group: the resolver that decides which capabilities an actor
/// holds on one kind of subject.
///
/// The type parameters are the actor type `A`, the subject type `S` (`()` for
/// subjectless groups), the argument enum `X` and the capability type `C`.
/// A policy holds no state besides its resolver, so it can be shared freely
/// between requests.
///
/// # Example
///
/// ```
/// use capgate::{Context, Grants, NoArgs, Policy};
///
/// struct User {
///     is_admin: bool,
/// }
///
/// let projects = Policy::new("project", |ctx: &Context<'_, User, (), NoArgs>| {
///     let mut grants = Grants::new();
///     grants.grant_if(ctx.actor.is_admin, ["write"]);
///     grants.finish(["read"])
/// });
///
/// let admin = capgate::bind(User { is_admin: true });
/// assert_eq!(admin.policy(&projects).list(), vec!["write", "read"]);
/// ```
pub struct Policy<A, S, X, C> {
    name: &'static str,
    resolver: Box<ResolveFn<A, S, X, C>>,
    _types: PhantomData<fn(&A, &S, &X)>,
}

impl<A, S, X, C: Capability> Policy<A, S, X, C> {
    /// Creates a policy from a resolver function.
    pub fn new<F>(name: &'static str, resolver: F) -> Self
    where
        F: Fn(&Context<'_, A, S, X>) -> Resolution<C> + Send + Sync + 'static,
    {
        Self {
            name,
            resolver: Box::new(resolver),
            _types: PhantomData,
        }
    }

    /// Creates a policy that grants the same capabilities regardless of actor,
    /// subject or arguments.
    pub fn fixed<I>(name: &'static str, capabilities: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Send + Sync + 'static,
    {
        let capabilities: Vec<C> = capabilities.into_iter().collect();
        Self::new(name, move |_| Resolution::from(capabilities.clone()))
    }

    /// Returns the name of this capability group.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the resolver once and returns the resolved capability set.
    pub fn resolve(&self, actor: &A, subject: &S, args: &Args<X>) -> Vec<C> {
        let ctx = Context {
            actor,
            subject,
            args,
        };
        collect((self.resolver)(&ctx))
    }
}

impl<A, S, X, C> fmt::Debug for Policy<A, S, X, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy").field("name", &self.name).finish()
    }
}
