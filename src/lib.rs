//! Capgate: A library for resolving and checking actor capabilities in application backends.
//!
//! Capgate runs **policies** for a bound **actor** to produce the set of
//! **capabilities** the actor holds on a subject, then answers check, assert,
//! list and bulk filter queries from that set.
//!
//! # Example
//!
//! ```
//! use capgate::{Capability, Context, Grants, Policy};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     id: u32,
//!     is_admin: bool,
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum UserCap {
//!     Read,
//!     Update,
//!     Delete,
//! }
//!
//! impl Capability for UserCap {
//!     fn name(&self) -> &str {
//!         match self {
//!             UserCap::Read => "read",
//!             UserCap::Update => "update",
//!             UserCap::Delete => "delete",
//!         }
//!     }
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum UserArg {
//!     Delete { delayed: bool },
//! }
//!
//! let users = Policy::new("user", |ctx: &Context<'_, User, User, UserArg>| {
//!     let mut grants = Grants::new();
//!     // Everyone can read users
//!     grants.grant([UserCap::Read]);
//!     // Users can update themselves
//!     grants.grant_if(ctx.actor.id == ctx.subject.id, [UserCap::Update]);
//!     // Admins can delete, but only with a delay
//!     let delayed = ctx.args.any(|arg| matches!(arg, UserArg::Delete { delayed: true }));
//!     grants.grant_if(ctx.actor.is_admin && delayed, [UserCap::Delete]);
//!     grants.finish([])
//! });
//!
//! let alice = User { id: 1, is_admin: true };
//! let bob = User { id: 2, is_admin: false };
//!
//! let actor = capgate::bind(alice.clone());
//! let on_bob = actor.policy(&users).subject(&bob);
//!
//! assert!(on_bob.can(UserCap::Read).check());
//! assert!(on_bob.can(UserCap::Update).assert().is_err());
//! assert!(on_bob.can(UserCap::Delete).with(UserArg::Delete { delayed: true }).check());
//! assert_eq!(on_bob.list(), vec![UserCap::Read]);
//!
//! let everyone = [alice.clone(), bob.clone()];
//! let editable = actor.policy(&users).subjects(&everyone).filter(&[UserCap::Update]);
//! assert_eq!(editable, vec![&alice]);
//! ```

mod args;
mod bound;
mod bulk;
mod capability;
mod collector;
mod error;
mod options;
mod policy;
mod query;
mod resolver;

#[cfg(feature = "json")]
pub mod json;

#[cfg(test)]
mod testing;

pub use args::{Args, NoArgs};
pub use bound::{Bound, PolicyQuery, bind, bind_with};
pub use bulk::{All, Any, BulkQuery, Mapped, Paired};
pub use capability::Capability;
pub use collector::collect;
pub use error::MissingCapability;
pub use options::Options;
pub use policy::Policy;
pub use query::{Can, SubjectQuery};
pub use resolver::{Context, Grants, Resolution};
