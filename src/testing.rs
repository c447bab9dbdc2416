//! User-management fixture shared by the query tests.

use crate::capability::Capability;
use crate::policy::Policy;
use crate::resolver::{Context, Grants};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum Role {
    User,
    Moderator,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: String,
    pub role: Role,
    pub is_banned: bool,
}

impl UserData {
    pub fn new(user_id: &str, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            role,
            is_banned: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCap {
    Read,
    Create,
    Update,
    Delete,
    SetRole,
}

impl Capability for UserCap {
    fn name(&self) -> &str {
        match self {
            UserCap::Read => "read",
            UserCap::Create => "create",
            UserCap::Update => "update",
            UserCap::Delete => "delete",
            UserCap::SetRole => "set_role",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum UserArg {
    Delete { delayed: bool },
    SetRole { role: Role },
}

pub fn user_policy() -> Policy<UserData, UserData, UserArg, UserCap> {
    Policy::new("user", |ctx: &Context<'_, UserData, UserData, UserArg>| {
        let (actor, subject) = (ctx.actor, ctx.subject);

        // banned users can't do anything
        if actor.is_banned {
            return Grants::none();
        }

        let mut grants = Grants::new();
        grants.grant([UserCap::Read]);

        grants.grant_if(
            actor.user_id == subject.user_id,
            [UserCap::Update, UserCap::Delete],
        );

        // admins can only delete other users with a delay
        if actor.role == Role::Admin {
            grants.grant([UserCap::Create, UserCap::Update, UserCap::SetRole]);
            let delayed = ctx.args.any(|arg| matches!(arg, UserArg::Delete { delayed: true }));
            grants.grant_if(delayed, [UserCap::Delete]);
        }

        let assignable = ctx.args.any(|arg| {
            matches!(
                arg,
                UserArg::SetRole {
                    role: Role::User | Role::Moderator
                }
            )
        });
        grants.grant_if(
            actor.role == Role::Moderator && assignable && subject.role != Role::Admin,
            [UserCap::SetRole],
        );

        grants.finish([])
    })
}
