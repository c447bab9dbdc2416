//! Capgate demo
//!
//! Evaluates the user-management policy for an actor and a subject given on
//! the command line and prints the capabilities the actor holds.
//!
//! # Usage
//!
//! ```bash
//! capgate-demo --actor-id 1 --actor-role admin --subject-id 2 \
//!     --args '{"delete": {"delayed": true}}' --require delete
//! ```

use capgate::{Args, Capability, Context, Grants, MissingCapability, Options, Policy};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "capgate-demo")]
#[command(about = "Evaluate the Capgate user-management policy")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Id of the acting user
    #[arg(long)]
    actor_id: String,

    /// Role of the acting user
    #[arg(long, value_enum, default_value_t = Role::User)]
    actor_role: Role,

    /// Treat the acting user as banned
    #[arg(long)]
    banned: bool,

    /// Id of the user being acted upon
    #[arg(long)]
    subject_id: String,

    /// Role of the user being acted upon
    #[arg(long, value_enum, default_value_t = Role::User)]
    subject_role: Role,

    /// Capability arguments as a JSON object, e.g. '{"delete": {"delayed": true}}'
    #[arg(long)]
    args: Option<String>,

    /// Print whether the actor holds this capability
    #[arg(long, value_enum)]
    check: Option<UserCap>,

    /// Fail unless the actor holds this capability
    #[arg(long, value_enum)]
    require: Option<UserCap>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Role {
    User,
    Moderator,
    Admin,
}

#[derive(Debug, Clone)]
struct User {
    user_id: String,
    role: Role,
    is_banned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UserCap {
    Read,
    Create,
    Update,
    Delete,
    #[value(name = "set_role")]
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

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum UserArg {
    Delete { delayed: bool },
    SetRole { role: Role },
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("forbidden: {0}")]
    Forbidden(#[from] MissingCapability),

    #[error("invalid --args: {0}")]
    Args(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "capgate_demo=trace,capgate=trace"
    } else {
        "capgate_demo=info,capgate=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    let args: Args<UserArg> = match &cli.args {
        Some(raw) => Args::from_json_str(raw)?,
        None => Args::new(),
    };
    debug!("Parsed {} capability argument(s)", args.len());

    let actor = User {
        user_id: cli.actor_id.clone(),
        role: cli.actor_role,
        is_banned: cli.banned,
    };
    let subject = User {
        user_id: cli.subject_id.clone(),
        role: cli.subject_role,
        is_banned: false,
    };

    let users = create_user_policy();
    let bound = capgate::bind_with(
        actor,
        Options::new().create_error(|err: MissingCapability| {
            warn!("Rejecting request: {}", err);
            DemoError::Forbidden(err)
        }),
    );
    info!(
        "Evaluating policy '{}' for actor {} on subject {}",
        users.name(),
        cli.actor_id,
        cli.subject_id
    );

    let query = bound.policy(&users).subject(&subject);
    let held = query.list_with(args.clone());
    let names: Vec<&str> = held.iter().map(|cap| cap.name()).collect();

    if cli.json {
        let body = serde_json::json!({
            "policy": users.name(),
            "capabilities": names,
        });
        println!("{}", body);
    } else {
        println!("{}", names.join(" "));
    }

    if let Some(cap) = cli.check {
        let held = query.can(cap).with_args(args.clone()).check();
        if cli.json {
            println!("{}", serde_json::json!({ "capability": cap.name(), "held": held }));
        } else {
            println!("{}: {}", cap.name(), held);
        }
    }

    if let Some(cap) = cli.require {
        let result = query.can(cap).with_args(args).assert();
        if let Err(DemoError::Forbidden(missing)) = &result {
            if cli.json {
                println!("{}", serde_json::to_string(missing)?);
            }
        }
        result?;
        info!("Actor holds required capability '{}'", cap.name());
    }

    Ok(())
}

/// Creates the user-management policy.
///
/// Banned users hold nothing. Everyone can read, users can update and delete
/// themselves, admins can create, update and assign roles and can delete
/// other users only with a delay, and moderators can assign the user and
/// moderator roles to anyone but admins.
///
/// These are the rules of the library's unit-test fixture (`src/testing.rs`);
/// keep the two in step.
fn create_user_policy() -> Policy<User, User, UserArg, UserCap> {
    Policy::new("user", |ctx: &Context<'_, User, User, UserArg>| {
        let (actor, subject) = (ctx.actor, ctx.subject);

        if actor.is_banned {
            return Grants::none();
        }

        let mut grants = Grants::new();
        grants.grant([UserCap::Read]);
        grants.grant_if(
            actor.user_id == subject.user_id,
            [UserCap::Update, UserCap::Delete],
        );

        if actor.role == Role::Admin {
            grants.grant([UserCap::Create, UserCap::Update, UserCap::SetRole]);
            let delayed = ctx
                .args
                .any(|arg| matches!(arg, UserArg::Delete { delayed: true }));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> User {
        User {
            user_id: id.to_string(),
            role,
            is_banned: false,
        }
    }

    #[test]
    fn test_default_policy_self() {
        let users = create_user_policy();
        let me = user("1", Role::User);
        let bound = capgate::bind(me.clone());

        assert_eq!(
            bound.policy(&users).subject(&me).list(),
            vec![UserCap::Read, UserCap::Update, UserCap::Delete]
        );
    }

    #[test]
    fn test_default_policy_json_args() {
        let users = create_user_policy();
        let bound = capgate::bind(user("1", Role::Admin));
        let other = user("2", Role::User);
        let args: Args<UserArg> = Args::from_json_str(r#"{"delete": {"delayed": true}}"#).unwrap();

        assert!(
            bound
                .policy(&users)
                .subject(&other)
                .can(UserCap::Delete)
                .with_args(args)
                .check()
        );
    }

    #[test]
    fn test_forbidden_message() {
        let users = create_user_policy();
        let bound = capgate::bind_with(
            user("1", Role::User),
            Options::new().create_error(DemoError::Forbidden),
        );
        let other = user("2", Role::User);

        let err = bound
            .policy(&users)
            .subject(&other)
            .can(UserCap::Update)
            .assert()
            .unwrap_err();
        assert_eq!(err.to_string(), "forbidden: Missing capability: 'update'");
    }

    #[test]
    fn test_default_policy_moderator_and_banned() {
        let users = create_user_policy();
        let moderator = capgate::bind(user("1", Role::Moderator));
        let admin = user("3", Role::Admin);
        let other = user("2", Role::User);
        let promote = UserArg::SetRole {
            role: Role::Moderator,
        };

        let on_other = moderator.policy(&users).subject(&other);
        assert!(on_other.can(UserCap::SetRole).with(promote.clone()).check());
        let on_admin = moderator.policy(&users).subject(&admin);
        assert!(!on_admin.can(UserCap::SetRole).with(promote).check());

        let mut banned = user("4", Role::Admin);
        banned.is_banned = true;
        let bound = capgate::bind(banned);
        assert!(bound.policy(&users).subject(&other).list().is_empty());
    }

    #[test]
    fn test_run_require_reports_message() {
        let cli = Cli::try_parse_from([
            "capgate-demo",
            "--actor-id",
            "1",
            "--subject-id",
            "2",
            "--require",
            "update",
        ])
        .unwrap();

        let err = run(&cli).unwrap_err();
        assert_eq!(err.to_string(), "forbidden: Missing capability: 'update'");
    }

    #[test]
    fn test_run_require_held() {
        let cli = Cli::try_parse_from([
            "capgate-demo",
            "--actor-id",
            "1",
            "--subject-id",
            "1",
            "--require",
            "delete",
        ])
        .unwrap();

        assert!(run(&cli).is_ok());
    }
}
