//! JSON integration.
//!
//! Web backends usually receive query arguments and return authorization
//! failures as JSON. This module decodes argument objects into [`Args`] and
//! serializes [`MissingCapability`] as `{"capability": "<name>"}`.
//!
//! Arguments are keyed by capability name, one entry per capability that
//! takes arguments. The argument enum must deserialize from the externally
//! tagged form, which is serde's default for enums:
//!
//! ```
//! use capgate::Args;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq, Deserialize)]
//! #[serde(rename_all = "snake_case")]
//! enum UserArg {
//!     Delete { delayed: bool },
//!     SetRole { role: String },
//! }
//!
//! let args: Args<UserArg> = Args::from_json(&json!({
//!     "delete": { "delayed": true },
//!     "set_role": { "role": "admin" },
//! }))
//! .unwrap();
//!
//! assert_eq!(args.len(), 2);
//! assert!(args.any(|arg| *arg == UserArg::Delete { delayed: true }));
//! ```

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{Map, Value};

use crate::args::Args;
use crate::error::MissingCapability;

impl<X: DeserializeOwned> Args<X> {
    /// Decodes an argument object keyed by capability name.
    ///
    /// `null` and a missing object both decode to empty args. Entries whose
    /// value is `null` are skipped. Any other non-object input is an error.
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        let entries = match value {
            Value::Null => return Ok(Args::new()),
            Value::Object(entries) => entries,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "expected an object of capability arguments, found {}",
                    kind_of(other)
                )));
            }
        };

        entries
            .iter()
            .filter(|(_, arg)| !arg.is_null())
            .map(|(capability, arg)| {
                let mut tagged = Map::new();
                tagged.insert(capability.clone(), arg.clone());
                serde_json::from_value(Value::Object(tagged))
            })
            .collect()
    }

    /// Decodes an argument object from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(&value)
    }
}

impl Serialize for MissingCapability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MissingCapability", 1)?;
        state.serialize_field("capability", self.capability())?;
        state.end()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Role {
        User,
        Moderator,
        Admin,
    }

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum UserArg {
        Delete { delayed: bool },
        SetRole { role: Role },
    }

    #[test]
    fn test_from_json_object() {
        let args: Args<UserArg> = Args::from_json(&json!({
            "set_role": { "role": "moderator" },
        }))
        .unwrap();

        assert_eq!(
            args,
            Args::from(UserArg::SetRole {
                role: Role::Moderator
            })
        );
    }

    #[test]
    fn test_from_json_empty_and_null() {
        let empty: Args<UserArg> = Args::from_json(&json!({})).unwrap();
        assert!(empty.is_empty());

        let null: Args<UserArg> = Args::from_json(&Value::Null).unwrap();
        assert!(null.is_empty());

        let skipped: Args<UserArg> = Args::from_json(&json!({ "delete": null })).unwrap();
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_from_json_unknown_capability() {
        let result: Result<Args<UserArg>, _> = Args::from_json(&json!({ "archive": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_wrong_shape() {
        let result: Result<Args<UserArg>, _> =
            Args::from_json(&json!({ "delete": { "delayed": "soon" } }));
        assert!(result.is_err());

        let err = Args::<UserArg>::from_json(&json!(["delete"])).unwrap_err();
        assert!(err.to_string().contains("found an array"));
    }

    #[test]
    fn test_from_json_str() {
        let args: Args<UserArg> =
            Args::from_json_str(r#"{"delete": {"delayed": false}}"#).unwrap();
        assert_eq!(args, Args::from(UserArg::Delete { delayed: false }));
        assert!(Args::<UserArg>::from_json_str("not json").is_err());
    }

    #[test]
    fn test_missing_capability_body() {
        let err = MissingCapability::new(&"update");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "capability": "update" })
        );
    }

    #[test]
    fn test_args_drive_resolution() {
        use crate::bound::bind;
        use crate::testing::{Role as FixtureRole, UserCap, UserData, user_policy};

        let admin = UserData::new("1", FixtureRole::Admin);
        let other = UserData::new("2", FixtureRole::User);
        let bound = bind(admin);
        let users = user_policy();

        let args: Args<crate::testing::UserArg> = Args::from_json(&json!({
            "delete": { "delayed": true },
        }))
        .unwrap();
        assert!(
            bound
                .policy(&users)
                .subject(&other)
                .list_with(args)
                .contains(&UserCap::Delete)
        );
    }
}
