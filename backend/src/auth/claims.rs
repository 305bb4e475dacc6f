use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Roles the platform issues tokens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Learner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Learner => "learner",
        }
    }

    /// Plural used in "Only admins can access this route." style messages.
    pub fn plural(&self) -> &'static str {
        match self {
            Role::Admin => "admins",
            Role::Learner => "learners",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    // Role names are matched exactly, the issuer writes them lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "learner" => Ok(Role::Learner),
            _ => Err(()),
        }
    }
}

/// `sub` as the issuer wrote it: usually the numeric row id or a string,
/// anything else is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Id(i64),
    Name(String),
    Other(Value),
}

impl Subject {
    pub fn as_id(&self) -> Option<i32> {
        match self {
            Subject::Id(id) => i32::try_from(*id).ok(),
            Subject::Name(name) => name.parse().ok(),
            Subject::Other(_) => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Id(id) => write!(f, "{}", id),
            Subject::Name(name) => f.write_str(name),
            Subject::Other(value) => write!(f, "{}", value),
        }
    }
}

// JWT payload written by the token issuer. Only `role` is required; `exp` is
// enforced when present. Whatever else the issuer puts in the token is kept in
// `extra` so handlers can still read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Subject>,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// The role as a known [`Role`], `None` for roles this service does not know.
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role.as_str()
    }

    /// Only an explicit `true` counts as active.
    pub fn is_active(&self) -> bool {
        self.is_active == Some(true)
    }

    /// Numeric primary key carried in `sub`, if any.
    pub fn subject_id(&self) -> Option<i32> {
        self.sub.as_ref().and_then(Subject::as_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_claims_are_preserved() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "7",
            "role": "learner",
            "is_active": true,
            "exp": 2_000_000_000u64,
            "email": "ada@example.com"
        }))
        .unwrap();

        assert_eq!(claims.known_role(), Some(Role::Learner));
        assert_eq!(claims.subject_id(), Some(7));
        assert_eq!(claims.extra.get("email"), Some(&Value::from("ada@example.com")));
    }

    #[test]
    fn missing_is_active_is_not_active() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "role": "admin",
            "exp": 2_000_000_000u64
        }))
        .unwrap();

        assert!(!claims.is_active());
        assert!(claims.has_role(Role::Admin));
        assert_eq!(claims.subject_id(), None);
    }

    #[test]
    fn numeric_sub_and_missing_exp_are_accepted() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": 12,
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(claims.sub, Some(Subject::Id(12)));
        assert_eq!(claims.subject_id(), Some(12));
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn non_numeric_sub_has_no_id() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "ada@example.com",
            "role": "learner"
        }))
        .unwrap();

        assert_eq!(claims.sub.as_ref().map(ToString::to_string).as_deref(), Some("ada@example.com"));
        assert_eq!(claims.subject_id(), None);

        let huge: Claims =
            serde_json::from_value(serde_json::json!({"sub": 1u64 << 40, "role": "learner"})).unwrap();
        assert_eq!(huge.subject_id(), None);

        let odd: Claims =
            serde_json::from_value(serde_json::json!({"sub": 1.5, "role": "learner"})).unwrap();
        assert_eq!(odd.sub, Some(Subject::Other(Value::from(1.5))));
        assert_eq!(odd.subject_id(), None);
    }

    #[test]
    fn role_match_is_case_sensitive() {
        assert_eq!("Admin".parse::<Role>(), Err(()));
        assert_eq!("learner".parse::<Role>(), Ok(Role::Learner));
    }
}
