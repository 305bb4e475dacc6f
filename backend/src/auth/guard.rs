use actix_web::dev::Extensions;
use actix_web::http::header::HeaderMap;

use crate::auth::bearer::{bearer_from_headers, parse_bearer, Bearer, BearerError};
use crate::auth::identity::{AdminIdentity, AuthIdentity, LearnerIdentity};
use crate::auth::verifier::{JwtVerifier, TokenVerifier};
use crate::auth::{AuthError, Claims, Role};
use crate::config::AuthConfig;

/// How a guard classifies verification failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
    /// Every verification failure is a 401.
    Lenient,
    /// Tokens that are not a JWT at all are reported as 400 with the
    /// verifier's message; rejected tokens stay 401.
    Strict,
}

/// Wording of the 401 rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardMessages {
    pub missing: &'static str,
    pub malformed: &'static str,
    pub invalid: &'static str,
}

impl GuardMessages {
    pub const GENERIC: Self = Self {
        missing: "Token is not given in header",
        malformed: "Bearer and Token are not given",
        invalid: "Token couldnt verificate!",
    };

    pub const ADMIN: Self = Self {
        missing: "Token is not given in Header",
        malformed: "Bearer and Token are not given",
        invalid: "Token can not verificate!",
    };

    pub const OPAQUE: Self = Self {
        missing: "Unauthorized user",
        malformed: "Unauthorized user",
        invalid: "Unauthorized user",
    };
}

/// What a guard checks after the token verified, and where it attaches the
/// identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    pub name: &'static str,
    pub expected_role: Option<Role>,
    pub require_active: bool,
    pub error_style: ErrorStyle,
    pub messages: GuardMessages,
    pub attach_admin: bool,
    pub attach_learner: bool,
}

impl GuardPolicy {
    /// Any verified token. Claims land under both role keys.
    pub fn authenticated() -> Self {
        Self {
            name: "jwt",
            expected_role: None,
            require_active: false,
            error_style: ErrorStyle::Lenient,
            messages: GuardMessages::GENERIC,
            attach_admin: true,
            attach_learner: true,
        }
    }

    /// `role == admin`. The active flag is not checked for admins.
    pub fn admin() -> Self {
        Self {
            name: "admin",
            expected_role: Some(Role::Admin),
            require_active: false,
            error_style: ErrorStyle::Lenient,
            messages: GuardMessages::ADMIN,
            attach_admin: true,
            attach_learner: false,
        }
    }

    /// `role == learner` and `is_active == true`.
    pub fn learner() -> Self {
        Self {
            name: "learner",
            expected_role: Some(Role::Learner),
            require_active: true,
            error_style: ErrorStyle::Strict,
            messages: GuardMessages::OPAQUE,
            attach_admin: false,
            attach_learner: true,
        }
    }
}

pub fn access_denied(role: Role) -> AuthError {
    AuthError::forbidden(format!(
        "Access denied! Only {} can access this route.",
        role.plural()
    ))
}

/// Extract, verify, check role. One instance per verification key.
#[derive(Debug, Clone)]
pub struct AccessGuard<V = JwtVerifier> {
    verifier: V,
    policy: GuardPolicy,
}

impl AccessGuard<JwtVerifier> {
    pub fn authenticated(config: &AuthConfig) -> Self {
        Self::new(
            JwtVerifier::new(&config.access_token_key, config.leeway_seconds),
            GuardPolicy::authenticated(),
        )
    }

    pub fn admin(config: &AuthConfig) -> Self {
        Self::new(
            JwtVerifier::new(&config.admin_access_token_key, config.leeway_seconds),
            GuardPolicy::admin(),
        )
    }

    pub fn learner(config: &AuthConfig) -> Self {
        Self::new(
            JwtVerifier::new(&config.learner_access_token_key, config.leeway_seconds),
            GuardPolicy::learner(),
        )
    }
}

impl<V: TokenVerifier> AccessGuard<V> {
    pub fn new(verifier: V, policy: GuardPolicy) -> Self {
        Self { verifier, policy }
    }

    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Decide on a raw `Authorization` value. Pure: the same input always
    /// gives the same decision and nothing is written anywhere.
    pub fn evaluate(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        self.decide(parse_bearer(header))
    }

    pub fn evaluate_headers(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        self.decide(bearer_from_headers(headers))
    }

    /// Write the identity into the request extensions.
    pub fn attach(&self, extensions: &mut Extensions, claims: Claims) {
        if self.policy.attach_admin {
            extensions.insert(AdminIdentity(claims.clone()));
        }
        if self.policy.attach_learner {
            extensions.insert(LearnerIdentity(claims.clone()));
        }
        extensions.insert(AuthIdentity::new(claims));
    }

    fn decide(&self, bearer: Result<Bearer<'_>, BearerError>) -> Result<Claims, AuthError> {
        let messages = self.policy.messages;

        let bearer = bearer.map_err(|e| match e {
            BearerError::Missing => AuthError::unauthenticated(messages.missing),
            BearerError::Malformed => AuthError::malformed(messages.malformed),
        })?;

        let claims = match self.verifier.verify(bearer.token) {
            Ok(Some(claims)) => claims,
            Ok(None) => return Err(AuthError::unauthenticated(messages.invalid)),
            Err(err) if self.policy.error_style == ErrorStyle::Strict && err.is_malformed() => {
                return Err(AuthError::bad_request(err.to_string()));
            }
            Err(err) => return Err(AuthError::invalid_token(messages.invalid, err.to_string())),
        };

        if let Some(role) = self.policy.expected_role {
            if !claims.has_role(role) || (self.policy.require_active && !claims.is_active()) {
                return Err(access_denied(role));
            }
        }

        Ok(claims)
    }
}
