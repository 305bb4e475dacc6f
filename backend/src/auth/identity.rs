//! Verified identities attached to a request by the guards.
//!
//! The canonical read path is [`AuthIdentity`]. [`AdminIdentity`] and
//! [`LearnerIdentity`] are the role-specific read paths. The plain
//! authenticated guard fills both of them with the same claims whatever the
//! token's role, so handlers written against either keep working behind it.

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

use crate::auth::{AuthError, Claims, Role};

const NOT_ATTACHED: &str = "Authentication required";

#[derive(Debug, Clone, PartialEq)]
pub struct AuthIdentity {
    pub role: Option<Role>,
    pub claims: Claims,
}

impl AuthIdentity {
    pub fn new(claims: Claims) -> Self {
        Self {
            role: claims.known_role(),
            claims,
        }
    }
}

impl Deref for AuthIdentity {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.claims
    }
}

/// Claims attached under the `admin` key.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminIdentity(pub Claims);

/// Claims attached under the `learner` key.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnerIdentity(pub Claims);

impl Deref for AdminIdentity {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.0
    }
}

impl Deref for LearnerIdentity {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.0
    }
}

fn from_extensions<T: Clone + 'static>(req: &HttpRequest) -> Ready<Result<T, AuthError>> {
    ready(
        req.extensions()
            .get::<T>()
            .cloned()
            .ok_or_else(|| AuthError::unauthenticated(NOT_ATTACHED)),
    )
}

impl FromRequest for AuthIdentity {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        from_extensions(req)
    }
}

impl FromRequest for AdminIdentity {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        from_extensions(req)
    }
}

impl FromRequest for LearnerIdentity {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        from_extensions(req)
    }
}
