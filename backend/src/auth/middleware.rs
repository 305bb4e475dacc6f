use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::{debug, warn};

use crate::auth::guard::AccessGuard;
use crate::auth::verifier::{JwtVerifier, TokenVerifier};
use crate::config::AuthConfig;

// Auth middleware factory. Any `TokenVerifier` can back it; the constructors
// below use the HS256 keys from `AuthConfig`.
pub struct JwtAuth<V = JwtVerifier> {
    guard: Rc<AccessGuard<V>>,
}

impl<V: TokenVerifier> JwtAuth<V> {
    pub fn new(guard: AccessGuard<V>) -> Self {
        Self {
            guard: Rc::new(guard),
        }
    }
}

impl JwtAuth {
    /// Any valid token signed with the access key.
    pub fn authenticated(config: &AuthConfig) -> Self {
        Self::new(AccessGuard::authenticated(config))
    }

    /// Admin tokens signed with the admin key.
    pub fn admin(config: &AuthConfig) -> Self {
        Self::new(AccessGuard::admin(config))
    }

    /// Active learner tokens signed with the learner key.
    pub fn learner(config: &AuthConfig) -> Self {
        Self::new(AccessGuard::learner(config))
    }
}

// Middleware factory implementation
impl<S, B, V> Transform<S, ServiceRequest> for JwtAuth<V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    V: TokenVerifier + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddleware<S, V>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service,
            guard: self.guard.clone(),
        }))
    }
}

// Middleware service
pub struct JwtAuthMiddleware<S, V = JwtVerifier> {
    service: S,
    guard: Rc<AccessGuard<V>>,
}

impl<S, B, V> Service<ServiceRequest> for JwtAuthMiddleware<S, V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
    V: TokenVerifier + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let guard_name = self.guard.policy().name;

        // The whole decision is made before anything is attached, so a
        // rejected or dropped request never carries a partial identity.
        match self.guard.evaluate_headers(req.headers()) {
            Ok(claims) => {
                debug!(
                    "{} guard accepted role {} for path: {}",
                    guard_name,
                    claims.role,
                    req.path()
                );
                self.guard.attach(&mut req.extensions_mut(), claims);

                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(err) => {
                warn!(
                    "{} guard rejected request to {} ({}): {}",
                    guard_name,
                    req.path(),
                    err.kind(),
                    err
                );
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}
