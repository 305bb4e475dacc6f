use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::{debug, warn};

use crate::auth::guard::access_denied;
use crate::auth::{AuthError, AuthIdentity, Role};

/// Role check on top of [`JwtAuth`](crate::auth::JwtAuth).
///
/// Reads the identity a token guard attached earlier in the chain; it never
/// looks at the token itself. Register it inside the token guard (actix runs
/// the last `wrap` first, so wrap the token guard after this one).
#[derive(Debug, Clone, Copy)]
pub struct RoleGuard {
    role: Role,
}

impl RoleGuard {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin)
    }

    pub fn check(&self, identity: Option<&AuthIdentity>) -> Result<(), AuthError> {
        match identity {
            Some(identity) if identity.role == Some(self.role) => Ok(()),
            Some(_) => Err(access_denied(self.role)),
            None => Err(AuthError::forbidden("Authentication required")),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RoleGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardMiddleware {
            service,
            role: self.role,
        }))
    }
}

pub struct RoleGuardMiddleware<S> {
    service: S,
    role: Role,
}

impl<S, B> Service<ServiceRequest> for RoleGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let result = RoleGuard::new(self.role).check(req.extensions().get::<AuthIdentity>());

        match result {
            Ok(()) => {
                debug!("{} role granted for path: {}", self.role, req.path());
                Box::pin(self.service.call(req))
            }
            Err(err) => {
                warn!("{} role denied for path: {}: {}", self.role, req.path(), err);
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}
