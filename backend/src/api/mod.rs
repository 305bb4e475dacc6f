pub mod admin;
pub mod basic;
pub mod country;
pub mod learner;
pub mod response;

use actix_web::web;

use crate::config::AuthConfig;

/// Register every route. Each resource scope brings its own guards.
pub fn configure(auth: &AuthConfig) -> impl FnOnce(&mut web::ServiceConfig) + '_ {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(basic::root)
            .service(basic::health_check)
            .service(country::scope(auth))
            .service(learner::scope(auth))
            .service(admin::scope(auth));
    }
}
