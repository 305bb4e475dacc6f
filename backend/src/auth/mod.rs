pub mod bearer;
pub mod claims;
pub mod error;
pub mod guard;
pub mod identity;
pub mod middleware;
pub mod role_guard;
pub mod verifier;

pub use claims::{Claims, Role, Subject};
pub use error::AuthError;
pub use guard::{AccessGuard, ErrorStyle, GuardMessages, GuardPolicy};
pub use identity::{AdminIdentity, AuthIdentity, LearnerIdentity};
pub use middleware::JwtAuth;
pub use role_guard::RoleGuard;
pub use verifier::{JwtVerifier, TokenVerifier, VerifyError};
