use std::fmt;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::auth::Claims;

/// Why a token did not verify.
#[derive(Debug)]
pub struct VerifyError(JwtError);

impl VerifyError {
    pub fn kind(&self) -> &ErrorKind {
        self.0.kind()
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.0.kind(), ErrorKind::ExpiredSignature)
    }

    /// The token is not a well-formed JWT for us: bad segments, bad base64,
    /// a payload that is not our claims shape, or a missing required claim.
    /// Everything else (bad signature, expired, wrong algorithm) is a
    /// well-formed token that we reject.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self.0.kind(),
            ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_)
        )
    }
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.kind() {
            ErrorKind::ExpiredSignature => f.write_str("jwt expired"),
            ErrorKind::ImmatureSignature => f.write_str("jwt not active"),
            ErrorKind::InvalidSignature => f.write_str("invalid signature"),
            ErrorKind::InvalidAlgorithm => f.write_str("invalid algorithm"),
            ErrorKind::MissingRequiredClaim(claim) => write!(f, "jwt missing required claim: {}", claim),
            ErrorKind::Json(_) => f.write_str("invalid token payload"),
            _ => f.write_str("jwt malformed"),
        }
    }
}

impl std::error::Error for VerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<JwtError> for VerifyError {
    fn from(e: JwtError) -> Self {
        Self(e)
    }
}

/// Turns a bearer token into claims.
///
/// `Ok(None)` means the verifier accepted the token but produced no payload.
pub trait TokenVerifier {
    fn verify(&self, token: &str) -> Result<Option<Claims>, VerifyError>;
}

/// HS256 verifier bound to a single shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material
        f.debug_struct("JwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl JwtVerifier {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;
        // `exp` is checked when the issuer sets it but is not mandatory.
        validation.set_required_spec_claims::<&str>(&[]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Option<Claims>, VerifyError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(Some(data.claims))
    }
}
