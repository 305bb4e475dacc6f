use actix_web::http::header::{HeaderMap, HeaderValue, AUTHORIZATION};

pub const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    /// No `Authorization` header at all.
    Missing,
    /// Header present but not `Bearer <token>`.
    Malformed,
}

/// A parsed `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bearer<'a> {
    pub scheme: &'a str,
    pub token: &'a str,
}

/// Parse a raw `Authorization` value into scheme and token.
///
/// The value is split on the first space. The scheme must be exactly
/// `Bearer` and the token must be a single non-empty word.
pub fn parse_bearer(header: Option<&str>) -> Result<Bearer<'_>, BearerError> {
    let value = header.ok_or(BearerError::Missing)?;

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Malformed)?;

    if scheme != BEARER_SCHEME || token.is_empty() || token.contains(char::is_whitespace) {
        return Err(BearerError::Malformed);
    }

    Ok(Bearer { scheme, token })
}

/// Read the `Authorization` header and parse it.
///
/// A header that is not visible ASCII cannot be a bearer credential and is
/// reported as malformed rather than missing.
pub fn bearer_from_headers(headers: &HeaderMap) -> Result<Bearer<'_>, BearerError> {
    match headers.get(AUTHORIZATION).map(HeaderValue::to_str) {
        None => parse_bearer(None),
        Some(Ok(value)) => parse_bearer(Some(value)),
        Some(Err(_)) => Err(BearerError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_token() {
        let bearer = parse_bearer(Some("Bearer abc.def.ghi")).unwrap();
        assert_eq!(bearer.scheme, "Bearer");
        assert_eq!(bearer.token, "abc.def.ghi");
    }

    #[test]
    fn missing_header() {
        assert_eq!(parse_bearer(None), Err(BearerError::Missing));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(parse_bearer(Some("Token abc123")), Err(BearerError::Malformed));
        assert_eq!(parse_bearer(Some("bearer abc123")), Err(BearerError::Malformed));
        assert_eq!(parse_bearer(Some("Basic dXNlcjpwdw==")), Err(BearerError::Malformed));
    }

    #[test]
    fn rejects_missing_or_split_token() {
        assert_eq!(parse_bearer(Some("Bearer")), Err(BearerError::Malformed));
        assert_eq!(parse_bearer(Some("Bearer ")), Err(BearerError::Malformed));
        assert_eq!(parse_bearer(Some("Bearer  abc")), Err(BearerError::Malformed));
        assert_eq!(parse_bearer(Some("Bearer abc def")), Err(BearerError::Malformed));
        assert_eq!(parse_bearer(Some("")), Err(BearerError::Malformed));
    }

    #[test]
    fn reads_from_header_map() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_from_headers(&headers), Err(BearerError::Missing));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t0k3n"));
        assert_eq!(bearer_from_headers(&headers).map(|b| b.token), Ok("t0k3n"));

        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap());
        assert_eq!(bearer_from_headers(&headers), Err(BearerError::Malformed));
    }
}
