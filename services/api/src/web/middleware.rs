//! services/api/src/web/middleware.rs
//!
//! Bearer-credential middleware for the Graph API routes.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use socialmind_core::domain::AccessToken;

use crate::error::ApiError;

/// Middleware that extracts the `Authorization: Bearer <token>` credential.
///
/// If present, inserts the `AccessToken` into request extensions for handlers to use.
/// If missing or malformed, returns 401 before the handler (and any upstream call) runs.
pub async fn require_bearer(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer)
        .ok_or_else(|| ApiError::Unauthorized("No access token provided".to_string()))?;

    req.extensions_mut().insert(token);

    Ok(next.run(req).await)
}

/// Parses `Bearer <token>`; the scheme is case-insensitive.
pub fn parse_bearer(header_value: &str) -> Option<AccessToken> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| AccessToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_in_any_case() {
        assert_eq!(parse_bearer("Bearer abc").unwrap().as_str(), "abc");
        assert_eq!(parse_bearer("bearer  abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert!(parse_bearer("Basic dXNlcjpwYXNz").is_none());
        assert!(parse_bearer("Bearer ").is_none());
        assert!(parse_bearer("Bearer").is_none());
        assert!(parse_bearer("").is_none());
    }
}
