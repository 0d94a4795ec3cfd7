//! Bearer token authentication.
//!
//! Formats `Authorization: Bearer <token>` header values (RFC 6750).

/// Header name carrying the credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Formats a token into a Bearer authentication header value.
///
/// # Examples
///
/// ```
/// use veestributes_client::auth::bearer::bearer_token;
///
/// assert_eq!(bearer_token("abc"), "Bearer abc");
/// ```
pub fn bearer_token(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Builds the `Authorization` header for a stored token.
///
/// An absent or empty token yields no header: a blank stored value counts as
/// "not signed in".
///
/// # Examples
///
/// ```
/// use veestributes_client::auth::bearer::authorization_header;
///
/// assert_eq!(
///     authorization_header(Some("abc")),
///     Some(("Authorization".to_string(), "Bearer abc".to_string()))
/// );
/// assert_eq!(authorization_header(Some("")), None);
/// assert_eq!(authorization_header(None), None);
/// ```
pub fn authorization_header(token: Option<&str>) -> Option<(String, String)> {
    match token {
        Some(token) if !token.is_empty() => {
            Some((AUTHORIZATION_HEADER.to_string(), bearer_token(token)))
        }
        _ => None,
    }
}
