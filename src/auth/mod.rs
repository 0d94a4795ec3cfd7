//! Request authentication.
//!
//! The client authenticates with a bearer token read from client storage.
//! When a token is stored it is attached to every request, whatever the
//! endpoint; when none is stored, no `Authorization` header is sent at all.

pub mod bearer;

use std::collections::HashMap;

pub use bearer::{authorization_header, bearer_token};

/// Applies the stored token to a header map.
///
/// Any existing `Authorization` header (matched case-insensitively) is
/// replaced when a token is present and removed when it is not, so the
/// outgoing header always reflects the current storage state.
///
/// # Returns
///
/// `true` if an `Authorization` header was attached.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use veestributes_client::auth::apply_authentication;
///
/// let mut headers = HashMap::new();
/// assert!(apply_authentication(&mut headers, Some("abc")));
/// assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
/// ```
pub fn apply_authentication(headers: &mut HashMap<String, String>, token: Option<&str>) -> bool {
    headers.retain(|k, _| !k.eq_ignore_ascii_case("authorization"));

    match authorization_header(token) {
        Some((name, value)) => {
            headers.insert(name, value);
            true
        }
        None => false,
    }
}
