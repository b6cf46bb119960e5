//! Caller identity from request headers.

use axum::http::HeaderMap;

use crate::caller::{Caller, Role, RoleParseError};

/// Header carrying the caller's display name.
pub const NAME_HEADER: &str = "x-caller-name";
/// Header carrying the caller's role (`guest`, `user`, `moderator`, `admin`).
pub const ROLE_HEADER: &str = "x-caller-role";

/// Build a [`Caller`] from request headers.
///
/// A missing name becomes `"anonymous"` and a missing role becomes
/// [`Role::Guest`]. A role header that does not name a role is an error.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<Caller, RoleParseError> {
    let name = header(headers, NAME_HEADER).unwrap_or("anonymous");
    let role = match header(headers, ROLE_HEADER) {
        Some(value) => value.parse()?,
        None => Role::Guest,
    };
    Ok(Caller::new(name, role))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
