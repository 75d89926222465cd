//! Environment-derived configuration.
//!
//! The base URL is supplied externally; the development default points at the
//! local backend. Screens never embed endpoint literals — the host builds one
//! `MemberClient` from this value and hands it to every screen.

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "MEMBERS_API_URL";

/// Development default, matching the local backend.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/v1";

/// The configured API base URL, falling back to the development default when
/// the variable is unset or empty.
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
