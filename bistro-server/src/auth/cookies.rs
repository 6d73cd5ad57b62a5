//! Session cookies
//!
//! `auth_token` carries the bearer token for browser clients; `business_id`
//! lets an admin switch tenant context without a new token.

use http::{HeaderMap, Uri};
use time::Duration;
use tower_cookies::Cookie;
use tower_cookies::cookie::SameSite;

pub const AUTH_COOKIE: &str = "auth_token";
pub const BUSINESS_COOKIE: &str = "business_id";

/// `business_id` cookie lifetime (30 days)
pub const BUSINESS_COOKIE_MAX_AGE_SECS: i64 = 2_592_000;

/// TLS terminated here or at a proxy that says so
pub fn is_secure_request(headers: &HeaderMap, uri: &Uri) -> bool {
    let forwarded_https = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("https"));
    forwarded_https || uri.scheme_str() == Some("https")
}

fn session_cookie(name: &'static str, value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_secs))
        .build()
}

pub fn auth_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    session_cookie(AUTH_COOKIE, token, max_age_secs, secure)
}

pub fn business_cookie(business_id: i64, secure: bool) -> Cookie<'static> {
    session_cookie(
        BUSINESS_COOKIE,
        business_id.to_string(),
        BUSINESS_COOKIE_MAX_AGE_SECS,
        secure,
    )
}

/// Cookie matching `name` by path, for removal
pub fn expired(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_cookie_attributes() {
        let cookie = business_cookie(3, false).to_string();
        assert!(cookie.starts_with("business_id=3"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
        assert!(business_cookie(3, true).to_string().contains("Secure"));
    }

    #[test]
    fn test_secure_detection() {
        let mut headers = HeaderMap::new();
        let uri: Uri = "/api/businesses/3/select".parse().unwrap();
        assert!(!is_secure_request(&headers, &uri));
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        assert!(is_secure_request(&headers, &uri));
    }
}
