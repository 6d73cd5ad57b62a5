//! business_id resolution
//!
//! Precedence, first wins:
//! 1. token claim, if non-zero
//! 2. `business_id` cookie, if a positive integer
//! 3. `X-Business-ID` header, if a positive integer
//! 4. 0 (unset)
//!
//! A cookie or header never overrides a token's own claim.

pub const BUSINESS_HEADER: &str = "x-business-id";

/// Parse a cookie/header value; only positive integers count
pub fn parse_business_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

pub fn resolve_business_id(
    token_business_id: Option<i64>,
    cookie: Option<&str>,
    header: Option<&str>,
) -> i64 {
    token_business_id
        .filter(|id| *id != 0)
        .or_else(|| parse_business_id(cookie))
        .or_else(|| parse_business_id(header))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_claim_wins() {
        assert_eq!(resolve_business_id(Some(3), Some("4"), Some("5")), 3);
    }

    #[test]
    fn test_cookie_before_header() {
        assert_eq!(resolve_business_id(None, Some("4"), Some("5")), 4);
        assert_eq!(resolve_business_id(None, None, Some("5")), 5);
    }

    #[test]
    fn test_invalid_values_skipped() {
        assert_eq!(resolve_business_id(None, Some("abc"), Some("5")), 5);
        assert_eq!(resolve_business_id(None, Some("-2"), Some("0")), 0);
        assert_eq!(resolve_business_id(Some(0), Some("0"), None), 0);
        assert_eq!(resolve_business_id(None, None, None), 0);
    }
}
