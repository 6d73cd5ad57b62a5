//! Unified error codes for the bistro server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Business (tenancy) errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as its `u16` value so clients can switch on it without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// No credentials supplied
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Role may not reach the resource class
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Business ====================
    /// Handler needs a resolved business and none was supplied
    BusinessRequired = 3001,
    /// Business not found
    BusinessNotFound = 3002,
    /// Business name missing
    BusinessNameRequired = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Requested status transition is not allowed
    InvalidStatusTransition = 4002,
    /// Order has no items
    OrderEmpty = 4007,
    /// Item quantity must be positive
    InvalidQuantity = 4008,

    // ==================== 6xxx: Menu ====================
    /// Dish not found in the resolved business
    DishNotFound = 6001,
    /// Dish price must be positive
    DishInvalidPrice = 6002,
    /// Dish is marked unavailable
    DishNotAvailable = 6003,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category name already exists
    CategoryNameExists = 6103,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already used in this business
    TableNumberExists = 7002,
    /// Table cannot be freed while orders are active
    TableHasActiveOrders = 7104,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Username already taken
    UsernameExists = 8002,
    /// User cannot delete their own account
    UserCannotDeleteSelf = 8003,
    /// User is still referenced by orders
    UserInUse = 8004,
    /// Non-admin users must belong to a business
    UserBusinessRequired = 8005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Short, client-facing message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "ok",
            ErrorCode::ValidationFailed => "validation failed",
            ErrorCode::NotFound => "resource not found",
            ErrorCode::AlreadyExists => "resource already exists",
            ErrorCode::InvalidRequest => "invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "unauthorized",
            ErrorCode::InvalidCredentials => "invalid credentials",
            ErrorCode::TokenExpired => "unauthorized",
            ErrorCode::TokenInvalid => "unauthorized",

            // Permission
            ErrorCode::PermissionDenied => "forbidden",
            ErrorCode::AdminRequired => "forbidden",

            // Business
            ErrorCode::BusinessRequired => "business_id is required",
            ErrorCode::BusinessNotFound => "business not found",
            ErrorCode::BusinessNameRequired => "business name is required",

            // Order
            ErrorCode::OrderNotFound => "order not found",
            ErrorCode::InvalidStatusTransition => "invalid status transition",
            ErrorCode::OrderEmpty => "order must contain at least one item",
            ErrorCode::InvalidQuantity => "quantity must be greater than zero",

            // Menu
            ErrorCode::DishNotFound => "dish not found",
            ErrorCode::DishInvalidPrice => "price must be greater than zero",
            ErrorCode::DishNotAvailable => "dish not available",
            ErrorCode::CategoryNotFound => "category not found",
            ErrorCode::CategoryNameExists => "category name already exists",

            // Table
            ErrorCode::TableNotFound => "table not found",
            ErrorCode::TableNumberExists => "table number already exists",
            ErrorCode::TableHasActiveOrders => "table has active orders",

            // User
            ErrorCode::UserNotFound => "user not found",
            ErrorCode::UsernameExists => "username already exists",
            ErrorCode::UserCannotDeleteSelf => "cannot delete own account",
            ErrorCode::UserInUse => "user is referenced by orders",
            ErrorCode::UserBusinessRequired => "business_id is required for non-admin users",

            // System
            ErrorCode::InternalError => "internal server error",
            ErrorCode::DatabaseError => "internal server error",
            ErrorCode::ConfigError => "internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Business
            3001 => Ok(ErrorCode::BusinessRequired),
            3002 => Ok(ErrorCode::BusinessNotFound),
            3003 => Ok(ErrorCode::BusinessNameRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidStatusTransition),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::InvalidQuantity),

            // Menu
            6001 => Ok(ErrorCode::DishNotFound),
            6002 => Ok(ErrorCode::DishInvalidPrice),
            6003 => Ok(ErrorCode::DishNotAvailable),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6103 => Ok(ErrorCode::CategoryNameExists),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableNumberExists),
            7104 => Ok(ErrorCode::TableHasActiveOrders),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::UsernameExists),
            8003 => Ok(ErrorCode::UserCannotDeleteSelf),
            8004 => Ok(ErrorCode::UserInUse),
            8005 => Ok(ErrorCode::UserBusinessRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::BusinessRequired.code(), 3001);
        assert_eq!(ErrorCode::InvalidStatusTransition.code(), 4002);
        assert_eq!(ErrorCode::DishNotFound.code(), 6001);
        assert_eq!(ErrorCode::TableHasActiveOrders.code(), 7104);
        assert_eq!(ErrorCode::UsernameExists.code(), 8002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1002), Ok(ErrorCode::InvalidCredentials));
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::InvalidStatusTransition));
        assert_eq!(ErrorCode::try_from(7104), Ok(ErrorCode::TableHasActiveOrders));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(5001), Err(InvalidErrorCode(5001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_every_code_round_trips_through_u16() {
        let all = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::AdminRequired,
            ErrorCode::BusinessRequired,
            ErrorCode::BusinessNotFound,
            ErrorCode::BusinessNameRequired,
            ErrorCode::OrderNotFound,
            ErrorCode::InvalidStatusTransition,
            ErrorCode::OrderEmpty,
            ErrorCode::InvalidQuantity,
            ErrorCode::DishNotFound,
            ErrorCode::DishInvalidPrice,
            ErrorCode::DishNotAvailable,
            ErrorCode::CategoryNotFound,
            ErrorCode::CategoryNameExists,
            ErrorCode::TableNotFound,
            ErrorCode::TableNumberExists,
            ErrorCode::TableHasActiveOrders,
            ErrorCode::UserNotFound,
            ErrorCode::UsernameExists,
            ErrorCode::UserCannotDeleteSelf,
            ErrorCode::UserInUse,
            ErrorCode::UserBusinessRequired,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("7104").unwrap();
        assert_eq!(code, ErrorCode::TableHasActiveOrders);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_auth_failures_share_one_message() {
        // Token failures must not reveal which check failed
        assert_eq!(ErrorCode::TokenExpired.message(), "unauthorized");
        assert_eq!(ErrorCode::TokenInvalid.message(), "unauthorized");
        assert_eq!(ErrorCode::NotAuthenticated.message(), "unauthorized");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::InternalError), "9001");
    }
}
