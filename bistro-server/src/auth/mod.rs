//! Authentication and authorization
//!
//! - [`jwt`]: token mint/verify and the [`CurrentUser`] principal
//! - [`password`]: Argon2 hashing
//! - [`middleware`]: token verification and the role gate
//! - [`permissions`]: the `(role, resource class)` table
//! - [`cookies`]: `auth_token` / `business_id` cookies
//! - [`login`]: credential verification

pub mod cookies;
mod extractor;
pub mod jwt;
pub mod login;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::{authorize, require_auth};
pub use permissions::{ResourceClass, role_allows};
