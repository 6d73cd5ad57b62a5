//! Domain services
//!
//! Services translate repository results into `AppError`s and add the rules
//! the storage layer does not express. Business-scoped functions take the
//! resolved `business_id` explicitly.

pub mod businesses;
pub mod menu;
pub mod tables;
pub mod users;
