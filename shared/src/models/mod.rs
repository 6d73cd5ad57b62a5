//! Domain models shared by the server and its clients
//!
//! Response models serialize in snake_case; request payloads that mirror the
//! waiter UI accept camelCase with snake_case aliases.

pub mod business;
pub mod dining_table;
pub mod menu;
pub mod order;
pub mod user;

pub use business::*;
pub use dining_table::*;
pub use menu::*;
pub use order::*;
pub use user::*;
