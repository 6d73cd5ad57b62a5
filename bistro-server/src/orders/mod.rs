//! Order lifecycle
//!
//! - [`transitions`]: the state machine table and role rules
//! - [`money`]: decimal totals
//! - [`engine`]: create / transition / table coupling

pub mod engine;
pub mod money;
pub mod transitions;

pub use engine::OrderEngine;
