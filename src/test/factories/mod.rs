//! Builders for pools and tables used across the unit tests.

mod pool;
mod record;

pub use pool::*;
pub use record::*;
