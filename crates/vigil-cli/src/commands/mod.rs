//! Command implementations.

pub mod get;
pub mod list;
pub mod set;
pub mod stats;

pub use self::get::execute_get;
pub use self::list::execute_list;
pub use self::set::{execute_set, parse_value};
pub use self::stats::{execute_stats, execute_stats_reset};
