// Subcommand handlers
pub mod ip_reporter;
pub mod time_reporter;

pub use ip_reporter::*;
pub use time_reporter::*;
