//! CLI command handlers.

mod dry_run;
mod resolve;

pub use dry_run::run_dry_run;
pub use resolve::run_resolve;
