pub mod cli;
pub mod client;
pub mod load_config;

pub use cli::{execute, run, Cli, Plan, UsageError};
