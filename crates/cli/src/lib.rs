//! Command-line front end: parses operator commands, drives the console
//! operations and renders the canonical records as text.

pub mod args;
pub mod commands;
pub mod render;
pub mod startup;

pub use args::Cli;
pub use startup::{init_logging, run};
