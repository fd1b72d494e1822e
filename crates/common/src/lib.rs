//! Helpers shared by the console crates and binaries.

pub mod utils;
