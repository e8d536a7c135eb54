//! Command implementations for the cslgen CLI
//!
//! Each command module handles the CLI interface and delegates to
//! cslgen-core and cslgen-config for the actual work.

pub mod check;
pub mod generate;
pub mod params;
