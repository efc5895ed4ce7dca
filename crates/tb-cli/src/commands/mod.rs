//! CLI subcommand implementations.

pub mod check;
pub mod extract;
pub mod now;
pub mod pattern;
pub mod scan;
