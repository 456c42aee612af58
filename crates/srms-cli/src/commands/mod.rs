//! Subcommand implementations for the `srms` binary.

pub mod check;
pub mod run;
pub mod views;
