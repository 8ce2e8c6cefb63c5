//! Subcommand implementations for the `jd` binary.
pub mod generate;
