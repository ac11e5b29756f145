//! CLI module for cadbridge - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
