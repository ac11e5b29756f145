//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the MCP tool server on stdio
//! - tools: list the tools the bridge exposes
//! - call: invoke one tool against the CAD host

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cadbridge - MCP tools for a CAD automation host
#[derive(Parser, Debug)]
#[command(name = "cadbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// CAD host address (overrides config and FUSION_SERVER_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// CAD host port (overrides config and FUSION_SERVER_PORT)
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,

    /// List available tools
    Tools {
        /// Print full JSON schemas instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Invoke a single tool and print its result
    Call {
        /// Tool name (e.g. draw-circle)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}
