//! CLI definitions for hostrig.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hostrig CLI.
#[derive(Parser)]
#[command(name = "hostrig")]
#[command(about = "Pluggable extension lifecycle host with capability dispatch")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.hostrig/hostrig.toml)
    #[arg(short, long, global = true, env = "HOSTRIG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Working directory handed to extensions
    #[arg(short, long, global = true)]
    pub work_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// List extension handles and capability providers in invocation order
    List,

    /// Boot the host and run until interrupted (default)
    Run {
        /// Arguments passed through to extensions
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Boot the host, dispatch one script, and print its result
    Eval {
        /// Capability tag (e.g. sh, bash, template)
        #[arg(short, long)]
        lang: String,

        /// Declare a named parameter; repeat for more
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,

        /// Script body
        script: String,

        /// Positional arguments bound to the parameters (JSON or plain text)
        args: Vec<String>,
    },
}
