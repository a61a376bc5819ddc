//! Contains the node CLI.

use crate::{
    commands::NodeCommand,
    flags::{GlobalArgs, init_unified_metrics},
    version,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use morph_cli::cli_styles;

/// Subcommands for the CLI.
#[derive(Debug, PartialEq, Clone, Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum Commands {
    /// Runs the node.
    #[command(alias = "n")]
    Node(NodeCommand),
}

/// The node CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version = version::SHORT_VERSION, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        // Metrics must be installed before any component records them.
        init_unified_metrics(&self.global.metrics)?;

        match self.subcommand {
            Commands::Node(ref node) => node.init_logs(&self.global)?,
        }

        match self.subcommand {
            Commands::Node(node) => Self::run_until_ctrl_c(node.run(&self.global)),
        }
    }

    /// Run until ctrl-c is pressed.
    pub fn run_until_ctrl_c<F>(fut: F) -> Result<()>
    where
        F: std::future::Future<Output = Result<()>>,
    {
        let rt = Self::tokio_runtime().map_err(|e| anyhow::anyhow!(e))?;
        rt.block_on(async move {
            tokio::select! {
                res = fut => res,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(target: "morph::node", "Received Ctrl-C, shutting down...");
                    Ok(())
                }
            }
        })
    }

    /// Creates a new default tokio multi-thread [Runtime](tokio::runtime::Runtime) with all
    /// features enabled
    pub fn tokio_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_multi_thread().enable_all().build()
    }
}
