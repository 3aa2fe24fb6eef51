mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file
        #[arg(default_value = "clicktrail.hcl")]
        path: PathBuf,

        /// Print errors without colours or hints
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "clicktrail.hcl")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "hcl")]
        json: bool,

        /// Output as HCL
        #[arg(long)]
        hcl: bool,

        /// Write HCL to this path instead of printing (.hcl is appended)
        #[arg(long)]
        write: Option<PathBuf>,
    },

    /// Initialize a new config directory
    Init {
        /// Path to config directory
        #[arg(default_value = "clicktrail")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain } => check(path, plain),
        ConfigCmd::Dump {
            path,
            json,
            hcl,
            write,
        } => dump(path, json, hcl, write),
        ConfigCmd::Init { path } => init(path),
    }
}
