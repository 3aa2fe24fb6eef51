use clap::{Parser, Subcommand};
use clicktrail_core::cli;
use clicktrail_core::logging::{default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "clicktrail",
    version,
    about = "clicktrail: referrer pairs and session clickstreams from web access logs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse an access log and write DOT reports
    Run(cli::run::RunArgs),

    /// Configuration tooling
    Conf {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            init_logging(args.log_format.unwrap_or_else(default_log_format));

            if let Err(e) = cli::run::run(args) {
                eprintln!("clicktrail: {e:#}");
                std::process::exit(1);
            }
        }

        Command::Conf { cmd } => {
            if let Err(e) = cli::conf::run(cmd) {
                eprintln!("conf error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}
