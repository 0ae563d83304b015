use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cnbrates::cli::rates::RatesOptions;
use cnbrates::core::log::init_logging;
use cnbrates::core::{SortDirection, SortKey, SortState};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cnbrates::AppCommand {
    fn from(cmd: Commands) -> cnbrates::AppCommand {
        match cmd {
            Commands::Rates {
                sort,
                desc,
                filter,
                json,
            } => {
                let direction = if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                cnbrates::AppCommand::Rates(RatesOptions {
                    sort: SortState::new(sort, direction),
                    filter,
                    json,
                })
            }
            Commands::Convert { amount, code } => cnbrates::AppCommand::Convert { amount, code },
            Commands::Serve { bind } => cnbrates::AppCommand::Serve { bind },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display today's exchange rate fixing
    Rates {
        /// Column to sort by: country, currency, code or rate
        #[arg(short, long, default_value_t = SortKey::Country)]
        sort: SortKey,
        /// Sort in descending order
        #[arg(short, long)]
        desc: bool,
        /// Only show currencies whose country, code or name contains this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Print the parsed snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount of CZK into a foreign currency
    Convert {
        /// Amount in CZK
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Target currency code, defaults to the configured currency
        code: Option<String>,
    },
    /// Run the CORS relay for the rates feed
    Serve {
        /// Address to listen on, overrides the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_logging(cli.verbose, serving);

    let result = match cli.command {
        Some(Commands::Setup) => cnbrates::cli::setup::setup(),
        Some(cmd) => cnbrates::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
