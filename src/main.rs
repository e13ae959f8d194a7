use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use nivesh::core::log::init_logging;

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

impl From<Commands> for nivesh::AppCommand {
    fn from(cmd: Commands) -> nivesh::AppCommand {
        match cmd {
            Commands::Summary => nivesh::AppCommand::Summary,
            Commands::Add {
                symbol,
                quantity,
                buy_price,
            } => nivesh::AppCommand::Add {
                symbol,
                quantity,
                buy_price,
            },
            Commands::List => nivesh::AppCommand::List,
            Commands::Remove { ids } => nivesh::AppCommand::Remove { ids },
            Commands::Clear { yes } => nivesh::AppCommand::Clear { yes },
            Commands::Stats => nivesh::AppCommand::Stats,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display portfolio valuation with live prices
    Summary,
    /// Add a holding
    Add {
        /// Ticker symbol, e.g. TCS or AAPL
        symbol: String,
        /// Number of shares
        quantity: u32,
        /// Buy price per share, in the symbol's native currency
        buy_price: f64,
    },
    /// List holdings with their ids
    List,
    /// Delete holdings by id
    Remove {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Delete every holding
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show holding counts per market
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => nivesh::cli::setup::setup(),
        Some(cmd) => nivesh::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
