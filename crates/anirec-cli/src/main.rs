use anirec_config::{Config, PathManager};
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use commands::{config, ranking, reserve};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "anirec")]
#[command(about = "anirec - Reserve recordings for the anime you are watching")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add EPGStation keyword rules for the anime on your Annict lists
    #[command(long_about = "Read the configured users' Annict lists (want to watch and watching by default), resolve each work, keep TV series and movies, and add one EPGStation keyword recording rule per title.")]
    Reserve {
        /// Show the rules that would be added without contacting EPGStation
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Rank the works on every configured user's list by combined status score
    Ranking {
        /// Show at most this many works
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration (masks the Annict token)
    #[command(long_about = "Display the configuration after merging the config file, .env and the environment. The Annict token is masked unless --full is given.")]
    Show {
        /// Show the token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let loaded = Config::load(&path_manager);
    let log_file = loaded.as_ref().ok().and_then(|c| c.logging.log_file(&path_manager));
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Reserve { dry_run } => {
            let config = loaded.wrap_err("Failed to load configuration")?;
            reserve::run_reserve(config, dry_run, &output).await
        },
        Commands::Ranking { limit } => {
            let config = loaded.wrap_err("Failed to load configuration")?;
            ranking::run_ranking(config, limit, &output).await
        },
        Commands::Config { cmd } => config::run_config(cmd, &path_manager, loaded, &output),
    }
}
