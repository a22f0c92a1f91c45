use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{clear, config, serve};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "datenight")]
#[command(about = "Datenight - Keep track of every movie night together")]
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
    /// Run the HTTP API server
    #[command(long_about = "Serve the date tracker API. Movie and TV metadata comes from OMDb and TMDb when API keys are configured, otherwise from the built-in sample catalog. With [storage] snapshot = true, data is reloaded on startup and saved on Ctrl-C.")]
    Serve {
        /// Address to bind (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides [server] port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// View or modify configuration and API keys
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Clear saved snapshots or stored credentials
    #[command(long_about = "Clear persisted data. Use --snapshot to delete the saved store snapshot, --credentials to delete stored API keys, or --all for both.")]
    Clear {
        /// Clear snapshot and credentials
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["snapshot", "credentials"])]
        all: bool,

        /// Delete the saved store snapshot
        #[arg(long, action = ArgAction::SetTrue)]
        snapshot: bool,

        /// Delete stored API keys
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks API keys)
    #[command(long_about = "Display the current configuration and which API keys are set. Keys are masked unless --full is given.")]
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },

    /// Store an API key for a metadata provider
    #[command(long_about = "Store the OMDb or TMDb API key in the credentials file. The OMDB_API_KEY and TMDB_API_KEY environment variables take precedence over stored keys.")]
    ApiKey {
        /// Provider the key belongs to
        #[arg(long, value_enum)]
        provider: Provider,

        /// API key (if not provided, will prompt)
        #[arg(long)]
        key: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Omdb,
    Tmdb,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Omdb => "OMDb",
            Provider::Tmdb => "TMDb",
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let logging = logging::LoggingSettings::for_command(matches!(cli.command, Commands::Serve { .. }));
    logging::init_logging(cli.verbose, cli.quiet, &logging).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Serve { host, port } => serve::run_serve(host, port, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
        Commands::Clear { all, snapshot, credentials } => clear::run_clear(all, snapshot, credentials, &output).await,
    }
}
