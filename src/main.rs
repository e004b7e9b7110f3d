use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vibelist::{cli, config, error, server, vibe::Vibe};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP service
    Serve,

    /// Authorize with Spotify API
    Auth,

    /// List saved tracks matching a vibe
    Tracks(TracksOptions),

    /// Create a playlist from the saved tracks matching a vibe
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Vibe to filter by (all, happy, sad, energetic, chill, party)
    #[clap(long, default_value = "all")]
    pub vibe: Vibe,

    /// Fetch at most this many saved tracks
    #[clap(long)]
    pub max: Option<u32>,

    /// Ignore the cached track list and fetch again
    #[clap(long)]
    pub refresh: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Vibe to filter by (all, happy, sad, energetic, chill, party)
    #[clap(long)]
    pub vibe: Vibe,

    /// Name of the new playlist
    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub description: Option<String>,

    /// Make the playlist public
    #[clap(long)]
    pub public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vibelist=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    match cli.command {
        Command::Serve => {
            init_tracing();
            if let Err(e) = server::start_api_server(config).await {
                error!("Server failed: {}", e);
            }
        }
        Command::Auth => cli::auth(&config).await,
        Command::Tracks(opt) => cli::list_tracks(&config, opt.vibe, opt.max, opt.refresh).await,
        Command::Playlist(opt) => {
            cli::playlist(&config, opt.vibe, opt.name, opt.description, opt.public).await
        }
        Command::Completions(_) => {}
    }
}
