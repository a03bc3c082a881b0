use clap::{ArgAction, Args, Parser, Subcommand};
use cinestream_core::ExportFormat;
use cinestream_models::{ListName, MediaItem, MediaKind};
use commands::{content, list, metadata, play, AppContext};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinestream")]
#[command(about = "CineStream - browse, search and keep track of movies and TV shows")]
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

    /// Config file to use instead of the default location (must exist)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show popular movies and TV shows
    #[command(long_about = "Fetch popular movies and popular TV shows concurrently and print both lists. Items already on your watchlist or favorites are marked.")]
    Popular,

    /// Search movies and TV shows
    #[command(long_about = "Run a multi-type search against the metadata provider. People are left out of the results.")]
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },

    /// Manage the local watchlist and favorites
    List {
        #[command(subcommand)]
        cmd: ListCommands,
    },

    /// Print the playback embed URL and player path for an item
    Play {
        #[arg(long)]
        id: u64,

        /// movie or tv
        #[arg(long, value_parser = parse_kind)]
        kind: MediaKind,

        #[arg(long)]
        title: String,
    },

    /// Save a metadata-only JSON document for an item (no media content)
    Metadata {
        #[command(flatten)]
        item: ItemArgs,

        /// Directory to write into (defaults to the exports directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// View or create configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// Show the entries of a list
    Show {
        /// watchlist or favorites
        list: ListName,
    },

    /// Add an item (no change if it is already present)
    Add {
        list: ListName,

        #[command(flatten)]
        item: ItemArgs,
    },

    /// Add the item if absent, remove it if present
    Toggle {
        list: ListName,

        #[command(flatten)]
        item: ItemArgs,
    },

    /// Remove an item
    Remove {
        list: ListName,

        #[arg(long)]
        id: u64,

        /// movie or tv
        #[arg(long, value_parser = parse_kind)]
        kind: MediaKind,
    },

    /// Remove every entry of a list
    Clear {
        list: ListName,
    },

    /// Export a list as JSON or CSV
    #[command(long_about = "Write the list to cinestream-<list>-<YYYY-MM-DD>.<json|csv> in the given directory (defaults to the exports directory).")]
    Export {
        list: ListName,

        #[arg(long, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key masked)
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

/// Item fields supplied on the command line
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    #[arg(long)]
    id: u64,

    /// movie or tv
    #[arg(long, value_parser = parse_kind)]
    kind: MediaKind,

    #[arg(long)]
    title: String,

    #[arg(long)]
    rating: Option<f64>,

    /// YYYY-MM-DD
    #[arg(long)]
    release_date: Option<String>,

    /// Provider poster path, e.g. /f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg
    #[arg(long)]
    poster: Option<String>,

    #[arg(long)]
    overview: Option<String>,

    #[arg(long)]
    language: Option<String>,
}

impl ItemArgs {
    fn into_item(self) -> MediaItem {
        let mut item = MediaItem::new(self.id, self.kind, self.title);
        item.vote_average = self.rating.unwrap_or(0.0);
        item.release_date = self.release_date;
        item.poster_path = self.poster;
        item.overview = self.overview;
        item.original_language = self.language;
        item
    }
}

fn parse_kind(s: &str) -> Result<MediaKind, String> {
    MediaKind::from_tag(s).ok_or_else(|| format!("Invalid kind: {}. Use 'movie' or 'tv'", s))
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let creating = matches!(cli.command, Commands::Config { cmd: Some(ConfigCommands::Init { .. }) });
    let ctx = AppContext::load(cli.config, creating)?;

    match cli.command {
        Commands::Popular => content::run_popular(&ctx, &output).await,
        Commands::Search { terms } => content::run_search(&terms.join(" "), &ctx, &output).await,
        Commands::List { cmd } => match cmd {
            ListCommands::Show { list: name } => list::run_show(name, &ctx, &output),
            ListCommands::Add { list: name, item } => list::run_add(name, item.into_item(), &ctx, &output),
            ListCommands::Toggle { list: name, item } => list::run_toggle(name, item.into_item(), &ctx, &output),
            ListCommands::Remove { list: name, id, kind } => list::run_remove(name, id, kind, &ctx, &output),
            ListCommands::Clear { list: name } => list::run_clear(name, &ctx, &output),
            ListCommands::Export { list: name, format, dir } => list::run_export(name, format, dir, &ctx, &output),
        },
        Commands::Play { id, kind, title } => play::run_play(id, kind, &title, &ctx, &output),
        Commands::Metadata { item, dir } => metadata::run_metadata(&item.into_item(), dir, &ctx, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            commands::config::run_config(cmd, &ctx, &output)
        }
    }
}
