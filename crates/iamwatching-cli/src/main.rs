use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{add, clear, config, list, remove, search, theme};
use media_track_config::PathManager;
use media_track_models::ViewMode;

mod commands;
mod logging;
mod output;
mod tui;

#[derive(Parser)]
#[command(name = "iamwatching")]
#[command(about = "i am watching - keep track of the movies, shows and games you've finished")]
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
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Movies,
    Games,
}

impl From<ModeArg> for ViewMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Movies => ViewMode::Movies,
            ModeArg::Games => ViewMode::Games,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive tracker (default)
    #[command(long_about = "Open the interactive terminal tracker. Type to search the catalog for the active mode, pick a result to prefill the add form, and switch between movies and games with Ctrl-T.")]
    Tui,
    /// List tracked items, most recent first
    List {
        #[arg(long, value_enum, default_value = "movies")]
        mode: ModeArg,
    },
    /// Add an item without searching the catalog
    Add {
        /// Title of the movie, show or game
        title: String,

        #[arg(long, value_enum, default_value = "movies")]
        mode: ModeArg,

        /// Release date or year
        #[arg(long)]
        release_date: Option<String>,

        /// Director (movies only)
        #[arg(long)]
        director: Option<String>,

        /// Genre (movies only)
        #[arg(long)]
        genre: Option<String>,

        /// Developer (games only)
        #[arg(long)]
        developer: Option<String>,

        /// Platform (games only)
        #[arg(long)]
        platform: Option<String>,
    },
    /// Remove an item by id
    Remove {
        id: String,

        #[arg(long, value_enum, default_value = "movies")]
        mode: ModeArg,
    },
    /// Search the catalog for the given mode
    #[command(long_about = "Search the movie (TMDB) or game (RAWG) catalog once. Use --add to add one of the results, numbered from 1, to your list.")]
    Search {
        query: String,

        #[arg(long, value_enum, default_value = "movies")]
        mode: ModeArg,

        /// Add the Nth result to the collection
        #[arg(long, value_name = "N")]
        add: Option<usize>,
    },
    /// Show or change the colour theme
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: theme::ThemeAction,
    },
    /// Manage configuration and API keys
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Delete stored data
    #[command(long_about = "Delete stored collections or the saved theme. Use --movies, --games, --theme, or --all.")]
    Clear {
        /// Clear everything
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the movie collection
        #[arg(long, action = ArgAction::SetTrue)]
        movies: bool,

        /// Clear the game collection
        #[arg(long, action = ArgAction::SetTrue)]
        games: bool,

        /// Forget the saved theme (falls back to the system preference)
        #[arg(long, action = ArgAction::SetTrue)]
        theme: bool,

        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show full API keys
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store an API key for a catalog
    SetKey {
        #[arg(value_enum)]
        catalog: config::Catalog,

        /// The key (prompted for when omitted)
        #[arg(long)]
        value: Option<String>,
    },
    /// Print the configuration, data and log paths
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::default();

    // The interactive UI owns the terminal, so its logs go to a file
    let command = cli.command.unwrap_or(Commands::Tui);
    let log_file = matches!(command, Commands::Tui).then(|| paths.tui_log_file());
    let log_level = commands::AppContext::startup_log_level(&paths);
    logging::init_logging(cli.verbose, cli.quiet, &log_level, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let context = commands::AppContext::load_from(paths)?;

    let output = output::Output::new(cli.output, cli.quiet);

    match command {
        Commands::Tui => tui::run(&context).await,
        Commands::List { mode } => list::run_list(&context, mode.into(), &output),
        Commands::Add {
            title,
            mode,
            release_date,
            director,
            genre,
            developer,
            platform,
        } => {
            let fields = add::AddFields { title, release_date, director, genre, developer, platform };
            add::run_add(&context, mode.into(), fields, &output)
        }
        Commands::Remove { id, mode } => remove::run_remove(&context, mode.into(), &id, &output),
        Commands::Search { query, mode, add } => search::run_search(&context, mode.into(), &query, add, &output).await,
        Commands::Theme { action } => theme::run_theme(&context, action, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(&context, cmd, &output)
        }
        Commands::Clear { all, movies, games, theme, yes } => {
            clear::run_clear(&context, clear::ClearTargets { all, movies, games, theme }, yes, &output)
        }
    }
}
