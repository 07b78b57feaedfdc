use crate::client::{
    self, ApiClient, AuthForm, AuthMode, AuthOutcome, CardDraft, ClientError, ModuleDraft,
};
use crate::config::Config;
use crate::review::{CardSource, Surface, load_cards, run_review};
use crate::{log_debug, logger, ui};
use anyhow::{Context, Result};
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use std::path::PathBuf;
use std::sync::Arc;

const LOG_FILE: &str = "flashdeck-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "flashdeck: flashcard review in your terminal",
    long_about = "flashdeck reviews flashcard decks in the terminal and talks to a study-card server to create modules and manage your account.",
    disable_version_flag = true,
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,

    /// Server base URL, overriding the configured one
    #[arg(long = "server", global = true, help = "Server base URL")]
    pub server: Option<String>,

    /// Anti-forgery token, overriding the configured one
    #[arg(long = "csrf", global = true, help = "Anti-forgery token sent as X-CSRFToken")]
    pub csrf: Option<String>,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Review a deck of cards
    #[command(
        about = "Review a deck of flashcards",
        long_about = "Review a deck given as a JSON array of {term, dfn} records. Reads the deck from a file, from --cards, or from stdin."
    )]
    Review {
        /// JSON file holding the cards
        file: Option<PathBuf>,

        /// Cards as an inline JSON string
        #[arg(long, conflicts_with = "file", help = "Cards as an inline JSON string")]
        cards: Option<String>,

        /// Hide the prev/flip/next buttons
        #[arg(long, help = "Hide the prev/flip/next buttons")]
        no_controls: bool,

        /// Hide the answer line
        #[arg(long, help = "Hide the answer line")]
        no_answer: bool,

        /// Hide the position counter
        #[arg(long, help = "Hide the position counter")]
        no_progress: bool,
    },

    /// Create a flashcard module on the server
    #[command(
        about = "Create a flashcard module",
        long_about = "Create a flashcard module on the server from a .json/.toml file or from interactive prompts."
    )]
    Create {
        /// Module file (.json or .toml)
        #[arg(short, long, help = "Module file (.json or .toml)")]
        file: Option<PathBuf>,

        /// Module name, overriding the file
        #[arg(long, help = "Module name")]
        name: Option<String>,

        /// Module description, overriding the file
        #[arg(long, help = "Module description")]
        description: Option<String>,
    },

    /// Log in to the server
    #[command(about = "Log in to the study-card server")]
    Login {
        #[arg(short, long, help = "Username")]
        username: Option<String>,
    },

    /// Create an account on the server
    #[command(about = "Register a new account")]
    Register {
        #[arg(short, long, help = "Username")]
        username: Option<String>,
    },

    /// Show or change configuration
    #[command(about = "Show or change flashdeck settings")]
    Config {
        /// Remember a username
        #[arg(long, help = "Remember a username")]
        username: Option<String>,

        /// Show the control buttons during review
        #[arg(long, help = "Show the control buttons during review (true/false)")]
        controls: Option<bool>,

        /// Show the answer line during review
        #[arg(long, help = "Show the answer line during review (true/false)")]
        answer_line: Option<bool>,

        /// Write a project config in the current directory instead
        #[arg(long, help = "Write .flashdeck.toml in the current directory")]
        project: bool,
    },
}

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    // Warnings and errors reach the terminal; everything goes to the log file
    logger::set_console_level(log::LevelFilter::Warn);
    if cli.log {
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        logger::set_log_file(log_file)?;
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    let overridden = cli.server.is_some() || cli.csrf.is_some();
    let mut config = Config::load()?;
    config.update(cli.server, cli.csrf, None, None, None);

    if let Some(command) = cli.command {
        handle_command(command, config, overridden).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["flashdeck", "--help"]);
        Ok(())
    }
}

/// Run one subcommand. `overridden` is set when `--server` or `--csrf`
/// changed the loaded config.
pub async fn handle_command(command: Commands, config: Config, overridden: bool) -> Result<()> {
    match command {
        Commands::Review {
            file,
            cards,
            no_controls,
            no_answer,
            no_progress,
        } => {
            let source = match (file, cards) {
                (Some(path), _) => CardSource::File(path),
                (None, Some(raw)) => CardSource::Inline(raw),
                (None, None) => CardSource::Stdin,
            };
            let mut surface = Surface::from_config(&config.review);
            surface.flip_button &= !no_controls;
            surface.prev_button &= !no_controls;
            surface.next_button &= !no_controls;
            surface.answer_input &= !no_answer;
            surface.progress &= !no_progress;
            handle_review(&source, surface)
        }
        Commands::Create {
            file,
            name,
            description,
        } => handle_create(&config, file, name, description).await,
        Commands::Login { username } => {
            handle_auth(&config, AuthMode::Login, username).await
        }
        Commands::Register { username } => {
            handle_auth(&config, AuthMode::Register, username).await
        }
        Commands::Config {
            username,
            controls,
            answer_line,
            project,
        } => handle_config(
            config,
            username,
            controls,
            answer_line,
            project,
            overridden,
        ),
    }
}

fn handle_review(source: &CardSource, surface: Surface) -> Result<()> {
    let cards = load_cards(source)?;
    log_debug!("Starting review of {} cards", cards.size());
    run_review(Arc::new(cards), surface)
}

async fn handle_create(
    config: &Config,
    file: Option<PathBuf>,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut draft = match file {
        Some(path) => ModuleDraft::from_file(&path)?,
        None => prompt_module_draft()?,
    };
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(description) = description {
        draft.description = description;
    }

    let client = ApiClient::from_config(&config.server)?;
    let spinner = ui::create_spinner("Creating module...");
    let result = client::module::create_module(&client, &draft).await;
    spinner.finish_and_clear();

    let submitted = result?;
    ui::print_success("Module created successfully!");
    ui::print_field("Location", &submitted.location);
    Ok(())
}

/// Ask for a module row by row until an empty term
fn prompt_module_draft() -> Result<ModuleDraft> {
    let mut draft = ModuleDraft::new();
    draft.name = ui::prompt("Module name")?;
    draft.description = ui::prompt("Description")?;
    ui::print_info("Enter cards; leave the term empty to finish.");

    let mut row = draft.cards.len();
    loop {
        let term = ui::prompt(&format!("Term {row}"))?;
        if term.trim().is_empty() {
            break;
        }
        let dfn = ui::prompt(&format!("Definition {row}"))?;
        if let Some(card) = draft.cards.last_mut() {
            *card = CardDraft::new(term, dfn);
        }
        row = draft.add_card();
    }

    Ok(draft)
}

async fn handle_auth(config: &Config, mode: AuthMode, username: Option<String>) -> Result<()> {
    let username = match username.or_else(|| config.server.username.clone()) {
        Some(name) => name,
        None => ui::prompt("Username")?,
    };
    let password = ui::prompt("Password")?;

    let mut form = match mode {
        AuthMode::Login => AuthForm::login(username, password),
        AuthMode::Register => {
            let password2 = ui::prompt("Repeat password")?;
            AuthForm::register(username, password, password2)
        }
    };

    let client = ApiClient::from_config(&config.server)?;
    let spinner = ui::create_spinner(match mode {
        AuthMode::Login => "Logging in...",
        AuthMode::Register => "Creating account...",
    });
    let result = client::auth::submit(&client, &mut form).await;
    spinner.finish_and_clear();

    match result {
        Ok(AuthOutcome::Registered) => {
            ui::print_success(client::auth::REGISTERED_MESSAGE);
            Ok(())
        }
        Ok(AuthOutcome::LoggedIn(submitted)) => {
            ui::print_success(&format!("Logged in as {}", form.username));
            ui::print_field("Location", &submitted.location);
            Ok(())
        }
        Err(e @ ClientError::Validation(_)) => Err(e).context("Form incomplete"),
        Err(e) => Err(e.into()),
    }
}

fn handle_config(
    mut config: Config,
    username: Option<String>,
    controls: Option<bool>,
    answer_line: Option<bool>,
    project: bool,
    overridden: bool,
) -> Result<()> {
    let changed =
        overridden || username.is_some() || controls.is_some() || answer_line.is_some();
    config.update(None, None, username, controls, answer_line);

    if project {
        config.save_as_project_config()?;
        ui::print_success("Project configuration saved.");
        if config.server.csrf_token.is_some() {
            ui::print_warning("The CSRF token stays in your personal config only.");
        }
    } else if changed {
        config.save()?;
        ui::print_success("Configuration saved.");
    }

    let shown = config.redacted();
    ui::print_field("Server", &shown.server.base_url);
    ui::print_field(
        "CSRF token",
        shown.server.csrf_token.as_deref().unwrap_or("(none)"),
    );
    ui::print_field(
        "Username",
        shown.server.username.as_deref().unwrap_or("(none)"),
    );
    ui::print_field("Controls", &shown.review.show_controls.to_string());
    ui::print_field("Answer line", &shown.review.answer_line.to_string());
    ui::print_field("Progress", &shown.review.show_progress.to_string());
    Ok(())
}
