// HR desk CLI - interview invitations, birthday greetings, employee roster

mod compose;
mod exit_codes;
mod roster;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hrdesk_config::Settings;
use hrdesk_io::{CsvRosterStore, StoreError};

use exit_codes::{store_exit_code, EXIT_ERROR, EXIT_STORE_UNAVAILABLE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "hrdesk")]
#[command(about = "HR assistant: interview invitations, birthday greetings and the employee roster")]
#[command(version)]
struct Cli {
    /// Roster CSV (overrides "roster.path" from settings)
    #[arg(long, global = true, env = "HRDESK_ROSTER")]
    roster: Option<PathBuf>,

    /// Settings file (default: <config dir>/hrdesk/settings.json)
    #[arg(long, global = true, env = "HRDESK_CONFIG")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). HRDESK_LOG overrides.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose an interview invitation and its messaging link
    #[command(after_help = "\
Examples:
  hrdesk invite --name Dana --phone 050-123-4567 --date 2026-10-20 --time 10:30
  hrdesk invite --name Dana --phone 0501234567 --date 2026-10-20 --time 10:30 --json")]
    Invite(compose::InviteArgs),

    /// Compose a birthday greeting for an employee in the roster
    #[command(after_help = "\
Examples:
  hrdesk birthday --employee Dana
  hrdesk birthday --employee Dana --style casual --video https://youtu.be/abcd123")]
    Birthday(compose::BirthdayArgs),

    /// Build a messaging link for an arbitrary phone and message
    #[command(after_help = "\
Examples:
  hrdesk link --phone 0501234567 --message \"See you tomorrow\"")]
    Link(compose::LinkArgs),

    /// List, add, import or reset employees
    Roster {
        #[command(subcommand)]
        command: roster::RosterCommands,
    },

    /// Write a commented settings file to edit (default: <config dir>/hrdesk/settings.json)
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let ctx = Context {
        store: CsvRosterStore::new(cli.roster.clone().unwrap_or_else(|| settings.roster_path.clone())),
        settings,
    };
    log::debug!("roster at {}", ctx.store.path().display());

    let result = match cli.command {
        Commands::Invite(args) => compose::cmd_invite(&ctx, args),
        Commands::Birthday(args) => compose::cmd_birthday(&ctx, args),
        Commands::Link(args) => compose::cmd_link(&ctx, args),
        Commands::Roster { command } => roster::cmd_roster(ctx, command),
        Commands::Init { force } => {
            cmd_init(cli.config.clone().unwrap_or_else(Settings::config_path), force)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_init(path: PathBuf, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::args(format!("settings already exist at {}", path.display()))
            .with_hint("edit the file, or re-run with --force to overwrite it"));
    }
    Settings::write_default_file(&path)
        .map_err(|e| CliError::new(EXIT_STORE_UNAVAILABLE, format!("cannot write {}: {e}", path.display())))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

/// Route `log` records from the library crates to stderr.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("HRDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

/// Everything a command needs: settings plus the roster store they point at.
pub struct Context {
    pub settings: Settings,
    pub store: CsvRosterStore,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Create error from a store error with the matching exit code and hint.
    pub fn store(err: StoreError) -> Self {
        let code = store_exit_code(&err);
        let hint = match &err {
            StoreError::Recon(hrdesk_recon::ReconError::MissingRequiredField(_)) => Some(
                "headers need a name column, a phone/mobile column and a birth date column; the roster was not changed"
                    .to_string(),
            ),
            StoreError::StoreUnavailable { .. } => {
                Some("check the path and permissions, or pass --roster".to_string())
            }
            StoreError::UnsupportedFormat(_) => {
                Some("save the spreadsheet as .csv or .xlsx".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::store(err)
    }
}

/// Write a JSON value to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
    println!("{json}");
    Ok(())
}
