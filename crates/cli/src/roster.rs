//! `hrdesk roster` - list, add, import and reset employees.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use hrdesk_io::store::{append_or_update, import_batch, load_roster, reset_roster};
use hrdesk_io::{read_import, MemoryRosterStore};
use hrdesk_recon::{EmployeeRecord, ImportSummary};
use serde::Serialize;

use crate::{print_json, CliError, Context};

#[derive(Subcommand)]
pub enum RosterCommands {
    /// Show every employee on file
    List {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add an employee, or update the one with the same name and phone
    #[command(after_help = "\
Examples:
  hrdesk roster add --name Dana --phone 0501112222 --birth-date 1990-05-01")]
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },

    /// Merge a CSV or Excel file into the roster
    #[command(after_help = "\
Headers are matched loosely: any column containing \"name\", \"phone\"/\"mobile\",
or \"birth\"/\"dob\" (or the Hebrew equivalents) is used; other columns are ignored.
Rows with the same name and phone as an existing employee replace it.

Examples:
  hrdesk roster import staff.xlsx
  hrdesk roster import export.csv --dry-run --json")]
    Import {
        /// .csv, .tsv, .txt, .xlsx, .xlsm, .xls, .xlsb or .ods (first sheet)
        file: PathBuf,

        /// Show what would change without saving
        #[arg(long)]
        dry_run: bool,

        /// Output the import summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete every employee. Cannot be undone.
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

pub fn cmd_roster(mut ctx: Context, cmd: RosterCommands) -> Result<(), CliError> {
    match cmd {
        RosterCommands::List { json } => cmd_list(&ctx, json),
        RosterCommands::Add { name, phone, birth_date } => cmd_add(&mut ctx, name, phone, birth_date),
        RosterCommands::Import { file, dry_run, json } => cmd_import(&mut ctx, file, dry_run, json),
        RosterCommands::Reset { yes } => cmd_reset(&mut ctx, yes),
    }
}

fn cmd_list(ctx: &Context, json: bool) -> Result<(), CliError> {
    let roster = load_roster(&ctx.store)?;

    if json {
        return print_json(&roster);
    }

    if roster.is_empty() {
        eprintln!("no employees yet; add some with `hrdesk roster add` or `hrdesk roster import`");
        return Ok(());
    }

    for record in &roster {
        let birth_date = match (&record.birth_date, &record.unparsed_birth_date) {
            (Some(date), _) => date.format("%d/%m/%Y").to_string(),
            (None, Some(raw)) => raw.clone(),
            (None, None) => "-".to_string(),
        };
        println!("{}\t{}\t{}", record.full_name, birth_date, record.phone_number);
    }
    eprintln!("{} employees", roster.len());
    Ok(())
}

fn cmd_add(
    ctx: &mut Context,
    name: String,
    phone: String,
    birth_date: Option<NaiveDate>,
) -> Result<(), CliError> {
    let name = name.trim();
    let phone = phone.trim();
    if name.is_empty() || phone.is_empty() {
        return Err(CliError::args("both --name and --phone must be non-empty"));
    }

    let before = load_roster(&ctx.store)?.len();
    let roster = append_or_update(&mut ctx.store, EmployeeRecord::new(name, birth_date, phone))?;

    if roster.len() > before {
        eprintln!("added {name}");
    } else {
        eprintln!("updated {name}");
    }
    Ok(())
}

#[derive(Serialize)]
struct ImportReport<'a> {
    file: String,
    dry_run: bool,
    #[serde(flatten)]
    summary: &'a ImportSummary,
    roster_size: usize,
    warnings: &'a [String],
}

fn cmd_import(ctx: &mut Context, file: PathBuf, dry_run: bool, json: bool) -> Result<(), CliError> {
    let table = read_import(&file)?;

    let outcome = if dry_run {
        // Same pipeline against a scratch copy; the roster file is not written
        let mut scratch = MemoryRosterStore::with_roster(load_roster(&ctx.store)?);
        import_batch(&mut scratch, &table)?
    } else {
        import_batch(&mut ctx.store, &table)?
    };

    if json {
        return print_json(&ImportReport {
            file: file.display().to_string(),
            dry_run,
            summary: &outcome.summary,
            roster_size: outcome.roster.len(),
            warnings: &outcome.warnings,
        });
    }

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    let s = &outcome.summary;
    eprintln!(
        "{}{} rows read: {} added, {} updated, {} unreadable birth dates; roster now has {} employees",
        if dry_run { "(dry run) " } else { "" },
        s.rows_read,
        s.added,
        s.updated,
        s.unparseable_dates,
        outcome.roster.len(),
    );
    if !s.dropped_columns.is_empty() {
        eprintln!("ignored columns: {}", s.dropped_columns.join(", "));
    }
    Ok(())
}

fn cmd_reset(ctx: &mut Context, yes: bool) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::args("refusing to delete every employee without confirmation")
            .with_hint("re-run with --yes"));
    }
    reset_roster(&mut ctx.store)?;
    eprintln!("roster reset: {}", ctx.store.path().display());
    Ok(())
}
