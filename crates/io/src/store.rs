//! Roster persistence.
//!
//! The roster lives in a single CSV file with the three canonical headers.
//! Every operation loads the whole file and every mutation rewrites it.
//!
//! There is no locking. Two sessions editing the same file concurrently lose
//! updates: whichever saves last silently discards the other's changes. The
//! tool is meant for one operator at a time.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use hrdesk_recon::engine::records_from_table;
use hrdesk_recon::model::{CanonicalField, EmployeeRecord};
use hrdesk_recon::{normalize_columns, ImportOutcome, RawTable, Roster};
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Backing storage for the roster.
pub trait RosterStore {
    /// Load the full roster. A store with nothing persisted yields an empty roster.
    fn load(&self) -> Result<Roster, StoreError>;

    /// Replace the persisted roster. Either the whole roster is written or the
    /// previous state is left untouched.
    fn save(&mut self, roster: &Roster) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// CSV file store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CsvRosterStore {
    path: PathBuf,
}

impl CsvRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for CsvRosterStore {
    fn load(&self) -> Result<Roster, StoreError> {
        if !self.path.exists() {
            log::debug!("no roster at {}, starting empty", self.path.display());
            return Ok(Roster::new());
        }

        let content = crate::csv::read_file_as_utf8(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Roster::new());
        }

        parse_roster(&content).map_err(|e| match e {
            ParseError::Csv(source) => StoreError::csv(&self.path, source),
            ParseError::Recon(source) => StoreError::Recon(source),
        })
    }

    fn save(&mut self, roster: &Roster) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| StoreError::unavailable(&dir, e))?;

        // Write next to the target, then rename over it
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::unavailable(&dir, e))?;
        write_roster(tmp.as_file_mut(), roster).map_err(|e| match e {
            WriteError::Csv(source) => StoreError::csv(&self.path, source),
            WriteError::Io(source) => StoreError::unavailable(&self.path, source),
        })?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::unavailable(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::unavailable(&self.path, e.error))?;

        log::info!("saved {} employees to {}", roster.len(), self.path.display());
        Ok(())
    }
}

enum ParseError {
    Csv(::csv::Error),
    Recon(hrdesk_recon::ReconError),
}

enum WriteError {
    Csv(::csv::Error),
    Io(std::io::Error),
}

fn is_canonical_header(headers: &::csv::StringRecord) -> bool {
    headers.len() == CanonicalField::ALL.len()
        && headers
            .iter()
            .zip(CanonicalField::ALL)
            .all(|(h, field)| h.trim() == field.header())
}

/// Parse persisted roster text.
///
/// A file with the canonical headers is read verbatim (names trimmed, unparseable
/// birth dates kept as text) so that load-then-save is byte-identical. Any other
/// header layout (a hand-edited or foreign export) goes through column normalization.
fn parse_roster(content: &str) -> Result<Roster, ParseError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().map_err(ParseError::Csv)?.clone();

    if !is_canonical_header(&headers) {
        log::warn!("roster headers {:?} are not canonical, normalizing", headers.iter().collect::<Vec<_>>());
        let table = crate::csv::parse_table(content, b',').map_err(ParseError::Csv)?;
        let normalized = normalize_columns(&table).map_err(ParseError::Recon)?;
        let (records, date_errors) = records_from_table(&normalized);
        for err in date_errors {
            log::warn!("{err}");
        }
        return Ok(Roster::from_records(records));
    }

    let mut records = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(ParseError::Csv)?;
        let employee = EmployeeRecord::from_cells(
            record.get(0).unwrap_or(""),
            record.get(1).unwrap_or(""),
            record.get(2).unwrap_or(""),
        );
        if let Some(raw) = &employee.unparsed_birth_date {
            log::warn!("roster row {}: cannot parse birth date '{raw}', keeping it as text", idx + 1);
        }
        records.push(employee);
    }

    Ok(Roster::from_records(records))
}

fn write_roster<W: Write>(out: W, roster: &Roster) -> Result<(), WriteError> {
    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer
        .write_record(CanonicalField::ALL.iter().map(|f| f.header()))
        .map_err(WriteError::Csv)?;

    for record in roster {
        let birth_date = record.birth_date_cell();
        writer
            .write_record([record.full_name.as_str(), birth_date.as_str(), record.phone_number.as_str()])
            .map_err(WriteError::Csv)?;
    }

    writer.flush().map_err(WriteError::Io)
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Roster store without a filesystem, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryRosterStore {
    roster: Roster,
    saves: usize,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self { roster, saves: 0 }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl RosterStore for MemoryRosterStore {
    fn load(&self) -> Result<Roster, StoreError> {
        Ok(self.roster.clone())
    }

    fn save(&mut self, roster: &Roster) -> Result<(), StoreError> {
        self.roster = roster.clone();
        self.saves += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Caller-facing operations
// ---------------------------------------------------------------------------

pub fn load_roster<S: RosterStore + ?Sized>(store: &S) -> Result<Roster, StoreError> {
    store.load()
}

pub fn save_roster<S: RosterStore + ?Sized>(store: &mut S, roster: &Roster) -> Result<(), StoreError> {
    store.save(roster)
}

/// Add a manually entered employee, or update the one with the same name and phone.
pub fn append_or_update<S: RosterStore + ?Sized>(
    store: &mut S,
    record: EmployeeRecord,
) -> Result<Roster, StoreError> {
    let roster = hrdesk_recon::append_or_update(&store.load()?, record);
    store.save(&roster)?;
    Ok(roster)
}

/// Reconcile an imported table into the stored roster. The store is written only
/// after normalization and merge succeed; a rejected import leaves it untouched.
pub fn import_batch<S: RosterStore + ?Sized>(
    store: &mut S,
    table: &RawTable,
) -> Result<ImportOutcome, StoreError> {
    let existing = store.load()?;
    let outcome = hrdesk_recon::import_batch(&existing, table)?;
    store.save(&outcome.roster)?;
    Ok(outcome)
}

/// Replace the roster with an empty one. Irreversible.
pub fn reset_roster<S: RosterStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.save(&hrdesk_recon::reset())
}
