use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::parse_birth_date;

// ---------------------------------------------------------------------------
// Canonical schema
// ---------------------------------------------------------------------------

/// Persisted header for [`CanonicalField::FullName`].
pub const HEADER_FULL_NAME: &str = "שם העובד";
/// Persisted header for [`CanonicalField::BirthDate`].
pub const HEADER_BIRTH_DATE: &str = "תאריך לידה";
/// Persisted header for [`CanonicalField::Phone`].
pub const HEADER_PHONE: &str = "טלפון";

/// One of the three fields every roster record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    FullName,
    BirthDate,
    Phone,
}

impl CanonicalField {
    /// Column order of the persisted roster.
    pub const ALL: [CanonicalField; 3] = [Self::FullName, Self::BirthDate, Self::Phone];

    /// Header written to the roster file.
    pub fn header(self) -> &'static str {
        match self {
            Self::FullName => HEADER_FULL_NAME,
            Self::BirthDate => HEADER_BIRTH_DATE,
            Self::Phone => HEADER_PHONE,
        }
    }

    /// A latin header that the column classifier accepts for this field.
    pub fn example_header(self) -> &'static str {
        match self {
            Self::FullName => "\"Full Name\"",
            Self::BirthDate => "\"Birth Date\"",
            Self::Phone => "\"Phone\"",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullName => write!(f, "full_name"),
            Self::BirthDate => write!(f, "birth_date"),
            Self::Phone => write!(f, "phone_number"),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    /// Birth date text no known layout accepts. Written back unchanged on save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unparsed_birth_date: Option<String>,
    /// Kept as text: leading zeros and formatting must survive round trips.
    pub phone_number: String,
}

impl EmployeeRecord {
    pub fn new(
        full_name: impl Into<String>,
        birth_date: Option<NaiveDate>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            birth_date,
            unparsed_birth_date: None,
            phone_number: phone_number.into(),
        }
    }

    /// Build from table cells. The name is trimmed; a birth date cell that does
    /// not parse is kept verbatim in [`EmployeeRecord::unparsed_birth_date`].
    pub fn from_cells(full_name: &str, birth_date: &str, phone_number: impl Into<String>) -> Self {
        let parsed = parse_birth_date(birth_date);
        let unparsed = match parsed {
            None if !birth_date.trim().is_empty() => Some(birth_date.to_string()),
            _ => None,
        };
        Self {
            full_name: full_name.trim().to_string(),
            birth_date: parsed,
            unparsed_birth_date: unparsed,
            phone_number: phone_number.into(),
        }
    }

    /// Birth date as persisted: ISO when parsed, else the original text, else empty.
    pub fn birth_date_cell(&self) -> String {
        match (&self.birth_date, &self.unparsed_birth_date) {
            (Some(date), _) => date.format("%Y-%m-%d").to_string(),
            (None, Some(raw)) => raw.clone(),
            (None, None) => String::new(),
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Identity of a record within a roster: (full_name, phone_number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub full_name: String,
    pub phone_number: String,
}

/// Ordered employee list, unique by [`RecordKey`].
///
/// Only constructed through [`Roster::from_records`] or the merge
/// operations, so the uniqueness invariant always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    records: Vec<EmployeeRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from arbitrary records, resolving duplicate keys last-wins.
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        crate::merge::merge(&Self::default(), &records)
    }

    pub(crate) fn from_unique(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose name matches exactly.
    pub fn find_by_name(&self, full_name: &str) -> Option<&EmployeeRecord> {
        self.records.iter().find(|r| r.full_name == full_name)
    }

    pub fn get(&self, key: &RecordKey) -> Option<&EmployeeRecord> {
        self.records
            .iter()
            .find(|r| r.full_name == key.full_name && r.phone_number == key.phone_number)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a EmployeeRecord;
    type IntoIter = std::slice::Iter<'a, EmployeeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// A column of an imported file, header plus text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<String>,
}

/// Imported tabular data before column normalization. Column names are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a header row and data rows. Short rows are padded with empty cells;
    /// cells beyond the header width are ignored.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut columns: Vec<RawColumn> = headers
            .into_iter()
            .map(|name| RawColumn {
                name,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or_default());
            }
        }

        Self { columns }
    }

    pub fn with_column(mut self, name: impl Into<String>, cells: Vec<&str>) -> Self {
        self.columns.push(RawColumn {
            name: name.into(),
            cells: cells.into_iter().map(str::to_string).collect(),
        });
        self
    }

    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A table reduced to the three canonical columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTable {
    pub columns: HashMap<CanonicalField, Vec<String>>,
    /// Source columns that matched no vocabulary.
    pub dropped: Vec<String>,
    /// Source columns discarded because a later column classified to the same field.
    pub superseded: Vec<(String, CanonicalField)>,
}

impl NormalizedTable {
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `row` of `field`, empty when the column is shorter.
    pub fn cell(&self, field: CanonicalField, row: usize) -> &str {
        self.columns
            .get(&field)
            .and_then(|cells| cells.get(row))
            .map(String::as_str)
            .unwrap_or("")
    }
}
