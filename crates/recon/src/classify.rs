use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::{CanonicalField, NormalizedTable, RawTable};

/// Result of classifying one import header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnClass {
    FullName,
    Phone,
    BirthDate,
    Unmapped,
}

impl ColumnClass {
    pub fn field(self) -> Option<CanonicalField> {
        match self {
            Self::FullName => Some(CanonicalField::FullName),
            Self::Phone => Some(CanonicalField::Phone),
            Self::BirthDate => Some(CanonicalField::BirthDate),
            Self::Unmapped => None,
        }
    }
}

/// Header tokens for one field. Latin tokens are lowercase and compared against the
/// lowercased header; Hebrew tokens are plain substring checks.
struct Vocabulary {
    latin: &'static [&'static str],
    hebrew: &'static [&'static str],
}

impl Vocabulary {
    fn matches(&self, header: &str, lowered: &str) -> bool {
        self.latin.iter().any(|token| lowered.contains(token))
            || self.hebrew.iter().any(|token| header.contains(token))
    }
}

struct ColumnRule {
    class: ColumnClass,
    vocabulary: Vocabulary,
}

/// Evaluated in order; the first rule whose vocabulary matches decides the class.
const RULES: [ColumnRule; 3] = [
    ColumnRule {
        class: ColumnClass::FullName,
        vocabulary: Vocabulary {
            latin: &["name"],
            hebrew: &["שם"],
        },
    },
    ColumnRule {
        class: ColumnClass::Phone,
        vocabulary: Vocabulary {
            latin: &["phone", "mobile", "tel", "cell"],
            hebrew: &["טלפון", "נייד"],
        },
    },
    ColumnRule {
        class: ColumnClass::BirthDate,
        vocabulary: Vocabulary {
            latin: &["birth", "dob", "bday"],
            hebrew: &["לידה", "יום הולדת"],
        },
    },
];

/// Classify an import header into a canonical field.
pub fn classify_column(header: &str) -> ColumnClass {
    let lowered = header.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.vocabulary.matches(header, &lowered))
        .map(|rule| rule.class)
        .unwrap_or(ColumnClass::Unmapped)
}

/// Rename import columns to the canonical fields and drop everything else.
///
/// When several columns classify to the same field, the right-most one wins and
/// the others are listed in [`NormalizedTable::superseded`].
pub fn normalize_columns(table: &RawTable) -> Result<NormalizedTable, ReconError> {
    let mut columns: HashMap<CanonicalField, Vec<String>> = HashMap::new();
    let mut sources: HashMap<CanonicalField, &str> = HashMap::new();
    let mut dropped = Vec::new();
    let mut superseded = Vec::new();

    for column in &table.columns {
        let Some(field) = classify_column(&column.name).field() else {
            dropped.push(column.name.clone());
            continue;
        };

        if let Some(previous) = sources.insert(field, &column.name) {
            superseded.push((previous.to_string(), field));
        }
        columns.insert(field, column.cells.clone());
    }

    for field in CanonicalField::ALL {
        if !columns.contains_key(&field) {
            return Err(ReconError::MissingRequiredField(field));
        }
    }

    Ok(NormalizedTable {
        columns,
        dropped,
        superseded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_headers_any_case() {
        assert_eq!(classify_column("Full Name"), ColumnClass::FullName);
        assert_eq!(classify_column("NAME"), ColumnClass::FullName);
        assert_eq!(classify_column("employee_name"), ColumnClass::FullName);
        assert_eq!(classify_column("Mobile"), ColumnClass::Phone);
        assert_eq!(classify_column("Phone Number"), ColumnClass::Phone);
        assert_eq!(classify_column("TEL"), ColumnClass::Phone);
        assert_eq!(classify_column("DOB"), ColumnClass::BirthDate);
        assert_eq!(classify_column("Date of Birth"), ColumnClass::BirthDate);
    }

    #[test]
    fn hebrew_headers() {
        assert_eq!(classify_column("שם העובד"), ColumnClass::FullName);
        assert_eq!(classify_column("שם מלא"), ColumnClass::FullName);
        assert_eq!(classify_column("טלפון"), ColumnClass::Phone);
        assert_eq!(classify_column("מספר נייד"), ColumnClass::Phone);
        assert_eq!(classify_column("תאריך לידה"), ColumnClass::BirthDate);
        assert_eq!(classify_column("יום הולדת"), ColumnClass::BirthDate);
    }

    #[test]
    fn name_check_runs_first() {
        // Matches both the name and phone vocabularies.
        assert_eq!(classify_column("Phone Name"), ColumnClass::FullName);
        // Matches both phone and birth vocabularies.
        assert_eq!(classify_column("Mobile DOB"), ColumnClass::Phone);
    }

    #[test]
    fn unknown_headers_unmapped() {
        assert_eq!(classify_column("Department"), ColumnClass::Unmapped);
        assert_eq!(classify_column("מחלקה"), ColumnClass::Unmapped);
        assert_eq!(classify_column(""), ColumnClass::Unmapped);
    }

    #[test]
    fn normalize_drops_unmapped_columns() {
        let table = RawTable::new()
            .with_column("Full Name", vec!["Dana"])
            .with_column("Department", vec!["Legal"])
            .with_column("Mobile", vec!["0501112222"])
            .with_column("DOB", vec!["1990-05-01"]);

        let normalized = normalize_columns(&table).unwrap();
        assert_eq!(normalized.columns.len(), 3);
        assert_eq!(normalized.dropped, vec!["Department".to_string()]);
        assert_eq!(normalized.cell(CanonicalField::FullName, 0), "Dana");
        assert_eq!(normalized.cell(CanonicalField::Phone, 0), "0501112222");
        assert_eq!(normalized.cell(CanonicalField::BirthDate, 0), "1990-05-01");
    }

    #[test]
    fn normalize_duplicate_field_last_column_wins() {
        let table = RawTable::new()
            .with_column("Name", vec!["Dana"])
            .with_column("Home Phone", vec!["031234567"])
            .with_column("Mobile", vec!["0501112222"])
            .with_column("Birthday", vec!["1990-05-01"]);

        let normalized = normalize_columns(&table).unwrap();
        assert_eq!(normalized.cell(CanonicalField::Phone, 0), "0501112222");
        assert_eq!(
            normalized.superseded,
            vec![("Home Phone".to_string(), CanonicalField::Phone)]
        );
    }

    #[test]
    fn normalize_missing_field_is_rejected() {
        let table = RawTable::new()
            .with_column("Full Name", vec!["Dana"])
            .with_column("Mobile", vec!["0501112222"]);

        assert_eq!(
            normalize_columns(&table),
            Err(ReconError::MissingRequiredField(CanonicalField::BirthDate))
        );
    }
}
