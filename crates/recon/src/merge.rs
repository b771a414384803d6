use std::collections::HashMap;

use crate::model::{EmployeeRecord, RecordKey, Roster};

/// Counts produced by a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Keys present in the result but not in the existing roster.
    pub added: usize,
    /// Batch rows that overwrote an earlier row with the same key.
    pub replaced: usize,
}

/// Merge a batch into a roster: existing rows first, then the batch, deduplicated
/// on (full_name, phone_number) with the **last** occurrence winning.
///
/// A replaced record keeps the position of the first occurrence of its key, so
/// reimporting an employee updates them in place.
pub fn merge(existing: &Roster, batch: &[EmployeeRecord]) -> Roster {
    merge_with_stats(existing, batch).0
}

pub fn merge_with_stats(existing: &Roster, batch: &[EmployeeRecord]) -> (Roster, MergeStats) {
    let mut merged: Vec<EmployeeRecord> = Vec::with_capacity(existing.len() + batch.len());
    let mut positions: HashMap<RecordKey, usize> = HashMap::with_capacity(merged.capacity());
    let mut stats = MergeStats::default();

    for record in existing.iter() {
        positions.insert(record.key(), merged.len());
        merged.push(record.clone());
    }

    for record in batch {
        match positions.get(&record.key()) {
            Some(&idx) => {
                merged[idx] = record.clone();
                stats.replaced += 1;
            }
            None => {
                positions.insert(record.key(), merged.len());
                merged.push(record.clone());
                stats.added += 1;
            }
        }
    }

    (Roster::from_unique(merged), stats)
}

/// Add one manually entered record. An existing key is updated, not duplicated.
pub fn append_or_update(roster: &Roster, record: EmployeeRecord) -> Roster {
    merge(roster, std::slice::from_ref(&record))
}

/// Empty roster with the canonical schema.
pub fn reset() -> Roster {
    Roster::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(name: &str, phone: &str, date: Option<(i32, u32, u32)>) -> EmployeeRecord {
        EmployeeRecord::new(
            name,
            date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            phone,
        )
    }

    fn roster() -> Roster {
        Roster::from_records(vec![
            rec("Dana", "0501112222", Some((1990, 5, 1))),
            rec("Avi", "0523334444", Some((1985, 2, 10))),
        ])
    }

    #[test]
    fn empty_batch_is_identity() {
        let r = roster();
        assert_eq!(merge(&r, &[]), r);
    }

    #[test]
    fn same_key_updates_in_place() {
        let r = roster();
        let update = rec("Dana", "0501112222", Some((1991, 6, 2)));
        let (merged, stats) = merge_with_stats(&r, &[update.clone()]);

        assert_eq!(merged.len(), r.len());
        assert_eq!(merged.records()[0], update);
        assert_eq!(stats, MergeStats { added: 0, replaced: 1 });
    }

    #[test]
    fn new_key_appends() {
        let r = roster();
        let merged = append_or_update(&r, rec("Noa", "0547778888", None));
        assert_eq!(merged.len(), r.len() + 1);
        assert_eq!(merged.records()[2].full_name, "Noa");
    }

    #[test]
    fn same_name_different_phone_is_distinct() {
        let r = roster();
        let merged = append_or_update(&r, rec("Dana", "0509990000", None));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn duplicates_within_batch_last_wins() {
        let batch = vec![
            rec("Noa", "0547778888", Some((2000, 1, 1))),
            rec("Noa", "0547778888", Some((2001, 1, 1))),
        ];
        let (merged, stats) = merge_with_stats(&Roster::new(), &batch);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.records()[0], batch[1]);
        assert_eq!(stats, MergeStats { added: 1, replaced: 1 });
    }

    #[test]
    fn reset_is_empty() {
        assert!(reset().is_empty());
    }
}
