use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use hrdesk_io::store::{import_batch, load_roster, save_roster};
use hrdesk_io::{read_import, CsvRosterStore, RosterStore};
use hrdesk_recon::model::{EmployeeRecord, Roster};
use tempfile::tempdir;

fn seeded_store(dir: &std::path::Path) -> CsvRosterStore {
    let mut store = CsvRosterStore::new(dir.join("employees.csv"));
    let roster = Roster::from_records(vec![EmployeeRecord::new(
        "Dana",
        NaiveDate::from_ymd_opt(1990, 5, 1),
        "0501112222",
    )]);
    save_roster(&mut store, &roster).unwrap();
    store
}

fn write_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_import_merges_into_store() {
    let dir = tempdir().unwrap();
    let mut store = seeded_store(dir.path());
    let import = write_file(
        dir.path(),
        "import.csv",
        "Full Name,Mobile,DOB\nDana,0501112222.0,1990-05-01\nAvi,0523334444,1985-02-10\n",
    );

    let table = read_import(&import).unwrap();
    let outcome = import_batch(&mut store, &table).unwrap();
    assert_eq!(outcome.summary.added, 1);
    assert_eq!(outcome.summary.updated, 1);

    let roster = load_roster(&store).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.records()[0].phone_number, "0501112222");
    assert_eq!(roster.records()[1].full_name, "Avi");

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "שם העובד,תאריך לידה,טלפון\nDana,1990-05-01,0501112222\nAvi,1985-02-10,0523334444\n"
    );
}

#[test]
fn semicolon_tsv_and_hebrew_headers() {
    let dir = tempdir().unwrap();
    let mut store = CsvRosterStore::new(dir.path().join("employees.csv"));

    let semicolon = write_file(dir.path(), "a.csv", "שם;טלפון;תאריך לידה\nנועה;054-777-8888;01/05/1992\n");
    let tsv = write_file(dir.path(), "b.tsv", "Name\tCell\tBirthday\nYossi\t0529990000\t\n");

    import_batch(&mut store, &read_import(&semicolon).unwrap()).unwrap();
    import_batch(&mut store, &read_import(&tsv).unwrap()).unwrap();

    let roster = store.load().unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.records()[0].birth_date, NaiveDate::from_ymd_opt(1992, 5, 1));
    assert_eq!(roster.records()[1].birth_date, None);
}

#[test]
fn rejected_import_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let mut store = seeded_store(dir.path());
    let before = fs::read(store.path()).unwrap();

    let import = write_file(dir.path(), "bad.csv", "Full Name,DOB\nAvi,1985-02-10\n");
    assert!(import_batch(&mut store, &read_import(&import).unwrap()).is_err());

    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn xlsx_first_sheet_import() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Full Name").unwrap();
    sheet.write_string(0, 1, "Mobile").unwrap();
    sheet.write_string(0, 2, "DOB").unwrap();
    sheet.write_string(0, 3, "Department").unwrap();
    sheet.write_string(1, 0, "Dana").unwrap();
    sheet.write_string(1, 1, "0501112222.0").unwrap();
    sheet.write_string(1, 2, "1990-05-01").unwrap();
    sheet.write_string(1, 3, "Legal").unwrap();
    sheet.write_string(2, 0, "Avi").unwrap();
    // Numeric phone column: leading zero is already gone in the source
    sheet.write_number(2, 1, 523334444.0).unwrap();
    sheet.write_number(2, 2, 31088.0).unwrap();
    let other = workbook.add_worksheet();
    other.write_string(0, 0, "ignored").unwrap();
    workbook.save(&path).unwrap();

    let table = read_import(&path).unwrap();
    assert_eq!(table.column_names(), vec!["Full Name", "Mobile", "DOB", "Department"]);

    let mut store = seeded_store(dir.path());
    let outcome = import_batch(&mut store, &table).unwrap();
    let records = outcome.roster.records();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].phone_number, "0501112222");
    assert_eq!(records[1].phone_number, "523334444");
    assert_eq!(records[1].birth_date, NaiveDate::from_ymd_opt(1985, 2, 10));
}
