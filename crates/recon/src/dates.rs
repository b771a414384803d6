// Lenient birth date parsing for imported cells

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order. Day-first layouts come before year-first
/// slash dates because roster exports use the local DD/MM/YYYY convention.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Timestamp layouts written by spreadsheet and dataframe exports.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Largest serial Excel accepts (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Parse a birth date cell. Returns `None` for empty or unrecognized input.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }

    parse_excel_serial(value)
}

fn parse_excel_serial(value: &str) -> Option<NaiveDate> {
    let serial: f64 = value.parse().ok()?;
    from_excel_serial(serial)
}

/// Excel 1900-system serial day number to a date. Day 60 is the phantom
/// 1900-02-29, so counting from 1899-12-30 is correct for every serial after it;
/// earlier serials are rejected.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 61.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
