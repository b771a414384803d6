// CSV/TSV import

use std::io::Read;
use std::path::Path;

use hrdesk_recon::RawTable;

use crate::error::StoreError;

const UTF8_BOM: char = '\u{feff}';

/// Read a delimited text file into a raw table, sniffing the delimiter.
pub fn read_table(path: &Path) -> Result<RawTable, StoreError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    parse_table(&content, delimiter).map_err(|e| StoreError::csv(path, e))
}

pub fn read_table_with_delimiter(path: &Path, delimiter: u8) -> Result<RawTable, StoreError> {
    let content = read_file_as_utf8(path)?;
    parse_table(&content, delimiter).map_err(|e| StoreError::csv(path, e))
}

/// Delimiters roster exports use. On a tie the later entry wins, so comma is preferred.
const DELIMITERS: [u8; 3] = [b'\t', b';', b','];

/// Pick the delimiter that splits the header into the most columns and that the
/// following rows agree with. Falls back to comma.
pub fn sniff_delimiter(content: &str) -> u8 {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return b',';
    };
    let body: Vec<&str> = lines.take(5).collect();

    DELIMITERS
        .into_iter()
        .filter_map(|delimiter| {
            let width = field_count(header, delimiter);
            if width < 2 {
                return None;
            }
            let agreeing = body.iter().filter(|l| field_count(l, delimiter) == width).count();
            Some(((agreeing, width), delimiter))
        })
        .max_by_key(|&(rank, _)| rank)
        .map(|(_, delimiter)| delimiter)
        .unwrap_or(b',')
}

/// Fields on one line, honoring quotes.
fn field_count(line: &str, delimiter: u8) -> usize {
    ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

/// Read file and convert to UTF-8 if needed (Excel on Windows saves CSV as Windows-1252).
/// A leading byte-order mark is removed.
pub fn read_file_as_utf8(path: &Path) -> Result<String, StoreError> {
    let mut file = std::fs::File::open(path).map_err(|e| StoreError::unavailable(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| StoreError::unavailable(path, e))?;

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Parse delimited text with a header row. Headers are trimmed; cells are kept as-is.
pub fn parse_table(content: &str, delimiter: u8) -> Result<RawTable, ::csv::Error> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::from_rows(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Name;Phone;DOB\nDana;0501112222;1990-05-01\nAvi;0523334444;1985-02-10\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Name,Phone,DOB\nDana,0501112222,1990-05-01\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Name\tPhone\tDOB\nDana\t0501112222\t1990-05-01\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content = "Name;Address;Phone\n\"Levi, Dana\";\"Nirim 4, Tel Aviv\";0501112222\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_rows_break_header_ties() {
        // Header splits in two either way; only comma matches the data row
        let content = "Name;Notes,Phone\nDana;x;y,0501112222\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_pipe_not_considered() {
        assert_eq!(sniff_delimiter("Name|Phone|DOB\nDana|0501112222|\n"), b',');
    }

    #[test]
    fn test_sniff_empty_defaults_to_comma() {
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_parse_table_pads_and_skips_blank_lines() {
        let table = parse_table(" Full Name ,Mobile,DOB\nDana,0501112222\n,,\nAvi,0523334444,1985-02-10\n", b',')
            .unwrap();

        assert_eq!(table.column_names(), vec!["Full Name", "Mobile", "DOB"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[2].cells, vec!["".to_string(), "1985-02-10".to_string()]);
    }

    #[test]
    fn test_leading_zero_phone_kept_as_text() {
        let table = parse_table("name,phone,dob\nDana,0501112222,\n", b',').unwrap();
        assert_eq!(table.columns[1].cells[0], "0501112222");
    }

    #[test]
    fn test_windows_1252_fallback_and_bom() {
        let dir = tempdir().unwrap();

        let latin = dir.path().join("latin.csv");
        // "José" in Windows-1252
        fs::write(&latin, b"name,phone,dob\nJos\xe9,0501112222,\n").unwrap();
        let table = read_table(&latin).unwrap();
        assert_eq!(table.columns[0].cells[0], "José");

        let bom = dir.path().join("bom.csv");
        fs::write(&bom, "\u{feff}name,phone,dob\nDana,0501112222,\n").unwrap();
        let table = read_table(&bom).unwrap();
        assert_eq!(table.columns[0].name, "name");
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = read_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, StoreError::StoreUnavailable { .. }));
    }
}
