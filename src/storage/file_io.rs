//! CSV file utilities
//!
//! Header-checked reads, single-write appends and atomic rewrites for the
//! small CSV tables the tracker persists.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::error::{TrackerError, TrackerResult};

/// Create a CSV file containing only the header row
///
/// Returns `false` without touching the file if it already exists.
pub fn create_with_headers<P: AsRef<Path>>(path: P, headers: &[&str]) -> TrackerResult<bool> {
    let path = path.as_ref();

    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(TrackerError::Io(format!(
                "Failed to create {}: {}",
                path.display(),
                e
            )))
        }
    };

    let mut writer = BufWriter::new(file);
    writer.write_all(&encode_record(headers)?)?;
    writer.flush()?;

    Ok(true)
}

/// Append one record to an existing CSV file
///
/// The record is fully encoded before the file is opened and written with a
/// single call, so a validation or encoding failure never leaves a partial row.
/// A file whose last row lacks its line terminator gets one first.
pub fn append_record<P: AsRef<Path>>(path: P, fields: &[&str]) -> TrackerResult<()> {
    let path = path.as_ref();
    let record = encode_record(fields)?;

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| TrackerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut bytes = Vec::with_capacity(record.len() + 1);
    if !ends_with_newline(&mut file)? {
        bytes.push(b'\n');
    }
    bytes.extend_from_slice(&record);

    file.write_all(&bytes)
        .map_err(|e| TrackerError::Io(format!("Failed to append to {}: {}", path.display(), e)))?;
    file.flush()?;

    Ok(())
}

/// Read all data records from a CSV file, checking the header row
///
/// Each record is paired with its 1-based line number in the file (the
/// header is line 1). Any decoding problem is reported as data corruption.
pub fn read_records<P: AsRef<Path>>(
    path: P,
    expected_headers: &[&str],
) -> TrackerResult<Vec<(usize, StringRecord)>> {
    let path = path.as_ref();
    let source_name = display_name(path);

    let file = File::open(path)
        .map_err(|e| TrackerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| TrackerError::corrupt(&source_name, 1, e.to_string()))?;
    if !headers_match(headers, expected_headers) {
        return Err(TrackerError::corrupt(
            &source_name,
            1,
            format!(
                "expected header '{}', found '{}'",
                expected_headers.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        ));
    }

    // Rows are numbered by the file line they start on, so quoted
    // multi-line fields do not shift later row numbers
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |pos| pos.line() as usize);
            TrackerError::corrupt(&source_name, line, e.to_string())
        })?;
        let line = record.position().map_or(0, |pos| pos.line() as usize);
        records.push((line, record));
    }

    Ok(records)
}

/// Rewrite a whole CSV file atomically (write to temp, then rename)
pub fn write_csv_atomic<P: AsRef<Path>>(
    path: P,
    headers: &[&str],
    rows: &[Vec<String>],
) -> TrackerResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| TrackerError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv_writer(BufWriter::new(file));
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    let buffered = writer
        .into_inner()
        .map_err(|e| TrackerError::Io(format!("Failed to flush data: {}", e)))?;
    buffered
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// An empty file counts as terminated
fn ends_with_newline(file: &mut File) -> TrackerResult<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner)
}

fn encode_record(fields: &[&str]) -> TrackerResult<Vec<u8>> {
    let mut writer = csv_writer(Vec::new());
    writer.write_record(fields)?;
    writer
        .into_inner()
        .map_err(|e| TrackerError::Csv(format!("Failed to encode record: {}", e)))
}

fn headers_match(headers: &StringRecord, expected: &[&str]) -> bool {
    headers.len() == expected.len()
        && headers
            .iter()
            .zip(expected)
            .all(|(found, want)| found.trim() == *want)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADERS: &[&str] = &["Category", "Budget"];

    #[test]
    fn test_create_with_headers_only_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.csv");

        assert!(create_with_headers(&path, HEADERS).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Category,Budget\n");

        fs::write(&path, "Category,Budget\nfood,10.00\n").unwrap();
        assert!(!create_with_headers(&path, HEADERS).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Category,Budget\nfood,10.00\n"
        );
    }

    #[test]
    fn test_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.csv");
        create_with_headers(&path, HEADERS).unwrap();

        append_record(&path, &["food", "10.00"]).unwrap();
        append_record(&path, &["eating, out", "5.00"]).unwrap();

        let records = read_records(&path, HEADERS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 2);
        assert_eq!(&records[1].1[0], "eating, out");
        assert!(fs::read_to_string(&path).unwrap().ends_with('\n'));
    }

    #[test]
    fn test_append_terminates_previous_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.csv");
        fs::write(&path, "Category,Budget\nfood,1").unwrap();

        append_record(&path, &["fuel", "2"]).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Category,Budget\nfood,1\nfuel,2\n"
        );
        assert_eq!(read_records(&path, HEADERS).unwrap().len(), 2);
    }

    #[test]
    fn test_row_numbers_follow_file_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.csv");
        fs::write(&path, "Category,Budget\n\"eating\nout\",1\nfuel,2\nrent\n").unwrap();

        let err = read_records(&path, HEADERS).unwrap_err();
        assert!(matches!(err, TrackerError::DataCorruption { row: 5, .. }));

        fs::write(&path, "Category,Budget\n\"eating\nout\",1\nfuel,2\n").unwrap();
        let lines: Vec<usize> = read_records(&path, HEADERS)
            .unwrap()
            .into_iter()
            .map(|(line, _)| line)
            .collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_append_requires_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.csv");

        assert!(append_record(&path, &["food", "1"]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_wrong_header_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.csv");
        fs::write(&path, "Cat,Limit\nfood,1\n").unwrap();

        let err = read_records(&path, HEADERS).unwrap_err();
        assert!(matches!(err, TrackerError::DataCorruption { row: 1, .. }));
    }

    #[test]
    fn test_ragged_row_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.csv");
        fs::write(&path, "Category,Budget\nfood,1\nfuel\n").unwrap();

        let err = read_records(&path, HEADERS).unwrap_err();
        assert!(matches!(err, TrackerError::DataCorruption { row: 3, .. }));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.csv");

        let rows = vec![vec!["food".to_string(), "25.00".to_string()]];
        write_csv_atomic(&path, HEADERS, &rows).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Category,Budget\nfood,25.00\n"
        );
        assert!(!temp_dir.path().join("budget.csv.tmp").exists());
    }
}
