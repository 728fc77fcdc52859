//! Name corpus storage.
//!
//! The corpus is a flat file of fixed-width records, one name per record.
//! Each record is [`RECORD_WIDTH`] bytes of UTF-8, right-padded with NUL
//! bytes. Names longer than the record are truncated on write.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Bytes per name record
pub const RECORD_WIDTH: usize = 20;

#[derive(Debug)]
pub enum CorpusError {
    Io(io::Error),
    Csv(csv::Error),
    /// Record at this index is not valid UTF-8
    InvalidUtf8 { record: usize },
    /// The corpus file held no names
    Empty(PathBuf),
    /// A generator was given an empty name list
    NoNames,
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io(err) => write!(f, "Corpus I/O error: {}", err),
            CorpusError::Csv(err) => write!(f, "Corpus CSV error: {}", err),
            CorpusError::InvalidUtf8 { record } => {
                write!(f, "Corpus record {} is not valid UTF-8", record)
            }
            CorpusError::Empty(path) => write!(f, "Corpus '{}' contains no names", path.display()),
            CorpusError::NoNames => write!(f, "Customer generator needs at least one name"),
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorpusError::Io(err) => Some(err),
            CorpusError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CorpusError {
    fn from(err: io::Error) -> Self {
        CorpusError::Io(err)
    }
}

impl From<csv::Error> for CorpusError {
    fn from(err: csv::Error) -> Self {
        CorpusError::Csv(err)
    }
}

/// Pack a name into one record.
///
/// Surrounding whitespace is stripped. Over-long names are cut at the last
/// character boundary that fits.
pub fn encode_record(name: &str) -> [u8; RECORD_WIDTH] {
    let name = name.trim();
    let mut end = name.len().min(RECORD_WIDTH);
    while !name.is_char_boundary(end) {
        end -= 1;
    }

    let mut record = [0u8; RECORD_WIDTH];
    record[..end].copy_from_slice(&name.as_bytes()[..end]);
    record
}

/// Unpack one record, dropping the NUL padding and surrounding whitespace
pub fn decode_record(record: &[u8]) -> Option<String> {
    let used = record
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    std::str::from_utf8(&record[..used])
        .ok()
        .map(|name| name.trim().to_string())
}

/// Read every complete record in `path`. A trailing partial record is ignored.
pub fn load_names(path: impl AsRef<Path>) -> Result<Vec<String>, CorpusError> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;

    let names = bytes
        .chunks_exact(RECORD_WIDTH)
        .enumerate()
        .map(|(record, chunk)| decode_record(chunk).ok_or(CorpusError::InvalidUtf8 { record }))
        .collect::<Result<Vec<_>, _>>()?;

    if names.is_empty() {
        return Err(CorpusError::Empty(path.to_path_buf()));
    }
    log::debug!("[Corpus] Loaded {} names from {}", names.len(), path.display());
    Ok(names)
}

/// Write `names` as fixed-width records, replacing `path`
pub fn save_names<S: AsRef<str>>(names: &[S], path: impl AsRef<Path>) -> Result<(), CorpusError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for name in names {
        writer.write_all(&encode_record(name.as_ref()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read names from a CSV file.
///
/// Accepts both one name per row and all names in a single row; every
/// non-empty cell becomes one name.
pub fn read_csv_names(path: impl AsRef<Path>) -> Result<Vec<String>, CorpusError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut names = Vec::new();
    for row in reader.records() {
        let row = row?;
        names.extend(
            row.iter()
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string),
        );
    }

    if names.is_empty() {
        return Err(CorpusError::Empty(path.to_path_buf()));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("barbershop-{}-{}", tag, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_record_round_trip_strips_whitespace() {
        let record = encode_record("  Alice \n");
        assert_eq!(record.len(), RECORD_WIDTH);
        assert_eq!(&record[..5], b"Alice");
        assert!(record[5..].iter().all(|&b| b == 0));
        assert_eq!(decode_record(&record).as_deref(), Some("Alice"));
    }

    #[test]
    fn test_full_width_name_round_trips() {
        let name = "ABCDEFGHIJKLMNOPQRST";
        assert_eq!(name.len(), RECORD_WIDTH);
        assert_eq!(decode_record(&encode_record(name)).as_deref(), Some(name));
    }

    #[test]
    fn test_long_name_truncated() {
        let record = encode_record("Bartholomew-Maximilian Smith");
        assert_eq!(decode_record(&record).as_deref(), Some("Bartholomew-Maximili"));
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // 19 ASCII bytes followed by a two-byte character
        let name = format!("{}é", "a".repeat(19));
        let decoded = decode_record(&encode_record(&name)).unwrap();
        assert_eq!(decoded, "a".repeat(19));
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("names.bin");
        let names = vec!["Alice", "Bob", " Carol "];
        save_names(&names, &path).unwrap();

        let loaded = load_names(&path).unwrap();
        assert_eq!(loaded, vec!["Alice", "Bob", "Carol"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_trailing_partial_record_ignored() {
        let path = scratch_path("partial.bin");
        let mut bytes = encode_record("Dave").to_vec();
        bytes.extend_from_slice(b"Ev");
        std::fs::write(&path, &bytes).unwrap();

        assert_eq!(load_names(&path).unwrap(), vec!["Dave"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_corpus_is_error() {
        let path = scratch_path("empty.bin");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(load_names(&path), Err(CorpusError::Empty(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_csv_single_row_and_column() {
        let row = scratch_path("row.csv");
        std::fs::write(&row, "Alice,Bob, Carol\n").unwrap();
        assert_eq!(read_csv_names(&row).unwrap(), vec!["Alice", "Bob", "Carol"]);

        let column = scratch_path("column.csv");
        std::fs::write(&column, "Alice\nBob\n\nCarol\n").unwrap();
        assert_eq!(read_csv_names(&column).unwrap(), vec!["Alice", "Bob", "Carol"]);

        std::fs::remove_file(&row).unwrap();
        std::fs::remove_file(&column).unwrap();
    }
}
