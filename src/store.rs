//! Flat record store shared by every collection.
//!
//! Each collection is one delimited file with a header row. Store failures
//! never propagate: they are reported to the user output and the operation
//! degrades to an empty read or a skipped write, so callers always see
//! "nothing happened" rather than an error.
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A named collection and its fixed field schema.
pub struct Collection {
    pub file: &'static str,
    pub fields: &'static [&'static str],
}

/// One persisted row, fields in schema order.
pub type Record = Vec<String>;

pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path(&self, collection: &Collection) -> PathBuf {
        self.data_dir.join(collection.file)
    }

    /// Read every record in the collection. A missing file is an empty
    /// collection; any other failure degrades to empty.
    pub fn read_all(&self, collection: &Collection) -> Vec<Record> {
        let path = self.path(collection);
        if !path.exists() {
            return Vec::new();
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                report_failure("read", &path, &err);
                return Vec::new();
            }
        };
        let mut rows = decode(&content);
        rows.retain(|row| !(row.len() == 1 && row[0].is_empty()));
        // Drop the header row.
        if !rows.is_empty() {
            rows.remove(0);
        }
        rows
    }

    /// Append one record, creating the file with a header row if absent.
    pub fn append(&self, collection: &Collection, record: &[String]) {
        let path = self.path(collection);
        let header = if path.exists() {
            None
        } else {
            Some(encode_row(collection.fields))
        };
        if let Err(err) = append_row(&path, header, encode_row(record)) {
            report_failure("write", &path, &err);
        }
    }

    /// Replace the entire collection. Not safe under concurrent writers;
    /// this process is assumed to be the only one touching the files.
    pub fn overwrite_all(&self, collection: &Collection, records: &[Record]) {
        let path = self.path(collection);
        let mut content = encode_row(collection.fields);
        for record in records {
            content.push_str(&encode_row(record));
        }
        if let Err(err) = fs::write(&path, content) {
            report_failure("rewrite", &path, &err);
        }
    }

    /// Next identifier for an id-keyed collection: max existing numeric id
    /// plus one, or 1 for an empty collection. Recomputed from storage on
    /// every call; non-numeric ids are ignored.
    pub fn next_id(&self, collection: &Collection) -> u32 {
        let Some(idx) = collection.fields.iter().position(|field| *field == "id") else {
            return 1;
        };
        self.read_all(collection)
            .iter()
            .filter_map(|record| record.get(idx))
            .filter_map(|value| value.parse::<u32>().ok())
            .max()
            .map_or(1, |max| max + 1)
    }
}

fn append_row(path: &Path, header: Option<String>, row: String) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if let Some(header) = header {
        file.write_all(header.as_bytes())?;
    }
    file.write_all(row.as_bytes())?;
    Ok(())
}

fn report_failure(action: &str, path: &Path, err: &io::Error) {
    println!("error: could not {action} {}: {err}", path.display());
    tracing::warn!("record store {action} failed for {}: {err}", path.display());
}

fn needs_quoting(field: &str) -> bool {
    field
        .chars()
        .any(|ch| matches!(ch, ',' | '"' | '\n' | '\r'))
}

fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut row = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            row.push(',');
        }
        let field = field.as_ref();
        if needs_quoting(field) {
            row.push('"');
            row.push_str(&field.replace('"', "\"\""));
            row.push('"');
        } else {
            row.push_str(field);
        }
    }
    row.push('\n');
    row
}

fn decode(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(ch),
            }
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ANIMALS: Collection = Collection {
        file: "animals.csv",
        fields: &["id", "name"],
    };

    fn record(fields: &[&str]) -> Record {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        assert!(store.read_all(&ANIMALS).is_empty());
    }

    #[test]
    fn append_writes_header_once_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.append(&ANIMALS, &record(&["1", "otter"]));
        store.append(&ANIMALS, &record(&["2", "heron"]));

        let content = std::fs::read_to_string(store.path(&ANIMALS)).unwrap();
        assert_eq!(content, "id,name\n1,otter\n2,heron\n");
        assert_eq!(
            store.read_all(&ANIMALS),
            vec![record(&["1", "otter"]), record(&["2", "heron"])]
        );
    }

    #[test]
    fn quoted_fields_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.append(&ANIMALS, &record(&["1", "fish, \"smoked\""]));
        assert_eq!(
            store.read_all(&ANIMALS),
            vec![record(&["1", "fish, \"smoked\""])]
        );
    }

    #[test]
    fn overwrite_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.append(&ANIMALS, &record(&["1", "otter"]));
        store.append(&ANIMALS, &record(&["2", "heron"]));
        store.overwrite_all(&ANIMALS, &[record(&["2", "heron"])]);
        assert_eq!(store.read_all(&ANIMALS), vec![record(&["2", "heron"])]);
    }

    #[test]
    fn next_id_starts_at_one() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        assert_eq!(store.next_id(&ANIMALS), 1);
    }

    #[test]
    fn next_id_is_max_plus_one_with_gaps() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        for id in ["1", "2", "5"] {
            store.append(&ANIMALS, &record(&[id, "x"]));
        }
        assert_eq!(store.next_id(&ANIMALS), 6);
    }

    #[test]
    fn next_id_ignores_non_numeric_ids() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.append(&ANIMALS, &record(&["3", "otter"]));
        store.append(&ANIMALS, &record(&["junk", "heron"]));
        assert_eq!(store.next_id(&ANIMALS), 4);
    }
}
