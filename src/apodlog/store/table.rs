use super::{ensure_parent, open_for_append, replace_file, LogStore};
use crate::error::{ApodError, Result};
use crate::model::ApodRecord;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const BASE_COLUMNS: [&str; 5] = ["date", "title", "url", "explanation", "logged_at"];
pub const LOCAL_FILE_COLUMN: &str = "local_file_path";

pub struct CsvStore {
    path: PathBuf,
    label: String,
}

/// Column positions, taken from the header row when there is one.
struct Columns {
    positions: [Option<usize>; 6],
    has_local: bool,
}

impl Columns {
    fn default_order() -> Self {
        Self {
            positions: [Some(0), Some(1), Some(2), Some(3), Some(4), None],
            has_local: false,
        }
    }

    fn from_header(header: &StringRecord) -> Self {
        let find = |name: &str| header.iter().position(|cell| cell.trim() == name);
        let local = find(LOCAL_FILE_COLUMN);
        Self {
            positions: [
                find("date"),
                find("title"),
                find("url"),
                find("explanation"),
                find("logged_at"),
                local,
            ],
            has_local: local.is_some(),
        }
    }

    fn cell<'a>(&self, row: &'a StringRecord, field: usize) -> &'a str {
        self.positions[field]
            .and_then(|pos| row.get(pos))
            .unwrap_or_default()
    }

    fn to_record(&self, row: &StringRecord) -> ApodRecord {
        let local = self.cell(row, 5);
        ApodRecord {
            date: self.cell(row, 0).to_string(),
            title: self.cell(row, 1).to_string(),
            url: self.cell(row, 2).to_string(),
            explanation: self.cell(row, 3).to_string(),
            logged_at: self.cell(row, 4).to_string(),
            local_file_path: if local.is_empty() {
                None
            } else {
                Some(local.to_string())
            },
        }
    }
}

fn is_header(row: &StringRecord) -> bool {
    row.get(0).map(|cell| cell.trim() == "date").unwrap_or(false)
}

fn header_row(with_local: bool) -> Vec<&'static str> {
    let mut header = BASE_COLUMNS.to_vec();
    if with_local {
        header.push(LOCAL_FILE_COLUMN);
    }
    header
}

fn record_row(record: &ApodRecord, with_local: bool) -> Vec<&str> {
    let mut row = vec![
        record.date.as_str(),
        record.title.as_str(),
        record.url.as_str(),
        record.explanation.as_str(),
        record.logged_at.as_str(),
    ];
    if with_local {
        row.push(record.local_file_path.as_deref().unwrap_or_default());
    }
    row
}

fn encode(records: &[ApodRecord], with_local: bool) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer
        .write_record(header_row(with_local))
        .map_err(ApodError::Csv)?;
    for record in records {
        writer
            .write_record(record_row(record, with_local))
            .map_err(ApodError::Csv)?;
    }
    writer
        .into_inner()
        .map_err(|e| ApodError::Store(format!("Could not flush CSV buffer: {}", e)))
}

impl CsvStore {
    pub fn new(path: PathBuf) -> Self {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.csv".to_string());
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn require(&self) -> Result<()> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(ApodError::StoreMissing(self.path.clone()))
        }
    }

    fn read_rows(&self) -> Result<(Option<Columns>, Vec<StringRecord>)> {
        self.require()?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(ApodError::Csv)?;

        let mut columns = None;
        let mut rows = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row.map_err(ApodError::Csv)?;
            if is_header(&row) {
                if idx == 0 {
                    columns = Some(Columns::from_header(&row));
                }
                continue;
            }
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(row);
        }
        Ok((columns, rows))
    }

    /// Whether the header row carries the `local_file_path` column.
    pub fn has_local_file_column(&self) -> Result<bool> {
        let (columns, _) = self.read_rows()?;
        Ok(columns.map(|c| c.has_local).unwrap_or(false))
    }
}

impl LogStore for CsvStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn create(&mut self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        ensure_parent(&self.path)?;
        fs::write(&self.path, encode(&[], false)?).map_err(ApodError::Io)?;
        Ok(true)
    }

    fn load(&self) -> Result<Vec<ApodRecord>> {
        let (columns, rows) = self.read_rows()?;
        let columns = columns.unwrap_or_else(Columns::default_order);
        Ok(rows.iter().map(|row| columns.to_record(row)).collect())
    }

    fn append(&mut self, record: &ApodRecord) -> Result<()> {
        self.require()?;
        let (columns, _) = self.read_rows()?;

        let with_local = match columns {
            Some(columns) => columns.has_local,
            None => {
                // Truncated file: start over with a header.
                let mut records = self.load()?;
                records.push(record.clone());
                return self.rewrite(&records);
            }
        };

        if record.local_file_path.is_some() && !with_local {
            let mut records = self.load()?;
            records.push(record.clone());
            return self.rewrite(&records);
        }

        let file = open_for_append(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .write_record(record_row(record, with_local))
            .map_err(ApodError::Csv)?;
        writer.flush().map_err(ApodError::Io)?;
        debug!(date = %record.date, store = %self.label, "appended record");
        Ok(())
    }

    fn rewrite(&mut self, records: &[ApodRecord]) -> Result<()> {
        ensure_parent(&self.path)?;
        let keep_column = if self.exists() {
            self.has_local_file_column()?
        } else {
            false
        };
        let with_local = keep_column || records.iter().any(|r| r.local_file_path.is_some());

        replace_file(&self.path, &encode(records, with_local)?)?;
        debug!(count = records.len(), store = %self.label, "rewrote store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, CsvStore) {
        let dir = TempDir::new().unwrap();
        let mut store = CsvStore::new(dir.path().join("output.csv"));
        store.create().unwrap();
        (dir, store)
    }

    fn record(date: &str) -> ApodRecord {
        ApodRecord::new(
            date,
            "Galaxy Wars: M81 versus M82",
            "https://apod.nasa.gov/apod/image/0604/M81_M82_schedler_c25.jpg",
            "In this stunning cosmic vista, galaxy M81 is on the left. On the right, M82.",
            "Day: 01-02-2024 | Time: 10:00:00",
        )
    }

    #[test]
    fn create_writes_header_only() {
        let (_dir, store) = setup();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.trim_end(), "date,title,url,explanation,logged_at");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn quoted_fields_survive_round_trip() {
        let (_dir, mut store) = setup();
        let rec = record("2006-04-15");
        store.append(&rec).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![rec]);
    }

    #[test]
    fn truncated_file_gets_header_back() {
        let (_dir, mut store) = setup();
        fs::write(store.path(), "").unwrap();
        store.append(&record("2006-04-15")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("date,title,url,explanation,logged_at"));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn appending_a_local_path_extends_the_header() {
        let (_dir, mut store) = setup();
        store.append(&record("2006-04-15")).unwrap();
        store
            .append(&record("2013-07-22").with_local_file_path("/data/apod-2013-07-22.jpg"))
            .unwrap();

        assert!(store.has_local_file_column().unwrap());
        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].local_file_path, None);
        assert_eq!(
            loaded[1].local_file_path.as_deref(),
            Some("/data/apod-2013-07-22.jpg")
        );
    }

    #[test]
    fn rewrite_keeps_existing_local_column() {
        let (_dir, mut store) = setup();
        store
            .rewrite(&[record("2006-04-15").with_local_file_path("/a.jpg")])
            .unwrap();
        store.rewrite(&[record("2000-04-06")]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("date,title,url,explanation,logged_at,local_file_path"));
    }

    #[test]
    fn append_after_row_without_newline() {
        let (_dir, mut store) = setup();
        fs::write(
            store.path(),
            "date,title,url,explanation,logged_at\n2014-07-12,SN 1006,https://x/y.jpg,A. B.,stamp",
        )
        .unwrap();

        store.append(&record("2006-04-15")).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].logged_at, "stamp");
        assert_eq!(loaded[1].date, "2006-04-15");
    }

    #[test]
    fn headerless_rows_use_default_order() {
        let (_dir, store) = setup();
        fs::write(store.path(), "2014-07-12,SN 1006,https://x/y.jpg,A. B.,stamp\n").unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "SN 1006");
    }
}
