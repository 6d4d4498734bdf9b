use super::LogStore;
use crate::error::{ApodError, Result};
use crate::model::ApodRecord;
use std::path::PathBuf;

/// In-memory log for testing and development.
/// Does NOT persist data.
pub struct InMemoryStore {
    label: String,
    records: Option<Vec<ApodRecord>>,
    pub writes: usize,
}

impl InMemoryStore {
    /// An existing, empty store.
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            records: Some(Vec::new()),
            writes: 0,
        }
    }

    /// A store whose backing file does not exist yet.
    pub fn missing(label: &str) -> Self {
        Self {
            label: label.to_string(),
            records: None,
            writes: 0,
        }
    }

    pub fn records(&self) -> &[ApodRecord] {
        self.records.as_deref().unwrap_or_default()
    }

    fn require(&self) -> Result<&Vec<ApodRecord>> {
        self.records
            .as_ref()
            .ok_or_else(|| ApodError::StoreMissing(PathBuf::from(&self.label)))
    }
}

impl LogStore for InMemoryStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn exists(&self) -> bool {
        self.records.is_some()
    }

    fn create(&mut self) -> Result<bool> {
        if self.records.is_some() {
            return Ok(false);
        }
        self.records = Some(Vec::new());
        Ok(true)
    }

    fn load(&self) -> Result<Vec<ApodRecord>> {
        self.require().cloned()
    }

    fn append(&mut self, record: &ApodRecord) -> Result<()> {
        self.require()?;
        self.records.get_or_insert_with(Vec::new).push(record.clone());
        self.writes += 1;
        Ok(())
    }

    fn rewrite(&mut self, records: &[ApodRecord]) -> Result<()> {
        self.records = Some(records.to_vec());
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::LogPair;

    pub type MemoryPair = LogPair<InMemoryStore, InMemoryStore>;

    pub fn record(date: &str) -> ApodRecord {
        ApodRecord::new(
            date,
            format!("APOD {}", date),
            format!("https://apod.nasa.gov/apod/image/{}.jpg", date),
            "First sentence. Second sentence.",
            "Day: 01-01-2024 | Time: 12:00:00",
        )
    }

    pub struct StoreFixture {
        pub pair: MemoryPair,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                pair: LogPair::new(
                    InMemoryStore::new("output.jsonl"),
                    InMemoryStore::new("output.csv"),
                ),
            }
        }

        /// Adds the same records to both stores, in the given order.
        pub fn with_dates(mut self, dates: &[&str]) -> Self {
            for date in dates {
                let rec = record(date);
                self.pair.lines.append(&rec).unwrap();
                self.pair.table.append(&rec).unwrap();
            }
            self.pair.lines.writes = 0;
            self.pair.table.writes = 0;
            self
        }

        pub fn with_line_only(mut self, date: &str) -> Self {
            self.pair.lines.append(&record(date)).unwrap();
            self.pair.lines.writes = 0;
            self
        }

        pub fn with_table_only(mut self, date: &str) -> Self {
            self.pair.table.append(&record(date)).unwrap();
            self.pair.table.writes = 0;
            self
        }

        pub fn build(self) -> MemoryPair {
            self.pair
        }
    }
}
