use super::{ensure_parent, open_for_append, replace_file, LogStore};
use crate::error::{ApodError, Result};
use crate::model::ApodRecord;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct JsonlStore {
    path: PathBuf,
    label: String,
}

impl JsonlStore {
    pub fn new(path: PathBuf) -> Self {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.jsonl".to_string());
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
}

fn encode_line(record: &ApodRecord) -> Result<String> {
    let mut line = serde_json::to_string(record).map_err(ApodError::Serialization)?;
    line.push('\n');
    Ok(line)
}

impl LogStore for JsonlStore {
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
        fs::write(&self.path, "").map_err(ApodError::Io)?;
        Ok(true)
    }

    fn load(&self) -> Result<Vec<ApodRecord>> {
        self.require()?;
        let file = fs::File::open(&self.path).map_err(ApodError::Io)?;

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(ApodError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            let record: ApodRecord = serde_json::from_str(&line).map_err(|e| {
                ApodError::Store(format!(
                    "Could not decode line {} of '{}': {}",
                    idx + 1,
                    self.label,
                    e
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn append(&mut self, record: &ApodRecord) -> Result<()> {
        self.require()?;
        let line = encode_line(record)?;
        let mut file = open_for_append(&self.path)?;
        file.write_all(line.as_bytes()).map_err(ApodError::Io)?;
        debug!(date = %record.date, store = %self.label, "appended record");
        Ok(())
    }

    fn rewrite(&mut self, records: &[ApodRecord]) -> Result<()> {
        ensure_parent(&self.path)?;
        let mut content = String::new();
        for record in records {
            content.push_str(&encode_line(record)?);
        }
        replace_file(&self.path, content.as_bytes())?;
        debug!(count = records.len(), store = %self.label, "rewrote store");
        Ok(())
    }
}
