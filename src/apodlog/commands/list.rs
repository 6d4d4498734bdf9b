use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ApodError, Result};
use crate::model::ApodRecord;
use crate::store::LogStore;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRange {
    All,
    First(usize),
    Last(usize),
}

fn take_first(records: Vec<ApodRecord>, n: usize) -> Vec<ApodRecord> {
    records.into_iter().take(n).collect()
}

/// Keeps only the trailing `n` records while scanning, in file order.
fn take_last(records: Vec<ApodRecord>, n: usize) -> Vec<ApodRecord> {
    let mut window = VecDeque::with_capacity(n);
    for record in records {
        if window.len() == n {
            window.pop_front();
        }
        window.push_back(record);
    }
    window.into()
}

pub fn run(store: &dyn LogStore, range: ListRange) -> Result<CmdResult> {
    let requested = match range {
        ListRange::All => None,
        ListRange::First(n) | ListRange::Last(n) => {
            if n < 1 {
                return Err(ApodError::InvalidInput(
                    "Please enter a number greater than 0.".to_string(),
                ));
            }
            Some(n)
        }
    };

    let records = store.load()?;
    let mut result = CmdResult::default();

    if records.is_empty() {
        result.add_message(CmdMessage::info("No log entries found."));
        return Ok(result);
    }

    let total = records.len();
    let n = match requested {
        Some(n) if n > total => {
            result.add_message(CmdMessage::info(format!(
                "Only {} entries exist. Displaying all entries instead.",
                total
            )));
            total
        }
        Some(n) => n,
        None => total,
    };

    let listed = match range {
        ListRange::Last(_) => take_last(records, n),
        _ => take_first(records, n),
    };
    Ok(result.with_records(listed))
}
