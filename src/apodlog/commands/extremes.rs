use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ApodRecord;
use crate::store::LogStore;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Newest,
    Oldest,
}

impl Extreme {
    /// The ordering a challenger must have against the current pick to replace it.
    fn wins(&self) -> Ordering {
        match self {
            Extreme::Newest => Ordering::Greater,
            Extreme::Oldest => Ordering::Less,
        }
    }
}

/// ISO dates sort lexically, so a plain string compare is enough. Ties keep
/// the first record seen.
fn pick(records: Vec<ApodRecord>, extreme: Extreme) -> Option<ApodRecord> {
    let mut best: Option<ApodRecord> = None;
    for record in records {
        let replace = match &best {
            None => true,
            Some(current) => record.date.cmp(&current.date) == extreme.wins(),
        };
        if replace {
            best = Some(record);
        }
    }
    best
}

pub fn run(store: &dyn LogStore, extreme: Extreme) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match pick(store.load()?, extreme) {
        Some(record) => Ok(result.with_records(vec![record])),
        None => {
            result.add_message(CmdMessage::info(format!("{} is empty.", store.label())));
            Ok(result)
        }
    }
}
