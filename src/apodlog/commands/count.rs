use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::LogStore;

pub fn run(store: &dyn LogStore) -> Result<CmdResult> {
    let count = store.load()?.len();
    Ok(CmdResult::default().with_count(count))
}
