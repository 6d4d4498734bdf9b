use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{LogPair, LogStore};
use tracing::info;

/// Empties both stores. The table store keeps its header row.
pub fn run<L: LogStore, T: LogStore>(pair: &mut LogPair<L, T>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for store in pair.both_mut() {
        let removed = store.load()?.len();
        store.rewrite(&[])?;
        info!(store = store.label(), removed, "cleared store");
        result.add_message(CmdMessage::success(format!(
            "Cleared {} ({} entries removed).",
            store.label(),
            removed
        )));
    }
    Ok(result)
}
