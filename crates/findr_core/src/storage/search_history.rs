//! Search history save/load as a JSON string list.

use crate::search::SearchHistory;
use crate::storage::StorageResult;
use log::info;
use std::path::Path;

/// Reads history from `path`; a missing file loads as empty history.
pub fn load_search_history(path: impl AsRef<Path>) -> StorageResult<SearchHistory> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(SearchHistory::new());
    }
    let raw = std::fs::read_to_string(path)?;
    let history: SearchHistory = serde_json::from_str(&raw)?;
    info!(
        "event=search_history_load module=storage status=ok entries={}",
        history.entries().len()
    );
    Ok(history)
}

/// Writes history to `path` as a JSON list.
pub fn save_search_history(path: impl AsRef<Path>, history: &SearchHistory) -> StorageResult<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(history)?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}
