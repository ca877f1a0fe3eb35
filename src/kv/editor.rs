use super::delta::{
    Delta, KvEntry, KvList, KvMap, compute_delta, duplicate_keys, list_to_map, map_to_list,
    reindex,
};
use super::json_view::{KvError, parse_json_object, render_json};

/// Which editing surface is showing. The working list is authoritative either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorView {
    #[default]
    Rows,
    Json,
}

/// Reasons a save is not allowed right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveBlocker {
    Loading,
    InvalidJson(String),
    DuplicateKeys(Vec<String>),
    /// Rows without a name. The row editor tolerates them, storage does not.
    BlankKey,
    NoChanges,
}

impl std::fmt::Display for SaveBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveBlocker::Loading => f.write_str("a request is in flight"),
            SaveBlocker::InvalidJson(msg) => write!(f, "{}", msg),
            SaveBlocker::DuplicateKeys(keys) => {
                write!(f, "duplicate key(s) found: {}", keys.join(", "))
            }
            SaveBlocker::BlankKey => f.write_str("every variable needs a name"),
            SaveBlocker::NoChanges => f.write_str("no changes to save"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save blocked: {}", join_blockers(.0))]
    Blocked(Vec<SaveBlocker>),

    #[error("no stage selected")]
    NoStage,

    #[error("{0}")]
    Remote(String),
}

fn join_blockers(blockers: &[SaveBlocker]) -> String {
    blockers
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Working copy of one stage's variables.
///
/// Every mutation recomputes the delta and the duplicate set before returning, so the
/// accessors always describe the current list.
///
/// The JSON view is a projection of the working list. Malformed JSON never reaches the
/// list; it only sets a sticky error that blocks saving. Valid JSON clears it, and so does a
/// wholesale [`KvEditor::set_working_list`]. Leaving the JSON view clears it as well: the
/// rejected text is dropped and the untouched list is again what a save would send.
#[derive(Clone, Debug)]
pub struct KvEditor {
    baseline: KvMap,
    working: KvList,
    delta: Delta,
    duplicates: Vec<String>,
    json_error: Option<KvError>,
    view: EditorView,
}

impl KvEditor {
    pub fn new(baseline: KvMap) -> Self {
        let mut editor = Self {
            baseline: KvMap::new(),
            working: Vec::new(),
            delta: Delta::default(),
            duplicates: Vec::new(),
            json_error: None,
            view: EditorView::Rows,
        };
        editor.initialize(baseline);
        editor
    }

    pub fn initialize(&mut self, baseline: KvMap) {
        self.working = map_to_list(&baseline);
        self.baseline = baseline;
        self.json_error = None;
        self.refresh();
    }

    pub fn baseline(&self) -> &KvMap {
        &self.baseline
    }

    pub fn working(&self) -> &[KvEntry] {
        &self.working
    }

    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn json_error(&self) -> Option<&KvError> {
        self.json_error.as_ref()
    }

    pub fn view(&self) -> EditorView {
        self.view
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.delta.is_empty()
    }

    /// Replaces the working list. Indices are kept when usable, otherwise renumbered.
    pub fn set_working_list(&mut self, mut list: KvList) {
        reindex(&mut list);
        self.working = list;
        self.json_error = None;
        self.refresh();
    }

    /// Returns false when `position` is out of range.
    pub fn update_key(&mut self, position: usize, key: impl Into<String>) -> bool {
        let Some(entry) = self.working.get_mut(position) else {
            return false;
        };
        entry.key = key.into();
        self.refresh();
        true
    }

    /// Returns false when `position` is out of range.
    pub fn update_value(&mut self, position: usize, value: impl Into<String>) -> bool {
        let Some(entry) = self.working.get_mut(position) else {
            return false;
        };
        entry.value = value.into();
        self.refresh();
        true
    }

    /// Appends a blank row and returns its index.
    pub fn add_entry(&mut self) -> u64 {
        let index = self.working.last().map(|e| e.index + 1).unwrap_or(0);
        self.working.push(KvEntry {
            key: String::new(),
            value: String::new(),
            index,
        });
        self.refresh();
        index
    }

    /// Removes the row at `position` (an offset, not an index value).
    pub fn remove_entry(&mut self, position: usize) -> Option<KvEntry> {
        if position >= self.working.len() {
            return None;
        }
        let removed = self.working.remove(position);
        self.refresh();
        Some(removed)
    }

    /// Sets `key` to `value`, editing the last row with that key or appending a new one.
    pub fn upsert(&mut self, key: &str, value: impl Into<String>) {
        match self.working.iter().rposition(|e| e.key == key) {
            Some(pos) => {
                self.update_value(pos, value);
            }
            None => {
                self.add_entry();
                let pos = self.working.len() - 1;
                self.working[pos].key = key.to_string();
                self.update_value(pos, value);
            }
        }
    }

    /// Drops every row carrying `key`. Returns how many rows went away.
    pub fn remove_key(&mut self, key: &str) -> usize {
        let before = self.working.len();
        self.working.retain(|e| e.key != key);
        let removed = before - self.working.len();
        if removed > 0 {
            self.refresh();
        }
        removed
    }

    /// JSON projection of the working list (duplicates collapsed last-wins).
    pub fn json_text(&self) -> String {
        render_json(&list_to_map(&self.working))
    }

    /// Applies raw JSON to the working list. Invalid input leaves the list untouched and
    /// sets a sticky error until valid JSON arrives.
    pub fn sync_from_json(&mut self, text: &str) -> Result<(), KvError> {
        match parse_json_object(text) {
            Ok(map) => {
                self.working = map_to_list(&map);
                self.json_error = None;
                self.refresh();
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "rejected raw JSON edit");
                self.json_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Switches between row and JSON editing. Leaving the JSON view discards any invalid
    /// text, so its error goes with it.
    pub fn toggle_view(&mut self) -> EditorView {
        self.view = match self.view {
            EditorView::Rows => EditorView::Json,
            EditorView::Json => {
                self.json_error = None;
                EditorView::Rows
            }
        };
        self.view
    }

    pub fn save_blockers(&self) -> Vec<SaveBlocker> {
        let mut out = Vec::new();
        if let Some(err) = &self.json_error {
            out.push(SaveBlocker::InvalidJson(err.to_string()));
        }
        if !self.duplicates.is_empty() {
            out.push(SaveBlocker::DuplicateKeys(self.duplicates.clone()));
        }
        if self.working.iter().any(|e| e.key.trim().is_empty()) {
            out.push(SaveBlocker::BlankKey);
        }
        if self.delta.is_empty() {
            out.push(SaveBlocker::NoChanges);
        }
        out
    }

    pub fn can_save(&self) -> bool {
        self.save_blockers().is_empty()
    }

    /// Hands the current delta to `submit`. On success the baseline advances to the working
    /// list and the returned delta is what was sent; on failure nothing changes.
    pub fn save<F>(&mut self, submit: F) -> Result<Delta, SaveError>
    where
        F: FnOnce(&Delta) -> anyhow::Result<()>,
    {
        let blockers = self.save_blockers();
        if !blockers.is_empty() {
            return Err(SaveError::Blocked(blockers));
        }

        let sent = self.delta.clone();
        submit(&sent).map_err(|err| SaveError::Remote(format!("{:#}", err)))?;

        tracing::debug!(changes = sent.change_count(), "variables saved");
        self.baseline = list_to_map(&self.working);
        self.refresh();
        Ok(sent)
    }

    /// Throws away the working list and starts again from the baseline.
    pub fn cancel(&mut self) {
        let baseline = std::mem::take(&mut self.baseline);
        self.initialize(baseline);
    }

    fn refresh(&mut self) {
        self.duplicates = duplicate_keys(&self.working);
        self.delta = compute_delta(&self.baseline, &self.working);
    }
}

#[cfg(test)]
#[path = "../tests/kv/editor_tests.rs"]
mod tests;
