use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Variable key → value, in insertion order.
pub type KvMap = IndexMap<String, String>;

/// One row of the working list. `index` is a stable identity, not a position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub index: u64,
}

pub type KvList = Vec<KvEntry>;

/// Instructions that turn a baseline map into the working list's map form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub add: KvMap,
    #[serde(default)]
    pub edit: KvMap,
    #[serde(default)]
    pub remove: Vec<String>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.edit.is_empty() && self.remove.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.add.len() + self.edit.len() + self.remove.len()
    }

    /// Applies add, then edit, then remove. Edited keys keep their position, added keys are
    /// appended.
    pub fn apply_to(&self, base: &mut KvMap) {
        for (k, v) in &self.add {
            base.insert(k.clone(), v.clone());
        }
        for (k, v) in &self.edit {
            base.insert(k.clone(), v.clone());
        }
        for k in &self.remove {
            base.shift_remove(k);
        }
    }
}

/// Expands a map into a list with fresh indices starting at 0.
pub fn map_to_list(map: &KvMap) -> KvList {
    map.iter()
        .enumerate()
        .map(|(i, (key, value))| KvEntry {
            key: key.clone(),
            value: value.clone(),
            index: i as u64,
        })
        .collect()
}

/// Folds a list into a map. A later entry overrides an earlier one with the same key, but
/// the key keeps the position of its first occurrence.
pub fn list_to_map(list: &[KvEntry]) -> KvMap {
    let mut out = KvMap::with_capacity(list.len());
    for entry in list {
        out.insert(entry.key.clone(), entry.value.clone());
    }
    out
}

pub fn compute_delta(baseline: &KvMap, working: &[KvEntry]) -> Delta {
    let mut delta = Delta::default();
    for entry in working {
        match baseline.get(&entry.key) {
            None => {
                delta.add.insert(entry.key.clone(), entry.value.clone());
            }
            Some(old) if old != &entry.value => {
                delta.edit.insert(entry.key.clone(), entry.value.clone());
            }
            Some(_) => {}
        }
    }

    let present: HashSet<&str> = working.iter().map(|e| e.key.as_str()).collect();
    delta.remove = baseline
        .keys()
        .filter(|k| !present.contains(k.as_str()))
        .cloned()
        .collect();
    delta
}

/// Keys that occur more than once, in order of their first repeat.
pub fn duplicate_keys(list: &[KvEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dups: Vec<String> = Vec::new();
    for entry in list {
        if !seen.insert(entry.key.as_str()) && !dups.contains(&entry.key) {
            dups.push(entry.key.clone());
        }
    }
    dups
}

/// Keeps existing indices when they are strictly increasing, otherwise renumbers from 0.
pub fn reindex(list: &mut [KvEntry]) {
    let increasing = list.windows(2).all(|w| w[0].index < w[1].index);
    if increasing {
        return;
    }
    for (i, entry) in list.iter_mut().enumerate() {
        entry.index = i as u64;
    }
}

#[cfg(test)]
#[path = "../tests/kv/delta_tests.rs"]
mod tests;
