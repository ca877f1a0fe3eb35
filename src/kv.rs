//! Key/value delta engine.
//!
//! `delta` holds the pure list/map transforms and the diff, `json_view` the raw-JSON
//! projection, and `editor` the stateful working copy that ties them together.

mod delta;
mod editor;
mod json_view;

pub use self::delta::{
    Delta, KvEntry, KvList, KvMap, compute_delta, duplicate_keys, list_to_map, map_to_list,
    reindex,
};
pub use self::editor::{EditorView, KvEditor, SaveBlocker, SaveError};
pub use self::json_view::{KvError, parse_json_object, render_json, scalar_map};
