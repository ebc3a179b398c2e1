//! Document patching: embedding identifier tokens into task lines.
//!
//! Given tasks known to lack identifiers, the patcher groups them by owning
//! document, appends ` 🆔 {id}` to each task's exact source line, and
//! persists every touched document with a single write.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::fingerprint::fingerprint;
use crate::notice::{Notice, NoticeSink};
use crate::store::DocumentStore;
use crate::task::{Task, ID_MARKER};

/// Rewrites vault documents to persist task identifiers.
pub struct Patcher<'a> {
    store: &'a dyn DocumentStore,
    notices: &'a dyn NoticeSink,
}

impl<'a> Patcher<'a> {
    pub fn new(store: &'a dyn DocumentStore, notices: &'a dyn NoticeSink) -> Self {
        Self { store, notices }
    }

    /// Assign fingerprints to `tasks` and append their identifier tokens to
    /// the matching lines of the owning documents.
    ///
    /// When `target` is given, every task is assumed to live in that
    /// document; otherwise tasks are grouped by their own path. Each
    /// document is read and written at most once per call.
    pub fn write_ids(&self, tasks: Vec<&mut Task>, target: Option<&str>) -> Result<()> {
        let mut by_doc: BTreeMap<String, Vec<&mut Task>> = BTreeMap::new();
        match target {
            Some(path) => {
                by_doc.insert(path.to_string(), tasks);
            }
            None => {
                for task in tasks {
                    by_doc.entry(task.path.clone()).or_default().push(task);
                }
            }
        }

        for (path, group) in by_doc {
            self.patch_document(&path, group)?;
        }
        Ok(())
    }

    fn patch_document(&self, path: &str, tasks: Vec<&mut Task>) -> Result<()> {
        let mut content = self.store.read(path)?;
        let mut changed = false;

        for task in tasks {
            let id = fingerprint(task);
            task.id = Some(id.clone());

            let needle = task.source_line();
            let matches = line_occurrences(&content, &needle);
            match matches.len() {
                0 => {
                    self.notices.notify(Notice::warning(format!(
                        "The string \"{needle}\" was not found in document {path}"
                    )));
                    continue;
                }
                1 => {}
                count => {
                    self.notices.notify(Notice::warning(format!(
                        "The string \"{needle}\" was found {count} times in document {path}"
                    )));
                }
            }

            // First occurrence wins when the line is duplicated.
            let insert_at = matches[0] + needle.len();
            content.insert_str(insert_at, &format!(" {ID_MARKER} {id}"));
            changed = true;
        }

        if changed {
            debug!(path, "persisting identifier tokens");
            self.store.replace(path, &content)?;
        }
        Ok(())
    }
}

/// Byte offsets of occurrences of `needle` spanning a whole line.
///
/// A substring hit inside a longer line (a prefix collision such as
/// "Buy milk" against "Buy milk and eggs") is not an occurrence: the hit
/// must start at the beginning of a line and run to its end.
fn line_occurrences(content: &str, needle: &str) -> Vec<usize> {
    let bytes = content.as_bytes();
    content
        .match_indices(needle)
        .filter(|&(pos, _)| {
            let starts_line = pos == 0 || bytes[pos - 1] == b'\n';
            let end = pos + needle.len();
            let ends_line = end == bytes.len() || matches!(bytes[end], b'\n' | b'\r');
            starts_line && ends_line
        })
        .map(|(pos, _)| pos)
        .collect()
}
