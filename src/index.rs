//! Vault indexing: extracting task records from markdown documents.
//!
//! The indexer walks the vault, parses checkbox task lines, and decodes
//! dataview-style inline fields (`[start:: 9h0m]`) into raw durations. A
//! reconciliation pass operates on the schedulable subset: incomplete tasks
//! carrying start, end, and scheduled fields.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::schedule::parse_duration_text;
use crate::task::Task;

/// Matches a markdown checkbox line, capturing the status and the text.
static TASK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*] \[(.)\] (.*)$").expect("valid task line regex"));

/// Matches inline fields like `[start:: 9h30m]`.
static INLINE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\w+)::\s*([^\]]*)\]").expect("valid inline field regex"));

/// Scans a vault directory for task lines.
pub struct VaultIndex {
    root: PathBuf,
    excludes: Vec<Pattern>,
}

impl VaultIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excludes: Vec::new(),
        }
    }

    /// Build an index that skips vault-relative paths matching any pattern.
    pub fn with_excludes(root: impl Into<PathBuf>, patterns: &[String]) -> Result<Self> {
        let excludes = patterns
            .iter()
            .map(|raw| {
                Pattern::new(raw)
                    .map_err(|err| Error::InvalidConfig(format!("bad exclude pattern {raw}: {err}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            root: root.into(),
            excludes,
        })
    }

    /// All tasks in the vault, one record per checkbox line.
    pub fn all_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }
            let rel = self.relative_path(entry.path());
            if self.is_excluded(&rel) {
                debug!(path = %rel, "skipping excluded document");
                continue;
            }
            let contents = fs::read_to_string(entry.path())?;
            tasks.extend(scan_document(&rel, &contents));
        }
        Ok(tasks)
    }

    /// Incomplete tasks carrying start, end, and scheduled fields — the
    /// subset a reconciliation pass operates on.
    pub fn schedulable_tasks(&self) -> Result<Vec<Task>> {
        Ok(self
            .all_tasks()?
            .into_iter()
            .filter(is_schedulable)
            .collect())
    }

    /// Schedulable tasks of a single document.
    pub fn document_tasks(&self, path: &str) -> Result<Vec<Task>> {
        let contents = fs::read_to_string(self.root.join(path))
            .map_err(|_| Error::DocumentNotFound(path.to_string()))?;
        Ok(scan_document(path, &contents)
            .into_iter()
            .filter(is_schedulable)
            .collect())
    }

    fn relative_path(&self, full: &Path) -> String {
        full.strip_prefix(&self.root)
            .unwrap_or(full)
            .to_string_lossy()
            .replace('\\', "/")
    }

    fn is_excluded(&self, rel: &str) -> bool {
        self.excludes.iter().any(|pattern| pattern.matches(rel))
    }
}

fn is_schedulable(task: &Task) -> bool {
    !task.completed && task.start.is_some() && task.end.is_some() && task.scheduled.is_some()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("md")
}

/// Parse every checkbox task line of one document.
pub fn scan_document(path: &str, contents: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        let Some(caps) = TASK_LINE.captures(line) else {
            continue;
        };
        let status = caps[1].chars().next().unwrap_or(' ');
        let mut task = Task::new(path, line_no, caps[2].to_string(), status);

        for field in INLINE_FIELD.captures_iter(&task.text) {
            let value = parse_duration_text(&field[2]);
            match field[1].to_lowercase().as_str() {
                "start" => task.start = Some(value),
                "end" => task.end = Some(value),
                "scheduled" => task.scheduled = Some(value),
                _ => {}
            }
        }
        tasks.push(task);
    }
    tasks
}
