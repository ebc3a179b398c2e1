//! Command-line interface for taskmark
//!
//! This module defines the CLI structure using clap derive macros and wires
//! the vault store, index, notice sinks, and coordinator together.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::index::VaultIndex;
use crate::notice::{ConsoleNotice, DelayedNotice, Notice, NoticeSink};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::VaultStore;
use crate::sync::Coordinator;
use crate::task::Task;
use crate::watch::watch_vault;

/// taskmark - Task identity reconciliation for markdown vaults
///
/// Watches a vault of markdown documents, extracts task lines carrying
/// schedule metadata, and embeds a stable identifier token into each one.
#[derive(Parser, Debug)]
#[command(name = "taskmark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault (defaults to current directory)
    #[arg(long, global = true, env = "TASKMARK_VAULT")]
    pub vault: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one reconciliation pass over the vault
    Sync {
        /// Restrict the pass to a single document (vault-relative path)
        #[arg(long)]
        file: Option<String>,
    },

    /// Watch the vault and reconcile after each quiet period
    Watch,

    /// List the tasks the indexer finds
    List {
        /// Include completed and unscheduled tasks
        #[arg(long)]
        all: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let vault = resolve_vault(self.vault)?;
        let config = Config::load(&vault)?;
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Sync { file } => run_sync(&vault, &config, file.as_deref(), options),
            Commands::Watch => run_watch(&vault, &config, options),
            Commands::List { all } => run_list(&vault, &config, all, options),
        }
    }
}

fn resolve_vault(vault: Option<PathBuf>) -> Result<PathBuf> {
    let root = match vault {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(Error::VaultNotFound(root));
    }
    Ok(root)
}

fn build_index(vault: &Path, config: &Config) -> Result<VaultIndex> {
    VaultIndex::with_excludes(vault, &config.index.exclude)
}

#[derive(Serialize)]
struct SyncReport {
    tasks: usize,
    tasks_without_id: usize,
}

fn run_sync(
    vault: &Path,
    config: &Config,
    file: Option<&str>,
    options: OutputOptions,
) -> Result<()> {
    let index = build_index(vault, config)?;
    let mut tasks = match file {
        Some(path) => index.document_tasks(path)?,
        None => index.schedulable_tasks()?,
    };

    let report = SyncReport {
        tasks: tasks.len(),
        tasks_without_id: tasks.iter().filter(|t| !t.has_id_token()).count(),
    };

    // One-shot command: deliver notices immediately, a detached delayed
    // thread would not outlive the process.
    let notices: Arc<dyn NoticeSink> = Arc::new(ConsoleNotice);
    let coordinator = Coordinator::new(Arc::new(VaultStore::new(vault)), notices);
    coordinator.sync(&mut tasks, file);

    let mut human = HumanOutput::new(format!(
        "Reconciled {} task(s), {} needed an identifier",
        report.tasks, report.tasks_without_id
    ));
    for task in &tasks {
        if let Some(id) = &task.id {
            human.push_detail(format!("{}:{} 🆔 {}", task.path, task.line, id));
        }
    }
    emit_success(options, "sync", &report, Some(&human))
}

fn run_watch(vault: &Path, config: &Config, options: OutputOptions) -> Result<()> {
    let index = build_index(vault, config)?;
    let console: Arc<dyn NoticeSink> = Arc::new(ConsoleNotice);
    let notices: Arc<dyn NoticeSink> = Arc::new(DelayedNotice::new(
        console,
        Duration::from_millis(config.sync.notice_delay_ms),
    ));
    let coordinator = Coordinator::new(
        Arc::new(VaultStore::new(vault)),
        Arc::clone(&notices),
    );

    if !options.quiet {
        println!("Watching {} for task changes", vault.display());
    }
    info!(vault = %vault.display(), "watch loop starting");

    let debounce = Duration::from_millis(config.sync.debounce_ms);
    watch_vault(vault, debounce, || {
        match index.schedulable_tasks() {
            Ok(mut tasks) => coordinator.sync(&mut tasks, None),
            Err(err) => notices.notify(Notice::error(err.to_string())),
        }
    })
}

#[derive(Serialize)]
struct ListReport {
    tasks: Vec<Task>,
}

fn run_list(vault: &Path, config: &Config, all: bool, options: OutputOptions) -> Result<()> {
    let index = build_index(vault, config)?;
    let tasks = if all {
        index.all_tasks()?
    } else {
        index.schedulable_tasks()?
    };

    let mut human = HumanOutput::new(format!("{} task(s)", tasks.len()));
    for task in &tasks {
        human.push_detail(format!(
            "{}:{} [{}] {}",
            task.path, task.line, task.status, task.text
        ));
    }
    emit_success(options, "list", &ListReport { tasks }, Some(&human))
}
