//! taskmark - Task identity reconciliation for markdown vaults
//!
//! This library watches a vault of markdown documents, extracts task lines
//! carrying schedule metadata, assigns each task a stable identifier, and
//! writes that identifier back into the source line.
//!
//! # Core Concepts
//!
//! - **Fingerprints**: deterministic identifiers derived from a task's
//!   `(path, line, text)` triple, so re-running reconciliation reproduces
//!   the same token instead of churning out new ones
//! - **Identifier tokens**: the ` 🆔 {id}` suffix embedded into a task's
//!   source line, the only state that survives across passes
//! - **Reconciliation passes**: identifier population, extraction, and
//!   schedule normalization over one task batch, at most one in flight
//! - **Notices**: transient user-visible warnings and errors, delivered
//!   after a delay and decoupled from pass control flow
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.taskmark.toml`
//! - `error`: Error types and result aliases
//! - `fingerprint`: Deterministic task fingerprints
//! - `ident`: Embedded identifier extraction
//! - `index`: Vault scanning and task-line parsing
//! - `lock`: File locking and atomic document writes
//! - `notice`: User-visible notice sinks
//! - `output`: CLI output formatting
//! - `patch`: Identifier token embedding into documents
//! - `schedule`: Duration parsing and schedule validation
//! - `store`: Document store trait and vault-backed implementation
//! - `sync`: Reconciliation coordinator with single-flight execution
//! - `task`: Task records
//! - `watch`: Debounced vault change trigger

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod ident;
pub mod index;
pub mod lock;
pub mod notice;
pub mod output;
pub mod patch;
pub mod schedule;
pub mod store;
pub mod sync;
pub mod task;
pub mod watch;

pub use error::{Error, Result};
