//! Reconciliation coordinator.
//!
//! One pass runs identifier population, identifier extraction, and schedule
//! normalization, in that order. At most one pass is in flight at a time:
//! two concurrent passes could read-then-write the same document and
//! silently drop one side's edits.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::ident::extract_id;
use crate::notice::{Notice, NoticeSink};
use crate::patch::Patcher;
use crate::schedule::{normalize, RawDuration, ScheduleError, TimeOfDay};
use crate::store::DocumentStore;
use crate::task::Task;

/// Pass execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassState {
    Idle,
    Running,
}

/// Resets the coordinator to idle on every exit path of a pass.
struct PassGuard<'a> {
    state: &'a Mutex<PassState>,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            *state = PassState::Idle;
        }
    }
}

/// Orchestrates reconciliation passes over task batches.
pub struct Coordinator {
    store: Arc<dyn DocumentStore>,
    notices: Arc<dyn NoticeSink>,
    state: Mutex<PassState>,
}

impl Coordinator {
    pub fn new(store: Arc<dyn DocumentStore>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            store,
            notices,
            state: Mutex::new(PassState::Idle),
        }
    }

    /// Run one reconciliation pass over `tasks`.
    ///
    /// A call arriving while another pass is in flight is dropped outright:
    /// no queueing, no error. The triggering edit is picked up by whichever
    /// pass a later edit starts. Errors never reach the caller; they surface
    /// through the notice sink only.
    pub fn sync(&self, tasks: &mut [Task], target: Option<&str>) {
        if !self.try_begin() {
            debug!("pass already in flight, dropping trigger");
            return;
        }
        let _guard = PassGuard { state: &self.state };

        debug!(tasks = tasks.len(), "starting reconciliation pass");
        self.run_pass(tasks, target);
    }

    /// Idle → Running, or report that a pass is already running.
    fn try_begin(&self) -> bool {
        let mut state = self.state.lock().expect("pass state poisoned");
        if *state == PassState::Running {
            return false;
        }
        *state = PassState::Running;
        true
    }

    fn run_pass(&self, tasks: &mut [Task], target: Option<&str>) {
        let without_id: Vec<&mut Task> = tasks
            .iter_mut()
            .filter(|task| !task.has_id_token())
            .collect();
        if !without_id.is_empty() {
            let patcher = Patcher::new(self.store.as_ref(), self.notices.as_ref());
            if let Err(err) = patcher.write_ids(without_id, target) {
                self.notices.notify(Notice::error(err.to_string()));
            }
        }

        // Extraction failure is reported but does not stop normalization.
        if let Err(err) = extract_ids(tasks) {
            self.notices.notify(Notice::error(err.to_string()));
        }

        if let Err(err) = normalize_schedules(tasks) {
            self.notices.notify(Notice::error(err.to_string()));
        }
    }
}

fn extract_ids(tasks: &mut [Task]) -> crate::Result<()> {
    for task in tasks.iter_mut() {
        extract_id(task)?;
    }
    Ok(())
}

fn normalize_schedules(tasks: &mut [Task]) -> Result<(), ScheduleError> {
    for task in tasks.iter_mut() {
        task.start_time = Some(normalize_field(task.start.as_ref())?);
        task.end_time = Some(normalize_field(task.end.as_ref())?);
    }
    Ok(())
}

fn normalize_field(raw: Option<&RawDuration>) -> Result<TimeOfDay, ScheduleError> {
    match raw {
        Some(raw) => normalize(raw),
        None => Err(ScheduleError::NotADuration),
    }
}
