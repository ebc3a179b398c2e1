//! Single-flight guarantee: a sync call arriving while a pass is in flight
//! is dropped without touching anything.

mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use support::TestVault;
use taskmark::error::Result;
use taskmark::notice::{MemoryNotice, NoticeSink};
use taskmark::schedule::RawDuration;
use taskmark::store::{DocumentStore, VaultStore};
use taskmark::sync::Coordinator;
use taskmark::task::Task;

/// Store whose first read parks until the test releases it, so a pass can
/// be held in flight deliberately.
struct BlockingStore {
    inner: VaultStore,
    reads: AtomicUsize,
    entered: Sender<()>,
    release: Mutex<Receiver<()>>,
}

impl DocumentStore for BlockingStore {
    fn read(&self, path: &str) -> Result<String> {
        if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.send(()).expect("test listening");
            self.release
                .lock()
                .expect("release channel")
                .recv()
                .expect("test releasing");
        }
        self.inner.read(path)
    }

    fn replace(&self, path: &str, contents: &str) -> Result<()> {
        self.inner.replace(path, contents)
    }
}

fn scheduled_task(text: &str) -> Task {
    let mut task = Task::new("a.md", 0, text, ' ');
    task.start = Some(RawDuration::hours_minutes(9, 0));
    task.end = Some(RawDuration::hours_minutes(9, 30));
    task.scheduled = Some(RawDuration::hours_minutes(1, 0));
    task
}

#[test]
fn reentrant_sync_is_dropped_while_a_pass_is_in_flight() {
    let vault = TestVault::new();
    vault.write_doc("a.md", "- [ ] Buy milk\n");

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let store = Arc::new(BlockingStore {
        inner: vault.store(),
        reads: AtomicUsize::new(0),
        entered: entered_tx,
        release: Mutex::new(release_rx),
    });
    let notices = Arc::new(MemoryNotice::default());
    let coordinator = Arc::new(Coordinator::new(
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        Arc::clone(&notices) as Arc<dyn NoticeSink>,
    ));

    let first = {
        let coordinator = Arc::clone(&coordinator);
        thread::spawn(move || {
            let mut tasks = vec![scheduled_task("Buy milk")];
            coordinator.sync(&mut tasks, None);
            tasks
        })
    };

    // Wait until the first pass is parked inside its document read.
    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("first pass reached the store");

    // The re-entrant call must return immediately, leaving its tasks and
    // the store untouched.
    let mut dropped_tasks = vec![scheduled_task("Buy milk")];
    coordinator.sync(&mut dropped_tasks, None);
    assert!(dropped_tasks[0].id.is_none());
    assert!(dropped_tasks[0].start_time.is_none());
    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    assert!(notices.messages().is_empty());

    // Release the first pass and confirm it completed normally.
    release_tx.send(()).expect("first pass still parked");
    let tasks = first.join().expect("first pass thread");
    assert!(tasks[0].id.is_some());
    assert!(vault.read_doc("a.md").contains("🆔"));

    // With the guard back to idle, a fresh call runs again.
    let mut retry = vec![scheduled_task("Buy milk")];
    coordinator.sync(&mut retry, None);
    assert!(retry[0].start_time.is_some());
}
