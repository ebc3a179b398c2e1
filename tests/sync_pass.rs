//! End-to-end reconciliation passes over a real vault directory.

mod support;

use std::sync::Arc;

use support::TestVault;
use taskmark::fingerprint::fingerprint;
use taskmark::notice::{MemoryNotice, NoticeSink};
use taskmark::sync::Coordinator;

fn coordinator_for(vault: &TestVault) -> (Coordinator, Arc<MemoryNotice>) {
    let notices = Arc::new(MemoryNotice::default());
    let coordinator = Coordinator::new(
        Arc::new(vault.store()),
        Arc::clone(&notices) as Arc<dyn NoticeSink>,
    );
    (coordinator, notices)
}

#[test]
fn pass_embeds_identifier_and_populates_times() {
    let vault = TestVault::new();
    vault.write_doc(
        "a.md",
        "- [ ] Buy milk [start:: 9h0m] [end:: 9h30m] [scheduled:: 1h0m]\n",
    );

    let mut tasks = vault.index().schedulable_tasks().unwrap();
    assert_eq!(tasks.len(), 1);

    let (coordinator, notices) = coordinator_for(&vault);
    coordinator.sync(&mut tasks, None);

    let expected_id = fingerprint(&tasks[0]);
    assert_eq!(tasks[0].id.as_deref(), Some(expected_id.as_str()));
    assert_eq!(
        vault.read_doc("a.md"),
        format!("- [ ] Buy milk [start:: 9h0m] [end:: 9h30m] [scheduled:: 1h0m] 🆔 {expected_id}\n")
    );

    let start = tasks[0].start_time.expect("start time populated");
    let end = tasks[0].end_time.expect("end time populated");
    assert_eq!((start.hour(), start.minute()), (9, 0));
    assert_eq!((end.hour(), end.minute()), (9, 30));

    assert!(notices.messages().is_empty());
}

#[test]
fn second_pass_is_idempotent() {
    let vault = TestVault::new();
    vault.write_doc(
        "a.md",
        "- [ ] Buy milk [start:: 9h0m] [end:: 9h30m] [scheduled:: 1h0m]\n\
         - [ ] Water plants [start:: 10h0m] [end:: 10h15m] [scheduled:: 1h0m]\n",
    );

    let (coordinator, notices) = coordinator_for(&vault);

    let mut first = vault.index().schedulable_tasks().unwrap();
    coordinator.sync(&mut first, None);
    let after_first = vault.read_doc("a.md");
    assert_eq!(after_first.matches("🆔").count(), 2);

    // Re-index: the tokens are now part of the task text, so the second
    // pass must extract them instead of rewriting anything.
    let mut second = vault.index().schedulable_tasks().unwrap();
    coordinator.sync(&mut second, None);

    assert_eq!(vault.read_doc("a.md"), after_first);
    assert!(notices.messages().is_empty());
    for task in &second {
        assert!(task.id.is_some());
        assert!(task.start_time.is_some());
    }
}

#[test]
fn second_pass_extracts_the_embedded_id() {
    let vault = TestVault::new();
    vault.write_doc(
        "a.md",
        "- [ ] Buy milk [start:: 9h0m] [end:: 9h30m] [scheduled:: 1h0m]\n",
    );

    let (coordinator, _notices) = coordinator_for(&vault);

    let mut first = vault.index().schedulable_tasks().unwrap();
    coordinator.sync(&mut first, None);
    let written_id = first[0].id.clone().unwrap();

    let mut second = vault.index().schedulable_tasks().unwrap();
    coordinator.sync(&mut second, None);
    assert_eq!(second[0].id.as_deref(), Some(written_id.as_str()));
}

#[test]
fn pass_spans_multiple_documents() {
    let vault = TestVault::new();
    vault.write_doc(
        "a.md",
        "- [ ] Task a [start:: 8h0m] [end:: 8h30m] [scheduled:: 1h0m]\n",
    );
    vault.write_doc(
        "sub/b.md",
        "- [ ] Task b [start:: 11h0m] [end:: 11h45m] [scheduled:: 1h0m]\n",
    );

    let mut tasks = vault.index().schedulable_tasks().unwrap();
    assert_eq!(tasks.len(), 2);

    let (coordinator, notices) = coordinator_for(&vault);
    coordinator.sync(&mut tasks, None);

    assert!(vault.read_doc("a.md").contains("🆔"));
    assert!(vault.read_doc("sub/b.md").contains("🆔"));
    assert!(notices.messages().is_empty());
}
