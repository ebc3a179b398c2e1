//! CLI smoke tests for the taskmark binary.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use support::TestVault;

fn taskmark() -> Command {
    Command::cargo_bin("taskmark").expect("binary built")
}

#[test]
fn help_lists_subcommands() {
    taskmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn list_shows_schedulable_tasks() {
    let vault = TestVault::new();
    vault.write_doc(
        "today.md",
        "- [ ] Buy milk [start:: 9h0m] [end:: 9h30m] [scheduled:: 1h0m]\n\
         - [ ] No schedule\n",
    );

    taskmark()
        .arg("--vault")
        .arg(vault.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("No schedule").not());
}

#[test]
fn list_all_includes_unscheduled_tasks() {
    let vault = TestVault::new();
    vault.write_doc("today.md", "- [ ] No schedule\n");

    taskmark()
        .arg("--vault")
        .arg(vault.path())
        .arg("list")
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("No schedule"));
}

#[test]
fn sync_embeds_identifier_tokens() {
    let vault = TestVault::new();
    vault.write_doc(
        "today.md",
        "- [ ] Buy milk [start:: 9h0m] [end:: 9h30m] [scheduled:: 1h0m]\n",
    );

    taskmark()
        .arg("--vault")
        .arg(vault.path())
        .arg("sync")
        .assert()
        .success();

    assert!(vault.read_doc("today.md").contains("🆔"));
}

#[test]
fn sync_emits_a_json_envelope() {
    let vault = TestVault::new();
    vault.write_doc(
        "today.md",
        "- [ ] Buy milk [start:: 9h0m] [end:: 9h30m] [scheduled:: 1h0m]\n",
    );

    let output = taskmark()
        .arg("--vault")
        .arg(vault.path())
        .arg("--json")
        .arg("sync")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(payload["schema_version"], "taskmark.v1");
    assert_eq!(payload["command"], "sync");
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["data"]["tasks"], 1);
    assert_eq!(payload["data"]["tasks_without_id"], 1);
}

#[test]
fn missing_vault_is_a_user_error() {
    taskmark()
        .arg("--vault")
        .arg("/does/not/exist")
        .arg("list")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Vault not found"));
}
