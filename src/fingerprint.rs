//! Deterministic task fingerprints.
//!
//! A fingerprint is derived from a task's location and text, so re-running
//! reconciliation over an unmodified line reproduces the same identifier
//! instead of churning out a new one. It is not collision-proof, but it is
//! adequate for the task list of a single vault document.

use crate::task::Task;

/// Derive the identifier for a task from its `(path, line, text)` triple.
///
/// The composite key `path:line:text` is reduced with a rolling polynomial
/// hash (`acc * 31 + unit` over UTF-16 code units), truncated to 32-bit
/// signed width at every step. Identifiers written by earlier passes depend
/// on this exact truncation; changing it would orphan every embedded token.
pub fn fingerprint(task: &Task) -> String {
    let key = format!("{}:{}:{}", task.path, task.line, task.text);
    render(hash_utf16(&key))
}

fn hash_utf16(key: &str) -> i32 {
    let mut acc: i32 = 0;
    for unit in key.encode_utf16() {
        acc = acc
            .wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit));
    }
    acc
}

/// Render the hash in lowercase hex. A negative accumulator would render
/// with a leading minus, which is not a safe embeddable token character;
/// the sign is replaced with the literal `a`.
fn render(acc: i32) -> String {
    if acc < 0 {
        format!("a{:x}", acc.unsigned_abs())
    } else {
        format!("{:x}", acc)
    }
}
