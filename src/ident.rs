//! Embedded identifier extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::task::Task;

/// Matches the identifier token: the marker glyph, a space, then the id.
static ID_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"🆔 (\w+)").expect("valid identifier token regex"));

/// Populate `task.id` from the token embedded in its text.
///
/// A task that already carries an id is left untouched. A task whose text
/// holds no token is a fatal condition for the batch: by the time this runs
/// the patcher should have embedded one.
pub fn extract_id(task: &mut Task) -> Result<()> {
    if task.id.is_some() {
        return Ok(());
    }

    match ID_TOKEN.captures(&task.text) {
        Some(caps) => {
            task.id = Some(caps[1].trim().to_string());
            Ok(())
        }
        None => Err(Error::MissingIdentifier(task.text.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_from_text() {
        let mut task = Task::new("a.md", 0, "Buy milk 🆔 a1b2c3", ' ');
        extract_id(&mut task).unwrap();
        assert_eq!(task.id.as_deref(), Some("a1b2c3"));
    }

    #[test]
    fn extracts_token_embedded_mid_text() {
        let mut task = Task::new("a.md", 0, "Buy milk 🆔 4fd2 [start:: 9h0m]", ' ');
        extract_id(&mut task).unwrap();
        assert_eq!(task.id.as_deref(), Some("4fd2"));
    }

    #[test]
    fn existing_id_short_circuits() {
        let mut task = Task::new("a.md", 0, "Buy milk", ' ');
        task.id = Some("kept".to_string());
        extract_id(&mut task).unwrap();
        assert_eq!(task.id.as_deref(), Some("kept"));
    }

    #[test]
    fn missing_token_is_an_error_naming_the_text() {
        let mut task = Task::new("a.md", 0, "Buy milk", ' ');
        let err = extract_id(&mut task).unwrap_err();
        assert_eq!(err.to_string(), "this Buy milk should contain an id");
        assert!(task.id.is_none());
    }

    #[test]
    fn marker_without_id_is_an_error() {
        let mut task = Task::new("a.md", 0, "Buy milk 🆔 ", ' ');
        assert!(extract_id(&mut task).is_err());
    }
}
