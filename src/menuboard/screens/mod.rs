//! # Screens
//!
//! One controller per screen. Each owns its state explicitly (source list,
//! query, [`Paginator`](crate::engine::Paginator), request sequence, open form
//! and pending deletion) and exposes every transition as a method.
//!
//! Controllers do not own a backend. Operations that talk to the API take one
//! as an argument, so the same controller runs against
//! [`HttpBackend`](crate::backend::http::HttpBackend) in the binary and
//! [`InMemoryBackend`](crate::backend::memory::InMemoryBackend) in tests.
//!
//! ## Results
//!
//! Operations return `Result<Outcome>`. An `Err` means nothing changed apart
//! from what the operation documents (a failed delete still closes its
//! confirmation). An `Outcome` carries the messages the operator should see,
//! such as "Category created successfully!".
//!
//! ## Loading
//!
//! A load is split into [`RequestSequence::issue`] before the fetch and a
//! settle step after it. A response whose generation has been superseded is
//! dropped, whether it succeeded or failed.

use crate::error::{MenuboardError, Result};
use crate::sequence::{Generation, RequestSequence};
use tracing::debug;

pub mod categories;
pub mod menus;
pub mod storefront;

pub use categories::CategoryAdmin;
pub use menus::MenuAdmin;
pub use storefront::{LoadState, Storefront};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl ScreenMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub messages: Vec<ScreenMessage>,
}

impl Outcome {
    pub fn with(message: ScreenMessage) -> Self {
        Self {
            messages: vec![message],
        }
    }

    pub fn add_message(&mut self, message: ScreenMessage) {
        self.messages.push(message);
    }

    pub fn extend(&mut self, other: Outcome) {
        self.messages.extend(other.messages);
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Applies a fetch result only if `generation` is still the latest.
///
/// `Ok(None)` means the response was stale and has been dropped.
pub(crate) fn settle<T>(
    sequence: &RequestSequence,
    generation: Generation,
    action: &str,
    result: Result<T>,
) -> Result<Option<T>> {
    if !sequence.is_current(generation) {
        debug!(generation = generation.value(), action, "dropping stale response");
        return Ok(None);
    }
    result.map(Some).map_err(|e| MenuboardError::during(action, e))
}

/// Reloads after a successful mutation.
///
/// The mutation already happened, so a failed reload is reported as a
/// message instead of an error.
pub(crate) fn reload_after(mut outcome: Outcome, reload: Result<Outcome>) -> Outcome {
    match reload {
        Ok(loaded) => outcome.extend(loaded),
        Err(e) => outcome.add_message(ScreenMessage::error(e.to_string())),
    }
    outcome
}

pub fn parse_page(input: &str) -> Result<usize> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| MenuboardError::Validation(format!("Invalid page number: {}", input)))
}

pub(crate) fn page_size_outcome(accepted: bool, input: &str) -> Outcome {
    if accepted {
        Outcome::default()
    } else {
        Outcome::with(ScreenMessage::warning(format!(
            "Ignoring invalid page size: {}",
            input
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_results_are_dropped_even_when_failed() {
        let mut seq = RequestSequence::new();
        let old = seq.issue();
        let _new = seq.issue();

        let settled: Option<u32> = settle(
            &seq,
            old,
            "load menus",
            Err(MenuboardError::Application("boom".into())),
        )
        .unwrap();
        assert_eq!(settled, None);
    }

    #[test]
    fn current_failures_name_the_action() {
        let mut seq = RequestSequence::new();
        let current = seq.issue();
        let err = settle::<()>(
            &seq,
            current,
            "load categories",
            Err(MenuboardError::Application("Database unavailable".into())),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to load categories: Database unavailable"
        );
    }

    #[test]
    fn failed_reload_keeps_success_message() {
        let outcome = reload_after(
            Outcome::with(ScreenMessage::success("Menu deleted successfully!")),
            Err(MenuboardError::during(
                "load menus",
                MenuboardError::InvalidResponse,
            )),
        );
        assert_eq!(outcome.messages.len(), 2);
        assert_eq!(outcome.messages[0].level, MessageLevel::Success);
        assert!(outcome.has_errors());
    }

    #[test]
    fn page_numbers_must_be_numeric() {
        assert_eq!(parse_page(" 3 ").unwrap(), 3);
        assert!(parse_page("three").unwrap_err().is_validation());
    }
}
