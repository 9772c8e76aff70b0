//! Rejection classification.
//!
//! The server explains command refusals only in prose, so the message
//! text is inspected here, once, at the edge. Everything past this
//! point consumes the structured category.

use maskadmin_console::services::RejectionCategory;

/// Classify a 4xx rejection detail into a [`RejectionCategory`].
pub fn classify_rejection(detail: &str) -> RejectionCategory {
    let lowered = detail.to_lowercase();
    if lowered.contains("already") {
        return RejectionCategory::AlreadyInState;
    }
    if lowered.contains("completed") || lowered.contains("failed") {
        return RejectionCategory::Finished;
    }
    // "is paused" / "is running" describe the current state without
    // the word "already"; the command is still a state mismatch.
    if lowered.contains("paused") || lowered.contains("running") {
        return RejectionCategory::AlreadyInState;
    }
    RejectionCategory::Other
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_phrases_classify_as_state_mismatch() {
        assert_eq!(
            classify_rejection("Execution is already paused"),
            RejectionCategory::AlreadyInState
        );
        assert_eq!(
            classify_rejection("Execution 12 is currently paused"),
            RejectionCategory::AlreadyInState
        );
        assert_eq!(
            classify_rejection("Task is running"),
            RejectionCategory::AlreadyInState
        );
    }

    #[test]
    fn terminal_phrases_classify_as_finished() {
        assert_eq!(
            classify_rejection("Execution has completed"),
            RejectionCategory::Finished
        );
        assert_eq!(
            classify_rejection("Execution failed and cannot be resumed"),
            RejectionCategory::Finished
        );
    }

    #[test]
    fn already_wins_over_terminal_words() {
        // "already completed" reads as a state mismatch first.
        assert_eq!(
            classify_rejection("Execution already completed"),
            RejectionCategory::AlreadyInState
        );
    }

    #[test]
    fn unknown_phrases_classify_as_other() {
        assert_eq!(
            classify_rejection("Workflow has no mapped columns"),
            RejectionCategory::Other
        );
    }
}
