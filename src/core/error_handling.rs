//! Generic error handling utilities
//!
//! Provides unified error logging that works across the domain error types
//! while distinguishing user-actionable failures from system failures.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// User-actionable errors (a malformed settings document, a missing coverage
/// tool) carry a message the user can act on directly. System errors (IO
/// failures, spawn failures) get generic context with detail pushed to debug
/// level. When `is_user_actionable()` returns `true`, `user_message()` must
/// return `Some(message)`; when it returns `false`, `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a specific, user-actionable message
    fn is_user_actionable(&self) -> bool;

    /// The specific user message, when this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log an error with appropriate detail level based on error specificity.
///
/// User-actionable errors log their own message; system errors log the
/// operation context, with the full error available at debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("FATAL: {}", user_msg);
        } else {
            log::error!("FATAL: {}", operation_context);
        }
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct TestUserError {
        message: String,
    }

    impl fmt::Display for TestUserError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for TestUserError {}

    impl ContextualError for TestUserError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some(&self.message)
        }
    }

    #[derive(Debug)]
    struct TestSystemError;

    impl fmt::Display for TestSystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "system error")
        }
    }

    impl std::error::Error for TestSystemError {}

    impl ContextualError for TestSystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_exposes_message() {
        let error = TestUserError {
            message: "settings.json is not valid JSON".to_string(),
        };
        assert!(error.is_user_actionable());
        assert_eq!(
            error.user_message(),
            Some("settings.json is not valid JSON")
        );
    }

    #[test]
    fn test_system_error_has_no_user_message() {
        let error = TestSystemError;
        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
    }
}
