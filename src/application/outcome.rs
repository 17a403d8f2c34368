//! Structured `(ok, message)` result reported to callers.

use std::fmt;

use crate::application::ApplicationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    /// Folds a result into an outcome, using `on_success` to describe the value.
    pub fn from_result<T>(result: &ApplicationResult<T>, on_success: impl FnOnce(&T) -> String) -> Self {
        match result {
            Ok(value) => Self::success(on_success(value)),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.ok { "ok" } else { "failed" };
        write!(f, "{}: {}", status, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;

    #[test]
    fn test_from_result_carries_error_message() {
        let result: ApplicationResult<()> = Err(ApplicationError::TreeNotFound("x".into()));
        let outcome = Outcome::from_result(&result, |_| "done".into());
        assert!(!outcome.ok);
        assert_eq!(outcome.message, "tree not found: x");

        let outcome = Outcome::from_result(&Ok::<_, ApplicationError>(3), |n| format!("{n} nodes"));
        assert_eq!(outcome, Outcome::success("3 nodes"));
    }
}
