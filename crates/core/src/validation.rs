//! Answer validation and sanitization.
//!
//! Validation runs in a fixed order: the required check (for empty answers),
//! then the declared `pattern` for textual answers, then the custom validator.

use std::fmt::{Display, Formatter};

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::question::{Answers, Question, QuestionKind};

/// Why an answer was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Required,
    Pattern,
    Validation,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Required => f.write_str("required"),
            FailureKind::Pattern => f.write_str("pattern"),
            FailureKind::Validation => f.write_str("validation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub success: bool,
    pub kind: Option<FailureKind>,
    pub reason: Option<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl From<bool> for ValidationResult {
    fn from(success: bool) -> Self {
        if success {
            Self::ok()
        } else {
            Self {
                success: false,
                kind: Some(FailureKind::Validation),
                reason: None,
            }
        }
    }
}

impl ValidationResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            kind: None,
            reason: None,
        }
    }

    #[must_use]
    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            success: false,
            kind: Some(kind),
            reason: Some(reason.into()),
        }
    }

    /// Rejection from a custom validator.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::failure(FailureKind::Validation, reason)
    }

    /// Message shown to the user for a failed result.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.kind, &self.reason) {
            (Some(FailureKind::Required), _) => "A value is required.".to_string(),
            (Some(FailureKind::Pattern), Some(pattern)) => {
                format!("Value must match the pattern `{pattern}`.")
            }
            (_, Some(reason)) => reason.clone(),
            (_, None) => "Invalid value.".to_string(),
        }
    }

    fn normalized(mut self) -> Self {
        if !self.success && self.kind.is_none() {
            self.kind = Some(FailureKind::Validation);
        }
        self
    }
}

/// True for null, the empty string and empty sequences.
#[must_use]
pub fn is_empty_answer(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Whether a candidate answer leaves the question unanswered.
///
/// A checkbox answer with no selected entry counts as unanswered even when it
/// carries every option.
#[must_use]
pub fn is_unanswered(question: &Question, answer: Option<&Value>) -> bool {
    let Some(answer) = answer else {
        return true;
    };

    match (&question.kind, answer) {
        (QuestionKind::Checkbox(_), Value::Array(items)) => !items.iter().any(is_selected_entry),
        _ => is_empty_answer(answer),
    }
}

fn is_selected_entry(entry: &Value) -> bool {
    entry
        .get("selected")
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

#[must_use]
pub fn sanitize(question: &Question, answer: Value, answers: &Answers) -> Value {
    match &question.sanitize {
        Some(sanitize) => (sanitize.get())(answer, answers),
        None => answer,
    }
}

/// Applies the question's pattern (to textual answers) and then its custom validator.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if the declared pattern is not a valid regex.
pub fn validate_answer(
    question: &Question,
    answer: &Value,
    answers: &Answers,
) -> Result<ValidationResult> {
    if let (Some(pattern), Value::String(text)) = (&question.pattern, answer) {
        let regex =
            Regex::new(pattern).map_err(|e| Error::invalid_pattern(&question.name, e))?;
        if !regex.is_match(text) {
            return Ok(ValidationResult::failure(FailureKind::Pattern, pattern.clone()));
        }
    }

    match &question.validate {
        Some(validate) => Ok((validate.get())(answer, answers).normalized()),
        None => Ok(ValidationResult::ok()),
    }
}

/// Full acceptance check for a candidate answer: required first, then
/// [`validate_answer`] for non-empty answers.
///
/// # Errors
///
/// Propagates configuration errors from [`validate_answer`].
pub fn check_answer(
    question: &Question,
    answer: Option<&Value>,
    answers: &Answers,
) -> Result<ValidationResult> {
    if is_unanswered(question, answer) {
        return Ok(if question.required {
            ValidationResult::failure(FailureKind::Required, "required")
        } else {
            ValidationResult::ok()
        });
    }

    match answer {
        Some(answer) => validate_answer(question, answer, answers),
        None => Ok(ValidationResult::ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EMAIL: &str = r"^([a-zA-Z0-9_\-\.]+)@([a-zA-Z0-9_\-\.]+)\.([a-zA-Z]{2,5})$";

    #[test]
    fn test_is_empty_answer() {
        assert!(is_empty_answer(&Value::Null));
        assert!(is_empty_answer(&json!("")));
        assert!(is_empty_answer(&json!([])));
        assert!(!is_empty_answer(&json!(" ")));
        assert!(!is_empty_answer(&json!(0)));
        assert!(!is_empty_answer(&json!(false)));
        assert!(!is_empty_answer(&json!(["a"])));
    }

    #[test]
    fn test_checkbox_without_selection_is_unanswered() {
        let question = Question::checkbox("c", ["a", "b"]);
        let full = json!([
            { "name": "a", "value": "a", "selected": false },
            { "name": "b", "value": "b", "selected": false },
        ]);
        assert!(is_unanswered(&question, Some(&full)));

        let picked = json!([{ "name": "b", "value": "b", "selected": true }]);
        assert!(!is_unanswered(&question, Some(&picked)));
        assert!(is_unanswered(&question, None));
    }

    #[test]
    fn test_pattern_failure() {
        let question = Question::text("email").with_pattern(EMAIL);
        let result = validate_answer(&question, &json!("not-an-email"), &Answers::new()).unwrap();

        assert!(!result.success);
        assert_eq!(result.kind, Some(FailureKind::Pattern));
        assert_eq!(result.reason.as_deref(), Some(EMAIL));

        let result = validate_answer(&question, &json!("me@example.com"), &Answers::new()).unwrap();
        assert!(result.success);
    }

    #[test]
    fn test_pattern_ignored_for_non_text() {
        let question = Question::number("n").with_pattern("^x$");
        let result = validate_answer(&question, &json!(5), &Answers::new()).unwrap();
        assert!(result.success);
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let question = Question::text("t").with_pattern("(unclosed");
        let result = validate_answer(&question, &json!("x"), &Answers::new());
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_boolean_validator_is_normalized() {
        let question = Question::number("age").with_validate(|answer, _| {
            answer.as_i64().is_some_and(|age| age >= 18)
        });

        let rejected = validate_answer(&question, &json!(12), &Answers::new()).unwrap();
        assert_eq!(rejected.kind, Some(FailureKind::Validation));
        assert_eq!(rejected.describe(), "Invalid value.");

        let accepted = validate_answer(&question, &json!(30), &Answers::new()).unwrap();
        assert!(accepted.success);
    }

    #[test]
    fn test_validator_sees_other_answers() {
        let question = Question::text("confirm_password").with_validate(|answer, answers| {
            if answers.get("password") == Some(answer) {
                ValidationResult::ok()
            } else {
                ValidationResult::invalid("Passwords do not match.")
            }
        });
        let mut answers = Answers::new();
        answers.insert("password".to_string(), json!("hunter2"));

        let result = validate_answer(&question, &json!("hunter3"), &answers).unwrap();
        assert_eq!(result.describe(), "Passwords do not match.");
        assert!(validate_answer(&question, &json!("hunter2"), &answers).unwrap().success);
    }

    #[test]
    fn test_check_answer_required() {
        let required = Question::text("name").with_required(true);
        let result = check_answer(&required, None, &Answers::new()).unwrap();
        assert_eq!(result.kind, Some(FailureKind::Required));

        let result = check_answer(&required, Some(&json!("")), &Answers::new()).unwrap();
        assert_eq!(result.kind, Some(FailureKind::Required));

        let optional = Question::text("name").with_pattern("^x+$");
        // Empty optional answers skip the pattern
        assert!(check_answer(&optional, None, &Answers::new()).unwrap().success);
        assert!(check_answer(&optional, Some(&json!("")), &Answers::new()).unwrap().success);
    }

    #[test]
    fn test_sanitize_then_validate_is_stable() {
        let question = Question::text("email")
            .with_pattern(EMAIL)
            .with_sanitize(|answer, _| match answer {
                Value::String(text) => Value::String(text.trim().to_lowercase()),
                other => other,
            });
        let answers = Answers::new();

        let once = sanitize(&question, json!("  Me@Example.com "), &answers);
        assert!(validate_answer(&question, &once, &answers).unwrap().success);

        let twice = sanitize(&question, once.clone(), &answers);
        assert_eq!(once, twice);
        assert!(validate_answer(&question, &twice, &answers).unwrap().success);
    }
}
