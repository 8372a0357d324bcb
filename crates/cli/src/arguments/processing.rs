use askr_core::error::Error::{ArgumentFormat, UnknownQuestion};
use askr_core::error::{Error, Result};
use askr_core::question::{parse_number, Answers, Question, QuestionKind};
use itertools::Itertools;
use log::debug;
use serde_json::Value;

/// Builds pre-supplied answers from `key=value` arguments.
///
/// Each value is typed by the kind of the question it answers: booleans for
/// confirm, numbers for number, a comma-separated list for checkbox, and text
/// for everything else. A repeated key keeps the last value.
///
/// # Errors
///
/// Returns an error if:
/// - An argument has no `=` or an empty key
/// - A key names no question
/// - A confirm or number value cannot be parsed
pub fn process_named_arguments(arguments: &[String], questions: &[Question]) -> Result<Answers> {
    let mut answers = Answers::new();

    for argument in arguments {
        let Some((key, raw)) = argument.split_once('=') else {
            return Err(ArgumentFormat(argument.to_string()));
        };
        if key.is_empty() {
            return Err(ArgumentFormat(argument.to_string()));
        }

        let Some(question) = questions.iter().find(|q| q.name == key) else {
            debug!(
                "Known questions: {}",
                questions.iter().map(|q| q.name.as_str()).join(", ")
            );
            return Err(UnknownQuestion(key.to_string()));
        };

        answers.insert(key.to_string(), coerce_argument(question, raw)?);
    }

    Ok(answers)
}

/// Types a raw argument value for `question`.
///
/// # Errors
///
/// Returns an error if a confirm or number value cannot be parsed.
pub fn coerce_argument(question: &Question, raw: &str) -> Result<Value> {
    match &question.kind {
        QuestionKind::Confirm { .. } => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| invalid_value(question, raw)),
        QuestionKind::Number { .. } => parse_number(raw)
            .map(Value::Number)
            .ok_or_else(|| invalid_value(question, raw)),
        QuestionKind::Checkbox(_) => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        )),
        QuestionKind::Text { .. } | QuestionKind::List(_) | QuestionKind::Autocomplete(_) => {
            Ok(Value::String(raw.to_string()))
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn invalid_value(question: &Question, raw: &str) -> Error {
    Error::Misc(format!(
        "Invalid {} value for `{}`: `{}`",
        question.kind.type_name(),
        question.name,
        raw
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_value_containing_equals() {
        let questions = vec![Question::text("query")];
        let answers =
            process_named_arguments(&["query=a=b".to_string()], &questions).unwrap();
        assert_eq!(answers["query"], json!("a=b"));
    }

    #[test]
    fn test_empty_key() {
        let questions = vec![Question::text("name")];
        let result = process_named_arguments(&["=value".to_string()], &questions);
        assert!(matches!(result, Err(ArgumentFormat(_))));
    }

    #[test]
    fn test_last_value_wins() {
        let questions = vec![Question::text("name")];
        let arguments = vec!["name=Ada".to_string(), "name=Grace".to_string()];
        let answers = process_named_arguments(&arguments, &questions).unwrap();
        assert_eq!(answers["name"], json!("Grace"));
    }
}
