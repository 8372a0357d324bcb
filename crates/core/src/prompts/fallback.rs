//! Answers used when no terminal is attached, or when defaults are forced.

use serde_json::{Number, Value};

use crate::options::{to_answer, OptionValue};
use crate::overrides::{resolve_checkbox, resolve_choice};
use crate::question::{number_from_f64, CheckboxSpec, Question, QuestionKind};

#[must_use]
pub fn confirm_default(question: &Question) -> Option<bool> {
    match question.kind {
        QuestionKind::Confirm { default } => default,
        _ => None,
    }
}

#[must_use]
pub fn text_default(question: &Question) -> Option<String> {
    match &question.kind {
        QuestionKind::Text { default } => default.clone(),
        _ => None,
    }
}

#[must_use]
pub fn number_default(question: &Question) -> Option<Number> {
    match &question.kind {
        QuestionKind::Number { default: Some(number) } if number.is_f64() => {
            number.as_f64().and_then(number_from_f64)
        }
        QuestionKind::Number { default } => default.clone(),
        _ => None,
    }
}

/// The default of a list or autocomplete question, as the value of the option it names.
#[must_use]
pub fn choice_default(question: &Question) -> Option<Value> {
    let (QuestionKind::List(spec) | QuestionKind::Autocomplete(spec)) = &question.kind else {
        return None;
    };
    let default = spec.default.as_ref()?;
    let choices = question.kind.choices()?;
    Some(resolve_choice(choices, default).unwrap_or_else(|| Value::String(default.clone())))
}

/// Checkbox defaults expanded against the option set, shaped like an interactive result.
#[must_use]
pub fn checkbox_default(spec: &CheckboxSpec) -> Vec<OptionValue> {
    let keys = spec.default.iter().cloned().map(Value::String).collect();
    resolve_checkbox(spec, &Value::Array(keys))
}

/// The answer a question resolves to without prompting, or `None` if it has no default.
#[must_use]
pub fn default_answer(question: &Question) -> Option<Value> {
    match &question.kind {
        QuestionKind::Confirm { .. } => confirm_default(question).map(Value::Bool),
        QuestionKind::Text { .. } => text_default(question).map(Value::String),
        QuestionKind::Number { .. } => number_default(question).map(Value::Number),
        QuestionKind::List(_) | QuestionKind::Autocomplete(_) => choice_default(question),
        QuestionKind::Checkbox(spec) if spec.default.is_empty() => None,
        QuestionKind::Checkbox(spec) => Some(to_answer(checkbox_default(spec))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_defaults() {
        assert_eq!(
            default_answer(&Question::confirm("ok").with_default(true)),
            Some(json!(true))
        );
        assert_eq!(
            default_answer(&Question::text("name").with_default("Ada")),
            Some(json!("Ada"))
        );
        assert_eq!(
            default_answer(&Question::number("age").with_default(30)),
            Some(json!(30))
        );
        assert_eq!(default_answer(&Question::text("name")), None);
    }

    #[test]
    fn test_number_default_keeps_precision() {
        let large = Question::number("id").with_default(9_007_199_254_740_993_u64);
        assert_eq!(number_default(&large), Some(Number::from(9_007_199_254_740_993_u64)));

        let whole = Question::number("n").with_default(3.0);
        assert_eq!(number_default(&whole), Some(Number::from(3)));

        let fraction = Question::number("ratio").with_default(2.5);
        assert_eq!(default_answer(&fraction), Some(json!(2.5)));
    }

    #[test]
    fn test_list_default_resolves_to_value() {
        let question = Question::list("size", [("Large", json!("L")), ("Small", json!("S"))])
            .with_default("Large");
        assert_eq!(default_answer(&question), Some(json!("L")));
    }

    #[test]
    fn test_checkbox_default_is_expanded() {
        let question = Question::checkbox("tags", ["a", "b", "c"])
            .with_default(json!(["c"]))
            .with_full_results(true);

        let answer = default_answer(&question).unwrap();
        assert_eq!(
            answer,
            json!([
                { "name": "a", "value": "a", "selected": false },
                { "name": "b", "value": "b", "selected": false },
                { "name": "c", "value": "c", "selected": true },
            ])
        );

        assert_eq!(default_answer(&Question::checkbox("tags", ["a"])), None);
    }

    #[test]
    fn test_kind_specific_accessors_ignore_other_kinds() {
        let text = Question::text("t").with_default("x");
        assert_eq!(confirm_default(&text), None);
        assert_eq!(number_default(&text), None);
        assert_eq!(choice_default(&text), None);
    }
}
