//! Reconciles caller-supplied answers with question definitions.
//!
//! A value already present in the argument object pre-empts prompting. For
//! option-based questions the raw value is matched against the declared
//! options so the answer has the same shape an interactive pick would give.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, warn};
use serde_json::Value;

use crate::options::{
    checkbox_result, find_option, normalize_options, value_key, OptionValue, RawOption,
};
use crate::question::{Answers, CheckboxSpec, Choices, Question, QuestionKind};
use crate::validation::is_unanswered;

/// Applies overrides at most once per question name.
#[derive(Debug, Default)]
pub struct OverrideResolver {
    handled: HashSet<String>,
}

impl OverrideResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes every answer in `answers` that belongs to a question.
    ///
    /// Returns the names of the questions now answered by override. A list or
    /// autocomplete override matching no option (with custom options disallowed)
    /// is removed from `answers` so the question gets asked. So is a required
    /// checkbox override that selects nothing.
    pub fn apply(&mut self, answers: &mut Answers, questions: &[Question]) -> Vec<String> {
        let mut resolved = Vec::new();

        for question in questions {
            if self.handled.contains(&question.name) {
                continue;
            }
            let Some(raw) = answers.get(&question.name).cloned() else {
                continue;
            };
            self.handled.insert(question.name.clone());

            match resolve_override(question, &raw) {
                Some(answer) if question.required && is_unanswered(question, Some(&answer)) => {
                    warn!(
                        "Ignoring argument `{}` for required `{}`: it selects nothing",
                        raw, question.name
                    );
                    answers.remove(&question.name);
                }
                Some(answer) => {
                    debug!("`{}` answered by argument: {}", question.name, answer);
                    answers.insert(question.name.clone(), answer);
                    resolved.push(question.name.clone());
                }
                None => {
                    warn!(
                        "Ignoring argument `{}` for `{}`: it matches none of the options",
                        raw, question.name
                    );
                    answers.remove(&question.name);
                }
            }
        }

        resolved
    }
}

/// Converts a raw override into the final answer shape, or `None` if the
/// override cannot be used.
#[must_use]
pub fn resolve_override(question: &Question, raw: &Value) -> Option<Value> {
    match &question.kind {
        QuestionKind::Confirm { .. } | QuestionKind::Text { .. } | QuestionKind::Number { .. } => {
            Some(raw.clone())
        }
        QuestionKind::Checkbox(spec) => {
            Some(crate::options::to_answer(resolve_checkbox(spec, raw)))
        }
        QuestionKind::List(_) | QuestionKind::Autocomplete(_) => {
            let choices = question.kind.choices()?;
            resolve_choice(choices, &value_key(raw))
        }
    }
}

/// Matches a single-select override against the options: the option's value
/// on a match, the raw text if custom options are allowed, otherwise `None`.
#[must_use]
pub fn resolve_choice(choices: Choices<'_>, key: &str) -> Option<Value> {
    let options = normalize_options(choices.options);
    match find_option(&options, key) {
        Some(index) => Some(options[index].value.clone()),
        None if choices.allow_custom_options => Some(Value::String(key.to_string())),
        None => None,
    }
}

/// Annotates the checkbox options selected by `raw`.
///
/// `raw` may be a sequence or a single scalar (treated as a one-element
/// selection). Unmatched entries become selected synthetic options only when
/// custom options are allowed.
#[must_use]
pub fn resolve_checkbox(spec: &CheckboxSpec, raw: &Value) -> Vec<OptionValue> {
    let keys = selection_keys(raw);
    let mut options = normalize_options(&spec.options);

    for option in options.iter_mut() {
        option.selected = keys.iter().any(|key| option.matches(key));
    }

    if spec.allow_custom_options {
        let custom: Vec<OptionValue> = keys
            .iter()
            .filter(|key| find_option(&options, key).is_none())
            .map(|key| OptionValue::from(&RawOption::Label(key.clone())))
            .map(|mut option| {
                option.selected = true;
                option
            })
            .collect();
        options.extend(custom);
    }

    checkbox_result(options, spec.return_full_results)
}

fn selection_keys(raw: &Value) -> IndexSet<String> {
    match raw {
        Value::Array(items) => items.iter().filter_map(entry_key).collect(),
        other => entry_key(other).into_iter().collect(),
    }
}

// Accepts previously resolved `{name, value, selected}` entries as well as plain values
fn entry_key(entry: &Value) -> Option<String> {
    match entry {
        Value::Null => None,
        Value::Object(fields) => {
            if fields.get("selected").and_then(Value::as_bool) == Some(false) {
                return None;
            }
            fields
                .get("name")
                .or_else(|| fields.get("value"))
                .map(value_key)
        }
        other => Some(value_key(other)),
    }
}
