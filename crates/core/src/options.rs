//! Option normalization for list, checkbox and autocomplete questions.
//!
//! Options may be declared as bare labels or as `{name, value}` pairs. Every
//! raw option is normalized into an [`OptionValue`] once, and nothing downstream
//! looks at the raw shape again.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// An option as declared on a question.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawOption {
    Label(String),
    Pair { name: String, value: Value },
}

impl From<&str> for RawOption {
    fn from(label: &str) -> Self {
        RawOption::Label(label.to_string())
    }
}

impl From<String> for RawOption {
    fn from(label: String) -> Self {
        RawOption::Label(label)
    }
}

impl<V: Into<Value>> From<(&str, V)> for RawOption {
    fn from((name, value): (&str, V)) -> Self {
        RawOption::Pair {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Canonical option record: `name` is the label and matching key, `value` is
/// what the caller gets back.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OptionValue {
    pub name: String,
    pub value: Value,
    #[serde(default)]
    pub selected: bool,
}

impl OptionValue {
    /// Whether `key` names this option, either by label or by stringified value.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || value_key(&self.value) == key
    }
}

impl From<&RawOption> for OptionValue {
    fn from(raw: &RawOption) -> Self {
        match raw {
            RawOption::Label(label) => OptionValue {
                name: label.clone(),
                value: Value::String(label.clone()),
                selected: false,
            },
            RawOption::Pair { name, value } => OptionValue {
                name: name.clone(),
                value: value.clone(),
                selected: false,
            },
        }
    }
}

impl From<OptionValue> for Value {
    fn from(option: OptionValue) -> Self {
        json!({
            "name": option.name,
            "value": option.value,
            "selected": option.selected,
        })
    }
}

#[must_use]
pub fn normalize_options(options: &[RawOption]) -> Vec<OptionValue> {
    options.iter().map(OptionValue::from).collect()
}

/// String form of a value used for matching: strings as-is, everything else as JSON.
#[must_use]
pub fn value_key(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Index of the first option whose name or stringified value equals `key`.
#[must_use]
pub fn find_option(options: &[OptionValue], key: &str) -> Option<usize> {
    options.iter().position(|option| option.matches(key))
}

/// Shapes checkbox output: every option annotated with its selection state, or
/// only the selected ones.
#[must_use]
pub fn checkbox_result(options: Vec<OptionValue>, return_full_results: bool) -> Vec<OptionValue> {
    if return_full_results {
        options
    } else {
        options.into_iter().filter(|option| option.selected).collect()
    }
}

#[must_use]
pub fn to_answer(options: Vec<OptionValue>) -> Value {
    Value::Array(options.into_iter().map(Value::from).collect())
}
