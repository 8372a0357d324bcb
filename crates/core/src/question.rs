//! Question definitions.
//!
//! A [`Question`] carries the attributes every question shares (name, display
//! text, required flag, pattern, dependencies and hooks) plus a
//! [`QuestionKind`] with the fields that only make sense for one type of
//! question. Questions can be built in code or deserialized from YAML, where
//! the `type` key selects the kind:
//!
//! ```yaml
//! - name: fruit
//!   type: list
//!   message: Pick a fruit
//!   options: [Apple, Banana, Cherry]
//! ```

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use log::warn;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::options::RawOption;
use crate::validation::ValidationResult;

/// Answers collected so far, keyed by question name, in resolution order.
pub type Answers = serde_json::Map<String, Value>;

pub type ValidateFn = dyn Fn(&Value, &Answers) -> ValidationResult + Send + Sync;
pub type SanitizeFn = dyn Fn(Value, &Answers) -> Value + Send + Sync;
pub type WhenFn = dyn Fn(&Answers) -> bool + Send + Sync;

/// A caller-supplied function attached to a question.
pub struct Hook<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Hook<F> {
    pub(crate) fn get(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> Clone for Hook<F> {
    fn clone(&self) -> Self {
        Hook(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> Debug for Hook<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Hook(..)")
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Question {
    pub name: String,
    pub message: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub pattern: Option<String>,
    #[serde(default, alias = "dependsOn")]
    pub depends_on: Vec<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(skip)]
    pub validate: Option<Hook<ValidateFn>>,
    #[serde(skip)]
    pub sanitize: Option<Hook<SanitizeFn>>,
    #[serde(skip)]
    pub when: Option<Hook<WhenFn>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Confirm { default: Option<bool> },
    Text { default: Option<String> },
    Number { default: Option<Number> },
    List(SelectSpec),
    Checkbox(CheckboxSpec),
    Autocomplete(SelectSpec),
}

/// Fields of a single-select question (list or autocomplete).
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SelectSpec {
    #[serde(default)]
    pub options: Vec<RawOption>,
    #[serde(alias = "maxDisplayLines")]
    pub max_display_lines: Option<usize>,
    #[serde(default, alias = "allowCustomOptions")]
    pub allow_custom_options: bool,
    pub default: Option<String>,
}

/// Fields of a multi-select question.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CheckboxSpec {
    #[serde(default)]
    pub options: Vec<RawOption>,
    #[serde(alias = "maxDisplayLines")]
    pub max_display_lines: Option<usize>,
    #[serde(default, alias = "allowCustomOptions")]
    pub allow_custom_options: bool,
    #[serde(default, alias = "returnFullResults")]
    pub return_full_results: bool,
    #[serde(default)]
    pub default: Vec<String>,
}

/// Borrowed view over the option-related fields shared by list, checkbox and autocomplete.
#[derive(Debug, Clone, Copy)]
pub struct Choices<'a> {
    pub options: &'a [RawOption],
    pub max_display_lines: Option<usize>,
    pub allow_custom_options: bool,
}

impl QuestionKind {
    #[must_use]
    pub fn choices(&self) -> Option<Choices<'_>> {
        match self {
            QuestionKind::List(spec) | QuestionKind::Autocomplete(spec) => Some(Choices {
                options: &spec.options,
                max_display_lines: spec.max_display_lines,
                allow_custom_options: spec.allow_custom_options,
            }),
            QuestionKind::Checkbox(spec) => Some(Choices {
                options: &spec.options,
                max_display_lines: spec.max_display_lines,
                allow_custom_options: spec.allow_custom_options,
            }),
            _ => None,
        }
    }

    /// Name of the kind as written in question definitions.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::Confirm { .. } => "confirm",
            QuestionKind::Text { .. } => "text",
            QuestionKind::Number { .. } => "number",
            QuestionKind::List(_) => "list",
            QuestionKind::Checkbox(_) => "checkbox",
            QuestionKind::Autocomplete(_) => "autocomplete",
        }
    }
}

impl Question {
    pub fn new(name: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            name: name.into(),
            message: None,
            description: None,
            required: false,
            pattern: None,
            depends_on: Vec::new(),
            kind,
            validate: None,
            sanitize: None,
            when: None,
        }
    }

    pub fn confirm(name: impl Into<String>) -> Self {
        Self::new(name, QuestionKind::Confirm { default: None })
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, QuestionKind::Text { default: None })
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, QuestionKind::Number { default: None })
    }

    pub fn list<O: Into<RawOption>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = O>,
    ) -> Self {
        Self::new(
            name,
            QuestionKind::List(SelectSpec {
                options: options.into_iter().map(Into::into).collect(),
                ..SelectSpec::default()
            }),
        )
    }

    pub fn checkbox<O: Into<RawOption>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = O>,
    ) -> Self {
        Self::new(
            name,
            QuestionKind::Checkbox(CheckboxSpec {
                options: options.into_iter().map(Into::into).collect(),
                ..CheckboxSpec::default()
            }),
        )
    }

    pub fn autocomplete<O: Into<RawOption>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = O>,
    ) -> Self {
        Self::new(
            name,
            QuestionKind::Autocomplete(SelectSpec {
                options: options.into_iter().map(Into::into).collect(),
                ..SelectSpec::default()
            }),
        )
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn depends_on<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.depends_on = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default, interpreted according to the question kind.
    ///
    /// A value of the wrong shape for the kind is ignored with a warning.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        let default = default.into();
        let accepted = match (&mut self.kind, &default) {
            (QuestionKind::Confirm { default: slot }, Value::Bool(flag)) => {
                *slot = Some(*flag);
                true
            }
            (QuestionKind::Text { default: slot }, Value::String(text)) => {
                *slot = Some(text.clone());
                true
            }
            (QuestionKind::Number { default: slot }, Value::Number(number)) => {
                *slot = Some(number.clone());
                true
            }
            (QuestionKind::List(spec) | QuestionKind::Autocomplete(spec), Value::String(text)) => {
                spec.default = Some(text.clone());
                true
            }
            (QuestionKind::Checkbox(spec), Value::String(text)) => {
                spec.default = vec![text.clone()];
                true
            }
            (QuestionKind::Checkbox(spec), Value::Array(items)) => {
                spec.default = items.iter().map(crate::options::value_key).collect();
                true
            }
            _ => false,
        };

        if !accepted {
            warn!(
                "Ignoring default `{}` for {} question `{}`",
                default,
                self.kind.type_name(),
                self.name
            );
        }
        self
    }

    /// Caps the visible option window. No effect on confirm, text or number questions.
    #[must_use]
    pub fn with_max_display_lines(mut self, lines: usize) -> Self {
        match &mut self.kind {
            QuestionKind::List(spec) | QuestionKind::Autocomplete(spec) => {
                spec.max_display_lines = Some(lines);
            }
            QuestionKind::Checkbox(spec) => spec.max_display_lines = Some(lines),
            _ => {}
        }
        self
    }

    #[must_use]
    pub fn with_custom_options(mut self, allow: bool) -> Self {
        match &mut self.kind {
            QuestionKind::List(spec) | QuestionKind::Autocomplete(spec) => {
                spec.allow_custom_options = allow;
            }
            QuestionKind::Checkbox(spec) => spec.allow_custom_options = allow,
            _ => {}
        }
        self
    }

    /// Checkbox only: return every option annotated with its selection state.
    #[must_use]
    pub fn with_full_results(mut self, full: bool) -> Self {
        if let QuestionKind::Checkbox(spec) = &mut self.kind {
            spec.return_full_results = full;
        }
        self
    }

    /// Attaches a validator. It may return a `bool` or a full [`ValidationResult`].
    #[must_use]
    pub fn with_validate<F, R>(mut self, check: F) -> Self
    where
        F: Fn(&Value, &Answers) -> R + Send + Sync + 'static,
        R: Into<ValidationResult>,
    {
        let validate: Arc<ValidateFn> =
            Arc::new(move |answer: &Value, answers: &Answers| -> ValidationResult {
                check(answer, answers).into()
            });
        self.validate = Some(Hook(validate));
        self
    }

    #[must_use]
    pub fn with_sanitize<F>(mut self, sanitize: F) -> Self
    where
        F: Fn(Value, &Answers) -> Value + Send + Sync + 'static,
    {
        let sanitize: Arc<SanitizeFn> = Arc::new(sanitize);
        self.sanitize = Some(Hook(sanitize));
        self
    }

    /// Only ask this question when `when` holds for the answers gathered so far.
    #[must_use]
    pub fn with_when<F>(mut self, when: F) -> Self
    where
        F: Fn(&Answers) -> bool + Send + Sync + 'static,
    {
        let when: Arc<WhenFn> = Arc::new(when);
        self.when = Some(Hook(when));
        self
    }

    #[must_use]
    pub fn should_ask(&self, answers: &Answers) -> bool {
        match &self.when {
            Some(when) => (when.get())(answers),
            None => true,
        }
    }

    /// Header line shown above the answer area.
    #[must_use]
    pub fn prompt_text(&self) -> String {
        self.message
            .as_ref()
            .or(self.description.as_ref())
            .cloned()
            .unwrap_or_else(|| format!("{}:", self.name))
    }
}

/// Parses a numeric answer, keeping integers integral.
#[must_use]
pub fn parse_number(input: &str) -> Option<Number> {
    let input = input.trim();
    if let Ok(integer) = input.parse::<i64>() {
        return Some(Number::from(integer));
    }
    input.parse::<f64>().ok().and_then(number_from_f64)
}

#[must_use]
pub fn number_from_f64(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_question_kinds() {
        let yaml = r#"
- name: proceed
  type: confirm
  default: true
- name: email
  type: text
  message: "Enter your email:"
  pattern: "^.+@.+$"
  required: true
- name: age
  type: number
  default: 30
- name: fruit
  type: list
  options: [Apple, Banana]
  default: Banana
- name: toppings
  type: checkbox
  maxDisplayLines: 4
  returnFullResults: true
  options:
    - Cheese
    - name: Pepperoni
      value: pep
  default: [Cheese]
- name: city
  type: autocomplete
  allowCustomOptions: true
  dependsOn: [fruit]
  options: [Berlin, Paris]
"#;
        let questions: Vec<Question> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(questions.len(), 6);

        assert_eq!(questions[0].kind, QuestionKind::Confirm { default: Some(true) });
        assert!(questions[1].required);
        assert_eq!(questions[1].pattern.as_deref(), Some("^.+@.+$"));
        assert_eq!(questions[2].kind, QuestionKind::Number { default: Some(Number::from(30)) });

        match &questions[3].kind {
            QuestionKind::List(spec) => {
                assert_eq!(spec.options.len(), 2);
                assert_eq!(spec.default.as_deref(), Some("Banana"));
            }
            other => panic!("Expected list, got {other:?}"),
        }

        match &questions[4].kind {
            QuestionKind::Checkbox(spec) => {
                assert_eq!(spec.max_display_lines, Some(4));
                assert!(spec.return_full_results);
                assert_eq!(spec.default, vec!["Cheese".to_string()]);
            }
            other => panic!("Expected checkbox, got {other:?}"),
        }

        assert!(matches!(&questions[5].kind, QuestionKind::Autocomplete(spec) if spec.allow_custom_options));
        assert_eq!(questions[5].depends_on, vec!["fruit".to_string()]);
    }

    #[test]
    fn test_with_default_per_kind() {
        let confirm = Question::confirm("ok").with_default(true);
        assert_eq!(confirm.kind, QuestionKind::Confirm { default: Some(true) });

        let number = Question::number("n").with_default(3);
        assert_eq!(number.kind, QuestionKind::Number { default: Some(Number::from(3)) });

        let large = Question::number("id").with_default(9_007_199_254_740_993_u64);
        assert_eq!(
            large.kind,
            QuestionKind::Number { default: Some(Number::from(9_007_199_254_740_993_u64)) }
        );

        let checkbox = Question::checkbox("c", ["a", "b"]).with_default(json!(["b"]));
        match checkbox.kind {
            QuestionKind::Checkbox(spec) => assert_eq!(spec.default, vec!["b".to_string()]),
            other => panic!("Expected checkbox, got {other:?}"),
        }

        // Wrong shape is ignored
        let text = Question::text("t").with_default(5);
        assert_eq!(text.kind, QuestionKind::Text { default: None });
    }

    #[test]
    fn test_choices_view() {
        let list = Question::list("l", ["a"]).with_max_display_lines(3).with_custom_options(true);
        let choices = list.kind.choices().unwrap();
        assert_eq!(choices.options.len(), 1);
        assert_eq!(choices.max_display_lines, Some(3));
        assert!(choices.allow_custom_options);

        assert!(Question::text("t").kind.choices().is_none());
    }

    #[test]
    fn test_when_hook() {
        let question = Question::text("t").with_when(|answers| answers.contains_key("go"));
        let mut answers = Answers::new();
        assert!(!question.should_ask(&answers));
        answers.insert("go".to_string(), json!(true));
        assert!(question.should_ask(&answers));
    }

    #[test]
    fn test_prompt_text_fallbacks() {
        assert_eq!(Question::text("name").prompt_text(), "name:");
        assert_eq!(
            Question::text("name").with_description("Your name").prompt_text(),
            "Your name"
        );
        assert_eq!(
            Question::text("name")
                .with_description("Your name")
                .with_message("Who are you?")
                .prompt_text(),
            "Who are you?"
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(Number::from(42)));
        assert_eq!(parse_number(" -7 "), Some(Number::from(-7)));
        assert_eq!(parse_number("2.5").and_then(|n| n.as_f64()), Some(2.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(number_from_f64(3.0), Some(Number::from(3)));
    }
}
