//! The prompt engine.
//!
//! [`Prompter`] takes the caller's existing answers and a set of questions and
//! resolves every question that is not already answered, in dependency order:
//!
//! 1. Answers already present are normalized against the question options
//!    and never prompted for.
//! 2. Without a terminal, required questions that have neither an answer nor a
//!    default fail the whole call up front.
//! 3. Each remaining question is rendered, sanitized and validated until it is
//!    accepted. Interactive failures are shown above the next attempt;
//!    without a terminal the first failure is fatal.
//!
//! The per-type renderers ([`Prompter::confirm`], [`Prompter::list`], ...) are
//! also usable on their own.

pub mod fallback;
pub mod filter;
mod input;
pub mod types;
mod ui;

use std::io::Write;

use crossterm::queue;
use crossterm::style::Print;
use log::{debug, trace};
use serde_json::Value;

use crate::config::{PromptOptions, PrompterConfig};
use crate::dependencies::reorder;
use crate::error::{Error, Result};
use crate::keys::KeyDispatcher;
use crate::options::to_answer;
use crate::overrides::OverrideResolver;
use crate::question::{Answers, Question, QuestionKind};
use crate::terminal::Backend;
use crate::validation::{check_answer, is_unanswered, sanitize};

use fallback::default_answer;
use types::{PromptContext, SelectState};

pub struct Prompter<B: Backend> {
    keys: KeyDispatcher<B, SelectState>,
    config: PrompterConfig,
}

impl<B: Backend> Prompter<B> {
    pub fn new(backend: B, config: PrompterConfig) -> Self {
        let interactive = !config.no_tty;
        Self {
            keys: KeyDispatcher::new(backend, interactive),
            config,
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !self.config.no_tty
    }

    pub fn config(&self) -> &PrompterConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        self.keys.backend()
    }

    /// Restores the terminal and drops any key handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be restored.
    pub fn close(&mut self) -> Result<()> {
        self.keys.destroy()
    }

    /// Resolves `questions` against `args` with default [`PromptOptions`].
    ///
    /// # Errors
    ///
    /// See [`Prompter::prompt_with`].
    pub fn prompt(&mut self, args: &mut Answers, questions: &[Question]) -> Result<Answers> {
        self.prompt_with(args, questions, &PromptOptions::default())
    }

    /// Resolves every question not already answered in `args`.
    ///
    /// With `mutate_args` set, `args` ends up holding the returned answers.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownDependency`] or [`Error::CyclicDependency`] for bad `depends_on`
    /// - [`Error::MissingRequired`] without a terminal when required answers are missing
    /// - [`Error::ValidationFailed`] without a terminal when an answer is rejected
    /// - [`Error::EmptyOptions`] for a select question with no options
    /// - [`Error::Interrupted`] when the user presses Ctrl-C
    pub fn prompt_with(
        &mut self,
        args: &mut Answers,
        questions: &[Question],
        options: &PromptOptions,
    ) -> Result<Answers> {
        let mut answers = args.clone();
        OverrideResolver::new().apply(&mut answers, questions);

        let ordered = reorder(questions)?;

        let missing = missing_required(&answers, &ordered);
        if !missing.is_empty() {
            debug!("Missing required answers: {missing:?}");
            if !self.is_interactive() {
                let usage = options.usage_text.clone().or_else(|| {
                    options
                        .man_page
                        .as_ref()
                        .map(|page| page.render(questions))
                });
                return Err(Error::missing_required(missing, usage));
            }
            if let Some(usage) = &options.usage_text {
                self.show_usage(usage)?;
            }
        }

        for question in ordered {
            if answers.contains_key(&question.name) {
                trace!("`{}` already answered", question.name);
                continue;
            }

            if !question.should_ask(&answers) {
                debug!("Skipping `{}`: condition not met", question.name);
                continue;
            }

            if self.config.use_defaults {
                if let Some(default) = default_answer(question) {
                    debug!("`{}` takes its default: {}", question.name, default);
                    answers.insert(question.name.clone(), default);
                    continue;
                }
            }

            if let Some(answer) = self.resolve_question(question, &answers)? {
                answers.insert(question.name.clone(), answer);
            }
        }

        if options.mutate_args {
            args.clone_from(&answers);
        }
        Ok(answers)
    }

    fn resolve_question(&mut self, question: &Question, answers: &Answers) -> Result<Option<Value>> {
        let mut ctx = PromptContext::new();
        let mut accepted = None;

        while ctx.needs_input {
            let candidate = self
                .render(question, &ctx)?
                .map(|answer| sanitize(question, answer, answers));
            let validation = check_answer(question, candidate.as_ref(), answers)?;

            if validation.success {
                ctx.accept();
                accepted = candidate;
            } else if self.is_interactive() {
                debug!(
                    "`{}` rejected on try {}: {}",
                    question.name,
                    ctx.num_tries + 1,
                    validation.describe()
                );
                ctx.try_again(validation);
            } else {
                return Err(Error::validation_failed(
                    &question.name,
                    validation.describe(),
                ));
            }
        }

        debug!("`{}` resolved after {} attempt(s)", question.name, ctx.num_tries);
        Ok(accepted)
    }

    fn render(&mut self, question: &Question, ctx: &PromptContext) -> Result<Option<Value>> {
        Ok(match &question.kind {
            QuestionKind::Confirm { .. } => Some(Value::Bool(self.confirm_with(question, ctx)?)),
            QuestionKind::Text { .. } => self.text_with(question, ctx)?.map(Value::String),
            QuestionKind::Number { .. } => self.number_with(question, ctx)?.map(Value::Number),
            QuestionKind::List(_) => self.list_with(question, ctx)?,
            QuestionKind::Checkbox(_) => Some(to_answer(self.checkbox_with(question, ctx)?)),
            QuestionKind::Autocomplete(_) => self.autocomplete_with(question, ctx)?,
        })
    }

    fn show_usage(&mut self, usage: &str) -> Result<()> {
        let out = self.keys.backend_mut().writer();
        queue!(out, Print(usage), Print("\n"))?;
        out.flush()?;
        Ok(())
    }
}

/// Names of required questions that would be asked but have neither an answer nor a default.
///
/// Walks `ordered` the way the non-interactive pass does, so defaults landing
/// earlier are visible to later `when` conditions.
fn missing_required(answers: &Answers, ordered: &[&Question]) -> Vec<String> {
    let mut resolved = answers.clone();
    let mut missing = Vec::new();

    for question in ordered {
        if resolved.contains_key(&question.name) || !question.should_ask(&resolved) {
            continue;
        }
        let default = default_answer(question);
        if question.required && is_unanswered(question, default.as_ref()) {
            missing.push(question.name.clone());
        } else if let Some(default) = default {
            resolved.insert(question.name.clone(), default);
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Key;
    use crate::terminal::ScriptedBackend;
    use crate::usage::ManPageInfo;
    use serde_json::json;

    fn offline() -> Prompter<ScriptedBackend> {
        Prompter::new(ScriptedBackend::new(), PrompterConfig::non_interactive())
    }

    #[test]
    fn test_missing_required_lists_only_unresolvable() {
        let questions = vec![
            Question::text("a").with_required(true),
            Question::text("b").with_required(true).with_default("x"),
            Question::text("c").with_required(true),
            Question::text("d"),
            Question::text("e").with_required(true).with_when(|_| false),
        ];
        let mut answers = Answers::new();
        answers.insert("c".to_string(), json!("given"));

        let ordered: Vec<&Question> = questions.iter().collect();
        assert_eq!(missing_required(&answers, &ordered), vec!["a".to_string()]);
    }

    #[test]
    fn test_missing_required_sees_earlier_defaults() {
        let questions = vec![
            Question::text("level")
                .with_required(true)
                .with_when(|answers| answers.get("mode") == Some(&json!("advanced")))
                .depends_on(["mode"]),
            Question::text("mode").with_default("advanced"),
        ];
        let options = PromptOptions {
            man_page: Some(ManPageInfo::new("tool")),
            ..PromptOptions::default()
        };

        let result = offline().prompt_with(&mut Answers::new(), &questions, &options);
        match result {
            Err(Error::MissingRequired { missing, usage }) => {
                assert_eq!(missing, vec!["level".to_string()]);
                assert!(usage.is_some());
            }
            other => panic!("Expected missing required, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_skips_questions_gated_off_by_defaults() {
        let questions = vec![
            Question::text("mode").with_default("basic"),
            Question::text("level")
                .with_required(true)
                .with_when(|answers| answers.get("mode") == Some(&json!("advanced"))),
        ];

        let answers = offline().prompt(&mut Answers::new(), &questions).unwrap();
        assert_eq!(answers["mode"], json!("basic"));
        assert!(!answers.contains_key("level"));
    }

    #[test]
    fn test_required_checkbox_override_matching_nothing_is_missing() {
        let questions = vec![Question::checkbox("tags", ["a", "b"]).with_required(true)];
        let mut answers = Answers::new();
        answers.insert("tags".to_string(), json!(["zzz"]));

        let result = offline().prompt(&mut answers, &questions);
        assert!(matches!(
            result,
            Err(Error::MissingRequired { missing, .. }) if missing == vec!["tags".to_string()]
        ));
    }

    #[test]
    fn test_missing_required_renders_man_page() {
        let questions = vec![Question::number("age").with_required(true)];
        let options = PromptOptions {
            man_page: Some(ManPageInfo::new("tool")),
            ..PromptOptions::default()
        };

        let result = offline().prompt_with(&mut Answers::new(), &questions, &options);
        match result {
            Err(Error::MissingRequired { missing, usage }) => {
                assert_eq!(missing, vec!["age".to_string()]);
                assert!(usage.unwrap().contains("--age <number> (required)"));
            }
            other => panic!("Expected missing required, got {other:?}"),
        }
    }

    #[test]
    fn test_usage_text_wins_over_man_page() {
        let questions = vec![Question::text("name").with_required(true)];
        let options = PromptOptions {
            usage_text: Some("usage: tool --name NAME".to_string()),
            man_page: Some(ManPageInfo::new("tool")),
            mutate_args: true,
        };

        let error = offline()
            .prompt_with(&mut Answers::new(), &questions, &options)
            .unwrap_err();
        assert!(error.to_string().ends_with("usage: tool --name NAME"));
    }

    #[test]
    fn test_interactive_shows_usage_before_prompting() {
        let questions = vec![Question::text("name").with_required(true)];
        let options = PromptOptions {
            usage_text: Some("usage: tool --name NAME".to_string()),
            ..PromptOptions::default()
        };
        let mut prompter = Prompter::new(
            ScriptedBackend::new().with_lines(["Ada"]),
            PrompterConfig::default(),
        );

        let answers = prompter
            .prompt_with(&mut Answers::new(), &questions, &options)
            .unwrap();

        assert_eq!(answers["name"], json!("Ada"));
        assert!(prompter.backend().output_text().starts_with("usage: tool --name NAME"));
    }

    #[test]
    fn test_required_retry_shows_reason() {
        let questions = vec![Question::text("name").with_required(true)];
        let mut prompter = Prompter::new(
            ScriptedBackend::new().with_lines(["", "Ada"]),
            PrompterConfig::default(),
        );

        let answers = prompter.prompt(&mut Answers::new(), &questions).unwrap();

        assert_eq!(answers["name"], json!("Ada"));
        assert!(prompter.backend().output_text().contains("A value is required."));
    }

    #[test]
    fn test_sanitized_answer_is_stored() {
        let questions = vec![Question::text("name").with_sanitize(|answer, _| match answer {
            Value::String(text) => Value::String(text.to_uppercase()),
            other => other,
        })];
        let mut prompter = Prompter::new(
            ScriptedBackend::new().with_lines(["ada"]),
            PrompterConfig::default(),
        );

        let answers = prompter.prompt(&mut Answers::new(), &questions).unwrap();
        assert_eq!(answers["name"], json!("ADA"));
    }

    #[test]
    fn test_optional_empty_answer_is_absent() {
        let questions = vec![Question::text("nickname")];
        let mut prompter = Prompter::new(
            ScriptedBackend::new().with_lines([""]),
            PrompterConfig::default(),
        );

        let answers = prompter.prompt(&mut Answers::new(), &questions).unwrap();
        assert!(!answers.contains_key("nickname"));
    }

    #[test]
    fn test_select_after_line_prompt_switches_modes() {
        let questions = vec![
            Question::text("name"),
            Question::list("fruit", ["Apple", "Banana"]),
            Question::confirm("ok"),
        ];
        let mut prompter = Prompter::new(
            ScriptedBackend::new()
                .with_lines(["Ada", "y"])
                .with_keys([Key::Down, Key::Enter]),
            PrompterConfig::default(),
        );

        let answers = prompter.prompt(&mut Answers::new(), &questions).unwrap();

        assert_eq!(answers["name"], json!("Ada"));
        assert_eq!(answers["fruit"], json!("Banana"));
        assert_eq!(answers["ok"], json!(true));
        assert!(!prompter.backend().is_raw_mode());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut prompter = offline();
        prompter.close().unwrap();
        prompter.close().unwrap();
    }
}
