//! Reference page generation for the missing-argument error.

use serde::Deserialize;

use crate::options::normalize_options;
use crate::question::{Question, QuestionKind};

/// Describes the command whose arguments the questions fill in.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ManPageInfo {
    pub command_name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
}

impl ManPageInfo {
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            ..Self::default()
        }
    }

    /// Renders a plain-text reference page with one entry per question.
    #[must_use]
    pub fn render(&self, questions: &[Question]) -> String {
        let mut lines = vec!["NAME".to_string()];
        lines.push(match &self.description {
            Some(description) => format!("    {} - {}", self.command_name, description),
            None => format!("    {}", self.command_name),
        });

        lines.push(String::new());
        lines.push("SYNOPSIS".to_string());
        lines.push(format!("    {} [OPTIONS]", self.command_name));

        if !questions.is_empty() {
            lines.push(String::new());
            lines.push("OPTIONS".to_string());
            lines.extend(questions.iter().flat_map(option_entry));
        }

        if let Some(version) = &self.version {
            lines.extend([String::new(), "VERSION".to_string(), format!("    {version}")]);
        }

        if let Some(author) = &self.author {
            lines.extend([String::new(), "AUTHOR".to_string(), format!("    {author}")]);
        }

        let mut page = lines.join("\n");
        page.push('\n');
        page
    }
}

fn option_entry(question: &Question) -> Vec<String> {
    let mut heading = format!("    --{} <{}>", question.name, question.kind.type_name());
    if question.required {
        heading.push_str(" (required)");
    }
    let mut entry = vec![heading];

    if let Some(text) = question.description.as_ref().or(question.message.as_ref()) {
        entry.push(format!("        {text}"));
    }

    if let Some(default) = default_text(&question.kind) {
        entry.push(format!("        Default: {default}"));
    }

    if let Some(choices) = question.kind.choices() {
        let names: Vec<String> = normalize_options(choices.options)
            .into_iter()
            .map(|option| option.name)
            .collect();
        entry.push(format!("        Choices: {}", names.join(", ")));
    }

    entry
}

fn default_text(kind: &QuestionKind) -> Option<String> {
    match kind {
        QuestionKind::Confirm { default } => default.map(|d| d.to_string()),
        QuestionKind::Text { default } => default.clone(),
        QuestionKind::Number { default } => default.as_ref().map(ToString::to_string),
        QuestionKind::List(spec) | QuestionKind::Autocomplete(spec) => spec.default.clone(),
        QuestionKind::Checkbox(spec) if !spec.default.is_empty() => Some(spec.default.join(", ")),
        QuestionKind::Checkbox(_) => None,
    }
}
