use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Question `{}` depends on unknown question `{}`", .question, .dependency)]
    UnknownDependency { question: String, dependency: String },

    #[error("Cyclic dependency between questions: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),

    #[error("Question `{}` has no options to choose from", .0)]
    EmptyOptions(String),

    #[error("Invalid pattern on question `{}`: {}", .question, .original)]
    InvalidPattern {
        question: String,
        original: regex::Error,
    },

    #[error("Missing required arguments: {}{}", .missing.join(", "), usage_suffix(.usage))]
    MissingRequired {
        missing: Vec<String>,
        usage: Option<String>,
    },

    #[error("Invalid value for `{}`: {}", .question, .reason)]
    ValidationFailed { question: String, reason: String },

    #[error("Interrupted")]
    Interrupted,

    #[error("Input ended before an answer was given")]
    EndOfInput,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No questions were found in the question definition YAML. Is `{}` empty?", .path)]
    EmptyQuestionDefinition { path: String },

    #[error("Found a non-unique question name: `{}`", .0)]
    NonUniqueQuestionName(String),

    #[error("Invalid question name: name may not be empty")]
    EmptyName,

    #[error("Invalid question name `{}`: name may not contain whitespace", .0)]
    NameWithSpace(String),

    #[error("Argument must be in the format key=value, got `{}`", .0)]
    ArgumentFormat(String),

    #[error("No question named `{}`", .0)]
    UnknownQuestion(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

fn usage_suffix(usage: &Option<String>) -> String {
    match usage {
        Some(usage) => format!("\n\n{usage}"),
        None => String::new(),
    }
}

impl Error {
    pub fn unknown_dependency(question: &str, dependency: &str) -> Self {
        Self::UnknownDependency {
            question: question.to_string(),
            dependency: dependency.to_string(),
        }
    }

    pub fn invalid_pattern(question: &str, original: regex::Error) -> Self {
        Self::InvalidPattern {
            question: question.to_string(),
            original,
        }
    }

    pub fn missing_required(missing: Vec<String>, usage: Option<String>) -> Self {
        Self::MissingRequired { missing, usage }
    }

    pub fn validation_failed(question: &str, reason: String) -> Self {
        Self::ValidationFailed {
            question: question.to_string(),
            reason,
        }
    }

    pub fn empty_question_definition(path: String) -> Self {
        Self::EmptyQuestionDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_without_usage() {
        let error = Error::missing_required(vec!["age".to_string(), "name".to_string()], None);
        assert_eq!(error.to_string(), "Missing required arguments: age, name");
    }

    #[test]
    fn test_missing_required_with_usage() {
        let error = Error::missing_required(
            vec!["age".to_string()],
            Some("Usage: askr --age <n>".to_string()),
        );
        let message = error.to_string();
        assert!(message.starts_with("Missing required arguments: age"));
        assert!(message.ends_with("Usage: askr --age <n>"));
    }

    #[test]
    fn test_cyclic_dependency_display() {
        let error = Error::CyclicDependency(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(
            error.to_string(),
            "Cyclic dependency between questions: a -> b -> a"
        );
    }
}
