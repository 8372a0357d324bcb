//! Loading and validation of question definition files.

use std::collections::HashSet;
use std::fs::File;

use crate::dependencies::reorder;
use crate::error::Error::{EmptyName, NameWithSpace, NonUniqueQuestionName};
use crate::error::{Error, Result};
use crate::question::Question;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EmptyName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(NameWithSpace(name.to_string()));
    }

    Ok(())
}

/// Checks names are well formed and unique, and that the dependencies resolve.
///
/// # Errors
///
/// Returns the first naming or dependency problem found.
pub fn validate_questions(questions: &[Question]) -> Result<()> {
    let mut names = HashSet::new();

    for question in questions {
        validate_name(&question.name)?;

        if !names.insert(question.name.as_str()) {
            return Err(NonUniqueQuestionName(question.name.clone()));
        }
    }

    reorder(questions)?;
    Ok(())
}

/// Loads and validates question definitions from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't describe a list of questions
/// - The file defines no questions
/// - A question name is empty, contains whitespace or is not unique
/// - A `depends_on` entry names an unknown question or forms a cycle
///
/// # Examples
///
/// ```no_run
/// use askr_core::file_handling::get_question_definitions;
///
/// let questions = get_question_definitions("questions.yml")?;
/// println!("Loaded {} questions", questions.len());
/// # Ok::<(), askr_core::error::Error>(())
/// ```
pub fn get_question_definitions(path: &str) -> Result<Vec<Question>> {
    let reader = get_reader("questions", path)?;

    let questions: Vec<Question> = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "questions".to_string(),
            path.to_string(),
            e,
        )
    })?;

    if questions.is_empty() {
        return Err(Error::empty_question_definition(path.to_string()));
    }

    validate_questions(&questions)?;

    Ok(questions)
}
