//! Dependency-aware question ordering.

use std::collections::HashSet;

use log::debug;

use crate::error::{Error, Result};
use crate::question::Question;

/// Reorders questions so that every question named in another's `depends_on`
/// comes first.
///
/// Questions are visited in their original order; each one first emits its
/// dependencies (depth first, looked up by name) and then itself, exactly once.
/// An input that already satisfies its dependencies keeps its order.
///
/// # Errors
///
/// - [`Error::UnknownDependency`] if a dependency names no question in `questions`
/// - [`Error::CyclicDependency`] if the dependencies form a cycle
pub fn reorder(questions: &[Question]) -> Result<Vec<&Question>> {
    let mut resolver = Resolver {
        questions,
        emitted: HashSet::new(),
        path: Vec::new(),
        ordered: Vec::with_capacity(questions.len()),
    };

    for index in 0..questions.len() {
        resolver.visit(index)?;
    }

    debug!(
        "Question order: {:?}",
        resolver.ordered.iter().map(|q| q.name.as_str()).collect::<Vec<_>>()
    );
    Ok(resolver.ordered)
}

struct Resolver<'a> {
    questions: &'a [Question],
    emitted: HashSet<usize>,
    // Indexes currently being expanded, outermost first
    path: Vec<usize>,
    ordered: Vec<&'a Question>,
}

impl<'a> Resolver<'a> {
    fn visit(&mut self, index: usize) -> Result<()> {
        if self.emitted.contains(&index) {
            return Ok(());
        }

        if let Some(start) = self.path.iter().position(|&i| i == index) {
            let mut cycle: Vec<String> = self.path[start..]
                .iter()
                .map(|&i| self.questions[i].name.clone())
                .collect();
            cycle.push(self.questions[index].name.clone());
            return Err(Error::CyclicDependency(cycle));
        }

        let questions = self.questions;
        let question = &questions[index];
        self.path.push(index);
        for dependency in &question.depends_on {
            let dependency_index = questions
                .iter()
                .position(|q| &q.name == dependency)
                .ok_or_else(|| Error::unknown_dependency(&question.name, dependency))?;
            self.visit(dependency_index)?;
        }
        self.path.pop();

        self.emitted.insert(index);
        self.ordered.push(question);
        Ok(())
    }
}
