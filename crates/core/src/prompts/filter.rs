use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::options::OptionValue;

/// Indexes of the options whose name contains `search` as a case-insensitive
/// subsequence, sorted by name. An empty search matches everything.
#[must_use]
pub fn filter_options(options: &[OptionValue], search: &str) -> Vec<usize> {
    let matcher = SkimMatcherV2::default().ignore_case();

    let mut matched: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, option)| {
            search.is_empty() || matcher.fuzzy_match(&option.name, search).is_some()
        })
        .map(|(index, _)| index)
        .collect();

    // Stable, so equal names keep declaration order
    matched.sort_by(|a, b| options[*a].name.cmp(&options[*b].name));
    matched
}
