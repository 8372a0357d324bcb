//! State threaded through the prompt loop and the select renderers.

use crate::options::OptionValue;
use crate::validation::ValidationResult;

use super::filter::filter_options;

/// Per-question attempt tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub num_tries: usize,
    pub needs_input: bool,
    /// Outcome of the last attempt, shown above the next one when it failed.
    pub validation: ValidationResult,
}

impl Default for PromptContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            num_tries: 0,
            needs_input: true,
            validation: ValidationResult::ok(),
        }
    }

    /// Records a rejected attempt.
    pub fn try_again(&mut self, validation: ValidationResult) {
        self.num_tries += 1;
        self.needs_input = true;
        self.validation = validation;
    }

    pub fn accept(&mut self) {
        self.num_tries += 1;
        self.needs_input = false;
        self.validation = ValidationResult::ok();
    }

    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        (!self.validation.success).then(|| self.validation.describe())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    List,
    Checkbox,
    Autocomplete,
}

impl SelectMode {
    #[must_use]
    pub fn is_filtering(self) -> bool {
        self != SelectMode::List
    }
}

/// Visible slice of the (filtered) option list: `[start_index, start_index + max_lines)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub start_index: usize,
    pub max_lines: usize,
}

impl Viewport {
    #[must_use]
    pub fn new(max_lines: usize) -> Self {
        Self {
            start_index: 0,
            max_lines: max_lines.max(1),
        }
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.start_index + self.max_lines
    }
}

/// Everything a select renderer mutates while keys come in.
///
/// `filtered` holds indexes into `options`; `selected_index` is a position in
/// `filtered`. Checkbox selections live on `options` itself, so filtering never
/// loses them.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectState {
    pub mode: SelectMode,
    pub options: Vec<OptionValue>,
    pub filtered: Vec<usize>,
    pub selected_index: usize,
    pub viewport: Viewport,
    pub search: String,
    pub done: bool,
}

impl SelectState {
    #[must_use]
    pub fn new(options: Vec<OptionValue>, mode: SelectMode, max_lines: usize) -> Self {
        let filtered = if mode.is_filtering() {
            filter_options(&options, "")
        } else {
            (0..options.len()).collect()
        };

        Self {
            mode,
            options,
            filtered,
            selected_index: 0,
            viewport: Viewport::new(max_lines),
            search: String::new(),
            done: false,
        }
    }

    /// Moves the cursor one step with wraparound, scrolling the window to keep it visible.
    pub fn cycle(&mut self, direction: CycleDirection) {
        let count = self.filtered.len();
        if count == 0 {
            return;
        }

        let max_lines = self.viewport.max_lines;
        match direction {
            CycleDirection::Up => {
                if self.selected_index == 0 {
                    self.selected_index = count - 1;
                    self.viewport.start_index = count.saturating_sub(max_lines);
                } else {
                    self.selected_index -= 1;
                    if self.selected_index < self.viewport.start_index {
                        self.viewport.start_index = self.selected_index;
                    }
                }
            }
            CycleDirection::Down => {
                let next = (self.selected_index + 1) % count;
                if next < self.selected_index {
                    self.viewport.start_index = 0;
                } else if next >= self.viewport.start_index + max_lines {
                    self.viewport.start_index = next + 1 - max_lines;
                }
                self.selected_index = next;
            }
        }
    }

    /// Puts the cursor on `position` (in the filtered list) with the window scrolled to show it.
    pub fn focus(&mut self, position: usize) {
        if position >= self.filtered.len() {
            return;
        }
        self.selected_index = position;
        if !self.viewport.contains(position) {
            self.viewport.start_index = (position + 1).saturating_sub(self.viewport.max_lines);
        }
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.refilter();
    }

    pub fn pop_search(&mut self) {
        if self.search.pop().is_some() {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_options(&self.options, &self.search);
        self.selected_index = 0;
        self.viewport.start_index = 0;
    }

    /// Flips the selection of the option under the cursor.
    pub fn toggle_current(&mut self) {
        if let Some(&index) = self.filtered.get(self.selected_index) {
            let option = &mut self.options[index];
            option.selected = !option.selected;
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&OptionValue> {
        self.filtered
            .get(self.selected_index)
            .map(|&index| &self.options[index])
    }

    /// Options inside the window, with their position in the filtered list.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &OptionValue)> + '_ {
        self.filtered
            .iter()
            .enumerate()
            .skip(self.viewport.start_index)
            .take(self.viewport.max_lines)
            .map(|(position, &index)| (position, &self.options[index]))
    }

    pub fn submit(&mut self) {
        self.done = true;
    }
}
