//! Key-driven renderers: list, checkbox and autocomplete.
//!
//! Each renderer builds a [`SelectState`], installs its key handlers on the
//! dispatcher, and repaints the whole screen after every key until Enter.

use std::io::Write;

use crossterm::cursor::{MoveTo, MoveToNextLine};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use log::trace;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::keys::Key;
use crate::options::{checkbox_result, find_option, normalize_options, OptionValue};
use crate::question::{Choices, Question, QuestionKind};
use crate::terminal::Backend;

use super::fallback::{checkbox_default, choice_default};
use super::types::{CycleDirection, PromptContext, SelectMode, SelectState};
use super::Prompter;

const CURSOR: &str = ">";
const CHECKED: &str = "◉";
const UNCHECKED: &str = "○";

/// Clears the screen and paints the question header plus the last failure, if any.
pub(super) fn draw_header<W: Write>(
    out: &mut W,
    question: &Question,
    ctx: &PromptContext,
) -> Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(question.prompt_text()),
        SetAttribute(Attribute::Reset),
        MoveToNextLine(1)
    )?;

    if let Some(reason) = ctx.failure_reason() {
        queue!(
            out,
            SetForegroundColor(Color::Red),
            Print(reason),
            ResetColor,
            MoveToNextLine(1)
        )?;
    }

    Ok(())
}

fn draw_options<W: Write>(out: &mut W, state: &SelectState) -> Result<()> {
    if state.mode.is_filtering() {
        queue!(out, Print(format!("Search: {}", state.search)), MoveToNextLine(1))?;
    }

    if state.filtered.is_empty() {
        let message = if state.mode == SelectMode::Autocomplete && !state.search.is_empty() {
            "No matches, Enter accepts the search text"
        } else {
            "No matches"
        };
        queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(message),
            ResetColor,
            MoveToNextLine(1)
        )?;
        return Ok(());
    }

    for (position, option) in state.visible() {
        let cursor = if position == state.selected_index {
            CURSOR
        } else {
            " "
        };
        let line = match state.mode {
            SelectMode::Checkbox => {
                let marker = if option.selected { CHECKED } else { UNCHECKED };
                format!("{cursor} {marker} {}", option.name)
            }
            SelectMode::List | SelectMode::Autocomplete => format!("{cursor} {}", option.name),
        };

        if position == state.selected_index {
            queue!(
                out,
                SetForegroundColor(Color::Cyan),
                Print(line),
                ResetColor,
                MoveToNextLine(1)
            )?;
        } else {
            queue!(out, Print(line), MoveToNextLine(1))?;
        }
    }

    Ok(())
}

fn select_choices(question: &Question) -> Result<Choices<'_>> {
    match question.kind.choices() {
        Some(choices) if !choices.options.is_empty() => Ok(choices),
        _ => Err(Error::EmptyOptions(question.name.clone())),
    }
}

impl<B: Backend> Prompter<B> {
    /// Single-select over the question's options, resolving to the picked option's value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOptions`] if the question has no options, or a
    /// terminal error.
    pub fn list(&mut self, question: &Question) -> Result<Option<Value>> {
        self.list_with(question, &PromptContext::new())
    }

    pub(crate) fn list_with(
        &mut self,
        question: &Question,
        ctx: &PromptContext,
    ) -> Result<Option<Value>> {
        let choices = select_choices(question)?;
        if !self.is_interactive() {
            return Ok(choice_default(question));
        }

        let options = normalize_options(choices.options);
        let mut state = SelectState::new(options, SelectMode::List, self.window_size(choices));
        focus_default(&mut state, question);

        let state = self.run_select(question, state, ctx)?;
        Ok(state.current().map(|option| option.value.clone()))
    }

    /// Multi-select with fuzzy filtering. Returns every option annotated with its
    /// selection state, or only the selected ones, per `return_full_results`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOptions`] if the question has no options, or a
    /// terminal error.
    pub fn checkbox(&mut self, question: &Question) -> Result<Vec<OptionValue>> {
        self.checkbox_with(question, &PromptContext::new())
    }

    pub(crate) fn checkbox_with(
        &mut self,
        question: &Question,
        ctx: &PromptContext,
    ) -> Result<Vec<OptionValue>> {
        let choices = select_choices(question)?;
        let QuestionKind::Checkbox(spec) = &question.kind else {
            return Err(Error::Misc(format!(
                "`{}` is a {} question, not a checkbox",
                question.name,
                question.kind.type_name()
            )));
        };

        if !self.is_interactive() {
            return Ok(checkbox_default(spec));
        }

        let mut options = normalize_options(choices.options);
        for option in options.iter_mut() {
            option.selected = spec.default.iter().any(|key| option.matches(key));
        }

        let state = SelectState::new(options, SelectMode::Checkbox, self.window_size(choices));
        let state = self.run_select(question, state, ctx)?;
        Ok(checkbox_result(state.options, spec.return_full_results))
    }

    /// Single-select with fuzzy filtering. With nothing matching, resolves to the
    /// typed search text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOptions`] if the question has no options, or a
    /// terminal error.
    pub fn autocomplete(&mut self, question: &Question) -> Result<Option<Value>> {
        self.autocomplete_with(question, &PromptContext::new())
    }

    pub(crate) fn autocomplete_with(
        &mut self,
        question: &Question,
        ctx: &PromptContext,
    ) -> Result<Option<Value>> {
        let choices = select_choices(question)?;
        if !self.is_interactive() {
            return Ok(choice_default(question));
        }

        let options = normalize_options(choices.options);
        let mut state =
            SelectState::new(options, SelectMode::Autocomplete, self.window_size(choices));
        focus_default(&mut state, question);
        let state = self.run_select(question, state, ctx)?;

        Ok(match state.current() {
            Some(option) => Some(option.value.clone()),
            None if !state.search.is_empty() => Some(Value::String(state.search.clone())),
            None => None,
        })
    }

    fn window_size(&self, choices: Choices<'_>) -> usize {
        choices
            .max_display_lines
            .unwrap_or_else(|| self.config.global_max_lines.min(choices.options.len()))
            .max(1)
    }

    fn install_select_handlers(&mut self, mode: SelectMode) {
        self.keys.clear_all();

        self.keys
            .register(Key::Up, |state: &mut SelectState| state.cycle(CycleDirection::Up));
        self.keys
            .register(Key::Down, |state: &mut SelectState| state.cycle(CycleDirection::Down));
        self.keys.register(Key::Enter, SelectState::submit);

        if mode == SelectMode::Checkbox {
            self.keys.register(Key::Space, SelectState::toggle_current);
        }

        if mode.is_filtering() {
            for c in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
                self.keys
                    .register(Key::Char(c), move |state: &mut SelectState| state.push_search(c));
            }
            self.keys.register(Key::Backspace, SelectState::pop_search);
        }
    }

    fn run_select(
        &mut self,
        question: &Question,
        mut state: SelectState,
        ctx: &PromptContext,
    ) -> Result<SelectState> {
        self.install_select_handlers(state.mode);
        self.keys.enter_raw_mode()?;

        let outcome = self.select_loop(question, &mut state, ctx);

        // Leave no handlers behind for the next renderer, whatever happened
        self.keys.clear_all();
        let restored = self.keys.leave_raw_mode();
        outcome?;
        restored?;

        trace!("`{}` select finished: {:?}", question.name, state.current());
        Ok(state)
    }

    fn select_loop(
        &mut self,
        question: &Question,
        state: &mut SelectState,
        ctx: &PromptContext,
    ) -> Result<()> {
        self.display_select(question, state, ctx)?;

        while !state.done {
            let key = self.keys.next_key()?;
            self.keys.dispatch(key, state)?;
            self.display_select(question, state, ctx)?;
        }

        Ok(())
    }

    fn display_select(
        &mut self,
        question: &Question,
        state: &SelectState,
        ctx: &PromptContext,
    ) -> Result<()> {
        let out = self.keys.backend_mut().writer();
        draw_header(out, question, ctx)?;
        draw_options(out, state)?;
        out.flush()?;
        Ok(())
    }
}

/// Moves the cursor onto the question's default option, wherever filtering placed it.
fn focus_default(state: &mut SelectState, question: &Question) {
    let default = match &question.kind {
        QuestionKind::List(spec) | QuestionKind::Autocomplete(spec) => spec.default.as_deref(),
        _ => None,
    };
    let Some(index) = default.and_then(|key| find_option(&state.options, key)) else {
        return;
    };
    if let Some(position) = state.filtered.iter().position(|&entry| entry == index) {
        state.focus(position);
    }
}
