//! Line-mode renderers: confirm, text and number.

use std::io::Write;

use crossterm::queue;
use crossterm::style::Print;
use serde_json::Number;

use crate::error::Result;
use crate::question::{parse_number, Question};
use crate::terminal::Backend;

use super::fallback::{confirm_default, number_default, text_default};
use super::types::PromptContext;
use super::ui::draw_header;
use super::Prompter;

impl<B: Backend> Prompter<B> {
    /// Asks a yes/no question. An empty answer takes the default, or `false` without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn confirm(&mut self, question: &Question) -> Result<bool> {
        self.confirm_with(question, &PromptContext::new())
    }

    pub(crate) fn confirm_with(&mut self, question: &Question, ctx: &PromptContext) -> Result<bool> {
        let default = confirm_default(question);
        if !self.is_interactive() {
            return Ok(default.unwrap_or(false));
        }

        let hint = if default == Some(true) { "(Y/n)" } else { "(y/N)" };
        let input = self.read_answer_line(question, ctx, Some(hint.to_string()))?;

        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Ok(default.unwrap_or(false));
        }
        Ok(matches!(input.as_str(), "y" | "yes"))
    }

    /// Reads free text. `None` when the answer is empty and there is no default.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn text(&mut self, question: &Question) -> Result<Option<String>> {
        self.text_with(question, &PromptContext::new())
    }

    pub(crate) fn text_with(
        &mut self,
        question: &Question,
        ctx: &PromptContext,
    ) -> Result<Option<String>> {
        let default = text_default(question);
        if !self.is_interactive() {
            return Ok(default);
        }

        let hint = default.as_ref().map(|d| format!("[{d}]"));
        let input = self.read_answer_line(question, ctx, hint)?;

        if input.is_empty() {
            return Ok(default);
        }
        Ok(Some(input))
    }

    /// Reads a number. Input that does not parse resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn number(&mut self, question: &Question) -> Result<Option<Number>> {
        self.number_with(question, &PromptContext::new())
    }

    pub(crate) fn number_with(
        &mut self,
        question: &Question,
        ctx: &PromptContext,
    ) -> Result<Option<Number>> {
        let default = number_default(question);
        if !self.is_interactive() {
            return Ok(default);
        }

        let hint = default.as_ref().map(|d| format!("[{d}]"));
        let input = self.read_answer_line(question, ctx, hint)?;

        if input.trim().is_empty() {
            return Ok(default);
        }
        Ok(parse_number(&input))
    }

    // Line reads need the terminal back in cooked mode with no key handlers installed
    fn read_answer_line(
        &mut self,
        question: &Question,
        ctx: &PromptContext,
        hint: Option<String>,
    ) -> Result<String> {
        self.keys.clear_all();
        self.keys.leave_raw_mode()?;

        let out = self.keys.backend_mut().writer();
        draw_header(out, question, ctx)?;
        match hint {
            Some(hint) => queue!(out, Print(format!("{hint} > ")))?,
            None => queue!(out, Print("> "))?,
        }
        out.flush()?;

        self.keys.backend_mut().read_line()
    }
}
