//! Terminal backends.
//!
//! [`Backend`] is the one place the engine touches the outside world: reading
//! keys and lines, toggling raw mode, and writing the screen.
//! [`CrosstermBackend`] drives a real terminal; [`ScriptedBackend`] replays
//! queued input and captures output in memory.

use std::collections::VecDeque;
use std::io::{stdin, stdout, Stdout, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use log::warn;

use crate::error::{Error, Result};
use crate::keys::Key;

pub trait Backend {
    type Writer: Write;

    /// Blocks until the next key press.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfInput`] when no more input will arrive.
    fn read_key(&mut self) -> Result<Key>;

    /// Reads one line, without its trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfInput`] when no more input will arrive.
    fn read_line(&mut self) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed.
    fn enable_raw_mode(&mut self) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed.
    fn disable_raw_mode(&mut self) -> Result<()>;

    fn writer(&mut self) -> &mut Self::Writer;
}

pub struct CrosstermBackend {
    stdout: Stdout,
}

impl CrosstermBackend {
    #[must_use]
    pub fn new() -> Self {
        Self { stdout: stdout() }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CrosstermBackend {
    type Writer = Stdout;

    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                // Only presses, some platforms also report releases
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(key) = Key::from_event(&key_event) {
                    return Ok(key);
                }
            }
        }
    }

    fn read_line(&mut self) -> Result<String> {
        self.stdout.flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            return Err(Error::EndOfInput);
        }

        Ok(input.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn writer(&mut self) -> &mut Stdout {
        &mut self.stdout
    }
}

/// Replays queued keys and lines; everything written goes to an in-memory buffer.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    keys: VecDeque<Key>,
    lines: VecDeque<String>,
    output: Vec<u8>,
    raw_mode: bool,
    inputs_consumed: usize,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.extend(keys);
        self
    }

    /// Queues keys given as raw byte sequences, e.g. `"\u{1b}[B"` for down.
    /// Unrecognized sequences are skipped.
    #[must_use]
    pub fn with_sequences<'a>(mut self, sequences: impl IntoIterator<Item = &'a str>) -> Self {
        for sequence in sequences {
            match Key::from_sequence(sequence) {
                Some(key) => self.keys.push_back(key),
                None => warn!("Skipping unrecognized key sequence {sequence:?}"),
            }
        }
        self
    }

    #[must_use]
    pub fn with_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Everything written so far, escape sequences included.
    #[must_use]
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Number of keys and lines read so far.
    #[must_use]
    pub fn inputs_consumed(&self) -> usize {
        self.inputs_consumed
    }

    #[must_use]
    pub fn pending_inputs(&self) -> usize {
        self.keys.len() + self.lines.len()
    }
}

impl Backend for ScriptedBackend {
    type Writer = Vec<u8>;

    fn read_key(&mut self) -> Result<Key> {
        let key = self.keys.pop_front().ok_or(Error::EndOfInput)?;
        self.inputs_consumed += 1;
        Ok(key)
    }

    fn read_line(&mut self) -> Result<String> {
        let line = self.lines.pop_front().ok_or(Error::EndOfInput)?;
        self.inputs_consumed += 1;
        Ok(line)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = false;
        Ok(())
    }

    fn writer(&mut self) -> &mut Vec<u8> {
        &mut self.output
    }
}
