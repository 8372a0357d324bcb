//! Key identities and the key dispatcher.
//!
//! The dispatcher owns the terminal [`Backend`], reads one key at a time from
//! it, and runs every handler registered for that exact key, in registration
//! order. Handlers get the renderer's state as an explicit argument.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::trace;

use crate::error::{Error, Result};
use crate::terminal::Backend;

/// A key identity. Multi-byte escape sequences map to a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Backspace,
    Escape,
    /// Ctrl-C
    Interrupt,
    Char(char),
}

impl Key {
    /// Maps a raw input chunk (as a terminal in byte mode delivers it) to a key.
    #[must_use]
    pub fn from_sequence(sequence: &str) -> Option<Key> {
        match sequence {
            "\u{1b}[A" => Some(Key::Up),
            "\u{1b}[B" => Some(Key::Down),
            "\u{1b}[C" => Some(Key::Right),
            "\u{1b}[D" => Some(Key::Left),
            "\r" | "\n" => Some(Key::Enter),
            " " => Some(Key::Space),
            "\u{7f}" | "\u{8}" => Some(Key::Backspace),
            "\u{3}" => Some(Key::Interrupt),
            "\u{1b}" => Some(Key::Escape),
            _ => {
                let mut chars = sequence.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    #[must_use]
    pub fn from_event(event: &KeyEvent) -> Option<Key> {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Key::Interrupt)
            }
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Char(' ') => Some(Key::Space),
            KeyCode::Char(c) => Some(Key::Char(c)),
            _ => None,
        }
    }
}

pub type KeyHandler<C> = Box<dyn FnMut(&mut C)>;

/// Returned by [`KeyDispatcher::register`], used to unregister the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(usize);

pub struct KeyDispatcher<B: Backend, C> {
    backend: B,
    interactive: bool,
    raw_mode: bool,
    active: bool,
    next_id: usize,
    handlers: HashMap<Key, Vec<(HandlerId, KeyHandler<C>)>>,
}

impl<B: Backend, C> KeyDispatcher<B, C> {
    /// Wraps `backend`. With `interactive` false the dispatcher never touches
    /// the terminal mode.
    pub fn new(backend: B, interactive: bool) -> Self {
        Self {
            backend,
            interactive,
            raw_mode: false,
            active: true,
            next_id: 0,
            handlers: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, key: Key, handler: F) -> HandlerId
    where
        F: FnMut(&mut C) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(key)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes one handler. Returns false if it was not registered under `key`.
    pub fn unregister(&mut self, key: Key, id: HandlerId) -> bool {
        let Some(handlers) = self.handlers.get_mut(&key) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        before != handlers.len()
    }

    pub fn clear_all(&mut self) {
        self.handlers.clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Suppresses dispatch without releasing the terminal. The interrupt key still fires.
    pub fn pause(&mut self) {
        self.active = false;
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        !self.active
    }

    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Switches the terminal to byte-at-a-time delivery and resumes dispatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed.
    pub fn enter_raw_mode(&mut self) -> Result<()> {
        if self.interactive && !self.raw_mode {
            self.backend.enable_raw_mode()?;
            self.raw_mode = true;
        }
        self.resume();
        Ok(())
    }

    /// Returns the terminal to line mode and pauses dispatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be restored.
    pub fn leave_raw_mode(&mut self) -> Result<()> {
        if self.raw_mode {
            self.backend.disable_raw_mode()?;
            self.raw_mode = false;
        }
        self.pause();
        Ok(())
    }

    /// Blocks until the next key arrives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfInput`] when the input is exhausted, or an I/O error.
    pub fn next_key(&mut self) -> Result<Key> {
        self.backend.read_key()
    }

    /// Runs every handler registered for `key` against `context`.
    ///
    /// # Errors
    ///
    /// The interrupt key restores the terminal and returns [`Error::Interrupted`],
    /// whether or not dispatch is paused.
    pub fn dispatch(&mut self, key: Key, context: &mut C) -> Result<()> {
        if key == Key::Interrupt {
            self.destroy()?;
            return Err(Error::Interrupted);
        }

        if !self.active {
            trace!("Dispatch paused, dropping {key:?}");
            return Ok(());
        }

        if let Some(handlers) = self.handlers.get_mut(&key) {
            trace!("Dispatching {key:?} to {} handler(s)", handlers.len());
            for (_, handler) in handlers.iter_mut() {
                handler(context);
            }
        }

        Ok(())
    }

    /// Restores the terminal mode and drops all handlers. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be restored.
    pub fn destroy(&mut self) -> Result<()> {
        self.handlers.clear();
        self.active = false;
        if self.raw_mode {
            self.raw_mode = false;
            self.backend.disable_raw_mode()?;
        }
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: Backend, C> Drop for KeyDispatcher<B, C> {
    fn drop(&mut self) {
        // Restore the terminal on drop
        let _ = self.destroy();
    }
}
