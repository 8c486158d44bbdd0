//! Mutable editor state threaded through every resolve and execute step.

use crate::action::{Action, ActionCaps, CommandKind, InsertEntry, Operator};
use crate::key::{KeyEvent, keys_to_notation};
use crate::matcher::ResolvedAction;
use crate::motion::{FindSpec, SearchSpec};
use crate::transform::{ContentDelta, Queued};
use crate::types::{Cursor, Mode, Position};

/// The command currently being composed, and later archived for `.` and macros.
///
/// Counts of 0 mean "not given". `count` is typed before the operator,
/// `operator_count` between the operator and its motion (`2d3w`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedState {
    pub count: u32,
    pub operator_count: u32,
    pub register_name: Option<char>,
    pub operator: Option<Operator>,
    pub actions_run: Vec<ResolvedAction>,
    pub(crate) transformations: Vec<Queued>,
}

impl RecordedState {
    /// Product of both counts, each defaulting to 1.
    pub fn effective_count(&self) -> u32 {
        self.count.max(1).saturating_mul(self.operator_count.max(1))
    }

    pub fn count_given(&self) -> bool {
        self.count > 0 || self.operator_count > 0
    }

    pub fn count_started(&self) -> bool {
        match self.operator {
            None => self.count > 0,
            Some(_) => self.operator_count > 0,
        }
    }

    pub(crate) fn push_digit(&mut self, digit: u32) {
        let slot = if self.operator.is_some() {
            &mut self.operator_count
        } else {
            &mut self.count
        };
        *slot = slot.saturating_mul(10).saturating_add(digit);
    }

    /// Drops the last typed digit of the count (`<Del>` in Normal mode).
    pub(crate) fn pop_digit(&mut self) {
        let slot = if self.operator.is_some() {
            &mut self.operator_count
        } else {
            &mut self.count
        };
        *slot /= 10;
    }

    /// True when some action of the command changes the buffer.
    pub fn is_repeatable(&self) -> bool {
        self.actions_run
            .iter()
            .any(|a| a.action.caps().contains(ActionCaps::EDITING))
    }

    /// The keys that produced this command, in key notation.
    pub fn notation(&self) -> String {
        self.actions_run
            .iter()
            .map(|a| keys_to_notation(&a.keys))
            .collect()
    }

    /// Text typed during the Insert-mode part of the command.
    pub fn inserted_text(&self) -> String {
        let mut text = String::new();
        for ra in &self.actions_run {
            match ra.action {
                Action::Command(CommandKind::InsertChar | CommandKind::ReplaceTyped) => {
                    if let Some(c) = ra.last_char() {
                        text.push(c);
                    }
                }
                Action::Command(CommandKind::Backspace) => {
                    text.pop();
                }
                _ => {}
            }
        }
        text
    }

    /// Forgets count, register and operator but keeps the action history.
    pub(crate) fn reset_composition(&mut self) {
        self.count = 0;
        self.operator_count = 0;
        self.register_name = None;
        self.operator = None;
    }
}

/// An in-progress macro recording.
#[derive(Debug, Clone)]
pub(crate) struct Recording {
    pub register: char,
    pub actions: Vec<ResolvedAction>,
}

/// Bookkeeping for one stay in Insert or Replace mode.
#[derive(Debug, Clone, Default)]
pub(crate) struct InsertSession {
    pub entry: Option<InsertEntry>,
    pub count: u32,
    /// Typed changes since entering (or since the last arrow key).
    pub changes: Vec<ContentDelta>,
    /// At least one batch of this session reached the buffer.
    pub committed: bool,
    /// The last change opened a line and may have added indentation.
    pub opened_line: bool,
    /// Characters overwritten in Replace mode, `None` for appended ones.
    pub replaced: Vec<Option<char>>,
    /// Entered from a Visual block; extra cursors collapse on exit.
    pub block: bool,
}

/// What a surround operation waits for in SurroundInput mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SurroundPending {
    /// Wrap `[start, end)`; `own_lines` puts the delimiters on lines of their own.
    Add {
        start: Position,
        end: Position,
        own_lines: bool,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct EditorState {
    pub mode: Mode,
    pub cursors: Vec<Cursor>,
    pub recorded: RecordedState,
    pub pending_keys: Vec<KeyEvent>,
    pub last_find: Option<FindSpec>,
    pub last_search: Option<SearchSpec>,
    pub recording: Option<Recording>,
    pub last_macro: Option<char>,
    pub insert: Option<InsertSession>,
    pub command_line: String,
    pub return_to_insert: bool,
    pub surround: Option<SurroundPending>,
    /// Nesting of `.` and `@` replays currently running.
    pub replay_depth: u32,
    /// A motion or command of the current command failed.
    pub aborted: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            cursors: vec![Cursor::at(Position::ZERO)],
            recorded: RecordedState::default(),
            pending_keys: Vec::new(),
            last_find: None,
            last_search: None,
            recording: None,
            last_macro: None,
            insert: None,
            command_line: String::new(),
            return_to_insert: false,
            surround: None,
            replay_depth: 0,
            aborted: false,
        }
    }
}

impl EditorState {
    pub fn primary(&self) -> Cursor {
        self.cursors.first().copied().unwrap_or(Cursor::at(Position::ZERO))
    }

    pub fn set_primary(&mut self, pos: Position) {
        self.cursors.truncate(1);
        match self.cursors.first_mut() {
            Some(c) => {
                c.collapse(pos);
                c.desired_col = None;
            }
            None => self.cursors.push(Cursor::at(pos)),
        }
    }

    /// Clears everything tied to the current document.
    pub fn reset_document(&mut self) {
        let recording = self.recording.take();
        let last_macro = self.last_macro;
        *self = Self::default();
        self.recording = recording;
        self.last_macro = last_macro;
    }
}
