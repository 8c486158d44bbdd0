//! Named registers, numbered delete history, and macro storage.

use std::collections::HashMap;
use std::fmt;

use crate::key::KeyEvent;
use crate::state::RecordedState;
use crate::traits::Clipboard;

/// Whether a register name can be selected with `"x`, `<C-r>x` or `@x`.
pub fn is_valid_register(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '"' | '-' | '*' | '+' | '_' | '.' | ':' | '/')
}

/// How register content goes back into the buffer on put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterMode {
    #[default]
    CharWise,
    /// Whole lines, put on lines of their own.
    LineWise,
    /// A rectangle, one fragment per line.
    BlockWise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterContent {
    Text(String),
    Lines(Vec<String>),
    Macro(RecordedState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    pub content: RegisterContent,
    pub mode: RegisterMode,
}

/// What `@x` executes.
#[derive(Debug, Clone)]
pub(crate) enum MacroBody {
    Actions(RecordedState),
    Keys(Vec<KeyEvent>),
}

impl Register {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: RegisterContent::Text(text.into()),
            mode: RegisterMode::CharWise,
        }
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            content: RegisterContent::Lines(lines),
            mode: RegisterMode::LineWise,
        }
    }

    pub fn block(lines: Vec<String>) -> Self {
        Self {
            content: RegisterContent::Lines(lines),
            mode: RegisterMode::BlockWise,
        }
    }

    pub fn recorded(state: RecordedState) -> Self {
        Self {
            content: RegisterContent::Macro(state),
            mode: RegisterMode::CharWise,
        }
    }

    /// Flat text; a macro reads back as its key notation.
    pub fn as_text(&self) -> String {
        match &self.content {
            RegisterContent::Text(s) => s.clone(),
            RegisterContent::Lines(lines) => lines.join("\n"),
            RegisterContent::Macro(state) => state.notation(),
        }
    }

    /// Content split into lines.
    pub fn as_lines(&self) -> Vec<String> {
        match &self.content {
            RegisterContent::Lines(lines) => lines.clone(),
            _ => self.as_text().split('\n').map(str::to_string).collect(),
        }
    }

    /// Text for `<C-r>` in Insert mode; whole lines keep their line break.
    pub fn insertable_text(&self) -> String {
        let mut text = self.as_text();
        if self.mode == RegisterMode::LineWise {
            text.push('\n');
        }
        text
    }

    pub fn is_empty(&self) -> bool {
        match &self.content {
            RegisterContent::Text(s) => s.is_empty(),
            RegisterContent::Lines(lines) => lines.is_empty(),
            RegisterContent::Macro(state) => state.actions_run.is_empty(),
        }
    }

    /// Combines the writes of several cursors into one register.
    pub(crate) fn merge(parts: Vec<Register>) -> Option<Register> {
        let mut iter = parts.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, next| acc.append(next)))
    }

    /// `"Ax` semantics: the result keeps the mode of the more line-like side.
    fn append(self, other: Register) -> Register {
        match (self.content, other.content) {
            (RegisterContent::Macro(mut a), RegisterContent::Macro(b)) => {
                a.actions_run.extend(b.actions_run);
                Register::recorded(a)
            }
            (a, b) => {
                let a = Register {
                    content: a,
                    mode: self.mode,
                };
                let b = Register {
                    content: b,
                    mode: other.mode,
                };
                if a.mode == RegisterMode::CharWise && b.mode == RegisterMode::CharWise {
                    Register::text(a.as_text() + &b.as_text())
                } else {
                    let mut lines = a.as_lines();
                    lines.extend(b.as_lines());
                    let mode = if a.mode == RegisterMode::BlockWise && b.mode == RegisterMode::BlockWise {
                        RegisterMode::BlockWise
                    } else {
                        RegisterMode::LineWise
                    };
                    Register {
                        content: RegisterContent::Lines(lines),
                        mode,
                    }
                }
            }
        }
    }

    pub(crate) fn macro_body(&self) -> MacroBody {
        match &self.content {
            RegisterContent::Macro(state) => MacroBody::Actions(state.clone()),
            _ => MacroBody::Keys(self.as_text().chars().map(KeyEvent::from).collect()),
        }
    }
}

/// Why a register is being written; decides `"0` and the numbered shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreKind {
    Yank,
    Delete,
}

/// All registers of one engine.
///
/// `"` is the unnamed register, `0` the last yank and `1`-`9` the delete
/// history. `*` and `+` go through the clipboard collaborator when one is
/// attached. `.`, `:` and `/` are read-only from the user's side.
#[derive(Default)]
pub struct Registers {
    map: HashMap<char, Register>,
    clipboard: Option<Box<dyn Clipboard>>,
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registers")
            .field("map", &self.map)
            .field("clipboard", &self.clipboard.is_some())
            .finish()
    }
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clipboard(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            map: HashMap::new(),
            clipboard: Some(clipboard),
        }
    }

    pub fn set_clipboard(&mut self, clipboard: Option<Box<dyn Clipboard>>) {
        self.clipboard = clipboard;
    }

    /// Reads a register. `None` means empty: putting it is a no-op.
    pub fn get(&mut self, name: char) -> Option<Register> {
        match name {
            '_' => None,
            '*' | '+' => {
                let from_clipboard = self.clipboard.as_mut().and_then(|c| c.get());
                match from_clipboard {
                    Some(text) => Some(clipboard_register(text)),
                    None => self.map.get(&name).cloned(),
                }
            }
            '.' => match self.map.get(&'.') {
                Some(Register {
                    content: RegisterContent::Macro(state),
                    ..
                }) => Some(Register::text(state.inserted_text())),
                other => other.cloned(),
            },
            c => self.map.get(&c.to_ascii_lowercase()).cloned(),
        }
    }

    /// Read-only view without consulting the clipboard.
    pub fn peek(&self, name: char) -> Option<&Register> {
        self.map.get(&name.to_ascii_lowercase())
    }

    /// Writes a register directly, bypassing yank and delete side effects.
    pub fn set(&mut self, name: char, register: Register) {
        tracing::debug!("Register '{}' set ({:?})", name, register.mode);
        self.map.insert(name, register);
    }

    /// The last completed repeatable command.
    pub fn last_command(&self) -> Option<&RecordedState> {
        match self.map.get(&'.') {
            Some(Register {
                content: RegisterContent::Macro(state),
                ..
            }) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn set_last_command(&mut self, state: RecordedState) {
        self.map.insert('.', Register::recorded(state));
    }

    /// Stores the result of a yank or delete.
    pub(crate) fn store(&mut self, name: Option<char>, register: Register, kind: StoreKind) {
        if name == Some('_') {
            return;
        }
        tracing::debug!(
            "Register write {:?} ({:?}, {:?})",
            name.unwrap_or('"'),
            kind,
            register.mode
        );
        match name {
            Some(upper @ 'A'..='Z') => {
                let lower = upper.to_ascii_lowercase();
                let merged = match self.map.remove(&lower) {
                    Some(existing) => existing.append(register.clone()),
                    None => register.clone(),
                };
                self.map.insert(lower, merged.clone());
                self.map.insert('"', merged);
            }
            Some(c @ ('*' | '+')) => {
                if let Some(clipboard) = self.clipboard.as_mut() {
                    let mut text = register.as_text();
                    if register.mode == RegisterMode::LineWise {
                        text.push('\n');
                    }
                    clipboard.set(text);
                }
                self.map.insert(c, register.clone());
                self.map.insert('"', register.clone());
            }
            Some(c) if c.is_ascii_alphanumeric() || c == '-' => {
                self.map.insert(c, register.clone());
                self.map.insert('"', register.clone());
            }
            _ => {
                self.map.insert('"', register.clone());
            }
        }
        match kind {
            StoreKind::Yank if matches!(name, None | Some('"')) => {
                self.map.insert('0', register);
            }
            StoreKind::Yank => {}
            StoreKind::Delete => {
                for n in (1..9u32).rev() {
                    let from = char::from_digit(n, 10).unwrap_or('1');
                    let to = char::from_digit(n + 1, 10).unwrap_or('9');
                    if let Some(r) = self.map.remove(&from) {
                        self.map.insert(to, r);
                    }
                }
                self.map.insert('1', register);
            }
        }
    }

    /// Starts or extends the macro in `name` (uppercase appends).
    pub(crate) fn store_macro(&mut self, name: char, state: RecordedState) {
        let lower = name.to_ascii_lowercase();
        let register = if name.is_ascii_uppercase() {
            match self.map.remove(&lower) {
                Some(existing) => existing.append(Register::recorded(state)),
                None => Register::recorded(state),
            }
        } else {
            Register::recorded(state)
        };
        tracing::debug!("Macro stored in '{}': {}", lower, register.as_text());
        self.map.insert(lower, register);
    }

    pub(crate) fn macro_body(&mut self, name: char) -> Option<MacroBody> {
        self.get(name).filter(|r| !r.is_empty()).map(|r| r.macro_body())
    }
}

fn clipboard_register(text: String) -> Register {
    match text.strip_suffix('\n') {
        Some(body) => Register::lines(body.split('\n').map(str::to_string).collect()),
        None => Register::text(text),
    }
}
