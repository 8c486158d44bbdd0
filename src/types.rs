use std::fmt;

/// A position within a text buffer.
///
/// Positions are zero-indexed and column values are counted in grapheme clusters,
/// not bytes or chars. This ensures correct handling of emoji and combining characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in grapheme clusters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    pub const fn with_col(self, col: u32) -> Self {
        Self { line: self.line, col }
    }

    /// Moves left on the same line, stopping at column 0.
    pub const fn left(self, n: u32) -> Self {
        self.with_col(self.col.saturating_sub(n))
    }

    /// Moves right on the same line without any bounds check.
    pub const fn right(self, n: u32) -> Self {
        self.with_col(self.col.saturating_add(n))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// How a cursor moves once an edit has been applied.
///
/// Offsets are relative to where the cursor landed after the edit was
/// reconciled; an absolute diff names the final position outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionDiff {
    Offset { line: i32, col: i32 },
    Absolute(Position),
}

impl PositionDiff {
    pub const fn offset(line: i32, col: i32) -> Self {
        PositionDiff::Offset { line, col }
    }

    pub fn apply(self, pos: Position) -> Position {
        match self {
            PositionDiff::Absolute(p) => p,
            PositionDiff::Offset { line, col } => Position {
                line: (i64::from(pos.line) + i64::from(line)).max(0) as u32,
                col: (i64::from(pos.col) + i64::from(col)).max(0) as u32,
            },
        }
    }
}

/// A range of text defined by start and end positions.
///
/// Ranges are half-open intervals [start, end), meaning the start position
/// is included but the end position is excluded. A range produced by a
/// backwards motion may have `start > end`; call [`Range::normalized`]
/// before treating it as an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// The start position (inclusive).
    pub start: Position,
    /// The end position (exclusive).
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty range at `at`, used for pure insertions.
    pub const fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn normalized(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: Position) -> bool {
        let r = self.normalized();
        r.start <= pos && pos < r.end
    }

    /// True when `other` lies inside `self` (both normalized, bounds inclusive).
    pub fn encloses(&self, other: &Range) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.start <= b.start && b.end <= a.end
    }
}

/// One cursor of a (possibly multi-cursor) editor.
///
/// `start` is the selection anchor and `stop` the active end. Outside of
/// Visual mode the two are equal. `desired_col` remembers the column that
/// vertical motions try to return to; `u32::MAX` means "end of line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub start: Position,
    pub stop: Position,
    pub desired_col: Option<u32>,
}

impl Cursor {
    pub const fn at(pos: Position) -> Self {
        Self {
            start: pos,
            stop: pos,
            desired_col: None,
        }
    }

    /// Collapses the cursor onto `pos`, dropping any selection.
    pub fn collapse(&mut self, pos: Position) {
        self.start = pos;
        self.stop = pos;
    }

    pub fn range(&self) -> Range {
        Range::new(self.start, self.stop)
    }
}

/// The current mode of the engine.
///
/// The same keys perform different actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Normal mode - for navigation and operators.
    #[default]
    Normal,
    /// Insert mode - for typing text.
    Insert,
    /// Visual mode - for selecting text.
    Visual(VisualKind),
    /// Replace mode - typed characters overwrite existing ones.
    Replace,
    /// Command-line mode - entering an ex command or a search pattern.
    CommandLine(Prompt),
    /// Waiting for the delimiter character of a surround operation.
    SurroundInput,
}

impl Mode {
    pub fn is_visual(self) -> bool {
        matches!(self, Mode::Visual(_))
    }

    /// Insert and Replace both place the cursor between characters.
    pub fn is_insert_like(self) -> bool {
        matches!(self, Mode::Insert | Mode::Replace)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual(VisualKind::CharWise) => "VISUAL",
            Mode::Visual(VisualKind::LineWise) => "VISUAL LINE",
            Mode::Visual(VisualKind::BlockWise) => "VISUAL BLOCK",
            Mode::Replace => "REPLACE",
            Mode::CommandLine(_) => "COMMAND",
            Mode::SurroundInput => "SURROUND",
        };
        f.write_str(name)
    }
}

/// The type of visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// Character-wise selection (v).
    CharWise,
    /// Line-wise selection (V).
    LineWise,
    /// Rectangular selection (Ctrl-v).
    BlockWise,
}

/// Which prompt the command line is collecting input for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prompt {
    /// `:` ex command, handed to the host on submit.
    Command,
    /// `/` forward search.
    SearchForward,
    /// `?` backward search.
    SearchBackward,
}

impl Prompt {
    pub fn leader(self) -> char {
        match self {
            Prompt::Command => ':',
            Prompt::SearchForward => '/',
            Prompt::SearchBackward => '?',
        }
    }
}

/// A text selection with its type.
///
/// Selections track both the anchor point and current position,
/// as well as whether the selection is character, line or block-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The anchor of the selection.
    pub start: Position,
    /// The active end of the selection (where the cursor is).
    pub end: Position,
    /// The type of selection.
    pub kind: VisualKind,
}

/// Notifications emitted by the engine for the host to reflect.
///
/// Buffer edits are not part of this list: they are applied directly
/// through [`crate::TextBuffer::apply_edits`] as one atomic batch per
/// command. These commands describe everything else the host has to
/// render or execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The primary cursor moved.
    SetCursor(Position),
    /// The full cursor set changed and holds more than one cursor.
    SetCursors(Vec<Cursor>),
    /// Set or clear the current selection.
    SetSelection(Option<Selection>),
    /// The mode changed.
    ModeChanged(Mode),
    /// Macro recording started (`Some(register)`) or stopped (`None`).
    RecordingChanged(Option<char>),
    /// The command-line text changed while in command-line mode.
    CommandLineChanged(String),
    /// A `:` command line was submitted.
    ExecuteCommandLine(String),
    /// A remapping asked the host to run one of its own commands.
    RunHostCommand(String),
}
