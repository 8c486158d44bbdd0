use unicode_segmentation::UnicodeSegmentation;

use crate::error::BufferError;
use crate::types::{Position, Range};

/// Read access to the host's document.
///
/// Lines are addressed without their terminating newline; columns are
/// grapheme clusters. Everything beyond `line_count` and `line` has a
/// default built on those two.
pub trait TextOps {
    // Basic queries
    fn line_count(&self) -> u32;
    fn line(&self, line: u32) -> String;

    fn line_len(&self, line: u32) -> u32 {
        self.line(line).graphemes(true).count() as u32
    }

    /// Width of a tab stop, used for indent commands.
    fn tab_width(&self) -> u32 {
        4
    }

    /// Language of the document; `"plaintext"` disables whitespace stripping on `<Esc>`.
    fn content_type(&self) -> &str {
        "plaintext"
    }

    fn clamp(&self, pos: Position) -> Position {
        let last_line = self.line_count().saturating_sub(1);
        let line = pos.line.min(last_line);
        let col = pos.col.min(self.line_len(line));
        Position { line, col }
    }

    // Text extraction, newline-joined across lines
    fn slice_to_string(&self, range: Range) -> String {
        let r = range.normalized();
        let start = self.clamp(r.start);
        let mut end = r.end;
        if end.line >= self.line_count() {
            let last = self.line_count().saturating_sub(1);
            end = Position::new(last, self.line_len(last));
        }
        let mut out = String::new();
        for line in start.line..=end.line {
            let text = self.line(line);
            let from = if line == start.line { start.col } else { 0 };
            let to = if line == end.line { end.col } else { u32::MAX };
            out.extend(
                text.graphemes(true)
                    .skip(from as usize)
                    .take(to.saturating_sub(from) as usize),
            );
            if line != end.line {
                out.push('\n');
            }
        }
        out
    }
}

/// A single replacement: `range` (in the document as it was before the
/// batch) becomes `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range,
    pub text: String,
}

/// All edits produced by one command, applied atomically.
///
/// Edits are listed in application order and each range is already
/// expressed in the coordinates left by the edits before it.
/// `merge_with_previous` asks the host to fold this batch into the
/// previous undo step (successive keystrokes of one insert session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBatch {
    pub edits: Vec<Edit>,
    pub cursor_before: Position,
    pub merge_with_previous: bool,
}

/// A mutable document. The engine never retains a reference across events.
pub trait TextBuffer: TextOps {
    fn apply_edits(&mut self, batch: &EditBatch) -> Result<(), BufferError>;

    /// Reverts the last undo step, returning where the cursor should go.
    fn undo(&mut self) -> Option<Position> {
        None
    }

    fn redo(&mut self) -> Option<Position> {
        None
    }
}

pub trait Clipboard {
    fn get(&mut self) -> Option<String>;
    fn set(&mut self, text: String);
}

/// The operating-system clipboard.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(inner) => Some(Self { inner }),
            Err(e) => {
                tracing::warn!("System clipboard unavailable: {}", e);
                None
            }
        }
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn get(&mut self) -> Option<String> {
        self.inner.get_text().ok()
    }

    fn set(&mut self, text: String) {
        if let Err(e) = self.inner.set_text(text) {
            tracing::warn!("Failed to write system clipboard: {}", e);
        }
    }
}
