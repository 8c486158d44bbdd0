//! Grapheme-aware helpers shared by motions, text objects and operators.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

use crate::traits::TextOps;
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    Blank,
    Word,
    Punct,
}

pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

pub(crate) fn is_keyword(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word class of `c`; WORD motions (`big`) only split on blanks.
pub(crate) fn classify(c: char, big: bool) -> CharClass {
    if is_blank(c) {
        CharClass::Blank
    } else if big || is_keyword(c) {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// Byte offset of grapheme column `col`, or `s.len()` past the end.
pub(crate) fn byte_of_col(s: &str, col: u32) -> usize {
    s.grapheme_indices(true)
        .nth(col as usize)
        .map_or(s.len(), |(i, _)| i)
}

pub(crate) fn col_of_byte(s: &str, byte: usize) -> u32 {
    s.grapheme_indices(true).take_while(|(i, _)| *i < byte).count() as u32
}

pub(crate) fn grapheme_len(s: &str) -> u32 {
    s.graphemes(true).count() as u32
}

/// Where the cursor ends up after inserting `text` at `at`.
pub(crate) fn end_after_insert(at: Position, text: &str) -> Position {
    match text.rsplit_once('\n') {
        None => at.right(grapheme_len(text)),
        Some((_, tail)) => Position::new(
            at.line + text.matches('\n').count() as u32,
            grapheme_len(tail),
        ),
    }
}

pub(crate) fn leading_whitespace(s: &str) -> &str {
    let end = s.len() - s.trim_start_matches([' ', '\t']).len();
    &s[..end]
}

/// Display width of an indentation string with tabs expanded.
pub(crate) fn indent_width(indent: &str, tab: u32) -> u32 {
    let tab = tab.max(1);
    indent.chars().fold(0, |w, c| {
        if c == '\t' {
            (w / tab + 1) * tab
        } else {
            w + 1
        }
    })
}

pub(crate) fn make_indent(width: u32, tab: u32, expandtab: bool) -> String {
    if expandtab || tab == 0 {
        " ".repeat(width as usize)
    } else {
        let mut s = "\t".repeat((width / tab) as usize);
        s.push_str(&" ".repeat((width % tab) as usize));
        s
    }
}

/// Cached, read-only view of a buffer's lines as grapheme-leading chars.
///
/// Every column holds exactly one char so column arithmetic stays in
/// grapheme units. The position `(line, len)` is the line break (reported
/// as `'\n'`) on every line except the last, where it is the document end.
pub(crate) struct Doc<'a, T: TextOps + ?Sized> {
    buf: &'a T,
    line_count: u32,
    cache: RefCell<HashMap<u32, Rc<[char]>>>,
}

impl<'a, T: TextOps + ?Sized> Doc<'a, T> {
    pub(crate) fn new(buf: &'a T) -> Self {
        Self {
            buf,
            line_count: buf.line_count().max(1),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn buf(&self) -> &'a T {
        self.buf
    }

    pub(crate) fn line_count(&self) -> u32 {
        self.line_count
    }

    pub(crate) fn last_line(&self) -> u32 {
        self.line_count - 1
    }

    pub(crate) fn chars(&self, line: u32) -> Rc<[char]> {
        if let Some(c) = self.cache.borrow().get(&line) {
            return Rc::clone(c);
        }
        let chars: Rc<[char]> = if line < self.line_count {
            self.buf
                .line(line)
                .graphemes(true)
                .filter_map(|g| g.chars().next())
                .collect()
        } else {
            Rc::from(Vec::new())
        };
        self.cache.borrow_mut().insert(line, Rc::clone(&chars));
        chars
    }

    pub(crate) fn text(&self, line: u32) -> String {
        self.buf.line(line)
    }

    pub(crate) fn len(&self, line: u32) -> u32 {
        self.chars(line).len() as u32
    }

    /// Highest column the Normal-mode cursor may occupy.
    pub(crate) fn max_col(&self, line: u32) -> u32 {
        self.len(line).saturating_sub(1)
    }

    pub(crate) fn is_empty_line(&self, line: u32) -> bool {
        self.len(line) == 0
    }

    pub(crate) fn is_blank_line(&self, line: u32) -> bool {
        self.chars(line).iter().all(|c| is_blank(*c))
    }

    pub(crate) fn first_non_blank(&self, line: u32) -> u32 {
        let chars = self.chars(line);
        chars
            .iter()
            .position(|c| !is_blank(*c))
            .unwrap_or(chars.len()) as u32
    }

    pub(crate) fn doc_end(&self) -> Position {
        let last = self.last_line();
        Position::new(last, self.len(last))
    }

    pub(crate) fn char_at(&self, pos: Position) -> Option<char> {
        if pos.line >= self.line_count {
            return None;
        }
        let chars = self.chars(pos.line);
        match chars.get(pos.col as usize) {
            Some(c) => Some(*c),
            None if pos.line < self.last_line() => Some('\n'),
            None => None,
        }
    }

    /// Next position in reading order, treating line breaks as a character.
    pub(crate) fn advance(&self, pos: Position) -> Option<Position> {
        if pos >= self.doc_end() {
            return None;
        }
        if pos.col < self.len(pos.line) {
            Some(pos.right(1))
        } else {
            Some(Position::new(pos.line + 1, 0))
        }
    }

    pub(crate) fn retreat(&self, pos: Position) -> Option<Position> {
        if pos.col > 0 {
            Some(Position::new(
                pos.line,
                pos.col.min(self.len(pos.line) + 1) - 1,
            ))
        } else if pos.line > 0 {
            Some(Position::new(pos.line - 1, self.len(pos.line - 1)))
        } else {
            None
        }
    }

    /// Clamps to a real position, allowing the line-break column.
    pub(crate) fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        Position::new(line, pos.col.min(self.len(line)))
    }

    /// Clamps for a cursor resting on a character.
    pub(crate) fn clamp_normal(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        Position::new(line, pos.col.min(self.max_col(line)))
    }

    /// Exclusive end just past the inclusive position `pos`, wrapping
    /// onto the next line when `pos` is a line break.
    pub(crate) fn after(&self, pos: Position) -> Position {
        if pos.col >= self.len(pos.line) && pos.line < self.last_line() {
            Position::new(pos.line + 1, 0)
        } else {
            pos.right(1)
        }
    }
}

/// The whole document flattened into one char sequence with `'\n'`
/// between lines, for objects that cross line boundaries freely.
pub(crate) struct Flat {
    pub(crate) chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl Flat {
    pub(crate) fn new<T: TextOps + ?Sized>(doc: &Doc<'_, T>) -> Self {
        let mut chars = Vec::new();
        let mut line_starts = Vec::with_capacity(doc.line_count() as usize);
        for line in 0..doc.line_count() {
            if line > 0 {
                chars.push('\n');
            }
            line_starts.push(chars.len());
            chars.extend(doc.chars(line).iter().copied());
        }
        Self { chars, line_starts }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn offset(&self, pos: Position) -> usize {
        let line = (pos.line as usize).min(self.line_starts.len().saturating_sub(1));
        let start = self.line_starts.get(line).copied().unwrap_or(0);
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.chars.len(), |next| next - 1);
        (start + pos.col as usize).min(end)
    }

    pub(crate) fn pos(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        Position::new(line as u32, (offset - self.line_starts[line]) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lines(Vec<&'static str>);

    impl TextOps for Lines {
        fn line_count(&self) -> u32 {
            self.0.len() as u32
        }
        fn line(&self, line: u32) -> String {
            self.0.get(line as usize).copied().unwrap_or_default().to_string()
        }
    }

    #[test]
    fn advance_walks_through_line_breaks() {
        let buf = Lines(vec!["ab", "", "c"]);
        let doc = Doc::new(&buf);
        let mut p = Position::ZERO;
        let mut seen = vec![doc.char_at(p)];
        while let Some(next) = doc.advance(p) {
            p = next;
            seen.push(doc.char_at(p));
        }
        assert_eq!(
            seen,
            vec![Some('a'), Some('b'), Some('\n'), Some('\n'), Some('c'), None]
        );
    }

    #[test]
    fn retreat_mirrors_advance() {
        let buf = Lines(vec!["ab", "c"]);
        let doc = Doc::new(&buf);
        assert_eq!(doc.retreat(Position::new(1, 0)), Some(Position::new(0, 2)));
        assert_eq!(doc.retreat(Position::ZERO), None);
    }

    #[test]
    fn flat_offsets_round_trip() {
        let buf = Lines(vec!["one", "", "three"]);
        let doc = Doc::new(&buf);
        let flat = Flat::new(&doc);
        for pos in [Position::new(0, 2), Position::new(1, 0), Position::new(2, 4)] {
            assert_eq!(flat.pos(flat.offset(pos)), pos);
        }
        assert_eq!(flat.chars[3], '\n');
    }

    #[test]
    fn graphemes_count_as_one_column() {
        let s = "e\u{301}x";
        assert_eq!(grapheme_len(s), 2);
        assert_eq!(byte_of_col(s, 1), 3);
        assert_eq!(col_of_byte(s, 3), 1);
    }

    #[test]
    fn indent_width_expands_tabs() {
        assert_eq!(indent_width("\t  ", 4), 6);
        assert_eq!(make_indent(6, 4, false), "\t  ");
        assert_eq!(make_indent(6, 4, true), "      ");
    }
}
