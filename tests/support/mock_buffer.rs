use modal_engine::error::BufferError;
use modal_engine::traits::{EditBatch, TextBuffer, TextOps};
use modal_engine::types::Position;
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// Rope-backed buffer with a snapshot undo stack.
pub struct MockBuffer {
    rope: Rope,
    content_type: String,
    undo: Vec<(Rope, Position)>,
    redo: Vec<(Rope, Position)>,
    pub batches: usize,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            content_type: "plaintext".to_string(),
            undo: Vec::new(),
            redo: Vec::new(),
            batches: 0,
        }
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(&lines.join("\n"))
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|l| self.line(l)).collect()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    fn char_index(&self, pos: Position) -> Result<usize, BufferError> {
        let out_of_bounds = BufferError::OutOfBounds {
            line: pos.line,
            col: pos.col,
        };
        if pos.line as usize >= self.rope.len_lines() {
            return Err(out_of_bounds);
        }
        let line = self.line(pos.line);
        let mut graphemes = line.grapheme_indices(true);
        let byte = match graphemes.nth(pos.col as usize) {
            Some((b, _)) => b,
            None if pos.col as usize == line.graphemes(true).count() => line.len(),
            None => return Err(out_of_bounds),
        };
        Ok(self.rope.line_to_char(pos.line as usize) + line[..byte].chars().count())
    }
}

impl TextOps for MockBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line(&self, line: u32) -> String {
        if line as usize >= self.rope.len_lines() {
            return String::new();
        }
        let mut s = self.rope.line(line as usize).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl TextBuffer for MockBuffer {
    fn apply_edits(&mut self, batch: &EditBatch) -> Result<(), BufferError> {
        let before = self.rope.clone();
        for edit in &batch.edits {
            let start = self.char_index(edit.range.start)?;
            let end = self.char_index(edit.range.end)?;
            if end < start {
                return Err(BufferError::Overlap);
            }
            self.rope.remove(start..end);
            self.rope.insert(start, &edit.text);
        }
        if !batch.merge_with_previous || self.undo.is_empty() {
            self.undo.push((before, batch.cursor_before));
        }
        self.redo.clear();
        self.batches += 1;
        Ok(())
    }

    fn undo(&mut self) -> Option<Position> {
        let (rope, cursor) = self.undo.pop()?;
        let current = std::mem::replace(&mut self.rope, rope);
        self.redo.push((current, cursor));
        Some(cursor)
    }

    fn redo(&mut self) -> Option<Position> {
        let (rope, cursor) = self.redo.pop()?;
        let current = std::mem::replace(&mut self.rope, rope);
        self.undo.push((current, cursor));
        Some(cursor)
    }
}
