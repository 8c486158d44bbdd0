//! Insert and Replace mode editing.

use crate::action::InsertEntry;
use crate::engine::{Engine, Step};
use crate::motion::Motion;
use crate::text::{CharClass, Doc, byte_of_col, classify, grapheme_len, indent_width, leading_whitespace, make_indent};
use crate::traits::TextOps;
use crate::transform::{ContentDelta, Transformation};
use crate::types::{Mode, Position, PositionDiff, Range};

impl Engine {
    /// Queues `text` at cursor `i`. The primary cursor also records it for
    /// count repetition on `<Esc>`.
    pub(crate) fn type_text(&mut self, i: usize, text: String, opens_line: bool) {
        let pos = self.state.cursors[i].stop;
        if i == 0
            && let Some(session) = self.state.insert.as_mut()
        {
            session.changes.push(ContentDelta::Insert(text.clone()));
            session.opened_line = opens_line;
        }
        self.queue(i, Transformation::insert(pos, text));
    }

    fn record_delete_left(&mut self, i: usize, n: u32) {
        if i == 0
            && let Some(session) = self.state.insert.as_mut()
        {
            session.changes.push(ContentDelta::DeleteLeft(n));
            session.opened_line = false;
        }
    }

    pub(crate) fn insert_char<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, c: char) {
        let pos = self.state.cursors[i].stop;
        match c {
            '\n' => {
                let indent = if self.config.autoindent {
                    let text = doc.text(pos.line);
                    let before = &text[..byte_of_col(&text, pos.col)];
                    leading_whitespace(before).to_string()
                } else {
                    String::new()
                };
                self.type_text(i, format!("\n{indent}"), true);
            }
            '\t' if self.config.expandtab => {
                let text = doc.text(pos.line);
                let width = indent_width(&text[..byte_of_col(&text, pos.col)], self.config.tabstop);
                let tab = self.config.tabstop.max(1);
                self.type_text(i, " ".repeat((tab - width % tab) as usize), false);
            }
            c => self.type_text(i, c.to_string(), false),
        }
    }

    pub(crate) fn backspace<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize) -> Step {
        let pos = self.state.cursors[i].stop;
        if pos.col == 0 {
            if pos.line > 0 {
                self.queue(
                    i,
                    Transformation::DeleteText {
                        at: pos,
                        diff: PositionDiff::offset(0, 0),
                    },
                );
                self.record_delete_left(i, 1);
            }
            return Step::Done;
        }
        let text = doc.text(pos.line);
        let before = &text[..byte_of_col(&text, pos.col)];
        let sw = self.config.shiftwidth.max(1);
        let n = if self.config.expandtab && before.chars().all(|c| c == ' ') {
            (pos.col - 1) % sw + 1
        } else {
            1
        };
        self.queue(i, Transformation::delete(Range::new(pos.left(n), pos)));
        self.record_delete_left(i, n);
        Step::Done
    }

    /// `<BS>` in Replace mode puts back what was overwritten.
    pub(crate) fn replace_backspace(&mut self, i: usize) -> Step {
        let pos = self.state.cursors[i].stop;
        if pos.col == 0 {
            return Step::Done;
        }
        let replaced = match self.state.insert.as_mut() {
            Some(session) if i == 0 => session.replaced.pop(),
            _ => None,
        };
        let range = Range::new(pos.left(1), pos);
        match replaced {
            Some(Some(old)) => self.queue(
                i,
                Transformation::replace(range, old.to_string()).with_diff(PositionDiff::offset(0, -1)),
            ),
            Some(None) => self.queue(i, Transformation::delete(range)),
            None => self.state.cursors[i].collapse(pos.left(1)),
        }
        Step::Done
    }

    pub(crate) fn delete_forward<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize) -> Step {
        let pos = self.state.cursors[i].stop;
        if pos < doc.doc_end() {
            self.queue(i, Transformation::delete(Range::new(pos, doc.after(pos))));
        }
        Step::Done
    }

    /// `<C-w>`: blanks before the cursor, then one run of word or punctuation.
    pub(crate) fn delete_word_before<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize) -> Step {
        let pos = self.state.cursors[i].stop;
        if pos.col == 0 {
            return self.backspace(doc, i);
        }
        let chars = doc.chars(pos.line);
        let mut col = (pos.col as usize).min(chars.len());
        while col > 0 && classify(chars[col - 1], false) == CharClass::Blank {
            col -= 1;
        }
        if col > 0 {
            let cls = classify(chars[col - 1], false);
            while col > 0 && classify(chars[col - 1], false) == cls {
                col -= 1;
            }
        }
        let n = pos.col - col as u32;
        self.queue(i, Transformation::delete(Range::new(pos.with_col(col as u32), pos)));
        self.record_delete_left(i, n);
        Step::Done
    }

    /// `<C-u>`: back to the indentation, or to column 0 from inside it.
    pub(crate) fn delete_to_line_start<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize) -> Step {
        let pos = self.state.cursors[i].stop;
        if pos.col == 0 {
            return self.backspace(doc, i);
        }
        let fnb = doc.first_non_blank(pos.line);
        let col = if pos.col > fnb { fnb } else { 0 };
        self.queue(i, Transformation::delete(Range::new(pos.with_col(col), pos)));
        self.record_delete_left(i, pos.col - col);
        Step::Done
    }

    /// `<C-t>` and `<C-d>`.
    pub(crate) fn shift_current_line<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        outdent: bool,
    ) -> Step {
        let pos = self.state.cursors[i].stop;
        let text = doc.text(pos.line);
        let lead = leading_whitespace(&text);
        let lead_len = grapheme_len(lead);
        let width = indent_width(lead, self.config.tabstop);
        let sw = self.config.shiftwidth;
        let new_width = if outdent {
            width.saturating_sub(sw)
        } else {
            width + sw
        };
        let new = make_indent(new_width, self.config.tabstop, self.config.expandtab);
        let new_len = grapheme_len(&new);
        if new == lead {
            return Step::Done;
        }
        let col = if pos.col >= lead_len {
            pos.col - lead_len + new_len
        } else {
            pos.col.min(new_len)
        };
        let range = Range::new(pos.with_col(0), pos.with_col(lead_len));
        self.queue(
            i,
            Transformation::replace(range, new).with_diff(PositionDiff::Absolute(pos.with_col(col))),
        );
        Step::Done
    }

    /// `<C-e>` and `<C-y>`: the character in the same column below or above.
    pub(crate) fn copy_from_line<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        from_below: bool,
    ) -> Step {
        let pos = self.state.cursors[i].stop;
        let source = if from_below {
            (pos.line < doc.last_line()).then_some(pos.line + 1)
        } else {
            pos.line.checked_sub(1)
        };
        let ch = source.and_then(|line| doc.chars(line).get(pos.col as usize).copied());
        match ch {
            Some(c) => self.type_text(i, c.to_string(), false),
            None => self.state.aborted = true,
        }
        Step::Done
    }

    /// Arrow keys move without leaving Insert mode but start a new undo step.
    pub(crate) fn insert_arrow<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        motion: Motion,
    ) -> Step {
        let c = self.state.cursors[i];
        let pos = c.stop;
        let (target, desired) = match motion {
            Motion::Left => (pos.left(1), None),
            Motion::Right => (pos.with_col((pos.col + 1).min(doc.len(pos.line))), None),
            Motion::Up | Motion::Down => {
                let line = if motion == Motion::Up {
                    pos.line.saturating_sub(1)
                } else {
                    (pos.line + 1).min(doc.last_line())
                };
                let want = c.desired_col.unwrap_or(pos.col);
                (Position::new(line, want.min(doc.len(line))), Some(want))
            }
            _ => (pos, None),
        };
        let cursor = &mut self.state.cursors[i];
        cursor.collapse(target);
        cursor.desired_col = desired;
        if i == 0
            && let Some(session) = self.state.insert.as_mut()
        {
            session.changes.clear();
            session.committed = false;
            session.opened_line = false;
        }
        Step::Done
    }

    pub(crate) fn replace_typed<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, c: char) {
        let pos = self.state.cursors[i].stop;
        if c == '\n' {
            self.insert_char(doc, i, c);
            return;
        }
        let old = doc.chars(pos.line).get(pos.col as usize).copied();
        match old {
            Some(_) => self.queue(
                i,
                Transformation::replace(Range::new(pos, pos.right(1)), c.to_string())
                    .with_diff(PositionDiff::offset(0, 1)),
            ),
            None => self.queue(i, Transformation::insert(pos, c.to_string())),
        }
        if i == 0
            && let Some(session) = self.state.insert.as_mut()
        {
            session.replaced.push(old);
        }
    }

    /// Leaves Insert or Replace mode: repeats the typed text for a count,
    /// drops whitespace left on a freshly opened line, and steps the
    /// cursor back onto the last character.
    pub(crate) fn exit_insert<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>) {
        let session = self.state.insert.clone().unwrap_or_default();
        let was = self.state.mode;
        self.set_mode(Mode::Normal);
        self.state.return_to_insert = false;
        if session.block {
            self.state.cursors.truncate(1);
        }
        let strip = session.opened_line && doc.buf().content_type() != "plaintext";
        let repeat = was == Mode::Insert
            && session.entry.is_some_and(InsertEntry::repeats_with_count)
            && session.count > 1
            && !session.changes.is_empty();
        for i in 0..self.state.cursors.len() {
            let pos = self.state.cursors[i].stop;
            if strip && !doc.is_empty_line(pos.line) && doc.is_blank_line(pos.line) {
                let range = Range::new(pos.with_col(0), pos.with_col(doc.len(pos.line)));
                self.state.cursors[i].collapse(range.start);
                self.queue(i, Transformation::delete(range));
                continue;
            }
            if repeat {
                for k in 1..session.count {
                    let diff = if k + 1 == session.count {
                        PositionDiff::offset(0, -1)
                    } else {
                        PositionDiff::offset(0, 0)
                    };
                    self.queue(
                        i,
                        Transformation::ContentChange {
                            at: pos,
                            changes: session.changes.clone(),
                            diff,
                        },
                    );
                }
            } else {
                let cursor = &mut self.state.cursors[i];
                cursor.collapse(pos.left(1));
                cursor.desired_col = None;
            }
        }
    }
}
