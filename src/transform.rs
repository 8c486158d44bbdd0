//! Edit intents queued while a command runs, and their conversion into
//! one ordered batch plus the cursors that result from it.
//!
//! Every transformation is expressed in the coordinates of the document as
//! it was when the command started. [`plan`] carries each one through the
//! edits queued before it so the batch can be applied front to back.

use unicode_segmentation::UnicodeSegmentation;

use crate::text::{Doc, end_after_insert};
use crate::traits::{Edit, TextOps};
use crate::types::{Cursor, Position, PositionDiff, Range};

/// One step of text typed in Insert mode, kept for count repetition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContentDelta {
    Insert(String),
    /// Graphemes removed to the left of the insertion point.
    DeleteLeft(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Transformation {
    InsertText {
        at: Position,
        text: String,
        diff: PositionDiff,
    },
    DeleteRange {
        range: Range,
        diff: PositionDiff,
    },
    /// Deletes the grapheme before `at`, or the line break when `at` is a line start.
    DeleteText {
        at: Position,
        diff: PositionDiff,
    },
    ReplaceText {
        range: Range,
        text: String,
        diff: PositionDiff,
    },
    /// Replays recorded Insert-mode changes at `at`.
    ContentChange {
        at: Position,
        changes: Vec<ContentDelta>,
        diff: PositionDiff,
    },
}

impl Transformation {
    pub(crate) fn insert(at: Position, text: impl Into<String>) -> Self {
        Transformation::InsertText {
            at,
            text: text.into(),
            diff: PositionDiff::offset(0, 0),
        }
    }

    pub(crate) fn delete(range: Range) -> Self {
        Transformation::DeleteRange {
            range,
            diff: PositionDiff::offset(0, 0),
        }
    }

    pub(crate) fn replace(range: Range, text: impl Into<String>) -> Self {
        Transformation::ReplaceText {
            range,
            text: text.into(),
            diff: PositionDiff::offset(0, 0),
        }
    }

    /// Replaces the cursor policy.
    pub(crate) fn with_diff(mut self, new: PositionDiff) -> Self {
        match &mut self {
            Transformation::InsertText { diff, .. }
            | Transformation::DeleteRange { diff, .. }
            | Transformation::DeleteText { diff, .. }
            | Transformation::ReplaceText { diff, .. }
            | Transformation::ContentChange { diff, .. } => *diff = new,
        }
        self
    }

    pub(crate) fn diff(&self) -> PositionDiff {
        match self {
            Transformation::InsertText { diff, .. }
            | Transformation::DeleteRange { diff, .. }
            | Transformation::DeleteText { diff, .. }
            | Transformation::ReplaceText { diff, .. }
            | Transformation::ContentChange { diff, .. } => *diff,
        }
    }

    fn lower<T: TextOps + ?Sized>(&self, doc: &Doc<'_, T>) -> Edit {
        match self {
            Transformation::InsertText { at, text, .. } => Edit {
                range: Range::empty(doc.clamp(*at)),
                text: text.clone(),
            },
            Transformation::DeleteRange { range, .. } => Edit {
                range: clamp_range(doc, *range),
                text: String::new(),
            },
            Transformation::DeleteText { at, .. } => {
                let at = doc.clamp(*at);
                Edit {
                    range: Range::new(doc.retreat(at).unwrap_or(at), at),
                    text: String::new(),
                }
            }
            Transformation::ReplaceText { range, text, .. } => Edit {
                range: clamp_range(doc, *range),
                text: text.clone(),
            },
            Transformation::ContentChange { at, changes, .. } => {
                let at = doc.clamp(*at);
                let mut text = String::new();
                let mut eaten = 0u32;
                for change in changes {
                    match change {
                        ContentDelta::Insert(s) => text.push_str(s),
                        ContentDelta::DeleteLeft(n) => {
                            for _ in 0..*n {
                                match text.grapheme_indices(true).next_back() {
                                    Some((i, _)) => text.truncate(i),
                                    None => eaten += 1,
                                }
                            }
                        }
                    }
                }
                Edit {
                    range: Range::new(at.left(eaten), at),
                    text,
                }
            }
        }
    }
}

fn clamp_range<T: TextOps + ?Sized>(doc: &Doc<'_, T>, range: Range) -> Range {
    let r = range.normalized();
    Range::new(doc.clamp(r.start), doc.clamp(r.end))
}

/// A transformation together with the cursor that queued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Queued {
    pub cursor: usize,
    pub t: Transformation,
}

/// Where `pos` ends up once `edit` has been applied.
///
/// Positions before the edit stay, positions inside a replaced range
/// collapse onto its start and positions after it shift. A position equal
/// to a pure insertion point moves past the inserted text.
pub(crate) fn map_position(pos: Position, edit: &Edit) -> Position {
    let Range { start, end } = edit.range;
    if pos < start || (start != end && pos < end) {
        return if pos < start { pos } else { start };
    }
    let new_end = end_after_insert(start, &edit.text);
    if pos.line == end.line {
        Position::new(new_end.line, new_end.col + (pos.col - end.col))
    } else {
        let line = i64::from(pos.line) - i64::from(end.line) + i64::from(new_end.line);
        Position::new(line.max(0) as u32, pos.col)
    }
}

pub(crate) fn map_through(pos: Position, edits: &[Edit]) -> Position {
    edits.iter().fold(pos, |p, e| map_position(p, e))
}

/// Lines added (or removed, when negative) by an edit.
fn line_delta(edit: &Edit) -> i64 {
    edit.text.matches('\n').count() as i64 - i64::from(edit.range.end.line - edit.range.start.line)
}

/// The batch for one command.
#[derive(Debug, Clone, Default)]
pub(crate) struct Plan {
    /// Each transformation in pre-edit coordinates, index-aligned with the queue.
    pub original: Vec<Edit>,
    /// The same edits, each mapped through the ones before it.
    pub sequential: Vec<Edit>,
}

impl Plan {
    /// Edits that actually change something, in application order.
    pub(crate) fn effective(&self) -> Vec<Edit> {
        self.sequential
            .iter()
            .filter(|e| !(e.range.is_empty() && e.text.is_empty()))
            .cloned()
            .collect()
    }
}

pub(crate) fn plan<T: TextOps + ?Sized>(doc: &Doc<'_, T>, queue: &[Queued]) -> Plan {
    let original: Vec<Edit> = queue.iter().map(|q| q.t.lower(doc)).collect();
    let mut sequential: Vec<Edit> = Vec::with_capacity(original.len());
    for edit in &original {
        let start = map_through(edit.range.start, &sequential);
        let end = map_through(edit.range.end, &sequential).max(start);
        sequential.push(Edit {
            range: Range::new(start, end),
            text: edit.text.clone(),
        });
    }
    Plan {
        original,
        sequential,
    }
}

/// Cursors after the batch: every cursor is carried through the edits,
/// then the last transformation it queued decides where it lands.
///
/// An absolute diff is a position in the final document as seen by that
/// cursor alone; lines added or removed above it by other cursors shift it.
pub(crate) fn reconcile(cursors: &[Cursor], queue: &[Queued], plan: &Plan) -> Vec<Cursor> {
    cursors
        .iter()
        .enumerate()
        .map(|(i, cursor)| {
            let start = map_through(cursor.start, &plan.sequential);
            let stop = map_through(cursor.stop, &plan.sequential);
            let Some(last) = queue.iter().rposition(|q| q.cursor == i) else {
                return Cursor {
                    start,
                    stop,
                    desired_col: cursor.desired_col,
                };
            };
            let landed = match queue[last].t.diff() {
                diff @ PositionDiff::Offset { .. } => diff.apply(stop),
                PositionDiff::Absolute(p) => {
                    let anchor = plan.original[last].range.start;
                    let shift: i64 = queue
                        .iter()
                        .zip(&plan.original)
                        .filter(|(q, e)| q.cursor != i && e.range.start < anchor)
                        .map(|(_, e)| line_delta(e))
                        .sum();
                    Position::new((i64::from(p.line) + shift).max(0) as u32, p.col)
                }
            };
            Cursor::at(landed)
        })
        .collect()
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

    fn p(line: u32, col: u32) -> Position {
        Position::new(line, col)
    }

    fn edit(s: Position, e: Position, text: &str) -> Edit {
        Edit {
            range: Range::new(s, e),
            text: text.to_string(),
        }
    }

    #[test]
    fn positions_before_an_edit_stay() {
        let e = edit(p(0, 4), p(0, 6), "");
        assert_eq!(map_position(p(0, 2), &e), p(0, 2));
        assert_eq!(map_position(p(0, 5), &e), p(0, 4));
        assert_eq!(map_position(p(0, 8), &e), p(0, 6));
    }

    #[test]
    fn insertion_point_moves_past_inserted_text() {
        let e = edit(p(1, 2), p(1, 2), "ab\ncd");
        assert_eq!(map_position(p(1, 2), &e), p(2, 2));
        assert_eq!(map_position(p(1, 5), &e), p(2, 5));
        assert_eq!(map_position(p(3, 1), &e), p(4, 1));
    }

    #[test]
    fn deleting_lines_pulls_later_lines_up() {
        let e = edit(p(1, 0), p(3, 0), "");
        assert_eq!(map_position(p(3, 2), &e), p(1, 2));
        assert_eq!(map_position(p(5, 0), &e), p(3, 0));
        assert_eq!(map_position(p(2, 7), &e), p(1, 0));
    }

    #[test]
    fn later_edits_are_mapped_through_earlier_ones() {
        let buf = Lines(vec!["abc def"]);
        let doc = Doc::new(&buf);
        let queue = vec![
            Queued {
                cursor: 0,
                t: Transformation::insert(p(0, 0), "(("),
            },
            Queued {
                cursor: 1,
                t: Transformation::delete(Range::new(p(0, 4), p(0, 7))),
            },
        ];
        let plan = plan(&doc, &queue);
        assert_eq!(plan.sequential[1].range, Range::new(p(0, 6), p(0, 9)));
    }

    #[test]
    fn repeated_content_changes_append() {
        let buf = Lines(vec!["xy"]);
        let doc = Doc::new(&buf);
        let change = |diff| Queued {
            cursor: 0,
            t: Transformation::ContentChange {
                at: p(0, 1),
                changes: vec![ContentDelta::Insert("=".into())],
                diff,
            },
        };
        let queue = vec![
            change(PositionDiff::offset(0, 0)),
            change(PositionDiff::offset(0, -1)),
        ];
        let plan = plan(&doc, &queue);
        assert_eq!(plan.sequential[1].range, Range::empty(p(0, 2)));
        let cursors = reconcile(&[Cursor::at(p(0, 1))], &queue, &plan);
        assert_eq!(cursors[0].stop, p(0, 2));
    }

    #[test]
    fn content_change_backspaces_eat_typed_text_first() {
        let buf = Lines(vec!["hello"]);
        let doc = Doc::new(&buf);
        let t = Transformation::ContentChange {
            at: p(0, 5),
            changes: vec![
                ContentDelta::Insert("ab".into()),
                ContentDelta::DeleteLeft(3),
            ],
            diff: PositionDiff::offset(0, 0),
        };
        let e = t.lower(&doc);
        assert_eq!(e.range, Range::new(p(0, 4), p(0, 5)));
        assert_eq!(e.text, "");
    }

    #[test]
    fn delete_text_joins_lines_at_column_zero() {
        let buf = Lines(vec!["one", "two"]);
        let doc = Doc::new(&buf);
        let t = Transformation::DeleteText {
            at: p(1, 0),
            diff: PositionDiff::offset(0, 0),
        };
        assert_eq!(t.lower(&doc).range, Range::new(p(0, 3), p(1, 0)));
    }

    #[test]
    fn absolute_diffs_shift_with_lines_added_above() {
        let buf = Lines(vec!["a", "b", "c"]);
        let doc = Doc::new(&buf);
        let queue = vec![
            Queued {
                cursor: 0,
                t: Transformation::insert(p(0, 1), "\nnew"),
            },
            Queued {
                cursor: 1,
                t: Transformation::delete(Range::new(p(2, 0), p(2, 1)))
                    .with_diff(PositionDiff::Absolute(p(2, 0))),
            },
        ];
        let plan = plan(&doc, &queue);
        let cursors = reconcile(&[Cursor::at(p(0, 0)), Cursor::at(p(2, 0))], &queue, &plan);
        assert_eq!(cursors[1].stop, p(3, 0));
    }
}
