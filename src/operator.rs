//! Turning motions, text objects and selections into operator targets,
//! and the operators themselves.

use crate::action::Operator;
use crate::engine::{Engine, Step};
use crate::matcher::ResolvedAction;
use crate::motion::{Motion, MotionArgs, operator_range, word_end};
use crate::register::{Register, StoreKind};
use crate::state::{InsertSession, SurroundPending};
use crate::text::{Doc, byte_of_col, classify, grapheme_len, indent_width, is_blank, leading_whitespace, make_indent};
use crate::text_object::{ObjectArgs, ObjectSpan, TextObject};
use crate::traits::TextOps;
use crate::transform::Transformation;
use crate::types::{Cursor, Mode, Position, PositionDiff, Range, VisualKind};

/// The text an operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// `[start, end)` in reading order.
    Chars { start: Position, end: Position },
    Lines { first: u32, last: u32 },
    /// Columns `[left, right)` of each line. `right == u32::MAX` reaches every line end.
    Block { top: u32, bottom: u32, left: u32, right: u32 },
}

impl Target {
    fn lines(self) -> (u32, u32) {
        match self {
            Target::Chars { start, end } => (start.line, end.line),
            Target::Lines { first, last } => (first, last),
            Target::Block { top, bottom, .. } => (top, bottom),
        }
    }
}

/// Substring of `text` between grapheme columns.
pub(crate) fn cols(text: &str, from: u32, to: u32) -> &str {
    let a = byte_of_col(text, from);
    let b = byte_of_col(text, to.max(from));
    &text[a..b]
}

pub(crate) fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Opening and closing text typed for a surround character.
pub(crate) fn surround_pair(c: char) -> (String, String) {
    let (open, close) = match c {
        '(' => ("( ", " )"),
        '{' => ("{ ", " }"),
        '[' => ("[ ", " ]"),
        '<' => ("< ", " >"),
        ')' | 'b' => ("(", ")"),
        '}' | 'B' => ("{", "}"),
        ']' | 'r' => ("[", "]"),
        '>' | 'a' => ("<", ">"),
        other => return (other.to_string(), other.to_string()),
    };
    (open.to_string(), close.to_string())
}

fn bracket_for(c: char) -> Option<(char, char, bool)> {
    match c {
        '(' => Some(('(', ')', true)),
        ')' | 'b' => Some(('(', ')', false)),
        '{' => Some(('{', '}', true)),
        '}' | 'B' => Some(('{', '}', false)),
        '[' => Some(('[', ']', true)),
        ']' | 'r' => Some(('[', ']', false)),
        '<' => Some(('<', '>', true)),
        '>' | 'a' => Some(('<', '>', false)),
        _ => None,
    }
}

fn convert_case(text: &str, op: Operator) -> String {
    match op {
        Operator::Lowercase => text.to_lowercase(),
        Operator::Uppercase => text.to_uppercase(),
        _ => text
            .chars()
            .flat_map(|c| {
                let swapped: Vec<char> = if c.is_uppercase() {
                    c.to_lowercase().collect()
                } else {
                    c.to_uppercase().collect()
                };
                swapped
            })
            .collect(),
    }
}

pub(crate) fn toggle_case(text: &str) -> String {
    convert_case(text, Operator::ToggleCase)
}

/// `cw` stops at the end of the word instead of the start of the next one.
fn change_word_end<T: TextOps + ?Sized>(doc: &Doc<'_, T>, from: Position, count: u32, big: bool) -> Position {
    let chars = doc.chars(from.line);
    let Some(&here) = chars.get(from.col as usize) else {
        return from;
    };
    let cls = classify(here, big);
    let at_end = chars
        .get(from.col as usize + 1)
        .is_none_or(|c| classify(*c, big) != cls);
    match (at_end, count) {
        (true, 1) => from,
        (true, n) => word_end(doc, from, n - 1, big),
        (false, n) => word_end(doc, from, n, big),
    }
}

impl Engine {
    pub(crate) fn run_motion<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        mode: Mode,
        motion: Motion,
        ra: &ResolvedAction,
    ) -> Step {
        let cursor = self.state.cursors[i];
        let pending = self.state.recorded.operator;
        let count = self.state.recorded.effective_count();

        if pending == Some(Operator::Change)
            && let Motion::WordForward { big } = motion
            && doc
                .char_at(cursor.stop)
                .is_some_and(|c| !is_blank(c))
        {
            let end = change_word_end(doc, cursor.stop, count, big);
            let target = Target::Chars {
                start: cursor.stop,
                end: doc.after(end),
            };
            self.apply_operator(doc, i, Operator::Change, target, None);
            return Step::Done;
        }

        let out = {
            let args = MotionArgs {
                count,
                count_given: self.state.recorded.count_given(),
                desired_col: cursor.desired_col,
                ch: ra.char_at(1),
                for_operator: pending.is_some(),
                last_find: self.state.last_find,
                last_search: self.state.last_search.as_ref(),
            };
            motion.exec(doc, cursor.stop, &args)
        };
        if let Some(find) = out.new_find {
            self.state.last_find = Some(find);
        }
        if let Some(search) = out.new_search.clone() {
            self.state.last_search = Some(search);
        }
        if out.failed {
            tracing::debug!("Motion {:?} failed at {}", motion, cursor.stop);
            self.state.aborted = true;
        }

        match pending {
            None => {
                let c = &mut self.state.cursors[i];
                if mode.is_visual() {
                    c.stop = out.pos;
                } else {
                    c.collapse(out.pos);
                }
                c.desired_col = out.desired_col;
            }
            Some(op) => {
                if let Some(r) = operator_range(doc, motion, cursor.stop, &out) {
                    let target = if r.linewise {
                        Target::Lines {
                            first: r.start.line,
                            last: r.end.line,
                        }
                    } else {
                        Target::Chars {
                            start: r.start,
                            end: r.end,
                        }
                    };
                    self.apply_operator(doc, i, op, target, None);
                }
            }
        }
        Step::Done
    }

    pub(crate) fn run_text_object<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        mode: Mode,
        object: TextObject,
    ) -> Step {
        let cursor = self.state.cursors[i];
        let count = self.state.recorded.effective_count();
        let visual = mode.is_visual().then_some((cursor.start, cursor.stop));
        let Some(span) = object.select(doc, cursor.stop, &ObjectArgs { count, visual }) else {
            tracing::debug!("No {:?} around {}", object, cursor.stop);
            self.state.aborted = true;
            return Step::Done;
        };

        if let Some(op) = self.state.recorded.operator {
            if span.empty {
                if op == Operator::Change {
                    self.state.cursors[i].collapse(span.start);
                    self.begin_insert(None);
                }
                return Step::Done;
            }
            let target = span_target(doc, &span);
            self.apply_operator(doc, i, op, target, None);
            return Step::Done;
        }

        if span.empty {
            return Step::Done;
        }
        let c = &mut self.state.cursors[i];
        if c.start == c.stop {
            c.start = span.start;
            c.stop = span.stop;
        } else if c.stop >= c.start {
            c.start = c.start.min(span.start);
            c.stop = span.stop;
        } else {
            c.start = c.start.max(span.stop);
            c.stop = span.start;
        }
        c.desired_col = None;
        if span.linewise && mode == Mode::Visual(VisualKind::CharWise) {
            self.set_mode(Mode::Visual(VisualKind::LineWise));
        }
        Step::Done
    }

    pub(crate) fn run_operator<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        mode: Mode,
        op: Operator,
    ) -> Step {
        if let Mode::Visual(kind) = mode {
            let target = self.visual_target(doc, i, kind);
            self.apply_operator(doc, i, op, target, Some(kind));
            return Step::Done;
        }
        if self.state.recorded.operator == Some(op) {
            return self.run_lines_operator(doc, i, op);
        }
        tracing::trace!("Operator {:?} pending", op);
        self.state.recorded.operator = Some(op);
        Step::Pending
    }

    /// `dd`, `3>>`, `yss`: the operator over `count` lines from the cursor.
    pub(crate) fn run_lines_operator<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        op: Operator,
    ) -> Step {
        let line = self.state.cursors[i].stop.line;
        let count = self.state.recorded.effective_count();
        let last = line.saturating_add(count - 1).min(doc.last_line());
        self.apply_operator(doc, i, op, Target::Lines { first: line, last }, None);
        Step::Done
    }

    pub(crate) fn visual_target<T: TextOps + ?Sized>(
        &self,
        doc: &Doc<'_, T>,
        i: usize,
        kind: VisualKind,
    ) -> Target {
        let c = self.state.cursors[i];
        let (lo, hi) = ordered(c.start, c.stop);
        match kind {
            VisualKind::CharWise => Target::Chars {
                start: lo,
                end: doc.after(hi),
            },
            VisualKind::LineWise => Target::Lines {
                first: lo.line,
                last: hi.line,
            },
            VisualKind::BlockWise => Target::Block {
                top: lo.line,
                bottom: hi.line,
                left: c.start.col.min(c.stop.col),
                right: if c.desired_col == Some(u32::MAX) {
                    u32::MAX
                } else {
                    c.start.col.max(c.stop.col) + 1
                },
            },
        }
    }

    pub(crate) fn capture<T: TextOps + ?Sized>(&self, doc: &Doc<'_, T>, target: Target) -> Register {
        match target {
            Target::Chars { start, end } => Register::text(doc.buf().slice_to_string(Range::new(start, end))),
            Target::Lines { first, last } => Register::lines((first..=last).map(|l| doc.text(l)).collect()),
            Target::Block { top, bottom, left, right } => Register::block(
                (top..=bottom)
                    .map(|l| cols(&doc.text(l), left, right).to_string())
                    .collect(),
            ),
        }
    }

    pub(crate) fn apply_operator<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        op: Operator,
        target: Target,
        visual: Option<VisualKind>,
    ) {
        tracing::debug!("Operator {:?} on {:?}", op, target);
        match op {
            Operator::Yank => {
                let register = self.capture(doc, target);
                self.write_register(register, StoreKind::Yank);
                self.park_at_start(i, target);
            }
            Operator::Delete => {
                let register = self.capture(doc, target);
                self.write_register(register, StoreKind::Delete);
                self.delete_target(doc, i, target);
            }
            Operator::Change => {
                let register = self.capture(doc, target);
                self.write_register(register, StoreKind::Delete);
                self.change_target(doc, i, target);
                return;
            }
            Operator::Indent | Operator::Outdent => {
                let amount = if visual.is_some() {
                    self.state.recorded.effective_count()
                } else {
                    1
                };
                let (first, last) = target.lines();
                self.shift_lines(doc, i, first, last, amount, op == Operator::Outdent);
            }
            Operator::ToggleCase | Operator::Lowercase | Operator::Uppercase => {
                self.change_case(doc, i, target, op, visual.is_some());
            }
            Operator::AddSurround => {
                self.begin_surround(doc, i, target, visual);
                return;
            }
        }
        if visual.is_some() {
            self.set_mode(Mode::Normal);
        }
    }

    /// Where the cursor rests after a yank: the start of the target, but a
    /// linewise yank below the cursor leaves it where it is.
    fn park_at_start(&mut self, i: usize, target: Target) {
        let c = self.state.cursors[i];
        let (top, _) = ordered(c.start, c.stop);
        let pos = match target {
            Target::Chars { start, .. } => start,
            Target::Lines { first, .. } if top.line == first => top,
            Target::Lines { first, .. } => Position::new(first, c.stop.col),
            Target::Block { top, left, .. } => Position::new(top, left),
        };
        self.state.cursors[i].collapse(pos);
    }

    pub(crate) fn delete_target<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, target: Target) {
        match target {
            Target::Chars { start, end } => {
                self.state.cursors[i].collapse(start);
                if start != end {
                    self.queue(i, Transformation::delete(Range::new(start, end)));
                }
            }
            Target::Lines { first, last } => {
                let last_line = doc.last_line();
                let fnb = |line: u32| doc.first_non_blank(line).min(doc.max_col(line));
                let (range, landing) = if last < last_line {
                    (
                        Range::new(Position::new(first, 0), Position::new(last + 1, 0)),
                        Position::new(first, fnb(last + 1)),
                    )
                } else if first > 0 {
                    (
                        Range::new(
                            Position::new(first - 1, doc.len(first - 1)),
                            Position::new(last_line, doc.len(last_line)),
                        ),
                        Position::new(first - 1, fnb(first - 1)),
                    )
                } else {
                    (
                        Range::new(Position::ZERO, Position::new(last_line, doc.len(last_line))),
                        Position::ZERO,
                    )
                };
                self.state.cursors[i].collapse(range.start);
                self.queue(
                    i,
                    Transformation::delete(range).with_diff(PositionDiff::Absolute(landing)),
                );
            }
            Target::Block { top, bottom, left, right } => {
                let corner = Position::new(top, left);
                self.state.cursors[i].collapse(corner);
                let mut queued = false;
                for line in top..=bottom {
                    let len = doc.len(line);
                    if left < len {
                        let range = Range::new(Position::new(line, left), Position::new(line, right.min(len)));
                        self.queue(i, Transformation::delete(range));
                        queued = true;
                    }
                }
                if queued && let Some(last) = self.state.recorded.transformations.last_mut() {
                    last.t = last.t.clone().with_diff(PositionDiff::Absolute(corner));
                }
            }
        }
    }

    fn change_target<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, target: Target) {
        match target {
            Target::Chars { .. } => {
                self.delete_target(doc, i, target);
                self.begin_insert(None);
            }
            Target::Lines { first, last } => {
                let indent = if self.config.autoindent {
                    leading_whitespace(&doc.text(first)).to_string()
                } else {
                    String::new()
                };
                let width = grapheme_len(&indent) as i32;
                let range = Range::new(Position::new(first, 0), Position::new(last, doc.len(last)));
                self.state.cursors[i].collapse(range.start);
                self.queue(
                    i,
                    Transformation::replace(range, indent.as_str()).with_diff(PositionDiff::offset(0, width)),
                );
                self.begin_insert(None);
                if let Some(session) = self.state.insert.as_mut() {
                    session.opened_line = !indent.is_empty();
                }
            }
            Target::Block { top, bottom, left, right } => {
                let mut cursors = Vec::new();
                for line in top..=bottom {
                    let len = doc.len(line);
                    if len < left {
                        continue;
                    }
                    cursors.push(Cursor::at(Position::new(line, left)));
                    if left < len {
                        let range = Range::new(Position::new(line, left), Position::new(line, right.min(len)));
                        self.queue(cursors.len() - 1, Transformation::delete(range));
                    }
                }
                if cursors.is_empty() {
                    cursors.push(Cursor::at(Position::new(top, left)));
                }
                self.state.cursors = cursors;
                self.begin_insert(None);
                if let Some(session) = self.state.insert.as_mut() {
                    session.block = true;
                }
            }
        }
    }

    /// Enters Insert mode for the current command. Later cursors of the
    /// same fan-out find the session already open.
    pub(crate) fn begin_insert(&mut self, entry: Option<crate::action::InsertEntry>) {
        if self.state.mode == Mode::Insert && self.state.insert.is_some() && !self.state.return_to_insert {
            return;
        }
        self.state.return_to_insert = false;
        self.state.insert = Some(InsertSession {
            entry,
            count: self.state.recorded.effective_count(),
            ..InsertSession::default()
        });
        self.set_mode(Mode::Insert);
    }

    pub(crate) fn shift_lines<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        first: u32,
        last: u32,
        amount: u32,
        outdent: bool,
    ) {
        let step = self.config.shiftwidth.saturating_mul(amount);
        let tab = self.config.tabstop;
        let mut landing_col = doc.first_non_blank(first);
        let mut queued = false;
        for line in first..=last {
            let text = doc.text(line);
            if text.is_empty() {
                continue;
            }
            let lead = leading_whitespace(&text);
            let width = indent_width(lead, tab);
            let new_width = if outdent { width.saturating_sub(step) } else { width + step };
            let new = make_indent(new_width, tab, self.config.expandtab);
            if line == first {
                landing_col = grapheme_len(&new);
            }
            if new != lead {
                let range = Range::new(Position::new(line, 0), Position::new(line, grapheme_len(lead)));
                self.queue(i, Transformation::replace(range, new));
                queued = true;
            }
        }
        let landing = Position::new(first, landing_col);
        self.state.cursors[i].collapse(landing);
        if queued && let Some(last) = self.state.recorded.transformations.last_mut() {
            last.t = last.t.clone().with_diff(PositionDiff::Absolute(landing));
        }
    }

    fn change_case<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        target: Target,
        op: Operator,
        visual: bool,
    ) {
        let cursor = self.state.cursors[i].stop;
        match target {
            Target::Chars { start, end } => {
                let text = doc.buf().slice_to_string(Range::new(start, end));
                self.state.cursors[i].collapse(start);
                self.queue(i, Transformation::replace(Range::new(start, end), convert_case(&text, op)));
            }
            Target::Lines { first, last } => {
                let range = Range::new(Position::new(first, 0), Position::new(last, doc.len(last)));
                let text = doc.buf().slice_to_string(range);
                let landing = if visual { Position::new(first, 0) } else { cursor };
                self.state.cursors[i].collapse(landing);
                self.queue(
                    i,
                    Transformation::replace(range, convert_case(&text, op))
                        .with_diff(PositionDiff::Absolute(landing)),
                );
            }
            Target::Block { top, bottom, left, right } => {
                let corner = Position::new(top, left);
                self.state.cursors[i].collapse(corner);
                for line in top..=bottom {
                    let text = doc.text(line);
                    let piece = cols(&text, left, right);
                    if piece.is_empty() {
                        continue;
                    }
                    let range = Range::new(
                        Position::new(line, left),
                        Position::new(line, left + grapheme_len(piece)),
                    );
                    self.queue(
                        i,
                        Transformation::replace(range, convert_case(piece, op))
                            .with_diff(PositionDiff::Absolute(corner)),
                    );
                }
            }
        }
    }

    fn begin_surround<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        target: Target,
        visual: Option<VisualKind>,
    ) {
        if i > 0 {
            return;
        }
        let pending = match target {
            Target::Chars { start, end } => SurroundPending::Add {
                start,
                end,
                own_lines: false,
            },
            Target::Lines { first, last } if visual == Some(VisualKind::LineWise) => SurroundPending::Add {
                start: Position::new(first, 0),
                end: Position::new(last, doc.len(last)),
                own_lines: true,
            },
            Target::Lines { first, last } => SurroundPending::Add {
                start: Position::new(first, doc.first_non_blank(first)),
                end: Position::new(last, doc.len(last)),
                own_lines: false,
            },
            Target::Block { top, bottom, left, right } => SurroundPending::Add {
                start: Position::new(top, left),
                end: Position::new(bottom, right.min(doc.len(bottom))),
                own_lines: false,
            },
        };
        self.state.surround = Some(pending);
        self.set_mode(Mode::SurroundInput);
    }

    /// The character typed after `ys{motion}`, `yss` or Visual `S`.
    pub(crate) fn surround_char<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, c: Option<char>) -> Step {
        let pending = self.state.surround.take();
        self.set_mode(Mode::Normal);
        let (Some(SurroundPending::Add { start, end, own_lines }), Some(c)) = (pending, c) else {
            return Step::Done;
        };
        let (open, close) = surround_pair(c);
        if own_lines {
            let line_end = Position::new(end.line, doc.len(end.line));
            self.queue(0, Transformation::insert(Position::new(start.line, 0), format!("{open}\n")));
            self.queue(
                0,
                Transformation::insert(line_end, format!("\n{close}"))
                    .with_diff(PositionDiff::Absolute(Position::new(start.line, 0))),
            );
        } else {
            self.queue(0, Transformation::insert(start, open));
            self.queue(
                0,
                Transformation::insert(end, close).with_diff(PositionDiff::Absolute(start)),
            );
        }
        Step::Done
    }

    /// `ds{char}` and `cs{from}{to}`.
    pub(crate) fn replace_surround<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        from: Option<char>,
        to: Option<char>,
    ) -> Step {
        let cursor = self.state.cursors[i].stop;
        let Some((open, close)) = from.and_then(|c| find_surround(doc, cursor, c)) else {
            self.state.aborted = true;
            return Step::Done;
        };
        let (new_open, new_close) = match to {
            Some(c) => surround_pair(c),
            None => (String::new(), String::new()),
        };
        self.state.cursors[i].collapse(open.start);
        self.queue(i, Transformation::replace(open, new_open));
        self.queue(
            i,
            Transformation::replace(close, new_close).with_diff(PositionDiff::Absolute(open.start)),
        );
        Step::Done
    }
}

fn span_target<T: TextOps + ?Sized>(doc: &Doc<'_, T>, span: &ObjectSpan) -> Target {
    if span.linewise {
        Target::Lines {
            first: span.start.line,
            last: span.stop.line,
        }
    } else {
        Target::Chars {
            start: span.start,
            end: doc.after(span.stop),
        }
    }
}

/// Ranges of the opening and closing delimiters around `cursor`.
fn find_surround<T: TextOps + ?Sized>(doc: &Doc<'_, T>, cursor: Position, c: char) -> Option<(Range, Range)> {
    let single = |at: Position| Range::new(at, at.right(1));
    if let Some((open, close, trim)) = bracket_for(c) {
        let args = ObjectArgs { count: 1, visual: None };
        let span = TextObject::Bracket { around: true, open, close }.select(doc, cursor, &args)?;
        let mut open_range = single(span.start);
        let mut close_range = single(span.stop);
        if trim {
            let chars = doc.chars(span.start.line);
            let mut end = open_range.end.col as usize;
            while chars.get(end).is_some_and(|c| *c == ' ' || *c == '\t') {
                end += 1;
            }
            open_range.end = open_range.end.with_col(end as u32);
            let chars = doc.chars(span.stop.line);
            let floor = if span.stop.line == span.start.line { end } else { 0 };
            let mut start = close_range.start.col as usize;
            while start > floor && chars.get(start - 1).is_some_and(|c| *c == ' ' || *c == '\t') {
                start -= 1;
            }
            close_range.start = close_range.start.with_col(start as u32);
        }
        return Some((open_range, close_range));
    }
    if matches!(c, '"' | '\'' | '`') {
        let args = ObjectArgs { count: 1, visual: None };
        let inner = TextObject::Quote { around: false, quote: c }.select(doc, cursor, &args)?;
        let close_at = if inner.empty { inner.start } else { inner.stop.right(1) };
        let open_at = inner.start.left(1);
        return Some((single(open_at), single(close_at)));
    }
    if c == 't' {
        let args = ObjectArgs { count: 1, visual: None };
        let outer = TextObject::Tag { around: true }.select(doc, cursor, &args)?;
        let inner = TextObject::Tag { around: false }.select(doc, cursor, &args)?;
        let inner_end = if inner.empty { inner.start } else { doc.after(inner.stop) };
        return Some((
            Range::new(outer.start, inner.start),
            Range::new(inner_end, doc.after(outer.stop)),
        ));
    }
    let chars = doc.chars(cursor.line);
    let col = (cursor.col as usize).min(chars.len().saturating_sub(1));
    let left = (0..=col).rev().find(|&k| chars.get(k) == Some(&c))?;
    let right = (left + 1..chars.len()).find(|&k| chars[k] == c)?;
    let line = cursor.line;
    Some((
        single(Position::new(line, left as u32)),
        single(Position::new(line, right as u32)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_brackets_add_spaces() {
        assert_eq!(surround_pair('('), ("( ".to_string(), " )".to_string()));
        assert_eq!(surround_pair('b'), ("(".to_string(), ")".to_string()));
        assert_eq!(surround_pair('*'), ("*".to_string(), "*".to_string()));
    }

    #[test]
    fn case_conversion() {
        assert_eq!(toggle_case("aBc"), "AbC");
        assert_eq!(convert_case("MiXed", Operator::Lowercase), "mixed");
        assert_eq!(convert_case("MiXed", Operator::Uppercase), "MIXED");
    }

    #[test]
    fn column_slices_use_graphemes() {
        assert_eq!(cols("héllo", 1, 3), "él");
        assert_eq!(cols("ab", 1, u32::MAX), "b");
        assert_eq!(cols("ab", 5, 9), "");
    }
}
