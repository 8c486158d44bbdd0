//! Normal-mode and Visual-mode commands, and the command line.

use crate::action::{CommandKind, InsertEntry, Operator};
use crate::engine::{Engine, Step};
use crate::matcher::ResolvedAction;
use crate::motion::{SearchSpec, search};
use crate::operator::{Target, cols, ordered, toggle_case};
use crate::register::{Register, RegisterMode};
use crate::state::{InsertSession, RecordedState, Recording};
use crate::text::{Doc, end_after_insert, grapheme_len, leading_whitespace};
use crate::traits::TextOps;
use crate::transform::Transformation;
use crate::types::{Command, Cursor, Mode, Position, PositionDiff, Prompt, Range, VisualKind};

impl Engine {
    pub(crate) fn run_command<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        mode: Mode,
        cmd: CommandKind,
        ra: &ResolvedAction,
        out: &mut Vec<Command>,
    ) -> Step {
        use CommandKind::*;
        match cmd {
            Count => {
                if let Some(d) = ra.char_at(0).and_then(|c| c.to_digit(10)) {
                    self.state.recorded.push_digit(d);
                }
                Step::Pending
            }
            SelectRegister => {
                self.state.recorded.register_name = ra.char_at(1);
                Step::Pending
            }
            Cancel => self.cancel(mode),
            OperatorOnLines(op) => self.run_lines_operator(doc, i, op),
            DeleteSurround => self.replace_surround(doc, i, ra.char_at(1), None),
            ChangeSurround => self.replace_surround(doc, i, ra.char_at(1), ra.char_at(2)),

            EnterInsert(entry) => self.enter_insert(doc, i, entry),
            Substitute => {
                match self.chars_from_cursor(doc, i) {
                    Target::Chars { start, end } if start == end => self.begin_insert(None),
                    target => self.apply_operator(doc, i, Operator::Change, target, None),
                }
                Step::Done
            }
            SubstituteLine => self.run_lines_operator(doc, i, Operator::Change),
            DeleteChar => self.delete_chars(doc, i),
            DeleteCharBefore => {
                let pos = self.state.cursors[i].stop;
                let n = self.state.recorded.effective_count().min(pos.col);
                if n > 0 {
                    let target = Target::Chars {
                        start: pos.left(n),
                        end: pos,
                    };
                    self.apply_operator(doc, i, Operator::Delete, target, None);
                }
                Step::Done
            }
            DeleteKey => {
                if self.state.recorded.count_started() {
                    if i == 0 {
                        self.state.recorded.pop_digit();
                    }
                    return Step::Pending;
                }
                self.delete_chars(doc, i)
            }
            DeleteToLineEnd => self.to_line_end(doc, i, Operator::Delete),
            ChangeToLineEnd => self.to_line_end(doc, i, Operator::Change),
            YankLine => self.run_lines_operator(doc, i, Operator::Yank),
            Put { before } => self.put(doc, i, mode, before),
            ReplaceChar => match mode {
                Mode::Visual(kind) => self.replace_selection(doc, i, kind, ra.last_char()),
                _ => self.replace_chars(doc, i, ra.last_char()),
            },
            EnterReplace => {
                self.state.insert = Some(InsertSession {
                    count: self.state.recorded.effective_count(),
                    ..InsertSession::default()
                });
                self.set_mode(Mode::Replace);
                Step::Done
            }
            Join { spaces } => self.join(doc, i, mode, spaces),
            ToggleCaseChar => self.toggle_case_chars(doc, i),
            // run by the engine with the buffer at hand
            Undo | Redo | Repeat | PlayMacro | PlayLastMacro | InsertLastInserted { .. } => Step::Done,
            RecordMacro => {
                if let Some(register) = ra.char_at(1) {
                    tracing::debug!("Recording into '{}'", register);
                    self.state.recording = Some(Recording {
                        register,
                        actions: Vec::new(),
                    });
                    out.push(Command::RecordingChanged(Some(register)));
                }
                Step::Done
            }
            StopRecording => {
                if let Some(recording) = self.state.recording.take() {
                    let state = RecordedState {
                        actions_run: recording.actions,
                        ..RecordedState::default()
                    };
                    self.registers.store_macro(recording.register, state);
                    out.push(Command::RecordingChanged(None));
                }
                Step::Done
            }
            EnterVisual(kind) => self.enter_visual(i, mode, kind),
            EnterCommandLine(prompt) => {
                self.state.command_line.clear();
                self.set_mode(Mode::CommandLine(prompt));
                out.push(Command::CommandLineChanged(String::new()));
                Step::Done
            }

            SwapAnchor => {
                let c = &mut self.state.cursors[i];
                std::mem::swap(&mut c.start, &mut c.stop);
                c.desired_col = None;
                Step::Done
            }
            VisualLines(op) => self.visual_lines(doc, i, mode, op),
            BlockInsert { append } => self.block_insert(doc, append),

            InsertChar => {
                if let Some(c) = ra.last_char() {
                    self.insert_char(doc, i, c);
                }
                Step::Done
            }
            Backspace if mode == Mode::Replace => self.replace_backspace(i),
            Backspace => self.backspace(doc, i),
            DeleteForward => self.delete_forward(doc, i),
            DeleteWordBefore => self.delete_word_before(doc, i),
            DeleteToLineStart => self.delete_to_line_start(doc, i),
            ShiftLine { outdent } => self.shift_current_line(doc, i, outdent),
            Digraph => {
                let glyph = ra
                    .char_at(1)
                    .zip(ra.char_at(2))
                    .and_then(|(a, b)| self.config.digraphs.lookup(a, b));
                if let Some(glyph) = glyph {
                    self.type_text(i, glyph.to_string(), false);
                }
                Step::Done
            }
            InsertRegister => {
                let text = ra
                    .char_at(1)
                    .and_then(|name| self.registers.get(name))
                    .map(|r| r.insertable_text());
                if let Some(text) = text.filter(|t| !t.is_empty()) {
                    self.type_text(i, text, false);
                }
                Step::Done
            }
            NormalOnce => {
                self.set_mode(Mode::Normal);
                self.state.return_to_insert = true;
                Step::Pending
            }
            CopyLine { from_below } => self.copy_from_line(doc, i, from_below),
            InsertArrow(motion) => self.insert_arrow(doc, i, motion),
            ExitInsert => {
                self.exit_insert(doc);
                Step::Done
            }
            ReplaceTyped => {
                if let Some(c) = ra.last_char() {
                    self.replace_typed(doc, i, c);
                }
                Step::Done
            }

            CommandLineChar => {
                if let Some(c) = ra.last_char() {
                    self.state.command_line.push(c);
                    out.push(Command::CommandLineChanged(self.state.command_line.clone()));
                }
                Step::Done
            }
            CommandLineBackspace => {
                if self.state.command_line.pop().is_none() {
                    self.leave_command_line();
                } else {
                    out.push(Command::CommandLineChanged(self.state.command_line.clone()));
                }
                Step::Done
            }
            CommandLineCancel => {
                self.leave_command_line();
                Step::Done
            }
            CommandLineSubmit => self.submit_command_line(doc, mode, out),

            SurroundChar => self.surround_char(doc, ra.last_char()),
        }
    }

    fn cancel(&mut self, mode: Mode) -> Step {
        match mode {
            Mode::Visual(_) => {
                for c in &mut self.state.cursors {
                    c.collapse(c.stop);
                }
            }
            Mode::SurroundInput => self.state.surround = None,
            _ => {
                let primary = self.state.primary().stop;
                self.state.cursors.truncate(1);
                if let Some(c) = self.state.cursors.first_mut() {
                    c.collapse(primary);
                }
            }
        }
        self.state.recorded = RecordedState::default();
        self.set_mode(Mode::Normal);
        Step::Done
    }

    /// `count` characters from the cursor, stopping at the line end.
    fn chars_from_cursor<T: TextOps + ?Sized>(&self, doc: &Doc<'_, T>, i: usize) -> Target {
        let pos = self.state.cursors[i].stop;
        let len = doc.len(pos.line);
        let n = self.state.recorded.effective_count();
        Target::Chars {
            start: pos.with_col(pos.col.min(len)),
            end: pos.with_col(pos.col.saturating_add(n).min(len)),
        }
    }

    fn delete_chars<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize) -> Step {
        match self.chars_from_cursor(doc, i) {
            Target::Chars { start, end } if start == end => {}
            target => self.apply_operator(doc, i, Operator::Delete, target, None),
        }
        Step::Done
    }

    /// `D` and `C`: from the cursor to the end of the `count`-th line.
    fn to_line_end<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, op: Operator) -> Step {
        let pos = self.state.cursors[i].stop;
        let n = self.state.recorded.effective_count();
        let last = pos.line.saturating_add(n - 1).min(doc.last_line());
        let start = pos.with_col(pos.col.min(doc.len(pos.line)));
        let target = Target::Chars {
            start,
            end: Position::new(last, doc.len(last)),
        };
        self.apply_operator(doc, i, op, target, None);
        Step::Done
    }

    fn enter_insert<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, entry: InsertEntry) -> Step {
        let pos = self.state.cursors[i].stop;
        let len = doc.len(pos.line);
        let indent = || {
            if self.config.autoindent {
                leading_whitespace(&doc.text(pos.line)).to_string()
            } else {
                String::new()
            }
        };
        match entry {
            InsertEntry::AtCursor => {}
            InsertEntry::AfterCursor => self.state.cursors[i].collapse(pos.with_col((pos.col + 1).min(len))),
            InsertEntry::LineStart => self.state.cursors[i].collapse(pos.with_col(doc.first_non_blank(pos.line))),
            InsertEntry::LineEnd => self.state.cursors[i].collapse(pos.with_col(len)),
            InsertEntry::LineBelow => {
                let indent = indent();
                let landing = Position::new(pos.line + 1, grapheme_len(&indent));
                let at = pos.with_col(len);
                self.state.cursors[i].collapse(at);
                self.queue(
                    i,
                    Transformation::insert(at, format!("\n{indent}")).with_diff(PositionDiff::Absolute(landing)),
                );
            }
            InsertEntry::LineAbove => {
                let indent = indent();
                let landing = Position::new(pos.line, grapheme_len(&indent));
                let at = pos.with_col(0);
                self.state.cursors[i].collapse(at);
                self.queue(
                    i,
                    Transformation::insert(at, format!("{indent}\n")).with_diff(PositionDiff::Absolute(landing)),
                );
            }
        }
        self.begin_insert(Some(entry));
        if matches!(entry, InsertEntry::LineBelow | InsertEntry::LineAbove)
            && let Some(session) = self.state.insert.as_mut()
        {
            session.opened_line = true;
        }
        Step::Done
    }

    fn put<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, mode: Mode, before: bool) -> Step {
        let name = self.state.recorded.register_name.unwrap_or('"');
        let Some(register) = self.registers.get(name) else {
            tracing::debug!("Register '{}' is empty", name);
            return Step::Done;
        };
        let count = self.state.recorded.effective_count() as usize;
        if let Mode::Visual(kind) = mode {
            return self.put_over_selection(doc, i, kind, &register, count);
        }
        let pos = self.state.cursors[i].stop;
        let len = doc.len(pos.line);
        match register.mode {
            RegisterMode::CharWise => {
                let text = register.as_text().repeat(count);
                if text.is_empty() {
                    return Step::Done;
                }
                let at = if before || len == 0 {
                    pos.with_col(pos.col.min(len))
                } else {
                    pos.with_col((pos.col + 1).min(len))
                };
                let end = end_after_insert(at, &text);
                let diff = if end.line == at.line {
                    PositionDiff::offset(0, -1)
                } else {
                    PositionDiff::offset(
                        -((end.line - at.line) as i32),
                        at.col as i32 - end.col as i32,
                    )
                };
                self.state.cursors[i].collapse(at);
                self.queue(i, Transformation::insert(at, text).with_diff(diff));
            }
            RegisterMode::LineWise => {
                let lines = register.as_lines();
                let Some(first) = lines.first() else {
                    return Step::Done;
                };
                let landing_col = grapheme_len(leading_whitespace(first));
                let body = vec![lines.join("\n"); count].join("\n");
                if before {
                    let at = pos.with_col(0);
                    self.state.cursors[i].collapse(at);
                    self.queue(
                        i,
                        Transformation::insert(at, format!("{body}\n"))
                            .with_diff(PositionDiff::Absolute(Position::new(pos.line, landing_col))),
                    );
                } else {
                    let at = pos.with_col(len);
                    self.state.cursors[i].collapse(at);
                    self.queue(
                        i,
                        Transformation::insert(at, format!("\n{body}"))
                            .with_diff(PositionDiff::Absolute(Position::new(pos.line + 1, landing_col))),
                    );
                }
            }
            RegisterMode::BlockWise => self.put_block(doc, i, before, &register, count),
        }
        Step::Done
    }

    fn put_block<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        before: bool,
        register: &Register,
        count: usize,
    ) {
        let pos = self.state.cursors[i].stop;
        let len = doc.len(pos.line);
        let col = if before || len == 0 { pos.col } else { pos.col + 1 };
        let fragments = register.as_lines();
        let width = fragments.iter().map(|f| grapheme_len(f)).max().unwrap_or(0);
        for (k, fragment) in fragments.iter().enumerate() {
            let line = pos.line + k as u32;
            let pad = " ".repeat((width - grapheme_len(fragment)) as usize);
            let padded = format!("{fragment}{pad}");
            if line <= doc.last_line() {
                let len = doc.len(line);
                let piece = if len > col { padded.repeat(count) } else { fragment.repeat(count) };
                if len < col {
                    let fill = " ".repeat((col - len) as usize);
                    self.queue(i, Transformation::insert(Position::new(line, len), format!("{fill}{piece}")));
                } else {
                    self.queue(i, Transformation::insert(Position::new(line, col), piece));
                }
            } else {
                let fill = " ".repeat(col as usize);
                self.queue(
                    i,
                    Transformation::insert(doc.doc_end(), format!("\n{fill}{}", fragment.repeat(count))),
                );
            }
        }
        let landing = Position::new(pos.line, col);
        if let Some(last) = self.state.recorded.transformations.last_mut() {
            last.t = last.t.clone().with_diff(PositionDiff::Absolute(landing));
        }
    }

    /// `p` in Visual mode: the selection is replaced and lands in `"`.
    fn put_over_selection<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        kind: VisualKind,
        register: &Register,
        count: usize,
    ) -> Step {
        let target = self.visual_target(doc, i, kind);
        let old = self.capture(doc, target);
        let linewise = register.mode == RegisterMode::LineWise;
        let text = if linewise {
            vec![register.as_lines().join("\n"); count].join("\n")
        } else {
            register.as_text().repeat(count)
        };
        let (range, text) = match target {
            Target::Chars { start, end } if linewise => (Range::new(start, end), format!("\n{text}\n")),
            Target::Chars { start, end } => (Range::new(start, end), text),
            Target::Lines { first, last } => (
                Range::new(Position::new(first, 0), Position::new(last, doc.len(last))),
                text,
            ),
            Target::Block { top, left, .. } => {
                self.delete_target(doc, i, target);
                let corner = Position::new(top, left.min(doc.len(top)));
                self.queue(i, Transformation::insert(corner, text).with_diff(PositionDiff::Absolute(corner)));
                self.registers.set('"', old);
                self.set_mode(Mode::Normal);
                return Step::Done;
            }
        };
        self.state.cursors[i].collapse(range.start);
        self.queue(i, Transformation::replace(range, text));
        self.registers.set('"', old);
        self.set_mode(Mode::Normal);
        Step::Done
    }

    /// `r{char}` in Normal mode.
    fn replace_chars<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, c: Option<char>) -> Step {
        let Some(c) = c else {
            return Step::Done;
        };
        let pos = self.state.cursors[i].stop;
        let n = self.state.recorded.effective_count();
        if pos.col.saturating_add(n) > doc.len(pos.line) {
            self.state.aborted = true;
            return Step::Done;
        }
        let range = Range::new(pos, pos.right(n));
        self.state.cursors[i].collapse(pos);
        if c == '\n' {
            self.queue(
                i,
                Transformation::replace(range, "\n").with_diff(PositionDiff::offset(1, -(pos.col as i32))),
            );
        } else {
            self.queue(
                i,
                Transformation::replace(range, c.to_string().repeat(n as usize))
                    .with_diff(PositionDiff::offset(0, n as i32 - 1)),
            );
        }
        Step::Done
    }

    /// `r{char}` over a Visual selection; line breaks are kept.
    fn replace_selection<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        i: usize,
        kind: VisualKind,
        c: Option<char>,
    ) -> Step {
        let Some(c) = c.filter(|c| *c != '\n') else {
            self.set_mode(Mode::Normal);
            return Step::Done;
        };
        let target = self.visual_target(doc, i, kind);
        let segments: Vec<(u32, u32, u32)> = match target {
            Target::Chars { start, end } => (start.line..=end.line)
                .map(|line| {
                    let from = if line == start.line { start.col } else { 0 };
                    let to = if line == end.line { end.col } else { doc.len(line) };
                    (line, from, to.min(doc.len(line)))
                })
                .collect(),
            Target::Lines { first, last } => (first..=last).map(|l| (l, 0, doc.len(l))).collect(),
            Target::Block { top, bottom, left, right } => (top..=bottom)
                .map(|l| (l, left, right.min(doc.len(l))))
                .collect(),
        };
        let (lo, _) = ordered(self.state.cursors[i].start, self.state.cursors[i].stop);
        let landing = match target {
            Target::Lines { first, .. } => Position::new(first, 0),
            Target::Block { top, left, .. } => Position::new(top, left),
            Target::Chars { start, .. } => start.min(lo),
        };
        self.state.cursors[i].collapse(landing);
        for (line, from, to) in segments {
            if from < to {
                let range = Range::new(Position::new(line, from), Position::new(line, to));
                let text = c.to_string().repeat((to - from) as usize);
                self.queue(i, Transformation::replace(range, text).with_diff(PositionDiff::Absolute(landing)));
            }
        }
        self.set_mode(Mode::Normal);
        Step::Done
    }

    fn join<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, mode: Mode, spaces: bool) -> Step {
        let c = self.state.cursors[i];
        let (first, last) = if mode.is_visual() {
            let (lo, hi) = ordered(c.start, c.stop);
            (lo.line, hi.line.max(lo.line + 1))
        } else {
            let n = self.state.recorded.effective_count().max(2);
            (c.stop.line, c.stop.line.saturating_add(n - 1))
        };
        let last = last.min(doc.last_line());
        if mode.is_visual() {
            self.set_mode(Mode::Normal);
        }
        if first >= last {
            self.state.aborted = true;
            return Step::Done;
        }
        let mut joined = doc.text(first);
        let mut col = 0;
        for line in first + 1..=last {
            let text = doc.text(line);
            let next = text.trim_start_matches([' ', '\t']);
            col = grapheme_len(&joined);
            if spaces {
                let separate = !joined.is_empty() && !joined.ends_with(' ') && !next.starts_with(')');
                if next.is_empty() {
                    if !joined.ends_with(' ') {
                        joined.push(' ');
                    }
                } else if separate {
                    joined.push(' ');
                }
            }
            joined.push_str(next);
        }
        let start = Position::new(first, 0);
        let range = Range::new(start, Position::new(last, doc.len(last)));
        self.state.cursors[i].collapse(start);
        self.queue(
            i,
            Transformation::replace(range, joined).with_diff(PositionDiff::offset(0, col as i32)),
        );
        Step::Done
    }

    /// `~` in Normal mode.
    fn toggle_case_chars<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize) -> Step {
        let pos = self.state.cursors[i].stop;
        let len = doc.len(pos.line);
        if pos.col >= len {
            return Step::Done;
        }
        let end = pos.col.saturating_add(self.state.recorded.effective_count()).min(len);
        let text = doc.text(pos.line);
        let piece = cols(&text, pos.col, end);
        self.state.cursors[i].collapse(pos);
        self.queue(
            i,
            Transformation::replace(Range::new(pos, pos.with_col(end)), toggle_case(piece))
                .with_diff(PositionDiff::offset(0, (end - pos.col) as i32)),
        );
        Step::Done
    }

    fn enter_visual(&mut self, i: usize, mode: Mode, kind: VisualKind) -> Step {
        match mode {
            Mode::Visual(current) if current == kind => {
                let c = &mut self.state.cursors[i];
                c.collapse(c.stop);
                self.set_mode(Mode::Normal);
            }
            _ => self.set_mode(Mode::Visual(kind)),
        }
        Step::Done
    }

    /// `D`, `X`, `Y`, `C`, `R`, `S` and friends in Visual mode work on whole lines.
    fn visual_lines<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, i: usize, mode: Mode, op: Operator) -> Step {
        let Mode::Visual(kind) = mode else {
            return Step::Done;
        };
        let c = self.state.cursors[i];
        let (lo, hi) = ordered(c.start, c.stop);
        let target = match self.visual_target(doc, i, kind) {
            Target::Block { top, bottom, left, .. } if matches!(op, Operator::Delete | Operator::Change) => {
                Target::Block {
                    top,
                    bottom,
                    left,
                    right: u32::MAX,
                }
            }
            _ => Target::Lines {
                first: lo.line,
                last: hi.line,
            },
        };
        let visual = if op == Operator::AddSurround {
            Some(VisualKind::LineWise)
        } else {
            Some(kind)
        };
        self.apply_operator(doc, i, op, target, visual);
        Step::Done
    }

    /// `I` and `A` in Visual block mode: one cursor per line of the block.
    fn block_insert<T: TextOps + ?Sized>(&mut self, doc: &Doc<'_, T>, append: bool) -> Step {
        let c = self.state.primary();
        let (lo, hi) = ordered(c.start, c.stop);
        let left = c.start.col.min(c.stop.col);
        let right = (c.desired_col != Some(u32::MAX)).then(|| c.start.col.max(c.stop.col) + 1);
        let mut cursors = Vec::new();
        let mut pads = Vec::new();
        for line in lo.line..=hi.line {
            let len = doc.len(line);
            if append {
                let col = right.unwrap_or(len);
                if len < col {
                    pads.push((cursors.len(), Position::new(line, len), col - len));
                    cursors.push(Cursor::at(Position::new(line, len)));
                } else {
                    cursors.push(Cursor::at(Position::new(line, col)));
                }
            } else if len >= left || left == 0 {
                cursors.push(Cursor::at(Position::new(line, left)));
            }
        }
        if cursors.is_empty() {
            cursors.push(Cursor::at(lo));
        }
        self.state.cursors = cursors;
        for (k, at, width) in pads {
            self.queue(k, Transformation::insert(at, " ".repeat(width as usize)));
        }
        self.begin_insert(None);
        if let Some(session) = self.state.insert.as_mut() {
            session.block = true;
        }
        Step::Done
    }

    fn leave_command_line(&mut self) {
        self.state.command_line.clear();
        self.set_mode(Mode::Normal);
    }

    fn submit_command_line<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        mode: Mode,
        out: &mut Vec<Command>,
    ) -> Step {
        let line = std::mem::take(&mut self.state.command_line);
        self.set_mode(Mode::Normal);
        match mode {
            Mode::CommandLine(Prompt::Command) => {
                if line.is_empty() {
                    return Step::Done;
                }
                self.registers.set(':', Register::text(line.as_str()));
                match line.trim().parse::<u32>() {
                    Ok(n) => {
                        let target = n.saturating_sub(1).min(doc.last_line());
                        self.state.set_primary(Position::new(target, doc.first_non_blank(target)));
                    }
                    Err(_) => out.push(Command::ExecuteCommandLine(line)),
                }
            }
            Mode::CommandLine(prompt) => {
                let forward = prompt == Prompt::SearchForward;
                let pattern = if line.is_empty() {
                    match &self.state.last_search {
                        Some(last) => last.pattern.clone(),
                        None => return Step::Done,
                    }
                } else {
                    line
                };
                self.registers.set('/', Register::text(pattern.as_str()));
                let from = self.state.primary().stop;
                let found = search(doc, from, &pattern, forward);
                self.state.last_search = Some(SearchSpec { pattern, forward });
                match found {
                    Some(pos) => self.state.set_primary(pos),
                    None => {
                        tracing::debug!("Pattern not found");
                        self.state.aborted = true;
                    }
                }
            }
            _ => {}
        }
        Step::Done
    }
}
