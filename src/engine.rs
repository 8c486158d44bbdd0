use std::collections::VecDeque;

use crate::action::{Action, ActionCaps, CommandKind, MatchContext, Operator};
use crate::config::{EngineConfig, RemapMode};
use crate::error::EngineResult;
use crate::key::{InputEvent, KeyEvent, keys_to_notation, parse_keys};
use crate::matcher::{Registry, Resolution, ResolvedAction};
use crate::register::{MacroBody, Register, Registers, StoreKind};
use crate::remap::{RemapItem, Remapper};
use crate::state::{EditorState, InsertSession, RecordedState};
use crate::text::Doc;
use crate::traits::{Clipboard, EditBatch, TextBuffer, TextOps};
use crate::transform::{self, Queued, Transformation};
use crate::types::{Command, Cursor, Mode, Position, Selection};

/// Replays nested deeper than this are dropped (`qaq@aq@a` style recursion).
const MAX_REPLAY_DEPTH: u32 = 100;

/// Whether the command being composed is complete after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Count, register or operator typed; more keys belong to this command.
    Pending,
    Done,
}

/// Read-only view of the engine between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub cursors: Vec<Cursor>,
    pub preferred_col: Option<u32>,
    pub pending_count: Option<u32>,
    pub pending_keys: String,
    pub pending_operator: Option<Operator>,
    pub register: Option<char>,
    pub recording: Option<char>,
    pub command_line: Option<String>,
}

pub struct EngineBuilder {
    mode: Mode,
    config: EngineConfig,
    registry: Option<Registry>,
    clipboard: Option<Box<dyn Clipboard>>,
    cursor: Position,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            config: EngineConfig::default(),
            registry: None,
            clipboard: None,
            cursor: Position::ZERO,
        }
    }
}

impl EngineBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the built-in key table.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn cursor(mut self, cursor: Position) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn build(self) -> Engine {
        let mut state = EditorState {
            mode: self.mode,
            ..EditorState::default()
        };
        state.set_primary(self.cursor);
        if self.mode.is_insert_like() {
            state.insert = Some(InsertSession::default());
        }
        let mut registers = Registers::new();
        registers.set_clipboard(self.clipboard);
        Engine {
            state,
            registers,
            registry: self.registry.unwrap_or_default(),
            config: self.config,
            remapper: Remapper::default(),
            register_writes: Vec::new(),
        }
    }
}

/// The modal command engine.
///
/// Feed it one [`InputEvent`] at a time together with the document; it
/// edits the document through [`TextBuffer::apply_edits`] and reports
/// everything else as [`Command`]s.
pub struct Engine {
    pub(crate) state: EditorState,
    pub(crate) registers: Registers,
    pub(crate) registry: Registry,
    pub(crate) config: EngineConfig,
    remapper: Remapper,
    /// Yanks and deletes of the current fan-out, stored together afterwards.
    pub(crate) register_writes: Vec<(Register, StoreKind)>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("mode", &self.state.mode)
            .field("cursors", &self.state.cursors)
            .field("registers", &self.registers)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

struct View {
    mode: Mode,
    cursors: Vec<(Position, Position)>,
    selection: Option<Selection>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Active end of the primary cursor.
    pub fn cursor(&self) -> Position {
        self.state.primary().stop
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.state.cursors
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.state.set_primary(pos);
    }

    /// Replaces every cursor; an empty list is ignored.
    pub fn set_cursors(&mut self, cursors: Vec<Cursor>) {
        if !cursors.is_empty() {
            self.state.cursors = cursors;
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        let Mode::Visual(kind) = self.state.mode else {
            return None;
        };
        let c = self.state.primary();
        Some(Selection {
            start: c.start,
            end: c.stop,
            kind,
        })
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.remapper.clear();
    }

    /// The register being recorded into, if any.
    pub fn recording(&self) -> Option<char> {
        self.state.recording.as_ref().map(|r| r.register)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let recorded = &self.state.recorded;
        let count = if recorded.operator.is_some() {
            recorded.operator_count
        } else {
            recorded.count
        };
        EngineSnapshot {
            mode: self.state.mode,
            cursors: self.state.cursors.clone(),
            preferred_col: self.state.primary().desired_col,
            pending_count: (count > 0).then_some(count),
            pending_keys: keys_to_notation(&self.state.pending_keys),
            pending_operator: recorded.operator,
            register: recorded.register_name,
            recording: self.recording(),
            command_line: matches!(self.state.mode, Mode::CommandLine(_))
                .then(|| self.state.command_line.clone()),
        }
    }

    /// Starts over on a new document. Registers, macros and configuration survive.
    pub fn attach_document(&mut self) {
        tracing::debug!("Document attached");
        self.state.reset_document();
        self.remapper.clear();
        self.register_writes.clear();
    }

    pub fn handle_event<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        input: InputEvent,
    ) -> EngineResult<Vec<Command>> {
        let before = self.view();
        let mut out = Vec::new();
        let mut queue = VecDeque::from([RemapItem::Requeue(input.into_key())]);
        while let Some(item) = queue.pop_front() {
            match item {
                RemapItem::Host(name) => out.push(host_command(name)),
                RemapItem::Raw(key) => {
                    self.feed(buf, key, &mut out)?;
                }
                RemapItem::Requeue(key) => match self.remap_mode() {
                    Some(mode) => {
                        let items = self.remapper.push(key, self.config.remaps(mode));
                        for item in items.into_iter().rev() {
                            queue.push_front(item);
                        }
                    }
                    None => {
                        self.feed(buf, key, &mut out)?;
                    }
                },
            }
        }
        self.emit_changes(&before, &mut out);
        Ok(out)
    }

    /// Runs every key of a notation string (`"d2w"`, `"ifoo<Esc>"`).
    pub fn handle_keys<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        notation: &str,
    ) -> EngineResult<Vec<Command>> {
        let mut out = Vec::new();
        for key in parse_keys(notation)? {
            out.extend(self.handle_event(buf, InputEvent::Key(key))?);
        }
        Ok(out)
    }

    /// Stops waiting for a longer remapping and runs what is buffered.
    pub fn flush_pending<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
    ) -> EngineResult<Vec<Command>> {
        let before = self.view();
        let mut out = Vec::new();
        let items = match RemapMode::for_mode(self.state.mode) {
            Some(mode) => self.remapper.flush(self.config.remaps(mode)),
            None => Vec::new(),
        };
        for item in items {
            match item {
                RemapItem::Host(name) => out.push(host_command(name)),
                RemapItem::Raw(key) | RemapItem::Requeue(key) => {
                    self.feed(buf, key, &mut out)?;
                }
            }
        }
        self.emit_changes(&before, &mut out);
        Ok(out)
    }

    /// The remap table that applies to the next key, if remapping is active.
    fn remap_mode(&self) -> Option<RemapMode> {
        let idle = self.state.pending_keys.is_empty() && self.state.recorded.operator.is_none();
        if !self.remapper.is_buffering() && !idle {
            return None;
        }
        let mode = RemapMode::for_mode(self.state.mode)?;
        (!self.config.remaps(mode).is_empty()).then_some(mode)
    }

    fn match_context(&self) -> MatchContext<'_> {
        MatchContext {
            mode: self.state.mode,
            pending_operator: self.state.recorded.operator,
            count_started: self.state.recorded.count_started(),
            recording: self.state.recording.is_some(),
            digraphs: &self.config.digraphs,
        }
    }

    /// Adds a key to the pending buffer and runs whatever it completes.
    /// Returns false when the action it completed failed.
    fn feed<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        key: KeyEvent,
        out: &mut Vec<Command>,
    ) -> EngineResult<bool> {
        self.state.pending_keys.push(key);
        loop {
            let resolution = self
                .registry
                .resolve(&self.match_context(), &self.state.pending_keys);
            match resolution {
                Resolution::Matched(ra) => {
                    self.state.pending_keys.clear();
                    return self.run_resolved(buf, ra, out);
                }
                Resolution::Pending => {
                    tracing::trace!(
                        "Waiting after {}",
                        keys_to_notation(&self.state.pending_keys)
                    );
                    return Ok(true);
                }
                Resolution::NoMatch => {
                    let dropped = self.state.pending_keys.remove(0);
                    tracing::trace!("No action for {}, dropping it", dropped);
                    if self.state.pending_keys.is_empty() {
                        if self.state.mode == Mode::Normal {
                            self.state.recorded = RecordedState::default();
                        } else {
                            self.state.recorded.reset_composition();
                        }
                        return Ok(true);
                    }
                }
            }
        }
    }

    /// Runs one resolved action, commits its edits and closes the command
    /// when it is complete. Returns false when the action failed.
    fn run_resolved<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        ra: ResolvedAction,
        out: &mut Vec<Command>,
    ) -> EngineResult<bool> {
        tracing::debug!(
            "Action {:?} from {} in {}",
            ra.action,
            keys_to_notation(&ra.keys),
            self.state.mode
        );
        if self.state.replay_depth == 0
            && ra.action != Action::Command(CommandKind::StopRecording)
            && let Some(recording) = self.state.recording.as_mut()
        {
            recording.actions.push(ra.clone());
        }
        self.state.recorded.actions_run.push(ra.clone());
        let step = match ra.action {
            Action::Command(CommandKind::Undo) => self.undo(buf, false),
            Action::Command(CommandKind::Redo) => self.undo(buf, true),
            Action::Command(CommandKind::Repeat) => self.repeat(buf, out)?,
            Action::Command(CommandKind::PlayMacro | CommandKind::PlayLastMacro) => {
                self.play_macro(buf, &ra, out)?
            }
            Action::Command(CommandKind::InsertLastInserted { exit }) => {
                self.insert_last_inserted(buf, exit, out)?
            }
            _ => {
                let doc = Doc::new(&*buf);
                self.dispatch(&doc, &ra, out)
            }
        };
        self.commit(buf)?;
        let completed = !self.state.aborted;
        if step == Step::Done {
            self.finish_command();
        }
        Ok(completed)
    }

    /// Runs the action once, or once per cursor unless it is flagged `ONCE`.
    fn dispatch<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        ra: &ResolvedAction,
        out: &mut Vec<Command>,
    ) -> Step {
        let mode = self.state.mode;
        // picking up an operator is part of the shared composition
        let composing = matches!(
            ra.action,
            Action::Operator(op) if !mode.is_visual() && self.state.recorded.operator != Some(op)
        );
        let step = if composing || ra.action.caps().contains(ActionCaps::ONCE) {
            self.exec_action(doc, ra, 0, mode, out)
        } else {
            let fan_out = self.state.cursors.len();
            let mut step = Step::Done;
            for i in 0..fan_out {
                if i < self.state.cursors.len() {
                    step = self.exec_action(doc, ra, i, mode, out);
                }
            }
            step
        };
        self.flush_register_writes();
        step
    }

    fn exec_action<T: TextOps + ?Sized>(
        &mut self,
        doc: &Doc<'_, T>,
        ra: &ResolvedAction,
        i: usize,
        mode: Mode,
        out: &mut Vec<Command>,
    ) -> Step {
        match ra.action {
            Action::Motion(motion) => self.run_motion(doc, i, mode, motion, ra),
            Action::TextObject(object) => self.run_text_object(doc, i, mode, object),
            Action::Operator(op) => self.run_operator(doc, i, mode, op),
            Action::Command(cmd) => self.run_command(doc, i, mode, cmd, ra, out),
        }
    }

    pub(crate) fn queue(&mut self, cursor: usize, t: Transformation) {
        self.state
            .recorded
            .transformations
            .push(Queued { cursor, t });
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.state.mode != mode {
            tracing::debug!("Mode {} -> {}", self.state.mode, mode);
            self.state.mode = mode;
        }
    }

    pub(crate) fn write_register(&mut self, register: Register, kind: StoreKind) {
        self.register_writes.push((register, kind));
    }

    fn flush_register_writes(&mut self) {
        let writes = std::mem::take(&mut self.register_writes);
        let Some(kind) = writes.first().map(|(_, kind)| *kind) else {
            return;
        };
        let merged = Register::merge(writes.into_iter().map(|(r, _)| r).collect());
        if let Some(register) = merged {
            self.registers
                .store(self.state.recorded.register_name, register, kind);
        }
    }

    /// Applies the queued transformations as one batch and settles the cursors.
    fn commit<B: TextBuffer + ?Sized>(&mut self, buf: &mut B) -> EngineResult<()> {
        let queue = std::mem::take(&mut self.state.recorded.transformations);
        if !queue.is_empty() {
            let plan = transform::plan(&Doc::new(&*buf), &queue);
            let edits = plan.effective();
            if !edits.is_empty() {
                let merge = self.state.insert.as_ref().is_some_and(|s| s.committed);
                let batch = EditBatch {
                    edits,
                    cursor_before: self.state.primary().stop,
                    merge_with_previous: merge,
                };
                tracing::debug!("Committing {} edits (merge: {})", batch.edits.len(), merge);
                buf.apply_edits(&batch)?;
                if let Some(session) = self.state.insert.as_mut() {
                    session.committed = true;
                }
            }
            self.state.cursors = transform::reconcile(&self.state.cursors, &queue, &plan);
        }
        if !self.state.mode.is_insert_like() && !self.state.return_to_insert {
            self.state.insert = None;
        }
        self.clamp_cursors(&*buf);
        Ok(())
    }

    fn clamp_cursors<T: TextOps + ?Sized>(&mut self, buf: &T) {
        let doc = Doc::new(buf);
        let on_char = match self.state.mode {
            Mode::Normal => !self.state.return_to_insert,
            Mode::Visual(_) | Mode::SurroundInput => true,
            Mode::Insert | Mode::Replace | Mode::CommandLine(_) => false,
        };
        for c in &mut self.state.cursors {
            if on_char {
                c.start = doc.clamp_normal(c.start);
                c.stop = doc.clamp_normal(c.stop);
            } else {
                c.start = doc.clamp(c.start);
                c.stop = doc.clamp(c.stop);
            }
        }
        if self.state.cursors.len() > 1 {
            let mut seen = Vec::with_capacity(self.state.cursors.len());
            self.state.cursors.retain(|c| {
                let key = (c.start, c.stop);
                let fresh = !seen.contains(&key);
                seen.push(key);
                fresh
            });
        }
        if self.state.cursors.is_empty() {
            self.state.cursors.push(Cursor::at(Position::ZERO));
        }
    }

    /// Closes the current command: archives it for `.` once back in Normal mode.
    fn finish_command(&mut self) {
        let aborted = std::mem::take(&mut self.state.aborted);
        match self.state.mode {
            Mode::Normal if self.state.return_to_insert && self.state.replay_depth == 0 => {
                self.state.return_to_insert = false;
                self.set_mode(Mode::Insert);
                self.state.recorded.reset_composition();
            }
            Mode::Normal => {
                let recorded = std::mem::take(&mut self.state.recorded);
                if recorded.is_repeatable() && !aborted {
                    tracing::debug!("Repeatable command: {}", recorded.notation());
                    self.registers.set_last_command(recorded);
                }
            }
            _ => self.state.recorded.reset_composition(),
        }
    }

    fn undo<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, redo: bool) -> Step {
        let mut landed = None;
        for _ in 0..self.state.recorded.effective_count() {
            let pos = if redo { buf.redo() } else { buf.undo() };
            match pos {
                Some(pos) => landed = Some(pos),
                None => break,
            }
        }
        match landed {
            Some(pos) => self.state.set_primary(pos),
            None => tracing::debug!("Nothing to {}", if redo { "redo" } else { "undo" }),
        }
        Step::Done
    }

    fn repeat<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        out: &mut Vec<Command>,
    ) -> EngineResult<Step> {
        let Some(last) = self.registers.last_command().cloned() else {
            return Ok(Step::Done);
        };
        let recorded = &self.state.recorded;
        let state = if recorded.count_given() {
            with_count(last, recorded.effective_count())
        } else {
            last
        };
        self.replay(buf, MacroBody::Actions(state), 1, out)?;
        Ok(Step::Done)
    }

    fn play_macro<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        ra: &ResolvedAction,
        out: &mut Vec<Command>,
    ) -> EngineResult<Step> {
        let name = match ra.action {
            Action::Command(CommandKind::PlayLastMacro) => self.state.last_macro,
            _ => ra.char_at(1),
        };
        let Some(name) = name else {
            return Ok(Step::Done);
        };
        self.state.last_macro = Some(name);
        let times = self.state.recorded.effective_count();
        if name == ':' {
            if let Some(line) = self.registers.get(':') {
                for _ in 0..times {
                    out.push(Command::ExecuteCommandLine(line.as_text()));
                }
            }
            return Ok(Step::Done);
        }
        let Some(body) = self.registers.macro_body(name) else {
            tracing::debug!("Register '{}' is empty", name);
            return Ok(Step::Done);
        };
        tracing::debug!("Playing '{}' {} time(s)", name, times);
        self.replay(buf, body, times, out)?;
        Ok(Step::Done)
    }

    /// Runs a recorded body `times` times on top of a fresh command state.
    fn replay<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        body: MacroBody,
        times: u32,
        out: &mut Vec<Command>,
    ) -> EngineResult<()> {
        if self.state.replay_depth >= MAX_REPLAY_DEPTH {
            tracing::warn!("Replay nested {} deep, stopping", self.state.replay_depth);
            self.state.aborted = true;
            return Ok(());
        }
        let outer = std::mem::take(&mut self.state.recorded);
        self.state.replay_depth += 1;
        let result = self.replay_body(buf, &body, times, out);
        self.state.replay_depth -= 1;
        if self.state.mode == Mode::Normal {
            self.state.recorded = outer;
        }
        match result {
            Ok(true) => Ok(()),
            Ok(false) => {
                self.state.aborted = true;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn replay_body<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        body: &MacroBody,
        times: u32,
        out: &mut Vec<Command>,
    ) -> EngineResult<bool> {
        for _ in 0..times {
            match body {
                MacroBody::Actions(state) => {
                    for ra in &state.actions_run {
                        if !self.run_resolved(buf, ra.clone(), out)? {
                            return Ok(false);
                        }
                    }
                }
                MacroBody::Keys(keys) => {
                    for key in keys {
                        if !self.feed(buf, *key, out)? {
                            return Ok(false);
                        }
                    }
                }
            }
        }
        Ok(true)
    }

    /// `<C-a>` and `<C-@>`: types again what the last insert typed.
    fn insert_last_inserted<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        exit: bool,
        out: &mut Vec<Command>,
    ) -> EngineResult<Step> {
        let actions = self
            .registers
            .last_command()
            .map(|state| replayable_insert(&state.actions_run))
            .unwrap_or_default();
        let outer = std::mem::take(&mut self.state.recorded.actions_run);
        self.state.replay_depth += 1;
        let mut result = Ok(true);
        for ra in actions {
            if !self.state.mode.is_insert_like() {
                break;
            }
            result = self.run_resolved(buf, ra, out);
            if result.is_err() {
                break;
            }
        }
        self.state.replay_depth -= 1;
        self.state.recorded.actions_run = outer;
        result?;
        if exit && self.state.mode.is_insert_like() {
            let doc = Doc::new(&*buf);
            self.exit_insert(&doc);
        }
        Ok(Step::Done)
    }

    fn view(&self) -> View {
        View {
            mode: self.state.mode,
            cursors: self.state.cursors.iter().map(|c| (c.start, c.stop)).collect(),
            selection: self.selection(),
        }
    }

    fn emit_changes(&self, before: &View, out: &mut Vec<Command>) {
        if self.state.mode != before.mode {
            out.push(Command::ModeChanged(self.state.mode));
        }
        let now: Vec<_> = self.state.cursors.iter().map(|c| (c.start, c.stop)).collect();
        if now != before.cursors {
            if self.state.cursors.len() > 1 {
                out.push(Command::SetCursors(self.state.cursors.clone()));
            } else {
                out.push(Command::SetCursor(self.cursor()));
            }
        }
        let selection = self.selection();
        if selection != before.selection {
            out.push(Command::SetSelection(selection));
        }
    }
}

fn host_command(name: String) -> Command {
    match name.strip_prefix(':') {
        Some(line) => Command::ExecuteCommandLine(line.to_string()),
        None => Command::RunHostCommand(name),
    }
}

/// The recorded command with its count replaced by `count` (`3.`).
fn with_count(mut state: RecordedState, count: u32) -> RecordedState {
    let composing = |a: &ResolvedAction| {
        matches!(
            a.action,
            Action::Command(CommandKind::Count | CommandKind::SelectRegister) | Action::Operator(_)
        )
    };
    let body_start = state
        .actions_run
        .iter()
        .position(|a| !composing(a))
        .unwrap_or(state.actions_run.len());
    let mut actions: Vec<ResolvedAction> = count
        .to_string()
        .chars()
        .map(|d| ResolvedAction::new(Action::Command(CommandKind::Count), vec![KeyEvent::char(d)]))
        .collect();
    actions.extend(
        state.actions_run[..body_start]
            .iter()
            .filter(|a| a.action != Action::Command(CommandKind::Count))
            .cloned(),
    );
    actions.extend(state.actions_run[body_start..].iter().cloned());
    state.actions_run = actions;
    state.count = 0;
    state.operator_count = 0;
    state
}

fn is_insert_command(action: &Action) -> bool {
    use CommandKind::*;
    matches!(
        action,
        Action::Command(
            InsertChar
                | Backspace
                | DeleteForward
                | DeleteWordBefore
                | DeleteToLineStart
                | ShiftLine { .. }
                | Digraph
                | InsertRegister
                | CopyLine { .. }
                | InsertArrow(_)
        )
    )
}

/// The typing part of a recorded insert: everything after entering
/// Insert mode and before leaving it, minus leading arrow keys.
fn replayable_insert(actions: &[ResolvedAction]) -> Vec<ResolvedAction> {
    actions
        .iter()
        .skip_while(|a| !is_insert_command(&a.action))
        .skip_while(|a| matches!(a.action, Action::Command(CommandKind::InsertArrow(_))))
        .take_while(|a| a.action != Action::Command(CommandKind::ExitInsert))
        .filter(|a| is_insert_command(&a.action))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Motion;
    use crate::types::VisualKind;

    fn ra(action: Action, keys: &str) -> ResolvedAction {
        ResolvedAction::new(action, parse_keys(keys).unwrap())
    }

    #[test]
    fn count_replaces_the_leading_count() {
        let mut state = RecordedState::default();
        state.actions_run = vec![
            ra(Action::Command(CommandKind::Count), "2"),
            ra(Action::Operator(Operator::Delete), "d"),
            ra(Action::Motion(Motion::WordForward { big: false }), "w"),
        ];
        let out = with_count(state, 15);
        assert_eq!(out.notation(), "15dw");
    }

    #[test]
    fn count_inside_the_body_is_kept() {
        let mut state = RecordedState::default();
        state.actions_run = vec![
            ra(Action::Command(CommandKind::EnterVisual(VisualKind::CharWise)), "v"),
            ra(Action::Command(CommandKind::Count), "3"),
            ra(Action::Motion(Motion::Down), "j"),
            ra(Action::Operator(Operator::Delete), "d"),
        ];
        assert_eq!(with_count(state, 2).notation(), "2v3jd");
    }

    #[test]
    fn replayable_insert_drops_entry_and_arrows() {
        let actions = vec![
            ra(Action::Operator(Operator::Change), "c"),
            ra(Action::Motion(Motion::WordForward { big: false }), "w"),
            ra(Action::Command(CommandKind::InsertArrow(Motion::Left)), "<Left>"),
            ra(Action::Command(CommandKind::InsertChar), "x"),
            ra(Action::Command(CommandKind::ExitInsert), "<Esc>"),
        ];
        let kept = replayable_insert(&actions);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].last_char(), Some('x'));
    }

    #[test]
    fn remap_commands_starting_with_colon_go_to_the_command_line() {
        assert_eq!(host_command(":w".into()), Command::ExecuteCommandLine("w".into()));
        assert_eq!(host_command("save".into()), Command::RunHostCommand("save".into()));
    }
}
