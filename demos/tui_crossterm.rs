//! Terminal UI example using crossterm and ratatui.
//!
//! Shows how a host drives modal_engine: it owns the rope, applies edit
//! batches, and renders the commands the engine hands back.
//! Run with: cargo run --example tui_crossterm
//! Set MODAL_ENGINE_LOG=modal_engine=debug to write a trace to modal_engine.log.

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use modal_engine::{
    BufferError, Engine, InputEvent, KeyCode, KeyEvent, Modifiers,
    traits::{EditBatch, TextBuffer, TextOps},
    types::*,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use ropey::Rope;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use unicode_segmentation::UnicodeSegmentation;

const WELCOME: &str = "Welcome to modal_engine!\n\nPress 'i' to enter insert mode.\nPress 'Esc' to return to normal mode.\nPress ':q<Enter>' to quit.\n\nTry commands like:\n- hjkl, w, b, e, f{char} for movement\n- dd, dw, ci( and das to edit\n- yy and p to copy and paste\n- qa ... q and @a for macros\n- u and <C-r> to undo and redo\n";

/// Text buffer implementation using ropey, with whole-rope undo snapshots.
struct RopeBuffer {
    rope: Rope,
    undo: Vec<(Rope, Position)>,
    redo: Vec<(Rope, Position)>,
}

impl RopeBuffer {
    fn new() -> Self {
        Self {
            rope: Rope::from(WELCOME),
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    fn position_to_char_idx(&self, pos: Position) -> Result<usize, BufferError> {
        if pos.line as usize >= self.rope.len_lines() {
            return Err(BufferError::OutOfBounds {
                line: pos.line,
                col: pos.col,
            });
        }
        let line = self.line(pos.line);
        let chars: usize = line
            .graphemes(true)
            .take(pos.col as usize)
            .map(|g| g.chars().count())
            .sum();
        Ok(self.rope.line_to_char(pos.line as usize) + chars)
    }
}

impl TextOps for RopeBuffer {
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
}

impl TextBuffer for RopeBuffer {
    fn apply_edits(&mut self, batch: &EditBatch) -> Result<(), BufferError> {
        let before = self.rope.clone();
        for edit in &batch.edits {
            let start = self.position_to_char_idx(edit.range.start)?;
            let end = self.position_to_char_idx(edit.range.end)?;
            self.rope.remove(start..end);
            self.rope.insert(start, &edit.text);
        }
        if !batch.merge_with_previous || self.undo.is_empty() {
            self.undo.push((before, batch.cursor_before));
        }
        self.redo.clear();
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

struct App {
    engine: Engine,
    buffer: RopeBuffer,
    command_line: Option<String>,
    message: String,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        Self {
            engine: Engine::new(),
            buffer: RopeBuffer::new(),
            command_line: None,
            message: String::new(),
            should_quit: false,
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        let Some(input) = convert_crossterm_event(event) else {
            return;
        };

        let commands = match self.engine.handle_event(&mut self.buffer, input) {
            Ok(commands) => commands,
            Err(e) => {
                self.message = format!("error: {e}");
                return;
            }
        };

        for cmd in commands {
            match cmd {
                Command::CommandLineChanged(text) => self.command_line = Some(text),
                Command::ModeChanged(mode) => {
                    if !matches!(mode, Mode::CommandLine(_)) {
                        self.command_line = None;
                    }
                }
                Command::RecordingChanged(Some(r)) => self.message = format!("recording @{r}"),
                Command::RecordingChanged(None) => self.message.clear(),
                Command::ExecuteCommandLine(line) => match line.trim() {
                    "q" | "q!" | "wq" | "x" => self.should_quit = true,
                    other => self.message = format!("Not an editor command: {other}"),
                },
                Command::RunHostCommand(name) => self.message = format!("host command: {name}"),
                // Cursor and selection are read back from the engine when drawing
                Command::SetCursor(_) | Command::SetCursors(_) | Command::SetSelection(_) => {}
            }
        }
    }

    fn status(&self) -> String {
        let snapshot = self.engine.snapshot();
        if let (Mode::CommandLine(prompt), Some(text)) = (snapshot.mode, &self.command_line) {
            return format!("{}{}", prompt.leader(), text);
        }
        format!("-- {} -- {} {}", snapshot.mode, snapshot.pending_keys, self.message)
    }
}

fn convert_crossterm_event(event: CKeyEvent) -> Option<InputEvent> {
    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }
    let code = match event.code {
        // Shift is already folded into the character
        CKeyCode::Char(c) if mods.is_empty() => return Some(InputEvent::ReceivedChar(c)),
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        _ => return None,
    };
    Some(InputEvent::Key(KeyEvent::new(code, mods)))
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let selection = app.engine.selection();
    let mut lines = vec![];
    for i in 0..app.buffer.line_count() {
        let text = app.buffer.line(i);

        // Highlight the lines a selection touches
        if let Some(sel) = &selection
            && i >= sel.start.line.min(sel.end.line)
            && i <= sel.start.line.max(sel.end.line)
        {
            lines.push(Line::from(Span::styled(text, Style::default().bg(Color::Blue))));
            continue;
        }

        lines.push(Line::from(text));
    }

    let text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("modal_engine demo"),
    );
    f.render_widget(text, chunks[0]);

    let status = Paragraph::new(app.status())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    let cursor = app.engine.cursor();
    f.set_cursor(
        chunks[0].x + 1 + cursor.col as u16,
        chunks[0].y + 1 + cursor.line as u16,
    );
}

fn init_logging() -> io::Result<()> {
    let Ok(filter) = EnvFilter::try_from_env("MODAL_ENGINE_LOG") else {
        return Ok(());
    };
    let file = File::create("modal_engine.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), io::Error> {
    init_logging()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.engine.attach_document();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
