use modal_engine::types::{Command, Mode, Position};
use modal_engine::{Engine, EngineConfig};
use pretty_assertions::assert_eq;
use unicode_segmentation::UnicodeSegmentation;

use super::mock_buffer::MockBuffer;

/// Splits lines written with a `|` before the cursor's character.
pub fn parse_marked(lines: &[&str]) -> (Vec<String>, Position) {
    let mut cursor = Position::new(0, 0);
    let mut out = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        match line.find('|') {
            Some(byte) => {
                let col = line[..byte].graphemes(true).count() as u32;
                cursor = Position::new(i as u32, col);
                out.push(format!("{}{}", &line[..byte], &line[byte + 1..]));
            }
            None => out.push(line.to_string()),
        }
    }
    (out, cursor)
}

pub struct Harness {
    pub buf: MockBuffer,
    pub engine: Engine,
    pub commands: Vec<Command>,
}

impl Harness {
    pub fn new(lines: &[&str]) -> Self {
        Self::with_engine(lines, Engine::new())
    }

    pub fn with_config(lines: &[&str], config: EngineConfig) -> Self {
        Self::with_engine(lines, Engine::builder().config(config).build())
    }

    pub fn with_engine(lines: &[&str], mut engine: Engine) -> Self {
        let (text, mut cursor) = parse_marked(lines);
        let refs: Vec<&str> = text.iter().map(String::as_str).collect();
        if engine.mode() == Mode::Normal {
            let len = text[cursor.line as usize].graphemes(true).count() as u32;
            cursor.col = cursor.col.min(len.saturating_sub(1));
        }
        engine.set_cursor(cursor);
        Self {
            buf: MockBuffer::from_lines(&refs),
            engine,
            commands: Vec::new(),
        }
    }

    pub fn keys(&mut self, keys: &str) -> &mut Self {
        let out = self
            .engine
            .handle_keys(&mut self.buf, keys)
            .expect("keys should run");
        self.commands.extend(out);
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.buf.lines()
    }

    pub fn cursor(&self) -> Position {
        self.engine.cursor()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    /// Compares text and cursor against lines written with a `|` marker.
    pub fn assert_state(&self, expected: &[&str]) {
        let (lines, cursor) = parse_marked(expected);
        assert_eq!(self.lines(), lines);
        assert_eq!(self.cursor(), cursor, "cursor");
    }

    pub fn assert_mode(&self, mode: Mode) {
        assert_eq!(self.mode(), mode);
    }
}

/// Runs `keys` on `start` and checks the result; both use `|` cursor markers.
pub fn check(start: &[&str], keys: &str, expected: &[&str]) -> Harness {
    let mut h = Harness::new(start);
    h.keys(keys);
    h.assert_state(expected);
    h
}

/// Like [`check`] but also requires the final mode.
pub fn check_mode(start: &[&str], keys: &str, expected: &[&str], mode: Mode) -> Harness {
    let h = check(start, keys, expected);
    h.assert_mode(mode);
    h
}
