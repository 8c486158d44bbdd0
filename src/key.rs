use std::fmt;

use crate::error::KeyNotationError;

/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key. Shifted letters are reported as the uppercase
    /// character (`'A'`), not as `'a'` plus SHIFT.
    Char(char),
    /// The Escape key, used to exit modes and cancel operations.
    Esc,
    /// The Enter/Return key.
    Enter,
    /// The Backspace key for deleting characters in insert/command-line modes.
    Backspace,
    /// The Tab key.
    Tab,
    /// The forward Delete key.
    Delete,
    Left,
    Right,
    Up,
    Down,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
///
/// This represents a single key press, including any modifier keys held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// The text this key would insert, if it is a printable key.
    ///
    /// Enter and Tab count as text (`'\n'`, `'\t'`). Any CTRL/ALT/META
    /// modifier makes the key a command key instead.
    pub fn text_char(&self) -> Option<char> {
        if self
            .mods
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return None;
        }
        match self.code {
            KeyCode::Char(c) => Some(c),
            KeyCode::Enter => Some('\n'),
            KeyCode::Tab => Some('\t'),
            _ => None,
        }
    }

    pub fn is_digit(&self) -> bool {
        self.mods.is_empty() && matches!(self.code, KeyCode::Char(c) if c.is_ascii_digit())
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        match c {
            '\n' | '\r' => KeyEvent::plain(KeyCode::Enter),
            '\t' => KeyEvent::plain(KeyCode::Tab),
            '\u{1b}' => KeyEvent::plain(KeyCode::Esc),
            c => KeyEvent::char(c),
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.code {
            KeyCode::Char(' ') => Some("Space"),
            KeyCode::Char(_) => None,
            KeyCode::Esc => Some("Esc"),
            KeyCode::Enter => Some("Enter"),
            KeyCode::Backspace => Some("BS"),
            KeyCode::Tab => Some("Tab"),
            KeyCode::Delete => Some("Del"),
            KeyCode::Left => Some("Left"),
            KeyCode::Right => Some("Right"),
            KeyCode::Up => Some("Up"),
            KeyCode::Down => Some("Down"),
        };
        if self.mods.is_empty() {
            return match (name, self.code) {
                (Some(n), _) => write!(f, "<{n}>"),
                (None, KeyCode::Char(c)) => write!(f, "{c}"),
                (None, _) => Ok(()),
            };
        }
        f.write_str("<")?;
        for (flag, prefix) in [
            (Modifiers::CTRL, "C-"),
            (Modifiers::SHIFT, "S-"),
            (Modifiers::ALT, "A-"),
            (Modifiers::META, "D-"),
        ] {
            if self.mods.contains(flag) {
                f.write_str(prefix)?;
            }
        }
        match (name, self.code) {
            (Some(n), _) => write!(f, "{n}>"),
            (None, KeyCode::Char(c)) => write!(f, "{c}>"),
            (None, _) => f.write_str(">"),
        }
    }
}

/// Input events that can be processed by the engine.
///
/// This enum distinguishes between key presses (used for commands)
/// and text input (used in insert/command-line modes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press event, typically used for commands and navigation.
    Key(KeyEvent),
    /// A character received in text input mode (insert or search).
    /// This allows hosts to handle composed characters and IME input.
    ReceivedChar(char),
}

impl InputEvent {
    /// Both event kinds feed the same key matcher.
    pub fn into_key(self) -> KeyEvent {
        match self {
            InputEvent::Key(k) => k,
            InputEvent::ReceivedChar(c) => KeyEvent::from(c),
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(k: KeyEvent) -> Self {
        InputEvent::Key(k)
    }
}

fn named_key(name: &str) -> Option<KeyEvent> {
    let code = match name.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "cr" | "enter" | "return" => KeyCode::Enter,
        "bs" | "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "del" | "delete" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "lt" => KeyCode::Char('<'),
        "bar" => KeyCode::Char('|'),
        _ => return None,
    };
    Some(KeyEvent::plain(code))
}

/// Parses the inside of a `<...>` group, e.g. `C-r`, `Esc`, `S-Tab`.
pub fn parse_key_name(name: &str) -> Result<KeyEvent, KeyNotationError> {
    if name.is_empty() {
        return Err(KeyNotationError::Empty);
    }
    let mut mods = Modifiers::empty();
    let mut rest = name;
    loop {
        let mut chars = rest.chars();
        let (Some(m), Some('-')) = (chars.next(), chars.next()) else {
            break;
        };
        let flag = match m.to_ascii_uppercase() {
            'C' => Modifiers::CTRL,
            'S' => Modifiers::SHIFT,
            'A' | 'M' => Modifiers::ALT,
            'D' => Modifiers::META,
            _ => break,
        };
        mods |= flag;
        rest = &rest[2..];
        if rest.is_empty() {
            return Err(KeyNotationError::DanglingModifier(name.to_string()));
        }
    }
    let mut single = rest.chars();
    if let (Some(c), None) = (single.next(), single.next()) {
        if !mods.is_empty() {
            return Ok(KeyEvent::new(KeyCode::Char(c), mods));
        }
    }
    match named_key(rest) {
        Some(k) => Ok(KeyEvent::new(k.code, mods)),
        None => Err(KeyNotationError::UnknownKey(name.to_string())),
    }
}

/// Splits key notation into its tokens: `"d<C-r>a"` -> `["d", "<C-r>", "a"]`.
///
/// A `<` that does not start a well-formed group is a literal `<` key,
/// which keeps operators such as `<<` writable without escaping.
pub(crate) fn tokenize(notation: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < notation.len() {
        let rest = &notation[i..];
        let Some(c) = rest.chars().next() else { break };
        if c == '<'
            && let Some(close) = rest[1..].find('>')
        {
            let inner = &rest[1..1 + close];
            if !inner.is_empty() && !inner.contains('<') && !inner.contains(char::is_whitespace) {
                let end = close + 2;
                out.push(&rest[..end]);
                i += end;
                continue;
            }
        }
        out.push(&rest[..c.len_utf8()]);
        i += c.len_utf8();
    }
    out
}

/// Parses key notation such as `"2d<C-r>a<Esc>"` into key events.
pub fn parse_keys(notation: &str) -> Result<Vec<KeyEvent>, KeyNotationError> {
    tokenize(notation)
        .into_iter()
        .map(|tok| {
            if tok.len() > 2 && tok.starts_with('<') && tok.ends_with('>') {
                parse_key_name(&tok[1..tok.len() - 1])
            } else {
                tok.chars()
                    .next()
                    .map(KeyEvent::from)
                    .ok_or(KeyNotationError::Empty)
            }
        })
        .collect()
}

/// Renders keys back into notation.
pub fn keys_to_notation(keys: &[KeyEvent]) -> String {
    keys.iter().map(ToString::to_string).collect()
}

/// Canonical spelling of one configured key, with `<leader>` substituted.
pub fn normalize_key(key: &str, leader: &str) -> Result<String, KeyNotationError> {
    if key.eq_ignore_ascii_case("<leader>") {
        return Ok(leader.to_string());
    }
    let replaced = replace_leader(key, leader);
    Ok(keys_to_notation(&parse_keys(&replaced)?))
}

fn replace_leader(key: &str, leader: &str) -> String {
    let lower = key.to_ascii_lowercase();
    let mut out = String::with_capacity(key.len());
    let mut i = 0;
    while let Some(found) = lower[i..].find("<leader>") {
        out.push_str(&key[i..i + found]);
        out.push_str(leader);
        i += found + "<leader>".len();
    }
    out.push_str(&key[i..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_named_keys() {
        let keys = parse_keys("d<C-r>a<Esc>").unwrap();
        assert_eq!(
            keys,
            vec![
                KeyEvent::char('d'),
                KeyEvent::ctrl('r'),
                KeyEvent::char('a'),
                KeyEvent::plain(KeyCode::Esc),
            ]
        );
    }

    #[test]
    fn lone_angle_brackets_are_literal() {
        let keys = parse_keys("<<").unwrap();
        assert_eq!(keys, vec![KeyEvent::char('<'), KeyEvent::char('<')]);
        let keys = parse_keys("<i").unwrap();
        assert_eq!(keys, vec![KeyEvent::char('<'), KeyEvent::char('i')]);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(matches!(
            parse_keys("<Foo>"),
            Err(KeyNotationError::UnknownKey(_))
        ));
        assert!(matches!(
            parse_key_name("C-"),
            Err(KeyNotationError::DanglingModifier(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for notation in ["<C-r>", "<Esc>", "<BS>", "x", "<Space>", "<C-S-a>", "<Left>"] {
            let keys = parse_keys(notation).unwrap();
            assert_eq!(keys_to_notation(&keys), notation);
        }
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(normalize_key("<esc>", "\\").unwrap(), "<Esc>");
        assert_eq!(normalize_key("<c-a>", "\\").unwrap(), "<C-a>");
        assert_eq!(normalize_key("<CR>", "\\").unwrap(), "<Enter>");
    }

    #[test]
    fn leader_is_substituted() {
        assert_eq!(normalize_key("<leader>", " ").unwrap(), " ");
        assert_eq!(normalize_key("<Leader>w", ",").unwrap(), ",w");
    }

    #[test]
    fn text_char_excludes_command_keys() {
        assert_eq!(KeyEvent::char('x').text_char(), Some('x'));
        assert_eq!(KeyEvent::plain(KeyCode::Enter).text_char(), Some('\n'));
        assert_eq!(KeyEvent::ctrl('x').text_char(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Esc).text_char(), None);
    }
}
