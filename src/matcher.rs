//! Resolves the pending key buffer against the key table.

use crate::action::{Action, BUILTIN, MatchContext, ModeSet};
use crate::error::KeyNotationError;
use crate::key::{KeyEvent, parse_keys, tokenize};

/// One position of a key pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Key(KeyEvent),
    /// `<character>`: any key that produces text.
    Character,
    /// `<any>`: any key at all.
    Any,
}

impl KeyToken {
    fn matches(&self, key: &KeyEvent) -> bool {
        match self {
            KeyToken::Key(k) => k == key,
            KeyToken::Character => key.text_char().is_some(),
            KeyToken::Any => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPattern(Vec<KeyToken>);

impl KeyPattern {
    pub fn parse(notation: &str) -> Result<Self, KeyNotationError> {
        let mut tokens = Vec::new();
        for tok in tokenize(notation) {
            let token = match tok.to_ascii_lowercase().as_str() {
                "<character>" => KeyToken::Character,
                "<any>" => KeyToken::Any,
                _ => {
                    let keys = parse_keys(tok)?;
                    let key = keys.into_iter().next().ok_or(KeyNotationError::Empty)?;
                    KeyToken::Key(key)
                }
            };
            tokens.push(token);
        }
        if tokens.is_empty() {
            return Err(KeyNotationError::Empty);
        }
        Ok(Self(tokens))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The typed keys are a proper prefix of this pattern. A complete match
    /// is reported by [`KeyPattern::does_apply`], which `resolve` checks first.
    pub fn could_apply(&self, keys: &[KeyEvent]) -> bool {
        keys.len() < self.0.len() && self.0.iter().zip(keys).all(|(t, k)| t.matches(k))
    }

    pub fn does_apply(&self, keys: &[KeyEvent]) -> bool {
        keys.len() == self.0.len() && self.0.iter().zip(keys).all(|(t, k)| t.matches(k))
    }

    /// Lower is more specific: wildcard count first, then `<any>` count.
    fn specificity(&self) -> (usize, usize) {
        let wild = self.0.iter().filter(|t| !matches!(t, KeyToken::Key(_))).count();
        let any = self.0.iter().filter(|t| matches!(t, KeyToken::Any)).count();
        (wild, any)
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub modes: ModeSet,
    pub pattern: KeyPattern,
    pub action: Action,
}

/// An action picked by the matcher, with the keys that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAction {
    pub action: Action,
    pub keys: Vec<KeyEvent>,
}

impl ResolvedAction {
    pub fn new(action: Action, keys: Vec<KeyEvent>) -> Self {
        Self { action, keys }
    }

    /// Text of the key at `i`, for actions that capture characters.
    pub fn char_at(&self, i: usize) -> Option<char> {
        self.keys.get(i).and_then(KeyEvent::text_char)
    }

    pub fn last_char(&self) -> Option<char> {
        self.keys.last().and_then(KeyEvent::text_char)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(ResolvedAction),
    /// At least one entry could still match once more keys arrive.
    Pending,
    NoMatch,
}

/// The key table, built once at engine startup.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .filter_map(|row| match KeyPattern::parse(row.keys) {
                Ok(pattern) => Some(Entry {
                    modes: row.modes,
                    pattern,
                    action: row.action,
                }),
                Err(e) => {
                    tracing::error!("Skipping built-in key {:?}: {}", row.keys, e);
                    None
                }
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn resolve(&self, ctx: &MatchContext<'_>, keys: &[KeyEvent]) -> Resolution {
        if keys.is_empty() {
            return Resolution::NoMatch;
        }
        let mode = ModeSet::from(ctx.mode);
        let mut best: Option<(&Entry, (usize, usize))> = None;
        let mut pending = false;
        for entry in self.entries.iter().filter(|e| e.modes.intersects(mode)) {
            if entry.pattern.does_apply(keys) {
                if !entry.action.refine(ctx, keys, true) {
                    continue;
                }
                let rank = entry.pattern.specificity();
                // ties keep the earliest registration
                if best.is_none_or(|(_, r)| rank < r) {
                    best = Some((entry, rank));
                }
            } else if !pending
                && entry.pattern.could_apply(keys)
                && entry.action.refine(ctx, keys, false)
            {
                pending = true;
            }
        }
        match best {
            Some((entry, _)) => Resolution::Matched(ResolvedAction::new(entry.action, keys.to_vec())),
            None if pending => Resolution::Pending,
            None => Resolution::NoMatch,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CommandKind;
    use crate::digraph::DigraphTable;
    use crate::motion::Motion;
    use crate::types::Mode;

    fn ctx(table: &DigraphTable, mode: Mode) -> MatchContext<'_> {
        MatchContext {
            mode,
            pending_operator: None,
            count_started: false,
            recording: false,
            digraphs: table,
        }
    }

    fn keys(s: &str) -> Vec<KeyEvent> {
        parse_keys(s).unwrap()
    }

    #[test]
    fn wildcards_match_text_keys() {
        let p = KeyPattern::parse("r<character>").unwrap();
        assert!(p.could_apply(&keys("r")));
        assert!(p.does_apply(&keys("rx")));
        assert!(p.does_apply(&keys("r<Enter>")));
        assert!(!p.does_apply(&keys("r<Esc>")));
        let any = KeyPattern::parse("<C-k><any>").unwrap();
        assert!(any.does_apply(&keys("<C-k><Esc>")));
    }

    #[test]
    fn literal_beats_wildcard_regardless_of_order() {
        let table = DigraphTable::default();
        let registry = Registry::from_entries(vec![
            Entry {
                modes: ModeSet::INSERT,
                pattern: KeyPattern::parse("<C-k><any><any>").unwrap(),
                action: Action::Command(CommandKind::InsertChar),
            },
            Entry {
                modes: ModeSet::INSERT,
                pattern: KeyPattern::parse("<C-k>ab").unwrap(),
                action: Action::Command(CommandKind::Backspace),
            },
        ]);
        let got = registry.resolve(&ctx(&table, Mode::Insert), &keys("<C-k>ab"));
        assert_eq!(
            got,
            Resolution::Matched(ResolvedAction::new(
                Action::Command(CommandKind::Backspace),
                keys("<C-k>ab")
            ))
        );
    }

    #[test]
    fn equal_specificity_keeps_registration_order() {
        let table = DigraphTable::default();
        let registry = Registry::from_entries(vec![
            Entry {
                modes: ModeSet::NORMAL,
                pattern: KeyPattern::parse("x").unwrap(),
                action: Action::Motion(Motion::Left),
            },
            Entry {
                modes: ModeSet::NORMAL,
                pattern: KeyPattern::parse("x").unwrap(),
                action: Action::Motion(Motion::Right),
            },
        ]);
        let got = registry.resolve(&ctx(&table, Mode::Normal), &keys("x"));
        assert!(matches!(
            got,
            Resolution::Matched(ResolvedAction { action: Action::Motion(Motion::Left), .. })
        ));
    }

    #[test]
    fn prefixes_are_pending() {
        let table = DigraphTable::default();
        let registry = Registry::builtin();
        let cx = ctx(&table, Mode::Normal);
        assert_eq!(registry.resolve(&cx, &keys("g")), Resolution::Pending);
        assert_eq!(registry.resolve(&cx, &keys("f")), Resolution::Pending);
        assert_eq!(registry.resolve(&cx, &keys("gz")), Resolution::NoMatch);
    }

    #[test]
    fn modes_partition_the_table() {
        let table = DigraphTable::default();
        let registry = Registry::builtin();
        let normal = registry.resolve(&ctx(&table, Mode::Normal), &keys("x"));
        let insert = registry.resolve(&ctx(&table, Mode::Insert), &keys("x"));
        assert!(matches!(
            normal,
            Resolution::Matched(ResolvedAction { action: Action::Command(CommandKind::DeleteChar), .. })
        ));
        assert!(matches!(
            insert,
            Resolution::Matched(ResolvedAction { action: Action::Command(CommandKind::InsertChar), .. })
        ));
    }

    #[test]
    fn every_builtin_row_parses() {
        assert_eq!(Registry::builtin().len(), BUILTIN.len());
    }
}
