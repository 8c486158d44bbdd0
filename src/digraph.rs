//! Two-character digraphs for `<C-k>` in Insert mode.

use std::collections::HashMap;

#[rustfmt::skip]
const DEFAULT_DIGRAPHS: &[(&str, &str)] = &[
    // accents
    ("a:", "ä"), ("o:", "ö"), ("u:", "ü"), ("A:", "Ä"), ("O:", "Ö"), ("U:", "Ü"),
    ("e:", "ë"), ("i:", "ï"), ("y:", "ÿ"), ("E:", "Ë"), ("I:", "Ï"),
    ("a'", "á"), ("e'", "é"), ("i'", "í"), ("o'", "ó"), ("u'", "ú"), ("y'", "ý"),
    ("A'", "Á"), ("E'", "É"), ("I'", "Í"), ("O'", "Ó"), ("U'", "Ú"),
    ("a!", "à"), ("e!", "è"), ("i!", "ì"), ("o!", "ò"), ("u!", "ù"),
    ("A!", "À"), ("E!", "È"), ("I!", "Ì"), ("O!", "Ò"), ("U!", "Ù"),
    ("a>", "â"), ("e>", "ê"), ("i>", "î"), ("o>", "ô"), ("u>", "û"),
    ("a?", "ã"), ("o?", "õ"), ("n?", "ñ"), ("N?", "Ñ"),
    ("c,", "ç"), ("C,", "Ç"), ("aa", "å"), ("AA", "Å"), ("ae", "æ"), ("AE", "Æ"),
    ("o/", "ø"), ("O/", "Ø"), ("ss", "ß"),
    // greek
    ("a*", "α"), ("b*", "β"), ("g*", "γ"), ("d*", "δ"), ("e*", "ε"), ("l*", "λ"),
    ("m*", "μ"), ("p*", "π"), ("s*", "σ"), ("t*", "τ"), ("f*", "φ"), ("w*", "ω"),
    ("D*", "Δ"), ("S*", "Σ"), ("W*", "Ω"),
    // symbols
    ("Eu", "€"), ("Pd", "£"), ("Ye", "¥"), ("Ct", "¢"), ("SE", "§"), ("PI", "¶"),
    ("Co", "©"), ("Rg", "®"), ("TM", "™"), ("DG", "°"), ("+-", "±"), ("*X", "×"),
    ("-:", "÷"), ("!=", "≠"), ("=<", "≤"), (">=", "≥"), ("?=", "≅"), ("00", "∞"),
    ("->", "→"), ("<-", "←"), ("-!", "↑"), ("-v", "↓"), ("<>", "↔"), ("=>", "⇒"),
    ("12", "½"), ("14", "¼"), ("34", "¾"), ("1S", "¹"), ("2S", "²"), ("3S", "³"),
    ("<<", "«"), (">>", "»"), ("!I", "¡"), ("?I", "¿"), ("NS", "\u{a0}"),
    ("-N", "–"), ("-M", "—"), ("'6", "‘"), ("'9", "’"), ("\"6", "“"), ("\"9", "”"),
    ("..", "‥"), (",.", "…"), ("OK", "✓"), ("XX", "✗"),
];

/// Digraph lookup: built-in entries overlaid with user entries.
///
/// A digraph may be typed in either order; `<C-k>:a` finds `a:`.
#[derive(Debug, Clone)]
pub struct DigraphTable {
    entries: HashMap<(char, char), String>,
}

impl Default for DigraphTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (key, value) in DEFAULT_DIGRAPHS {
            let mut chars = key.chars();
            if let (Some(a), Some(b)) = (chars.next(), chars.next()) {
                table.entries.insert((a, b), (*value).to_string());
            }
        }
        table
    }
}

impl DigraphTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces a digraph. User entries take precedence over built-ins.
    pub fn insert(&mut self, a: char, b: char, text: impl Into<String>) {
        self.entries.insert((a, b), text.into());
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = ((char, char), String)>,
    {
        self.entries.extend(entries);
    }

    pub fn lookup(&self, a: char, b: char) -> Option<&str> {
        self.entries
            .get(&(a, b))
            .or_else(|| self.entries.get(&(b, a)))
            .map(String::as_str)
    }

    /// Whether some digraph could still be completed after typing `c`.
    pub fn has_prefix(&self, c: char) -> bool {
        self.entries.keys().any(|(a, b)| *a == c || *b == c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_order_resolves() {
        let table = DigraphTable::default();
        assert_eq!(table.lookup('a', ':'), Some("ä"));
        assert_eq!(table.lookup(':', 'a'), Some("ä"));
        assert_eq!(table.lookup('q', 'q'), None);
    }

    #[test]
    fn user_entries_override_builtins() {
        let mut table = DigraphTable::default();
        table.insert('E', 'u', "EUR");
        assert_eq!(table.lookup('E', 'u'), Some("EUR"));
    }

    #[test]
    fn prefixes_cover_both_positions() {
        let table = DigraphTable::default();
        assert!(table.has_prefix('a'));
        assert!(table.has_prefix(':'));
        assert!(!table.has_prefix('\u{1}'));
    }
}
