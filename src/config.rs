//! User settings and their validation into an [`EngineConfig`].
//!
//! Settings arrive as camelCase JSON. Malformed JSON or an unusable leader
//! key fails the whole load with a [`ConfigError`]; problems with single
//! remapping or digraph entries only drop that entry and are reported in
//! [`ValidatorResults`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::digraph::DigraphTable;
use crate::error::ConfigError;
use crate::key::{KeyEvent, normalize_key, parse_keys};
use crate::types::Mode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub tabstop: u32,
    pub shiftwidth: u32,
    pub expandtab: bool,
    pub autoindent: bool,
    pub leader: String,
    /// Two-character key to a code point, an array of code points, or
    /// `[description, code point(s)]`.
    pub digraphs: BTreeMap<String, Value>,
    pub insert_mode_key_bindings: Vec<RawRemapping>,
    pub normal_mode_key_bindings: Vec<RawRemapping>,
    pub visual_mode_key_bindings: Vec<RawRemapping>,
    pub command_line_mode_key_bindings: Vec<RawRemapping>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tabstop: 4,
            shiftwidth: 4,
            expandtab: true,
            autoindent: true,
            leader: "\\".to_string(),
            digraphs: BTreeMap::new(),
            insert_mode_key_bindings: Vec::new(),
            normal_mode_key_bindings: Vec::new(),
            visual_mode_key_bindings: Vec::new(),
            command_line_mode_key_bindings: Vec::new(),
        }
    }
}

/// A remapping as written by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRemapping {
    #[serde(default)]
    pub before: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub level: ValidationLevel,
    pub message: String,
}

/// Everything validation had to say; never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorResults {
    pub issues: Vec<ValidationIssue>,
}

impl ValidatorResults {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.level == ValidationLevel::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn error(&mut self, message: String) {
        tracing::warn!("Config error: {}", message);
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Error,
            message,
        });
    }

    fn warning(&mut self, message: String) {
        tracing::warn!("Config warning: {}", message);
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Warning,
            message,
        });
    }
}

impl fmt::Display for ValidatorResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            let level = match issue.level {
                ValidationLevel::Warning => "warning",
                ValidationLevel::Error => "error",
            };
            writeln!(f, "{level}: {}", issue.message)?;
        }
        Ok(())
    }
}

/// A validated remapping: `before` is replaced by `after` keys and/or host commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remapping {
    pub before: Vec<KeyEvent>,
    pub after: Vec<KeyEvent>,
    pub commands: Vec<String>,
}

/// Which table a remapping lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemapMode {
    Insert,
    Normal,
    Visual,
    CommandLine,
}

impl RemapMode {
    pub fn for_mode(mode: Mode) -> Option<Self> {
        match mode {
            Mode::Insert | Mode::Replace => Some(RemapMode::Insert),
            Mode::Normal => Some(RemapMode::Normal),
            Mode::Visual(_) => Some(RemapMode::Visual),
            Mode::CommandLine(_) => Some(RemapMode::CommandLine),
            Mode::SurroundInput => None,
        }
    }

    fn setting_name(self) -> &'static str {
        match self {
            RemapMode::Insert => "insertModeKeyBindings",
            RemapMode::Normal => "normalModeKeyBindings",
            RemapMode::Visual => "visualModeKeyBindings",
            RemapMode::CommandLine => "commandLineModeKeyBindings",
        }
    }
}

/// Configuration the engine runs with.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub tabstop: u32,
    pub shiftwidth: u32,
    pub expandtab: bool,
    pub autoindent: bool,
    pub leader: String,
    pub digraphs: DigraphTable,
    insert_remaps: Vec<Remapping>,
    normal_remaps: Vec<Remapping>,
    visual_remaps: Vec<Remapping>,
    command_line_remaps: Vec<Remapping>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            tabstop: settings.tabstop,
            shiftwidth: settings.shiftwidth,
            expandtab: settings.expandtab,
            autoindent: settings.autoindent,
            leader: settings.leader,
            digraphs: DigraphTable::default(),
            insert_remaps: Vec::new(),
            normal_remaps: Vec::new(),
            visual_remaps: Vec::new(),
            command_line_remaps: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn remaps(&self, mode: RemapMode) -> &[Remapping] {
        match mode {
            RemapMode::Insert => &self.insert_remaps,
            RemapMode::Normal => &self.normal_remaps,
            RemapMode::Visual => &self.visual_remaps,
            RemapMode::CommandLine => &self.command_line_remaps,
        }
    }

    pub fn set_remaps(&mut self, mode: RemapMode, remaps: Vec<Remapping>) {
        match mode {
            RemapMode::Insert => self.insert_remaps = remaps,
            RemapMode::Normal => self.normal_remaps = remaps,
            RemapMode::Visual => self.visual_remaps = remaps,
            RemapMode::CommandLine => self.command_line_remaps = remaps,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        let leader_keys = parse_keys(&settings.leader)
            .map_err(|_| ConfigError::InvalidLeader(settings.leader.clone()))?;
        if leader_keys.len() != 1 {
            return Err(ConfigError::InvalidLeader(settings.leader.clone()));
        }
        Ok(settings)
    }

    /// Validates remappings and digraphs. `known_commands` lists the host
    /// commands a remapping may name; `:`-prefixed commands are always accepted.
    pub fn validate(&self, known_commands: &[&str]) -> (EngineConfig, ValidatorResults) {
        let mut results = ValidatorResults::default();
        let mut config = EngineConfig {
            tabstop: self.tabstop.max(1),
            shiftwidth: self.shiftwidth.max(1),
            expandtab: self.expandtab,
            autoindent: self.autoindent,
            leader: self.leader.clone(),
            ..EngineConfig::default()
        };
        for (mode, raw) in [
            (RemapMode::Insert, &self.insert_mode_key_bindings),
            (RemapMode::Normal, &self.normal_mode_key_bindings),
            (RemapMode::Visual, &self.visual_mode_key_bindings),
            (RemapMode::CommandLine, &self.command_line_mode_key_bindings),
        ] {
            let remaps = validate_remaps(mode, raw, &self.leader, known_commands, &mut results);
            config.set_remaps(mode, remaps);
        }
        config.digraphs.extend(validate_digraphs(&self.digraphs, &mut results));
        (config, results)
    }
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn command_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("command").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn normalize_sequence(keys: &[String], leader: &str) -> Result<Vec<KeyEvent>, String> {
    let mut out = Vec::new();
    for key in keys {
        let normalized = normalize_key(key, leader).map_err(|e| e.to_string())?;
        out.extend(parse_keys(&normalized).map_err(|e| e.to_string())?);
    }
    Ok(out)
}

fn validate_remaps(
    mode: RemapMode,
    raw: &[RawRemapping],
    leader: &str,
    known_commands: &[&str],
    results: &mut ValidatorResults,
) -> Vec<Remapping> {
    let mut seen: HashSet<Vec<KeyEvent>> = HashSet::new();
    let mut kept = Vec::new();
    // later entries win, so walk from the back
    for remapping in raw.iter().rev() {
        let label = remapping.before.to_string();
        let mut bad = false;
        if remapping.after.is_none() && remapping.commands.is_none() {
            results.error(format!("{label} missing 'after' key or 'commands'."));
            bad = true;
        }
        let before = string_array(&remapping.before);
        if before.is_none() {
            results.error(format!("Remapping of '{label}' should be a string array."));
            bad = true;
        }
        let after = match &remapping.after {
            Some(value) => {
                let keys = string_array(value);
                if keys.is_none() {
                    results.error(format!("Remapping of '{value}' should be a string array."));
                    bad = true;
                }
                keys
            }
            None => None,
        };
        let mut commands = Vec::new();
        for value in remapping.commands.iter().flatten() {
            match command_name(value) {
                Some(cmd) => {
                    if !cmd.starts_with(':') && !known_commands.contains(&cmd.as_str()) {
                        results.warning(format!("{cmd} does not exist."));
                    }
                    commands.push(cmd);
                }
                None => {
                    results.error(format!("{value} is not a command."));
                    bad = true;
                }
            }
        }
        if bad {
            continue;
        }
        let before = match normalize_sequence(&before.unwrap_or_default(), leader) {
            Ok(keys) if !keys.is_empty() => keys,
            Ok(_) => {
                results.error(format!("Remapping of '{label}' has no keys."));
                continue;
            }
            Err(e) => {
                results.error(format!("Remapping of '{label}': {e}"));
                continue;
            }
        };
        let after = match normalize_sequence(&after.unwrap_or_default(), leader) {
            Ok(keys) => keys,
            Err(e) => {
                results.error(format!("Remapping of '{label}': {e}"));
                continue;
            }
        };
        if !seen.insert(before.clone()) {
            results.warning(format!(
                "{label}. Duplicate remapped key in {}.",
                mode.setting_name()
            ));
            continue;
        }
        kept.push(Remapping {
            before,
            after,
            commands,
        });
    }
    kept.reverse();
    kept
}

fn code_points(value: &Value) -> Option<Vec<u32>> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).map(|n| vec![n]),
        Value::Array(items) => match items.as_slice() {
            [Value::String(_), codes] => code_points(codes),
            _ => items
                .iter()
                .map(|v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
                .collect(),
        },
        _ => None,
    }
}

fn validate_digraphs(
    raw: &BTreeMap<String, Value>,
    results: &mut ValidatorResults,
) -> Vec<((char, char), String)> {
    let mut out = Vec::new();
    for (key, value) in raw {
        let mut chars = key.chars();
        let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
            results.error(format!("Digraph '{key}' must be exactly two characters."));
            continue;
        };
        let text: Option<String> = code_points(value)
            .filter(|codes| !codes.is_empty())
            .and_then(|codes| codes.into_iter().map(char::from_u32).collect());
        match text {
            Some(text) => out.push(((a, b), text)),
            None => results.error(format!("Digraph '{key}' has invalid code points {value}.")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn leader_must_be_one_key() {
        let err = Settings::from_json(r#"{"leader": "ab"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLeader(_)));
    }

    #[test]
    fn original_digraph_format_is_accepted() {
        let settings = Settings::from_json(
            r#"{"digraphs": {"R!": ["my arrow", [8594]], "xy": 120, "bad": 1}}"#,
        )
        .unwrap();
        let (config, results) = settings.validate(&[]);
        assert_eq!(config.digraphs.lookup('R', '!'), Some("→"));
        assert_eq!(config.digraphs.lookup('x', 'y'), Some("x"));
        assert!(results.has_errors());
    }
}
