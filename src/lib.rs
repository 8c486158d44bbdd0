pub mod action;
pub mod config;
pub mod digraph;
pub mod engine;
pub mod error;
pub mod key;
pub mod matcher;
pub mod motion;
pub mod register;
pub mod state;
pub mod text_object;
pub mod traits;
pub mod types;

mod command;
mod insert;
mod operator;
mod remap;
mod text;
mod transform;

pub use crate::action::{Action, CommandKind, InsertEntry, Operator};
pub use crate::config::{EngineConfig, RemapMode, Remapping, Settings, ValidatorResults};
pub use crate::digraph::DigraphTable;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
pub use crate::error::{BufferError, ConfigError, EngineError, EngineResult, KeyNotationError};
pub use crate::key::{InputEvent, KeyCode, KeyEvent, Modifiers, parse_keys};
pub use crate::matcher::Registry;
pub use crate::motion::Motion;
pub use crate::register::{Register, RegisterMode, Registers};
pub use crate::state::RecordedState;
pub use crate::text_object::TextObject;
pub use crate::traits::{Clipboard, Edit, EditBatch, TextBuffer, TextOps};
#[cfg(feature = "clipboard")]
pub use crate::traits::SystemClipboard;
pub use crate::types::{Command, Cursor, Mode, Position, PositionDiff, Prompt, Range, Selection, VisualKind};
