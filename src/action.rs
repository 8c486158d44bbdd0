//! The action vocabulary and the built-in key table.

use crate::digraph::DigraphTable;
use crate::key::KeyEvent;
use crate::motion::Motion;
use crate::register::is_valid_register;
use crate::text_object::TextObject;
use crate::types::{Mode, Prompt, VisualKind};

/// Operators take a motion or text object (or a Visual selection) as their range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Delete,
    Change,
    Yank,
    Indent,
    Outdent,
    ToggleCase,
    Lowercase,
    Uppercase,
    /// `ys`, and `S` in Visual mode.
    AddSurround,
}

impl Operator {
    pub fn changes_text(self) -> bool {
        self != Operator::Yank
    }
}

/// How Insert mode was entered. Decides where the cursor starts and
/// whether `3i...<Esc>` repeats the typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertEntry {
    /// `i`
    AtCursor,
    /// `a`
    AfterCursor,
    /// `I`
    LineStart,
    /// `A`
    LineEnd,
    /// `o`
    LineBelow,
    /// `O`
    LineAbove,
}

impl InsertEntry {
    pub(crate) fn repeats_with_count(self) -> bool {
        matches!(
            self,
            InsertEntry::AtCursor
                | InsertEntry::AfterCursor
                | InsertEntry::LineStart
                | InsertEntry::LineEnd
        )
    }
}

/// Everything that is neither a motion, a text object nor an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    // composition
    Count,
    SelectRegister,
    Cancel,
    /// The doubled form of an operator (`dd`, `g~~`, `yss`).
    OperatorOnLines(Operator),
    DeleteSurround,
    ChangeSurround,

    // normal mode
    EnterInsert(InsertEntry),
    Substitute,
    SubstituteLine,
    DeleteChar,
    DeleteCharBefore,
    /// `<Del>`: trims the count being typed, otherwise deletes like `x`.
    DeleteKey,
    DeleteToLineEnd,
    ChangeToLineEnd,
    YankLine,
    Put { before: bool },
    ReplaceChar,
    EnterReplace,
    Join { spaces: bool },
    ToggleCaseChar,
    Undo,
    Redo,
    Repeat,
    RecordMacro,
    StopRecording,
    PlayMacro,
    PlayLastMacro,
    EnterVisual(VisualKind),
    EnterCommandLine(Prompt),

    // visual mode
    SwapAnchor,
    VisualLines(Operator),
    BlockInsert { append: bool },

    // insert and replace mode
    InsertChar,
    Backspace,
    DeleteForward,
    DeleteWordBefore,
    DeleteToLineStart,
    ShiftLine { outdent: bool },
    Digraph,
    InsertRegister,
    InsertLastInserted { exit: bool },
    NormalOnce,
    CopyLine { from_below: bool },
    InsertArrow(Motion),
    ExitInsert,
    ReplaceTyped,

    // command line
    CommandLineChar,
    CommandLineBackspace,
    CommandLineSubmit,
    CommandLineCancel,

    // surround input
    SurroundChar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Motion(Motion),
    TextObject(TextObject),
    Operator(Operator),
    Command(CommandKind),
}

bitflags::bitflags! {
    /// Capability flags consulted by the engine when running an action.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ActionCaps: u8 {
        const MOTION      = 0b0000_0001;
        const OPERATOR    = 0b0000_0010;
        const TEXT_OBJECT = 0b0000_0100;
        /// Changes the buffer; a command containing one is dot-repeatable.
        const EDITING     = 0b0000_1000;
        /// Runs a single time no matter how many cursors exist.
        const ONCE        = 0b0001_0000;
        /// May appear while an operator is waiting for its range.
        const COMPOSES    = 0b0010_0000;
    }
}

bitflags::bitflags! {
    /// The modes an entry of the key table is active in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModeSet: u8 {
        const NORMAL         = 0b0000_0001;
        const INSERT         = 0b0000_0010;
        const VISUAL         = 0b0000_0100;
        const VISUAL_LINE    = 0b0000_1000;
        const VISUAL_BLOCK   = 0b0001_0000;
        const REPLACE        = 0b0010_0000;
        const COMMAND_LINE   = 0b0100_0000;
        const SURROUND_INPUT = 0b1000_0000;

        const ANY_VISUAL = Self::VISUAL.bits() | Self::VISUAL_LINE.bits() | Self::VISUAL_BLOCK.bits();
        const NORMAL_VISUAL = Self::NORMAL.bits() | Self::ANY_VISUAL.bits();
        const INSERT_REPLACE = Self::INSERT.bits() | Self::REPLACE.bits();
    }
}

impl From<Mode> for ModeSet {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => ModeSet::NORMAL,
            Mode::Insert => ModeSet::INSERT,
            Mode::Visual(VisualKind::CharWise) => ModeSet::VISUAL,
            Mode::Visual(VisualKind::LineWise) => ModeSet::VISUAL_LINE,
            Mode::Visual(VisualKind::BlockWise) => ModeSet::VISUAL_BLOCK,
            Mode::Replace => ModeSet::REPLACE,
            Mode::CommandLine(_) => ModeSet::COMMAND_LINE,
            Mode::SurroundInput => ModeSet::SURROUND_INPUT,
        }
    }
}

/// Engine state the refinement predicates look at.
#[derive(Clone, Copy)]
pub(crate) struct MatchContext<'a> {
    pub mode: Mode,
    pub pending_operator: Option<Operator>,
    pub count_started: bool,
    pub recording: bool,
    pub digraphs: &'a DigraphTable,
}

fn text_at(keys: &[KeyEvent], i: usize) -> Option<char> {
    keys.get(i).and_then(KeyEvent::text_char)
}

impl CommandKind {
    fn caps(self) -> ActionCaps {
        use CommandKind::*;
        match self {
            Count | SelectRegister | Cancel => ActionCaps::ONCE | ActionCaps::COMPOSES,
            OperatorOnLines(op) | VisualLines(op) if !op.changes_text() => ActionCaps::empty(),
            OperatorOnLines(_) | DeleteSurround | ChangeSurround => {
                ActionCaps::EDITING | ActionCaps::COMPOSES
            }
            Undo | Redo | Repeat | RecordMacro | StopRecording | PlayMacro | PlayLastMacro
            | EnterCommandLine(_) | CommandLineChar | CommandLineBackspace | CommandLineSubmit
            | CommandLineCancel | NormalOnce | BlockInsert { .. } | SurroundChar | ExitInsert => {
                ActionCaps::ONCE
            }
            EnterVisual(_) | SwapAnchor | YankLine | InsertArrow(_) => {
                ActionCaps::empty()
            }
            _ => ActionCaps::EDITING,
        }
    }
}

impl Action {
    pub fn caps(&self) -> ActionCaps {
        match self {
            Action::Motion(_) => ActionCaps::MOTION,
            Action::TextObject(_) => ActionCaps::TEXT_OBJECT,
            Action::Operator(op) if op.changes_text() => ActionCaps::OPERATOR | ActionCaps::EDITING,
            Action::Operator(_) => ActionCaps::OPERATOR,
            Action::Command(c) => c.caps(),
        }
    }

    /// Extra conditions on top of the key pattern. `complete` is false
    /// while only a prefix of the pattern has been typed.
    pub(crate) fn refine(&self, ctx: &MatchContext<'_>, keys: &[KeyEvent], complete: bool) -> bool {
        use CommandKind::*;
        if let Some(pending) = ctx.pending_operator {
            let composes = match self {
                Action::Motion(_) | Action::TextObject(_) => true,
                Action::Operator(op) => {
                    *op == pending || (pending == Operator::Yank && *op == Operator::AddSurround)
                }
                Action::Command(OperatorOnLines(op)) => *op == pending,
                Action::Command(DeleteSurround) => pending == Operator::Delete,
                Action::Command(ChangeSurround) => pending == Operator::Change,
                Action::Command(c) => c.caps().contains(ActionCaps::COMPOSES),
            };
            if !composes {
                return false;
            }
        } else {
            match self {
                Action::Command(OperatorOnLines(_) | DeleteSurround | ChangeSurround) => {
                    return false;
                }
                Action::Operator(Operator::AddSurround) if !ctx.mode.is_visual() => return false,
                Action::TextObject(_) if !ctx.mode.is_visual() => return false,
                _ => {}
            }
        }
        match self {
            Action::Command(Count) => {
                !keys.first().is_some_and(|k| *k == KeyEvent::char('0')) || ctx.count_started
            }
            Action::Command(SelectRegister) | Action::Command(InsertRegister) => {
                !complete || text_at(keys, 1).is_some_and(is_valid_register)
            }
            Action::Command(RecordMacro) => {
                !ctx.recording
                    && (!complete
                        || text_at(keys, 1)
                            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '"'))
            }
            Action::Command(StopRecording) => ctx.recording,
            Action::Command(PlayMacro) => {
                !complete || text_at(keys, 1).is_some_and(|c| c != '@' && is_valid_register(c))
            }
            Action::Command(Digraph) => {
                let typed: Vec<char> = keys[1..].iter().filter_map(KeyEvent::text_char).collect();
                if typed.len() + 1 != keys.len() {
                    return false;
                }
                match typed.as_slice() {
                    [] => true,
                    [a] => ctx.digraphs.has_prefix(*a),
                    [a, b] => ctx.digraphs.lookup(*a, *b).is_some(),
                    _ => false,
                }
            }
            _ => true,
        }
    }
}

/// One row of the built-in key table.
pub(crate) struct Builtin {
    pub modes: ModeSet,
    pub keys: &'static str,
    pub action: Action,
}

const fn row(modes: ModeSet, keys: &'static str, action: Action) -> Builtin {
    Builtin {
        modes,
        keys,
        action,
    }
}

const NV: ModeSet = ModeSet::NORMAL_VISUAL;
const N: ModeSet = ModeSet::NORMAL;
const V: ModeSet = ModeSet::ANY_VISUAL;
const I: ModeSet = ModeSet::INSERT;
const IR: ModeSet = ModeSet::INSERT_REPLACE;
const R: ModeSet = ModeSet::REPLACE;
const CL: ModeSet = ModeSet::COMMAND_LINE;
const SI: ModeSet = ModeSet::SURROUND_INPUT;

const fn m(motion: Motion) -> Action {
    Action::Motion(motion)
}

const fn o(op: Operator) -> Action {
    Action::Operator(op)
}

const fn c(cmd: CommandKind) -> Action {
    Action::Command(cmd)
}

const fn obj(t: TextObject) -> Action {
    Action::TextObject(t)
}

const fn bracket(around: bool, open: char, close: char) -> Action {
    obj(TextObject::Bracket { around, open, close })
}

const fn quote(around: bool, quote: char) -> Action {
    obj(TextObject::Quote { around, quote })
}

use CommandKind as K;
use Motion as Mo;
use Operator as Op;

#[rustfmt::skip]
pub(crate) static BUILTIN: &[Builtin] = &[
    // counts and registers
    row(NV, "1", c(K::Count)), row(NV, "2", c(K::Count)), row(NV, "3", c(K::Count)),
    row(NV, "4", c(K::Count)), row(NV, "5", c(K::Count)), row(NV, "6", c(K::Count)),
    row(NV, "7", c(K::Count)), row(NV, "8", c(K::Count)), row(NV, "9", c(K::Count)),
    row(NV, "0", c(K::Count)),
    row(NV, "\"<character>", c(K::SelectRegister)),
    row(NV, "<Esc>", c(K::Cancel)), row(NV, "<C-c>", c(K::Cancel)), row(NV, "<C-[>", c(K::Cancel)),

    // motions
    row(NV, "h", m(Mo::Left)), row(NV, "<Left>", m(Mo::Left)), row(NV, "<BS>", m(Mo::Left)),
    row(NV, "l", m(Mo::Right)), row(NV, "<Right>", m(Mo::Right)), row(NV, "<Space>", m(Mo::Right)),
    row(NV, "j", m(Mo::Down)), row(NV, "<Down>", m(Mo::Down)), row(NV, "<C-n>", m(Mo::Down)),
    row(NV, "<C-j>", m(Mo::Down)),
    row(NV, "k", m(Mo::Up)), row(NV, "<Up>", m(Mo::Up)), row(NV, "<C-p>", m(Mo::Up)),
    row(NV, "0", m(Mo::LineStart)),
    row(NV, "^", m(Mo::FirstNonBlank)),
    row(NV, "$", m(Mo::LineEnd)),
    row(NV, "|", m(Mo::Column)),
    row(NV, "+", m(Mo::NextLineFirstNonBlank)), row(NV, "<Enter>", m(Mo::NextLineFirstNonBlank)),
    row(NV, "-", m(Mo::PrevLineFirstNonBlank)),
    row(NV, "_", m(Mo::LineFirstNonBlank)),
    row(NV, "gg", m(Mo::DocumentStart)),
    row(NV, "G", m(Mo::DocumentEnd)),
    row(NV, "w", m(Mo::WordForward { big: false })), row(NV, "W", m(Mo::WordForward { big: true })),
    row(NV, "b", m(Mo::WordBackward { big: false })), row(NV, "B", m(Mo::WordBackward { big: true })),
    row(NV, "e", m(Mo::WordEnd { big: false })), row(NV, "E", m(Mo::WordEnd { big: true })),
    row(NV, "ge", m(Mo::WordEndBackward { big: false })),
    row(NV, "gE", m(Mo::WordEndBackward { big: true })),
    row(NV, "}", m(Mo::ParagraphForward)), row(NV, "{", m(Mo::ParagraphBackward)),
    row(NV, ")", m(Mo::SentenceForward)), row(NV, "(", m(Mo::SentenceBackward)),
    row(NV, "f<character>", m(Mo::FindChar { forward: true, till: false })),
    row(NV, "F<character>", m(Mo::FindChar { forward: false, till: false })),
    row(NV, "t<character>", m(Mo::FindChar { forward: true, till: true })),
    row(NV, "T<character>", m(Mo::FindChar { forward: false, till: true })),
    row(NV, ";", m(Mo::RepeatFind { reverse: false })),
    row(NV, ",", m(Mo::RepeatFind { reverse: true })),
    row(NV, "%", m(Mo::MatchPair)),
    row(NV, "n", m(Mo::SearchNext { reverse: false })),
    row(NV, "N", m(Mo::SearchNext { reverse: true })),
    row(NV, "*", m(Mo::SearchWord { forward: true })),
    row(NV, "#", m(Mo::SearchWord { forward: false })),

    // text objects
    row(NV, "iw", obj(TextObject::Word { around: false, big: false })),
    row(NV, "aw", obj(TextObject::Word { around: true, big: false })),
    row(NV, "iW", obj(TextObject::Word { around: false, big: true })),
    row(NV, "aW", obj(TextObject::Word { around: true, big: true })),
    row(NV, "is", obj(TextObject::Sentence { around: false })),
    row(NV, "as", obj(TextObject::Sentence { around: true })),
    row(NV, "ip", obj(TextObject::Paragraph { around: false })),
    row(NV, "ap", obj(TextObject::Paragraph { around: true })),
    row(NV, "i\"", quote(false, '"')), row(NV, "a\"", quote(true, '"')),
    row(NV, "i'", quote(false, '\'')), row(NV, "a'", quote(true, '\'')),
    row(NV, "i`", quote(false, '`')), row(NV, "a`", quote(true, '`')),
    row(NV, "i(", bracket(false, '(', ')')), row(NV, "a(", bracket(true, '(', ')')),
    row(NV, "i)", bracket(false, '(', ')')), row(NV, "a)", bracket(true, '(', ')')),
    row(NV, "ib", bracket(false, '(', ')')), row(NV, "ab", bracket(true, '(', ')')),
    row(NV, "i{", bracket(false, '{', '}')), row(NV, "a{", bracket(true, '{', '}')),
    row(NV, "i}", bracket(false, '{', '}')), row(NV, "a}", bracket(true, '{', '}')),
    row(NV, "iB", bracket(false, '{', '}')), row(NV, "aB", bracket(true, '{', '}')),
    row(NV, "i[", bracket(false, '[', ']')), row(NV, "a[", bracket(true, '[', ']')),
    row(NV, "i]", bracket(false, '[', ']')), row(NV, "a]", bracket(true, '[', ']')),
    row(NV, "i<lt>", bracket(false, '<', '>')), row(NV, "a<lt>", bracket(true, '<', '>')),
    row(NV, "i>", bracket(false, '<', '>')), row(NV, "a>", bracket(true, '<', '>')),
    row(NV, "it", obj(TextObject::Tag { around: false })),
    row(NV, "at", obj(TextObject::Tag { around: true })),
    row(NV, "ii", obj(TextObject::Indent { around: false, below: false })),
    row(NV, "ai", obj(TextObject::Indent { around: true, below: false })),
    row(NV, "aI", obj(TextObject::Indent { around: true, below: true })),
    row(NV, "ie", obj(TextObject::Entire { around: false })),
    row(NV, "ae", obj(TextObject::Entire { around: true })),
    row(NV, "af", obj(TextObject::Expanding)),

    // operators
    row(NV, "d", o(Op::Delete)),
    row(NV, "c", o(Op::Change)),
    row(NV, "y", o(Op::Yank)),
    row(NV, ">", o(Op::Indent)),
    row(NV, "<lt>", o(Op::Outdent)),
    row(NV, "g~", o(Op::ToggleCase)),
    row(NV, "gu", o(Op::Lowercase)),
    row(NV, "gU", o(Op::Uppercase)),
    row(N, "s", o(Op::AddSurround)),
    row(V, "S", o(Op::AddSurround)),
    row(V, "x", o(Op::Delete)), row(V, "<Del>", o(Op::Delete)),
    row(V, "s", o(Op::Change)),
    row(V, "~", o(Op::ToggleCase)),
    row(V, "u", o(Op::Lowercase)),
    row(V, "U", o(Op::Uppercase)),
    row(N, "~", c(K::OperatorOnLines(Op::ToggleCase))),
    row(N, "u", c(K::OperatorOnLines(Op::Lowercase))),
    row(N, "U", c(K::OperatorOnLines(Op::Uppercase))),
    row(N, "s", c(K::OperatorOnLines(Op::AddSurround))),
    row(N, "s<character>", c(K::DeleteSurround)),
    row(N, "s<character><character>", c(K::ChangeSurround)),

    // normal-mode commands
    row(N, "i", c(K::EnterInsert(InsertEntry::AtCursor))),
    row(N, "a", c(K::EnterInsert(InsertEntry::AfterCursor))),
    row(N, "I", c(K::EnterInsert(InsertEntry::LineStart))),
    row(N, "A", c(K::EnterInsert(InsertEntry::LineEnd))),
    row(N, "o", c(K::EnterInsert(InsertEntry::LineBelow))),
    row(N, "O", c(K::EnterInsert(InsertEntry::LineAbove))),
    row(N, "s", c(K::Substitute)),
    row(N, "S", c(K::SubstituteLine)),
    row(N, "x", c(K::DeleteChar)),
    row(N, "X", c(K::DeleteCharBefore)),
    row(N, "<Del>", c(K::DeleteKey)),
    row(N, "D", c(K::DeleteToLineEnd)),
    row(N, "C", c(K::ChangeToLineEnd)),
    row(N, "Y", c(K::YankLine)),
    row(NV, "p", c(K::Put { before: false })),
    row(NV, "P", c(K::Put { before: true })),
    row(NV, "r<character>", c(K::ReplaceChar)),
    row(N, "R", c(K::EnterReplace)),
    row(NV, "J", c(K::Join { spaces: true })),
    row(NV, "gJ", c(K::Join { spaces: false })),
    row(N, "~", c(K::ToggleCaseChar)),
    row(N, "u", c(K::Undo)),
    row(N, "<C-r>", c(K::Redo)),
    row(N, ".", c(K::Repeat)),
    row(N, "q<character>", c(K::RecordMacro)),
    row(N, "q", c(K::StopRecording)),
    row(N, "@<character>", c(K::PlayMacro)),
    row(N, "@@", c(K::PlayLastMacro)),
    row(NV, "v", c(K::EnterVisual(VisualKind::CharWise))),
    row(NV, "V", c(K::EnterVisual(VisualKind::LineWise))),
    row(NV, "<C-v>", c(K::EnterVisual(VisualKind::BlockWise))),
    row(N, ":", c(K::EnterCommandLine(Prompt::Command))),
    row(N, "/", c(K::EnterCommandLine(Prompt::SearchForward))),
    row(N, "?", c(K::EnterCommandLine(Prompt::SearchBackward))),

    // visual-mode commands
    row(V, "o", c(K::SwapAnchor)), row(V, "O", c(K::SwapAnchor)),
    row(V, "X", c(K::VisualLines(Op::Delete))), row(V, "D", c(K::VisualLines(Op::Delete))),
    row(V, "Y", c(K::VisualLines(Op::Yank))),
    row(V, "C", c(K::VisualLines(Op::Change))), row(V, "R", c(K::VisualLines(Op::Change))),
    row(ModeSet::VISUAL_BLOCK, "I", c(K::BlockInsert { append: false })),
    row(ModeSet::VISUAL_BLOCK, "A", c(K::BlockInsert { append: true })),

    // insert and replace mode
    row(I, "<character>", c(K::InsertChar)),
    row(R, "<character>", c(K::ReplaceTyped)),
    row(IR, "<BS>", c(K::Backspace)), row(I, "<C-h>", c(K::Backspace)),
    row(I, "<Del>", c(K::DeleteForward)),
    row(I, "<C-w>", c(K::DeleteWordBefore)),
    row(I, "<C-u>", c(K::DeleteToLineStart)),
    row(I, "<C-t>", c(K::ShiftLine { outdent: false })),
    row(I, "<C-d>", c(K::ShiftLine { outdent: true })),
    row(I, "<C-k><any><any>", c(K::Digraph)),
    row(I, "<C-r><character>", c(K::InsertRegister)),
    row(I, "<C-a>", c(K::InsertLastInserted { exit: false })),
    row(I, "<C-@>", c(K::InsertLastInserted { exit: true })),
    row(I, "<C-o>", c(K::NormalOnce)),
    row(I, "<C-e>", c(K::CopyLine { from_below: true })),
    row(I, "<C-y>", c(K::CopyLine { from_below: false })),
    row(IR, "<Left>", c(K::InsertArrow(Mo::Left))),
    row(IR, "<Right>", c(K::InsertArrow(Mo::Right))),
    row(IR, "<Up>", c(K::InsertArrow(Mo::Up))),
    row(IR, "<Down>", c(K::InsertArrow(Mo::Down))),
    row(IR, "<Esc>", c(K::ExitInsert)), row(IR, "<C-c>", c(K::ExitInsert)),
    row(IR, "<C-[>", c(K::ExitInsert)),

    // command line
    row(CL, "<character>", c(K::CommandLineChar)),
    row(CL, "<BS>", c(K::CommandLineBackspace)),
    row(CL, "<Enter>", c(K::CommandLineSubmit)),
    row(CL, "<Esc>", c(K::CommandLineCancel)), row(CL, "<C-c>", c(K::CommandLineCancel)),
    row(CL, "<C-[>", c(K::CommandLineCancel)),

    // surround input
    row(SI, "<character>", c(K::SurroundChar)),
    row(SI, "<Esc>", c(K::Cancel)), row(SI, "<C-c>", c(K::Cancel)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::parse_keys;

    fn ctx(table: &DigraphTable) -> MatchContext<'_> {
        MatchContext {
            mode: Mode::Normal,
            pending_operator: None,
            count_started: false,
            recording: false,
            digraphs: table,
        }
    }

    #[test]
    fn zero_is_a_count_only_after_a_digit() {
        let table = DigraphTable::default();
        let mut cx = ctx(&table);
        let zero = parse_keys("0").unwrap();
        assert!(!Action::Command(CommandKind::Count).refine(&cx, &zero, true));
        cx.count_started = true;
        assert!(Action::Command(CommandKind::Count).refine(&cx, &zero, true));
    }

    #[test]
    fn pending_operator_only_admits_its_own_doubling() {
        let table = DigraphTable::default();
        let mut cx = ctx(&table);
        cx.pending_operator = Some(Operator::Delete);
        let keys = parse_keys("d").unwrap();
        assert!(Action::Operator(Operator::Delete).refine(&cx, &keys, true));
        assert!(!Action::Operator(Operator::Change).refine(&cx, &keys, true));
        assert!(!Action::Command(CommandKind::DeleteChar).refine(&cx, &keys, true));
        assert!(Action::Motion(Motion::WordForward { big: false }).refine(&cx, &keys, true));
    }

    #[test]
    fn text_objects_need_an_operator_in_normal_mode() {
        let table = DigraphTable::default();
        let cx = ctx(&table);
        let obj = Action::TextObject(TextObject::Word { around: false, big: false });
        assert!(!obj.refine(&cx, &parse_keys("iw").unwrap(), true));
    }

    #[test]
    fn macro_keys_depend_on_recording_state() {
        let table = DigraphTable::default();
        let mut cx = ctx(&table);
        let q = parse_keys("q").unwrap();
        assert!(!Action::Command(CommandKind::StopRecording).refine(&cx, &q, true));
        assert!(Action::Command(CommandKind::RecordMacro).refine(&cx, &q, false));
        cx.recording = true;
        assert!(Action::Command(CommandKind::StopRecording).refine(&cx, &q, true));
        assert!(!Action::Command(CommandKind::RecordMacro).refine(&cx, &q, false));
    }

    #[test]
    fn yank_is_not_editing() {
        assert!(!Action::Operator(Operator::Yank).caps().contains(ActionCaps::EDITING));
        assert!(Action::Operator(Operator::Delete).caps().contains(ActionCaps::EDITING));
        assert!(Action::Command(CommandKind::Undo).caps().contains(ActionCaps::ONCE));
    }
}
