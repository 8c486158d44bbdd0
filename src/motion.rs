use crate::text::{CharClass, Doc, Flat, classify, col_of_byte, is_blank, is_keyword};
use crate::traits::TextOps;
use crate::types::{Position, Range};

/// Cursor motions. Each one can move the cursor or delimit an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// `0`
    LineStart,
    /// `^`
    FirstNonBlank,
    /// `$`
    LineEnd,
    /// `|`
    Column,
    /// `+`, `<Enter>`
    NextLineFirstNonBlank,
    /// `-`
    PrevLineFirstNonBlank,
    /// `_`
    LineFirstNonBlank,
    /// `gg`
    DocumentStart,
    /// `G`
    DocumentEnd,
    WordForward { big: bool },
    WordBackward { big: bool },
    WordEnd { big: bool },
    WordEndBackward { big: bool },
    ParagraphForward,
    ParagraphBackward,
    SentenceForward,
    SentenceBackward,
    /// `f`, `t`, `F`, `T` followed by the target character.
    FindChar { forward: bool, till: bool },
    /// `;` and `,`
    RepeatFind { reverse: bool },
    /// `%`
    MatchPair,
    /// `n` and `N`
    SearchNext { reverse: bool },
    /// `*` and `#`
    SearchWord { forward: bool },
}

/// How an operator treats the span a motion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Exclusive,
    Inclusive,
    Linewise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindSpec {
    pub ch: char,
    pub forward: bool,
    pub till: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub pattern: String,
    pub forward: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MotionArgs<'s> {
    pub count: u32,
    pub count_given: bool,
    pub desired_col: Option<u32>,
    pub ch: Option<char>,
    pub for_operator: bool,
    pub last_find: Option<FindSpec>,
    pub last_search: Option<&'s SearchSpec>,
}

#[derive(Debug, Clone)]
pub(crate) struct MotionOutcome {
    pub pos: Position,
    pub kind: MotionKind,
    pub desired_col: Option<u32>,
    pub failed: bool,
    pub new_find: Option<FindSpec>,
    pub new_search: Option<SearchSpec>,
}

impl MotionOutcome {
    fn to(pos: Position, kind: MotionKind) -> Self {
        Self {
            pos,
            kind,
            desired_col: None,
            failed: false,
            new_find: None,
            new_search: None,
        }
    }

    fn fail(from: Position, kind: MotionKind) -> Self {
        Self {
            failed: true,
            ..Self::to(from, kind)
        }
    }
}

/// A span an operator acts on: `[start, end)`, or whole lines when `linewise`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OperatorRange {
    pub start: Position,
    pub end: Position,
    pub linewise: bool,
}

impl Motion {
    pub fn kind(self) -> MotionKind {
        use Motion::*;
        match self {
            Up | Down | NextLineFirstNonBlank | PrevLineFirstNonBlank | LineFirstNonBlank
            | DocumentStart | DocumentEnd => MotionKind::Linewise,
            LineEnd | WordEnd { .. } | WordEndBackward { .. } | FindChar { .. }
            | RepeatFind { .. } | MatchPair => MotionKind::Inclusive,
            _ => MotionKind::Exclusive,
        }
    }

    pub(crate) fn exec<T: TextOps + ?Sized>(
        self,
        doc: &Doc<'_, T>,
        from: Position,
        args: &MotionArgs<'_>,
    ) -> MotionOutcome {
        use Motion::*;
        let count = args.count.max(1);
        let kind = self.kind();
        let last = doc.last_line();
        let end_col = |line: u32| {
            if args.for_operator {
                doc.len(line)
            } else {
                doc.max_col(line)
            }
        };
        match self {
            Left => {
                if from.col == 0 {
                    return MotionOutcome::fail(from, kind);
                }
                MotionOutcome::to(from.left(count), kind)
            }
            Right => {
                let target = from.with_col(from.col.saturating_add(count).min(end_col(from.line)));
                if target == from && !args.for_operator {
                    return MotionOutcome::fail(from, kind);
                }
                MotionOutcome::to(target, kind)
            }
            Up | Down => {
                let line = if self == Up {
                    if from.line == 0 {
                        return MotionOutcome::fail(from, kind);
                    }
                    from.line.saturating_sub(count)
                } else {
                    if from.line >= last {
                        return MotionOutcome::fail(from, kind);
                    }
                    from.line.saturating_add(count).min(last)
                };
                let want = args.desired_col.unwrap_or(from.col);
                let mut out = MotionOutcome::to(Position::new(line, want.min(doc.max_col(line))), kind);
                out.desired_col = Some(want);
                out
            }
            LineStart => MotionOutcome::to(from.with_col(0), kind),
            FirstNonBlank => MotionOutcome::to(
                from.with_col(doc.first_non_blank(from.line).min(doc.max_col(from.line))),
                kind,
            ),
            LineEnd => {
                let line = from.line.saturating_add(count - 1).min(last);
                let mut out = MotionOutcome::to(Position::new(line, doc.max_col(line)), kind);
                out.desired_col = Some(u32::MAX);
                out
            }
            Column => MotionOutcome::to(from.with_col((count - 1).min(end_col(from.line))), kind),
            NextLineFirstNonBlank => {
                if from.line >= last {
                    return MotionOutcome::fail(from, kind);
                }
                MotionOutcome::to(first_non_blank(doc, from.line.saturating_add(count).min(last)), kind)
            }
            PrevLineFirstNonBlank => {
                if from.line == 0 {
                    return MotionOutcome::fail(from, kind);
                }
                MotionOutcome::to(first_non_blank(doc, from.line.saturating_sub(count)), kind)
            }
            LineFirstNonBlank => {
                MotionOutcome::to(first_non_blank(doc, from.line.saturating_add(count - 1).min(last)), kind)
            }
            DocumentStart => {
                let line = if args.count_given { (count - 1).min(last) } else { 0 };
                MotionOutcome::to(first_non_blank(doc, line), kind)
            }
            DocumentEnd => {
                let line = if args.count_given { (count - 1).min(last) } else { last };
                MotionOutcome::to(first_non_blank(doc, line), kind)
            }
            WordForward { big } => MotionOutcome::to(word_forward(doc, from, count, big), kind),
            WordBackward { big } => MotionOutcome::to(word_backward(doc, from, count, big), kind),
            WordEnd { big } => MotionOutcome::to(word_end(doc, from, count, big), kind),
            WordEndBackward { big } => {
                MotionOutcome::to(word_end_backward(doc, from, count, big), kind)
            }
            ParagraphForward => {
                let mut line = from.line;
                for _ in 0..count {
                    while line < last && doc.is_empty_line(line) {
                        line += 1;
                    }
                    while line < last && !doc.is_empty_line(line) {
                        line += 1;
                    }
                }
                if line == last && !doc.is_empty_line(last) {
                    MotionOutcome::to(Position::new(last, end_col(last)), kind)
                } else {
                    MotionOutcome::to(Position::new(line, 0), kind)
                }
            }
            ParagraphBackward => {
                let mut line = from.line;
                for _ in 0..count {
                    while line > 0 && doc.is_empty_line(line) {
                        line -= 1;
                    }
                    while line > 0 && !doc.is_empty_line(line) {
                        line -= 1;
                    }
                }
                MotionOutcome::to(Position::new(line, 0), kind)
            }
            SentenceForward => MotionOutcome::to(sentence_forward(doc, from, count), kind),
            SentenceBackward => MotionOutcome::to(sentence_backward(doc, from, count), kind),
            FindChar { forward, till } => {
                let Some(ch) = args.ch else {
                    return MotionOutcome::fail(from, kind);
                };
                let find = FindSpec { ch, forward, till };
                let mut out = match find_in_line(doc, from, find, count, false) {
                    Some(p) => MotionOutcome::to(p, kind),
                    None => MotionOutcome::fail(from, kind),
                };
                out.new_find = Some(find);
                out
            }
            RepeatFind { reverse } => {
                let Some(mut find) = args.last_find else {
                    return MotionOutcome::fail(from, kind);
                };
                if reverse {
                    find.forward = !find.forward;
                }
                match find_in_line(doc, from, find, count, true) {
                    Some(p) => MotionOutcome::to(p, kind),
                    None => MotionOutcome::fail(from, kind),
                }
            }
            MatchPair => {
                if args.count_given {
                    let total = doc.line_count();
                    let line = ((count.min(100) * total).div_ceil(100)).saturating_sub(1);
                    return MotionOutcome::to(first_non_blank(doc, line.min(last)), MotionKind::Linewise);
                }
                match match_pair(doc, from) {
                    Some(p) => MotionOutcome::to(p, kind),
                    None => MotionOutcome::fail(from, kind),
                }
            }
            SearchNext { reverse } => {
                let Some(find) = args.last_search else {
                    return MotionOutcome::fail(from, kind);
                };
                let forward = find.forward != reverse;
                let mut pos = from;
                for _ in 0..count {
                    match search(doc, pos, &find.pattern, forward) {
                        Some(p) => pos = p,
                        None => return MotionOutcome::fail(from, kind),
                    }
                }
                MotionOutcome::to(pos, kind)
            }
            SearchWord { forward } => {
                let Some((word_start, word)) = word_under_cursor(doc, from) else {
                    return MotionOutcome::fail(from, kind);
                };
                let mut pos = if forward { from } else { word_start };
                for _ in 0..count {
                    match search(doc, pos, &word, forward) {
                        Some(p) => pos = p,
                        None => return MotionOutcome::fail(from, kind),
                    }
                }
                let mut out = MotionOutcome::to(pos, kind);
                out.new_search = Some(SearchSpec {
                    pattern: word,
                    forward,
                });
                out
            }
        }
    }
}

fn first_non_blank<T: TextOps + ?Sized>(doc: &Doc<'_, T>, line: u32) -> Position {
    Position::new(line, doc.first_non_blank(line).min(doc.max_col(line)))
}

fn class_at<T: TextOps + ?Sized>(doc: &Doc<'_, T>, pos: Position, big: bool) -> CharClass {
    doc.char_at(pos)
        .map_or(CharClass::Blank, |c| classify(c, big))
}

/// Start of the next word. Empty lines count as words.
pub(crate) fn word_forward<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    from: Position,
    count: u32,
    big: bool,
) -> Position {
    let mut p = from;
    for _ in 0..count {
        let Some(_) = doc.char_at(p) else { break };
        let cls = class_at(doc, p, big);
        if cls != CharClass::Blank {
            while let Some(next) = doc.advance(p) {
                p = next;
                if class_at(doc, p, big) != cls || doc.char_at(p) == Some('\n') {
                    break;
                }
            }
        }
        loop {
            match doc.char_at(p) {
                None => break,
                Some('\n') => {
                    let Some(next) = doc.advance(p) else { break };
                    p = next;
                    if doc.is_empty_line(p.line) {
                        break;
                    }
                }
                Some(c) if is_blank(c) => match doc.advance(p) {
                    Some(next) => p = next,
                    None => break,
                },
                Some(_) => break,
            }
        }
    }
    p
}

pub(crate) fn word_backward<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    from: Position,
    count: u32,
    big: bool,
) -> Position {
    let mut p = from;
    for _ in 0..count {
        let Some(mut q) = doc.retreat(p) else {
            p = Position::ZERO;
            break;
        };
        // skip blanks; an empty line is a word of its own
        loop {
            if doc.is_empty_line(q.line) && q.col == 0 {
                break;
            }
            match doc.char_at(q) {
                Some(c) if is_blank(c) => match doc.retreat(q) {
                    Some(prev) => q = prev,
                    None => break,
                },
                _ => break,
            }
        }
        if !doc.is_empty_line(q.line) {
            let cls = class_at(doc, q, big);
            while let Some(prev) = doc.retreat(q) {
                if doc.char_at(prev) == Some('\n') || class_at(doc, prev, big) != cls {
                    break;
                }
                q = prev;
            }
        }
        p = q;
    }
    p
}

/// Last character of the current or next word.
pub(crate) fn word_end<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    from: Position,
    count: u32,
    big: bool,
) -> Position {
    let mut p = from;
    for _ in 0..count {
        let Some(mut q) = doc.advance(p) else { break };
        while doc.char_at(q).is_some_and(is_blank) {
            match doc.advance(q) {
                Some(next) => q = next,
                None => break,
            }
        }
        if doc.char_at(q).is_none() {
            break;
        }
        let cls = class_at(doc, q, big);
        while let Some(next) = doc.advance(q) {
            if doc.char_at(next) == Some('\n') || class_at(doc, next, big) != cls {
                break;
            }
            q = next;
        }
        p = q;
    }
    p
}

/// End of the previous word (`ge`).
pub(crate) fn word_end_backward<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    from: Position,
    count: u32,
    big: bool,
) -> Position {
    let mut p = from;
    for _ in 0..count {
        let cls = class_at(doc, p, big);
        let mut q = p;
        if cls != CharClass::Blank {
            loop {
                let Some(prev) = doc.retreat(q) else {
                    return Position::ZERO;
                };
                q = prev;
                if doc.char_at(q) == Some('\n') || class_at(doc, q, big) != cls {
                    break;
                }
            }
        } else {
            match doc.retreat(q) {
                Some(prev) => q = prev,
                None => return Position::ZERO,
            }
        }
        loop {
            if doc.is_empty_line(q.line) {
                break;
            }
            match doc.char_at(q) {
                Some(c) if is_blank(c) => match doc.retreat(q) {
                    Some(prev) => q = prev,
                    None => return Position::ZERO,
                },
                _ => break,
            }
        }
        p = q.with_col(q.col.min(doc.max_col(q.line)));
    }
    p
}

fn find_in_line<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    from: Position,
    find: FindSpec,
    count: u32,
    repeat: bool,
) -> Option<Position> {
    let chars = doc.chars(from.line);
    let col = from.col as usize;
    // a repeated `t` must not get stuck right before its target
    let skip = usize::from(repeat && find.till);
    let mut found = 0;
    if find.forward {
        for (i, c) in chars.iter().enumerate().skip(col + 1 + skip) {
            if *c == find.ch {
                found += 1;
                if found == count {
                    let target = if find.till { i - 1 } else { i };
                    return Some(from.with_col(target as u32));
                }
            }
        }
    } else {
        for i in (0..col.saturating_sub(skip)).rev() {
            if chars[i] == find.ch {
                found += 1;
                if found == count {
                    let target = if find.till { i + 1 } else { i };
                    return Some(from.with_col(target as u32));
                }
            }
        }
    }
    None
}

const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

/// Offset of the bracket matching the one at `at`, honouring nesting.
pub(crate) fn matching_bracket(flat: &Flat, at: usize) -> Option<usize> {
    let c = *flat.chars.get(at)?;
    for (open, close) in PAIRS {
        let mut depth = 0usize;
        if c == open {
            for (i, ch) in flat.chars.iter().enumerate().skip(at) {
                if *ch == open {
                    depth += 1;
                } else if *ch == close {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
            }
            return None;
        }
        if c == close {
            for i in (0..=at).rev() {
                let ch = flat.chars[i];
                if ch == close {
                    depth += 1;
                } else if ch == open {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
            }
            return None;
        }
    }
    None
}

fn match_pair<T: TextOps + ?Sized>(doc: &Doc<'_, T>, from: Position) -> Option<Position> {
    let chars = doc.chars(from.line);
    let bracket_col = chars
        .iter()
        .enumerate()
        .skip(from.col as usize)
        .find(|(_, c)| PAIRS.iter().any(|(o, cl)| *c == o || *c == cl))
        .map(|(i, _)| i as u32)?;
    let flat = Flat::new(doc);
    let at = flat.offset(from.with_col(bracket_col));
    matching_bracket(&flat, at).map(|off| flat.pos(off))
}

/// Offsets at which sentences begin. Empty lines are sentences of their own.
pub(crate) fn sentence_starts(flat: &Flat) -> Vec<usize> {
    let c = &flat.chars;
    let n = c.len();
    let mut starts = Vec::new();
    let mut looking = true;
    let mut i = 0;
    while i < n {
        let ch = c[i];
        if ch == '\n' && (i == 0 || c[i - 1] == '\n') {
            starts.push(i);
            looking = true;
            i += 1;
            continue;
        }
        if looking {
            if !is_blank(ch) {
                starts.push(i);
                looking = false;
            }
            i += 1;
            continue;
        }
        if matches!(ch, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < n && matches!(c[j], ')' | ']' | '"' | '\'') {
                j += 1;
            }
            if j == n || is_blank(c[j]) {
                looking = true;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    if starts.is_empty() {
        starts.push(0);
    }
    starts
}

fn sentence_forward<T: TextOps + ?Sized>(doc: &Doc<'_, T>, from: Position, count: u32) -> Position {
    let flat = Flat::new(doc);
    let starts = sentence_starts(&flat);
    let mut off = flat.offset(from);
    for _ in 0..count {
        off = starts
            .iter()
            .copied()
            .find(|s| *s > off)
            .unwrap_or(flat.len());
    }
    if off >= flat.len() {
        return doc.doc_end();
    }
    flat.pos(off)
}

fn sentence_backward<T: TextOps + ?Sized>(doc: &Doc<'_, T>, from: Position, count: u32) -> Position {
    let flat = Flat::new(doc);
    let starts = sentence_starts(&flat);
    let mut off = flat.offset(from);
    for _ in 0..count {
        off = starts.iter().copied().rev().find(|s| *s < off).unwrap_or(0);
    }
    flat.pos(off)
}

fn word_under_cursor<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    from: Position,
) -> Option<(Position, String)> {
    let chars = doc.chars(from.line);
    let mut start = (from.col as usize..chars.len()).find(|i| is_keyword(chars[*i]))?;
    while start > 0 && is_keyword(chars[start - 1]) {
        start -= 1;
    }
    let end = (start..chars.len())
        .find(|i| !is_keyword(chars[*i]))
        .unwrap_or(chars.len());
    let word = doc
        .buf()
        .slice_to_string(Range::new(
            from.with_col(start as u32),
            from.with_col(end as u32),
        ));
    Some((from.with_col(start as u32), word))
}

/// Plain-text search from `from` (exclusive), wrapping around the document.
pub(crate) fn search<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    from: Position,
    pattern: &str,
    forward: bool,
) -> Option<Position> {
    if pattern.is_empty() {
        return None;
    }
    let total = doc.line_count();
    let matches_in = |line: u32| -> Vec<u32> {
        let text = doc.text(line);
        text.match_indices(pattern)
            .map(|(b, _)| col_of_byte(&text, b))
            .collect()
    };
    if forward {
        for step in 0..=total {
            let line = (from.line + step) % total;
            let cols = matches_in(line);
            let hit = if step == 0 {
                cols.into_iter().find(|c| *c > from.col)
            } else if step == total {
                cols.into_iter().find(|c| *c <= from.col)
            } else {
                cols.into_iter().next()
            };
            if let Some(col) = hit {
                return Some(Position::new(line, col));
            }
        }
    } else {
        for step in 0..=total {
            let line = (from.line + total * 2 - step) % total;
            let cols = matches_in(line);
            let hit = if step == 0 {
                cols.into_iter().rev().find(|c| *c < from.col)
            } else if step == total {
                cols.into_iter().rev().find(|c| *c >= from.col)
            } else {
                cols.into_iter().next_back()
            };
            if let Some(col) = hit {
                return Some(Position::new(line, col));
            }
        }
    }
    None
}

/// The span an operator covers when driven by `motion` from `from`.
///
/// Inclusive motions have their end shifted right by one. An exclusive
/// motion that ends in column 0 of a later line is pulled back to the end
/// of the previous line, and becomes linewise when it also started at or
/// before the first non-blank.
pub(crate) fn operator_range<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    motion: Motion,
    from: Position,
    out: &MotionOutcome,
) -> Option<OperatorRange> {
    if out.failed {
        return None;
    }
    let (a, b) = if out.pos < from {
        (out.pos, from)
    } else {
        (from, out.pos)
    };
    let range = match out.kind {
        MotionKind::Linewise => OperatorRange {
            start: Position::new(a.line, 0),
            end: Position::new(b.line, doc.len(b.line)),
            linewise: true,
        },
        MotionKind::Inclusive => {
            let end = if b.col < doc.len(b.line) { b.right(1) } else { b };
            OperatorRange {
                start: a,
                end,
                linewise: false,
            }
        }
        MotionKind::Exclusive => {
            let mut end = b;
            let mut linewise = false;
            if b.line > a.line {
                if matches!(motion, Motion::WordForward { .. }) {
                    let prev = b.line - 1;
                    let candidate = Position::new(prev, doc.len(prev));
                    if candidate > a {
                        end = candidate;
                    }
                } else if b.col == 0 {
                    let prev = b.line - 1;
                    end = Position::new(prev, doc.len(prev));
                    linewise = a.col <= doc.first_non_blank(a.line) && end.line > a.line;
                }
            }
            if linewise {
                OperatorRange {
                    start: Position::new(a.line, 0),
                    end,
                    linewise: true,
                }
            } else {
                OperatorRange {
                    start: a,
                    end,
                    linewise: false,
                }
            }
        }
    };
    Some(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lines(Vec<&'static str>);

    impl TextOps for Lines {
        fn line_count(&self) -> u32 {
            self.0.len() as u32
        }
        fn line(&self, line: u32) -> String {
            self.0.get(line as usize).copied().unwrap_or_default().to_string()
        }
    }

    fn code() -> Lines {
        Lines(vec![
            "if (true) {",
            "  print(\"hello\")",
            "  print(\"hello\")",
            "",
            "  print(\"hello\");",
            "  ",
            "} // endif",
        ])
    }

    #[test]
    fn w_skips_whitespace_only_lines() {
        let buf = code();
        let doc = Doc::new(&buf);
        assert_eq!(
            word_forward(&doc, Position::new(4, 14), 1, false),
            Position::new(6, 0)
        );
    }

    #[test]
    fn w_stops_on_empty_lines() {
        let buf = code();
        let doc = Doc::new(&buf);
        assert_eq!(
            word_forward(&doc, Position::new(2, 15), 1, false),
            Position::new(3, 0)
        );
    }

    #[test]
    fn w_on_last_word_reaches_document_end() {
        let buf = code();
        let doc = Doc::new(&buf);
        assert_eq!(
            word_forward(&doc, Position::new(6, 6), 1, false),
            Position::new(6, 10)
        );
    }

    #[test]
    fn b_mirrors_w() {
        let buf = code();
        let doc = Doc::new(&buf);
        assert_eq!(
            word_backward(&doc, Position::new(6, 0), 1, false),
            Position::new(4, 14)
        );
        assert_eq!(
            word_backward(&doc, Position::new(4, 2), 1, false),
            Position::new(3, 0)
        );
        assert_eq!(
            word_backward(&doc, Position::new(1, 2), 1, false),
            Position::new(0, 10)
        );
    }

    #[test]
    fn ge_walks_word_ends_across_lines() {
        let buf = Lines(vec!["one two", "three", "four five"]);
        let doc = Doc::new(&buf);
        let mut p = Position::new(2, 8);
        let mut seen = Vec::new();
        for _ in 0..4 {
            p = word_end_backward(&doc, p, 1, false);
            seen.push(p);
        }
        assert_eq!(
            seen,
            vec![
                Position::new(2, 3),
                Position::new(1, 4),
                Position::new(0, 6),
                Position::new(0, 2),
            ]
        );
    }

    #[test]
    fn e_lands_on_word_ends() {
        let buf = Lines(vec!["foo.bar baz"]);
        let doc = Doc::new(&buf);
        assert_eq!(word_end(&doc, Position::ZERO, 1, false), Position::new(0, 2));
        assert_eq!(word_end(&doc, Position::ZERO, 1, true), Position::new(0, 6));
        assert_eq!(word_end(&doc, Position::new(0, 2), 1, false), Position::new(0, 3));
    }

    #[test]
    fn match_pair_honours_nesting() {
        let buf = Lines(vec!["f(a, (b), c)"]);
        let doc = Doc::new(&buf);
        assert_eq!(match_pair(&doc, Position::ZERO), Some(Position::new(0, 11)));
        assert_eq!(match_pair(&doc, Position::new(0, 11)), Some(Position::new(0, 1)));
        assert_eq!(match_pair(&doc, Position::new(0, 5)), Some(Position::new(0, 7)));
    }

    #[test]
    fn sentence_starts_follow_terminators_and_empty_lines() {
        let buf = Lines(vec!["One. Two! Three", "", "Four."]);
        let doc = Doc::new(&buf);
        let flat = Flat::new(&doc);
        let starts: Vec<Position> = sentence_starts(&flat)
            .into_iter()
            .map(|o| flat.pos(o))
            .collect();
        assert_eq!(
            starts,
            vec![
                Position::new(0, 0),
                Position::new(0, 5),
                Position::new(0, 10),
                Position::new(1, 0),
                Position::new(2, 0),
            ]
        );
    }

    #[test]
    fn search_wraps_around() {
        let buf = Lines(vec!["foo bar", "baz foo"]);
        let doc = Doc::new(&buf);
        assert_eq!(search(&doc, Position::new(1, 4), "foo", true), Some(Position::ZERO));
        assert_eq!(search(&doc, Position::ZERO, "foo", false), Some(Position::new(1, 4)));
        assert_eq!(search(&doc, Position::ZERO, "nope", true), None);
    }

    #[test]
    fn inclusive_ranges_shift_their_end() {
        let buf = Lines(vec!["hello world"]);
        let doc = Doc::new(&buf);
        let args = MotionArgs {
            count: 1,
            for_operator: true,
            ..MotionArgs::default()
        };
        let motion = Motion::WordEnd { big: false };
        let out = motion.exec(&doc, Position::ZERO, &args);
        let range = operator_range(&doc, motion, Position::ZERO, &out).unwrap();
        assert_eq!(range.end, Position::new(0, 5));
        assert!(!range.linewise);
    }

    #[test]
    fn dw_on_last_word_stops_at_line_end() {
        let buf = Lines(vec!["foo bar", "  baz"]);
        let doc = Doc::new(&buf);
        let args = MotionArgs {
            count: 1,
            for_operator: true,
            ..MotionArgs::default()
        };
        let motion = Motion::WordForward { big: false };
        let from = Position::new(0, 4);
        let out = motion.exec(&doc, from, &args);
        let range = operator_range(&doc, motion, from, &out).unwrap();
        assert_eq!(range.end, Position::new(0, 7));
    }
}
