use crate::motion::sentence_starts;
use crate::text::{CharClass, Doc, Flat, classify, indent_width, is_blank};
use crate::traits::TextOps;
use crate::types::Position;

/// Text objects (`iw`, `a(`, `it`, ...). Only valid after an operator or in Visual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextObject {
    Word { around: bool, big: bool },
    Sentence { around: bool },
    Paragraph { around: bool },
    Quote { around: bool, quote: char },
    Bracket { around: bool, open: char, close: char },
    Tag { around: bool },
    /// `ii`, `ai` (plus the line above) and `aI` (plus the lines above and below).
    Indent { around: bool, below: bool },
    /// `ie` trims leading and trailing blank lines, `ae` is the whole document.
    Entire { around: bool },
    /// `af`: the smallest quote, bracket or tag pair around the selection.
    Expanding,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ObjectArgs {
    pub count: u32,
    /// Anchor and active end of an existing Visual selection.
    pub visual: Option<(Position, Position)>,
}

/// The selected span, with `stop` inclusive.
///
/// An inner object with nothing inside (`i(` on `()`) is `empty` and
/// `start` is where text would go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObjectSpan {
    pub start: Position,
    pub stop: Position,
    pub linewise: bool,
    pub empty: bool,
}

impl ObjectSpan {
    fn chars(start: Position, stop: Position) -> Self {
        Self {
            start,
            stop,
            linewise: false,
            empty: false,
        }
    }

    fn lines(start: u32, stop: u32) -> Self {
        Self {
            start: Position::new(start, 0),
            stop: Position::new(stop, 0),
            linewise: true,
            empty: false,
        }
    }

    fn empty_at(at: Position) -> Self {
        Self {
            start: at,
            stop: at,
            linewise: false,
            empty: true,
        }
    }
}

impl TextObject {
    pub(crate) fn select<T: TextOps + ?Sized>(
        self,
        doc: &Doc<'_, T>,
        cursor: Position,
        args: &ObjectArgs,
    ) -> Option<ObjectSpan> {
        let count = args.count.max(1);
        match self {
            TextObject::Word { around, big } => word(doc, cursor, count, around, big, args.visual),
            TextObject::Sentence { around } => sentence(doc, cursor, around),
            TextObject::Paragraph { around } => paragraph(doc, cursor, count, around, args.visual),
            TextObject::Quote { around, quote } => quoted(doc, cursor, quote, around),
            TextObject::Bracket { around, open, close } => {
                grow(args.visual, count, |n| bracket(doc, cursor, open, close, n, around))
            }
            TextObject::Tag { around } => grow(args.visual, count, |n| tag(doc, cursor, n, around)),
            TextObject::Indent { around, below } => indent(doc, cursor, around, below),
            TextObject::Entire { around } => entire(doc, around),
            TextObject::Expanding => expanding(doc, cursor, args.visual),
        }
    }
}

/// Inclusive selection bounds in reading order.
fn selection_bounds(visual: Option<(Position, Position)>) -> Option<(Position, Position)> {
    visual.map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

/// Tries successive counts until the span grows beyond the current selection.
fn grow(
    visual: Option<(Position, Position)>,
    count: u32,
    mut find: impl FnMut(u32) -> Option<ObjectSpan>,
) -> Option<ObjectSpan> {
    let span = find(count)?;
    let Some((lo, hi)) = selection_bounds(visual) else {
        return Some(span);
    };
    if lo == hi || span.empty || span.start < lo || span.stop > hi {
        return Some(span);
    }
    let mut n = count + 1;
    while let Some(bigger) = find(n) {
        if bigger.start < lo || bigger.stop > hi {
            return Some(bigger);
        }
        n += 1;
    }
    Some(span)
}

fn run_start(chars: &[char], mut i: usize, big: bool) -> usize {
    let cls = classify(chars[i], big);
    while i > 0 && classify(chars[i - 1], big) == cls {
        i -= 1;
    }
    i
}

fn run_end(chars: &[char], mut i: usize, big: bool) -> usize {
    let cls = classify(chars[i], big);
    while i + 1 < chars.len() && classify(chars[i + 1], big) == cls {
        i += 1;
    }
    i
}

fn word<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    cursor: Position,
    count: u32,
    around: bool,
    big: bool,
    visual: Option<(Position, Position)>,
) -> Option<ObjectSpan> {
    let chars = doc.chars(cursor.line);
    if chars.is_empty() {
        return None;
    }
    let len = chars.len();
    let mut start;
    let mut end;
    // an existing forward selection is extended from just past its end
    let extending = match visual {
        Some((anchor, active)) if active > anchor && active.line == anchor.line => {
            if active.col as usize + 1 >= len {
                return Some(ObjectSpan::chars(anchor, active));
            }
            start = anchor.col as usize;
            end = active.col as usize;
            true
        }
        _ => {
            let col = (cursor.col as usize).min(len - 1);
            start = run_start(&chars, col, big);
            end = col;
            false
        }
    };
    for i in 0..count {
        if i > 0 || extending {
            if end + 1 >= len {
                break;
            }
            end += 1;
        }
        let on_blank = classify(chars[end], big) == CharClass::Blank;
        end = run_end(&chars, end, big);
        if around && end + 1 < len {
            let next_blank = classify(chars[end + 1], big) == CharClass::Blank;
            if on_blank || next_blank {
                end = run_end(&chars, end + 1, big);
            }
        }
    }
    if around && !extending {
        let trailing = classify(chars[end], big) == CharClass::Blank;
        if !trailing && start > 0 && classify(chars[start - 1], big) == CharClass::Blank {
            start = run_start(&chars, start - 1, big);
        }
    }
    Some(ObjectSpan::chars(
        cursor.with_col(start as u32),
        cursor.with_col(end as u32),
    ))
}

fn sentence<T: TextOps + ?Sized>(doc: &Doc<'_, T>, cursor: Position, around: bool) -> Option<ObjectSpan> {
    let flat = Flat::new(doc);
    if flat.len() == 0 {
        return None;
    }
    let starts = sentence_starts(&flat);
    let off = flat.offset(cursor).min(flat.len() - 1);
    let k = starts.iter().rposition(|s| *s <= off).unwrap_or(0);
    let begin = starts[k];
    let next = starts.get(k + 1).copied().unwrap_or(flat.len());
    let mut content_end = next.saturating_sub(1).max(begin);
    while content_end > begin && is_blank(flat.chars[content_end]) {
        content_end -= 1;
    }
    if off > content_end {
        // cursor sits in the blanks between two sentences
        let ws_end = next.saturating_sub(1).max(off);
        if !around {
            return Some(ObjectSpan::chars(flat.pos(content_end + 1), flat.pos(ws_end)));
        }
        let following_end = sentence_content_end(&flat, &starts, k + 1);
        return Some(ObjectSpan::chars(flat.pos(content_end + 1), flat.pos(following_end)));
    }
    if !around {
        return Some(ObjectSpan::chars(flat.pos(begin), flat.pos(content_end)));
    }
    if content_end + 1 < next {
        return Some(ObjectSpan::chars(flat.pos(begin), flat.pos(next - 1)));
    }
    let mut lead = begin;
    while lead > 0 && is_blank(flat.chars[lead - 1]) && flat.chars[lead - 1] != '\n' {
        lead -= 1;
    }
    Some(ObjectSpan::chars(flat.pos(lead), flat.pos(content_end)))
}

fn sentence_content_end(flat: &Flat, starts: &[usize], k: usize) -> usize {
    let Some(begin) = starts.get(k).copied() else {
        return flat.len().saturating_sub(1);
    };
    let next = starts.get(k + 1).copied().unwrap_or(flat.len());
    let mut end = next.saturating_sub(1).max(begin);
    while end > begin && is_blank(flat.chars[end]) {
        end -= 1;
    }
    end
}

fn paragraph<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    cursor: Position,
    count: u32,
    around: bool,
    visual: Option<(Position, Position)>,
) -> Option<ObjectSpan> {
    let last = doc.last_line();
    let (mut start, mut line) = match visual {
        Some((anchor, active)) if active.line > anchor.line => {
            if active.line >= last {
                return Some(ObjectSpan::lines(anchor.line, active.line));
            }
            (anchor.line, active.line + 1)
        }
        _ => (cursor.line, cursor.line),
    };
    let fresh = start == line;
    if fresh {
        let blank = doc.is_blank_line(line);
        while start > 0 && doc.is_blank_line(start - 1) == blank {
            start -= 1;
        }
    }
    let mut end = line;
    for i in 0..count {
        if i > 0 {
            if end >= last {
                break;
            }
            line = end + 1;
        }
        let blank = doc.is_blank_line(line);
        end = line;
        while end < last && doc.is_blank_line(end + 1) == blank {
            end += 1;
        }
        if around && end < last {
            let blank_next = !blank;
            let mut e = end + 1;
            while e < last && doc.is_blank_line(e + 1) == blank_next {
                e += 1;
            }
            end = e;
        }
    }
    if around && fresh && !doc.is_blank_line(cursor.line) {
        let has_trailing_blank = doc.is_blank_line(end);
        if !has_trailing_blank {
            while start > 0 && doc.is_blank_line(start - 1) {
                start -= 1;
            }
        }
    }
    Some(ObjectSpan::lines(start, end))
}

fn quote_positions(chars: &[char], quote: char) -> Vec<usize> {
    let mut out = Vec::new();
    let mut escaped = false;
    for (i, c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        if *c == '\\' {
            escaped = true;
        } else if *c == quote {
            out.push(i);
        }
    }
    out
}

fn quoted<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    cursor: Position,
    quote: char,
    around: bool,
) -> Option<ObjectSpan> {
    let chars = doc.chars(cursor.line);
    let qs = quote_positions(&chars, quote);
    let col = cursor.col as usize;
    let (open, close) = if let Some(idx) = qs.iter().position(|q| *q == col) {
        if idx % 2 == 0 {
            (qs[idx], *qs.get(idx + 1)?)
        } else {
            (qs[idx - 1], qs[idx])
        }
    } else {
        let before = qs.iter().filter(|q| **q < col).count();
        if before % 2 == 1 {
            (qs[before - 1], *qs.get(before)?)
        } else {
            (*qs.get(before)?, *qs.get(before + 1)?)
        }
    };
    let at = |c: usize| cursor.with_col(c as u32);
    if !around {
        if close == open + 1 {
            return Some(ObjectSpan::empty_at(at(close)));
        }
        return Some(ObjectSpan::chars(at(open + 1), at(close - 1)));
    }
    let mut end = close;
    while end + 1 < chars.len() && matches!(chars[end + 1], ' ' | '\t') {
        end += 1;
    }
    let mut start = open;
    if end == close {
        while start > 0 && matches!(chars[start - 1], ' ' | '\t') {
            start -= 1;
        }
    }
    Some(ObjectSpan::chars(at(start), at(end)))
}

fn unmatched_open(chars: &[char], from: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..=from.min(chars.len().checked_sub(1)?)).rev() {
        let c = chars[i];
        if c == close {
            depth += 1;
        } else if c == open {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

fn matching_close(chars: &[char], open_at: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in chars.iter().enumerate().skip(open_at) {
        if *c == open {
            depth += 1;
        } else if *c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// The `count`-th pair of `open`/`close` around `off`. A cursor on a
/// closing bracket belongs to the pair it closes.
fn enclosing_pair(flat: &Flat, off: usize, open: char, close: char, count: u32) -> Option<(usize, usize)> {
    let chars = &flat.chars;
    let mut open_at = if chars.get(off) == Some(&close) {
        let mut depth = 0usize;
        (0..=off).rev().find(|i| {
            let c = chars[*i];
            if c == close {
                depth += 1;
            } else if c == open {
                depth -= 1;
            }
            depth == 0
        })?
    } else {
        unmatched_open(chars, off, open, close)?
    };
    for _ in 1..count {
        open_at = unmatched_open(chars, open_at.checked_sub(1)?, open, close)?;
    }
    let close_at = matching_close(chars, open_at, open, close)?;
    (close_at >= off).then_some((open_at, close_at))
}

fn bracket<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    cursor: Position,
    open: char,
    close: char,
    count: u32,
    around: bool,
) -> Option<ObjectSpan> {
    let flat = Flat::new(doc);
    let off = flat.offset(cursor);
    let (o, c) = enclosing_pair(&flat, off, open, close, count)?;
    if around {
        return Some(ObjectSpan::chars(flat.pos(o), flat.pos(c)));
    }
    if c == o + 1 {
        return Some(ObjectSpan::empty_at(flat.pos(c)));
    }
    let mut start = o + 1;
    let mut stop = c - 1;
    let opens_line = flat.chars[start] == '\n';
    if opens_line {
        start += 1;
    }
    let mut close_own_line = false;
    let mut j = c;
    while j > start && matches!(flat.chars[j - 1], ' ' | '\t') {
        j -= 1;
    }
    if j > start && flat.chars[j - 1] == '\n' {
        close_own_line = true;
        stop = j - 1;
    }
    if start > stop {
        return Some(ObjectSpan::empty_at(flat.pos(start.min(c))));
    }
    if opens_line && close_own_line {
        let first = flat.pos(start).line;
        let last = flat.pos(j - 1).line;
        return Some(ObjectSpan::lines(first, last.max(first)));
    }
    Some(ObjectSpan::chars(flat.pos(start), flat.pos(stop)))
}

#[derive(Debug, Clone)]
struct TagSpan {
    open_start: usize,
    open_end: usize,
    close_start: usize,
    close_end: usize,
}

fn parse_tags(flat: &Flat) -> Vec<TagSpan> {
    let c = &flat.chars;
    let mut stack: Vec<(String, usize, usize)> = Vec::new();
    let mut out = Vec::new();
    let mut i = 0;
    while i < c.len() {
        if c[i] != '<' {
            i += 1;
            continue;
        }
        let Some(rel) = c[i..].iter().position(|ch| *ch == '>') else {
            break;
        };
        let end = i + rel;
        let inner: String = c[i + 1..end].iter().collect();
        if inner.starts_with('!') || inner.starts_with('?') || inner.ends_with('/') {
            i = end + 1;
            continue;
        }
        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim().to_string();
            if let Some(k) = stack.iter().rposition(|(n, _, _)| *n == name) {
                let (_, open_start, open_end) = stack[k].clone();
                stack.truncate(k);
                out.push(TagSpan {
                    open_start,
                    open_end,
                    close_start: i,
                    close_end: end,
                });
            }
        } else {
            let name: String = inner
                .chars()
                .take_while(|ch| !ch.is_whitespace())
                .collect();
            if !name.is_empty() {
                stack.push((name, i, end));
            }
        }
        i = end + 1;
    }
    out
}

fn tag<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    cursor: Position,
    count: u32,
    around: bool,
) -> Option<ObjectSpan> {
    let flat = Flat::new(doc);
    let off = flat.offset(cursor);
    let mut enclosing: Vec<TagSpan> = parse_tags(&flat)
        .into_iter()
        .filter(|t| t.open_start <= off && off <= t.close_end)
        .collect();
    enclosing.sort_by_key(|t| t.close_end - t.open_start);
    let t = enclosing.get(count as usize - 1)?;
    if around {
        return Some(ObjectSpan::chars(flat.pos(t.open_start), flat.pos(t.close_end)));
    }
    if t.close_start == t.open_end + 1 {
        return Some(ObjectSpan::empty_at(flat.pos(t.close_start)));
    }
    Some(ObjectSpan::chars(
        flat.pos(t.open_end + 1),
        flat.pos(t.close_start - 1),
    ))
}

fn indent<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    cursor: Position,
    around: bool,
    below: bool,
) -> Option<ObjectSpan> {
    let last = doc.last_line();
    let tab = doc.buf().tab_width();
    let valid = (cursor.line..=last)
        .chain((0..cursor.line).rev())
        .find(|l| !doc.is_blank_line(*l))?;
    let level = indent_width(&leading(doc, valid), tab);
    let belongs = |l: u32| doc.is_blank_line(l) || indent_width(&leading(doc, l), tab) >= level;
    let mut start = valid;
    while start > 0 && belongs(start - 1) {
        start -= 1;
    }
    let mut end = valid;
    while end < last && belongs(end + 1) {
        end += 1;
    }
    while start < valid && doc.is_blank_line(start) {
        start += 1;
    }
    while end > valid && doc.is_blank_line(end) {
        end -= 1;
    }
    if around && start > 0 {
        start -= 1;
    }
    if around && below && end < last {
        end += 1;
    }
    Some(ObjectSpan::lines(start, end))
}

fn leading<T: TextOps + ?Sized>(doc: &Doc<'_, T>, line: u32) -> String {
    let text = doc.text(line);
    crate::text::leading_whitespace(&text).to_string()
}

fn entire<T: TextOps + ?Sized>(doc: &Doc<'_, T>, around: bool) -> Option<ObjectSpan> {
    let last = doc.last_line();
    if around {
        return Some(ObjectSpan::lines(0, last));
    }
    let first = (0..=last).find(|l| !doc.is_blank_line(*l))?;
    let end = (0..=last).rev().find(|l| !doc.is_blank_line(*l))?;
    Some(ObjectSpan::lines(first, end))
}

fn expanding<T: TextOps + ?Sized>(
    doc: &Doc<'_, T>,
    cursor: Position,
    visual: Option<(Position, Position)>,
) -> Option<ObjectSpan> {
    let flat = Flat::new(doc);
    let (lo, hi) = selection_bounds(visual).unwrap_or((cursor, cursor));
    let lo_off = flat.offset(lo);
    let hi_off = flat.offset(hi);
    let size = |s: &ObjectSpan| flat.offset(s.stop) - flat.offset(s.start);
    let strictly_around = |s: &ObjectSpan| {
        let (a, b) = (flat.offset(s.start), flat.offset(s.stop));
        a <= lo_off && hi_off <= b && (a, b) != (lo_off, hi_off)
    };
    let mut candidates = Vec::new();
    for quote in ['"', '\'', '`'] {
        candidates.extend(quoted(doc, cursor, quote, true));
    }
    for (open, close) in [('(', ')'), ('{', '}'), ('[', ']')] {
        for n in 1..=8 {
            match bracket(doc, cursor, open, close, n, true) {
                Some(s) if strictly_around(&s) => {
                    candidates.push(s);
                    break;
                }
                Some(_) => continue,
                None => break,
            }
        }
    }
    for n in 1..=8 {
        match tag(doc, cursor, n, true) {
            Some(s) if strictly_around(&s) => {
                candidates.push(s);
                break;
            }
            Some(_) => continue,
            None => break,
        }
    }
    candidates
        .into_iter()
        .filter(|s| !s.empty && strictly_around(s))
        .min_by_key(|s| size(s))
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

    fn select(lines: Vec<&'static str>, obj: TextObject, at: Position) -> Option<ObjectSpan> {
        let buf = Lines(lines);
        let doc = Doc::new(&buf);
        obj.select(&doc, at, &ObjectArgs { count: 1, visual: None })
    }

    fn span(start: (u32, u32), stop: (u32, u32)) -> ObjectSpan {
        ObjectSpan::chars(Position::new(start.0, start.1), Position::new(stop.0, stop.1))
    }

    #[test]
    fn inner_and_around_word() {
        let iw = TextObject::Word { around: false, big: false };
        let aw = TextObject::Word { around: true, big: false };
        let at = Position::new(0, 5);
        assert_eq!(select(vec!["foo bar baz"], iw, at), Some(span((0, 4), (0, 6))));
        assert_eq!(select(vec!["foo bar baz"], aw, at), Some(span((0, 4), (0, 7))));
        // no trailing blank: leading blank is taken instead
        assert_eq!(
            select(vec!["foo bar"], aw, at),
            Some(span((0, 3), (0, 6)))
        );
    }

    #[test]
    fn inner_quote_excludes_delimiters() {
        let iq = TextObject::Quote { around: false, quote: '"' };
        let got = select(vec![r#"say "hi there" now"#], iq, Position::new(0, 7));
        assert_eq!(got, Some(span((0, 5), (0, 12))));
        let empty = select(vec![r#"x = """#], iq, Position::new(0, 4)).unwrap();
        assert!(empty.empty);
    }

    #[test]
    fn brackets_nest_with_count() {
        let buf = Lines(vec!["f(a, (b), c)"]);
        let doc = Doc::new(&buf);
        let ib = TextObject::Bracket { around: false, open: '(', close: ')' };
        let inner = ib
            .select(&doc, Position::new(0, 6), &ObjectArgs { count: 1, visual: None })
            .unwrap();
        assert_eq!(inner, span((0, 6), (0, 6)));
        let outer = ib
            .select(&doc, Position::new(0, 6), &ObjectArgs { count: 2, visual: None })
            .unwrap();
        assert_eq!(outer, span((0, 2), (0, 10)));
    }

    #[test]
    fn cursor_on_closing_bracket_selects_its_pair() {
        let ab = TextObject::Bracket { around: true, open: '(', close: ')' };
        let got = select(vec!["(a (b) c)"], ab, Position::new(0, 5));
        assert_eq!(got, Some(span((0, 3), (0, 5))));
    }

    #[test]
    fn inner_block_on_own_lines_is_linewise() {
        let ib = TextObject::Bracket { around: false, open: '{', close: '}' };
        let got = select(vec!["if x {", "  body", "}"], ib, Position::new(1, 3)).unwrap();
        assert!(got.linewise);
        assert_eq!(got.start.line, 1);
        assert_eq!(got.stop.line, 1);
    }

    #[test]
    fn tags_pick_the_innermost_element() {
        let it = TextObject::Tag { around: false };
        let got = select(vec!["<a><b>x</b></a>"], it, Position::new(0, 6));
        assert_eq!(got, Some(span((0, 6), (0, 6))));
        let at = TextObject::Tag { around: true };
        let got = select(vec!["<a><b>x</b></a>"], at, Position::new(0, 1));
        assert_eq!(got, Some(span((0, 0), (0, 14))));
    }

    #[test]
    fn paragraph_is_linewise() {
        let ip = TextObject::Paragraph { around: false };
        let got = select(vec!["a", "b", "", "c"], ip, Position::new(1, 0)).unwrap();
        assert_eq!(got, ObjectSpan::lines(0, 1));
        let ap = TextObject::Paragraph { around: true };
        let got = select(vec!["a", "b", "", "c"], ap, Position::new(1, 0)).unwrap();
        assert_eq!(got, ObjectSpan::lines(0, 2));
    }

    #[test]
    fn indent_objects_follow_indentation() {
        let lines = vec!["fn x() {", "    a", "", "    b", "}"];
        let ii = TextObject::Indent { around: false, below: false };
        assert_eq!(select(lines.clone(), ii, Position::new(1, 4)), Some(ObjectSpan::lines(1, 3)));
        let ai = TextObject::Indent { around: true, below: false };
        assert_eq!(select(lines.clone(), ai, Position::new(1, 4)), Some(ObjectSpan::lines(0, 3)));
        let a_big = TextObject::Indent { around: true, below: true };
        assert_eq!(select(lines, a_big, Position::new(1, 4)), Some(ObjectSpan::lines(0, 4)));
    }

    #[test]
    fn entire_inner_trims_blank_lines() {
        let ie = TextObject::Entire { around: false };
        assert_eq!(select(vec!["", "a", "b", ""], ie, Position::ZERO), Some(ObjectSpan::lines(1, 2)));
    }

    #[test]
    fn expanding_prefers_the_smallest_pair() {
        let got = select(vec![r#"f("ab", [c])"#], TextObject::Expanding, Position::new(0, 3));
        assert_eq!(got, Some(span((0, 2), (0, 5))));
        let got = select(vec![r#"f("ab", [c])"#], TextObject::Expanding, Position::new(0, 9));
        assert_eq!(got, Some(span((0, 8), (0, 10))));
    }

    #[test]
    fn sentence_objects() {
        let is = TextObject::Sentence { around: false };
        let got = select(vec!["One two. Three four."], is, Position::new(0, 10));
        assert_eq!(got, Some(span((0, 9), (0, 19))));
        let as_ = TextObject::Sentence { around: true };
        let got = select(vec!["One two. Three four."], as_, Position::new(0, 1));
        assert_eq!(got, Some(span((0, 0), (0, 8))));
    }
}
