mod support;
use modal_engine::types::Mode;
use support::harness::{check, check_mode};

#[test]
fn word_objects() {
    check(&["one t|wo three"], "diw", &["one | three"]);
    check(&["one t|wo three"], "daw", &["one |three"]);
}

#[test]
fn bracket_objects() {
    check(&["f(a, |b)"], "ci(x<Esc>", &["f(|x)"]);
    check_mode(&["f|()"], "ci(", &["f(|)"], Mode::Insert);
    check(&["if x {", "  bo|dy", "}"], "di{", &["if x {", "|}"]);
}

#[test]
fn quote_objects() {
    check(&["say \"h|i there\" now"], "di\"", &["say \"|\" now"]);
    check(&["say \"h|i there\" now"], "da\"", &["say |now"]);
}

#[test]
fn tag_object() {
    check(&["<a>t|ext</a>"], "dit", &["<a>|</a>"]);
}

#[test]
fn paragraph_objects() {
    check(&["a", "|b", "", "c"], "dip", &["|", "c"]);
    check(&["a", "|b", "", "c"], "dap", &["|c"]);
}

#[test]
fn indentation_object() {
    check(&["fn x() {", "    a", "", "    |b", "}"], "dii", &["fn x() {", "|}"]);
}

#[test]
fn entire_buffer_object() {
    check(&["one", "t|wo", "three"], "dae", &["|"]);
}

#[test]
fn visual_brackets_grow() {
    check(&["f(a, (|b), c)"], "va(d", &["f(a, |, c)"]);
    check(&["f(a, (|b), c)"], "va(a(d", &["|f"]);
}

#[test]
fn expanding_object_takes_the_nearest_pair() {
    check(&["f(\"a|b\", [c])"], "daf", &["f(|, [c])"]);
}

#[test]
fn sentence_object() {
    check(&["One two. Thr|ee four."], "das", &["One two|."]);
}
