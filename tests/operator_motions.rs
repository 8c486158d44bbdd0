mod support;
use modal_engine::types::Mode;
use support::harness::{check, check_mode};

#[test]
fn delete_word() {
    check(&["|one two"], "dw", &["|two"]);
    check(&["one |two"], "dw", &["one| "]);
    check(&["|one two"], "de", &["| two"]);
}

#[test]
fn change_word_stops_at_word_end() {
    check(&["|one two"], "cwxy<Esc>", &["x|y two"]);
    check_mode(&["|one two"], "cw", &["| two"], Mode::Insert);
}

#[test]
fn counts_multiply() {
    check(&["|a b c d"], "2dw", &["|c d"]);
    check(&["|a b c d"], "d2w", &["|c d"]);
    check(&["|a b c d e f g h"], "2d3w", &["|g h"]);
}

#[test]
fn vertical_motions_delete_whole_lines() {
    check(&["|one", "two", "three"], "dj", &["|three"]);
    check(&["one", "two", "|three"], "dk", &["|one"]);
    check(&["one", "|two", "three"], "dG", &["|one"]);
    check(&["one", "two", "|three"], "dgg", &["|"]);
}

#[test]
fn find_motions_as_ranges() {
    check(&["|one two"], "dft", &["|wo"]);
    check(&["|one two"], "dtt", &["|two"]);
}

#[test]
fn delete_to_first_non_blank() {
    check(&["  one t|wo"], "d^", &["  |wo"]);
}

#[test]
fn yank_word_then_put_before() {
    check(&["|one two"], "ywP", &["one| one two"]);
}

#[test]
fn delete_paragraph() {
    check(&["|a", "b", "", "c"], "d}", &["|", "c"]);
}

#[test]
fn delete_to_matching_bracket() {
    check(&["f|(a) b"], "d%", &["f| b"]);
}

#[test]
fn indent_over_a_motion() {
    check(&["|a", "b", "c"], ">j", &["    |a", "    b", "c"]);
}

#[test]
fn case_operator_over_a_motion() {
    check(&["|one two"], "gUw", &["|ONE two"]);
}

#[test]
fn linewise_yank_cursor() {
    check(&["o|ne", "two"], "yj", &["o|ne", "two"]);
    check(&["one", "tw|o"], "yk", &["on|e", "two"]);
}
