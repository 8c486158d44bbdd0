use modal_engine::types::{Cursor, Mode, Position};
mod support;
use support::harness::{Harness, check, check_mode};

#[test]
fn x_deletes_under_cursor() {
    check(&["te|xt"], "x", &["te|t"]);
    check(&["te|xt"], "2x", &["t|e"]);
}

#[test]
fn x_stops_at_line_end() {
    check(&["one tw|o"], "^llxxxxxxxxx", &["|"]);
}

#[test]
fn deleted_chars_can_be_put_on_a_new_line() {
    check(&["t|ext"], "2xo<Esc>p", &["tt", "e|x"]);
}

#[test]
fn delete_key_acts_like_x() {
    check(&["te|xt"], "<Del>", &["te|t"]);
    check(&["one tw|o"], "^ll<Del><Del><Del><Del><Del><Del><Del><Del><Del>", &["|"]);
}

#[test]
fn delete_key_trims_a_typed_count() {
    check(&["|text"], "10<Del>x", &["|ext"]);
}

#[test]
fn s_substitutes_count_chars() {
    check_mode(&["|text"], "3s", &["|t"], Mode::Insert);
    check_mode(&["te|xt"], "3s", &["te|"], Mode::Insert);
}

#[test]
fn cc_replaces_lines() {
    check(&["one", "|one two", "three"], "cca<Esc>", &["one", "|a", "three"]);
    check(
        &["one", "|one two", "three four", "five"],
        "2cca<Esc>",
        &["one", "|a", "five"],
    );
}

#[test]
fn cc_keeps_indentation() {
    check_mode(&["    |one"], "cc", &["    |"], Mode::Insert);
}

#[test]
fn yy_then_put_below_an_empty_line() {
    check(&["|one"], "yyO<Esc>p", &["", "|one", "one"]);
}

#[test]
fn d_capital_deletes_to_line_end() {
    check(&["tex|t"], "^llD", &["t|e"]);
    check(&["|"], "D", &["|"]);
    check(&["o|ne", "two", "three"], "1D", &["|o", "two", "three"]);
    check(&["o|ne", "two", "three", "four"], "3D", &["|o", "four"]);
    check(&["o|ne", "two", "three", "four"], "100D", &["|o"]);
    check(&["o|ne", "", "three"], "2D", &["|o", "three"]);
    check(&["tex|t"], "^llDD", &["|t"]);
}

#[test]
fn c_capital_changes_to_line_end() {
    check_mode(&["tex|t"], "^llC", &["te|"], Mode::Insert);
    check_mode(&["tex|t", "one", "two"], "^ll2C", &["te|", "two"], Mode::Insert);
}

#[test]
fn changed_text_can_be_inserted_from_its_register() {
    check_mode(
        &["tex|t", "one", "two"],
        "\"a2C<C-r>a",
        &["text", "one|", "two"],
        Mode::Insert,
    );
}

#[test]
fn r_replaces_characters() {
    check(&["tex|t"], "hrs", &["te|st"]);
    check(&["123|456", "789"], "2ra", &["123a|a6", "789"]);
    check(&["123|456", "789"], "4ra", &["123|456", "789"]);
    check(&["one", "two", "thre|e"], "kddrT", &["one", "|Three"]);
}

#[test]
fn r_enter_splits_the_line() {
    check(&["abc|defg", "12345"], "r<Enter>", &["abc", "|efg", "12345"]);
    check(&["abc|defg", "12345"], "3r<Enter>", &["abc", "|g", "12345"]);
}

#[test]
fn join_lines() {
    check(&["one", "tw|o"], "kJ", &["one| two"]);
    check(&["one", "two", "thre|e"], "kkJJ", &["one two| three"]);
    check(&["one", "two", "|"], "kJ", &["one", "two| "]);
    check(&["one", "two", "", "", "", "|"], "kkkkkJJJJJ", &["one two| "]);
    check(&["on|e", " two"], "J", &["one| two"]);
    check(&["on|e", "    "], "J", &["one| "]);
    check(&["   on|e", "    two"], "J", &["   one| two"]);
    check(&["one(", ")tw|o"], "kJ", &["one(|)two"]);
    check(&["on|e", "two"], "Jx", &["one|two"]);
}

#[test]
fn join_with_count() {
    check(&["|one", "two", "three", "four"], "3J", &["one two| three", "four"]);
    check(&["|one", "two", "three", "four"], "100J", &["one two three| four"]);
}

#[test]
fn join_in_visual_mode() {
    check_mode(&["on|e", "two"], "VJ", &["one| two"], Mode::Normal);
}

#[test]
fn gj_joins_without_spaces() {
    check(&["|one", "two"], "gJ", &["one|two"]);
    check(&["|one", "  two"], "gJ", &["one|two"]);
}

#[test]
fn join_on_last_line_does_nothing() {
    check(&["one", "tw|o"], "J", &["one", "tw|o"]);
}

#[test]
fn tilde_and_case_operators() {
    check(&["|text"], "~", &["T|ext"]);
    check(&["|one two"], "g~w", &["|ONE two"]);
    check(&["|One Two"], "guu", &["|one two"]);
    check(&["o|ne two"], "gUiw", &["|ONE two"]);
}

#[test]
fn backspace_at_line_start_joins() {
    check(&["one", "|"], "i<BS><Esc>", &["on|e"]);
}

#[test]
fn undo_restores_deleted_line() {
    check(&["one", "|two", "three"], "ddkPjddu", &["two", "|one", "three"]);
}

#[test]
fn redo_reapplies() {
    let mut h = Harness::new(&["|one", "two"]);
    h.keys("ddu");
    h.assert_state(&["|one", "two"]);
    h.keys("<C-r>");
    h.assert_state(&["|two"]);
}

#[test]
fn ge_walks_back_over_word_ends() {
    check(&["one two", "three", "four five|"], "gege", &["one two", "thre|e", "four five"]);
    check(
        &["one two", "three", "four five|"],
        "gegegegege",
        &["|one two", "three", "four five"],
    );
}

#[test]
fn dd_on_last_line_moves_up() {
    check(&["one", "  two", "thr|ee"], "dd", &["one", "  |two"]);
    check(&["o|nly"], "dd", &["|"]);
}

#[test]
fn indent_and_outdent_lines() {
    check(&["|one", "two"], ">>", &["    |one", "two"]);
    check(&["|one", "two"], "2>>", &["    |one", "    two"]);
    check(&["      |one"], "<<", &["  |one"]);
}

#[test]
fn escape_clears_a_pending_operator() {
    let mut h = Harness::new(&["|one two"]);
    h.keys("d<Esc>w");
    h.assert_state(&["one |two"]);
    assert_eq!(h.engine.snapshot().pending_operator, None);
}

#[test]
fn unknown_key_after_operator_cancels_it() {
    let mut h = Harness::new(&["|one two"]);
    h.keys("dzl");
    h.assert_state(&["o|ne two"]);
}

#[test]
fn escape_in_idle_normal_mode_changes_nothing() {
    let mut h = Harness::new(&["one |two", "three"]);
    h.keys("w");
    let before = h.engine.snapshot();
    h.commands.clear();

    h.keys("<Esc><Esc>");

    h.assert_state(&["one two", "|three"]);
    h.assert_mode(Mode::Normal);
    assert_eq!(h.engine.snapshot(), before);
    assert!(h.commands.is_empty(), "{:?}", h.commands);
    assert_eq!(h.buf.batches, 0);
}

#[test]
fn every_cursor_runs_x_in_one_batch() {
    let mut h = Harness::new(&["|abc", "defg"]);
    h.engine.set_cursors(vec![
        Cursor::at(Position::new(0, 1)),
        Cursor::at(Position::new(1, 2)),
    ]);

    h.keys("x");

    assert_eq!(h.lines(), vec!["ac".to_string(), "deg".to_string()]);
    assert_eq!(h.engine.cursors().len(), 2);
    assert_eq!(h.buf.batches, 1);
    assert_eq!(h.buf.undo_depth(), 1);
}

#[test]
fn every_cursor_runs_dw_in_one_batch() {
    let mut h = Harness::new(&["|one two", "red blue", "last"]);
    h.engine.set_cursors(vec![
        Cursor::at(Position::new(0, 0)),
        Cursor::at(Position::new(1, 0)),
    ]);

    h.keys("dw");

    assert_eq!(
        h.lines(),
        vec!["two".to_string(), "blue".to_string(), "last".to_string()]
    );
    assert_eq!(h.buf.batches, 1);
    assert_eq!(h.buf.undo_depth(), 1);

    h.keys("u");
    assert_eq!(
        h.lines(),
        vec!["one two".to_string(), "red blue".to_string(), "last".to_string()]
    );
}
