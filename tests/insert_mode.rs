use modal_engine::types::Mode;

mod support;
use support::harness::{Harness, check, check_mode};
use support::mock_buffer::MockBuffer;

#[test]
fn typing_inserts_before_cursor() {
    check_mode(&["|x"], "iab", &["ab|x"], Mode::Insert);
    check(&["|x"], "ay<Esc>", &["x|y"]);
    check(&["  o|ne"], "I-<Esc>", &["  |-one"]);
}

#[test]
fn open_lines_keep_indentation() {
    check_mode(&["  |one"], "o", &["  one", "  |"], Mode::Insert);
    check_mode(&["  |one"], "O", &["  |", "  one"], Mode::Insert);
    check_mode(&["  o|ne"], "A<Enter>x", &["  one", "  x|"], Mode::Insert);
}

#[test]
fn escape_strips_indent_left_on_an_empty_line() {
    let mut h = Harness::new(&["  |one"]);
    h.buf = MockBuffer::from_lines(&["  one"]).with_content_type("rust");
    h.keys("o<Esc>");
    h.assert_state(&["  one", "|"]);

    // Plain text keeps what was typed
    check(&["  |one"], "o<Esc>", &["  one", " | "]);
}

#[test]
fn ctrl_w_and_ctrl_u_delete_backwards() {
    check_mode(&["foo b|ar"], "A<C-w>", &["foo |"], Mode::Insert);
    check_mode(&["  foo b|ar"], "A<C-u>", &["  |"], Mode::Insert);
}

#[test]
fn ctrl_t_and_ctrl_d_shift_the_line() {
    check_mode(&["|one"], "i<C-t>", &["    |one"], Mode::Insert);
    check_mode(&["|one"], "i<C-t><C-d>", &["|one"], Mode::Insert);
}

#[test]
fn digraph_and_register_insert() {
    check_mode(&["|"], "i<C-k>e:", &["ë|"], Mode::Insert);
    check_mode(&["|one"], "yiwA <C-r>\"", &["one one|"], Mode::Insert);
}

#[test]
fn backspace() {
    check_mode(&["|"], "iab<BS>", &["a|"], Mode::Insert);
    check_mode(&["|x"], "i<Tab><BS>", &["|x"], Mode::Insert);
}

#[test]
fn replace_mode_overwrites() {
    check_mode(&["|abc"], "Rxy", &["xy|c"], Mode::Replace);
    check(&["|ab"], "Rxyz<Esc>", &["xy|z"]);
    check_mode(&["|abc"], "Rxy<BS><BS>", &["|abc"], Mode::Replace);
}

#[test]
fn ctrl_o_runs_one_normal_command() {
    check_mode(&["one t|wo"], "A<C-o>0x", &["x|one two"], Mode::Insert);
}

#[test]
fn arrows_move_inside_insert() {
    check_mode(&["|ab"], "ix<Left>y", &["y|xab"], Mode::Insert);
}

#[test]
fn ctrl_y_copies_from_the_line_above() {
    check_mode(&["abc", "|"], "i<C-y><C-y>", &["abc", "ab|"], Mode::Insert);
}

#[test]
fn delete_key_in_insert() {
    check_mode(&["|abc"], "i<Del>", &["|bc"], Mode::Insert);
}

#[test]
fn open_line_ignores_the_count() {
    check(&["|a"], "3ox<Esc>", &["a", "|x"]);
}
