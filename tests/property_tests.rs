use proptest::prelude::*;
use modal_engine::types::{Command, Mode, Position};
use modal_engine::{Engine, InputEvent, KeyEvent, TextOps};

mod support;
use support::mock_buffer::MockBuffer;

fn key(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent::char(c))
}

// Strategy for generating text content with various edge cases
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Empty text
        Just("".to_string()),
        // Single line
        "[a-zA-Z0-9 .!?,;:\\-_()]{0,50}",
        // Multiple lines with normal text
        "[a-zA-Z0-9 .!?,;:\\-_\n]{0,200}",
        // Text with blank lines (for paragraph tests)
        r"[a-zA-Z0-9 ]{0,20}\n\n[a-zA-Z0-9 ]{0,20}",
        // Unicode text
        "[\u{0020}-\u{007E}\u{00A0}-\u{00FF}\u{4E00}-\u{9FFF}\u{1F600}-\u{1F64F}\n]{0,100}",
        // Lines with only whitespace
        "[ \t]{0,10}\n[ \t]{0,10}\n[a-z]{0,10}",
    ]
}

fn motion_char_strategy() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        'h', 'j', 'k', 'l', '0', '^', '$', 'w', 'b', 'e', 'W', 'B', 'E', '{', '}', '(', ')', '%',
        'G', '+', '-', '_', '|', 'n',
    ])
}

fn deleting_command_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["dd", "x", "dw", "D", "J", "dj", "d}", ">>", "~", "diw", "da("])
}

fn start_position(buf: &MockBuffer, line: u32, col: u32) -> Position {
    let line = line.min(buf.line_count().saturating_sub(1));
    let col = col.min(buf.line_len(line).saturating_sub(1));
    Position::new(line, col)
}

fn assert_in_bounds(eng: &Engine, buf: &MockBuffer) {
    let pos = eng.cursor();
    assert!(pos.line < buf.line_count().max(1), "line out of range: {pos:?}");
    let len = buf.line_len(pos.line);
    if eng.mode() == Mode::Normal {
        assert!(pos.col <= len.saturating_sub(1), "col past last char: {pos:?}");
    } else {
        assert!(pos.col <= len, "col past line end: {pos:?}");
    }
}

proptest! {
    #[test]
    fn motion_sequence_stays_in_bounds(
        text in text_strategy(),
        start_line in 0u32..20,
        start_col in 0u32..40,
        motions in prop::collection::vec((0u32..12, motion_char_strategy()), 0..10),
    ) {
        let mut buf = MockBuffer::new(&text);
        let mut eng = Engine::new();
        eng.set_cursor(start_position(&buf, start_line, start_col));

        for (count, motion) in motions {
            if count > 1 {
                for digit in count.to_string().chars() {
                    eng.handle_event(&mut buf, key(digit)).unwrap();
                }
            }
            eng.handle_event(&mut buf, key(motion)).unwrap();
            assert_in_bounds(&eng, &buf);
        }
        // Motions never touch the text
        prop_assert_eq!(buf.text(), text);
    }

    #[test]
    fn find_char_never_panics(
        text in text_strategy(),
        target in prop::char::range('!', '~'),
        find in prop::sample::select(vec!['f', 't', 'F', 'T']),
        repeat in prop::sample::select(vec![';', ',']),
    ) {
        let mut buf = MockBuffer::new(&text);
        let mut eng = Engine::new();
        for event in [key(find), key(target), key(repeat)] {
            eng.handle_event(&mut buf, event).unwrap();
            assert_in_bounds(&eng, &buf);
        }
    }

    #[test]
    fn visual_selection_stays_in_bounds(
        text in text_strategy(),
        kind in prop::sample::select(vec!['v', 'V']),
        motions in prop::collection::vec(motion_char_strategy(), 1..6),
    ) {
        let mut buf = MockBuffer::new(&text);
        let mut eng = Engine::new();
        eng.handle_event(&mut buf, key(kind)).unwrap();

        for motion in motions {
            let cmds = eng.handle_event(&mut buf, key(motion)).unwrap();
            for cmd in cmds {
                if let Command::SetSelection(Some(sel)) = cmd {
                    prop_assert!(sel.start.line < buf.line_count().max(1));
                    prop_assert!(sel.end.line < buf.line_count().max(1));
                }
            }
        }
    }

    #[test]
    fn counted_x_deletes_up_to_line_end(
        line in "[a-z ]{1,30}",
        col in 0u32..30,
        count in 1u32..20,
    ) {
        let mut buf = MockBuffer::new(&line);
        let mut eng = Engine::new();
        let len = line.chars().count() as u32;
        let col = col.min(len - 1);
        eng.set_cursor(Position::new(0, col));

        eng.handle_keys(&mut buf, &format!("{count}x")).unwrap();

        let end = (col + count).min(len) as usize;
        let expected: String = line
            .chars()
            .take(col as usize)
            .chain(line.chars().skip(end))
            .collect();
        prop_assert_eq!(buf.text(), expected);
    }

    #[test]
    fn counted_x_matches_repeated_x_away_from_line_end(
        line in "[a-z]{20,40}",
        count in 1u32..10,
    ) {
        let mut counted = MockBuffer::new(&line);
        let mut eng = Engine::new();
        eng.handle_keys(&mut counted, &format!("{count}x")).unwrap();

        let mut repeated = MockBuffer::new(&line);
        let mut eng = Engine::new();
        eng.handle_keys(&mut repeated, &"x".repeat(count as usize)).unwrap();

        prop_assert_eq!(counted.text(), repeated.text());
    }

    #[test]
    fn delete_then_undo_restores_text(
        text in text_strategy(),
        start_line in 0u32..20,
        start_col in 0u32..40,
        command in deleting_command_strategy(),
    ) {
        let mut buf = MockBuffer::new(&text);
        let mut eng = Engine::new();
        eng.set_cursor(start_position(&buf, start_line, start_col));

        eng.handle_keys(&mut buf, command).unwrap();
        prop_assert!(buf.undo_depth() <= 1, "{} made more than one undo step", command);
        eng.handle_keys(&mut buf, "u").unwrap();

        prop_assert_eq!(buf.text(), text);
        assert_in_bounds(&eng, &buf);
    }
}

#[test]
fn empty_buffer_motions() {
    let mut buf = MockBuffer::new("");
    let mut eng = Engine::new();

    for motion in ['h', 'j', 'k', 'l', 'w', 'b', 'e', '{', '}', '0', '$', 'G', '%'] {
        eng.handle_event(&mut buf, key(motion)).unwrap();
        assert_eq!(eng.cursor(), Position::new(0, 0), "motion '{motion}'");
    }
}

#[test]
fn single_char_buffer_motions() {
    let mut buf = MockBuffer::new("x");
    let mut eng = Engine::new();

    for motion in ['h', 'l', 'b', '$', '0', 'G'] {
        eng.handle_event(&mut buf, key(motion)).unwrap();
        assert_eq!(eng.cursor(), Position::new(0, 0), "motion '{motion}'");
    }
}
