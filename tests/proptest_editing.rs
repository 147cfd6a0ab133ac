//! Property tests for buffer and session invariants.

use proptest::prelude::*;

use termed::{Action, EditorSession, Position, TextBuffer};

/// Documents mixing ASCII, accented, wide, and line-break characters.
fn doc_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('a'),
            Just('b'),
            Just(' '),
            Just('é'),
            Just('ß'),
            Just('漢'),
            Just('\n'),
        ],
        0..60,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn action_strategy() -> impl Strategy<Value = (Action, bool)> {
    let action = prop_oneof![
        Just(Action::MoveLeft),
        Just(Action::MoveRight),
        Just(Action::MoveUp),
        Just(Action::MoveDown),
        Just(Action::MoveLineStart),
        Just(Action::MoveLineEnd),
        Just(Action::MovePageUp),
        Just(Action::MovePageDown),
        Just(Action::MoveWordLeft),
        Just(Action::MoveWordRight),
        Just(Action::MoveDocStart),
        Just(Action::MoveDocEnd),
        Just(Action::InsertChar('x')),
        Just(Action::InsertChar('字')),
        Just(Action::InsertNewline),
        Just(Action::DeleteBackward),
        Just(Action::DeleteForward),
        Just(Action::Copy),
        Just(Action::Cut),
        Just(Action::Paste),
    ];
    (action, any::<bool>())
}

/// A clamped position derived from two free indices.
fn position_in(buffer: &TextBuffer, line_seed: usize, col_seed: usize) -> Position {
    let line = line_seed % buffer.line_count();
    let len = buffer.line_len(line).unwrap_or(0);
    Position::new(line, if len == 0 { 0 } else { col_seed % (len + 1) })
}

proptest! {
    /// After any action sequence the accessors stay consistent with the
    /// content and the cursor stays within bounds.
    #[test]
    fn accessors_and_cursor_stay_consistent(
        doc in doc_strategy(),
        actions in proptest::collection::vec(action_strategy(), 0..40),
    ) {
        let mut session = EditorSession::from_lines(
            doc.split('\n').map(str::to_string).collect(),
        );
        for (action, select) in actions {
            session.dispatch(action, select);
        }

        let buffer = session.buffer();
        prop_assert!(buffer.line_count() >= 1);
        let contents = buffer.contents();
        prop_assert_eq!(contents.split('\n').count(), buffer.line_count());
        for i in 0..buffer.line_count() {
            let line = buffer.line(i).unwrap();
            prop_assert!(!line.contains('\n'));
            prop_assert_eq!(buffer.line_len(i).unwrap(), line.chars().count());
        }

        let pos = session.cursor().position();
        prop_assert!(pos.line < buffer.line_count());
        prop_assert!(pos.col <= buffer.line_len(pos.line).unwrap());
    }

    /// Inserting text and deleting the returned range restores the document
    /// exactly.
    #[test]
    fn insert_then_delete_is_identity(
        doc in doc_strategy(),
        text in doc_strategy(),
        line_seed in 0usize..100,
        col_seed in 0usize..100,
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let before = buffer.contents();
        let start = position_in(&buffer, line_seed, col_seed);

        let end = buffer.insert(start, &text).unwrap();
        let removed = buffer.delete_range(start, end).unwrap();

        prop_assert_eq!(removed, text);
        prop_assert_eq!(buffer.contents(), before);
    }

    /// Cutting a range and pasting it back at the same position
    /// reconstructs the document.
    #[test]
    fn cut_then_paste_reconstructs(
        doc in doc_strategy(),
        a_line in 0usize..100,
        a_col in 0usize..100,
        b_line in 0usize..100,
        b_col in 0usize..100,
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let before = buffer.contents();
        let a = position_in(&buffer, a_line, a_col);
        let b = position_in(&buffer, b_line, b_col);

        let removed = buffer.delete_range(a, b).unwrap();
        let start = a.min(b);
        buffer.insert(start, &removed).unwrap();

        prop_assert_eq!(buffer.contents(), before);
    }

    /// The text reported for a range matches what deleting it removes.
    #[test]
    fn range_text_matches_delete(
        doc in doc_strategy(),
        a_line in 0usize..100,
        a_col in 0usize..100,
        b_line in 0usize..100,
        b_col in 0usize..100,
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let a = position_in(&buffer, a_line, a_col);
        let b = position_in(&buffer, b_line, b_col);

        let peeked = buffer.range_text(a, b).unwrap();
        let removed = buffer.delete_range(a, b).unwrap();
        prop_assert_eq!(peeked, removed);
    }
}
