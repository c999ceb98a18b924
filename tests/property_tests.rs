//! Property-based tests: random operation sequences against the model's
//! invariants, with a shadow Vec<String> standing in for the row store.

mod common;

use common::FakeTerminal;
use proptest::prelude::*;
use terse::config::Config;
use terse::input::{key, Key};
use terse::model::{Document, Row};
use terse::Editor;

const TAB: usize = 8;

/// Printable-ASCII-plus-tab line content.
fn line_strategy() -> impl Strategy<Value = String> {
    "[ -~\t]{0,30}"
}

#[derive(Debug, Clone)]
enum RowOp {
    Insert(usize, String),
    Delete(usize),
}

fn row_op_strategy() -> impl Strategy<Value = RowOp> {
    prop_oneof![
        2 => (0usize..40, line_strategy()).prop_map(|(at, s)| RowOp::Insert(at, s)),
        1 => (0usize..40).prop_map(RowOp::Delete),
    ]
}

#[derive(Debug, Clone)]
enum EditOp {
    TypeChar(u8),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

impl EditOp {
    fn key(&self) -> Key {
        match self {
            Self::TypeChar(b) => Key::Char(*b),
            Self::Enter => Key::Char(key::ENTER),
            Self::Backspace => Key::Char(key::BACKSPACE),
            Self::Delete => Key::Delete,
            Self::Left => Key::Left,
            Self::Right => Key::Right,
            Self::Up => Key::Up,
            Self::Down => Key::Down,
            Self::Home => Key::Home,
            Self::End => Key::End,
            Self::PageUp => Key::PageUp,
            Self::PageDown => Key::PageDown,
        }
    }
}

fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        4 => (0x20u8..0x7f).prop_map(EditOp::TypeChar),
        1 => Just(EditOp::Enter),
        2 => Just(EditOp::Backspace),
        1 => Just(EditOp::Delete),
        1 => Just(EditOp::Left),
        1 => Just(EditOp::Right),
        1 => Just(EditOp::Up),
        1 => Just(EditOp::Down),
        1 => Just(EditOp::Home),
        1 => Just(EditOp::End),
        1 => Just(EditOp::PageUp),
        1 => Just(EditOp::PageDown),
    ]
}

proptest! {
    /// cx -> rx -> cx is exact for every valid cursor offset, tabs included.
    #[test]
    fn cx_rx_round_trip(line in line_strategy()) {
        let row = Row::new(line.into_bytes(), TAB);
        for cx in 0..=row.len() {
            let rx = row.cx_to_rx(cx, TAB);
            prop_assert_eq!(row.rx_to_cx(rx, TAB), cx);
        }
    }

    /// rx -> cx -> rx lands on the start of the same tab-stop group, never
    /// past the requested column.
    #[test]
    fn rx_maps_into_same_group(line in line_strategy(), rx in 0usize..64) {
        let row = Row::new(line.into_bytes(), TAB);
        let width = row.cx_to_rx(row.len(), TAB);
        let cx = row.rx_to_cx(rx, TAB);
        let back = row.cx_to_rx(cx, TAB);
        if rx <= width {
            prop_assert!(back <= rx);
            prop_assert!(rx - back < TAB);
        } else {
            prop_assert_eq!(cx, row.len());
        }
    }

    /// Rendered form never contains a tab and its length is tab-consistent.
    #[test]
    fn rendered_is_tab_free(line in line_strategy()) {
        let row = Row::new(line.clone().into_bytes(), TAB);
        prop_assert!(!row.rendered().contains(&b'\t'));
        prop_assert_eq!(row.rendered().len(), row.cx_to_rx(row.len(), TAB));
    }

    /// Row insert/delete tracks a shadow vec: same count, same order.
    #[test]
    fn row_store_matches_shadow(ops in prop::collection::vec(row_op_strategy(), 0..40)) {
        let mut doc = Document::empty(TAB);
        let mut shadow: Vec<String> = Vec::new();
        for op in ops {
            match op {
                RowOp::Insert(at, text) => {
                    doc.insert_row(at, text.clone().into_bytes());
                    shadow.insert(at.min(shadow.len()), text);
                }
                RowOp::Delete(at) => {
                    doc.delete_row(at);
                    if at < shadow.len() {
                        shadow.remove(at);
                    }
                }
            }
        }
        prop_assert_eq!(doc.num_rows(), shadow.len());
        for (row, expected) in doc.rows().iter().zip(&shadow) {
            prop_assert_eq!(row.content(), expected.as_bytes());
        }
    }

    /// load -> serialize reproduces the input lines.
    #[test]
    fn serialize_round_trip(lines in prop::collection::vec("[ -~\t]{0,20}", 0..20)) {
        let doc = Document::from_lines(lines.iter().map(|l| l.as_bytes()), TAB);
        let mut expected = lines.join("\n").into_bytes();
        if !lines.is_empty() {
            expected.push(b'\n');
        }
        prop_assert_eq!(doc.serialize(), expected);
    }

    /// The cursor stays valid and visible through any key sequence.
    #[test]
    fn cursor_stays_valid_and_visible(ops in prop::collection::vec(edit_op_strategy(), 1..60)) {
        let config = Config::default();
        let doc = Document::from_lines(
            ["first line", "\tsecond", "third"].iter().map(|l| l.as_bytes()),
            config.tab_stop,
        );
        let mut ed = Editor::with_document(doc, config);
        let mut term = FakeTerminal::new(&[]);

        for op in &ops {
            ed.process_key(&mut term, op.key()).unwrap();
            ed.refresh(&mut term).unwrap();

            let (cx, cy) = ed.cursor();
            let num_rows = ed.document().num_rows();
            prop_assert!(cy <= num_rows, "cy {} past {} rows", cy, num_rows);
            let row_len = ed.document().row(cy).map(|r| r.len()).unwrap_or(0);
            prop_assert!(cx <= row_len, "cx {} past row len {}", cx, row_len);

            let vp = ed.viewport();
            prop_assert!(cy >= vp.row_off && cy < vp.row_off + vp.screen_rows);
        }
    }

    /// The dirty counter only moves on real mutations.
    #[test]
    fn navigation_never_dirties(ops in prop::collection::vec(edit_op_strategy(), 1..40)) {
        let config = Config::default();
        let doc = Document::from_lines(["stable", "rows"].iter().map(|l| l.as_bytes()), config.tab_stop);
        let mut ed = Editor::with_document(doc, config);
        let mut term = FakeTerminal::new(&[]);

        let navigation_only = ops.iter().all(|op| {
            matches!(
                op,
                EditOp::Left
                    | EditOp::Right
                    | EditOp::Up
                    | EditOp::Down
                    | EditOp::Home
                    | EditOp::End
                    | EditOp::PageUp
                    | EditOp::PageDown
            )
        });
        for op in &ops {
            ed.process_key(&mut term, op.key()).unwrap();
        }
        if navigation_only {
            prop_assert!(!ed.document().is_dirty());
        }
    }
}
