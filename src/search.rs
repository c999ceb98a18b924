//! Incremental search state and the wrapping row scan.

use crate::model::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Cursor/viewport snapshot taken when a search starts, restored on cancel.
#[derive(Debug, Clone, Copy)]
pub struct SavedView {
    pub cx: usize,
    pub cy: usize,
    pub row_off: usize,
    pub col_off: usize,
}

/// State carried across keystrokes of one search prompt.
#[derive(Debug)]
pub struct SearchState {
    /// Row index of the last hit; `None` restarts the scan from row 0.
    pub last_match: Option<usize>,
    pub direction: Direction,
    saved: Option<SavedView>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            last_match: None,
            direction: Direction::Forward,
            saved: None,
        }
    }

    /// Snapshot the view for cancel-restore.
    pub fn save_view(&mut self, view: SavedView) {
        self.saved = Some(view);
    }

    /// Take the snapshot (confirm discards it, cancel restores it).
    pub fn take_saved(&mut self) -> Option<SavedView> {
        self.saved.take()
    }

    /// Reset match bookkeeping to "no prior match, forward".
    pub fn reset(&mut self) {
        self.last_match = None;
        self.direction = Direction::Forward;
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Step through the rows from `last_match` in `direction`, wrapping past
/// either end, for at most one full cycle. Returns the matching row index
/// and the match offset in that row's rendered form.
pub fn scan(
    rows: &[Row],
    query: &str,
    last_match: Option<usize>,
    direction: Direction,
) -> Option<(usize, usize)> {
    if rows.is_empty() || query.is_empty() {
        return None;
    }
    let n = rows.len() as isize;
    let step: isize = match direction {
        Direction::Forward => 1,
        Direction::Backward => -1,
    };
    let mut current = match last_match {
        Some(row) => row as isize,
        None => -1,
    };
    for _ in 0..rows.len() {
        current += step;
        if current == -1 {
            current = n - 1;
        } else if current == n {
            current = 0;
        }
        let row = &rows[current as usize];
        if let Some(offset) = find(row.rendered(), query.as_bytes()) {
            return Some((current as usize, offset));
        }
    }
    None
}

/// First occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Row> {
        lines
            .iter()
            .map(|l| Row::new(l.as_bytes().to_vec(), 8))
            .collect()
    }

    #[test]
    fn forward_scan_wraps_around() {
        let rows = rows(&["abc", "xabcx", "zzz"]);
        // No prior match: first hit is row 0.
        let (row, off) = scan(&rows, "abc", None, Direction::Forward).unwrap();
        assert_eq!((row, off), (0, 0));
        // Again from row 0: row 1, offset inside the row.
        let (row, off) = scan(&rows, "abc", Some(0), Direction::Forward).unwrap();
        assert_eq!((row, off), (1, 1));
        // From row 1 forward: wraps past row 2 back to row 0.
        let (row, _) = scan(&rows, "abc", Some(1), Direction::Forward).unwrap();
        assert_eq!(row, 0);
    }

    #[test]
    fn backward_scan_wraps_the_other_way() {
        let rows = rows(&["abc", "xabcx", "zzz"]);
        let (row, _) = scan(&rows, "abc", Some(0), Direction::Backward).unwrap();
        assert_eq!(row, 1);
        let (row, _) = scan(&rows, "abc", Some(1), Direction::Backward).unwrap();
        assert_eq!(row, 0);
    }

    #[test]
    fn no_match_and_empty_inputs() {
        let rs = rows(&["abc"]);
        assert_eq!(scan(&rs, "zzz", None, Direction::Forward), None);
        assert_eq!(scan(&rs, "", None, Direction::Forward), None);
        assert_eq!(scan(&[], "abc", None, Direction::Forward), None);
    }

    #[test]
    fn matches_rendered_form_of_tabs() {
        // "a\tb" renders as "a       b"; searching the rendered text works.
        let rs = rows(&["a\tb"]);
        let (row, off) = scan(&rs, "  b", None, Direction::Forward).unwrap();
        assert_eq!(row, 0);
        assert_eq!(off, 6);
    }

    #[test]
    fn query_longer_than_row() {
        let rs = rows(&["ab"]);
        assert_eq!(scan(&rs, "abcdef", None, Direction::Forward), None);
    }
}
