//! The document: an ordered row store with dirty tracking.
//!
//! Owns every `Row` exclusively. All row mutations go through here so the
//! dirty counter stays honest; index arguments are clamped or guarded, so
//! out-of-range input is a silent no-op rather than an error.

use std::io;
use std::path::{Path, PathBuf};

use super::row::Row;

#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    /// Counts unsaved mutations; nonzero means modified.
    dirty: u64,
    filename: Option<PathBuf>,
    tab_stop: usize,
}

impl Document {
    /// An empty, unnamed document.
    pub fn empty(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            filename: None,
            tab_stop,
        }
    }

    /// Build a document from raw lines (trailing `\r` stripped). Clean.
    pub fn from_lines<'a, I>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let rows = lines
            .into_iter()
            .map(|line| {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                Row::new(line.to_vec(), tab_stop)
            })
            .collect();
        Self {
            rows,
            dirty: 0,
            filename: None,
            tab_stop,
        }
    }

    /// Open a file. A nonexistent path yields an empty document carrying
    /// that filename; the file gets created on first save.
    pub fn open(path: &Path, tab_stop: usize) -> io::Result<Self> {
        let mut doc = match std::fs::read(path) {
            Ok(bytes) => {
                let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
                // A trailing newline produces one empty slice past the last line.
                if bytes.is_empty() || bytes.ends_with(b"\n") {
                    lines.pop();
                }
                Self::from_lines(lines, tab_stop)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(?path, "new file");
                Self::empty(tab_stop)
            }
            Err(err) => return Err(err),
        };
        doc.filename = Some(path.to_path_buf());
        Ok(doc)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Insert a new row at `at` (clamped to `[0, num_rows]`).
    pub fn insert_row(&mut self, at: usize, text: Vec<u8>) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(text, self.tab_stop));
        self.dirty += 1;
    }

    /// Remove the row at `at`. Out-of-range is a no-op.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    /// Insert a byte into the row at `cy`, column `cx`. Inserting on the
    /// virtual row past the end materializes it first.
    pub fn insert_char(&mut self, cy: usize, cx: usize, ch: u8) {
        if cy == self.rows.len() {
            self.rows.push(Row::new(Vec::new(), self.tab_stop));
        }
        let Some(row) = self.rows.get_mut(cy) else {
            return;
        };
        row.insert_char(cx, ch, self.tab_stop);
        self.dirty += 1;
    }

    /// Delete the byte at `(cy, cx)` if in range.
    pub fn delete_char(&mut self, cy: usize, cx: usize) {
        let tab_stop = self.tab_stop;
        let Some(row) = self.rows.get_mut(cy) else {
            return;
        };
        if row.delete_char(cx, tab_stop) {
            self.dirty += 1;
        }
    }

    /// Split the row at `(cy, cx)` into two rows. At column 0 this inserts
    /// a blank row above; otherwise the tail moves to a new row below.
    pub fn insert_newline(&mut self, cy: usize, cx: usize) {
        if cx == 0 {
            self.insert_row(cy, Vec::new());
            return;
        }
        let tab_stop = self.tab_stop;
        let Some(row) = self.rows.get_mut(cy) else {
            return;
        };
        let tail = row.split_off(cx, tab_stop);
        self.rows.insert(cy + 1, Row::new(tail, tab_stop));
        self.dirty += 1;
    }

    /// Merge row `cy` into the row above and delete it. Returns the column
    /// where the seam landed (the previous row's old length).
    pub fn merge_row_up(&mut self, cy: usize) -> usize {
        if cy == 0 || cy >= self.rows.len() {
            return 0;
        }
        let tab_stop = self.tab_stop;
        let moved = self.rows.remove(cy);
        let prev = &mut self.rows[cy - 1];
        let seam = prev.len();
        prev.append_bytes(moved.content(), tab_stop);
        self.dirty += 1;
        seam
    }

    /// Serialize all rows, each terminated with `\n`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for row in &self.rows {
            out.extend_from_slice(row.content());
            out.push(b'\n');
        }
        out
    }

    /// Write the document to its filename. Clears the dirty counter only on
    /// a confirmed write; a failed save leaves it set. Returns bytes written.
    pub fn save(&mut self) -> io::Result<usize> {
        let Some(path) = self.filename.clone() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "no filename"));
        };
        let bytes = self.serialize();
        std::fs::write(&path, &bytes)?;
        self.dirty = 0;
        tracing::info!(?path, bytes = bytes.len(), "saved");
        Ok(bytes.len())
    }
}
