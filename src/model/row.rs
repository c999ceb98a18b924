//! A single line of the document.
//!
//! A `Row` owns its raw content (no trailing newline) and a derived
//! `rendered` form with tabs expanded to spaces. The rendered form is
//! rebuilt on every content mutation, so it is never observed stale, and
//! the same tab-stop walk drives both rendering and the `cx <-> rx`
//! coordinate conversion - cursor placement always matches what was drawn.

/// One document line: raw bytes plus the tab-expanded render form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    content: Vec<u8>,
    rendered: Vec<u8>,
}

impl Row {
    /// Create a row from raw content.
    pub fn new(content: Vec<u8>, tab_stop: usize) -> Self {
        let mut row = Self {
            content,
            rendered: Vec::new(),
        };
        row.rebuild(tab_stop);
        row
    }

    /// Raw content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Tab-expanded form, consistent with the current content.
    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    /// Insert one byte at `at` (clamped to the row length).
    pub fn insert_char(&mut self, at: usize, ch: u8, tab_stop: usize) {
        let at = at.min(self.content.len());
        self.content.insert(at, ch);
        self.rebuild(tab_stop);
    }

    /// Delete the byte at `at`. Out-of-range is a silent no-op.
    pub fn delete_char(&mut self, at: usize, tab_stop: usize) -> bool {
        if at >= self.content.len() {
            return false;
        }
        self.content.remove(at);
        self.rebuild(tab_stop);
        true
    }

    /// Append raw bytes to the end of the row.
    pub fn append_bytes(&mut self, bytes: &[u8], tab_stop: usize) {
        self.content.extend_from_slice(bytes);
        self.rebuild(tab_stop);
    }

    /// Split the row at `at`, keeping the head and returning the tail.
    pub fn split_off(&mut self, at: usize, tab_stop: usize) -> Vec<u8> {
        let at = at.min(self.content.len());
        let tail = self.content.split_off(at);
        self.rebuild(tab_stop);
        tail
    }

    /// Convert a content offset to a rendered column.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let mut rx = 0;
        for &byte in &self.content[..cx.min(self.content.len())] {
            if byte == b'\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Convert a rendered column back to a content offset: the first `cx`
    /// whose accumulated rendered width exceeds `rx`.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &byte) in self.content.iter().enumerate() {
            if byte == b'\t' {
                cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.content.len()
    }

    /// Rebuild the rendered form: each tab becomes spaces up to the next
    /// multiple of the tab stop (at least one), other bytes pass through.
    fn rebuild(&mut self, tab_stop: usize) {
        self.rendered.clear();
        for &byte in &self.content {
            if byte == b'\t' {
                self.rendered.push(b' ');
                while self.rendered.len() % tab_stop != 0 {
                    self.rendered.push(b' ');
                }
            } else {
                self.rendered.push(byte);
            }
        }
    }
}
