//! Editor state and the synchronous key -> mutate -> render loop.
//!
//! `Editor` owns the document, cursor, viewport, search state, and message
//! bar, and is threaded explicitly through every operation - no globals.
//! The terminal is abstracted behind the `Ui` trait (byte source + frame
//! sink + size query), so the whole loop runs against a scripted fake in
//! tests.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::{self, ctrl, key, Key};
use crate::model::Document;
use crate::search::{self, Direction, SavedView, SearchState};
use crate::view::{renderer, Viewport};

/// What the editor needs from a terminal: raw input bytes, whole-frame
/// writes, and a size query (`(cols, rows)`).
pub trait Ui: input::ByteSource {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
    fn size(&mut self) -> io::Result<(u16, u16)>;
}

/// Rows reserved below the text area (status bar + message bar).
const RESERVED_ROWS: usize = 2;

struct StatusMessage {
    text: String,
    created: Instant,
}

pub struct Editor {
    doc: Document,
    /// Logical cursor: byte offset into the row / row index. `cy` may equal
    /// `num_rows` (the virtual row past the end).
    cx: usize,
    cy: usize,
    viewport: Viewport,
    search: SearchState,
    message: Option<StatusMessage>,
    /// Ctrl-Q presses left before a dirty quit goes through.
    quit_remaining: usize,
    running: bool,
    config: Config,
}

impl Editor {
    /// An editor over an empty, unnamed document.
    pub fn new(config: Config) -> Self {
        Self {
            doc: Document::empty(config.tab_stop),
            cx: 0,
            cy: 0,
            viewport: Viewport::new(0, 0),
            search: SearchState::new(),
            message: None,
            quit_remaining: config.quit_confirmations,
            running: true,
            config,
        }
    }

    /// An editor over the given file (nonexistent paths start a new file).
    pub fn open(path: &Path, config: Config) -> Result<Self> {
        let doc = Document::open(path, config.tab_stop)?;
        Ok(Self::with_document(doc, config))
    }

    /// An editor over an existing document.
    pub fn with_document(doc: Document, config: Config) -> Self {
        let mut editor = Self::new(config);
        editor.doc = doc;
        editor
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cx, self.cy)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current message bar text, ignoring expiry.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(%text, "status message");
        self.message = Some(StatusMessage {
            text,
            created: Instant::now(),
        });
    }

    /// Run until quit. One iteration: render a frame, block for a key,
    /// apply it. Terminal failures abort the loop as fatal.
    pub fn run<U: Ui>(&mut self, ui: &mut U) -> Result<()> {
        tracing::info!(filename = ?self.doc.filename(), "editor started");
        while self.running {
            self.refresh(ui)?;
            let key = input::read_key(ui).map_err(Error::Terminal)?;
            self.process_key(ui, key)?;
        }
        tracing::info!("editor exiting");
        Ok(())
    }

    /// Compose and flush one frame: query size, recompute `rx` and the
    /// scroll offsets, then write the whole buffer in a single call.
    pub fn refresh<U: Ui>(&mut self, ui: &mut U) -> Result<()> {
        let (cols, rows) = ui.size().map_err(Error::Terminal)?;
        self.viewport
            .resize((rows as usize).saturating_sub(RESERVED_ROWS), cols as usize);

        let rx = self.rx();
        self.viewport.scroll(self.cy, rx);

        let timeout = Duration::from_millis(self.config.message_timeout_ms);
        let message = self
            .message
            .as_ref()
            .filter(|m| m.created.elapsed() < timeout)
            .map(|m| m.text.as_str());

        let frame = renderer::compose(&self.doc, &self.viewport, self.cy, rx, message);
        ui.write_frame(&frame).map_err(Error::Terminal)
    }

    /// Dispatch one key event. Needs the `Ui` because save-as and search
    /// open a prompt that reads keys of its own.
    pub fn process_key<U: Ui>(&mut self, ui: &mut U, key: Key) -> Result<()> {
        let quit_key = key == Key::Char(ctrl(b'q'));
        match key {
            Key::Char(c) if c == ctrl(b'q') => self.quit(),
            Key::Char(c) if c == ctrl(b's') => self.save(ui)?,
            Key::Char(c) if c == ctrl(b'f') => self.find(ui)?,
            Key::Char(key::ENTER) => self.insert_newline(),
            Key::Char(key::BACKSPACE) => self.delete_char(),
            Key::Char(c) if c == ctrl(b'h') => self.delete_char(),
            Key::Delete => {
                self.move_cursor(Key::Right);
                self.delete_char();
            }
            // Ctrl-L (refresh) and a bare Escape do nothing; the next
            // iteration redraws anyway.
            Key::Char(c) if c == ctrl(b'l') => {}
            Key::Escape => {}
            Key::Up
            | Key::Down
            | Key::Left
            | Key::Right
            | Key::Home
            | Key::End
            | Key::PageUp
            | Key::PageDown => self.move_cursor(key),
            Key::Char(c) => self.insert_char(c),
        }
        // Any non-quit key rearms the confirmation counter.
        if !quit_key {
            self.quit_remaining = self.config.quit_confirmations;
        }
        Ok(())
    }

    fn quit(&mut self) {
        if self.doc.is_dirty() && self.quit_remaining > 1 {
            self.quit_remaining -= 1;
            tracing::debug!(remaining = self.quit_remaining, "quit denied, unsaved changes");
            self.set_status_message(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                self.quit_remaining
            ));
            return;
        }
        self.running = false;
    }

    fn rx(&self) -> usize {
        self.doc
            .row(self.cy)
            .map(|row| row.cx_to_rx(self.cx, self.doc.tab_stop()))
            .unwrap_or(0)
    }

    fn row_len(&self, cy: usize) -> usize {
        self.doc.row(cy).map(|row| row.len()).unwrap_or(0)
    }

    fn move_cursor(&mut self, key: Key) {
        match key {
            Key::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    // Wrap to the end of the previous row.
                    self.cy -= 1;
                    self.cx = self.row_len(self.cy);
                }
            }
            Key::Right => {
                if let Some(row) = self.doc.row(self.cy) {
                    if self.cx < row.len() {
                        self.cx += 1;
                    } else {
                        // Wrap to the start of the next row.
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Key::Up => {
                if self.cy > 0 {
                    self.cy -= 1;
                }
            }
            Key::Down => {
                if self.cy < self.doc.num_rows() {
                    self.cy += 1;
                }
            }
            Key::Home => self.cx = 0,
            Key::End => self.cx = self.row_len(self.cy),
            Key::PageUp => {
                self.cy = self.viewport.row_off;
                for _ in 0..self.viewport.screen_rows {
                    self.move_cursor(Key::Up);
                }
            }
            Key::PageDown => {
                self.cy = (self.viewport.row_off + self.viewport.screen_rows.saturating_sub(1))
                    .min(self.doc.num_rows());
                for _ in 0..self.viewport.screen_rows {
                    self.move_cursor(Key::Down);
                }
            }
            _ => {}
        }
        // The target row may be shorter than where the cursor came from.
        self.cx = self.cx.min(self.row_len(self.cy));
    }

    fn insert_char(&mut self, ch: u8) {
        self.doc.insert_char(self.cy, self.cx, ch);
        self.cx += 1;
    }

    fn insert_newline(&mut self) {
        self.doc.insert_newline(self.cy, self.cx);
        self.cy += 1;
        self.cx = 0;
    }

    fn delete_char(&mut self) {
        if self.cy == self.doc.num_rows() {
            return;
        }
        if self.cx == 0 && self.cy == 0 {
            return;
        }
        if self.cx > 0 {
            self.doc.delete_char(self.cy, self.cx - 1);
            self.cx -= 1;
        } else {
            // Column 0 of a non-first row: merge into the row above.
            let seam = self.doc.merge_row_up(self.cy);
            self.cy -= 1;
            self.cx = seam;
        }
    }

    fn save<U: Ui>(&mut self, ui: &mut U) -> Result<()> {
        if self.doc.filename().is_none() {
            match self.prompt(ui, "Save as: {} (ESC to cancel)", |_, _, _| {})? {
                Some(name) => self.doc.set_filename(PathBuf::from(name)),
                None => {
                    self.set_status_message("Save aborted");
                    return Ok(());
                }
            }
        }
        match self.doc.save() {
            Ok(bytes) => self.set_status_message(format!("{bytes} bytes written to disk")),
            Err(err) => {
                tracing::error!(%err, "save failed");
                self.set_status_message(format!("Can't save! I/O error: {err}"));
            }
        }
        Ok(())
    }

    /// Line prompt in the message bar. `template` contains `{}` where the
    /// input goes. The observer runs after every keystroke with the current
    /// text and the key; Enter confirms (nonempty input), Escape cancels.
    fn prompt<U, F>(&mut self, ui: &mut U, template: &str, mut observer: F) -> Result<Option<String>>
    where
        U: Ui,
        F: FnMut(&mut Self, &str, Key),
    {
        let mut buf = String::new();
        loop {
            self.set_status_message(template.replacen("{}", &buf, 1));
            self.refresh(ui)?;
            let key = input::read_key(ui).map_err(Error::Terminal)?;
            match key {
                Key::Char(key::BACKSPACE) | Key::Delete => {
                    buf.pop();
                }
                Key::Char(c) if c == ctrl(b'h') => {
                    buf.pop();
                }
                Key::Escape => {
                    self.set_status_message("");
                    observer(self, &buf, key);
                    return Ok(None);
                }
                Key::Char(key::ENTER) => {
                    if !buf.is_empty() {
                        self.set_status_message("");
                        observer(self, &buf, key);
                        return Ok(Some(buf));
                    }
                }
                Key::Char(c) if !c.is_ascii_control() => buf.push(c as char),
                _ => {}
            }
            observer(self, &buf, key);
        }
    }

    fn find<U: Ui>(&mut self, ui: &mut U) -> Result<()> {
        self.search.save_view(SavedView {
            cx: self.cx,
            cy: self.cy,
            row_off: self.viewport.row_off,
            col_off: self.viewport.col_off,
        });
        let query = self.prompt(ui, "Search: {} (Use ESC/Arrows/Enter)", Self::find_observer)?;
        if let Some(saved) = self.search.take_saved() {
            if query.is_none() {
                // Canceled: put the view back exactly where it was.
                self.cx = saved.cx;
                self.cy = saved.cy;
                self.viewport.row_off = saved.row_off;
                self.viewport.col_off = saved.col_off;
            }
        }
        Ok(())
    }

    /// Per-keystroke search driver: arrows pick the direction, anything
    /// else restarts the scan from the current query text.
    fn find_observer(&mut self, query: &str, key: Key) {
        match key {
            Key::Char(key::ENTER) | Key::Escape => {
                self.search.reset();
                return;
            }
            Key::Right | Key::Down => self.search.direction = Direction::Forward,
            Key::Left | Key::Up => self.search.direction = Direction::Backward,
            _ => self.search.reset(),
        }
        if self.search.last_match.is_none() {
            self.search.direction = Direction::Forward;
        }
        if let Some((row, offset)) = search::scan(
            self.doc.rows(),
            query,
            self.search.last_match,
            self.search.direction,
        ) {
            self.search.last_match = Some(row);
            self.cy = row;
            self.cx = self.doc.rows()[row].rx_to_cx(offset, self.doc.tab_stop());
            // Force the next scroll() to bring the match row to the top.
            self.viewport.row_off = self.doc.num_rows();
            tracing::debug!(row, offset, "search match");
        }
    }
}
