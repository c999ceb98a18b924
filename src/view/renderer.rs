//! Full-frame compositor.
//!
//! Builds one append-only byte buffer per refresh - row text, status bar,
//! message bar, cursor placement - wrapped in hide/show-cursor so the whole
//! frame can be flushed as a single write and no partial frame is ever
//! visible. Emits plain VT100: clear-line per row instead of whole-screen
//! clears, cursor addressing via `row;col H`, inverse video for the status
//! bar.

use crate::model::Document;

use super::viewport::Viewport;

pub const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
pub const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
pub const CLEAR_LINE: &[u8] = b"\x1b[K";
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
pub const INVERT_ON: &[u8] = b"\x1b[7m";
pub const INVERT_OFF: &[u8] = b"\x1b[m";

/// Compose a complete frame. `(cy, rx)` is the cursor in logical-row /
/// rendered-column space; `message` is the (unexpired) message bar text.
pub fn compose(
    doc: &Document,
    vp: &Viewport,
    cy: usize,
    rx: usize,
    message: Option<&str>,
) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(HIDE_CURSOR);
    frame.extend_from_slice(CURSOR_HOME);

    draw_rows(&mut frame, doc, vp);
    draw_status_bar(&mut frame, doc, vp, cy);
    draw_message_bar(&mut frame, vp, message);

    // Terminal rows/cols are 1-based.
    let row = cy - vp.row_off + 1;
    let col = rx - vp.col_off + 1;
    frame.extend_from_slice(format!("\x1b[{row};{col}H").as_bytes());
    frame.extend_from_slice(SHOW_CURSOR);
    frame
}

/// The text area: visible rows clipped to the viewport, `~` filler past the
/// end of the document, and a centered version banner on an empty document.
fn draw_rows(frame: &mut Vec<u8>, doc: &Document, vp: &Viewport) {
    for y in 0..vp.screen_rows {
        let file_row = y + vp.row_off;
        match doc.row(file_row) {
            Some(row) => {
                let rendered = row.rendered();
                let start = vp.col_off.min(rendered.len());
                let end = (vp.col_off + vp.screen_cols).min(rendered.len());
                frame.extend_from_slice(&rendered[start..end]);
            }
            None => {
                if doc.num_rows() == 0 && y == vp.screen_rows / 3 {
                    draw_banner(frame, vp);
                } else {
                    frame.push(b'~');
                }
            }
        }
        frame.extend_from_slice(CLEAR_LINE);
        frame.extend_from_slice(b"\r\n");
    }
}

fn draw_banner(frame: &mut Vec<u8>, vp: &Viewport) {
    let banner = format!("terse editor -- version {}", env!("CARGO_PKG_VERSION"));
    let banner = &banner[..banner.len().min(vp.screen_cols)];
    let mut padding = (vp.screen_cols.saturating_sub(banner.len())) / 2;
    if padding > 0 {
        frame.push(b'~');
        padding -= 1;
    }
    frame.extend(std::iter::repeat(b' ').take(padding));
    frame.extend_from_slice(banner.as_bytes());
}

/// Inverse-video status line: filename, line count, dirty marker on the
/// left; current/total line on the right.
fn draw_status_bar(frame: &mut Vec<u8>, doc: &Document, vp: &Viewport, cy: usize) {
    let name: String = doc
        .filename()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[No Name]".to_string())
        .chars()
        .take(20)
        .collect();
    let modified = if doc.is_dirty() { " (modified)" } else { "" };

    let left = format!("{name} - {} lines{modified}", doc.num_rows());
    let right = format!("{}/{}", cy + 1, doc.num_rows());

    frame.extend_from_slice(INVERT_ON);
    let mut len = left.len().min(vp.screen_cols);
    frame.extend_from_slice(&left.as_bytes()[..len]);
    while len < vp.screen_cols {
        if vp.screen_cols - len == right.len() {
            frame.extend_from_slice(right.as_bytes());
            break;
        }
        frame.push(b' ');
        len += 1;
    }
    frame.extend_from_slice(INVERT_OFF);
    frame.extend_from_slice(b"\r\n");
}

fn draw_message_bar(frame: &mut Vec<u8>, vp: &Viewport, message: Option<&str>) {
    frame.extend_from_slice(CLEAR_LINE);
    if let Some(msg) = message {
        let msg = msg.as_bytes();
        frame.extend_from_slice(&msg[..msg.len().min(vp.screen_cols)]);
    }
}
