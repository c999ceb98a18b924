//! Shared test harness: a scripted terminal plus a vt100 screen view, so
//! tests drive the editor with raw input bytes and assert on what a real
//! terminal would display.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use terse::config::Config;
use terse::editor::Ui;
use terse::input::ByteSource;
use terse::model::Document;
use terse::Editor;

pub const WIDTH: u16 = 80;
pub const HEIGHT: u16 = 24;

/// Scripted terminal: raw input bytes in, composed frames out. An
/// exhausted script is a test bug and surfaces as a read error.
pub struct FakeTerminal {
    input: VecDeque<u8>,
    pub frames: Vec<Vec<u8>>,
    pub size: (u16, u16),
}

impl FakeTerminal {
    pub fn new(script: &[u8]) -> Self {
        Self {
            input: script.iter().copied().collect(),
            frames: Vec::new(),
            size: (WIDTH, HEIGHT),
        }
    }

    /// Replay every frame through a virtual terminal, as a real terminal
    /// session would see them, and return the final screen.
    pub fn final_screen(&self) -> vt100::Screen {
        let mut parser = vt100::Parser::new(self.size.1, self.size.0, 0);
        for frame in &self.frames {
            parser.process(frame);
        }
        parser.screen().clone()
    }
}

impl ByteSource for FakeTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.input
            .pop_front()
            .map(Some)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

impl Ui for FakeTerminal {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }
}

/// An editor over the given lines with default config.
pub fn editor(lines: &[&str]) -> Editor {
    let config = Config::default();
    let doc = Document::from_lines(lines.iter().map(|l| l.as_bytes()), config.tab_stop);
    Editor::with_document(doc, config)
}

/// Run `lines` through a raw byte `script` (which must end by quitting) and
/// return the editor plus the terminal with its captured frames.
pub fn run_script(lines: &[&str], script: &[u8]) -> (Editor, FakeTerminal) {
    let mut ed = editor(lines);
    let mut term = FakeTerminal::new(script);
    ed.run(&mut term).expect("editor loop failed");
    (ed, term)
}

/// Text of one screen row, trailing blanks trimmed.
pub fn row_text(screen: &vt100::Screen, row: u16) -> String {
    screen
        .contents()
        .lines()
        .nth(row as usize)
        .unwrap_or("")
        .to_string()
}

pub const CTRL_Q: u8 = b'q' & 0x1f;
pub const CTRL_S: u8 = b's' & 0x1f;
pub const CTRL_F: u8 = b'f' & 0x1f;
