//! The real terminal collaborator.
//!
//! Raw mode is a scoped resource: `Terminal` enables it on construction and
//! a drop guard restores it on every exit path, after a best-effort screen
//! clear, so neither a normal quit nor a fatal error leaves the terminal
//! unusable. Input bytes are read one at a time with a 100 ms poll timeout;
//! the timeout is what lets the key decoder treat a lone ESC byte as the
//! Escape key rather than the start of a sequence.

use std::io::{self, Write};
use std::os::fd::AsFd;

use crossterm::terminal;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

use crate::editor::Ui;
use crate::error::{Error, Result};
use crate::input::ByteSource;
use crate::view::renderer;

/// Bounded wait for one input byte, in milliseconds.
const READ_TIMEOUT_MS: u16 = 100;

/// Restores cooked mode when dropped.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub struct Terminal {
    stdout: io::Stdout,
    _raw: RawMode,
}

impl Terminal {
    /// Enter raw mode. Failure here is fatal tier: the editor cannot run.
    pub fn new() -> Result<Self> {
        let raw = RawMode::enable().map_err(Error::Terminal)?;
        Ok(Self {
            stdout: io::stdout(),
            _raw: raw,
        })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Screen restore runs before the RawMode field guard disables raw
        // mode, so the clear goes out while output is still unprocessed.
        let _ = self.stdout.write_all(renderer::CLEAR_SCREEN);
        let _ = self.stdout.write_all(renderer::CURSOR_HOME);
        let _ = self.stdout.write_all(renderer::SHOW_CURSOR);
        let _ = self.stdout.flush();
    }
}

impl ByteSource for Terminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let stdin = io::stdin();
        let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
        match poll(&mut fds, PollTimeout::from(READ_TIMEOUT_MS)) {
            Ok(0) => return Ok(None),
            Ok(_) => {}
            // A signal (e.g. window resize) interrupts the wait; treat it
            // like a timeout and let the caller re-render.
            Err(nix::errno::Errno::EINTR) => return Ok(None),
            Err(err) => return Err(io::Error::from(err)),
        }
        let mut buf = [0u8; 1];
        match nix::unistd::read(stdin.as_fd(), &mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(nix::errno::Errno::EINTR) => Ok(None),
            Err(err) => Err(io::Error::from(err)),
        }
    }
}

impl Ui for Terminal {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.stdout.write_all(frame)?;
        self.stdout.flush()
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}
