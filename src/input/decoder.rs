//! Escape-sequence key decoder.
//!
//! Turns a stream of raw terminal bytes into `Key` events. The byte source
//! reads with a bounded timeout; a timeout mid-sequence means the user
//! really pressed Escape, so every partial or unrecognized sequence
//! resolves to `Key::Escape` deterministically.

use std::io;

use super::key::{Key, ESC};

/// One raw input byte at a time. `Ok(None)` is a timeout (no byte arrived
/// within the source's bounded wait), not end of input.
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Block until one full key event is assembled.
pub fn read_key<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Key> {
    let byte = loop {
        if let Some(byte) = source.read_byte()? {
            break byte;
        }
    };
    if byte != ESC {
        return Ok(Key::Char(byte));
    }
    decode_escape(source)
}

/// Decode the remainder of an escape sequence; at most two bytes of
/// lookahead plus the `~` terminator for numbered keys.
fn decode_escape<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Key> {
    let Some(first) = source.read_byte()? else {
        return Ok(Key::Escape);
    };
    match first {
        b'[' => {
            let Some(second) = source.read_byte()? else {
                return Ok(Key::Escape);
            };
            match second {
                b'0'..=b'9' => {
                    let Some(third) = source.read_byte()? else {
                        return Ok(Key::Escape);
                    };
                    if third != b'~' {
                        return Ok(Key::Escape);
                    }
                    Ok(match second {
                        b'1' | b'7' => Key::Home,
                        b'3' => Key::Delete,
                        b'4' | b'8' => Key::End,
                        b'5' => Key::PageUp,
                        b'6' => Key::PageDown,
                        _ => Key::Escape,
                    })
                }
                b'A' => Ok(Key::Up),
                b'B' => Ok(Key::Down),
                b'C' => Ok(Key::Right),
                b'D' => Ok(Key::Left),
                b'H' => Ok(Key::Home),
                b'F' => Ok(Key::End),
                _ => Ok(Key::Escape),
            }
        }
        b'O' => {
            let Some(second) = source.read_byte()? else {
                return Ok(Key::Escape);
            };
            match second {
                b'H' => Ok(Key::Home),
                b'F' => Ok(Key::End),
                _ => Ok(Key::Escape),
            }
        }
        _ => Ok(Key::Escape),
    }
}
