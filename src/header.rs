//! Piece header codec.
//!
//! Every piece starts with a header naming its command and output length. Two
//! MSB-first layouts exist:
//!
//! ```text
//! short:    [ccc][lllll]                  length 1..=32
//! extended: [111][ccc][ll] [llllllll]     length 1..=1024
//! ```
//!
//! `ccc` is the command number and `l` holds `length - 1`. A lone `0xFF`
//! byte terminates the stream; it cannot collide with an extended header
//! because command 7 does not exist.

use crate::stream::ByteStream;
use crate::types::{CommandKind, MAX_PIECE_LEN, SHORT_HEADER_MAX_LEN, TERMINATOR};
use crate::Lz2Error;

const EXTENDED_MARKER: u8 = 0b111;

/// A decoded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    Command { kind: CommandKind, length: usize },
    End,
}

/// Append the header for a `kind` piece of `length` bytes.
pub fn encode_header(kind: CommandKind, length: usize, out: &mut Vec<u8>) -> Result<(), Lz2Error> {
    if length == 0 || length > MAX_PIECE_LEN {
        return Err(Lz2Error::InvalidPiece(format!(
            "{} length {length} outside 1..={MAX_PIECE_LEN}",
            kind.name()
        )));
    }
    let cmd = kind.command_bits();
    let len = length - 1;
    if length > SHORT_HEADER_MAX_LEN {
        out.push((EXTENDED_MARKER << 5) | (cmd << 2) | (len >> 8) as u8);
        out.push((len & 0xFF) as u8);
    } else {
        out.push((cmd << 5) | len as u8);
    }
    Ok(())
}

/// Read one header from the stream.
pub fn decode_header(stream: &mut ByteStream) -> Result<Header, Lz2Error> {
    let start = stream.position();
    let first = stream.next_byte()?;
    if first == TERMINATOR {
        return Ok(Header::End);
    }
    let (cmd, length) = if first >> 5 == EXTENDED_MARKER {
        let low = stream.next_byte()?;
        let cmd = (first >> 2) & 0b111;
        let len = (((first & 0b11) as usize) << 8) | low as usize;
        (cmd, len + 1)
    } else {
        (first >> 5, (first & 0x1F) as usize + 1)
    };
    let kind = CommandKind::from_command_bits(cmd)
        .ok_or_else(|| Lz2Error::malformed(start, format!("unknown command {cmd}")))?;
    Ok(Header::Command { kind, length })
}
