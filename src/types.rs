//! Core value types shared by the encoder and decoder.

/// Longest run a single piece can describe.
pub const MAX_PIECE_LEN: usize = 1024;
/// Longest run that fits the one-byte header form.
pub const SHORT_HEADER_MAX_LEN: usize = 32;
/// Marks the end of a compressed stream.
pub const TERMINATOR: u8 = 0xFF;

/// Per-command overhead in bytes: header byte plus fixed argument bytes.
///
/// DirectCopy additionally pays one byte per literal. Indexed by
/// [`CommandKind::index`].
pub const COMMAND_SIZE: [usize; 5] = [1, 2, 3, 2, 3];

/// The five LC_LZ2 commands, in tie-break priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    DirectCopy,
    ByteFill,
    WordFill,
    IncreasingFill,
    BackReference,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::DirectCopy,
        CommandKind::ByteFill,
        CommandKind::WordFill,
        CommandKind::IncreasingFill,
        CommandKind::BackReference,
    ];

    /// Position in priority order. Equal to the command number on the wire.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn command_bits(self) -> u8 {
        self as u8
    }

    pub fn from_command_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Fixed overhead of a piece of this kind, without the extended header
    /// byte or literal payload.
    pub fn overhead(self) -> usize {
        COMMAND_SIZE[self.index()]
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::DirectCopy => "direct-copy",
            CommandKind::ByteFill => "byte-fill",
            CommandKind::WordFill => "word-fill",
            CommandKind::IncreasingFill => "increasing-fill",
            CommandKind::BackReference => "back-reference",
        }
    }
}

/// Number of header bytes needed for a run of `length` bytes.
pub fn header_len(length: usize) -> usize {
    if length > SHORT_HEADER_MAX_LEN {
        2
    } else {
        1
    }
}

/// Encoded size of a piece of `kind` covering `length` output bytes.
pub fn encoded_cost(kind: CommandKind, length: usize) -> usize {
    let literal = if kind == CommandKind::DirectCopy { length } else { 0 };
    kind.overhead() + header_len(length) - 1 + literal
}

/// Argument carried by a piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Literal bytes of a DirectCopy.
    Literal(Vec<u8>),
    /// Fill byte of a ByteFill, or start byte of an IncreasingFill.
    Byte(u8),
    /// Two-byte pattern of a WordFill.
    Word([u8; 2]),
    /// Absolute output offset of a BackReference.
    Offset(u16),
}

/// One encoded run: command, output length and argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: CommandKind,
    pub length: usize,
    pub payload: Payload,
}

impl Piece {
    pub fn direct_copy(bytes: &[u8]) -> Self {
        Self {
            kind: CommandKind::DirectCopy,
            length: bytes.len(),
            payload: Payload::Literal(bytes.to_vec()),
        }
    }

    pub fn byte_fill(byte: u8, length: usize) -> Self {
        Self {
            kind: CommandKind::ByteFill,
            length,
            payload: Payload::Byte(byte),
        }
    }

    pub fn word_fill(word: [u8; 2], length: usize) -> Self {
        Self {
            kind: CommandKind::WordFill,
            length,
            payload: Payload::Word(word),
        }
    }

    pub fn increasing_fill(start: u8, length: usize) -> Self {
        Self {
            kind: CommandKind::IncreasingFill,
            length,
            payload: Payload::Byte(start),
        }
    }

    pub fn back_reference(offset: u16, length: usize) -> Self {
        Self {
            kind: CommandKind::BackReference,
            length,
            payload: Payload::Offset(offset),
        }
    }

    /// Size of this piece once serialized.
    pub fn encoded_len(&self) -> usize {
        encoded_cost(self.kind, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_follow_size_table() {
        assert_eq!(encoded_cost(CommandKind::DirectCopy, 4), 5);
        assert_eq!(encoded_cost(CommandKind::DirectCopy, 33), 35);
        assert_eq!(encoded_cost(CommandKind::ByteFill, 32), 2);
        assert_eq!(encoded_cost(CommandKind::ByteFill, 33), 3);
        assert_eq!(encoded_cost(CommandKind::WordFill, 10), 3);
        assert_eq!(encoded_cost(CommandKind::IncreasingFill, 1024), 3);
        assert_eq!(encoded_cost(CommandKind::BackReference, 100), 4);
    }

    #[test]
    fn command_bits_roundtrip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_command_bits(kind.command_bits()), Some(kind));
        }
        assert_eq!(CommandKind::from_command_bits(5), None);
    }
}
