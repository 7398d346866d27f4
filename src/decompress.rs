use crate::config::{Config, Format, OffsetOrder};
use crate::header::{decode_header, Header};
use crate::stream::ByteStream;
use crate::types::{CommandKind, Payload, Piece};
use crate::Lz2Error;

/// Single-pass decoder for one stream format.
#[derive(Debug, Clone, Copy)]
pub struct Decompressor {
    format: Format,
    limit: usize,
}

impl Decompressor {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            limit: usize::MAX,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.format).with_limit(config.max_output)
    }

    /// Fail instead of producing more than `limit` bytes.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Read the next piece, or `None` at the terminator.
    fn read_piece(&self, stream: &mut ByteStream) -> Result<Option<Piece>, Lz2Error> {
        let start = stream.position();
        let (kind, length) = match decode_header(stream)? {
            Header::End => return Ok(None),
            Header::Command { kind, length } => (kind, length),
        };
        if !self.format.supports(kind) {
            return Err(Lz2Error::malformed(
                start,
                format!("{} is not available in the {:?} format", kind.name(), self.format),
            ));
        }
        let payload = match kind {
            CommandKind::DirectCopy => Payload::Literal(stream.take(length)?.to_vec()),
            CommandKind::ByteFill | CommandKind::IncreasingFill => Payload::Byte(stream.next_byte()?),
            CommandKind::WordFill => Payload::Word([stream.next_byte()?, stream.next_byte()?]),
            CommandKind::BackReference => {
                let raw = [stream.next_byte()?, stream.next_byte()?];
                Payload::Offset(match self.format.offset_order() {
                    OffsetOrder::Little => u16::from_le_bytes(raw),
                    OffsetOrder::Big => u16::from_be_bytes(raw),
                })
            }
        };
        Ok(Some(Piece {
            kind,
            length,
            payload,
        }))
    }

    fn apply(&self, piece: &Piece, stream: &mut ByteStream) -> Result<(), Lz2Error> {
        if stream.output_len() + piece.length > self.limit {
            return Err(Lz2Error::OutputLimitExceeded { limit: self.limit });
        }
        match &piece.payload {
            Payload::Literal(bytes) => stream.extend_from_slice(bytes),
            Payload::Byte(b) if piece.kind == CommandKind::ByteFill => {
                for _ in 0..piece.length {
                    stream.push(*b);
                }
            }
            Payload::Byte(b) => {
                for k in 0..piece.length {
                    stream.push(b.wrapping_add(k as u8));
                }
            }
            Payload::Word(word) => {
                for k in 0..piece.length {
                    stream.push(word[k & 1]);
                }
            }
            Payload::Offset(offset) => {
                let offset = *offset as usize;
                if offset >= stream.output_len() {
                    return Err(Lz2Error::BackReferenceOutOfRange {
                        offset,
                        output_len: stream.output_len(),
                    });
                }
                stream.copy_within_output(offset, piece.length);
            }
        }
        Ok(())
    }

    /// Decode one stream from the front of `data`. Returns the output and the
    /// number of compressed bytes consumed, terminator included. Anything
    /// after the terminator is left untouched.
    pub fn decompress_prefix(&self, data: &[u8]) -> Result<(Vec<u8>, usize), Lz2Error> {
        let mut stream = ByteStream::with_capacity(data, data.len().min(self.limit));
        while let Some(piece) = self.read_piece(&mut stream)? {
            self.apply(&piece, &mut stream)?;
        }
        let consumed = stream.position();
        Ok((stream.into_output(), consumed))
    }

    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, Lz2Error> {
        self.decompress_prefix(data).map(|(out, _)| out)
    }

    /// Decode the piece list without expanding it. Back-reference offsets
    /// are checked against the running output length.
    pub fn parse(&self, data: &[u8]) -> Result<Vec<Piece>, Lz2Error> {
        let mut stream = ByteStream::new(data);
        let mut pieces = Vec::new();
        let mut produced = 0usize;
        while let Some(piece) = self.read_piece(&mut stream)? {
            if let Payload::Offset(offset) = piece.payload {
                if offset as usize >= produced {
                    return Err(Lz2Error::BackReferenceOutOfRange {
                        offset: offset as usize,
                        output_len: produced,
                    });
                }
            }
            produced += piece.length;
            if produced > self.limit {
                return Err(Lz2Error::OutputLimitExceeded { limit: self.limit });
            }
            pieces.push(piece);
        }
        Ok(pieces)
    }
}

/// Decompress a graphics-format stream with no output bound.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, Lz2Error> {
    Decompressor::new(Format::Graphics).decompress(data)
}

pub fn decompress_with(data: &[u8], config: &Config) -> Result<Vec<u8>, Lz2Error> {
    Decompressor::from_config(config).decompress(data)
}

/// Like [`decompress_with`] but fails once output would pass `limit` bytes.
pub fn decompress_with_limit(data: &[u8], format: Format, limit: usize) -> Result<Vec<u8>, Lz2Error> {
    Decompressor::new(format).with_limit(limit).decompress(data)
}
