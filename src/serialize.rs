use crate::chain::Chain;
use crate::config::{Format, OffsetOrder};
use crate::header::encode_header;
use crate::types::{CommandKind, Payload, Piece, TERMINATOR};
use crate::Lz2Error;

/// Renders pieces into `header, payload` records followed by the terminator.
#[derive(Debug, Clone, Copy)]
pub struct ChainSerializer {
    format: Format,
}

impl ChainSerializer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn serialize<'p>(
        &self,
        pieces: impl IntoIterator<Item = &'p Piece>,
    ) -> Result<Vec<u8>, Lz2Error> {
        let mut out = Vec::new();
        for piece in pieces {
            self.write_piece(piece, &mut out)?;
        }
        out.push(TERMINATOR);
        Ok(out)
    }

    pub fn serialize_chain(&self, chain: &Chain) -> Result<Vec<u8>, Lz2Error> {
        self.serialize(chain.pieces())
    }

    /// Append one piece. Nothing is written if the piece is rejected.
    pub fn write_piece(&self, piece: &Piece, out: &mut Vec<u8>) -> Result<(), Lz2Error> {
        if !self.format.supports(piece.kind) {
            return Err(Lz2Error::InvalidPiece(format!(
                "{} is not available in the {:?} format",
                piece.kind.name(),
                self.format
            )));
        }
        let mut payload = Vec::with_capacity(2);
        let literal = match (piece.kind, &piece.payload) {
            (CommandKind::DirectCopy, Payload::Literal(bytes)) if bytes.len() == piece.length => {
                Some(bytes.as_slice())
            }
            (CommandKind::ByteFill | CommandKind::IncreasingFill, Payload::Byte(b)) => {
                payload.push(*b);
                None
            }
            (CommandKind::WordFill, Payload::Word(word)) => {
                payload.extend_from_slice(word);
                None
            }
            (CommandKind::BackReference, Payload::Offset(offset)) => {
                payload.extend_from_slice(&match self.format.offset_order() {
                    OffsetOrder::Little => offset.to_le_bytes(),
                    OffsetOrder::Big => offset.to_be_bytes(),
                });
                None
            }
            (kind, payload) => {
                return Err(Lz2Error::InvalidPiece(format!(
                    "{} of length {} cannot carry {payload:?}",
                    kind.name(),
                    piece.length
                )))
            }
        };
        encode_header(piece.kind, piece.length, out)?;
        out.extend_from_slice(literal.unwrap_or(&payload[..]));
        Ok(())
    }
}
