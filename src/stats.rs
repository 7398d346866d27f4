//! `CompressionStats` tallies what a stream is made of. The library never
//! prints it; the command-line tool reports it as text or JSON.

use serde::Serialize;

use crate::types::{CommandKind, Piece};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompressionStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub pieces: usize,
    pub direct_copy: usize,
    pub byte_fill: usize,
    pub word_fill: usize,
    pub increasing_fill: usize,
    pub back_reference: usize,
    /// Literal bytes carried verbatim.
    pub literal_bytes: usize,
}

impl CompressionStats {
    pub fn from_pieces<'p>(
        pieces: impl IntoIterator<Item = &'p Piece>,
        input_bytes: usize,
        output_bytes: usize,
    ) -> Self {
        let mut stats = Self {
            input_bytes,
            output_bytes,
            ..Self::default()
        };
        for piece in pieces {
            stats.pieces += 1;
            match piece.kind {
                CommandKind::DirectCopy => {
                    stats.direct_copy += 1;
                    stats.literal_bytes += piece.length;
                }
                CommandKind::ByteFill => stats.byte_fill += 1,
                CommandKind::WordFill => stats.word_fill += 1,
                CommandKind::IncreasingFill => stats.increasing_fill += 1,
                CommandKind::BackReference => stats.back_reference += 1,
            }
        }
        stats
    }

    /// Compressed size as a percentage of the raw size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 * 100.0 / self.input_bytes as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "Input: {} bytes\nOutput: {} bytes\nRatio: {:.2}%\nPieces: {} (copy {}, byte {}, word {}, inc {}, ref {})",
            self.input_bytes,
            self.output_bytes,
            self.ratio(),
            self.pieces,
            self.direct_copy,
            self.byte_fill,
            self.word_fill,
            self.increasing_fill,
            self.back_reference,
        )
    }
}
