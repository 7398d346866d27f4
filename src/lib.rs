//! LC_LZ2 codec for SNES game assets.
//!
//! Streams are a sequence of pieces, each a one- or two-byte header followed
//! by its argument, closed by a `0xFF` terminator. Five commands exist:
//! literal copy, byte fill, word fill, increasing fill and a back-reference
//! into the output already produced. See [`header`] for the bit layout.
//!
//! ```
//! let raw = [0x11u8; 4];
//! let packed = lz2::compress(&raw).unwrap();
//! assert_eq!(packed, [0x23, 0x11, 0xFF]);
//! assert_eq!(lz2::decompress(&packed).unwrap(), raw);
//! ```

pub mod candidate;
pub mod chain;
pub mod codec;
pub mod compress;
pub mod config;
pub mod decompress;
pub mod error;
pub mod formats;
pub mod header;
pub mod io_utils;
pub mod serialize;
pub mod stats;
pub mod stream;
pub mod types;

pub use candidate::{Candidate, CandidateGenerator, MatchFinder};
pub use chain::{Chain, ChainBuilder, CompressionContext};
pub use codec::{Codec, Lz2Codec};
pub use compress::{compress, compress_with, validate_compression_result};
pub use config::{Config, Format, OffsetOrder, Strategy};
pub use decompress::{decompress, decompress_with, decompress_with_limit, Decompressor};
pub use error::Lz2Error;
pub use formats::{
    compress_graphics, compress_graphics_with, compress_hyrule_magic, compress_overworld,
    decompress_graphics, decompress_hyrule_magic, decompress_overworld, OverworldTable,
    SheetDepth, MAP32_HALF_SIZE, SHEET_2BPP_SIZE, SHEET_3BPP_SIZE,
};
pub use header::{decode_header, encode_header, Header};
pub use serialize::ChainSerializer;
pub use stats::CompressionStats;
pub use stream::ByteStream;
pub use types::{
    encoded_cost, header_len, CommandKind, Payload, Piece, COMMAND_SIZE, MAX_PIECE_LEN,
    SHORT_HEADER_MAX_LEN, TERMINATOR,
};
