//! Fixed-size asset wrappers around the codec.
//!
//! Graphics sheets and overworld tables always decompress to a known size; a
//! stream that produces anything else is reported rather than truncated or
//! padded.

use crate::codec::{Codec, Lz2Codec};
use crate::config::{Format, Strategy};
use crate::decompress::Decompressor;
use crate::Lz2Error;

/// Uncompressed size of a 3bpp graphics sheet.
pub const SHEET_3BPP_SIZE: usize = 0x600;
/// Uncompressed size of a 2bpp graphics sheet.
pub const SHEET_2BPP_SIZE: usize = 0x800;
/// One half (low or high bytes) of an overworld area's map32 table.
pub const MAP32_HALF_SIZE: usize = 0x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetDepth {
    Bpp2,
    Bpp3,
}

impl SheetDepth {
    pub fn size(self) -> usize {
        match self {
            SheetDepth::Bpp2 => SHEET_2BPP_SIZE,
            SheetDepth::Bpp3 => SHEET_3BPP_SIZE,
        }
    }
}

/// Layout of an overworld map table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverworldTable {
    /// Byte table of 16x16 map32 indices.
    Map32Half,
    /// Table of `entries` little-endian map16 words.
    Map16 { entries: usize },
}

impl OverworldTable {
    pub fn size(self) -> usize {
        match self {
            OverworldTable::Map32Half => MAP32_HALF_SIZE,
            OverworldTable::Map16 { entries } => entries.saturating_mul(2),
        }
    }
}

fn expect_size(expected: usize, actual: usize) -> Result<(), Lz2Error> {
    if expected != actual {
        return Err(Lz2Error::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Decode a stream that must expand to exactly `expected` bytes.
fn decompress_exact(data: &[u8], format: Format, expected: usize) -> Result<Vec<u8>, Lz2Error> {
    let decoder = Decompressor::new(format);
    match decoder.with_limit(expected).decompress(data) {
        Ok(out) => {
            expect_size(expected, out.len())?;
            Ok(out)
        }
        Err(Lz2Error::OutputLimitExceeded { .. }) => {
            let actual = decoder.parse(data)?.iter().map(|p| p.length).sum();
            Err(Lz2Error::SizeMismatch { expected, actual })
        }
        Err(e) => Err(e),
    }
}

pub fn compress_graphics(sheet: &[u8], depth: SheetDepth) -> Result<Vec<u8>, Lz2Error> {
    compress_graphics_with(sheet, depth, Strategy::default())
}

/// Compress a sheet with an explicit strategy, for reproducing streams made
/// by older packers.
pub fn compress_graphics_with(
    sheet: &[u8],
    depth: SheetDepth,
    strategy: Strategy,
) -> Result<Vec<u8>, Lz2Error> {
    expect_size(depth.size(), sheet.len())?;
    Lz2Codec::for_format(Format::Graphics)
        .with_strategy(strategy)
        .compress(sheet)
}

pub fn decompress_graphics(data: &[u8], depth: SheetDepth) -> Result<Vec<u8>, Lz2Error> {
    decompress_exact(data, Format::Graphics, depth.size())
}

pub fn compress_overworld(table: &[u8], layout: OverworldTable) -> Result<Vec<u8>, Lz2Error> {
    expect_size(layout.size(), table.len())?;
    Lz2Codec::for_format(Format::Overworld).compress(table)
}

pub fn decompress_overworld(data: &[u8], layout: OverworldTable) -> Result<Vec<u8>, Lz2Error> {
    decompress_exact(data, Format::Overworld, layout.size())
}

pub fn compress_hyrule_magic(input: &[u8]) -> Result<Vec<u8>, Lz2Error> {
    Lz2Codec::for_format(Format::HyruleMagic).compress(input)
}

pub fn decompress_hyrule_magic(data: &[u8]) -> Result<Vec<u8>, Lz2Error> {
    Lz2Codec::for_format(Format::HyruleMagic).decompress(data)
}
