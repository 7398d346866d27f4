use serde::{Deserialize, Serialize};

use crate::types::CommandKind;

/// How the encoder picks among candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Take the cheapest candidate at each position with no lookahead.
    /// Reproduces the output of the older greedy packers.
    Greedy,
    /// Weigh every split of the current run against the following positions
    /// and keep the smallest total.
    #[default]
    OptimalWithAlternatives,
}

/// Byte order of the two-byte back-reference offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetOrder {
    Little,
    Big,
}

/// Stream flavour. Each asset family in the ROM uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Format {
    /// Graphics sheets: little-endian back-reference offsets.
    #[default]
    Graphics,
    /// Overworld map tables: big-endian back-reference offsets.
    Overworld,
    /// Legacy Hyrule Magic streams: no back-reference command.
    HyruleMagic,
}

impl Format {
    pub fn offset_order(self) -> OffsetOrder {
        match self {
            Format::Overworld => OffsetOrder::Big,
            Format::Graphics | Format::HyruleMagic => OffsetOrder::Little,
        }
    }

    pub fn supports(self, kind: CommandKind) -> bool {
        !(self == Format::HyruleMagic && kind == CommandKind::BackReference)
    }
}

/// Runtime configuration for one compress or decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub format: Format,
    pub strategy: Strategy,
    /// Upper bound on decompressed output in bytes.
    pub max_output: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Format::default(),
            strategy: Strategy::default(),
            max_output: usize::MAX,
        }
    }
}

impl Config {
    pub fn new(format: Format, strategy: Strategy) -> Self {
        Self {
            format,
            strategy,
            ..Self::default()
        }
    }
}
