use crate::compress::compress_with;
use crate::config::{Config, Format, Strategy};
use crate::decompress::Decompressor;
use crate::Lz2Error;

/// Capability shared by every stream format.
pub trait Codec {
    fn format(&self) -> Format;
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, Lz2Error>;
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, Lz2Error>;
}

/// The one codec body, parameterised by format and strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lz2Codec {
    config: Config,
}

impl Lz2Codec {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn for_format(format: Format) -> Self {
        Self::new(Config::new(format, Strategy::default()))
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn with_limit(mut self, max_output: usize) -> Self {
        self.config.max_output = max_output;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Codec for Lz2Codec {
    fn format(&self) -> Format {
        self.config.format
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, Lz2Error> {
        compress_with(input, &self.config)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, Lz2Error> {
        Decompressor::from_config(&self.config).decompress(data)
    }
}
