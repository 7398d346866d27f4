use crate::chain::{ChainBuilder, CompressionContext};
use crate::config::{Config, Format};
use crate::decompress::Decompressor;
use crate::serialize::ChainSerializer;
use crate::Lz2Error;

/// Compress with the default configuration: graphics format, optimal
/// strategy.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, Lz2Error> {
    compress_with(input, &Config::default())
}

/// Compress `input`, then prove the result decodes back to `input`.
pub fn compress_with(input: &[u8], config: &Config) -> Result<Vec<u8>, Lz2Error> {
    let ctx = ChainBuilder::new(config.format, config.strategy).build(input);
    let encoded = ChainSerializer::new(config.format)
        .serialize_chain(ctx.chain())
        .map_err(|e| Lz2Error::CompressionInternalInconsistency(e.to_string()))?;
    validate_compression_result(input, &encoded, &ctx, config.format)?;
    Ok(encoded)
}

/// Round-trip self-check run on every compressed result.
///
/// Any disagreement between the chain, its serialized form and the original
/// input is an encoder bug; shipping such a stream would corrupt the asset.
pub fn validate_compression_result(
    input: &[u8],
    encoded: &[u8],
    ctx: &CompressionContext,
    format: Format,
) -> Result<(), Lz2Error> {
    let covered = ctx.chain().covered_len();
    if covered != input.len() {
        return Err(Lz2Error::CompressionInternalInconsistency(format!(
            "chain covers {covered} bytes, input has {}",
            input.len()
        )));
    }
    if encoded.len() != ctx.estimated_len() {
        return Err(Lz2Error::CompressionInternalInconsistency(format!(
            "serialized {} bytes, expected {}",
            encoded.len(),
            ctx.estimated_len()
        )));
    }
    let decoded = Decompressor::new(format)
        .with_limit(input.len())
        .decompress(encoded)
        .map_err(|e| Lz2Error::CompressionInternalInconsistency(format!("round trip failed: {e}")))?;
    if let Some(at) = decoded.iter().zip(input).position(|(a, b)| a != b) {
        return Err(Lz2Error::CompressionInternalInconsistency(format!(
            "round trip differs at byte {at}"
        )));
    }
    if decoded.len() != input.len() {
        return Err(Lz2Error::CompressionInternalInconsistency(format!(
            "round trip produced {} bytes, expected {}",
            decoded.len(),
            input.len()
        )));
    }
    Ok(())
}
