use crate::adaptive::AdaptiveWidthCodec;
use crate::config::{CodecConfig, Mode};
use crate::error::Result;
use crate::fixed::FixedWidthCodec;

/// Compresses `input` with the codec selected by `config`.
///
/// Every call builds its own dictionary; nothing is shared between calls.
///
/// # Example
///
/// ```
/// use lzw_trie::{compress, decompress, CodecConfig, Mode};
///
/// let config = CodecConfig::new(12, Mode::Adaptive).unwrap();
/// let packed = compress(b"banana bandana", &config).unwrap();
/// assert_eq!(decompress(&packed, Mode::Adaptive).unwrap(), b"banana bandana");
/// ```
pub fn compress(input: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    match config.mode() {
        Mode::Fixed => FixedWidthCodec::new(config.max_bits())?.compress(input),
        Mode::Adaptive => AdaptiveWidthCodec::new(config.max_bits())?.compress(input),
    }
}

/// Decompresses a stream produced by [`compress`] in the same `mode`.
///
/// The width is recovered from the stream's trailer byte.
pub fn decompress(stream: &[u8], mode: Mode) -> Result<Vec<u8>> {
    match mode {
        Mode::Fixed => FixedWidthCodec::decompress(stream),
        Mode::Adaptive => AdaptiveWidthCodec::decompress(stream),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_round_trip() {
        let input = b"TESTETESTETESTETESTETESTE";
        for mode in [Mode::Fixed, Mode::Adaptive] {
            let config = CodecConfig::new(12, mode).unwrap();
            let packed = compress(input, &config).unwrap();
            assert_eq!(decompress(&packed, mode).unwrap(), input);
        }
    }

    #[test]
    fn test_modes_share_framing_for_short_input() {
        // Below 511 entries both modes write 9-bit codes
        let fixed = compress(b"hello", &CodecConfig::new(9, Mode::Fixed).unwrap()).unwrap();
        let adaptive = compress(b"hello", &CodecConfig::new(9, Mode::Adaptive).unwrap()).unwrap();
        assert_eq!(fixed, adaptive);
    }
}
