//! LZW with a constant code width and a compact-trie dictionary.

use crate::bitstream::{pack_fixed, unpack_fixed};
use crate::config::{code_limit, validate_max_bits};
use crate::error::Result;
use crate::symbol_table::decode_codes;
use crate::trie::CompactTrie;

/// Fixed-width LZW codec.
///
/// Every code in the stream takes `width` bits. The dictionary holds at most
/// `2^width - 1` entries and stops growing once full.
///
/// # Example
///
/// ```
/// use lzw_trie::FixedWidthCodec;
///
/// let codec = FixedWidthCodec::new(12).unwrap();
/// let packed = codec.compress(b"abababab").unwrap();
/// assert_eq!(FixedWidthCodec::decompress(&packed).unwrap(), b"abababab");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthCodec {
    width: u8,
}

impl FixedWidthCodec {
    /// Creates a codec emitting `width`-bit codes.
    pub fn new(width: u8) -> Result<Self> {
        validate_max_bits(width)?;
        Ok(Self { width })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Maximum number of dictionary entries, single symbols included.
    pub fn capacity(&self) -> u32 {
        code_limit(self.width)
    }

    /// Runs greedy longest-match LZW over `input`, returning the emitted codes.
    pub fn compress_codes(&self, input: &[u8]) -> Result<Vec<u32>> {
        let mut trie = CompactTrie::with_alphabet(self.capacity());
        let mut codes = Vec::with_capacity(input.len() / 2 + 1);

        // `current` is the code of `prefix`, present whenever `prefix` is non-empty
        let mut prefix = Vec::new();
        let mut current = None;

        for &symbol in input {
            prefix.push(symbol);
            if let Some(code) = trie.search(&prefix)? {
                current = Some(code);
                continue;
            }

            codes.extend(current);
            trie.insert(&prefix)?;

            prefix.clear();
            prefix.push(symbol);
            current = trie.search(&prefix)?;
        }
        codes.extend(current);

        tracing::debug!(
            input_len = input.len(),
            codes = codes.len(),
            entries = trie.len(),
            width = self.width,
            "fixed-width compression finished"
        );
        Ok(codes)
    }

    /// Rebuilds the input from codes produced by [`compress_codes`](Self::compress_codes).
    pub fn decompress_codes(&self, codes: &[u32]) -> Result<Vec<u8>> {
        decode_codes(codes, self.capacity() as usize)
    }

    /// Compresses `input` into a packed stream with a width trailer.
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let codes = self.compress_codes(input)?;
        Ok(pack_fixed(&codes, self.width))
    }

    /// Decompresses a stream produced by [`compress`](Self::compress).
    ///
    /// The code width is taken from the stream's trailer.
    pub fn decompress(stream: &[u8]) -> Result<Vec<u8>> {
        let (codes, width) = unpack_fixed(stream)?;
        let output = Self { width }.decompress_codes(&codes)?;

        tracing::debug!(
            codes = codes.len(),
            output_len = output.len(),
            width,
            "fixed-width decompression finished"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LzwError, MalformedStream};

    const TESTE: &[u8] = b"TESTETESTETESTETESTETESTE";

    #[test]
    fn test_rejects_invalid_width() {
        assert_eq!(
            FixedWidthCodec::new(4),
            Err(LzwError::InvalidMaxBits { max_bits: 4 })
        );
    }

    #[test]
    fn test_literal_prefix_then_dictionary_hits() {
        let codec = FixedWidthCodec::new(12).unwrap();
        let codes = codec.compress_codes(TESTE).unwrap();

        assert_eq!(&codes[..3], &[84, 69, 83]);
        assert!(codes[3..].iter().any(|&code| code >= 256));
        assert!(codes.len() < TESTE.len());
        assert_eq!(codec.decompress_codes(&codes).unwrap(), TESTE);
    }

    #[test]
    fn test_known_code_sequence() {
        let codec = FixedWidthCodec::new(12).unwrap();
        let codes = codec.compress_codes(b"TOBEORNOTTOBEORTOBEORNOT").unwrap();
        assert_eq!(
            codes,
            vec![84, 79, 66, 69, 79, 82, 78, 79, 84, 256, 258, 260, 265, 259, 261, 263]
        );
    }

    #[test]
    fn test_self_reference_round_trip() {
        let codec = FixedWidthCodec::new(9).unwrap();
        let codes = codec.compress_codes(b"aaaaaaa").unwrap();
        assert_eq!(codes, vec![97, 256, 257, 97]);
        assert_eq!(codec.decompress_codes(&codes).unwrap(), b"aaaaaaa");
    }

    #[test]
    fn test_empty_input() {
        let codec = FixedWidthCodec::new(12).unwrap();
        assert!(codec.compress_codes(b"").unwrap().is_empty());

        let stream = codec.compress(b"").unwrap();
        assert_eq!(stream, vec![12]);
        assert!(FixedWidthCodec::decompress(&stream).unwrap().is_empty());
    }

    #[test]
    fn test_single_code_stream() {
        assert_eq!(FixedWidthCodec::decompress(&[0x41, 0x00, 9]).unwrap(), b"A");
    }

    #[test]
    fn test_dictionary_freezes_at_capacity() {
        let codec = FixedWidthCodec::new(9).unwrap();
        let input: Vec<u8> = (0..20_000u32).map(|i| (i * 7 % 251) as u8).collect();
        let codes = codec.compress_codes(&input).unwrap();

        assert!(codes.iter().all(|&code| code < codec.capacity()));
        assert_eq!(codec.decompress_codes(&codes).unwrap(), input);
    }

    #[test]
    fn test_stream_round_trip_all_widths() {
        let input = b"the quick brown fox jumps over the lazy dog, the quick brown fox".repeat(20);
        for width in 9..=16 {
            let codec = FixedWidthCodec::new(width).unwrap();
            let stream = codec.compress(&input).unwrap();
            assert_eq!(*stream.last().unwrap(), width);
            assert_eq!(FixedWidthCodec::decompress(&stream).unwrap(), input);
        }
    }

    #[test]
    fn test_unknown_first_code() {
        let stream = pack_fixed(&[400], 12);
        assert_eq!(
            FixedWidthCodec::decompress(&stream),
            Err(MalformedStream::UnknownFirstCode(400).into())
        );
    }
}
