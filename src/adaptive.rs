//! LZW with code widths that grow alongside the dictionary.

use crate::bitstream::{split_trailer, BitReader, BitWriter};
use crate::config::{code_limit, validate_max_bits, ALPHABET_SIZE};
use crate::error::{LzwError, Result};
use crate::symbol_table::decode_codes;
use crate::width::WidthSchedule;
use ahash::AHashMap as HashMap;

/// Encode-side dictionary: a plain map from sequence to code.
#[derive(Debug, Clone)]
pub struct PrefixDictionary {
    codes: HashMap<Vec<u8>, u32>,
}

impl PrefixDictionary {
    /// Creates a dictionary seeded with the 256 single-symbol entries.
    pub fn new() -> Self {
        let mut codes = HashMap::with_capacity(ALPHABET_SIZE as usize * 2);
        for symbol in 0..=u8::MAX {
            codes.insert(vec![symbol], u32::from(symbol));
        }
        Self { codes }
    }

    pub fn get(&self, sequence: &[u8]) -> Result<Option<u32>> {
        if sequence.is_empty() {
            return Err(LzwError::EmptyKey);
        }
        Ok(self.codes.get(sequence).copied())
    }

    pub fn insert(&mut self, sequence: Vec<u8>, code: u32) -> Result<()> {
        if sequence.is_empty() {
            return Err(LzwError::EmptyKey);
        }
        self.codes.insert(sequence, code);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for PrefixDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// A code together with the width it is packed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthCode {
    pub code: u32,
    pub width: u8,
}

/// Adaptive-width LZW codec.
///
/// Codes start at 9 bits. Each time the dictionary reaches `2^width - 1`
/// entries the width grows by one, until `max_bits` is reached; from then on
/// the dictionary is frozen and every code uses `max_bits` bits.
///
/// # Example
///
/// ```
/// use lzw_trie::AdaptiveWidthCodec;
///
/// let codec = AdaptiveWidthCodec::new(12).unwrap();
/// let packed = codec.compress(b"to be or not to be").unwrap();
/// assert_eq!(AdaptiveWidthCodec::decompress(&packed).unwrap(), b"to be or not to be");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveWidthCodec {
    max_bits: u8,
}

impl AdaptiveWidthCodec {
    /// Creates a codec whose widths never exceed `max_bits`.
    pub fn new(max_bits: u8) -> Result<Self> {
        validate_max_bits(max_bits)?;
        Ok(Self { max_bits })
    }

    pub fn max_bits(&self) -> u8 {
        self.max_bits
    }

    /// Runs greedy longest-match LZW over `input`, returning each emitted
    /// code with the width it is written at.
    pub fn compress_codes(&self, input: &[u8]) -> Result<Vec<WidthCode>> {
        let mut dictionary = PrefixDictionary::new();
        let mut schedule = WidthSchedule::new(self.max_bits);
        let mut emitted = Vec::with_capacity(input.len() / 2 + 1);

        let mut prefix = Vec::new();
        let mut current = None;

        for &symbol in input {
            prefix.push(symbol);
            if let Some(code) = dictionary.get(&prefix)? {
                current = Some(code);
                continue;
            }

            if let Some(code) = current {
                emitted.push(WidthCode {
                    code,
                    width: schedule.width(),
                });
            }
            if let Some(code) = schedule.advance() {
                dictionary.insert(prefix.clone(), code)?;
            }

            prefix.clear();
            prefix.push(symbol);
            current = dictionary.get(&prefix)?;
        }

        if let Some(code) = current {
            emitted.push(WidthCode {
                code,
                width: schedule.width(),
            });
        }

        tracing::debug!(
            input_len = input.len(),
            codes = emitted.len(),
            entries = dictionary.len(),
            final_width = schedule.width(),
            frozen = schedule.is_frozen(),
            "adaptive compression finished"
        );
        Ok(emitted)
    }

    /// Rebuilds the input from the codes of [`compress_codes`](Self::compress_codes).
    pub fn decompress_codes(&self, codes: &[u32]) -> Result<Vec<u8>> {
        decode_codes(codes, code_limit(self.max_bits) as usize)
    }

    /// Compresses `input` into a packed stream with a `max_bits` trailer.
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let emitted = self.compress_codes(input)?;
        let body_bits: usize = emitted.iter().map(|c| usize::from(c.width)).sum();

        let mut writer = BitWriter::with_capacity(body_bits.div_ceil(8) + 1);
        for WidthCode { code, width } in emitted {
            writer.write(code, width);
        }
        Ok(writer.finish(self.max_bits))
    }

    /// Decompresses a stream produced by [`compress`](Self::compress).
    ///
    /// The width ceiling is read from the trailer and the width schedule is
    /// replayed while reading codes.
    pub fn decompress(stream: &[u8]) -> Result<Vec<u8>> {
        let (body, max_bits) = split_trailer(stream)?;
        let codec = Self { max_bits };

        let mut reader = BitReader::new(body);
        let mut schedule = WidthSchedule::new(max_bits);
        let mut codes = Vec::with_capacity(body.len() * 8 / 9);

        while let Some(code) = reader.read(schedule.width()) {
            codes.push(code);
            schedule.advance();
        }
        reader.finish()?;

        let output = codec.decompress_codes(&codes)?;
        tracing::debug!(
            codes = codes.len(),
            output_len = output.len(),
            max_bits,
            "adaptive decompression finished"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedStream;

    /// Deterministic noise so the dictionary fills quickly.
    fn noise(len: usize, mut seed: u64) -> Vec<u8> {
        (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (seed >> 33) as u8
            })
            .collect()
    }

    #[test]
    fn test_prefix_dictionary_seeded() {
        let dictionary = PrefixDictionary::new();
        assert_eq!(dictionary.len(), 256);
        assert_eq!(dictionary.get(b"A").unwrap(), Some(65));
        assert_eq!(dictionary.get(b"AB").unwrap(), None);
        assert_eq!(dictionary.get(b""), Err(LzwError::EmptyKey));
    }

    #[test]
    fn test_prefix_dictionary_rejects_empty_insert() {
        let mut dictionary = PrefixDictionary::new();
        assert_eq!(dictionary.insert(Vec::new(), 256), Err(LzwError::EmptyKey));
    }

    #[test]
    fn test_starts_at_nine_bits() {
        let codec = AdaptiveWidthCodec::new(12).unwrap();
        let emitted = codec.compress_codes(b"TESTETESTE").unwrap();
        assert_eq!(emitted[0], WidthCode { code: 84, width: 9 });
        assert!(emitted.iter().all(|c| c.width == 9));
    }

    #[test]
    fn test_width_grows_at_511th_entry() {
        let codec = AdaptiveWidthCodec::new(12).unwrap();
        let emitted = codec.compress_codes(&noise(4000, 7)).unwrap();
        assert!(emitted.len() > 300);

        // Emits 0..=254 happen while the dictionary holds 256..=510 entries
        assert!(emitted[..255].iter().all(|c| c.width == 9));
        assert_eq!(emitted[255].width, 10);
        assert!(emitted
            .windows(2)
            .all(|pair| pair[0].width <= pair[1].width));
        assert!(emitted.iter().all(|c| c.width <= 12));
        assert!(emitted.iter().all(|c| c.code >> c.width == 0));
    }

    #[test]
    fn test_width_capped_at_max_bits() {
        let codec = AdaptiveWidthCodec::new(10).unwrap();
        let input = noise(20_000, 3);
        let emitted = codec.compress_codes(&input).unwrap();

        assert_eq!(emitted.last().map(|c| c.width), Some(10));
        assert!(emitted.iter().all(|c| c.width <= 10 && c.code < 1023));

        let stream = codec.compress(&input).unwrap();
        assert_eq!(AdaptiveWidthCodec::decompress(&stream).unwrap(), input);
    }

    #[test]
    fn test_round_trip_repetitive() {
        let input = b"abcabcabcabcabcabcabcabcabcabcabcabd".repeat(300);
        for max_bits in [9, 10, 12, 16] {
            let codec = AdaptiveWidthCodec::new(max_bits).unwrap();
            let stream = codec.compress(&input).unwrap();
            assert_eq!(*stream.last().unwrap(), max_bits);
            assert_eq!(AdaptiveWidthCodec::decompress(&stream).unwrap(), input);
        }
    }

    #[test]
    fn test_round_trip_noise_crossing_widths() {
        let input = noise(50_000, 11);
        let codec = AdaptiveWidthCodec::new(14).unwrap();
        let stream = codec.compress(&input).unwrap();
        assert_eq!(AdaptiveWidthCodec::decompress(&stream).unwrap(), input);
    }

    #[test]
    fn test_empty_and_single_byte() {
        let codec = AdaptiveWidthCodec::new(12).unwrap();
        assert_eq!(codec.compress(b"").unwrap(), vec![12]);
        assert!(AdaptiveWidthCodec::decompress(&[12]).unwrap().is_empty());

        let stream = codec.compress(b"A").unwrap();
        assert_eq!(stream, vec![0x41, 0x00, 12]);
        assert_eq!(AdaptiveWidthCodec::decompress(&stream).unwrap(), b"A");
    }

    #[test]
    fn test_decompress_rejects_bad_trailer() {
        assert_eq!(
            AdaptiveWidthCodec::decompress(&[0x41, 0x00, 2]),
            Err(MalformedStream::InvalidTrailer(2).into())
        );
        assert_eq!(
            AdaptiveWidthCodec::decompress(&[]),
            Err(MalformedStream::MissingTrailer.into())
        );
    }
}
