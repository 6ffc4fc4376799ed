use crate::codec::compress;
use crate::config::CodecConfig;
use crate::error::Result;
use std::time::{Duration, Instant};

/// Statistics about one compression run.
///
/// Computed after the fact from the input and the finished stream, so the
/// codecs themselves carry no bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    /// Number of input bytes
    pub input_len: usize,
    /// Size of the compressed stream, trailer included
    pub output_len: usize,
    /// Width trailer of the stream
    pub max_bits: u8,
    /// Wall-clock time spent compressing
    pub elapsed: Duration,
}

impl CompressionStats {
    /// Builds statistics for an already-produced `stream`.
    pub fn new(input_len: usize, stream: &[u8], elapsed: Duration) -> Self {
        Self {
            input_len,
            output_len: stream.len(),
            max_bits: stream.last().copied().unwrap_or(0),
            elapsed,
        }
    }

    /// Returns input size divided by output size.
    pub fn compression_ratio(&self) -> f64 {
        if self.output_len == 0 {
            0.0
        } else {
            self.input_len as f64 / self.output_len as f64
        }
    }

    /// Returns the fraction of the input saved, as a percentage.
    pub fn space_savings(&self) -> f64 {
        if self.input_len == 0 {
            0.0
        } else {
            (1.0 - self.output_len as f64 / self.input_len as f64) * 100.0
        }
    }
}

/// Compresses `input` and times the run.
pub fn compress_with_stats(input: &[u8], config: &CodecConfig) -> Result<(Vec<u8>, CompressionStats)> {
    let start = Instant::now();
    let stream = compress(input, config)?;
    let stats = CompressionStats::new(input.len(), &stream, start.elapsed());
    Ok((stream, stats))
}
