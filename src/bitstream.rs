//! LSB-first packing of variable-width codes.
//!
//! A stream is the packed body followed by one trailer byte holding the
//! maximum code width. The final body byte is zero-padded in its high bits.

use crate::config::{MAX_CODE_WIDTH, MIN_CODE_WIDTH};
use crate::error::MalformedStream;

/// Accumulates codes into bytes, least significant bit first.
#[derive(Debug, Default)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: u64,
    bits: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            out: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Appends the low `width` bits of `code`.
    pub fn write(&mut self, code: u32, width: u8) {
        debug_assert!(width <= MAX_CODE_WIDTH, "width {width} too large");
        debug_assert!(code >> width == 0, "code {code} does not fit in {width} bits");

        self.acc |= u64::from(code) << self.bits;
        self.bits += u32::from(width);

        while self.bits >= 8 {
            self.out.push(self.acc as u8);
            self.acc >>= 8;
            self.bits -= 8;
        }
    }

    /// Flushes the partial byte and appends the trailer.
    pub fn finish(mut self, trailer: u8) -> Vec<u8> {
        if self.bits > 0 {
            self.out.push(self.acc as u8);
        }
        self.out.push(trailer);
        self.out
    }
}

/// Reads codes back out of a body produced by [`BitWriter`].
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    acc: u64,
    bits: u32,
}

impl<'a> BitReader<'a> {
    /// `body` excludes the trailer byte.
    pub fn new(body: &'a [u8]) -> Self {
        Self {
            data: body,
            pos: 0,
            acc: 0,
            bits: 0,
        }
    }

    /// Reads the next `width`-bit code, or `None` when too few bits remain.
    pub fn read(&mut self, width: u8) -> Option<u32> {
        let width_bits = u32::from(width);
        while self.bits < width_bits {
            let &byte = self.data.get(self.pos)?;
            self.acc |= u64::from(byte) << self.bits;
            self.bits += 8;
            self.pos += 1;
        }

        let code = (self.acc & ((1u64 << width) - 1)) as u32;
        self.acc >>= width;
        self.bits -= width_bits;
        Some(code)
    }

    /// Checks that whatever is left after the last code is only padding.
    ///
    /// Call once `read` has returned `None`.
    pub fn finish(self) -> Result<(), MalformedStream> {
        if self.pos < self.data.len() || self.bits >= 8 {
            let unread = (self.data.len() - self.pos) as u32 * 8 + self.bits;
            return Err(MalformedStream::TruncatedCode {
                trailing_bits: unread,
            });
        }
        if self.acc != 0 {
            return Err(MalformedStream::NonZeroPadding);
        }
        Ok(())
    }
}

/// Splits a stream into its body and validated trailer width.
pub fn split_trailer(stream: &[u8]) -> Result<(&[u8], u8), MalformedStream> {
    let (&trailer, body) = stream
        .split_last()
        .ok_or(MalformedStream::MissingTrailer)?;

    if !(MIN_CODE_WIDTH..=MAX_CODE_WIDTH).contains(&trailer) {
        return Err(MalformedStream::InvalidTrailer(trailer));
    }
    Ok((body, trailer))
}

/// Packs `codes` at a constant `width` and appends `width` as the trailer.
pub fn pack_fixed(codes: &[u32], width: u8) -> Vec<u8> {
    let body_bytes = (codes.len() * usize::from(width)).div_ceil(8);
    let mut writer = BitWriter::with_capacity(body_bytes + 1);
    for &code in codes {
        writer.write(code, width);
    }
    writer.finish(width)
}

/// Unpacks a constant-width stream, returning its codes and width.
pub fn unpack_fixed(stream: &[u8]) -> Result<(Vec<u32>, u8), MalformedStream> {
    let (body, width) = split_trailer(stream)?;
    let mut reader = BitReader::new(body);
    let mut codes = Vec::with_capacity(body.len() * 8 / usize::from(width));

    while let Some(code) = reader.read(width) {
        codes.push(code);
    }
    reader.finish()?;

    Ok((codes, width))
}
