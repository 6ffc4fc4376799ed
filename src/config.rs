use crate::error::{LzwError, Result};

/// Number of single-symbol entries every dictionary starts with.
pub const ALPHABET_SIZE: u32 = 256;

/// Smallest width able to hold every single-symbol code plus one.
pub const MIN_CODE_WIDTH: u8 = 9;

/// Largest width accepted for `max_bits`.
pub const MAX_CODE_WIDTH: u8 = 24;

/// Width the adaptive codec starts at.
pub const INITIAL_CODE_WIDTH: u8 = 9;

pub const DEFAULT_MAX_BITS: u8 = 12;

/// Which codec produces (or consumed) a stream.
///
/// The stream itself does not record the mode, so callers must pick the
/// same one on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every code uses `max_bits` bits.
    #[default]
    Fixed,
    /// Codes start at 9 bits and widen as the dictionary grows.
    Adaptive,
}

/// Validated codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    max_bits: u8,
    mode: Mode,
}

impl CodecConfig {
    /// Creates a configuration, rejecting widths outside
    /// `MIN_CODE_WIDTH..=MAX_CODE_WIDTH`.
    pub fn new(max_bits: u8, mode: Mode) -> Result<Self> {
        validate_max_bits(max_bits)?;
        Ok(Self { max_bits, mode })
    }

    pub fn max_bits(&self) -> u8 {
        self.max_bits
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_bits: DEFAULT_MAX_BITS,
            mode: Mode::Fixed,
        }
    }
}

pub(crate) fn validate_max_bits(max_bits: u8) -> Result<()> {
    if (MIN_CODE_WIDTH..=MAX_CODE_WIDTH).contains(&max_bits) {
        Ok(())
    } else {
        Err(LzwError::InvalidMaxBits { max_bits })
    }
}

/// Largest number of codes representable at `width` bits, reserving the
/// all-ones value.
pub(crate) fn code_limit(width: u8) -> u32 {
    (1u32 << width) - 1
}
