use crate::config::{MAX_CODE_WIDTH, MIN_CODE_WIDTH};
use thiserror::Error;

/// Errors produced by the dictionary and the codecs.
///
/// A search miss is not an error (`Ok(None)`), and neither is a full
/// dictionary: both are normal results of the algorithm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LzwError {
    #[error("dictionary keys must not be empty")]
    EmptyKey,

    #[error(
        "invalid code width {max_bits}: expected {}..={}",
        MIN_CODE_WIDTH,
        MAX_CODE_WIDTH
    )]
    InvalidMaxBits { max_bits: u8 },

    #[error("malformed stream: {0}")]
    Malformed(#[from] MalformedStream),
}

/// Ways a compressed buffer can fail to decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedStream {
    #[error("missing width trailer")]
    MissingTrailer,

    #[error("trailer width {0} is outside the supported range")]
    InvalidTrailer(u8),

    #[error("body ends mid-code with {trailing_bits} unread bits")]
    TruncatedCode { trailing_bits: u32 },

    #[error("padding bits after the last code are not zero")]
    NonZeroPadding,

    #[error("first code {0} is not a single-symbol entry")]
    UnknownFirstCode(u32),

    #[error("code {code} at position {position} exceeds table size {table_len}")]
    InvalidCode {
        position: usize,
        code: u32,
        table_len: usize,
    },
}

pub type Result<T> = std::result::Result<T, LzwError>;
