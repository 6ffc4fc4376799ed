//! # LZW with a Compact-Trie Dictionary
//!
//! LZW compression in two flavours sharing one stream layout:
//!
//! 1. **Fixed width**: every code uses `max_bits` bits; the encoder's dictionary
//!    is a radix-compressed trie ([`CompactTrie`]) holding up to `2^max_bits - 1`
//!    entries.
//! 2. **Adaptive width**: codes start at 9 bits and widen as the dictionary
//!    grows, freezing once `max_bits` is reached.
//!
//! Decoders rebuild the dictionary from the code sequence alone
//! ([`SymbolTable`]). A stream is the codes packed LSB-first followed by one
//! trailer byte holding `max_bits`.
//!
//! ## Example
//!
//! ```
//! use lzw_trie::{compress, decompress, CodecConfig, Mode};
//!
//! let config = CodecConfig::new(12, Mode::Fixed).unwrap();
//! let packed = compress(b"TESTETESTETESTETESTETESTE", &config).unwrap();
//!
//! let unpacked = decompress(&packed, Mode::Fixed).unwrap();
//! assert_eq!(unpacked, b"TESTETESTETESTETESTETESTE");
//! ```
//!
//! ## Performance
//!
//! - Whole input and dictionary are held in memory for the duration of a call
//! - Trie nodes live in a `SlotMap` arena, so splits and merges never reallocate subtrees

mod adaptive;
mod bitstream;
mod code_alloc;
mod codec;
mod config;
mod error;
mod fixed;
mod stats;
mod symbol_table;
mod trie;
mod width;


pub use adaptive::{AdaptiveWidthCodec, PrefixDictionary, WidthCode};
pub use bitstream::{pack_fixed, split_trailer, unpack_fixed, BitReader, BitWriter};
pub use codec::{compress, decompress};
pub use config::{
    CodecConfig, Mode, ALPHABET_SIZE, DEFAULT_MAX_BITS, INITIAL_CODE_WIDTH, MAX_CODE_WIDTH,
    MIN_CODE_WIDTH,
};
pub use error::{LzwError, MalformedStream, Result};
pub use fixed::FixedWidthCodec;
pub use stats::{compress_with_stats, CompressionStats};
pub use symbol_table::SymbolTable;
pub use trie::{common_prefix_length, CompactTrie};
