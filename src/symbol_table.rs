use crate::config::ALPHABET_SIZE;
use crate::error::{MalformedStream, Result};

/// Decode-side dictionary mapping codes back to the sequences they stand for.
///
/// Append-only: codes are handed out in the same order the encoder assigns
/// them, so the table is rebuilt from the code stream alone.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: Vec<Vec<u8>>,
}

impl SymbolTable {
    /// Creates a table seeded with the 256 single-symbol entries.
    pub fn new() -> Self {
        let mut entries = Vec::with_capacity(ALPHABET_SIZE as usize * 2);
        entries.extend((0..=u8::MAX).map(|symbol| vec![symbol]));
        Self { entries }
    }

    /// Returns the sequence for `code`, if it has been assigned.
    pub fn get(&self, code: u32) -> Option<&[u8]> {
        self.entries.get(code as usize).map(Vec::as_slice)
    }

    /// Appends `sequence`, returning the code it receives.
    pub fn append(&mut self, sequence: Vec<u8>) -> u32 {
        let code = self.entries.len() as u32;
        self.entries.push(sequence);
        code
    }

    /// Number of assigned codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuilds the input from an LZW code sequence.
///
/// The table stops growing at `limit` entries, mirroring the encoder's
/// dictionary freeze. A code equal to the table size refers to the entry
/// about to be created and expands to the previous sequence plus its own
/// first symbol.
pub(crate) fn decode_codes(codes: &[u32], limit: usize) -> Result<Vec<u8>> {
    let Some((&first, rest)) = codes.split_first() else {
        return Ok(Vec::new());
    };

    let mut table = SymbolTable::new();
    let mut prefix = table
        .get(first)
        .ok_or(MalformedStream::UnknownFirstCode(first))?
        .to_vec();
    let mut output = prefix.clone();

    for (offset, &code) in rest.iter().enumerate() {
        let entry = match table.get(code) {
            Some(entry) => entry.to_vec(),
            None if code as usize == table.len() && table.len() < limit => {
                let mut entry = prefix.clone();
                entry.push(prefix[0]);
                entry
            }
            None => {
                return Err(MalformedStream::InvalidCode {
                    position: offset + 1,
                    code,
                    table_len: table.len(),
                }
                .into())
            }
        };

        output.extend_from_slice(&entry);
        if table.len() < limit {
            let mut added = prefix;
            added.push(entry[0]);
            table.append(added);
        }
        prefix = entry;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_alphabet() {
        let table = SymbolTable::new();
        assert_eq!(table.len(), 256);
        assert_eq!(table.get(0x41), Some(&b"A"[..]));
        assert_eq!(table.get(255), Some(&[255u8][..]));
        assert_eq!(table.get(256), None);
    }

    #[test]
    fn test_append_assigns_next_code() {
        let mut table = SymbolTable::new();
        assert_eq!(table.append(b"ab".to_vec()), 256);
        assert_eq!(table.append(b"abc".to_vec()), 257);
        assert_eq!(table.get(256), Some(&b"ab"[..]));
        assert_eq!(table.get(257), Some(&b"abc"[..]));
        assert_eq!(table.len(), 258);
    }

    #[test]
    fn test_decode_literals() {
        assert_eq!(decode_codes(&[65], 4095).unwrap(), b"A");
        assert_eq!(decode_codes(&[72, 105], 4095).unwrap(), b"Hi");
        assert_eq!(decode_codes(&[], 4095).unwrap(), b"");
    }

    #[test]
    fn test_decode_self_reference() {
        // "aaaa" encodes as a, then the code being defined (256 = "aa"), then a
        assert_eq!(decode_codes(&[97, 256, 97], 4095).unwrap(), b"aaaa");
    }

    #[test]
    fn test_decode_unknown_first_code() {
        assert_eq!(
            decode_codes(&[300], 4095),
            Err(MalformedStream::UnknownFirstCode(300).into())
        );
    }

    #[test]
    fn test_decode_code_beyond_table() {
        assert_eq!(
            decode_codes(&[97, 98, 400], 4095),
            Err(MalformedStream::InvalidCode {
                position: 2,
                code: 400,
                table_len: 257,
            }
            .into())
        );
    }

    #[test]
    fn test_decode_respects_limit() {
        // With the table already full, the pending code cannot be referenced
        assert!(decode_codes(&[97, 256], 256).is_err());
        assert_eq!(decode_codes(&[97, 98, 97], 256).unwrap(), b"aba");
    }

    #[test]
    fn test_matches_trie_assignment_order() {
        use crate::trie::CompactTrie;

        let mut trie = CompactTrie::with_alphabet(4095);
        let mut table = SymbolTable::new();
        let keys: [&[u8]; 5] = [b"to", b"ob", b"be", b"tob", b"obe"];
        for key in keys {
            let trie_code = trie.insert(key).unwrap();
            assert_eq!(trie_code, Some(table.append(key.to_vec())));
        }
    }
}
