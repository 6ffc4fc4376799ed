//! Radix-compressed trie mapping byte sequences to dictionary codes.
//!
//! Nodes live in a `SlotMap` arena and refer to their children by key, so
//! splitting and merging edges only moves keys around.

use crate::code_alloc::CodeAllocator;
use crate::config::ALPHABET_SIZE;
use crate::error::{LzwError, Result};
use ahash::AHashMap as HashMap;
use slotmap::{DefaultKey, SlotMap};
use std::fmt;

/// A node of the trie.
///
/// `content` labels the incoming edge. A node is terminal exactly when it
/// carries a code.
#[derive(Debug)]
pub(crate) struct TrieNode {
    pub content: Vec<u8>,
    pub code: Option<u32>,
    /// Keyed by the first symbol of each child's content.
    pub children: HashMap<u8, DefaultKey>,
}

impl TrieNode {
    pub(crate) fn new(content: Vec<u8>, code: Option<u32>) -> Self {
        Self {
            content,
            code,
            children: HashMap::default(),
        }
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.code.is_some()
    }
}

/// Compact trie used as the encoder's LZW dictionary.
///
/// Maintains the radix property (siblings never share a first symbol) and
/// path compaction (no non-terminal node other than the root has a single
/// child) across inserts and deletes.
///
/// # Example
///
/// ```
/// use lzw_trie::CompactTrie;
///
/// let mut trie = CompactTrie::new(16);
/// assert_eq!(trie.insert(b"a").unwrap(), Some(0));
/// assert_eq!(trie.insert(b"ab").unwrap(), Some(1));
/// assert_eq!(trie.search(b"ab").unwrap(), Some(1));
/// assert_eq!(trie.search(b"abc").unwrap(), None);
/// ```
pub struct CompactTrie {
    /// Storage for all nodes, including the root
    pub(crate) nodes: SlotMap<DefaultKey, TrieNode>,

    /// Key of the root node (empty content, never terminal)
    pub(crate) root: DefaultKey,

    /// Source of auto-assigned codes
    codes: CodeAllocator,

    /// Number of terminal nodes
    len: usize,
}

impl CompactTrie {
    /// Creates an empty trie admitting at most `capacity` codes.
    pub fn new(capacity: u32) -> Self {
        let mut nodes = SlotMap::new();
        let root = nodes.insert(TrieNode::new(Vec::new(), None));

        Self {
            nodes,
            root,
            codes: CodeAllocator::new(capacity),
            len: 0,
        }
    }

    /// Creates a trie already holding the 256 single-symbol entries.
    pub fn with_alphabet(capacity: u32) -> Self {
        let mut trie = Self::new(capacity);
        trie.reset();
        trie
    }

    /// Clears the trie and seeds it with codes 0-255 for the single symbols.
    ///
    /// The next auto-assigned code is 256 afterwards.
    pub fn reset(&mut self) {
        let capacity = self.codes.capacity();
        *self = Self::new(capacity);

        for symbol in 0..=u8::MAX {
            if self.len as u32 >= capacity {
                break;
            }
            self.attach_leaf(self.root, vec![symbol], u32::from(symbol));
        }
        self.codes.skip_to(ALPHABET_SIZE.min(capacity));
    }

    /// Returns the code stored for exactly `key`, or `None` if absent.
    pub fn search(&self, key: &[u8]) -> Result<Option<u32>> {
        if key.is_empty() {
            return Err(LzwError::EmptyKey);
        }
        Ok(self.locate(key).and_then(|(_, node)| self.nodes[node].code))
    }

    /// Inserts `key` with the next auto-assigned code.
    ///
    /// Returns the code now associated with `key`. If the key was already
    /// present its existing code is returned. Once the trie is full this
    /// degrades to `search`, so `None` means the key is absent and can no
    /// longer be added.
    pub fn insert(&mut self, key: &[u8]) -> Result<Option<u32>> {
        self.insert_entry(key, None)
    }

    /// Inserts `key` with an explicit code, leaving the code counter untouched.
    ///
    /// Explicit codes are not checked for uniqueness.
    pub fn insert_with_code(&mut self, key: &[u8], code: u32) -> Result<Option<u32>> {
        self.insert_entry(key, Some(code))
    }

    /// Removes `key`, returning whether it was present.
    ///
    /// A node that still has children is only demoted. A removed leaf's
    /// parent is merged with its remaining child when that restores
    /// compaction.
    pub fn delete(&mut self, key: &[u8]) -> Result<bool> {
        if key.is_empty() {
            return Err(LzwError::EmptyKey);
        }

        let Some((parent, node)) = self.locate(key) else {
            return Ok(false);
        };

        if self.nodes[node].code.take().is_none() {
            return Ok(false);
        }
        self.len -= 1;

        match self.nodes[node].children.len() {
            0 => {
                let first = self.nodes[node].content[0];
                self.nodes[parent].children.remove(&first);
                self.nodes.remove(node);
                self.compact(parent);
            }
            1 => self.compact(node),
            _ => {}
        }

        Ok(true)
    }

    /// Number of entries (terminal nodes).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> u32 {
        self.codes.capacity()
    }

    /// The code the next auto-assigned insert would receive.
    pub fn next_code(&self) -> u32 {
        self.codes.next()
    }

    /// Returns true once no further entries are admitted.
    pub fn is_full(&self) -> bool {
        self.codes.is_exhausted() || self.len as u32 >= self.codes.capacity()
    }

    /// Returns every entry with its code, ordered by code.
    pub fn entries(&self) -> Vec<(Vec<u8>, u32)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut stack = vec![(self.root, Vec::new())];

        while let Some((key, path)) = stack.pop() {
            let node = &self.nodes[key];
            if let Some(code) = node.code {
                entries.push((path.clone(), code));
            }
            for &child in node.children.values() {
                let mut child_path = path.clone();
                child_path.extend_from_slice(&self.nodes[child].content);
                stack.push((child, child_path));
            }
        }

        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// Walks to the node spelling exactly `key`, returning it and its parent.
    fn locate(&self, key: &[u8]) -> Option<(DefaultKey, DefaultKey)> {
        let mut parent = self.root;
        let mut node = self.root;
        let mut rest = key;

        while let Some(first) = rest.first() {
            let child = *self.nodes[node].children.get(first)?;
            let content = &self.nodes[child].content;
            if !rest.starts_with(content) {
                return None;
            }
            rest = &rest[content.len()..];
            parent = node;
            node = child;
        }

        Some((parent, node))
    }

    fn insert_entry(&mut self, key: &[u8], explicit: Option<u32>) -> Result<Option<u32>> {
        if key.is_empty() {
            return Err(LzwError::EmptyKey);
        }
        if self.is_full() {
            return self.search(key);
        }

        let mut node = self.root;
        let mut rest = key;

        while let Some(&first) = rest.first() {
            let Some(&child) = self.nodes[node].children.get(&first) else {
                let code = self.claim_code(explicit);
                self.attach_leaf(node, rest.to_vec(), code);
                return Ok(Some(code));
            };

            let shared = common_prefix_length(rest, &self.nodes[child].content);
            if shared == self.nodes[child].content.len() {
                rest = &rest[shared..];
                node = child;
                continue;
            }

            // Partial match: cut the edge at `shared` and hang the new entry there
            self.split_edge(child, shared);
            let code = self.claim_code(explicit);
            if shared < rest.len() {
                self.attach_leaf(child, rest[shared..].to_vec(), code);
            } else {
                self.nodes[child].code = Some(code);
                self.len += 1;
            }
            return Ok(Some(code));
        }

        if let Some(code) = self.nodes[node].code {
            return Ok(Some(code));
        }
        let code = self.claim_code(explicit);
        self.nodes[node].code = Some(code);
        self.len += 1;
        Ok(Some(code))
    }

    fn claim_code(&mut self, explicit: Option<u32>) -> u32 {
        match explicit {
            Some(code) => code,
            None => self.codes.allocate(),
        }
    }

    fn attach_leaf(&mut self, parent: DefaultKey, content: Vec<u8>, code: u32) {
        let first = content[0];
        let leaf = self.nodes.insert(TrieNode::new(content, Some(code)));
        self.nodes[parent].children.insert(first, leaf);
        self.len += 1;
    }

    /// Truncates `key`'s content to `at` symbols, moving the tail, code and
    /// children into a new node below it.
    fn split_edge(&mut self, key: DefaultKey, at: usize) {
        let upper = &mut self.nodes[key];
        let lower = TrieNode {
            content: upper.content.split_off(at),
            code: upper.code.take(),
            children: std::mem::take(&mut upper.children),
        };

        let first = lower.content[0];
        let lower_key = self.nodes.insert(lower);
        self.nodes[key].children.insert(first, lower_key);
    }

    /// Merges a non-terminal node that has a single child into that child.
    fn compact(&mut self, key: DefaultKey) {
        if key == self.root {
            return;
        }

        let node = &self.nodes[key];
        if node.is_terminal() || node.children.len() != 1 {
            return;
        }
        let Some(&child_key) = node.children.values().next() else {
            return;
        };
        let Some(child) = self.nodes.remove(child_key) else {
            return;
        };

        let node = &mut self.nodes[key];
        node.content.extend_from_slice(&child.content);
        node.code = child.code;
        node.children = child.children;
    }

    fn fmt_children(&self, f: &mut fmt::Formatter<'_>, key: DefaultKey, depth: usize) -> fmt::Result {
        let mut children: Vec<_> = self.nodes[key].children.iter().collect();
        children.sort_by_key(|(first, _)| **first);

        for (_, &child) in children {
            let node = &self.nodes[child];
            write!(f, "{:indent$}{}", "", node.content.escape_ascii(), indent = depth * 2)?;
            match node.code {
                Some(code) => writeln!(f, " [{code}]")?,
                None => writeln!(f)?,
            }
            self.fmt_children(f, child, depth + 1)?;
        }
        Ok(())
    }
}

/// Prints one edge per line, indented by depth, with the code of terminal nodes.
impl fmt::Display for CompactTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_children(f, self.root, 0)
    }
}

impl fmt::Debug for CompactTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactTrie")
            .field("len", &self.len)
            .field("next_code", &self.codes.next())
            .field("capacity", &self.codes.capacity())
            .finish()
    }
}

/// Length of the longest shared leading run of `a` and `b`.
pub fn common_prefix_length(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
