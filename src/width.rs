use crate::config::{code_limit, ALPHABET_SIZE, INITIAL_CODE_WIDTH};

/// Code-width growth for the adaptive codec.
///
/// The encoder advances it once per new dictionary entry, the decoder once per
/// code read. Both see the same sequence of widths without any of it being
/// stored in the stream.
#[derive(Debug, Clone)]
pub(crate) struct WidthSchedule {
    width: u8,
    max_width: u8,
    /// Dictionary size, counting the single-symbol entries
    entries: u32,
    frozen: bool,
}

impl WidthSchedule {
    pub(crate) fn new(max_width: u8) -> Self {
        Self {
            width: INITIAL_CODE_WIDTH,
            max_width,
            entries: ALPHABET_SIZE,
            frozen: false,
        }
    }

    /// Width of the next code to write or read.
    pub(crate) fn width(&self) -> u8 {
        self.width
    }

    pub(crate) fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Admits one dictionary entry and returns its code, or `None` once the
    /// dictionary is frozen.
    ///
    /// When the size reaches `2^width - 1` the width grows by one, or the
    /// dictionary freezes if the width is already at its ceiling.
    pub(crate) fn advance(&mut self) -> Option<u32> {
        if self.frozen {
            return None;
        }

        let code = self.entries;
        self.entries += 1;

        if self.entries >= code_limit(self.width) {
            if self.width < self.max_width {
                self.width += 1;
                tracing::trace!(entries = self.entries, width = self.width, "code width grew");
            } else {
                self.frozen = true;
                tracing::debug!(entries = self.entries, width = self.width, "dictionary frozen");
            }
        }

        Some(code)
    }
}
