//! Document line offsets
//!
//! The only document query the lookup engine needs: where a line starts and
//! where it ends.

/// Line/offset queries over a text document.
pub trait LineOffsets {
    fn line_start_offset(&self, line: u32) -> usize;
    /// Offset of the end of `line`, excluding its line terminator. Lines past
    /// the end of the document clamp to the document length.
    fn line_end_offset(&self, line: u32) -> usize;
}

/// In-memory text with precomputed line starts.
#[derive(Debug, Clone)]
pub struct TextDocument {
    text: String,
    line_starts: Vec<usize>,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(offset, _)| offset + 1),
        );
        Self { text, line_starts }
    }
}

impl LineOffsets for TextDocument {
    fn line_start_offset(&self, line: u32) -> usize {
        self.line_starts
            .get(line as usize)
            .copied()
            .unwrap_or(self.text.len())
    }

    fn line_end_offset(&self, line: u32) -> usize {
        let Some(next_start) = self.line_starts.get(line as usize + 1) else {
            return self.text.len();
        };
        let mut end = next_start - 1;
        if end > 0 && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        end
    }
}
