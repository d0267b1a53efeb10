use tower_lsp::lsp_types::{Position, Range};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
}

impl DocumentState {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Text of a 0-based line as the validator sees it (split on '\n' only)
    pub fn line(&self, line_idx: usize) -> Option<&str> {
        self.content.split('\n').nth(line_idx)
    }

    /// Byte offset in `line` for an LSP (UTF-16) character position
    pub fn byte_offset(line: &str, character: u32) -> usize {
        let mut units = 0u32;
        for (idx, ch) in line.char_indices() {
            if units >= character {
                return idx;
            }
            units += ch.len_utf16() as u32;
        }
        line.len()
    }

    /// LSP range of a byte span within a 0-based line
    pub fn range(line_idx: usize, line: &str, start: usize, end: usize) -> Range {
        Range::new(
            Position::new(line_idx as u32, utf16_len(&line[..start])),
            Position::new(line_idx as u32, utf16_len(&line[..end])),
        )
    }

    /// LSP range covering a whole line
    pub fn line_range(line_idx: usize, line: &str) -> Range {
        Self::range(line_idx, line, 0, line.len())
    }
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}
