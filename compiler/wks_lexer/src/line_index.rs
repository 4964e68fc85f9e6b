//! Byte offset to line/column mapping.

use wks_ir::Span;

/// Start offsets of every line in a source text.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { line_starts }
    }

    /// 1-based line and character column of a byte offset.
    pub fn span_at(&self, source: &str, offset: usize) -> Span {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = source
            .get(start..offset)
            .map_or(offset - start, |prefix| prefix.chars().count());
        Span::new(line as i32 + 1, column as i32 + 1)
    }
}
