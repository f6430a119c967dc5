/// Indentation-based code block.
///
/// Opens on a line indented [`IndentedCode::UNIT`] columns past its
/// container's content column, when no paragraph is open.
pub struct IndentedCode;

impl IndentedCode {
    pub const UNIT: usize = 4;

    /// Column at which code starts inside a container whose content starts
    /// at `content_column`.
    pub fn column(content_column: usize) -> usize {
        content_column + Self::UNIT
    }
}
