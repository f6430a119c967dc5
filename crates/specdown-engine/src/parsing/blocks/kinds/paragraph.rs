/// Paragraph block type.
///
/// Paragraphs have no delimiters - they are the default leaf block
/// when no other block opener matches. Their lines are joined into a
/// single line of text for the downstream inline stage.
pub struct Paragraph;

impl Paragraph {
    /// Appends one line's text, space-joined and trimmed.
    pub fn append(buf: &mut String, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(text);
    }
}
