use crate::parsing::lines::leading_indent;

/// A list item marker found at the start of a line's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker<'a> {
    pub ordered: bool,
    /// Column of the marker itself.
    pub column: usize,
    /// Column where the item's content starts.
    pub content_column: usize,
    /// Item content following the marker and its whitespace.
    pub rest: &'a str,
}

pub struct ListMarkers;

impl ListMarkers {
    pub const BULLETS: [char; 3] = ['-', '*', '+'];
    pub const ORDERED_DELIMITER: char = '.';
    /// Longest accepted ordinal, in digits.
    pub const MAX_DIGITS: usize = 9;

    /// Recognizes a marker at the start of `content`, which begins at
    /// `column`.
    ///
    /// The marker must be followed by whitespace or the end of the line;
    /// `1.5` or `-foo` stay paragraph text.
    pub fn parse(content: &str, column: usize) -> Option<ListMarker<'_>> {
        let first = content.chars().next()?;
        let (ordered, width) = if Self::BULLETS.contains(&first) {
            (false, first.len_utf8())
        } else if first.is_ascii_digit() {
            let digits = content.chars().take_while(char::is_ascii_digit).count();
            if digits > Self::MAX_DIGITS || !content[digits..].starts_with(Self::ORDERED_DELIMITER)
            {
                return None;
            }
            (true, digits + 1)
        } else {
            return None;
        };

        let after = &content[width..];
        if !after.is_empty() && !after.starts_with([' ', '\t']) {
            return None;
        }

        let marker_end = column + width;
        let (rest_column, offset) = leading_indent(after, marker_end);
        let rest = &after[offset..];
        Some(ListMarker {
            ordered,
            column,
            content_column: if rest.is_empty() {
                marker_end + 1
            } else {
                rest_column
            },
            rest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item", 0, false, 2, "item")]
    #[case("* item", 4, false, 6, "item")]
    #[case("+   spaced", 0, false, 4, "spaced")]
    #[case("1. Alpha", 0, true, 3, "Alpha")]
    #[case("10. Ten", 2, true, 6, "Ten")]
    #[case("-\tTab", 0, false, 4, "Tab")]
    #[case("-", 0, false, 2, "")]
    #[case("3.", 0, true, 3, "")]
    fn recognizes_markers(
        #[case] content: &str,
        #[case] column: usize,
        #[case] ordered: bool,
        #[case] content_column: usize,
        #[case] rest: &str,
    ) {
        let marker = ListMarkers::parse(content, column).unwrap();
        assert_eq!(marker.ordered, ordered);
        assert_eq!(marker.column, column);
        assert_eq!(marker.content_column, content_column);
        assert_eq!(marker.rest, rest);
    }

    #[rstest]
    #[case("1.5 million")]
    #[case("-foo")]
    #[case("**bold**")]
    #[case("1) paren")]
    #[case("1234567890. too long")]
    #[case("plain text")]
    #[case("")]
    fn rejects_non_markers(#[case] content: &str) {
        assert_eq!(ListMarkers::parse(content, 0), None);
    }
}
