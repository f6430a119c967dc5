use std::borrow::Cow;

/// Tab stops used when measuring indentation.
pub const TAB_STOP: usize = 4;

/// A single line of the expanded text, without its line terminator.
#[derive(Debug, Clone, Copy)]
pub struct LineRef<'a> {
    /// 1-based line number in the expanded text.
    pub number: usize,
    pub text: &'a str,
}

/// Returns an iterator over the lines of `text`.
pub fn lines_with_numbers(text: &str) -> impl Iterator<Item = LineRef<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, text)| LineRef { number: i + 1, text })
}

/// Measures the leading whitespace of `s`, which starts at `start_column`.
///
/// Returns the column of the first non-whitespace character and its byte
/// offset in `s`.
pub fn leading_indent(s: &str, start_column: usize) -> (usize, usize) {
    let mut column = start_column;
    for (i, ch) in s.char_indices() {
        match ch {
            ' ' => column += 1,
            '\t' => column = next_tab_stop(column),
            _ => return (column, i),
        }
    }
    (column, s.len())
}

/// Removes up to `columns` columns of leading whitespace from a line that
/// starts at column 0. A tab straddling the cut is replaced by the spaces it
/// still covers.
pub fn strip_columns(s: &str, columns: usize) -> Cow<'_, str> {
    let mut column = 0;
    for (i, ch) in s.char_indices() {
        if column >= columns {
            return Cow::Borrowed(&s[i..]);
        }
        match ch {
            ' ' => column += 1,
            '\t' => {
                let next = next_tab_stop(column);
                if next > columns {
                    let mut out = " ".repeat(next - columns);
                    out.push_str(&s[i + 1..]);
                    return Cow::Owned(out);
                }
                column = next;
            }
            _ => return Cow::Borrowed(&s[i..]),
        }
    }
    Cow::Borrowed("")
}

fn next_tab_stop(column: usize) -> usize {
    column + TAB_STOP - column % TAB_STOP
}
