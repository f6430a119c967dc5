//! TOML title blocks.
//!
//! A document may open with a run of `%`-prefixed lines. With the title-block
//! extension enabled, those lines are removed from the body and decoded as
//! TOML:
//!
//! ```text
//! % title = "Using specdown"
//! % date = 2014-12-10T00:00:00Z
//! %
//! % [[author]]
//! % fullname = "A. Writer"
//! ```

use serde::{Deserialize, Serialize};

const PREFIX: char = '%';

/// Document metadata decoded from a title block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct TitleBlock {
    pub title: String,
    pub abbrev: String,
    pub docname: String,
    pub ipr: String,
    pub category: String,
    pub obsoletes: Vec<String>,
    pub updates: Vec<String>,
    /// Processing instructions.
    pub pi: Pi,
    pub submissiontype: String,
    pub date: Option<toml::value::Datetime>,
    pub area: String,
    pub workgroup: String,
    pub keyword: Vec<String>,
    pub author: Vec<Author>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct Author {
    pub initials: String,
    pub surname: String,
    pub fullname: String,
    pub organization: String,
    pub role: String,
    pub ascii: String,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct Address {
    pub phone: String,
    pub email: String,
    pub uri: String,
    pub postal: Postal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct Postal {
    pub street: String,
    pub city: String,
    pub code: String,
    pub country: String,
    pub postalline: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct Pi {
    pub toc: String,
    pub symrefs: String,
    pub sortrefs: String,
    pub tocdepth: String,
    pub compact: String,
    pub subcompact: String,
}

/// Splits a leading title block off `text`.
///
/// Returns the block's TOML source with the `%` prefixes removed, and the
/// rest of the text. `None` when `text` does not start with `%`.
pub fn split(text: &str) -> (Option<String>, &str) {
    let mut source = String::new();
    let mut end = 0;
    for line in text.split_inclusive('\n') {
        let Some(body) = line.strip_prefix(PREFIX) else {
            break;
        };
        source.push_str(body);
        end += line.len();
    }

    if end == 0 {
        (None, text)
    } else {
        (Some(source), &text[end..])
    }
}

/// Decodes title-block TOML. A malformed block is logged and yields the
/// default, so a bad title block never stops a document from rendering.
pub fn parse(source: &str) -> TitleBlock {
    match toml::from_str(source) {
        Ok(block) => block,
        Err(err) => {
            log::warn!("error in TOML title block: {err}");
            TitleBlock::default()
        }
    }
}

/// [`split`] followed by [`parse`].
pub fn extract(text: &str) -> (Option<TitleBlock>, &str) {
    let (source, rest) = split(text);
    (source.as_deref().map(parse), rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
% title = \"Using specdown\"
% abbrev = \"specdown\"
% date = 2014-12-10T00:00:00Z
% keyword = [\"markdown\", \"include\"]
%
% [pi]
% toc = \"yes\"
%
% [[author]]
% initials = \"A.\"
% surname = \"Writer\"
% fullname = \"Ann Writer\"
% [author.address]
% email = \"ann@example.org\"
% [author.address.postal]
% city = \"Leeds\"
% postalline = [\"1 Long Road\", \"Leeds\"]

# Body
";

    #[test]
    fn split_removes_leading_percent_lines() {
        let (source, rest) = split("% title = \"x\"\n%\nbody\n% not title\n");
        assert_eq!(source.as_deref(), Some(" title = \"x\"\n\n"));
        assert_eq!(rest, "body\n% not title\n");
    }

    #[test]
    fn split_without_a_block() {
        let (source, rest) = split("body\n% later\n");
        assert_eq!(source, None);
        assert_eq!(rest, "body\n% later\n");
    }

    #[test]
    fn decodes_nested_tables() {
        let (block, rest) = extract(DOC);
        let block = block.unwrap();

        assert_eq!(rest, "\n# Body\n");
        assert_eq!(block.title, "Using specdown");
        assert_eq!(block.abbrev, "specdown");
        assert_eq!(block.keyword, vec!["markdown", "include"]);
        assert_eq!(block.pi.toc, "yes");
        assert_eq!(
            block.date.map(|d| d.to_string()).as_deref(),
            Some("2014-12-10T00:00:00Z")
        );

        assert_eq!(block.author.len(), 1);
        let author = &block.author[0];
        assert_eq!(author.fullname, "Ann Writer");
        assert_eq!(author.address.email, "ann@example.org");
        assert_eq!(author.address.postal.city, "Leeds");
        assert_eq!(author.address.postal.postalline, vec!["1 Long Road", "Leeds"]);
    }

    #[test]
    fn malformed_block_yields_default() {
        let (block, rest) = extract("% title = \n% = broken\ntext\n");
        assert_eq!(block, Some(TitleBlock::default()));
        assert_eq!(rest, "text\n");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(parse("title = \"t\"\nflavour = \"mild\"\n").title, "t");
    }
}
