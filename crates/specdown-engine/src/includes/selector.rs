use std::sync::LazyLock;

use regex::Regex;

use crate::error::IncludeError;

use super::LogicalPath;

static LINE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^L?(\d+)\s*[:,]\s*L?(\d+)$").expect("line range pattern is valid")
});

/// Restricts an inclusion to part of the target file.
#[derive(Debug, Clone)]
pub enum Selector {
    /// 1-indexed, inclusive line bounds.
    Lines { start: usize, end: usize },
    /// Lines strictly between the first `start` match and the next `end` match.
    Markers { start: Regex, end: Regex },
}

impl Selector {
    /// Parses the body of a `[...]` selector.
    ///
    /// Accepts `Lstart:Lend`, `start:end`, `start,end` and `/start/,/end/`.
    pub fn parse(body: &str) -> Result<Self, IncludeError> {
        let body = body.trim();
        if let Some(caps) = LINE_RANGE.captures(body) {
            let bound = |i: usize| {
                caps[i]
                    .parse::<usize>()
                    .map_err(|e| invalid_selector(body, e.to_string()))
            };
            return Ok(Selector::Lines {
                start: bound(1)?,
                end: bound(2)?,
            });
        }

        let markers = body
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .and_then(|rest| rest.split_once("/,/"));
        match markers {
            Some((start, end)) if !start.is_empty() && !end.is_empty() => Ok(Selector::Markers {
                start: compile(body, start)?,
                end: compile(body, end)?,
            }),
            _ => Err(invalid_selector(
                body,
                "expected Lstart:Lend or /start/,/end/".to_string(),
            )),
        }
    }
}

fn compile(body: &str, pattern: &str) -> Result<Regex, IncludeError> {
    Regex::new(pattern).map_err(|e| invalid_selector(body, e.to_string()))
}

fn invalid_selector(body: &str, reason: String) -> IncludeError {
    IncludeError::InvalidSelector {
        selector: body.to_string(),
        reason,
    }
}

/// Applies `selector` to `content` read from `path`.
///
/// Without a selector the content is returned whole. Selected lines are
/// joined with `\n` and carry no trailing newline.
pub fn select(
    path: &LogicalPath,
    content: &str,
    selector: Option<&Selector>,
) -> Result<String, IncludeError> {
    match selector {
        None => Ok(content.to_string()),
        Some(Selector::Lines { start, end }) => select_lines(path, content, *start, *end),
        Some(Selector::Markers { start, end }) => select_markers(path, content, start, end),
    }
}

fn select_lines(
    path: &LogicalPath,
    content: &str,
    start: usize,
    end: usize,
) -> Result<String, IncludeError> {
    let lines: Vec<&str> = content.lines().collect();
    if start == 0 || start > end || end > lines.len() {
        return Err(IncludeError::RangeOutOfBounds {
            path: path.clone(),
            start,
            end,
            lines: lines.len(),
        });
    }
    Ok(lines[start - 1..end].join("\n"))
}

fn select_markers(
    path: &LogicalPath,
    content: &str,
    start: &Regex,
    end: &Regex,
) -> Result<String, IncludeError> {
    let not_found = |pattern: &Regex| IncludeError::MarkerNotFound {
        path: path.clone(),
        pattern: pattern.as_str().to_string(),
    };

    let mut lines = content.lines();
    loop {
        let line = lines.next().ok_or_else(|| not_found(start))?;
        if start.is_match(line) {
            break;
        }
        // An end marker ahead of any start marker means the pair is unusable.
        if end.is_match(line) {
            return Err(not_found(start));
        }
    }

    let mut selected = Vec::new();
    for line in lines {
        if end.is_match(line) {
            return Ok(selected.join("\n"));
        }
        selected.push(line);
    }
    Err(not_found(end))
}
