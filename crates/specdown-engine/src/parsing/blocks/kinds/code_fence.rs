/// An opening fence: a run of backticks and an optional info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig<'a> {
    /// Number of backticks in the run.
    pub ticks: usize,
    /// Info string after the run, trimmed.
    pub info: &'a str,
}

impl FenceSig<'_> {
    /// The language hint: the first word of the info string.
    pub fn language(&self) -> Option<String> {
        self.info.split_whitespace().next().map(str::to_string)
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const TICK: char = '`';
    pub const MIN_TICKS: usize = 3;

    /// Recognizes an opening fence in `content` (a line with its
    /// indentation already removed).
    pub fn sig(content: &str) -> Option<FenceSig<'_>> {
        let ticks = Self::run_length(content);
        if ticks < Self::MIN_TICKS {
            return None;
        }
        let info = content[ticks..].trim();
        // A backtick in the info string means this is inline code, not a fence.
        if info.contains(Self::TICK) {
            return None;
        }
        Some(FenceSig { ticks, info })
    }

    /// Whether `content` closes a fence opened with `ticks` backticks.
    pub fn closes(ticks: usize, content: &str) -> bool {
        let content = content.trim();
        let run = Self::run_length(content);
        run >= ticks && run == content.len()
    }

    fn run_length(content: &str) -> usize {
        content.chars().take_while(|&c| c == Self::TICK).count()
    }
}
