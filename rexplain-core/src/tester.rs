//! Running a pattern against sample text
//!
//! Matching is delegated entirely to the ECMAScript engine; this module only
//! applies the `g` and `y` flag semantics and reports spans. The explainer
//! never depends on it.

use serde::Serialize;

use crate::error::Result;
use crate::flags::Flag;
use crate::validate::compile;

/// One match of a pattern in the sample text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    /// Start byte offset of the match
    pub start: usize,
    /// End byte offset of the match (exclusive)
    pub end: usize,
    /// The matched text
    pub text: String,
    /// Capture groups 1..n, `None` where a group did not participate
    pub groups: Vec<Option<String>>,
}

impl MatchSpan {
    fn from_match(m: &regress::Match, text: &str) -> Self {
        let range = m.range();
        MatchSpan {
            start: range.start,
            end: range.end,
            text: text[range].to_string(),
            groups: m
                .captures
                .iter()
                .map(|group| group.clone().map(|r| text[r].to_string()))
                .collect(),
        }
    }

    /// Whether the match consumed no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Find matches of `pattern` in `text`
///
/// With `g` every non-overlapping match is returned, otherwise only the
/// first. With `y` matching is anchored: the first match must start at 0 and
/// each following match where the previous one ended.
pub fn find_matches(pattern: &str, flags: &str, text: &str) -> Result<Vec<MatchSpan>> {
    let regex = compile(pattern, flags)?;
    let global = flags.contains(Flag::Global.as_char());
    let sticky = flags.contains(Flag::Sticky.as_char());

    let mut matches = Vec::new();
    let mut expected_start = 0;
    for m in regex.find_iter(text) {
        let span = MatchSpan::from_match(&m, text);
        if sticky && span.start != expected_start {
            break;
        }
        expected_start = span.end;
        matches.push(span);
        if !global {
            break;
        }
    }

    Ok(matches)
}
