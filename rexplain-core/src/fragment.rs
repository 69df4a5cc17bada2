//! Explained fragments of a pattern
//!
//! A pattern's explanation is a flat, ordered list of fragments. Nesting is
//! carried only by `depth`: a container (group or lookaround) is followed
//! directly by the fragments of its interior, one level deeper.

use serde::Serialize;

use crate::error::Span;

/// The syntactic construct a fragment describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentKind {
    /// A run of literal characters
    Literal,
    /// A bracket expression `[...]`
    CharacterSet,
    /// A backslash escape such as `\d`
    Escape,
    /// `*`, `+`, `?` or a braced count, optionally lazy
    Quantifier,
    /// The opener of a capturing, named or non-capturing group
    Group,
    /// The opener of a lookahead or lookbehind assertion
    Lookaround,
    /// `^` or `$`
    Anchor,
    /// `|`
    Alternation,
    /// `.`
    AnyCharacter,
    /// One character of a flag string
    Flag,
}

impl FragmentKind {
    /// Whether fragments of this kind open a nested level
    pub fn is_container(self) -> bool {
        matches!(self, FragmentKind::Group | FragmentKind::Lookaround)
    }
}

/// One explained span of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    /// The exact text of the pattern this fragment covers
    pub source_text: String,
    /// Plain-language description of the construct
    pub explanation: String,
    /// Nesting level, 0 at top level
    pub depth: usize,
    /// Where `source_text` sits in the input
    pub span: Span,
    /// What kind of construct this is
    pub kind: FragmentKind,
}

impl Fragment {
    /// Create a fragment covering `span` of `source`
    pub fn new(
        source: &str,
        span: Span,
        kind: FragmentKind,
        explanation: impl Into<String>,
        depth: usize,
    ) -> Self {
        Fragment {
            source_text: span.slice(source).to_string(),
            explanation: explanation.into(),
            depth,
            span,
            kind,
        }
    }
}

/// The full explanation of a pattern and its flags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// The pattern that was explained
    pub pattern: String,
    /// The flag string that was explained
    pub flags: String,
    /// Fragments of the pattern, in source order
    pub fragments: Vec<Fragment>,
    /// One fragment per flag character, all at depth 0
    pub flag_fragments: Vec<Fragment>,
}

impl Explanation {
    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.flag_fragments.is_empty()
    }

    /// The `/pattern/flags` literal form
    pub fn literal(&self) -> String {
        format!("/{}/{}", self.pattern, self.flags)
    }
}
