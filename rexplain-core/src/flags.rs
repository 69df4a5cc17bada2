//! Flag letters and their descriptions

use std::fmt;

use crate::error::Span;
use crate::fragment::{Fragment, FragmentKind};

/// A recognized regex flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `g`
    Global,
    /// `i`
    IgnoreCase,
    /// `m`
    Multiline,
    /// `s`
    DotAll,
    /// `u`
    Unicode,
    /// `y`
    Sticky,
}

impl Flag {
    /// All recognized flags, in canonical order
    pub const ALL: [Flag; 6] = [
        Flag::Global,
        Flag::IgnoreCase,
        Flag::Multiline,
        Flag::DotAll,
        Flag::Unicode,
        Flag::Sticky,
    ];

    /// Look up a flag by its letter
    pub fn from_char(c: char) -> Option<Flag> {
        match c {
            'g' => Some(Flag::Global),
            'i' => Some(Flag::IgnoreCase),
            'm' => Some(Flag::Multiline),
            's' => Some(Flag::DotAll),
            'u' => Some(Flag::Unicode),
            'y' => Some(Flag::Sticky),
            _ => None,
        }
    }

    /// The flag's letter
    pub fn as_char(self) -> char {
        match self {
            Flag::Global => 'g',
            Flag::IgnoreCase => 'i',
            Flag::Multiline => 'm',
            Flag::DotAll => 's',
            Flag::Unicode => 'u',
            Flag::Sticky => 'y',
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Flag::Global => "Global",
            Flag::IgnoreCase => "Case Insensitive",
            Flag::Multiline => "Multiline",
            Flag::DotAll => "Dot All",
            Flag::Unicode => "Unicode",
            Flag::Sticky => "Sticky",
        }
    }

    /// One-sentence effect description
    pub fn description(self) -> &'static str {
        match self {
            Flag::Global => "Find all matches rather than stopping after the first match",
            Flag::IgnoreCase => "Match will be case-insensitive",
            Flag::Multiline => {
                "^ and $ match start/end of line in addition to start/end of string"
            }
            Flag::DotAll => ". matches newline characters as well",
            Flag::Unicode => "Pattern is treated as a sequence of Unicode code points",
            Flag::Sticky => "Matches only from the index indicated by lastIndex property",
        }
    }

    /// `name: description`
    pub fn explanation(self) -> String {
        format!("{}: {}", self.name(), self.description())
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Explain each character of a flag string, in order
///
/// Duplicates are kept and unknown letters are reported rather than dropped.
pub fn explain_flags(flags: &str) -> Vec<Fragment> {
    flags
        .char_indices()
        .map(|(pos, c)| {
            let span = Span::new(pos, pos + c.len_utf8());
            let explanation = match Flag::from_char(c) {
                Some(flag) => flag.explanation(),
                None => format!("Unknown flag: {}", c),
            };
            Fragment::new(flags, span, FragmentKind::Flag, explanation, 0)
        })
        .collect()
}
