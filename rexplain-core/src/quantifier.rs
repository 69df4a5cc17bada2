//! Repetition operators
//!
//! Shared by the explainer, which reads quantifier tokens out of a pattern,
//! and the block formatter, which writes them.

use std::fmt;

const GREEDY: &str = " (greedy, matching as many as possible)";
const LAZY: &str = " (lazy, matching as few as possible)";

/// A quantifier, without its lazy marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Zero or more (*)
    ZeroOrMore,
    /// One or more (+)
    OneOrMore,
    /// Zero or one (?)
    ZeroOrOne,
    /// Exactly n times ({n})
    Exactly(u32),
    /// At least n times ({n,})
    AtLeast(u32),
    /// Between n and m times ({n,m})
    Between(u32, u32),
}

impl Quantifier {
    /// Parse a quantifier token such as `*` or `{2,5}`
    ///
    /// The token must not include a trailing lazy `?`.
    pub fn parse(token: &str) -> Option<Quantifier> {
        match token {
            "*" => return Some(Quantifier::ZeroOrMore),
            "+" => return Some(Quantifier::OneOrMore),
            "?" => return Some(Quantifier::ZeroOrOne),
            _ => {}
        }

        let inner = token.strip_prefix('{')?.strip_suffix('}')?;
        match inner.split_once(',') {
            None => parse_count(inner).map(Quantifier::Exactly),
            Some((min, "")) => parse_count(min).map(Quantifier::AtLeast),
            Some((min, max)) => Some(Quantifier::Between(parse_count(min)?, parse_count(max)?)),
        }
    }

    /// Convert quantifier to regex string
    pub fn to_regex_string(&self) -> String {
        match self {
            Quantifier::ZeroOrMore => "*".to_string(),
            Quantifier::OneOrMore => "+".to_string(),
            Quantifier::ZeroOrOne => "?".to_string(),
            Quantifier::Exactly(n) => format!("{{{}}}", n),
            Quantifier::AtLeast(n) => format!("{{{},}}", n),
            Quantifier::Between(n, m) => format!("{{{},{}}}", n, m),
        }
    }

    /// Describe applying this quantifier to `item`
    ///
    /// An exact count cannot vary its length, so it never mentions greediness.
    pub fn describe(&self, item: &str, lazy: bool) -> String {
        let mode = if lazy { LAZY } else { GREEDY };
        match self {
            Quantifier::ZeroOrMore => format!("Match {} zero or more times{}", item, mode),
            Quantifier::OneOrMore => format!("Match {} one or more times{}", item, mode),
            Quantifier::ZeroOrOne => format!("Match {} zero or one time{}", item, mode),
            Quantifier::Exactly(n) => format!("Match {} exactly {} times", item, n),
            Quantifier::AtLeast(n) => format!("Match {} at least {} times{}", item, n, mode),
            Quantifier::Between(n, m) => {
                format!("Match {} between {} and {} times{}", item, n, m, mode)
            }
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_regex_string())
    }
}

fn parse_count(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
