//! Regex-to-prose explainer
//!
//! A single left-to-right scan over the pattern with one level of recursion
//! per group or lookaround. Each recognized construct becomes a [`Fragment`];
//! containers emit their opening token and are followed by their interior
//! one level deeper. Closing parens emit nothing.
//!
//! Constructs recognized (in the order they are tried):
//!   group     := '(' ( '?=' | '?!' | '?<=' | '?<!' | '?:' | '?<' name '>' | '?' )? interior ')'
//!   close     := ')'
//!   char_set  := '[' '^'? ( '\' char | char )* ']'
//!   escape    := '\' char
//!   quantifier := ( '*' | '+' | '?' | '{' .* '}' ) '?'?
//!   special   := '^' | '$' | '.' | '|'
//!   literal   := any run of chars other than `\ [ ] ( ) . * + ? { } ^ $ |`
//!
//! The scan is permissive: it assumes the pattern already passed
//! [`crate::validate`], and degrades gracefully on input that did not.

use crate::error::{Result, Span};
use crate::flags::explain_flags;
use crate::fragment::{Explanation, Fragment, FragmentKind};
use crate::quantifier::Quantifier;
use crate::validate::validate;

const CAPTURE_GROUP: &str = "Capture group that remembers the matched substring";
const NON_CAPTURING_GROUP: &str = "Group that doesn't capture for backreference";
const POSITIVE_LOOKAHEAD: &str =
    "Assert that the following matches ahead without consuming characters";
const NEGATIVE_LOOKAHEAD: &str =
    "Assert that the following does NOT match ahead without consuming characters";
const POSITIVE_LOOKBEHIND: &str =
    "Assert that the following matches behind without consuming characters";
const NEGATIVE_LOOKBEHIND: &str =
    "Assert that the following does NOT match behind without consuming characters";
const SPECIAL_GROUP: &str = "Special group with extended pattern";

/// Characters that end a literal run
const METACHARACTERS: &str = "\\[]().*+?{}^$|";

/// Scanner state: the pattern and a byte offset into it
pub struct Explainer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Explainer<'a> {
    /// Create a new explainer for the given pattern
    pub fn new(input: &'a str) -> Self {
        Explainer { input, position: 0 }
    }

    /// Explain the whole pattern
    pub fn explain(mut self) -> Vec<Fragment> {
        let mut fragments = Vec::new();

        // A stray ')' ends the top-level expression early; keep going past it.
        while !self.at_end() {
            fragments.extend(self.parse_expression(0));
        }

        fragments
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.position += c.len_utf8();
        }
    }

    /// Consume `token` if the input continues with it
    fn eat(&mut self, token: &str) -> bool {
        if self.input[self.position..].starts_with(token) {
            self.position += token.len();
            true
        } else {
            false
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.position)
    }

    /// Parse constructs until the closing paren of this level or end of input
    fn parse_expression(&mut self, depth: usize) -> Vec<Fragment> {
        let mut fragments: Vec<Fragment> = Vec::new();

        while let Some(c) = self.current() {
            let start = self.position;
            let fragment = match c {
                '(' => {
                    let opener = self.parse_group_opener(depth);
                    log_debug!("container {:?} at depth {}", opener.source_text, depth);
                    fragments.push(opener);
                    fragments.extend(self.parse_expression(depth + 1));
                    continue;
                }
                ')' => {
                    self.advance();
                    break;
                }
                '[' => self.parse_character_set(depth),
                '\\' => self.parse_escape(depth),
                '*' | '+' | '?' | '{' => {
                    // Names the last fragment emitted at this level, interior ones included
                    let preceding = fragments.last().map(|f| f.span.slice(self.input));
                    self.parse_quantifier(depth, preceding)
                }
                '^' | '$' | '.' | '|' => {
                    self.advance();
                    special_fragment(self.input, c, self.span_from(start), depth)
                }
                ']' | '}' => {
                    self.advance();
                    literal_fragment(self.input, self.span_from(start), depth)
                }
                _ => self.parse_literal_run(depth),
            };
            fragments.push(fragment);
        }

        fragments
    }

    /// Consume `(` and whatever marks the group's variant
    fn parse_group_opener(&mut self, depth: usize) -> Fragment {
        let start = self.position;
        self.advance(); // consume '('

        let (kind, explanation) = if !self.eat("?") {
            (FragmentKind::Group, CAPTURE_GROUP.to_string())
        } else if self.eat("=") {
            (FragmentKind::Lookaround, POSITIVE_LOOKAHEAD.to_string())
        } else if self.eat("!") {
            (FragmentKind::Lookaround, NEGATIVE_LOOKAHEAD.to_string())
        } else if self.eat("<=") {
            (FragmentKind::Lookaround, POSITIVE_LOOKBEHIND.to_string())
        } else if self.eat("<!") {
            (FragmentKind::Lookaround, NEGATIVE_LOOKBEHIND.to_string())
        } else if self.eat(":") {
            (FragmentKind::Group, NON_CAPTURING_GROUP.to_string())
        } else if let Some(name) = self.eat_group_name() {
            (
                FragmentKind::Group,
                format!(
                    "Named capture group \"{}\" that remembers the matched substring",
                    name
                ),
            )
        } else {
            (FragmentKind::Group, SPECIAL_GROUP.to_string())
        };

        Fragment::new(self.input, self.span_from(start), kind, explanation, depth)
    }

    /// Consume `<name>` after `(?`
    fn eat_group_name(&mut self) -> Option<&'a str> {
        let input = self.input;
        let inner = input[self.position..].strip_prefix('<')?;
        let end = inner.find('>')?;
        let name = &inner[..end];

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
        if !valid {
            return None;
        }

        self.position += end + 2;
        Some(name)
    }

    /// Consume a bracket expression up to its closing `]`
    fn parse_character_set(&mut self, depth: usize) -> Fragment {
        let start = self.position;
        self.advance(); // consume '['
        let negated = self.eat("^");

        let contents_start = self.position;
        let mut contents_end = self.input.len();
        while let Some(c) = self.current() {
            match c {
                ']' => {
                    contents_end = self.position;
                    self.advance();
                    break;
                }
                '\\' => {
                    // The escaped character never terminates the set
                    self.advance();
                    self.advance();
                }
                _ => self.advance(),
            }
        }

        let contents = &self.input[contents_start..contents_end];
        let explanation = if negated {
            format!("Match any character that is not in the set: {}", contents)
        } else {
            format!("Match any character in the set: {}", contents)
        };

        Fragment::new(
            self.input,
            self.span_from(start),
            FragmentKind::CharacterSet,
            explanation,
            depth,
        )
    }

    fn parse_escape(&mut self, depth: usize) -> Fragment {
        let start = self.position;
        self.advance(); // consume '\'

        let explanation = match self.current() {
            Some(c) => {
                self.advance();
                describe_escape(c)
            }
            None => "Match the character \"\\\" literally".to_string(),
        };

        Fragment::new(
            self.input,
            self.span_from(start),
            FragmentKind::Escape,
            explanation,
            depth,
        )
    }

    /// Consume a quantifier token and its optional lazy marker
    fn parse_quantifier(&mut self, depth: usize, preceding: Option<&str>) -> Fragment {
        let start = self.position;
        let opener = self.current();
        self.advance();

        if opener == Some('{') {
            while let Some(c) = self.current() {
                self.advance();
                if c == '}' {
                    break;
                }
            }
        }

        let token = &self.input[start..self.position];
        let lazy = self.eat("?");

        let item = match preceding {
            Some(text) => format!("the preceding item ({})", text),
            None => "the preceding character".to_string(),
        };
        let explanation = match Quantifier::parse(token) {
            Some(quantifier) => quantifier.describe(&item, lazy),
            None => format!("Match using quantifier {}", self.span_from(start).slice(self.input)),
        };

        Fragment::new(
            self.input,
            self.span_from(start),
            FragmentKind::Quantifier,
            explanation,
            depth,
        )
    }

    /// Consume a maximal run of non-metacharacters
    fn parse_literal_run(&mut self, depth: usize) -> Fragment {
        let start = self.position;
        while let Some(c) = self.current() {
            if METACHARACTERS.contains(c) {
                break;
            }
            self.advance();
        }
        literal_fragment(self.input, self.span_from(start), depth)
    }
}

fn literal_fragment(input: &str, span: Span, depth: usize) -> Fragment {
    let explanation = format!("Match the characters \"{}\" literally", span.slice(input));
    Fragment::new(input, span, FragmentKind::Literal, explanation, depth)
}

fn describe_escape(c: char) -> String {
    let fixed = match c {
        'd' => "Match any digit (0-9)",
        'D' => "Match any non-digit character",
        'w' => "Match any word character (a-z, A-Z, 0-9, _)",
        'W' => "Match any non-word character",
        's' => "Match any whitespace character (space, tab, newline)",
        'S' => "Match any non-whitespace character",
        'b' => "Match a word boundary position",
        'B' => "Match a non-word boundary position",
        'n' => "Match a newline character",
        't' => "Match a tab character",
        'r' => "Match a carriage return character",
        _ => return format!("Match the character \"{}\" literally", c),
    };
    fixed.to_string()
}

fn special_fragment(input: &str, c: char, span: Span, depth: usize) -> Fragment {
    let (kind, explanation) = match c {
        '^' => (FragmentKind::Anchor, "Match the start of the line"),
        '$' => (FragmentKind::Anchor, "Match the end of the line"),
        '.' => (
            FragmentKind::AnyCharacter,
            "Match any single character except newline",
        ),
        _ => (
            FragmentKind::Alternation,
            "Match either the expression before or after the |",
        ),
    };
    Fragment::new(input, span, kind, explanation, depth)
}

/// Explain a pattern without validating it first
pub fn explain_pattern(pattern: &str) -> Vec<Fragment> {
    Explainer::new(pattern).explain()
}

/// Validate a pattern and explain it together with its flags
///
/// An empty pattern has nothing to explain and is not validated.
///
/// # Example
/// ```
/// use rexplain_core::explain;
///
/// let explanation = explain("abc", "").unwrap();
/// assert_eq!(explanation.fragments[0].explanation, "Match the characters \"abc\" literally");
/// ```
pub fn explain(pattern: &str, flags: &str) -> Result<Explanation> {
    if pattern.is_empty() {
        return Ok(Explanation::default());
    }

    validate(pattern, flags)?;

    Ok(Explanation {
        pattern: pattern.to_string(),
        flags: flags.to_string(),
        fragments: explain_pattern(pattern),
        flag_fragments: explain_flags(flags),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.source_text.as_str()).collect()
    }

    #[test]
    fn test_literal_run() {
        let fragments = explain_pattern("abc");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].source_text, "abc");
        assert_eq!(
            fragments[0].explanation,
            "Match the characters \"abc\" literally"
        );
        assert_eq!(fragments[0].depth, 0);
    }

    #[test]
    fn test_single_character_literal_not_special_cased() {
        let fragments = explain_pattern("a");
        assert_eq!(fragments[0].explanation, "Match the characters \"a\" literally");
    }

    #[test]
    fn test_empty_pattern() {
        assert!(explain_pattern("").is_empty());
    }

    #[test]
    fn test_character_set() {
        let fragments = explain_pattern("[a-z]");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].kind, FragmentKind::CharacterSet);
        assert_eq!(
            fragments[0].explanation,
            "Match any character in the set: a-z"
        );
    }

    #[test]
    fn test_negated_character_set() {
        let fragments = explain_pattern("[^0-9]");
        assert_eq!(fragments[0].source_text, "[^0-9]");
        assert_eq!(
            fragments[0].explanation,
            "Match any character that is not in the set: 0-9"
        );
    }

    #[test]
    fn test_character_set_escaped_bracket() {
        let fragments = explain_pattern(r"[\]a]b");
        assert_eq!(texts(&fragments), vec![r"[\]a]", "b"]);
        assert!(fragments[0].explanation.ends_with(r"\]a"));
    }

    #[test]
    fn test_character_set_metacharacters_inside() {
        let fragments = explain_pattern("[(.*)]");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].source_text, "[(.*)]");
    }

    #[test]
    fn test_unterminated_character_set_runs_to_end() {
        let fragments = explain_pattern("[abc");
        assert_eq!(texts(&fragments), vec!["[abc"]);
        assert_eq!(
            fragments[0].explanation,
            "Match any character in the set: abc"
        );
    }

    #[test]
    fn test_shorthand_escapes() {
        let fragments = explain_pattern(r"\d\w\s");
        assert_eq!(texts(&fragments), vec![r"\d", r"\w", r"\s"]);
        assert_eq!(fragments[0].explanation, "Match any digit (0-9)");
        assert_eq!(
            fragments[1].explanation,
            "Match any word character (a-z, A-Z, 0-9, _)"
        );
        assert_eq!(
            fragments[2].explanation,
            "Match any whitespace character (space, tab, newline)"
        );
    }

    #[test]
    fn test_every_escape_sentence() {
        let expected = [
            (r"\d", "Match any digit (0-9)"),
            (r"\D", "Match any non-digit character"),
            (r"\w", "Match any word character (a-z, A-Z, 0-9, _)"),
            (r"\W", "Match any non-word character"),
            (r"\s", "Match any whitespace character (space, tab, newline)"),
            (r"\S", "Match any non-whitespace character"),
            (r"\b", "Match a word boundary position"),
            (r"\B", "Match a non-word boundary position"),
            (r"\n", "Match a newline character"),
            (r"\t", "Match a tab character"),
            (r"\r", "Match a carriage return character"),
            (r"\/", "Match the character \"/\" literally"),
        ];
        for (pattern, sentence) in expected {
            let fragments = explain_pattern(pattern);
            assert_eq!(texts(&fragments), vec![pattern]);
            assert_eq!(fragments[0].explanation, sentence, "escape {}", pattern);
            assert_eq!(fragments[0].kind, FragmentKind::Escape);
        }
    }

    #[test]
    fn test_escaped_metacharacter_is_literal() {
        let fragments = explain_pattern(r"a\.b");
        assert_eq!(texts(&fragments), vec!["a", r"\.", "b"]);
        assert_eq!(fragments[1].explanation, "Match the character \".\" literally");
    }

    #[test]
    fn test_trailing_backslash() {
        let fragments = explain_pattern("a\\");
        assert_eq!(texts(&fragments), vec!["a", "\\"]);
        assert_eq!(fragments[1].kind, FragmentKind::Escape);
    }

    #[test]
    fn test_quantifier_references_preceding_item() {
        let fragments = explain_pattern("a+");
        assert_eq!(fragments.len(), 2);
        assert_eq!(
            fragments[1].explanation,
            "Match the preceding item (a) one or more times (greedy, matching as many as possible)"
        );
    }

    #[test]
    fn test_lazy_quantifier() {
        let fragments = explain_pattern("a*?");
        assert_eq!(fragments[1].source_text, "*?");
        assert!(fragments[1].explanation.contains("zero or more times"));
        assert!(fragments[1].explanation.ends_with("(lazy, matching as few as possible)"));
    }

    #[test]
    fn test_optional_is_greedy() {
        let fragments = explain_pattern("a?");
        assert_eq!(
            fragments[1].explanation,
            "Match the preceding item (a) zero or one time (greedy, matching as many as possible)"
        );
    }

    #[test]
    fn test_optional_lazy() {
        let fragments = explain_pattern("a??");
        assert_eq!(fragments[1].source_text, "??");
        assert!(fragments[1].explanation.contains("zero or one time (lazy"));
    }

    #[test]
    fn test_brace_quantifiers() {
        let fragments = explain_pattern(r"\d{3}x{2,}y{1,4}?");
        assert_eq!(
            texts(&fragments),
            vec![r"\d", "{3}", "x", "{2,}", "y", "{1,4}?"]
        );
        assert_eq!(
            fragments[1].explanation,
            "Match the preceding item (\\d) exactly 3 times"
        );
        assert_eq!(
            fragments[3].explanation,
            "Match the preceding item (x) at least 2 times (greedy, matching as many as possible)"
        );
        assert_eq!(
            fragments[5].explanation,
            "Match the preceding item (y) between 1 and 4 times (lazy, matching as few as possible)"
        );
    }

    #[test]
    fn test_quantifier_without_preceding_item() {
        let fragments = explain_pattern("*");
        assert_eq!(
            fragments[0].explanation,
            "Match the preceding character zero or more times (greedy, matching as many as possible)"
        );
    }

    #[test]
    fn test_malformed_brace_quantifier() {
        let fragments = explain_pattern("a{x}");
        assert_eq!(fragments[1].source_text, "{x}");
        assert_eq!(fragments[1].explanation, "Match using quantifier {x}");
    }

    #[test]
    fn test_unterminated_brace_runs_to_end() {
        let fragments = explain_pattern("a{2");
        assert_eq!(texts(&fragments), vec!["a", "{2"]);
    }

    #[test]
    fn test_quantifier_after_group_references_last_fragment() {
        let fragments = explain_pattern("(ab)+");
        let quantifier = fragments.last().unwrap();
        assert_eq!(quantifier.depth, 0);
        assert_eq!(
            quantifier.explanation,
            "Match the preceding item (ab) one or more times (greedy, matching as many as possible)"
        );

        let fragments = explain_pattern("(x|yz)*");
        assert!(fragments.last().unwrap().explanation.starts_with("Match the preceding item (yz) zero"));
    }

    #[test]
    fn test_quantifier_after_empty_group_references_opener() {
        let fragments = explain_pattern("(?:)?");
        assert_eq!(texts(&fragments), vec!["(?:", "?"]);
        assert!(fragments[1].explanation.starts_with("Match the preceding item ((?:) zero or one"));
    }

    #[test]
    fn test_capture_group() {
        let fragments = explain_pattern("(abc)");
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].source_text, "(");
        assert_eq!(fragments[0].depth, 0);
        assert_eq!(
            fragments[0].explanation,
            "Capture group that remembers the matched substring"
        );
        assert_eq!(fragments[1].source_text, "abc");
        assert_eq!(fragments[1].depth, 1);
    }

    #[test]
    fn test_non_capturing_group() {
        let fragments = explain_pattern("(?:abc)");
        assert_eq!(fragments[0].source_text, "(?:");
        assert_eq!(
            fragments[0].explanation,
            "Group that doesn't capture for backreference"
        );
    }

    #[test]
    fn test_lookarounds() {
        let cases = [
            ("(?=a)", "(?=", POSITIVE_LOOKAHEAD),
            ("(?!a)", "(?!", NEGATIVE_LOOKAHEAD),
            ("(?<=a)", "(?<=", POSITIVE_LOOKBEHIND),
            ("(?<!a)", "(?<!", NEGATIVE_LOOKBEHIND),
        ];
        for (pattern, opener, explanation) in cases {
            let fragments = explain_pattern(pattern);
            assert_eq!(fragments[0].source_text, opener, "pattern {}", pattern);
            assert_eq!(fragments[0].explanation, explanation);
            assert_eq!(fragments[0].kind, FragmentKind::Lookaround);
            assert_eq!(fragments[1].depth, 1);
        }
    }

    #[test]
    fn test_lookahead_after_literal() {
        let fragments = explain_pattern("a(?=b)");
        assert_eq!(texts(&fragments), vec!["a", "(?=", "b"]);
        assert_eq!(fragments[2].depth, 1);
    }

    #[test]
    fn test_named_group() {
        let fragments = explain_pattern("(?<year>\\d{4})");
        assert_eq!(fragments[0].source_text, "(?<year>");
        assert_eq!(
            fragments[0].explanation,
            "Named capture group \"year\" that remembers the matched substring"
        );
        assert_eq!(texts(&fragments[1..]), vec![r"\d", "{4}"]);
    }

    #[test]
    fn test_special_group_fallback() {
        let fragments = explain_pattern("(?ab)");
        assert_eq!(fragments[0].source_text, "(?");
        assert_eq!(fragments[0].explanation, SPECIAL_GROUP);
        assert_eq!(fragments[1].source_text, "ab");
    }

    #[test]
    fn test_nested_depths() {
        let fragments = explain_pattern("a(b(?:c)d)e");
        let shape: Vec<(&str, usize)> = fragments
            .iter()
            .map(|f| (f.source_text.as_str(), f.depth))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("a", 0),
                ("(", 0),
                ("b", 1),
                ("(?:", 1),
                ("c", 2),
                ("d", 1),
                ("e", 0),
            ]
        );
    }

    #[test]
    fn test_unclosed_group_truncates_silently() {
        let fragments = explain_pattern("(ab");
        assert_eq!(texts(&fragments), vec!["(", "ab"]);
    }

    #[test]
    fn test_stray_close_paren_at_top_level() {
        let fragments = explain_pattern("a)b");
        assert_eq!(texts(&fragments), vec!["a", "b"]);
        assert!(fragments.iter().all(|f| f.depth == 0));
    }

    #[test]
    fn test_stray_brackets_are_literals() {
        let fragments = explain_pattern("a]b}c");
        assert_eq!(texts(&fragments), vec!["a", "]", "b", "}", "c"]);
        assert_eq!(fragments[1].explanation, "Match the characters \"]\" literally");
        assert!(fragments.iter().all(|f| f.kind == FragmentKind::Literal));
    }

    #[test]
    fn test_anchors_dot_and_alternation() {
        let fragments = explain_pattern("^a.b|c$");
        assert_eq!(texts(&fragments), vec!["^", "a", ".", "b", "|", "c", "$"]);
        assert_eq!(fragments[0].explanation, "Match the start of the line");
        assert_eq!(
            fragments[2].explanation,
            "Match any single character except newline"
        );
        assert_eq!(
            fragments[4].explanation,
            "Match either the expression before or after the |"
        );
        assert_eq!(fragments[6].explanation, "Match the end of the line");
    }

    #[test]
    fn test_unicode_literal() {
        let fragments = explain_pattern("héllo+");
        assert_eq!(texts(&fragments), vec!["héllo", "+"]);
        assert_eq!(fragments[0].span, Span::new(0, 6));
    }

    #[test]
    fn test_spans_cover_source() {
        let pattern = r"^(\w+)@[a-z]+\.com$";
        for fragment in explain_pattern(pattern) {
            assert_eq!(fragment.span.slice(pattern), fragment.source_text);
        }
    }

    #[test]
    fn test_explain_validates() {
        let err = explain("abc[", "").unwrap_err();
        assert!(err.to_string().starts_with("Invalid regular expression"));
    }

    #[test]
    fn test_explain_with_flags() {
        let explanation = explain("abc", "gi").unwrap();
        assert_eq!(explanation.fragments.len(), 1);
        assert_eq!(explanation.flag_fragments.len(), 2);
        assert_eq!(explanation.literal(), "/abc/gi");
    }

    #[test]
    fn test_explain_empty_pattern() {
        let explanation = explain("", "gi").unwrap();
        assert!(explanation.is_empty());
    }
}
