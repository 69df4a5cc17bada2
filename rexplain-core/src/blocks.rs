//! Building blocks for assembling a pattern
//!
//! A block tree is serialized into regex source by [`format_blocks`]. Every
//! tree renders to some pattern: empty containers fall back to placeholders
//! instead of failing.
//!
//! Block documents use the same JSON shape as the web builder. Each node has
//! a `type` tag, optional `params` and optional ordered `children`:
//!
//! ```json
//! [
//!   { "type": "startOfLine" },
//!   { "type": "oneOrMore", "children": [{ "type": "digit" }] },
//!   { "type": "literal", "params": { "value": ".com" } }
//! ]
//! ```
//!
//! `kind` and `parameters` are accepted as aliases for `type` and `params`.
//! Other builder metadata (`id`, `label`, ...) is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ExplainError, Result};
use crate::quantifier::Quantifier;

/// Characters escaped in literal text
const LITERAL_SPECIALS: &str = ".*+?^${}()|[]\\";
/// Characters escaped inside a character-set string
const CLASS_SPECIALS: &str = "-]\\[";

const DEFAULT_CHARACTERS: &str = "a-z";
const ALTERNATION_PLACEHOLDER: &str = "a|b";
const LOOKAROUND_PLACEHOLDER: &str = "pattern";

/// One construct in a block tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BlockNode", into = "BlockNode")]
pub enum Block {
    /// Exact text, escaped
    Literal { value: String },
    /// Any character except newline (`.`)
    AnyChar,
    /// A digit (`\d`)
    Digit,
    /// A non-digit (`\D`)
    NonDigit,
    /// A word character (`\w`)
    Word,
    /// A non-word character (`\W`)
    NonWord,
    /// A whitespace character (`\s`)
    Whitespace,
    /// A non-whitespace character (`\S`)
    NonWhitespace,
    /// Start of line anchor (`^`)
    StartOfLine,
    /// End of line anchor (`$`)
    EndOfLine,
    /// Word boundary assertion (`\b`)
    WordBoundary,
    /// Non-word-boundary assertion (`\B`)
    NonWordBoundary,
    /// Child repeated zero or more times
    ZeroOrMore { child: Option<Box<Block>> },
    /// Child repeated one or more times
    OneOrMore { child: Option<Box<Block>> },
    /// Optional child
    ZeroOrOne { child: Option<Box<Block>> },
    /// Child repeated exactly `count` times
    Exactly {
        count: u32,
        child: Option<Box<Block>>,
    },
    /// Child repeated at least `min` times
    AtLeast { min: u32, child: Option<Box<Block>> },
    /// Child repeated between `min` and `max` times
    Between {
        min: u32,
        max: u32,
        child: Option<Box<Block>>,
    },
    /// Capturing group around the concatenated children
    Group { children: Vec<Block> },
    /// Children joined by `|`
    Or { children: Vec<Block> },
    /// One character from the set, escaped
    CharacterClass { characters: String },
    /// One character not in the set, escaped
    NegatedCharacterClass { characters: String },
    /// Positive lookahead around the concatenated children
    Lookahead { children: Vec<Block> },
    /// Negative lookahead around the concatenated children
    NegativeLookahead { children: Vec<Block> },
    /// Positive lookbehind around the concatenated children
    Lookbehind { children: Vec<Block> },
    /// Negative lookbehind around the concatenated children
    NegativeLookbehind { children: Vec<Block> },
}

/// A block as it appears in a document
///
/// This is the open wire shape; [`Block`] is converted to and from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(default, alias = "parameters", skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockNode>,
}

impl BlockNode {
    fn text(&self, key: &str, default: &str) -> String {
        self.params
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// A count parameter, given as a number or a numeric string
    fn count(&self, key: &str, default: u32) -> u32 {
        let parsed = self.params.get(key).and_then(|value| match value {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });
        parsed.unwrap_or(default)
    }
}

impl TryFrom<BlockNode> for Block {
    type Error = ExplainError;

    fn try_from(node: BlockNode) -> Result<Self> {
        let kind = node.kind.clone();
        let count = node.count("count", default_bound());
        let min = node.count("min", default_bound());
        let max = node.count("max", default_max());
        let value = node.text("value", "");
        let characters = node.text("characters", DEFAULT_CHARACTERS);
        let children = node
            .children
            .into_iter()
            .map(Block::try_from)
            .collect::<Result<Vec<_>>>()?;

        let block = match kind.as_str() {
            "literal" => Block::Literal { value },
            "anyChar" => Block::AnyChar,
            "digit" => Block::Digit,
            "nonDigit" => Block::NonDigit,
            "word" => Block::Word,
            "nonWord" => Block::NonWord,
            "whitespace" => Block::Whitespace,
            "nonWhitespace" => Block::NonWhitespace,
            "startOfLine" => Block::StartOfLine,
            "endOfLine" => Block::EndOfLine,
            "wordBoundary" => Block::WordBoundary,
            "nonWordBoundary" => Block::NonWordBoundary,
            "zeroOrMore" => Block::ZeroOrMore {
                child: single_child(&kind, children)?,
            },
            "oneOrMore" => Block::OneOrMore {
                child: single_child(&kind, children)?,
            },
            "zeroOrOne" => Block::ZeroOrOne {
                child: single_child(&kind, children)?,
            },
            "exactly" => Block::Exactly {
                count,
                child: single_child(&kind, children)?,
            },
            "atLeast" => Block::AtLeast {
                min,
                child: single_child(&kind, children)?,
            },
            "between" => Block::Between {
                min,
                max,
                child: single_child(&kind, children)?,
            },
            "group" => Block::Group { children },
            "or" => Block::Or { children },
            "characterClass" => Block::CharacterClass { characters },
            "negatedCharacterClass" => Block::NegatedCharacterClass { characters },
            "lookahead" => Block::Lookahead { children },
            "negativeLookahead" => Block::NegativeLookahead { children },
            "lookbehind" => Block::Lookbehind { children },
            "negativeLookbehind" => Block::NegativeLookbehind { children },
            other => {
                return Err(ExplainError::InvalidBlocks(format!(
                    "unknown block type \"{}\"",
                    other
                )));
            }
        };

        Ok(block)
    }
}

impl From<Block> for BlockNode {
    fn from(block: Block) -> Self {
        let mut node = BlockNode {
            kind: block.kind_name().to_string(),
            ..BlockNode::default()
        };

        let child = match block {
            Block::Literal { value } => {
                node.params.insert("value".into(), value.into());
                None
            }
            Block::CharacterClass { characters } | Block::NegatedCharacterClass { characters } => {
                node.params.insert("characters".into(), characters.into());
                None
            }
            Block::ZeroOrMore { child } | Block::OneOrMore { child } | Block::ZeroOrOne { child } => {
                child
            }
            Block::Exactly { count, child } => {
                node.params.insert("count".into(), count.into());
                child
            }
            Block::AtLeast { min, child } => {
                node.params.insert("min".into(), min.into());
                child
            }
            Block::Between { min, max, child } => {
                node.params.insert("min".into(), min.into());
                node.params.insert("max".into(), max.into());
                child
            }
            Block::Group { children }
            | Block::Or { children }
            | Block::Lookahead { children }
            | Block::NegativeLookahead { children }
            | Block::Lookbehind { children }
            | Block::NegativeLookbehind { children } => {
                node.children = children.into_iter().map(BlockNode::from).collect();
                None
            }
            _ => None,
        };

        if let Some(child) = child {
            node.children.push(BlockNode::from(*child));
        }
        node
    }
}

/// Quantifiers repeat at most one child
fn single_child(kind: &str, mut children: Vec<Block>) -> Result<Option<Box<Block>>> {
    if children.len() > 1 {
        return Err(ExplainError::InvalidBlocks(format!(
            "{} takes a single child, found {}",
            kind,
            children.len()
        )));
    }
    Ok(children.pop().map(Box::new))
}

/// How a block holds other blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// No children
    Leaf,
    /// Several children matched in sequence
    Sequence,
    /// Several children matched as alternatives
    Alternation,
    /// One child, repeated
    SingleChild,
}

fn default_bound() -> u32 {
    1
}

fn default_max() -> u32 {
    3
}

fn default_characters() -> String {
    DEFAULT_CHARACTERS.to_string()
}

impl Block {
    /// Create a literal block
    pub fn literal(value: impl Into<String>) -> Self {
        Block::Literal {
            value: value.into(),
        }
    }

    /// Create a capturing group
    pub fn group(children: Vec<Block>) -> Self {
        Block::Group { children }
    }

    /// Create an alternation
    pub fn or(children: Vec<Block>) -> Self {
        Block::Or { children }
    }

    /// Create a character class
    pub fn character_class(characters: impl Into<String>) -> Self {
        Block::CharacterClass {
            characters: characters.into(),
        }
    }

    /// Repeat `child` with `quantifier`
    pub fn quantified(quantifier: Quantifier, child: Block) -> Self {
        let child = Some(Box::new(child));
        match quantifier {
            Quantifier::ZeroOrMore => Block::ZeroOrMore { child },
            Quantifier::OneOrMore => Block::OneOrMore { child },
            Quantifier::ZeroOrOne => Block::ZeroOrOne { child },
            Quantifier::Exactly(count) => Block::Exactly { count, child },
            Quantifier::AtLeast(min) => Block::AtLeast { min, child },
            Quantifier::Between(min, max) => Block::Between { min, max, child },
        }
    }

    /// One freshly created block of every kind, in palette order
    pub fn palette() -> Vec<Block> {
        vec![
            Block::literal(""),
            Block::AnyChar,
            Block::Digit,
            Block::NonDigit,
            Block::Word,
            Block::NonWord,
            Block::Whitespace,
            Block::NonWhitespace,
            Block::StartOfLine,
            Block::EndOfLine,
            Block::WordBoundary,
            Block::NonWordBoundary,
            Block::ZeroOrMore { child: None },
            Block::OneOrMore { child: None },
            Block::ZeroOrOne { child: None },
            Block::Exactly {
                count: default_bound(),
                child: None,
            },
            Block::AtLeast {
                min: default_bound(),
                child: None,
            },
            Block::Between {
                min: default_bound(),
                max: default_max(),
                child: None,
            },
            Block::group(Vec::new()),
            Block::or(Vec::new()),
            Block::character_class(DEFAULT_CHARACTERS),
            Block::NegatedCharacterClass {
                characters: default_characters(),
            },
            Block::Lookahead {
                children: Vec::new(),
            },
            Block::NegativeLookahead {
                children: Vec::new(),
            },
            Block::Lookbehind {
                children: Vec::new(),
            },
            Block::NegativeLookbehind {
                children: Vec::new(),
            },
        ]
    }

    /// The `type` tag used in block documents
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Literal { .. } => "literal",
            Block::AnyChar => "anyChar",
            Block::Digit => "digit",
            Block::NonDigit => "nonDigit",
            Block::Word => "word",
            Block::NonWord => "nonWord",
            Block::Whitespace => "whitespace",
            Block::NonWhitespace => "nonWhitespace",
            Block::StartOfLine => "startOfLine",
            Block::EndOfLine => "endOfLine",
            Block::WordBoundary => "wordBoundary",
            Block::NonWordBoundary => "nonWordBoundary",
            Block::ZeroOrMore { .. } => "zeroOrMore",
            Block::OneOrMore { .. } => "oneOrMore",
            Block::ZeroOrOne { .. } => "zeroOrOne",
            Block::Exactly { .. } => "exactly",
            Block::AtLeast { .. } => "atLeast",
            Block::Between { .. } => "between",
            Block::Group { .. } => "group",
            Block::Or { .. } => "or",
            Block::CharacterClass { .. } => "characterClass",
            Block::NegatedCharacterClass { .. } => "negatedCharacterClass",
            Block::Lookahead { .. } => "lookahead",
            Block::NegativeLookahead { .. } => "negativeLookahead",
            Block::Lookbehind { .. } => "lookbehind",
            Block::NegativeLookbehind { .. } => "negativeLookbehind",
        }
    }

    /// Short display name
    pub fn label(&self) -> &'static str {
        match self {
            Block::Literal { .. } => "Text",
            Block::AnyChar => "Any Character",
            Block::Digit => "Digit",
            Block::NonDigit => "Non-Digit",
            Block::Word => "Word Character",
            Block::NonWord => "Non-Word Character",
            Block::Whitespace => "Whitespace",
            Block::NonWhitespace => "Non-Whitespace",
            Block::StartOfLine => "Start of Line",
            Block::EndOfLine => "End of Line",
            Block::WordBoundary => "Word Boundary",
            Block::NonWordBoundary => "Non-Word Boundary",
            Block::ZeroOrMore { .. } => "Zero or More",
            Block::OneOrMore { .. } => "One or More",
            Block::ZeroOrOne { .. } => "Zero or One",
            Block::Exactly { .. } => "Exactly",
            Block::AtLeast { .. } => "At Least",
            Block::Between { .. } => "Between",
            Block::Group { .. } => "Group",
            Block::Or { .. } => "Or",
            Block::CharacterClass { .. } => "Character Class",
            Block::NegatedCharacterClass { .. } => "Negated Char Class",
            Block::Lookahead { .. } => "Lookahead",
            Block::NegativeLookahead { .. } => "Neg. Lookahead",
            Block::Lookbehind { .. } => "Lookbehind",
            Block::NegativeLookbehind { .. } => "Neg. Lookbehind",
        }
    }

    /// What the block matches
    pub fn description(&self) -> &'static str {
        match self {
            Block::Literal { .. } => "Match exact text",
            Block::AnyChar => "Match any single character except newline",
            Block::Digit => "Match any digit (0-9)",
            Block::NonDigit => "Match any non-digit character",
            Block::Word => "Match any word character (a-z, A-Z, 0-9, _)",
            Block::NonWord => "Match any non-word character",
            Block::Whitespace => "Match any whitespace character (space, tab, newline)",
            Block::NonWhitespace => "Match any non-whitespace character",
            Block::StartOfLine => "Match the start of a line",
            Block::EndOfLine => "Match the end of a line",
            Block::WordBoundary => "Match a word boundary position",
            Block::NonWordBoundary => "Match a non-word boundary position",
            Block::ZeroOrMore { .. } => "Match the previous item zero or more times",
            Block::OneOrMore { .. } => "Match the previous item one or more times",
            Block::ZeroOrOne { .. } => "Match the previous item zero or one time",
            Block::Exactly { .. } => "Match the previous item exactly n times",
            Block::AtLeast { .. } => "Match the previous item at least n times",
            Block::Between { .. } => "Match the previous item between n and m times",
            Block::Group { .. } => "Group multiple items together",
            Block::Or { .. } => "Match either the expression before or after the |",
            Block::CharacterClass { .. } => "Match any one character in the set",
            Block::NegatedCharacterClass { .. } => "Match any one character not in the set",
            Block::Lookahead { .. } => "Assert that the following characters match",
            Block::NegativeLookahead { .. } => {
                "Assert that the following characters do NOT match"
            }
            Block::Lookbehind { .. } => "Assert that the preceding characters match",
            Block::NegativeLookbehind { .. } => {
                "Assert that the preceding characters do NOT match"
            }
        }
    }

    /// How this block holds children
    pub fn nesting(&self) -> Nesting {
        match self {
            Block::Group { .. }
            | Block::Lookahead { .. }
            | Block::NegativeLookahead { .. }
            | Block::Lookbehind { .. }
            | Block::NegativeLookbehind { .. } => Nesting::Sequence,
            Block::Or { .. } => Nesting::Alternation,
            Block::ZeroOrMore { .. }
            | Block::OneOrMore { .. }
            | Block::ZeroOrOne { .. }
            | Block::Exactly { .. }
            | Block::AtLeast { .. }
            | Block::Between { .. } => Nesting::SingleChild,
            _ => Nesting::Leaf,
        }
    }

    /// Whether this block can hold other blocks
    pub fn supports_nesting(&self) -> bool {
        self.nesting() != Nesting::Leaf
    }

    /// The quantifier this block applies, if it is a repetition
    pub fn quantifier(&self) -> Option<Quantifier> {
        match self {
            Block::ZeroOrMore { .. } => Some(Quantifier::ZeroOrMore),
            Block::OneOrMore { .. } => Some(Quantifier::OneOrMore),
            Block::ZeroOrOne { .. } => Some(Quantifier::ZeroOrOne),
            Block::Exactly { count, .. } => Some(Quantifier::Exactly(*count)),
            Block::AtLeast { min, .. } => Some(Quantifier::AtLeast(*min)),
            Block::Between { min, max, .. } => Some(Quantifier::Between(*min, *max)),
            _ => None,
        }
    }

    /// Render this block as regex source
    pub fn to_pattern(&self) -> String {
        match self {
            Block::Literal { value } => escape_literal(value),
            Block::AnyChar => ".".to_string(),
            Block::Digit => "\\d".to_string(),
            Block::NonDigit => "\\D".to_string(),
            Block::Word => "\\w".to_string(),
            Block::NonWord => "\\W".to_string(),
            Block::Whitespace => "\\s".to_string(),
            Block::NonWhitespace => "\\S".to_string(),
            Block::StartOfLine => "^".to_string(),
            Block::EndOfLine => "$".to_string(),
            Block::WordBoundary => "\\b".to_string(),
            Block::NonWordBoundary => "\\B".to_string(),
            Block::ZeroOrMore { child }
            | Block::OneOrMore { child }
            | Block::ZeroOrOne { child }
            | Block::Exactly { child, .. }
            | Block::AtLeast { child, .. }
            | Block::Between { child, .. } => {
                let body = child
                    .as_deref()
                    .map(Block::to_pattern)
                    .filter(|content| !content.is_empty())
                    .map(wrap_non_capturing)
                    .unwrap_or_else(|| ".".to_string());
                let quantifier = self.quantifier().map(|q| q.to_regex_string());
                format!("{}{}", body, quantifier.unwrap_or_default())
            }
            Block::Group { children } => format!("({})", format_blocks(children)),
            Block::Or { children } => {
                if children.is_empty() {
                    ALTERNATION_PLACEHOLDER.to_string()
                } else {
                    let parts: Vec<_> = children.iter().map(Block::to_pattern).collect();
                    parts.join("|")
                }
            }
            Block::CharacterClass { characters } => format!("[{}]", escape_class(characters)),
            Block::NegatedCharacterClass { characters } => {
                format!("[^{}]", escape_class(characters))
            }
            Block::Lookahead { children } => format!("(?={})", lookaround_body(children)),
            Block::NegativeLookahead { children } => {
                format!("(?!{})", lookaround_body(children))
            }
            Block::Lookbehind { children } => format!("(?<={})", lookaround_body(children)),
            Block::NegativeLookbehind { children } => {
                format!("(?<!{})", lookaround_body(children))
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pattern())
    }
}

/// Render a list of blocks as one pattern, in order
pub fn format_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(Block::to_pattern).collect()
}

/// Read a block document (a JSON array of blocks)
pub fn blocks_from_json(json: &str) -> Result<Vec<Block>> {
    serde_json::from_str(json).map_err(|e| ExplainError::InvalidBlocks(e.to_string()))
}

fn escape_with(text: &str, specials: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if specials.contains(c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

fn escape_literal(text: &str) -> String {
    escape_with(text, LITERAL_SPECIALS)
}

fn escape_class(characters: &str) -> String {
    if characters.is_empty() {
        return escape_with(DEFAULT_CHARACTERS, CLASS_SPECIALS);
    }
    escape_with(characters, CLASS_SPECIALS)
}

fn lookaround_body(children: &[Block]) -> String {
    let body = format_blocks(children);
    if body.is_empty() {
        LOOKAROUND_PLACEHOLDER.to_string()
    } else {
        body
    }
}

/// Wrap in `(?:...)` when a quantifier would otherwise bind too tightly
fn wrap_non_capturing(content: String) -> String {
    if content.chars().count() > 1 || has_unescaped_bar(&content) {
        format!("(?:{})", content)
    } else {
        content
    }
}

fn has_unescaped_bar(content: &str) -> bool {
    let mut escaped = false;
    for c in content.chars() {
        match c {
            '\\' if !escaped => escaped = true,
            '|' if !escaped => return true,
            _ => escaped = false,
        }
    }
    false
}
