//! Splitting user input into a pattern and flags

/// A pattern and the flags it should be explained with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternInput {
    pub pattern: String,
    pub flags: String,
}

impl PatternInput {
    /// Split `text` in `/pattern/flags` form at its last `/`
    ///
    /// Text that does not start with `/`, or whose only `/` is the leading
    /// one, is taken whole as the pattern and `separate_flags` is used as is.
    pub fn parse(text: &str, separate_flags: &str) -> Self {
        if let Some(rest) = text.strip_prefix('/') {
            if let Some(last) = rest.rfind('/') {
                return PatternInput {
                    pattern: rest[..last].to_string(),
                    flags: rest[last + 1..].to_string(),
                };
            }
        }

        PatternInput {
            pattern: text.to_string(),
            flags: separate_flags.to_string(),
        }
    }
}
