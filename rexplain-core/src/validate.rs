//! Pattern validation
//!
//! Patterns are checked against ECMAScript regex syntax with `regress`, the
//! same grammar a browser's `RegExp` constructor enforces. Validation is the
//! only place a pattern is ever compiled by the explainer.

use crate::error::{ExplainError, Result};

/// Flags that change how a pattern compiles
const COMPILE_FLAGS: &str = "imsu";

/// Compile `pattern` with `flags` into an ECMAScript regex
///
/// Flag letters that do not affect compilation (`g`, `y`, and anything
/// unrecognized) are accepted here and reported by the flag explainer instead.
pub fn compile(pattern: &str, flags: &str) -> Result<regress::Regex> {
    let compile_flags: String = flags.chars().filter(|c| COMPILE_FLAGS.contains(*c)).collect();
    regress::Regex::with_flags(pattern, compile_flags.as_str()).map_err(|e| {
        log_debug!("rejected /{}/{}: {}", pattern, flags, e);
        ExplainError::InvalidPattern {
            pattern: pattern.to_string(),
            flags: flags.to_string(),
            message: e.to_string(),
        }
    })
}

/// Check that `pattern` compiles with `flags`
pub fn validate(pattern: &str, flags: &str) -> Result<()> {
    compile(pattern, flags).map(|_| ())
}

/// Whether `pattern` compiles with `flags`
pub fn is_valid(pattern: &str, flags: &str) -> bool {
    validate(pattern, flags).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patterns() {
        assert!(is_valid("abc", ""));
        assert!(is_valid(r"^\d{3}-\d{4}$", "g"));
        assert!(is_valid("a(?=b)", ""));
        assert!(is_valid("(?<=a)b", ""));
        assert!(is_valid("(?<year>\\d{4})", "u"));
    }

    #[test]
    fn test_unterminated_class() {
        let err = validate("abc[", "").unwrap_err();
        match err {
            ExplainError::InvalidPattern {
                pattern,
                flags,
                message,
            } => {
                assert_eq!(pattern, "abc[");
                assert_eq!(flags, "");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(!is_valid("(abc", ""));
        assert!(!is_valid("abc)", ""));
    }

    #[test]
    fn test_non_compiling_flags_tolerated() {
        assert!(is_valid("abc", "gy"));
        assert!(is_valid("abc", "gimsuy"));
        assert!(is_valid("abc", "gq!"));
    }
}
