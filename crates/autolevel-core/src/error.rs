//! Error types for the G-code core.
//!
//! Every fatal condition aborts processing of the whole file; there is no
//! line-skip-and-continue mode. Parse errors carry 1-based line and column
//! positions so the offending character can be named exactly.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Character-level tokenizer errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A comment was opened with `(` but the line ended before `)`.
    #[error("Unterminated comment at line {line}, column {column}")]
    UnterminatedComment {
        /// Line the comment was opened on.
        line: usize,
        /// Column of the opening parenthesis.
        column: usize,
    },

    /// A code letter was not followed by a parseable signed decimal number.
    #[error("Malformed number '{text}' at line {line}, column {column}")]
    MalformedNumber {
        /// The characters that failed to parse.
        text: String,
        line: usize,
        column: usize,
    },

    /// The line ended where a number was still expected.
    #[error("Unexpected end of line at line {line}, column {column}")]
    UnexpectedEndOfLine { line: usize, column: usize },

    /// A character outside the G-code alphabet.
    #[error("Unrecognized character '{character}' at line {line}, column {column}")]
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        line: usize,
        column: usize,
    },
}

/// Errors raised while resolving blocks and processing programs.
#[derive(Error, Debug)]
pub enum GcodeError {
    /// Tokenizer error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A syntactically valid code word with no entry in the modal registry.
    ///
    /// Covers unknown codes as well as the deliberately rejected ones
    /// (cutter-radius compensation G41/G42, tool-length compensation G43/G44,
    /// path control G61/G64, canned-cycle return G98/G99, tool change M6,
    /// pallet change M60). These are rejections, not silent no-ops.
    #[error("Unsupported code {code} at line {line}, column {column}")]
    UnsupportedCode {
        /// Canonical text of the offending code, e.g. "G41".
        code: String,
        line: usize,
        column: usize,
    },

    /// Two words on one line target the same modal group, axis, or the
    /// comment slot.
    #[error("Duplicate {slot} assignment at line {line}")]
    DuplicateAssignment {
        /// What was assigned twice, e.g. "motion group" or "axis X".
        slot: String,
        line: usize,
    },

    /// I/O error while reading or writing a program file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for G-code operations.
pub type Result<T> = std::result::Result<T, GcodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnterminatedComment { line: 3, column: 8 };
        assert_eq!(err.to_string(), "Unterminated comment at line 3, column 8");

        let err = ParseError::MalformedNumber {
            text: "+-".to_string(),
            line: 1,
            column: 2,
        };
        assert_eq!(err.to_string(), "Malformed number '+-' at line 1, column 2");
    }

    #[test]
    fn test_gcode_error_display() {
        let err = GcodeError::UnsupportedCode {
            code: "G41".to_string(),
            line: 12,
            column: 1,
        };
        assert_eq!(err.to_string(), "Unsupported code G41 at line 12, column 1");

        let err = GcodeError::DuplicateAssignment {
            slot: "axis X".to_string(),
            line: 7,
        };
        assert_eq!(err.to_string(), "Duplicate axis X assignment at line 7");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse = ParseError::UnexpectedEndOfLine { line: 2, column: 5 };
        let err: GcodeError = parse.clone().into();
        assert!(matches!(err, GcodeError::Parse(p) if p == parse));
    }
}
