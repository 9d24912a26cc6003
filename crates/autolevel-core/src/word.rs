//! Code words and blocks, the atomic units of a G-code line.

use std::fmt;

/// Render a numeric G-code value as canonical text.
///
/// The value is formatted with exactly three decimal places, then trailing
/// zeros are stripped, then a bare trailing decimal point is stripped:
/// `1.000` becomes `"1"`, `1.500` becomes `"1.5"`, `-0.250` becomes `"-0.25"`.
/// Golden-file round trips depend on this exact rule.
pub fn format_value(value: f64) -> String {
    let mut text = format!("{:.3}", value);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// A single letter code plus its numeric value or comment text.
///
/// Exactly one of `value`/`text` is meaningful: `text` is `Some` only for the
/// comment pseudo-word (`letter == '('`). Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeWord {
    /// The code letter (`G`, `M`, `X`, ... or `(` for a comment).
    pub letter: char,
    /// The numeric payload; meaningless for comments.
    pub value: f64,
    /// Comment text without the surrounding parentheses.
    pub text: Option<String>,
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column of the letter.
    pub column: usize,
}

impl CodeWord {
    /// Create a letter/number word.
    pub fn number(letter: char, value: f64, line: usize, column: usize) -> Self {
        Self {
            letter,
            value,
            text: None,
            line,
            column,
        }
    }

    /// Create a comment pseudo-word.
    pub fn comment(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            letter: '(',
            value: 0.0,
            text: Some(text.into()),
            line,
            column,
        }
    }

    /// Whether this word is a comment.
    pub fn is_comment(&self) -> bool {
        self.letter == '('
    }

    /// The integer portion of the numeric payload, used as the modal
    /// registry key for G/M words.
    pub fn code_number(&self) -> i32 {
        self.value.floor() as i32
    }
}

impl fmt::Display for CodeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "({})", text),
            None => write!(f, "{}{}", self.letter, format_value(self.value)),
        }
    }
}

/// One tokenized input line: an ordered sequence of code words.
///
/// Order is preserved because a later duplicate letter on the same line is an
/// error, not an overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The words in source order.
    pub words: Vec<CodeWord>,
    /// The original line text.
    pub source: String,
    /// 1-based source line number.
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_trimming() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(-0.25), "-0.25");
        assert_eq!(format_value(0.001), "0.001");
        assert_eq!(format_value(10.125), "10.125");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_format_value_idempotence() {
        // trim(format(v)) == trim(format(parse(trim(format(v)))))
        for v in [0.0, 1.0, -1.0, 1.5, 0.001, -0.0001] {
            let once = format_value(v);
            let parsed: f64 = once.parse().unwrap();
            assert_eq!(once, format_value(parsed));
        }
    }

    #[test]
    fn test_word_display() {
        assert_eq!(CodeWord::number('G', 1.0, 1, 1).to_string(), "G1");
        assert_eq!(CodeWord::number('X', -0.25, 1, 3).to_string(), "X-0.25");
        assert_eq!(CodeWord::comment("ROUGHING PASS", 1, 9).to_string(), "(ROUGHING PASS)");
    }

    #[test]
    fn test_code_number_floors() {
        assert_eq!(CodeWord::number('G', 1.0, 1, 1).code_number(), 1);
        assert_eq!(CodeWord::number('G', 28.5, 1, 1).code_number(), 28);
    }
}
