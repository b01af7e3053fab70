//! Error taxonomy.
//!
//! Construction-time problems surface as [`ConfigError`]; the only per-call
//! failure is [`TokenizeError`]. The layout engine never fails.

use std::fmt;

use thiserror::Error;
use unicode_width::UnicodeWidthChar;

/// Problems detected while building a dialect configuration or a formatter.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown dialect {0:?}")]
    UnknownDialect(String),

    /// A reserved-phrase template with broken `[...]` / `{...}` structure.
    #[error("malformed phrase template {template:?} at byte {offset}: {reason}")]
    MalformedTemplate {
        template: String,
        offset: usize,
        reason: String,
    },

    #[error("phrase template {template:?} nests deeper than {limit} groups")]
    NestingTooDeep { template: String, limit: usize },

    #[error("invalid variable pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The dialect record contradicts itself.
    #[error("dialect {dialect}: {reason}")]
    Conflict { dialect: String, reason: String },

    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn malformed(template: &str, offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            template: template.to_string(),
            offset,
            reason: reason.into(),
        }
    }

    pub fn conflict(dialect: &str, reason: impl Into<String>) -> Self {
        Self::Conflict {
            dialect: dialect.to_string(),
            reason: reason.into(),
        }
    }
}

/// What kind of construct was left open at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unterminated {
    String,
    QuotedIdentifier,
    BlockComment,
}

impl fmt::Display for Unterminated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unterminated::String => write!(f, "string literal"),
            Unterminated::QuotedIdentifier => write!(f, "quoted identifier"),
            Unterminated::BlockComment => write!(f, "block comment"),
        }
    }
}

/// A literal, quoted identifier or comment that never closes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated {kind} starting at byte {offset}, expected `{expected}`")]
pub struct TokenizeError {
    pub kind: Unterminated,
    /// Byte offset of the opening delimiter (including any prefix).
    pub offset: usize,
    /// The terminator the scanner was looking for.
    pub expected: String,
}

impl TokenizeError {
    /// 1-based line and column (in characters) of the error offset.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let target = self.offset.min(source.len());
        let mut line = 1usize;
        let mut col = 1usize;
        for (i, ch) in source.char_indices() {
            if i >= target {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Multi-line diagnostic with the offending line and a caret under the
    /// opening delimiter.
    pub fn render(&self, source: &str) -> String {
        let (line, col) = self.line_col(source);
        let text = source.lines().nth(line - 1).unwrap_or("");
        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());

        let mut lines = Vec::new();
        lines.push(format!("error: {}", self));
        lines.push(format!("{} --> line {}, column {}", pad, line, col));
        lines.push(format!("{} |", pad));
        lines.push(format!("{} | {}", gutter, text));
        lines.push(format!("{} | {}^", pad, self.caret_indent(source)));
        lines.join("\n")
    }

    /// Blank space as wide as the text before the error on its line. Tabs
    /// are kept so the caret lines up however the terminal expands them.
    fn caret_indent(&self, source: &str) -> String {
        let target = self.offset.min(source.len());
        let before = source.get(..target).unwrap_or(source);
        let start = before.rfind('\n').map_or(0, |i| i + 1);
        before[start..]
            .chars()
            .map(|ch| match ch {
                '\t' => "\t".to_string(),
                _ => " ".repeat(ch.width().unwrap_or(0)),
            })
            .collect()
    }
}

/// Umbrella error for the one-shot [`crate::format`] helper.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unterminated_at(offset: usize) -> TokenizeError {
        TokenizeError {
            kind: Unterminated::String,
            offset,
            expected: "'".to_string(),
        }
    }

    #[test]
    fn test_line_col_first_line() {
        let err = unterminated_at(7);
        assert_eq!(err.line_col("select 'abc"), (1, 8));
    }

    #[test]
    fn test_line_col_after_newline() {
        let src = "select 1;\nselect 'x";
        let err = unterminated_at(src.find('\'').unwrap());
        assert_eq!(err.line_col(src), (2, 8));
    }

    #[test]
    fn test_line_col_counts_chars_not_bytes() {
        let src = "select 'é', 'x";
        let err = unterminated_at(src.rfind('\'').unwrap());
        assert_eq!(err.line_col(src), (1, 13));
    }

    #[test]
    fn test_render_places_caret() {
        let src = "select 1;\nselect 'abc";
        let err = unterminated_at(src.rfind('\'').unwrap());
        let rendered = err.render(src);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("error: unterminated string literal"));
        assert_eq!(lines[1], "  --> line 2, column 8");
        assert_eq!(lines[3], "2 | select 'abc");
        assert_eq!(lines[4], "  |        ^");
    }

    #[test]
    fn test_render_caret_follows_display_width() {
        let src = "select '日本', 'x";
        let err = unterminated_at(src.rfind('\'').unwrap());
        let rendered = err.render(src);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "  --> line 1, column 14");
        assert_eq!(lines[4], format!("  | {}^", " ".repeat(15)));

        let src = "\tselect 'x";
        let err = unterminated_at(src.find('\'').unwrap());
        let rendered = err.render(src);
        assert_eq!(rendered.lines().nth(4), Some("  | \t       ^"));
    }

    #[test]
    fn test_display_mentions_terminator() {
        let err = TokenizeError {
            kind: Unterminated::BlockComment,
            offset: 3,
            expected: "*/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unterminated block comment starting at byte 3, expected `*/`"
        );
    }
}
