use crate::dialect::{DialectConfig, QuoteForm, QuoteStyle};
use crate::error::{TokenizeError, Unterminated};

use super::token::{ParamKind, Token, TokenKind};

/// Splits SQL text into tokens according to one dialect.
///
/// The tokenizer borrows its configuration and keeps no state between calls,
/// so a single instance can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'d> {
    dialect: &'d DialectConfig,
}

impl<'d> Tokenizer<'d> {
    pub fn new(dialect: &'d DialectConfig) -> Self {
        Self { dialect }
    }

    /// Tokenize `input`. Every byte of the input ends up in exactly one
    /// token, whitespace and comments included.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, TokenizeError> {
        let mut scanner = Scanner {
            input,
            pos: 0,
            dialect: self.dialect,
            tokens: Vec::new(),
        };
        while scanner.pos < input.len() {
            scanner.next_token()?;
        }

        let tokens = match self.dialect.post_process {
            Some(hook) => hook(scanner.tokens),
            None => scanner.tokens,
        };
        tracing::trace!(
            dialect = self.dialect.name(),
            bytes = input.len(),
            tokens = tokens.len(),
            "tokenized input"
        );
        Ok(tokens)
    }
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    dialect: &'a DialectConfig,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn push(&mut self, kind: TokenKind, len: usize) {
        let raw = &self.input[self.pos..self.pos + len];
        self.tokens.push(Token::new(kind, raw, self.pos));
        self.pos += len;
    }

    fn next_token(&mut self) -> Result<(), TokenizeError> {
        let rest = self.rest();
        let Some(c) = self.peek() else {
            return Ok(());
        };

        if c.is_whitespace() {
            let len = byte_len_while(rest, char::is_whitespace);
            self.push(TokenKind::Whitespace, len);
            return Ok(());
        }

        if let Some(len) = self.line_comment() {
            self.push(TokenKind::LineComment, len);
            return Ok(());
        }
        if rest.starts_with("/*") {
            let len = match rest[2..].find("*/") {
                Some(end) => end + 4,
                None => return Err(self.unterminated(Unterminated::BlockComment, "*/")),
            };
            self.push(TokenKind::BlockComment, len);
            return Ok(());
        }

        let dialect = self.dialect;
        if let Some(len) = self.quoted(dialect.string_types, Unterminated::String)? {
            self.push(TokenKind::String, len);
            return Ok(());
        }
        if let Some(len) = self.quoted(dialect.ident_types, Unterminated::QuotedIdentifier)? {
            self.push(TokenKind::QuotedIdentifier, len);
            return Ok(());
        }

        if let Some((kind, len)) = self.number() {
            self.push(kind, len);
            return Ok(());
        }

        if let Some((kind, len)) = self.parameter()? {
            self.push(kind, len);
            return Ok(());
        }

        if let Some(len) = self.variable() {
            self.push(TokenKind::Variable, len);
            return Ok(());
        }

        if let Some((kind, len)) = self.punctuation(c) {
            self.push(kind, len);
            return Ok(());
        }

        if dialect.ident_chars.is_start(c) {
            let (kind, len) = self.word();
            self.push(kind, len);
            return Ok(());
        }

        self.push(TokenKind::Unknown, c.len_utf8());
        Ok(())
    }

    fn unterminated(&self, kind: Unterminated, expected: impl Into<String>) -> TokenizeError {
        TokenizeError {
            kind,
            offset: self.pos,
            expected: expected.into(),
        }
    }

    fn line_comment(&self) -> Option<usize> {
        let rest = self.rest();
        self.dialect
            .line_comments
            .iter()
            .find(|marker| rest.starts_with(**marker))
            .map(|_| rest.find('\n').unwrap_or(rest.len()))
    }

    /// Try every quote style in order. `Ok(None)` means no style starts here.
    fn quoted(
        &self,
        styles: &[QuoteStyle],
        kind: Unterminated,
    ) -> Result<Option<usize>, TokenizeError> {
        let rest = self.rest();
        for style in styles {
            let mut prefix_lens: Vec<usize> = style
                .prefixes
                .iter()
                .filter(|p| starts_with_ignore_case(rest, p))
                .map(|p| p.len())
                .collect();
            prefix_lens.sort_unstable_by(|a, b| b.cmp(a));
            if !style.require_prefix {
                prefix_lens.push(0);
            }

            for prefix in prefix_lens {
                let body = &rest[prefix..];
                let scanned = match style.form {
                    QuoteForm::Delimited {
                        open,
                        close,
                        escape,
                    } => scan_delimited(body, open, close, escape.doubles(), escape.backslashes())
                        .map(|found| found.map_err(|_| close.to_string())),
                    QuoteForm::Alternative => scan_alternative(body),
                    QuoteForm::Dollar => scan_dollar(body),
                };
                match scanned {
                    Some(Ok(len)) => return Ok(Some(prefix + len)),
                    Some(Err(expected)) => return Err(self.unterminated(kind, expected)),
                    None => {}
                }
            }
        }
        Ok(None)
    }

    /// Numeric literal, or an identifier for digit-led names like `1st_col`.
    fn number(&self) -> Option<(TokenKind, usize)> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let ident = self.dialect.ident_chars;
        let followed_by_word = |len: usize| rest[len..].chars().next().is_some_and(|c| ident.is_rest(c));

        for (marker, valid) in [(b'x', 16u32), (b'b', 2)] {
            if bytes.len() > 2 && bytes[0] == b'0' && bytes[1].to_ascii_lowercase() == marker {
                let digits = byte_len_while(&rest[2..], |c| c.is_digit(valid));
                if digits > 0 && !followed_by_word(2 + digits) {
                    return Some((TokenKind::Number, 2 + digits));
                }
            }
        }

        let int = byte_len_while(rest, |c| c.is_ascii_digit());
        let mut len = int;
        if bytes.get(len) == Some(&b'.') {
            let frac = byte_len_while(&rest[len + 1..], |c| c.is_ascii_digit());
            if int == 0 && frac == 0 {
                return None;
            }
            len += 1 + frac;
        } else if int == 0 {
            return None;
        } else if followed_by_word(len) && !has_exponent(&rest[len..]) {
            let word = len + byte_len_while(&rest[len..], |c| ident.is_rest(c));
            return Some((TokenKind::Identifier, word));
        }

        if let Some(exp) = exponent_len(&rest[len..]) {
            len += exp;
        }
        Some((TokenKind::Number, len))
    }

    fn parameter(&self) -> Result<Option<(TokenKind, usize)>, TokenizeError> {
        let rest = self.rest();
        let Some(prefix) = self.peek() else {
            return Ok(None);
        };
        let params = self.dialect.param_types;
        let after = &rest[prefix.len_utf8()..];
        let next = after.chars().next();

        if params.positional && prefix == '?' {
            return Ok(Some((TokenKind::Parameter(ParamKind::Positional), 1)));
        }
        if params.numbered.contains(&prefix) && next.is_some_and(|c| c.is_ascii_digit()) {
            let len = prefix.len_utf8() + byte_len_while(after, |c| c.is_ascii_digit());
            return Ok(Some((TokenKind::Parameter(ParamKind::Numbered), len)));
        }
        if params.quoted.contains(&prefix) && next == Some('"') {
            return match scan_delimited(after, '"', '"', true, false) {
                Some(Ok(len)) => Ok(Some((
                    TokenKind::Parameter(ParamKind::Quoted),
                    prefix.len_utf8() + len,
                ))),
                _ => Err(self.unterminated(Unterminated::QuotedIdentifier, "\"")),
            };
        }
        let chars = self.dialect.param_chars;
        if params.named.contains(&prefix) && next.is_some_and(|c| chars.is_start(c)) {
            let len = prefix.len_utf8() + byte_len_while(after, |c| chars.is_rest(c));
            return Ok(Some((TokenKind::Parameter(ParamKind::Named), len)));
        }
        Ok(None)
    }

    fn variable(&self) -> Option<usize> {
        let rest = self.rest();
        self.dialect
            .variables
            .iter()
            .filter_map(|re| re.find(rest))
            .map(|m| m.end())
            .find(|&len| len > 0)
    }

    fn punctuation(&self, c: char) -> Option<(TokenKind, usize)> {
        match c {
            ',' => return Some((TokenKind::Comma, 1)),
            ';' => return Some((TokenKind::Semicolon, 1)),
            _ => {}
        }
        for &(open, close) in &self.dialect.brackets {
            if c == open {
                return Some((TokenKind::OpenParen, open.len_utf8()));
            }
            if c == close {
                return Some((TokenKind::CloseParen, close.len_utf8()));
            }
        }
        let rest = self.rest();
        self.dialect
            .operators
            .iter()
            .find(|op| rest.starts_with(op.as_str()))
            .map(|op| (TokenKind::Operator, op.len()))
    }

    /// Classify a bare word: function name, longest reserved phrase, or
    /// identifier.
    fn word(&self) -> (TokenKind, usize) {
        let rest = self.rest();
        let ident = self.dialect.ident_chars;
        let len = byte_len_while(rest, |c| ident.is_rest(c));

        let after_dot = self
            .tokens
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .is_some_and(|t| t.is_operator("."));
        if after_dot {
            return (TokenKind::Identifier, len);
        }

        let upper = rest[..len].to_uppercase();
        if self.dialect.is_function(&upper) && rest[len..].trim_start().starts_with('(') {
            return (TokenKind::ReservedFunctionName, len);
        }

        for entry in self.dialect.phrases.candidates(&upper) {
            if let Some(phrase_len) = self.match_tail(len, &entry.words[1..]) {
                return (entry.kind, phrase_len);
            }
        }
        (TokenKind::Identifier, len)
    }

    /// Match the remaining words of a phrase after the first `len` bytes.
    /// Words must be separated by whitespace and end on a word boundary.
    fn match_tail(&self, len: usize, words: &[String]) -> Option<usize> {
        let rest = self.rest();
        let ident = self.dialect.ident_chars;
        let mut end = len;
        for expected in words {
            let gap = byte_len_while(&rest[end..], char::is_whitespace);
            if gap == 0 {
                return None;
            }
            let start = end + gap;
            let word = byte_len_while(&rest[start..], |c| ident.is_rest(c));
            if word == 0 || rest[start..start + word].to_uppercase() != *expected {
                return None;
            }
            end = start + word;
        }
        Some(end)
    }
}

fn byte_len_while(s: &str, mut pred: impl FnMut(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| i)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// `e10`, `E-3`, `e+2`
fn exponent_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return None;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = byte_len_while(&s[1 + sign..], |c| c.is_ascii_digit());
    (digits > 0).then_some(1 + sign + digits)
}

fn has_exponent(s: &str) -> bool {
    exponent_len(s).is_some_and(|len| {
        !s[len..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
    })
}

/// Scan `open ... close` at the start of `s`.
///
/// `None` if `s` does not start with `open`; `Some(Err(()))` if the literal
/// never closes.
fn scan_delimited(
    s: &str,
    open: char,
    close: char,
    doubled: bool,
    backslash: bool,
) -> Option<Result<usize, ()>> {
    if !s.starts_with(open) {
        return None;
    }
    let body_start = open.len_utf8();
    let mut chars = s[body_start..].char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if backslash && c == '\\' {
            chars.next();
            continue;
        }
        if c == close {
            if doubled && chars.peek().is_some_and(|&(_, next)| next == close) {
                chars.next();
                continue;
            }
            return Some(Ok(body_start + i + close.len_utf8()));
        }
    }
    Some(Err(()))
}

/// `q'[...]'` with a bracket or any other single-character delimiter.
fn scan_alternative(s: &str) -> Option<Result<usize, String>> {
    let mut chars = s.chars();
    if !matches!(chars.next(), Some('q' | 'Q')) || chars.next() != Some('\'') {
        return None;
    }
    let delimiter = chars.next().filter(|c| !c.is_whitespace())?;
    let close = match delimiter {
        '[' => ']',
        '(' => ')',
        '{' => '}',
        '<' => '>',
        other => other,
    };
    let body_start = 2 + delimiter.len_utf8();
    let terminator = format!("{}'", close);
    Some(match s[body_start..].find(&terminator) {
        Some(end) => Ok(body_start + end + terminator.len()),
        None => Err(terminator),
    })
}

/// `$$...$$` or `$tag$...$tag$`.
fn scan_dollar(s: &str) -> Option<Result<usize, String>> {
    let after = s.strip_prefix('$')?;
    let tag_len = match after.chars().next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            byte_len_while(after, |c| c.is_alphanumeric() || c == '_')
        }
        _ => 0,
    };
    if !after[tag_len..].starts_with('$') {
        return None;
    }
    let delimiter = &s[..tag_len + 2];
    Some(match s[delimiter.len()..].find(delimiter) {
        Some(end) => Ok(2 * delimiter.len() + end),
        None => Err(delimiter.to_string()),
    })
}
