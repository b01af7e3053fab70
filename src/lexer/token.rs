use serde::Serialize;

/// Flavour of a parameter placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// `?`
    Positional,
    /// `:1`, `$1`
    Numbered,
    /// `:name`, `@name`
    Named,
    /// `@"name"`
    Quoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Whitespace,
    LineComment,
    BlockComment,
    String,
    QuotedIdentifier,
    Number,
    Parameter(ParamKind),
    Variable,
    Operator,
    Comma,
    OpenParen,
    CloseParen,
    Semicolon,
    ReservedSelect,
    ReservedClause,
    ReservedSetOperation,
    ReservedJoin,
    ReservedPhrase,
    ReservedKeyword,
    ReservedFunctionName,
    /// `AND`, `OR`, and `XOR` where the dialect supports it.
    LogicalOperator,
    Identifier,
    Unknown,
}

impl TokenKind {
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            TokenKind::ReservedSelect
                | TokenKind::ReservedClause
                | TokenKind::ReservedSetOperation
                | TokenKind::ReservedJoin
                | TokenKind::ReservedPhrase
                | TokenKind::ReservedKeyword
                | TokenKind::ReservedFunctionName
                | TokenKind::LogicalOperator
        )
    }

    /// Clause-like kinds: they start a new clause at their block's top level.
    pub fn is_clause(self) -> bool {
        matches!(self, TokenKind::ReservedSelect | TokenKind::ReservedClause)
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Kinds that carry no meaning for layout.
    pub fn is_trivia(self) -> bool {
        self == TokenKind::Whitespace
    }
}

/// A lexical unit of the input.
///
/// `raw` is the exact source slice, so concatenating the `raw` text of every
/// token reproduces the input. `text` is the normalized form: reserved words
/// are upper-cased with inner whitespace collapsed (`group\n  by` becomes
/// `GROUP BY`); every other kind keeps its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
    pub text: String,
    /// Byte offset of `raw` within the input.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, raw: &str, offset: usize) -> Self {
        let text = if kind.is_reserved() {
            collapse_whitespace(raw).to_uppercase()
        } else {
            raw.to_string()
        };
        Self {
            kind,
            raw: raw.to_string(),
            text,
            offset,
        }
    }

    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.offset + self.raw.len()
    }

    /// Same token with another kind; the normalized text follows the new kind.
    pub fn reclassify(self, kind: TokenKind) -> Self {
        Token::new(kind, &self.raw, self.offset)
    }

    /// Case-insensitive comparison against a (single or multi-word) reserved
    /// word.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind.is_reserved() && self.text == word
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.raw == symbol
    }
}

/// Join the whitespace-separated words of `raw` with single spaces.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenate the raw text of all tokens.
pub fn reconstruct(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.raw.as_str()).collect()
}
