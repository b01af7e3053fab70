use unicode_width::UnicodeWidthStr;

use crate::config::FormatOptions;
use crate::dialect::DialectConfig;
use crate::lexer::token::collapse_whitespace;
use crate::lexer::{Token, TokenKind};

/// A significant token prepared for layout: its rendered text and how it
/// relates to its neighbours.
#[derive(Debug, Clone)]
pub(crate) struct Item<'t> {
    pub token: &'t Token,
    /// Text as written, with the configured letter case applied.
    pub text: String,
    pub width: usize,
    /// Starts a line in the source (always true for the first item).
    pub newline_before: bool,
    /// No whitespace between this and the previous item in the source.
    pub adjacent: bool,
    /// Separated from the previous item by a space when on the same line.
    pub space_before: bool,
    /// Index of the matching closer or opener.
    pub partner: Option<usize>,
}

impl<'t> Item<'t> {
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.token.is_word(word)
    }

    /// `BETWEEN`, or a phrase ending in it such as `NOT BETWEEN`.
    pub fn starts_between(&self) -> bool {
        self.is_word("BETWEEN")
            || (self.kind().is_reserved() && self.token.text.ends_with(" BETWEEN"))
    }

    /// A matched `CASE` or `(`.
    pub fn is_opener(&self, index: usize) -> bool {
        self.partner.is_some_and(|p| p > index)
    }

    pub fn is_closer(&self, index: usize) -> bool {
        self.partner.is_some_and(|p| p < index)
    }

    /// Items that force the enclosing group or clause onto several lines.
    pub fn is_blocker(&self) -> bool {
        let kind = self.kind();
        kind.is_comment()
            || kind.is_clause()
            || kind == TokenKind::ReservedSetOperation
            || kind == TokenKind::Semicolon
            || self.text.contains('\n')
    }
}

pub(crate) fn build<'t>(
    tokens: &'t [Token],
    dialect: &DialectConfig,
    options: &FormatOptions,
) -> Vec<Item<'t>> {
    let mut items: Vec<Item<'t>> = Vec::new();
    let mut gap: Option<&str> = None;
    for token in tokens {
        if token.kind.is_trivia() {
            gap = Some(&token.raw);
            continue;
        }
        let text = render(token, options);
        items.push(Item {
            token,
            width: text.width(),
            text,
            newline_before: items.is_empty() || gap.is_some_and(|ws| ws.contains('\n')),
            adjacent: gap.is_none(),
            space_before: false,
            partner: None,
        });
        gap = None;
    }

    match_pairs(&mut items, dialect);

    let dense: Vec<bool> = (0..items.len())
        .map(|i| is_dense(&items, i, dialect, options))
        .collect();
    let unary: Vec<bool> = (0..items.len()).map(|i| is_unary(&items, i)).collect();
    for i in 1..items.len() {
        items[i].space_before =
            space_between(&items[i - 1], &items[i], dense[i - 1], dense[i], unary[i - 1]);
    }
    items
}

fn render(token: &Token, options: &FormatOptions) -> String {
    match token.kind {
        kind if kind.is_reserved() => {
            options.keyword_case.apply(&collapse_whitespace(&token.raw))
        }
        TokenKind::Identifier => options.identifier_case.apply(&token.raw),
        TokenKind::LineComment => token.raw.trim_end().to_string(),
        _ => token.raw.clone(),
    }
}

/// Pair brackets and `CASE ... END`. `END` only closes a `CASE` that is
/// innermost; a closing bracket abandons any unclosed `CASE` inside it.
fn match_pairs(items: &mut [Item<'_>], dialect: &DialectConfig) {
    let mut open: Vec<usize> = Vec::new();
    for i in 0..items.len() {
        let token = items[i].token;
        let opener = match token.kind {
            TokenKind::OpenParen => {
                open.push(i);
                continue;
            }
            TokenKind::CloseParen => {
                let close = token.raw.chars().next();
                open.iter().rposition(|&o| {
                    items[o].kind() == TokenKind::OpenParen
                        && items[o]
                            .token
                            .raw
                            .chars()
                            .next()
                            .and_then(|c| dialect.closing_bracket(c))
                            == close
                })
            }
            _ if token.is_word("CASE") => {
                open.push(i);
                continue;
            }
            _ if token.is_word("END") => open
                .last()
                .filter(|&&o| items[o].is_word("CASE"))
                .map(|_| open.len() - 1),
            _ => None,
        };
        if let Some(pos) = opener {
            let o = open[pos];
            open.truncate(pos);
            items[o].partner = Some(i);
            items[i].partner = Some(o);
        }
    }
}

fn is_dense(
    items: &[Item<'_>],
    i: usize,
    dialect: &DialectConfig,
    options: &FormatOptions,
) -> bool {
    let item = &items[i];
    if item.kind() != TokenKind::Operator {
        return false;
    }
    let prev = i.checked_sub(1).map(|p| &items[p]);
    let next = items.get(i + 1);
    match item.token.raw.as_str() {
        // `1 . x` and `t . 1` would turn into numbers.
        "." => {
            !prev.is_some_and(|p| p.kind() == TokenKind::Number)
                && !next.is_some_and(|n| n.text.starts_with(|c: char| c.is_ascii_digit()))
        }
        op => {
            // `1e + 5` would become an exponent.
            let after_digit_word = matches!(op, "+" | "-")
                && prev.is_some_and(|p| {
                    p.kind() == TokenKind::Identifier
                        && p.text.starts_with(|c: char| c.is_ascii_digit())
                });
            (options.dense_operators || dialect.is_always_dense(op)) && !after_digit_word
        }
    }
}

/// Sign operator: `-` or `+` that does not follow an operand.
fn is_unary(items: &[Item<'_>], i: usize) -> bool {
    let item = &items[i];
    if item.kind() != TokenKind::Operator || !matches!(item.token.raw.as_str(), "-" | "+") {
        return false;
    }
    let prev = items[..i].iter().rev().find(|p| !p.kind().is_comment());
    match prev.map(Item::kind) {
        None => true,
        Some(
            TokenKind::Operator | TokenKind::OpenParen | TokenKind::Comma | TokenKind::Semicolon,
        ) => true,
        Some(TokenKind::ReservedFunctionName) => false,
        Some(kind) => kind.is_reserved(),
    }
}

fn word_like(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::QuotedIdentifier
            | TokenKind::ReservedKeyword
            | TokenKind::Variable
            | TokenKind::Parameter(_)
            | TokenKind::CloseParen
    )
}

fn space_between(
    prev: &Item<'_>,
    cur: &Item<'_>,
    prev_dense: bool,
    cur_dense: bool,
    prev_unary: bool,
) -> bool {
    use TokenKind::*;

    if matches!(cur.kind(), Comma | Semicolon | CloseParen) || prev.kind() == OpenParen {
        return false;
    }
    if prev.kind().is_comment() || cur.kind().is_comment() {
        return true;
    }
    // An unknown character could fuse with a neighbouring operator.
    if prev.kind() == Unknown || cur.kind() == Unknown {
        return true;
    }
    if cur.kind() == OpenParen {
        let attached = prev.kind() == ReservedFunctionName
            || (cur.adjacent && word_like(prev.kind()))
            || (prev.kind() == Operator && (prev_unary || prev_dense));
        return !attached;
    }
    if prev.kind() == Operator && cur.kind() == Operator {
        // Keeps `- -1` from becoming a comment and `< >` from becoming `<>`.
        return !(prev.token.raw == "." && prev_dense);
    }
    if prev.kind() == Operator && (prev_unary || prev_dense) {
        return false;
    }
    !(cur.kind() == Operator && cur_dense)
}
