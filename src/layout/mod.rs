//! Layout engine: turns a token sequence into indented text.
//!
//! Tokens are first prepared into [`items::Item`]s (rendered text, spacing,
//! matched brackets), then laid out in a single pass by [`engine::Engine`].

mod engine;
mod indentation;
mod items;
mod writer;

use crate::config::FormatOptions;
use crate::dialect::DialectConfig;
use crate::lexer::Token;

/// Lay out `tokens` (as produced by the tokenizer for `dialect`).
///
/// Never fails: unmatched brackets and unknown tokens are written as they
/// come.
pub fn format(tokens: &[Token], dialect: &DialectConfig, options: &FormatOptions) -> String {
    let items = items::build(tokens, dialect, options);
    let output = engine::Engine::new(&items, dialect, options).run();
    tracing::debug!(
        dialect = dialect.name(),
        items = items.len(),
        bytes = output.len(),
        "layout finished"
    );
    output
}
