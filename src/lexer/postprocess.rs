//! Context-sensitive reclassification applied once after scanning.

use super::token::{Token, TokenKind};

/// Dialect hook run over the complete token sequence. Must return the same
/// number of tokens in the same order.
pub type PostProcess = fn(Vec<Token>) -> Vec<Token>;

/// Map over `tokens` threading the most recent reserved token as explicit
/// fold state.
///
/// `rule` sees that previous reserved token and the current token and may
/// return a new kind for the current token. A reclassified token does not
/// become the new "previous reserved" token, which keeps the pass
/// idempotent: running it over its own output yields the same sequence.
pub fn map_with_previous_reserved<F>(tokens: Vec<Token>, mut rule: F) -> Vec<Token>
where
    F: FnMut(Option<&Token>, &Token) -> Option<TokenKind>,
{
    tokens
        .into_iter()
        .scan(None::<Token>, |previous, token| {
            let mapped = match rule(previous.as_ref(), &token) {
                Some(kind) => token.reclassify(kind),
                None => {
                    if token.kind.is_reserved() {
                        *previous = Some(token.clone());
                    }
                    token
                }
            };
            Some(mapped)
        })
        .collect()
}
