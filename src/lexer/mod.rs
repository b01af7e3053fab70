//! Dialect-parameterized lexical analysis.
//!
//! ```text
//! raw SQL ──► Tokenizer (scan + classify) ──► post-process hook ──► Vec<Token>
//! ```
//!
//! The scanner is dialect-agnostic; every difference between dialects comes
//! from the [`DialectConfig`](crate::dialect::DialectConfig) it is handed.
pub mod postprocess;
pub mod token;
pub mod tokenizer;

pub use postprocess::{map_with_previous_reserved, PostProcess};
pub use token::{reconstruct, ParamKind, Token, TokenKind};
pub use tokenizer::Tokenizer;
