//! SQL dialects as data.
//!
//! Each dialect module exports one static [`DialectSpec`]: phrase templates,
//! word lists, quoting and parameter rules. [`DialectConfig::build`] turns a
//! spec into the immutable configuration the tokenizer and layout engine
//! read. Adding a dialect means adding a spec, never touching the engine.
use std::sync::Arc;

use crate::error::ConfigError;
use crate::lexer::PostProcess;

mod config;
pub mod plsql;
pub mod postgresql;
pub mod sql;

pub use config::{DialectConfig, PhraseEntry, PhraseTable};

/// How a delimited literal escapes its closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// `'it''s'`
    Doubled,
    /// `'it\'s'`
    Backslash,
    DoubledOrBackslash,
    /// No escapes: the first closing delimiter ends the literal.
    Raw,
}

impl Escape {
    pub fn doubles(self) -> bool {
        matches!(self, Escape::Doubled | Escape::DoubledOrBackslash)
    }

    pub fn backslashes(self) -> bool {
        matches!(self, Escape::Backslash | Escape::DoubledOrBackslash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteForm {
    Delimited { open: char, close: char, escape: Escape },
    /// Oracle alternative quoting: `q'[...]'`, `q'!...!'`.
    Alternative,
    /// PostgreSQL dollar quoting: `$$...$$`, `$fn$...$fn$`.
    Dollar,
}

/// One way of writing a string literal or quoted identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteStyle {
    pub form: QuoteForm,
    /// Case-insensitive letter prefixes such as `N` or `U&`.
    pub prefixes: &'static [&'static str],
    /// Only match when one of `prefixes` is present (`X'0F'`).
    pub require_prefix: bool,
}

impl QuoteStyle {
    pub const fn delimited(open: char, close: char, escape: Escape) -> Self {
        Self {
            form: QuoteForm::Delimited {
                open,
                close,
                escape,
            },
            prefixes: &[],
            require_prefix: false,
        }
    }

    pub const fn alternative() -> Self {
        Self {
            form: QuoteForm::Alternative,
            prefixes: &[],
            require_prefix: false,
        }
    }

    pub const fn dollar() -> Self {
        Self {
            form: QuoteForm::Dollar,
            prefixes: &[],
            require_prefix: false,
        }
    }

    pub const fn with_prefixes(self, prefixes: &'static [&'static str]) -> Self {
        Self { prefixes, ..self }
    }

    pub const fn prefix_required(self) -> Self {
        Self {
            require_prefix: true,
            ..self
        }
    }
}

/// Characters accepted in identifiers beyond letters, digits and `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentChars {
    pub first: &'static str,
    pub rest: &'static str,
}

impl IdentChars {
    pub const NONE: IdentChars = IdentChars { first: "", rest: "" };

    pub fn is_start(&self, c: char) -> bool {
        c.is_alphabetic() || c == '_' || self.first.contains(c)
    }

    pub fn is_rest(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || self.first.contains(c) || self.rest.contains(c)
    }
}

/// Placeholder syntaxes a dialect accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamTypes {
    /// `?`
    pub positional: bool,
    /// Prefixes followed by digits.
    pub numbered: &'static [char],
    /// Prefixes followed by a name.
    pub named: &'static [char],
    /// Prefixes followed by a double-quoted name.
    pub quoted: &'static [char],
}

impl ParamTypes {
    pub const NONE: ParamTypes = ParamTypes {
        positional: false,
        numbered: &[],
        named: &[],
        quoted: &[],
    };
}

/// The registration record a dialect supplies.
///
/// Template fields use the phrase grammar of [`crate::expand`].
#[derive(Debug, Clone, Copy)]
pub struct DialectSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub reserved_select: &'static [&'static str],
    pub reserved_clauses: &'static [&'static str],
    /// Clauses that always render on a single line. Tokenized as clauses.
    pub oneline_clauses: &'static [&'static str],
    pub reserved_set_operations: &'static [&'static str],
    pub reserved_joins: &'static [&'static str],
    pub reserved_phrases: &'static [&'static str],
    pub reserved_keywords: &'static [&'static str],
    pub reserved_functions: &'static [&'static str],
    pub supports_xor: bool,
    pub string_types: &'static [QuoteStyle],
    pub ident_types: &'static [QuoteStyle],
    pub ident_chars: IdentChars,
    pub param_types: ParamTypes,
    /// Extra characters for named parameters; `None` means "same as
    /// identifiers".
    pub param_chars: Option<IdentChars>,
    /// Regular expressions matched at the current position.
    pub variable_patterns: &'static [&'static str],
    /// Operators on top of the base set.
    pub operators: &'static [&'static str],
    /// Bracket pairs on top of `(` `)`.
    pub brackets: &'static [(char, char)],
    pub line_comments: &'static [&'static str],
    pub always_dense_operators: &'static [&'static str],
    pub post_process: Option<PostProcess>,
}

impl DialectSpec {
    /// Empty spec to build dialects from with struct update syntax.
    pub const BASE: DialectSpec = DialectSpec {
        name: "",
        aliases: &[],
        reserved_select: &[],
        reserved_clauses: &[],
        oneline_clauses: &[],
        reserved_set_operations: &[],
        reserved_joins: &[],
        reserved_phrases: &[],
        reserved_keywords: &[],
        reserved_functions: &[],
        supports_xor: false,
        string_types: &[],
        ident_types: &[],
        ident_chars: IdentChars::NONE,
        param_types: ParamTypes::NONE,
        param_chars: None,
        variable_patterns: &[],
        operators: &[],
        brackets: &[],
        line_comments: &["--"],
        always_dense_operators: &[],
        post_process: None,
    };

    fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

static DIALECTS: [&DialectSpec; 3] = [&sql::SQL, &plsql::PLSQL, &postgresql::POSTGRESQL];

/// Find a registered dialect by name or alias, case-insensitively.
pub fn lookup(name: &str) -> Option<&'static DialectSpec> {
    DIALECTS.iter().copied().find(|d| d.answers_to(name.trim()))
}

/// Canonical names of all registered dialects.
pub fn names() -> Vec<&'static str> {
    DIALECTS.iter().map(|d| d.name).collect()
}

/// Look up and build a dialect configuration.
pub fn load(name: &str) -> Result<Arc<DialectConfig>, ConfigError> {
    let spec = lookup(name).ok_or_else(|| ConfigError::UnknownDialect(name.to_string()))?;
    Ok(Arc::new(DialectConfig::build(spec)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_alias() {
        assert_eq!(lookup("sql").unwrap().name, "sql");
        assert_eq!(lookup("PLSQL").unwrap().name, "plsql");
        assert_eq!(lookup("oracle").unwrap().name, "plsql");
        assert_eq!(lookup("postgres").unwrap().name, "postgresql");
        assert!(lookup("cobol").is_none());
    }

    #[test]
    fn test_every_registered_dialect_builds() {
        for name in names() {
            let config = load(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(config.name(), name);
        }
    }

    #[test]
    fn test_unknown_dialect_error() {
        match load("cobol") {
            Err(ConfigError::UnknownDialect(name)) => assert_eq!(name, "cobol"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_ident_chars() {
        let chars = IdentChars {
            first: "",
            rest: "$#",
        };
        assert!(chars.is_start('a'));
        assert!(chars.is_start('_'));
        assert!(!chars.is_start('$'));
        assert!(chars.is_rest('$'));
        assert!(chars.is_rest('9'));
        assert!(!chars.is_rest('-'));
    }
}
