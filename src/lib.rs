//! Dialect-aware SQL formatter.
//!
//! ```
//! use sqlshape::{FormatOptions, Formatter};
//!
//! let formatter = Formatter::new("sql", FormatOptions::default()).unwrap();
//! let out = formatter.format("select a,b from t where x=1 and y=2").unwrap();
//! assert_eq!(out, "SELECT\n  a,\n  b\nFROM\n  t\nWHERE\n  x = 1\n  AND y = 2");
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod expand;
pub mod layout;
pub mod lexer;

#[cfg(feature = "python")]
pub mod python;

use std::sync::Arc;

pub use config::{CommaPosition, ConfigFile, FormatOptions, ItemLayout, LetterCase};
pub use dialect::DialectConfig;
pub use error::{ConfigError, FormatError, TokenizeError};
pub use lexer::{Token, TokenKind};

/// A dialect configuration paired with layout options.
///
/// Cheap to clone; the dialect configuration is shared.
#[derive(Debug, Clone)]
pub struct Formatter {
    dialect: Arc<DialectConfig>,
    options: FormatOptions,
}

impl Formatter {
    pub fn new(dialect: &str, options: FormatOptions) -> Result<Self, ConfigError> {
        Self::with_dialect(dialect::load(dialect)?, options)
    }

    /// Build from an already constructed dialect configuration.
    pub fn with_dialect(
        dialect: Arc<DialectConfig>,
        options: FormatOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self { dialect, options })
    }

    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn tokenize(&self, sql: &str) -> Result<Vec<Token>, TokenizeError> {
        lexer::Tokenizer::new(&self.dialect).tokenize(sql)
    }

    pub fn format(&self, sql: &str) -> Result<String, TokenizeError> {
        let tokens = self.tokenize(sql)?;
        Ok(layout::format(&tokens, &self.dialect, &self.options))
    }
}

/// Format `sql` in one call.
pub fn format(sql: &str, dialect: &str, options: &FormatOptions) -> Result<String, FormatError> {
    let formatter = Formatter::new(dialect, options.clone())?;
    Ok(formatter.format(sql)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_shares_dialect() {
        let formatter = Formatter::new("postgres", FormatOptions::default()).unwrap();
        let copy = formatter.clone();
        assert!(Arc::ptr_eq(&formatter.dialect, &copy.dialect));
        assert_eq!(formatter.dialect().name(), "postgresql");
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = FormatOptions {
            max_line_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            Formatter::new("sql", options),
            Err(ConfigError::InvalidOption { name: "max_line_width", .. })
        ));
    }

    #[test]
    fn test_one_shot_errors() {
        let options = FormatOptions::default();
        assert!(matches!(
            format("select 1", "cobol", &options),
            Err(FormatError::Config(ConfigError::UnknownDialect(_)))
        ));
        assert!(matches!(
            format("select 'oops", "sql", &options),
            Err(FormatError::Tokenize(_))
        ));
    }

    #[test]
    fn test_group_by_all_is_one_token() {
        let formatter = Formatter::new("sql", FormatOptions::default()).unwrap();
        let tokens = formatter.tokenize("group by all x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::ReservedClause);
        assert_eq!(tokens[0].text, "GROUP BY ALL");
    }

    #[test]
    fn test_formatter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Formatter>();
    }
}
