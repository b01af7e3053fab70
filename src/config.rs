use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where commas go when a list is broken over several lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CommaPosition {
    /// `a,\n  b`
    #[default]
    After,
    /// `a\n  , b`
    Before,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LetterCase {
    #[default]
    Preserve,
    Upper,
    Lower,
}

impl LetterCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            LetterCase::Preserve => text.to_string(),
            LetterCase::Upper => text.to_uppercase(),
            LetterCase::Lower => text.to_lowercase(),
        }
    }
}

/// How the items of an (expanded) clause are laid out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ItemLayout {
    /// One item per line.
    #[default]
    Expanded,
    /// All items on one line when they fit in `max_line_width`, otherwise one
    /// per line.
    FitWidth,
}

macro_rules! parse_kebab {
    ($ty:ty { $($name:literal => $variant:path),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(format!(
                        "unknown value {:?}, expected one of: {}",
                        other,
                        [$($name),+].join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $($variant => $name,)+
                };
                f.write_str(name)
            }
        }
    };
}

parse_kebab!(CommaPosition {
    "after" => CommaPosition::After,
    "before" => CommaPosition::Before,
});

parse_kebab!(LetterCase {
    "preserve" => LetterCase::Preserve,
    "upper" => LetterCase::Upper,
    "lower" => LetterCase::Lower,
});

parse_kebab!(ItemLayout {
    "expanded" => ItemLayout::Expanded,
    "fit-width" => ItemLayout::FitWidth,
});

/// User-facing layout options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    pub max_line_width: usize,
    /// Spaces per indentation level (also the display width of a tab).
    pub indent_size: usize,
    pub use_tabs: bool,
    pub comma_position: CommaPosition,
    /// Applies to every reserved word, function names included.
    pub keyword_case: LetterCase,
    /// Applies to unquoted identifiers only.
    pub identifier_case: LetterCase,
    pub item_layout: ItemLayout,
    /// Blank lines between `;`-terminated statements.
    pub lines_between_statements: usize,
    /// Render every operator without surrounding spaces.
    pub dense_operators: bool,
    pub newline_before_semicolon: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_line_width: 80,
            indent_size: 2,
            use_tabs: false,
            comma_position: CommaPosition::After,
            keyword_case: LetterCase::Upper,
            identifier_case: LetterCase::Preserve,
            item_layout: ItemLayout::Expanded,
            lines_between_statements: 1,
            dense_operators: false,
            newline_before_semicolon: false,
        }
    }
}

const MAX_INDENT_SIZE: usize = 16;
const MAX_BLANK_LINES: usize = 8;

impl FormatOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_width == 0 {
            return Err(ConfigError::InvalidOption {
                name: "max_line_width",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.indent_size > MAX_INDENT_SIZE {
            return Err(ConfigError::InvalidOption {
                name: "indent_size",
                reason: format!("must be at most {}", MAX_INDENT_SIZE),
            });
        }
        if self.lines_between_statements > MAX_BLANK_LINES {
            return Err(ConfigError::InvalidOption {
                name: "lines_between_statements",
                reason: format!("must be at most {}", MAX_BLANK_LINES),
            });
        }
        Ok(())
    }

    /// The string written for one indentation level.
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_size)
        }
    }
}

/// Contents of `config.toml`.
///
/// ```toml
/// dialect = "postgresql"
///
/// [format]
/// max_line_width = 100
/// keyword_case = "lower"
/// comma_position = "before"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub dialect: Option<String>,
    pub format: FormatOptions,
}

impl ConfigFile {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sqlshape")
            .join("config.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        config.format.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load the default config file, or defaults if it does not exist.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        tracing::debug!(path = %path.display(), "loading config file");
        Self::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FormatOptions::default();
        assert_eq!(options.max_line_width, 80);
        assert_eq!(options.indent_size, 2);
        assert_eq!(options.keyword_case, LetterCase::Upper);
        assert_eq!(options.identifier_case, LetterCase::Preserve);
        assert_eq!(options.indent_unit(), "  ");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = ConfigFile::from_toml(
            r#"
dialect = "plsql"

[format]
indent_size = 4
comma_position = "before"
keyword_case = "lower"
item_layout = "fit-width"
"#,
        )
        .unwrap();
        assert_eq!(config.dialect.as_deref(), Some("plsql"));
        assert_eq!(config.format.indent_size, 4);
        assert_eq!(config.format.comma_position, CommaPosition::Before);
        assert_eq!(config.format.keyword_case, LetterCase::Lower);
        assert_eq!(config.format.item_layout, ItemLayout::FitWidth);
        assert_eq!(config.format.max_line_width, 80);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ConfigFile::from_toml("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConfigFile::from_toml("[format]\nindent = 4\n").is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = ConfigFile::from_toml("[format]\nmax_line_width = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_line_width"));
    }

    #[test]
    fn test_tabs() {
        let options = FormatOptions {
            use_tabs: true,
            ..Default::default()
        };
        assert_eq!(options.indent_unit(), "\t");
    }

    #[test]
    fn test_enum_from_str_and_display() {
        assert_eq!("Before".parse::<CommaPosition>().unwrap(), CommaPosition::Before);
        assert_eq!("fit-width".parse::<ItemLayout>().unwrap(), ItemLayout::FitWidth);
        assert!("sideways".parse::<CommaPosition>().is_err());
        assert_eq!(LetterCase::Lower.to_string(), "lower");
        assert_eq!(LetterCase::Upper.apply("Select"), "SELECT");
    }
}
