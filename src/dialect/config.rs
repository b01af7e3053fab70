use std::collections::{HashMap, HashSet};

use regex::Regex;

use super::{DialectSpec, IdentChars, ParamTypes, QuoteForm, QuoteStyle};
use crate::error::ConfigError;
use crate::expand::expand_phrases;
use crate::lexer::{PostProcess, TokenKind};

/// Operators every dialect understands.
const BASE_OPERATORS: &[&str] = &["+", "-", "*", "/", "=", "<", ">", "<>", "<=", ">=", "!=", "."];

/// A concrete reserved phrase and the token kind it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    /// Upper-cased words.
    pub words: Vec<String>,
    pub kind: TokenKind,
}

/// Reserved phrases bucketed by their first word.
///
/// Within a bucket entries are ordered longest first; equal lengths keep
/// insertion order, which is class priority and then first-seen order.
#[derive(Debug, Default)]
pub struct PhraseTable {
    by_first_word: HashMap<String, Vec<PhraseEntry>>,
    seen: HashSet<String>,
}

impl PhraseTable {
    fn insert(&mut self, phrase: &str, kind: TokenKind) {
        let phrase = phrase.to_uppercase();
        if !self.seen.insert(phrase.clone()) {
            return;
        }
        let words: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
        let Some(first) = words.first().cloned() else {
            return;
        };
        self.by_first_word
            .entry(first)
            .or_default()
            .push(PhraseEntry { words, kind });
    }

    fn finish(&mut self) {
        for bucket in self.by_first_word.values_mut() {
            bucket.sort_by(|a, b| b.words.len().cmp(&a.words.len()));
        }
    }

    /// Candidate phrases starting with `first_word` (upper-cased).
    pub fn candidates(&self, first_word: &str) -> &[PhraseEntry] {
        self.by_first_word
            .get(first_word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Immutable, fully validated dialect configuration.
#[derive(Debug)]
pub struct DialectConfig {
    name: &'static str,
    pub(crate) phrases: PhraseTable,
    pub(crate) functions: HashSet<String>,
    /// Longest first.
    pub(crate) operators: Vec<String>,
    pub(crate) string_types: &'static [QuoteStyle],
    pub(crate) ident_types: &'static [QuoteStyle],
    pub(crate) ident_chars: IdentChars,
    pub(crate) param_types: ParamTypes,
    pub(crate) param_chars: IdentChars,
    pub(crate) variables: Vec<Regex>,
    /// Open/close pairs, `(`/`)` first.
    pub(crate) brackets: Vec<(char, char)>,
    pub(crate) line_comments: &'static [&'static str],
    pub(crate) post_process: Option<PostProcess>,
    oneline_clauses: HashSet<String>,
    dense_operators: HashSet<String>,
}

impl DialectConfig {
    pub fn build(spec: &DialectSpec) -> Result<Self, ConfigError> {
        let mut phrases = PhraseTable::default();

        let select = expand_phrases(spec.reserved_select)?;
        let clauses = expand_phrases(spec.reserved_clauses)?;
        let oneline = expand_phrases(spec.oneline_clauses)?;
        let set_operations = expand_phrases(spec.reserved_set_operations)?;
        let joins = expand_phrases(spec.reserved_joins)?;
        let reserved_phrases = expand_phrases(spec.reserved_phrases)?;

        let mut logical = vec!["AND", "OR"];
        if spec.supports_xor {
            logical.push("XOR");
        }

        let classes = [
            (select.as_slice(), TokenKind::ReservedSelect),
            (clauses.as_slice(), TokenKind::ReservedClause),
            (oneline.as_slice(), TokenKind::ReservedClause),
            (set_operations.as_slice(), TokenKind::ReservedSetOperation),
            (joins.as_slice(), TokenKind::ReservedJoin),
        ];
        for (class, kind) in classes {
            for phrase in class {
                phrases.insert(phrase, kind);
            }
        }
        for word in &logical {
            phrases.insert(word, TokenKind::LogicalOperator);
        }
        for phrase in &reserved_phrases {
            phrases.insert(phrase, TokenKind::ReservedPhrase);
        }
        for word in spec.reserved_keywords {
            phrases.insert(word, TokenKind::ReservedKeyword);
        }
        phrases.finish();

        let functions = spec
            .reserved_functions
            .iter()
            .map(|f| f.to_uppercase())
            .collect();

        let mut operators: Vec<String> = Vec::new();
        for op in BASE_OPERATORS.iter().chain(spec.operators) {
            if op.is_empty() || op.chars().any(char::is_whitespace) {
                return Err(ConfigError::conflict(
                    spec.name,
                    format!("invalid operator {:?}", op),
                ));
            }
            if !operators.iter().any(|o| o == op) {
                operators.push(op.to_string());
            }
        }
        operators.sort_by(|a, b| b.len().cmp(&a.len()));

        for op in spec.always_dense_operators {
            if !operators.iter().any(|o| o == op) {
                return Err(ConfigError::conflict(
                    spec.name,
                    format!("dense operator {:?} is not an operator of this dialect", op),
                ));
            }
        }

        for style in spec.string_types.iter().chain(spec.ident_types) {
            if style.require_prefix && style.prefixes.is_empty() {
                return Err(ConfigError::conflict(
                    spec.name,
                    "quote style requires a prefix but lists none",
                ));
            }
        }

        let mut brackets = vec![('(', ')')];
        for &(open, close) in spec.brackets {
            let clashes = spec.ident_types.iter().any(|style| {
                matches!(style.form, QuoteForm::Delimited { open: o, .. } if o == open)
            });
            if clashes {
                return Err(ConfigError::conflict(
                    spec.name,
                    format!("`{}` is both a bracket and an identifier quote", open),
                ));
            }
            brackets.push((open, close));
        }

        let params = spec.param_types;
        for &prefix in params.numbered.iter().chain(params.named).chain(params.quoted) {
            if spec.ident_chars.is_start(prefix) {
                return Err(ConfigError::conflict(
                    spec.name,
                    format!("parameter prefix `{}` also starts identifiers", prefix),
                ));
            }
        }

        let variables = spec
            .variable_patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            dialect = spec.name,
            phrases = phrases.len(),
            operators = operators.len(),
            "built dialect configuration"
        );

        Ok(Self {
            name: spec.name,
            phrases,
            functions,
            operators,
            string_types: spec.string_types,
            ident_types: spec.ident_types,
            ident_chars: spec.ident_chars,
            param_types: spec.param_types,
            param_chars: spec.param_chars.unwrap_or(spec.ident_chars),
            variables,
            brackets,
            line_comments: spec.line_comments,
            post_process: spec.post_process,
            oneline_clauses: oneline.iter().map(|c| c.to_uppercase()).collect(),
            dense_operators: spec
                .always_dense_operators
                .iter()
                .map(|op| op.to_string())
                .collect(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a normalized clause keyword always renders on one line.
    pub fn is_oneline_clause(&self, text: &str) -> bool {
        self.oneline_clauses.contains(text)
    }

    pub fn is_always_dense(&self, operator: &str) -> bool {
        self.dense_operators.contains(operator)
    }

    pub fn is_function(&self, upper: &str) -> bool {
        self.functions.contains(upper)
    }

    /// Closing counterpart of an opening bracket.
    pub fn closing_bracket(&self, open: char) -> Option<char> {
        self.brackets
            .iter()
            .find(|(o, _)| *o == open)
            .map(|(_, c)| *c)
    }
}
