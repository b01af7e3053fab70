//! Reserved-phrase template expansion.
//!
//! Dialects describe multi-word keywords with a small grammar:
//!
//! ```text
//! CREATE [OR REPLACE] {TABLE | VIEW}
//! ```
//!
//! `[...]` is an optional group, `{...}` a required choice, `|` separates
//! alternatives and groups nest. The template above expands to
//! `CREATE TABLE`, `CREATE VIEW`, `CREATE OR REPLACE TABLE` and
//! `CREATE OR REPLACE VIEW`, in that order.

use indexmap::IndexSet;

use crate::error::ConfigError;

/// Deepest group nesting accepted in a single template.
pub const MAX_NESTING: usize = 8;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Word(String),
    Group {
        optional: bool,
        alternatives: Vec<Vec<Node>>,
    },
}

/// Expand a list of templates into concrete phrases, words joined by a single
/// space. Order is first-seen across the whole list and duplicates are
/// dropped.
pub fn expand_phrases<S: AsRef<str>>(templates: &[S]) -> Result<Vec<String>, ConfigError> {
    let mut phrases: IndexSet<String> = IndexSet::new();
    for template in templates {
        for words in expand_template(template.as_ref())? {
            if !words.is_empty() {
                phrases.insert(words.join(" "));
            }
        }
    }
    Ok(phrases.into_iter().collect())
}

/// Expand one template into its word sequences (possibly including the empty
/// sequence when every part is optional).
pub fn expand_template(template: &str) -> Result<Vec<Vec<String>>, ConfigError> {
    let nodes = TemplateParser::new(template).parse()?;
    Ok(expand_sequence(&nodes))
}

fn expand_sequence(nodes: &[Node]) -> Vec<Vec<String>> {
    let mut results: Vec<Vec<String>> = vec![Vec::new()];
    for node in nodes {
        let variants = expand_node(node);
        let mut next = Vec::with_capacity(results.len() * variants.len());
        for prefix in &results {
            for variant in &variants {
                let mut words = prefix.clone();
                words.extend(variant.iter().cloned());
                next.push(words);
            }
        }
        results = next;
    }
    results
}

fn expand_node(node: &Node) -> Vec<Vec<String>> {
    match node {
        Node::Word(word) => vec![vec![word.clone()]],
        Node::Group {
            optional,
            alternatives,
        } => {
            let mut variants = Vec::new();
            if *optional {
                variants.push(Vec::new());
            }
            for alternative in alternatives {
                variants.extend(expand_sequence(alternative));
            }
            variants
        }
    }
}

/// Recursive-descent parser over a single template.
struct TemplateParser<'a> {
    template: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    fn new(template: &'a str) -> Self {
        Self { template, pos: 0 }
    }

    fn parse(mut self) -> Result<Vec<Node>, ConfigError> {
        let nodes = self.sequence(0)?;
        match self.peek() {
            None => Ok(nodes),
            Some('|') => Err(self.error("`|` outside of a group")),
            Some(c) => Err(self.error(format!("unexpected `{}`", c))),
        }
    }

    fn peek(&self) -> Option<char> {
        self.template[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::malformed(self.template, self.pos, reason)
    }

    /// Read nodes until a `|`, a closer, or end of input (none of which are
    /// consumed).
    fn sequence(&mut self, depth: usize) -> Result<Vec<Node>, ConfigError> {
        let mut nodes = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '[' | '{' => nodes.push(self.group(depth + 1)?),
                ']' | '}' | '|' => break,
                c if c.is_whitespace() => {
                    self.bump();
                }
                _ => nodes.push(Node::Word(self.word())),
            }
        }
        Ok(nodes)
    }

    fn word(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '[' | ']' | '{' | '}' | '|') {
                break;
            }
            self.bump();
        }
        self.template[start..self.pos].to_string()
    }

    fn group(&mut self, depth: usize) -> Result<Node, ConfigError> {
        if depth > MAX_NESTING {
            return Err(ConfigError::NestingTooDeep {
                template: self.template.to_string(),
                limit: MAX_NESTING,
            });
        }
        let open_at = self.pos;
        let optional = self.bump() == Some('[');
        let closer = if optional { ']' } else { '}' };

        let mut alternatives = Vec::new();
        loop {
            let alternative = self.sequence(depth)?;
            if alternative.is_empty() {
                return Err(self.error("empty alternative"));
            }
            alternatives.push(alternative);
            match self.bump() {
                Some('|') => continue,
                Some(c) if c == closer => break,
                Some(c) => {
                    self.pos -= c.len_utf8();
                    return Err(self.error(format!("expected `{}`, found `{}`", closer, c)));
                }
                None => {
                    return Err(ConfigError::malformed(
                        self.template,
                        open_at,
                        format!("unclosed group, expected `{}`", closer),
                    ))
                }
            }
        }

        Ok(Node::Group {
            optional,
            alternatives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(template: &str) -> Vec<String> {
        expand_phrases(&[template]).unwrap()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(expand("GROUP   BY"), vec!["GROUP BY"]);
    }

    #[test]
    fn test_optional_group_absent_first() {
        assert_eq!(
            expand("GROUP BY [ALL | DISTINCT]"),
            vec!["GROUP BY", "GROUP BY ALL", "GROUP BY DISTINCT"]
        );
    }

    #[test]
    fn test_required_choice() {
        assert_eq!(expand("FETCH {FIRST | NEXT}"), vec!["FETCH FIRST", "FETCH NEXT"]);
    }

    #[test]
    fn test_choice_then_optional() {
        assert_eq!(
            expand("{LEFT | RIGHT} [OUTER] JOIN"),
            vec!["LEFT JOIN", "LEFT OUTER JOIN", "RIGHT JOIN", "RIGHT OUTER JOIN"]
        );
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            expand("ON {UPDATE | DELETE} [SET {NULL | DEFAULT}]"),
            vec![
                "ON UPDATE",
                "ON UPDATE SET NULL",
                "ON UPDATE SET DEFAULT",
                "ON DELETE",
                "ON DELETE SET NULL",
                "ON DELETE SET DEFAULT",
            ]
        );
    }

    #[test]
    fn test_multi_word_alternatives() {
        assert_eq!(
            expand("CREATE [GLOBAL TEMPORARY | LOCAL TEMPORARY] TABLE"),
            vec![
                "CREATE TABLE",
                "CREATE GLOBAL TEMPORARY TABLE",
                "CREATE LOCAL TEMPORARY TABLE",
            ]
        );
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let phrases = expand_phrases(&["DROP [COLUMN]", "DROP TABLE", "DROP"]).unwrap();
        assert_eq!(phrases, vec!["DROP", "DROP COLUMN", "DROP TABLE"]);
    }

    #[test]
    fn test_duplicate_alternatives_collapse() {
        assert_eq!(expand("{A | A} B"), vec!["A B"]);
    }

    #[test]
    fn test_fully_optional_template_drops_empty_phrase() {
        assert_eq!(expand("[ONLY]"), vec!["ONLY"]);
    }

    #[test]
    fn test_unclosed_group_is_error() {
        let err = expand_phrases(&["UNION [ALL"]).unwrap_err();
        match err {
            ConfigError::MalformedTemplate { offset, .. } => assert_eq!(offset, 6),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_closer_is_error() {
        let err = expand_phrases(&["UNION [ALL}"]).unwrap_err();
        match err {
            ConfigError::MalformedTemplate { offset, reason, .. } => {
                assert_eq!(offset, 10);
                assert!(reason.contains("expected `]`"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_stray_closer_is_error() {
        assert!(expand_phrases(&["ORDER BY]"]).is_err());
    }

    #[test]
    fn test_top_level_pipe_is_error() {
        assert!(expand_phrases(&["ASC | DESC"]).is_err());
    }

    #[test]
    fn test_empty_alternative_is_error() {
        assert!(expand_phrases(&["SET {NULL | }"]).is_err());
        assert!(expand_phrases(&["SET []"]).is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}X{}", "[".repeat(MAX_NESTING + 1), "]".repeat(MAX_NESTING + 1));
        assert!(matches!(
            expand_phrases(&[deep.as_str()]),
            Err(ConfigError::NestingTooDeep { .. })
        ));
        let ok = format!("{}X{}", "[".repeat(MAX_NESTING), "]".repeat(MAX_NESTING));
        assert_eq!(expand_phrases(&[ok.as_str()]).unwrap(), vec!["X"]);
    }
}
