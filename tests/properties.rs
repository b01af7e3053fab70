//! Property-based tests for the tokenizer and the layout engine.
//!
//! - tokenization is lossless for any input the tokenizer accepts
//! - formatting is idempotent on generated SQL in every dialect
//! - formatting keeps every significant token

use proptest::prelude::*;
use sqlshape::lexer::{reconstruct, Tokenizer};
use sqlshape::{
    dialect, layout, CommaPosition, FormatOptions, Formatter, ItemLayout, LetterCase, TokenKind,
};

/// Identifiers that no dialect reserves.
fn ident() -> impl Strategy<Value = String> {
    "c_[a-z0-9]{1,6}"
}

/// Literals and parameters the named dialect knows how to scan.
fn dialect_leaf(name: &'static str) -> BoxedStrategy<String> {
    match name {
        "plsql" => prop_oneof![
            "[0-9]{1,2}".prop_map(|n| format!(":{n}")),
            ident().prop_map(|c| format!(":{c}")),
            "[a-z ']{0,4}".prop_map(|s| format!("q'[{s}]'")),
            ident().prop_map(|c| format!("&&{c}")),
            (ident(), ident()).prop_map(|(a, b)| format!("{a}@{b}")),
        ]
        .boxed(),
        "postgresql" => prop_oneof![
            "[1-9]".prop_map(|n| format!("${n}")),
            "[a-z ']{0,4}".prop_map(|s| format!("$${s}$$")),
            (ident(), prop::sample::select(vec!["int", "text", "numeric"]))
                .prop_map(|(c, t)| format!("{c}::{t}")),
        ]
        .boxed(),
        _ => Just("?".to_string()).boxed(),
    }
}

/// Binary operators, including ones only the named dialect has.
fn operators(name: &'static str) -> Vec<&'static str> {
    let mut ops = vec!["+", "-", "*", "/", "=", "<>", "<=", ">=", "||"];
    match name {
        "plsql" => ops.extend(["**", "@"]),
        "postgresql" => ops.extend(["::", "->>", "@>", "~~", "#"]),
        _ => {}
    }
    ops
}

/// A character the named dialect has no token for, placed where it borders
/// that dialect's dense operators.
fn unknown(name: &'static str) -> &'static str {
    match name {
        "postgresql" => ":",
        _ => "!",
    }
}

fn leaf(name: &'static str) -> impl Strategy<Value = String> {
    prop_oneof![
        3 => ident(),
        1 => "[0-9]{1,4}",
        1 => "[0-9]{1,3}\\.[0-9]{1,2}",
        1 => "'[a-z ]{0,6}'",
        2 => dialect_leaf(name),
        1 => (ident(), ident()).prop_map(|(t, c)| format!("{t}.{c}")),
    ]
}

fn expr(name: &'static str) -> impl Strategy<Value = String> {
    leaf(name).prop_recursive(3, 24, 3, move |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(operators(name)), inner.clone())
                .prop_map(|(a, op, b)| format!("{a} {op} {b}")),
            (inner.clone(), inner.clone())
                .prop_map(move |(a, b)| format!("{a} {} {b}", unknown(name))),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| if e.starts_with('-') {
                format!("-({e})")
            } else {
                format!("-{e}")
            }),
            inner.clone().prop_map(|e| format!("/* note */ {e}")),
            (
                prop::sample::select(vec!["upper", "lower", "coalesce", "abs"]),
                prop::collection::vec(inner.clone(), 1..3)
            )
                .prop_map(|(f, args)| format!("{f}({})", args.join(", "))),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(a, b, c)| format!("{a} between {b} and {c}")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(w, t, e)| format!("case when {w} then {t} else {e} end")),
            (inner.clone(), prop::sample::select(vec!["and", "or"]), inner)
                .prop_map(|(a, op, b)| format!("{a} {op} {b}")),
        ]
    })
}

fn select_core(name: &'static str) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(expr(name), 1..4),
        any::<bool>(),
        ident(),
        prop::option::of(ident()),
        prop::option::of(expr(name)),
    )
        .prop_map(|(columns, noted, table, joined, filter)| {
            // A trailing line comment after each comma when `noted`.
            let separator = if noted { ", -- more\n" } else { ", " };
            let mut sql = format!("select {} from {}", columns.join(separator), table);
            if let Some(other) = joined {
                sql.push_str(&format!(" left join {other} on {table}.id = {other}.id"));
            }
            if let Some(filter) = filter {
                sql.push_str(" where ");
                sql.push_str(&filter);
            }
            sql
        })
}

fn statement(name: &'static str) -> impl Strategy<Value = String> {
    prop_oneof![
        select_core(name),
        (select_core(name), select_core(name))
            .prop_map(|(a, b)| format!("{a} union all {b}")),
        (select_core(name), select_core(name), select_core(name))
            .prop_map(|(a, b, c)| format!("({a}) union ({b}) union all {c}")),
        (prop::collection::vec(expr(name), 1..3), select_core(name), select_core(name))
            .prop_map(|(columns, a, b)| {
                format!("select {} from ({a} union {b}) c_sub", columns.join(", "))
            }),
        (select_core(name), prop::collection::vec(ident(), 1..3))
            .prop_map(|(core, order)| format!("{core} order by {}", order.join(", "))),
    ]
}

fn script(name: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(statement(name), 1..3).prop_map(|statements| statements.join(";\n"))
}

/// A dialect together with a script written for it.
fn dialect_script() -> impl Strategy<Value = (&'static str, String)> {
    prop::sample::select(dialect::names()).prop_flat_map(|name| (Just(name), script(name)))
}

fn options() -> impl Strategy<Value = FormatOptions> {
    (
        20usize..100,
        0usize..5,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::sample::select(vec![LetterCase::Upper, LetterCase::Lower, LetterCase::Preserve]),
    )
        .prop_map(|(width, indent, before, fit, dense, keyword_case)| FormatOptions {
            max_line_width: width,
            indent_size: indent,
            comma_position: if before {
                CommaPosition::Before
            } else {
                CommaPosition::After
            },
            item_layout: if fit {
                ItemLayout::FitWidth
            } else {
                ItemLayout::Expanded
            },
            dense_operators: dense,
            keyword_case,
            ..Default::default()
        })
}

/// Kind and normalized text of every non-whitespace token.
fn significant(formatter: &Formatter, sql: &str) -> Vec<(TokenKind, String)> {
    formatter
        .tokenize(sql)
        .unwrap()
        .into_iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .map(|t| (t.kind, t.text))
        .collect()
}

proptest! {
    #[test]
    fn test_tokens_reconstruct_arbitrary_input(
        input in "\\PC{0,64}",
        name in prop::sample::select(dialect::names()),
    ) {
        let config = dialect::load(name).unwrap();
        if let Ok(tokens) = Tokenizer::new(&config).tokenize(&input) {
            prop_assert_eq!(reconstruct(&tokens), input);
        }
    }

    #[test]
    fn test_tokens_reconstruct_sql_like_input(
        input in "[a-zA-Z0-9 '\"`$:@&#?qQnNeE\\[\\](){}.,;*/+<>=!|~^%\n\t-]{0,80}",
        name in prop::sample::select(dialect::names()),
    ) {
        let config = dialect::load(name).unwrap();
        if let Ok(tokens) = Tokenizer::new(&config).tokenize(&input) {
            prop_assert_eq!(reconstruct(&tokens), input.clone());
            // Layout accepts anything the tokenizer produced.
            let _ = layout::format(&tokens, &config, &FormatOptions::default());
        }
    }

    #[test]
    fn test_format_is_idempotent((name, sql) in dialect_script(), options in options()) {
        let formatter = Formatter::new(name, options).unwrap();
        let once = formatter.format(&sql).unwrap();
        let twice = formatter.format(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_format_keeps_tokens((name, sql) in dialect_script(), options in options()) {
        let formatter = Formatter::new(name, options).unwrap();
        let formatted = formatter.format(&sql).unwrap();
        prop_assert_eq!(significant(&formatter, &sql), significant(&formatter, &formatted));
    }
}
