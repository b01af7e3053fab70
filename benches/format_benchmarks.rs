//! Benchmarks for the formatting pipeline.
//!
//! Benchmarks cover:
//! - dialect construction (phrase expansion, regex compilation)
//! - tokenization
//! - layout of an already tokenized input
//! - the full text → text path, including many statements
//! - inputs heavy in comments, nesting and long value lists
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sqlshape::{dialect, layout, lexer::Tokenizer, FormatOptions, Formatter, ItemLayout};

// ---------------------------------------------------------------------------
// Inputs, each stressing a different part of the layout engine
// ---------------------------------------------------------------------------

const SHORT_SELECT: &str = "select id, name from accounts where id = ?";

const JOINED_FILTERS: &str = "select a.id, b.total from accounts a \
    left outer join balances b on a.id = b.account_id \
    where a.closed_at is null and (b.total > 0 or b.pending is not null) \
    and a.region not between 3 and 7 \
    order by b.total desc";

const CASE_LADDER: &str = "select case when score >= 90 then 'a' when score >= 80 then 'b' \
    when score >= 70 then 'c' else case when retake then 'r' else 'f' end end as grade \
    from results";

const SET_OPERATIONS: &str = "(select id from accounts where region = 1) \
    union all (select id from archive where region = 1) \
    except select id from blocked";

const PLSQL_BLOCK: &str = "SELECT q'[it's]' AS s, :id, &&var, a@b \
    FROM dual WHERE x ** 2 >= :limit \
    ORDER BY 1";

const POSTGRES_QUERY: &str = "SELECT data->>'name', $1::int, $$body$$ \
    FROM events WHERE tags @> ARRAY['x'] AND id = ANY($2)";

/// Leading, trailing and block comments around almost every item.
fn comment_heavy() -> String {
    let mut sql = String::from("-- report header\nselect\n");
    for i in 0..40 {
        sql.push_str(&format!("  /* col {i} */ c{i}, -- trailing note {i}\n"));
    }
    sql.push_str("  c_last\nfrom /* source */ t -- done\nwhere x = 1");
    sql
}

/// Parentheses nested deeper than any line can hold.
fn nested_parens(depth: usize) -> String {
    let mut expr = String::from("x");
    for i in 0..depth {
        expr = format!("f{i}({expr} + {i})");
    }
    format!("select {expr} from t where ({expr}) > 0")
}

/// An `IN` list long enough to be measured against the line width many times.
fn long_in_list(len: usize) -> String {
    let values: Vec<String> = (0..len).map(|i| format!("'v{i}'")).collect();
    format!("select id from t where code in ({})", values.join(", "))
}

fn cases() -> Vec<(&'static str, String)> {
    vec![
        ("short_select", SHORT_SELECT.to_string()),
        ("joined_filters", JOINED_FILTERS.to_string()),
        ("case_ladder", CASE_LADDER.to_string()),
        ("set_operations", SET_OPERATIONS.to_string()),
        ("comment_heavy", comment_heavy()),
        ("nested_parens", nested_parens(24)),
        ("long_in_list", long_in_list(500)),
    ]
}

// ---------------------------------------------------------------------------
// Benchmark groups
// ---------------------------------------------------------------------------

fn bench_dialect_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialect");

    for name in dialect::names() {
        group.bench_with_input(BenchmarkId::new("load", name), name, |b, name| {
            b.iter(|| dialect::load(black_box(name)).unwrap());
        });
    }

    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    let config = dialect::load("sql").unwrap();
    let tokenizer = Tokenizer::new(&config);
    for (name, sql) in cases() {
        group.bench_with_input(BenchmarkId::new("sql", name), sql.as_str(), |b, sql| {
            b.iter(|| tokenizer.tokenize(black_box(sql)).unwrap());
        });
    }

    let plsql = dialect::load("plsql").unwrap();
    group.bench_function("plsql", |b| {
        b.iter(|| Tokenizer::new(&plsql).tokenize(black_box(PLSQL_BLOCK)).unwrap());
    });

    let postgres = dialect::load("postgresql").unwrap();
    group.bench_function("postgresql", |b| {
        b.iter(|| {
            Tokenizer::new(&postgres)
                .tokenize(black_box(POSTGRES_QUERY))
                .unwrap()
        });
    });

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    let config = dialect::load("sql").unwrap();
    let expanded = FormatOptions::default();
    let fit_width = FormatOptions {
        item_layout: ItemLayout::FitWidth,
        ..Default::default()
    };

    for (name, sql) in cases() {
        let tokens = Tokenizer::new(&config).tokenize(&sql).unwrap();
        group.bench_with_input(BenchmarkId::new("expanded", name), &tokens, |b, tokens| {
            b.iter(|| layout::format(black_box(tokens), &config, &expanded));
        });
        group.bench_with_input(BenchmarkId::new("fit_width", name), &tokens, |b, tokens| {
            b.iter(|| layout::format(black_box(tokens), &config, &fit_width));
        });
    }

    group.finish();
}

fn bench_multi_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_statement");

    let formatter = Formatter::new("sql", FormatOptions::default()).unwrap();
    let script: String = cases()
        .iter()
        .map(|(_, sql)| format!("{};\n", sql))
        .collect::<String>()
        .repeat(25);

    group.bench_function("format_175_statements", |b| {
        b.iter(|| formatter.format(black_box(&script)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dialect_build,
    bench_tokenize,
    bench_layout,
    bench_multi_statement,
);
criterion_main!(benches);
