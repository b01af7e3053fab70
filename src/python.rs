//! Optional Python bindings via PyO3, enabled with the `python` feature.
//!
//! ```python
//! import sqlshape
//!
//! print(sqlshape.format_sql("select id,name from users where age>18"))
//! print(sqlshape.format_sql("select :id from dual", dialect="oracle", keyword_case="lower"))
//! print(sqlshape.tokenize("select 1", dialect="postgresql"))
//! print(sqlshape.dialects())
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{FormatOptions, LetterCase};
use crate::Formatter;

fn formatter(dialect: &str, options: FormatOptions) -> PyResult<Formatter> {
    Formatter::new(dialect, options).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Format SQL text.
///
/// Args:
///     sql: SQL source, one or more statements.
///     dialect: Dialect name or alias.
///     indent_size: Spaces per indentation level.
///     max_line_width: Width used to decide whether groups stay inline.
///     keyword_case: "upper", "lower" or "preserve".
///
/// Raises:
///     ValueError: On an unknown dialect, an invalid option, or an
///         unterminated string, quoted identifier or comment.
#[pyfunction]
#[pyo3(signature = (sql, dialect = "sql", indent_size = 2, max_line_width = 80, keyword_case = "upper"))]
fn format_sql(
    sql: &str,
    dialect: &str,
    indent_size: usize,
    max_line_width: usize,
    keyword_case: &str,
) -> PyResult<String> {
    let keyword_case: LetterCase = keyword_case.parse().map_err(PyValueError::new_err)?;
    let options = FormatOptions {
        indent_size,
        max_line_width,
        keyword_case,
        ..Default::default()
    };
    formatter(dialect, options)?
        .format(sql)
        .map_err(|e| PyValueError::new_err(e.render(sql)))
}

/// Split SQL text into `(kind, text, offset)` tuples, whitespace included.
#[pyfunction]
#[pyo3(signature = (sql, dialect = "sql"))]
fn tokenize(sql: &str, dialect: &str) -> PyResult<Vec<(String, String, usize)>> {
    let tokens = formatter(dialect, FormatOptions::default())?
        .tokenize(sql)
        .map_err(|e| PyValueError::new_err(e.render(sql)))?;
    Ok(tokens
        .into_iter()
        .map(|t| (format!("{:?}", t.kind), t.raw, t.offset))
        .collect())
}

/// Canonical names of the available dialects.
#[pyfunction]
fn dialects() -> Vec<&'static str> {
    crate::dialect::names()
}

#[pymodule]
fn _sqlshape(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(format_sql, m)?)?;
    m.add_function(wrap_pyfunction!(tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(dialects, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
