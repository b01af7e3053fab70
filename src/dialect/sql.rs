//! Standard SQL.

use super::{DialectSpec, Escape, ParamTypes, QuoteStyle};

const STRING_TYPES: &[QuoteStyle] = &[
    QuoteStyle::delimited('\'', '\'', Escape::DoubledOrBackslash).with_prefixes(&["N", "U&"]),
    QuoteStyle::delimited('\'', '\'', Escape::Raw)
        .with_prefixes(&["X"])
        .prefix_required(),
];

const IDENT_TYPES: &[QuoteStyle] = &[
    QuoteStyle::delimited('"', '"', Escape::Doubled),
    QuoteStyle::delimited('`', '`', Escape::Doubled),
];

pub static SQL: DialectSpec = DialectSpec {
    name: "sql",
    aliases: &["ansi", "standard"],
    reserved_select: &["SELECT [ALL | DISTINCT]"],
    reserved_clauses: &[
        "WITH [RECURSIVE]",
        "FROM",
        "WHERE",
        "GROUP BY [ALL | DISTINCT]",
        "HAVING",
        "WINDOW",
        "PARTITION BY",
        "ORDER BY",
        "LIMIT",
        "OFFSET",
        "FETCH {FIRST | NEXT}",
        "INSERT INTO",
        "VALUES",
        "UPDATE",
        "SET",
        "WHERE CURRENT OF",
        "DELETE FROM",
        "CREATE [RECURSIVE] VIEW",
        "CREATE [GLOBAL TEMPORARY | LOCAL TEMPORARY] TABLE",
        "DROP TABLE",
        "ALTER TABLE",
        "ADD COLUMN",
        "DROP [COLUMN]",
        "RENAME COLUMN",
        "RENAME TO",
        "ALTER [COLUMN]",
        // alter column
        "{SET | DROP} DEFAULT",
        "ADD SCOPE",
        "DROP SCOPE {CASCADE | RESTRICT}",
        "RESTART WITH",
    ],
    oneline_clauses: &["TRUNCATE TABLE", "SET SCHEMA"],
    reserved_set_operations: &[
        "UNION [ALL | DISTINCT]",
        "EXCEPT [ALL | DISTINCT]",
        "INTERSECT [ALL | DISTINCT]",
    ],
    reserved_joins: &[
        "JOIN",
        "{LEFT | RIGHT | FULL} [OUTER] JOIN",
        "{INNER | CROSS} JOIN",
        "NATURAL [INNER] JOIN",
        "NATURAL {LEFT | RIGHT | FULL} [OUTER] JOIN",
    ],
    reserved_phrases: &[
        "ON {UPDATE | DELETE} [SET NULL | SET DEFAULT]",
        "{ROWS | RANGE} BETWEEN",
    ],
    reserved_keywords: KEYWORDS,
    reserved_functions: FUNCTIONS,
    string_types: STRING_TYPES,
    ident_types: IDENT_TYPES,
    param_types: ParamTypes {
        positional: true,
        ..ParamTypes::NONE
    },
    operators: &["||"],
    ..DialectSpec::BASE
};

const KEYWORDS: &[&str] = &[
    "ALL", "ALLOCATE", "ALTER", "AND", "ANY", "ARE", "ARRAY", "AS", "ASC", "ASENSITIVE",
    "ASYMMETRIC", "AT", "ATOMIC", "AUTHORIZATION", "BEGIN", "BETWEEN", "BIGINT", "BINARY", "BLOB",
    "BOOLEAN", "BOTH", "BY", "CALL", "CALLED", "CASCADE", "CASCADED", "CASE", "CAST", "CHAR",
    "CHARACTER", "CHECK", "CLOB", "CLOSE", "COLLATE", "COLUMN", "COMMIT", "CONDITION",
    "CONNECT", "CONSTRAINT", "CORRESPONDING", "CREATE", "CROSS", "CUBE", "CURRENT",
    "CURRENT_DATE", "CURRENT_ROLE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER",
    "CURSOR", "CYCLE", "DATE", "DAY", "DEALLOCATE", "DEC", "DECIMAL", "DECLARE", "DEFAULT",
    "DELETE", "DEREF", "DESC", "DESCRIBE", "DETERMINISTIC", "DISCONNECT", "DISTINCT", "DOUBLE",
    "DROP", "DYNAMIC", "EACH", "ELEMENT", "ELSE", "END", "ESCAPE", "EXCEPT", "EXEC", "EXECUTE",
    "EXISTS", "EXTERNAL", "FALSE", "FETCH", "FILTER", "FLOAT", "FOR", "FOREIGN", "FREE", "FROM",
    "FULL", "FUNCTION", "GET", "GLOBAL", "GRANT", "GROUP", "GROUPING", "HAVING", "HOLD", "HOUR",
    "IDENTITY", "IN", "INDICATOR", "INNER", "INOUT", "INSENSITIVE", "INSERT", "INT", "INTEGER",
    "INTERSECT", "INTERVAL", "INTO", "IS", "JOIN", "KEY", "LANGUAGE", "LARGE", "LATERAL",
    "LEADING", "LEFT", "LIKE", "LOCAL", "LOCALTIME", "LOCALTIMESTAMP", "MATCH", "MEMBER",
    "MERGE", "METHOD", "MINUTE", "MODIFIES", "MODULE", "MONTH", "MULTISET", "NATIONAL",
    "NATURAL", "NCHAR", "NCLOB", "NEW", "NO", "NONE", "NOT", "NULL", "NULLS", "NUMERIC", "OF",
    "OLD", "ON", "ONLY", "OPEN", "OR", "ORDER", "OUT", "OUTER", "OVER", "OVERLAPS", "PARAMETER",
    "PARTITION", "PRECISION", "PREPARE", "PRIMARY", "PROCEDURE", "RANGE", "READS", "REAL",
    "RECURSIVE", "REF", "REFERENCES", "REFERENCING", "RELEASE", "RETURN", "RETURNS", "REVOKE",
    "RIGHT", "ROLLBACK", "ROLLUP", "ROW", "ROWS", "SAVEPOINT", "SCOPE", "SCROLL", "SEARCH",
    "SECOND", "SELECT", "SENSITIVE", "SESSION_USER", "SET", "SIMILAR", "SMALLINT", "SOME",
    "SPECIFIC", "SQL", "SQLEXCEPTION", "SQLSTATE", "SQLWARNING", "START", "STATIC", "SUBMULTISET",
    "SYMMETRIC", "SYSTEM", "SYSTEM_USER", "TABLE", "THEN", "TIME", "TIMESTAMP", "TIMEZONE_HOUR",
    "TIMEZONE_MINUTE", "TO", "TRAILING", "TRANSLATION", "TREAT", "TRIGGER", "TRUE", "UESCAPE",
    "UNION", "UNIQUE", "UNKNOWN", "UNNEST", "UPDATE", "USING", "VARCHAR", "VARYING", "VIEW",
    "WHEN", "WHENEVER", "WHERE", "WINDOW", "WITH", "WITHIN", "WITHOUT", "YEAR",
];

const FUNCTIONS: &[&str] = &[
    // numeric
    "ABS", "CEIL", "CEILING", "EXP", "FLOOR", "LN", "MOD", "POWER", "SQRT", "WIDTH_BUCKET",
    // string
    "CHAR_LENGTH", "CHARACTER_LENGTH", "LOWER", "OCTET_LENGTH", "OVERLAY", "POSITION",
    "SUBSTRING", "TRIM", "UPPER",
    // conversion and conditional
    "CAST", "COALESCE", "CONVERT", "EXTRACT", "NULLIF", "TRANSLATE",
    // aggregate
    "AVG", "COLLECT", "COUNT", "CORR", "COVAR_POP", "COVAR_SAMP", "FUSION", "INTERSECTION",
    "MAX", "MIN", "PERCENTILE_CONT", "PERCENTILE_DISC", "STDDEV_POP", "STDDEV_SAMP", "SUM",
    "VAR_POP", "VAR_SAMP",
    // window
    "CUME_DIST", "DENSE_RANK", "PERCENT_RANK", "RANK", "ROW_NUMBER",
    // non-standard but everywhere
    "ROUND", "LENGTH", "CONCAT", "REPLACE", "GREATEST", "LEAST", "LAG", "LEAD",
];
