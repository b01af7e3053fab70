//! PostgreSQL.

use super::{DialectSpec, Escape, IdentChars, ParamTypes, QuoteStyle};

const STRING_TYPES: &[QuoteStyle] = &[
    QuoteStyle::dollar(),
    QuoteStyle::delimited('\'', '\'', Escape::Doubled).with_prefixes(&["U&"]),
    QuoteStyle::delimited('\'', '\'', Escape::DoubledOrBackslash)
        .with_prefixes(&["E"])
        .prefix_required(),
    QuoteStyle::delimited('\'', '\'', Escape::Raw)
        .with_prefixes(&["B", "X"])
        .prefix_required(),
];

const IDENT_TYPES: &[QuoteStyle] =
    &[QuoteStyle::delimited('"', '"', Escape::Doubled).with_prefixes(&["U&"])];

pub static POSTGRESQL: DialectSpec = DialectSpec {
    name: "postgresql",
    aliases: &["postgres", "pg"],
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
        "FOR {UPDATE | NO KEY UPDATE | SHARE | KEY SHARE} [OF]",
        "INSERT INTO",
        "VALUES",
        "DEFAULT VALUES",
        "UPDATE [ONLY]",
        "SET",
        "WHERE CURRENT OF",
        "ON CONFLICT",
        "RETURNING",
        "DELETE FROM [ONLY]",
        "CREATE [OR REPLACE] [TEMP | TEMPORARY] [RECURSIVE] VIEW",
        "CREATE MATERIALIZED VIEW [IF NOT EXISTS]",
        "CREATE [GLOBAL | LOCAL] [TEMPORARY | TEMP | UNLOGGED] TABLE [IF NOT EXISTS]",
        "DROP TABLE [IF EXISTS]",
        "ALTER TABLE [IF EXISTS] [ONLY]",
        "ADD [COLUMN] [IF NOT EXISTS]",
        "DROP [COLUMN] [IF EXISTS]",
        "RENAME [COLUMN]",
        "RENAME TO",
        "ALTER [COLUMN]",
        "{SET | DROP} DEFAULT",
        "{SET | DROP} NOT NULL",
        "[SET DATA] TYPE",
    ],
    oneline_clauses: &[
        "TRUNCATE [TABLE] [ONLY]",
        "SET SCHEMA",
        "ANALYZE",
        "VACUUM [FULL] [VERBOSE]",
        "LISTEN",
        "NOTIFY",
    ],
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
        "DO {NOTHING | UPDATE}",
        "{ROWS | RANGE | GROUPS} BETWEEN",
        "IS [NOT] DISTINCT FROM",
        "NULLS {FIRST | LAST}",
        "WITH ORDINALITY",
    ],
    reserved_keywords: KEYWORDS,
    reserved_functions: FUNCTIONS,
    string_types: STRING_TYPES,
    ident_types: IDENT_TYPES,
    ident_chars: IdentChars {
        first: "",
        rest: "$",
    },
    param_types: ParamTypes {
        numbered: &['$'],
        ..ParamTypes::NONE
    },
    operators: &[
        // cast
        "::",
        // json
        "->", "->>", "#>", "#>>", "?", "?|", "?&", "@>", "<@", "#-",
        // pattern matching
        "~", "~*", "!~", "!~*", "~~", "~~*", "!~~", "!~~*",
        // math and bits
        "%", "^", "|/", "||/", "@", "&", "|", "#", "<<", ">>",
        // ranges, arrays, text search
        "&&", "&<", "&>", "-|-", "@@", "||",
    ],
    brackets: &[('[', ']')],
    always_dense_operators: &["::"],
    ..DialectSpec::BASE
};

const KEYWORDS: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC",
    "AUTHORIZATION", "BEGIN", "BETWEEN", "BIGINT", "BIGSERIAL", "BOOLEAN", "BOTH", "BY",
    "BYTEA", "CASCADE", "CASE", "CAST", "CHAR", "CHARACTER", "CHECK", "COLLATE", "COLUMN",
    "COMMIT", "CONCURRENTLY", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS", "CURRENT_CATALOG",
    "CURRENT_DATE", "CURRENT_ROLE", "CURRENT_SCHEMA", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "CURRENT_USER", "DECIMAL", "DEFAULT", "DEFERRABLE", "DESC", "DISTINCT", "DO", "DOUBLE",
    "ELSE", "END", "EXCEPT", "EXISTS", "EXTENSION", "FALSE", "FETCH", "FILTER", "FOR",
    "FOREIGN", "FREEZE", "FROM", "FULL", "FUNCTION", "GRANT", "GROUP", "HAVING", "IF", "ILIKE",
    "IN", "INDEX", "INITIALLY", "INNER", "INT", "INTEGER", "INTERSECT", "INTERVAL", "INTO",
    "IS", "ISNULL", "JOIN", "JSON", "JSONB", "KEY", "LANGUAGE", "LATERAL", "LEADING", "LEFT",
    "LIKE", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "NUMERIC", "OFFSET", "ON", "ONLY", "OR", "ORDER",
    "OUTER", "OVER", "OVERLAPS", "PLACING", "PRIMARY", "PROCEDURE", "REAL", "RECURSIVE",
    "REFERENCES", "REPLACE", "RETURNING", "RETURNS", "RIGHT", "ROLLBACK", "ROW", "ROWS",
    "SCHEMA", "SELECT", "SERIAL", "SESSION_USER", "SET", "SIMILAR", "SMALLINT", "SOME",
    "SYMMETRIC", "TABLE", "TABLESAMPLE", "TEMPORARY", "THEN", "TIMESTAMP", "TIMESTAMPTZ", "TO",
    "TRAILING", "TRIGGER", "TRUE", "UNION", "UNIQUE", "UNLOGGED", "USER", "USING", "UUID",
    "VARCHAR", "VARIADIC", "VERBOSE", "VIEW", "WHEN", "WHERE", "WINDOW", "WITH", "WITHOUT",
    "ZONE",
];

const FUNCTIONS: &[&str] = &[
    // math
    "ABS", "CBRT", "CEIL", "CEILING", "DIV", "EXP", "FLOOR", "LN", "LOG", "MOD", "POWER",
    "RANDOM", "ROUND", "SIGN", "SQRT", "TRUNC",
    // string
    "BTRIM", "CHR", "CONCAT", "CONCAT_WS", "FORMAT", "INITCAP", "LENGTH", "LOWER", "LPAD",
    "LTRIM", "MD5", "REGEXP_MATCH", "REGEXP_REPLACE", "REGEXP_SPLIT_TO_ARRAY", "REPEAT",
    "REPLACE", "RPAD", "RTRIM", "SPLIT_PART", "STARTS_WITH", "STRPOS", "SUBSTR", "SUBSTRING",
    "TRANSLATE", "TRIM", "UPPER",
    // date and time
    "AGE", "CLOCK_TIMESTAMP", "DATE_BIN", "DATE_PART", "DATE_TRUNC", "EXTRACT", "MAKE_DATE",
    "MAKE_INTERVAL", "NOW", "TO_CHAR", "TO_DATE", "TO_TIMESTAMP",
    // json
    "JSON_AGG", "JSON_BUILD_OBJECT", "JSONB_AGG", "JSONB_BUILD_ARRAY", "JSONB_BUILD_OBJECT",
    "JSONB_EXTRACT_PATH", "JSONB_SET", "ROW_TO_JSON", "TO_JSONB",
    // arrays and sets
    "ARRAY_AGG", "ARRAY_LENGTH", "CARDINALITY", "GENERATE_SERIES", "UNNEST",
    // conditional
    "COALESCE", "GREATEST", "LEAST", "NULLIF",
    // aggregate and window
    "AVG", "BOOL_AND", "BOOL_OR", "COUNT", "CUME_DIST", "DENSE_RANK", "FIRST_VALUE", "LAG",
    "LAST_VALUE", "LEAD", "MAX", "MIN", "NTH_VALUE", "NTILE", "PERCENT_RANK", "RANK",
    "ROW_NUMBER", "STRING_AGG", "SUM",
];
