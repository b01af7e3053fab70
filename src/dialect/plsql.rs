//! Oracle PL/SQL.

use super::{DialectSpec, Escape, IdentChars, ParamTypes, QuoteStyle};
use crate::lexer::{map_with_previous_reserved, Token, TokenKind};

const STRING_TYPES: &[QuoteStyle] = &[
    QuoteStyle::delimited('\'', '\'', Escape::Doubled).with_prefixes(&["N"]),
    QuoteStyle::alternative().with_prefixes(&["N"]),
];

// Oracle has no escape inside quoted identifiers; doubling is accepted anyway.
const IDENT_TYPES: &[QuoteStyle] = &[QuoteStyle::delimited('"', '"', Escape::Doubled)];

pub static PLSQL: DialectSpec = DialectSpec {
    name: "plsql",
    aliases: &["oracle", "pl/sql"],
    reserved_select: &["SELECT [ALL | DISTINCT | UNIQUE]"],
    reserved_clauses: &[
        "WITH",
        "FROM",
        "WHERE",
        "GROUP BY",
        "HAVING",
        "PARTITION BY",
        "ORDER [SIBLINGS] BY",
        "OFFSET",
        "FETCH {FIRST | NEXT}",
        "FOR UPDATE",
        "INSERT [INTO | ALL INTO]",
        "VALUES",
        "UPDATE [ONLY]",
        "SET",
        "DELETE FROM [ONLY]",
        "MERGE [INTO]",
        "WHEN [NOT] MATCHED [THEN]",
        "UPDATE SET",
        "CREATE [OR REPLACE] [NO FORCE | FORCE] [EDITIONING | EDITIONABLE | EDITIONABLE EDITIONING | NONEDITIONABLE] VIEW",
        "CREATE MATERIALIZED VIEW",
        "CREATE [GLOBAL TEMPORARY | PRIVATE TEMPORARY | SHARDED | DUPLICATED | IMMUTABLE BLOCKCHAIN | BLOCKCHAIN | IMMUTABLE] TABLE",
        "DROP TABLE",
        "ALTER TABLE",
        "ADD",
        "DROP {COLUMN | UNUSED COLUMNS | COLUMNS CONTINUE}",
        "MODIFY",
        "RENAME TO",
        "RENAME COLUMN",
        "BEGIN",
        "CONNECT BY",
        "DECLARE",
        "EXCEPT",
        "EXCEPTION",
        "LOOP",
        "RETURNING",
        "START WITH",
    ],
    oneline_clauses: &["TRUNCATE TABLE", "SET SCHEMA"],
    reserved_set_operations: &["UNION [ALL]", "EXCEPT", "INTERSECT"],
    reserved_joins: &[
        "JOIN",
        "{LEFT | RIGHT | FULL} [OUTER] JOIN",
        "{INNER | CROSS} JOIN",
        "NATURAL [INNER] JOIN",
        "NATURAL {LEFT | RIGHT | FULL} [OUTER] JOIN",
        "{CROSS | OUTER} APPLY",
    ],
    reserved_phrases: &[
        "ON {UPDATE | DELETE} [SET NULL]",
        "ON COMMIT",
        "{ROWS | RANGE} BETWEEN",
    ],
    reserved_keywords: KEYWORDS,
    reserved_functions: FUNCTIONS,
    supports_xor: true,
    string_types: STRING_TYPES,
    ident_types: IDENT_TYPES,
    ident_chars: IdentChars {
        first: "",
        rest: "$#",
    },
    param_types: ParamTypes {
        numbered: &[':'],
        named: &[':'],
        ..ParamTypes::NONE
    },
    // `$` and `#` are identifier characters but not bind-variable characters.
    param_chars: Some(IdentChars::NONE),
    variable_patterns: &["&{1,2}[A-Za-z][A-Za-z0-9_$#]*"],
    operators: &["**", ":=", "%", "~=", "^=", ">>", "<<", "=>", "@", "||"],
    always_dense_operators: &["@"],
    post_process: Some(post_process),
    ..DialectSpec::BASE
};

/// `BY SET` (as in `SEARCH ... SET ordering_column`) is not an `UPDATE ... SET`
/// clause.
fn post_process(tokens: Vec<Token>) -> Vec<Token> {
    map_with_previous_reserved(tokens, |previous, token| {
        (token.is_word("SET") && previous.is_some_and(|p| p.is_word("BY")))
            .then_some(TokenKind::ReservedKeyword)
    })
}

const KEYWORDS: &[&str] = &[
    "ACCESS", "ACCESSIBLE", "AGGREGATE", "ALL", "ALTER", "AND", "ANY", "ARRAY", "AS", "ASC",
    "AT", "AUTHID", "BEGIN", "BETWEEN", "BFILE", "BINARY_DOUBLE", "BINARY_FLOAT",
    "BINARY_INTEGER", "BLOB", "BODY", "BOOLEAN", "BULK", "BY", "BYTE", "CASCADE", "CASE",
    "CHAR", "CHARACTER", "CHECK", "CLOB", "CLOSE", "CLUSTER", "COLLECT", "COLUMN", "COMMENT",
    "COMMIT", "COMPRESS", "CONNECT", "CONSTANT", "CONSTRAINT", "CONTINUE", "CREATE", "CROSS",
    "CURRENT", "CURSOR", "DATE", "DAY", "DECIMAL", "DECLARE", "DEFAULT", "DELETE", "DESC",
    "DETERMINISTIC", "DISTINCT", "DROP", "EACH", "ELSE", "ELSIF", "END", "ESCAPE", "EXCEPTION",
    "EXCLUSIVE", "EXECUTE", "EXISTS", "EXIT", "EXTERNAL", "FALSE", "FETCH", "FLOAT", "FOR",
    "FORALL", "FOREIGN", "FROM", "FUNCTION", "GOTO", "GRANT", "GROUP", "HAVING", "IDENTIFIED",
    "IF", "IMMEDIATE", "IN", "INDEX", "INDICES", "INSERT", "INTEGER", "INTERSECT", "INTERVAL",
    "INTO", "IS", "ISOLATION", "JAVA", "KEY", "LIKE", "LIMIT", "LOCK", "LONG", "LOOP", "MERGE",
    "MINUS", "MODE", "MODIFY", "MONTH", "NATURAL", "NCHAR", "NCLOB", "NEW", "NOCOMPRESS",
    "NOCOPY", "NOT", "NOWAIT", "NULL", "NUMBER", "OF", "OFFLINE", "ON", "ONLINE", "OPEN",
    "OPTION", "OR", "ORDER", "OTHERS", "OUT", "PACKAGE", "PARTITION", "PCTFREE", "PIPELINED",
    "PLS_INTEGER", "PRAGMA", "PRIMARY", "PRIOR", "PRIVILEGES", "PROCEDURE", "PUBLIC", "RAISE",
    "RANGE", "RAW", "RECORD", "REF", "REFERENCES", "RELIES_ON", "RENAME", "RESOURCE", "RESULT_CACHE",
    "RETURN", "RETURNING", "REVERSE", "REVOKE", "ROLLBACK", "ROW", "ROWID", "ROWNUM", "ROWS",
    "SAVEPOINT", "SEGMENT", "SELECT", "SEPARATE", "SET", "SHARE", "SIZE", "SMALLINT", "SQL",
    "START", "SUBTYPE", "SYNONYM", "SYSDATE", "SYSTIMESTAMP", "TABLE", "THEN", "TIME",
    "TIMESTAMP", "TO", "TRIGGER", "TRUE", "TYPE", "UNION", "UNIQUE", "UPDATE", "USE", "USING",
    "VALUES", "VARCHAR", "VARCHAR2", "VARRAY", "VIEW", "WHEN", "WHENEVER", "WHERE", "WHILE",
    "WITH", "WORK", "WRITE", "YEAR", "ZONE",
];

const FUNCTIONS: &[&str] = &[
    // numeric
    "ABS", "ACOS", "ASIN", "ATAN", "ATAN2", "CEIL", "COS", "EXP", "FLOOR", "LN", "LOG", "MOD",
    "POWER", "REMAINDER", "ROUND", "SIGN", "SIN", "SQRT", "TAN", "TRUNC",
    // character
    "CHR", "CONCAT", "INITCAP", "INSTR", "LENGTH", "LOWER", "LPAD", "LTRIM", "REGEXP_INSTR",
    "REGEXP_LIKE", "REGEXP_REPLACE", "REGEXP_SUBSTR", "REPLACE", "RPAD", "RTRIM", "SOUNDEX",
    "SUBSTR", "TRANSLATE", "TRIM", "UPPER",
    // date
    "ADD_MONTHS", "CURRENT_DATE", "CURRENT_TIMESTAMP", "EXTRACT", "LAST_DAY", "MONTHS_BETWEEN",
    "NEXT_DAY", "SYS_EXTRACT_UTC",
    // conversion
    "CAST", "TO_CHAR", "TO_CLOB", "TO_DATE", "TO_NUMBER", "TO_TIMESTAMP", "HEXTORAW", "RAWTOHEX",
    // conditional
    "COALESCE", "DECODE", "GREATEST", "LEAST", "LNNVL", "NULLIF", "NVL", "NVL2",
    // aggregate and analytic
    "AVG", "COUNT", "DENSE_RANK", "FIRST_VALUE", "LAG", "LAST_VALUE", "LEAD", "LISTAGG", "MAX",
    "MEDIAN", "MIN", "NTILE", "RANK", "RATIO_TO_REPORT", "ROW_NUMBER", "STDDEV", "SUM",
    "VARIANCE",
];
