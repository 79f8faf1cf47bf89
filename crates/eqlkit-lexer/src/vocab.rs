//! Keyword and builtin vocabularies.
//!
//! All tables are sorted so lookups can binary search them.

use crate::TokenKind;

/// Keywords that can never be used as identifiers
pub const RESERVED_KEYWORDS: &[&str] = &[
    "__default__", "__edgedbsys__", "__edgedbtpl__", "__new__", "__old__", "__source__",
    "__specified__", "__std__", "__subject__", "__type__", "administer", "alter", "analyze",
    "and", "anyarray", "anyobject", "anytuple", "anytype", "begin", "by", "case", "check",
    "commit", "configure", "create", "deallocate", "delete", "describe", "detached", "discard",
    "distinct", "do", "drop", "else", "end", "except", "exists", "explain", "extending",
    "fetch", "filter", "for", "get", "global", "grant", "group", "if", "ilike", "import", "in",
    "insert", "intersect", "introspect", "is", "like", "limit", "listen", "load", "lock",
    "match", "module", "move", "never", "not", "notify", "offset", "on", "optional", "or",
    "over", "partition", "prepare", "raise", "refresh", "revoke", "rollback", "select", "set",
    "single", "start", "typeof", "union", "update", "variadic", "when", "window", "with",
];

/// Keywords that double as identifiers where the grammar allows it
pub const UNRESERVED_KEYWORDS: &[&str] = &[
    "abort", "abstract", "access", "after", "alias", "all", "allow", "annotation", "applied",
    "as", "asc", "assignment", "before", "cardinality", "cast", "committed", "config",
    "conflict", "constraint", "cube", "current", "database", "ddl", "declare", "default",
    "deferrable", "deferred", "delegated", "desc", "empty", "expression", "extension", "final",
    "first", "from", "function", "future", "implicit", "index", "infix", "inheritable",
    "instance", "into", "isolation", "json", "last", "link", "migration", "multi", "named",
    "object", "of", "only", "onto", "operator", "optionality", "order", "orphan", "overloaded",
    "owned", "package", "policy", "populate", "postfix", "prefix", "property", "proposed",
    "pseudo", "read", "reject", "release", "rename", "required", "reset", "restrict",
    "rewrite", "role", "roles", "rollup", "savepoint", "scalar", "schema", "sdl",
    "serializable", "session", "source", "superuser", "system", "target", "ternary", "text",
    "then", "to", "transaction", "trigger", "type", "unless", "using", "verbose", "version",
    "view", "write",
];

/// Builtin types, functions and constraints (case-sensitive)
pub const BUILTIN_NAMES: &[&str] = &[
    "array", "array_agg", "array_get", "array_join", "array_unpack", "assert_distinct",
    "assert_exists", "assert_single", "bigint", "bool", "bytes", "contains", "count",
    "datetime", "datetime_current", "datetime_get", "decimal", "duration", "enumerate",
    "exclusive", "find", "float32", "float64", "int16", "int32", "int64", "len", "max",
    "max_len_value", "max_value", "min", "min_len_value", "min_value", "multirange", "one_of",
    "random", "range", "regexp", "round", "sequence", "str", "str_lower", "str_upper", "sum",
    "to_datetime", "to_json", "to_str", "tuple", "uuid", "uuid_generate_v1mc",
];

pub fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS
        .binary_search(&word.to_ascii_lowercase().as_str())
        .is_ok()
}

pub fn is_unreserved_keyword(word: &str) -> bool {
    UNRESERVED_KEYWORDS
        .binary_search(&word.to_ascii_lowercase().as_str())
        .is_ok()
}

pub fn is_builtin_name(word: &str) -> bool {
    BUILTIN_NAMES.binary_search(&word).is_ok()
}

/// Classify an identifier-shaped token
pub fn classify_ident(word: &str) -> TokenKind {
    if word.eq_ignore_ascii_case("true") || word.eq_ignore_ascii_case("false") {
        TokenKind::Bool
    } else if is_reserved_keyword(word) {
        TokenKind::ReservedKeyword
    } else if is_unreserved_keyword(word) {
        TokenKind::UnreservedKeyword
    } else if is_builtin_name(word) {
        TokenKind::BuiltinName
    } else {
        TokenKind::Ident
    }
}
