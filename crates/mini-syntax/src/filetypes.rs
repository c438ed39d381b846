//! Built-in filetype registry.
//!
//! A static table of [`SyntaxProfile`]s consulted once per file open (and
//! again on save-as). The first profile whose patterns match wins.

use crate::profile::{ProfileFlags, SyntaxProfile};

const CODE: ProfileFlags = ProfileFlags::NUMBERS.union(ProfileFlags::STRINGS);

pub static C: SyntaxProfile = SyntaxProfile {
    name: "c",
    filematch: &[".c", ".h", "cpp", ".cc"],
    keywords: &[
        "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
        "typedef", "static", "enum", "class", "case",
    ],
    keywords2: &[
        "int", "long", "double", "float", "char", "unsigned", "signed", "void",
    ],
    single_line_comment: "//",
    ml_comment_start: "/*",
    ml_comment_end: "*/",
    flags: CODE,
};

pub static GO: SyntaxProfile = SyntaxProfile {
    name: "go",
    filematch: &[".go"],
    keywords: &[
        "break", "default", "func", "interface", "select", "case", "defer", "go", "map", "struct",
        "chan", "else", "goto", "package", "switch", "const", "fallthrough", "if", "range", "type",
        "continue", "for", "import", "return", "var",
    ],
    keywords2: &[
        "append", "bool", "byte", "cap", "close", "complex", "complex64", "complex128", "error",
        "uint16", "copy", "false", "float32", "float64", "imag", "int", "int8", "int16", "uint32",
        "int32", "int64", "iota", "len", "make", "new", "nil", "panic", "uint64", "print",
        "println", "real", "recover", "rune", "string", "true", "uint", "uint8", "uintptr",
    ],
    single_line_comment: "//",
    ml_comment_start: "/*",
    ml_comment_end: "*/",
    flags: CODE,
};

pub static JAVASCRIPT: SyntaxProfile = SyntaxProfile {
    name: "javascript",
    filematch: &[".js"],
    keywords: &[
        "abstract", "arguments", "await", "boolean", "break", "char", "debugger", "do", "double",
        "export", "final", "finally", "goto", "import", "in", "let", "null", "public", "super",
        "throw", "try", "volatile", "byte", "class", "else", "extends", "float", "if",
        "instanceof", "long",
    ],
    keywords2: &[
        "package", "return", "switch", "throws", "typeof", "case", "const", "default", "enum",
        "for", "implements", "of", "native", "private", "short", "synchronized", "transient",
        "var", "while", "catch", "continue", "delete", "eval", "false", "function", "int", "this",
        "true", "yield", "interface", "new", "protected", "static", "void", "with",
    ],
    single_line_comment: "//",
    ml_comment_start: "/*",
    ml_comment_end: "*/",
    flags: CODE,
};

pub static PYTHON: SyntaxProfile = SyntaxProfile {
    name: "python",
    filematch: &[".py"],
    keywords: &[
        "False", "None", "True", "and", "as", "assert", "break", "class", "continue", "pass",
        "def", "yield", "del", "elif", "else", "except", "finally", "for", "from", "print",
    ],
    keywords2: &[
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "global", "raise",
        "return", "try", "while", "with",
    ],
    single_line_comment: "#",
    ml_comment_start: "\"\"\"",
    ml_comment_end: "\"\"\"",
    flags: CODE,
};

/// Every built-in profile, in match priority order.
pub static REGISTRY: &[&SyntaxProfile] = &[&C, &GO, &JAVASCRIPT, &PYTHON];

/// Find the profile for `filename`, or `None` for plain text.
#[must_use]
pub fn detect(filename: &str) -> Option<&'static SyntaxProfile> {
    REGISTRY.iter().copied().find(|p| p.matches(filename))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
