//! Error code registry.
//!
//! Maps error codes (E0001, E0203, etc.) to titles and categories.
//! Used by `tarn explain <code>` and for error display.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Resolution,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Resolution => write!(f, "Resolution"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

// Lexer errors (E00xx)
pub const UNEXPECTED_CHARACTER: &str = "E0001";
pub const UNTERMINATED_STRING: &str = "E0002";
pub const INVALID_ESCAPE: &str = "E0003";
pub const INVALID_NUMBER: &str = "E0004";
pub const UNTERMINATED_COMMENT: &str = "E0005";

// Parser errors (E01xx)
pub const UNEXPECTED_TOKEN: &str = "E0100";

// Semantic errors (E02xx)
pub const CALL_TO_VARIABLE: &str = "E0200";
pub const ASSIGNMENT_TO_CALLABLE: &str = "E0201";
pub const PROCEDURE_AS_VALUE: &str = "E0202";
pub const REDEFINITION: &str = "E0203";
pub const MISSING_MAIN: &str = "E0204";
pub const USE_BEFORE_DEFINITION: &str = "E0205";

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                "E0001" => ("unexpected character", Syntax),
                "E0002" => ("unterminated string literal", Syntax),
                "E0003" => ("invalid escape sequence", Syntax),
                "E0004" => ("invalid number format", Syntax),
                "E0005" => ("unterminated block comment", Syntax),

                "E0100" => ("unexpected token", Syntax),

                "E0200" => ("call to a variable", Resolution),
                "E0201" => ("assignment to a function or procedure", Resolution),
                "E0202" => ("procedure used as a value", Resolution),
                "E0203" => ("symbol redefined in the same scope", Resolution),
                "E0204" => ("missing main function", Resolution),
                "E0205" => ("use before definition", Resolution),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}
