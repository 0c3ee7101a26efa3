//! Neha surface vocabulary.
//!
//! Neha is TSX with a handful of words spelled differently. Everything the
//! engine rewrites is listed here as a closed table:
//! - Keywords (`rakh` → `let`, `de` → `return`, ...)
//! - Context-sensitive forms (`warna agar`, `async_kaam`)
//! - Extended identifiers, rewritten only in call position (`dikha(...)`)
//! - Member aliases, rewritten only after a `.` (`el.ghatevent`)
//! - Import markers (`le ... se '...'`) and the markup `class=` attribute

use serde::{Deserialize, Serialize};

/// Sugar spelling of `else`; fuses with a following [`IF`] into `else if`.
pub const ELSE: &str = "warna";

/// Sugar spelling of `if`.
pub const IF: &str = "agar";

/// Host text emitted for a fused `warna agar`.
pub const ELSE_IF: &str = "else if";

/// Async marker whose expansion depends on what follows it.
pub const ASYNC_MARKER: &str = "async_kaam";

/// Expansion of [`ASYNC_MARKER`] before an arrow or an anonymous expression.
pub const ASYNC: &str = "async";

/// Expansion of [`ASYNC_MARKER`] before `name(`.
pub const ASYNC_FUNCTION: &str = "async function";

/// Opens an import line: `le x se 'mod'`.
pub const IMPORT_MARKER: &str = "le";

/// Separates bindings from the module specifier in an import line.
pub const FROM_MARKER: &str = "se";

/// Markup attribute rewritten inside tags.
pub const CLASS_ATTR: &str = "class=";

/// Host spelling of [`CLASS_ATTR`].
pub const HOST_CLASS_ATTR: &str = "className=";

/// Host keyword for a single-token sugar keyword.
pub fn keyword(word: &str) -> Option<&'static str> {
    let host = match word {
        "rakh" => "let",
        "tay" => "const",
        "asthir" => "var",
        "agar" => "if",
        "warna" => "else",
        "liye" => "for",
        "jab_tak" => "while",
        "kaam" => "function",
        "de" => "return",
        "varg" => "class",
        "sach" => "true",
        "jhoot" => "false",
        "chhodo" => "continue",
        "tod" => "break",
        "ye" => "this",
        "intezar" => "await",
        "koshish" => "try",
        "pakad" => "catch",
        "akhir" => "finally",
        "fek" => "throw",
        "naya" => "new",
        "bhej" => "export",
        _ => return None,
    };
    Some(host)
}

/// Host expression for an extended identifier used as a callee.
///
/// The expansion may itself be a member expression (`keys` → `Object.keys`).
pub fn extended_identifier(word: &str) -> Option<&'static str> {
    let host = match word {
        "ghatevent" => "addEventListener",
        "hatevent" => "removeEventListener",
        "query" => "querySelector",
        "queryAll" => "querySelectorAll",
        "keys" => "Object.keys",
        "values" => "Object.values",
        "entries" => "Object.entries",
        "dikha" => "console.log",
        _ => return None,
    };
    Some(host)
}

/// Host member name for a property accessed as `.name`.
pub fn member_alias(word: &str) -> Option<&'static str> {
    let host = match word {
        "ghatevent" => "addEventListener",
        "hatevent" => "removeEventListener",
        "query" => "querySelector",
        "queryAll" => "querySelectorAll",
        _ => return None,
    };
    Some(host)
}

/// Per-call options for a transformation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Name recorded as the map's source. Defaults to [`DEFAULT_FILENAME`].
    pub filename: Option<String>,
    /// Append the map to the emitted code as a base64 `sourceMappingURL` comment.
    pub inline_source_map: bool,
}

/// Source name used when no filename is supplied.
pub const DEFAULT_FILENAME: &str = "input.neha";

impl TransformOptions {
    pub fn with_filename(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Default::default()
        }
    }

    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }
}
