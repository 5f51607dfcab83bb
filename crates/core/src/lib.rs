//! go-mockgen: Go interface extraction and mock synthesis.
//!
//! Parses a Go source file, finds a named interface, resolves every method's
//! parameter and result types (including the `a, b T` shared-type shorthand and
//! inline function types), and renders a mock struct with one swappable function
//! field per method.
//!
//! # Modules
//!
//! - [`ast`]: tree-sitter parsing, declaration locator, method/embed collection
//! - [`tokenizer`]: nesting-aware splitting of signature fragments
//! - [`resolve`]: shared-type back-fill and qualifier splitting
//! - [`imports`]: used-qualifier tracking and import pruning
//! - [`synth`]: mock rendering
//! - [`span`]: source span extraction
//! - [`scan`]: directory-level driver used by the CLI
//! - [`types`]: data shared between extraction and synthesis
//! - [`error`]: error taxonomy

pub mod ast;
pub mod error;
pub mod imports;
pub mod resolve;
pub mod scan;
pub mod span;
pub mod synth;
pub mod tokenizer;
pub mod types;

use std::path::Path;

use tracing::{debug, warn};

pub use ast::extract;
pub use error::{MockgenError, Result};
pub use synth::{synthesize, synthesize_with, MockStyle};
pub use types::*;

// ---------------------------------------------------------------------------
// .mockgen.toml config loading
// ---------------------------------------------------------------------------

/// Known keys in `.mockgen.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["mock_prefix", "func_suffix", "file_suffix", "header"];

/// Levenshtein distance over chars, kept in a single row.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

/// Non-empty run of identifier characters, safe to glue onto a Go name.
fn is_name_fragment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Load naming/output settings from `.mockgen.toml` in `dir`.
///
/// Returns [`MockgenConfig`] defaults merged with any overrides from the file. A
/// missing file is silent; an unparsable file, an unknown key (with a typo
/// suggestion) or an invalid value triggers a warning and falls back to defaults.
pub fn load_mockgen_config(dir: &Path) -> MockgenConfig {
    let mut config = MockgenConfig::default();
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        return config;
    }

    debug!(path = %config_path.display(), "Loading .mockgen.toml");
    let table = match std::fs::read_to_string(&config_path).map(|c| c.parse::<toml::Table>()) {
        Ok(Ok(table)) => table,
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to parse .mockgen.toml");
            return config;
        }
        Err(e) => {
            warn!(error = %e, "Failed to read .mockgen.toml");
            return config;
        }
    };

    // Validate keys: warn on unknown
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS
            .iter()
            .min_by_key(|k| edit_distance(key, k))
            .copied()
            .unwrap_or_default();
        if edit_distance(key, suggestion) <= 3 {
            warn!(
                key = key.as_str(),
                suggestion,
                "Unknown key in .mockgen.toml: did you mean '{suggestion}'?"
            );
        } else {
            warn!(
                key = key.as_str(),
                "Unknown key in .mockgen.toml (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            );
        }
    }

    let get_str = |key: &str| -> Option<String> {
        let value = table.get(key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                warn!(key, "Expected a string in .mockgen.toml, ignoring");
                None
            }
        }
    };

    if let Some(prefix) = get_str("mock_prefix") {
        if is_name_fragment(&prefix) {
            config.mock_prefix = prefix;
        } else {
            warn!(value = prefix.as_str(), "mock_prefix must be identifier characters, ignoring");
        }
    }

    if let Some(suffix) = get_str("func_suffix") {
        if is_name_fragment(&suffix) {
            config.func_suffix = suffix;
        } else {
            warn!(value = suffix.as_str(), "func_suffix must be identifier characters, ignoring");
        }
    }

    if let Some(suffix) = get_str("file_suffix") {
        if suffix.ends_with(".go") {
            config.file_suffix = suffix;
        } else {
            warn!(value = suffix.as_str(), "file_suffix must end in .go, ignoring");
        }
    }

    if let Some(header) = get_str("header") {
        if header.lines().all(|l| l.starts_with("//")) && !header.is_empty() {
            config.header = header;
        } else {
            warn!("header must consist of // comment lines, ignoring");
        }
    }

    config
}
