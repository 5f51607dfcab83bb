//! Import pruning: keep only the imports the mock will actually reference.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::types::ImportEntry;

/// `pkg.Name` selectors anywhere inside a type expression.
static QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([\p{L}_][\p{L}\p{N}_]*)\.[\p{L}_]").unwrap());

/// Package short names referenced by the collected methods and embeds.
#[derive(Debug, Default, Clone)]
pub struct UsedQualifiers(BTreeSet<String>);

impl UsedQualifiers {
    pub fn record(&mut self, qualifier: &str) {
        self.0.insert(qualifier.to_string());
    }

    /// Record every qualifier in a type's text, including ones nested inside
    /// function types, slices, maps and pointers.
    pub fn record_type_text(&mut self, type_text: &str) {
        for cap in QUALIFIER.captures_iter(type_text) {
            self.record(&cap[1]);
        }
    }

    pub fn contains(&self, qualifier: &str) -> bool {
        self.0.contains(qualifier)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Keep the imports whose short name is in `used`, preserving file order.
///
/// Blank (`_`) and dot (`.`) imports are never referenced through a qualifier and
/// are always dropped. Two imports sharing a short name are both kept.
pub fn prune_imports(imports: Vec<ImportEntry>, used: &UsedQualifiers) -> Vec<ImportEntry> {
    imports
        .into_iter()
        .filter(|im| !matches!(im.alias.as_deref(), Some("_" | ".")))
        .filter(|im| used.contains(im.short_name()))
        .collect()
}
