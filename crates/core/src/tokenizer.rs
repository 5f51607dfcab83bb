//! Nesting-aware splitting of signature fragments.
//!
//! A fragment is the raw text of one parameter or result declaration, e.g.
//! `err1, err2 extrapkg.Error` or `int, func(a, b int) extrapkg.Error`. Commas only
//! separate items at nesting depth zero; anything inside `()`, `[]` or `{}` belongs to
//! a nested type.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{MockgenError, Result};

/// An inline function type: `func` followed by its parameter list.
static FUNC_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^func\s*\(").unwrap());

/// Words that start a type, never a parameter name.
const TYPE_KEYWORDS: &[&str] = &["func", "chan", "map", "struct", "interface"];

/// One comma-separated item of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A lone token. Either a type (`int`) or, when later items carry names, a name
    /// waiting for its type to be back-filled (`err1`).
    Single(String),
    /// `name type`, split at the first top-level space.
    Named { name: String, type_text: String },
}

impl Item {
    fn named(name: &str, type_text: &str) -> Self {
        Item::Named { name: name.to_string(), type_text: type_text.to_string() }
    }
}

/// True for `func(...)`-shaped text, whose internal dots and spaces must not be split.
pub fn is_func_literal(text: &str) -> bool {
    FUNC_LITERAL.is_match(text.trim_start())
}

/// Split a fragment into its items. An empty fragment yields one empty item.
pub fn tokenize(fragment: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, c) in fragment.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(classify(&fragment[start..i]));
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(MockgenError::malformed(fragment, "unclosed '(', '[' or '{'"));
    }

    items.push(classify(&fragment[start..]));
    Ok(items)
}

fn classify(token: &str) -> Item {
    let token = token.trim();

    if is_func_literal(token) {
        return Item::Single(token.to_string());
    }

    match top_level_space(token) {
        Some(idx) => {
            let (name, rest) = token.split_at(idx);
            if is_identifier(name) && !TYPE_KEYWORDS.contains(&name) {
                Item::named(name, rest.trim())
            } else {
                Item::Single(token.to_string())
            }
        }
        None => Item::Single(token.to_string()),
    }
}

/// Byte index of the first whitespace outside any brackets.
fn top_level_space(token: &str) -> Option<usize> {
    let mut depth: usize = 0;
    for (i, c) in token.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
