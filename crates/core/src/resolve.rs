//! Type resolution: tokenized items → [`TypeRef`]s.
//!
//! Go lets consecutive parameters share one type (`a, b int`). When the last item of
//! a fragment carries a name, every bare item before it is a name whose type is the
//! one declared by the nearest following named item. When the last item is bare, the
//! whole fragment is a list of unnamed types.

use crate::error::{MockgenError, Result};
use crate::imports::UsedQualifiers;
use crate::tokenizer::{is_func_literal, is_identifier, tokenize, Item};
use crate::types::TypeRef;

/// Resolve one fragment and record every package qualifier its types mention.
///
/// A blank fragment resolves to no types at all.
pub fn resolve_fragment(fragment: &str, used: &mut UsedQualifiers) -> Result<Vec<TypeRef>> {
    if fragment.trim().is_empty() {
        return Ok(Vec::new());
    }

    let types = resolve_items(fragment, tokenize(fragment)?)?;
    for t in &types {
        used.record_type_text(&t.full_type());
    }
    Ok(types)
}

/// Apply the shared-type back-fill rule to the items of `fragment`.
pub fn resolve_items(fragment: &str, items: Vec<Item>) -> Result<Vec<TypeRef>> {
    let all_unnamed = matches!(items.last(), None | Some(Item::Single(_)));

    if all_unnamed {
        return items
            .into_iter()
            .map(|item| match item {
                Item::Single(text) if !text.is_empty() => Ok(split_qualifier(&text)),
                Item::Single(_) => Err(MockgenError::malformed(fragment, "empty item")),
                Item::Named { .. } => {
                    Err(MockgenError::malformed(fragment, "mixes named and unnamed items"))
                }
            })
            .collect();
    }

    // Walk backwards so each bare name sees the type declared after it.
    let mut current: Option<TypeRef> = None;
    let mut resolved = Vec::with_capacity(items.len());
    for item in items.into_iter().rev() {
        let (name, t) = match item {
            Item::Named { name, type_text } => {
                let t = split_qualifier(&type_text);
                current = Some(t.clone());
                (name, t)
            }
            Item::Single(name) => {
                if !is_identifier(&name) {
                    return Err(MockgenError::malformed(fragment, "mixes named and unnamed items"));
                }
                let t = current
                    .clone()
                    .ok_or_else(|| MockgenError::malformed(fragment, "name without a type"))?;
                (name, t)
            }
        };
        resolved.push(TypeRef { declared_name: Some(name), ..t });
    }
    resolved.reverse();

    Ok(resolved)
}

/// Split `pkg.Type` into qualifier and base name.
///
/// Only a plain identifier before the first dot counts as a qualifier. Function
/// literals and compound types (`[]*pkg.T`, `...pkg.T`) are kept whole.
pub fn split_qualifier(type_text: &str) -> TypeRef {
    let type_text = type_text.trim();
    if !is_func_literal(type_text) {
        if let Some((qualifier, base)) = type_text.split_once('.') {
            if is_identifier(qualifier) {
                return TypeRef {
                    qualifier: Some(qualifier.to_string()),
                    base_name: base.to_string(),
                    declared_name: None,
                };
            }
        }
    }

    TypeRef { qualifier: None, base_name: type_text.to_string(), declared_name: None }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(qualifier: &str, base: &str, name: &str) -> TypeRef {
        TypeRef {
            qualifier: (!qualifier.is_empty()).then(|| qualifier.to_string()),
            base_name: base.to_string(),
            declared_name: (!name.is_empty()).then(|| name.to_string()),
        }
    }

    fn resolve(fragment: &str) -> Vec<TypeRef> {
        resolve_fragment(fragment, &mut UsedQualifiers::default()).unwrap()
    }

    #[test]
    fn test_back_fill_shared_type() {
        assert_eq!(
            resolve("err1, err2 module.Error"),
            vec![ty("module", "Error", "err1"), ty("module", "Error", "err2")]
        );
        assert_eq!(
            resolve("mode, mode2 DriveMode"),
            vec![ty("", "DriveMode", "mode"), ty("", "DriveMode", "mode2")]
        );
    }

    #[test]
    fn test_back_fill_uses_nearest_following_type() {
        assert_eq!(
            resolve("a, b int, c, d string"),
            vec![
                ty("", "int", "a"),
                ty("", "int", "b"),
                ty("", "string", "c"),
                ty("", "string", "d"),
            ]
        );
    }

    #[test]
    fn test_single_types() {
        assert_eq!(resolve("DriveMode"), vec![ty("", "DriveMode", "")]);
        assert_eq!(resolve("count int"), vec![ty("", "int", "count")]);
    }

    #[test]
    fn test_all_unnamed_keeps_order() {
        assert_eq!(resolve("int, module.Error"), vec![ty("", "int", ""), ty("module", "Error", "")]);
    }

    #[test]
    fn test_func_literals_are_opaque() {
        assert_eq!(
            resolve("func(a, b int) errors.Error"),
            vec![ty("", "func(a, b int) errors.Error", "")]
        );
        assert_eq!(
            resolve("int, func(a, b int) errors.Error"),
            vec![ty("", "int", ""), ty("", "func(a, b int) errors.Error", "")]
        );
        assert_eq!(
            resolve("d int, e func(a, b int) errors.Error"),
            vec![ty("", "int", "d"), ty("", "func(a, b int) errors.Error", "e")]
        );
        assert_eq!(
            resolve("func(int, int, errors2.Error) errors.Error"),
            vec![ty("", "func(int, int, errors2.Error) errors.Error", "")]
        );
    }

    #[test]
    fn test_compound_types_are_not_split() {
        assert_eq!(resolve("r []*io.Reader"), vec![ty("", "[]*io.Reader", "r")]);
        assert_eq!(resolve("opts ...pkg.Option"), vec![ty("", "...pkg.Option", "opts")]);
    }

    #[test]
    fn test_records_nested_qualifiers() {
        let mut used = UsedQualifiers::default();
        resolve_fragment("cb func(x errors2.Error) int", &mut used).unwrap();
        resolve_fragment("r []*io.Reader, n extrapkg.Count", &mut used).unwrap();
        assert!(used.contains("errors2"), "qualifier inside func type not recorded");
        assert!(used.contains("io"));
        assert!(used.contains("extrapkg"));
        assert!(!used.contains("int"));
    }

    #[test]
    fn test_blank_fragment_is_empty() {
        assert!(resolve("").is_empty());
        assert!(resolve("   ").is_empty());
    }

    #[test]
    fn test_malformed_fragments() {
        let mut used = UsedQualifiers::default();
        for fragment in ["func(a, b int", "a int, string", "a, , b int", "[]int, b int"] {
            let err = resolve_fragment(fragment, &mut used).unwrap_err();
            assert!(
                matches!(err, MockgenError::MalformedFragment { .. }),
                "{fragment:?} should be malformed, got {err:?}"
            );
        }
    }
}
