//! tree-sitter parsing and interface extraction for Go sources.
//!
//! Locates a named interface declaration, then collects its methods (with fully
//! resolved parameter and result types) and embedded interfaces into a [`TypeData`].
//! Signature fragments are sliced back out of the source and resolved textually,
//! since the grammar does not distinguish `a, b T` sharing from a list of types.

use tracing::{debug, info};
use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::{MockgenError, Result};
use crate::imports::{prune_imports, UsedQualifiers};
use crate::resolve::resolve_fragment;
use crate::span::source_span;
use crate::types::{EmbeddedRef, ImportEntry, Method, TypeData, TypeRef};

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn go_language() -> Language {
    tree_sitter_go::LANGUAGE.into()
}

/// Parse Go source. Files the Go compiler would reject (any ERROR or MISSING node)
/// fail with the position of the first offending node.
pub fn parse_go(source: &str) -> Result<Tree> {
    let unparsed = MockgenError::ParseFailure { line: 1, column: 1 };
    let mut parser = Parser::new();
    parser.set_language(&go_language()).map_err(|_| unparsed.clone())?;

    let tree = parser.parse(source, None).ok_or(unparsed)?;
    let root = tree.root_node();
    if root.has_error() {
        let bad = first_error(root).unwrap_or(root);
        let pos = bad.start_position();
        return Err(MockgenError::ParseFailure { line: pos.row + 1, column: pos.column + 1 });
    }

    Ok(tree)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().filter(|c| c.has_error()).find_map(first_error)
}

// ---------------------------------------------------------------------------
// Declaration locator
// ---------------------------------------------------------------------------

/// Traversal state while searching for `type <name> interface { ... }`.
#[derive(Debug, Clone, Copy)]
enum Locate<'t> {
    Searching,
    /// Visited the declared name; the declaration's `type` child decides whether it is ours.
    NameMatched { spec: Node<'t> },
    Found { body: Node<'t> },
}

impl<'t> Locate<'t> {
    fn step(self, node: Node<'t>, source: &str, name: &str) -> Self {
        match self {
            Locate::Searching => match declaring_spec(node) {
                Some(spec) if source_span(source, &node) == name => Locate::NameMatched { spec },
                _ => Locate::Searching,
            },
            Locate::NameMatched { spec } => match spec.child_by_field_name("type") {
                Some(ty) if ty.id() == node.id() => {
                    let inner = strip_parens(node);
                    if inner.kind() == "interface_type" {
                        Locate::Found { body: inner }
                    } else {
                        debug!(name, kind = node.kind(), "Name matched a non-interface type");
                        Locate::Searching
                    }
                }
                // Tokens between the name and the type, e.g. the `=` of an alias.
                _ => self,
            },
            Locate::Found { .. } => self,
        }
    }
}

/// `(interface{ ... })` declares the same type as `interface{ ... }`.
fn strip_parens(mut node: Node) -> Node {
    while node.kind() == "parenthesized_type" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// The `type_spec` / `type_alias` that `node` is the declared name of. Generic
/// declarations are never returned.
fn declaring_spec(node: Node) -> Option<Node> {
    if node.kind() != "type_identifier" {
        return None;
    }
    let parent = node.parent()?;
    if !matches!(parent.kind(), "type_spec" | "type_alias") {
        return None;
    }
    if parent.child_by_field_name("type_parameters").is_some() {
        return None;
    }
    let declared = parent.child_by_field_name("name")?;
    (declared.id() == node.id()).then_some(parent)
}

/// Find the body of the first interface named `name` in depth-first order.
///
/// A same-named interface in another scope is never considered once one is found.
pub fn locate_interface<'t>(root: Node<'t>, source: &str, name: &str) -> Option<Node<'t>> {
    let mut state = Locate::Searching;
    let mut cursor = root.walk();

    loop {
        state = state.step(cursor.node(), source, name);
        if let Locate::Found { body } = state {
            return Some(body);
        }

        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Member collection
// ---------------------------------------------------------------------------

/// Methods and embeds of one interface body, in declaration order.
fn collect_members(
    body: Node,
    source: &str,
    interface_name: &str,
    used: &mut UsedQualifiers,
) -> Result<(Vec<Method>, Vec<EmbeddedRef>)> {
    let mut methods = Vec::new();
    let mut embeds = Vec::new();

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "method_elem" | "method_spec" => {
                for method in collect_method(member, source, used)? {
                    debug!(
                        method = method.name.as_str(),
                        params = method.parameters.len(),
                        returns = method.returns.len(),
                        "Collected method"
                    );
                    methods.push(method);
                }
            }
            "type_elem" | "constraint_elem" | "type_identifier" | "qualified_type" => {
                let embed = collect_embed(member, source, interface_name)?;
                if let Some(q) = embed.qualifier() {
                    used.record(q);
                }
                debug!(embed = %embed.text(), "Collected embedded interface");
                embeds.push(embed);
            }
            "comment" => {}
            other => debug!(kind = other, "Skipping interface member"),
        }
    }

    Ok((methods, embeds))
}

/// One method per declared name, all sharing the same signature.
fn collect_method(member: Node, source: &str, used: &mut UsedQualifiers) -> Result<Vec<Method>> {
    let mut cursor = member.walk();
    let names: Vec<String> = member
        .children_by_field_name("name", &mut cursor)
        .map(|n| source_span(source, &n).to_string())
        .collect();

    let parameters = match member.child_by_field_name("parameters") {
        Some(list) => resolve_parameter_list(list, source, used)?,
        None => Vec::new(),
    };

    let returns = match member.child_by_field_name("result") {
        Some(list) if list.kind() == "parameter_list" => resolve_parameter_list(list, source, used)?,
        Some(single) => resolve_fragment(source_span(source, &single), used)?,
        None => Vec::new(),
    };

    Ok(names
        .into_iter()
        .map(|name| Method { name, parameters: parameters.clone(), returns: returns.clone() })
        .collect())
}

/// Each declaration in a `( ... )` list is its own fragment.
fn resolve_parameter_list(
    list: Node,
    source: &str,
    used: &mut UsedQualifiers,
) -> Result<Vec<TypeRef>> {
    let mut types = Vec::new();
    let mut cursor = list.walk();
    for decl in list.named_children(&mut cursor) {
        if matches!(decl.kind(), "parameter_declaration" | "variadic_parameter_declaration") {
            types.extend(resolve_fragment(source_span(source, &decl), used)?);
        }
    }
    Ok(types)
}

fn collect_embed(member: Node, source: &str, interface_name: &str) -> Result<EmbeddedRef> {
    let unsupported = || MockgenError::UnsupportedMember {
        interface: interface_name.to_string(),
        member: source_span(source, &member).to_string(),
    };

    let target = if matches!(member.kind(), "type_elem" | "constraint_elem") {
        let mut cursor = member.walk();
        let mut types = member.named_children(&mut cursor).filter(|c| c.kind() != "comment");
        match (types.next(), types.next()) {
            (Some(only), None) => only,
            _ => return Err(unsupported()),
        }
    } else {
        member
    };

    match target.kind() {
        "type_identifier" => Ok(EmbeddedRef::Local { name: source_span(source, &target).to_string() }),
        "qualified_type" => {
            let package = target.child_by_field_name("package").ok_or_else(unsupported)?;
            let name = target.child_by_field_name("name").ok_or_else(unsupported)?;
            Ok(EmbeddedRef::Qualified {
                qualifier: source_span(source, &package).to_string(),
                name: source_span(source, &name).to_string(),
            })
        }
        _ => Err(unsupported()),
    }
}

// ---------------------------------------------------------------------------
// File-level data: package clause and imports
// ---------------------------------------------------------------------------

fn package_name(root: Node, source: &str) -> Result<String> {
    let mut cursor = root.walk();
    let clause = root.named_children(&mut cursor).find(|c| c.kind() == "package_clause");
    clause
        .and_then(|c| c.named_child(0))
        .map(|ident| source_span(source, &ident).to_string())
        .ok_or(MockgenError::ParseFailure { line: 1, column: 1 })
}

/// All imports of the file, in order.
pub fn collect_imports(root: Node, source: &str) -> Vec<ImportEntry> {
    let mut imports = Vec::new();
    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor).filter(|c| c.kind() == "import_declaration") {
        let mut decl_cursor = decl.walk();
        for child in decl.named_children(&mut decl_cursor) {
            match child.kind() {
                "import_spec" => imports.extend(import_entry(child, source)),
                "import_spec_list" => {
                    let mut list_cursor = child.walk();
                    for spec in child.named_children(&mut list_cursor) {
                        if spec.kind() == "import_spec" {
                            imports.extend(import_entry(spec, source));
                        }
                    }
                }
                _ => {}
            }
        }
    }
    imports
}

fn import_entry(spec: Node, source: &str) -> Option<ImportEntry> {
    let path = spec.child_by_field_name("path")?;
    let path = source_span(source, &path).trim_matches(|c| c == '"' || c == '`').to_string();
    let alias = spec.child_by_field_name("name").map(|n| source_span(source, &n).to_string());
    Some(ImportEntry { alias, path })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Extract the methods, embeds and required imports of interface `interface_name`.
///
/// Returns [`MockgenError::DeclarationNotFound`] when the file has no interface of
/// that name; no partially populated data is ever returned.
pub fn extract(source: &str, interface_name: &str) -> Result<TypeData> {
    let tree = parse_go(source)?;
    let root = tree.root_node();
    let package_name = package_name(root, source)?;

    let body = locate_interface(root, source, interface_name).ok_or_else(|| {
        MockgenError::DeclarationNotFound { name: interface_name.to_string() }
    })?;

    let mut used = UsedQualifiers::default();
    let (methods, embeds) = collect_members(body, source, interface_name, &mut used)?;
    let imports = prune_imports(collect_imports(root, source), &used);

    info!(
        interface = interface_name,
        package = package_name.as_str(),
        methods = methods.len(),
        embeds = embeds.len(),
        imports = imports.len(),
        qualifiers = used.len(),
        "Interface extracted"
    );

    Ok(TypeData { package_name, imports, methods, embeds })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
