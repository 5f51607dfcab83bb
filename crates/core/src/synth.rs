//! Mock synthesis: renders a [`TypeData`] as Go source.
//!
//! The mock is a struct with one function field per method (plus each embedded
//! interface), and one forwarding method per interface method. A forwarding method
//! panics with the field's name when the field was never set, so an unconfigured
//! mock can't silently return zero values.

use std::collections::HashSet;

use tracing::warn;

use crate::types::{Method, MockgenConfig, TypeData, TypeRef};

/// Receiver names tried in order; the first one no parameter already uses wins.
const RECEIVER_NAMES: &[&str] = &["o", "m", "mock", "mck"];

/// Naming conventions for generated mocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockStyle {
    /// `Mock` in `MockVehicle`.
    pub mock_prefix: String,
    /// `Func` in `NameFunc`.
    pub func_suffix: String,
    pub header: String,
}

impl Default for MockStyle {
    fn default() -> Self {
        MockgenConfig::default().style()
    }
}

impl MockStyle {
    pub fn mock_name(&self, interface_name: &str) -> String {
        format!("{}{interface_name}", self.mock_prefix)
    }

    pub fn field_name(&self, method_name: &str) -> String {
        format!("{method_name}{}", self.func_suffix)
    }
}

/// Render a mock for `interface_name` with the default style.
pub fn synthesize(interface_name: &str, data: &TypeData) -> String {
    synthesize_with(interface_name, data, &MockStyle::default())
}

/// Render a mock for `interface_name`. Never fails: all parsing happened upstream.
pub fn synthesize_with(interface_name: &str, data: &TypeData, style: &MockStyle) -> String {
    for clash in field_method_clashes(data, style) {
        warn!(
            interface = interface_name,
            name = clash.as_str(),
            "Function field collides with a method of the same name; the mock will not compile"
        );
    }

    let mut out = String::new();
    out.push_str(&style.header);
    out.push_str("\n\n");
    out.push_str(&format!("package {}\n\n", data.package_name));
    out.push_str(&imports_block(data));
    out.push_str(&struct_def(interface_name, data, style));
    for method in &data.methods {
        out.push('\n');
        out.push_str(&forwarding_method(interface_name, method, style));
    }
    out
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn imports_block(data: &TypeData) -> String {
    if data.imports.is_empty() {
        return String::new();
    }
    let mut block = String::from("import (\n");
    for im in &data.imports {
        block.push('\t');
        block.push_str(&im.render());
        block.push('\n');
    }
    block.push_str(")\n\n");
    block
}

fn struct_def(interface_name: &str, data: &TypeData, style: &MockStyle) -> String {
    let mut def = format!("type {} struct {{\n", style.mock_name(interface_name));

    // Right-pad field names so the func types line up.
    let width = data
        .methods
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0)
        + style.func_suffix.chars().count();

    for method in &data.methods {
        let field = style.field_name(&method.name);
        def.push_str(&format!("\t{field:<width$} func{}\n", signature(method)));
    }
    for embed in &data.embeds {
        def.push_str(&format!("\t{}\n", embed.text()));
    }

    def.push_str("}\n");
    def
}

fn forwarding_method(interface_name: &str, method: &Method, style: &MockStyle) -> String {
    let names = param_names(method);
    let receiver = receiver_name(&names);
    let mock = style.mock_name(interface_name);
    let field = style.field_name(&method.name);

    let args: Vec<String> = names
        .iter()
        .zip(&method.parameters)
        .map(|(name, param)| if param.is_variadic() { format!("{name}...") } else { name.clone() })
        .collect();
    let return_kw = if method.returns.is_empty() { "" } else { "return " };

    format!(
        "func ({receiver} *{mock}) {name}{sig} {{\n\
         \tif {receiver}.{field} == nil {{\n\
         \t\tpanic(\"{mock}.{field} not defined\")\n\
         \t}}\n\
         \t{return_kw}{receiver}.{field}({args})\n\
         }}\n",
        name = method.name,
        sig = signature(method),
        args = args.join(", "),
    )
}

// ---------------------------------------------------------------------------
// Signature helpers
// ---------------------------------------------------------------------------

/// Field names that are also method names, e.g. `NameFunc` for `Name` and `NameFunc`.
fn field_method_clashes(data: &TypeData, style: &MockStyle) -> Vec<String> {
    let methods: HashSet<&str> = data.methods.iter().map(|m| m.name.as_str()).collect();
    data.methods
        .iter()
        .map(|m| style.field_name(&m.name))
        .filter(|field| methods.contains(field.as_str()))
        .collect()
}

/// Parameter names as rendered: declared names, or `param{i}` for unnamed and
/// blank parameters. A placeholder is suffixed with `_` until it matches no
/// declared name.
fn param_names(method: &Method) -> Vec<String> {
    let declared: HashSet<&str> =
        method.parameters.iter().filter_map(TypeRef::usable_name).collect();

    method
        .parameters
        .iter()
        .enumerate()
        .map(|(i, p)| match p.usable_name() {
            Some(name) => name.to_string(),
            None => {
                let mut placeholder = format!("param{i}");
                while declared.contains(placeholder.as_str()) {
                    placeholder.push('_');
                }
                placeholder
            }
        })
        .collect()
}

fn receiver_name(param_names: &[String]) -> &'static str {
    RECEIVER_NAMES
        .iter()
        .find(|r| !param_names.iter().any(|p| p == *r))
        .copied()
        .unwrap_or("mockReceiver")
}

/// `(a int, b string) (int, error)`: the part after `func`.
fn signature(method: &Method) -> String {
    let params: Vec<String> = param_names(method)
        .into_iter()
        .zip(&method.parameters)
        .map(|(name, p)| format!("{name} {}", p.full_type()))
        .collect();
    format!("({}){}", params.join(", "), returns_suffix(&method.returns))
}

fn returns_suffix(returns: &[TypeRef]) -> String {
    match returns {
        [] => String::new(),
        [single] => format!(" {}", single.full_type()),
        many => {
            let types: Vec<String> = many.iter().map(TypeRef::full_type).collect();
            format!(" ({})", types.join(", "))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
