//! TypeScript declaration generator.
//!
//! Declarations accumulate in an insertion-ordered map keyed by declared
//! name. Re-inserting a name replaces the text but keeps its position, so
//! later passes are authoritative without reordering the output:
//!
//! 1. seed placeholders for names the documentation references loosely
//! 2. one declaration per model type (plus synthetic field enums)
//! 3. fixed post declarations (`Transform`)
//!
//! The joined declarations are followed by the node-union footer.

use apidoc_core::{NODE_BASE_TYPE, NODE_KINDS, ObjectType, PropType, Scalar, TypeTag};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name the node base interface is emitted under; `Node` itself becomes the
/// generic union in the footer.
pub const NODE_BASE_INTERFACE: &str = "NodeBase";

const STYLE_MAP_TS: &str = "{ [styleType in 'TEXT' | 'FILL' | 'EFFECT' | 'GRID']: string }";
const TYPE_STYLE_MAP_TS: &str = "{ [mapId: number]: TypeStyle }";

/// Emitter switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsOptions {
    /// Prefix every top-level declaration with `export`
    #[serde(default)]
    pub export: bool,
}

impl TsOptions {
    fn prefix(&self) -> &'static str {
        if self.export { "export " } else { "" }
    }
}

type Declarations = IndexMap<String, String>;

/// Generates the complete TypeScript module for a model.
///
/// # Examples
///
/// ```
/// use apidoc_codegen::{TsOptions, generate_typescript};
/// use apidoc_core::{ObjectType, PropType};
///
/// let model = vec![ObjectType::object("Foo").with_prop(PropType::new("a", "Number"))];
/// let ts = generate_typescript(&model, &TsOptions::default());
/// assert!(ts.contains("interface Foo {\n\ta: number;\n}"));
/// assert!(ts.contains("type NodeType = keyof NodeTypes;"));
/// ```
pub fn generate_typescript(model: &[ObjectType], options: &TsOptions) -> String {
    let decls = seed_declarations(options);
    let decls = model
        .iter()
        .fold(decls, |decls, object| declare_object(decls, object, options));
    let decls = post_declarations(decls, options);

    debug!(declarations = decls.len(), "Generated TypeScript declarations");

    let body = decls.values().map(String::as_str).collect::<Vec<_>>().join("\n\n");
    body + &footer(options)
}

fn seed_declarations(options: &TsOptions) -> Declarations {
    let prefix = options.prefix();
    let mut decls = Declarations::new();
    decls.insert("Path".to_string(), format!("{prefix}type Path = string;"));
    decls.insert(
        "StyleType".to_string(),
        format!("{prefix}type StyleType = 'FILL'|'TEXT'|'EFFECT'|'GRID'|string;"),
    );
    decls.insert("PageInfo".to_string(), format!("{prefix}type PageInfo = unknown;"));
    decls
}

fn post_declarations(mut decls: Declarations, options: &TsOptions) -> Declarations {
    decls.insert(
        "Transform".to_string(),
        format!(
            "/** A 2x3 affine transformation matrix\n * the identity matrix would be [[1, 0, 0], [0, 1, 0]] */\n{}type Transform = [ [number,number,number], [number,number,number] ];",
            options.prefix()
        ),
    );
    decls
}

fn declare_object(
    mut decls: Declarations,
    object: &ObjectType,
    options: &TsOptions,
) -> Declarations {
    let prefix = options.prefix();
    let mut code = doc_comment(&object.desc, "");

    if object.is_enum {
        code.push_str(&enum_declaration(&object.name, &object.enum_values, prefix));
        decls.insert(object.name.clone(), code);
        return decls;
    }

    let name = if object.name == NODE_BASE_TYPE {
        NODE_BASE_INTERFACE
    } else {
        object.name.as_str()
    };

    code.push_str(&format!("{prefix}interface {name} "));
    if let Some(parent) = object.parent() {
        code.push_str(&format!("extends {parent} "));
    }
    code.push_str("{\n");

    let mut after_divider = false;
    for prop in &object.props {
        if prop.is_divider() {
            after_divider = true;
            continue;
        }
        code.push_str(&field_declaration(&mut decls, name, prop, after_divider, prefix));
    }
    code.push('}');

    decls.insert(name.to_string(), code);
    decls
}

fn field_declaration(
    decls: &mut Declarations,
    owner: &str,
    prop: &PropType,
    after_divider: bool,
    prefix: &str,
) -> String {
    let marker = if prop.optional || after_divider { "?" } else { "" };
    let mut code = doc_comment(&prop.desc, "\t");
    code.push_str(&format!("\t{}{marker}: ", prop.name));

    if prop.is_enum {
        let enum_name = format!("{owner}{}", capitalize(&prop.name));
        decls.insert(
            enum_name.clone(),
            enum_declaration(&enum_name, &prop.enum_values, prefix),
        );
        code.push_str(&enum_name);
    } else {
        code.push_str(&ts_type(&prop.tag()));
    }

    if prop.may_be_null() {
        code.push_str("|null");
    }
    code.push_str(";\n");
    code
}

/// Maps a parsed type tag to TypeScript.
pub fn ts_type(tag: &TypeTag) -> String {
    match tag {
        TypeTag::Scalar(Scalar::Number) => "number".to_string(),
        TypeTag::Scalar(Scalar::String) => "string".to_string(),
        TypeTag::Scalar(Scalar::Boolean) => "boolean".to_string(),
        TypeTag::Scalar(Scalar::Any) => "any".to_string(),
        TypeTag::StyleMap => STYLE_MAP_TS.to_string(),
        TypeTag::TypeStyleMap => TYPE_STYLE_MAP_TS.to_string(),
        TypeTag::Array(inner) => format!("{}[]", ts_type(inner)),
        TypeTag::Reference(name) => name.clone(),
    }
}

fn enum_declaration(name: &str, values: &[String], prefix: &str) -> String {
    let members = values
        .iter()
        .map(|value| {
            // `%` is not valid in a bare member name
            if value.contains('%') {
                format!("\t\"{value}\" = '{value}'")
            } else {
                format!("\t{value} = '{value}'")
            }
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{prefix}enum {name} {{\n{members}\n}}")
}

/// Renders a JSDoc block, or nothing for a blank description.
fn doc_comment(desc: &str, indent: &str) -> String {
    if desc.trim().is_empty() {
        return String::new();
    }
    let body = desc
        .split('\n')
        .map(|line| format!("{indent} * {line}  "))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{indent}/**\n{body}\n{indent} */\n")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn footer(options: &TsOptions) -> String {
    let prefix = options.prefix();
    let entries: String = NODE_KINDS
        .iter()
        .map(|kind| format!("    /** {} */\n    {}: {},\n", kind.doc, kind.name, kind.name))
        .collect();

    let node_types = format!(
        "\n{prefix}type NodeTypes = {{\n{entries}}};\n\n{prefix}type NodeType = keyof NodeTypes;\n"
    );
    let node = format!(
        "\n{prefix}type Node<NType extends NodeType = NodeType> = {NODE_BASE_INTERFACE} & NodeTypes[NType];\n"
    );
    let is_node_type = format!(
        "\n{prefix}function isNodeType<NType extends NodeType, R = Node<NType>>(node: Node<any>, type: NType): node is R {{\n    return node.type === type;\n}}\n"
    );

    [node_types, node, is_node_type].join("\n")
}
