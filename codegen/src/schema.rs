//! JSON Schema (draft-04) generator.
//!
//! Mirrors the TypeScript generator's pipeline: seed definitions, one
//! definition per model type, then authoritative post definitions that close
//! the node union and add the map helper schemas.

use std::collections::BTreeMap;

use apidoc_core::{
    NODE_BASE_TYPE, NODE_DISCRIMINANT, NODE_KINDS, ObjectType, PropType, Scalar, TypeTag,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Definition names the generator adds on its own.
pub const STYLES_MAP: &str = "StylesMap";
pub const TYPE_STYLE_MAP: &str = "TypeStyleMap";
pub const TRANSFORM: &str = "Transform";

const STYLE_KEYS: [&str; 4] = ["TEXT", "FILL", "EFFECT", "GRID"];
const STYLE_TYPES: [&str; 4] = ["FILL", "TEXT", "EFFECT", "GRID"];

/// Primitive JSON type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// The `type` keyword: one name or a union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(JsonType),
    Union(Vec<JsonType>),
}

/// The `items` keyword: a uniform item schema or an exact tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Uniform(Box<Schema>),
    Tuple(Vec<Schema>),
}

/// The subset of draft-04 the generator emits. Unset keywords are omitted,
/// so `Schema::default()` serializes to `{}` (accepts anything).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    #[serde(rename = "additionalItems", default, skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Box<Schema>>,
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<Schema>>,
    #[serde(rename = "anyOf", default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,
    #[serde(rename = "oneOf", default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,
}

impl Schema {
    /// `{}`
    pub fn any() -> Self {
        Self::default()
    }

    pub fn typed(json_type: JsonType) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(json_type)),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::typed(JsonType::String)
    }

    pub fn number() -> Self {
        Self::typed(JsonType::Number)
    }

    pub fn boolean() -> Self {
        Self::typed(JsonType::Boolean)
    }

    pub fn string_enum(values: &[String]) -> Self {
        Self {
            enum_values: Some(values.to_vec()),
            ..Self::string()
        }
    }

    /// `{"$ref": "#/definitions/<name>"}`
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("#/definitions/{name}")),
            ..Self::default()
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Items::Uniform(Box::new(items))),
            ..Self::typed(JsonType::Array)
        }
    }

    /// Fixed-length array: exactly the given items, nothing after them.
    pub fn tuple(items: Vec<Schema>) -> Self {
        Self {
            items: Some(Items::Tuple(items)),
            additional_items: Some(false),
            ..Self::typed(JsonType::Array)
        }
    }

    pub fn any_of(variants: Vec<Schema>) -> Self {
        Self {
            any_of: Some(variants),
            ..Self::default()
        }
    }

    /// Object schema; `required` is omitted when empty.
    pub fn object(properties: IndexMap<String, Schema>, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties),
            required: (!required.is_empty()).then_some(required),
            ..Self::typed(JsonType::Object)
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        if !desc.trim().is_empty() {
            self.description = Some(desc.to_string());
        }
        self
    }

    /// Lets the schema also accept `null`.
    ///
    /// A plain typed schema gains `"null"` in its type union. A reference or
    /// an enum cannot be widened that way and is wrapped in
    /// `anyOf[schema, {"type": "null"}]`. `{}` already accepts `null`.
    pub fn nullable(mut self) -> Self {
        if self.reference.is_some() || self.enum_values.is_some() {
            return Self::any_of(vec![self, Self::typed(JsonType::Null)]);
        }
        self.schema_type = match self.schema_type.take() {
            None => None,
            Some(SchemaType::Single(JsonType::Null)) => Some(SchemaType::Single(JsonType::Null)),
            Some(SchemaType::Single(t)) => Some(SchemaType::Union(vec![t, JsonType::Null])),
            Some(SchemaType::Union(mut types)) => {
                if !types.contains(&JsonType::Null) {
                    types.push(JsonType::Null);
                }
                Some(SchemaType::Union(types))
            }
        };
        self
    }

    /// Returns `true` when a literal `null` passes the `type` keyword.
    pub fn accepts_null(&self) -> bool {
        let by_type = match &self.schema_type {
            None => {
                self.reference.is_none()
                    && self.enum_values.is_none()
                    && self.any_of.is_none()
                    && self.one_of.is_none()
            }
            Some(SchemaType::Single(t)) => *t == JsonType::Null,
            Some(SchemaType::Union(types)) => types.contains(&JsonType::Null),
        };
        by_type
            || self
                .any_of
                .as_ref()
                .is_some_and(|variants| variants.iter().any(Schema::accepts_null))
    }
}

/// Top-level draft-04 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "type")]
    pub schema_type: JsonType,
    pub properties: IndexMap<String, Schema>,
    pub definitions: IndexMap<String, Schema>,
}

impl SchemaDocument {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

type Definitions = IndexMap<String, Schema>;

/// Generates the schema document.
///
/// `root_properties` maps top-level property names to the definition each
/// must match, e.g. `document → DOCUMENT`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use apidoc_codegen::generate_schema;
/// use apidoc_core::{ObjectType, PropType};
///
/// let model = vec![ObjectType::object("Foo").with_prop(PropType::new("a", "Number"))];
/// let doc = generate_schema(&model, &BTreeMap::new());
/// let foo = serde_json::to_value(&doc.definitions["Foo"]).unwrap();
/// assert_eq!(
///     foo,
///     serde_json::json!({"type": "object", "properties": {"a": {"type": "number"}}, "required": ["a"]})
/// );
/// ```
pub fn generate_schema(
    model: &[ObjectType],
    root_properties: &BTreeMap<String, String>,
) -> SchemaDocument {
    let defs = seed_definitions();
    let defs = model.iter().fold(defs, define_object);
    let defs = post_definitions(defs);

    debug!(definitions = defs.len(), "Generated schema definitions");

    SchemaDocument {
        schema: DRAFT_04.to_string(),
        schema_type: JsonType::Object,
        properties: root_properties
            .iter()
            .map(|(name, target)| (name.clone(), Schema::reference(target)))
            .collect(),
        definitions: defs,
    }
}

fn seed_definitions() -> Definitions {
    let mut defs = Definitions::new();
    defs.insert("Path".to_string(), Schema::string());
    defs.insert(
        "StyleType".to_string(),
        Schema::any_of(vec![
            Schema::string(),
            Schema::string_enum(&STYLE_TYPES.map(|k| k.to_string())),
        ]),
    );
    defs.insert("PageInfo".to_string(), Schema::any());
    defs
}

fn define_object(mut defs: Definitions, object: &ObjectType) -> Definitions {
    let schema = if object.is_enum {
        Schema::string_enum(&object.enum_values).with_description(&object.desc)
    } else {
        object_schema(object)
    };
    defs.insert(object.name.clone(), schema);
    defs
}

fn object_schema(object: &ObjectType) -> Schema {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();
    let mut after_divider = false;

    for prop in &object.props {
        if prop.is_divider() {
            after_divider = true;
            continue;
        }
        if !prop.optional && !after_divider {
            required.push(prop.name.clone());
        }
        properties.insert(prop.name.clone(), field_schema(prop));
    }

    let mut schema = Schema::object(properties, required).with_description(&object.desc);
    if let Some(parent) = object.parent() {
        schema.extends = Some(Box::new(Schema::reference(parent)));
    }
    schema
}

fn field_schema(prop: &PropType) -> Schema {
    let schema = if prop.is_enum {
        Schema::string_enum(&prop.enum_values).with_description(&prop.desc)
    } else {
        tag_schema(&prop.tag())
    };
    if prop.may_be_null() {
        schema.nullable()
    } else {
        schema
    }
}

/// Maps a parsed type tag to its schema.
pub fn tag_schema(tag: &TypeTag) -> Schema {
    match tag {
        TypeTag::Scalar(Scalar::Number) => Schema::number(),
        TypeTag::Scalar(Scalar::String) => Schema::string(),
        TypeTag::Scalar(Scalar::Boolean) => Schema::boolean(),
        TypeTag::Scalar(Scalar::Any) => Schema::any(),
        TypeTag::StyleMap => Schema::reference(STYLES_MAP),
        TypeTag::TypeStyleMap => Schema::reference(TYPE_STYLE_MAP),
        TypeTag::Array(inner) => Schema::array(tag_schema(inner)),
        TypeTag::Reference(name) => Schema::reference(name),
    }
}

fn post_definitions(mut defs: Definitions) -> Definitions {
    let row = || Schema::tuple(vec![Schema::number(), Schema::number(), Schema::number()]);
    defs.insert(
        TRANSFORM.to_string(),
        Schema::tuple(vec![row(), row()]).with_description(
            "A 2x3 affine transformation matrix\n * the identity matrix would be [[1, 0, 0], [0, 1, 0]]",
        ),
    );

    let base = defs.get(NODE_BASE_TYPE).cloned().unwrap_or_else(|| {
        warn!(
            type_name = NODE_BASE_TYPE,
            "Node base type missing, node schemas get no shared fields"
        );
        Schema::default()
    });

    defs.insert(
        NODE_BASE_TYPE.to_string(),
        Schema {
            description: base.description.clone(),
            one_of: Some(NODE_KINDS.iter().map(|k| Schema::reference(k.name)).collect()),
            ..Schema::typed(JsonType::Object)
        },
    );

    for kind in NODE_KINDS {
        let own = defs.get(kind.name).cloned().unwrap_or_else(|| {
            warn!(node_kind = kind.name, "Node kind missing from model");
            Schema::default()
        });
        defs.insert(kind.name.to_string(), node_kind_schema(kind.name, own, &base));
    }

    let mut styles = IndexMap::new();
    for key in STYLE_KEYS {
        styles.insert(key.to_string(), Schema::string());
    }
    defs.insert(
        STYLES_MAP.to_string(),
        Schema::object(styles, STYLE_KEYS.iter().map(|k| k.to_string()).collect()),
    );

    defs.insert(
        TYPE_STYLE_MAP.to_string(),
        Schema {
            additional_properties: Some(Box::new(Schema::reference("TypeStyle"))),
            ..Schema::typed(JsonType::Object)
        },
    );

    defs
}

/// Self-contained schema for one node kind: its own fields, the base fields
/// (base wins on conflict) and the literal discriminant.
fn node_kind_schema(kind: &str, own: Schema, base: &Schema) -> Schema {
    let mut properties = own.properties.unwrap_or_default();
    if let Some(base_props) = &base.properties {
        for (name, schema) in base_props {
            properties.insert(name.clone(), schema.clone());
        }
    }
    properties.insert(
        NODE_DISCRIMINANT.to_string(),
        Schema::string_enum(&[kind.to_string()]),
    );

    let mut required = own.required.unwrap_or_default();
    for name in base.required.iter().flatten() {
        if !required.contains(name) {
            required.push(name.clone());
        }
    }

    Schema {
        description: own.description,
        ..Schema::object(properties, required)
    }
}
