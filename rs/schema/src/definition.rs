use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A nested logical schema: field name to definition, in declaration
/// order. Declaration order becomes column order in the flattened schema.
pub type SchemaDefinition = IndexMap<String, FieldDefinition>;

/// One node of the logical schema. A node declares either a `type` (leaf)
/// or nested `fields` (group), never neither. LIST and MAP groups carry
/// their repeated wrapper child inside `fields` as written by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefinition {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Byte length override for fixed-size storage types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    pub optional: bool,
    pub repeated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<SchemaDefinition>,
    /// Explicit statistics-enabled override for this column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}
