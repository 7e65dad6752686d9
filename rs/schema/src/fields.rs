//! Convenience constructors for common field definitions, including the
//! three-level LIST wrapper shape (`list` repeated group holding an
//! `element` field).

use indexmap::indexmap;

use crate::definition::{FieldDefinition, SchemaDefinition};

fn typed(type_name: &str, optional: bool) -> FieldDefinition {
    FieldDefinition {
        type_name: Some(type_name.to_string()),
        optional,
        ..FieldDefinition::default()
    }
}

pub fn create_string_field(optional: bool) -> FieldDefinition {
    typed("UTF8", optional)
}

pub fn create_boolean_field(optional: bool) -> FieldDefinition {
    typed("BOOLEAN", optional)
}

/// `size` is the integer bit width, 32 or 64. An unsupported width
/// surfaces as an unresolved type when the schema is built.
pub fn create_int_field(size: u32, optional: bool) -> FieldDefinition {
    typed(&format!("INT{size}"), optional)
}

pub fn create_float_field(optional: bool) -> FieldDefinition {
    typed("FLOAT", optional)
}

pub fn create_double_field(optional: bool) -> FieldDefinition {
    typed("DOUBLE", optional)
}

pub fn create_decimal_field(precision: u32, scale: u32, optional: bool) -> FieldDefinition {
    FieldDefinition {
        precision: Some(precision),
        scale: Some(scale),
        ..typed("DECIMAL", optional)
    }
}

pub fn create_timestamp_field(optional: bool) -> FieldDefinition {
    typed("TIMESTAMP_MILLIS", optional)
}

pub fn create_struct_field(fields: SchemaDefinition, optional: bool) -> FieldDefinition {
    FieldDefinition {
        optional,
        fields: Some(fields),
        ..FieldDefinition::default()
    }
}

/// A LIST of structs: `{list: {repeated, fields: {element: {fields}}}}`.
pub fn create_struct_list_field(fields: SchemaDefinition, optional: bool) -> FieldDefinition {
    FieldDefinition {
        type_name: Some("LIST".to_string()),
        optional,
        fields: Some(indexmap! {
            "list".to_string() => FieldDefinition {
                repeated: true,
                fields: Some(indexmap! {
                    "element".to_string() => FieldDefinition {
                        fields: Some(fields),
                        ..FieldDefinition::default()
                    },
                }),
                ..FieldDefinition::default()
            },
        }),
        ..FieldDefinition::default()
    }
}

/// A LIST of primitive elements.
pub fn create_list_field(
    element_type: &str,
    optional: bool,
    element_optional: bool,
) -> FieldDefinition {
    FieldDefinition {
        type_name: Some("LIST".to_string()),
        optional,
        fields: Some(indexmap! {
            "list".to_string() => FieldDefinition {
                repeated: true,
                fields: Some(indexmap! {
                    "element".to_string() => typed(element_type, element_optional),
                }),
                ..FieldDefinition::default()
            },
        }),
        ..FieldDefinition::default()
    }
}
