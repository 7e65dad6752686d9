//! The recursive schema walk: turns a nested logical definition into the
//! flat field table, computing maximum repetition and definition levels
//! along every root-to-leaf path.

use format::compression::Compression;
use format::encoding::Encoding;
use format::types::{lookup_logical_type, OriginalType, PrimitiveType, Repetition, TypeInfo};
use indexmap::IndexMap;

use crate::definition::{FieldDefinition, SchemaDefinition};
use crate::error::FieldError;
use crate::schema::ParquetField;

/// Accumulator state carried top-down through the walk; each call only
/// reads its parent's levels and path and derives its own.
#[derive(Debug, Clone, Default)]
pub(crate) struct LevelContext {
    pub r_level_max: u16,
    pub d_level_max: u16,
    pub path: Vec<String>,
}

pub(crate) fn build_fields(
    schema: &SchemaDefinition,
    ctx: &LevelContext,
    errors: &mut Vec<FieldError>,
) -> IndexMap<String, ParquetField> {
    let mut built = IndexMap::with_capacity(schema.len());

    for (name, def) in schema {
        let required = !def.optional;
        let repeated = def.repeated;

        let mut r_level_max = ctx.r_level_max;
        let mut d_level_max = ctx.d_level_max;
        let mut repetition = Repetition::Required;
        if !required {
            repetition = Repetition::Optional;
            d_level_max += 1;
        }
        if repeated {
            repetition = Repetition::Repeated;
            r_level_max += 1;
            // A repeated group that is also required still needs a
            // definition level to mark zero occurrences.
            if required {
                d_level_max += 1;
            }
        }

        let mut path = ctx.path.clone();
        path.push(name.clone());

        if let Some(children) = &def.fields {
            // LIST/MAP markers survive on the group node only.
            let original_type = match def.type_name.as_deref() {
                Some("LIST") => Some(OriginalType::List),
                Some("MAP") => Some(OriginalType::Map),
                _ => None,
            };
            let child_ctx = LevelContext {
                r_level_max,
                d_level_max,
                path: path.clone(),
            };
            let nested = build_fields(children, &child_ctx, errors);
            built.insert(
                name.clone(),
                ParquetField {
                    name: name.clone(),
                    path,
                    repetition,
                    r_level_max,
                    d_level_max,
                    original_type,
                    statistics: def.statistics,
                    is_nested: true,
                    field_count: Some(children.len()),
                    fields: Some(nested),
                    ..ParquetField::default()
                },
            );
            continue;
        }

        let column = path.join(".");

        let Some(type_name) = def.type_name.as_deref() else {
            errors.push(FieldError::UnsupportedSchemaConstruct { column });
            continue;
        };

        let Some(type_info) = lookup_logical_type(type_name) else {
            errors.push(FieldError::UnresolvedType {
                type_name: type_name.to_string(),
                column,
            });
            continue;
        };

        let encoding = match def.encoding.as_deref() {
            None => Some(Encoding::default()),
            Some(name) => match name.parse::<Encoding>() {
                Ok(encoding) => Some(encoding),
                Err(_) => {
                    errors.push(FieldError::UnsupportedEncoding {
                        encoding: name.to_string(),
                        column: column.clone(),
                    });
                    None
                }
            },
        };

        let compression = match def.compression.as_deref() {
            None => Some(Compression::default()),
            Some(name) => match name.parse::<Compression>() {
                Ok(compression) => Some(compression),
                Err(_) => {
                    errors.push(FieldError::UnsupportedCompression {
                        method: name.to_string(),
                        column: column.clone(),
                    });
                    None
                }
            },
        };

        let mut scale = def.scale;
        if type_info.original_type == Some(OriginalType::Decimal) {
            scale = Some(def.scale.unwrap_or(0));
            validate_decimal(&type_info, def, &column, errors);
        }

        built.insert(
            name.clone(),
            ParquetField {
                name: name.clone(),
                path,
                repetition,
                r_level_max,
                d_level_max,
                primitive_type: Some(type_info.primitive_type),
                original_type: type_info.original_type,
                encoding,
                compression,
                type_length: def.type_length.or(type_info.type_length),
                precision: def.precision,
                scale,
                statistics: def.statistics,
                is_nested: false,
                field_count: None,
                fields: None,
            },
        );
    }

    built
}

/// Decimal constraints: precision is required and positive; INT64-backed
/// decimals hold at most 18 decimal digits; scale defaults to 0 and must
/// not exceed precision. Every violation is reported, not just the first.
fn validate_decimal(
    type_info: &TypeInfo,
    def: &FieldDefinition,
    column: &str,
    errors: &mut Vec<FieldError>,
) {
    match def.precision {
        None | Some(0) => errors.push(FieldError::InvalidDecimalSpec {
            column: column.to_string(),
            reason: "precision is required and must be greater than 0".to_string(),
        }),
        Some(precision) => {
            if type_info.primitive_type == PrimitiveType::Int64 && precision > 18 {
                errors.push(FieldError::InvalidDecimalSpec {
                    column: column.to_string(),
                    reason: format!("precision {precision} exceeds the 18 digit INT64 limit"),
                });
            }
            let scale = def.scale.unwrap_or(0);
            if scale > precision {
                errors.push(FieldError::InvalidDecimalSpec {
                    column: column.to_string(),
                    reason: format!("scale {scale} must not exceed precision {precision}"),
                });
            }
        }
    }
}
