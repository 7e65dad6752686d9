use format::compression::Compression;
use format::encoding::Encoding;
use format::types::{OriginalType, PrimitiveType, Repetition};
use indexmap::IndexMap;
use log::debug;

use crate::builder::{build_fields, LevelContext};
use crate::definition::SchemaDefinition;
use crate::error::SchemaBuildError;

/// Separator used when a lookup path is given as a single string.
pub const COLUMN_KEY_SEPARATOR: char = '.';

/// One entry of the flattened field table. Levels are maxima over the
/// field's own repetition/optionality stacked on its ancestors': the
/// repetition level grows by one at every repeated ancestor, the
/// definition level at every optional or repeated one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParquetField {
    pub name: String,
    /// Full path from the root, this field included.
    pub path: Vec<String>,
    pub repetition: Repetition,
    pub r_level_max: u16,
    pub d_level_max: u16,
    pub primitive_type: Option<PrimitiveType>,
    pub original_type: Option<OriginalType>,
    pub encoding: Option<Encoding>,
    pub compression: Option<Compression>,
    pub type_length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub statistics: Option<bool>,
    pub is_nested: bool,
    pub field_count: Option<usize>,
    pub fields: Option<IndexMap<String, ParquetField>>,
}

impl ParquetField {
    /// Dot-joined column key.
    pub fn column_key(&self) -> String {
        self.path.join(".")
    }
}

/// A file schema: the logical definition plus the flat field table built
/// from it. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParquetSchema {
    schema: SchemaDefinition,
    fields: IndexMap<String, ParquetField>,
}

impl ParquetSchema {
    /// Builds the flat field table from a logical schema definition.
    /// Validation walks the entire tree and reports every broken column
    /// in one combined error.
    pub fn new(schema: SchemaDefinition) -> Result<Self, SchemaBuildError> {
        let mut errors = Vec::new();
        let fields = build_fields(&schema, &LevelContext::default(), &mut errors);
        if !errors.is_empty() {
            return Err(SchemaBuildError { errors });
        }
        debug!("built schema with {} top-level fields", fields.len());
        Ok(ParquetSchema { schema, fields })
    }

    /// The logical definition this schema was built from.
    pub fn definition(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// Top-level entries of the field table.
    pub fn fields(&self) -> &IndexMap<String, ParquetField> {
        &self.fields
    }

    /// Depth-first pre-order flattening: every parent before its
    /// descendants, siblings in declaration order.
    pub fn list_fields(&self) -> Vec<&ParquetField> {
        fn walk<'a>(fields: &'a IndexMap<String, ParquetField>, out: &mut Vec<&'a ParquetField>) {
            for field in fields.values() {
                out.push(field);
                if let Some(nested) = &field.fields {
                    walk(nested, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.fields, &mut out);
        out
    }

    /// Retrieve the field at `path`, if any.
    pub fn find_field<P: FieldPath>(&self, path: P) -> Option<&ParquetField> {
        let parts = path.into_parts();
        let mut table = &self.fields;
        let mut parts = parts.iter().peekable();
        while let Some(part) = parts.next() {
            let field = table.get(part)?;
            if parts.peek().is_none() {
                return Some(field);
            }
            table = field.fields.as_ref()?;
        }
        None
    }

    /// Retrieve the field at `path` together with every ancestor, in
    /// root-to-leaf order. Stops early if the path leaves the tree.
    pub fn find_field_branch<P: FieldPath>(&self, path: P) -> Vec<&ParquetField> {
        let parts = path.into_parts();
        let mut branch = Vec::with_capacity(parts.len());
        let mut table = &self.fields;
        for (i, part) in parts.iter().enumerate() {
            let Some(field) = table.get(part) else {
                break;
            };
            branch.push(field);
            if i + 1 < parts.len() {
                match &field.fields {
                    Some(nested) => table = nested,
                    None => break,
                }
            }
        }
        branch
    }
}

/// Lookup path argument: either a dot-delimited string or an explicit
/// sequence of field names.
pub trait FieldPath {
    fn into_parts(self) -> Vec<String>;
}

impl FieldPath for &str {
    fn into_parts(self) -> Vec<String> {
        self.split(COLUMN_KEY_SEPARATOR)
            .map(str::to_string)
            .collect()
    }
}

impl FieldPath for &String {
    fn into_parts(self) -> Vec<String> {
        self.as_str().into_parts()
    }
}

impl FieldPath for &[String] {
    fn into_parts(self) -> Vec<String> {
        self.to_vec()
    }
}

impl FieldPath for &[&str] {
    fn into_parts(self) -> Vec<String> {
        self.iter().map(|part| part.to_string()).collect()
    }
}

impl FieldPath for Vec<String> {
    fn into_parts(self) -> Vec<String> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::FieldDefinition;
    use indexmap::indexmap;

    fn leaf(type_name: &str) -> FieldDefinition {
        FieldDefinition {
            type_name: Some(type_name.to_string()),
            ..FieldDefinition::default()
        }
    }

    fn optional_leaf(type_name: &str) -> FieldDefinition {
        FieldDefinition {
            optional: true,
            ..leaf(type_name)
        }
    }

    fn group(fields: SchemaDefinition) -> FieldDefinition {
        FieldDefinition {
            fields: Some(fields),
            ..FieldDefinition::default()
        }
    }

    fn store_schema() -> ParquetSchema {
        ParquetSchema::new(indexmap! {
            "name".to_string() => leaf("UTF8"),
            "stock".to_string() => FieldDefinition {
                repeated: true,
                ..group(indexmap! {
                    "quantity".to_string() => optional_leaf("INT64"),
                    "warehouse".to_string() => leaf("UTF8"),
                })
            },
            "price".to_string() => leaf("DOUBLE"),
        })
        .unwrap()
    }

    #[test]
    fn test_flat_leaf_defaults() {
        let schema = store_schema();
        let name = schema.find_field("name").unwrap();
        assert_eq!(name.primitive_type, Some(PrimitiveType::ByteArray));
        assert_eq!(name.original_type, Some(OriginalType::Utf8));
        assert_eq!(name.encoding, Some(Encoding::Plain));
        assert_eq!(name.compression, Some(Compression::Uncompressed));
        assert_eq!(name.repetition, Repetition::Required);
        assert_eq!((name.r_level_max, name.d_level_max), (0, 0));
        assert!(!name.is_nested);
        assert_eq!(name.field_count, None);
    }

    #[test]
    fn test_nested_levels() {
        let schema = store_schema();

        let stock = schema.find_field("stock").unwrap();
        assert_eq!(stock.repetition, Repetition::Repeated);
        assert!(stock.is_nested);
        assert_eq!(stock.field_count, Some(2));
        // repeated and required: both levels bump
        assert_eq!((stock.r_level_max, stock.d_level_max), (1, 1));

        let quantity = schema.find_field("stock.quantity").unwrap();
        assert_eq!(quantity.repetition, Repetition::Optional);
        assert_eq!((quantity.r_level_max, quantity.d_level_max), (1, 2));

        let warehouse = schema.find_field("stock.warehouse").unwrap();
        assert_eq!(warehouse.repetition, Repetition::Required);
        assert_eq!((warehouse.r_level_max, warehouse.d_level_max), (1, 1));
    }

    #[test]
    fn test_repeated_group_required_leaf_levels() {
        // A required leaf two levels below a repeated group keeps the
        // group's levels: rLevelMax 1, dLevelMax 1.
        let schema = ParquetSchema::new(indexmap! {
            "events".to_string() => FieldDefinition {
                repeated: true,
                ..group(indexmap! {
                    "detail".to_string() => group(indexmap! {
                        "code".to_string() => leaf("INT64"),
                    }),
                })
            },
        })
        .unwrap();

        let code = schema.find_field("events.detail.code").unwrap();
        assert_eq!((code.r_level_max, code.d_level_max), (1, 1));
    }

    #[test]
    fn test_level_deltas_against_parent() {
        let schema = store_schema();
        for field in schema.list_fields() {
            let parent_levels = if field.path.len() > 1 {
                let parent = schema
                    .find_field(&field.path[..field.path.len() - 1])
                    .unwrap();
                (parent.r_level_max, parent.d_level_max)
            } else {
                (0, 0)
            };
            let expected_r = match field.repetition {
                Repetition::Repeated => 1,
                _ => 0,
            };
            let expected_d = match field.repetition {
                Repetition::Optional | Repetition::Repeated => 1,
                Repetition::Required => 0,
            };
            assert_eq!(field.r_level_max - parent_levels.0, expected_r);
            assert_eq!(field.d_level_max - parent_levels.1, expected_d);
        }
    }

    #[test]
    fn test_list_fields_preorder() {
        let schema = store_schema();
        let keys: Vec<String> = schema
            .list_fields()
            .iter()
            .map(|f| f.column_key())
            .collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "stock",
                "stock.quantity",
                "stock.warehouse",
                "price"
            ]
        );
    }

    #[test]
    fn test_find_field_path_forms() {
        let schema = store_schema();
        let by_string = schema.find_field("stock.quantity").unwrap();
        let by_slice = schema.find_field(&["stock", "quantity"][..]).unwrap();
        assert_eq!(by_string, by_slice);
        assert!(schema.find_field("stock.missing").is_none());
        assert!(schema.find_field("missing").is_none());
    }

    #[test]
    fn test_find_field_branch() {
        let schema = store_schema();
        let branch = schema.find_field_branch("stock.warehouse");
        assert_eq!(branch.len(), 2);
        assert_eq!(branch[0].name, "stock");
        assert_eq!(branch[1].name, "warehouse");
        assert_eq!(
            branch.last().copied(),
            schema.find_field("stock.warehouse")
        );
    }

    #[test]
    fn test_unknown_type_message() {
        let err = ParquetSchema::new(indexmap! {
            "quantity".to_string() => leaf("UNKNOWN"),
        })
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid parquet type: UNKNOWN, for Column: quantity"));
    }

    #[test]
    fn test_errors_accumulate_across_columns() {
        let err = ParquetSchema::new(indexmap! {
            "a".to_string() => leaf("UNKNOWN"),
            "b".to_string() => FieldDefinition {
                encoding: Some("DELTA".to_string()),
                compression: Some("ZSTD".to_string()),
                ..leaf("INT64")
            },
            "c".to_string() => FieldDefinition::default(),
        })
        .unwrap_err();
        assert_eq!(err.errors.len(), 4);
        let message = err.to_string();
        assert!(message.contains("Invalid parquet type: UNKNOWN, for Column: a"));
        assert!(message.contains("Unsupported parquet encoding: DELTA, for Column: b"));
        assert!(message.contains("Unsupported compression method: ZSTD, for Column: b"));
        assert!(message.contains("for Column: c"));
    }

    #[test]
    fn test_nested_error_reports_full_path() {
        let err = ParquetSchema::new(indexmap! {
            "outer".to_string() => group(indexmap! {
                "inner".to_string() => leaf("NOPE"),
            }),
        })
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid parquet type: NOPE, for Column: outer.inner"));
    }

    #[test]
    fn test_decimal_validation() {
        let decimal = |precision: Option<u32>, scale: Option<u32>| FieldDefinition {
            precision,
            scale,
            ..leaf("DECIMAL")
        };

        // precision 10 / scale 2 is fine; scale defaults to 0
        let schema = ParquetSchema::new(indexmap! {
            "price".to_string() => decimal(Some(10), Some(2)),
            "total".to_string() => decimal(Some(10), None),
        })
        .unwrap();
        assert_eq!(schema.find_field("price").unwrap().scale, Some(2));
        assert_eq!(schema.find_field("total").unwrap().scale, Some(0));
        assert_eq!(
            schema.find_field("price").unwrap().primitive_type,
            Some(PrimitiveType::Int64)
        );

        // zero/missing precision
        assert!(ParquetSchema::new(indexmap! {
            "p".to_string() => decimal(Some(0), None),
        })
        .is_err());
        assert!(ParquetSchema::new(indexmap! {
            "p".to_string() => decimal(None, None),
        })
        .is_err());

        // scale above precision
        assert!(ParquetSchema::new(indexmap! {
            "p".to_string() => decimal(Some(4), Some(5)),
        })
        .is_err());

        // INT64 storage caps precision at 18
        assert!(ParquetSchema::new(indexmap! {
            "p".to_string() => decimal(Some(19), None),
        })
        .is_err());
        assert!(ParquetSchema::new(indexmap! {
            "p".to_string() => decimal(Some(18), None),
        })
        .is_ok());
    }

    #[test]
    fn test_list_marker_survives_on_group() {
        let schema = ParquetSchema::new(indexmap! {
            "tags".to_string() => FieldDefinition {
                type_name: Some("LIST".to_string()),
                optional: true,
                ..group(indexmap! {
                    "list".to_string() => FieldDefinition {
                        repeated: true,
                        ..group(indexmap! {
                            "element".to_string() => optional_leaf("UTF8"),
                        })
                    },
                })
            },
        })
        .unwrap();

        let tags = schema.find_field("tags").unwrap();
        assert_eq!(tags.original_type, Some(OriginalType::List));
        assert!(tags.is_nested);

        let element = schema.find_field("tags.list.element").unwrap();
        assert_eq!((element.r_level_max, element.d_level_max), (1, 3));
    }

    #[test]
    fn test_schema_from_json_definition() {
        let json = r#"{
            "id": { "type": "INT64" },
            "payload": {
                "optional": true,
                "fields": {
                    "body": { "type": "UTF8", "compression": "SNAPPY" }
                }
            }
        }"#;
        let definition: SchemaDefinition = serde_json::from_str(json).unwrap();
        let schema = ParquetSchema::new(definition).unwrap();
        let body = schema.find_field("payload.body").unwrap();
        assert_eq!(body.compression, Some(Compression::Snappy));
        assert_eq!((body.r_level_max, body.d_level_max), (0, 1));
    }
}
