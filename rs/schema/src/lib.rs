pub mod builder;
pub mod definition;
pub mod error;
pub mod fields;
#[allow(clippy::module_inception)]
pub mod schema;

pub use crate::definition::{FieldDefinition, SchemaDefinition};
pub use crate::error::{FieldError, SchemaBuildError};
pub use crate::schema::{FieldPath, ParquetField, ParquetSchema};
