pub mod compression;
pub mod encoding;
pub mod metadata;
pub mod thrift;
pub mod types;

pub use crate::compression::Compression;
pub use crate::encoding::Encoding;
pub use crate::metadata::{BloomFilterHeader, ColumnChunk, ColumnMetaData};
pub use crate::types::{lookup_logical_type, OriginalType, PrimitiveType, Repetition, TypeInfo};
