use crate::thrift::{
    CompactReader, CompactWriter, ThriftError, COMPACT_TYPE_I32, COMPACT_TYPE_STRUCT,
};

/// Filter bit layout algorithm. The format currently defines a single
/// value but reserves the field for future algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BloomFilterAlgorithm {
    #[default]
    Block,
}

/// Hash function feeding the filter. Only xxHash is defined today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BloomFilterHash {
    #[default]
    XxHash,
}

/// Compression applied to the filter body. Only uncompressed is defined
/// today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BloomFilterCompression {
    #[default]
    Uncompressed,
}

/// Header stored immediately before the filter block bytes inside a
/// column chunk.
///
/// Thrift layout: field 1 = i32 body byte length; fields 2..4 = unions
/// whose single defined variant is an empty struct at field id 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BloomFilterHeader {
    pub num_bytes: i32,
    pub algorithm: BloomFilterAlgorithm,
    pub hash: BloomFilterHash,
    pub compression: BloomFilterCompression,
}

impl BloomFilterHeader {
    pub fn new(num_bytes: i32) -> Self {
        BloomFilterHeader {
            num_bytes,
            ..Default::default()
        }
    }

    /// Compact-protocol bytes of the header.
    pub fn serialize(&self) -> Vec<u8> {
        let mut writer = CompactWriter::new();
        writer.write_i32_field(1, self.num_bytes);
        for id in 2i16..=4 {
            writer.begin_struct_field(id);
            writer.begin_struct_field(1);
            writer.end_struct();
            writer.end_struct();
        }
        writer.write_stop();
        writer.into_bytes()
    }

    /// Parses a header from the start of `bytes`; returns the header and
    /// the number of bytes it occupied, so callers can locate the filter
    /// body that follows.
    pub fn deserialize(bytes: &[u8]) -> Result<(Self, usize), ThriftError> {
        let mut reader = CompactReader::new(bytes);
        let mut num_bytes = None;
        while let Some((field_type, id)) = reader.read_field_header()? {
            match (id, field_type) {
                (1, COMPACT_TYPE_I32) => num_bytes = Some(reader.read_i32()?),
                // Each tag union has exactly one defined variant; accept
                // and discard whatever variant is present.
                (2..=4, COMPACT_TYPE_STRUCT) => reader.skip_struct()?,
                _ => return Err(ThriftError::UnsupportedFieldType { field_type, id }),
            }
        }
        let num_bytes = num_bytes.ok_or(ThriftError::MissingField("numBytes"))?;
        Ok((BloomFilterHeader::new(num_bytes), reader.position()))
    }
}

/// The slice of a column chunk's metadata this crate touches. The full
/// record belongs to the file-level metadata layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMetaData {
    pub path_in_schema: Vec<String>,
    pub num_values: i64,
    pub total_compressed_size: i64,
    pub total_uncompressed_size: i64,
    pub bloom_filter_offset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnChunk {
    pub file_offset: i64,
    pub meta_data: Option<ColumnMetaData>,
}
