use strum::{Display, EnumString};

/// Physical storage types defined by the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum PrimitiveType {
    #[strum(serialize = "BOOLEAN")]
    Boolean,
    #[strum(serialize = "INT32")]
    Int32,
    #[strum(serialize = "INT64")]
    Int64,
    #[strum(serialize = "INT96")]
    Int96,
    #[strum(serialize = "FLOAT")]
    Float,
    #[strum(serialize = "DOUBLE")]
    Double,
    #[strum(serialize = "BYTE_ARRAY")]
    ByteArray,
    #[strum(serialize = "FIXED_LEN_BYTE_ARRAY")]
    FixedLenByteArray,
}

/// Logical (converted) types. LIST and MAP only ever appear on internal
/// group nodes; everything else annotates a leaf's primitive storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum OriginalType {
    #[strum(serialize = "UTF8")]
    Utf8,
    #[strum(serialize = "MAP")]
    Map,
    #[strum(serialize = "LIST")]
    List,
    #[strum(serialize = "ENUM")]
    Enum,
    #[strum(serialize = "DECIMAL")]
    Decimal,
    #[strum(serialize = "DATE")]
    Date,
    #[strum(serialize = "TIME_MILLIS")]
    TimeMillis,
    #[strum(serialize = "TIME_MICROS")]
    TimeMicros,
    #[strum(serialize = "TIMESTAMP_MILLIS")]
    TimestampMillis,
    #[strum(serialize = "TIMESTAMP_MICROS")]
    TimestampMicros,
    #[strum(serialize = "UINT_8")]
    Uint8,
    #[strum(serialize = "UINT_16")]
    Uint16,
    #[strum(serialize = "UINT_32")]
    Uint32,
    #[strum(serialize = "UINT_64")]
    Uint64,
    #[strum(serialize = "INT_8")]
    Int8,
    #[strum(serialize = "INT_16")]
    Int16,
    #[strum(serialize = "INT_32")]
    Int32,
    #[strum(serialize = "INT_64")]
    Int64,
    #[strum(serialize = "JSON")]
    Json,
    #[strum(serialize = "BSON")]
    Bson,
    #[strum(serialize = "INTERVAL")]
    Interval,
}

/// Repetition classification of a schema field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum Repetition {
    #[default]
    #[strum(serialize = "REQUIRED")]
    Required,
    #[strum(serialize = "OPTIONAL")]
    Optional,
    #[strum(serialize = "REPEATED")]
    Repeated,
}

/// Resolution of a declared logical type name: the primitive storage type,
/// the logical annotation if any, and a default byte length for fixed-size
/// storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    pub primitive_type: PrimitiveType,
    pub original_type: Option<OriginalType>,
    pub type_length: Option<u32>,
}

impl TypeInfo {
    const fn primitive(primitive_type: PrimitiveType) -> Self {
        TypeInfo {
            primitive_type,
            original_type: None,
            type_length: None,
        }
    }

    const fn logical(primitive_type: PrimitiveType, original_type: OriginalType) -> Self {
        TypeInfo {
            primitive_type,
            original_type: Some(original_type),
            type_length: None,
        }
    }
}

/// Resolve a declared type name to its storage triple. Returns `None` for
/// unknown names and for the structural markers LIST/MAP, which are not
/// valid leaf types.
pub fn lookup_logical_type(name: &str) -> Option<TypeInfo> {
    use OriginalType as O;
    use PrimitiveType as P;

    let info = match name {
        "BOOLEAN" => TypeInfo::primitive(P::Boolean),
        "INT32" => TypeInfo::primitive(P::Int32),
        "INT64" => TypeInfo::primitive(P::Int64),
        "INT96" => TypeInfo::primitive(P::Int96),
        "FLOAT" => TypeInfo::primitive(P::Float),
        "DOUBLE" => TypeInfo::primitive(P::Double),
        "BYTE_ARRAY" => TypeInfo::primitive(P::ByteArray),
        "FIXED_LEN_BYTE_ARRAY" => TypeInfo::primitive(P::FixedLenByteArray),
        "UTF8" => TypeInfo::logical(P::ByteArray, O::Utf8),
        "ENUM" => TypeInfo::logical(P::ByteArray, O::Enum),
        "JSON" => TypeInfo::logical(P::ByteArray, O::Json),
        "BSON" => TypeInfo::logical(P::ByteArray, O::Bson),
        "DECIMAL" => TypeInfo::logical(P::Int64, O::Decimal),
        "DATE" => TypeInfo::logical(P::Int32, O::Date),
        "TIME_MILLIS" => TypeInfo::logical(P::Int32, O::TimeMillis),
        "TIME_MICROS" => TypeInfo::logical(P::Int64, O::TimeMicros),
        "TIMESTAMP_MILLIS" => TypeInfo::logical(P::Int64, O::TimestampMillis),
        "TIMESTAMP_MICROS" => TypeInfo::logical(P::Int64, O::TimestampMicros),
        "UINT_8" => TypeInfo::logical(P::Int32, O::Uint8),
        "UINT_16" => TypeInfo::logical(P::Int32, O::Uint16),
        "UINT_32" => TypeInfo::logical(P::Int32, O::Uint32),
        "UINT_64" => TypeInfo::logical(P::Int64, O::Uint64),
        "INT_8" => TypeInfo::logical(P::Int32, O::Int8),
        "INT_16" => TypeInfo::logical(P::Int32, O::Int16),
        "INT_32" => TypeInfo::logical(P::Int32, O::Int32),
        "INT_64" => TypeInfo::logical(P::Int64, O::Int64),
        "INTERVAL" => TypeInfo {
            primitive_type: P::FixedLenByteArray,
            original_type: Some(O::Interval),
            type_length: Some(12),
        },
        _ => return None,
    };
    Some(info)
}
