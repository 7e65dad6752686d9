pub mod hasher;
pub mod reader;
pub mod sbbf;
pub mod writer;

pub use crate::hasher::{hash64, HashError, ParquetValue};
pub use crate::reader::read_filter_data;
pub use crate::sbbf::{Block, FilterError, SplitBlockBloomFilter};
pub use crate::writer::{
    create_sbbf, serialize_filter_data, serialize_filter_headers, set_filter_offset,
    BloomFilterOptions,
};
