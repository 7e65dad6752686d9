//! Write-path adapter: resolves per-column filter options into a sized
//! filter, frames finished filters with their typed header, and records
//! the filter's offset in the column chunk metadata.

use format::metadata::{BloomFilterHeader, ColumnChunk};
use serde::{Deserialize, Serialize};

use crate::sbbf::{
    FilterError, SplitBlockBloomFilter, DEFAULT_FALSE_POSITIVE_RATE, DEFAULT_NUM_DISTINCT,
};

/// Per-column filter configuration from writer options. An explicit byte
/// size wins over the rate/count derivation; leaving everything unset
/// falls back to the default sizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomFilterOptions {
    pub num_filter_bytes: Option<usize>,
    pub false_positive_rate: Option<f64>,
    pub num_distinct: Option<u64>,
    /// Column the options apply to; the orchestration layer matches it
    /// against the schema's column keys.
    pub column: Option<String>,
}

/// Resolve options into an initialized, empty filter.
pub fn create_sbbf(options: &BloomFilterOptions) -> Result<SplitBlockBloomFilter, FilterError> {
    if let Some(num_bytes) = options.num_filter_bytes {
        return SplitBlockBloomFilter::with_num_filter_bytes(num_bytes);
    }
    if options.false_positive_rate.is_some() || options.num_distinct.is_some() {
        let fpp = options
            .false_positive_rate
            .unwrap_or(DEFAULT_FALSE_POSITIVE_RATE);
        let ndv = options.num_distinct.unwrap_or(DEFAULT_NUM_DISTINCT);
        return SplitBlockBloomFilter::with_ndv_fpp(ndv, fpp);
    }
    Ok(SplitBlockBloomFilter::new())
}

/// Header bytes for a filter body of `num_bytes`.
pub fn serialize_filter_headers(num_bytes: usize) -> Vec<u8> {
    BloomFilterHeader::new(num_bytes as i32).serialize()
}

/// Header immediately followed by the raw block bytes, no padding; this
/// is exactly what a reader expects at a stored filter offset.
pub fn serialize_filter_data(filter: &SplitBlockBloomFilter) -> Vec<u8> {
    let mut out = serialize_filter_headers(filter.num_filter_bytes());
    out.extend_from_slice(&filter.to_bytes());
    out
}

/// Record where the serialized filter starts within the column chunk.
pub fn set_filter_offset(column: &mut ColumnChunk, offset: i64) {
    column
        .meta_data
        .get_or_insert_with(Default::default)
        .bloom_filter_offset = Some(offset);
}
