//! Read-path counterpart of the writer: parses a stored filter (header
//! plus block bytes) back into a queryable filter.

use anyhow::{bail, Result};
use format::metadata::BloomFilterHeader;

use crate::sbbf::SplitBlockBloomFilter;

/// Parse a serialized filter from the start of `bytes`. Trailing bytes
/// beyond the header's claimed body length are ignored, so callers can
/// hand over the remainder of a column chunk.
pub fn read_filter_data(bytes: &[u8]) -> Result<SplitBlockBloomFilter> {
    let (header, header_len) = BloomFilterHeader::deserialize(bytes)?;
    if header.num_bytes <= 0 {
        bail!(
            "bloom filter header claims a non-positive body length: {}",
            header.num_bytes
        );
    }
    let body_len = header.num_bytes as usize;
    let body = &bytes[header_len..];
    if body.len() < body_len {
        bail!(
            "bloom filter body truncated: header claims {} bytes, {} available",
            body_len,
            body.len()
        );
    }
    Ok(SplitBlockBloomFilter::from_bytes(&body[..body_len])?)
}
