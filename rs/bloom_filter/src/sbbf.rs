//! Split block bloom filter: the bit set is divided into 256 bit blocks,
//! a value hashes to exactly one block, and all eight probe bits live in
//! that block. Block selection and per-word masks follow the format's
//! published algorithm bit for bit; any deviation breaks interoperability
//! with other writers and readers of the same files.

use byteorder::{ByteOrder, LittleEndian};
use log::warn;
use thiserror::Error;

use crate::hasher::{hash64, HashError, ParquetValue};

/// Salt constants from the format's block split bloom filter definition.
const SALT: [u32; 8] = [
    0x47b6137b, 0x44974d91, 0x8824ad5b, 0xa2b7289d, 0x705495c7, 0x2df1424b, 0x9efc4947, 0x5c6bfb31,
];

pub const WORDS_PER_BLOCK: usize = 8;
pub const WORD_SIZE_BITS: usize = 32;
/// 8 x 32 bit words = 32 bytes, one cache-line-friendly block.
pub const BLOCK_SIZE_BYTES: usize = WORDS_PER_BLOCK * WORD_SIZE_BITS / 8;

/// Smallest filter the sizing policy will produce.
pub const LOWER_BOUND_BYTES: usize = 1024;
/// Largest filter; matches the default row group byte size.
pub const UPPER_BOUND_BYTES: usize = 128 * 1024 * 1024;

pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.001;
pub const DEFAULT_NUM_DISTINCT: u64 = 128 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid bloom filter configuration: {0}")]
    InvalidConfiguration(String),
    #[error("bloom filter body length {0} is not a positive multiple of the 32 byte block size")]
    InvalidBodyLength(usize),
}

/// One filter block: eight 32 bit words, each word an array of bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block([u32; WORDS_PER_BLOCK]);

impl Block {
    const ZERO: Block = Block([0; WORDS_PER_BLOCK]);

    /// Mask with exactly one bit set per word: word i gets bit
    /// `(x * SALT[i]) >> 27` of the wrapping 32 bit product.
    fn mask(x: u32) -> Self {
        let mut words = [0u32; WORDS_PER_BLOCK];
        for (word, salt) in words.iter_mut().zip(SALT) {
            *word = 1 << (x.wrapping_mul(salt) >> 27);
        }
        Block(words)
    }

    fn insert(&mut self, x: u32) {
        let mask = Block::mask(x);
        for (word, m) in self.0.iter_mut().zip(mask.0) {
            *word |= m;
        }
    }

    fn check(&self, x: u32) -> bool {
        let mask = Block::mask(x);
        self.0.iter().zip(mask.0).all(|(word, m)| word & m != 0)
    }

    pub fn words(&self) -> &[u32; WORDS_PER_BLOCK] {
        &self.0
    }
}

/// The filter itself. Created once per filtered column per row group,
/// populated by inserts while rows are appended, serialized when the row
/// group closes; read-only after deserialization on the read path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitBlockBloomFilter {
    blocks: Vec<Block>,
}

impl Default for SplitBlockBloomFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitBlockBloomFilter {
    /// Default sizing: derived from the default false positive rate and
    /// expected distinct count.
    pub fn new() -> Self {
        Self::with_blocks(optimal_num_blocks(
            DEFAULT_NUM_DISTINCT,
            DEFAULT_FALSE_POSITIVE_RATE,
        ))
    }

    /// Explicit size in bytes, clamped into the supported bounds and
    /// rounded up to a power of two.
    pub fn with_num_filter_bytes(num_bytes: usize) -> Result<Self, FilterError> {
        if num_bytes == 0 {
            return Err(FilterError::InvalidConfiguration(
                "filter byte size must be positive".to_string(),
            ));
        }
        let adjusted = num_bytes
            .clamp(LOWER_BOUND_BYTES, UPPER_BOUND_BYTES)
            .next_power_of_two();
        if adjusted != num_bytes {
            warn!("adjusted requested filter size from {num_bytes} to {adjusted} bytes");
        }
        Ok(Self::with_blocks(adjusted / BLOCK_SIZE_BYTES))
    }

    /// Size derived from an expected distinct count and a target false
    /// positive rate.
    pub fn with_ndv_fpp(num_distinct: u64, fpp: f64) -> Result<Self, FilterError> {
        if num_distinct == 0 {
            return Err(FilterError::InvalidConfiguration(
                "expected distinct count must be positive".to_string(),
            ));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(FilterError::InvalidConfiguration(format!(
                "false positive rate must be in (0, 1), got {fpp}"
            )));
        }
        Ok(Self::with_blocks(optimal_num_blocks(num_distinct, fpp)))
    }

    fn with_blocks(num_blocks: usize) -> Self {
        SplitBlockBloomFilter {
            blocks: vec![Block::ZERO; num_blocks],
        }
    }

    /// Multiply-high reduction of the hash's upper half onto the block
    /// range; unbiased for any block count, unlike a modulo.
    fn block_index(&self, hash: u64) -> usize {
        (((hash >> 32).wrapping_mul(self.blocks.len() as u64)) >> 32) as usize
    }

    /// Inserting the same value twice leaves the filter unchanged.
    pub fn insert(&mut self, value: &ParquetValue) -> Result<(), HashError> {
        let hash = hash64(value)?;
        self.insert_hash(hash);
        Ok(())
    }

    pub fn insert_hash(&mut self, hash: u64) {
        let index = self.block_index(hash);
        self.blocks[index].insert(hash as u32);
    }

    /// True if the value may have been inserted; false means definitely
    /// not.
    pub fn check(&self, value: &ParquetValue) -> Result<bool, HashError> {
        Ok(self.check_hash(hash64(value)?))
    }

    pub fn check_hash(&self, hash: u64) -> bool {
        let index = self.block_index(hash);
        self.blocks[index].check(hash as u32)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn num_filter_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn num_filter_bytes(&self) -> usize {
        self.blocks.len() * BLOCK_SIZE_BYTES
    }

    /// Raw block bytes: eight little endian words per block, filter
    /// order, no padding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.num_filter_bytes()];
        for (block, chunk) in self.blocks.iter().zip(out.chunks_exact_mut(BLOCK_SIZE_BYTES)) {
            LittleEndian::write_u32_into(block.words(), chunk);
        }
        out
    }

    /// Rebuilds a filter from its raw block bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FilterError> {
        if bytes.is_empty() || bytes.len() % BLOCK_SIZE_BYTES != 0 {
            return Err(FilterError::InvalidBodyLength(bytes.len()));
        }
        let mut blocks = Vec::with_capacity(bytes.len() / BLOCK_SIZE_BYTES);
        for chunk in bytes.chunks_exact(BLOCK_SIZE_BYTES) {
            let mut words = [0u32; WORDS_PER_BLOCK];
            LittleEndian::read_u32_into(chunk, &mut words);
            blocks.push(Block(words));
        }
        Ok(SplitBlockBloomFilter { blocks })
    }
}

/// Smallest block count whose filter meets `fpp` for `num_distinct`
/// insertions, using the standard capacity relation adapted to the eight
/// word block structure. The byte count is clamped into the supported
/// bounds and rounded up to a power of two, which is always a whole
/// number of blocks.
fn optimal_num_blocks(num_distinct: u64, fpp: f64) -> usize {
    let bits = -8.0 * num_distinct as f64 / (1.0 - fpp.powf(1.0 / 8.0)).ln();
    // float-to-int casts saturate, so an astronomical bit count lands on
    // the upper clamp instead of wrapping
    let num_bytes = ((bits / 8.0).ceil() as usize)
        .clamp(LOWER_BOUND_BYTES, UPPER_BOUND_BYTES)
        .next_power_of_two();
    num_bytes / BLOCK_SIZE_BYTES
}
