use strum::{Display, EnumString};

/// Compression methods a column may declare. The schema layer validates
/// membership only; the physical codecs are external.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Compression {
    #[default]
    Uncompressed,
    Gzip,
    Snappy,
    Lzo,
    Brotli,
    Lz4,
}
