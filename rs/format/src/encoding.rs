use strum::{Display, EnumString};

/// Page encodings the write path accepts. Only membership validation
/// happens at schema level; the page codec layer owns the actual
/// encode/decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Encoding {
    #[default]
    Plain,
    Rle,
}
