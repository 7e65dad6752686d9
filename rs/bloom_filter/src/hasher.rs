use std::borrow::Cow;

use thiserror::Error;
use xxhash_rust::xxh64::xxh64;

/// Hash seed fixed to 0 per the format's bloom filter specification.
pub const HASH_SEED: u64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("unsupported value type for bloom filter hashing: {0}")]
    UnsupportedValueType(&'static str),
}

/// A single column value as handed over by the row shredding layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParquetValue {
    Bytes(Vec<u8>),
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    /// Absent value; rows carry it, filters never hash it.
    Null,
    /// Nested group marker; only its leaves are hashable.
    Group,
}

impl ParquetValue {
    fn kind(&self) -> &'static str {
        match self {
            ParquetValue::Bytes(_) => "bytes",
            ParquetValue::Text(_) => "text",
            ParquetValue::Bool(_) => "boolean",
            ParquetValue::Int(_) => "int",
            ParquetValue::UInt(_) => "uint",
            ParquetValue::Double(_) => "double",
            ParquetValue::Null => "null",
            ParquetValue::Group => "group",
        }
    }
}

impl From<&str> for ParquetValue {
    fn from(value: &str) -> Self {
        ParquetValue::Text(value.to_string())
    }
}

impl From<String> for ParquetValue {
    fn from(value: String) -> Self {
        ParquetValue::Text(value)
    }
}

impl From<&[u8]> for ParquetValue {
    fn from(value: &[u8]) -> Self {
        ParquetValue::Bytes(value.to_vec())
    }
}

impl From<bool> for ParquetValue {
    fn from(value: bool) -> Self {
        ParquetValue::Bool(value)
    }
}

impl From<i64> for ParquetValue {
    fn from(value: i64) -> Self {
        ParquetValue::Int(value)
    }
}

impl From<u64> for ParquetValue {
    fn from(value: u64) -> Self {
        ParquetValue::UInt(value)
    }
}

impl From<f64> for ParquetValue {
    fn from(value: f64) -> Self {
        ParquetValue::Double(value)
    }
}

/// 64 bit xxHash of a column value, seed 0.
///
/// Text and byte values hash their raw bytes; every other hashable type
/// hashes its canonical decimal string form. For doubles that form is
/// the ECMAScript number-to-string rendering, not [`f64::to_string`].
/// The string canonicalization is part of the on-disk contract for
/// filters written by this implementation and must stay stable across
/// versions.
pub fn hash64(value: &ParquetValue) -> Result<u64, HashError> {
    let bytes: Cow<'_, [u8]> = match value {
        ParquetValue::Text(text) => Cow::Borrowed(text.as_bytes()),
        ParquetValue::Bytes(bytes) => Cow::Borrowed(bytes.as_slice()),
        ParquetValue::Bool(b) => Cow::Owned(b.to_string().into_bytes()),
        ParquetValue::Int(i) => Cow::Owned(i.to_string().into_bytes()),
        ParquetValue::UInt(u) => Cow::Owned(u.to_string().into_bytes()),
        ParquetValue::Double(d) => Cow::Owned(canonical_double(*d).into_bytes()),
        ParquetValue::Null | ParquetValue::Group => {
            return Err(HashError::UnsupportedValueType(value.kind()));
        }
    };
    Ok(xxh64(&bytes, HASH_SEED))
}

/// Decimal rendering of a double per ECMAScript number-to-string: plain
/// notation for magnitudes in [1e-6, 1e21), exponent notation with an
/// explicit sign outside that range, "Infinity"/"NaN" for the specials,
/// and "0" for negative zero. `f64::to_string` diverges on all of these,
/// so it must not be substituted here.
fn canonical_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Shortest round-trip digits via the exponent formatter, then laid
    // out by the decimal exponent. `n` is the position of the decimal
    // point relative to the first digit, so value = 0.digits * 10^n.
    let formatted = format!("{:e}", value.abs());
    let (mantissa, exponent) = formatted
        .split_once('e')
        .unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;
    let k = digits.len() as i32;

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    if (1..=21).contains(&n) {
        if k <= n {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take((n - k) as usize));
        } else {
            out.push_str(&digits[..n as usize]);
            out.push('.');
            out.push_str(&digits[n as usize..]);
        }
    } else if (-5..=0).contains(&n) {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(-n as usize));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        if n > 0 {
            out.push('+');
        }
        out.push_str(&(n - 1).to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hash_value() {
        // XXH64 of the empty input with seed 0.
        assert_eq!(
            hash64(&ParquetValue::Text(String::new())).unwrap(),
            17241709254077376921
        );
    }

    #[test]
    fn test_deterministic() {
        let value = ParquetValue::from("apples");
        assert_eq!(hash64(&value).unwrap(), hash64(&value).unwrap());
    }

    #[test]
    fn test_text_and_bytes_agree() {
        assert_eq!(
            hash64(&ParquetValue::from("apples")).unwrap(),
            hash64(&ParquetValue::from("apples".as_bytes())).unwrap()
        );
    }

    #[test]
    fn test_canonical_string_conversion() {
        assert_eq!(
            hash64(&ParquetValue::Bool(true)).unwrap(),
            hash64(&ParquetValue::from("true")).unwrap()
        );
        assert_eq!(
            hash64(&ParquetValue::Int(-42)).unwrap(),
            hash64(&ParquetValue::from("-42")).unwrap()
        );
        assert_eq!(
            hash64(&ParquetValue::UInt(42)).unwrap(),
            hash64(&ParquetValue::Int(42)).unwrap()
        );
        assert_eq!(
            hash64(&ParquetValue::Double(1.5)).unwrap(),
            hash64(&ParquetValue::from("1.5")).unwrap()
        );
    }

    #[test]
    fn test_double_canonical_edge_cases() {
        // Pinned to ECMAScript number-to-string output.
        let cases: &[(f64, &str)] = &[
            (f64::INFINITY, "Infinity"),
            (f64::NEG_INFINITY, "-Infinity"),
            (f64::NAN, "NaN"),
            (-0.0, "0"),
            (1e21, "1e+21"),
            (1e20, "100000000000000000000"),
            (-2.5e22, "-2.5e+22"),
            (1e-7, "1e-7"),
            (1.5e-7, "1.5e-7"),
            (1e-6, "0.000001"),
            (123.456, "123.456"),
            (-42.0, "-42"),
        ];
        for (value, text) in cases {
            assert_eq!(
                hash64(&ParquetValue::Double(*value)).unwrap(),
                hash64(&ParquetValue::Text(text.to_string())).unwrap(),
                "double {value} should hash as {text:?}"
            );
        }
    }

    #[test]
    fn test_unsupported_types() {
        assert_eq!(
            hash64(&ParquetValue::Null),
            Err(HashError::UnsupportedValueType("null"))
        );
        assert_eq!(
            hash64(&ParquetValue::Group),
            Err(HashError::UnsupportedValueType("group"))
        );
    }
}
