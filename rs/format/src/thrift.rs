//! Minimal Thrift compact-protocol support: just enough of the standard
//! metadata encoding to frame structs made of i32 fields and nested
//! (possibly empty) structs, which is what the bloom filter header needs.

use thiserror::Error;

/// Compact-protocol wire type for a zigzag varint i32 field.
pub const COMPACT_TYPE_I32: u8 = 0x05;
/// Compact-protocol wire type for a nested struct (or union) field.
pub const COMPACT_TYPE_STRUCT: u8 = 0x0c;
/// Marks the end of a struct's field list.
pub const STOP: u8 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThriftError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),
    #[error("varint exceeds 10 bytes")]
    VarintOverflow,
    #[error("unsupported compact field type {field_type:#04x} for field id {id}")]
    UnsupportedFieldType { field_type: u8, id: i16 },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub fn zigzag_encode_i32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

pub fn zigzag_decode_i32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Appends compact-protocol encoded fields to a byte buffer. Field ids are
/// delta-encoded against the previous id within the current struct, so
/// nesting saves and restores the id counter.
#[derive(Debug, Default)]
pub struct CompactWriter {
    buf: Vec<u8>,
    last_field_id: i16,
    outer_field_ids: Vec<i16>,
}

impl CompactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_i32_field(&mut self, id: i16, value: i32) {
        self.write_field_header(COMPACT_TYPE_I32, id);
        self.write_varint(zigzag_encode_i32(value) as u64);
    }

    /// Opens a struct (or union) valued field; every field written until
    /// the matching `end_struct` belongs to the nested struct.
    pub fn begin_struct_field(&mut self, id: i16) {
        self.write_field_header(COMPACT_TYPE_STRUCT, id);
        self.outer_field_ids.push(self.last_field_id);
        self.last_field_id = 0;
    }

    pub fn end_struct(&mut self) {
        self.buf.push(STOP);
        self.last_field_id = self.outer_field_ids.pop().unwrap_or(0);
    }

    /// Terminates the top-level struct.
    pub fn write_stop(&mut self) {
        self.buf.push(STOP);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn write_field_header(&mut self, field_type: u8, id: i16) {
        let delta = id.wrapping_sub(self.last_field_id);
        if (1..=15).contains(&delta) {
            self.buf.push(((delta as u8) << 4) | field_type);
        } else {
            self.buf.push(field_type);
            self.write_varint(zigzag_encode_i32(id as i32) as u64);
        }
        self.last_field_id = id;
    }

    fn write_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                return;
            }
            self.buf.push(byte | 0x80);
        }
    }
}

/// Cursor over compact-protocol encoded bytes; the counterpart of
/// [`CompactWriter`].
#[derive(Debug)]
pub struct CompactReader<'a> {
    buf: &'a [u8],
    pos: usize,
    last_field_id: i16,
    outer_field_ids: Vec<i16>,
}

impl<'a> CompactReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            last_field_id: 0,
            outer_field_ids: Vec::new(),
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reads the next field header, or `None` at the end of the current
    /// struct.
    pub fn read_field_header(&mut self) -> Result<Option<(u8, i16)>, ThriftError> {
        let byte = self.next_byte()?;
        if byte == STOP {
            return Ok(None);
        }
        let field_type = byte & 0x0f;
        let delta = (byte >> 4) as i16;
        let id = if delta == 0 {
            zigzag_decode_i32(self.read_varint()? as u32) as i16
        } else {
            self.last_field_id.wrapping_add(delta)
        };
        self.last_field_id = id;
        Ok(Some((field_type, id)))
    }

    pub fn read_i32(&mut self) -> Result<i32, ThriftError> {
        Ok(zigzag_decode_i32(self.read_varint()? as u32))
    }

    pub fn begin_struct(&mut self) {
        self.outer_field_ids.push(self.last_field_id);
        self.last_field_id = 0;
    }

    /// Restores the enclosing struct's field id counter; call after
    /// `read_field_header` returned `None` for the nested struct.
    pub fn end_struct(&mut self) {
        self.last_field_id = self.outer_field_ids.pop().unwrap_or(0);
    }

    /// Skips a whole struct valued field, nested structs included.
    pub fn skip_struct(&mut self) -> Result<(), ThriftError> {
        self.begin_struct();
        while let Some((field_type, id)) = self.read_field_header()? {
            match field_type {
                COMPACT_TYPE_I32 => {
                    self.read_i32()?;
                }
                COMPACT_TYPE_STRUCT => {
                    self.skip_struct()?;
                }
                _ => return Err(ThriftError::UnsupportedFieldType { field_type, id }),
            }
        }
        self.end_struct();
        Ok(())
    }

    pub fn read_varint(&mut self) -> Result<u64, ThriftError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.next_byte()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= 70 {
                return Err(ThriftError::VarintOverflow);
            }
        }
    }

    fn next_byte(&mut self) -> Result<u8, ThriftError> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or(ThriftError::UnexpectedEof(self.pos))?;
        self.pos += 1;
        Ok(byte)
    }
}
