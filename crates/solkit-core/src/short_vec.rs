//! Compact-u16 length prefixes and a bounds-checked byte reader.
//!
//! Every variable-length array in the wire format is preceded by its length
//! in compact-u16 form: 7 payload bits per byte, least-significant group
//! first, with the high bit set on every byte except the last.
//!
//! - Values 0..=0x7f          -> 1 byte
//! - Values 0x80..=0x3fff     -> 2 bytes
//! - Values 0x4000..=0x1fffff -> 3 bytes

use crate::error::CodecError;

/// Largest value expressible in three 7-bit groups.
pub const MAX_ENCODED_VALUE: usize = 0x1f_ffff;

/// Most bytes a compact-u16 value may occupy.
pub const MAX_ENCODING_LENGTH: usize = 3;

/// Append the compact-u16 encoding of `value` to `buf`.
pub fn encode_len(value: usize, buf: &mut Vec<u8>) -> Result<(), CodecError> {
    if value > MAX_ENCODED_VALUE {
        return Err(CodecError::ValueTooLarge(value));
    }

    let mut rem = value;
    loop {
        let mut byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            buf.push(byte);
            return Ok(());
        }
        byte |= 0x80;
        buf.push(byte);
    }
}

/// Encode `value` into a fresh buffer.
pub fn encode_compact_u16(value: usize) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(MAX_ENCODING_LENGTH);
    encode_len(value, &mut out)?;
    Ok(out)
}

/// Decode a compact-u16 value from the start of `data`.
///
/// Returns `(value, bytes_consumed)`. A chain that would continue past the
/// third byte is malformed, as is a redundant trailing zero group; both
/// would let two byte strings alias the same value.
pub fn decode_len(data: &[u8]) -> Result<(usize, usize), CodecError> {
    let mut value = 0usize;

    for (i, &byte) in data.iter().enumerate() {
        value |= ((byte & 0x7f) as usize) << (i * 7);

        if byte & 0x80 == 0 {
            if byte == 0 && i > 0 {
                return Err(CodecError::Malformed(
                    "non-canonical compact-u16 encoding".into(),
                ));
            }
            return Ok((value, i + 1));
        }

        if i + 1 == MAX_ENCODING_LENGTH {
            return Err(CodecError::Malformed(
                "compact-u16 continuation chain longer than 3 bytes".into(),
            ));
        }
    }

    Err(CodecError::Truncated {
        offset: data.len(),
        needed: 1,
    })
}

/// Cursor over a byte slice that reports where it ran out.
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub(crate) fn read_len(&mut self) -> Result<usize, CodecError> {
        let (value, consumed) = decode_len(&self.data[self.pos..]).map_err(|e| match e {
            CodecError::Truncated { needed, .. } => CodecError::Truncated {
                offset: self.data.len(),
                needed,
            },
            other => other,
        })?;
        self.pos += consumed;
        Ok(value)
    }

    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                offset: self.data.len(),
                needed: n - self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Fail if any bytes are left unread.
    pub(crate) fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }
}
