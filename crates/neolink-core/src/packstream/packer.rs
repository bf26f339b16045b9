//! Packstream encoder

use bytes::BufMut;

use super::error::PackError;
use super::value::PackValue;

pub(super) const NULL: u8 = 0xC0;
pub(super) const FLOAT_64: u8 = 0xC1;
pub(super) const FALSE: u8 = 0xC2;
pub(super) const TRUE: u8 = 0xC3;
pub(super) const INT_8: u8 = 0xC8;
pub(super) const INT_16: u8 = 0xC9;
pub(super) const INT_32: u8 = 0xCA;
pub(super) const INT_64: u8 = 0xCB;
pub(super) const TINY_STRING: u8 = 0x80;
pub(super) const STRING_8: u8 = 0xD0;
pub(super) const STRING_16: u8 = 0xD1;
pub(super) const STRING_32: u8 = 0xD2;
pub(super) const TINY_LIST: u8 = 0x90;
pub(super) const LIST_8: u8 = 0xD4;
pub(super) const LIST_16: u8 = 0xD5;
pub(super) const LIST_32: u8 = 0xD6;
pub(super) const TINY_MAP: u8 = 0xA0;
pub(super) const MAP_8: u8 = 0xD8;
pub(super) const MAP_16: u8 = 0xD9;
pub(super) const MAP_32: u8 = 0xDA;
pub(super) const TINY_STRUCT: u8 = 0xB0;
pub(super) const STRUCT_8: u8 = 0xDC;
pub(super) const STRUCT_16: u8 = 0xDD;

/// Pack a single value onto the end of `buf`
///
/// # Errors
/// Returns an error if a string, list or map exceeds the 32-bit size limit.
pub fn pack<B: BufMut>(value: &PackValue, buf: &mut B) -> Result<(), PackError> {
    match value {
        PackValue::Null => buf.put_u8(NULL),
        PackValue::Boolean(true) => buf.put_u8(TRUE),
        PackValue::Boolean(false) => buf.put_u8(FALSE),
        PackValue::Float(f) => {
            buf.put_u8(FLOAT_64);
            buf.put_f64(*f);
        }
        PackValue::Integer(i) => pack_integer(*i, buf),
        PackValue::String(s) => pack_string(s, buf)?,
        PackValue::List(items) => {
            pack_size_header(items.len(), "list", TINY_LIST, [LIST_8, LIST_16, LIST_32], buf)?;
            for item in items {
                pack(item, buf)?;
            }
        }
        PackValue::Map(map) => {
            pack_size_header(map.len(), "map", TINY_MAP, [MAP_8, MAP_16, MAP_32], buf)?;
            for (key, item) in map {
                pack_string(key, buf)?;
                pack(item, buf)?;
            }
        }
        PackValue::Structure { signature, fields } => {
            pack_struct_header(fields.len(), *signature, buf)?;
            for field in fields {
                pack(field, buf)?;
            }
        }
    }
    Ok(())
}

/// Write a structure marker and signature; fields must follow
///
/// # Errors
/// Returns an error if there are more than 65535 fields.
pub fn pack_struct_header<B: BufMut>(
    size: usize,
    signature: u8,
    buf: &mut B,
) -> Result<(), PackError> {
    if size < 0x10 {
        buf.put_u8(TINY_STRUCT | size as u8);
    } else if let Ok(size) = u8::try_from(size) {
        buf.put_u8(STRUCT_8);
        buf.put_u8(size);
    } else if let Ok(size) = u16::try_from(size) {
        buf.put_u8(STRUCT_16);
        buf.put_u16(size);
    } else {
        return Err(PackError::TooLarge {
            kind: "structure",
            size,
        });
    }
    buf.put_u8(signature);
    Ok(())
}

fn pack_integer<B: BufMut>(i: i64, buf: &mut B) {
    if (-0x10..0x80).contains(&i) {
        buf.put_i8(i as i8);
    } else if let Ok(i) = i8::try_from(i) {
        buf.put_u8(INT_8);
        buf.put_i8(i);
    } else if let Ok(i) = i16::try_from(i) {
        buf.put_u8(INT_16);
        buf.put_i16(i);
    } else if let Ok(i) = i32::try_from(i) {
        buf.put_u8(INT_32);
        buf.put_i32(i);
    } else {
        buf.put_u8(INT_64);
        buf.put_i64(i);
    }
}

fn pack_string<B: BufMut>(s: &str, buf: &mut B) -> Result<(), PackError> {
    let bytes = s.as_bytes();
    pack_size_header(
        bytes.len(),
        "string",
        TINY_STRING,
        [STRING_8, STRING_16, STRING_32],
        buf,
    )?;
    buf.put_slice(bytes);
    Ok(())
}

fn pack_size_header<B: BufMut>(
    size: usize,
    kind: &'static str,
    tiny: u8,
    [marker_8, marker_16, marker_32]: [u8; 3],
    buf: &mut B,
) -> Result<(), PackError> {
    if size < 0x10 {
        buf.put_u8(tiny | size as u8);
    } else if let Ok(size) = u8::try_from(size) {
        buf.put_u8(marker_8);
        buf.put_u8(size);
    } else if let Ok(size) = u16::try_from(size) {
        buf.put_u8(marker_16);
        buf.put_u16(size);
    } else if let Ok(size) = u32::try_from(size) {
        buf.put_u8(marker_32);
        buf.put_u32(size);
    } else {
        return Err(PackError::TooLarge { kind, size });
    }
    Ok(())
}
