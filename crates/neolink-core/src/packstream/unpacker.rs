//! Packstream decoder

use std::collections::BTreeMap;

use bytes::Buf;

use super::error::PackError;
use super::packer::{
    FALSE, FLOAT_64, INT_16, INT_32, INT_64, INT_8, LIST_16, LIST_32, LIST_8, MAP_16, MAP_32,
    MAP_8, NULL, STRING_16, STRING_32, STRING_8, STRUCT_16, STRUCT_8, TINY_LIST, TINY_MAP,
    TINY_STRING, TINY_STRUCT, TRUE,
};
use super::value::PackValue;

/// Deepest list, map or structure nesting accepted from the wire
pub const MAX_DEPTH: usize = 256;

/// Read one value from the front of `buf`
///
/// # Errors
/// Returns an error on an unknown marker, truncated data, invalid UTF-8, a
/// non-string map key or nesting beyond [`MAX_DEPTH`].
pub fn unpack<B: Buf>(buf: &mut B) -> Result<PackValue, PackError> {
    unpack_at(buf, 0)
}

/// `depth` counts the lists, maps and structures enclosing the value
fn unpack_at<B: Buf>(buf: &mut B, depth: usize) -> Result<PackValue, PackError> {
    let marker = take_u8(buf)?;
    let high = marker & 0xF0;
    let low = usize::from(marker & 0x0F);

    match marker {
        // Tiny positive and negative integers
        0x00..=0x7F => return Ok(PackValue::Integer(i64::from(marker))),
        0xF0..=0xFF => return Ok(PackValue::Integer(i64::from(marker as i8))),
        _ => {}
    }

    match high {
        TINY_STRING => return unpack_string(low, buf),
        TINY_LIST => return unpack_list(low, buf, depth),
        TINY_MAP => return unpack_map(low, buf, depth),
        TINY_STRUCT => return unpack_structure(low, buf, depth),
        _ => {}
    }

    match marker {
        NULL => Ok(PackValue::Null),
        TRUE => Ok(PackValue::Boolean(true)),
        FALSE => Ok(PackValue::Boolean(false)),
        FLOAT_64 => {
            ensure(buf, 8)?;
            Ok(PackValue::Float(buf.get_f64()))
        }
        INT_8 => {
            ensure(buf, 1)?;
            Ok(PackValue::Integer(i64::from(buf.get_i8())))
        }
        INT_16 => {
            ensure(buf, 2)?;
            Ok(PackValue::Integer(i64::from(buf.get_i16())))
        }
        INT_32 => {
            ensure(buf, 4)?;
            Ok(PackValue::Integer(i64::from(buf.get_i32())))
        }
        INT_64 => {
            ensure(buf, 8)?;
            Ok(PackValue::Integer(buf.get_i64()))
        }
        STRING_8 | STRING_16 | STRING_32 => {
            let size = take_size(marker - STRING_8, buf)?;
            unpack_string(size, buf)
        }
        LIST_8 | LIST_16 | LIST_32 => {
            let size = take_size(marker - LIST_8, buf)?;
            unpack_list(size, buf, depth)
        }
        MAP_8 | MAP_16 | MAP_32 => {
            let size = take_size(marker - MAP_8, buf)?;
            unpack_map(size, buf, depth)
        }
        STRUCT_8 | STRUCT_16 => {
            let size = take_size(marker - STRUCT_8, buf)?;
            unpack_structure(size, buf, depth)
        }
        other => Err(PackError::UnknownMarker(other)),
    }
}

fn ensure<B: Buf>(buf: &B, needed: usize) -> Result<(), PackError> {
    if buf.remaining() < needed {
        return Err(PackError::UnexpectedEnd);
    }
    Ok(())
}

fn take_u8<B: Buf>(buf: &mut B) -> Result<u8, PackError> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

/// Size field following an 8/16/32-bit marker; `width` is 0, 1 or 2
fn take_size<B: Buf>(width: u8, buf: &mut B) -> Result<usize, PackError> {
    match width {
        0 => Ok(usize::from(take_u8(buf)?)),
        1 => {
            ensure(buf, 2)?;
            Ok(usize::from(buf.get_u16()))
        }
        _ => {
            ensure(buf, 4)?;
            usize::try_from(buf.get_u32()).map_err(|_| PackError::UnexpectedEnd)
        }
    }
}

/// Depth inside one more container, refusing to go past [`MAX_DEPTH`]
pub(crate) fn descend(depth: usize) -> Result<usize, PackError> {
    if depth >= MAX_DEPTH {
        return Err(PackError::TooDeep(MAX_DEPTH));
    }
    Ok(depth + 1)
}

fn unpack_string<B: Buf>(size: usize, buf: &mut B) -> Result<PackValue, PackError> {
    ensure(buf, size)?;
    let mut bytes = vec![0u8; size];
    buf.copy_to_slice(&mut bytes);
    String::from_utf8(bytes)
        .map(PackValue::String)
        .map_err(|_| PackError::InvalidUtf8)
}

fn unpack_list<B: Buf>(
    size: usize,
    buf: &mut B,
    depth: usize,
) -> Result<PackValue, PackError> {
    let depth = descend(depth)?;
    // Every item needs at least one byte, so a huge size cannot pre-allocate
    ensure(buf, size)?;
    let mut items = Vec::with_capacity(size);
    for _ in 0..size {
        items.push(unpack_at(buf, depth)?);
    }
    Ok(PackValue::List(items))
}

fn unpack_map<B: Buf>(
    size: usize,
    buf: &mut B,
    depth: usize,
) -> Result<PackValue, PackError> {
    let depth = descend(depth)?;
    let mut map = BTreeMap::new();
    for _ in 0..size {
        let key = match unpack_at(buf, depth)? {
            PackValue::String(key) => key,
            _ => return Err(PackError::NonStringKey),
        };
        let value = unpack_at(buf, depth)?;
        map.insert(key, value);
    }
    Ok(PackValue::Map(map))
}

fn unpack_structure<B: Buf>(
    size: usize,
    buf: &mut B,
    depth: usize,
) -> Result<PackValue, PackError> {
    let depth = descend(depth)?;
    let signature = take_u8(buf)?;
    ensure(buf, size)?;
    let mut fields = Vec::with_capacity(size);
    for _ in 0..size {
        fields.push(unpack_at(buf, depth)?);
    }
    Ok(PackValue::Structure { signature, fields })
}
