//! # Character mapping
//!
//! Resolves Unicode code points to glyph ids through the `cmap` table.
//! Only the Basic Multilingual Plane is covered: the first encoding record
//! with a (platform, encoding) pair of (0, 3) or (3, 1) is used, and only
//! subtable formats 4 (segmented ranges) and 6 (dense array) are decoded.
//! Code points above U+FFFF resolve to glyph 0.

use crate::error::BurinError;
use crate::font::Font;
use crate::raw::{check_len, lower_bound, read_i16, read_u16, read_u32};

impl Font<'_> {
    /// Map a Unicode code point to a glyph id. Glyph 0 is .notdef.
    pub(crate) fn glyph_id(&self, code: u32) -> Result<u16, BurinError> {
        let data = self.data();
        let cmap = self.table("cmap")?;
        let num_records = read_u16(data, cmap + 2)? as usize;
        check_len(data, cmap + 4, num_records * 8)?;

        for i in 0..num_records {
            let record = cmap + 4 + i * 8;
            let platform = read_u16(data, record)?;
            let encoding = read_u16(data, record + 2)?;
            if matches!((platform, encoding), (0, 3) | (3, 1)) {
                let subtable = cmap + read_u32(data, record + 4)? as usize;
                check_len(data, subtable, 6)?;
                // The per-format decoders take the offset just past the
                // common format/length/language header words.
                return match read_u16(data, subtable)? {
                    4 => lookup_format4(data, subtable + 6, code),
                    6 => lookup_format6(data, subtable + 6, code),
                    _ => Err(BurinError::Unsupported("cmap subtable format")),
                };
            }
        }
        Err(BurinError::Unsupported("no Unicode BMP character map"))
    }
}

/// Format 4: parallel arrays of segment end codes, start codes, deltas,
/// and range offsets, searched by the smallest end code at or above the
/// code point.
fn lookup_format4(data: &[u8], table: usize, code: u32) -> Result<u16, BurinError> {
    if code > 0xFFFF {
        return Ok(0);
    }
    let code = code as u16;

    let seg_count_x2 = read_u16(data, table)? as usize;
    if seg_count_x2 & 1 != 0 || seg_count_x2 == 0 {
        return Err(BurinError::UnexpectedEof);
    }
    // searchRange, entrySelector and rangeShift are hints we ignore.
    let end_codes = table + 8;
    let start_codes = end_codes + seg_count_x2 + 2;
    let id_deltas = start_codes + seg_count_x2;
    let id_range_offsets = id_deltas + seg_count_x2;
    check_len(data, id_range_offsets, seg_count_x2)?;

    let seg_count = seg_count_x2 / 2;
    let seg = lower_bound(seg_count, |i| {
        // The bounds were checked for the whole array above.
        let end = u16::from_be_bytes([data[end_codes + 2 * i], data[end_codes + 2 * i + 1]]);
        end < code
    })
    .ok_or(BurinError::UnexpectedEof)?;
    let seg_x2 = seg * 2;

    let start_code = read_u16(data, start_codes + seg_x2)?;
    if start_code > code {
        return Ok(0);
    }
    let id_delta = read_i16(data, id_deltas + seg_x2)?;
    let id_range_offset = read_u16(data, id_range_offsets + seg_x2)? as usize;
    if id_range_offset == 0 {
        return Ok((code as i32 + id_delta as i32) as u16);
    }
    // The range offset is relative to its own slot in the table.
    let id_offset = id_range_offsets + seg_x2 + id_range_offset + 2 * (code - start_code) as usize;
    let id = read_u16(data, id_offset)?;
    if id == 0 {
        return Ok(0);
    }
    Ok((id as i32 + id_delta as i32) as u16)
}

/// Format 6: a dense glyph array covering `[first, first + count)`.
/// Code points outside the window are a lookup failure, not glyph 0.
fn lookup_format6(data: &[u8], table: usize, code: u32) -> Result<u16, BurinError> {
    if code > 0xFFFF {
        return Ok(0);
    }
    let first_code = read_u16(data, table)? as u32;
    let entry_count = read_u16(data, table + 2)? as u32;
    check_len(data, table + 4, 2 * entry_count as usize)?;
    if code < first_code || code - first_code >= entry_count {
        return Err(BurinError::Unsupported(
            "code point outside character map range",
        ));
    }
    read_u16(data, table + 4 + 2 * (code - first_code) as usize)
}

// ─── Tests ──────────────────────────────────────────────────────
