//! Bounds-checked reads over raw font memory.
//!
//! TrueType stores every multi-byte quantity big-endian. All accessors here
//! take an absolute byte offset into the font and return `UnexpectedEof`
//! when the read would run past the end of the data, so a truncated or
//! hostile file can never cause a panic downstream.

use crate::error::BurinError;

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8, BurinError> {
    data.get(offset).copied().ok_or(BurinError::UnexpectedEof)
}

pub(crate) fn read_i8(data: &[u8], offset: usize) -> Result<i8, BurinError> {
    Ok(read_u8(data, offset)? as i8)
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16, BurinError> {
    let bytes = data
        .get(offset..)
        .and_then(|tail| tail.get(..2))
        .ok_or(BurinError::UnexpectedEof)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub(crate) fn read_i16(data: &[u8], offset: usize) -> Result<i16, BurinError> {
    Ok(read_u16(data, offset)? as i16)
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> Result<u32, BurinError> {
    let bytes = data
        .get(offset..)
        .and_then(|tail| tail.get(..4))
        .ok_or(BurinError::UnexpectedEof)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Verify that `data` holds at least `len` bytes starting at `offset`.
pub(crate) fn check_len(data: &[u8], offset: usize, len: usize) -> Result<(), BurinError> {
    data.get(offset..)
        .and_then(|tail| tail.get(..len))
        .map(|_| ())
        .ok_or(BurinError::UnexpectedEof)
}

/// Binary search over `count` sorted fixed-size records.
///
/// `cmp(i)` compares record `i` against the key the caller is looking for.
/// Returns the index of a matching record, or `None`.
pub(crate) fn binary_search(
    count: usize,
    mut cmp: impl FnMut(usize) -> std::cmp::Ordering,
) -> Option<usize> {
    let mut low = 0;
    let mut high = count;
    while low < high {
        let mid = low + (high - low) / 2;
        match cmp(mid) {
            std::cmp::Ordering::Less => low = mid + 1,
            std::cmp::Ordering::Greater => high = mid,
            std::cmp::Ordering::Equal => return Some(mid),
        }
    }
    None
}

/// Binary search for the first record that is not below the key.
///
/// `below(i)` reports whether record `i` compares strictly less than the
/// key. The result never steps past the last record: when every record is
/// below the key, the last index is returned. Callers must follow up with
/// their own range check, which is exactly what the cmap segment walk does.
pub(crate) fn lower_bound(count: usize, mut below: impl FnMut(usize) -> bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let mut low = 0;
    let mut high = count - 1;
    while low != high {
        let mid = low + (high - low) / 2;
        if below(mid) {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    Some(low)
}

// ─── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_be_values() {
        let data = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(read_u8(&data, 0).unwrap(), 0x12);
        assert_eq!(read_u16(&data, 0).unwrap(), 0x1234);
        assert_eq!(read_u16(&data, 2).unwrap(), 0x5678);
        assert_eq!(read_u32(&data, 0).unwrap(), 0x12345678);
    }

    #[test]
    fn test_read_signed() {
        let data = [0xFF, 0xFE];
        assert_eq!(read_i8(&data, 0).unwrap(), -1);
        assert_eq!(read_i16(&data, 0).unwrap(), -2);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0u8; 3];
        assert!(matches!(
            read_u32(&data, 0),
            Err(BurinError::UnexpectedEof)
        ));
        assert!(matches!(
            read_u16(&data, 2),
            Err(BurinError::UnexpectedEof)
        ));
        assert!(matches!(
            read_u8(&data, 3),
            Err(BurinError::UnexpectedEof)
        ));
        // A huge offset must not wrap around.
        assert!(matches!(
            read_u16(&data, usize::MAX),
            Err(BurinError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_check_len() {
        let data = [0u8; 8];
        assert!(check_len(&data, 0, 8).is_ok());
        assert!(check_len(&data, 4, 4).is_ok());
        assert!(check_len(&data, 4, 5).is_err());
        assert!(check_len(&data, usize::MAX, 1).is_err());
    }

    #[test]
    fn test_binary_search_exact() {
        let records = [10u16, 20, 30, 40];
        let hit = binary_search(records.len(), |i| records[i].cmp(&30));
        assert_eq!(hit, Some(2));
        let miss = binary_search(records.len(), |i| records[i].cmp(&25));
        assert_eq!(miss, None);
    }

    #[test]
    fn test_lower_bound_finds_ceiling() {
        let ends = [10u16, 20, 30, 40];
        // 15 is not present, the first record >= 15 is index 1.
        assert_eq!(lower_bound(ends.len(), |i| ends[i] < 15), Some(1));
        // Exact hits land on their own record.
        assert_eq!(lower_bound(ends.len(), |i| ends[i] < 30), Some(2));
        // A key beyond every record clamps to the last one.
        assert_eq!(lower_bound(ends.len(), |i| ends[i] < 99), Some(3));
        assert_eq!(lower_bound(0, |_| true), None);
    }
}
