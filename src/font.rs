//! # Font loading
//!
//! A [`Font`] is an immutable view over TrueType data plus a record of who
//! owns the backing bytes. `from_bytes` borrows memory the caller keeps
//! alive; `from_file` maps the file read-only and releases the mapping when
//! the handle drops. Nothing is parsed eagerly beyond the magic number:
//! tables are located on demand through the sorted table directory.
//!
//! A `Font` holds no interior mutability, so sharing one across threads for
//! concurrent rasterization is safe.

use std::fs::File;
use std::path::Path;

use log::debug;
use memmap2::Mmap;

use crate::error::BurinError;
use crate::raw::{binary_search, check_len, read_u16, read_u32};

/// Windows-style TrueType scaler type.
const SCALER_TRUETYPE: u32 = 0x0001_0000;
/// Apple's `'true'` scaler type, seen in older Mac fonts.
const SCALER_APPLE: u32 = 0x7472_7565;

enum FontData<'a> {
    /// Mapping owned by the handle, released on drop.
    Mapped(Mmap),
    /// Caller-owned bytes, never freed here.
    Borrowed(&'a [u8]),
}

/// A loaded TrueType font.
///
/// The lifetime ties a borrowed font to the caller's buffer; fonts loaded
/// from a file own their mapping and are `'static`.
pub struct Font<'a> {
    data: FontData<'a>,
}

impl<'a> Font<'a> {
    /// Load a font from a caller-supplied memory range.
    ///
    /// The handle borrows `data` for its whole lifetime and never frees it.
    pub fn from_bytes(data: &'a [u8]) -> Result<Font<'a>, BurinError> {
        let font = Font {
            data: FontData::Borrowed(data),
        };
        font.check_scaler_type()?;
        debug!("loaded font from caller memory ({} bytes)", data.len());
        Ok(font)
    }

    /// Load a font from the file system by mapping it read-only.
    ///
    /// The mapping lives until the handle is dropped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Font<'static>, BurinError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        // Safety: the mapping is read-only and private; mutating or
        // truncating the file while the font is live is the caller's
        // responsibility, as with any mapped input.
        let map = unsafe { Mmap::map(&file)? };
        let font = Font {
            data: FontData::Mapped(map),
        };
        font.check_scaler_type()?;
        debug!(
            "mapped font file {} ({} bytes)",
            path.display(),
            font.data().len()
        );
        Ok(font)
    }

    /// The raw font bytes, wherever they live.
    pub(crate) fn data(&self) -> &[u8] {
        match &self.data {
            FontData::Mapped(map) => map,
            FontData::Borrowed(bytes) => bytes,
        }
    }

    fn check_scaler_type(&self) -> Result<(), BurinError> {
        let scaler = read_u32(self.data(), 0).map_err(|_| BurinError::UnrecognizedFormat)?;
        if scaler != SCALER_TRUETYPE && scaler != SCALER_APPLE {
            return Err(BurinError::UnrecognizedFormat);
        }
        Ok(())
    }

    /// Locate a table by its 4-byte tag and return its byte offset.
    ///
    /// The table directory is required to be sorted by tag, so the lookup
    /// is a binary search over 16-byte directory records.
    pub(crate) fn table(&self, tag: &'static str) -> Result<usize, BurinError> {
        debug_assert_eq!(tag.len(), 4);
        let data = self.data();
        let num_tables = read_u16(data, 4)? as usize;
        check_len(data, 12, num_tables * 16)?;
        let records = &data[12..12 + num_tables * 16];
        let index = binary_search(num_tables, |i| {
            records[i * 16..i * 16 + 4].cmp(tag.as_bytes())
        })
        .ok_or(BurinError::MissingTable(tag))?;
        Ok(read_u32(records, index * 16 + 8)? as usize)
    }

    /// The font-unit resolution declared in `head`.
    pub(crate) fn units_per_em(&self) -> Result<u16, BurinError> {
        let head = self.table("head")?;
        check_len(self.data(), head, 54)?;
        read_u16(self.data(), head + 18)
    }
}

// ─── Tests ──────────────────────────────────────────────────────
