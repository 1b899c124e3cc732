//! # Kerning
//!
//! Horizontal pair corrections from the legacy `kern` table, version 0
//! only. Every format-0 subtable flagged horizontal and not
//! minimum-kerning contributes; pair values accumulate across subtables,
//! with cross-stream values landing on the y axis. A font without a `kern`
//! table simply kerns by zero.

use log::debug;

use crate::error::BurinError;
use crate::font::Font;
use crate::raw::{binary_search, check_len, read_i16, read_u16, read_u8};
use crate::{Config, Kerning};

const HORIZONTAL: u8 = 0x01;
const MINIMUM: u8 = 0x02;
const CROSS_STREAM: u8 = 0x04;

impl Font<'_> {
    /// Kerning between a pair of codes, scaled to device units.
    pub fn kerning(&self, cfg: &Config, left: u32, right: u32) -> Result<Kerning, BurinError> {
        let mut x_units = 0.0f64;
        let mut y_units = 0.0f64;

        let kern = match self.table("kern") {
            Ok(offset) => offset,
            Err(BurinError::MissingTable(_)) => return Ok(Kerning { x: 0.0, y: 0.0 }),
            Err(err) => return Err(err),
        };

        let data = self.data();
        let version = read_u16(data, kern)?;
        if version != 0 {
            debug!("ignoring kern table version {version}");
            return Ok(Kerning { x: 0.0, y: 0.0 });
        }
        let num_tables = read_u16(data, kern + 2)?;
        let key = (left & 0xFFFF) << 16 | (right & 0xFFFF);

        let mut subtable = kern + 4;
        for _ in 0..num_tables {
            check_len(data, subtable, 6)?;
            let length = read_u16(data, subtable + 2)? as usize;
            let format = read_u8(data, subtable + 4)?;
            let flags = read_u8(data, subtable + 5)?;

            if format == 0 && flags & HORIZONTAL != 0 && flags & MINIMUM == 0 {
                let num_pairs = read_u16(data, subtable + 6)? as usize;
                // Pairs follow the numPairs/searchRange/entrySelector/
                // rangeShift words, 6 bytes each, sorted by packed key.
                let pairs = subtable + 14;
                check_len(data, pairs, num_pairs * 6)?;
                let hit = binary_search(num_pairs, |i| {
                    let record = pairs + i * 6;
                    let record_key = u32::from_be_bytes([
                        data[record],
                        data[record + 1],
                        data[record + 2],
                        data[record + 3],
                    ]);
                    record_key.cmp(&key)
                });
                if let Some(i) = hit {
                    let value = read_i16(data, pairs + i * 6 + 4)? as f64;
                    if flags & CROSS_STREAM != 0 {
                        y_units += value;
                    } else {
                        x_units += value;
                    }
                }
            }

            // The declared length counts from the subtable header.
            subtable += length;
        }

        let units_per_em = self.units_per_em()? as f64;
        Ok(Kerning {
            x: x_units / units_per_em * cfg.x_scale,
            y: y_units / units_per_em * cfg.y_scale,
        })
    }
}

// ─── Tests ──────────────────────────────────────────────────────
