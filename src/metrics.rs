//! # Horizontal metrics
//!
//! Per-font line metrics from `hhea` and per-glyph advance widths and left
//! side bearings from `hmtx`. The `hmtx` table is split in two by
//! `numberOfHMetrics`: a leading array of (advance, lsb) pairs, then an
//! lsb-only tail for glyphs that all share the last declared advance.

use crate::error::BurinError;
use crate::font::Font;
use crate::raw::{check_len, read_i16, read_u16};
use crate::{Config, LineMetrics};

impl Font<'_> {
    /// Ascent, descent, and line gap scaled to device units.
    pub fn line_metrics(&self, cfg: &Config) -> Result<LineMetrics, BurinError> {
        let units_per_em = self.units_per_em()? as f64;
        let hhea = self.table("hhea")?;
        check_len(self.data(), hhea, 36)?;
        let factor = cfg.y_scale / units_per_em;
        Ok(LineMetrics {
            ascent: read_i16(self.data(), hhea + 4)? as f64 * factor,
            descent: read_i16(self.data(), hhea + 6)? as f64 * factor,
            line_gap: read_i16(self.data(), hhea + 8)? as f64 * factor,
        })
    }

    fn num_long_hmtx(&self) -> Result<u16, BurinError> {
        let hhea = self.table("hhea")?;
        check_len(self.data(), hhea, 36)?;
        read_u16(self.data(), hhea + 34)
    }

    /// Advance width and left side bearing for a glyph, in font units.
    pub(crate) fn hor_metrics(&self, glyph_id: u16) -> Result<(u16, i16), BurinError> {
        let data = self.data();
        let num_long = self.num_long_hmtx()?;
        let hmtx = self.table("hmtx")?;
        if glyph_id < num_long {
            let offset = hmtx + 4 * glyph_id as usize;
            let advance = read_u16(data, offset)?;
            let lsb = read_i16(data, offset + 2)?;
            Ok((advance, lsb))
        } else {
            if num_long == 0 {
                return Err(BurinError::UnexpectedEof);
            }
            // Glyphs past the long array share the last declared advance.
            let boundary = hmtx + 4 * num_long as usize;
            let advance = read_u16(data, boundary - 4)?;
            let lsb = read_i16(data, boundary + 2 * (glyph_id - num_long) as usize)?;
            Ok((advance, lsb))
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────
