//! # Burin
//!
//! A compact TrueType glyph rasterizer.
//!
//! Burin takes a TrueType font binary, a Unicode code point, and a pixel
//! size, and produces glyph metrics, line metrics, optional kerning
//! corrections, and an anti-aliased 8-bit alpha bitmap of the glyph
//! outline snapped to a sub-pixel origin. It parses just enough of the
//! container to do that; hinting, shaping, layout, and color tables are
//! someone else's job.
//!
//! ## Architecture
//!
//! ```text
//! code point
//!     ↓
//! [cmap]     — code point → glyph id
//! [metrics]  — advance width, side bearing, line metrics
//! [outline]  — glyf decoding into points/curves/lines,
//!              affine transform, clip, curve tesselation
//! [raster]   — signed area/coverage accumulation, row
//!              integration into 8-bit alpha
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use burin::{Config, Font};
//!
//! let font = Font::from_file("font.ttf")?;
//! let cfg = Config {
//!     x_scale: 32.0,
//!     y_scale: 32.0,
//!     render_image: true,
//!     ..Config::default()
//! };
//! if let Some(glyph) = font.glyph(&cfg, 'g' as u32)? {
//!     let image = glyph.image.unwrap();
//!     assert_eq!(image.len(), (glyph.width * glyph.height) as usize);
//! }
//! # Ok::<(), burin::BurinError>(())
//! ```

pub mod error;
pub mod font;

mod cmap;
mod kern;
mod metrics;
mod outline;
mod raster;
mod raw;

pub use error::BurinError;
pub use font::Font;

use log::trace;

use crate::outline::decode::decode_outline;
use crate::outline::Outline;
use crate::raster::Raster;
use crate::raw::{check_len, read_i16};

/// The crate version, for embedders that want to report it.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Per-call rendering configuration.
///
/// The scales give the target em size in device units per axis; `x` and
/// `y` place the glyph origin at a sub-pixel position.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Horizontal em size in device units.
    pub x_scale: f64,
    /// Vertical em size in device units.
    pub y_scale: f64,
    /// Sub-pixel x origin of the glyph.
    pub x: f64,
    /// Sub-pixel y origin of the glyph.
    pub y: f64,
    /// Produce the alpha bitmap. Without it, [`Font::glyph`] reports
    /// metrics only.
    pub render_image: bool,
    /// Treat +Y as screen-down: the bitmap is flipped to a top-left
    /// origin and the reported `y` is negated.
    pub downward_y: bool,
    /// Report an unmapped code point as a distinguished missing result
    /// instead of rendering the font's .notdef glyph.
    pub catch_missing: bool,
}

/// Font-wide vertical metrics, scaled to device units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
}

/// A kerning correction between two codes, in device units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kerning {
    pub x: f64,
    pub y: f64,
}

/// The result of rendering one character.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Left edge of the ink box in device pixels.
    pub x: i32,
    /// Bottom edge of the ink box, or the negated top edge under
    /// [`Config::downward_y`].
    pub y: i32,
    /// Ink box width in pixels.
    pub width: i32,
    /// Ink box height in pixels.
    pub height: i32,
    /// Horizontal pen advance, rounded to whole pixels.
    pub advance: i32,
    /// The code point resolved to the font's .notdef glyph.
    pub missing: bool,
    /// Tightly packed `width * height` alpha bytes, present iff
    /// [`Config::render_image`] was set and the outline was non-empty.
    pub image: Option<Vec<u8>>,
}

impl Font<'_> {
    /// Resolve and (optionally) rasterize one character.
    ///
    /// Metrics are always populated. `Ok(None)` means the code point is
    /// not in the font and [`Config::catch_missing`] asked for that to be
    /// reported instead of rendered; otherwise an unmapped code point
    /// renders the .notdef glyph with [`Glyph::missing`] set.
    pub fn glyph(&self, cfg: &Config, code: u32) -> Result<Option<Glyph>, BurinError> {
        let glyph_id = self.glyph_id(code)?;
        if glyph_id == 0 && cfg.catch_missing {
            trace!("U+{code:04X} has no glyph, reporting missing");
            return Ok(None);
        }
        let outline_at = self.outline_offset(glyph_id)?;

        let units_per_em = self.units_per_em()? as f64;
        let x_scale = cfg.x_scale / units_per_em;
        let y_scale = cfg.y_scale / units_per_em;
        let mut x_off = cfg.x;
        let y_off = cfg.y;

        let (advance_width, left_side_bearing) = self.hor_metrics(glyph_id)?;
        // The advance only depends on the scale, so it is known before
        // the outline is even looked at. Completely empty glyphs still
        // report it.
        let advance = (advance_width as f64 * x_scale).round() as i32;
        let missing = glyph_id == 0;

        let Some(outline_at) = outline_at else {
            return Ok(Some(Glyph {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
                advance,
                missing,
                image: None,
            }));
        };

        // The font-unit bounding box comes from the glyph header as-is.
        let data = self.data();
        check_len(data, outline_at, 10)?;
        let unit_x_min = read_i16(data, outline_at + 2)?;
        let unit_y_min = read_i16(data, outline_at + 4)?;
        let unit_x_max = read_i16(data, outline_at + 6)?;
        let unit_y_max = read_i16(data, outline_at + 8)?;
        if unit_x_max <= unit_x_min || unit_y_max <= unit_y_min {
            return Err(BurinError::BadOutline("degenerate bounding box"));
        }

        // Shift along X so the ink box's left edge and the side bearing
        // line up: lsb * scale + x == xMin * scale + x'.
        x_off += (left_side_bearing as f64 - unit_x_min as f64) * x_scale;

        let x1 = (unit_x_min as f64 * x_scale + x_off).floor() as i32;
        let y1 = (unit_y_min as f64 * y_scale + y_off).floor() as i32;
        let x2 = (unit_x_max as f64 * x_scale + x_off).ceil() as i32 + 1;
        let y2 = (unit_y_max as f64 * y_scale + y_off).ceil() as i32 + 1;
        let width = x2 - x1;
        let height = y2 - y1;

        let mut glyph = Glyph {
            x: x1,
            y: if cfg.downward_y { -y2 } else { y1 },
            width,
            height,
            advance,
            missing,
            image: None,
        };
        if !cfg.render_image {
            return Ok(Some(glyph));
        }

        // Place the transformed box's min corner at the raster origin.
        let transform = [
            x_scale,
            0.0,
            0.0,
            y_scale,
            x_off - x1 as f64,
            y_off - y1 as f64,
        ];

        let mut outl = Outline::new();
        decode_outline(self, outline_at, 0, &mut outl)?;
        outl.transform(&transform);
        outl.clip(width, height);
        outl.tesselate()?;

        let mut raster = Raster::new(width as usize, height as usize);
        raster.draw(&outl);
        if cfg.downward_y {
            raster.flip();
        }
        glyph.image = Some(raster.finish());
        trace!("rendered U+{code:04X} as glyph {glyph_id}: {width}x{height}");

        Ok(Some(glyph))
    }
}
