//! # Silhouette rasterization
//!
//! The raster is a grid of `(area, cover)` cells. Drawing a line segment
//! walks it with a 2-D DDA: every time the segment crosses a pixel
//! boundary, the sub-segment inside the cell it just left contributes its
//! signed vertical extent to `cover` and the integral of its horizontal
//! coverage to `area`. A final per-row left-to-right pass integrates the
//! cells into clamped 8-bit alpha.
//!
//! All inputs are pre-clipped into the grid, so the walk can index cells
//! without re-checking bounds.

use crate::outline::{Outline, Point};

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    area: f64,
    cover: f64,
}

pub(crate) struct Raster {
    cells: Vec<Cell>,
    /// Byte offset of each row in `cells`. Flipping the raster upside
    /// down permutes this table and leaves the cells alone.
    rows: Vec<usize>,
    width: usize,
    height: usize,
}

impl Raster {
    pub(crate) fn new(width: usize, height: usize) -> Raster {
        Raster {
            cells: vec![Cell::default(); width * height],
            rows: (0..height).map(|y| y * width).collect(),
            width,
            height,
        }
    }

    /// Mirror the raster vertically by reversing the row table.
    pub(crate) fn flip(&mut self) {
        self.rows.reverse();
    }

    fn deposit(&mut self, pixel_x: i32, pixel_y: i32, x_avg: f64, y_diff: f64) {
        let cell = &mut self.cells[self.rows[pixel_y as usize] + pixel_x as usize];
        cell.cover += y_diff;
        cell.area += (1.0 - x_avg) * y_diff;
    }

    /// Rasterize every line segment of a tesselated outline. Horizontal
    /// segments sweep no vertical coverage and are skipped outright.
    pub(crate) fn draw(&mut self, outl: &Outline) {
        for line in &outl.lines {
            let origin = outl.point(line.beg);
            let goal = outl.point(line.end);
            if origin.y != goal.y {
                self.draw_line(origin, goal);
            }
        }
    }

    /// Walk one segment cell by cell.
    ///
    /// For each axis the segment moves along, `next_crossing` holds the
    /// parametric distance (in [0, 1] along the segment) to the next
    /// integer grid line and `crossing_gap` the parametric distance
    /// between consecutive crossings. The nearer crossing is consumed
    /// each step; the total step count is fixed by how many whole pixels
    /// the segment traverses on each axis.
    fn draw_line(&mut self, origin: Point, goal: Point) {
        let delta_x = goal.x - origin.x;
        let delta_y = goal.y - origin.y;
        let mut pixel_x = origin.x as i32;
        let mut pixel_y = origin.y as i32;

        // Idle axes keep a sentinel crossing no real one can undercut.
        let mut next_crossing_x = 100.0;
        let mut crossing_gap_x = 0.0;
        if delta_x != 0.0 {
            let signed_gap = 1.0 / delta_x;
            next_crossing_x = pixel_x as f64 - origin.x;
            if delta_x > 0.0 {
                next_crossing_x += 1.0;
            }
            next_crossing_x *= signed_gap;
            crossing_gap_x = signed_gap.abs();
        }

        let mut next_crossing_y = 100.0;
        let mut crossing_gap_y = 0.0;
        if delta_y != 0.0 {
            let signed_gap = 1.0 / delta_y;
            next_crossing_y = pixel_y as f64 - origin.y;
            if delta_y > 0.0 {
                next_crossing_y += 1.0;
            }
            next_crossing_y *= signed_gap;
            crossing_gap_y = signed_gap.abs();
        }

        let num_crossings = (goal.x as i32 - origin.x as i32).abs()
            + (goal.y as i32 - origin.y as i32).abs();
        let mut prev_distance = 0.0;
        for _ in 0..num_crossings {
            if next_crossing_x < next_crossing_y {
                let dt = next_crossing_x - prev_distance;
                // The sub-segment ends on a vertical pixel edge: at
                // fraction 1 when moving right, 0 when moving left.
                let x_end = if delta_x > 0.0 { 1.0 } else { 0.0 };
                let x_avg = x_end - 0.5 * delta_x * dt;
                self.deposit(pixel_x, pixel_y, x_avg, delta_y * dt);
                pixel_x += if delta_x >= 0.0 { 1 } else { -1 };
                prev_distance = next_crossing_x;
                next_crossing_x += crossing_gap_x;
            } else {
                let dt = next_crossing_y - prev_distance;
                let x_end = origin.x - pixel_x as f64 + next_crossing_y * delta_x;
                let x_avg = x_end - 0.5 * delta_x * dt;
                self.deposit(pixel_x, pixel_y, x_avg, delta_y * dt);
                pixel_y += if delta_y >= 0.0 { 1 } else { -1 };
                prev_distance = next_crossing_y;
                next_crossing_y += crossing_gap_y;
            }
        }

        // Flush the tail of the segment from the last crossing to the
        // endpoint, which lies strictly inside the final cell.
        let dt = 1.0 - prev_distance;
        let x_avg = (goal.x - pixel_x as f64) - 0.5 * delta_x * dt;
        self.deposit(pixel_x, pixel_y, x_avg, delta_y * dt);
    }

    /// Integrate the cells into a tightly packed 8-bit alpha image.
    ///
    /// Per row, a running sum of `cover` carries the winding state from
    /// cell to cell; the absolute value folds both winding directions
    /// into opacity and tolerates self-overlapping contours.
    pub(crate) fn finish(&self) -> Vec<u8> {
        let mut image = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            let mut accum = 0.0f64;
            let row = self.rows[y];
            for x in 0..self.width {
                let cell = self.cells[row + x];
                let value = (accum + cell.area).abs().min(1.0);
                image.push((value * 255.0 + 0.5) as u8);
                accum += cell.cover;
            }
        }
        image
    }
}

// ─── Tests ──────────────────────────────────────────────────────
