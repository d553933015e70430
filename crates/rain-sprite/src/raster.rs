//! Grayscale raster drawing primitives.
//!
//! The silhouette generators draw onto plain [`GrayImage`] canvases and only
//! need a handful of primitives: filled circles, the filled half of an
//! axis-aligned ellipse, and closed polygons (even-odd scanline fill plus a
//! Bresenham outline). Everything clips per pixel, so shapes may spill over
//! the canvas edges.

use image::{GrayImage, Luma};

/// Marker value painted while a silhouette is under construction, before the
/// final threshold collapses the grid to binary.
pub(crate) const MARKER: u8 = 128;

/// A vertex in signed canvas coordinates.
pub(crate) type Point = (i64, i64);

pub(crate) fn put_pixel_clipped(canvas: &mut GrayImage, x: i64, y: i64, value: u8) {
    if x >= 0 && y >= 0 && x < i64::from(canvas.width()) && y < i64::from(canvas.height()) {
        canvas.put_pixel(x as u32, y as u32, Luma([value]));
    }
}

/// Fill the horizontal span `[x0, x1]` on row `y`, clipped to the canvas.
fn fill_span(canvas: &mut GrayImage, y: i64, x0: i64, x1: i64, value: u8) {
    if y < 0 || y >= i64::from(canvas.height()) {
        return;
    }
    let lo = x0.max(0);
    let hi = x1.min(i64::from(canvas.width()) - 1);
    for x in lo..=hi {
        canvas.put_pixel(x as u32, y as u32, Luma([value]));
    }
}

/// Filled circle of radius `r` around `center`.
pub(crate) fn fill_circle(canvas: &mut GrayImage, center: Point, r: i64, value: u8) {
    let (cx, cy) = center;
    for dy in -r..=r {
        let half = (((r * r - dy * dy) as f64).sqrt()) as i64;
        fill_span(canvas, cy + dy, cx - half, cx + half, value);
    }
}

/// Filled half of an axis-aligned ellipse with semi-axes `(a, b)`: the rows
/// at or above the center row, i.e. the 180°–360° parametric sweep with the
/// y axis pointing down.
pub(crate) fn fill_half_ellipse(canvas: &mut GrayImage, center: Point, a: i64, b: i64, value: u8) {
    if a <= 0 || b <= 0 {
        return;
    }
    let (cx, cy) = center;
    for dy in -b..=0 {
        let t = 1.0 - (dy as f64 / b as f64).powi(2);
        let half = (a as f64 * t.sqrt()) as i64;
        fill_span(canvas, cy + dy, cx - half, cx + half, value);
    }
}

/// Bresenham line between two vertices.
pub(crate) fn draw_line(canvas: &mut GrayImage, from: Point, to: Point, value: u8) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel_clipped(canvas, x, y, value);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Closed polygon outline.
pub(crate) fn draw_polygon(canvas: &mut GrayImage, outline: &[Point], value: u8) {
    for i in 0..outline.len() {
        draw_line(canvas, outline[i], outline[(i + 1) % outline.len()], value);
    }
}

/// Even-odd scanline fill of a closed polygon.
///
/// Edges follow the half-open rule (an edge covers the rows
/// `[min(y), max(y))`) so shared vertices count once and crossings always
/// pair up, including for self-intersecting outlines.
pub(crate) fn fill_polygon(canvas: &mut GrayImage, outline: &[Point], value: u8) {
    if outline.len() < 3 {
        return;
    }
    let top = outline.iter().map(|p| p.1).min().unwrap_or(0);
    let bottom = outline.iter().map(|p| p.1).max().unwrap_or(0);
    let y0 = top.max(0);
    let y1 = bottom.min(i64::from(canvas.height()) - 1);

    let mut crossings: Vec<f64> = Vec::with_capacity(outline.len());
    for y in y0..=y1 {
        crossings.clear();
        for i in 0..outline.len() {
            let (ax, ay) = outline[i];
            let (bx, by) = outline[(i + 1) % outline.len()];
            if ay == by {
                continue;
            }
            let (lo, hi) = if ay < by { (ay, by) } else { (by, ay) };
            if y >= lo && y < hi {
                let t = (y - ay) as f64 / (by - ay) as f64;
                crossings.push(ax as f64 + t * (bx - ax) as f64);
            }
        }
        crossings.sort_by(f64::total_cmp);
        for pair in crossings.chunks_exact(2) {
            fill_span(canvas, y, pair[0].ceil() as i64, pair[1].floor() as i64, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> GrayImage {
        GrayImage::new(width, height)
    }

    fn value_at(canvas: &GrayImage, x: i64, y: i64) -> u8 {
        canvas.get_pixel(x as u32, y as u32)[0]
    }

    #[test]
    fn circle_fill_covers_center_and_respects_radius() {
        let mut img = canvas(20, 20);
        fill_circle(&mut img, (10, 10), 5, MARKER);

        assert_eq!(value_at(&img, 10, 10), MARKER);
        assert_eq!(value_at(&img, 5, 10), MARKER);
        assert_eq!(value_at(&img, 15, 10), MARKER);
        // corners of the bounding box stay clear
        assert_eq!(value_at(&img, 5, 5), 0);
        assert_eq!(value_at(&img, 15, 15), 0);
    }

    #[test]
    fn circle_fill_clips_outside_canvas() {
        let mut img = canvas(8, 8);
        fill_circle(&mut img, (0, 0), 6, MARKER);
        assert_eq!(value_at(&img, 0, 0), MARKER);
        // must not have panicked on the negative rows/columns
    }

    #[test]
    fn half_ellipse_only_touches_rows_above_center() {
        let mut img = canvas(30, 30);
        fill_half_ellipse(&mut img, (15, 20), 5, 8, MARKER);

        assert_eq!(value_at(&img, 15, 20), MARKER);
        assert_eq!(value_at(&img, 15, 12), MARKER);
        // nothing below the center row
        for y in 21..30 {
            for x in 0..30 {
                assert_eq!(value_at(&img, x, y), 0, "row {y} should be empty");
            }
        }
    }

    #[test]
    fn line_marks_both_endpoints() {
        let mut img = canvas(10, 10);
        draw_line(&mut img, (1, 1), (8, 6), MARKER);
        assert_eq!(value_at(&img, 1, 1), MARKER);
        assert_eq!(value_at(&img, 8, 6), MARKER);
    }

    #[test]
    fn polygon_fill_covers_square_interior() {
        let mut img = canvas(20, 20);
        let square = [(4, 4), (15, 4), (15, 15), (4, 15)];
        fill_polygon(&mut img, &square, MARKER);

        assert_eq!(value_at(&img, 10, 10), MARKER);
        assert_eq!(value_at(&img, 5, 5), MARKER);
        assert_eq!(value_at(&img, 2, 2), 0);
        assert_eq!(value_at(&img, 17, 10), 0);
    }

    #[test]
    fn polygon_fill_ignores_degenerate_outlines() {
        let mut img = canvas(10, 10);
        fill_polygon(&mut img, &[(2, 2), (7, 7)], MARKER);
        assert!(img.pixels().all(|p| p[0] == 0));
    }
}
