//! Silhouette generation for raindrop label maps.
//!
//! Two families of silhouettes exist: the deterministic teardrop used for
//! drops clinging to a surface, and a randomized jittered polygon
//! approximating a splash. Both paint the marker value 128 onto a zeroed
//! canvas of `4 * radius` by `5 * radius` pixels; the alpha synthesizer
//! consumes that grid before it is thresholded to binary.

use image::GrayImage;
use rand::Rng;

use crate::raster::{self, MARKER};

/// Ratio between the teardrop lobe's long semi-axis and the drop radius.
const LOBE_AXIS_RATIO: f64 = 1.3;

/// Magnitude bound of the per-vertex splash jitter in pixels.
const SPLASH_JITTER: i64 = 60;

/// Inclusive range of splash polygon vertex counts.
const SPLASH_VERTICES: std::ops::RangeInclusive<usize> = 12..=20;

/// Silhouette family used when a drop is generated from a radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeVariant {
    /// Teardrop silhouette: circle body with an elongated lobe tapering
    /// toward the top of the canvas. Deterministic for a given radius.
    #[default]
    Default,
    /// Irregular jittered polygon approximating a splash. Randomized.
    Splash,
}

/// Paint the silhouette for `variant` onto a freshly zeroed canvas.
pub(crate) fn draw_label<R: Rng>(
    canvas: &mut GrayImage,
    radius: u32,
    variant: ShapeVariant,
    rng: &mut R,
) {
    match variant {
        ShapeVariant::Default => draw_teardrop(canvas, radius),
        ShapeVariant::Splash => draw_splash(canvas, radius, rng),
    }
}

/// Circle of radius `r` at `(2r, 3r)` unioned with the half ellipse of
/// semi-axes `(r, 1.3 * sqrt(3) * r)` at the same center, which forms the
/// elongated taper of the drop.
fn draw_teardrop(canvas: &mut GrayImage, radius: u32) {
    let r = i64::from(radius);
    let center = (2 * r, 3 * r);
    raster::fill_circle(canvas, center, r, MARKER);
    let lobe = (LOBE_AXIS_RATIO * 3.0_f64.sqrt() * f64::from(radius)) as i64;
    raster::fill_half_ellipse(canvas, center, r, lobe, MARKER);
}

fn draw_splash<R: Rng>(canvas: &mut GrayImage, radius: u32, rng: &mut R) {
    let outline = splash_outline(radius, rng);
    raster::draw_polygon(canvas, &outline, MARKER);
    raster::fill_polygon(canvas, &outline, MARKER);
}

/// Build the jittered splash polygon for a drop of the given radius.
///
/// Vertices are evenly spaced in angle around `(2r, 3r)`. Each vertex's
/// distance from that center is the radius plus an independent jitter in
/// `[-60, 60]`, clamped below at one pixel so a jitter exceeding a small
/// radius cannot flip the vertex through the center. The final position is
/// clamped into the margin-inset box `[r, dim - r - 1]` on both axes.
///
/// The explicit generator keeps construction deterministic under a seeded
/// [`rand::rngs::StdRng`]; [`RainDrop::new`](crate::RainDrop::new) passes
/// the thread-local generator.
pub fn splash_outline<R: Rng>(radius: u32, rng: &mut R) -> Vec<(i64, i64)> {
    let n = rng.random_range(SPLASH_VERTICES);
    let r = i64::from(radius);
    let (width, height) = (4 * r, 5 * r);
    let step = 360.0 / n as f64;

    let mut outline = Vec::with_capacity(n);
    for i in 0..n {
        let angle = (i as f64 * step).to_radians();
        let jitter = rng.random_range(-SPLASH_JITTER..=SPLASH_JITTER);
        let reach = (r + jitter).max(1);
        let x = (2 * r) as f64 + angle.cos() * reach as f64;
        let y = (3 * r) as f64 + angle.sin() * reach as f64;
        let x = (x as i64).clamp(r, width - r - 1);
        let y = (y as i64).clamp(r, height - r - 1);
        outline.push((x, y));
    }
    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn teardrop_is_deterministic() {
        let mut first = GrayImage::new(80, 100);
        let mut second = GrayImage::new(80, 100);
        draw_teardrop(&mut first, 20);
        draw_teardrop(&mut second, 20);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn teardrop_paints_marker_values_only() {
        let mut canvas = GrayImage::new(40, 50);
        draw_teardrop(&mut canvas, 10);
        assert!(canvas.pixels().all(|p| p[0] == 0 || p[0] == MARKER));
        assert!(canvas.pixels().any(|p| p[0] == MARKER));
    }

    #[test]
    fn teardrop_center_is_inside_silhouette() {
        let mut canvas = GrayImage::new(80, 100);
        draw_teardrop(&mut canvas, 20);
        assert_eq!(canvas.get_pixel(40, 60)[0], MARKER);
        // lobe reaches above the circle body
        assert_eq!(canvas.get_pixel(40, 20)[0], MARKER);
    }

    #[test]
    fn splash_outline_is_deterministic_under_a_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(splash_outline(25, &mut a), splash_outline(25, &mut b));
    }

    #[test]
    fn splash_outline_stays_inside_the_margin_box() {
        let mut rng = StdRng::seed_from_u64(99);
        for radius in [1_u32, 3, 15, 40, 100] {
            let r = i64::from(radius);
            let outline = splash_outline(radius, &mut rng);
            assert!((12..=20).contains(&outline.len()));
            for &(x, y) in &outline {
                assert!((r..=4 * r - r - 1).contains(&x), "x {x} out of box for radius {radius}");
                assert!((r..=5 * r - r - 1).contains(&y), "y {y} out of box for radius {radius}");
            }
        }
    }

    #[test]
    fn splash_fill_marks_the_canvas() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut canvas = GrayImage::new(120, 150);
        draw_splash(&mut canvas, 30, &mut rng);
        assert!(canvas.pixels().any(|p| p[0] == MARKER));
    }
}
