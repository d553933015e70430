//! Refracted background texture synthesis.
//!
//! The view through a drop is modeled as a blurred, fisheye-warped,
//! vertically flipped copy of the background patch behind it, tagged with
//! the drop's alpha map as a fourth channel. The warp runs through a pair
//! of synthetic pinhole intrinsic matrices whose constants are opaque
//! tuning parameters, not a physical camera model.

use glam::{DMat3, DVec3};
use image::{Rgb, RgbImage, Rgba, RgbaImage, imageops};
use log::trace;

use crate::error::{Error, Result};
use crate::raindrop::AlphaMap;

/// Standard deviation of the out-of-focus backdrop blur.
const BACKDROP_BLUR_SIGMA: f32 = 5.0;

/// Synthesize the RGBA texture for a drop of the given radius.
///
/// The background must already match the alpha map's dimensions; no resize
/// is attempted.
pub(crate) fn refract(background: &RgbImage, alpha: &AlphaMap, radius: u32) -> Result<RgbaImage> {
    let expected = alpha.dimensions();
    let actual = background.dimensions();
    if expected != actual {
        return Err(Error::BackgroundDimensionMismatch { expected, actual });
    }

    let blurred = imageops::blur(background, BACKDROP_BLUR_SIGMA);
    let warped = undistort(&blurred, radius);
    trace!("warped {}x{} background through radius-{radius} intrinsics", actual.0, actual.1);

    let (width, height) = expected;
    let mut texture = RgbaImage::new(width, height);
    for (x, y, pixel) in texture.enumerate_pixels_mut() {
        let Rgb([r, g, b]) = *warped.get_pixel(x, y);
        let opacity = alpha.get_pixel(x, y)[0] as u8;
        *pixel = Rgba([r, g, b, opacity]);
    }
    // the refracted background seen inside a drop is an inverted view
    imageops::flip_vertical_in_place(&mut texture);
    Ok(texture)
}

/// Synthetic pinhole intrinsics driving the fisheye warp.
///
/// `K` anchors the principal point at the drop center `(2r, 3r)` with focal
/// lengths `(30r, 20r)`; `Knew` copies `K` and widens both focal lengths by
/// `2 * r^(1/3)`, coupling the warp's field of view to the drop size so
/// smaller drops magnify more aggressively.
fn intrinsics(radius: u32) -> (DMat3, DMat3) {
    let r = f64::from(radius);
    let k = DMat3::from_cols(
        DVec3::new(30.0 * r, 0.0, 0.0),
        DVec3::new(0.0, 20.0 * r, 0.0),
        DVec3::new(2.0 * r, 3.0 * r, 1.0),
    );
    let gain = 2.0 * r.cbrt();
    let mut knew = k;
    knew.x_axis.x *= gain;
    knew.y_axis.y *= gain;
    (k, knew)
}

/// Equidistant fisheye undistortion with zero polynomial distortion.
///
/// Each destination pixel is normalized through `Knew`, pushed through the
/// forward model `theta = atan(r)`, reprojected through `K` and sampled
/// bilinearly from the source. Samples falling outside the source are
/// black.
fn undistort(source: &RgbImage, radius: u32) -> RgbImage {
    let (k, knew) = intrinsics(radius);
    let inverse = knew.inverse();
    let (width, height) = source.dimensions();

    let mut output = RgbImage::new(width, height);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let point = inverse * DVec3::new(f64::from(x), f64::from(y), 1.0);
        let (nx, ny) = (point.x / point.z, point.y / point.z);
        let reach = nx.hypot(ny);
        let scale = if reach > f64::EPSILON {
            reach.atan() / reach
        } else {
            1.0
        };
        let sx = k.x_axis.x * nx * scale + k.z_axis.x;
        let sy = k.y_axis.y * ny * scale + k.z_axis.y;
        *pixel = sample_bilinear(source, sx, sy);
    }
    output
}

/// Bilinear sample with a black border outside the source.
fn sample_bilinear(source: &RgbImage, x: f64, y: f64) -> Rgb<u8> {
    let (width, height) = source.dimensions();
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let mut acc = [0.0_f64; 3];
    for (dy, wy) in [(0, 1.0 - fy), (1, fy)] {
        for (dx, wx) in [(0, 1.0 - fx), (1, fx)] {
            let px = x0 as i64 + dx;
            let py = y0 as i64 + dy;
            let weight = wx * wy;
            if weight == 0.0
                || px < 0
                || py < 0
                || px >= i64::from(width)
                || py >= i64::from(height)
            {
                continue;
            }
            let sample = source.get_pixel(px as u32, py as u32);
            for (channel, value) in acc.iter_mut().zip(sample.0) {
                *channel += weight * f64::from(value);
            }
        }
    }
    Rgb(acc.map(|v| v.round() as u8))
}
