//! Soft alpha synthesis from a drawn label grid.

use image::{GrayImage, ImageBuffer, imageops};
use log::warn;

use crate::raindrop::AlphaMap;

/// Standard deviation of the blur that softens the silhouette edge.
const EDGE_BLUR_SIGMA: f32 = 10.0;

/// Derive the `[0, 255]` alpha map from a freshly drawn `{0, 128}` label
/// grid, then collapse the grid itself to binary `{0, 1}` in place.
///
/// The blurred field is rescaled linearly so its maximum is exactly 255. A
/// field with no marked pixels stays all zero — a fully transparent drop is
/// a legitimate degenerate case, not an error.
pub(crate) fn synthesize(label: &mut GrayImage) -> AlphaMap {
    let blurred = imageops::blur(&*label, EDGE_BLUR_SIGMA);
    let peak = blurred.pixels().map(|p| p[0]).max().unwrap_or(0);

    let (width, height) = label.dimensions();
    let mut alpha: AlphaMap = ImageBuffer::new(width, height);
    if peak == 0 {
        warn!("blurred label field is all zero, leaving the alpha map fully transparent");
    } else {
        for (dst, src) in alpha.pixels_mut().zip(blurred.pixels()) {
            dst[0] = f32::from(src[0]) / f32::from(peak) * 255.0;
        }
    }

    for pixel in label.pixels_mut() {
        if pixel[0] > 0 {
            pixel[0] = 1;
        }
    }
    alpha
}
