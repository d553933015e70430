//! The raindrop entity: generated or wrapped raster state plus the
//! bookkeeping an external compositor reads and writes.

use std::fmt;

use image::{GrayImage, ImageBuffer, Luma, RgbImage, RgbaImage};
use log::trace;
use rand::Rng;

use crate::alpha;
use crate::error::{Error, Result};
use crate::shape::{self, ShapeVariant};
use crate::texture;

/// Real-valued opacity raster with values in `[0, 255]`, same dimensions as
/// the label map it was derived from.
pub type AlphaMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// A single synthetic raindrop sprite.
///
/// A drop owns three rasters: a binary label map marking its silhouette, a
/// soft alpha map derived from it, and — once a background patch has been
/// supplied via [`update_texture`](Self::update_texture) — an RGBA texture
/// simulating the refracted view through the drop's surface. Label and
/// alpha maps always share dimensions of `4 * radius` by `5 * radius`
/// pixels when the drop was generated from a radius.
///
/// Collision state is owned here but written by the external compositor
/// after placement; the collision list stores opaque keys, never
/// references to other drops.
#[derive(Debug, Clone)]
pub struct RainDrop {
    key: u32,
    center: Option<(i32, i32)>,
    radius: u32,
    variant: ShapeVariant,
    label_map: GrayImage,
    alpha_map: AlphaMap,
    texture: Option<RgbaImage>,
    uses_external_label: bool,
    has_collision: bool,
    collides_with: Vec<u32>,
}

impl RainDrop {
    /// Generate a drop of the given radius and silhouette variant.
    ///
    /// Splash randomness is drawn from the thread-local generator; use
    /// [`RainDrop::with_rng`] to inject a seeded one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rain_sprite::{RainDrop, ShapeVariant};
    ///
    /// let drop = RainDrop::new(1, 20, ShapeVariant::Default)?;
    /// assert_eq!(drop.label_map().dimensions(), (80, 100));
    /// # Ok::<(), rain_sprite::Error>(())
    /// ```
    pub fn new(key: u32, radius: u32, variant: ShapeVariant) -> Result<Self> {
        Self::with_rng(key, radius, variant, &mut rand::rng())
    }

    /// Generate a drop using an explicit random source.
    pub fn with_rng<R: Rng>(
        key: u32,
        radius: u32,
        variant: ShapeVariant,
        rng: &mut R,
    ) -> Result<Self> {
        if radius == 0 {
            return Err(Error::InvalidRadius(radius));
        }
        // label map's WxH = 4*R, 5*R
        let mut label_map = GrayImage::new(radius * 4, radius * 5);
        shape::draw_label(&mut label_map, radius, variant, rng);
        let alpha_map = alpha::synthesize(&mut label_map);
        trace!(
            "generated {variant:?} drop {key} at {}x{}",
            label_map.width(),
            label_map.height()
        );

        Ok(Self {
            key,
            center: None,
            radius,
            variant,
            label_map,
            alpha_map,
            texture: None,
            uses_external_label: false,
            has_collision: false,
            collides_with: Vec::new(),
        })
    }

    /// Wrap externally supplied label and alpha maps instead of generating.
    ///
    /// The radius is derived as `min(width / 4, height / 4)` from the maps
    /// and [`uses_external_label`](Self::uses_external_label) reports true.
    /// The maps must share dimensions and be large enough for a positive
    /// radius.
    pub fn from_maps(
        key: u32,
        label_map: GrayImage,
        alpha_map: AlphaMap,
        center: Option<(i32, i32)>,
    ) -> Result<Self> {
        let label = label_map.dimensions();
        let alpha = alpha_map.dimensions();
        if label != alpha {
            return Err(Error::MapDimensionMismatch { label, alpha });
        }
        let (width, height) = label;
        let radius = (width / 4).min(height / 4);
        if radius == 0 {
            return Err(Error::DegenerateMaps(width, height));
        }

        Ok(Self {
            key,
            center,
            radius,
            variant: ShapeVariant::Default,
            label_map,
            alpha_map,
            texture: None,
            uses_external_label: true,
            has_collision: false,
            collides_with: Vec::new(),
        })
    }

    /// Produce the refracted RGBA texture from a background patch whose
    /// dimensions match the drop's maps.
    ///
    /// A repeat call fully replaces the previous texture.
    pub fn update_texture(&mut self, background: &RgbImage) -> Result<()> {
        let texture = texture::refract(background, &self.alpha_map, self.radius)?;
        self.texture = Some(texture);
        Ok(())
    }

    /// Record the collision state determined by the external compositor.
    pub fn set_collision(&mut self, has_collision: bool, collides_with: Vec<u32>) {
        self.has_collision = has_collision;
        self.collides_with = collides_with;
    }

    /// Reassign the drop's key.
    pub fn set_key(&mut self, key: u32) {
        self.key = key;
    }

    /// Place or clear the drop's center. The coordinate is opaque payload
    /// for the caller's own coordinate system and is never validated.
    pub fn set_center(&mut self, center: Option<(i32, i32)>) {
        self.center = center;
    }

    /// Get the drop's key
    pub fn key(&self) -> u32 {
        self.key
    }

    /// Get the drop's center, if one was assigned
    pub fn center(&self) -> Option<(i32, i32)> {
        self.center
    }

    /// Get the drop's radius in pixels
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Get the silhouette variant the drop was generated with. Meaningless
    /// for drops built from external maps.
    pub fn variant(&self) -> ShapeVariant {
        self.variant
    }

    /// Get the binary label map; values are always in `{0, 1}`
    pub fn label_map(&self) -> &GrayImage {
        &self.label_map
    }

    /// Get the soft alpha map; values are in `[0, 255]`
    pub fn alpha_map(&self) -> &AlphaMap {
        &self.alpha_map
    }

    /// Get the refracted texture, if a background has been supplied
    pub fn texture(&self) -> Option<&RgbaImage> {
        self.texture.as_ref()
    }

    /// Whether the compositor has flagged this drop as colliding
    pub fn has_collision(&self) -> bool {
        self.has_collision
    }

    /// Keys of the drops this one collides with, in the order reported
    pub fn collides_with(&self) -> &[u32] {
        &self.collides_with
    }

    /// Whether this drop wraps externally supplied maps rather than
    /// generated ones
    pub fn uses_external_label(&self) -> bool {
        self.uses_external_label
    }
}

impl fmt::Display for RainDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.label_map.dimensions();
        write!(
            f,
            "Raindrop {} ({}x{}, {:?})",
            self.key, width, height, self.variant
        )
    }
}
