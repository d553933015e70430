//! Synthetic raindrop sprites for rain augmentation pipelines.
//!
//! A [`RainDrop`] bundles the three rasters a compositor needs to paint an
//! artificial drop over a scene: a binary label mask, a soft alpha map
//! derived from it by blur and normalization, and — once a background patch
//! is supplied — an RGBA texture simulating the refracted, inverted view
//! through the drop's surface.
//!
//! Scene composition, drop placement, collision resolution and file I/O are
//! the calling pipeline's business. This crate only stores the collision
//! state the compositor reports back, as opaque keys.
//!
//! # Examples
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use rain_sprite::{RainDrop, ShapeVariant};
//!
//! # fn main() -> rain_sprite::Result<()> {
//! let mut drop = RainDrop::new(1, 20, ShapeVariant::Default)?;
//! assert_eq!(drop.label_map().dimensions(), (80, 100));
//!
//! // The compositor extracts the patch behind the drop's placement.
//! let background = RgbImage::from_pixel(80, 100, Rgb([90, 120, 160]));
//! drop.update_texture(&background)?;
//! assert!(drop.texture().is_some());
//! # Ok(())
//! # }
//! ```
//!
//! Splash drops are randomized; inject a seeded generator for
//! reproducibility:
//!
//! ```
//! use rand::SeedableRng;
//! use rain_sprite::{RainDrop, ShapeVariant};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let drop = RainDrop::with_rng(2, 30, ShapeVariant::Splash, &mut rng)?;
//! assert_eq!(drop.label_map().dimensions(), (120, 150));
//! # Ok::<(), rain_sprite::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod alpha;
pub mod error;
mod raindrop;
mod raster;
pub mod shape;
mod texture;

pub use error::{Error, Result};
pub use raindrop::{AlphaMap, RainDrop};
pub use shape::{ShapeVariant, splash_outline};
