//! Decoded images shared between items, rooms and the backend.
//!
//! A [`Sprite`] is an immutable RGBA buffer plus an id. Resampling produces a
//! new sprite with a fresh id, so backends can cache uploaded textures by id.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use thiserror::Error;
use uuid::Uuid;

/// Failures while loading assets at startup. None of these are recoverable.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image '{path}'")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load font '{path}': {reason}")]
    Font { path: PathBuf, reason: String },
    #[error("failed to load audio '{path}': {reason}")]
    Audio { path: PathBuf, reason: String },
}

#[derive(Clone)]
pub struct Sprite {
    id: Uuid,
    pixels: Rc<RgbaImage>,
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("id", &self.id)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Sprite {
    /// Decode an image file into a sprite.
    ///
    /// # Errors
    /// Returns [`AssetError::Image`] if the file is missing or can't be decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Sprite, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Sprite::from_image(decoded.to_rgba8()))
    }

    pub fn from_image(pixels: RgbaImage) -> Sprite {
        Sprite {
            id: Uuid::new_v4(),
            pixels: Rc::new(pixels),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Alpha channel at a pixel, or `None` outside the buffer.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width() && y < self.height() {
            Some(self.pixels.get_pixel(x, y)[3])
        } else {
            None
        }
    }

    /// Smoothly resample to an exact size (aspect ratio is not preserved).
    pub fn scaled(&self, width: u32, height: u32) -> Sprite {
        Sprite::from_image(imageops::resize(self.pixels.as_ref(), width, height, FilterType::Triangle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn half_transparent(width: u32, height: u32) -> Sprite {
        Sprite::from_image(RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([200, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        }))
    }

    #[test]
    fn alpha_lookup_respects_bounds() {
        let sprite = half_transparent(4, 2);
        assert_eq!(sprite.alpha_at(0, 0), Some(255));
        assert_eq!(sprite.alpha_at(3, 1), Some(0));
        assert_eq!(sprite.alpha_at(4, 0), None);
        assert_eq!(sprite.alpha_at(0, 2), None);
    }

    #[test]
    fn scaling_produces_a_new_sprite() {
        let sprite = half_transparent(100, 80);
        let thumb = sprite.scaled(50, 50);
        assert_eq!((thumb.width(), thumb.height()), (50, 50));
        assert_ne!(thumb.id(), sprite.id());
        assert_eq!(thumb.alpha_at(2, 25), Some(255));
        assert_eq!(thumb.alpha_at(48, 25), Some(0));
        // the source is untouched
        assert_eq!((sprite.width(), sprite.height()), (100, 80));
    }

    #[test]
    fn clones_share_identity() {
        let sprite = half_transparent(2, 2);
        assert_eq!(sprite.clone().id(), sprite.id());
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let err = Sprite::load("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
        assert!(err.to_string().contains("not/here.png"));
    }
}
