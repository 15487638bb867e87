//! Lunar surface texture loading and sampling
//!
//! The high-resolution share image can wrap a real moon photograph around
//! the shaded sphere. The texture is decoded once by the host and handed to
//! the shader as plain RGBA data; the shader only samples it.
//!
//! Sampling uses the site's original simplified orthographic-to-texture
//! mapping: the visible hemisphere is squeezed into the horizontal mid-band
//! of the texture (`u·w/2 + w/4`). It is not a true spherical projection
//! and distorts near the limb, but the visual intent is a recognizable
//! textured disc, and the formula is kept for output compatibility.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors in the texture pipeline.
///
/// All of these are non-fatal to a render: the caller logs the error and
/// falls back to the procedural crater surface.
#[derive(Error, Debug)]
pub enum TextureError {
    /// Reading the texture file failed (missing file, permissions).
    #[error("texture read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents could not be decoded as an image.
    #[error("texture decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// A raw buffer did not match its declared dimensions.
    #[error("texture buffer is {got} bytes, expected {expected} for {width}x{height} RGBA")]
    BadDimensions {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
}

/// A decoded, read-only RGBA surface texture.
#[derive(Debug, Clone)]
pub struct SurfaceTexture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SurfaceTexture {
    /// Decode a texture from a file (PNG/JPEG, anything `image` handles).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = fs::read(path)?;
        let decoded = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Self::from_rgba8(width, height, decoded.into_raw())
    }

    /// Wrap an already-decoded RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::BadDimensions {
                width,
                height,
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the texel for a front-facing sphere normal `(nx, ny)`.
    ///
    /// Maps the normal into the texture's horizontal mid-band (see module
    /// docs) and wraps both coordinates.
    pub fn sample_normal(&self, nx: f64, ny: f64) -> [u8; 3] {
        let u = (nx + 1.0) / 2.0;
        let v = (ny + 1.0) / 2.0;
        let w = self.width as f64;
        let h = self.height as f64;
        let tx = ((u * w * 0.5 + w * 0.25).floor() as i64).rem_euclid(self.width as i64) as usize;
        let ty = ((v * h).floor() as i64).rem_euclid(self.height as i64) as usize;
        let idx = (ty * self.width as usize + tx) * 4;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}
