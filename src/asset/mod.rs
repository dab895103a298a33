//! Decoded, display-ready images
//!
//! An [`Asset`] is one item of the review sequence after it has been loaded
//! and scaled to fit the display box. Assets are immutable once produced and
//! are shared between the prefetch cache and the foreground as `Arc<Asset>`.

pub mod decoder;
pub mod error;

pub use decoder::{AssetDecoder, ImageDecoder, ResizeFilter};
pub use error::DecodeError;

use std::fmt;

use image::{DynamicImage, Rgba, RgbaImage};

/// Fill colour of the placeholder shown for items that cannot be decoded.
const PLACEHOLDER_RGBA: [u8; 4] = [0x16, 0x21, 0x3e, 0xff];

/// Display bounding box an asset is scaled to fit within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(780, 430)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A decoded and size-normalized image.
#[derive(Clone, PartialEq, Eq)]
pub struct Asset {
    pixels: RgbaImage,
    source_width: u32,
    source_height: u32,
}

impl Asset {
    /// Wrap an already-scaled pixel buffer.
    pub fn new(pixels: RgbaImage, source_dimensions: (u32, u32)) -> Self {
        Self {
            pixels,
            source_width: source_dimensions.0,
            source_height: source_dimensions.1,
        }
    }

    /// Scale `image` to fit within `bounds`, preserving its aspect ratio.
    pub fn scaled(image: DynamicImage, bounds: Bounds, filter: ResizeFilter) -> Self {
        let source = (image.width(), image.height());
        let resized = image.resize(bounds.width, bounds.height, filter.into());
        Self::new(resized.to_rgba8(), source)
    }

    /// Solid asset presented in place of an item that failed to decode.
    pub fn placeholder(bounds: Bounds) -> Self {
        let pixels = RgbaImage::from_pixel(
            bounds.width.max(1),
            bounds.height.max(1),
            Rgba(PLACEHOLDER_RGBA),
        );
        Self::new(pixels, (0, 0))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Dimensions of the original image before scaling.
    ///
    /// `(0, 0)` for placeholders.
    pub fn source_dimensions(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether the source image is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.source_height > self.source_width
    }

    /// Resident size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.as_raw().len()
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("source_width", &self.source_width)
            .field("source_height", &self.source_height)
            .finish()
    }
}
