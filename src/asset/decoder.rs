//! Image decoding and scaling
//!
//! `AssetDecoder` is the seam between the prefetch machinery and the
//! filesystem. The production implementation, `ImageDecoder`, reads an item
//! with the `image` crate and scales it into the display box.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::{Asset, Bounds, DecodeError};

/// Turns an item identifier into a display-ready asset.
///
/// Implementations are called from both the background loader thread and
/// the foreground (synchronous fallback), so they must be `Send + Sync`.
pub trait AssetDecoder: Send + Sync + 'static {
    fn decode(&self, id: &str) -> Result<Asset, DecodeError>;
}

/// Resampling filter used when scaling assets into the display box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    /// Config name for this filter.
    pub fn name(&self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmull-rom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Decodes items as image files relative to a root folder.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    root: PathBuf,
    bounds: Bounds,
    filter: ResizeFilter,
}

impl ImageDecoder {
    /// Create a decoder for images under `root`, scaled to fit `bounds`.
    pub fn new(root: impl Into<PathBuf>, bounds: Bounds) -> Self {
        Self {
            root: root.into(),
            bounds,
            filter: ResizeFilter::default(),
        }
    }

    /// Use a different resampling filter.
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl AssetDecoder for ImageDecoder {
    fn decode(&self, id: &str) -> Result<Asset, DecodeError> {
        let path = self.root.join(id);
        let image = image::open(&path).map_err(|source| DecodeError::Open {
            path: path.clone(),
            source,
        })?;

        if image.width() == 0 || image.height() == 0 {
            return Err(DecodeError::EmptyImage { path });
        }

        Ok(Asset::scaled(image, self.bounds, self.filter))
    }
}
