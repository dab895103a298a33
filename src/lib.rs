//! orilabel - image orientation labeler
//!
//! Steps an operator through a folder of images, recording a portrait or
//! landscape label for each. Upcoming images are decoded ahead of the
//! cursor by a background loader (see [`prefetch`]) so advancing never
//! waits on disk once the window is warm.

pub mod asset;
pub mod cli;
pub mod config;
pub mod files;
pub mod folder;
pub mod labels;
pub mod logging;
pub mod manifest;
pub mod prefetch;
pub mod session;
pub mod tui;

pub use asset::{Asset, AssetDecoder, Bounds, DecodeError, ImageDecoder, ResizeFilter};
pub use config::Config;
pub use folder::{scan_folder, FolderError, Sequence};
pub use labels::{write_labels, LabelMap, Orientation};
pub use manifest::{build_manifest, ManifestInputs, ManifestSummary, OcrRecord};
pub use prefetch::{LoaderSupervisor, PrefetchCache, PrefetchPolicy};
pub use session::{AssetSource, Presentation, ReviewSession, SessionError, Step};
