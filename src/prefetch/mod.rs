//! Sliding-window prefetching
//!
//! Keeps the next few items of the review sequence decoded ahead of the
//! operator. One background loader at a time decodes a window of items into
//! a shared cache; the supervisor decides when to replace it with a loader
//! for the following window, and the foreground evicts entries it has left
//! behind.

pub mod cache;
pub mod loader;
pub mod supervisor;

pub use cache::PrefetchCache;
pub use loader::{BackgroundLoader, LoaderContext, LoaderEvent, LoaderJob, LoaderState};
pub use supervisor::{LoaderSupervisor, PrefetchPolicy};
