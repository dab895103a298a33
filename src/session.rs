//! Review session: cursor, label map, and cache consumer
//!
//! A `ReviewSession` owns everything for one pass over a folder: the
//! sequence, the cursor, the label map, the prefetch cache, and the
//! supervisor for the background loader. The foreground drives it one
//! action at a time:
//!
//! 1. `present()` returns the asset for the current index, from the cache
//!    when the loader got there first and by decoding synchronously
//!    otherwise. It then refills the prefetch window if needed and evicts
//!    entries that have fallen behind the cursor.
//! 2. `advance()` records a label for the current item, moves the cursor
//!    forward by one, and presents the next item. Reaching the end of the
//!    sequence stops the loader and finishes the session.

use std::fmt;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::asset::{Asset, AssetDecoder, Bounds};
use crate::files::FileError;
use crate::folder::Sequence;
use crate::labels::{write_labels, LabelMap, Orientation};
use crate::prefetch::{LoaderContext, LoaderEvent, LoaderSupervisor, PrefetchCache, PrefetchPolicy};

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Review session is already finished")]
    Finished,

    #[error("Failed to save labels: {0}")]
    Save(#[from] FileError),
}

/// Whether the session is still accepting labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Reviewing,
    Finished,
}

/// Where the presented asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource {
    /// Prefetched by the background loader.
    CacheHit,
    /// Decoded synchronously on a cache miss.
    Decoded,
    /// Could not be decoded; a placeholder is shown.
    Unavailable,
}

/// The item currently in front of the operator.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub index: usize,
    pub name: String,
    pub asset: Arc<Asset>,
    pub source: AssetSource,
}

/// Result of labeling an item.
#[derive(Debug, Clone)]
pub enum Step {
    /// The next item to show.
    Next(Presentation),
    /// That was the last item.
    Finished,
}

/// Progress for display: 1-based position, total items, and how many
/// items at or after the cursor are already decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
    pub cached: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}  \u{2022}  {} preloaded",
            self.position, self.total, self.cached
        )
    }
}

/// One pass over a sequence from cursor 0 to the end.
pub struct ReviewSession {
    sequence: Sequence,
    decoder: Arc<dyn AssetDecoder>,
    cache: PrefetchCache,
    supervisor: LoaderSupervisor,
    ready_rx: Receiver<LoaderEvent>,
    placeholder_bounds: Bounds,
    cursor: usize,
    loaded_up_to: usize,
    labels: LabelMap,
    state: SessionState,
}

impl ReviewSession {
    /// Start a session over `sequence`.
    ///
    /// The first prefetch window is started immediately. An empty sequence
    /// yields a session that is already finished and never starts a loader.
    pub fn new(
        sequence: Sequence,
        decoder: Arc<dyn AssetDecoder>,
        policy: PrefetchPolicy,
        placeholder_bounds: Bounds,
    ) -> Self {
        let (events, ready_rx) = channel();
        let cache = PrefetchCache::new();
        let context = LoaderContext {
            items: sequence.shared_items(),
            decoder: Arc::clone(&decoder),
            cache: cache.clone(),
            events,
        };
        let mut supervisor = LoaderSupervisor::new(policy, context);

        let (state, loaded_up_to) = if sequence.is_empty() {
            info!(folder = %sequence.root().display(), "no images to review");
            (SessionState::Finished, 0)
        } else {
            info!(
                folder = %sequence.root().display(),
                count = sequence.len(),
                window = policy.window_size,
                "review session started"
            );
            (SessionState::Reviewing, supervisor.start_at(0))
        };

        Self {
            sequence,
            decoder,
            cache,
            supervisor,
            ready_rx,
            placeholder_bounds,
            cursor: 0,
            loaded_up_to,
            labels: LabelMap::new(),
            state,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn cache(&self) -> &PrefetchCache {
        &self.cache
    }

    pub fn supervisor(&self) -> &LoaderSupervisor {
        &self.supervisor
    }

    /// End of the range covered by loaders started so far.
    pub fn loaded_up_to(&self) -> usize {
        self.loaded_up_to
    }

    /// Name of the item under the cursor.
    pub fn current_name(&self) -> Option<&str> {
        if self.is_finished() {
            return None;
        }
        self.sequence.get(self.cursor)
    }

    /// Whether `index` is already decoded, i.e. presenting it won't block.
    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.contains(index)
    }

    /// Prefetched asset for the current index, if the loader has published it.
    pub fn cached_current(&self) -> Option<Arc<Asset>> {
        if self.is_finished() {
            return None;
        }
        self.cache.get(self.cursor)
    }

    /// Present the item under the cursor.
    ///
    /// Returns `None` once the session is finished.
    pub fn present(&mut self) -> Option<Presentation> {
        let index = self.cursor;
        let name = self.current_name()?.to_string();

        let (asset, source) = match self.cache.get(index) {
            Some(asset) => (asset, AssetSource::CacheHit),
            None => self.decode_now(&name),
        };
        debug!(index, ?source, "presenting item");

        self.loaded_up_to = self
            .supervisor
            .ensure_coverage(self.cursor, self.loaded_up_to);
        let threshold = self.supervisor.policy().eviction_threshold(self.cursor);
        let evicted = self.cache.evict_before(threshold);
        if evicted > 0 {
            debug!(evicted, threshold, "evicted stale cache entries");
        }

        Some(Presentation {
            index,
            name,
            asset,
            source,
        })
    }

    /// Label the current item and move to the next one.
    pub fn advance(&mut self, orientation: Orientation) -> Result<Step, SessionError> {
        let name = self.current_name().ok_or(SessionError::Finished)?.to_string();
        self.labels.record(name, orientation);
        self.cursor += 1;

        if self.cursor >= self.sequence.len() {
            self.finish();
            return Ok(Step::Finished);
        }

        Ok(self.present().map_or(Step::Finished, Step::Next))
    }

    /// Drain "ready" notifications from the loader.
    ///
    /// Returns how many items were published since the last call.
    pub fn poll_ready(&mut self) -> usize {
        self.ready_rx.try_iter().count()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.cursor + 1,
            total: self.sequence.len(),
            cached: self.cache.count_at_or_after(self.cursor),
        }
    }

    /// Write the label map to `path`.
    ///
    /// The labels stay in memory on failure, so the write can be retried.
    pub fn save_labels(&self, path: &Path) -> Result<(), SessionError> {
        write_labels(&self.labels, path)?;
        Ok(())
    }

    fn decode_now(&self, name: &str) -> (Arc<Asset>, AssetSource) {
        match self.decoder.decode(name) {
            Ok(asset) => (Arc::new(asset), AssetSource::Decoded),
            Err(e) => {
                warn!(item = %name, error = %e, "image unavailable, showing placeholder");
                (
                    Arc::new(Asset::placeholder(self.placeholder_bounds)),
                    AssetSource::Unavailable,
                )
            }
        }
    }

    fn finish(&mut self) {
        self.state = SessionState::Finished;
        self.supervisor.shutdown();
        self.cache.clear();
        info!(labeled = self.labels.len(), "review session finished");
    }
}
