//! Background loader thread
//!
//! A loader decodes one contiguous window of the sequence on its own thread
//! and publishes each decoded asset into the shared [`PrefetchCache`].
//! Cancellation is cooperative: the flag is checked before each decode and
//! again before each publish, so a cancelled loader wastes at most one
//! in-flight decode and never publishes after `join()` returns.

use std::io;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::cache::PrefetchCache;
use crate::asset::AssetDecoder;

/// One window of work: decode `window_size` items starting at `start_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderJob {
    pub start_index: usize,
    pub window_size: usize,
}

impl LoaderJob {
    pub fn new(start_index: usize, window_size: usize) -> Self {
        Self {
            start_index,
            window_size,
        }
    }

    /// Exclusive end of the window, ignoring the sequence length.
    pub fn end_index(&self) -> usize {
        self.start_index.saturating_add(self.window_size)
    }

    /// Indices this job covers in a sequence of `len` items.
    pub fn range(&self, len: usize) -> Range<usize> {
        let end = self.end_index().min(len);
        self.start_index.min(end)..end
    }
}

/// Lifecycle of a loader: Idle → Running → (Completed | Cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoaderState {
    Idle = 0,
    Running = 1,
    Completed = 2,
    Cancelled = 3,
}

impl LoaderState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => LoaderState::Running,
            2 => LoaderState::Completed,
            3 => LoaderState::Cancelled,
            _ => LoaderState::Idle,
        }
    }

    /// Whether the loader has stopped for good.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoaderState::Completed | LoaderState::Cancelled)
    }
}

/// Notifications sent from the loader thread to the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderEvent {
    /// The asset at this index has been published to the cache.
    Ready(usize),
}

/// Everything a loader needs to do its work. Cheap to clone.
#[derive(Clone)]
pub struct LoaderContext {
    pub items: Arc<[String]>,
    pub decoder: Arc<dyn AssetDecoder>,
    pub cache: PrefetchCache,
    pub events: Sender<LoaderEvent>,
}

/// Cancellation flag and state shared with the worker thread.
#[derive(Debug)]
struct Shared {
    cancelled: AtomicBool,
    state: AtomicU8,
}

impl Shared {
    fn state(&self) -> LoaderState {
        LoaderState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn set_state(&self, state: LoaderState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Marks the loader Cancelled if the worker unwinds while still Running.
struct ExitGuard(Arc<Shared>);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        if self.0.state() == LoaderState::Running {
            self.0.set_state(LoaderState::Cancelled);
        }
    }
}

/// A single cancellable unit of prefetch work.
pub struct BackgroundLoader {
    job: LoaderJob,
    shared: Arc<Shared>,
    context: Option<LoaderContext>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundLoader {
    /// Create an idle loader for `job`. Nothing runs until `start()`.
    pub fn new(job: LoaderJob, context: LoaderContext) -> Self {
        Self {
            job,
            shared: Arc::new(Shared {
                cancelled: AtomicBool::new(false),
                state: AtomicU8::new(LoaderState::Idle as u8),
            }),
            context: Some(context),
            handle: None,
        }
    }

    pub fn job(&self) -> LoaderJob {
        self.job
    }

    pub fn state(&self) -> LoaderState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoaderState::Running
    }

    /// Spawn the worker thread.
    ///
    /// A job whose range is empty completes immediately without spawning.
    /// Calling `start()` more than once has no effect.
    pub fn start(&mut self) -> io::Result<()> {
        let Some(context) = self.context.take() else {
            return Ok(());
        };

        let range = self.job.range(context.items.len());
        if range.is_empty() {
            debug!(start = self.job.start_index, "prefetch window is past the end");
            self.shared.set_state(LoaderState::Completed);
            return Ok(());
        }

        self.shared.set_state(LoaderState::Running);
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(format!("prefetch-{}", self.job.start_index))
            .spawn(move || run(range, context, shared));

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.shared.set_state(LoaderState::Cancelled);
                Err(e)
            }
        }
    }

    /// Ask the worker to stop before its next item. Does not block.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);
    }

    /// Block until the worker has exited.
    ///
    /// After this returns the loader publishes nothing further.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(
                    start = self.job.start_index,
                    "prefetch worker panicked; treating window as cancelled"
                );
                self.shared.set_state(LoaderState::Cancelled);
            }
        }
        if self.state() == LoaderState::Idle {
            // Never started; there is nothing left to wait for.
            self.context = None;
            self.shared.set_state(LoaderState::Cancelled);
        }
    }
}

impl Drop for BackgroundLoader {
    fn drop(&mut self) {
        self.cancel();
        self.join();
    }
}

fn run(range: Range<usize>, context: LoaderContext, shared: Arc<Shared>) {
    let _guard = ExitGuard(Arc::clone(&shared));
    debug!(start = range.start, end = range.end, "prefetch window started");

    for index in range.clone() {
        if shared.is_cancelled() {
            debug!(index, "prefetch window cancelled");
            shared.set_state(LoaderState::Cancelled);
            return;
        }

        let id = &context.items[index];
        match context.decoder.decode(id) {
            Ok(asset) => {
                if shared.is_cancelled() {
                    debug!(index, "prefetch window cancelled before publish");
                    shared.set_state(LoaderState::Cancelled);
                    return;
                }
                context.cache.put(index, Arc::new(asset));
                // Foreground may have gone away
                let _ = context.events.send(LoaderEvent::Ready(index));
            }
            Err(e) => {
                debug!(index, item = %id, error = %e, "prefetch decode failed, skipping");
            }
        }
    }

    shared.set_state(LoaderState::Completed);
    debug!(start = range.start, end = range.end, "prefetch window completed");
}
