//! Loader supervision and refill policy
//!
//! The supervisor owns at most one background loader. When the operator has
//! consumed enough of the covered window it cancels and joins the current
//! loader, then starts a new one for the next window. There is never more
//! than one loader running.

use tracing::{debug, warn};

use super::loader::{BackgroundLoader, LoaderContext, LoaderJob, LoaderState};

/// Tuning parameters for the sliding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchPolicy {
    /// Items decoded per loader job.
    pub window_size: usize,
    /// Already-passed items the cache may keep behind the cursor.
    pub evict_margin: usize,
    /// Start the next window once the cursor is this close to the end of
    /// the covered range.
    pub refill_threshold: usize,
}

impl PrefetchPolicy {
    pub const DEFAULT_WINDOW_SIZE: usize = 20;
    pub const DEFAULT_EVICT_MARGIN: usize = 5;

    /// Policy with the refill threshold at half a window.
    pub fn new(window_size: usize, evict_margin: usize) -> Self {
        Self {
            window_size,
            evict_margin,
            refill_threshold: window_size / 2,
        }
    }

    pub fn with_refill_threshold(mut self, refill_threshold: usize) -> Self {
        self.refill_threshold = refill_threshold;
        self
    }

    /// Whether a cursor this far into the covered range needs a new window.
    pub fn needs_refill(&self, cursor: usize, loaded_up_to: usize) -> bool {
        cursor >= loaded_up_to.saturating_sub(self.refill_threshold)
    }

    /// Lowest index the cache keeps for a given cursor.
    pub fn eviction_threshold(&self, cursor: usize) -> usize {
        cursor.saturating_sub(self.evict_margin)
    }

    /// Upper bound on resident cache entries under this policy: the
    /// eviction margin behind the cursor plus the unconsumed part of the
    /// old window and the whole new window ahead of it.
    pub fn max_resident(&self) -> usize {
        self.evict_margin + self.refill_threshold + self.window_size
    }
}

impl Default for PrefetchPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW_SIZE, Self::DEFAULT_EVICT_MARGIN)
    }
}

/// Owns the single active background loader.
pub struct LoaderSupervisor {
    policy: PrefetchPolicy,
    context: LoaderContext,
    current: Option<BackgroundLoader>,
    jobs_started: usize,
}

impl LoaderSupervisor {
    pub fn new(policy: PrefetchPolicy, context: LoaderContext) -> Self {
        Self {
            policy,
            context,
            current: None,
            jobs_started: 0,
        }
    }

    pub fn policy(&self) -> &PrefetchPolicy {
        &self.policy
    }

    /// Start the next window if the cursor has consumed enough of the
    /// current one. Returns the new end of the covered range.
    pub fn ensure_coverage(&mut self, cursor: usize, loaded_up_to: usize) -> usize {
        if !self.policy.needs_refill(cursor, loaded_up_to) {
            return loaded_up_to;
        }
        debug!(cursor, loaded_up_to, "refilling prefetch window");
        self.start_at(loaded_up_to)
    }

    /// Replace the current loader with one covering the window at
    /// `start_index`. Returns the end of the new window.
    pub fn start_at(&mut self, start_index: usize) -> usize {
        self.stop_current();

        let job = LoaderJob::new(start_index, self.policy.window_size);
        let mut loader = BackgroundLoader::new(job, self.context.clone());
        if let Err(e) = loader.start() {
            // Foreground falls back to synchronous decode for this window
            warn!(start = start_index, error = %e, "failed to spawn prefetch worker");
        }
        self.jobs_started += 1;
        self.current = Some(loader);

        job.end_index()
    }

    /// Cancel and join the current loader, if any.
    pub fn shutdown(&mut self) {
        self.stop_current();
    }

    /// Job of the most recently started loader.
    pub fn current_job(&self) -> Option<LoaderJob> {
        self.current.as_ref().map(BackgroundLoader::job)
    }

    /// State of the most recently started loader, `Idle` if none.
    pub fn active_state(&self) -> LoaderState {
        self.current
            .as_ref()
            .map_or(LoaderState::Idle, BackgroundLoader::state)
    }

    pub fn is_running(&self) -> bool {
        self.active_state() == LoaderState::Running
    }

    /// Number of loader jobs started since creation.
    pub fn jobs_started(&self) -> usize {
        self.jobs_started
    }

    fn stop_current(&mut self) {
        if let Some(loader) = self.current.as_mut() {
            if loader.is_running() {
                debug!(start = loader.job().start_index, "cancelling prefetch window");
            }
            loader.cancel();
            loader.join();
        }
    }
}

impl Drop for LoaderSupervisor {
    fn drop(&mut self) {
        self.stop_current();
    }
}
