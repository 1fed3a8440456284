/// Lanes per thread group when nothing else is configured. One warp.
pub const DEFAULT_THREAD_EXECUTION_WIDTH: usize = 32;

/// Largest accepted number of lanes per thread group, the CUDA limit on threads per block.
pub const MAX_THREAD_EXECUTION_WIDTH: usize = 1024;

/// Configuration for a [`Hasher`](crate::Hasher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasherConfig {
    /// How many kernel threads make up one thread group. Groups are the unit handed to the
    /// dispatch pool; the lanes of a group run one after another on the same worker.
    /// Must lie in `1..=`[`MAX_THREAD_EXECUTION_WIDTH`]. `32` by default.
    pub thread_execution_width: usize,
    /// Number of worker threads in the dispatch pool. `None` lets rayon pick, which is usually
    /// one per logical CPU.
    /// `None` by default.
    pub num_threads: Option<usize>,
    /// Prefix for the names of the dispatch pool's worker threads.
    /// `"gpu-sha1"` by default.
    pub thread_name_prefix: String,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            thread_execution_width: DEFAULT_THREAD_EXECUTION_WIDTH,
            num_threads: None,
            thread_name_prefix: String::from("gpu-sha1"),
        }
    }
}

impl HasherConfig {
    /// Same as [`HasherConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// How many kernel threads make up one thread group. Checked by
    /// [`Hasher::with_config`](crate::Hasher::with_config).
    pub fn thread_execution_width(mut self, thread_execution_width: usize) -> Self {
        self.thread_execution_width = thread_execution_width;
        self
    }

    /// Fixes the number of dispatch workers.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Prefix for worker thread names.
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }
}
