use std::time::Instant;

use gpu_sha1::kernel::hash_frame_at;
use gpu_sha1::{Digest, DigestRunArgs};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::{
    BatchBuffer, BatchBufferReader, BatchBufferSetter, HasherConfig, HasherError, HasherResult,
    MAX_THREAD_EXECUTION_WIDTH,
};

/// Grid shape for `num_frames` threads in groups of `width`: `(thread_group_count, width)`.
///
/// The group count is rounded the same way the device launch rounds it, which leaves at least one
/// idle lane (and a whole idle group when `num_frames` is a multiple of `width`). `width` must be
/// non-zero.
pub fn launch_dimensions(num_frames: usize, width: usize) -> (usize, usize) {
    // (num_frames + width) / width without the overflowing sum
    (num_frames / width + 1, width)
}

/// Owns the dispatch pool that runs kernel thread groups on the CPU.
#[derive(Debug)]
pub struct Hasher {
    pool: ThreadPool,
    config: HasherConfig,
}

impl Hasher {
    /// Creates a hasher with the default [`HasherConfig`].
    pub fn new() -> HasherResult<Self> {
        Self::with_config(HasherConfig::default())
    }

    /// Creates a hasher and its dispatch pool.
    ///
    /// The thread execution width must lie in `1..=`[`MAX_THREAD_EXECUTION_WIDTH`].
    pub fn with_config(config: HasherConfig) -> HasherResult<Self> {
        match config.thread_execution_width {
            0 => return Err(HasherError::ZeroThreadWidth),
            width if width > MAX_THREAD_EXECUTION_WIDTH => {
                return Err(HasherError::ThreadWidthTooLarge {
                    width,
                    max: MAX_THREAD_EXECUTION_WIDTH,
                })
            }
            _ => {}
        }

        let prefix = config.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.num_threads.unwrap_or(0))
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()?;

        debug!(
            workers = pool.current_num_threads(),
            width = config.thread_execution_width,
            "created hasher"
        );

        Ok(Self { pool, config })
    }

    /// The configuration this hasher was created with.
    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Lanes per thread group.
    pub fn thread_execution_width(&self) -> usize {
        self.config.thread_execution_width
    }

    /// Prepares a batch of up to `count` frames of `inlen` bytes, hashed with `digest`.
    pub fn digest<D: Digest>(
        &self,
        digest: D,
        inlen: usize,
        count: usize,
    ) -> HasherResult<DigestCommandRun<'_, D>> {
        DigestCommandRun::new(self, digest, inlen, count)
    }
}

/// One batch of input frames and the matching digest slots, ready to be run repeatedly.
#[derive(Debug)]
pub struct DigestCommandRun<'r, D> {
    hasher: &'r Hasher,
    input_buffer: BatchBuffer,
    args: DigestRunArgs,
    output_buffer: BatchBuffer,
    _digest: D,
}

impl<'r, D: Digest> DigestCommandRun<'r, D> {
    fn new(hasher: &'r Hasher, digest: D, inlen: usize, count: usize) -> HasherResult<Self> {
        let input_buffer = BatchBuffer::new(inlen, count)?;
        let output_buffer = BatchBuffer::new(D::DIGEST_SIZE, count)?;

        trace!(kernel = D::KERNEL_FN, inlen, count, "allocated batch");

        Ok(Self {
            hasher,
            input_buffer,
            args: DigestRunArgs::default(),
            output_buffer,
            _digest: digest,
        })
    }

    /// Clears the input batch and returns a setter to fill it.
    pub fn input_buffer(&mut self) -> BatchBufferSetter<'_> {
        self.input_buffer.setter()
    }

    /// Reads back the input frames of the batch.
    pub fn input_frames(&self) -> BatchBufferReader<'_> {
        self.input_buffer.reader()
    }

    /// Reads the digests produced by the last [`run`](Self::run), one per input frame.
    pub fn output_buffer(&self) -> BatchBufferReader<'_> {
        self.output_buffer.reader()
    }

    /// The arguments passed to the last run.
    pub fn args(&self) -> &DigestRunArgs {
        &self.args
    }

    /// Hashes every written input frame and blocks until all digests are in the output batch.
    pub fn run(&mut self) -> HasherResult<()> {
        let Self {
            hasher,
            input_buffer,
            args,
            output_buffer,
            ..
        } = self;

        args.inlen = input_buffer.frame_length() as u64;
        let num_frames = input_buffer.num_frames();

        // both batches hold `count` frames, so the digests always fit
        let output = output_buffer.fill_to(num_frames * D::DIGEST_SIZE);
        let input = input_buffer.written();

        let (thread_group_count, width) =
            launch_dimensions(num_frames, hasher.thread_execution_width());

        debug!(
            kernel = D::KERNEL_FN,
            num_frames, thread_group_count, width, "dispatching batch"
        );

        let start = Instant::now();
        let args = *args;
        // a saturated chunk spans the whole output, which is still one group with every lane
        let group_bytes = width.saturating_mul(D::DIGEST_SIZE);

        // Each group owns the digest slots of its lanes. Trailing idle groups own no slots and
        // are skipped outright.
        hasher.pool.install(|| {
            output
                .par_chunks_mut(group_bytes)
                .enumerate()
                .for_each(|(group, slots)| {
                    for (lane, digest) in slots.chunks_exact_mut(D::DIGEST_SIZE).enumerate() {
                        hash_frame_at::<D>(group * width + lane, input, &args, digest);
                    }
                });
        });

        trace!(elapsed = ?start.elapsed(), "batch complete");

        Ok(())
    }
}
