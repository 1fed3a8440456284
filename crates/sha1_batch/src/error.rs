//! Types for error handling
//!
//! Hashing itself cannot fail; errors only come from setting up a [`Hasher`](crate::Hasher) or a
//! batch with an impossible shape.

use std::error::Error;
use std::fmt;

use rayon::ThreadPoolBuildError;

/// Error enum which represents everything that can go wrong while preparing or dispatching a batch.
#[non_exhaustive]
#[derive(Debug)]
pub enum HasherError {
    /// A batch was requested with frames of zero bytes.
    ZeroFrameLength,
    /// A batch was requested with room for zero frames.
    ZeroFrameCount,
    /// The configured thread group width was zero.
    ZeroThreadWidth,
    /// The configured thread group width exceeds what one group may hold.
    ThreadWidthTooLarge {
        /// The rejected width.
        width: usize,
        /// The largest accepted width.
        max: usize,
    },
    /// `frame_length * count` does not fit in a single allocation.
    BatchTooLarge {
        /// Requested length of every frame.
        frame_length: usize,
        /// Requested number of frames.
        count: usize,
    },
    /// The dispatch thread pool could not be created.
    ThreadPool(ThreadPoolBuildError),
}

impl fmt::Display for HasherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HasherError::ZeroFrameLength => f.write_str("frame length must be non-zero"),
            HasherError::ZeroFrameCount => f.write_str("frame count must be non-zero"),
            HasherError::ZeroThreadWidth => f.write_str("thread execution width must be non-zero"),
            HasherError::ThreadWidthTooLarge { width, max } => write!(
                f,
                "thread execution width {width} is larger than the maximum of {max}"
            ),
            HasherError::BatchTooLarge {
                frame_length,
                count,
            } => write!(
                f,
                "batch of {count} frames of {frame_length} bytes is too large to allocate"
            ),
            HasherError::ThreadPool(err) => write!(f, "failed to build dispatch pool: {err}"),
        }
    }
}

impl Error for HasherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HasherError::ThreadPool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ThreadPoolBuildError> for HasherError {
    fn from(err: ThreadPoolBuildError) -> Self {
        HasherError::ThreadPool(err)
    }
}

/// Result type for fallible hasher operations.
pub type HasherResult<T> = Result<T, HasherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = HasherError::BatchTooLarge {
            frame_length: 64,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "batch of 3 frames of 64 bytes is too large to allocate"
        );
        assert!(err.source().is_none());
        assert_eq!(
            HasherError::ZeroFrameLength.to_string(),
            "frame length must be non-zero"
        );
    }
}
