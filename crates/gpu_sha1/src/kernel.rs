//! The per-thread body of the batch hashing kernel.
//!
//! A launch hashes a buffer of equally sized input frames. Thread `idx` hashes frame `idx` and writes
//! its digest to slot `idx` of the output buffer. Grids are rounded up to whole thread groups, so
//! threads whose frame lies past the end of the input simply return.

#[cfg(target_os = "cuda")]
use cuda_std::prelude::*;

use crate::{Digest, DigestRunArgs};
#[cfg(target_os = "cuda")]
use crate::{Sha1, SHA1_DIGEST_SIZE};

/// Returns frame `idx` of `input` when every frame is `inlen` bytes long, or `None` if the frame
/// does not fit entirely inside `input`.
#[inline]
pub fn frame_at(input: &[u8], idx: usize, inlen: usize) -> Option<&[u8]> {
    if inlen == 0 {
        return None;
    }
    let start = idx.checked_mul(inlen)?;
    let end = start.checked_add(inlen)?;
    input.get(start..end)
}

/// Runs one thread of the kernel for digest `D`: hashes frame `idx` of `input` into `digest`.
///
/// Returns `false` without touching `digest` when the thread has no frame to hash.
#[inline]
pub fn hash_frame_at<D: Digest>(
    idx: usize,
    input: &[u8],
    args: &DigestRunArgs,
    digest: &mut [u8],
) -> bool {
    match frame_at(input, idx, args.inlen as usize) {
        Some(frame) => {
            D::digest_frame(frame, digest);
            true
        }
        None => false,
    }
}

/// Hashes every `args.inlen`-byte frame of `input` with SHA-1, one frame per thread.
///
/// # Safety
///
/// `output` must point to at least `input.len() / args.inlen` digest slots.
#[cfg(target_os = "cuda")]
#[kernel]
#[allow(improper_ctypes_definitions)]
pub unsafe fn kernel_sha1_hash(
    input: &[u8],
    output: *mut [u8; SHA1_DIGEST_SIZE],
    args: DigestRunArgs,
) {
    let idx = thread::index_1d() as usize;

    if frame_at(input, idx, args.inlen as usize).is_some() {
        let digest = unsafe { &mut *output.add(idx) };
        hash_frame_at::<Sha1>(idx, input, &args, digest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sha1, Sha1, SHA1_DIGEST_SIZE};

    #[test]
    fn frames_are_whole() {
        let input = [0u8, 1, 2, 3, 4, 5, 6];

        assert_eq!(frame_at(&input, 0, 3), Some(&input[0..3]));
        assert_eq!(frame_at(&input, 1, 3), Some(&input[3..6]));
        assert_eq!(frame_at(&input, 2, 3), None);
        assert_eq!(frame_at(&input, 0, 0), None);
        assert_eq!(frame_at(&input, usize::MAX, 2), None);
    }

    #[test]
    fn idle_thread_writes_nothing() {
        let input = [7u8; 10];
        let args = DigestRunArgs { inlen: 5 };
        let mut digest = [0u8; SHA1_DIGEST_SIZE];

        assert!(!hash_frame_at::<Sha1>(2, &input, &args, &mut digest));
        assert_eq!(digest, [0; SHA1_DIGEST_SIZE]);

        assert!(hash_frame_at::<Sha1>(1, &input, &args, &mut digest));
        assert_eq!(digest, sha1(&[7; 5]));
    }
}
