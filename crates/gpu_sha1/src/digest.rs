use crate::{sha1, SHA1_DIGEST_SIZE};

/// A hash function that can be dispatched as a batch kernel, one input frame per thread.
pub trait Digest {
    /// Size in bytes of one digest.
    const DIGEST_SIZE: usize;
    /// Name of the kernel function that hashes a batch with this digest.
    const KERNEL_FN: &'static str;

    /// Hashes `input` and writes the digest into the first [`DIGEST_SIZE`](Self::DIGEST_SIZE)
    /// bytes of `output`.
    ///
    /// # Panics
    ///
    /// Panics if `output` is shorter than `DIGEST_SIZE`.
    fn digest_frame(input: &[u8], output: &mut [u8]);
}

/// SHA-1, as computed by [`Sha1Context`](crate::Sha1Context).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha1;

impl Digest for Sha1 {
    const DIGEST_SIZE: usize = SHA1_DIGEST_SIZE;
    const KERNEL_FN: &'static str = "kernel_sha1_hash";

    fn digest_frame(input: &[u8], output: &mut [u8]) {
        output[..SHA1_DIGEST_SIZE].copy_from_slice(&sha1(input));
    }
}

/// Arguments shared by every thread of one batch launch.
#[cfg_attr(not(target_os = "cuda"), derive(cust_core::DeviceCopy))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct DigestRunArgs {
    /// Length in bytes of every input frame.
    pub inlen: u64,
}
