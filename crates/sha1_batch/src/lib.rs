//! Host side of batch SHA-1 hashing.
//!
//! A batch is a set of equally sized input frames. Every frame is hashed by its own kernel thread,
//! running the per-thread body from [`gpu_sha1::kernel`]. The [`Hasher`] here executes the kernel
//! grid on the CPU: thread groups are handed to a rayon pool and the lanes of a group run in order.
//!
//! ```
//! use sha1_batch::{Hasher, Sha1};
//!
//! # fn main() -> Result<(), sha1_batch::HasherError> {
//! let hasher = Hasher::new()?;
//! let mut digest = hasher.digest(Sha1, 3, 2)?;
//!
//! let mut input = digest.input_buffer();
//! while let Some(frame) = input.next_frame() {
//!     frame.copy_from_slice(b"abc");
//! }
//!
//! digest.run()?;
//!
//! for output in digest.output_buffer() {
//!     assert_eq!(output, gpu_sha1::sha1(b"abc"));
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

mod buffer;
mod config;
mod error;
mod hasher;

pub use buffer::*;
pub use config::*;
pub use error::*;
pub use hasher::*;

pub use gpu_sha1::{Digest, DigestRunArgs, Sha1};
