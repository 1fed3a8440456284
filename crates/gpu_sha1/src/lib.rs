//! gpu_sha1 provides a SHA-1 hashing context laid out so that every GPU thread can own one in its
//! private memory, together with the kernel body that hashes one fixed-length input frame per thread.
//!
//! The crate is `no_std` when compiled for the GPU. On the CPU it builds like any other crate, which
//! lets the host run the exact same per-thread code (see the `sha1_batch` crate) and lets contexts be
//! copied to and from device memory verbatim, since [`Sha1Context`] and [`DigestRunArgs`] are
//! `#[repr(C)]` and implement `DeviceCopy`.
//!
//! ```
//! use gpu_sha1::{sha1_init, Sha1Context};
//!
//! let mut ctx = Sha1Context::new();
//! sha1_init(&mut ctx);
//! ctx.update(b"abc");
//! let digest = ctx.finalize();
//! assert_eq!(digest[..4], [0xa9, 0x99, 0x3e, 0x36]);
//! ```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![allow(clippy::unreadable_literal)]
#![cfg_attr(target_os = "cuda", no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod context;
mod digest;
pub mod kernel;

pub use context::*;
pub use digest::*;
