use core::cmp::min;

/// Size in bytes of a SHA-1 digest.
pub const SHA1_DIGEST_SIZE: usize = 20;

/// Size in bytes of a SHA-1 message block.
pub const SHA1_BLOCK_SIZE: usize = 64;

/// The initial hash value `H(0)` from FIPS 180-4, section 5.3.1.
pub const SHA1_INITIAL_STATE: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// The four round constants, one per 20-round quarter of the compression function.
pub const SHA1_ROUND_CONSTANTS: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

// byte offset of the 64-bit length field inside the final block
const LENGTH_OFFSET: usize = SHA1_BLOCK_SIZE - 8;

/// The running state of one SHA-1 computation.
///
/// A context is meant to be owned by exactly one GPU thread (or one CPU task) and is never shared,
/// so none of its operations synchronize. The field order and widths are part of the interface:
/// host code may map device memory onto this type directly.
///
/// Between calls to [`update`](Self::update), `datalen` is always below [`SHA1_BLOCK_SIZE`] and
/// `bitlen` counts only the bits of blocks that have already been compressed into `state`.
#[cfg_attr(not(target_os = "cuda"), derive(cust_core::DeviceCopy))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Sha1Context {
    /// The current block of input bytes that has not been compressed yet.
    pub data: [u8; SHA1_BLOCK_SIZE],
    /// How many bytes of `data` are valid.
    pub datalen: u32,
    /// Total number of message bits compressed so far.
    pub bitlen: u64,
    /// The five hash registers.
    pub state: [u32; 5],
    /// The round constants used by the compression function.
    pub k: [u32; 4],
}

impl Sha1Context {
    /// Creates an initialized context, equivalent to calling [`sha1_init`] on a fresh one.
    pub const fn new() -> Self {
        Self {
            data: [0; SHA1_BLOCK_SIZE],
            datalen: 0,
            bitlen: 0,
            state: SHA1_INITIAL_STATE,
            k: SHA1_ROUND_CONSTANTS,
        }
    }

    /// Resets the context to the initial state so it can hash a new message.
    #[inline]
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Feeds more message bytes into the context. Full blocks are compressed as soon as they are
    /// complete, so the call may be repeated with arbitrary splits of the message.
    pub fn update(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let at = self.datalen as usize;
            let take = min(SHA1_BLOCK_SIZE - at, input.len());

            self.data[at..at + take].copy_from_slice(&input[..take]);
            self.datalen += take as u32;
            input = &input[take..];

            if self.datalen as usize == SHA1_BLOCK_SIZE {
                self.transform();
                self.bitlen = self.bitlen.wrapping_add(8 * SHA1_BLOCK_SIZE as u64);
                self.datalen = 0;
            }
        }
    }

    /// Pads the message, compresses the last block(s) and returns the digest.
    pub fn finalize(mut self) -> [u8; SHA1_DIGEST_SIZE] {
        let mut digest = [0; SHA1_DIGEST_SIZE];
        self.finish_into(&mut digest);
        digest
    }

    fn finish_into(&mut self, digest: &mut [u8; SHA1_DIGEST_SIZE]) {
        let at = self.datalen as usize;

        self.data[at] = 0x80;
        if at < LENGTH_OFFSET {
            self.data[at + 1..LENGTH_OFFSET].fill(0);
        } else {
            // no room left for the length, it goes into an extra block
            self.data[at + 1..].fill(0);
            self.transform();
            self.data[..LENGTH_OFFSET].fill(0);
        }

        self.bitlen = self.bitlen.wrapping_add(8 * at as u64);
        self.data[LENGTH_OFFSET..].copy_from_slice(&self.bitlen.to_be_bytes());
        self.transform();

        for (word, bytes) in self.state.iter().zip(digest.chunks_exact_mut(4)) {
            bytes.copy_from_slice(&word.to_be_bytes());
        }
    }

    /// Compresses the 64 bytes in `data` into `state`.
    ///
    /// The round constant for round `t` is read from `k[t / 20]`, so this only produces standard
    /// SHA-1 output on an initialized context.
    pub fn transform(&mut self) {
        let mut w = [0u32; 80];
        for (word, bytes) in w.iter_mut().zip(self.data.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        for t in 16..80 {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;

        for (t, &wt) in w.iter().enumerate() {
            let f = match t {
                0..=19 => (b & c) | (!b & d),
                40..=59 => (b & c) | (b & d) | (c & d),
                _ => b ^ c ^ d,
            };

            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(self.k[t / 20])
                .wrapping_add(wt);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        for (h, v) in self.state.iter_mut().zip([a, b, c, d, e]) {
            *h = h.wrapping_add(v);
        }
    }
}

impl Default for Sha1Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes `ctx`: loads the initial hash value and the round constants and clears both length
/// counters. This cannot fail.
#[inline]
pub fn sha1_init(ctx: &mut Sha1Context) {
    ctx.init();
}

/// Feeds `data` into `ctx`. See [`Sha1Context::update`].
#[inline]
pub fn sha1_update(ctx: &mut Sha1Context, data: &[u8]) {
    ctx.update(data);
}

/// Finishes the computation in `ctx` and writes the digest to `hash`.
///
/// `ctx` holds padding afterwards and must go through [`sha1_init`] before it is reused.
#[inline]
pub fn sha1_final(ctx: &mut Sha1Context, hash: &mut [u8; SHA1_DIGEST_SIZE]) {
    ctx.finish_into(hash);
}

/// Hashes `input` in one go.
pub fn sha1(input: &[u8]) -> [u8; SHA1_DIGEST_SIZE] {
    let mut ctx = Sha1Context::new();
    ctx.update(input);
    ctx.finalize()
}
