//! Uniform variate sources.
//!
//! The rate model needs one thing from randomness: the next value uniformly
//! distributed in [0, 1). [`UniformSource`] is that capability. Sources are
//! deterministic given a seed so simulation runs are reproducible.
//!
//! [`SharedSource`] is the handle models hold. Cloning it shares the
//! underlying sequence, so several models can draw from one seeded stream.
//! Default sources each take the next ChaCha stream of [`DEFAULT_SEED`], so
//! unrelated models never draw correlated values unless handed one handle.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::{
    fmt,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use rand::{
    SeedableRng,
    distributions::{Distribution, Standard},
};
use rand_chacha::ChaCha8Rng;

/// Seed used by sources created without an explicit seed.
pub const DEFAULT_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Next stream handed to a default source. Stream 0 belongs to
/// `SeededUniform::new(DEFAULT_SEED)`.
static NEXT_DEFAULT_STREAM: AtomicU64 = AtomicU64::new(1);

/// Producer of successive uniform variates in [0, 1).
///
/// # Invariants
///
/// - Each call is exactly one draw. No buffering or lookahead.
/// - Given the same seed, the same sequence is produced.
pub trait UniformSource: Send {
    /// Next value in [0, 1).
    fn next_uniform(&mut self) -> f64;
}

/// ChaCha8-backed uniform source.
#[derive(Debug, Clone)]
pub struct SeededUniform {
    rng: ChaCha8Rng,
}

impl SeededUniform {
    /// Create a source from a seed.
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, 0)
    }

    /// Create a source from a seed, drawing from one of its independent
    /// streams.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }

    /// The stream this source draws from.
    pub fn stream(&self) -> u64 {
        self.rng.get_stream()
    }
}

impl Default for SeededUniform {
    /// [`DEFAULT_SEED`] on a stream no other default source has used in this
    /// process. Reproducible for a fixed construction order.
    fn default() -> Self {
        Self::with_stream(DEFAULT_SEED, NEXT_DEFAULT_STREAM.fetch_add(1, Ordering::Relaxed))
    }
}

impl UniformSource for SeededUniform {
    fn next_uniform(&mut self) -> f64 {
        Standard.sample(&mut self.rng)
    }
}

/// Cloneable handle to a uniform source.
///
/// Clones draw from the same sequence. Draws are serialized by an internal
/// lock, so a handle can be shared between models on different threads.
#[derive(Clone)]
pub struct SharedSource {
    inner: Arc<Mutex<dyn UniformSource>>,
}

impl SharedSource {
    /// Wrap a source in a shareable handle.
    pub fn new<S: UniformSource + 'static>(source: S) -> Self {
        Self { inner: Arc::new(Mutex::new(source)) }
    }

    /// Handle to a fresh [`SeededUniform`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededUniform::new(seed))
    }

    /// Draw the next uniform value.
    ///
    /// A poisoned lock is recovered: the generator state stays valid even if
    /// another holder panicked mid-draw.
    pub fn draw(&self) -> f64 {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).next_uniform()
    }

    /// True if both handles draw from the same underlying source.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for SharedSource {
    fn default() -> Self {
        Self::new(SeededUniform::default())
    }
}

impl fmt::Debug for SharedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSource").field("handles", &Arc::strong_count(&self.inner)).finish()
    }
}
