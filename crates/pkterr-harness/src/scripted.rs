//! Scripted uniform source for deterministic tests.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use pkterr_core::{SharedSource, UniformSource};

/// Shared count of draws taken from a [`ScriptedUniform`].
///
/// Stays readable after the source has been moved into a [`SharedSource`].
#[derive(Debug, Clone, Default)]
pub struct DrawCounter(Arc<AtomicU64>);

impl DrawCounter {
    /// Draws taken so far.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Reset the count to zero.
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// Replays a fixed sequence of variates, cycling when exhausted.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone)]
pub struct ScriptedUniform {
    values: Vec<f64>,
    cursor: usize,
    counter: DrawCounter,
}

impl ScriptedUniform {
    /// Create a source replaying `values`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), cursor: 0, counter: DrawCounter::default() }
    }

    /// Create a source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Handle to this source's draw count.
    pub fn counter(&self) -> DrawCounter {
        self.counter.clone()
    }

    /// Move into a [`SharedSource`], keeping the draw counter.
    pub fn into_shared(self) -> (SharedSource, DrawCounter) {
        let counter = self.counter();
        (SharedSource::new(self), counter)
    }
}

impl UniformSource for ScriptedUniform {
    fn next_uniform(&mut self) -> f64 {
        self.counter.bump();
        if self.values.is_empty() {
            return 0.0;
        }

        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
