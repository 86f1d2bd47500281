//! Index sources used to pick the initial centroids

use rand::Rng;

/// Produces indices into the input point set
pub trait RandomSource {
    /// Return an index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Uniform indices from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Replays a fixed list of indices, wrapping around at the end.
///
/// Each index is reduced modulo the requested bound, so any list works for any
/// dataset size. An empty list always yields 0.
#[derive(Debug, Clone)]
pub struct IndexSequence {
    indices: Vec<usize>,
    position: usize,
}

impl IndexSequence {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            position: 0,
        }
    }
}

impl RandomSource for IndexSequence {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.position % self.indices.len()];
        self.position = (self.position + 1) % self.indices.len();
        index % bound
    }
}
