//! Bounded sample buffer feeding the wave shape.
//!
//! Samples are inserted at the front and evicted from the back, so index 0 is
//! always the most recent amplitude and drives the left-most point of the wave.

use std::collections::VecDeque;

/// Horizontal distance in surface pixels between two consecutive wave samples.
pub const SAMPLE_STEP_PX: u32 = 10;

/// Returns how many samples fit across a surface of the given width.
pub fn capacity_for_width(surface_width: u32) -> usize {
    (surface_width / SAMPLE_STEP_PX) as usize
}

/// Ordered list of recent amplitude samples, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: VecDeque<i32>,
}

impl SampleBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a sample at the front, then evicts the oldest samples until at
    /// most `capacity` remain.
    pub fn push_front(&mut self, sample: i32, capacity: usize) {
        self.samples.push_front(sample);
        self.samples.truncate(capacity);
    }

    /// Drops tail samples until at most `capacity` remain.
    pub fn truncate(&mut self, capacity: usize) {
        self.samples.truncate(capacity);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, where 0 is the newest.
    pub fn get(&self, index: usize) -> Option<i32> {
        self.samples.get(index).copied()
    }

    /// Iterates samples from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.samples.iter().copied()
    }

    /// Copies the samples into a `Vec`, newest first.
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_for_width() {
        assert_eq!(capacity_for_width(0), 0);
        assert_eq!(capacity_for_width(9), 0);
        assert_eq!(capacity_for_width(10), 1);
        assert_eq!(capacity_for_width(105), 10);
    }

    #[test]
    fn test_newest_sample_is_at_front() {
        let mut buffer = SampleBuffer::new();
        buffer.push_front(1, 10);
        buffer.push_front(2, 10);
        buffer.push_front(3, 10);

        assert_eq!(buffer.to_vec(), vec![3, 2, 1]);
        assert_eq!(buffer.get(0), Some(3));
        assert_eq!(buffer.get(3), None);
    }

    #[test]
    fn test_oldest_sample_is_evicted() {
        let mut buffer = SampleBuffer::new();
        for sample in 0..5 {
            buffer.push_front(sample, 3);
        }

        assert_eq!(buffer.to_vec(), vec![4, 3, 2]);
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut buffer = SampleBuffer::new();
        for sample in 0..100 {
            buffer.push_front(sample, 7);
            assert!(buffer.len() <= 7);
        }
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut buffer = SampleBuffer::new();
        buffer.push_front(42, 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_shrunken_capacity_drops_all_excess_on_insert() {
        let mut buffer = SampleBuffer::new();
        for sample in 0..10 {
            buffer.push_front(sample, 10);
        }

        buffer.push_front(10, 5);
        assert_eq!(buffer.to_vec(), vec![10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_truncate_keeps_newest() {
        let mut buffer = SampleBuffer::new();
        for sample in 0..4 {
            buffer.push_front(sample, 10);
        }

        buffer.truncate(2);
        assert_eq!(buffer.to_vec(), vec![3, 2]);
    }
}
