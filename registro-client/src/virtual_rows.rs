//! Windowed row layout for the personnel table
//!
//! Rows start at an estimated height and switch to their measured height
//! once rendered. Measurements are keyed by record identity, so a reorder
//! that keeps the same keys in the same slots keeps them; any other change
//! to the key order throws them away.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

pub const DEFAULT_OVERSCAN: usize = 5;

/// A row placed in the scroll space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualItem<K> {
    pub index: usize,
    pub key: K,
    pub start: u32,
    pub size: u32,
}

#[derive(Debug, Clone)]
pub struct Virtualizer<K> {
    keys: Vec<K>,
    measured: HashMap<K, u32>,
    estimate: u32,
    overscan: usize,
    /// Row start offsets; `offsets[keys.len()]` is the total height
    offsets: Vec<u32>,
}

impl<K: Clone + Eq + Hash> Virtualizer<K> {
    pub fn new(estimate: u32) -> Self {
        Self {
            keys: Vec::new(),
            measured: HashMap::new(),
            estimate: estimate.max(1),
            overscan: DEFAULT_OVERSCAN,
            offsets: vec![0],
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Rows that have a recorded height
    pub fn measured_len(&self) -> usize {
        self.measured.len()
    }

    /// Replace the row set
    pub fn set_keys(&mut self, keys: Vec<K>) {
        if keys != self.keys {
            self.measured.clear();
        }
        self.keys = keys;
        self.relayout();
    }

    /// Record the rendered height of a row; unknown keys are ignored
    pub fn measure(&mut self, key: &K, size: u32) {
        if !self.keys.contains(key) {
            return;
        }
        if self.measured.insert(key.clone(), size) != Some(size) {
            self.relayout();
        }
    }

    pub fn size_of(&self, index: usize) -> u32 {
        self.keys
            .get(index)
            .and_then(|k| self.measured.get(k).copied())
            .unwrap_or(self.estimate)
    }

    pub fn total_size(&self) -> u32 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Top of the given row, clamped to the last row
    pub fn offset_for_index(&self, index: usize) -> u32 {
        if self.keys.is_empty() {
            return 0;
        }
        self.offsets[index.min(self.keys.len() - 1)]
    }

    /// Indices intersecting `[offset, offset + viewport)`, widened by the overscan.
    /// An offset past the end is pulled back so the window ends at the last row.
    pub fn visible_range(&self, offset: u32, viewport: u32) -> Range<usize> {
        let n = self.keys.len();
        if n == 0 || viewport == 0 {
            return 0..0;
        }
        let offset = offset.min(self.total_size().saturating_sub(viewport));
        let end_px = offset.saturating_add(viewport);
        // first row whose bottom edge is below `offset`
        let first = self.offsets[1..].partition_point(|&bottom| bottom <= offset);
        // first row whose top edge is at or past the window end
        let last = self.offsets[..n].partition_point(|&top| top < end_px);
        first.saturating_sub(self.overscan)..(last + self.overscan).min(n)
    }

    pub fn items(&self, offset: u32, viewport: u32) -> Vec<VirtualItem<K>> {
        self.visible_range(offset, viewport)
            .map(|index| VirtualItem {
                index,
                key: self.keys[index].clone(),
                start: self.offsets[index],
                size: self.size_of(index),
            })
            .collect()
    }

    fn relayout(&mut self) {
        self.offsets.clear();
        self.offsets.reserve(self.keys.len() + 1);
        let mut acc = 0u32;
        self.offsets.push(0);
        for i in 0..self.keys.len() {
            acc = acc.saturating_add(self.size_of(i));
            self.offsets.push(acc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn virt(n: u32) -> Virtualizer<u32> {
        let mut v = Virtualizer::new(10).with_overscan(2);
        v.set_keys((0..n).collect());
        v
    }

    #[test]
    fn test_estimated_layout() {
        let v = virt(100);
        assert_eq!(v.total_size(), 1000);
        assert_eq!(v.offset_for_index(7), 70);
        assert_eq!(v.offset_for_index(500), 990);
    }

    #[test]
    fn test_visible_range_with_overscan() {
        let v = virt(100);
        // rows 10..=14 intersect [100, 150)
        assert_eq!(v.visible_range(100, 50), 8..17);
        assert_eq!(v.visible_range(0, 25), 0..5);
        // clamped to [950, 1000)
        assert_eq!(v.visible_range(995, 50), 93..100);
    }

    #[test]
    fn test_offset_past_end_keeps_overscan() {
        let v = virt(100);
        let tail = v.visible_range(950, 50);
        assert_eq!(tail, 93..100);
        assert_eq!(v.visible_range(5_000, 50), tail);
        assert_eq!(v.visible_range(u32::MAX, 50), tail);
        // viewport taller than the content
        assert_eq!(virt(3).visible_range(40, 100), 0..3);
    }

    #[test]
    fn test_only_window_is_materialized() {
        let v = virt(10_000);
        let items = v.items(50_000, 40);
        assert_eq!(items.len(), 4 + 2 * 2);
        assert_eq!(items[2].index, 5000);
        assert_eq!(items[2].start, 50_000);
    }

    #[test]
    fn test_measurement_shifts_following_rows() {
        let mut v = virt(5);
        v.measure(&1, 30);
        assert_eq!(v.size_of(1), 30);
        assert_eq!(v.offset_for_index(2), 40);
        assert_eq!(v.total_size(), 70);
    }

    #[test]
    fn test_reorder_drops_measurements() {
        let mut v = virt(3);
        v.measure(&0, 25);
        v.set_keys(vec![0, 1, 2]);
        assert_eq!(v.size_of(0), 25);

        v.set_keys(vec![2, 1, 0]);
        assert_eq!(v.size_of(2), 10);
        assert_eq!(v.total_size(), 30);
    }

    #[test]
    fn test_empty() {
        let v: Virtualizer<u32> = Virtualizer::new(3);
        assert!(v.is_empty());
        assert_eq!(v.visible_range(0, 20), 0..0);
        assert_eq!(v.offset_for_index(4), 0);
        assert!(v.items(0, 20).is_empty());
    }
}
