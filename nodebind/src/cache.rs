//! Owned memo for lookups keyed by position.
//!
//! Adapters that derive expensive values from a surface position keep one
//! [`CoordinateCache`] per consumer instead of sharing a process-wide map.
//! Positions are quantised to a grid so nearby samples share an entry, the
//! number of entries is bounded, and the oldest insertion is evicted first.

use std::collections::{HashMap, VecDeque};

use crate::Vector3d;

type CellKey = (i64, i64, i64);

/// Bounded memo keyed by quantised 3-vector coordinates.
///
/// # Examples
///
/// ```
/// use nodebind::{CoordinateCache, Vector3d};
///
/// let mut cache = CoordinateCache::new(2, 0.5);
/// let origin = Vector3d { x: 0.0, y: 0.0, z: 0.0 };
/// let nearby = Vector3d { x: 0.1, y: 0.0, z: 0.0 };
///
/// assert_eq!(*cache.get_or_insert_with(origin, || 7), 7);
/// assert_eq!(cache.get(nearby), Some(&7));
/// ```
#[derive(Debug, Clone)]
pub struct CoordinateCache<V> {
    capacity: usize,
    quantum: f64,
    entries: HashMap<CellKey, V>,
    order: VecDeque<CellKey>,
}

impl<V> CoordinateCache<V> {
    /// Creates a cache holding at most `capacity` entries on a grid of
    /// `quantum` spacing.
    ///
    /// A zero capacity is raised to one. A quantum that is not a positive
    /// finite number falls back to `1.0`.
    #[must_use]
    pub fn new(capacity: usize, quantum: f64) -> Self {
        let spacing = if quantum.is_finite() && quantum > 0.0 {
            quantum
        } else {
            1.0
        };
        Self {
            capacity: capacity.max(1),
            quantum: spacing,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "positions are snapped to an integer grid"
    )]
    fn cell(&self, position: Vector3d) -> CellKey {
        let snap = |v: f64| (v / self.quantum).round() as i64;
        (snap(position.x), snap(position.y), snap(position.z))
    }

    /// Returns the entry for the grid cell containing `position`.
    #[must_use]
    pub fn get(&self, position: Vector3d) -> Option<&V> {
        self.entries.get(&self.cell(position))
    }

    /// Stores `value` for the cell containing `position`.
    ///
    /// Returns the value evicted to make room, or the value previously held
    /// by the same cell.
    pub fn insert(&mut self, position: Vector3d, value: V) -> Option<V> {
        let key = self.cell(position);
        if let Some(previous) = self.entries.insert(key, value) {
            self.order.retain(|k| *k != key);
            self.order.push_back(key);
            return Some(previous);
        }
        self.order.push_back(key);
        self.evict_over_capacity()
    }

    /// Returns the entry for `position`, computing it with `make` on a miss.
    pub fn get_or_insert_with(&mut self, position: Vector3d, make: impl FnOnce() -> V) -> &V {
        let key = self.cell(position);
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.capacity {
                if self.evict_oldest().is_none() {
                    break;
                }
            }
            self.order.push_back(key);
        }
        self.entries.entry(key).or_insert_with(make)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn evict_over_capacity(&mut self) -> Option<V> {
        if self.entries.len() > self.capacity {
            self.evict_oldest()
        } else {
            None
        }
    }

    fn evict_oldest(&mut self) -> Option<V> {
        let key = self.order.pop_front()?;
        self.entries.remove(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn at(x: f64) -> Vector3d {
        Vector3d { x, y: 0.0, z: 0.0 }
    }

    #[test]
    fn evicts_the_oldest_insertion() {
        let mut cache = CoordinateCache::new(2, 1.0);
        assert_eq!(cache.insert(at(0.0), "a"), None);
        assert_eq!(cache.insert(at(1.0), "b"), None);
        assert_eq!(cache.insert(at(2.0), "c"), Some("a"));
        assert_eq!(cache.get(at(0.0)), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinsertion_refreshes_order() {
        let mut cache = CoordinateCache::new(2, 1.0);
        cache.insert(at(0.0), 1);
        cache.insert(at(1.0), 2);
        assert_eq!(cache.insert(at(0.0), 3), Some(1));
        assert_eq!(cache.insert(at(2.0), 4), Some(2));
        assert_eq!(cache.get(at(0.0)), Some(&3));
    }

    #[test]
    fn nearby_positions_share_a_cell() {
        let mut cache = CoordinateCache::new(4, 10.0);
        let mut calls = 0;
        for x in [1.0, 2.0, 4.9] {
            cache.get_or_insert_with(at(x), || {
                calls += 1;
                x
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_or_insert_respects_capacity() {
        let mut cache = CoordinateCache::new(1, 1.0);
        cache.get_or_insert_with(at(0.0), || 0);
        cache.get_or_insert_with(at(5.0), || 5);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(at(5.0)), Some(&5));
    }

    #[test]
    fn degenerate_settings_are_clamped() {
        let cache: CoordinateCache<()> = CoordinateCache::new(0, f64::NAN);
        assert_eq!(cache.capacity(), 1);
    }
}
