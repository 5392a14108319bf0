//! Bounded best-K result collection.
//!
//! Candidates are kept sorted by ascending cost. Among equal costs the
//! candidate discovered first stays ahead, so trimming always drops the most
//! recently discovered of the worst candidates.

use std::cmp::Ordering;

use log::warn;

use super::hyperx::Hyperx;

/// Total order over candidates by ascending cost
pub fn by_cost(lhs: &Hyperx, rhs: &Hyperx) -> Ordering {
    lhs.cost.total_cmp(&rhs.cost)
}

/// The lowest-cost candidates seen so far, at most `capacity` of them
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    capacity: usize,
    entries: Vec<Hyperx>,
}

impl ResultSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(1024)),
        }
    }

    /// Offers a scored candidate.
    ///
    /// Returns `true` when the candidate was retained. Candidates with a
    /// non-finite cost are never retained.
    pub fn offer(&mut self, candidate: Hyperx) -> bool {
        if !candidate.cost.is_finite() {
            warn!(
                "Discarding candidate S={:?} K={:?} T={} with non-finite cost {}",
                candidate.widths, candidate.weights, candidate.concentration, candidate.cost
            );
            return false;
        }

        // insert after every entry that is not worse than the candidate
        let position = self
            .entries
            .partition_point(|entry| by_cost(entry, &candidate) != Ordering::Greater);
        if position >= self.capacity {
            return false;
        }

        self.entries.insert(position, candidate);
        self.entries.truncate(self.capacity);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Worst retained cost, once the collection is full
    pub fn threshold(&self) -> Option<f64> {
        if self.entries.len() == self.capacity {
            self.entries.last().map(|entry| entry.cost)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[Hyperx] {
        &self.entries
    }
}
