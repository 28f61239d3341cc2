//! Pareto labels `(arrivalTime, legCount)` and the per-stop set that keeps
//! only the non-dominated ones, as described by the data model's
//! `ParetoLabel` invariant.

use crate::shared::Timestamp;

/// One candidate journey state at a stop: an arrival time and the number of
/// transit legs used to reach it. Walking never changes `legs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParetoLabel {
    pub arrival: Timestamp,
    pub legs: u32,
}

impl ParetoLabel {
    pub fn new(arrival: Timestamp, legs: u32) -> Self {
        Self { arrival, legs }
    }

    /// `self` dominates `other` iff it is no worse on both axes and
    /// strictly better on at least one.
    pub fn dominates(&self, other: &Self) -> bool {
        self.arrival <= other.arrival && self.legs <= other.legs && (self.arrival < other.arrival || self.legs < other.legs)
    }
}

/// A stop's Pareto-optimal label set. Labels are tagged with a per-stop id
/// that is stable for the lifetime of a search — unlike a vector index, it
/// never shifts when a dominated label is retired, so path pointers keyed
/// by `(stop, id)` stay valid for the rest of the search.
#[derive(Debug, Clone, Default)]
pub struct ParetoSet {
    entries: Vec<(ParetoLabel, u32)>,
    next_id: u32,
}

impl ParetoSet {
    pub fn iter(&self) -> impl Iterator<Item = (ParetoLabel, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The label in this set with the minimum arrival time among those at
    /// exactly `legs` legs — used by the transfer scan's "best round-k
    /// label" rule.
    pub fn best_at(&self, legs: u32) -> Option<(ParetoLabel, u32)> {
        self.entries
            .iter()
            .filter(|(label, _)| label.legs == legs)
            .copied()
            .min_by_key(|(label, _)| label.arrival)
    }

    /// Labels at exactly `legs` legs, used by the route scan's boarding
    /// condition (`legs == k - 1`).
    pub fn at(&self, legs: u32) -> impl Iterator<Item = (ParetoLabel, u32)> + '_ {
        self.entries.iter().filter(move |(label, _)| label.legs == legs).copied()
    }

    /// The label recorded under `id`, used by path reconstruction to
    /// recover a predecessor's arrival time from its `(stop, id)` pointer.
    pub fn get(&self, id: u32) -> Option<ParetoLabel> {
        self.entries.iter().find(|(_, entry_id)| *entry_id == id).map(|(label, _)| *label)
    }

    /// Attempts to insert `candidate`. Returns the new label's id if it
    /// was not dominated by an existing label, removing any existing label
    /// the candidate strictly dominates. Returns `None` (candidate
    /// rejected) otherwise.
    pub fn try_insert(&mut self, candidate: ParetoLabel) -> Option<u32> {
        if self.entries.iter().any(|(existing, _)| existing.dominates(&candidate)) {
            return None;
        }
        self.entries.retain(|(existing, _)| !candidate.dominates(existing));
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((candidate, id));
        Some(id)
    }
}
