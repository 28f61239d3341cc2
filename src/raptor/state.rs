//! Per-search mutable state: every stop's Pareto label set, the parallel
//! path-pointer map, and the marked-stop bookkeeping that drives each
//! round. One `RoundState` is built fresh per [`crate::raptor::Raptor::solve`]
//! call — unlike the live timetable, a search's state is never shared or
//! reused across requests.

use std::collections::{HashMap, HashSet};

use crate::{
    live::StopId,
    raptor::label::{ParetoLabel, ParetoSet},
    raptor::path::PathPointer,
    shared::Timestamp,
    walking::WalkingGraph,
};

#[derive(Default)]
pub struct RoundState {
    pub labels: HashMap<StopId, ParetoSet>,
    pub pointers: HashMap<(StopId, u32), PathPointer>,
    /// Stops to route-scan in the round about to run.
    pub marked: HashSet<StopId>,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, stop: &StopId, label: ParetoLabel, pointer: PathPointer) -> Option<u32> {
        let id = self.labels.entry(stop.clone()).or_default().try_insert(label)?;
        self.pointers.insert((stop.clone(), id), pointer);
        Some(id)
    }

    pub fn best_at(&self, stop: &str, legs: u32) -> Option<(ParetoLabel, u32)> {
        self.labels.get(stop).and_then(|set| set.best_at(legs))
    }

    pub fn labels_at(&self, stop: &str, legs: u32) -> Vec<(ParetoLabel, u32)> {
        self.labels.get(stop).map(|set| set.at(legs).collect()).unwrap_or_default()
    }

    pub fn label_at(&self, stop: &str, id: u32) -> Option<ParetoLabel> {
        self.labels.get(stop).and_then(|set| set.get(id))
    }

    /// Seeds the origin's round-0 label and, per the Initialisation rule,
    /// every walking neighbour of the origin with a round-0 walk-seeded
    /// label — a round that is only ever walking never advances `legs`.
    pub fn seed_origin(&mut self, origin: &StopId, departure: Timestamp, walking: &WalkingGraph, max_walk: crate::shared::time::Duration) {
        self.insert(origin, ParetoLabel::new(departure, 0), PathPointer::Origin);
        self.marked.insert(origin.clone());

        for (neighbor, duration) in walking.neighbors(origin, max_walk) {
            let arrival = departure + duration;
            let label = ParetoLabel::new(arrival, 0);
            if self
                .insert(
                    &neighbor,
                    label,
                    PathPointer::Walk {
                        prev_stop: origin.clone(),
                        prev_label: 0,
                        seconds: duration.as_seconds(),
                    },
                )
                .is_some()
            {
                self.marked.insert(neighbor);
            }
        }
    }
}
