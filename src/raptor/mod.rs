//! The Journey Engine (component H): a round-based, multi-criteria
//! (arrival time, leg count) earliest-arrival search — McRAPTOR — over the
//! live timetable snapshot and the walking-transfer graph. CPU-bound and
//! I/O-free: every round's route and transfer scans read only the
//! [`crate::live::Snapshot`] and [`crate::walking::WalkingGraph`] handed to
//! [`Raptor::new`].

pub mod itinerary;
pub mod label;
pub mod path;
mod scan;
pub mod state;

pub use itinerary::{Itinerary, Segment};

use std::mem;

use thiserror::Error;
use tracing::debug;

use crate::{
    live::{Snapshot, StopId},
    shared::{Timestamp, time::Duration},
    walking::WalkingGraph,
};

use label::ParetoLabel;
use state::RoundState;

/// Default number of rounds (transit legs) the engine explores, per the
/// journey engine's default input.
pub const DEFAULT_MAX_ROUNDS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("origin and destination are required")]
    InvalidRequest,
    #[error("no path found between the requested stops")]
    NoPath,
}

/// Builder for one McRAPTOR search. Cheap to construct; holds only
/// borrowed references to the published snapshot and walking graph for the
/// duration of a single request, per the "a request observes exactly one
/// snapshot for its entire lifetime" ordering guarantee.
pub struct Raptor<'a> {
    snapshot: &'a Snapshot,
    walking: &'a WalkingGraph,
    origin: StopId,
    destination: StopId,
    departure: Timestamp,
    max_rounds: usize,
    max_walk: Duration,
}

impl<'a> Raptor<'a> {
    pub fn new(snapshot: &'a Snapshot, walking: &'a WalkingGraph, origin: StopId, destination: StopId) -> Self {
        Self {
            snapshot,
            walking,
            origin,
            destination,
            departure: Timestamp::now(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_walk: Duration::from_seconds(1800),
        }
    }

    pub fn departure_at(mut self, departure: Timestamp) -> Self {
        self.departure = departure;
        self
    }

    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn max_walk(mut self, max_walk: Duration) -> Self {
        self.max_walk = max_walk;
        self
    }

    /// Runs the round-based search and returns every Pareto-optimal
    /// journey found at the destination, sorted `(legs ascending, arrival
    /// ascending)`. Termination is a fixed round count: there is no
    /// priority queue and no early exit on first reaching the destination.
    pub fn solve(self) -> Result<Vec<Itinerary>, Error> {
        if self.origin.is_empty() || self.destination.is_empty() {
            return Err(Error::InvalidRequest);
        }

        if self.origin == self.destination {
            return Ok(vec![Itinerary {
                origin: self.origin.clone(),
                destination: self.destination.clone(),
                departure: self.departure,
                arrival: self.departure,
                legs: 0,
                segments: Vec::new(),
            }]);
        }

        let mut state = RoundState::new();
        state.seed_origin(&self.origin, self.departure, self.walking, self.max_walk);

        for round in 1..=self.max_rounds as u32 {
            if state.marked.is_empty() {
                break;
            }
            let marked = mem::take(&mut state.marked);
            let vehicle_marked = scan::route_scan(self.snapshot, &mut state, &marked, round);
            let next_marked = scan::transfer_scan(self.walking, self.max_walk, &mut state, &vehicle_marked, round);
            debug!(round, touched = next_marked.len(), "round complete");
            state.marked = next_marked;
        }

        let labels = state.labels.get(&self.destination).cloned().unwrap_or_default();
        if labels.is_empty() {
            return Err(Error::NoPath);
        }

        let mut itineraries: Vec<Itinerary> = labels
            .iter()
            .map(|(label, id)| itinerary::reconstruct(&state, &self.origin, &self.destination, *label, *id))
            .collect();
        itineraries.sort_by(|a, b| a.legs.cmp(&b.legs).then(a.arrival.cmp(&b.arrival)));
        Ok(itineraries)
    }
}
