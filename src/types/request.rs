use crate::types::direction::Direction;
use crate::types::track::{Track, TrackRange};

/// One fully collected simulation input. Duplicate tracks are kept as
/// given; the planner services them in listed order.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub head: Track,
    pub direction: Direction,
    pub tracks: Vec<Track>,
    pub range: TrackRange,
}
