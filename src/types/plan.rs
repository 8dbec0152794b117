use crate::types::track::Track;

/// A single arm movement, boundary endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementStep {
    pub start: Track,
    pub finish: Track,
    pub distance: Track,
}

impl MovementStep {
    pub fn between(start: Track, finish: Track) -> Self {
        MovementStep {
            start,
            finish,
            distance: start.abs_diff(finish),
        }
    }
}

/// The finished movement plan for one run. Frozen once the planner
/// returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulePlan {
    pub steps: Vec<MovementStep>,
    pub total_distance: u64,
}

impl SchedulePlan {
    /// Arm position once every step has been carried out, or `None` for
    /// an empty plan (the arm never moved).
    pub fn end_position(&self) -> Option<Track> {
        self.steps.last().map(|step| step.finish)
    }
}
