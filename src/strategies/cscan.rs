//! C-SCAN: sweep to one end of the track space, jump to the other end,
//! finish the sweep from there.

use async_trait::async_trait;
use thiserror::Error;

use crate::strategy::Strategy;
use crate::types::direction::Direction;
use crate::types::plan::{MovementStep, SchedulePlan};
use crate::types::request::PlanRequest;
use crate::types::track::{Track, TrackRange};

/// Contract violations: inputs the caller was supposed to validate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("track range is inverted: min {min} is greater than max {max}")]
    InvertedRange { min: Track, max: Track },
    #[error("head position {head} is outside tracks {min}..={max}")]
    HeadOutOfRange { head: Track, min: Track, max: Track },
    #[error("requested track {track} is outside tracks {min}..={max}")]
    TrackOutOfRange { track: Track, min: Track, max: Track },
}

/// Compute the C-SCAN movement plan for one run.
///
/// The arm starts at `head` and sweeps toward the boundary it is facing,
/// servicing every request on the way. If any requests are left on the
/// other side, the arm jumps straight to the opposite boundary and sweeps
/// again from there. Each serviced track becomes one [`MovementStep`];
/// duplicates are serviced as listed.
pub fn schedule(
    head: Track,
    direction: Direction,
    tracks: &[Track],
    range: TrackRange,
) -> Result<SchedulePlan, ScheduleError> {
    if range.min > range.max {
        return Err(ScheduleError::InvertedRange {
            min: range.min,
            max: range.max,
        });
    }
    if !range.contains(head) {
        return Err(ScheduleError::HeadOutOfRange {
            head,
            min: range.min,
            max: range.max,
        });
    }
    if let Some(&track) = tracks.iter().find(|track| !range.contains(**track)) {
        return Err(ScheduleError::TrackOutOfRange {
            track,
            min: range.min,
            max: range.max,
        });
    }

    let mut sorted = tracks.to_vec();
    sorted.sort_unstable();

    // A request sitting exactly on the head counts as ahead for both
    // directions: it is serviced in the first sweep, not after the jump.
    let (mut ahead, mut behind): (Vec<Track>, Vec<Track>) = match direction {
        Direction::Up => sorted.into_iter().partition(|&track| track >= head),
        Direction::Down => sorted.into_iter().partition(|&track| track <= head),
    };
    if direction == Direction::Down {
        ahead.reverse();
        behind.reverse();
    }
    let (near, far) = match direction {
        Direction::Up => (range.max, range.min),
        Direction::Down => (range.min, range.max),
    };

    let mut steps = Vec::with_capacity(ahead.len() + behind.len() + 2);
    let mut current = head;
    for track in ahead {
        steps.push(MovementStep::between(current, track));
        current = track;
    }
    // Run out the sweep to the boundary, unless the arm already sits there.
    if current != near {
        steps.push(MovementStep::between(current, near));
    }
    if !behind.is_empty() {
        // The single wraparound jump across the whole track space.
        steps.push(MovementStep::between(near, far));
        current = far;
        for track in behind {
            steps.push(MovementStep::between(current, track));
            current = track;
        }
    }

    let total_distance = steps.iter().map(|step| u64::from(step.distance)).sum();
    Ok(SchedulePlan {
        steps,
        total_distance,
    })
}

/// C-SCAN packaged as a [`Strategy`], for use behind the planner service.
#[derive(Debug, Clone, Copy, Default)]
pub struct CscanStrategy;

#[async_trait]
impl Strategy<PlanRequest, SchedulePlan> for CscanStrategy {
    async fn plan(&self, request: PlanRequest) -> anyhow::Result<SchedulePlan> {
        let plan = schedule(
            request.head,
            request.direction,
            &request.tracks,
            request.range,
        )?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(head: Track, direction: Direction, tracks: &[Track]) -> SchedulePlan {
        schedule(head, direction, tracks, TrackRange::default()).unwrap()
    }

    fn step(start: Track, finish: Track) -> MovementStep {
        MovementStep::between(start, finish)
    }

    #[test]
    fn up_sweeps_then_wraps() {
        let plan = plan(50, Direction::Up, &[20, 90, 150]);
        assert_eq!(
            plan.steps,
            vec![
                step(50, 90),
                step(90, 150),
                step(150, 199),
                step(199, 0),
                step(0, 20),
            ]
        );
        assert_eq!(plan.total_distance, 368);
        assert_eq!(plan.end_position(), Some(20));
    }

    #[test]
    fn down_sweeps_then_wraps() {
        let plan = plan(50, Direction::Down, &[20, 90, 150]);
        assert_eq!(
            plan.steps,
            vec![
                step(50, 20),
                step(20, 0),
                step(0, 199),
                step(199, 150),
                step(150, 90),
            ]
        );
        assert_eq!(plan.total_distance, 358);
        assert_eq!(plan.end_position(), Some(90));
    }

    #[test]
    fn no_wrap_when_nothing_behind() {
        let plan = plan(0, Direction::Up, &[0, 199]);
        assert_eq!(plan.steps, vec![step(0, 0), step(0, 199)]);
        assert_eq!(plan.total_distance, 199);
        assert!(
            !plan
                .steps
                .iter()
                .any(|s| s.start == 199 && s.finish == 0)
        );
    }

    #[test]
    fn empty_requests_run_out_to_the_boundary() {
        let up = plan(50, Direction::Up, &[]);
        assert_eq!(up.steps, vec![step(50, 199)]);
        assert_eq!(up.total_distance, 149);

        let down = plan(50, Direction::Down, &[]);
        assert_eq!(down.steps, vec![step(50, 0)]);
        assert_eq!(down.total_distance, 50);
    }

    #[test]
    fn empty_requests_with_head_on_boundary_is_an_empty_plan() {
        let plan = plan(199, Direction::Up, &[]);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.total_distance, 0);
        assert_eq!(plan.end_position(), None);
    }

    #[test]
    fn request_on_the_head_is_serviced_before_the_jump() {
        let up = plan(50, Direction::Up, &[50, 10]);
        assert_eq!(
            up.steps,
            vec![step(50, 50), step(50, 199), step(199, 0), step(0, 10)]
        );

        let down = plan(50, Direction::Down, &[50, 60]);
        assert_eq!(
            down.steps,
            vec![step(50, 50), step(50, 0), step(0, 199), step(199, 60)]
        );
    }

    #[test]
    fn duplicates_become_zero_distance_steps() {
        let plan = plan(50, Direction::Up, &[90, 90]);
        assert_eq!(plan.steps, vec![step(50, 90), step(90, 90), step(90, 199)]);
        assert_eq!(plan.total_distance, 149);
    }

    #[test]
    fn presorted_input_yields_the_same_plan() {
        let shuffled = plan(75, Direction::Down, &[180, 12, 90, 34, 160]);
        let sorted = plan(75, Direction::Down, &[12, 34, 90, 160, 180]);
        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn every_request_finishes_exactly_one_step() {
        let tracks = [20, 90, 150, 90];
        let plan = plan(50, Direction::Up, &tracks);
        for &track in &tracks {
            let hits = plan.steps.iter().filter(|s| s.finish == track).count();
            let expected = tracks.iter().filter(|&&t| t == track).count();
            assert_eq!(hits, expected, "track {track}");
        }
        // Nothing but requests and the two boundaries ever shows up.
        for s in &plan.steps {
            assert!(tracks.contains(&s.finish) || s.finish == 0 || s.finish == 199);
        }
    }

    #[test]
    fn total_distance_is_the_sum_of_step_distances() {
        let plan = plan(101, Direction::Down, &[3, 44, 101, 150, 199, 7]);
        let sum: u64 = plan.steps.iter().map(|s| u64::from(s.distance)).sum();
        assert_eq!(plan.total_distance, sum);
        for s in &plan.steps {
            assert_eq!(s.distance, s.start.abs_diff(s.finish));
        }
    }

    #[test]
    fn exactly_one_wraparound_step_when_behind_is_nonempty() {
        let range = TrackRange::default();
        let plan = plan(50, Direction::Up, &[20, 90]);
        let wraps: Vec<_> = plan
            .steps
            .iter()
            .filter(|s| s.distance == range.span())
            .collect();
        assert_eq!(wraps.len(), 1);
        assert_eq!(wraps[0].start, 199);
        assert_eq!(wraps[0].finish, 0);
    }

    #[test]
    fn legs_are_monotonic_in_the_direction_of_travel() {
        let plan = plan(50, Direction::Up, &[20, 90, 150, 60, 10]);
        let wrap = plan
            .steps
            .iter()
            .position(|s| s.start == 199 && s.finish == 0)
            .unwrap();
        let (first_leg, rest) = plan.steps.split_at(wrap);
        assert!(first_leg.windows(2).all(|w| w[0].finish <= w[1].finish));
        // Behind leg resumes from the low boundary and climbs again.
        assert!(rest[1..].windows(2).all(|w| w[0].finish <= w[1].finish));
    }

    #[test]
    fn custom_range_moves_the_boundaries() {
        let range = TrackRange::new(10, 50);
        let plan = schedule(30, Direction::Up, &[40, 20], range).unwrap();
        assert_eq!(
            plan.steps,
            vec![step(30, 40), step(40, 50), step(50, 10), step(10, 20)]
        );
        assert_eq!(plan.total_distance, 70);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = schedule(5, Direction::Up, &[], TrackRange::new(10, 2)).unwrap_err();
        assert_eq!(err, ScheduleError::InvertedRange { min: 10, max: 2 });
    }

    #[test]
    fn head_outside_the_range_is_rejected() {
        let err = schedule(200, Direction::Up, &[], TrackRange::default()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::HeadOutOfRange {
                head: 200,
                min: 0,
                max: 199
            }
        );
    }

    #[test]
    fn request_outside_the_range_is_rejected() {
        let err = schedule(50, Direction::Down, &[20, 300], TrackRange::default()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::TrackOutOfRange {
                track: 300,
                min: 0,
                max: 199
            }
        );
    }
}
