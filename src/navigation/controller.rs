//! Closed-loop waypoint follower
//!
//! Each tick the controller compares the player's facing with the direction
//! to the current waypoint and emits at most one steering and one throttle
//! directive. Reaching the end of the path reverses it in place, so
//! traversal runs end to end and back again.

use super::directive::{Command, Directives, Steering, Throttle};
use super::path::{read_path, write_path, SharedPath, Waypoint};
use crate::core::types::{PilotError, PilotResult, Vec2};
use crate::input::Actuator;
use crate::telemetry::{TelemetrySnapshot, TelemetrySource};
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

/// Controller thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTuning {
    /// `|cross|` below which the facing counts as aligned
    pub cross_threshold: f32,
    /// Alignment error below which the facing counts as aligned
    pub alignment_threshold: f32,
    /// Distance above which the controller keeps moving forward
    pub move_threshold: f32,
    /// Distance below which the waypoint counts as reached
    pub arrival_radius: f32,
}

impl Default for NavigationTuning {
    fn default() -> Self {
        NavigationTuning {
            cross_threshold: 0.1,
            alignment_threshold: 2.0,
            move_threshold: 1.0,
            arrival_radius: 2.0,
        }
    }
}

/// Where the controller is relative to the current waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Turning toward the waypoint
    Aligning,
    /// Facing the waypoint
    Approaching,
    /// Reached the waypoint on the last tick; the next tick aligns to the next one
    Arrived,
}

/// Order of traversal relative to the path as loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Squared distance between two unit vectors, in `[0, 4]`
pub fn alignment_error(current: Vec2, desired: Vec2) -> f32 {
    current.distance_squared(desired)
}

/// Steering with a hysteresis band around perfect alignment.
///
/// Negative `cross` turns left, positive turns right.
pub fn steering(cross: f32, alignment_error: f32, tuning: &NavigationTuning) -> Steering {
    if cross.abs() < tuning.cross_threshold && alignment_error < tuning.alignment_threshold {
        Steering::StopTurn
    } else if cross < 0.0 {
        Steering::TurnLeft
    } else {
        Steering::TurnRight
    }
}

pub fn throttle(distance: f32, tuning: &NavigationTuning) -> Throttle {
    if distance > tuning.move_threshold {
        Throttle::MoveForward
    } else {
        Throttle::StopMove
    }
}

/// Waypoint-following state machine
#[derive(Debug)]
pub struct NavigationController {
    path: SharedPath,
    index: usize,
    direction: Direction,
    state: NavState,
    tuning: NavigationTuning,
    stopped: bool,
    previous: Option<TelemetrySnapshot>,
    last_error: Option<PilotError>,
}

impl NavigationController {
    /// Fails with `PathEmpty` if the path has no waypoints
    pub fn new(path: SharedPath, tuning: NavigationTuning) -> PilotResult<Self> {
        if read_path(&path).is_empty() {
            return Err(PilotError::PathEmpty);
        }
        Ok(NavigationController {
            path,
            index: 0,
            direction: Direction::Forward,
            state: NavState::Aligning,
            tuning,
            stopped: false,
            previous: None,
            last_error: None,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn path(&self) -> &SharedPath {
        &self.path
    }

    /// The waypoint currently being approached
    pub fn target(&self) -> Option<Waypoint> {
        read_path(&self.path).get(self.index)
    }

    /// Why the most recent tick emitted nothing, if it did
    pub fn last_error(&self) -> Option<&PilotError> {
        self.last_error.as_ref()
    }

    /// The last valid snapshot seen
    pub fn previous(&self) -> Option<&TelemetrySnapshot> {
        self.previous.as_ref()
    }

    /// One full pipeline step: read telemetry, decide, actuate.
    pub fn tick<S, A>(
        &mut self,
        source: &mut S,
        actuator: &mut A,
        commands: &watch::Receiver<Command>,
    ) -> Directives
    where
        S: TelemetrySource + ?Sized,
        A: Actuator + ?Sized,
    {
        let command = *commands.borrow();
        let snapshot = source.read();
        let directives = self.decide(&snapshot, command);

        if let Err(e) = directives.apply(actuator) {
            warn!("Failed to actuate {}: {}", directives, e);
            self.last_error = Some(e);
        }
        directives
    }

    /// Decide this tick's directives from a snapshot and the current command
    pub fn decide(&mut self, snapshot: &TelemetrySnapshot, command: Command) -> Directives {
        match command {
            Command::StopAll if self.stopped => return Directives::NONE,
            Command::StopAll => {
                info!("Stopping all movement");
                self.stopped = true;
                return Directives::STOP;
            }
            Command::Resume if self.stopped => {
                info!("Resuming navigation at waypoint {}", self.index);
                self.stopped = false;
            }
            Command::Resume => {}
        }

        if let Some(fault) = snapshot.fault() {
            debug!("Holding actuator state: {}", fault);
            self.last_error = Some(fault.to_error());
            return Directives::NONE;
        }

        let Some(target) = self.target() else {
            self.last_error = Some(PilotError::PathEmpty);
            return Directives::NONE;
        };
        self.last_error = None;

        let here = snapshot.position().planar();
        if let Some(previous) = &self.previous {
            trace!(
                "Moved {:.2} since last tick",
                previous.position().planar().distance(here)
            );
        }

        let to_target = target.position() - here;
        let distance = to_target.length();
        let steering = match to_target.normalized() {
            Some(desired) => {
                let current = snapshot.orientation();
                let cross = desired.cross(current);
                let error = alignment_error(current, desired);
                trace!("cross {:.3}, alignment error {:.3}", cross, error);
                steering(cross, error, &self.tuning)
            }
            // Standing exactly on the waypoint leaves no direction to turn to
            None => Steering::StopTurn,
        };
        let throttle = throttle(distance, &self.tuning);

        self.state = match steering {
            Steering::StopTurn => NavState::Approaching,
            _ => NavState::Aligning,
        };
        if distance < self.tuning.arrival_radius {
            self.advance();
        }

        self.previous = Some(*snapshot);
        Directives {
            steering: Some(steering),
            throttle: Some(throttle),
        }
    }

    fn advance(&mut self) {
        let mut path = write_path(&self.path);
        info!("Arrived at waypoint {} of {}", self.index, path.len());
        self.state = NavState::Arrived;
        self.index += 1;

        if self.index >= path.len() {
            path.reverse();
            self.index = 0;
            self.direction = self.direction.flipped();
            info!("End of path reached, reversing ({:?})", self.direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::navigation::path::{shared, WaypointPath};

    fn controller(points: &[(f32, f32)]) -> NavigationController {
        let path: WaypointPath = points.iter().map(|&(x, y)| Waypoint::new(x, y)).collect();
        NavigationController::new(shared(path), NavigationTuning::default()).unwrap()
    }

    fn at(x: f32, y: f32, facing: Vec2) -> TelemetrySnapshot {
        TelemetrySnapshot::from_raw(Vec3::new(x, y, 0.0), facing, Some(100))
    }

    #[test]
    fn test_steering_hysteresis() {
        let tuning = NavigationTuning::default();
        assert_eq!(steering(0.0, 0.0, &tuning), Steering::StopTurn);
        assert_eq!(steering(-0.5, 0.0, &tuning), Steering::TurnLeft);
        assert_eq!(steering(0.5, 0.0, &tuning), Steering::TurnRight);
        // Facing directly away: cross is zero but the error is large
        assert_eq!(steering(0.0, 4.0, &tuning), Steering::TurnRight);
    }

    #[test]
    fn test_throttle() {
        let tuning = NavigationTuning::default();
        assert_eq!(throttle(0.5, &tuning), Throttle::StopMove);
        assert_eq!(throttle(5.0, &tuning), Throttle::MoveForward);
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = NavigationController::new(shared(WaypointPath::new()), NavigationTuning::default());
        assert!(matches!(result, Err(PilotError::PathEmpty)));
    }

    #[test]
    fn test_aligned_approach() {
        let mut nav = controller(&[(0.0, 10.0)]);
        let directives = nav.decide(&at(0.0, 0.0, Vec2::new(0.0, 1.0)), Command::Resume);
        assert_eq!(directives, Directives {
            steering: Some(Steering::StopTurn),
            throttle: Some(Throttle::MoveForward),
        });
        assert_eq!(nav.state(), NavState::Approaching);
    }

    #[test]
    fn test_turn_direction_follows_cross_sign() {
        // Target to the east while facing north: desired × current = 1
        let mut nav = controller(&[(10.0, 0.0)]);
        let directives = nav.decide(&at(0.0, 0.0, Vec2::new(0.0, 1.0)), Command::Resume);
        assert_eq!(directives.steering, Some(Steering::TurnRight));
        assert_eq!(nav.state(), NavState::Aligning);

        // Target to the west while facing north: desired × current = -1
        let mut nav = controller(&[(-10.0, 0.0)]);
        let directives = nav.decide(&at(0.0, 0.0, Vec2::new(0.0, 1.0)), Command::Resume);
        assert_eq!(directives.steering, Some(Steering::TurnLeft));
    }

    #[test]
    fn test_invalid_snapshot_holds() {
        let mut nav = controller(&[(0.0, 10.0)]);
        let directives = nav.decide(&at(0.0, 0.0, Vec2::ZERO), Command::Resume);
        assert!(directives.is_empty());
        assert!(matches!(nav.last_error(), Some(PilotError::InvalidTelemetry(_))));

        nav.decide(&at(0.0, 0.0, Vec2::new(0.0, 1.0)), Command::Resume);
        assert!(nav.last_error().is_none());
    }

    #[test]
    fn test_stop_all_suspends_until_resume() {
        let mut nav = controller(&[(0.0, 10.0)]);
        let snapshot = at(0.0, 0.0, Vec2::new(0.0, 1.0));

        assert_eq!(nav.decide(&snapshot, Command::StopAll), Directives::STOP);
        assert!(nav.is_stopped());
        assert_eq!(nav.decide(&snapshot, Command::StopAll), Directives::NONE);

        let resumed = nav.decide(&snapshot, Command::Resume);
        assert_eq!(resumed.throttle, Some(Throttle::MoveForward));
        assert!(!nav.is_stopped());
    }

    #[test]
    fn test_arrival_advances_and_reverses() {
        let mut nav = controller(&[(0.0, 0.0), (0.0, 10.0)]);
        let facing = Vec2::new(0.0, 1.0);

        let directives = nav.decide(&at(0.5, 0.0, facing), Command::Resume);
        assert_eq!(directives.throttle, Some(Throttle::StopMove));
        assert_eq!(nav.state(), NavState::Arrived);
        assert_eq!(nav.index(), 1);

        nav.decide(&at(0.0, 9.0, facing), Command::Resume);
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.direction(), Direction::Backward);
        assert_eq!(nav.target(), Some(Waypoint::new(0.0, 10.0)));
    }

    #[test]
    fn test_standing_on_waypoint() {
        let mut nav = controller(&[(3.0, 4.0), (30.0, 40.0)]);
        let directives = nav.decide(&at(3.0, 4.0, Vec2::new(1.0, 0.0)), Command::Resume);
        assert_eq!(directives, Directives::STOP);
        assert_eq!(nav.index(), 1);
    }
}
