//! Steering and throttle directives, and the commands that gate them

use crate::core::types::PilotResult;
use crate::input::Actuator;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    TurnLeft,
    TurnRight,
    StopTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throttle {
    MoveForward,
    StopMove,
}

/// What the controller asks of the actuator for one tick; at most one of each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directives {
    pub steering: Option<Steering>,
    pub throttle: Option<Throttle>,
}

impl Directives {
    /// Hold the current actuator state
    pub const NONE: Directives = Directives {
        steering: None,
        throttle: None,
    };

    /// Stop turning and moving
    pub const STOP: Directives = Directives {
        steering: Some(Steering::StopTurn),
        throttle: Some(Throttle::StopMove),
    };

    pub fn is_empty(&self) -> bool {
        self.steering.is_none() && self.throttle.is_none()
    }

    /// Forward both directives to the actuator, steering first
    pub fn apply<A: Actuator + ?Sized>(&self, actuator: &mut A) -> PilotResult<()> {
        match self.steering {
            Some(Steering::TurnLeft) => actuator.turn_left()?,
            Some(Steering::TurnRight) => actuator.turn_right()?,
            Some(Steering::StopTurn) => actuator.stop_turn()?,
            None => {}
        }
        match self.throttle {
            Some(Throttle::MoveForward) => actuator.move_forward()?,
            Some(Throttle::StopMove) => actuator.stop_move()?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for Directives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.steering, self.throttle) {
            (None, None) => f.write_str("hold"),
            (s, t) => write!(f, "{:?} / {:?}", s, t),
        }
    }
}

/// External control of the controller, delivered over a `watch` channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Emit directives normally
    #[default]
    Resume,
    /// Stop all movement once, then emit nothing until resumed
    StopAll,
}
