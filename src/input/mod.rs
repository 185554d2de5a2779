//! Keyboard actuation of navigation directives
//!
//! `InputActuator` tracks which logical keys are held and only forwards real
//! transitions to a `KeyInjector`. On Windows the injector is `SendInput`
//! and the target window is brought to the foreground before each tick.

pub mod actuator;
#[cfg(windows)]
pub mod keyboard;
pub mod window;

pub use actuator::InputActuator;
#[cfg(windows)]
pub use keyboard::SendInputInjector;
pub use window::WindowActivator;
#[cfg(windows)]
pub use window::ForegroundWindow;

use crate::core::types::PilotResult;

/// The four logical movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

/// Primitive key event sink
pub trait KeyInjector {
    fn press(&mut self, key: Key) -> PilotResult<()>;
    fn release(&mut self, key: Key) -> PilotResult<()>;
}

/// Movement interface driven by the navigation controller
pub trait Actuator {
    fn move_forward(&mut self) -> PilotResult<()>;
    fn move_backward(&mut self) -> PilotResult<()>;
    fn stop_move(&mut self) -> PilotResult<()>;
    fn turn_left(&mut self) -> PilotResult<()>;
    fn turn_right(&mut self) -> PilotResult<()>;
    fn stop_turn(&mut self) -> PilotResult<()>;
}
