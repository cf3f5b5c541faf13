// Differential-drive network: two exclusively owned motors composed into
// the four motion primitives plus stop and global speed control.
//
// Straight travel runs at `speed`; pivot turns run at `turn_speed`, a fixed
// fraction of it. Turning slower than driving keeps a light two-wheeled
// chassis from losing traction mid-rotation.

use tracing::{debug, info};

use super::Motor;
use crate::config::{DEFAULT_SPEED, TURN_SPEED_DIVISOR};
use crate::hal::{DigitalOut, HalError, PwmOut};

/// Left/right motor pair with network-level speed state.
///
/// `turn_speed` is recomputed on every speed change, so the two values never
/// drift out of their defined ratio.
pub struct MotorNetwork<LF, LB, LE, RF, RB, RE>
where
    LF: DigitalOut,
    LB: DigitalOut,
    LE: PwmOut,
    RF: DigitalOut,
    RB: DigitalOut,
    RE: PwmOut,
{
    left: Motor<LF, LB, LE>,
    right: Motor<RF, RB, RE>,
    speed: u16,
    turn_speed: u16,
}

impl<LF, LB, LE, RF, RB, RE> MotorNetwork<LF, LB, LE, RF, RB, RE>
where
    LF: DigitalOut,
    LB: DigitalOut,
    LE: PwmOut,
    RF: DigitalOut,
    RB: DigitalOut,
    RE: PwmOut,
{
    /// Take ownership of two configured motors, stop them, and prime the
    /// default speed. The network never constructs in a moving state.
    pub fn new(
        left: Motor<LF, LB, LE>,
        right: Motor<RF, RB, RE>,
    ) -> Result<Self, HalError> {
        let mut network = Self {
            left,
            right,
            speed: 0,
            turn_speed: 0,
        };
        network.stop()?;
        network.set_speed(DEFAULT_SPEED)?;
        info!(speed = network.speed, "motor network ready");
        Ok(network)
    }

    /// Both motors forward at the straight-line speed.
    pub fn forward(&mut self) -> Result<(), HalError> {
        debug!(duty = self.speed, "forward");
        self.left.set_speed(self.speed)?;
        self.right.set_speed(self.speed)?;
        self.left.forward()?;
        self.right.forward()
    }

    /// Both motors backward at the straight-line speed.
    pub fn backward(&mut self) -> Result<(), HalError> {
        debug!(duty = self.speed, "backward");
        self.left.set_speed(self.speed)?;
        self.right.set_speed(self.speed)?;
        self.left.backward()?;
        self.right.backward()
    }

    /// Pivot counter-clockwise: left motor backward, right forward, both at
    /// the reduced turn speed.
    pub fn left(&mut self) -> Result<(), HalError> {
        debug!(duty = self.turn_speed, "pivot left");
        self.left.set_speed(self.turn_speed)?;
        self.right.set_speed(self.turn_speed)?;
        self.left.backward()?;
        self.right.forward()
    }

    /// Pivot clockwise. Exact mirror of [`Self::left`].
    pub fn right(&mut self) -> Result<(), HalError> {
        debug!(duty = self.turn_speed, "pivot right");
        self.left.set_speed(self.turn_speed)?;
        self.right.set_speed(self.turn_speed)?;
        self.left.forward()?;
        self.right.backward()
    }

    /// Stop both motors. Idempotent, safe before any motion command.
    pub fn stop(&mut self) -> Result<(), HalError> {
        info!("stopping both motors");
        self.left.stop()?;
        self.right.stop()
    }

    /// Store `duty`, rederive the turn speed, and apply the duty to both
    /// enable pins immediately so a speed change primes the next motion
    /// command even while stationary.
    pub fn set_speed(&mut self, duty: u16) -> Result<(), HalError> {
        let clamped = duty
            .min(self.left.max_duty())
            .min(self.right.max_duty());
        self.speed = clamped;
        self.turn_speed = clamped / TURN_SPEED_DIVISOR;
        self.left.set_speed(clamped)?;
        self.right.set_speed(clamped)
    }

    /// Network-level commanded speed (not an individual motor's value, which
    /// may hold the turn duty after a pivot).
    pub fn speed(&self) -> u16 {
        self.speed
    }

    /// Duty cycle used during pivot turns.
    pub fn turn_speed(&self) -> u16 {
        self.turn_speed
    }
}
