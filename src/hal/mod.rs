// Pin-capability boundary for the drive and ranging hardware
//
// The original firmware reached the board through global pin writes. These
// traits make that boundary explicit: drive and range code is generic over
// the pin capabilities it needs, so tests and the demo binary can run
// against the recording backend in `sim` instead of real hardware.

use std::time::Duration;

pub mod sim;

pub use sim::{PinEvent, SimBus};

/// Errors surfaced by a pin backend
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    #[error("Pin {pin} fault: {reason}")]
    Pin { pin: u8, reason: String },

    #[error("No echo pulse completed within {timeout:?}")]
    EchoTimeout { timeout: Duration },
}

/// A digital output pin.
pub trait DigitalOut {
    /// Drive the pin high (`true`) or low (`false`).
    fn write(&mut self, high: bool) -> Result<(), HalError>;
}

/// A PWM-capable output pin.
pub trait PwmOut {
    /// Apply `duty` as the pin's duty cycle.
    fn set_duty(&mut self, duty: u16) -> Result<(), HalError>;

    /// Platform PWM resolution: 255 on 8-bit timers, 1023 on 10-bit ones.
    fn max_duty(&self) -> u16;
}

/// A digital input pin that can time pulses.
pub trait EchoIn {
    /// Block until a high pulse on the pin completes and return its duration
    /// in microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::EchoTimeout`] if no pulse completes within
    /// `timeout`.
    fn measure_pulse_us(&mut self, timeout: Duration) -> Result<u32, HalError>;
}

/// Microsecond-granularity busy wait.
pub trait Delay {
    fn delay_us(&mut self, us: u32);
}
