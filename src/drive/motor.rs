// One DC motor behind an H-bridge channel: two direction pins select
// forward/backward/stopped, the enable pin carries the PWM duty cycle.

use tracing::debug;

use crate::hal::{DigitalOut, HalError, PwmOut};

/// A single motor. Owns its three pins; direction and speed commands go
/// straight to the hardware.
///
/// Invariant: at most one direction pin is driven high at any instant.
pub struct Motor<D1, D2, En>
where
    D1: DigitalOut,
    D2: DigitalOut,
    En: PwmOut,
{
    pin1: D1,
    pin2: D2,
    enable: En,
    speed: u16,
}

impl<D1, D2, En> Motor<D1, D2, En>
where
    D1: DigitalOut,
    D2: DigitalOut,
    En: PwmOut,
{
    /// Create a motor over the given pins, leaving it stopped with duty 0.
    pub fn new(forward_pin: D1, backward_pin: D2, enable_pin: En) -> Result<Self, HalError> {
        let mut motor = Self {
            pin1: forward_pin,
            pin2: backward_pin,
            enable: enable_pin,
            speed: 0,
        };
        motor.set_speed(0)?;
        motor.stop()?;
        Ok(motor)
    }

    /// Spin forward at the currently configured speed.
    pub fn forward(&mut self) -> Result<(), HalError> {
        self.pin1.write(true)?;
        self.pin2.write(false)
    }

    /// Spin backward. Supersedes any prior direction.
    pub fn backward(&mut self) -> Result<(), HalError> {
        self.pin1.write(false)?;
        self.pin2.write(true)
    }

    /// Release both direction pins. Idempotent.
    pub fn stop(&mut self) -> Result<(), HalError> {
        self.pin1.write(false)?;
        self.pin2.write(false)
    }

    /// Store `duty` (clamped to the enable pin's resolution) and apply it
    /// immediately.
    pub fn set_speed(&mut self, duty: u16) -> Result<(), HalError> {
        let clamped = duty.min(self.enable.max_duty());
        if clamped != duty {
            debug!(requested = duty, applied = clamped, "clamping duty to PWM range");
        }
        self.speed = clamped;
        self.enable.set_duty(clamped)
    }

    /// Last stored commanded speed.
    pub fn speed(&self) -> u16 {
        self.speed
    }

    /// PWM resolution of the enable pin.
    pub fn max_duty(&self) -> u16 {
        self.enable.max_duty()
    }
}
