// Ultrasonic pulse-timing rangefinder (HC-SR04 style)
//
// Fires a 10 us trigger pulse and times the echo pin's high pulse; the
// round-trip duration converts to a one-way distance in centimetres.

use std::time::Duration;

use tracing::debug;

use crate::config::ECHO_TIMEOUT;
use crate::hal::{Delay, DigitalOut, EchoIn, HalError};

/// One-way speed of sound, centimetres per microsecond at room temperature
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Settle time before the trigger pulse, guarantees a clean rising edge
const TRIGGER_SETTLE_US: u32 = 2;

/// Width of the trigger pulse the transducer expects
const TRIGGER_PULSE_US: u32 = 10;

/// Errors from a range measurement
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    #[error("No echo within {timeout:?}")]
    NoEcho { timeout: Duration },

    #[error("Pin backend error: {0}")]
    Hal(#[from] HalError),
}

/// Time-of-flight distance sensor over a trigger output and an echo input.
///
/// Each measurement blocks for the pulse wait, bounded by the configured
/// timeout. Readings are transient; nothing is cached between calls.
pub struct DistanceSensor<T, E, W>
where
    T: DigitalOut,
    E: EchoIn,
    W: Delay,
{
    trigger: T,
    echo: E,
    delay: W,
    timeout: Duration,
}

impl<T, E, W> DistanceSensor<T, E, W>
where
    T: DigitalOut,
    E: EchoIn,
    W: Delay,
{
    pub fn new(trigger: T, echo: E, delay: W) -> Self {
        Self::with_timeout(trigger, echo, delay, ECHO_TIMEOUT)
    }

    /// Create a sensor with a custom maximum-range timeout.
    pub fn with_timeout(trigger: T, echo: E, delay: W, timeout: Duration) -> Self {
        Self {
            trigger,
            echo,
            delay,
            timeout,
        }
    }

    /// Fire the trigger and return the measured distance in whole
    /// centimetres (truncated).
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NoEcho`] when no echo pulse completes within the
    /// timeout, so a timed-out sensor is never mistaken for an object at
    /// 0 cm.
    pub fn measure_cm(&mut self) -> Result<u32, RangeError> {
        self.trigger.write(false)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);

        self.trigger.write(true)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.write(false)?;

        let duration_us = match self.echo.measure_pulse_us(self.timeout) {
            Ok(us) => us,
            Err(HalError::EchoTimeout { timeout }) => {
                return Err(RangeError::NoEcho { timeout });
            }
            Err(e) => return Err(e.into()),
        };

        // Half the round trip gives the one-way distance
        let distance = duration_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0;
        let distance_cm = distance as u32;
        debug!(duration_us, distance_cm, "range measurement");
        Ok(distance_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::sim::{PinEvent, SimBus};

    const TRIGGER: u8 = 14;
    const ECHO: u8 = 15;

    fn sensor(bus: &SimBus) -> DistanceSensor<impl DigitalOut, impl EchoIn, impl Delay> {
        DistanceSensor::new(bus.pin(TRIGGER), bus.echo(ECHO), bus.delay())
    }

    #[test]
    fn trigger_protocol_is_low_settle_high_pulse_low() {
        let bus = SimBus::new();
        bus.push_echo_us(583);
        let mut sensor = sensor(&bus);

        sensor.measure_cm().unwrap();

        assert_eq!(
            bus.events(),
            vec![
                PinEvent::DigitalWrite {
                    pin: TRIGGER,
                    high: false
                },
                PinEvent::DelayUs { us: 2 },
                PinEvent::DigitalWrite {
                    pin: TRIGGER,
                    high: true
                },
                PinEvent::DelayUs { us: 10 },
                PinEvent::DigitalWrite {
                    pin: TRIGGER,
                    high: false
                },
                PinEvent::PulseRead {
                    pin: ECHO,
                    duration_us: 583
                },
            ]
        );
    }

    #[test]
    fn distance_is_floor_of_half_round_trip() {
        // floor(duration * 0.0343 / 2) for each scripted pulse
        let cases = [
            (583u32, 9u32),  // 583 * 0.0343 / 2 = 9.998..
            (1000, 17),      // 17.15
            (2915, 49),      // 49.99..
            (58, 0),         // sub-centimetre truncates to 0
            (29155, 500),    // ~5 m
        ];

        let bus = SimBus::new();
        let mut sensor = sensor(&bus);
        for (duration_us, expected_cm) in cases {
            bus.push_echo_us(duration_us);
            assert_eq!(
                sensor.measure_cm().unwrap(),
                expected_cm,
                "duration {duration_us} us"
            );
        }
    }

    #[test]
    fn timed_out_echo_is_an_error_not_zero() {
        let bus = SimBus::new();
        let mut sensor = sensor(&bus);

        let err = sensor.measure_cm().unwrap_err();
        assert!(matches!(err, RangeError::NoEcho { .. }));
    }

    #[test]
    fn custom_timeout_is_passed_through() {
        let bus = SimBus::new();
        let timeout = Duration::from_millis(5);
        let mut sensor =
            DistanceSensor::with_timeout(bus.pin(TRIGGER), bus.echo(ECHO), bus.delay(), timeout);

        match sensor.measure_cm() {
            Err(RangeError::NoEcho { timeout: reported }) => assert_eq!(reported, timeout),
            other => panic!("expected NoEcho, got {other:?}"),
        }
    }

    #[test]
    fn readings_are_fresh_each_call() {
        let bus = SimBus::new();
        let mut sensor = sensor(&bus);

        bus.push_echo_us(1000);
        assert_eq!(sensor.measure_cm().unwrap(), 17);

        bus.push_echo_us(583);
        assert_eq!(sensor.measure_cm().unwrap(), 9);
    }
}
