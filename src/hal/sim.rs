// Recording simulated pin backend
//
// `SimBus` stands in for the board: every handle created from it shares one
// recorder, so a test can wire up motors and a sensor, run commands, and then
// inspect pin levels, PWM duties, and the ordered event log. Echo pulses are
// scripted ahead of time with `push_echo_us`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Delay, DigitalOut, EchoIn, HalError, PwmOut};

/// Default simulated PWM resolution (8-bit timer)
pub const SIM_MAX_DUTY: u16 = 255;

/// One recorded hardware side effect, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    DigitalWrite { pin: u8, high: bool },
    PwmWrite { pin: u8, duty: u16 },
    DelayUs { us: u32 },
    PulseRead { pin: u8, duration_us: u32 },
}

#[derive(Default)]
struct SimState {
    levels: HashMap<u8, bool>,
    duties: HashMap<u8, u16>,
    events: Vec<PinEvent>,
    echo_script: VecDeque<u32>,
}

/// Shared recorder behind every simulated pin handle
#[derive(Clone, Default)]
pub struct SimBus {
    state: Arc<Mutex<SimState>>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a digital output handle for `pin`.
    pub fn pin(&self, pin: u8) -> SimPin {
        SimPin {
            pin,
            state: Arc::clone(&self.state),
        }
    }

    /// Create a PWM output handle for `pin` with the default 8-bit resolution.
    pub fn pwm(&self, pin: u8) -> SimPwm {
        self.pwm_with_max(pin, SIM_MAX_DUTY)
    }

    /// Create a PWM output handle with a custom resolution (e.g. 1023).
    pub fn pwm_with_max(&self, pin: u8, max_duty: u16) -> SimPwm {
        SimPwm {
            pin,
            max_duty,
            state: Arc::clone(&self.state),
        }
    }

    /// Create an echo input handle for `pin`.
    pub fn echo(&self, pin: u8) -> SimEcho {
        SimEcho {
            pin,
            state: Arc::clone(&self.state),
        }
    }

    /// Create a delay handle (delays are recorded, not slept).
    pub fn delay(&self) -> SimDelay {
        SimDelay {
            state: Arc::clone(&self.state),
        }
    }

    /// Script the duration of the next echo pulse, FIFO order.
    pub fn push_echo_us(&self, duration_us: u32) {
        self.lock().echo_script.push_back(duration_us);
    }

    /// Last level written to `pin`, or `None` if never written.
    pub fn level(&self, pin: u8) -> Option<bool> {
        self.lock().levels.get(&pin).copied()
    }

    /// Last duty applied to `pin`, or `None` if never applied.
    pub fn duty(&self, pin: u8) -> Option<u16> {
        self.lock().duties.get(&pin).copied()
    }

    /// Snapshot of the full event log in call order.
    pub fn events(&self) -> Vec<PinEvent> {
        self.lock().events.clone()
    }

    /// Drop all recorded state and scripted echoes.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.levels.clear();
        state.duties.clear();
        state.events.clear();
        state.echo_script.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().expect("sim bus lock poisoned")
    }
}

/// Simulated digital output pin
pub struct SimPin {
    pin: u8,
    state: Arc<Mutex<SimState>>,
}

impl DigitalOut for SimPin {
    fn write(&mut self, high: bool) -> Result<(), HalError> {
        let mut state = self.state.lock().expect("sim bus lock poisoned");
        state.levels.insert(self.pin, high);
        state.events.push(PinEvent::DigitalWrite {
            pin: self.pin,
            high,
        });
        Ok(())
    }
}

/// Simulated PWM output pin
pub struct SimPwm {
    pin: u8,
    max_duty: u16,
    state: Arc<Mutex<SimState>>,
}

impl PwmOut for SimPwm {
    fn set_duty(&mut self, duty: u16) -> Result<(), HalError> {
        let mut state = self.state.lock().expect("sim bus lock poisoned");
        state.duties.insert(self.pin, duty);
        state.events.push(PinEvent::PwmWrite {
            pin: self.pin,
            duty,
        });
        Ok(())
    }

    fn max_duty(&self) -> u16 {
        self.max_duty
    }
}

/// Simulated echo input pin, fed from the bus's scripted pulse durations
pub struct SimEcho {
    pin: u8,
    state: Arc<Mutex<SimState>>,
}

impl EchoIn for SimEcho {
    fn measure_pulse_us(&mut self, timeout: Duration) -> Result<u32, HalError> {
        let mut state = self.state.lock().expect("sim bus lock poisoned");
        match state.echo_script.pop_front() {
            Some(duration_us) => {
                state.events.push(PinEvent::PulseRead {
                    pin: self.pin,
                    duration_us,
                });
                Ok(duration_us)
            }
            // No scripted pulse behaves like a sensor that never answered
            None => Err(HalError::EchoTimeout { timeout }),
        }
    }
}

/// Simulated delay source; records the wait instead of sleeping
pub struct SimDelay {
    state: Arc<Mutex<SimState>>,
}

impl Delay for SimDelay {
    fn delay_us(&mut self, us: u32) {
        let mut state = self.state.lock().expect("sim bus lock poisoned");
        state.events.push(PinEvent::DelayUs { us });
    }
}
