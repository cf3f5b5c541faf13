// Differential-drive locomotion and ranging layer for a small wheeled robot
//
// Provides:
// - Pin-capability traits with a recording simulated backend
// - Motor / MotorNetwork differential-drive primitives
// - Ultrasonic pulse-timing distance measurement

pub mod config;
pub mod drive;
pub mod hal;
pub mod range;

pub use config::PinMap;
pub use drive::{Motor, MotorNetwork};
pub use range::{DistanceSensor, RangeError};
