// Differential-drive module
//
// Provides:
// - Single-motor control over two direction pins and a PWM enable pin
// - MotorNetwork composing a left/right motor pair into motion primitives

mod motor;
mod network;

pub use motor::Motor;
pub use network::MotorNetwork;
