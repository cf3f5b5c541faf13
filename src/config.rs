// Wiring and runtime defaults
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// Default straight-line duty cycle (8-bit PWM full scale)
pub const DEFAULT_SPEED: u16 = 255;

// Pivot turns run at speed / TURN_SPEED_DIVISOR
pub const TURN_SPEED_DIVISOR: u16 = 2;

// Maximum echo wait before a range reading is declared lost
pub const ECHO_TIMEOUT: Duration = Duration::from_millis(30);

/// Errors loading a wiring file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read wiring file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse wiring file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Board wiring: which pin drives what.
///
/// Replaces the old compile-time pin macros so the same drive code can run
/// against any wiring, including the simulated backend in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinMap {
    pub left_pin1: u8,
    pub left_pin2: u8,
    pub left_enable: u8,
    pub right_pin1: u8,
    pub right_pin2: u8,
    pub right_enable: u8,
    pub trigger: u8,
    pub echo: u8,
}

impl Default for PinMap {
    /// Stock wiring of the original chassis.
    fn default() -> Self {
        Self {
            left_pin1: 11,
            left_pin2: 10,
            left_enable: 6,
            right_pin1: 9,
            right_pin2: 8,
            right_enable: 5,
            trigger: 14, // A0
            echo: 15,    // A1
        }
    }
}

impl PinMap {
    /// Load wiring from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_stock_wiring() {
        let pins = PinMap::default();
        assert_eq!(pins.left_enable, 6);
        assert_eq!(pins.right_enable, 5);
        assert_eq!(pins.trigger, 14);
        assert_eq!(pins.echo, 15);
    }

    #[test]
    fn parses_wiring_json() {
        let json = r#"{
            "left_pin1": 1, "left_pin2": 2, "left_enable": 3,
            "right_pin1": 4, "right_pin2": 5, "right_enable": 6,
            "trigger": 7, "echo": 8
        }"#;
        let pins: PinMap = serde_json::from_str(json).unwrap();
        assert_eq!(pins.left_pin1, 1);
        assert_eq!(pins.echo, 8);
    }

    #[test]
    fn round_trips_through_json() {
        let pins = PinMap::default();
        let json = serde_json::to_string(&pins).unwrap();
        let back: PinMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.left_pin1, pins.left_pin1);
        assert_eq!(back.trigger, pins.trigger);
    }
}
