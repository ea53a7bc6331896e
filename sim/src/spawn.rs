//! Creation-request validation

use crate::movement::Rotation;
use crate::DEFAULT_SPEED_MS;
use std::fmt;

/// Validated parameters for creating one snake.
///
/// Values come out of [`validate_spawn`]; building one directly is reserved
/// for callers that can guarantee a positive length and speed themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnParams {
    /// Target length the snake grows toward, in segments.
    pub length: usize,
    /// Tick period in milliseconds.
    pub speed_ms: u64,
    /// Patrol rotation.
    pub rotation: Rotation,
}

/// Every field that failed validation, one message per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks every field of a creation request and aggregates all failures.
///
/// The length must be a positive integer. The speed must be a positive
/// integer, with an empty field falling back to DEFAULT_SPEED_MS. The
/// direction must name one of the two rotations, case-insensitively. All
/// three checks always run so the caller sees every problem at once.
pub fn validate_spawn(
    length_text: &str,
    speed_text: &str,
    direction_text: &str,
) -> Result<SpawnParams, ValidationErrors> {
    let mut messages = Vec::new();

    let length = match validate_length(length_text) {
        Ok(value) => Some(value),
        Err(message) => {
            messages.push(message);
            None
        }
    };
    let speed_ms = match validate_speed(speed_text) {
        Ok(value) => Some(value),
        Err(message) => {
            messages.push(message);
            None
        }
    };
    let rotation = match direction_text.parse::<Rotation>() {
        Ok(value) => Some(value),
        Err(err) => {
            messages.push(err.to_string());
            None
        }
    };

    if let (Some(length), Some(speed_ms), Some(rotation)) = (length, speed_ms, rotation) {
        Ok(SpawnParams {
            length,
            speed_ms,
            rotation,
        })
    } else {
        Err(ValidationErrors { messages })
    }
}

fn validate_length(text: &str) -> Result<usize, String> {
    match text.trim().parse::<i64>() {
        Ok(length) if length > 0 => Ok(length as usize),
        Ok(_) => Err("Length must be a positive integer".to_string()),
        Err(_) => Err("Invalid length. Please enter a positive integer".to_string()),
    }
}

fn validate_speed(text: &str) -> Result<u64, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DEFAULT_SPEED_MS);
    }
    match text.parse::<i64>() {
        Ok(speed) if speed > 0 => Ok(speed as u64),
        Ok(_) => Err("Speed must be a positive integer".to_string()),
        Err(_) => Err("Invalid speed. Please enter a positive integer".to_string()),
    }
}
