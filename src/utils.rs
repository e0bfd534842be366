use crate::config::{MAX_PHASE_SECONDS, MAX_ROUNDS, MIN_PHASE_SECONDS, MIN_ROUNDS};
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for duration parsing
static DURATION_COLON_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})$").unwrap());
static DURATION_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)s$").unwrap());

/// Duration parsing error types for better error handling
#[derive(Debug, PartialEq, Eq)]
pub enum DurationParseError {
    EmptyInput,
    InvalidFormat(String),
    InvalidSeconds(u32),
}

impl std::fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationParseError::EmptyInput => write!(f, "Duration cannot be empty"),
            DurationParseError::InvalidFormat(hint) => {
                write!(f, "Invalid duration format. {}", hint)
            }
            DurationParseError::InvalidSeconds(s) => {
                write!(f, "Invalid seconds: {} (must be 0-59)", s)
            }
        }
    }
}

impl std::error::Error for DurationParseError {}

/// Parse a duration string in various formats to whole seconds.
///
/// Supported formats:
/// - Pure number: "90" (interpreted as seconds)
/// - Colon format: "1:30" (minutes:seconds)
/// - Suffixed seconds: "90s"
pub fn parse_duration_secs(input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationParseError::EmptyInput.to_string());
    }

    // Try parsing as a pure number (assume seconds)
    if let Ok(secs) = trimmed.parse::<u32>() {
        return Ok(secs);
    }

    // Try parsing "M:SS" format
    if let Some(captures) = DURATION_COLON_REGEX.captures(trimmed) {
        let minutes: u32 = captures[1].parse().map_err(|_| "Invalid minutes")?;
        let seconds: u32 = captures[2].parse().map_err(|_| "Invalid seconds")?;
        if seconds > 59 {
            return Err(DurationParseError::InvalidSeconds(seconds).to_string());
        }
        return Ok(minutes * 60 + seconds);
    }

    // Try parsing "Xs" format
    if let Some(captures) = DURATION_SEC_REGEX.captures(trimmed) {
        let seconds: u32 = captures[1].parse().map_err(|_| "Invalid seconds")?;
        return Ok(seconds);
    }

    Err(DurationParseError::InvalidFormat("Use: 90, 1:30, or 90s".to_string()).to_string())
}

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Validate a phase duration field, accepting any supported duration format.
pub fn validate_phase_seconds(input: &str, field_name: &str) -> Result<u32, String> {
    let secs = parse_duration_secs(input)?;
    if secs < MIN_PHASE_SECONDS {
        return Err(format!(
            "{} must be at least {} second(s)",
            field_name, MIN_PHASE_SECONDS
        ));
    }
    if secs > MAX_PHASE_SECONDS {
        return Err(format!(
            "{} cannot exceed {} seconds",
            field_name, MAX_PHASE_SECONDS
        ));
    }
    Ok(secs)
}

pub fn validate_work_seconds(input: &str) -> Result<u32, String> {
    validate_phase_seconds(input, "Work time")
}

pub fn validate_rest_seconds(input: &str) -> Result<u32, String> {
    validate_phase_seconds(input, "Rest time")
}

pub fn validate_rounds(input: &str) -> Result<u32, String> {
    validate_numeric_input(input, Some(MIN_ROUNDS), Some(MAX_ROUNDS), "Rounds")
}
