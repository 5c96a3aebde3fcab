//! Fixed game constants and amount validation.

use std::num::NonZeroU32;

use crate::error::{Result, TrackerError};

/// Life points each player starts with (and returns to on reset).
pub const STARTING_LIFE_POINTS: u32 = 8000;

/// Preset magnitudes offered as one-click damage and heal buttons.
pub const QUICK_VALUES: [u32; 10] = [100, 200, 300, 400, 500, 600, 700, 800, 900, 1000];

/// Longest digit string the custom keypad accepts.
pub const MAX_KEYPAD_DIGITS: usize = 5;

/// Parse a damage/heal amount from a request parameter.
///
/// Accepts a positive base-10 integer of at most [`MAX_KEYPAD_DIGITS`] digits.
pub fn parse_amount(raw: &str) -> Result<NonZeroU32> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_KEYPAD_DIGITS
        || !trimmed.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(TrackerError::InvalidAmount(raw.to_string()));
    }
    trimmed
        .parse::<u32>()
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| TrackerError::InvalidAmount(raw.to_string()))
}
