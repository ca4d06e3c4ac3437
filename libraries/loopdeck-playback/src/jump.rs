//! Staging buffer for multi-digit manual slide numbers

use crate::error::{PlaybackError, Result};

/// Digits typed so far for a "jump to slide N" command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpBuffer {
    digits: String,
}

impl JumpBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decimal digit (0-9)
    pub fn push_digit(&mut self, digit: u8) -> Result<()> {
        if digit > 9 {
            return Err(PlaybackError::InvalidDigit(digit));
        }
        self.digits.push(char::from(b'0' + digit));
        Ok(())
    }

    /// Take the buffered number as a zero-based index, clearing the buffer
    ///
    /// Returns `None` for an empty buffer, for `0`, and for numbers too large
    /// to represent; the buffer is cleared in every case.
    pub fn take_index(&mut self) -> Option<usize> {
        let digits = std::mem::take(&mut self.digits);
        digits.parse::<usize>().ok()?.checked_sub(1)
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}
