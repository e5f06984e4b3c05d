use serde::Serialize;

/// Padding character used throughout the MRZ. Per ICAO Doc 9303 it may also
/// stand in for a check digit of zero.
pub const FILLER: char = '<';

// ICAO modulus-10 weight cycle.
const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Outcome of judging one check character. Total over its input domain;
/// malformed check characters simply fail the comparison.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CheckResult {
    pub computed: u8,
    pub valid: bool,
}

pub struct ChecksumEngine;

impl ChecksumEngine {
    /// Character weight per ICAO Doc 9303: digits map to their value, A-Z to
    /// alphabetic position + 10, the filler and anything else to 0.
    pub fn char_value(c: char) -> u32 {
        match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            _ => 0,
        }
    }

    /// Weighted modulus-10 check digit over an arbitrary span.
    pub fn weighted_check(span: &str) -> u8 {
        let sum: u32 = span
            .chars()
            .enumerate()
            .map(|(i, c)| Self::char_value(c) * WEIGHTS[i % 3])
            .sum();
        (sum % 10) as u8
    }

    /// Judge a supplied check character against the span. The filler is
    /// accepted as an encoding of zero.
    pub fn check(span: &str, actual: char) -> CheckResult {
        let computed = Self::weighted_check(span);
        let valid = if actual == FILLER {
            computed == 0
        } else {
            actual.to_digit(10) == Some(computed as u32)
        };
        CheckResult { computed, valid }
    }
}
