use std::ops::Range;

/// Optional OCR auto-correction applied to layout-known numeric and alpha
/// ranges before extraction and checksum computation. Pure: produces a new
/// line, never mutates in place. Characters outside the substitution tables
/// pass through unchanged, so a second application is a no-op.
pub struct AutoFixer;

impl AutoFixer {
    // Commonly misread letters inside numeric zones.
    fn letter_to_digit(c: char) -> char {
        match c {
            'O' | 'Q' | 'D' => '0',
            'I' => '1',
            'Z' => '2',
            'S' => '5',
            'G' => '6',
            'B' => '8',
            _ => c,
        }
    }

    // Approximate inverse, for digits leaking into alpha zones.
    fn digit_to_letter(c: char) -> char {
        match c {
            '0' => 'O',
            '1' => 'I',
            '2' => 'Z',
            '5' => 'S',
            '6' => 'G',
            '8' => 'B',
            _ => c,
        }
    }

    /// Apply both substitution tables over their respective character ranges.
    /// Ranges never overlap between the two tables; free-form optional-data
    /// spans are never listed in either.
    pub fn fix_line(line: &str, numeric: &[Range<usize>], alpha: &[Range<usize>]) -> String {
        line.chars()
            .enumerate()
            .map(|(i, c)| {
                if numeric.iter().any(|r| r.contains(&i)) {
                    Self::letter_to_digit(c)
                } else if alpha.iter().any(|r| r.contains(&i)) {
                    Self::digit_to_letter(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixes_letters_in_numeric_ranges() {
        let fixed = AutoFixer::fix_line("74O8I2", &[0..6], &[]);
        assert_eq!(fixed, "740812");
    }

    #[test]
    fn fixes_digits_in_alpha_ranges() {
        let fixed = AutoFixer::fix_line("CHN5", &[], &[0..4]);
        assert_eq!(fixed, "CHNS");
    }

    #[test]
    fn untouched_outside_ranges() {
        let line = "ZE184226B<<<<<";
        assert_eq!(AutoFixer::fix_line(line, &[], &[]), line);
    }

    #[test]
    fn idempotent_over_fixed_output() {
        let once = AutoFixer::fix_line("74O8I2F1ZO4159", &[0..7, 8..14], &[7..8]);
        let twice = AutoFixer::fix_line(&once, &[0..7, 8..14], &[7..8]);
        assert_eq!(once, twice);
    }

    #[test]
    fn filler_passes_through() {
        assert_eq!(AutoFixer::fix_line("<<<<", &[0..4], &[]), "<<<<");
    }
}
