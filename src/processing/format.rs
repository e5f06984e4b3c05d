use crate::models::DocumentFormat;

/// Classifies raw line input into a fixed-width layout family purely on line
/// count and per-line length.
pub struct FormatDetector;

impl FormatDetector {
    /// Normalize user-supplied text: uppercase, strip all whitespace inside
    /// each physical line, and discard lines shorter than 6 characters.
    pub fn normalize_lines(raw: &str) -> Vec<String> {
        raw.lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .flat_map(char::to_uppercase)
                    .collect::<String>()
            })
            .filter(|line| line.chars().count() >= 6)
            .collect()
    }

    /// Family-level detection. TD3/TD2 visa refinement (MRV-A / MRV-B)
    /// happens later, once the type code is extracted. The TD1 name line is
    /// optional, so two 30-char lines still classify as TD1.
    pub fn detect(lines: &[String]) -> DocumentFormat {
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        match widths.as_slice() {
            [44, 44] => DocumentFormat::TD3,
            [36, 36] => DocumentFormat::TD2,
            [30, 30, 30] | [30, 30] => DocumentFormat::TD1,
            [30] => DocumentFormat::CNCard,
            _ => DocumentFormat::Unknown,
        }
    }
}
