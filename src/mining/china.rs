use super::{CodepageDecoder, Transliterator};
use crate::models::{ExtendedData, RiskFinding};
use crate::utils::MrzError;
use crate::validation::FILLER;

/// Contents of the packed-name buffer found in the optional-data field of
/// Greater-China TD3 documents: the first 12 characters carry hex nibbles
/// (two per byte), the 13th an optional truncation-length letter.
pub struct PackedName {
    pub bytes: Vec<u8>,
    pub filler_count: usize,
    pub truncation: Option<u8>,
}

pub fn unpack(optional: &str) -> PackedName {
    let window: Vec<char> = optional.chars().take(12).collect();
    let filler_count = window.iter().filter(|&&c| c == FILLER).count();

    let mut nibbles = Vec::new();
    for &c in &window {
        match c.to_digit(16) {
            Some(n) => nibbles.push(n as u8),
            None => break,
        }
    }
    // A trailing odd nibble carries no byte.
    let bytes = nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect();

    let truncation = optional.chars().nth(12).and_then(|c| {
        if c.is_ascii_uppercase() {
            Some(c as u8 - b'A')
        } else {
            None
        }
    });

    PackedName {
        bytes,
        filler_count,
        truncation,
    }
}

/// Uppercase and strip to A-Z, folding the pinyin v/ü spellings of the same
/// vowel into U. Applied identically to the phonetic reconstruction and to
/// the MRZ Latin name so the two are comparable.
pub fn normalize_latin(s: &str) -> String {
    s.chars()
        .flat_map(char::to_uppercase)
        .map(|c| if c == 'V' || c == 'Ü' { 'U' } else { c })
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

fn vowel_count(s: &str) -> usize {
    s.chars()
        .filter(|c| matches!(c, 'A' | 'E' | 'I' | 'O' | 'U'))
        .count()
}

/// Decode the embedded name and cross-validate its phonetic reconstruction
/// against the MRZ Latin name. Errors from either collaborator propagate to
/// the caller, which degrades them to "no extended data".
pub fn mine(
    optional: &str,
    surname: &str,
    given_names: &str,
    decoder: &dyn CodepageDecoder,
    transliterator: &dyn Transliterator,
) -> Result<(ExtendedData, Vec<RiskFinding>), MrzError> {
    let packed = unpack(optional);
    if packed.bytes.is_empty() {
        return Err(MrzError::CodepageDecode(
            "packed-name buffer holds no bytes".to_string(),
        ));
    }

    let decoded = decoder.decode(&packed.bytes)?;
    let syllables = transliterator.romanize(&decoded)?;
    let phonetic = normalize_latin(&syllables.join(""));
    let mrz_name = normalize_latin(&format!("{} {}", surname, given_names));
    let declared = packed.truncation.unwrap_or(0) as usize;

    let mut risks = Vec::new();

    // A declared truncation should have consumed every buffer slot; fillers
    // alongside it are a logical contradiction.
    if declared > 0 && packed.filler_count > 0 {
        risks.push(RiskFinding::critical(
            "risk_truncation_filler",
            format!(
                "truncation length {} declared but {} filler slots remain in the name buffer",
                declared, packed.filler_count
            ),
        ));
    }

    if !mrz_name.starts_with(&phonetic) {
        risks.push(RiskFinding::critical(
            "risk_name_prefix",
            format!(
                "MRZ name {} does not begin with the reconstructed reading {}",
                mrz_name, phonetic
            ),
        ));
    } else {
        let suffix = &mrz_name[phonetic.len()..];
        if declared == 0 && !suffix.is_empty() {
            risks.push(RiskFinding::warn(
                "risk_unexplained_suffix",
                format!("unexplained trailing MRZ characters {:?}", suffix),
            ));
        } else if declared > 0 && suffix.is_empty() {
            risks.push(RiskFinding::critical(
                "risk_truncation_missing",
                format!(
                    "{} hidden characters declared but the MRZ name carries none",
                    declared
                ),
            ));
        } else if declared > 0 && vowel_count(suffix) < declared {
            risks.push(RiskFinding::critical(
                "risk_truncation_vowel",
                format!(
                    "suffix {:?} holds {} vowels, not enough for {} hidden syllables",
                    suffix,
                    vowel_count(suffix),
                    declared
                ),
            ));
        }
    }

    let extended = ExtendedData {
        title: "Embedded native-script name".to_string(),
        text: decoded,
        truncation: packed.truncation,
    };
    Ok((extended, risks))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubDecoder(&'static str);

    impl CodepageDecoder for StubDecoder {
        fn decode(&self, _bytes: &[u8]) -> Result<String, MrzError> {
            Ok(self.0.to_string())
        }
    }

    struct StubTransliterator(&'static [&'static str]);

    impl Transliterator for StubTransliterator {
        fn romanize(&self, _text: &str) -> Result<Vec<String>, MrzError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    #[test]
    fn unpack_pairs_nibbles_and_reads_truncation_letter() {
        let packed = unpack("D5C5CEB0<<<<<<");
        assert_eq!(packed.bytes, vec![0xD5, 0xC5, 0xCE, 0xB0]);
        assert_eq!(packed.filler_count, 4);
        assert_eq!(packed.truncation, None);

        let packed = unpack("D5C5CEB0B7BCC<");
        assert_eq!(packed.bytes.len(), 6);
        assert_eq!(packed.filler_count, 0);
        assert_eq!(packed.truncation, Some(2));
    }

    #[test]
    fn unpack_discards_trailing_odd_nibble() {
        let packed = unpack("D5C5C<<<<<<<<<");
        assert_eq!(packed.bytes, vec![0xD5, 0xC5]);
    }

    #[test]
    fn normalize_folds_v_and_umlaut_into_u() {
        assert_eq!(normalize_latin("Lü"), "LU");
        assert_eq!(normalize_latin("LV"), "LU");
        assert_eq!(normalize_latin("ZHANG WEI"), "ZHANGWEI");
    }

    #[test]
    fn matching_prefix_with_no_truncation_is_clean() {
        let (ext, risks) = mine(
            "D5C5CEB0<<<<<<",
            "ZHANG",
            "WEI",
            &StubDecoder("张伟"),
            &StubTransliterator(&["ZHANG", "WEI"]),
        )
        .unwrap();
        assert!(risks.is_empty());
        assert_eq!(ext.text, "张伟");
        assert_eq!(ext.truncation, None);
    }

    #[test]
    fn vowel_starved_suffix_is_critical() {
        let (ext, risks) = mine(
            "D5C5CEB0B7BCC<",
            "ZHANG",
            "WEIXX",
            &StubDecoder("张伟"),
            &StubTransliterator(&["ZHANG", "WEI"]),
        )
        .unwrap();
        assert_eq!(ext.truncation, Some(2));
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, "risk_truncation_vowel");
        assert_eq!(risks[0].severity, crate::models::RiskSeverity::Critical);
    }

    #[test]
    fn declared_truncation_with_filler_slots_contradicts() {
        let (_, risks) = mine(
            "D5C5CEB0<<<<C<",
            "ZHANG",
            "WEIANAN",
            &StubDecoder("张伟"),
            &StubTransliterator(&["ZHANG", "WEI"]),
        )
        .unwrap();
        assert!(risks.iter().any(|r| r.category == "risk_truncation_filler"));
    }

    #[test]
    fn name_not_starting_with_reading_is_critical() {
        let (_, risks) = mine(
            "D5C5CEB0<<<<<<",
            "LI",
            "NA",
            &StubDecoder("张伟"),
            &StubTransliterator(&["ZHANG", "WEI"]),
        )
        .unwrap();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, "risk_name_prefix");
    }

    #[test]
    fn truncation_declared_but_suffix_empty_is_critical() {
        let (_, risks) = mine(
            "D5C5CEB0B7BCC<",
            "ZHANG",
            "WEI",
            &StubDecoder("张伟"),
            &StubTransliterator(&["ZHANG", "WEI"]),
        )
        .unwrap();
        assert!(risks
            .iter()
            .any(|r| r.category == "risk_truncation_missing"));
    }

    #[test]
    fn unexplained_suffix_without_truncation_warns() {
        let (_, risks) = mine(
            "D5C5CEB0<<<<<<",
            "ZHANG",
            "WEIAN",
            &StubDecoder("张伟"),
            &StubTransliterator(&["ZHANG", "WEI"]),
        )
        .unwrap();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, "risk_unexplained_suffix");
        assert_eq!(risks[0].severity, crate::models::RiskSeverity::Warn);
    }

    #[test]
    fn filler_only_buffer_is_an_error() {
        assert!(mine(
            "<<<<<<<<<<<<<<",
            "ZHANG",
            "WEI",
            &StubDecoder("张伟"),
            &StubTransliterator(&["ZHANG", "WEI"]),
        )
        .is_err());
    }
}
