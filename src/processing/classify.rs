use crate::models::{DocumentClass, DocumentFormat};
use crate::validation::FILLER;

/// Pure, total classification over (issuer, type code, layout, document
/// number). No state, no I/O.
pub struct CountryClassifier;

impl CountryClassifier {
    /// Normalize a 1-3 letter issuing-authority code to an ICAO 3-letter
    /// code. Strips fillers, then maps known legacy single/double-letter
    /// codes through a fixed lookup; anything else passes through unchanged,
    /// so the function is idempotent.
    pub fn normalize_country(code: &str) -> String {
        let stripped: String = code
            .chars()
            .filter(|&c| c != FILLER && !c.is_whitespace())
            .collect();
        let mapped = match stripped.as_str() {
            "D" => "DEU",
            "GB" | "UK" => "GBR",
            "CN" => "CHN",
            "HK" => "HKG",
            "MO" => "MAC",
            "TW" => "TWN",
            "US" => "USA",
            "JP" => "JPN",
            "KR" => "KOR",
            "SG" => "SGP",
            "MY" => "MYS",
            "TH" => "THA",
            "FR" => "FRA",
            "DE" => "DEU",
            "ES" => "ESP",
            "IT" => "ITA",
            "NL" => "NLD",
            "BE" => "BEL",
            "SE" => "SWE",
            "NO" => "NOR",
            "DK" => "DNK",
            "FI" => "FIN",
            "IS" => "ISL",
            "PL" => "POL",
            "CZ" => "CZE",
            "SK" => "SVK",
            "EE" => "EST",
            "LV" => "LVA",
            "LT" => "LTU",
            "RU" => "RUS",
            "BR" => "BRA",
            "MX" => "MEX",
            _ => return stripped,
        };
        mapped.to_string()
    }

    /// Coarse classification used for the top-level `class` field.
    pub fn coarse_class(type_code: &str, format: DocumentFormat) -> DocumentClass {
        let code = type_code.trim_end_matches(FILLER);
        if code.starts_with('V') {
            return DocumentClass::Visa;
        }
        match format {
            DocumentFormat::TD1 | DocumentFormat::TD2 | DocumentFormat::CNCard => {
                DocumentClass::Card
            }
            DocumentFormat::TD3 | DocumentFormat::MRVA | DocumentFormat::MRVB => {
                DocumentClass::Passport
            }
            DocumentFormat::Unknown => DocumentClass::Unknown,
        }
    }

    /// Fine-grained document-type tag. Greater-China issuers get dedicated
    /// handling: the "PO" ordinary passport, P-prefixed codes disambiguated
    /// by issuer or document-number prefix, and the CS/CD exit-entry permit
    /// variants. Everything else falls back to `type_<country>_<class>`.
    pub fn classify(
        issuer: &str,
        type_code: &str,
        format: DocumentFormat,
        document_number: &str,
    ) -> String {
        let country = Self::normalize_country(issuer);
        let code = type_code.trim_end_matches(FILLER);
        let number = document_number.trim_end_matches(FILLER);

        if code.starts_with('V') {
            return format!("type_{}_visa", country.to_lowercase());
        }

        if matches!(country.as_str(), "CHN" | "HKG" | "MAC") {
            if code == "PO" {
                return "type_cn_passport_ordinary".to_string();
            }
            if code.starts_with('P') {
                return match country.as_str() {
                    "HKG" => "type_hk_passport".to_string(),
                    "MAC" => "type_mac_passport".to_string(),
                    _ => match number.chars().next() {
                        Some('H') | Some('K') => "type_hk_passport".to_string(),
                        Some('M') if number.chars().count() > 8 => {
                            "type_mac_passport".to_string()
                        }
                        _ => "type_cn_epassport".to_string(),
                    },
                };
            }
            if code == "CS" {
                return "type_hk_exit_entry_permit".to_string();
            }
            if code == "CD" {
                return "type_tw_exit_entry_permit".to_string();
            }
        }

        let class = if matches!(
            format,
            DocumentFormat::TD1 | DocumentFormat::TD2 | DocumentFormat::CNCard
        ) || code.starts_with('I')
            || code.starts_with('C')
        {
            "id"
        } else {
            "p"
        };
        format!("type_{}_{}", country.to_lowercase(), class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_legacy_codes() {
        assert_eq!(CountryClassifier::normalize_country("D<<"), "DEU");
        assert_eq!(CountryClassifier::normalize_country("GB<"), "GBR");
        assert_eq!(CountryClassifier::normalize_country("UTO"), "UTO");
        assert_eq!(CountryClassifier::normalize_country("CHN"), "CHN");
    }

    #[test]
    fn normalize_country_is_idempotent() {
        for code in ["D<<", "GB", "UTO", "CHN", "", "X", "ZZZ"] {
            let once = CountryClassifier::normalize_country(code);
            assert_eq!(CountryClassifier::normalize_country(&once), once);
        }
    }

    #[test]
    fn visa_type_code_wins() {
        assert_eq!(
            CountryClassifier::classify("CHN", "V<", DocumentFormat::MRVA, "E12345678"),
            "type_chn_visa"
        );
        assert_eq!(
            CountryClassifier::coarse_class("V<", DocumentFormat::MRVA),
            DocumentClass::Visa
        );
    }

    #[test]
    fn greater_china_passport_heuristics() {
        assert_eq!(
            CountryClassifier::classify("CHN", "PO", DocumentFormat::TD3, "E12345678"),
            "type_cn_passport_ordinary"
        );
        assert_eq!(
            CountryClassifier::classify("HKG", "P<", DocumentFormat::TD3, "K1234567<"),
            "type_hk_passport"
        );
        assert_eq!(
            CountryClassifier::classify("CHN", "P<", DocumentFormat::TD3, "H1234567<"),
            "type_hk_passport"
        );
        assert_eq!(
            CountryClassifier::classify("CHN", "P<", DocumentFormat::TD3, "MA1234567"),
            "type_mac_passport"
        );
        // An 8-char M-prefixed number is not a Macau pattern.
        assert_eq!(
            CountryClassifier::classify("CHN", "P<", DocumentFormat::TD3, "M1234567"),
            "type_cn_epassport"
        );
        assert_eq!(
            CountryClassifier::classify("CHN", "P<", DocumentFormat::TD3, "E12345678"),
            "type_cn_epassport"
        );
        assert_eq!(
            CountryClassifier::classify("CHN", "CS", DocumentFormat::CNCard, "C12345678"),
            "type_hk_exit_entry_permit"
        );
        assert_eq!(
            CountryClassifier::classify("CHN", "CD", DocumentFormat::CNCard, "C12345678"),
            "type_tw_exit_entry_permit"
        );
    }

    #[test]
    fn generic_tags_follow_layout_and_type_code() {
        assert_eq!(
            CountryClassifier::classify("UTO", "P<", DocumentFormat::TD3, "L898902C3"),
            "type_uto_p"
        );
        assert_eq!(
            CountryClassifier::classify("D<<", "ID", DocumentFormat::TD1, "T22000129"),
            "type_deu_id"
        );
        assert_eq!(
            CountryClassifier::classify("UTO", "I<", DocumentFormat::TD2, "D23145890"),
            "type_uto_id"
        );
    }
}
