use log::warn;

use crate::mining::{CodepageDecoder, OptionalDataMiner, Transliterator};
use crate::models::{DocumentFormat, MrzResult, ParsedInfo};
use crate::processing::{descriptor_for, CountryClassifier, FormatDetector, LayoutEngine};
use crate::validation::{DateDeriver, DateKind};

/// Orchestrates one decode call: normalization, format detection, layout
/// extraction, classification, optional-data mining and date derivation.
/// Total over its input; never returns an error or panics.
pub struct MrzProcessor {
    decoder: Option<Box<dyn CodepageDecoder>>,
    transliterator: Option<Box<dyn Transliterator>>,
}

impl MrzProcessor {
    /// Processor without the packed-name collaborators. The Greater-China
    /// optional-data path then degrades to "no extended data", which callers
    /// must treat as a valid outcome.
    pub fn new() -> Self {
        MrzProcessor {
            decoder: None,
            transliterator: None,
        }
    }

    /// Processor with the legacy-codepage and transliteration collaborators
    /// wired in, enabling the embedded-name cross-check.
    pub fn with_collaborators(
        decoder: Box<dyn CodepageDecoder>,
        transliterator: Box<dyn Transliterator>,
    ) -> Self {
        MrzProcessor {
            decoder: Some(decoder),
            transliterator: Some(transliterator),
        }
    }

    /// Decode one text block. `auto_fix` toggles the OCR repair pass over
    /// numeric/alpha zones before extraction.
    pub fn process(&self, raw: &str, auto_fix: bool) -> MrzResult {
        let lines = FormatDetector::normalize_lines(raw);
        let family = FormatDetector::detect(&lines);
        let desc = match descriptor_for(family) {
            Some(desc) => desc,
            None => {
                warn!("input shape matches no known MRZ layout");
                return MrzResult::unrecognized(
                    lines,
                    "No known MRZ layout matches the input shape".to_string(),
                );
            }
        };

        let mut extraction = LayoutEngine::extract(desc, &lines, auto_fix);
        let mut logs = Vec::new();

        // The TD3/TD2 grids double as the visa formats; a V type code picks
        // the visa variant.
        let type_raw = extraction
            .fields
            .document_type_raw
            .clone()
            .unwrap_or_default();
        let format = match family {
            DocumentFormat::TD3 if type_raw.starts_with('V') => DocumentFormat::MRVA,
            DocumentFormat::TD2 if type_raw.starts_with('V') => DocumentFormat::MRVB,
            other => other,
        };
        logs.push(format!("Detected layout: {:?}", format));

        // The 1-line permit card carries no issuer span; those documents are
        // Chinese-issued by definition.
        let issuer_raw = match extraction.fields.issuing_state.clone() {
            Some(code) => code,
            None if format == DocumentFormat::CNCard => "CHN".to_string(),
            None => String::new(),
        };
        let issuer = CountryClassifier::normalize_country(&issuer_raw);
        let document_number = extraction
            .fields
            .document_number
            .clone()
            .unwrap_or_default();
        extraction.fields.document_type = Some(CountryClassifier::classify(
            &issuer_raw,
            &type_raw,
            format,
            &document_number,
        ));
        let class = CountryClassifier::coarse_class(&type_raw, format);

        let miner = OptionalDataMiner {
            decoder: self.decoder.as_deref(),
            transliterator: self.transliterator.as_deref(),
        };
        let (extended, risks) = miner.mine(&issuer, format, &extraction.fields);

        let birth_date = extraction
            .fields
            .birth_date
            .as_deref()
            .and_then(|d| DateDeriver::parse_mrz_date(d, DateKind::Birth));
        let expiry_date = extraction
            .fields
            .expiry_date
            .as_deref()
            .and_then(|d| DateDeriver::parse_mrz_date(d, DateKind::Expiry));
        let parsed = ParsedInfo {
            birth_date,
            expiry_date,
            days_until_expiry: expiry_date.map(DateDeriver::days_until_expiry),
            age: birth_date.map(DateDeriver::age),
            extended,
        };

        let valid = extraction.validations.all_valid();
        MrzResult {
            valid,
            format,
            class,
            raw_lines: extraction.lines,
            fields: extraction.fields,
            validations: extraction.validations,
            parsed,
            logs,
            calc_logs: extraction.calc_logs,
            risks,
        }
    }
}
