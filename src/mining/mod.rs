pub mod china;

use crate::models::rules;
use crate::models::{DecodedFields, DocumentFormat, ExtendedData, RiskFinding};
use crate::utils::MrzError;
use crate::validation::FILLER;

/// Opaque host capability turning a legacy multi-byte codepage byte stream
/// into text. Expected synchronous, side-effect-free, and safe to call from
/// any number of concurrent invocations.
pub trait CodepageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<String, MrzError>;
}

/// Opaque collaborator producing the phonetic Latin reading of an
/// ideographic name as a sequence of syllables.
pub trait Transliterator: Send + Sync {
    fn romanize(&self, text: &str) -> Result<Vec<String>, MrzError>;
}

/// Country-keyed reinterpretation of the free-form optional-data field(s).
pub struct OptionalDataMiner<'a> {
    pub decoder: Option<&'a dyn CodepageDecoder>,
    pub transliterator: Option<&'a dyn Transliterator>,
}

fn cleaned(raw: &str) -> String {
    raw.split(FILLER)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

impl<'a> OptionalDataMiner<'a> {
    /// Mine the optional data of one decoded document. `issuer` must already
    /// be a normalized 3-letter code. Returns the enrichment (when any) and
    /// zero or more risk findings; failures inside the Greater-China path
    /// degrade to no enrichment rather than propagating.
    pub fn mine(
        &self,
        issuer: &str,
        format: DocumentFormat,
        fields: &DecodedFields,
    ) -> (Option<ExtendedData>, Vec<RiskFinding>) {
        let primary = fields.optional_data.as_deref().unwrap_or("");
        let secondary = fields.optional_data_secondary.as_deref().unwrap_or("");
        let source = if cleaned(primary).is_empty() && !cleaned(secondary).is_empty() {
            secondary
        } else {
            primary
        };

        let text = cleaned(source);
        if text.is_empty() {
            return (
                Some(ExtendedData {
                    title: "Optional data".to_string(),
                    text: "ICAO compliant / no hidden data".to_string(),
                    truncation: None,
                }),
                Vec::new(),
            );
        }

        if matches!(issuer, "CHN" | "HKG" | "MAC") && format == DocumentFormat::TD3 {
            return self.mine_packed_name(source, fields);
        }

        if let Some(rule) = rules::rule_for(issuer) {
            let value = match &rule.pattern {
                Some(re) => re
                    .find(&text)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| text.clone()),
                None => text.clone(),
            };
            return (
                Some(ExtendedData {
                    title: rule.label.to_string(),
                    text: value,
                    truncation: None,
                }),
                Vec::new(),
            );
        }

        // Unmatched jurisdiction: display the cleaned text verbatim.
        (
            Some(ExtendedData {
                title: "Optional data".to_string(),
                text,
                truncation: None,
            }),
            Vec::new(),
        )
    }

    fn mine_packed_name(
        &self,
        source: &str,
        fields: &DecodedFields,
    ) -> (Option<ExtendedData>, Vec<RiskFinding>) {
        let (decoder, transliterator) = match (self.decoder, self.transliterator) {
            (Some(d), Some(t)) => (d, t),
            _ => {
                log::debug!("packed-name collaborators not wired; skipping decode");
                return (None, Vec::new());
            }
        };
        let surname = fields.surname.as_deref().unwrap_or("");
        let given = fields.given_names.as_deref().unwrap_or("");
        match china::mine(source, surname, given, decoder, transliterator) {
            Ok((extended, risks)) => (Some(extended), risks),
            Err(err) => {
                // Best-effort policy: decode or transliteration failures are
                // swallowed here and the document simply carries no
                // extended data.
                log::debug!("packed-name decode degraded: {}", err);
                (None, Vec::new())
            }
        }
    }
}
