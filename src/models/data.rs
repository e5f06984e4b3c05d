use chrono::NaiveDate;
use serde::Serialize;

/// Physical MRZ layouts recognized by the format detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentFormat {
    TD1,    // ID card, 3 lines x 30 chars
    TD2,    // Legacy ID card, 2 lines x 36 chars
    TD3,    // Passport booklet, 2 lines x 44 chars
    MRVA,   // Visa Format-A, shares the TD3 grid
    MRVB,   // Visa Format-B, shares the TD2 grid
    CNCard, // Proprietary 1-line x 30 exit-entry permit card
    Unknown,
}

impl DocumentFormat {
    pub fn mrz_lines(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 3,
            DocumentFormat::TD2 | DocumentFormat::MRVB => 2,
            DocumentFormat::TD3 | DocumentFormat::MRVA => 2,
            DocumentFormat::CNCard => 1,
            DocumentFormat::Unknown => 0,
        }
    }

    pub fn mrz_chars_per_line(&self) -> usize {
        match self {
            DocumentFormat::TD1 | DocumentFormat::CNCard => 30,
            DocumentFormat::TD2 | DocumentFormat::MRVB => 36,
            DocumentFormat::TD3 | DocumentFormat::MRVA => 44,
            DocumentFormat::Unknown => 0,
        }
    }
}

/// Coarse document classification derived from the type code and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentClass {
    Passport,
    Visa,
    Card,
    Unknown,
}

/// Per-document decoded fields. All values are the raw extracted slices:
/// filler characters are retained in code/number fields and stripped only in
/// the human-readable name fields. `None` means the layout does not carry the
/// field (or nothing was decoded at all for UNKNOWN input).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecodedFields {
    pub document_number: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<String>,
    pub sex: Option<String>,
    pub expiry_date: Option<String>,
    pub optional_data: Option<String>,
    pub optional_data_secondary: Option<String>,
    pub document_type_raw: Option<String>,
    pub document_type: Option<String>,
    pub issuing_state: Option<String>,
    pub surname: Option<String>,
    pub given_names: Option<String>,
    pub composite_check: Option<String>,
}

/// One boolean per checked field plus the composite over the layout-specific
/// span concatenation. `optional_data` is `None` for layouts that do not
/// protect that field with a check digit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationSet {
    pub document_number: bool,
    pub birth_date: bool,
    pub expiry_date: bool,
    pub optional_data: Option<bool>,
    pub composite: bool,
}

impl ValidationSet {
    /// Document-level verdict: every per-field flag and the composite must
    /// hold. An unchecked optional-data field never counts against it.
    pub fn all_valid(&self) -> bool {
        self.document_number
            && self.birth_date
            && self.expiry_date
            && self.optional_data.unwrap_or(true)
            && self.composite
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskSeverity {
    Warn,
    Critical,
}

/// A semantic-risk signal mined from the optional data. Orthogonal to
/// checksum validity; a document can carry any number of these.
#[derive(Debug, Clone, Serialize)]
pub struct RiskFinding {
    pub severity: RiskSeverity,
    pub category: String,
    pub detail: String,
}

impl RiskFinding {
    pub fn warn(category: &str, detail: String) -> Self {
        RiskFinding {
            severity: RiskSeverity::Warn,
            category: category.to_string(),
            detail,
        }
    }

    pub fn critical(category: &str, detail: String) -> Self {
        RiskFinding {
            severity: RiskSeverity::Critical,
            category: category.to_string(),
            detail,
        }
    }
}

/// Enrichment mined out of the optional-data field: a short title tag, a
/// display string, and (Greater-China documents) the declared truncation
/// length read from the 13th byte of the packed-name buffer.
#[derive(Debug, Clone, Serialize)]
pub struct ExtendedData {
    pub title: String,
    pub text: String,
    pub truncation: Option<u8>,
}

/// Derived values. Absent fields mean the source date did not parse; derived
/// values are never computed from an invalid date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedInfo {
    pub birth_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub days_until_expiry: Option<i64>,
    pub age: Option<i32>,
    pub extended: Option<ExtendedData>,
}

/// The sole boundary artifact of a decode call.
#[derive(Debug, Clone, Serialize)]
pub struct MrzResult {
    pub valid: bool,
    pub format: DocumentFormat,
    pub class: DocumentClass,
    pub raw_lines: Vec<String>,
    pub fields: DecodedFields,
    pub validations: ValidationSet,
    pub parsed: ParsedInfo,
    pub logs: Vec<String>,
    pub calc_logs: Vec<String>,
    pub risks: Vec<RiskFinding>,
}

impl MrzResult {
    /// Fully-populated-but-empty record for input that matches no layout.
    pub fn unrecognized(raw_lines: Vec<String>, diagnostic: String) -> Self {
        MrzResult {
            valid: false,
            format: DocumentFormat::Unknown,
            class: DocumentClass::Unknown,
            raw_lines,
            fields: DecodedFields::default(),
            validations: ValidationSet::default(),
            parsed: ParsedInfo::default(),
            logs: vec![diagnostic],
            calc_logs: Vec::new(),
            risks: Vec::new(),
        }
    }
}
