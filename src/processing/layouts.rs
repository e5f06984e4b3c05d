use std::ops::Range;

use crate::models::{DecodedFields, DocumentFormat, ValidationSet};
use crate::processing::autofix::AutoFixer;
use crate::validation::{ChecksumEngine, FILLER};

/// Semantic slot a span decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DocumentNumber,
    IssuingState,
    Nationality,
    BirthDate,
    Sex,
    ExpiryDate,
    OptionalData,
    OptionalDataSecondary,
    Names,
}

/// Expected content of a span, driving the OCR auto-fix tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Numeric,
    Alpha,
    Alnum,
    FreeForm,
}

/// A named fixed-offset range within one physical line, optionally protected
/// by an adjacent check digit.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpan {
    pub field: Field,
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
    pub check: Option<usize>,
}

/// One piece of the composite check span.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Declarative description of one layout: field spans plus the composite
/// recipe. A single generic routine extracts every format from these.
pub struct LayoutDescriptor {
    pub format: DocumentFormat,
    pub spans: &'static [FieldSpan],
    pub composite: &'static [Segment],
    pub composite_check: (usize, usize),
}

const fn span(
    field: Field,
    line: usize,
    start: usize,
    end: usize,
    kind: SpanKind,
    check: Option<usize>,
) -> FieldSpan {
    FieldSpan {
        field,
        line,
        start,
        end,
        kind,
        check,
    }
}

const fn seg(line: usize, start: usize, end: usize) -> Segment {
    Segment { line, start, end }
}

pub static TD3_LAYOUT: LayoutDescriptor = LayoutDescriptor {
    format: DocumentFormat::TD3,
    spans: &[
        span(Field::IssuingState, 0, 2, 5, SpanKind::Alpha, None),
        span(Field::Names, 0, 5, 44, SpanKind::Alpha, None),
        span(Field::DocumentNumber, 1, 0, 9, SpanKind::Alnum, Some(9)),
        span(Field::Nationality, 1, 10, 13, SpanKind::Alpha, None),
        span(Field::BirthDate, 1, 13, 19, SpanKind::Numeric, Some(19)),
        span(Field::Sex, 1, 20, 21, SpanKind::Alpha, None),
        span(Field::ExpiryDate, 1, 21, 27, SpanKind::Numeric, Some(27)),
        span(Field::OptionalData, 1, 28, 42, SpanKind::FreeForm, Some(42)),
    ],
    composite: &[seg(1, 0, 10), seg(1, 13, 20), seg(1, 21, 43)],
    composite_check: (1, 43),
};

pub static TD2_LAYOUT: LayoutDescriptor = LayoutDescriptor {
    format: DocumentFormat::TD2,
    spans: &[
        span(Field::IssuingState, 0, 2, 5, SpanKind::Alpha, None),
        span(Field::Names, 0, 5, 36, SpanKind::Alpha, None),
        span(Field::DocumentNumber, 1, 0, 9, SpanKind::Alnum, Some(9)),
        span(Field::Nationality, 1, 10, 13, SpanKind::Alpha, None),
        span(Field::BirthDate, 1, 13, 19, SpanKind::Numeric, Some(19)),
        span(Field::Sex, 1, 20, 21, SpanKind::Alpha, None),
        span(Field::ExpiryDate, 1, 21, 27, SpanKind::Numeric, Some(27)),
        span(Field::OptionalData, 1, 28, 35, SpanKind::FreeForm, None),
    ],
    composite: &[seg(1, 0, 10), seg(1, 13, 20), seg(1, 21, 35)],
    composite_check: (1, 35),
};

pub static TD1_LAYOUT: LayoutDescriptor = LayoutDescriptor {
    format: DocumentFormat::TD1,
    spans: &[
        span(Field::IssuingState, 0, 2, 5, SpanKind::Alpha, None),
        span(Field::DocumentNumber, 0, 5, 14, SpanKind::Alnum, Some(14)),
        span(Field::OptionalData, 0, 15, 30, SpanKind::FreeForm, None),
        span(Field::BirthDate, 1, 0, 6, SpanKind::Numeric, Some(6)),
        span(Field::Sex, 1, 7, 8, SpanKind::Alpha, None),
        span(Field::ExpiryDate, 1, 8, 14, SpanKind::Numeric, Some(14)),
        span(Field::Nationality, 1, 15, 18, SpanKind::Alpha, None),
        span(Field::OptionalDataSecondary, 1, 18, 29, SpanKind::FreeForm, None),
        span(Field::Names, 2, 0, 30, SpanKind::Alpha, None),
    ],
    composite: &[seg(0, 5, 30), seg(1, 0, 29)],
    composite_check: (1, 29),
};

pub static CN_CARD_LAYOUT: LayoutDescriptor = LayoutDescriptor {
    format: DocumentFormat::CNCard,
    spans: &[
        span(Field::DocumentNumber, 0, 2, 11, SpanKind::Alnum, Some(11)),
        span(Field::ExpiryDate, 0, 13, 19, SpanKind::Numeric, Some(19)),
        span(Field::BirthDate, 0, 21, 27, SpanKind::Numeric, Some(27)),
    ],
    composite: &[seg(0, 2, 12), seg(0, 13, 20), seg(0, 21, 28)],
    composite_check: (0, 28),
};

pub fn descriptor_for(format: DocumentFormat) -> Option<&'static LayoutDescriptor> {
    match format {
        DocumentFormat::TD3 | DocumentFormat::MRVA => Some(&TD3_LAYOUT),
        DocumentFormat::TD2 | DocumentFormat::MRVB => Some(&TD2_LAYOUT),
        DocumentFormat::TD1 => Some(&TD1_LAYOUT),
        DocumentFormat::CNCard => Some(&CN_CARD_LAYOUT),
        DocumentFormat::Unknown => None,
    }
}

/// Everything one extraction pass yields.
pub struct Extraction {
    pub fields: DecodedFields,
    pub validations: ValidationSet,
    pub calc_logs: Vec<String>,
    pub lines: Vec<String>,
}

pub struct LayoutEngine;

impl LayoutEngine {
    /// Slice a line by character offsets; total over short or empty lines.
    fn slice(line: &str, start: usize, end: usize) -> String {
        line.chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    fn char_at(line: &str, pos: usize) -> char {
        line.chars().nth(pos).unwrap_or(FILLER)
    }

    fn label(field: Field) -> &'static str {
        match field {
            Field::DocumentNumber => "DOCUMENT NUMBER",
            Field::IssuingState => "ISSUING STATE",
            Field::Nationality => "NATIONALITY",
            Field::BirthDate => "BIRTH DATE",
            Field::Sex => "SEX",
            Field::ExpiryDate => "EXPIRY DATE",
            Field::OptionalData => "OPTIONAL DATA",
            Field::OptionalDataSecondary => "OPTIONAL DATA 2",
            Field::Names => "NAMES",
        }
    }

    /// Auto-fix character ranges per line, derived from the layout's own
    /// field grammar. Check-digit positions count as numeric; free-form
    /// optional-data spans are never listed.
    fn fix_ranges(desc: &LayoutDescriptor, line_count: usize) -> Vec<(Vec<Range<usize>>, Vec<Range<usize>>)> {
        let mut per_line = vec![(Vec::new(), Vec::new()); line_count];
        for s in desc.spans {
            if s.line >= line_count {
                continue;
            }
            match s.kind {
                SpanKind::Numeric => per_line[s.line].0.push(s.start..s.end),
                SpanKind::Alpha => per_line[s.line].1.push(s.start..s.end),
                SpanKind::Alnum | SpanKind::FreeForm => {}
            }
            if let Some(pos) = s.check {
                per_line[s.line].0.push(pos..pos + 1);
            }
        }
        let (line, pos) = desc.composite_check;
        if line < line_count {
            per_line[line].0.push(pos..pos + 1);
        }
        per_line
    }

    /// Split a raw name span on the double-filler separator, then replace
    /// fillers with single spaces and trim. A missing given-names segment
    /// yields an empty string, not a missing value.
    fn split_names(raw: &str) -> (String, String) {
        let clean = |part: &str| {
            part.split(FILLER)
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        };
        match raw.split_once("<<") {
            Some((surname, given)) => (clean(surname), clean(given)),
            None => (clean(raw), String::new()),
        }
    }

    /// Generic extraction: slice every declared span, run one checksum per
    /// protected field plus the composite, and report the validity set.
    /// Decoding is permissive; failed checks never abort extraction.
    pub fn extract(desc: &LayoutDescriptor, input_lines: &[String], auto_fix: bool) -> Extraction {
        let mut lines: Vec<String> = input_lines.to_vec();
        // The TD1 name line is optional; synthesize fillers so extraction
        // never indexes past end of input.
        if desc.format == DocumentFormat::TD1 && lines.len() == 2 {
            lines.push(FILLER.to_string().repeat(30));
        }

        if auto_fix {
            let ranges = Self::fix_ranges(desc, lines.len());
            for (i, line) in lines.iter_mut().enumerate() {
                let fixed = AutoFixer::fix_line(line, &ranges[i].0, &ranges[i].1);
                if fixed != *line {
                    log::debug!("autofix rewrote line {}: {} -> {}", i + 1, line, fixed);
                }
                *line = fixed;
            }
        }

        let mut fields = DecodedFields::default();
        let mut validations = ValidationSet::default();
        let mut calc_logs = Vec::new();

        let first_line = lines.first().map(String::as_str).unwrap_or("");
        fields.document_type_raw = Some(Self::slice(first_line, 0, 2));

        for s in desc.spans {
            let line = lines.get(s.line).map(String::as_str).unwrap_or("");
            let raw = Self::slice(line, s.start, s.end);

            if let Some(pos) = s.check {
                let actual = Self::char_at(line, pos);
                let result = ChecksumEngine::check(&raw, actual);
                calc_logs.push(format!(
                    "[{}] Check Digit: {} | Calculated: {} | Result: {}",
                    Self::label(s.field),
                    actual,
                    result.computed,
                    if result.valid { "OK" } else { "FAIL" }
                ));
                match s.field {
                    Field::DocumentNumber => validations.document_number = result.valid,
                    Field::BirthDate => validations.birth_date = result.valid,
                    Field::ExpiryDate => validations.expiry_date = result.valid,
                    Field::OptionalData => validations.optional_data = Some(result.valid),
                    _ => {}
                }
            }

            match s.field {
                Field::DocumentNumber => fields.document_number = Some(raw),
                Field::IssuingState => fields.issuing_state = Some(raw),
                Field::Nationality => fields.nationality = Some(raw),
                Field::BirthDate => fields.birth_date = Some(raw),
                Field::Sex => fields.sex = Some(raw),
                Field::ExpiryDate => fields.expiry_date = Some(raw),
                Field::OptionalData => fields.optional_data = Some(raw),
                Field::OptionalDataSecondary => fields.optional_data_secondary = Some(raw),
                Field::Names => {
                    let (surname, given) = Self::split_names(&raw);
                    fields.surname = Some(surname);
                    fields.given_names = Some(given);
                }
            }
        }

        let composite_span: String = desc
            .composite
            .iter()
            .map(|s| {
                let line = lines.get(s.line).map(String::as_str).unwrap_or("");
                Self::slice(line, s.start, s.end)
            })
            .collect();
        let (check_line, check_pos) = desc.composite_check;
        let actual = Self::char_at(
            lines.get(check_line).map(String::as_str).unwrap_or(""),
            check_pos,
        );
        let result = ChecksumEngine::check(&composite_span, actual);
        validations.composite = result.valid;
        fields.composite_check = Some(actual.to_string());
        calc_logs.push(format!(
            "[COMPOSITE] Check Digit: {} | Calculated: {} | Result: {}",
            actual,
            result.computed,
            if result.valid { "OK" } else { "FAIL" }
        ));

        Extraction {
            fields,
            validations,
            calc_logs,
            lines,
        }
    }
}
