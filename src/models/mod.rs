pub mod data;
pub mod rules;

pub use data::{
    DecodedFields, DocumentClass, DocumentFormat, ExtendedData, MrzResult, ParsedInfo,
    RiskFinding, RiskSeverity, ValidationSet,
};
