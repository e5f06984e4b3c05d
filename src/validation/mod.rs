pub mod checksum;
pub mod dates;

pub use checksum::{CheckResult, ChecksumEngine, FILLER};
pub use dates::{DateDeriver, DateKind};
