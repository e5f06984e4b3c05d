pub mod autofix;
pub mod classify;
pub mod format;
pub mod layouts;

pub use autofix::AutoFixer;
pub use classify::CountryClassifier;
pub use format::FormatDetector;
pub use layouts::{descriptor_for, Extraction, LayoutEngine};
