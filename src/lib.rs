pub mod mining;
pub mod models;
pub mod mrz_processor;
pub mod processing;
pub mod utils;
pub mod validation;

pub use mrz_processor::MrzProcessor;
