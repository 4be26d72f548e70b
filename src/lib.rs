// Library surface for the correction engine and the file-processing shell.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod correct;
pub mod file_processor;
pub mod report;
pub mod stats;

pub use correct::{CorrectedLine, Correction, Dictionary, LineCorrector, WordCorrector};
