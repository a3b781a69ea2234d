pub mod analytics;
pub mod error;

pub use analytics::{AnalysisReport, run_analysis};
pub use error::{EngineError, EngineResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
