//! Menu photo analysis.
//!
//! Control flow per request:
//! preprocess → ordered model fallback → payload extraction → normalization,
//! with the fixed sample analysis substituted whenever no model answer is
//! usable.
//!
//! # Submodules
//!
//! - `models`: canonical result types.
//! - `preprocess`: resize and JPEG re-encode for model input.
//! - `extract`: recovery of the JSON payload from completion text.
//! - `normalize`: coercion of untrusted payloads into the canonical shape.
//! - `mock`: fixed sample analysis.
//! - `pipeline`: the `MenuAnalyzer` tying it together.

pub mod extract;
pub mod mock;
pub mod models;
pub mod normalize;
mod pipeline;
pub mod preprocess;
pub mod prompt;

pub use mock::sample_analysis;
pub use models::{AnalyzeResponse, MenuAnalysis, MenuItem, Recommendation};
pub use pipeline::MenuAnalyzer;
