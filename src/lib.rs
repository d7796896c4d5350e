//! PSQI Score - scoring engine for Pittsburgh Sleep Quality Index exports
//!
//! Transforms raw, loosely-structured questionnaire responses into
//! standardized scores through a deterministic pipeline: row extraction →
//! field normalization → component scoring → aggregation and export.
//!
//! The scoring core is total: free-text answers it cannot understand degrade
//! to the most conservative score instead of failing the batch. The only
//! fallible stage is extraction, which reports structural problems (missing
//! columns, empty sheets) as a single batch error.

pub mod error;
pub mod export;
pub mod extractor;
pub mod normalizer;
pub mod pipeline;
pub mod scorer;
pub mod types;

pub use error::ExtractError;
pub use export::{BatchReport, ComponentAverages, ReportEncoder};
pub use pipeline::{score_batch, score_csv_path, score_record};
pub use types::{ClockTime, ComponentScores, RawRecord, ScoreResult, SleepRating};

/// Engine version embedded in batch reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for batch reports
pub const ENGINE_NAME: &str = "psqi-score";
