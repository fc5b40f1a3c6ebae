pub mod analyzer;
pub mod error;
pub mod model;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyzer::report::{
    AnalysisResult, Priority, ProblemArea, ProblemCategory, Recommendation, Severity, Trend,
};
pub use analyzer::{analyze, AnalysisProvider, RulesBasedAnalyzer};
pub use error::{GolfError, GolfResult};
pub use model::{Course, Hole, HoleScore, Round};
pub use stats::{build_trend_series, calculate_statistics, ScoreStatistics, TrendPoint};
pub use store::{JsonFileStore, MemoryStore, RoundStore, Scorecard};
