pub mod defaults;
pub mod json_file;
pub mod memory;
pub mod scorecard;

use crate::analyzer::report::AnalysisResult;
use crate::error::GolfResult;
use crate::model::{Course, Round};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use defaults::default_courses;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use scorecard::Scorecard;

pub const COURSES_KEY: &str = "golf_courses";
pub const ROUNDS_KEY: &str = "golf_rounds";
pub const PREFERENCES_KEY: &str = "golf_user_preferences";
pub const ANALYSIS_CACHE_KEY: &str = "golf_analysis_cache";

pub const ALL_KEYS: [&str; 4] = [COURSES_KEY, ROUNDS_KEY, PREFERENCES_KEY, ANALYSIS_CACHE_KEY];

/// Persistence for courses, rounds, preferences and the last analysis.
pub trait RoundStore {
    /// All courses. An empty store is seeded with [`default_courses`] first.
    fn courses(&self) -> GolfResult<Vec<Course>>;
    fn save_courses(&self, courses: &[Course]) -> GolfResult<()>;

    fn rounds(&self) -> GolfResult<Vec<Round>>;
    fn save_rounds(&self, rounds: &[Round]) -> GolfResult<()>;

    fn preferences(&self) -> GolfResult<UserPreferences>;
    fn save_preferences(&self, preferences: &UserPreferences) -> GolfResult<()>;

    fn analysis_cache(&self) -> GolfResult<Option<AnalysisCache>>;
    fn save_analysis_cache(&self, cache: &AnalysisCache) -> GolfResult<()>;

    /// Remove everything under every key.
    fn clear(&self) -> GolfResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Yards,
    Meters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tee_box: Option<String>,
    #[serde(default)]
    pub preferred_units: Units,
    #[serde(default = "default_true")]
    pub show_statistics: bool,
    #[serde(default = "default_true")]
    pub enable_notifications: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_tee_box: None,
            preferred_units: Units::Yards,
            show_statistics: true,
            enable_notifications: true,
        }
    }
}

/// A stored analysis and the completed rounds it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisCache {
    pub last_generated: DateTime<Utc>,
    pub result: AnalysisResult,
    pub rounds_analyzed: Vec<String>,
}

impl AnalysisCache {
    pub fn new(result: AnalysisResult, rounds: &[Round], generated: DateTime<Utc>) -> Self {
        Self {
            last_generated: generated,
            result,
            rounds_analyzed: completed_ids(rounds).into_iter().collect(),
        }
    }

    /// True when the cache covers exactly the completed rounds in `rounds`.
    pub fn is_fresh_for(&self, rounds: &[Round]) -> bool {
        let analyzed: BTreeSet<String> = self.rounds_analyzed.iter().cloned().collect();
        analyzed == completed_ids(rounds)
    }
}

fn completed_ids(rounds: &[Round]) -> BTreeSet<String> {
    rounds
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.id.clone())
        .collect()
}
