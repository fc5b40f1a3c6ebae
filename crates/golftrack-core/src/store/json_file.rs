use crate::error::GolfResult;
use crate::model::{Course, Round};
use crate::store::{
    default_courses, AnalysisCache, RoundStore, UserPreferences, ALL_KEYS, ANALYSIS_CACHE_KEY,
    COURSES_KEY, PREFERENCES_KEY, ROUNDS_KEY,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Store that keeps one pretty-printed JSON document per key in a directory.
///
/// Unreadable or corrupt documents are logged and treated as absent, so a
/// damaged file never blocks access to the rest of the data.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> GolfResult<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read stored data");
                return Ok(None);
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => {
                debug!(key, "loaded stored data");
                Ok(Some(value))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt stored data");
                Ok(None)
            }
        }
    }

    /// Write to a sibling temp file, then rename it over the old document so a
    /// crash mid-write leaves the previous version intact.
    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> GolfResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &path)?;

        debug!(key, "saved data");
        Ok(())
    }
}

impl RoundStore for JsonFileStore {
    fn courses(&self) -> GolfResult<Vec<Course>> {
        let courses: Vec<Course> = self.read(COURSES_KEY)?.unwrap_or_default();
        if courses.is_empty() {
            let seeded = default_courses();
            self.save_courses(&seeded)?;
            return Ok(seeded);
        }
        Ok(courses)
    }

    fn save_courses(&self, courses: &[Course]) -> GolfResult<()> {
        self.write(COURSES_KEY, courses)
    }

    fn rounds(&self) -> GolfResult<Vec<Round>> {
        Ok(self.read(ROUNDS_KEY)?.unwrap_or_default())
    }

    fn save_rounds(&self, rounds: &[Round]) -> GolfResult<()> {
        self.write(ROUNDS_KEY, rounds)
    }

    fn preferences(&self) -> GolfResult<UserPreferences> {
        Ok(self.read(PREFERENCES_KEY)?.unwrap_or_default())
    }

    fn save_preferences(&self, preferences: &UserPreferences) -> GolfResult<()> {
        self.write(PREFERENCES_KEY, preferences)
    }

    fn analysis_cache(&self) -> GolfResult<Option<AnalysisCache>> {
        self.read(ANALYSIS_CACHE_KEY)
    }

    fn save_analysis_cache(&self, cache: &AnalysisCache) -> GolfResult<()> {
        self.write(ANALYSIS_CACHE_KEY, cache)
    }

    fn clear(&self) -> GolfResult<()> {
        for key in ALL_KEYS {
            let path = self.path_for(key);
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
