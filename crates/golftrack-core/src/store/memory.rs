use crate::error::GolfResult;
use crate::model::{Course, Round};
use crate::store::{default_courses, AnalysisCache, RoundStore, UserPreferences};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    courses: Vec<Course>,
    rounds: Vec<Round>,
    preferences: Option<UserPreferences>,
    analysis_cache: Option<AnalysisCache>,
}

/// In-process store, for tests and for embedding the scorecard without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(courses: Vec<Course>, rounds: Vec<Round>) -> Self {
        Self {
            state: Mutex::new(State {
                courses,
                rounds,
                ..State::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RoundStore for MemoryStore {
    fn courses(&self) -> GolfResult<Vec<Course>> {
        let mut state = self.state();
        if state.courses.is_empty() {
            state.courses = default_courses();
        }
        Ok(state.courses.clone())
    }

    fn save_courses(&self, courses: &[Course]) -> GolfResult<()> {
        self.state().courses = courses.to_vec();
        Ok(())
    }

    fn rounds(&self) -> GolfResult<Vec<Round>> {
        Ok(self.state().rounds.clone())
    }

    fn save_rounds(&self, rounds: &[Round]) -> GolfResult<()> {
        self.state().rounds = rounds.to_vec();
        Ok(())
    }

    fn preferences(&self) -> GolfResult<UserPreferences> {
        Ok(self.state().preferences.clone().unwrap_or_default())
    }

    fn save_preferences(&self, preferences: &UserPreferences) -> GolfResult<()> {
        self.state().preferences = Some(preferences.clone());
        Ok(())
    }

    fn analysis_cache(&self) -> GolfResult<Option<AnalysisCache>> {
        Ok(self.state().analysis_cache.clone())
    }

    fn save_analysis_cache(&self, cache: &AnalysisCache) -> GolfResult<()> {
        self.state().analysis_cache = Some(cache.clone());
        Ok(())
    }

    fn clear(&self) -> GolfResult<()> {
        *self.state() = State::default();
        Ok(())
    }
}
