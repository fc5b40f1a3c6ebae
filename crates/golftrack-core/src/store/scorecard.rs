use crate::analyzer::report::AnalysisResult;
use crate::analyzer::AnalysisProvider;
use crate::error::{GolfError, GolfResult};
use crate::model::{find_course, Course, HoleScore, Round};
use crate::store::{AnalysisCache, RoundStore};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Course and round bookkeeping on top of a [`RoundStore`].
///
/// Every operation reads the current data from the store, applies one change
/// and writes it back.
pub struct Scorecard<S: RoundStore> {
    store: S,
}

impl<S: RoundStore> Scorecard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_course(&self, course: Course) -> GolfResult<Course> {
        course.validate()?;
        let mut courses = self.store.courses()?;
        if find_course(&courses, &course.id).is_some() {
            return Err(GolfError::InvalidCourse(format!(
                "a course with id '{}' already exists",
                course.id
            )));
        }
        courses.push(course.clone());
        self.store.save_courses(&courses)?;
        info!(course = %course.id, "created course");
        Ok(course)
    }

    pub fn update_course(&self, course: Course) -> GolfResult<Course> {
        course.validate()?;
        let mut courses = self.store.courses()?;
        let slot = courses
            .iter_mut()
            .find(|c| c.id == course.id)
            .ok_or_else(|| GolfError::CourseNotFound(course.id.clone()))?;
        *slot = course.clone();
        self.store.save_courses(&courses)?;
        Ok(course)
    }

    /// Delete a course. Rounds played on it are kept; analysis skips them.
    pub fn delete_course(&self, course_id: &str) -> GolfResult<()> {
        let mut courses = self.store.courses()?;
        let before = courses.len();
        courses.retain(|c| c.id != course_id);
        if courses.len() == before {
            return Err(GolfError::CourseNotFound(course_id.to_string()));
        }
        self.store.save_courses(&courses)
    }

    pub fn start_round(&self, course_id: &str, date: DateTime<Utc>) -> GolfResult<Round> {
        let courses = self.store.courses()?;
        if find_course(&courses, course_id).is_none() {
            return Err(GolfError::CourseNotFound(course_id.to_string()));
        }

        let round = Round::start(course_id, date);
        let mut rounds = self.store.rounds()?;
        rounds.push(round.clone());
        self.store.save_rounds(&rounds)?;
        info!(round = %round.id, course = course_id, "started round");
        Ok(round)
    }

    /// The most recently dated round that hasn't been completed.
    pub fn current_round(&self) -> GolfResult<Option<Round>> {
        Ok(self
            .store
            .rounds()?
            .into_iter()
            .filter(|r| !r.completed)
            .max_by_key(|r| r.date))
    }

    pub fn round(&self, round_id: &str) -> GolfResult<Round> {
        self.store
            .rounds()?
            .into_iter()
            .find(|r| r.id == round_id)
            .ok_or_else(|| GolfError::RoundNotFound(round_id.to_string()))
    }

    /// Record (or overwrite) the score for one hole of an open round.
    pub fn record_score(&self, round_id: &str, score: HoleScore) -> GolfResult<Round> {
        if score.strokes < 1 {
            return Err(GolfError::InvalidScore(format!(
                "hole {}: strokes must be at least 1",
                score.hole_number
            )));
        }

        let courses = self.store.courses()?;
        let mut rounds = self.store.rounds()?;
        let round = rounds
            .iter_mut()
            .find(|r| r.id == round_id)
            .ok_or_else(|| GolfError::RoundNotFound(round_id.to_string()))?;

        if round.completed {
            return Err(GolfError::RoundCompleted(round_id.to_string()));
        }

        let course = find_course(&courses, &round.course_id)
            .ok_or_else(|| GolfError::CourseNotFound(round.course_id.clone()))?;
        if course.hole(score.hole_number).is_none() {
            return Err(GolfError::InvalidScore(format!(
                "course '{}' has no hole {}",
                course.name, score.hole_number
            )));
        }

        debug!(round = round_id, hole = score.hole_number, strokes = score.strokes, "recording score");
        round.upsert_score(score);
        let updated = round.clone();
        self.store.save_rounds(&rounds)?;
        Ok(updated)
    }

    pub fn complete_round(&self, round_id: &str) -> GolfResult<Round> {
        let mut rounds = self.store.rounds()?;
        let round = rounds
            .iter_mut()
            .find(|r| r.id == round_id)
            .ok_or_else(|| GolfError::RoundNotFound(round_id.to_string()))?;

        if round.completed {
            return Err(GolfError::RoundCompleted(round_id.to_string()));
        }

        round.completed = true;
        let completed = round.clone();
        self.store.save_rounds(&rounds)?;
        info!(round = round_id, "completed round");
        Ok(completed)
    }

    pub fn delete_round(&self, round_id: &str) -> GolfResult<()> {
        let mut rounds = self.store.rounds()?;
        let before = rounds.len();
        rounds.retain(|r| r.id != round_id);
        if rounds.len() == before {
            return Err(GolfError::RoundNotFound(round_id.to_string()));
        }
        self.store.save_rounds(&rounds)
    }

    /// Analyze the stored history, reusing the cached result while it still
    /// covers the same completed rounds. `refresh` forces a new analysis.
    pub fn analysis(
        &self,
        provider: &impl AnalysisProvider,
        refresh: bool,
        now: DateTime<Utc>,
    ) -> GolfResult<AnalysisResult> {
        let rounds = self.store.rounds()?;

        if !refresh {
            if let Some(cache) = self.store.analysis_cache()? {
                if cache.is_fresh_for(&rounds) {
                    debug!(generated = %cache.last_generated, "using cached analysis");
                    return Ok(cache.result);
                }
            }
        }

        let courses = self.store.courses()?;
        let result = provider.analyze(&rounds, &courses);
        self.store
            .save_analysis_cache(&AnalysisCache::new(result.clone(), &rounds, now))?;
        Ok(result)
    }
}
