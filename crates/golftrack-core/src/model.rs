use crate::error::{GolfError, GolfResult};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Par assumed for a score whose hole is missing from its course.
pub const FALLBACK_PAR: u32 = 4;

pub const MIN_YARDAGE: u32 = 50;
pub const MAX_YARDAGE: u32 = 800;

/// A single hole on a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub number: u32,
    pub par: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yardage: Option<u32>,
}

impl Hole {
    pub fn new(number: u32, par: u32) -> Self {
        Self { number, par, yardage: None }
    }

    pub fn with_yardage(mut self, yardage: u32) -> Self {
        self.yardage = Some(yardage);
        self
    }
}

/// A course definition. `total_par` is kept equal to the sum of hole pars
/// by [`Course::new`] and [`Course::set_hole`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub holes: Vec<Hole>,
    pub total_par: u32,
}

impl Course {
    /// Build and validate a new course with a freshly generated id.
    pub fn new(name: impl Into<String>, holes: Vec<Hole>) -> GolfResult<Self> {
        Self::with_id(ulid::Ulid::new().to_string(), name, holes)
    }

    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        holes: Vec<Hole>,
    ) -> GolfResult<Self> {
        let total_par = holes.iter().map(|h| h.par).sum();
        let course = Self {
            id: id.into(),
            name: name.into(),
            holes,
            total_par,
        };
        course.validate()?;
        Ok(course)
    }

    pub fn hole(&self, number: u32) -> Option<&Hole> {
        self.holes.iter().find(|h| h.number == number)
    }

    /// Par of the given hole, or [`FALLBACK_PAR`] when the course has no such hole.
    pub fn par_for(&self, number: u32) -> u32 {
        self.hole(number).map_or(FALLBACK_PAR, |h| h.par)
    }

    /// Replace (or append) a hole and recompute the course par.
    pub fn set_hole(&mut self, hole: Hole) -> GolfResult<()> {
        validate_hole(&hole)?;
        match self.holes.iter_mut().find(|h| h.number == hole.number) {
            Some(existing) => *existing = hole,
            None => {
                self.holes.push(hole);
                self.holes.sort_by_key(|h| h.number);
            }
        }
        self.total_par = self.holes.iter().map(|h| h.par).sum();
        Ok(())
    }

    pub fn validate(&self) -> GolfResult<()> {
        if self.name.trim().is_empty() {
            return Err(GolfError::InvalidCourse("course name is required".to_string()));
        }
        if self.holes.is_empty() {
            return Err(GolfError::InvalidCourse(format!(
                "course '{}' has no holes",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for hole in &self.holes {
            if !seen.insert(hole.number) {
                return Err(GolfError::InvalidCourse(format!(
                    "hole {} appears more than once",
                    hole.number
                )));
            }
            validate_hole(hole)?;
        }

        let sum: u32 = self.holes.iter().map(|h| h.par).sum();
        if sum != self.total_par {
            return Err(GolfError::InvalidCourse(format!(
                "total par {} does not match hole pars ({})",
                self.total_par, sum
            )));
        }

        Ok(())
    }
}

fn validate_hole(hole: &Hole) -> GolfResult<()> {
    if hole.number == 0 {
        return Err(GolfError::InvalidCourse("hole numbers start at 1".to_string()));
    }
    if !(3..=5).contains(&hole.par) {
        return Err(GolfError::InvalidCourse(format!(
            "hole {} has par {}; par must be 3, 4 or 5",
            hole.number, hole.par
        )));
    }
    if let Some(yardage) = hole.yardage {
        if yardage < MIN_YARDAGE {
            return Err(GolfError::InvalidCourse(format!(
                "hole {}: yardage must be at least {} yards",
                hole.number, MIN_YARDAGE
            )));
        }
        if yardage > MAX_YARDAGE {
            return Err(GolfError::InvalidCourse(format!(
                "hole {}: yardage cannot exceed {} yards",
                hole.number, MAX_YARDAGE
            )));
        }
    }
    Ok(())
}

/// Narrow a wide stroke difference, pinning it at the `i32` bounds.
pub fn saturating_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Look up a course by id.
pub fn find_course<'a>(courses: &'a [Course], id: &str) -> Option<&'a Course> {
    courses.iter().find(|c| c.id == id)
}

/// Strokes taken on one hole of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleScore {
    pub hole_number: u32,
    pub strokes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl HoleScore {
    pub fn new(hole_number: u32, strokes: u32) -> Self {
        Self {
            hole_number,
            strokes,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        let trimmed = comment.trim();
        self.comment = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

/// A round of golf on one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub course_id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub scores: Vec<HoleScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Round {
    /// Start a new, empty round on the given course.
    pub fn start(course_id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            course_id: course_id.into(),
            date,
            scores: Vec::new(),
            comments: None,
            completed: false,
        }
    }

    pub fn score_for(&self, hole_number: u32) -> Option<&HoleScore> {
        self.scores.iter().find(|s| s.hole_number == hole_number)
    }

    /// Insert a score, replacing any existing score for the same hole.
    pub fn upsert_score(&mut self, score: HoleScore) {
        match self
            .scores
            .iter_mut()
            .find(|s| s.hole_number == score.hole_number)
        {
            Some(existing) => *existing = score,
            None => self.scores.push(score),
        }
    }

    pub fn total_strokes(&self) -> u64 {
        self.scores.iter().map(|s| u64::from(s.strokes)).sum()
    }
}

/// Read a JSON file holding either a single course or an array of courses.
pub fn load_courses_file(path: &Path) -> anyhow::Result<Vec<Course>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read course file: {}", path.display()))?;

    let value: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse course JSON")?;

    let courses: Vec<Course> = if value.is_array() {
        serde_json::from_value(value).context("Course array has an unexpected shape")?
    } else {
        vec![serde_json::from_value(value).context("Course object has an unexpected shape")?]
    };

    for course in &courses {
        course
            .validate()
            .with_context(|| format!("Course '{}' failed validation", course.id))?;
    }

    Ok(courses)
}
