//! Round and course builders shared by unit tests.

use crate::model::{Course, HoleScore, Round};
use crate::store::default_courses;
use chrono::{Duration, TimeZone, Utc};

/// The first seeded layout (par 72; par 3s on 5, 7, 12, 17; par 5s on 2, 6, 14, 18).
pub fn par_72_course(id: &str) -> Course {
    let mut course = default_courses().remove(0);
    course.id = id.to_string();
    course
}

fn day_of(day: i64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(day)
}

/// A completed round with every hole scored, `over` strokes above par in total.
/// Extra strokes are spread one per hole in hole order, wrapping around.
pub fn round_on(course: &Course, day: i64, over: u32) -> Round {
    let mut round = Round::start(course.id.clone(), day_of(day));
    round.id = format!("{}-day{}", course.id, day);
    round.completed = true;

    let holes = course.holes.len() as u32;
    for (i, hole) in course.holes.iter().enumerate() {
        let i = i as u32;
        let extra = over / holes + u32::from(i < over % holes);
        round.upsert_score(HoleScore::new(hole.number, hole.par + extra));
    }
    round
}

/// A completed round containing only the given `(hole, strokes)` scores.
pub fn scored_round(course: &Course, day: i64, strokes: &[(u32, u32)]) -> Round {
    let mut round = Round::start(course.id.clone(), day_of(day));
    round.id = format!("{}-day{}", course.id, day);
    round.completed = true;
    for (hole, s) in strokes {
        round.upsert_score(HoleScore::new(*hole, *s));
    }
    round
}

pub trait RoundExt {
    fn with_comment_on(self, hole: u32, comment: &str) -> Self;
    fn with_strokes(self, hole: u32, strokes: u32) -> Self;
}

impl RoundExt for Round {
    fn with_comment_on(mut self, hole: u32, comment: &str) -> Self {
        if let Some(score) = self.scores.iter_mut().find(|s| s.hole_number == hole) {
            score.comment = Some(comment.to_string());
        }
        self
    }

    fn with_strokes(mut self, hole: u32, strokes: u32) -> Self {
        if let Some(score) = self.scores.iter_mut().find(|s| s.hole_number == hole) {
            score.strokes = strokes;
        }
        self
    }
}
