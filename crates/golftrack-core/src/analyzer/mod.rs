pub mod problem_detector;
pub mod recommendations;
pub mod report;
pub mod strengths;
pub mod trend;

use crate::model::{find_course, saturating_i32, Course, Round};
use report::AnalysisResult;
use tracing::{debug, warn};

/// Number of most recent completed rounds used for problem and strength detection.
pub const RECENT_WINDOW: usize = 5;

/// Something that can turn a round history into an [`AnalysisResult`].
pub trait AnalysisProvider {
    fn analyze(&self, rounds: &[Round], courses: &[Course]) -> AnalysisResult;
}

/// The built-in heuristic analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesBasedAnalyzer;

impl AnalysisProvider for RulesBasedAnalyzer {
    fn analyze(&self, rounds: &[Round], courses: &[Course]) -> AnalysisResult {
        analyze(rounds, courses)
    }
}

/// Run all detectors on a round history and produce a unified result.
///
/// Only completed rounds are considered. Problems and strengths come from the
/// [`RECENT_WINDOW`] latest rounds; the trend uses the whole history.
pub fn analyze(rounds: &[Round], courses: &[Course]) -> AnalysisResult {
    let completed: Vec<&Round> = rounds.iter().filter(|r| r.completed).collect();
    if completed.is_empty() {
        return AnalysisResult::empty();
    }

    unresolved_rounds(&completed, courses);
    let recent = recent_rounds(&completed, RECENT_WINDOW);
    debug!(
        completed = completed.len(),
        recent = recent.len(),
        "analyzing round history"
    );

    let problem_areas = problem_detector::detect_problems(&recent, courses);
    let overall_trend = trend::analyze_trend(&completed, courses);
    let recommendations = recommendations::generate_recommendations(&problem_areas, overall_trend);
    let strengths = strengths::identify_strengths(&recent, courses);

    AnalysisResult {
        overall_trend,
        problem_areas,
        recommendations,
        strengths,
    }
}

/// The `count` latest rounds, newest first. Rounds on the same date keep input order.
pub fn recent_rounds<'a>(rounds: &[&'a Round], count: usize) -> Vec<&'a Round> {
    let mut sorted = rounds.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(count);
    sorted
}

/// Rounds whose course is gone. Each one is logged once; the course-based
/// checks leave them out while comment-only checks still read them.
pub(crate) fn unresolved_rounds<'a>(rounds: &[&'a Round], courses: &[Course]) -> Vec<&'a Round> {
    let missing: Vec<&Round> = rounds
        .iter()
        .copied()
        .filter(|r| find_course(courses, &r.course_id).is_none())
        .collect();
    for round in &missing {
        warn!(round = %round.id, course = %round.course_id, "skipping round on unknown course");
    }
    missing
}

/// Score-to-par for a whole round, charging par 4 for holes the course lacks.
pub(crate) fn round_score_to_par(round: &Round, course: &Course) -> i32 {
    let strokes: i64 = round.scores.iter().map(|s| i64::from(s.strokes)).sum();
    let par: i64 = round
        .scores
        .iter()
        .map(|s| i64::from(course.par_for(s.hole_number)))
        .sum();
    saturating_i32(strokes - par)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::report::{ProblemCategory, Severity, Trend};
    use crate::test_support::{par_72_course, round_on, scored_round, RoundExt};

    #[test]
    fn test_no_rounds() {
        assert_eq!(analyze(&[], &[]), AnalysisResult::empty());
    }

    #[test]
    fn test_only_in_progress_rounds() {
        let course = par_72_course("c1");
        let mut round = round_on(&course, 1, 12).with_comment_on(1, "3-putt");
        round.completed = false;
        assert_eq!(analyze(&[round], &[course]), AnalysisResult::empty());
    }

    #[test]
    fn test_recent_window_is_newest_first() {
        let course = par_72_course("c1");
        let rounds: Vec<Round> = [3, 9, 1, 7, 5, 2, 8]
            .iter()
            .map(|d| round_on(&course, *d, 0))
            .collect();
        let refs: Vec<&Round> = rounds.iter().collect();
        let recent = recent_rounds(&refs, RECENT_WINDOW);
        let ids: Vec<&str> = recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c1-day9", "c1-day8", "c1-day7", "c1-day5", "c1-day3"]);
    }

    #[test]
    fn test_old_problems_fall_outside_window() {
        let course = par_72_course("c1");
        let mut rounds: Vec<Round> = (1..=5).map(|d| round_on(&course, d + 10, 0)).collect();
        rounds.push(
            round_on(&course, 1, 0)
                .with_comment_on(3, "chip")
                .with_comment_on(4, "bunker"),
        );
        let result = analyze(&rounds, &[course]);
        assert!(result.problem_areas.is_empty());
    }

    #[test]
    fn test_round_score_to_par_falls_back_to_par_four() {
        let course = par_72_course("c1");
        let mut round = round_on(&course, 1, 3);
        round.upsert_score(crate::model::HoleScore::new(19, 6));
        assert_eq!(round_score_to_par(&round, &course), 5);
    }

    #[test]
    fn test_full_diagnosis() {
        let course = par_72_course("c1");
        let mut rounds: Vec<Round> = (1..=3).map(|d| round_on(&course, d, 2)).collect();
        rounds.extend((4..=6).map(|d| {
            round_on(&course, d, 14)
                .with_comment_on(8, "sliced drive into the rough")
                .with_comment_on(10, "another slice")
        }));

        let result = analyze(&rounds, &[course]);
        assert_eq!(result.overall_trend, Trend::Declining);
        assert_eq!(result.problem_areas.len(), 1);
        assert_eq!(result.problem_areas[0].category, ProblemCategory::Driving);
        assert_eq!(result.problem_areas[0].severity, Severity::Medium);
        let categories: Vec<&str> = result
            .recommendations
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Driving Accuracy", "General Improvement"]);
        assert!(!result.strengths.is_empty());
    }

    #[test]
    fn test_recent_window_keeps_input_order_on_equal_dates() {
        let course = par_72_course("c1");
        let mut first = round_on(&course, 4, 0);
        first.id = "first".to_string();
        let mut second = round_on(&course, 4, 3);
        second.id = "second".to_string();
        let older = round_on(&course, 1, 0);
        let rounds = [&older, &first, &second];

        let ids: Vec<&str> = recent_rounds(&rounds, 2).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_unresolved_rounds_are_reported() {
        let course = par_72_course("c1");
        let kept = round_on(&course, 1, 0);
        let mut orphan = round_on(&course, 2, 0);
        orphan.course_id = "closed".to_string();

        let missing = unresolved_rounds(&[&kept, &orphan], &[course]);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].id, orphan.id);
    }

    #[test]
    fn test_huge_stroke_counts_do_not_panic() {
        let course = par_72_course("c1");
        let round = scored_round(&course, 1, &[(1, 3_000_000_000), (2, 3_000_000_000)]);
        let rounds: Vec<Round> = (1..=3)
            .map(|d| {
                let mut r = round.clone();
                r.id = format!("huge-{}", d);
                r.date = r.date + chrono::Duration::days(d);
                r
            })
            .collect();

        let result = analyze(&rounds, &[course]);
        assert_eq!(result.overall_trend, Trend::Stable);
        assert!(result
            .problem_areas
            .iter()
            .any(|p| p.category == ProblemCategory::Driving && p.severity == Severity::High));
    }

    #[test]
    fn test_provider_matches_free_function() {
        let course = par_72_course("c1");
        let rounds: Vec<Round> = (1..=4).map(|d| round_on(&course, d, d as u32)).collect();
        let courses = vec![course];
        assert_eq!(
            RulesBasedAnalyzer.analyze(&rounds, &courses),
            analyze(&rounds, &courses)
        );
    }
}
