use crate::model::{find_course, saturating_i32, Course, Round};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hole reference with its score relative to par.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleResult {
    pub hole_number: u32,
    pub score_to_par: i32,
}

/// Score and par aggregates for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStatistics {
    pub total_score: u32,
    pub total_par: u32,
    pub score_to_par: i32,
    pub birdies: u32,
    pub eagles: u32,
    pub pars: u32,
    pub bogeys: u32,
    pub double_bogeys: u32,
    pub others: u32,
    pub best_hole: HoleResult,
    pub worst_hole: HoleResult,
}

/// Reduce a round to score/par aggregates against its course.
///
/// Scores for hole numbers the course doesn't have are skipped. Best and worst
/// hole both start at `{hole 1, 0}` and only move on a strictly better
/// (resp. worse) hole, so a round with nothing under par reports a best hole
/// of hole 1 at even. Totals too large for the report fields saturate.
pub fn calculate_statistics(round: &Round, course: &Course) -> ScoreStatistics {
    let baseline = HoleResult {
        hole_number: 1,
        score_to_par: 0,
    };
    let mut stats = ScoreStatistics {
        total_score: 0,
        total_par: 0,
        score_to_par: 0,
        birdies: 0,
        eagles: 0,
        pars: 0,
        bogeys: 0,
        double_bogeys: 0,
        others: 0,
        best_hole: baseline,
        worst_hole: baseline,
    };

    let mut total_score = 0u64;
    let mut total_par = 0u64;

    for score in &round.scores {
        let Some(hole) = course.hole(score.hole_number) else {
            continue;
        };

        total_score += u64::from(score.strokes);
        total_par += u64::from(hole.par);

        let to_par = saturating_i32(i64::from(score.strokes) - i64::from(hole.par));
        match to_par {
            i32::MIN..=-2 => stats.eagles += 1,
            -1 => stats.birdies += 1,
            0 => stats.pars += 1,
            1 => stats.bogeys += 1,
            2 => stats.double_bogeys += 1,
            _ => stats.others += 1,
        }

        if to_par < stats.best_hole.score_to_par {
            stats.best_hole = HoleResult {
                hole_number: score.hole_number,
                score_to_par: to_par,
            };
        }
        if to_par > stats.worst_hole.score_to_par {
            stats.worst_hole = HoleResult {
                hole_number: score.hole_number,
                score_to_par: to_par,
            };
        }
    }

    stats.total_score = u32::try_from(total_score).unwrap_or(u32::MAX);
    stats.total_par = u32::try_from(total_par).unwrap_or(u32::MAX);
    stats.score_to_par = saturating_i32(total_score as i64 - total_par as i64);
    stats
}

/// One point of a player's scoring history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub score: u32,
    pub score_to_par: i32,
    pub round_id: String,
}

/// Project completed rounds into a chronological series of score points.
/// Rounds whose course can't be found are dropped; equal dates keep input order.
pub fn build_trend_series(rounds: &[Round], courses: &[Course]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = rounds
        .iter()
        .filter(|r| r.completed)
        .filter_map(|round| {
            let course = find_course(courses, &round.course_id)?;
            let stats = calculate_statistics(round, course);
            Some(TrendPoint {
                date: round.date,
                score: stats.total_score,
                score_to_par: stats.score_to_par,
                round_id: round.id.clone(),
            })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}

/// `E` for even, otherwise a signed number.
pub fn format_score_to_par(score_to_par: i32) -> String {
    match score_to_par {
        0 => "E".to_string(),
        n if n > 0 => format!("+{}", n),
        n => n.to_string(),
    }
}

/// Golf name for a single-hole result.
pub fn score_label(score_to_par: i32) -> String {
    match score_to_par {
        -2 => "Eagle".to_string(),
        -1 => "Birdie".to_string(),
        0 => "Par".to_string(),
        1 => "Bogey".to_string(),
        2 => "Double Bogey".to_string(),
        n if n > 2 => format!("+{}", n),
        n => n.to_string(),
    }
}

const HANDICAP_MIN_ROUNDS: usize = 5;
const HANDICAP_WINDOW: usize = 20;
const HANDICAP_MAX_COUNTED: usize = 8;

/// Simplified handicap index.
///
/// Uses score-to-par as the differential (no course rating or slope): the best
/// 40% (at most 8) of the last 20 completed rounds, averaged and scaled by 0.96.
/// Returns `None` with fewer than five usable rounds.
pub fn calculate_handicap_index(rounds: &[Round], courses: &[Course]) -> Option<f64> {
    let completed: Vec<&Round> = rounds.iter().filter(|r| r.completed).collect();
    if completed.len() < HANDICAP_MIN_ROUNDS {
        return None;
    }

    let start = completed.len().saturating_sub(HANDICAP_WINDOW);
    let mut differentials: Vec<i32> = completed[start..]
        .iter()
        .filter_map(|round| {
            let course = find_course(courses, &round.course_id)?;
            Some(calculate_statistics(round, course).score_to_par)
        })
        .collect();

    if differentials.len() < HANDICAP_MIN_ROUNDS {
        return None;
    }

    differentials.sort_unstable();
    let count = HANDICAP_MAX_COUNTED.min((differentials.len() as f64 * 0.4).floor() as usize);
    let best = &differentials[..count];
    let average = best.iter().map(|d| *d as f64).sum::<f64>() / best.len() as f64;

    Some(round_half_up(average * 0.96 * 10.0) / 10.0)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Hole, HoleScore};
    use chrono::TimeZone;

    fn course() -> Course {
        Course::with_id(
            "c1",
            "Test",
            vec![Hole::new(1, 4), Hole::new(2, 5), Hole::new(3, 3)],
        )
        .unwrap()
    }

    fn round(id: &str, day: u32, strokes: &[(u32, u32)]) -> Round {
        let mut round = Round::start("c1", Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap());
        round.id = id.to_string();
        round.completed = true;
        for (hole, s) in strokes {
            round.upsert_score(HoleScore::new(*hole, *s));
        }
        round
    }

    #[test]
    fn test_par_and_eagle() {
        let stats = calculate_statistics(&round("r", 1, &[(1, 4), (2, 3)]), &course());
        assert_eq!(stats.total_score, 7);
        assert_eq!(stats.total_par, 9);
        assert_eq!(stats.score_to_par, -2);
        assert_eq!(stats.eagles, 1);
        assert_eq!(stats.pars, 1);
        assert_eq!(stats.birdies, 0);
        assert_eq!(stats.best_hole, HoleResult { hole_number: 2, score_to_par: -2 });
    }

    #[test]
    fn test_unknown_holes_are_skipped() {
        let stats = calculate_statistics(&round("r", 1, &[(1, 5), (9, 12)]), &course());
        assert_eq!(stats.total_score, 5);
        assert_eq!(stats.total_par, 4);
        assert_eq!(stats.bogeys, 1);
        assert_eq!(stats.others, 0);
    }

    #[test]
    fn test_best_hole_keeps_initial_value_without_under_par() {
        let stats = calculate_statistics(&round("r", 1, &[(2, 6), (3, 5)]), &course());
        assert_eq!(stats.best_hole, HoleResult { hole_number: 1, score_to_par: 0 });
        assert_eq!(stats.worst_hole, HoleResult { hole_number: 3, score_to_par: 2 });
    }

    #[test]
    fn test_worst_hole_first_strictly_highest_wins() {
        let stats = calculate_statistics(&round("r", 1, &[(1, 7), (2, 8), (3, 4)]), &course());
        assert_eq!(stats.worst_hole, HoleResult { hole_number: 1, score_to_par: 3 });
        assert_eq!(stats.others, 2);
        assert_eq!(stats.bogeys, 1);
    }

    #[test]
    fn test_exactly_one_bucket_per_hole() {
        for par in 3..=5u32 {
            let c = Course::with_id("c1", "One", vec![Hole::new(1, par)]).unwrap();
            for strokes in 1..=12u32 {
                let stats = calculate_statistics(&round("r", 1, &[(1, strokes)]), &c);
                let buckets = stats.eagles
                    + stats.birdies
                    + stats.pars
                    + stats.bogeys
                    + stats.double_bogeys
                    + stats.others;
                assert_eq!(buckets, 1, "par {} strokes {}", par, strokes);
                assert_eq!(stats.score_to_par, strokes as i32 - par as i32);
            }
        }
    }

    #[test]
    fn test_totals_match_per_hole_sum() {
        let r = round("r", 1, &[(1, 6), (2, 4), (3, 2)]);
        let c = course();
        let stats = calculate_statistics(&r, &c);
        let per_hole: i32 = r
            .scores
            .iter()
            .map(|s| s.strokes as i32 - c.par_for(s.hole_number) as i32)
            .sum();
        assert_eq!(stats.score_to_par, per_hole);
    }

    #[test]
    fn test_trend_series_sorted_and_filtered() {
        let mut in_progress = round("open", 1, &[(1, 4)]);
        in_progress.completed = false;
        let mut orphan = round("orphan", 2, &[(1, 4)]);
        orphan.course_id = "missing".to_string();

        let rounds = vec![
            round("late", 20, &[(1, 5)]),
            in_progress,
            round("early", 3, &[(1, 4)]),
            orphan,
            round("tie", 20, &[(1, 6)]),
        ];

        let series = build_trend_series(&rounds, &[course()]);
        let ids: Vec<&str> = series.iter().map(|p| p.round_id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "tie"]);
        assert_eq!(series[2].score_to_par, 2);
    }

    #[test]
    fn test_huge_stroke_counts_saturate() {
        let stats = calculate_statistics(
            &round("r", 1, &[(1, 3_000_000_000), (2, 3_000_000_000)]),
            &course(),
        );
        assert_eq!(stats.total_score, u32::MAX);
        assert_eq!(stats.total_par, 9);
        assert_eq!(stats.score_to_par, i32::MAX);
        assert_eq!(stats.others, 2);
        assert_eq!(stats.worst_hole, HoleResult { hole_number: 1, score_to_par: i32::MAX });
    }

    #[test]
    fn test_trend_series_empty() {
        assert!(build_trend_series(&[], &[]).is_empty());
    }

    #[test]
    fn test_format_score_to_par() {
        assert_eq!(format_score_to_par(0), "E");
        assert_eq!(format_score_to_par(3), "+3");
        assert_eq!(format_score_to_par(-2), "-2");
    }

    #[test]
    fn test_score_label() {
        assert_eq!(score_label(-2), "Eagle");
        assert_eq!(score_label(2), "Double Bogey");
        assert_eq!(score_label(4), "+4");
        assert_eq!(score_label(-3), "-3");
    }

    #[test]
    fn test_handicap_needs_five_rounds() {
        let rounds: Vec<Round> = (1..=4).map(|d| round("r", d, &[(1, 5)])).collect();
        assert_eq!(calculate_handicap_index(&rounds, &[course()]), None);
    }

    #[test]
    fn test_handicap_uses_best_differentials() {
        // differentials: 1, 2, 3, 4, 5 -> best two are 1 and 2
        let rounds: Vec<Round> = (1..=5)
            .map(|d| round(&format!("r{}", d), d, &[(1, 4 + d)]))
            .collect();
        let index = calculate_handicap_index(&rounds, &[course()]).unwrap();
        assert!((index - 1.4).abs() < 1e-9, "got {}", index);
    }
}
