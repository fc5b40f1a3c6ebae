use crate::analyzer::report::Trend;
use crate::analyzer::round_score_to_par;
use crate::model::{find_course, Course, Round};
use tracing::debug;

/// Number of latest rounds compared against the rest of the history.
pub const RECENT_TREND_ROUNDS: usize = 3;

/// Change in mean score-to-par (strokes) needed to call a trend.
const TREND_THRESHOLD: f64 = 2.0;

/// Classify the scoring trend over the full completed history.
///
/// The last three rounds by date are compared with every earlier round;
/// rounds whose course can't be resolved are left out.
pub fn analyze_trend(rounds: &[&Round], courses: &[Course]) -> Trend {
    if rounds.len() < RECENT_TREND_ROUNDS {
        return Trend::Stable;
    }

    let mut scored: Vec<(chrono::DateTime<chrono::Utc>, i32)> = rounds
        .iter()
        .filter_map(|round| {
            let course = find_course(courses, &round.course_id)?;
            Some((round.date, round_score_to_par(round, course)))
        })
        .collect();

    if scored.len() < RECENT_TREND_ROUNDS {
        return Trend::Stable;
    }

    scored.sort_by_key(|(date, _)| *date);
    let (older, recent) = scored.split_at(scored.len() - RECENT_TREND_ROUNDS);
    if older.is_empty() {
        return Trend::Stable;
    }

    let difference = mean(recent) - mean(older);
    debug!(difference, older = older.len(), "trend comparison");

    if difference < -TREND_THRESHOLD {
        Trend::Improving
    } else if difference > TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

fn mean<T>(points: &[(T, i32)]) -> f64 {
    points.iter().map(|(_, s)| *s as f64).sum::<f64>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{par_72_course, round_on};

    fn trend_for(sequence: &[u32]) -> Trend {
        let course = par_72_course("c1");
        let rounds: Vec<Round> = sequence
            .iter()
            .enumerate()
            .map(|(day, over)| round_on(&course, day as i64, *over))
            .collect();
        let refs: Vec<&Round> = rounds.iter().collect();
        analyze_trend(&refs, &[course])
    }

    #[test]
    fn test_improving() {
        assert_eq!(trend_for(&[10, 10, 10, 0, 0, 0]), Trend::Improving);
    }

    #[test]
    fn test_declining() {
        assert_eq!(trend_for(&[0, 0, 0, 10, 10, 10]), Trend::Declining);
    }

    #[test]
    fn test_flat_is_stable() {
        assert_eq!(trend_for(&[2, 2, 2, 2, 2, 2]), Trend::Stable);
    }

    #[test]
    fn test_three_rounds_have_no_history() {
        assert_eq!(trend_for(&[20, 10, 0]), Trend::Stable);
    }

    #[test]
    fn test_difference_of_exactly_two_is_stable() {
        assert_eq!(trend_for(&[4, 2, 2, 2]), Trend::Stable);
        assert_eq!(trend_for(&[0, 2, 2, 2]), Trend::Stable);
    }

    #[test]
    fn test_sorted_by_date_not_input_order() {
        let course = par_72_course("c1");
        let rounds: Vec<Round> = [(5, 0), (1, 10), (6, 0), (2, 10), (4, 0), (3, 10)]
            .iter()
            .map(|(day, over)| round_on(&course, *day, *over))
            .collect();
        let refs: Vec<&Round> = rounds.iter().collect();
        assert_eq!(analyze_trend(&refs, &[course]), Trend::Improving);
    }

    #[test]
    fn test_unresolved_courses_are_skipped() {
        let course = par_72_course("c1");
        let mut rounds: Vec<Round> = [10, 10, 0, 0]
            .iter()
            .enumerate()
            .map(|(day, over)| round_on(&course, day as i64, *over))
            .collect();
        rounds[0].course_id = "gone".to_string();
        rounds[1].course_id = "gone".to_string();
        let refs: Vec<&Round> = rounds.iter().collect();
        assert_eq!(analyze_trend(&refs, &[course]), Trend::Stable);
    }
}
