use crate::analyzer::round_score_to_par;
use crate::model::{find_course, Course, Round};

pub const FALLBACK_STRENGTH: &str = "Consistent effort and dedication to improving your game.";

const PAR3_STRENGTH: &str = "Strong performance on Par 3s - good iron play and putting";
const PAR5_STRENGTH: &str = "Consistent scoring on Par 5s - good course management";
const LOW_HANDICAP_STRENGTH: &str = "Maintaining single-digit handicap level scoring";

/// Identify what is going well in the recent rounds. Never empty.
pub fn identify_strengths(rounds: &[&Round], courses: &[Course]) -> Vec<String> {
    let mut strengths = Vec::new();

    let mut par3s = 0usize;
    let mut good_par3s = 0usize;
    let mut par5s = 0usize;
    let mut good_par5s = 0usize;

    for round in rounds {
        let Some(course) = find_course(courses, &round.course_id) else {
            continue;
        };
        for score in &round.scores {
            let Some(hole) = course.hole(score.hole_number) else {
                continue;
            };
            match hole.par {
                3 => {
                    par3s += 1;
                    if score.strokes <= hole.par {
                        good_par3s += 1;
                    }
                }
                5 => {
                    par5s += 1;
                    if score.strokes <= hole.par + 1 {
                        good_par5s += 1;
                    }
                }
                _ => {}
            }
        }
    }

    if par3s > 0 && good_par3s as f64 / par3s as f64 >= 0.6 {
        strengths.push(PAR3_STRENGTH.to_string());
    }

    if par5s > 0 && good_par5s as f64 / par5s as f64 >= 0.7 {
        strengths.push(PAR5_STRENGTH.to_string());
    }

    if average_score_to_par(rounds, courses).is_some_and(|avg| avg < 5.0) {
        strengths.push(LOW_HANDICAP_STRENGTH.to_string());
    }

    if strengths.is_empty() {
        strengths.push(FALLBACK_STRENGTH.to_string());
    }

    strengths
}

/// Mean score-to-par over rounds that resolve to a course and have strokes recorded.
pub fn average_score_to_par(rounds: &[&Round], courses: &[Course]) -> Option<f64> {
    let per_round: Vec<i32> = rounds
        .iter()
        .filter_map(|round| {
            let course = find_course(courses, &round.course_id)?;
            (round.total_strokes() > 0).then(|| round_score_to_par(round, course))
        })
        .collect();

    if per_round.is_empty() {
        return None;
    }

    Some(per_round.iter().map(|s| *s as f64).sum::<f64>() / per_round.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Hole;
    use crate::test_support::{par_72_course, round_on, scored_round, RoundExt};

    #[test]
    fn test_solid_round_finds_all_three() {
        let course = par_72_course("c1");
        let round = round_on(&course, 1, 2);
        let strengths = identify_strengths(&[&round], &[course]);
        assert_eq!(
            strengths,
            vec![PAR3_STRENGTH.to_string(), PAR5_STRENGTH.to_string(), LOW_HANDICAP_STRENGTH.to_string()]
        );
    }

    #[test]
    fn test_par3_ratio_threshold() {
        let course = par_72_course("c1");
        // Two of four par 3s over par: 0.5 < 0.6.
        let round = round_on(&course, 1, 0).with_strokes(5, 4).with_strokes(7, 4);
        let strengths = identify_strengths(&[&round], &[course]);
        assert!(!strengths.contains(&PAR3_STRENGTH.to_string()));
        assert!(strengths.contains(&PAR5_STRENGTH.to_string()));
    }

    #[test]
    fn test_fallback_when_nothing_qualifies() {
        let course = Course::with_id("fours", "All Fours", (1..=9).map(|n| Hole::new(n, 4)).collect())
            .unwrap();
        let round = scored_round(&course, 1, &[(1, 6), (2, 6), (3, 5), (4, 5)]);
        let strengths = identify_strengths(&[&round], &[course]);
        assert_eq!(strengths, vec![FALLBACK_STRENGTH.to_string()]);
    }

    #[test]
    fn test_average_ignores_empty_and_orphan_rounds() {
        let course = par_72_course("c1");
        let empty = scored_round(&course, 1, &[]);
        let mut orphan = round_on(&course, 2, 30);
        orphan.course_id = "nowhere".to_string();
        let played = round_on(&course, 3, 8);

        let avg = average_score_to_par(&[&empty, &orphan, &played], &[course]).unwrap();
        assert!((avg - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_none_without_data() {
        assert_eq!(average_score_to_par(&[], &[]), None);
    }
}
