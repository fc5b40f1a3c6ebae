use crate::analyzer::report::{ProblemArea, ProblemCategory, Severity};
use crate::analyzer::round_score_to_par;
use crate::model::{find_course, Course, Round};
use tracing::debug;

/// Maximum evidence lines attached to a problem area.
pub const EVIDENCE_LIMIT: usize = 3;

type Detector = fn(&[&Round], &[Course]) -> Option<ProblemArea>;

/// Run every problem detector over the recent rounds.
///
/// Results are ordered by descending severity; equal severities keep detector
/// order (putting, driving, short game, consistency).
pub fn detect_problems(rounds: &[&Round], courses: &[Course]) -> Vec<ProblemArea> {
    let detectors: [Detector; 4] = [
        detect_putting_issues,
        detect_driving_issues,
        detect_short_game_issues,
        detect_consistency_issues,
    ];

    let mut problems: Vec<ProblemArea> = detectors
        .iter()
        .filter_map(|detect| detect(rounds, courses))
        .collect();

    problems.sort_by_key(|p| std::cmp::Reverse(p.severity.weight()));
    problems
}

/// Comment signals and "blow-up" holes gathered for one category.
#[derive(Debug, Default)]
struct HoleScan {
    signals: usize,
    eligible_holes: usize,
    struggles: usize,
    evidence: Vec<String>,
}

impl HoleScan {
    fn signal_rate(&self, round_count: usize) -> f64 {
        self.signals as f64 / round_count as f64
    }

    fn struggle_rate(&self) -> f64 {
        if self.eligible_holes == 0 {
            return 0.0;
        }
        self.struggles as f64 / self.eligible_holes as f64
    }

    fn take_evidence(self) -> Vec<String> {
        let mut evidence = self.evidence;
        evidence.truncate(EVIDENCE_LIMIT);
        evidence
    }
}

/// Walk every scored hole that resolves against its course, counting keyword
/// comments for `category` and holes that went more than one over par among
/// those selected by `eligible`.
fn scan_holes(
    rounds: &[&Round],
    courses: &[Course],
    category: ProblemCategory,
    eligible: impl Fn(u32) -> bool,
) -> HoleScan {
    let mut scan = HoleScan::default();

    for round in rounds {
        let Some(course) = find_course(courses, &round.course_id) else {
            continue;
        };

        for score in &round.scores {
            let Some(hole) = course.hole(score.hole_number) else {
                continue;
            };

            if let Some(comment) = &score.comment {
                if category.matches_comment(comment) {
                    scan.signals += 1;
                    scan.evidence
                        .push(format!("Hole {}: {}", score.hole_number, comment));
                }
            }

            if eligible(hole.par) {
                scan.eligible_holes += 1;
                if score.strokes > hole.par + 1 {
                    scan.struggles += 1;
                    scan.evidence.push(format!(
                        "Struggling on Par {} (Hole {}): {} over par",
                        hole.par,
                        score.hole_number,
                        score.strokes - hole.par
                    ));
                }
            }
        }
    }

    scan
}

/// Putting trouble shows up as putting comments and blow-ups on par 3s.
fn detect_putting_issues(rounds: &[&Round], courses: &[Course]) -> Option<ProblemArea> {
    if rounds.is_empty() {
        return None;
    }

    let scan = scan_holes(rounds, courses, ProblemCategory::Putting, |par| par == 3);
    let signal_rate = scan.signal_rate(rounds.len());
    let par3_rate = scan.struggle_rate();
    debug!(signal_rate, par3_rate, "putting detector");

    if signal_rate >= 1.5 || par3_rate >= 0.4 {
        let severity = if signal_rate >= 2.5 || par3_rate >= 0.6 {
            Severity::High
        } else {
            Severity::Medium
        };
        return Some(ProblemArea {
            category: ProblemCategory::Putting,
            severity,
            description: "Putting appears to be a significant challenge affecting your scores"
                .to_string(),
            evidence: scan.take_evidence(),
        });
    }

    None
}

/// Driving trouble shows up as tee-shot comments and blow-ups on par 4s and 5s.
fn detect_driving_issues(rounds: &[&Round], courses: &[Course]) -> Option<ProblemArea> {
    if rounds.is_empty() {
        return None;
    }

    let scan = scan_holes(rounds, courses, ProblemCategory::Driving, |par| par >= 4);
    let signal_rate = scan.signal_rate(rounds.len());
    let long_hole_rate = scan.struggle_rate();
    debug!(signal_rate, long_hole_rate, "driving detector");

    if signal_rate >= 1.0 || long_hole_rate >= 0.3 {
        let severity = if signal_rate >= 2.0 || long_hole_rate >= 0.5 {
            Severity::High
        } else {
            Severity::Medium
        };
        return Some(ProblemArea {
            category: ProblemCategory::Driving,
            severity,
            description: "Tee shots and driving accuracy appear to be impacting your performance"
                .to_string(),
            evidence: scan.take_evidence(),
        });
    }

    None
}

/// Short game trouble is read from comments alone, on every scored hole.
fn detect_short_game_issues(rounds: &[&Round], _courses: &[Course]) -> Option<ProblemArea> {
    if rounds.is_empty() {
        return None;
    }

    let mut signals = 0usize;
    let mut evidence = Vec::new();

    for score in rounds.iter().flat_map(|r| r.scores.iter()) {
        if let Some(comment) = &score.comment {
            if ProblemCategory::ShortGame.matches_comment(comment) {
                signals += 1;
                evidence.push(format!("Hole {}: {}", score.hole_number, comment));
            }
        }
    }

    let rate = signals as f64 / rounds.len() as f64;
    debug!(rate, "short game detector");

    if rate >= 1.0 {
        evidence.truncate(EVIDENCE_LIMIT);
        return Some(ProblemArea {
            category: ProblemCategory::ShortGame,
            severity: if rate >= 2.0 { Severity::High } else { Severity::Medium },
            description: "Short game skills (chipping, pitching, bunker play) need attention"
                .to_string(),
            evidence,
        });
    }

    None
}

/// Wide swings in round-to-round scoring point at course management.
fn detect_consistency_issues(rounds: &[&Round], courses: &[Course]) -> Option<ProblemArea> {
    if rounds.len() < 3 {
        return None;
    }

    let scores: Vec<i32> = rounds
        .iter()
        .filter_map(|round| {
            let course = find_course(courses, &round.course_id)?;
            Some(round_score_to_par(round, course))
        })
        .collect();

    if scores.len() < 3 {
        return None;
    }

    let n = scores.len() as f64;
    let mean = scores.iter().map(|s| *s as f64).sum::<f64>() / n;
    let variance = scores
        .iter()
        .map(|s| (*s as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();
    debug!(std_dev, rounds = scores.len(), "consistency detector");

    if std_dev <= 8.0 {
        return None;
    }

    let best = scores.iter().copied().min().unwrap_or_default();
    let worst = scores.iter().copied().max().unwrap_or_default();

    Some(ProblemArea {
        category: ProblemCategory::Approach,
        severity: if std_dev > 12.0 { Severity::High } else { Severity::Medium },
        description:
            "Inconsistent scoring patterns suggest focus on course management and mental game"
                .to_string(),
        evidence: vec![
            format!("Score variance: {:.1} strokes", std_dev),
            format!("Best: {}, Worst: {}", signed(best), signed(worst)),
        ],
    })
}

fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
