use crate::analyzer::report::{Priority, ProblemArea, ProblemCategory, Recommendation, Severity, Trend};

/// Cap on the number of recommendations in a result.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Turn detected problems and the trend into practice recommendations.
///
/// One record per problem in the order given, then at most one trend record.
/// The list is truncated to [`MAX_RECOMMENDATIONS`], so the trend record is
/// the first to go when five or more problems precede it.
pub fn generate_recommendations(problems: &[ProblemArea], trend: Trend) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> =
        problems.iter().map(recommendation_for).collect();

    recommendations.extend(trend_recommendation(trend));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn severity_priority(severity: Severity) -> Priority {
    if severity == Severity::High {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn recommendation_for(problem: &ProblemArea) -> Recommendation {
    let (category, priority, suggestion, drills): (&str, Priority, &str, [&str; 3]) =
        match problem.category {
            ProblemCategory::Putting => (
                "Putting Practice",
                severity_priority(problem.severity),
                "Focus on putting fundamentals and green reading",
                [
                    "Practice 6-foot putts until you can make 8 out of 10",
                    "Work on lag putting from 20+ feet",
                    "Practice reading greens before each putt",
                ],
            ),
            ProblemCategory::Driving => (
                "Driving Accuracy",
                severity_priority(problem.severity),
                "Improve tee shot consistency and accuracy",
                [
                    "Practice with alignment sticks at the range",
                    "Focus on tempo and balance in your swing",
                    "Consider course management and club selection",
                ],
            ),
            ProblemCategory::ShortGame => (
                "Short Game",
                severity_priority(problem.severity),
                "Develop better touch around the greens",
                [
                    "Practice chipping with different clubs",
                    "Work on bunker technique",
                    "Practice pitch shots with various trajectories",
                ],
            ),
            ProblemCategory::Approach => (
                "Consistency",
                Priority::Medium,
                "Focus on course management and mental game",
                [
                    "Develop a pre-shot routine",
                    "Practice course management decisions",
                    "Work on maintaining focus throughout the round",
                ],
            ),
        };

    Recommendation {
        category: category.to_string(),
        priority,
        suggestion: suggestion.to_string(),
        drills: Some(drills.iter().map(|d| d.to_string()).collect()),
    }
}

fn trend_recommendation(trend: Trend) -> Option<Recommendation> {
    match trend {
        Trend::Declining => Some(Recommendation {
            category: "General Improvement".to_string(),
            priority: Priority::High,
            suggestion:
                "Consider lessons with a PGA professional to address recent score increases"
                    .to_string(),
            drills: Some(vec![
                "Schedule a lesson to identify and fix swing issues".to_string()
            ]),
        }),
        Trend::Improving => Some(Recommendation {
            category: "Maintain Progress".to_string(),
            priority: Priority::Low,
            suggestion: "Keep up the good work! Continue current practice routine".to_string(),
            drills: Some(vec!["Maintain consistent practice schedule".to_string()]),
        }),
        Trend::Stable => None,
    }
}
