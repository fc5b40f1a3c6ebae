use serde::{Deserialize, Serialize};

/// Severity level for a detected problem area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn weight(&self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

/// Part of the game a problem area belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemCategory {
    Putting,
    Driving,
    ShortGame,
    /// Scoring consistency and course management.
    Approach,
}

impl ProblemCategory {
    pub fn label(&self) -> &str {
        match self {
            ProblemCategory::Putting => "Putting",
            ProblemCategory::Driving => "Driving",
            ProblemCategory::ShortGame => "Short Game",
            ProblemCategory::Approach => "Consistency",
        }
    }

    /// Lowercase comment fragments that count as a signal for this category.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ProblemCategory::Putting => &["putt", "green", "3-putt"],
            ProblemCategory::Driving => &["drive", "tee", "slice", "hook", "ob", "rough"],
            ProblemCategory::ShortGame => &["chip", "pitch", "bunker", "sand", "wedge"],
            ProblemCategory::Approach => &[],
        }
    }

    /// Case-insensitive substring match of a hole comment against the keyword set.
    pub fn matches_comment(&self, comment: &str) -> bool {
        let lower = comment.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(k))
    }
}

/// Direction of recent scoring relative to earlier rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn label(&self) -> &str {
        match self {
            Trend::Improving => "Improving",
            Trend::Declining => "Declining",
            Trend::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn symbol(&self) -> &str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

/// A weakness found in the recent rounds, with the hole-level evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemArea {
    pub category: ProblemCategory,
    pub severity: Severity,
    pub description: String,
    pub evidence: Vec<String>,
}

/// A practice suggestion derived from a problem area or the scoring trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drills: Option<Vec<String>>,
}

/// The complete diagnosis for a player's round history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_trend: Trend,
    pub problem_areas: Vec<ProblemArea>,
    pub recommendations: Vec<Recommendation>,
    pub strengths: Vec<String>,
}

impl AnalysisResult {
    /// Result for a history without any completed rounds.
    pub fn empty() -> Self {
        Self {
            overall_trend: Trend::Stable,
            problem_areas: Vec::new(),
            recommendations: Vec::new(),
            strengths: Vec::new(),
        }
    }

    /// True when there was nothing to analyze; a real analysis always names a strength.
    pub fn is_empty(&self) -> bool {
        self.problem_areas.is_empty() && self.recommendations.is_empty() && self.strengths.is_empty()
    }

    pub fn high_count(&self) -> usize {
        self.problem_areas.iter().filter(|p| p.severity == Severity::High).count()
    }

    pub fn medium_count(&self) -> usize {
        self.problem_areas.iter().filter(|p| p.severity == Severity::Medium).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        assert!(ProblemCategory::Putting.matches_comment("Three PUTT from the fringe"));
        assert!(ProblemCategory::Driving.matches_comment("Went OB left"));
        assert!(ProblemCategory::ShortGame.matches_comment("bladed the Wedge"));
        assert!(!ProblemCategory::ShortGame.matches_comment("great drive"));
        assert!(!ProblemCategory::Approach.matches_comment("anything"));
    }

    #[test]
    fn test_serialized_names() {
        let result = AnalysisResult {
            overall_trend: Trend::Declining,
            problem_areas: vec![ProblemArea {
                category: ProblemCategory::ShortGame,
                severity: Severity::High,
                description: "d".to_string(),
                evidence: vec![],
            }],
            recommendations: vec![],
            strengths: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallTrend"], "declining");
        assert_eq!(json["problemAreas"][0]["category"], "short_game");
        assert_eq!(json["problemAreas"][0]["severity"], "high");
        assert!(!result.is_empty());
        assert_eq!(result.high_count(), 1);
        assert_eq!(result.medium_count(), 0);
    }

    #[test]
    fn test_empty_result() {
        let result = AnalysisResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.overall_trend, Trend::Stable);
    }

    #[test]
    fn test_severity_weights_are_ordered() {
        assert!(Severity::High.weight() > Severity::Medium.weight());
        assert!(Severity::Medium.weight() > Severity::Low.weight());
    }
}
