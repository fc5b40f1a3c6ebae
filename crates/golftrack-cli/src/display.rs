use colored::*;
use golftrack_core::model::{find_course, saturating_i32};
use golftrack_core::stats::{format_score_to_par, score_label, ScoreStatistics, TrendPoint};
use golftrack_core::store::{Units, UserPreferences};
use golftrack_core::{
    AnalysisResult, Course, Priority, ProblemArea, Recommendation, Round, Severity, Trend,
};

/// Print a full analysis result to the terminal.
pub fn print_analysis_result(result: &AnalysisResult, completed_rounds: usize) {
    println!();
    println!(
        "{}",
        format!(
            " golftrack v{} — Performance Analysis ({} completed round{})",
            env!("CARGO_PKG_VERSION"),
            completed_rounds,
            if completed_rounds == 1 { "" } else { "s" }
        )
        .bold()
    );
    println!();

    if result.is_empty() {
        println!(
            " {} Complete at least one round to get insights into your game.",
            "--".dimmed()
        );
        println!();
        return;
    }

    let trend = match result.overall_trend {
        Trend::Improving => result.overall_trend.label().green().bold(),
        Trend::Declining => result.overall_trend.label().red().bold(),
        Trend::Stable => result.overall_trend.label().cyan().bold(),
    };
    println!(" {} {}", "Overall trend:".bold(), trend);
    println!("   {} {}", "|".dimmed(), trend_message(result.overall_trend));
    println!();

    println!(" {}", "=".repeat(60).dimmed());
    println!();

    println!(" {}", "Strengths".bold().underline());
    for strength in &result.strengths {
        println!(" {} {}", "|-".dimmed(), strength.green());
    }
    println!();

    println!(" {}", "Problem Areas".bold().underline());
    if result.problem_areas.is_empty() {
        println!(
            " {} No significant problem areas detected. Keep it up!",
            "OK".green().bold()
        );
    } else {
        for problem in &result.problem_areas {
            print_problem(problem);
            println!();
        }
    }
    println!();

    if !result.recommendations.is_empty() {
        println!(" {}", "Recommendations".bold().underline());
        for recommendation in &result.recommendations {
            print_recommendation(recommendation);
            println!();
        }
    }

    println!(" {}", "=".repeat(60).dimmed());
    println!(
        " {} {} high, {} medium",
        "Problems:".dimmed(),
        result.high_count(),
        result.medium_count()
    );
    println!();
}

fn trend_message(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "Your recent rounds are better than your earlier ones.",
        Trend::Declining => "Your recent rounds are higher than your earlier ones.",
        Trend::Stable => "Your scoring has been steady.",
    }
}

fn print_problem(problem: &ProblemArea) {
    let tag = format!(" {} ", problem.severity.symbol());
    let tag = match problem.severity {
        Severity::High => tag.on_red().white().bold().to_string(),
        Severity::Medium => tag.on_yellow().black().bold().to_string(),
        Severity::Low => tag.dimmed().to_string(),
    };

    println!(" {} {}", tag, problem.category.label().bold());
    println!("   {} {}", "|".dimmed(), problem.description);
    for line in &problem.evidence {
        println!("   {} {}", "|".dimmed(), line.dimmed());
    }
}

fn print_recommendation(recommendation: &Recommendation) {
    let tag = format!(" {} ", recommendation.priority.symbol());
    let tag = match recommendation.priority {
        Priority::High => tag.on_red().white().bold().to_string(),
        Priority::Medium => tag.on_blue().white().bold().to_string(),
        Priority::Low => tag.dimmed().to_string(),
    };

    println!(" {} {}", tag, recommendation.category.bold());
    println!("   {} {}", "|".dimmed(), recommendation.suggestion);
    if let Some(drills) = &recommendation.drills {
        for drill in drills {
            println!("   {} - {}", "|".dimmed(), drill.cyan());
        }
    }
}

pub fn print_courses(courses: &[Course], units: Units) {
    println!();
    println!(" {}", "Courses".bold().underline());
    for course in courses {
        let length = course_length(course, units)
            .map(|l| format!(", {}", l))
            .unwrap_or_default();
        println!(
            " {} {} {} ({} holes, par {}{})",
            "|-".dimmed(),
            course.id.cyan(),
            course.name.bold(),
            course.holes.len(),
            course.total_par,
            length
        );
    }
    println!();
}

/// Total course length when every hole has a yardage.
fn course_length(course: &Course, units: Units) -> Option<String> {
    let yards: u32 = course
        .holes
        .iter()
        .map(|h| h.yardage)
        .sum::<Option<u32>>()?;
    Some(match units {
        Units::Yards => format!("{} yds", yards),
        Units::Meters => format!("{:.0} m", yards as f64 * 0.9144),
    })
}

pub fn print_preferences(prefs: &UserPreferences) {
    let units = match prefs.preferred_units {
        Units::Yards => "yards",
        Units::Meters => "meters",
    };
    println!();
    println!(" {}", "Preferences".bold().underline());
    println!(
        " {} default tee box: {}",
        "|-".dimmed(),
        prefs.default_tee_box.as_deref().unwrap_or("-")
    );
    println!(" {} units: {}", "|-".dimmed(), units);
    println!(" {} show statistics: {}", "|-".dimmed(), prefs.show_statistics);
    println!(" {} notifications: {}", "|-".dimmed(), prefs.enable_notifications);
    println!();
}

pub fn print_rounds(rounds: &[(Round, Option<ScoreStatistics>)], courses: &[Course]) {
    println!();
    println!(" {}", "Rounds".bold().underline());
    if rounds.is_empty() {
        println!(" {} No rounds recorded yet.", "--".dimmed());
    }
    for (round, stats) in rounds {
        let course_name = find_course(courses, &round.course_id)
            .map(|c| c.name.as_str())
            .unwrap_or("unknown course");
        let score = match stats {
            Some(s) => format!("{} ({})", s.total_score, colored_to_par(s.score_to_par)),
            None => "-".to_string(),
        };
        let status = if round.completed {
            "done".green().to_string()
        } else {
            "in progress".yellow().to_string()
        };
        println!(
            " {} {} {} {} {} [{}]",
            "|-".dimmed(),
            round.date.format("%Y-%m-%d"),
            round.id.cyan(),
            course_name,
            score,
            status
        );
    }
    println!();
}

/// Print a hole-by-hole scorecard, with the scoring breakdown when `stats` is given.
pub fn print_scorecard(round: &Round, course: &Course, stats: Option<&ScoreStatistics>) {
    println!();
    println!(
        "{}",
        format!(" {} — {}", course.name, round.date.format("%Y-%m-%d")).bold()
    );
    println!();

    for hole in &course.holes {
        match round.score_for(hole.number) {
            Some(score) => {
                let to_par = saturating_i32(i64::from(score.strokes) - i64::from(hole.par));
                println!(
                    " {} Hole {:>2}  par {}  {:>2}  {}{}",
                    "|-".dimmed(),
                    hole.number,
                    hole.par,
                    score.strokes,
                    score_label(to_par),
                    score
                        .comment
                        .as_ref()
                        .map(|c| format!("  \"{}\"", c).dimmed().to_string())
                        .unwrap_or_default()
                );
            }
            None => println!(
                " {} Hole {:>2}  par {}   {}",
                "|-".dimmed(),
                hole.number,
                hole.par,
                "-".dimmed()
            ),
        }
    }

    let Some(stats) = stats else {
        println!();
        return;
    };

    println!();
    println!(
        " {} {} strokes, par {} ({})",
        "Total:".bold(),
        stats.total_score,
        stats.total_par,
        colored_to_par(stats.score_to_par)
    );
    println!(
        " {} {} eagles, {} birdies, {} pars, {} bogeys, {} doubles, {} worse",
        "|-".dimmed(),
        stats.eagles,
        stats.birdies,
        stats.pars,
        stats.bogeys,
        stats.double_bogeys,
        stats.others
    );
    println!(
        " {} Best hole: {} ({}), worst hole: {} ({})",
        "|-".dimmed(),
        stats.best_hole.hole_number,
        format_score_to_par(stats.best_hole.score_to_par),
        stats.worst_hole.hole_number,
        format_score_to_par(stats.worst_hole.score_to_par)
    );
    println!();
}

pub fn print_trend(points: &[TrendPoint]) {
    println!();
    println!(" {}", "Scoring Trend".bold().underline());
    if points.is_empty() {
        println!(" {} No completed rounds yet.", "--".dimmed());
    }
    for point in points {
        let bar_len = point.score_to_par.clamp(0, 40) as usize;
        println!(
            " {} {}  {:>3}  {:>4}  {}",
            "|-".dimmed(),
            point.date.format("%Y-%m-%d"),
            point.score,
            colored_to_par(point.score_to_par),
            "#".repeat(bar_len).dimmed()
        );
    }
    println!();
}

pub fn print_handicap(index: Option<f64>) {
    println!();
    match index {
        Some(index) => println!(" {} {:.1}", "Handicap index:".bold(), index),
        None => println!(
            " {} Play at least 5 completed rounds to calculate a handicap index.",
            "--".dimmed()
        ),
    }
    println!();
}

fn colored_to_par(score_to_par: i32) -> String {
    let text = format_score_to_par(score_to_par);
    match score_to_par {
        n if n < 0 => text.green().to_string(),
        0 => text.normal().to_string(),
        _ => text.red().to_string(),
    }
}
