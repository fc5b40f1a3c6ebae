mod config;
mod display;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::OutputFormat;
use golftrack_core::model::{find_course, load_courses_file};
use golftrack_core::stats::calculate_handicap_index;
use golftrack_core::store::{Units, UserPreferences};
use golftrack_core::{
    build_trend_series, calculate_statistics, GolfError, HoleScore, JsonFileStore, Round,
    RoundStore, RulesBasedAnalyzer, Scorecard,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "golftrack",
    version,
    about = "golftrack — Golf round tracker & performance analyzer",
    long_about = "Record your rounds hole by hole and get a rules-based read on where you lose strokes.\n\nScores, comments and courses are stored as JSON in a local data directory."
)]
struct Cli {
    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage courses
    Courses {
        #[command(subcommand)]
        action: CoursesAction,
    },

    /// Play a round: start it, record scores, complete it
    Round {
        #[command(subcommand)]
        action: RoundAction,
    },

    /// List all rounds with their score to par
    Rounds,

    /// Show score to par for every completed round, oldest first
    Trend,

    /// Estimate a handicap index from recent completed rounds
    Handicap,

    /// Analyze completed rounds for problem areas, trend and strengths
    Analyze {
        /// Output format (text, json). Defaults to the config value.
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Ignore the cached analysis and recompute
        #[arg(long)]
        refresh: bool,
    },

    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Show the active config file path
    Config,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Show current preferences
    Show,

    /// Change one or more preferences
    Set {
        /// Units for course lengths
        #[arg(long, value_enum)]
        units: Option<UnitsArg>,

        /// Default tee box name (empty to clear)
        #[arg(long)]
        tee_box: Option<String>,

        /// Print the scoring breakdown under scorecards
        #[arg(long)]
        show_statistics: Option<bool>,

        /// Enable notifications
        #[arg(long)]
        notifications: Option<bool>,
    },
}

#[derive(Subcommand)]
enum CoursesAction {
    /// List all courses
    List,

    /// Add courses from a JSON file (a single course or an array)
    Add {
        /// Path to the course JSON file
        file: PathBuf,
    },

    /// Remove a course (rounds played on it are kept)
    Remove {
        /// Course id
        id: String,
    },
}

#[derive(Subcommand)]
enum RoundAction {
    /// Start a new round on a course
    Start {
        /// Course id (see `golftrack courses list`)
        course_id: String,
    },

    /// Record the score for a hole of the round in progress
    Score {
        /// Hole number
        hole: u32,

        /// Strokes taken
        strokes: u32,

        /// Free-text note, e.g. "3-putt from the fringe"
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Mark the round in progress as completed
    Complete,

    /// Delete a round
    Delete {
        /// Round id
        id: String,
    },

    /// Show a round's scorecard (defaults to the round in progress)
    Show {
        /// Round id
        id: Option<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum UnitsArg {
    Yards,
    Meters,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Yards => Units::Yards,
            UnitsArg::Meters => Units::Meters,
        }
    }
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = config::Settings::load()?;
    let data_dir = settings.data_dir(cli.data_dir);
    let config = &settings.config;
    tracing::debug!(dir = %data_dir.display(), "using data directory");
    let card = Scorecard::new(JsonFileStore::new(data_dir.clone()));

    match cli.command {
        Commands::Courses { action } => match action {
            CoursesAction::List => cmd_courses_list(&card),
            CoursesAction::Add { file } => cmd_courses_add(&card, &file),
            CoursesAction::Remove { id } => cmd_courses_remove(&card, &id),
        },
        Commands::Round { action } => match action {
            RoundAction::Start { course_id } => cmd_round_start(&card, &course_id),
            RoundAction::Score { hole, strokes, comment } => {
                cmd_round_score(&card, hole, strokes, comment)
            }
            RoundAction::Complete => cmd_round_complete(&card),
            RoundAction::Delete { id } => cmd_round_delete(&card, &id),
            RoundAction::Show { id } => cmd_round_show(&card, id.as_deref()),
        },
        Commands::Rounds => cmd_rounds(&card),
        Commands::Trend => cmd_trend(&card),
        Commands::Handicap => cmd_handicap(&card),
        Commands::Analyze { format, refresh } => {
            let format = format.map(OutputFormat::from).unwrap_or(config.display.format);
            cmd_analyze(&card, format, refresh || !config.analysis.use_cache)
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Show => cmd_prefs_show(&card),
            PrefsAction::Set {
                units,
                tee_box,
                show_statistics,
                notifications,
            } => {
                let current = card.store().preferences()?;
                let updated = apply_preferences(current, units, tee_box, show_statistics, notifications);
                card.store().save_preferences(&updated)?;
                display::print_preferences(&updated);
                Ok(())
            }
        },
        Commands::Config => {
            println!("{}", settings.describe());
            println!("data directory: {}", data_dir.display());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    // --verbose wins over RUST_LOG; otherwise RUST_LOG, then warnings only.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

type Card = Scorecard<JsonFileStore>;

fn cmd_courses_list(card: &Card) -> Result<()> {
    let courses = card.store().courses().context("Failed to load courses")?;
    let prefs = card.store().preferences()?;
    display::print_courses(&courses, prefs.preferred_units);
    Ok(())
}

fn cmd_courses_add(card: &Card, file: &Path) -> Result<()> {
    let courses = load_courses_file(file)?;
    if courses.is_empty() {
        anyhow::bail!("No courses found in '{}'", file.display());
    }

    for course in courses {
        let added = card
            .create_course(course)
            .with_context(|| format!("Failed to add course from {}", file.display()))?;
        println!("Added course {} ({})", added.name, added.id);
    }
    Ok(())
}

fn cmd_courses_remove(card: &Card, id: &str) -> Result<()> {
    card.delete_course(id)?;
    println!("Removed course {}", id);
    Ok(())
}

fn cmd_round_start(card: &Card, course_id: &str) -> Result<()> {
    if let Some(open) = card.current_round()? {
        tracing::warn!(round = %open.id, "another round is still in progress");
    }
    let round = card.start_round(course_id, Utc::now())?;
    println!("Started round {} on {}", round.id, course_id);
    Ok(())
}

fn open_round(card: &Card) -> Result<Round> {
    Ok(card.current_round()?.ok_or(GolfError::NoActiveRound)?)
}

fn cmd_round_score(card: &Card, hole: u32, strokes: u32, comment: Option<String>) -> Result<()> {
    let round = open_round(card)?;
    let score = match comment {
        Some(text) => HoleScore::new(hole, strokes).with_comment(text),
        None => HoleScore::new(hole, strokes),
    };
    let updated = card.record_score(&round.id, score)?;
    println!(
        "Hole {}: {} strokes ({} holes scored)",
        hole,
        strokes,
        updated.scores.len()
    );
    Ok(())
}

fn cmd_round_complete(card: &Card) -> Result<()> {
    let round = open_round(card)?;
    let completed = card.complete_round(&round.id)?;
    println!("Completed round {} ({} strokes)", completed.id, completed.total_strokes());
    Ok(())
}

fn cmd_round_delete(card: &Card, id: &str) -> Result<()> {
    card.delete_round(id)?;
    println!("Deleted round {}", id);
    Ok(())
}

fn cmd_round_show(card: &Card, id: Option<&str>) -> Result<()> {
    let round = match id {
        Some(id) => card.round(id)?,
        None => open_round(card)?,
    };
    let courses = card.store().courses()?;
    let course = find_course(&courses, &round.course_id)
        .ok_or_else(|| GolfError::CourseNotFound(round.course_id.clone()))?;

    let stats = calculate_statistics(&round, course);
    let show_statistics = card.store().preferences()?.show_statistics;
    display::print_scorecard(&round, course, show_statistics.then_some(&stats));
    Ok(())
}

fn cmd_rounds(card: &Card) -> Result<()> {
    let courses = card.store().courses()?;
    let mut rounds = card.store().rounds()?;
    rounds.sort_by_key(|r| std::cmp::Reverse(r.date));

    let rows: Vec<_> = rounds
        .into_iter()
        .map(|round| {
            let stats = find_course(&courses, &round.course_id)
                .map(|course| calculate_statistics(&round, course));
            (round, stats)
        })
        .collect();

    display::print_rounds(&rows, &courses);
    Ok(())
}

fn cmd_trend(card: &Card) -> Result<()> {
    let courses = card.store().courses()?;
    let rounds = card.store().rounds()?;
    display::print_trend(&build_trend_series(&rounds, &courses));
    Ok(())
}

fn cmd_handicap(card: &Card) -> Result<()> {
    let courses = card.store().courses()?;
    let rounds = card.store().rounds()?;
    display::print_handicap(calculate_handicap_index(&rounds, &courses));
    Ok(())
}

fn cmd_prefs_show(card: &Card) -> Result<()> {
    display::print_preferences(&card.store().preferences()?);
    Ok(())
}

fn apply_preferences(
    mut prefs: UserPreferences,
    units: Option<UnitsArg>,
    tee_box: Option<String>,
    show_statistics: Option<bool>,
    notifications: Option<bool>,
) -> UserPreferences {
    if let Some(units) = units {
        prefs.preferred_units = units.into();
    }
    if let Some(tee_box) = tee_box {
        let trimmed = tee_box.trim();
        prefs.default_tee_box = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
    if let Some(show) = show_statistics {
        prefs.show_statistics = show;
    }
    if let Some(enabled) = notifications {
        prefs.enable_notifications = enabled;
    }
    prefs
}

fn cmd_analyze(card: &Card, format: OutputFormat, refresh: bool) -> Result<()> {
    let result = card
        .analysis(&RulesBasedAnalyzer, refresh, Utc::now())
        .context("Failed to analyze rounds")?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let completed = card.store().rounds()?.iter().filter(|r| r.completed).count();
            display::print_analysis_result(&result, completed);
        }
    }

    Ok(())
}
