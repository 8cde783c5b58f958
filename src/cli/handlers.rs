use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::cli::args::{GoalCommands, LogArgs};
use crate::config::{AppConfig, GoalConfig, ScoreWeights};
use crate::models::record::parse_date;
use crate::models::{DailyRecord, Rating, WeekWindow, WeeklyScore};
use crate::scoring;
use crate::store::RecordStore;
use crate::utils::format::{
    format_decimal, format_optional, gradient_position, pad_display, progress_bar,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const ORANGE: &str = "\x1b[38;5;208m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const TEAL: &str = "\x1b[38;2;72;176;160m";

fn rating_color(rating: Rating) -> &'static str {
    match rating {
        Rating::Excellent => GREEN,
        Rating::Good => YELLOW,
        Rating::Fair => ORANGE,
        Rating::Poor => RED,
    }
}

/// Red → yellow → green by position in the column's range.
fn gradient_color(position: f64) -> &'static str {
    if position < 0.34 {
        RED
    } else if position < 0.67 {
        YELLOW
    } else {
        GREEN
    }
}

pub fn resolve_date(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match date {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(today),
    }
}

fn current_week(
    store: &dyn RecordStore,
    config: &AppConfig,
    day: NaiveDate,
) -> (WeekWindow, WeeklyScore) {
    let records = store.load();
    let window = WeekWindow::containing(day, &records);
    let score = scoring::score(&window.records, &config.goals, &config.weights);
    (window, score)
}

// ─── Log ─────────────────────────────────────────────────────────────────────

pub fn record_from_args(args: &LogArgs, today: NaiveDate) -> Result<DailyRecord> {
    let record = DailyRecord {
        date: resolve_date(args.date.as_deref(), today)?,
        workout_done: args.workout,
        workout_type: args.workout_type.parse()?,
        workout_duration: args.duration,
        intensity: args.intensity.parse()?,
        protein: args.protein,
        food_quality: args.food_quality,
        food_portion: args.portion.parse()?,
        water: args.water,
        sleep: args.sleep,
        stress: args.stress,
        mood: args.mood,
        calories: args.calories,
        carbs: args.carbs,
        fats: args.fats,
    };
    record.validate()?;
    Ok(record)
}

pub fn handle_log(
    store: &mut dyn RecordStore,
    config: &AppConfig,
    args: &LogArgs,
    today: NaiveDate,
) -> Result<()> {
    let record = record_from_args(args, today)?;
    let date = record.date;
    store.upsert(record).context("Saving entry")?;
    println_colored!(GREEN, "  ✓ Saved {}", date.format("%Y-%m-%d"));

    let (window, score) = current_week(store, config, date);
    println_colored!(
        rating_color(score.rating),
        "  Week {}: {} {} - {}/100",
        window.label(),
        score.rating,
        score.rating.emoji(),
        score.score
    );
    Ok(())
}

// ─── Score ───────────────────────────────────────────────────────────────────

fn print_breakdown(score: &WeeklyScore, weights: &ScoreWeights) {
    let maxima = [
        weights.workout,
        weights.protein,
        weights.food_quality,
        weights.food_portion,
        weights.water,
        weights.sleep,
        weights.lifestyle,
        weights.calories,
    ];
    for ((label, points), max) in score.breakdown.components().iter().zip(maxima) {
        if max <= 0.0 {
            continue;
        }
        println!(
            "  {}  {}  {:>5.1} / {}",
            pad_display(label, 14),
            progress_bar(*points, max, 12),
            points,
            format_decimal(max)
        );
    }
}

pub fn handle_score(
    store: &dyn RecordStore,
    config: &AppConfig,
    date: Option<&str>,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let day = resolve_date(date, today)?;
    let (window, score) = current_week(store, config, day);

    if json {
        let out = serde_json::json!({
            "week": window.label(),
            "start": window.start().format("%Y-%m-%d").to_string(),
            "end": window.end().format("%Y-%m-%d").to_string(),
            "score": score,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println_colored!(
        TEAL,
        "  Weekly Score  {} ({} – {})",
        window.label(),
        window.start().format("%b %d"),
        window.end().format("%b %d")
    );
    println!();
    println_colored!(
        format!("{}{}", BOLD, rating_color(score.rating)),
        "  {} {} - {}/100",
        score.rating,
        score.rating.emoji(),
        score.score
    );
    println!();
    if window.is_empty() {
        println_colored!(DIM, "  No entries logged this week yet");
    } else {
        print_breakdown(&score, &config.weights);
        println!();
        print_metrics(&score, &config.goals);
    }
    println!();
    Ok(())
}

fn print_metrics(score: &WeeklyScore, goals: &GoalConfig) {
    let a = &score.aggregates;
    println!(
        "  Workouts Done {}/{}   Avg Protein {}g   Avg Food Quality {:.1}",
        a.workouts_done,
        goals.target_workouts,
        a.avg_protein.round(),
        a.avg_food_quality
    );
    println!(
        "  Avg Water {:.1}L   Avg Sleep {:.1}h   Avg Mood {:.1}/{}",
        a.avg_water,
        a.avg_sleep,
        a.avg_mood,
        format_decimal(goals.target_mood)
    );
    if let Some(cal) = a.avg_calories {
        println!("  Avg Calories {}", cal.round());
    }
}

// ─── Week ────────────────────────────────────────────────────────────────────

pub fn handle_week(
    store: &dyn RecordStore,
    config: &AppConfig,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let day = resolve_date(date, today)?;
    let (window, _) = current_week(store, config, day);

    println!();
    println_colored!(TEAL, "  Detailed Weekly Data  {}", window.label());
    println!();
    if window.is_empty() {
        println_colored!(DIM, "  No entries logged this week yet");
        println!();
        return Ok(());
    }

    println_colored!(
        DIM,
        "  {:<11}{:<8}{:<12}{:>5}  {:<7}{:>6}{:>5}  {:<10}{:>6}{:>6}{:>7}{:>5}{:>7}",
        "date",
        "workout",
        "type",
        "min",
        "effort",
        "prot",
        "qual",
        "portion",
        "water",
        "sleep",
        "stress",
        "mood",
        "kcal"
    );

    let range = |f: fn(&DailyRecord) -> f64| {
        let values: Vec<f64> = window.records.iter().map(f).collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    };
    let duration = range(|r| r.workout_duration as f64);
    let protein = range(|r| r.protein);
    let quality = range(|r| r.food_quality as f64);
    let water = range(|r| r.water);
    let sleep = range(|r| r.sleep);

    let shade = |value: f64, (min, max): (f64, f64), text: String| {
        format!("{}{}{}", gradient_color(gradient_position(value, min, max)), text, RESET)
    };

    for r in &window.records {
        println!(
            "  {:<11}{:<8}{:<12}{}  {:<7}{}{}  {:<10}{}{}{:>7}{:>5}{:>7}",
            r.date.format("%a %d").to_string(),
            if r.workout_done { "yes" } else { "no" },
            r.workout_type.as_str(),
            shade(r.workout_duration as f64, duration, format!("{:>5}", r.workout_duration)),
            r.intensity.as_str(),
            shade(r.protein, protein, format!("{:>6.0}", r.protein)),
            shade(r.food_quality as f64, quality, format!("{:>5}", r.food_quality)),
            r.food_portion.as_str(),
            shade(r.water, water, format!("{:>6.1}", r.water)),
            shade(r.sleep, sleep, format!("{:>6.1}", r.sleep)),
            r.stress,
            r.mood,
            format_optional(r.calories),
        );
    }
    println!();
    Ok(())
}

// ─── Goals ───────────────────────────────────────────────────────────────────

pub fn handle_goals(config: &mut AppConfig, action: &GoalCommands) -> Result<()> {
    match action {
        GoalCommands::Show => {
            let g = &config.goals;
            println!();
            println_colored!(TEAL, "  Weekly Goals");
            println!();
            println!("  Workouts per week   {}", g.target_workouts);
            println!("  Protein (g/day)     {}", format_decimal(g.target_protein));
            println!("  Food quality        {}", format_decimal(g.target_food_quality));
            println!("  Water (L/day)       {}", format_decimal(g.target_water));
            println!("  Sleep (h/night)     {}", format_decimal(g.target_sleep));
            println!("  Mood                {}", format_decimal(g.target_mood));
            println!("  Max calories        {}", format_optional(g.max_calories));
            println!();
            println_colored!(DIM, "  Weights");
            let w = &config.weights;
            println_colored!(
                DIM,
                "  workout {} · protein {} · food quality {} · portion {} · water {} · sleep {} · lifestyle {} · calories {}",
                format_decimal(w.workout),
                format_decimal(w.protein),
                format_decimal(w.food_quality),
                format_decimal(w.food_portion),
                format_decimal(w.water),
                format_decimal(w.sleep),
                format_decimal(w.lifestyle),
                format_decimal(w.calories)
            );
            println!();
        }
        GoalCommands::Set { name, value } => {
            config.goals.set(name, *value)?;
            config.save()?;
            println_colored!(GREEN, "  ✓ Goal '{}' set to {}", name, format_decimal(*value));
        }
        GoalCommands::Reset => {
            config.goals = GoalConfig::default();
            config.save()?;
            println_colored!(GREEN, "  ✓ Goals restored to defaults");
        }
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn render_export(
    window: &WeekWindow,
    score: &WeeklyScore,
    goals: &GoalConfig,
) -> Result<String, std::fmt::Error> {
    let a = &score.aggregates;
    let mut out = String::new();
    writeln!(out, "# fitweek — Weekly Summary")?;
    writeln!(
        out,
        "# {} ({} to {})",
        window.label(),
        window.start().format("%Y-%m-%d"),
        window.end().format("%Y-%m-%d")
    )?;
    writeln!(out)?;
    writeln!(out, "Score:  {}/100 ({})", score.score, score.rating)?;
    writeln!(out, "Days logged: {}", a.days_logged)?;
    writeln!(out)?;
    writeln!(out, "## Daily Entries")?;
    for r in &window.records {
        writeln!(
            out,
            "  {}  {}  {:>3} min  protein {:>3}g  water {}L  sleep {}h  mood {}  stress {}",
            r.date_str(),
            if r.workout_done { "█" } else { "░" },
            r.workout_duration,
            r.protein.round(),
            format_decimal(r.water),
            format_decimal(r.sleep),
            r.mood,
            r.stress
        )?;
    }
    writeln!(out)?;
    writeln!(out, "## Summary")?;
    writeln!(out, "  Workouts:      {}/{}", a.workouts_done, goals.target_workouts)?;
    writeln!(out, "  Workout time:  {} min", a.total_workout_minutes)?;
    writeln!(out, "  Avg protein:   {}g", a.avg_protein.round())?;
    writeln!(out, "  Avg quality:   {:.1}", a.avg_food_quality)?;
    writeln!(out, "  Avg water:     {:.1}L", a.avg_water)?;
    writeln!(out, "  Avg sleep:     {:.1}h", a.avg_sleep)?;
    writeln!(out, "  Avg mood:      {:.1}", a.avg_mood)?;
    Ok(out)
}

pub fn handle_export(
    store: &dyn RecordStore,
    config: &AppConfig,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let day = resolve_date(date, today)?;
    let (window, score) = current_week(store, config, day);
    print!("{}", render_export(&window, &score, &config.goals)?);
    Ok(())
}

// ─── Migrate ─────────────────────────────────────────────────────────────────

pub fn handle_migrate(store: &mut dyn RecordStore) -> Result<()> {
    let records = store
        .try_load()
        .context("Reading data file (nothing was changed)")?;
    store.save_all(&records).context("Rewriting data file")?;
    println_colored!(
        GREEN,
        "  ✓ {} entr{} rewritten at the current schema",
        records.len(),
        if records.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodPortion, Intensity, WorkoutType};
    use crate::store::CsvStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
    }

    fn args() -> LogArgs {
        LogArgs {
            date: None,
            workout: true,
            workout_type: "upper".to_string(),
            duration: 40,
            intensity: "hard".to_string(),
            protein: 120.0,
            food_quality: 5,
            portion: "over-eat".to_string(),
            water: 2.5,
            sleep: 8.0,
            stress: 2,
            mood: 5,
            calories: Some(2300.0),
            carbs: None,
            fats: None,
        }
    }

    #[test]
    fn log_args_build_a_record() {
        let r = record_from_args(&args(), today()).unwrap();
        assert_eq!(r.date, today());
        assert_eq!(r.workout_type, WorkoutType::UpperBody);
        assert_eq!(r.intensity, Intensity::Hard);
        assert_eq!(r.food_portion, FoodPortion::OverEat);
        assert_eq!(r.calories, Some(2300.0));
    }

    #[test]
    fn log_args_reject_bad_input() {
        let mut a = args();
        a.mood = 9;
        assert!(record_from_args(&a, today()).is_err());

        let mut a = args();
        a.portion = "huge".to_string();
        assert!(record_from_args(&a, today()).is_err());

        let mut a = args();
        a.date = Some("yesterday".to_string());
        assert!(record_from_args(&a, today()).is_err());
    }

    #[test]
    fn explicit_date_wins() {
        let mut a = args();
        a.date = Some("2024-01-02".to_string());
        let r = record_from_args(&a, today()).unwrap();
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn log_then_export_mentions_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(dir.path().join("data.csv"));
        let config = AppConfig::default();
        handle_log(&mut store, &config, &args(), today()).unwrap();

        let (window, score) = current_week(&store, &config, today());
        assert_eq!(window.len(), 1);
        let text = render_export(&window, &score, &config.goals).unwrap();
        assert!(text.contains("2024-W03"));
        assert!(text.contains("2024-01-17"));
        assert!(text.contains(&format!("Score:  {}/100", score.score)));
        assert!(text.contains("Workouts:      1/4"));
    }

    #[test]
    fn migrate_rewrites_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(
            &path,
            "date,workout_done,protein,water_cups,sleep,stress,mood\n2024-01-15,True,90,6,7,2,4\n",
        )
        .unwrap();
        let mut store = CsvStore::new(&path);
        handle_migrate(&mut store).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("schema_version,date,"));
        let records = store.try_load().unwrap();
        assert_eq!(records[0].water, 1.5);
    }

    #[test]
    fn migrate_refuses_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "date\nbogus\n").unwrap();
        let mut store = CsvStore::new(&path);
        assert!(handle_migrate(&mut store).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "date\nbogus\n");
    }
}
