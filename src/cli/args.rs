use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fitweek", version, author, about = "A terminal daily fitness log with a weekly score")]
pub struct Cli {
    /// Use this data file instead of the configured one (.db/.sqlite = SQLite, else CSV)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a day's entry, replacing anything already saved for that date
    Log(LogArgs),
    /// Show the weekly score and how it breaks down
    Score {
        /// Score the week containing this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every entry of the week
    Week {
        /// Show the week containing this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// View or change weekly goals
    Goals {
        #[command(subcommand)]
        action: GoalCommands,
    },
    /// Export a weekly text summary to stdout
    Export {
        /// Summarize the week containing this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Rewrite the data file at the current schema version
    Migrate,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    /// Date of the entry (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Workout done
    #[arg(long)]
    pub workout: bool,
    /// Workout type: lower, upper, abs
    #[arg(long = "type", default_value = "Lower body")]
    pub workout_type: String,
    /// Workout duration in minutes
    #[arg(long, default_value_t = 0)]
    pub duration: u32,
    /// Intensity: easy, medium, hard
    #[arg(long, default_value = "Easy")]
    pub intensity: String,
    /// Protein (g)
    #[arg(long, default_value_t = 100.0)]
    pub protein: f64,
    /// Food quality, 1 = poor .. 5 = excellent
    #[arg(long, default_value_t = 4)]
    pub food_quality: u8,
    /// Food portion: under-eat, normal, over-eat
    #[arg(long, default_value = "Normal")]
    pub portion: String,
    /// Water (liters)
    #[arg(long, default_value_t = 2.0)]
    pub water: f64,
    /// Sleep (hours)
    #[arg(long, default_value_t = 7.0)]
    pub sleep: f64,
    /// Stress, 1 = low .. 5 = high
    #[arg(long, default_value_t = 3)]
    pub stress: u8,
    /// Mood / energy, 1 = low .. 5 = high
    #[arg(long, default_value_t = 4)]
    pub mood: u8,
    /// Calories (kcal)
    #[arg(long)]
    pub calories: Option<f64>,
    /// Carbs (g)
    #[arg(long)]
    pub carbs: Option<f64>,
    /// Fats (g)
    #[arg(long)]
    pub fats: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Show current goals and score weights
    Show,
    /// Set a goal: workouts, protein, food_quality, water, sleep, mood, max_calories
    Set {
        /// Goal name
        name: String,
        /// New value (0 clears max_calories)
        value: f64,
    },
    /// Restore default goals
    Reset,
}
