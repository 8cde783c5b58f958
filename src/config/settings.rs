use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Score weights must add up to 100, got {0}")]
    WeightsSum(f64),

    #[error("Weight '{0}' must not be negative")]
    NegativeWeight(&'static str),

    #[error("Goal '{0}' must not be negative")]
    NegativeGoal(&'static str),

    #[error("Unknown goal '{0}'. Use: workouts, protein, food_quality, water, sleep, mood, max_calories")]
    UnknownGoal(String),
}

fn default_target_workouts() -> u32 {
    4
}
fn default_target_protein() -> f64 {
    100.0
}
fn default_target_food_quality() -> f64 {
    4.0
}
fn default_target_water() -> f64 {
    2.0
}
fn default_target_sleep() -> f64 {
    7.0
}
fn default_target_mood() -> f64 {
    4.0
}

/// Weekly targets the scorer measures against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Workouts per week
    #[serde(default = "default_target_workouts")]
    pub target_workouts: u32,
    /// Average grams per day
    #[serde(default = "default_target_protein")]
    pub target_protein: f64,
    #[serde(default = "default_target_food_quality")]
    pub target_food_quality: f64,
    /// Average liters per day
    #[serde(default = "default_target_water")]
    pub target_water: f64,
    /// Average hours per night
    #[serde(default = "default_target_sleep")]
    pub target_sleep: f64,
    /// Shown next to the mood average; lifestyle scoring uses the full 1-5 scale.
    #[serde(default = "default_target_mood")]
    pub target_mood: f64,
    /// Daily calorie budget. Unset means calories are not judged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calories: Option<f64>,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            target_workouts: default_target_workouts(),
            target_protein: default_target_protein(),
            target_food_quality: default_target_food_quality(),
            target_water: default_target_water(),
            target_sleep: default_target_sleep(),
            target_mood: default_target_mood(),
            max_calories: None,
        }
    }
}

impl GoalConfig {
    /// Set a goal by its short name. A value of 0 for `max_calories` clears it.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), ConfigError> {
        let key = name.trim().to_lowercase().replace('-', "_");
        let key = key.strip_prefix("target_").unwrap_or(&key);
        match key {
            "workouts" => {
                self.target_workouts = non_negative("workouts", value)?.round() as u32;
            }
            "protein" => self.target_protein = non_negative("protein", value)?,
            "food_quality" => self.target_food_quality = non_negative("food_quality", value)?,
            "water" => self.target_water = non_negative("water", value)?,
            "sleep" => self.target_sleep = non_negative("sleep", value)?,
            "mood" => self.target_mood = non_negative("mood", value)?,
            "max_calories" | "calories" => {
                let v = non_negative("max_calories", value)?;
                self.max_calories = if v > 0.0 { Some(v) } else { None };
            }
            _ => return Err(ConfigError::UnknownGoal(name.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("protein", self.target_protein)?;
        non_negative("food_quality", self.target_food_quality)?;
        non_negative("water", self.target_water)?;
        non_negative("sleep", self.target_sleep)?;
        non_negative("mood", self.target_mood)?;
        if let Some(max) = self.max_calories {
            non_negative("max_calories", max)?;
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NegativeGoal(name))
    }
}

fn default_w_workout() -> f64 {
    30.0
}
fn default_w_protein() -> f64 {
    15.0
}
fn default_w_food_quality() -> f64 {
    20.0
}
fn default_w_food_portion() -> f64 {
    10.0
}
fn default_w_water() -> f64 {
    10.0
}
fn default_w_sleep() -> f64 {
    7.5
}
fn default_w_lifestyle() -> f64 {
    7.5
}

/// Maximum points per component. Must add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_w_workout")]
    pub workout: f64,
    #[serde(default = "default_w_protein")]
    pub protein: f64,
    #[serde(default = "default_w_food_quality")]
    pub food_quality: f64,
    #[serde(default = "default_w_food_portion")]
    pub food_portion: f64,
    #[serde(default = "default_w_water")]
    pub water: f64,
    #[serde(default = "default_w_sleep")]
    pub sleep: f64,
    #[serde(default = "default_w_lifestyle")]
    pub lifestyle: f64,
    #[serde(default)]
    pub calories: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            workout: default_w_workout(),
            protein: default_w_protein(),
            food_quality: default_w_food_quality(),
            food_portion: default_w_food_portion(),
            water: default_w_water(),
            sleep: default_w_sleep(),
            lifestyle: default_w_lifestyle(),
            calories: 0.0,
        }
    }
}

impl ScoreWeights {
    fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("workout", self.workout),
            ("protein", self.protein),
            ("food_quality", self.food_quality),
            ("food_portion", self.food_portion),
            ("water", self.water),
            ("sleep", self.sleep),
            ("lifestyle", self.lifestyle),
            ("calories", self.calories),
        ]
    }

    pub fn total(&self) -> f64 {
        self.named().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, w) in self.named() {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::NegativeWeight(name));
            }
        }
        let total = self.total();
        if (total - 100.0).abs() > 1e-6 {
            return Err(ConfigError::WeightsSum(total));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Csv,
    Sqlite,
}

impl StorageBackend {
    pub fn file_name(&self) -> &'static str {
        match self {
            StorageBackend::Csv => "data.csv",
            StorageBackend::Sqlite => "fitweek.db",
        }
    }

    /// `.db` / `.sqlite` / `.sqlite3` files are SQLite, anything else is CSV.
    pub fn infer(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("db" | "sqlite" | "sqlite3") => StorageBackend::Sqlite,
            _ => StorageBackend::Csv,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Overrides the file inside the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub goals: GoalConfig,
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "fitweek")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Where records live: the configured path, or the backend's default file.
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::data_dir()?.join(self.storage.backend.file_name())),
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config = Self::parse(&content)?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("Parsing config.toml")?;
        config.validate().context("Invalid config.toml")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.goals.validate()?;
        self.weights.validate()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir(&self) -> Result<PathBuf> {
        let path = self.data_path()?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => return Ok(PathBuf::from(".")),
        };
        std::fs::create_dir_all(&dir).with_context(|| format!("Creating {:?}", dir))?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.goals, GoalConfig::default());
        assert_eq!(config.weights, ScoreWeights::default());
        assert_eq!(config.storage.backend, StorageBackend::Csv);
        assert!((config.weights.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::parse(
            "[goals]\ntarget_protein = 140.0\nmax_calories = 2200.0\n\n[storage]\nbackend = \"sqlite\"\n",
        )
        .unwrap();
        assert_eq!(config.goals.target_protein, 140.0);
        assert_eq!(config.goals.target_workouts, 4);
        assert_eq!(config.goals.max_calories, Some(2200.0));
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn weights_must_sum_to_100() {
        let err = AppConfig::parse("[weights]\nworkout = 50.0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("add up to 100"));

        let ok = AppConfig::parse(
            "[weights]\nworkout = 25.0\ncalories = 5.0\n",
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn negative_weight_rejected() {
        let w = ScoreWeights {
            workout: 40.0,
            lifestyle: -2.5,
            ..ScoreWeights::default()
        };
        assert!(matches!(w.validate(), Err(ConfigError::NegativeWeight("lifestyle"))));
    }

    #[test]
    fn set_goal_by_name() {
        let mut goals = GoalConfig::default();
        goals.set("protein", 120.0).unwrap();
        goals.set("target_workouts", 5.0).unwrap();
        goals.set("max-calories", 2000.0).unwrap();
        assert_eq!(goals.target_protein, 120.0);
        assert_eq!(goals.target_workouts, 5);
        assert_eq!(goals.max_calories, Some(2000.0));

        goals.set("calories", 0.0).unwrap();
        assert_eq!(goals.max_calories, None);

        assert!(matches!(goals.set("steps", 1.0), Err(ConfigError::UnknownGoal(_))));
        assert!(goals.set("water", -1.0).is_err());
    }

    #[test]
    fn backend_inferred_from_extension() {
        assert_eq!(StorageBackend::infer(Path::new("log.db")), StorageBackend::Sqlite);
        assert_eq!(StorageBackend::infer(Path::new("log.SQLITE")), StorageBackend::Sqlite);
        assert_eq!(StorageBackend::infer(Path::new("data.csv")), StorageBackend::Csv);
        assert_eq!(StorageBackend::infer(Path::new("data")), StorageBackend::Csv);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.goals.target_sleep = 8.0;
        config.storage.path = Some(dir.path().join("mine.csv"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.goals.target_sleep, 8.0);
        assert_eq!(loaded.data_path().unwrap(), dir.path().join("mine.csv"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.goals.target_workouts, 4);
    }
}
