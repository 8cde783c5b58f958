use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutType {
    #[serde(rename = "Lower body")]
    LowerBody,
    #[serde(rename = "Upper body")]
    UpperBody,
    #[serde(rename = "Abdominals")]
    Abdominals,
}

impl WorkoutType {
    pub fn all() -> Vec<WorkoutType> {
        vec![
            WorkoutType::LowerBody,
            WorkoutType::UpperBody,
            WorkoutType::Abdominals,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::LowerBody => "Lower body",
            WorkoutType::UpperBody => "Upper body",
            WorkoutType::Abdominals => "Abdominals",
        }
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "lowerbody" | "lower" | "legs" => Ok(WorkoutType::LowerBody),
            "upperbody" | "upper" => Ok(WorkoutType::UpperBody),
            "abdominals" | "abs" | "core" => Ok(WorkoutType::Abdominals),
            _ => Err(ParseError::UnknownVariant {
                field: "workout type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Easy,
    Medium,
    Hard,
}

impl Intensity {
    pub fn all() -> Vec<Intensity> {
        vec![Intensity::Easy, Intensity::Medium, Intensity::Hard]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Easy => "Easy",
            Intensity::Medium => "Medium",
            Intensity::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "easy" => Ok(Intensity::Easy),
            "medium" => Ok(Intensity::Medium),
            "hard" => Ok(Intensity::Hard),
            _ => Err(ParseError::UnknownVariant {
                field: "intensity",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodPortion {
    #[serde(rename = "Under-eat")]
    UnderEat,
    Normal,
    #[serde(rename = "Over-eat")]
    OverEat,
}

impl FoodPortion {
    pub fn all() -> Vec<FoodPortion> {
        vec![FoodPortion::UnderEat, FoodPortion::Normal, FoodPortion::OverEat]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodPortion::UnderEat => "Under-eat",
            FoodPortion::Normal => "Normal",
            FoodPortion::OverEat => "Over-eat",
        }
    }

    /// Points out of 10 used by the food-portion sub-score.
    pub fn points(&self) -> f64 {
        match self {
            FoodPortion::UnderEat => 5.0,
            FoodPortion::Normal => 10.0,
            FoodPortion::OverEat => 5.0,
        }
    }
}

impl std::fmt::Display for FoodPortion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FoodPortion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "undereat" | "under" => Ok(FoodPortion::UnderEat),
            "normal" => Ok(FoodPortion::Normal),
            "overeat" | "over" => Ok(FoodPortion::OverEat),
            _ => Err(ParseError::UnknownVariant {
                field: "food portion",
                value: s.to_string(),
            }),
        }
    }
}

/// Lowercase and drop separators so "Lower body", "lower-body" and "LOWER_BODY" all match.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

pub const SLIDER_MIN: u8 = 1;
pub const SLIDER_MAX: u8 = 5;

/// One logged day. Unique by `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub workout_done: bool,
    pub workout_type: WorkoutType,
    /// Minutes
    pub workout_duration: u32,
    pub intensity: Intensity,
    /// Grams
    pub protein: f64,
    /// 1 = poor, 5 = excellent
    pub food_quality: u8,
    pub food_portion: FoodPortion,
    /// Liters
    pub water: f64,
    /// Hours
    pub sleep: f64,
    /// 1 = low, 5 = high (lower is better)
    pub stress: u8,
    /// 1 = low, 5 = high
    pub mood: u8,
    pub calories: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

impl DailyRecord {
    /// A record for `date` holding the form's starting values.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            workout_done: false,
            workout_type: WorkoutType::LowerBody,
            workout_duration: 0,
            intensity: Intensity::Easy,
            protein: 100.0,
            food_quality: 4,
            food_portion: FoodPortion::Normal,
            water: 2.0,
            sleep: 7.0,
            stress: 3,
            mood: 4,
            calories: None,
            carbs: None,
            fats: None,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Stress flipped onto the mood scale: 1 (very stressed) .. 5 (calm).
    pub fn inverted_stress(&self) -> f64 {
        6.0 - self.stress as f64
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        check_slider("food_quality", self.food_quality)?;
        check_slider("stress", self.stress)?;
        check_slider("mood", self.mood)?;
        check_amount("protein", self.protein)?;
        check_amount("water", self.water)?;
        check_amount("sleep", self.sleep)?;
        for (field, value) in [
            ("calories", self.calories),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ] {
            if let Some(v) = value {
                check_amount(field, v)?;
            }
        }
        Ok(())
    }
}

fn check_slider(field: &'static str, value: u8) -> Result<(), ParseError> {
    if (SLIDER_MIN..=SLIDER_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ParseError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "1 to 5",
        })
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ParseError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParseError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "a non-negative number",
        })
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        // pandas writes datetimes with a midnight time component
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| ParseError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn categories_parse_loosely() {
        assert_eq!("lower body".parse::<WorkoutType>().unwrap(), WorkoutType::LowerBody);
        assert_eq!("Upper-Body".parse::<WorkoutType>().unwrap(), WorkoutType::UpperBody);
        assert_eq!("abs".parse::<WorkoutType>().unwrap(), WorkoutType::Abdominals);
        assert_eq!("HARD".parse::<Intensity>().unwrap(), Intensity::Hard);
        assert_eq!("Over-eat".parse::<FoodPortion>().unwrap(), FoodPortion::OverEat);
        assert_eq!("under_eat".parse::<FoodPortion>().unwrap(), FoodPortion::UnderEat);
        assert!("cardio".parse::<WorkoutType>().is_err());
    }

    #[test]
    fn labels_survive_display_and_parse() {
        for portion in FoodPortion::all() {
            assert_eq!(portion.to_string().parse::<FoodPortion>().unwrap(), portion);
        }
        for wt in WorkoutType::all() {
            assert_eq!(wt.as_str().parse::<WorkoutType>().unwrap(), wt);
        }
    }

    #[test]
    fn portion_points() {
        assert_eq!(FoodPortion::Normal.points(), 10.0);
        assert_eq!(FoodPortion::UnderEat.points(), 5.0);
        assert_eq!(FoodPortion::OverEat.points(), 5.0);
    }

    #[test]
    fn defaults_are_valid() {
        let r = DailyRecord::new(day());
        assert!(r.validate().is_ok());
        assert_eq!(r.inverted_stress(), 3.0);
        assert_eq!(r.date_str(), "2024-01-15");
    }

    #[test]
    fn validate_rejects_out_of_range_sliders() {
        let mut r = DailyRecord::new(day());
        r.mood = 0;
        assert!(r.validate().is_err());
        r.mood = 5;
        r.stress = 6;
        assert!(r.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_amounts() {
        let mut r = DailyRecord::new(day());
        r.calories = Some(-10.0);
        assert!(r.validate().is_err());
        r.calories = None;
        r.water = f64::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn parse_date_accepts_pandas_timestamps() {
        assert_eq!(parse_date("2024-01-15").unwrap(), day());
        assert_eq!(parse_date("2024-01-15 00:00:00").unwrap(), day());
        assert!(parse_date("15/01/2024").is_err());
    }
}
