use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => Rating::Excellent,
            70..=84 => Rating::Good,
            50..=69 => Rating::Fair,
            _ => Rating::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Rating::Excellent => "💪",
            Rating::Good => "👍",
            Rating::Fair => "⚠️",
            Rating::Poor => "🚨",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw weekly figures the sub-scores are derived from.
///
/// Means over an empty week are 0. `avg_calories` is `None` when no record in
/// the week carries a calorie value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregates {
    pub days_logged: u32,
    pub workouts_done: u32,
    pub total_workout_minutes: u32,
    pub avg_protein: f64,
    pub avg_food_quality: f64,
    pub avg_portion_points: f64,
    pub avg_water: f64,
    pub avg_sleep: f64,
    pub avg_mood: f64,
    pub avg_inverted_stress: f64,
    pub avg_calories: Option<f64>,
}

/// Points earned per component, each capped at its weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub workout: f64,
    pub protein: f64,
    pub food_quality: f64,
    pub food_portion: f64,
    pub water: f64,
    pub sleep: f64,
    pub lifestyle: f64,
    pub calories: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.workout
            + self.protein
            + self.food_quality
            + self.food_portion
            + self.water
            + self.sleep
            + self.lifestyle
            + self.calories
    }

    /// (label, points) pairs in display order.
    pub fn components(&self) -> [(&'static str, f64); 8] {
        [
            ("Workouts", self.workout),
            ("Protein", self.protein),
            ("Food quality", self.food_quality),
            ("Food portion", self.food_portion),
            ("Water", self.water),
            ("Sleep", self.sleep),
            ("Lifestyle", self.lifestyle),
            ("Calories", self.calories),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyScore {
    pub score: u8,
    pub rating: Rating,
    pub breakdown: ScoreBreakdown,
    pub aggregates: WeeklyAggregates,
}
