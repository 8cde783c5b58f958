pub mod error;
pub mod record;
pub mod score;
pub mod week;

pub use error::ParseError;
pub use record::{DailyRecord, FoodPortion, Intensity, WorkoutType};
pub use score::{Rating, ScoreBreakdown, WeeklyAggregates, WeeklyScore};
pub use week::WeekWindow;
