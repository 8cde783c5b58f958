pub mod settings;

pub use settings::{AppConfig, GoalConfig, ScoreWeights, StorageBackend};
