//! Weekly score: a weighted sum of normalized sub-scores over one week of records.
//!
//! Zero-data policy:
//! - achievement components (workouts, protein, food quality, food portion,
//!   water, sleep, lifestyle) earn nothing when the week has no records, and
//!   full credit when their target is zero or negative;
//! - the calorie budget earns full credit when no record carries calories or no
//!   budget is set.

use crate::config::{GoalConfig, ScoreWeights};
use crate::models::{DailyRecord, Rating, ScoreBreakdown, WeeklyAggregates, WeeklyScore};

/// Best possible mood / inverted-stress average.
const LIFESTYLE_SCALE: f64 = 5.0;
/// Points for a "Normal" portion.
const PORTION_SCALE: f64 = 10.0;

pub fn aggregate(records: &[DailyRecord]) -> WeeklyAggregates {
    let n = records.len();
    let mean = |f: fn(&DailyRecord) -> f64| -> f64 {
        if n == 0 {
            0.0
        } else {
            records.iter().map(f).sum::<f64>() / n as f64
        }
    };

    let calories: Vec<f64> = records.iter().filter_map(|r| r.calories).collect();
    let avg_calories = if calories.is_empty() {
        None
    } else {
        Some(calories.iter().sum::<f64>() / calories.len() as f64)
    };

    WeeklyAggregates {
        days_logged: n as u32,
        workouts_done: records.iter().filter(|r| r.workout_done).count() as u32,
        total_workout_minutes: records
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.workout_duration)),
        avg_protein: mean(|r| r.protein),
        avg_food_quality: mean(|r| r.food_quality as f64),
        avg_portion_points: mean(|r| r.food_portion.points()),
        avg_water: mean(|r| r.water),
        avg_sleep: mean(|r| r.sleep),
        avg_mood: mean(|r| r.mood as f64),
        avg_inverted_stress: mean(DailyRecord::inverted_stress),
        avg_calories,
    }
}

/// `min(actual / target, 1) * weight`, with the achievement zero policy applied.
fn achievement(actual: f64, target: f64, weight: f64, has_data: bool) -> f64 {
    if !has_data {
        return 0.0;
    }
    if target <= 0.0 {
        return weight;
    }
    (actual / target).clamp(0.0, 1.0) * weight
}

/// Full credit at or under budget, proportionally less above it.
fn budget(actual: Option<f64>, max: Option<f64>, weight: f64) -> f64 {
    match (actual, max) {
        (Some(avg), Some(max)) if max > 0.0 && avg > max => (max / avg).clamp(0.0, 1.0) * weight,
        _ => weight,
    }
}

pub fn breakdown(agg: &WeeklyAggregates, goals: &GoalConfig, weights: &ScoreWeights) -> ScoreBreakdown {
    let has_data = agg.days_logged > 0;
    let lifestyle = (agg.avg_mood + agg.avg_inverted_stress) / 2.0;

    ScoreBreakdown {
        workout: achievement(
            agg.workouts_done as f64,
            goals.target_workouts as f64,
            weights.workout,
            has_data,
        ),
        protein: achievement(agg.avg_protein, goals.target_protein, weights.protein, has_data),
        food_quality: achievement(
            agg.avg_food_quality,
            goals.target_food_quality,
            weights.food_quality,
            has_data,
        ),
        food_portion: achievement(
            agg.avg_portion_points,
            PORTION_SCALE,
            weights.food_portion,
            has_data,
        ),
        water: achievement(agg.avg_water, goals.target_water, weights.water, has_data),
        sleep: achievement(agg.avg_sleep, goals.target_sleep, weights.sleep, has_data),
        lifestyle: achievement(lifestyle, LIFESTYLE_SCALE, weights.lifestyle, has_data),
        calories: budget(agg.avg_calories, goals.max_calories, weights.calories),
    }
}

/// Score one week of records. Never fails: every division is guarded.
pub fn score(records: &[DailyRecord], goals: &GoalConfig, weights: &ScoreWeights) -> WeeklyScore {
    let aggregates = aggregate(records);
    let breakdown = breakdown(&aggregates, goals, weights);

    let total = breakdown.total();
    let score = if total.is_finite() {
        total.round_ties_even().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    log::debug!(
        "Scored {} day(s): {:.2} -> {} ({:?})",
        aggregates.days_logged,
        total,
        score,
        Rating::from_score(score)
    );

    WeeklyScore {
        score,
        rating: Rating::from_score(score),
        breakdown,
        aggregates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodPortion, WeekWindow};
    use chrono::{Duration, NaiveDate};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn record(offset: i64) -> DailyRecord {
        DailyRecord::new(monday() + Duration::days(offset))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn single_monday_example() {
        let mut r = record(0);
        r.workout_done = true;
        r.protein = 100.0;
        r.food_quality = 4;
        r.food_portion = FoodPortion::Normal;
        r.water = 2.0;
        r.sleep = 7.0;
        r.stress = 3;
        r.mood = 4;

        let result = score(&[r], &GoalConfig::default(), &ScoreWeights::default());
        let b = &result.breakdown;
        assert!(approx(b.workout, 7.5));
        assert!(approx(b.protein, 15.0));
        assert!(approx(b.food_quality, 20.0));
        assert!(approx(b.food_portion, 10.0));
        assert!(approx(b.water, 10.0));
        assert!(approx(b.sleep, 7.5));
        assert!(approx(b.lifestyle, 5.25));
        assert!(approx(b.calories, 0.0));
        assert_eq!(result.score, 75);
        assert_eq!(result.rating, Rating::Good);
    }

    #[test]
    fn meeting_every_target_scores_100() {
        let goals = GoalConfig::default();
        let records: Vec<DailyRecord> = (0..4)
            .map(|i| {
                let mut r = record(i);
                r.workout_done = true;
                r.protein = goals.target_protein;
                r.food_quality = 4;
                r.water = goals.target_water;
                r.sleep = goals.target_sleep;
                r.stress = 1;
                r.mood = 5;
                r
            })
            .collect();

        let result = score(&records, &goals, &ScoreWeights::default());
        assert_eq!(result.score, 100);
        assert_eq!(result.rating, Rating::Excellent);
    }

    #[test]
    fn exceeding_targets_is_capped() {
        let mut r = record(0);
        r.protein = 500.0;
        r.water = 10.0;
        r.sleep = 12.0;
        let result = score(&[r], &GoalConfig::default(), &ScoreWeights::default());
        assert!(approx(result.breakdown.protein, 15.0));
        assert!(approx(result.breakdown.water, 10.0));
        assert!(approx(result.breakdown.sleep, 7.5));
        assert!(result.score <= 100);
    }

    #[test]
    fn empty_week_is_zero_and_poor() {
        let result = score(&[], &GoalConfig::default(), &ScoreWeights::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.rating, Rating::Poor);
        assert_eq!(result.aggregates.days_logged, 0);
    }

    #[test]
    fn empty_week_with_calorie_weight_credits_the_budget() {
        let weights = ScoreWeights {
            workout: 20.0,
            calories: 10.0,
            ..ScoreWeights::default()
        };
        let goals = GoalConfig {
            max_calories: Some(2000.0),
            ..GoalConfig::default()
        };
        let result = score(&[], &goals, &weights);
        assert!(approx(result.breakdown.calories, 10.0));
        assert_eq!(result.score, 10);
    }

    #[test]
    fn zero_targets_never_divide_by_zero() {
        let goals = GoalConfig {
            target_workouts: 0,
            target_protein: 0.0,
            target_food_quality: 0.0,
            target_water: 0.0,
            target_sleep: 0.0,
            target_mood: 0.0,
            max_calories: Some(0.0),
        };
        for records in [vec![], vec![record(0)]] {
            let result = score(&records, &goals, &ScoreWeights::default());
            assert!(result.score <= 100);
            assert!(result.breakdown.total().is_finite());
        }
        // with data, inapplicable goals are fully credited
        let result = score(&[record(0)], &goals, &ScoreWeights::default());
        assert!(approx(result.breakdown.workout, 30.0));
        assert!(approx(result.breakdown.protein, 15.0));
    }

    #[test]
    fn portion_points_average() {
        let mut a = record(0);
        a.food_portion = FoodPortion::OverEat;
        let mut b = record(1);
        b.food_portion = FoodPortion::Normal;
        let agg = aggregate(&[a, b]);
        assert!(approx(agg.avg_portion_points, 7.5));
        let bd = breakdown(&agg, &GoalConfig::default(), &ScoreWeights::default());
        assert!(approx(bd.food_portion, 7.5));
    }

    #[test]
    fn lifestyle_blends_mood_and_inverted_stress() {
        let mut r = record(0);
        r.mood = 2;
        r.stress = 5; // inverted -> 1
        let bd = breakdown(&aggregate(&[r]), &GoalConfig::default(), &ScoreWeights::default());
        assert!(approx(bd.lifestyle, (1.5 / 5.0) * 7.5));
    }

    #[test]
    fn calorie_budget() {
        let weights = ScoreWeights {
            workout: 20.0,
            calories: 10.0,
            ..ScoreWeights::default()
        };
        let goals = GoalConfig {
            max_calories: Some(2000.0),
            ..GoalConfig::default()
        };

        let mut under = record(0);
        under.calories = Some(1800.0);
        let bd = breakdown(&aggregate(&[under.clone()]), &goals, &weights);
        assert!(approx(bd.calories, 10.0));

        let mut over = record(1);
        over.calories = Some(2800.0);
        // avg 2300 over a 2000 budget
        let bd = breakdown(&aggregate(&[under, over]), &goals, &weights);
        assert!(approx(bd.calories, 2000.0 / 2300.0 * 10.0));

        // records without calories don't count toward the average
        let mut blank = record(2);
        blank.calories = None;
        let agg = aggregate(&[blank]);
        assert_eq!(agg.avg_calories, None);
        assert!(approx(breakdown(&agg, &goals, &weights).calories, 10.0));
    }

    #[test]
    fn rounds_half_to_even() {
        // 72.5 -> 72
        let weights = ScoreWeights::default();
        let mut r = record(0);
        r.workout_done = false;
        r.protein = 100.0;
        r.food_quality = 4;
        r.water = 2.0;
        r.sleep = 7.0;
        r.mood = 5;
        r.stress = 1;
        // 0 + 15 + 20 + 10 + 10 + 7.5 + 7.5 = 70
        assert_eq!(score(&[r.clone()], &GoalConfig::default(), &weights).score, 70);

        let goals = GoalConfig {
            target_workouts: 12,
            ..GoalConfig::default()
        };
        r.workout_done = true;
        // + 30/12 = 2.5 -> 72.5
        let result = score(&[r], &goals, &weights);
        assert!(approx(result.breakdown.total(), 72.5));
        assert_eq!(result.score, 72);
    }

    #[test]
    fn scores_only_what_the_window_selects() {
        let mut last_week = DailyRecord::new(monday() - Duration::days(1));
        last_week.workout_done = true;
        let this_week = record(2);
        let window = WeekWindow::containing(monday() + Duration::days(3), &[last_week, this_week]);
        let result = score(&window.records, &GoalConfig::default(), &ScoreWeights::default());
        assert_eq!(result.aggregates.days_logged, 1);
        assert_eq!(result.aggregates.workouts_done, 0);
    }

    #[test]
    fn huge_durations_saturate_instead_of_overflowing() {
        let mut a = record(0);
        a.workout_duration = u32::MAX;
        let mut b = record(1);
        b.workout_duration = u32::MAX;
        let agg = aggregate(&[a, b]);
        assert_eq!(agg.total_workout_minutes, u32::MAX);
    }
}
