use chrono::NaiveDate;

use crate::models::record::{SLIDER_MAX, SLIDER_MIN};
use crate::models::{DailyRecord, FoodPortion, Intensity, WorkoutType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    WorkoutDone,
    WorkoutType,
    Duration,
    Intensity,
    Protein,
    FoodQuality,
    FoodPortion,
    Water,
    Sleep,
    Stress,
    Mood,
    Calories,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::WorkoutDone,
        FormField::WorkoutType,
        FormField::Duration,
        FormField::Intensity,
        FormField::Protein,
        FormField::FoodQuality,
        FormField::FoodPortion,
        FormField::Water,
        FormField::Sleep,
        FormField::Stress,
        FormField::Mood,
        FormField::Calories,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::WorkoutDone => "Workout done today",
            FormField::WorkoutType => "Workout type",
            FormField::Duration => "Duration (minutes)",
            FormField::Intensity => "Intensity",
            FormField::Protein => "Protein (g)",
            FormField::FoodQuality => "Food quality (1=poor, 5=excellent)",
            FormField::FoodPortion => "Food portion",
            FormField::Water => "Water (liters)",
            FormField::Sleep => "Sleep (hrs)",
            FormField::Stress => "Stress level (1 low - 5 high)",
            FormField::Mood => "Mood / Energy level (1 low - 5 high)",
            FormField::Calories => "Calories (kcal, optional)",
        }
    }

    /// Section heading printed above this field, if it opens one.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            FormField::WorkoutDone => Some("Workout"),
            FormField::Protein => Some("Food"),
            FormField::Sleep => Some("Lifestyle"),
            _ => None,
        }
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, delta: i32) -> T {
    let len = options.len() as i32;
    let idx = options.iter().position(|o| *o == current).unwrap_or(0) as i32;
    options[(idx + delta).rem_euclid(len) as usize]
}

fn step_slider(value: u8, delta: i32) -> u8 {
    (value as i32 + delta).clamp(SLIDER_MIN as i32, SLIDER_MAX as i32) as u8
}

/// Non-negative stepper, snapped to the step and to one decimal.
fn step_amount(value: f64, step: f64, delta: i32) -> f64 {
    let next = (value + step * delta as f64).max(0.0);
    let snapped = (next / step).round() * step;
    (snapped * 10.0).round() / 10.0
}

/// The daily input form. Enforces the input constraints before a record reaches the store.
#[derive(Debug, Clone)]
pub struct DailyForm {
    pub record: DailyRecord,
    pub focus: usize,
}

impl DailyForm {
    /// Start from the saved entry for `date` when one exists.
    pub fn for_day(date: NaiveDate, existing: Option<DailyRecord>) -> Self {
        let record = existing
            .filter(|r| r.date == date)
            .unwrap_or_else(|| DailyRecord::new(date));
        Self { record, focus: 0 }
    }

    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focus.min(FormField::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        if self.focus + 1 < FormField::ALL.len() {
            self.focus += 1;
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Move the focused field `delta` steps. Categories wrap, numbers clamp.
    pub fn adjust(&mut self, delta: i32) {
        let field = self.focused();
        let r = &mut self.record;
        match field {
            FormField::WorkoutDone => {
                if delta != 0 {
                    r.workout_done = !r.workout_done;
                }
            }
            FormField::WorkoutType => {
                r.workout_type = cycle(&WorkoutType::all(), r.workout_type, delta);
            }
            FormField::Duration => {
                r.workout_duration = step_amount(r.workout_duration as f64, 5.0, delta) as u32;
            }
            FormField::Intensity => {
                r.intensity = cycle(&Intensity::all(), r.intensity, delta);
            }
            FormField::Protein => r.protein = step_amount(r.protein, 5.0, delta),
            FormField::FoodQuality => r.food_quality = step_slider(r.food_quality, delta),
            FormField::FoodPortion => {
                r.food_portion = cycle(&FoodPortion::all(), r.food_portion, delta);
            }
            FormField::Water => r.water = step_amount(r.water, 0.1, delta),
            FormField::Sleep => r.sleep = step_amount(r.sleep, 1.0, delta),
            FormField::Stress => r.stress = step_slider(r.stress, delta),
            FormField::Mood => r.mood = step_slider(r.mood, delta),
            FormField::Calories => {
                let next = step_amount(r.calories.unwrap_or(0.0), 50.0, delta);
                r.calories = if next > 0.0 { Some(next) } else { None };
            }
        }
    }

    /// Space: flip the checkbox, advance a picker.
    pub fn toggle(&mut self) {
        match self.focused() {
            FormField::WorkoutDone
            | FormField::WorkoutType
            | FormField::Intensity
            | FormField::FoodPortion => self.adjust(1),
            _ => {}
        }
    }

    pub fn value_text(&self, field: FormField) -> String {
        let r = &self.record;
        match field {
            FormField::WorkoutDone => if r.workout_done { "[x]" } else { "[ ]" }.to_string(),
            FormField::WorkoutType => r.workout_type.to_string(),
            FormField::Duration => r.workout_duration.to_string(),
            FormField::Intensity => r.intensity.to_string(),
            FormField::Protein => format!("{:.0}", r.protein),
            FormField::FoodQuality => r.food_quality.to_string(),
            FormField::FoodPortion => r.food_portion.to_string(),
            FormField::Water => format!("{:.1}", r.water),
            FormField::Sleep => format!("{:.0}", r.sleep),
            FormField::Stress => r.stress.to_string(),
            FormField::Mood => r.mood.to_string(),
            FormField::Calories => r
                .calories
                .map(|c| format!("{:.0}", c))
                .unwrap_or_else(|| "-".to_string()),
        }
    }

    /// Slider position as (value, max) for drawing a 1-5 scale.
    pub fn slider(&self, field: FormField) -> Option<(u8, u8)> {
        let r = &self.record;
        match field {
            FormField::FoodQuality => Some((r.food_quality, SLIDER_MAX)),
            FormField::Stress => Some((r.stress, SLIDER_MAX)),
            FormField::Mood => Some((r.mood, SLIDER_MAX)),
            _ => None,
        }
    }

    pub fn to_record(&self) -> DailyRecord {
        self.record.clone()
    }
}
