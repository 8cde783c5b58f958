use unicode_width::UnicodeWidthStr;

/// Format a number with one decimal, trimming a trailing ".0"
pub fn format_decimal(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Format an optional amount, "-" when absent
pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_decimal).unwrap_or_else(|| "-".to_string())
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: f64, total: f64, width: usize) -> String {
    if total <= 0.0 {
        return "░".repeat(width);
    }
    let ratio = (filled / total).clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Left-align `text` to `width` terminal columns (emoji count double).
pub fn pad_display(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

/// Position of `value` between `min` and `max`, 0.0..=1.0. A flat column sits in the middle.
pub fn gradient_position(value: f64, min: f64, max: f64) -> f64 {
    if max - min <= f64::EPSILON {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals() {
        assert_eq!(format_decimal(2.0), "2");
        assert_eq!(format_decimal(2.26), "2.3");
        assert_eq!(format_decimal(7.5), "7.5");
        assert_eq!(format_optional(None), "-");
        assert_eq!(format_optional(Some(1800.0)), "1800");
    }

    #[test]
    fn bars() {
        assert_eq!(progress_bar(1.0, 4.0, 4), "█░░░");
        assert_eq!(progress_bar(9.0, 4.0, 4), "████");
        assert_eq!(progress_bar(1.0, 0.0, 3), "░░░");
    }

    #[test]
    fn padding_counts_wide_chars() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("💪", 4).chars().count(), 3);
        assert_eq!(pad_display("toolong", 3), "toolong");
    }

    #[test]
    fn gradient() {
        assert_eq!(gradient_position(5.0, 0.0, 10.0), 0.5);
        assert_eq!(gradient_position(3.0, 3.0, 3.0), 0.5);
        assert_eq!(gradient_position(12.0, 0.0, 10.0), 1.0);
    }
}
