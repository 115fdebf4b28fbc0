//! Heuristic extraction confidence.

use super::patterns::DIGIT_RUN;

/// Words whose presence suggests the text really is an invoice.
const KEY_ELEMENTS: &[&str] = &["invoice", "total", "date", "amount"];

/// Text length at which the length factor saturates.
const FULL_LENGTH: f64 = 1000.0;

/// Digit runs at which the numeric factor saturates.
const FULL_DIGIT_RUNS: f64 = 10.0;

/// Mean of the length, keyword and numeric-density factors (each 0-100),
/// rounded to one decimal. Empty text scores 0.
pub fn confidence_score(text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }

    let length_score = (text.chars().count() as f64 / FULL_LENGTH).min(1.0) * 100.0;

    let lower = text.to_lowercase();
    let present = KEY_ELEMENTS.iter().filter(|e| lower.contains(*e)).count();
    let element_score = present as f64 / KEY_ELEMENTS.len() as f64 * 100.0;

    let digit_runs = DIGIT_RUN.find_iter(text).count();
    let number_score = (digit_runs as f64 / FULL_DIGIT_RUNS).min(1.0) * 100.0;

    let mean = (length_score + element_score + number_score) / 3.0;
    ((mean * 10.0).round() / 10.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(confidence_score(""), 0.0);
    }

    #[test]
    fn test_factors() {
        // 100 chars -> 10, all four keywords -> 100, 10 digit runs -> 100.
        let mut text = String::from("invoice total date amount 1 2 3 4 5 6 7 8 9 10");
        while text.chars().count() < 100 {
            text.push('.');
        }
        assert_eq!(confidence_score(&text), 70.0);
    }

    #[test]
    fn test_saturates_at_100() {
        let text = format!("invoice total date amount {}", "12 ".repeat(400));
        assert_eq!(confidence_score(&text), 100.0);
    }

    #[test]
    fn test_rounded_to_one_decimal() {
        // 1 char -> 0.1, no keywords -> 0, one digit run -> 10; mean 3.3666..
        assert_eq!(confidence_score("7"), 3.4);
    }
}
