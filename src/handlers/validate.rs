//! Boundary checks for request payloads. Everything past these helpers may
//! assume well-formed input.

use crate::date_utils;
use crate::error::{AppError, AppResult};
use crate::money::dollars_to_cents;

pub fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

pub fn non_empty(value: Option<String>, field: &str) -> AppResult<String> {
    let value = required(value, field)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// A decimal amount worth at least one cent, converted to cents.
pub fn positive_amount(amount: f64, field: &str) -> AppResult<i64> {
    let cents = if amount.is_finite() { dollars_to_cents(amount) } else { 0 };
    if cents <= 0 {
        return Err(AppError::Validation(format!("{field} must be greater than 0")));
    }
    Ok(cents)
}

pub fn non_negative_amount(amount: f64, field: &str) -> AppResult<i64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::Validation(format!("{field} must not be negative")));
    }
    Ok(dollars_to_cents(amount))
}

pub fn alert_threshold(value: f64) -> AppResult<f64> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::Validation(
            "alert_threshold must be between 0 and 100".into(),
        ));
    }
    Ok(value)
}

/// Normalise a `YYYY-MM-DD` date.
pub fn date(value: &str, field: &str) -> AppResult<String> {
    date_utils::parse_date(value)
        .map(date_utils::format_date)
        .ok_or_else(|| AppError::Validation(format!("{field} must be a date in YYYY-MM-DD format")))
}

pub fn optional_date(value: Option<String>, field: &str) -> AppResult<Option<String>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| date(&v, field))
        .transpose()
}

/// Parse an enum given as its wire string, naming the accepted values on
/// failure.
pub fn one_of<T>(
    value: &str,
    field: &str,
    accepted: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> AppResult<T> {
    parse(value).ok_or_else(|| {
        AppError::Validation(format!("Invalid {field}. Must be {accepted}."))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetPeriod;

    #[test]
    fn test_positive_amount() {
        assert_eq!(positive_amount(12.345, "amount").unwrap(), 1235);
        assert!(positive_amount(0.0, "amount").is_err());
        assert!(positive_amount(-5.0, "amount").is_err());
        assert!(positive_amount(f64::NAN, "amount").is_err());
        // Rounds to zero cents.
        assert!(positive_amount(0.004, "amount").is_err());
        assert_eq!(positive_amount(0.005, "amount").unwrap(), 1);
    }

    #[test]
    fn test_alert_threshold_bounds() {
        assert_eq!(alert_threshold(0.0).unwrap(), 0.0);
        assert_eq!(alert_threshold(100.0).unwrap(), 100.0);
        assert!(alert_threshold(100.5).is_err());
        assert!(alert_threshold(-1.0).is_err());
    }

    #[test]
    fn test_dates() {
        assert_eq!(date(" 2024-03-01 ", "date").unwrap(), "2024-03-01");
        assert!(date("2024-13-01", "date").is_err());
        assert_eq!(optional_date(Some("".into()), "end_date").unwrap(), None);
        assert_eq!(optional_date(None, "end_date").unwrap(), None);
    }

    #[test]
    fn test_one_of() {
        let period = one_of("yearly", "period", "weekly, monthly, or yearly", BudgetPeriod::parse);
        assert_eq!(period.unwrap(), BudgetPeriod::Yearly);

        let err = one_of("daily", "period", "weekly, monthly, or yearly", BudgetPeriod::parse)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid period. Must be weekly, monthly, or yearly."
        );
    }
}
