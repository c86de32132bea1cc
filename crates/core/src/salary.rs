//! Salary amount validation and averaging over recent payments.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Longest averaging window accepted, in months (ten years of payroll).
pub const MAX_AVERAGE_MONTHS: u32 = 120;

/// Validate a salary amount: finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::Validation(
            "Salary amount must be a finite number".to_string(),
        ));
    }
    if amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "Salary amount must be >= 0, got {amount}"
        )));
    }
    Ok(())
}

/// Validate the averaging window requested by a caller.
pub fn validate_months(months: u32) -> Result<(), CoreError> {
    if months == 0 || months > MAX_AVERAGE_MONTHS {
        return Err(CoreError::Validation(format!(
            "months must be between 1 and {MAX_AVERAGE_MONTHS}, got {months}"
        )));
    }
    Ok(())
}

/// Average of the `months` most recent payments.
///
/// Payments are `(paid_on, amount)` pairs in any order. One payment is
/// counted per month of the window, so the `months` newest payments are
/// averaged. Returns `Ok(None)` when there are no payments at all; when fewer
/// than `months` payments exist, all of them are averaged.
pub fn average_salary(
    payments: &[(NaiveDate, f64)],
    months: u32,
) -> Result<Option<f64>, CoreError> {
    validate_months(months)?;

    if payments.is_empty() {
        return Ok(None);
    }

    let mut sorted: Vec<&(NaiveDate, f64)> = payments.iter().collect();
    sorted.sort_by(|a, b| b.0.cmp(&a.0));

    let window: Vec<f64> = sorted
        .into_iter()
        .take(months as usize)
        .map(|(_, amount)| *amount)
        .collect();

    let total: f64 = window.iter().sum();
    Ok(Some(total / window.len() as f64))
}
