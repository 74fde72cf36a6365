use thiserror::Error;

use crate::loan::LoanInput;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Which field failed is deliberately not reported.
    #[error("All fields must be positive numbers, and Loan Tenure must be a positive integer in months.")]
    InvalidInput,
}

/// Parse the three raw form fields into a `LoanInput`.
///
/// A rate of exactly zero is accepted; `compute_emi` has a dedicated branch for it.
pub fn validate_loan_input(
    raw_principal: &str,
    raw_rate: &str,
    raw_tenure: &str,
) -> Result<LoanInput, ValidationError> {
    let principal = parse_finite(raw_principal)?;
    let annual_rate_percent = parse_finite(raw_rate)?;
    let tenure_months: u32 = raw_tenure
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidInput)?;

    if principal <= 0.0 || annual_rate_percent < 0.0 || tenure_months == 0 {
        return Err(ValidationError::InvalidInput);
    }

    Ok(LoanInput {
        principal,
        annual_rate_percent,
        tenure_months,
    })
}

// `f64::from_str` also accepts "inf" and "NaN".
fn parse_finite(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_input() {
        let input = validate_loan_input("100000", "12", "12").unwrap();
        assert_eq!(input.principal, 100_000.0);
        assert_eq!(input.annual_rate_percent, 12.0);
        assert_eq!(input.tenure_months, 12);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let input = validate_loan_input(" 2500.50 ", "\t7.25", "36 ").unwrap();
        assert_eq!(input.principal, 2500.5);
        assert_eq!(input.annual_rate_percent, 7.25);
        assert_eq!(input.tenure_months, 36);
    }

    #[test]
    fn accepts_zero_rate() {
        let input = validate_loan_input("100000", "0", "12").unwrap();
        assert_eq!(input.annual_rate_percent, 0.0);
    }

    #[test]
    fn rejects_bad_principal() {
        for principal in ["0", "-5000", "", "abc", "inf", "NaN"] {
            assert_eq!(
                validate_loan_input(principal, "10", "12"),
                Err(ValidationError::InvalidInput),
                "principal {principal:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_rate() {
        for rate in ["-1", "-0.01", "", "ten", "-inf"] {
            assert_eq!(
                validate_loan_input("1000", rate, "12"),
                Err(ValidationError::InvalidInput),
                "rate {rate:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_tenure() {
        for tenure in ["0", "-12", "2.5", "abc", "", "12 months"] {
            assert_eq!(
                validate_loan_input("1000", "10", tenure),
                Err(ValidationError::InvalidInput),
                "tenure {tenure:?}"
            );
        }
    }

    #[test]
    fn message_is_fixed() {
        assert_eq!(
            ValidationError::InvalidInput.to_string(),
            "All fields must be positive numbers, and Loan Tenure must be a positive integer in months."
        );
    }
}
