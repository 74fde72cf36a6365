/// A validated loan request. Only `validation::validate_loan_input` builds one
/// from user text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

impl LoanInput {
    pub fn compute(&self) -> LoanResult {
        compute_emi(self.principal, self.annual_rate_percent, self.tenure_months)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanResult {
    pub principal: f64,
    pub installment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
}

/// Equated monthly instalment on a reducing balance.
///
/// Expects `principal > 0`, `annual_rate_percent >= 0` and `tenure_months >= 1`;
/// nothing is checked here. No rounding is applied.
pub fn compute_emi(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> LoanResult {
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let months = tenure_months as f64;

    if monthly_rate == 0.0 {
        return LoanResult {
            principal,
            installment: principal / months,
            total_interest: 0.0,
            total_payment: principal,
        };
    }

    // P·r·f / (f − 1) with f = (1 + r)^n, rewritten as P·r / (1 − (1 + r)^−n).
    // `ln_1p`/`exp_m1` keep tiny rates from cancelling and long tenures from
    // overflowing: the result tends to P/n as r → 0 and to P·r as n → ∞.
    let discount = -(-months * monthly_rate.ln_1p()).exp_m1();
    let installment = principal * monthly_rate / discount;
    let total_payment = installment * months;

    LoanResult {
        principal,
        installment,
        total_interest: total_payment - principal,
        total_payment,
    }
}
