//! Form state and the reducer that drives it.
//!
//! `reduce` takes the current state by reference and returns the next one;
//! nothing in here mutates a state that has already been handed out.

use crate::loan::LoanResult;
use crate::validation::{validate_loan_input, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Principal,
    AnnualRate,
    Tenure,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Principal, Field::AnnualRate, Field::Tenure];

    pub fn next(self) -> Self {
        match self {
            Field::Principal => Field::AnnualRate,
            Field::AnnualRate => Field::Tenure,
            Field::Tenure => Field::Principal,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Principal => Field::Tenure,
            Field::AnnualRate => Field::Principal,
            Field::Tenure => Field::AnnualRate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Principal => "Loan Amount (P)",
            Field::AnnualRate => "Annual Rate (%) (R)",
            Field::Tenure => "Loan Tenure (in months) (N)",
        }
    }
}

/// Raw text of the three inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub principal: String,
    pub annual_rate: String,
    pub tenure_months: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Principal => &self.principal,
            Field::AnnualRate => &self.annual_rate,
            Field::Tenure => &self.tenure_months,
        }
    }

    fn with(&self, field: Field, value: String) -> Self {
        let mut fields = self.clone();
        match field {
            Field::Principal => fields.principal = value,
            Field::AnnualRate => fields.annual_rate = value,
            Field::Tenure => fields.tenure_months = value,
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Editing,
    Error(ValidationError),
    Success(LoanResult),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub fields: FormFields,
    /// What `Clear` restores: the fields the form was opened with.
    pub initial: FormFields,
    pub focus: Field,
    pub phase: Phase,
}

impl FormState {
    pub fn new(fields: FormFields) -> Self {
        Self {
            initial: fields.clone(),
            fields,
            focus: Field::Principal,
            phase: Phase::Idle,
        }
    }

    pub fn result(&self) -> Option<&LoanResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match &self.phase {
            Phase::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(FormFields::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Replace the whole text of a field.
    Edit(Field, String),
    FocusNext,
    FocusPrev,
    Calculate,
    Clear,
}

pub fn reduce(state: &FormState, event: FormEvent) -> FormState {
    match event {
        FormEvent::Edit(field, value) => FormState {
            fields: state.fields.with(field, value),
            phase: Phase::Editing,
            ..state.clone()
        },
        FormEvent::FocusNext => FormState {
            focus: state.focus.next(),
            ..state.clone()
        },
        FormEvent::FocusPrev => FormState {
            focus: state.focus.prev(),
            ..state.clone()
        },
        FormEvent::Calculate => {
            let fields = &state.fields;
            let phase = match validate_loan_input(
                &fields.principal,
                &fields.annual_rate,
                &fields.tenure_months,
            ) {
                Ok(input) => {
                    let result = input.compute();
                    log::info!(
                        "calculated emi {:.2} for principal {} at {}% over {} months",
                        result.installment,
                        input.principal,
                        input.annual_rate_percent,
                        input.tenure_months
                    );
                    Phase::Success(result)
                }
                Err(err) => {
                    log::warn!("rejected loan input {:?}: {}", fields, err);
                    Phase::Error(err)
                }
            };
            FormState {
                phase,
                ..state.clone()
            }
        }
        FormEvent::Clear => FormState {
            fields: state.initial.clone(),
            phase: Phase::Idle,
            ..state.clone()
        },
    }
}
