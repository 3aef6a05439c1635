use chrono::{Months, NaiveDate};
use log::trace;
use std::fmt;

use crate::error::{LoanError, LoanResult};
use crate::loan::{
    amortizing_emi, check_prepayment, check_terms, monthly_rate, round_cents, LoanConfig,
};

/// A balance below half a cent is treated as repaid.
const SETTLE_THRESHOLD: f64 = 0.005;

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthRecord {
    pub month: u32,
    pub emi_paid: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining_balance: f64,
}

impl MonthRecord {
    pub fn new(
        month: u32,
        emi_paid: f64,
        principal_paid: f64,
        interest_paid: f64,
        remaining_balance: f64,
    ) -> Self {
        Self {
            month,
            emi_paid,
            principal_paid,
            interest_paid,
            remaining_balance,
        }
    }
}

impl fmt::Display for MonthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month {}, payment ${:.2}, principal paid ${:.2}, interest paid ${:.2}, ending balance ${:.2}",
            self.month,
            self.emi_paid,
            self.principal_paid,
            self.interest_paid,
            self.remaining_balance
        )
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatedMonthRecord {
    pub due_date: NaiveDate,
    pub record: MonthRecord,
}

impl fmt::Display for DatedMonthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.due_date, self.record)
    }
}

/// Month-by-month amortization of the loan.
///
/// The EMI is fixed up front for the full principal and tenure. A non-zero
/// `prepayment_amount` is paid towards principal every month while the
/// outstanding balance still exceeds it, which shortens the schedule. The
/// final record always closes the balance at exactly zero and no record
/// follows it.
pub fn generate_schedule(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
    prepayment_amount: f64,
) -> LoanResult<Vec<MonthRecord>> {
    check_terms(principal, annual_rate_percent, tenure_months)?;
    check_prepayment(prepayment_amount)?;

    let pmt_rate = monthly_rate(annual_rate_percent);
    let emi = amortizing_emi(principal, pmt_rate, tenure_months)?;

    let mut sched_pmts: Vec<MonthRecord> = Vec::new();
    let mut remaining_balance = principal;

    for month in 1..=tenure_months {
        let interest = remaining_balance * pmt_rate;
        let mut principal_part = emi - interest;

        if prepayment_amount > 0. && remaining_balance > prepayment_amount {
            principal_part += prepayment_amount;
        }

        remaining_balance -= principal_part;

        // overshoot, sub-cent dust, or a residual left by the rounded EMI
        // in the last month all go into this payment
        if remaining_balance < SETTLE_THRESHOLD || month == tenure_months {
            principal_part += remaining_balance;
            remaining_balance = 0.;
        }
        trace!(
            "month {}, interest {}, principal {}, end bal {}",
            month,
            interest,
            principal_part,
            remaining_balance
        );

        sched_pmts.push(MonthRecord::new(
            month,
            round_cents(principal_part + interest),
            round_cents(principal_part),
            round_cents(interest),
            round_cents(remaining_balance),
        ));

        if remaining_balance == 0. {
            break;
        }
    }
    Ok(sched_pmts)
}

pub fn generate_schedule_for(config: &LoanConfig) -> LoanResult<Vec<MonthRecord>> {
    generate_schedule(
        config.principal,
        config.annual_rate_percent,
        config.tenure_months,
        config.prepayment_amount,
    )
}

/// Same schedule as [`generate_schedule_for`], with month `n` falling due
/// `n - 1` calendar months after `first_due_date`.
pub fn generate_dated_schedule(
    config: &LoanConfig,
    first_due_date: NaiveDate,
) -> LoanResult<Vec<DatedMonthRecord>> {
    generate_schedule_for(config)?
        .into_iter()
        .map(|record| {
            let due_date = first_due_date
                .checked_add_months(Months::new(record.month - 1))
                .ok_or_else(|| {
                    LoanError::DateError(format!(
                        "{} does not return a due date for month {}",
                        first_due_date, record.month
                    ))
                })?;
            Ok(DatedMonthRecord { due_date, record })
        })
        .collect()
}

pub fn total_interest_paid(schedule: &[MonthRecord]) -> f64 {
    round_cents(schedule.iter().map(|r| r.interest_paid).sum())
}

pub fn total_principal_paid(schedule: &[MonthRecord]) -> f64 {
    round_cents(schedule.iter().map(|r| r.principal_paid).sum())
}
