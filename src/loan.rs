use log::warn;
use std::fmt;

use crate::error::{LoanError, LoanResult};

/// Decimal places every reported money figure is rounded to.
pub const CENTS: i32 = 2;

/// Upper bound accepted for the annual rate, in percent.
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.;

/// Loan duration as entered by a borrower.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tenure {
    Months(u32),
    Years(u32),
}

impl Tenure {
    pub fn to_months(self) -> LoanResult<u32> {
        match self {
            Tenure::Months(months) => Ok(months),
            Tenure::Years(years) => years.checked_mul(12).ok_or_else(|| {
                LoanError::invalid("tenure_months", "too many years to count in months")
            }),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanConfig {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
    pub prepayment_amount: f64,
}

impl LoanConfig {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure: Tenure) -> LoanResult<Self> {
        Ok(Self {
            principal,
            annual_rate_percent,
            tenure_months: tenure.to_months()?,
            prepayment_amount: 0.,
        })
    }

    /// Extra amount paid towards principal every month on top of the EMI.
    pub fn with_prepayment(mut self, prepayment_amount: f64) -> Self {
        self.prepayment_amount = prepayment_amount;
        self
    }

    pub fn validate(&self) -> LoanResult<()> {
        check_terms(self.principal, self.annual_rate_percent, self.tenure_months)?;
        check_prepayment(self.prepayment_amount)
    }

    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanSummary {
    pub emi: f64,
    pub total_interest: f64,
    pub total_payable: f64,
}

impl fmt::Display for LoanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "monthly EMI ${:.2}, total interest ${:.2}, total payable ${:.2}",
            self.emi, self.total_interest, self.total_payable
        )
    }
}

/// Rounds half away from zero to `dec_places`.
pub fn round_to(amt: f64, dec_places: i32) -> f64 {
    if amt == 0. {
        0.
    } else {
        let scale = 10_f64.powi(dec_places);
        (amt * scale).round() / scale
    }
}

pub(crate) fn round_cents(amt: f64) -> f64 {
    round_to(amt, CENTS)
}

pub(crate) fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12. / 100.
}

pub(crate) fn check_terms(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> LoanResult<()> {
    let err = if !principal.is_finite() || principal <= 0. {
        Some(LoanError::invalid("principal", "must be a positive amount"))
    } else if !annual_rate_percent.is_finite()
        || !(0. ..=MAX_ANNUAL_RATE_PERCENT).contains(&annual_rate_percent)
    {
        Some(LoanError::invalid(
            "annual_rate_percent",
            "must be between 0 and 100 percent",
        ))
    } else if tenure_months == 0 {
        Some(LoanError::invalid("tenure_months", "must be at least one month"))
    } else {
        None
    };

    match err {
        Some(err) => {
            warn!("rejected loan terms: {}", err);
            Err(err)
        }
        None => Ok(()),
    }
}

pub(crate) fn check_prepayment(prepayment_amount: f64) -> LoanResult<()> {
    if !prepayment_amount.is_finite() || prepayment_amount < 0. {
        let err = LoanError::invalid("prepayment_amount", "must be zero or a positive amount");
        warn!("rejected prepayment: {}", err);
        return Err(err);
    }
    Ok(())
}

/// Fixed monthly installment that amortizes `principal` over `tenure_months`
/// at `annual_rate_percent`, rounded to cents.
///
/// A zero rate spreads the principal evenly over the tenure. Terms whose
/// rounded installment would not pay down any principal in the first month
/// are rejected.
pub fn calculate_emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> LoanResult<f64> {
    check_terms(principal, annual_rate_percent, tenure_months)?;
    amortizing_emi(principal, monthly_rate(annual_rate_percent), tenure_months)
}

pub(crate) fn amortizing_emi(
    principal: f64,
    pmt_rate: f64,
    tenure_months: u32,
) -> LoanResult<f64> {
    let emi = if pmt_rate == 0. {
        round_cents(principal / tenure_months as f64)
    } else {
        // 1 - (1 + r)^-n, which stays finite for any tenure
        let discount = -(-(tenure_months as f64) * pmt_rate.ln_1p()).exp_m1();
        round_cents(principal * pmt_rate / discount)
    };

    if !emi.is_finite() || emi <= principal * pmt_rate {
        let err = LoanError::invalid(
            "principal",
            "installment rounds to no more than the first month's interest",
        );
        warn!("rejected loan terms: {} (emi {})", err, emi);
        return Err(err);
    }
    Ok(emi)
}

/// Interest paid over the life of the loan when every installment is `emi`.
pub fn calculate_total_interest(emi: f64, tenure_months: u32, principal: f64) -> LoanResult<f64> {
    if !emi.is_finite() || emi < 0. {
        let err = LoanError::invalid("emi", "must be zero or a positive amount");
        warn!("rejected installment: {}", err);
        return Err(err);
    }
    check_terms(principal, 0., tenure_months)?;

    Ok(round_cents(emi * tenure_months as f64 - principal))
}

pub fn summarize(config: &LoanConfig) -> LoanResult<LoanSummary> {
    config.validate()?;
    let emi = calculate_emi(
        config.principal,
        config.annual_rate_percent,
        config.tenure_months,
    )?;
    let total_interest = calculate_total_interest(emi, config.tenure_months, config.principal)?;

    Ok(LoanSummary {
        emi,
        total_interest,
        total_payable: round_cents(config.principal + total_interest),
    })
}
