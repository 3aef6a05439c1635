//! Loan EMI arithmetic: fixed monthly installment, total interest, a
//! month-by-month amortization schedule and the effect of a recurring
//! monthly prepayment on tenure and interest.
//!
//! Every function is pure. Money is `f64`, rounded half away from zero to
//! whole cents at the points where a figure is reported.

pub mod error;
pub mod loan;
pub mod prepayment;
pub mod schedule;

pub use error::{LoanError, LoanResult};
pub use loan::{
    calculate_emi, calculate_total_interest, summarize, LoanConfig, LoanSummary, Tenure,
};
pub use prepayment::{calculate_prepayment_impact, prepayment_impact_for, PrepaymentImpact};
pub use schedule::{
    generate_dated_schedule, generate_schedule, generate_schedule_for, DatedMonthRecord,
    MonthRecord,
};
