use log::debug;
use std::fmt;

use crate::error::LoanResult;
use crate::loan::{round_cents, LoanConfig};
use crate::schedule::{generate_schedule, total_interest_paid};

/// What a recurring monthly prepayment does to the loan: the installment
/// stays the same, the tenure shrinks.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrepaymentImpact {
    pub original_tenure_months: u32,
    pub new_tenure_months: u32,
    pub months_reduced: u32,
    pub interest_saved: f64,
}

impl fmt::Display for PrepaymentImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tenure {} -> {} months ({} fewer), interest saved ${:.2}",
            self.original_tenure_months,
            self.new_tenure_months,
            self.months_reduced,
            self.interest_saved
        )
    }
}

/// Compares the plain schedule with one where `prepayment_amount` is paid
/// towards principal every month.
pub fn calculate_prepayment_impact(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
    prepayment_amount: f64,
) -> LoanResult<PrepaymentImpact> {
    let baseline = generate_schedule(principal, annual_rate_percent, tenure_months, 0.)?;
    let prepaid = generate_schedule(
        principal,
        annual_rate_percent,
        tenure_months,
        prepayment_amount,
    )?;

    let new_tenure_months = prepaid.len() as u32;
    let baseline_interest = total_interest_paid(&baseline);
    let prepaid_interest = total_interest_paid(&prepaid);
    debug!(
        "prepayment {}: {} months / interest {} vs {} months / interest {}",
        prepayment_amount,
        baseline.len(),
        baseline_interest,
        new_tenure_months,
        prepaid_interest
    );

    Ok(PrepaymentImpact {
        original_tenure_months: tenure_months,
        new_tenure_months,
        months_reduced: tenure_months - new_tenure_months,
        interest_saved: round_cents(baseline_interest - prepaid_interest),
    })
}

pub fn prepayment_impact_for(config: &LoanConfig) -> LoanResult<PrepaymentImpact> {
    calculate_prepayment_impact(
        config.principal,
        config.annual_rate_percent,
        config.tenure_months,
        config.prepayment_amount,
    )
}

#[cfg(test)]
mod tests {
    use super::{calculate_prepayment_impact, prepayment_impact_for, PrepaymentImpact};
    use crate::loan::{LoanConfig, Tenure};
    use crate::schedule::generate_schedule_for;
    use test_log::test;

    #[test]
    fn test_no_prepayment_has_no_impact() {
        let impact = calculate_prepayment_impact(500000., 8.5, 240, 0.).unwrap();

        assert_eq!(
            impact,
            PrepaymentImpact {
                original_tenure_months: 240,
                new_tenure_months: 240,
                months_reduced: 0,
                interest_saved: 0.,
            }
        );
    }

    #[test]
    fn test_twenty_year_loan_with_prepayment() {
        let impact = calculate_prepayment_impact(500000., 8.5, 240, 5000.).unwrap();

        assert_eq!(impact.new_tenure_months, 68);
        assert_eq!(impact.months_reduced, 172);
        assert!(impact.interest_saved > 0.);
        assert!((impact.interest_saved - 410519.69).abs() < 0.05, "{}", impact);
    }

    #[test]
    fn test_impact_matches_schedule() {
        let config = LoanConfig::new(100000., 10., Tenure::Years(1))
            .unwrap()
            .with_prepayment(20000.);
        let impact = prepayment_impact_for(&config).unwrap();
        let sched = generate_schedule_for(&config).unwrap();

        assert_eq!(impact.new_tenure_months as usize, sched.len());
        assert_eq!(impact.new_tenure_months, 5);
        assert_eq!(impact.months_reduced, 7);
        assert_eq!(
            impact.to_string(),
            format!(
                "tenure 12 -> 5 months (7 fewer), interest saved ${:.2}",
                impact.interest_saved
            )
        );
    }

    #[test]
    fn test_small_prepayment_never_lengthens_tenure() {
        for prepayment in [1., 50., 250., 1000.] {
            let impact = calculate_prepayment_impact(250000., 7.25, 180, prepayment).unwrap();
            assert!(impact.new_tenure_months <= 180);
            assert!(impact.interest_saved >= 0.);
        }
    }

    #[test]
    fn test_impact_rejects_bad_input() {
        assert!(calculate_prepayment_impact(100000., 10., 12, -1.).is_err());
        assert!(calculate_prepayment_impact(100000., 120., 12, 100.).is_err());
        assert!(calculate_prepayment_impact(1000., 100., 9000, 10.).is_err());
        assert!(calculate_prepayment_impact(1., 1., 360, 0.5).is_err());
    }
}
