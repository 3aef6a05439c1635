use chrono::NaiveDate;
use clap::Parser;
use emi::{
    generate_dated_schedule, generate_schedule_for, prepayment_impact_for, summarize,
    LoanConfig, LoanResult, Tenure,
};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

/// Prints the EMI, the amortization schedule and the effect of a monthly
/// prepayment for a loan.
#[derive(Parser, Debug)]
#[command(name = "emi", version)]
struct Args {
    /// Loan amount
    #[arg(long)]
    principal: f64,

    /// Annual interest rate in percent, e.g. 8.5
    #[arg(long)]
    rate: f64,

    /// Loan tenure, in months unless --years is given
    #[arg(long)]
    tenure: u32,

    /// Read --tenure as years
    #[arg(long)]
    years: bool,

    /// Extra amount paid towards principal every month
    #[arg(long, default_value_t = 0.)]
    prepayment: f64,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    first_due: Option<NaiveDate>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Args {
    fn loan_config(&self) -> LoanResult<LoanConfig> {
        let tenure = if self.years {
            Tenure::Years(self.tenure)
        } else {
            Tenure::Months(self.tenure)
        };
        Ok(LoanConfig::new(self.principal, self.rate, tenure)?.with_prepayment(self.prepayment))
    }
}

fn main() {
    if let Err(err) = try_run(Args::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(args.log_level).init()?;

    let config = args.loan_config()?;
    info!("loan {:?}", config);

    println!("{}", summarize(&config)?);

    match args.first_due {
        Some(first_due) => {
            for pmt in generate_dated_schedule(&config, first_due)? {
                println!("{}", pmt);
            }
        }
        None => {
            for pmt in generate_schedule_for(&config)? {
                println!("{}", pmt);
            }
        }
    }

    if config.prepayment_amount > 0. {
        println!("{}", prepayment_impact_for(&config)?);
    }
    Ok(())
}
