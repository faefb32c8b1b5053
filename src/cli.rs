//! Command-line argument handling.
//!
//! Two positional arguments: the market file and the loan amount.

use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "Usage: loanquote <market_file> <loan_amount>";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub market_file: PathBuf,
    pub loan_amount: Decimal,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("This program accepts 2 parameters - market_file <string> and loan_amount <decimal> (got {0})")]
    ArgumentCount(usize),

    #[error("Unable to parse a decimal from your second parameter '{0}'")]
    InvalidAmount(String),
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, T>(args: I) -> Result<CliArgs, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let [market_file, amount] = args.as_slice() else {
        return Err(UsageError::ArgumentCount(args.len()));
    };

    let loan_amount = Decimal::from_str(amount.trim())
        .map_err(|_| UsageError::InvalidAmount(amount.clone()))?;

    Ok(CliArgs {
        market_file: PathBuf::from(market_file),
        loan_amount,
    })
}
