//! loanquote — command-line entry point.
//!
//! Loads configuration, initialises structured logging, reads the market
//! file named on the command line and prints a quote for the requested
//! loan amount.

use anyhow::Result;
use std::process;
use tracing::{debug, info};

use loanquote::cli;
use loanquote::config::{AppConfig, LoggingConfig};
use loanquote::engine::{QuoteEngine, QuoteService};
use loanquote::market::CsvMarketFile;
use loanquote::report;
use loanquote::types::LoanQuoteError;

/// Bad command line.
const EXIT_USAGE: i32 = 2;
/// Market data missing or unusable, or the quote was refused.
const EXIT_FAILURE: i32 = 1;

fn main() -> Result<()> {
    let cfg = AppConfig::load_or_default()?;
    init_logging(&cfg.logging);

    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", cli::USAGE);
            process::exit(EXIT_USAGE);
        }
    };

    info!(
        market_file = %args.market_file.display(),
        loan_amount = %args.loan_amount,
        "Quote requested"
    );

    let source = CsvMarketFile::with_format(&args.market_file, cfg.market.csv_format());
    let service = QuoteService::new(source, QuoteEngine::new(cfg.quote.policy()));

    let quote = match service.quote(args.loan_amount) {
        Ok(quote) => quote,
        Err(LoanQuoteError::NotFound(path)) => {
            eprintln!("Unable to find the file '{path}'");
            process::exit(EXIT_FAILURE);
        }
        Err(e) => {
            debug!(error = ?e, "Quote failed");
            eprintln!("{e}");
            process::exit(EXIT_FAILURE);
        }
    };

    println!("{}", report::render(&quote, &cfg.output)?);
    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so stdout only
/// ever carries the quote.
fn init_logging(cfg: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("loanquote={}", cfg.level)));

    if cfg.json {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
