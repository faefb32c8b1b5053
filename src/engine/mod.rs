//! Quote engine — rate matching over a lender panel, plus the service
//! that feeds it from a market source.

pub mod quote;
pub mod service;

pub use quote::{QuoteEngine, QuotePolicy};
pub use service::QuoteService;
