//! API service modules for authenticated Noren endpoints.

mod portfolio;

pub use portfolio::{LimitsQuery, PortfolioService};
