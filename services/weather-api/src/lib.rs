//! Weather API service library.
//!
//! Exposes the lookup service, sweeper and HTTP routes so they can be wired
//! by the binary and exercised by integration tests.

pub mod config;
pub mod lookup;
pub mod metrics;
pub mod provider;
pub mod server;
pub mod sweeper;

pub use lookup::{SearchHistoryItem, WeatherLookupService};
pub use provider::{ProviderFetcher, WeatherApiClient};
pub use server::{create_router, AppState};
pub use sweeper::{ExpirationSweeper, SweepStats};
