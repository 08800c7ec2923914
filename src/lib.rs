//! devdash library
//!
//! Cached HTTP client for a country development dashboard backend and for
//! public indicator APIs (WHO GHO, World Bank, UNESCO UIS, REST Countries).
//!
//! ```no_run
//! use devdash::{ApiClient, ClientConfig};
//! use devdash::data::CountryEndpoints;
//!
//! # async fn demo() -> devdash::Result<()> {
//! let client = ApiClient::new(ClientConfig::default())?;
//! let uganda = CountryEndpoints::new(client);
//! let summary = uganda.summary().await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod client;
pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod fallback;
pub mod format;
pub mod logging;
pub mod probe;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
