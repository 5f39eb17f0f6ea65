//! # shoonya-rs
//!
//! An async Rust client for the Shoonya (Noren) brokerage API.
//!
//! The crate covers the session lifecycle and account queries:
//!
//! - **Authentication**: second-factor and PIN logins, PIN registration,
//!   logout
//! - **Portfolio**: holdings, cash and margin limits, positions
//! - **Transport**: a pluggable [`Transport`](client::Transport) with a
//!   `reqwest` default, configurable routes and base URL
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shoonya_rs::{LoginCredentials, Session};
//!
//! #[tokio::main]
//! async fn main() -> shoonya_rs::Result<()> {
//!     let session = Session::builder("FA12345").debug(true).build()?;
//!
//!     let creds = LoginCredentials::new("password", "FA12345_U", "api-key")
//!         .factor2("123456");
//!     session.login(&creds).await?;
//!
//!     let positions = session.portfolio().positions().await?;
//!     for position in positions.records() {
//!         println!("{:?}: {:?}", position.tsym, position.netqty);
//!     }
//!
//!     session.logout().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{LoginCredentials, Session, SessionBuilder};
pub use client::{ClientConfig, RouteTable};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// ```rust
/// use shoonya_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{LimitsQuery, PortfolioService};
    pub use crate::auth::{LoginCredentials, Session, SessionBuilder};
    pub use crate::client::{ClientConfig, Route, RouteTable, Transport};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Exchange, Holding, Limits, ListResponse, LoginResponse, Position, ProductType,
        Segment, StatusResponse,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(
            ClientConfig::default().base_url,
            "https://api.shoonya.com/NorenWClientTP"
        );
    }

    #[test]
    fn test_password_hash_is_sha256_hex() {
        let digest = auth::sha256_hex("password");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
