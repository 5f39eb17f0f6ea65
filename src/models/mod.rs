//! Data models for the Shoonya API.
//!
//! - [`enums`] - Product, segment and exchange codes
//! - [`response`] - Status objects, login replies and list envelopes
//! - [`portfolio`] - Holdings, limits and positions

mod de;
pub mod enums;
pub mod portfolio;
pub mod response;

pub use enums::*;
pub use portfolio::*;
pub use response::*;
