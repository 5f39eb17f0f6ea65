//! Request layer for the Shoonya API.
//!
//! A [`Session`](crate::Session) owns one request channel. The channel
//! resolves a [`Route`] through the configured [`RouteTable`], composes the
//! Noren form body, and hands it to a [`Transport`].

mod channel;
mod config;
mod routes;
mod transport;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use routes::{Route, RouteTable};
pub use transport::{HttpTransport, Transport};
pub(crate) use channel::RequestChannel;
