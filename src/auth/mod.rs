//! Authentication and session management for the Shoonya API.
//!
//! Two login paths exist:
//!
//! 1. **Second factor** - password plus an OTP or TOTP (`factor2`)
//! 2. **PIN** - password plus a PIN registered earlier with
//!    [`Session::set_pin`]
//!
//! Passwords, PINs and the API key never leave the process in plaintext
//! during login; each is sent as a SHA-256 hex digest (see [`sha256_hex`]).
//!
//! ```no_run
//! use shoonya_rs::{LoginCredentials, Session};
//!
//! # async fn example() -> shoonya_rs::Result<()> {
//! let session = Session::new("FA12345")?;
//! let creds = LoginCredentials::new("password", "FA12345_U", "api-key").pin("1234");
//! let reply = session.login(&creds).await?;
//! println!("logged in as {:?}", reply.uname);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod hash;
mod session;

pub use credentials::{LoginCredentials, DEFAULT_IMEI};
pub use hash::sha256_hex;
pub use session::{Session, SessionBuilder};
pub(crate) use session::{SessionInner, SharedState};
#[cfg(test)]
pub(crate) use session::SessionState;
