//! EdgeGrid signed-request transport
//!
//! This crate provides the pieces every API-family crate builds on: the
//! credential [`Config`], the EG1-HMAC-SHA256 request signer, and the
//! [`Session`] that signs and executes requests over `reqwest`.
//!
//! The session is deliberately thin. It issues exactly one HTTP request per
//! call and hands the raw response back to the caller; status checking and
//! response decoding belong to the API crates. Timeouts and cancellation are
//! the caller's to configure.
//!
//! # Example
//!
//! ```rust,no_run
//! use edgegrid::{Config, Session};
//!
//! # async fn run() -> Result<(), edgegrid::SessionError> {
//! let config = Config::from_env()?;
//! let session = Session::builder(config).build()?;
//! let response = session.get("/edgeworkers/v1/contracts").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod session;
mod signer;

pub use config::Config;
pub use error::SessionError;
pub use session::{Session, SessionBuilder};
