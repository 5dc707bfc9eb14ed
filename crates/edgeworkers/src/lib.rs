//! Typed client for the EdgeWorkers and EdgeKV management APIs
//!
//! Every operation follows the same shape: validate the request locally,
//! build the endpoint path, issue exactly one signed HTTP call through
//! [`edgegrid::Session`], accept exactly one expected status code, and
//! decode the body into a typed result. Anything else becomes an [`Error`]
//! carrying the operation name and either the validation failure, the
//! transport failure, or the decoded problem-details payload.
//!
//! # Example
//!
//! ```rust,no_run
//! use edgegrid::{Config, Session};
//! use edgeworkers::Client;
//! use edgeworkers::endpoints::activations::ListActivationsRequest;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::builder(Config::from_env()?).build()?;
//! let client = Client::new(session);
//!
//! let activations = client
//!     .activations()
//!     .list(ListActivationsRequest { edgeworker_id: 42, version: None })
//!     .await?;
//! println!("{} activations", activations.activations.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod endpoints;
pub mod error;
pub mod validation;

pub use client::Client;
pub use error::{ApiError, Error, ErrorCondition, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::endpoints::activations::{ActivationNetwork, ActivationsApi};
    pub use crate::endpoints::contracts::ContractsApi;
    pub use crate::endpoints::deactivations::DeactivationsApi;
    pub use crate::endpoints::edgekv_access_tokens::AccessTokensApi;
    pub use crate::endpoints::edgekv_initialize::InitializeApi;
    pub use crate::endpoints::edgekv_items::ItemsApi;
    pub use crate::endpoints::edgekv_namespaces::{EdgeKvNetwork, NamespacesApi};
    pub use crate::endpoints::ids::IdsApi;
    pub use crate::endpoints::resource_tiers::ResourceTiersApi;
    pub use crate::endpoints::secure_tokens::SecureTokensApi;
    pub use crate::endpoints::versions::VersionsApi;
    pub use crate::error::{ApiError, Error, ErrorCondition, Result};
}
