//! # Glassfrog
//!
//! A client binding for the Glassfrog organizational-management REST API.
//!
//! [`GlassfrogClient`] authenticates with an API key and offers one method
//! per remote resource action (circles, projects, people, roles). Each
//! method validates its identifier, builds a path, and forwards to a single
//! generic [`request`](GlassfrogClient::request) helper. Response bodies are
//! returned as opaque [`serde_json::Value`]s.
//!
//! ## Modules
//!
//! - [`client`] - The HTTP client and its resource operations
//! - [`config`] - Configuration, including loading from environment variables
//! - [`error`] - Error types
//! - [`models`] - Request parameters and identifier validation
//!
//! ## Configuration
//!
//! - `GLASSFROG_API_KEY`: API key (required)
//! - `GLASSFROG_ENDPOINT`: API address (default `https://glassfrog.holacracy.org/api/v3`)
//! - `GLASSFROG_TIMEOUT_SECS`: transport timeout (default 30)
//! - `RUST_LOG`: log level for the binary (e.g., `glassfrog=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use glassfrog::{config, Config, GlassfrogClient, Params};
//!
//! async fn example() -> Result<(), glassfrog::GlassfrogError> {
//!     let client = GlassfrogClient::new(config::endpoint_from_env(), Config::from_env()?)?;
//!
//!     let roles = client.get_roles_for_circle(42, &Params::new()).await?;
//!     println!("{}", roles);
//!
//!     client
//!         .create_project(&Params::new().with("description", "Launch website"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{Endpoint, GlassfrogClient};
pub use config::Config;
pub use error::{GlassfrogError, RemoteError};
pub use models::{Params, ResourceId};
pub use reqwest::Method;
