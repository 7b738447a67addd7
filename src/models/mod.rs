//! Request-side types for the Glassfrog API.
//!
//! Response bodies are opaque JSON, so the only local models are the
//! parameter bag and the identifier-validation seam.

mod params;
mod resource_id;

pub use params::*;
pub use resource_id::*;
