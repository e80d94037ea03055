//! textsift core
//!
//! Shared foundation for textsift agents:
//! - The [`Agent`] trait: one capability, "invoke with an input, get a
//!   result or a typed failure", implemented by every classifier and by
//!   opaque collaborators (OCR, LLM wrappers) alike
//! - Error types and result handling
//! - The [`BatchExecutor`]: bounded parallel fan-out of one shared agent
//!   over a keyed or ordered batch of inputs

pub mod agent;
pub mod error;
pub mod executor;

pub use agent::{Agent, DynAgent, JsonAgent};
pub use error::{Error, Result};
pub use executor::{BatchExecutor, BatchInputs, BatchOutputs};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::agent::{Agent, DynAgent, JsonAgent};
    pub use crate::error::{Error, Result};
    pub use crate::executor::{BatchExecutor, BatchInputs, BatchOutputs};
}
