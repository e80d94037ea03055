//! textsift agents
//!
//! Regex-based text classification cascade:
//! - [`RegexBinaryClassifier`]: one boolean decision from inclusion and
//!   exclusion pattern sets over a context window
//! - [`RegexMultiLabelClassifier`]: independent binary matchers, one per
//!   label, collected into a label set
//! - [`RegexMultiClassClassifier`]: the label set collapsed to a single
//!   class by priority order
//!
//! Plus the explicit [`AgentRegistry`] for building agents from
//! configuration by a stable string kind instead of dynamic loading.
//!
//! All classifiers are immutable after construction and safe to share
//! across the batch executor's workers.

pub mod binary;
pub mod config;
pub mod multiclass;
pub mod multilabel;
pub mod registry;

pub use binary::RegexBinaryClassifier;
pub use config::{
    AgentSpec, AgentsConfig, ContextWindow, MatchPolicy, MatcherSpec, MultiClassSpec,
    MultiLabelSpec, PatternSpec,
};
pub use multiclass::RegexMultiClassClassifier;
pub use multilabel::RegexMultiLabelClassifier;
pub use registry::AgentRegistry;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::binary::RegexBinaryClassifier;
    pub use crate::config::{ContextWindow, MatchPolicy, MatcherSpec, PatternSpec};
    pub use crate::multiclass::RegexMultiClassClassifier;
    pub use crate::multilabel::RegexMultiLabelClassifier;
    pub use crate::registry::AgentRegistry;
    pub use textsift_core::prelude::*;
}
