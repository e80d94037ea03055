//! Multi-class regex resolver

use crate::config::{MatcherSpec, MultiClassSpec};
use crate::multilabel::RegexMultiLabelClassifier;
use async_trait::async_trait;
use textsift_core::{Agent, Result};
use tracing::warn;

/// Collapses a multi-label result to a single class by priority order.
///
/// The first priority whose label is present wins; an empty label set
/// resolves to `None`, which is a normal outcome, not an error.
pub struct RegexMultiClassClassifier {
    multilabel: RegexMultiLabelClassifier,
    priorities: Vec<String>,
}

impl RegexMultiClassClassifier {
    /// Build the resolver over per-class matcher parameters.
    ///
    /// Without an explicit priority list the classes' construction order is
    /// substituted. That order is arbitrary when the classes came from a
    /// config map, so a warning is logged; relying on it is only safe for
    /// mutually exclusive classes.
    pub fn new(
        classes: impl IntoIterator<Item = (String, MatcherSpec)>,
        priorities: Option<Vec<String>>,
    ) -> Result<Self> {
        let multilabel = RegexMultiLabelClassifier::new(classes)?;
        let priorities = match priorities {
            Some(priorities) => priorities,
            None => {
                warn!(
                    "no class priorities configured; resolution order is \
                     arbitrary and only safe for mutually exclusive classes"
                );
                multilabel.label_names().map(String::from).collect()
            }
        };

        Ok(Self {
            multilabel,
            priorities,
        })
    }

    /// Build from a config spec
    pub fn from_spec(spec: MultiClassSpec) -> Result<Self> {
        Self::new(spec.classes, spec.priorities)
    }

    /// Resolve `text` to the highest-priority matching class, if any.
    pub fn resolve(&self, text: &str) -> Option<String> {
        let labels = self.multilabel.labels(text);
        self.priorities
            .iter()
            .find(|class| labels.iter().any(|label| label == *class))
            .cloned()
    }
}

#[async_trait]
impl Agent for RegexMultiClassClassifier {
    type Input = String;
    type Output = Option<String>;

    async fn invoke(&self, input: String) -> Result<Option<String>> {
        Ok(self.resolve(&input))
    }

    fn name(&self) -> &str {
        "regex_multiclass"
    }
}
