//! Multi-label regex classifier

use crate::binary::RegexBinaryClassifier;
use crate::config::MatcherSpec;
use async_trait::async_trait;
use std::collections::HashMap;
use textsift_core::{Agent, Result};

/// Independent binary classifiers, one per label.
///
/// Every matcher is built once at construction and reused for all calls;
/// a label appears in the result iff its matcher returns true, so the
/// result is a set (duplicates are impossible). Labels do not interact.
pub struct RegexMultiLabelClassifier {
    matchers: Vec<(String, RegexBinaryClassifier)>,
}

impl RegexMultiLabelClassifier {
    /// Build one binary classifier per label, preserving iteration order.
    ///
    /// Propagates any pattern error from an underlying matcher.
    pub fn new(labels: impl IntoIterator<Item = (String, MatcherSpec)>) -> Result<Self> {
        let matchers = labels
            .into_iter()
            .map(|(label, spec)| Ok((label, RegexBinaryClassifier::new(spec)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { matchers })
    }

    /// Collect every label whose matcher fires on `text`.
    pub fn labels(&self, text: &str) -> Vec<String> {
        self.matchers
            .iter()
            .filter(|(_, matcher)| matcher.evaluate(text))
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// The configured label names, in construction order
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|(label, _)| label.as_str())
    }
}

#[async_trait]
impl Agent for RegexMultiLabelClassifier {
    type Input = String;
    type Output = Vec<String>;

    async fn invoke(&self, input: String) -> Result<Vec<String>> {
        Ok(self.labels(&input))
    }

    fn name(&self) -> &str {
        "regex_multilabel"
    }
}

/// Config maps deserialize into a `HashMap`, whose iteration order is
/// arbitrary; membership in the result set does not depend on it.
impl TryFrom<HashMap<String, MatcherSpec>> for RegexMultiLabelClassifier {
    type Error = textsift_core::Error;

    fn try_from(labels: HashMap<String, MatcherSpec>) -> Result<Self> {
        Self::new(labels)
    }
}
