//! Configuration specs for classifiers and the agent registry

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use textsift_core::{Error, Result};

/// A pattern set: one pattern or a non-empty list of patterns, OR-combined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    One(String),
    Many(Vec<String>),
}

impl PatternSpec {
    /// OR-join the set into a single regex source string.
    ///
    /// An empty list is a construction error; a pattern set must carry at
    /// least one pattern.
    pub fn join(&self) -> Result<String> {
        match self {
            Self::One(pattern) => Ok(pattern.clone()),
            Self::Many(patterns) if patterns.is_empty() => {
                Err(Error::pattern("pattern list must not be empty"))
            }
            Self::Many(patterns) => Ok(patterns.join("|")),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(patterns) if patterns.is_empty())
    }
}

impl From<&str> for PatternSpec {
    fn from(pattern: &str) -> Self {
        Self::One(pattern.to_string())
    }
}

impl From<Vec<&str>> for PatternSpec {
    fn from(patterns: Vec<&str>) -> Self {
        Self::Many(patterns.into_iter().map(String::from).collect())
    }
}

/// How multiple inclusion occurrences reduce to one boolean outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// True as soon as any occurrence is qualified
    #[default]
    Any,
    /// The first occurrence's qualification decides
    First,
    /// The last occurrence's qualification decides
    Last,
}

/// The text region searched for exclusion patterns around a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextWindow {
    /// The whole text
    Unbounded,
    /// A symmetric radius of characters around the match, clipped to bounds
    Radius(usize),
}

impl ContextWindow {
    /// Slice the window around the byte span `[start, end)`.
    ///
    /// The radius counts characters, not bytes, so the cut always lands on
    /// a UTF-8 boundary.
    pub fn slice<'a>(&self, text: &'a str, start: usize, end: usize) -> &'a str {
        match *self {
            Self::Unbounded => text,
            Self::Radius(radius) => {
                let lo = seek_back(text, start, radius);
                let hi = seek_forward(text, end, radius);
                &text[lo..hi]
            }
        }
    }
}

impl From<Option<usize>> for ContextWindow {
    fn from(radius: Option<usize>) -> Self {
        match radius {
            Some(radius) => Self::Radius(radius),
            None => Self::Unbounded,
        }
    }
}

fn seek_back(text: &str, pos: usize, n: usize) -> usize {
    text[..pos]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(pos, |(i, _)| i)
}

fn seek_forward(text: &str, pos: usize, n: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| pos + i)
}

/// Construction parameters for one binary matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherSpec {
    /// Inclusion patterns (required)
    pub patterns: PatternSpec,

    /// Exclusion patterns searched inside the context window
    #[serde(default)]
    pub exclude: Option<PatternSpec>,

    /// Context radius in characters; absent means the whole text
    #[serde(default)]
    pub context_radius: Option<usize>,

    /// Occurrence selection policy
    #[serde(default)]
    pub policy: MatchPolicy,
}

impl MatcherSpec {
    /// Spec with inclusion patterns only and all defaults
    pub fn pattern(patterns: impl Into<PatternSpec>) -> Self {
        Self {
            patterns: patterns.into(),
            exclude: None,
            context_radius: None,
            policy: MatchPolicy::Any,
        }
    }

    pub fn with_exclude(mut self, exclude: impl Into<PatternSpec>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = Some(radius);
        self
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Construction parameters for the multi-label classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLabelSpec {
    /// Matcher parameters per label
    pub labels: HashMap<String, MatcherSpec>,
}

/// Construction parameters for the multi-class resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiClassSpec {
    /// Matcher parameters per class
    pub classes: HashMap<String, MatcherSpec>,

    /// Tie-break precedence; without it resolution order is arbitrary
    #[serde(default)]
    pub priorities: Option<Vec<String>>,
}

/// One registry entry: which builder to use and its parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Stable builder kind, e.g. `regex_binary`
    pub kind: String,

    /// Builder parameters, passed through as JSON
    #[serde(default)]
    pub params: Value,
}

/// Top-level configuration: named agents to instantiate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub agents: HashMap<String, AgentSpec>,
}

impl AgentsConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("failed to parse agents config: {e}")))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Get all configured agent names
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_spec_join() {
        assert_eq!(PatternSpec::from(r"\d+").join().unwrap(), r"\d+");
        assert_eq!(
            PatternSpec::from(vec!["good", "great"]).join().unwrap(),
            "good|great"
        );
        assert!(PatternSpec::Many(vec![]).join().is_err());
    }

    #[test]
    fn test_matcher_spec_yaml_defaults() {
        let spec: MatcherSpec = serde_yaml::from_str(r#"patterns: "\\d+""#).unwrap();
        assert!(spec.exclude.is_none());
        assert!(spec.context_radius.is_none());
        assert_eq!(spec.policy, MatchPolicy::Any);

        let spec: MatcherSpec = serde_yaml::from_str(
            r#"
patterns:
  - great
  - good
exclude: bad
context_radius: 12
policy: last
"#,
        )
        .unwrap();
        assert_eq!(spec.context_radius, Some(12));
        assert_eq!(spec.policy, MatchPolicy::Last);
        assert!(matches!(spec.exclude, Some(PatternSpec::One(_))));
    }

    #[test]
    fn test_matcher_spec_rejects_non_pattern_types() {
        // A number is neither a string nor a list of strings
        assert!(serde_yaml::from_str::<MatcherSpec>("patterns: 7").is_err());
        assert!(serde_yaml::from_str::<MatcherSpec>("patterns: {a: b}").is_err());
    }

    #[test]
    fn test_context_window_slicing() {
        let text = "abcdefghij";
        assert_eq!(ContextWindow::Unbounded.slice(text, 4, 6), text);
        assert_eq!(ContextWindow::Radius(2).slice(text, 4, 6), "cdefgh");
        // Clipped at both ends
        assert_eq!(ContextWindow::Radius(100).slice(text, 4, 6), text);
        assert_eq!(ContextWindow::Radius(0).slice(text, 4, 6), "ef");
    }

    #[test]
    fn test_context_window_multibyte() {
        let text = "ééé match ééé";
        let start = text.find("match").unwrap();
        let end = start + "match".len();
        let window = ContextWindow::Radius(2).slice(text, start, end);
        assert_eq!(window, "é match é");
    }

    #[test]
    fn test_agents_config_yaml() {
        let config = AgentsConfig::from_yaml(
            r#"
agents:
  phone:
    kind: regex_binary
    params:
      patterns: "\\d{3}-\\d{3}-\\d{4}"
  tone:
    kind: regex_multiclass
    params:
      classes:
        positive: { patterns: great }
        negative: { patterns: bad }
      priorities: [negative, positive]
"#,
        )
        .unwrap();

        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents["phone"].kind, "regex_binary");
        assert!(config.agents["tone"].params.is_object());
    }

    #[test]
    fn test_agents_config_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "agents:\n  phone:\n    kind: regex_binary\n    params:\n      patterns: \"\\\\d+\""
        )
        .unwrap();

        let config = AgentsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.agent_names(), vec!["phone".to_string()]);

        let err = AgentsConfig::from_file("/definitely/not/there.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
