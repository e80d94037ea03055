//! Binary regex classifier

use crate::config::{ContextWindow, MatchPolicy, MatcherSpec, PatternSpec};
use async_trait::async_trait;
use regex::Regex;
use textsift_core::{Agent, Error, Result};

/// One boolean decision over a text: does any inclusion pattern occur
/// without an exclusion pattern nearby?
///
/// Occurrences of the OR-joined inclusion expression are scanned left to
/// right. Each occurrence is *qualified* unless the exclusion expression
/// matches inside its context window; the [`MatchPolicy`] decides which
/// occurrence's qualification becomes the outcome. Zero occurrences is
/// `false` under every policy.
///
/// Stateless after construction, so one instance can serve any number of
/// concurrent evaluations.
#[derive(Debug)]
pub struct RegexBinaryClassifier {
    include: Regex,
    exclude: Option<Regex>,
    window: ContextWindow,
    policy: MatchPolicy,
}

impl RegexBinaryClassifier {
    /// Build a classifier from matcher parameters.
    ///
    /// Fails with a pattern error when the inclusion set is empty or any
    /// expression does not compile.
    pub fn new(spec: MatcherSpec) -> Result<Self> {
        let include = compile(&spec.patterns, "inclusion")?;

        // An absent or empty exclusion set means no exclusion at all.
        let exclude = match &spec.exclude {
            Some(set) if !set.is_empty() => Some(compile(set, "exclusion")?),
            _ => None,
        };

        Ok(Self {
            include,
            exclude,
            window: spec.context_radius.into(),
            policy: spec.policy,
        })
    }

    /// Shorthand for an inclusion-only classifier with default policy
    pub fn from_pattern(pattern: impl Into<PatternSpec>) -> Result<Self> {
        Self::new(MatcherSpec::pattern(pattern))
    }

    /// Evaluate the boolean decision for `text`.
    pub fn evaluate(&self, text: &str) -> bool {
        let mut outcome = false;
        for occurrence in self.include.find_iter(text) {
            let window = self.window.slice(text, occurrence.start(), occurrence.end());
            let qualified = match &self.exclude {
                Some(exclude) => !exclude.is_match(window),
                None => true,
            };

            match self.policy {
                MatchPolicy::Any => {
                    if qualified {
                        return true;
                    }
                    outcome = qualified;
                }
                MatchPolicy::First => return qualified,
                MatchPolicy::Last => outcome = qualified,
            }
        }
        outcome
    }
}

fn compile(patterns: &PatternSpec, role: &str) -> Result<Regex> {
    let source = patterns.join()?;
    Regex::new(&source)
        .map_err(|e| Error::pattern(format!("failed to compile {role} pattern set: {e}")))
}

#[async_trait]
impl Agent for RegexBinaryClassifier {
    type Input = String;
    type Output = bool;

    async fn invoke(&self, input: String) -> Result<bool> {
        Ok(self.evaluate(&input))
    }

    fn name(&self) -> &str {
        "regex_binary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_phone_number_pattern() {
        let classifier = RegexBinaryClassifier::from_pattern(r"\d{3}-\d{3}-\d{4}").unwrap();

        assert!(classifier.evaluate("123-456-7890"));
        assert!(!classifier.evaluate("123-456-789"));
    }

    #[test]
    fn test_pattern_list_is_or_combined() {
        let classifier =
            RegexBinaryClassifier::from_pattern(vec!["good", "great", "excellent"]).unwrap();

        assert!(classifier.evaluate("a great product"));
        assert!(classifier.evaluate("an excellent product"));
        assert!(!classifier.evaluate("a mediocre product"));
    }

    #[test]
    fn test_exclusion_in_unbounded_window() {
        let classifier =
            RegexBinaryClassifier::new(MatcherSpec::pattern("great").with_exclude("bad")).unwrap();

        assert!(!classifier.evaluate("This is great but also bad"));
        assert!(classifier.evaluate("This is great"));
    }

    #[test]
    fn test_exclusion_limited_by_context_radius() {
        let classifier = RegexBinaryClassifier::new(
            MatcherSpec::pattern("great")
                .with_exclude("bad")
                .with_context_radius(5),
        )
        .unwrap();

        // "bad" sits well outside the 5-char window around "great"
        assert!(classifier.evaluate("great, though the ending was bad"));
        assert!(!classifier.evaluate("great bad"));
    }

    #[test]
    fn test_first_vs_last_policy() {
        // First occurrence disqualified by a nearby exclusion, second clean.
        let text = "great bad ........... great";
        let spec = MatcherSpec::pattern("great")
            .with_exclude("bad")
            .with_context_radius(5);

        let first = RegexBinaryClassifier::new(spec.clone().with_policy(MatchPolicy::First)).unwrap();
        let last = RegexBinaryClassifier::new(spec.clone().with_policy(MatchPolicy::Last)).unwrap();
        let any = RegexBinaryClassifier::new(spec).unwrap();

        assert!(!first.evaluate(text));
        assert!(last.evaluate(text));
        assert!(any.evaluate(text));
    }

    #[test]
    fn test_last_policy_with_disqualified_tail() {
        let text = "great ........... great bad";
        let classifier = RegexBinaryClassifier::new(
            MatcherSpec::pattern("great")
                .with_exclude("bad")
                .with_context_radius(5)
                .with_policy(MatchPolicy::Last),
        )
        .unwrap();

        assert!(!classifier.evaluate(text));
    }

    #[test]
    fn test_zero_occurrences_false_under_every_policy() {
        for policy in [MatchPolicy::Any, MatchPolicy::First, MatchPolicy::Last] {
            let classifier =
                RegexBinaryClassifier::new(MatcherSpec::pattern("absent").with_policy(policy))
                    .unwrap();
            assert!(!classifier.evaluate("nothing to see here"));
        }
    }

    #[test]
    fn test_empty_inclusion_list_is_rejected() {
        let err = RegexBinaryClassifier::new(MatcherSpec::pattern(Vec::<&str>::new())).unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = RegexBinaryClassifier::from_pattern("[unclosed").unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_empty_exclusion_list_means_no_exclusion() {
        let classifier = RegexBinaryClassifier::new(
            MatcherSpec::pattern("great").with_exclude(Vec::<&str>::new()),
        )
        .unwrap();
        assert!(classifier.evaluate("great and bad"));
    }

    #[tokio::test]
    async fn test_agent_invocation() {
        let classifier = RegexBinaryClassifier::from_pattern(r"\d+").unwrap();
        assert!(classifier.invoke("order 42".to_string()).await.unwrap());
        assert!(!classifier.invoke("no digits".to_string()).await.unwrap());
    }

    proptest! {
        #[test]
        fn prop_evaluation_is_idempotent(text in ".{0,200}") {
            let classifier = RegexBinaryClassifier::new(
                MatcherSpec::pattern(r"[a-c]{2}")
                    .with_exclude("xx")
                    .with_context_radius(4),
            )
            .unwrap();

            let first = classifier.evaluate(&text);
            let second = classifier.evaluate(&text);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_unmatched_pattern_is_false(text in "[0-9 ]{0,80}") {
            for policy in [MatchPolicy::Any, MatchPolicy::First, MatchPolicy::Last] {
                let classifier = RegexBinaryClassifier::new(
                    MatcherSpec::pattern("[a-z]+").with_policy(policy),
                )
                .unwrap();
                prop_assert!(!classifier.evaluate(&text));
            }
        }
    }
}
