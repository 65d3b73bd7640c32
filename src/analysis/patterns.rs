use regex::{Regex, RegexBuilder};

use crate::error::AnalyzerError;

/// Built-in fault signatures as (signature, root cause), in priority order.
pub const DEFAULT_SIGNATURES: &[(&str, &str)] = &[
    // Helm
    (r"helm.*release.*failed", "Helm release installation or upgrade failed"),
    (r"chart.*requires.*kubernetes.*version", "Kubernetes version compatibility issue"),
    (r"failed.*to.*install.*chart", "Chart installation failure"),
    (r"helm.*upgrade.*failed", "Helm upgrade failure"),
    (r"chart.*not.*found", "Chart not found in repository"),
    // KOTS
    (r"kots.*install.*failed", "KOTS installation failure"),
    (r"kots.*upgrade.*failed", "KOTS upgrade failure"),
    (r"kots.*version.*incompatible", "KOTS version compatibility issue"),
    (r"kots.*config.*invalid", "Invalid KOTS configuration"),
    (r"kots.*license.*invalid", "Invalid or expired KOTS license"),
    // Kubernetes
    (r"image.*pull.*failed", "Container image pull failure"),
    (r"pod.*crash.*loop", "Pod crash loop detected"),
    (r"insufficient.*cpu|insufficient.*memory", "Resource constraints"),
    (r"persistentvolumeclaim.*not.*found", "Storage/PVC issue"),
    (r"service.*not.*found", "Service discovery issue"),
    (r"configmap.*not.*found", "Configuration issue"),
    (r"secret.*not.*found", "Secret/credential issue"),
    (r"node.*not.*ready", "Node health issue"),
    (r"network.*policy.*denied", "Network policy restriction"),
    (r"rbac.*forbidden", "RBAC permission issue"),
    // Infrastructure
    (r"connection.*refused", "Network connectivity issue"),
    (r"permission.*denied", "Access control or permissions issue"),
    (r"timeout", "Resource exhaustion or network latency"),
    (r"out of memory", "Resource exhaustion"),
    (r"not found", "Missing resource or configuration"),
    (r"already exists", "Resource conflict"),
    (r"invalid.*format", "Data format or syntax error"),
    (r"authentication.*failed", "Credentials or authentication issue"),
    (r"dependency.*missing", "Missing dependency or package"),
    (r"port.*in use", "Resource conflict - port already in use"),
];

#[derive(Debug)]
struct PatternEntry {
    signature: String,
    root_cause: String,
    regex: Regex,
}

/// A catalog entry that fired against a log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    pub signature: String,
    pub root_cause: String,
}

/// Ordered fault signature table, compiled once and shared read-only.
#[derive(Debug)]
pub struct PatternCatalog {
    entries: Vec<PatternEntry>,
}

impl PatternCatalog {
    /// Compile a catalog from (signature, root cause) pairs, keeping their order.
    pub fn new<S, C>(signatures: impl IntoIterator<Item = (S, C)>) -> Result<Self, AnalyzerError>
    where
        S: Into<String>,
        C: Into<String>,
    {
        let entries = signatures
            .into_iter()
            .map(|(signature, root_cause)| {
                let signature = signature.into();
                let regex = RegexBuilder::new(&signature)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| AnalyzerError::Pattern {
                        signature: signature.clone(),
                        source,
                    })?;
                Ok(PatternEntry {
                    signature,
                    root_cause: root_cause.into(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>, AnalyzerError>>()?;

        Ok(Self { entries })
    }

    pub fn builtin() -> Result<Self, AnalyzerError> {
        Self::new(DEFAULT_SIGNATURES.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry whose signature occurs anywhere in `text`, in catalog order.
    ///
    /// An entry is reported once no matter how often it occurs.
    pub fn find_matches(&self, text: &str) -> Vec<PatternMatch> {
        let lowered = text.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.regex.is_match(&lowered))
            .map(|entry| PatternMatch {
                signature: entry.signature.clone(),
                root_cause: entry.root_cause.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn causes(matches: &[PatternMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.root_cause.as_str()).collect()
    }

    #[test]
    fn test_builtin_catalog_compiles() {
        let catalog = PatternCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), DEFAULT_SIGNATURES.len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_helm_release_line_hits_two_helm_entries() {
        let catalog = PatternCatalog::builtin().unwrap();
        let matches = catalog.find_matches("Error: helm release failed to install chart myapp");
        assert_eq!(
            causes(&matches),
            vec![
                "Helm release installation or upgrade failed",
                "Chart installation failure",
            ]
        );
        assert_eq!(matches[0].signature, r"helm.*release.*failed");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let catalog = PatternCatalog::builtin().unwrap();
        let matches = catalog.find_matches("dial tcp 10.0.0.1:443: CONNECTION REFUSED");
        assert_eq!(causes(&matches), vec!["Network connectivity issue"]);
    }

    #[test]
    fn test_order_follows_catalog_not_text_position() {
        let catalog = PatternCatalog::builtin().unwrap();
        let text = "request timeout\nnode worker-1 not ready\nconnection refused";
        assert_eq!(
            causes(&catalog.find_matches(text)),
            vec![
                "Node health issue",
                "Network connectivity issue",
                "Resource exhaustion or network latency",
            ]
        );
    }

    #[test]
    fn test_repeated_signature_reported_once() {
        let catalog = PatternCatalog::builtin().unwrap();
        let text = "timeout\ntimeout\nTIMEOUT again";
        assert_eq!(
            causes(&catalog.find_matches(text)),
            vec!["Resource exhaustion or network latency"]
        );
    }

    #[test]
    fn test_wildcards_do_not_span_lines() {
        let catalog = PatternCatalog::builtin().unwrap();
        assert!(catalog.find_matches("image\npull\nfailed").is_empty());
    }

    #[test]
    fn test_invalid_signature_is_rejected() {
        let err = PatternCatalog::new([("(unclosed", "broken")]).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_resource_alternation() {
        let catalog = PatternCatalog::builtin().unwrap();
        let matches = catalog.find_matches("0/3 nodes are available: 3 Insufficient memory.");
        assert_eq!(causes(&matches), vec!["Resource constraints"]);
    }

    proptest! {
        #[test]
        fn prop_matches_follow_catalog_order(picks in prop::collection::vec(0usize..4, 1..12)) {
            let catalog = PatternCatalog::new([
                ("alpha", "A"),
                ("bravo", "B"),
                ("charlie", "C"),
                ("delta", "D"),
            ])
            .unwrap();
            let words = ["alpha", "bravo", "charlie", "delta"];
            let text = picks.iter().map(|&i| words[i]).collect::<Vec<_>>().join(" ");

            let found = catalog.find_matches(&text);
            let mut expected: Vec<usize> = picks.clone();
            expected.sort_unstable();
            expected.dedup();
            let expected: Vec<&str> = expected.iter().map(|&i| ["A", "B", "C", "D"][i]).collect();
            prop_assert_eq!(causes(&found), expected);
        }
    }
}
