/// Number of steps every recommendation carries.
pub const STEP_COUNT: usize = 4;

pub type Steps = [&'static str; STEP_COUNT];

/// Keyword families checked in order against the lowercased root cause.
const RULES: &[(&str, Steps)] = &[
    (
        "helm",
        [
            "Check Helm chart version compatibility",
            "Verify Helm repository access",
            "Review Helm values and configuration",
            "Check Kubernetes version requirements",
        ],
    ),
    (
        "kots",
        [
            "Verify KOTS license validity",
            "Check KOTS version compatibility",
            "Review KOTS configuration",
            "Check application requirements",
        ],
    ),
    (
        "kubernetes",
        [
            "Check Kubernetes cluster health",
            "Verify resource availability",
            "Review pod and service status",
            "Check network policies",
        ],
    ),
    (
        "network",
        [
            "Check network connectivity",
            "Verify firewall settings",
            "Confirm service is running on the expected port",
            "Check network policies",
        ],
    ),
    (
        "permission",
        [
            "Verify user permissions",
            "Check RBAC settings",
            "Review security contexts",
            "Check service account permissions",
        ],
    ),
    (
        "resource",
        [
            "Check system resources (CPU, memory, disk)",
            "Review resource limits and quotas",
            "Consider scaling resources",
            "Check node capacity",
        ],
    ),
];

const FALLBACK: Steps = [
    "Review the error context for more details",
    "Check system logs for related errors",
    "Verify configuration settings",
    "Check application status",
];

/// Recommended next steps for a root cause; the first matching family wins.
pub fn steps_for(root_cause: &str) -> &'static Steps {
    let lowered = root_cause.to_lowercase();
    RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(&FALLBACK, |(_, steps)| steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_helm_family() {
        let steps = steps_for("Helm release installation or upgrade failed");
        assert_eq!(steps[0], "Check Helm chart version compatibility");
    }

    #[test]
    fn test_kots_family_is_case_insensitive() {
        assert_eq!(steps_for("Invalid KOTS configuration")[0], "Verify KOTS license validity");
    }

    #[test]
    fn test_first_family_wins() {
        // Mentions both kubernetes and resource; kubernetes is checked first.
        let steps = steps_for("Kubernetes resource pressure");
        assert_eq!(steps[0], "Check Kubernetes cluster health");

        // "Network policy restriction" hits network before anything else.
        assert_eq!(steps_for("Network policy restriction")[0], "Check network connectivity");
    }

    #[test]
    fn test_permission_and_resource_families() {
        assert_eq!(
            steps_for("Access control or permissions issue")[1],
            "Check RBAC settings"
        );
        assert_eq!(
            steps_for("Resource conflict - port already in use")[3],
            "Check node capacity"
        );
    }

    #[test]
    fn test_unmatched_label_uses_fallback() {
        assert_eq!(steps_for("Unknown issue"), &FALLBACK);
        assert_eq!(steps_for("Pod crash loop detected"), &FALLBACK);
    }

    proptest! {
        #[test]
        fn prop_helm_labels_get_helm_steps(prefix in "[a-z ]{0,20}", suffix in ".{0,40}") {
            let label = format!("{prefix}HeLm{suffix}");
            prop_assert_eq!(steps_for(&label), &RULES[0].1);
        }
    }
}
