use std::path::PathBuf;

use kots_log_analyzer::config::get_configuration;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "LOG_ROOT",
    "EMBEDDED_CLUSTER_LOG_DIR",
    "EMBEDDED_CLUSTER_DATA_LOG_DIR",
    "POD_LOG_DIR",
    "SYSLOG_PATH",
    "JOURNAL_SERVICES",
    "CLASSIFIER_ENABLED",
];

/// Every configuration variable, unset unless listed in `overrides`.
fn vars(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
    VARS.iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| *value);
            (*name, value)
        })
        .collect()
}

#[test]
fn test_defaults() {
    temp_env::with_vars(vars(&[]), || {
        let settings = get_configuration().unwrap();
        assert_eq!(settings.http_port, 8000);
        assert_eq!(settings.log_root, PathBuf::from("/logs"));
        assert_eq!(settings.layout.pod_log_dir, PathBuf::from("/logs/pods"));
        assert_eq!(
            settings.layout.embedded_cluster_data_dir,
            PathBuf::from("/logs/embedded-cluster-data/logs")
        );
        assert_eq!(
            settings.journal_services,
            vec![
                "k0scontroller.service",
                "k0sworker.service",
                "local-artifact-mirror.service"
            ]
        );
        assert!(settings.classifier_enabled);
    });
}

#[test]
fn test_overrides() {
    let overrides = vars(&[
        ("HTTP_PORT", "9100"),
        ("LOG_ROOT", "/mnt/bundle"),
        ("SYSLOG_PATH", "/var/log/messages"),
        ("JOURNAL_SERVICES", "kubelet.service"),
        ("CLASSIFIER_ENABLED", "false"),
    ]);
    temp_env::with_vars(overrides, || {
        let settings = get_configuration().unwrap();
        assert_eq!(settings.http_port, 9100);
        assert_eq!(settings.layout.pod_log_dir, PathBuf::from("/mnt/bundle/pods"));
        assert_eq!(settings.layout.syslog_path, PathBuf::from("/var/log/messages"));
        assert_eq!(settings.journal_services, vec!["kubelet.service"]);
        assert!(!settings.classifier_enabled);
    });
}

#[test]
fn test_invalid_values_fail() {
    temp_env::with_vars(vars(&[("HTTP_PORT", "0")]), || {
        let err = get_configuration().unwrap_err();
        assert!(err.to_string().contains("Port cannot be 0"));
    });

    temp_env::with_vars(vars(&[("CLASSIFIER_ENABLED", "maybe")]), || {
        assert!(get_configuration().is_err());
    });

    temp_env::with_vars(vars(&[("HTTP_PORT", "http")]), || {
        assert!(get_configuration().is_err());
    });
}
