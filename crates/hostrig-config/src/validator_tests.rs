use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_empty_host_name() {
    let mut config = Config::default();
    config.host.name = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "host.name"));
}

#[test]
fn test_validate_missing_work_dir_warning() {
    let mut config = Config::default();
    config.host.work_dir = Some("/nonexistent/hostrig/work".into());

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "host.work_dir"));
}

#[test]
fn test_validate_unknown_log_level() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors[0].to_string().starts_with("logging.level:"));
}

#[test]
fn test_validate_log_level_case_insensitive() {
    let mut config = Config::default();
    config.logging.level = "DEBUG".to_string();
    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_zero_max_files() {
    let mut config = Config::default();
    config.logging.max_files = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "logging.max_files"));
}

#[test]
fn test_validate_enabled_and_disabled_conflict() {
    let mut config = Config::default();
    config.extensions.enabled = vec!["script-shell".to_string()];
    config.extensions.disabled = vec!["script-shell".to_string()];

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.message.contains("script-shell")));
}

#[test]
fn test_validate_settings_for_disabled_extension() {
    let mut config = Config::default();
    config.extensions.disabled = vec!["script-template".to_string()];
    config
        .extensions
        .settings
        .insert("script-template".to_string(), serde_json::json!({}));

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_into_result() {
    let mut config = Config::default();
    config.logging.max_files = 0;
    config.host.name = String::new();

    match ConfigValidator::validate(&config).into_result() {
        Err(ConfigError::Invalid(messages)) => {
            assert_eq!(messages.len(), 2);
            assert!(messages[0].starts_with("host.name:"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let warnings = ConfigValidator::validate(&Config::default())
        .into_result()
        .unwrap();
    assert!(warnings.is_empty());
}
