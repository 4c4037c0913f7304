use access::{AccessConfig, BusinessAccount, SubscriptionPlan, SubscriptionStatus, VerificationStatus};
use config_loader::schemas::{ACCESS_CONFIG, BUSINESS_ACCOUNT};
use config_loader::{ConfigError, ConfigManager};
use std::fs;
use tempfile::TempDir;

fn setup_test_environment() -> (TempDir, ConfigManager) {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let manager = ConfigManager::with_dir(config_dir);
    (temp_dir, manager)
}

#[test]
fn given_access_config_file_when_load_then_values_are_used() {
    let (_temp_dir, manager) = setup_test_environment();

    fs::write(
        manager.config_dir().join("access.json"),
        r#"{ "trialDays": 30 }"#,
    )
    .unwrap();

    let cfg: AccessConfig = manager.load(ACCESS_CONFIG).unwrap();
    assert_eq!(cfg.trial_days, 30);
    assert_eq!(cfg.trial_warning_days, 3);
}

#[test]
fn given_access_config_with_unknown_key_when_load_then_validation_error() {
    let (_temp_dir, manager) = setup_test_environment();

    fs::write(
        manager.config_dir().join("access.json"),
        r#"{ "trialDays": 30, "trialLength": "30d" }"#,
    )
    .unwrap();

    let result: Result<AccessConfig, ConfigError> = manager.load(ACCESS_CONFIG);
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn given_store_row_json_when_load_document_then_account_is_decoded() {
    let (temp_dir, manager) = setup_test_environment();

    let path = temp_dir.path().join("account.json");
    fs::write(
        &path,
        r#"{
            "id": "7f0c2a4e",
            "business_name": "Sparkle Auto Spa",
            "verification_status": "verified",
            "subscription_status": "active",
            "subscription_plan": "starter",
            "trial_expires_at": "2024-04-01T00:00:00Z"
        }"#,
    )
    .unwrap();

    let account: BusinessAccount = manager.load_document(BUSINESS_ACCOUNT, &path).unwrap();
    assert_eq!(account.id.as_str(), "7f0c2a4e");
    assert_eq!(account.verification_status, VerificationStatus::Verified);
    assert_eq!(account.subscription_status, SubscriptionStatus::Active);
    assert_eq!(account.subscription_plan, Some(SubscriptionPlan::Starter));
}

#[test]
fn given_camel_case_yaml_when_load_document_then_account_is_decoded() {
    let (temp_dir, manager) = setup_test_environment();

    let path = temp_dir.path().join("account.yaml");
    fs::write(
        &path,
        "id: biz-yaml\n\
         verificationStatus: pending\n\
         subscriptionStatus: awaiting_payment\n\
         subscriptionPlan: null\n\
         trialExpiresAt: \"2024-04-01T00:00:00Z\"\n",
    )
    .unwrap();

    let account: BusinessAccount = manager.load_document(BUSINESS_ACCOUNT, &path).unwrap();
    assert_eq!(account.verification_status, VerificationStatus::Pending);
    assert_eq!(account.subscription_status, SubscriptionStatus::AwaitingPayment);
    assert_eq!(account.subscription_plan, None);
    assert!(account.trial_expires_at.is_some());
}

#[test]
fn given_unrecognized_status_when_validate_file_then_error_points_at_field() {
    let (temp_dir, manager) = setup_test_environment();

    let path = temp_dir.path().join("account.json");
    fs::write(
        &path,
        r#"{
            "id": "biz-bad",
            "verification_status": "escalated",
            "subscription_status": "active"
        }"#,
    )
    .unwrap();

    let result = manager.validate_file(BUSINESS_ACCOUNT, &path);
    match result {
        Err(ConfigError::ValidationFailed { errors }) => {
            assert!(errors
                .iter()
                .any(|e| e.json_pointer.contains("verification_status")));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn given_row_without_statuses_when_validate_file_then_error() {
    let (temp_dir, manager) = setup_test_environment();

    let path = temp_dir.path().join("account.json");
    fs::write(&path, r#"{ "id": "biz-empty" }"#).unwrap();

    assert!(matches!(
        manager.validate_file(BUSINESS_ACCOUNT, &path),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn given_missing_snapshot_when_load_document_then_file_not_found() {
    let (temp_dir, manager) = setup_test_environment();

    let result: Result<BusinessAccount, ConfigError> =
        manager.load_document(BUSINESS_ACCOUNT, &temp_dir.path().join("nope.json"));
    assert!(matches!(
        result,
        Err(ConfigError::ConfigFileNotFound { .. })
    ));
}

#[test]
fn given_malformed_json_when_validate_file_then_parsing_error() {
    let (temp_dir, manager) = setup_test_environment();

    let path = temp_dir.path().join("account.json");
    fs::write(&path, "{ \"id\": ").unwrap();

    assert!(matches!(
        manager.validate_file(BUSINESS_ACCOUNT, &path),
        Err(ConfigError::ParsingFailed { .. })
    ));
}

#[test]
fn given_unknown_schema_when_load_then_schema_not_found() {
    let (_temp_dir, manager) = setup_test_environment();

    fs::write(manager.config_dir().join("bookings.json"), "{}").unwrap();

    let result: Result<serde_json::Value, ConfigError> = manager.load("bookings");
    assert!(matches!(result, Err(ConfigError::SchemaNotFound { .. })));
}
