pub mod guards;
pub mod report;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use access::{AccessConfig, BusinessAccount};
use config_loader::schemas::ACCESS_CONFIG;
use config_loader::ConfigManager;

/// Policy config from `<config_dir>/access.json` (or schema defaults), then
/// environment overrides.
pub fn load_policy_config(manager: &ConfigManager) -> Result<AccessConfig> {
    let cfg: AccessConfig = manager
        .load(ACCESS_CONFIG)
        .with_context(|| format!("loading access config from {}", manager.config_dir().display()))?;
    Ok(cfg.with_env_overrides()?)
}

/// Read an account snapshot without schema validation so that unrecognized
/// values reach the policy and are denied there.
pub fn load_account(manager: &ConfigManager, path: &Path) -> Result<BusinessAccount> {
    let account: BusinessAccount = manager
        .parse_document(path)
        .with_context(|| format!("reading account snapshot {}", path.display()))?;
    if account.has_unrecognized_fields() {
        tracing::warn!(
            account = %account.id,
            verification = %account.verification_status,
            subscription = %account.subscription_status,
            "snapshot carries unrecognized values; affected checks will deny"
        );
    }
    Ok(account)
}

/// The instant to evaluate at: `now` (or the wall clock) shifted by `offset`.
pub fn resolve_now(
    now: Option<DateTime<Utc>>,
    offset: Option<std::time::Duration>,
) -> Result<DateTime<Utc>> {
    let base = now.unwrap_or_else(Utc::now);
    match offset {
        None => Ok(base),
        Some(d) => {
            let d = chrono::Duration::from_std(d).context("offset out of range")?;
            base.checked_add_signed(d)
                .context("offset moves the evaluation instant out of range")
        }
    }
}

pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp such as 2024-05-01T09:00:00Z: {}", e))
}
