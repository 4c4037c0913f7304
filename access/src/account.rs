//! Business-owner account snapshot as read from the account store.
//!
//! Field names follow the store's snake_case columns; the camelCase spellings
//! used by the web client are accepted as aliases. Enum values the policy
//! does not recognize decode to `Unknown` instead of failing, and every
//! predicate in [`crate::policy`] treats `Unknown` as a denial.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque account identifier issued by the account store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Administrative review state of the business's identity documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Inactive,
    AwaitingPayment,
    PaymentSubmitted,
    Active,
    Expired,
    Suspended,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::AwaitingPayment => "awaiting_payment",
            SubscriptionStatus::PaymentSubmitted => "payment_submitted",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Suspended => "suspended",
            SubscriptionStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paid tier. Accounts without a plan carry `None` on the account itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Starter,
    Pro,
    Enterprise,
    #[serde(other)]
    Unknown,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Starter => "starter",
            SubscriptionPlan::Pro => "pro",
            SubscriptionPlan::Enterprise => "enterprise",
            SubscriptionPlan::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessAccount {
    pub id: AccountId,
    #[serde(alias = "verificationStatus")]
    pub verification_status: VerificationStatus,
    #[serde(alias = "subscriptionStatus")]
    pub subscription_status: SubscriptionStatus,
    #[serde(default, alias = "subscriptionPlan")]
    pub subscription_plan: Option<SubscriptionPlan>,
    #[serde(default, alias = "trialExpiresAt")]
    pub trial_expires_at: Option<DateTime<Utc>>,
}

impl BusinessAccount {
    /// A freshly created record: pending review, no subscription, no plan, no trial.
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            verification_status: VerificationStatus::Pending,
            subscription_status: SubscriptionStatus::Inactive,
            subscription_plan: None,
            trial_expires_at: None,
        }
    }

    pub fn with_verification(mut self, status: VerificationStatus) -> Self {
        self.verification_status = status;
        self
    }

    pub fn with_subscription(mut self, status: SubscriptionStatus) -> Self {
        self.subscription_status = status;
        self
    }

    pub fn with_plan(mut self, plan: Option<SubscriptionPlan>) -> Self {
        self.subscription_plan = plan;
        self
    }

    pub fn with_trial_expires_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.trial_expires_at = at;
        self
    }

    /// True when any status field failed to decode to a known value.
    pub fn has_unrecognized_fields(&self) -> bool {
        self.verification_status == VerificationStatus::Unknown
            || self.subscription_status == SubscriptionStatus::Unknown
            || self.subscription_plan == Some(SubscriptionPlan::Unknown)
    }
}
