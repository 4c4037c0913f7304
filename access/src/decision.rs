use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::{BusinessAccount, SubscriptionStatus};
use crate::config::AccessConfig;
use crate::policy;

/// A gated business-owner affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    PublishServices,
    AcceptBookings,
    ListVehicles,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::PublishServices,
        Capability::AcceptBookings,
        Capability::ListVehicles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::PublishServices => "publish-services",
            Capability::AcceptBookings => "accept-bookings",
            Capability::ListVehicles => "list-vehicles",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability '{0}' (expected publish-services, accept-bookings or list-vehicles)")]
pub struct UnknownCapability(pub String);

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| UnknownCapability(s.to_string()))
    }
}

/// Why a capability was refused, in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    VerificationRejected,
    VerificationPending,
    VerificationUnknown,
    PaymentUnderReview,
    TrialExpired,
    NoSubscription,
    PlanExcludesCapability,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::VerificationRejected => "verification_rejected",
            DenyReason::VerificationPending => "verification_pending",
            DenyReason::VerificationUnknown => "verification_unknown",
            DenyReason::PaymentUnderReview => "payment_under_review",
            DenyReason::TrialExpired => "trial_expired",
            DenyReason::NoSubscription => "no_subscription",
            DenyReason::PlanExcludesCapability => "plan_excludes_capability",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub capability: Capability,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
}

impl Decision {
    pub(crate) fn allow(capability: Capability) -> Self {
        Self {
            capability,
            allowed: true,
            reason: None,
        }
    }

    pub(crate) fn deny(capability: Capability, reason: DenyReason) -> Self {
        Self {
            capability,
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Coarse classification used to pick which banner or paywall to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    Paid,
    Trial,
    PendingReview,
    Locked,
}

/// Every derived flag for one account at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSummary {
    pub account_id: String,
    pub evaluated_at: DateTime<Utc>,
    pub state: AccessState,
    pub verified: bool,
    pub paid_active: bool,
    pub trial_active: bool,
    pub trial_days_remaining: u32,
    pub trial_ending_soon: bool,
    pub booking_access: bool,
    pub can_list_vehicles: bool,
    pub decisions: Vec<Decision>,
}

impl AccessSummary {
    pub fn evaluate(account: &BusinessAccount, now: DateTime<Utc>, cfg: &AccessConfig) -> Self {
        let verified = policy::is_verified(account);
        let paid_active = policy::is_paid_active(account);
        let trial_active = policy::is_trial_active(account, now);
        let trial_days_remaining = policy::days_remaining_in_trial(account, now);
        let booking_access = policy::has_booking_access(account, now);

        let state = if !verified {
            AccessState::Locked
        } else if paid_active {
            AccessState::Paid
        } else if trial_active {
            AccessState::Trial
        } else if account.subscription_status == SubscriptionStatus::PaymentSubmitted {
            AccessState::PendingReview
        } else {
            AccessState::Locked
        };

        Self {
            account_id: account.id.to_string(),
            evaluated_at: now,
            state,
            verified,
            paid_active,
            trial_active,
            trial_days_remaining,
            trial_ending_soon: trial_active && trial_days_remaining <= cfg.trial_warning_days,
            booking_access,
            can_list_vehicles: policy::can_list_vehicles(account, now),
            decisions: Capability::ALL
                .iter()
                .map(|c| policy::evaluate(account, *c, now))
                .collect(),
        }
    }
}
