//! Booking-access eligibility.
//!
//! An account may use gated affordances iff it is verified AND (its
//! subscription is active OR its trial has not ended). Listing vehicles is
//! additionally closed to the Starter plan. Every function here is pure:
//! the clock is always passed in, nothing is mutated, nothing fails.

use chrono::{DateTime, Duration, Utc};

use crate::account::{BusinessAccount, SubscriptionPlan, SubscriptionStatus, VerificationStatus};
use crate::decision::{Capability, Decision, DenyReason};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

pub fn is_verified(account: &BusinessAccount) -> bool {
    account.verification_status == VerificationStatus::Verified
}

/// A missing trial end means no trial, never an unbounded one.
pub fn is_trial_active(account: &BusinessAccount, now: DateTime<Utc>) -> bool {
    account
        .trial_expires_at
        .map(|expires_at| now < expires_at)
        .unwrap_or(false)
}

/// Only `active` counts; `payment_submitted` waits for manual review.
pub fn is_paid_active(account: &BusinessAccount) -> bool {
    account.subscription_status == SubscriptionStatus::Active
}

pub fn has_booking_access(account: &BusinessAccount, now: DateTime<Utc>) -> bool {
    is_verified(account) && (is_paid_active(account) || is_trial_active(account, now))
}

pub fn can_list_vehicles(account: &BusinessAccount, now: DateTime<Utc>) -> bool {
    has_booking_access(account, now) && plan_allows_listing(account.subscription_plan)
}

/// Whole days left in the trial, rounded up. Zero once the trial has ended
/// or when there is none.
pub fn days_remaining_in_trial(account: &BusinessAccount, now: DateTime<Utc>) -> u32 {
    let Some(expires_at) = account.trial_expires_at else {
        return 0;
    };
    let left = expires_at - now;
    if left <= Duration::zero() {
        return 0;
    }
    // sub-millisecond remainders still count as a started day
    let ms = left.num_milliseconds().max(1);
    let days = ms / DAY_MS + i64::from(ms % DAY_MS != 0);
    // the whole representable range is under 200M days
    u32::try_from(days).unwrap_or(u32::MAX)
}

fn plan_allows_listing(plan: Option<SubscriptionPlan>) -> bool {
    !matches!(
        plan,
        Some(SubscriptionPlan::Starter) | Some(SubscriptionPlan::Unknown)
    )
}

/// Decide one capability and name the first check that failed.
pub fn evaluate(account: &BusinessAccount, capability: Capability, now: DateTime<Utc>) -> Decision {
    match account.verification_status {
        VerificationStatus::Verified => {}
        VerificationStatus::Rejected => {
            return Decision::deny(capability, DenyReason::VerificationRejected)
        }
        VerificationStatus::Pending => {
            return Decision::deny(capability, DenyReason::VerificationPending)
        }
        VerificationStatus::Unknown => {
            return Decision::deny(capability, DenyReason::VerificationUnknown)
        }
    }

    if !is_paid_active(account) && !is_trial_active(account, now) {
        let reason = if account.subscription_status == SubscriptionStatus::PaymentSubmitted {
            DenyReason::PaymentUnderReview
        } else if account.trial_expires_at.is_some() {
            DenyReason::TrialExpired
        } else {
            DenyReason::NoSubscription
        };
        return Decision::deny(capability, reason);
    }

    if capability == Capability::ListVehicles && !plan_allows_listing(account.subscription_plan) {
        return Decision::deny(capability, DenyReason::PlanExcludesCapability);
    }

    Decision::allow(capability)
}
