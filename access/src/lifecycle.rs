//! Legal moves on an account record.
//!
//! The account store owns the record; these helpers compute the next
//! snapshot so the admin console and the payment workflow agree on which
//! moves are allowed. Every transition resolves once: applying it from any
//! other source state is an error rather than an overwrite.

use chrono::{DateTime, Utc};

use crate::account::{
    AccountId, BusinessAccount, SubscriptionPlan, SubscriptionStatus, VerificationStatus,
};
use crate::config::AccessConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("account {account}: cannot {action} while verification is {from}")]
    Verification {
        account: AccountId,
        action: &'static str,
        from: VerificationStatus,
    },

    #[error("account {account}: cannot {action} while subscription is {from}")]
    Subscription {
        account: AccountId,
        action: &'static str,
        from: SubscriptionStatus,
    },

    #[error("account {account}: plan '{plan}' is not a purchasable plan")]
    UnknownPlan {
        account: AccountId,
        plan: SubscriptionPlan,
    },

    #[error("a {trial_days}-day trial starting at {signup_at} ends outside the supported time range")]
    TrialOutOfRange {
        signup_at: DateTime<Utc>,
        trial_days: u32,
    },
}

/// End of the free trial for an account created at `signup_at`.
pub fn trial_ends_at(
    signup_at: DateTime<Utc>,
    cfg: &AccessConfig,
) -> Result<DateTime<Utc>, TransitionError> {
    signup_at
        .checked_add_signed(cfg.trial_length())
        .ok_or(TransitionError::TrialOutOfRange {
            signup_at,
            trial_days: cfg.trial_days,
        })
}

/// The record written at signup: pending review, no subscription, trial started.
pub fn signup(
    id: impl Into<AccountId>,
    signup_at: DateTime<Utc>,
    cfg: &AccessConfig,
) -> Result<BusinessAccount, TransitionError> {
    let ends_at = trial_ends_at(signup_at, cfg)?;
    Ok(BusinessAccount::new(id).with_trial_expires_at(Some(ends_at)))
}

fn verification(
    mut account: BusinessAccount,
    action: &'static str,
    from: VerificationStatus,
    to: VerificationStatus,
) -> Result<BusinessAccount, TransitionError> {
    if account.verification_status != from {
        return Err(TransitionError::Verification {
            account: account.id,
            action,
            from: account.verification_status,
        });
    }
    tracing::debug!(account = %account.id, %from, %to, "verification transition");
    account.verification_status = to;
    Ok(account)
}

fn subscription(
    mut account: BusinessAccount,
    action: &'static str,
    from: &[SubscriptionStatus],
    to: SubscriptionStatus,
) -> Result<BusinessAccount, TransitionError> {
    if !from.contains(&account.subscription_status) {
        return Err(TransitionError::Subscription {
            account: account.id,
            action,
            from: account.subscription_status,
        });
    }
    tracing::debug!(account = %account.id, from = %account.subscription_status, %to, "subscription transition");
    account.subscription_status = to;
    Ok(account)
}

pub fn approve_verification(account: BusinessAccount) -> Result<BusinessAccount, TransitionError> {
    verification(
        account,
        "approve verification",
        VerificationStatus::Pending,
        VerificationStatus::Verified,
    )
}

pub fn reject_verification(account: BusinessAccount) -> Result<BusinessAccount, TransitionError> {
    verification(
        account,
        "reject verification",
        VerificationStatus::Pending,
        VerificationStatus::Rejected,
    )
}

/// A rejected business re-uploads its documents and goes back into review.
pub fn resubmit_verification(account: BusinessAccount) -> Result<BusinessAccount, TransitionError> {
    verification(
        account,
        "resubmit verification",
        VerificationStatus::Rejected,
        VerificationStatus::Pending,
    )
}

/// Pick (or switch) a plan before paying for it.
pub fn choose_plan(
    account: BusinessAccount,
    plan: SubscriptionPlan,
) -> Result<BusinessAccount, TransitionError> {
    if plan == SubscriptionPlan::Unknown {
        return Err(TransitionError::UnknownPlan {
            account: account.id,
            plan,
        });
    }
    let mut account = subscription(
        account,
        "choose a plan",
        &[
            SubscriptionStatus::Inactive,
            SubscriptionStatus::Expired,
            SubscriptionStatus::AwaitingPayment,
        ],
        SubscriptionStatus::AwaitingPayment,
    )?;
    account.subscription_plan = Some(plan);
    Ok(account)
}

/// Records the owner's payment proof. Grants nothing until confirmed.
pub fn submit_payment(account: BusinessAccount) -> Result<BusinessAccount, TransitionError> {
    subscription(
        account,
        "submit payment",
        &[SubscriptionStatus::AwaitingPayment],
        SubscriptionStatus::PaymentSubmitted,
    )
}

pub fn confirm_payment(account: BusinessAccount) -> Result<BusinessAccount, TransitionError> {
    subscription(
        account,
        "confirm payment",
        &[SubscriptionStatus::PaymentSubmitted],
        SubscriptionStatus::Active,
    )
}

pub fn reject_payment(account: BusinessAccount) -> Result<BusinessAccount, TransitionError> {
    subscription(
        account,
        "reject payment",
        &[SubscriptionStatus::PaymentSubmitted],
        SubscriptionStatus::AwaitingPayment,
    )
}

pub fn expire_subscription(account: BusinessAccount) -> Result<BusinessAccount, TransitionError> {
    subscription(
        account,
        "expire subscription",
        &[SubscriptionStatus::Active],
        SubscriptionStatus::Expired,
    )
}
