use access::policy::{
    can_list_vehicles, days_remaining_in_trial, has_booking_access, is_paid_active,
    is_trial_active, is_verified,
};
use access::{BusinessAccount, SubscriptionPlan, SubscriptionStatus, VerificationStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};

const ALL_SUBSCRIPTIONS: [SubscriptionStatus; 7] = [
    SubscriptionStatus::Inactive,
    SubscriptionStatus::AwaitingPayment,
    SubscriptionStatus::PaymentSubmitted,
    SubscriptionStatus::Active,
    SubscriptionStatus::Expired,
    SubscriptionStatus::Suspended,
    SubscriptionStatus::Unknown,
];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 29, 23, 15, 0).unwrap()
}

fn trials() -> Vec<Option<DateTime<Utc>>> {
    vec![
        None,
        Some(now() - Duration::days(30)),
        Some(now() - Duration::seconds(1)),
        Some(now()),
        Some(now() + Duration::seconds(1)),
        Some(now() + Duration::days(3)),
        Some(now() + Duration::days(365)),
    ]
}

fn account(
    verification: VerificationStatus,
    subscription: SubscriptionStatus,
    trial: Option<DateTime<Utc>>,
) -> BusinessAccount {
    BusinessAccount::new("biz-under-test")
        .with_verification(verification)
        .with_subscription(subscription)
        .with_trial_expires_at(trial)
}

#[test]
fn given_unverified_account_then_no_booking_access_for_any_subscription_or_trial() {
    for verification in [
        VerificationStatus::Pending,
        VerificationStatus::Rejected,
        VerificationStatus::Unknown,
    ] {
        for subscription in ALL_SUBSCRIPTIONS {
            for trial in trials() {
                let a = account(verification, subscription, trial);
                assert!(!is_verified(&a));
                assert!(
                    !has_booking_access(&a, now()),
                    "{verification} / {subscription} / {trial:?} must be denied"
                );
                assert!(!can_list_vehicles(&a, now()));
            }
        }
    }
}

#[test]
fn given_verified_and_active_then_booking_access_regardless_of_trial() {
    for trial in trials() {
        let a = account(VerificationStatus::Verified, SubscriptionStatus::Active, trial);
        assert!(is_paid_active(&a));
        assert!(has_booking_access(&a, now()), "trial {trial:?}");
    }
}

#[test]
fn given_verified_unpaid_with_three_days_of_trial_then_access_and_three_days_left() {
    for subscription in ALL_SUBSCRIPTIONS
        .into_iter()
        .filter(|s| *s != SubscriptionStatus::Active)
    {
        let a = account(
            VerificationStatus::Verified,
            subscription,
            Some(now() + Duration::days(3)),
        );
        assert!(has_booking_access(&a, now()), "{subscription}");
        assert_eq!(days_remaining_in_trial(&a, now()), 3);
    }
}

#[test]
fn given_verified_unpaid_with_trial_ended_a_second_ago_then_no_access_and_zero_days() {
    for subscription in ALL_SUBSCRIPTIONS
        .into_iter()
        .filter(|s| *s != SubscriptionStatus::Active)
    {
        let a = account(
            VerificationStatus::Verified,
            subscription,
            Some(now() - Duration::seconds(1)),
        );
        assert!(!has_booking_access(&a, now()), "{subscription}");
        assert_eq!(days_remaining_in_trial(&a, now()), 0);
    }
}

#[test]
fn given_payment_submitted_after_trial_expiry_then_access_waits_for_activation() {
    let a = account(
        VerificationStatus::Verified,
        SubscriptionStatus::PaymentSubmitted,
        Some(now() - Duration::days(2)),
    );
    assert!(!has_booking_access(&a, now()));

    let a = a.with_subscription(SubscriptionStatus::Active);
    assert!(has_booking_access(&a, now()));
}

#[test]
fn given_rejected_verification_then_denied_even_with_paid_plan_and_live_trial() {
    let a = account(
        VerificationStatus::Rejected,
        SubscriptionStatus::Active,
        Some(now() + Duration::days(10)),
    )
    .with_plan(Some(SubscriptionPlan::Enterprise));
    assert!(!has_booking_access(&a, now()));
    assert!(!can_list_vehicles(&a, now()));
}

#[test]
fn given_no_trial_end_then_trial_is_never_active() {
    let a = account(VerificationStatus::Verified, SubscriptionStatus::Inactive, None);
    for instant in [
        DateTime::<Utc>::MIN_UTC,
        now() - Duration::days(10_000),
        now(),
        now() + Duration::days(10_000),
        DateTime::<Utc>::MAX_UTC,
    ] {
        assert!(!is_trial_active(&a, instant));
        assert_eq!(days_remaining_in_trial(&a, instant), 0);
    }
}

#[test]
fn given_extreme_timestamps_then_days_remaining_counts_the_whole_span() {
    let a = account(
        VerificationStatus::Verified,
        SubscriptionStatus::Inactive,
        Some(DateTime::<Utc>::MAX_UTC),
    );
    // MAX_UTC ends one nanosecond short of midnight, so the last day is partial
    let whole_days = (DateTime::<Utc>::MAX_UTC - DateTime::<Utc>::MIN_UTC).num_days();
    let days = days_remaining_in_trial(&a, DateTime::<Utc>::MIN_UTC);
    assert_eq!(i64::from(days), whole_days + 1);
}

#[test]
fn predicates_are_idempotent() {
    for subscription in ALL_SUBSCRIPTIONS {
        for trial in trials() {
            let a = account(VerificationStatus::Verified, subscription, trial)
                .with_plan(Some(SubscriptionPlan::Pro));
            let snapshot = a.clone();
            let first = (
                has_booking_access(&a, now()),
                can_list_vehicles(&a, now()),
                days_remaining_in_trial(&a, now()),
                is_trial_active(&a, now()),
            );
            let second = (
                has_booking_access(&a, now()),
                can_list_vehicles(&a, now()),
                days_remaining_in_trial(&a, now()),
                is_trial_active(&a, now()),
            );
            assert_eq!(first, second);
            assert_eq!(a, snapshot);
        }
    }
}
