use std::fmt::Write as _;

use access::{AccessState, AccessSummary};

fn yes_no(v: bool) -> &'static str {
    if v {
        "yes"
    } else {
        "no"
    }
}

fn state_label(state: AccessState) -> &'static str {
    match state {
        AccessState::Paid => "paid",
        AccessState::Trial => "trial",
        AccessState::PendingReview => "payment under review",
        AccessState::Locked => "locked",
    }
}

/// Plain-text rendering of a summary for terminals.
pub fn render(summary: &AccessSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "account:         {}", summary.account_id);
    let _ = writeln!(out, "evaluated at:    {}", summary.evaluated_at.to_rfc3339());
    let _ = writeln!(out, "state:           {}", state_label(summary.state));
    let _ = writeln!(out, "verified:        {}", yes_no(summary.verified));
    let _ = writeln!(out, "paid active:     {}", yes_no(summary.paid_active));

    let trial = if summary.trial_active {
        let soon = if summary.trial_ending_soon {
            ", ending soon"
        } else {
            ""
        };
        format!("yes ({} days left{})", summary.trial_days_remaining, soon)
    } else {
        "no".to_string()
    };
    let _ = writeln!(out, "trial active:    {}", trial);
    let _ = writeln!(out, "booking access:  {}", yes_no(summary.booking_access));
    let _ = writeln!(out, "list vehicles:   {}", yes_no(summary.can_list_vehicles));

    for d in &summary.decisions {
        match d.reason {
            None => {
                let _ = writeln!(out, "  {:<18} allowed", d.capability.as_str());
            }
            Some(reason) => {
                let _ = writeln!(out, "  {:<18} denied ({})", d.capability.as_str(), reason);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use access::{AccessConfig, BusinessAccount, SubscriptionPlan, SubscriptionStatus, VerificationStatus};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn renders_trial_and_denied_capability() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let account = BusinessAccount::new("biz-r")
            .with_verification(VerificationStatus::Verified)
            .with_subscription(SubscriptionStatus::AwaitingPayment)
            .with_plan(Some(SubscriptionPlan::Starter))
            .with_trial_expires_at(Some(now + Duration::days(2)));
        let text = render(&AccessSummary::evaluate(&account, now, &AccessConfig::default()));

        assert!(text.contains("state:           trial"));
        assert!(text.contains("yes (2 days left, ending soon)"));
        assert!(text.contains("list-vehicles      denied (plan_excludes_capability)"));
        assert!(text.contains("accept-bookings    allowed"));
    }
}
