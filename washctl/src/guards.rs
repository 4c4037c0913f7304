use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::io::Write;

use access::policy::{self, days_remaining_in_trial, is_trial_active};
use access::{BusinessAccount, Capability, Decision};

pub const DECISION_EVENT: &str = "access.decision:v1";

/// Destination for decision events.
pub trait EventSink {
    fn emit(&mut self, event: &Value) -> Result<()>;
}

/// Writes one JSON document per line.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn emit(&mut self, event: &Value) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub events: Vec<Value>,
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &Value) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Decide `capability` for `account` at `now`, log it and hand the decision
/// event to `sink`.
pub fn check_and_emit(
    account: &BusinessAccount,
    capability: Capability,
    now: DateTime<Utc>,
    sink: &mut dyn EventSink,
) -> Result<Decision> {
    let decision = policy::evaluate(account, capability, now);

    if decision.allowed {
        tracing::debug!(account = %account.id, %capability, "access allowed");
    } else {
        tracing::info!(
            account = %account.id,
            %capability,
            reason = decision.reason.map(|r| r.as_str()).unwrap_or("unspecified"),
            "access denied"
        );
    }

    sink.emit(&decision_event(account, &decision, now))?;
    Ok(decision)
}

pub fn decision_event(account: &BusinessAccount, decision: &Decision, now: DateTime<Utc>) -> Value {
    let decision_json = match decision.reason {
        None => json!({ "allowed": decision.allowed }),
        Some(reason) => json!({ "allowed": decision.allowed, "reason": reason.as_str() }),
    };

    json!({
        "event": DECISION_EVENT,
        "ts": now.to_rfc3339(),
        "accountId": account.id.as_str(),
        "capability": decision.capability.as_str(),
        "decision": decision_json,
        "trial": trial_json(account, now)
    })
}

pub fn trial_json(account: &BusinessAccount, now: DateTime<Utc>) -> Value {
    json!({
        "active": is_trial_active(account, now),
        "daysRemaining": days_remaining_in_trial(account, now),
    })
}
